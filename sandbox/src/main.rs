// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

// Framepulse Sandbox
// Drives the profiler with a synthetic workload and prints the analysis.

use std::time::{Duration, Instant};

use anyhow::Result;
use framepulse_profiler::{HostCapabilities, ProfilerConfig, ProfilerService};

/// A fake UI tree: component names with how often each one re-renders per
/// simulated frame.
const WORKLOAD: &[(&str, u64)] = &[
    ("app-shell", 1),
    ("nav-bar", 1),
    ("data-grid", 4),
    ("grid-row", 8),
    ("status-badge", 2),
];

fn simulate(profiler: &mut ProfilerService) {
    let start = Instant::now();
    let mut now = start;

    // Sixty smooth frames at ~16ms each.
    for frame in 0..60u64 {
        profiler.on_animation_frame(now);
        now += Duration::from_millis(16);
        for (name, renders_per_frame) in WORKLOAD {
            for _ in 0..*renders_per_frame {
                profiler.record_render(name, None);
            }
        }
        if frame % 20 == 0 {
            log::debug!("simulated frame {frame}");
        }
    }

    // A jank burst: three dropped frames and a long task.
    for _ in 0..3 {
        profiler.on_animation_frame(now);
        now += Duration::from_millis(70);
    }
    profiler.on_animation_frame(now);
    profiler.on_long_task(180.0);
}

fn main() -> Result<()> {
    use env_logger::{Builder, Env};

    Builder::from_env(Env::default().default_filter_or("info")).init();

    let mut profiler = ProfilerService::new(
        ProfilerConfig::default(),
        HostCapabilities {
            tick_hook: false,
            long_task_events: true,
        },
    );

    profiler.subscribe(|stats| {
        if stats.last_frame_duration > 50.0 {
            log::warn!(
                "slow frame: {:.1}ms (avg {:.1}ms over {} frames)",
                stats.last_frame_duration,
                stats.average_frame_duration,
                stats.frame_count
            );
        }
    });

    simulate(&mut profiler);

    let stats = profiler.stats();
    log::info!(
        "captured {} frames, avg {:.2}ms, last {:.2}ms",
        stats.frame_count,
        stats.average_frame_duration,
        stats.last_frame_duration
    );
    for component in &stats.top_components {
        log::info!(
            "  {} rendered {} times ({})",
            component.name,
            component.render_count,
            component.severity
        );
    }
    for recommendation in &stats.recommendations {
        log::info!(
            "[{}] {} (priority {})",
            recommendation.severity,
            recommendation.title,
            recommendation.priority
        );
    }

    let report = profiler.export()?;
    println!("{report}");
    Ok(())
}
