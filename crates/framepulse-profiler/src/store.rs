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

//! The aggregation store: bounded frame history, render counters, and
//! snapshot publication.
//!
//! All mutation enters here, on a single cooperative thread. Every accepted
//! mutation recomputes the snapshot as a whole and delivers it synchronously
//! to every observer, in subscription order, within the same call stack. An
//! observer therefore always sees fully-applied state, and long-running
//! observer work directly delays further event delivery, degrading the very
//! metric being measured, so observers should stay cheap.

use crate::recommend::RecommendationEngine;
use crate::report::{ReportExporter, SerializedReport};
use crate::tracker::RenderTracker;
use chrono::Utc;
use framepulse_core::thresholds::MAX_TOP_COMPONENTS;
use framepulse_core::{ElementHandle, FrameMeasurement, HeatmapTier, ProfilerConfig, ProfilerStats};
use std::collections::{BTreeMap, VecDeque};

/// Identifies one subscription for later removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type SnapshotObserver = Box<dyn FnMut(&ProfilerStats)>;

/// Owns all measurement state and publishes snapshots.
pub struct ProfilerStore {
    frames: VecDeque<FrameMeasurement>,
    tracker: RenderTracker,
    max_frame_history: usize,
    paused: bool,
    engine: RecommendationEngine,
    observers: Vec<(SubscriptionId, SnapshotObserver)>,
    next_subscription: u64,
    latest: ProfilerStats,
}

impl ProfilerStore {
    /// Creates an empty store with the window size from `config`.
    ///
    /// The initial snapshot is the all-zero empty snapshot; it carries no
    /// recommendations until the first mutation runs the rule engine.
    pub fn new(config: &ProfilerConfig) -> Self {
        Self {
            frames: VecDeque::new(),
            tracker: RenderTracker::new(),
            max_frame_history: config.effective_history(),
            paused: false,
            engine: RecommendationEngine::new(),
            observers: Vec::new(),
            next_subscription: 0,
            latest: ProfilerStats::empty(epoch_ms()),
        }
    }

    /// Appends a frame measurement, evicting the oldest entry once the
    /// history exceeds the window size. No-op while paused.
    pub fn record_frame(&mut self, duration_ms: f64) {
        if self.paused {
            log::debug!("ProfilerStore: dropping frame sample while paused");
            return;
        }
        self.frames.push_back(FrameMeasurement {
            duration: duration_ms,
            timestamp: epoch_ms(),
        });
        if self.frames.len() > self.max_frame_history {
            self.frames.pop_front();
        }
        self.update_stats();
    }

    /// Counts one render of `name`. No-op while paused.
    pub fn record_render(&mut self, name: &str, element: Option<ElementHandle>) {
        if self.paused {
            log::debug!("ProfilerStore: dropping render event while paused");
            return;
        }
        self.tracker.record_render(name, element);
        self.update_stats();
    }

    /// Registers an observer for every published snapshot.
    ///
    /// The observer is invoked immediately with the latest snapshot
    /// (replay-latest), then once per subsequent mutation, in mutation order.
    pub fn subscribe(&mut self, mut observer: impl FnMut(&ProfilerStats) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        observer(&self.latest);
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Removes a subscription. Returns false if it was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(observer_id, _)| *observer_id != id);
        self.observers.len() != before
    }

    /// Clears frame history and render counters, then republishes an empty
    /// snapshot. Idempotent.
    pub fn reset(&mut self) {
        self.frames.clear();
        self.tracker.reset();
        self.update_stats();
    }

    /// Suspends intake of frame and render events. Events delivered while
    /// paused are dropped, not queued; accumulated history is kept.
    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Resumes intake of frame and render events.
    pub fn resume(&mut self) {
        self.paused = false;
    }

    /// Whether intake is currently suspended.
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// A clone of the latest published snapshot.
    pub fn stats(&self) -> ProfilerStats {
        self.latest.clone()
    }

    /// Render count for `name`; 0 if untracked.
    pub fn render_count(&self, name: &str) -> u64 {
        self.tracker.count(name)
    }

    /// All render counters in name order.
    pub fn all_render_counts(&self) -> BTreeMap<String, u64> {
        self.tracker.all_counts()
    }

    /// Heatmap tier for `name` under the heatmap-suppression table.
    pub fn heatmap_tier(&self, name: &str) -> HeatmapTier {
        self.tracker.heatmap_tier(name)
    }

    /// The currently retained frame history, oldest first.
    pub fn frame_history(&self) -> Vec<FrameMeasurement> {
        self.frames.iter().copied().collect()
    }

    /// Builds a structured export report from the current state.
    ///
    /// Pure read: does not mutate state and is safe to call at any time,
    /// including while paused.
    pub fn export_report(&self) -> SerializedReport {
        ReportExporter::new().build(&self.latest, self.all_render_counts(), self.frame_history())
    }

    /// Recomputes the snapshot from current state and publishes it.
    fn update_stats(&mut self) {
        let last_frame_duration = self.frames.back().map(|m| m.duration).unwrap_or(0.0);
        let average_frame_duration = if self.frames.is_empty() {
            0.0
        } else {
            self.frames.iter().map(|m| m.duration).sum::<f64>() / self.frames.len() as f64
        };

        let mut stats = ProfilerStats {
            last_frame_duration,
            average_frame_duration,
            frame_count: self.frames.len(),
            top_components: self.tracker.ranked_components(MAX_TOP_COMPONENTS),
            last_measurement: epoch_ms(),
            recommendations: Vec::new(),
        };
        stats.recommendations = self.engine.analyze(&stats);

        self.latest = stats;
        self.publish();
    }

    fn publish(&mut self) {
        log::trace!(
            "ProfilerStore: publishing snapshot ({} frames, {} components)",
            self.latest.frame_count,
            self.latest.top_components.len()
        );
        for (_, observer) in &mut self.observers {
            observer(&self.latest);
        }
    }
}

impl std::fmt::Debug for ProfilerStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProfilerStore")
            .field("frames", &self.frames.len())
            .field("tracked", &self.tracker.tracked())
            .field("paused", &self.paused)
            .field("observers", &self.observers.len())
            .finish()
    }
}

/// Current wall-clock time in epoch milliseconds.
fn epoch_ms() -> u64 {
    Utc::now().timestamp_millis().max(0) as u64
}
