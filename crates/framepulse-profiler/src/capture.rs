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

//! Frame-timing capture strategies.
//!
//! The host either exposes a tick operation the profiler can wrap
//! (hook-interception) or it does not, in which case the profiler derives
//! durations from animation-frame callbacks plus optional long-task
//! notifications (free-running). Capabilities are injected explicitly at
//! construction rather than probed from ambient globals, and the strategy is
//! chosen exactly once.

use std::time::Instant;

/// What the host environment can provide, declared up front.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HostCapabilities {
    /// The host exposes a tick operation whose invocations can be wrapped
    /// and timed.
    pub tick_hook: bool,
    /// The host delivers long-task notifications with a measured duration.
    pub long_task_events: bool,
}

/// The capture strategy selected at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureStrategy {
    /// Wall-clock timing wrapped around each host tick invocation.
    Hooked,
    /// Deltas between animation-frame callbacks, plus long-task durations.
    FreeRunning,
}

/// Produces a stream of frame-duration samples regardless of host capability.
///
/// The source itself holds no history; it turns host callbacks into samples
/// the caller feeds to the store. `pause` drops any pending sampler state so
/// no stale delta can be emitted after `resume`.
#[derive(Debug)]
pub struct FrameTimingSource {
    strategy: CaptureStrategy,
    long_task_events: bool,
    active: bool,
    last_animation_frame: Option<Instant>,
}

impl FrameTimingSource {
    /// Selects a strategy from the declared capabilities.
    ///
    /// Never fails: a missing long-task source merely degrades the
    /// free-running strategy to animation-frame deltas alone.
    pub fn new(capabilities: HostCapabilities) -> Self {
        let strategy = if capabilities.tick_hook {
            CaptureStrategy::Hooked
        } else {
            CaptureStrategy::FreeRunning
        };
        log::info!(
            "FrameTimingSource: using {:?} strategy (long tasks: {})",
            strategy,
            capabilities.long_task_events
        );
        Self {
            strategy,
            long_task_events: capabilities.long_task_events,
            active: true,
            last_animation_frame: None,
        }
    }

    /// The strategy selected at construction.
    pub fn strategy(&self) -> CaptureStrategy {
        self.strategy
    }

    /// Whether the source is currently accepting callbacks.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Times one invocation of the host's tick operation.
    ///
    /// Returns the measured duration alongside the tick's own result. The
    /// duration is produced even when the tick fails, so the caller can
    /// record the measurement before propagating the host error unchanged.
    /// Outside the hooked strategy the tick still runs (host work must never
    /// be swallowed) but no sample is produced.
    pub fn measure_tick<R, E>(
        &mut self,
        tick: impl FnOnce() -> Result<R, E>,
    ) -> (Option<f64>, Result<R, E>) {
        if self.strategy != CaptureStrategy::Hooked {
            log::debug!("FrameTimingSource: measure_tick called in free-running mode");
            return (None, tick());
        }
        let start = Instant::now();
        let result = tick();
        let duration_ms = start.elapsed().as_secs_f64() * 1000.0;
        if self.active {
            (Some(duration_ms), result)
        } else {
            (None, result)
        }
    }

    /// Handles one animation-frame callback in the free-running strategy.
    ///
    /// Emits the delta since the previous callback; the first callback after
    /// construction, `pause`, or `resume` only arms the sampler.
    pub fn on_animation_frame(&mut self, now: Instant) -> Option<f64> {
        if self.strategy != CaptureStrategy::FreeRunning || !self.active {
            return None;
        }
        let sample = self
            .last_animation_frame
            .map(|previous| now.duration_since(previous).as_secs_f64() * 1000.0);
        self.last_animation_frame = Some(now);
        sample
    }

    /// Handles one long-task notification in the free-running strategy.
    ///
    /// Passes the reported duration through as an additional sample; silent
    /// `None` when the capability was not declared.
    pub fn on_long_task(&mut self, duration_ms: f64) -> Option<f64> {
        if self.strategy != CaptureStrategy::FreeRunning || !self.active || !self.long_task_events
        {
            return None;
        }
        Some(duration_ms)
    }

    /// Stops accepting callbacks and cancels any pending sampler state.
    pub fn pause(&mut self) {
        self.active = false;
        self.last_animation_frame = None;
    }

    /// Restarts the source. The sampler re-arms on the next callback.
    pub fn resume(&mut self) {
        self.active = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn free_running(long_tasks: bool) -> FrameTimingSource {
        FrameTimingSource::new(HostCapabilities {
            tick_hook: false,
            long_task_events: long_tasks,
        })
    }

    #[test]
    fn strategy_selection_is_capability_driven() {
        let hooked = FrameTimingSource::new(HostCapabilities {
            tick_hook: true,
            long_task_events: false,
        });
        assert_eq!(hooked.strategy(), CaptureStrategy::Hooked);
        assert_eq!(free_running(true).strategy(), CaptureStrategy::FreeRunning);
    }

    #[test]
    fn hooked_measures_successful_ticks() {
        let mut source = FrameTimingSource::new(HostCapabilities {
            tick_hook: true,
            long_task_events: false,
        });
        let (sample, result) = source.measure_tick(|| Ok::<_, ()>(42));
        assert_eq!(result, Ok(42));
        assert!(sample.unwrap() >= 0.0);
    }

    #[test]
    fn hooked_measures_failing_ticks_and_propagates_error() {
        let mut source = FrameTimingSource::new(HostCapabilities {
            tick_hook: true,
            long_task_events: false,
        });
        let (sample, result) = source.measure_tick(|| Err::<(), _>("boom"));
        assert!(sample.is_some());
        assert_eq!(result, Err("boom"));
    }

    #[test]
    fn measure_tick_outside_hooked_mode_still_runs_tick() {
        let mut source = free_running(false);
        let mut ran = false;
        let (sample, result) = source.measure_tick(|| {
            ran = true;
            Ok::<_, ()>(())
        });
        assert!(ran);
        assert!(sample.is_none());
        assert!(result.is_ok());
    }

    #[test]
    fn first_animation_frame_only_arms_the_sampler() {
        let mut source = free_running(false);
        let start = Instant::now();
        assert_eq!(source.on_animation_frame(start), None);
        let sample = source
            .on_animation_frame(start + Duration::from_millis(16))
            .unwrap();
        assert!((sample - 16.0).abs() < 0.5);
    }

    #[test]
    fn long_task_passthrough_requires_capability() {
        let mut with_source = free_running(true);
        assert_eq!(with_source.on_long_task(120.0), Some(120.0));

        // Without the capability the source degrades silently.
        let mut without_source = free_running(false);
        assert_eq!(without_source.on_long_task(120.0), None);
    }

    #[test]
    fn pause_cancels_pending_sampler_state() {
        let mut source = free_running(true);
        let start = Instant::now();
        source.on_animation_frame(start);
        source.pause();
        assert_eq!(
            source.on_animation_frame(start + Duration::from_millis(16)),
            None
        );
        assert_eq!(source.on_long_task(80.0), None);

        source.resume();
        // Re-armed: the first callback after resume emits nothing.
        assert_eq!(
            source.on_animation_frame(start + Duration::from_millis(32)),
            None
        );
        assert!(source
            .on_animation_frame(start + Duration::from_millis(48))
            .is_some());
    }
}
