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

//! Static profiler configuration, fixed at construction time.

use serde::{Deserialize, Serialize};

/// Construction-time profiler configuration.
///
/// All fields are optional tuning knobs; construction from any value never
/// fails. The classification tables in [`crate::severity`] are authoritative
/// for tiering — `render_count_threshold` is advisory information a host may
/// surface, not an override.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfilerConfig {
    /// Advisory render-count threshold for host-side display (default 10).
    pub render_count_threshold: u32,
    /// Advisory frame-duration threshold in milliseconds (default 16.67).
    pub frame_duration_threshold_ms: f64,
    /// Whether per-element heatmap lookups are served (default true).
    pub enable_heatmap: bool,
    /// Size of the frame-history window `W` (default 100).
    pub max_frame_history: usize,
}

impl ProfilerConfig {
    /// History window size with a floor of one entry.
    pub fn effective_history(&self) -> usize {
        self.max_frame_history.max(1)
    }
}

impl Default for ProfilerConfig {
    fn default() -> Self {
        Self {
            render_count_threshold: 10,
            frame_duration_threshold_ms: 16.67,
            enable_heatmap: true,
            max_frame_history: 100,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ProfilerConfig::default();
        assert_eq!(config.render_count_threshold, 10);
        assert_eq!(config.frame_duration_threshold_ms, 16.67);
        assert!(config.enable_heatmap);
        assert_eq!(config.max_frame_history, 100);
    }

    #[test]
    fn effective_history_has_floor() {
        let config = ProfilerConfig {
            max_frame_history: 0,
            ..Default::default()
        };
        assert_eq!(config.effective_history(), 1);
    }

    #[test]
    fn partial_deserialization_fills_defaults() {
        let config: ProfilerConfig = serde_json::from_str(r#"{"maxFrameHistory": 5}"#).unwrap();
        assert_eq!(config.max_frame_history, 5);
        assert!(config.enable_heatmap);
    }
}
