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

//! Fixed thresholds shared by the rule engine, scoring, and report export.

/// Frame budget for 60fps, in milliseconds.
pub const TARGET_FRAME_TIME_MS: f64 = 16.67;

/// Frame budget for 30fps, in milliseconds.
pub const ACCEPTABLE_FRAME_TIME_MS: f64 = 33.33;

/// Frame duration above which a single frame is considered critical.
pub const CRITICAL_FRAME_TIME_MS: f64 = 50.0;

/// Minimum score for an `excellent` health grade.
pub const EXCELLENT_SCORE: u32 = 90;

/// Minimum score for a `good` health grade.
pub const GOOD_SCORE: u32 = 75;

/// Minimum score for a `fair` health grade.
pub const FAIR_SCORE: u32 = 60;

/// Minimum score for a `poor` health grade; anything below is `critical`.
pub const POOR_SCORE: u32 = 40;

/// Maximum number of entries in a snapshot's top-components list.
pub const MAX_TOP_COMPONENTS: usize = 10;
