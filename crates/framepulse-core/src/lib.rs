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

//! # Framepulse Core
//!
//! Foundational crate containing the profiler's data model, classification
//! tables, thresholds, and configuration contracts.
//!
//! This crate defines the "common language" for frame-timing telemetry: what a
//! measurement, a snapshot, and a recommendation look like. It is free of any
//! UI-toolkit or host-framework dependency so that the aggregation pipeline in
//! `framepulse-profiler` stays constructible and testable anywhere. Host
//! elements are referred to only through the opaque, advisory
//! [`ElementHandle`].

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod severity;
pub mod stats;
pub mod thresholds;

pub use config::ProfilerConfig;
pub use error::{ProfilerError, ProfilerResult};
pub use severity::{HeatmapTier, RankingTier};
pub use stats::{
    ComponentRenderStats, ElementHandle, FrameMeasurement, PerformanceHealth,
    PerformanceRecommendation, ProfilerStats, RecommendationCategory, RecommendationKind,
    RecommendationSeverity,
};
