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

//! # Framepulse Profiler
//!
//! The measurement-aggregation-and-recommendation pipeline: frame-timing
//! capture, per-component render tracking, a bounded-history statistics store
//! with snapshot publication, a rule-based recommendation engine, and report
//! export.
//!
//! The whole pipeline is single-threaded and event-driven: the host delivers
//! render events and frame-duration samples on its own loop, every accepted
//! mutation synchronously recomputes and publishes a fresh
//! [`ProfilerStats`](framepulse_core::ProfilerStats) snapshot, and subscribers
//! are notified within the same call stack. [`service::ProfilerService`] is
//! the host-facing facade tying the pieces together.

#![warn(missing_docs)]

pub mod capture;
pub mod recommend;
pub mod report;
pub mod service;
pub mod store;
pub mod tracker;

pub use capture::{CaptureStrategy, FrameTimingSource, HostCapabilities};
pub use recommend::{PerformanceSummary, RecommendationEngine};
pub use report::{ReportExporter, SerializedReport};
pub use service::ProfilerService;
pub use store::{ProfilerStore, SubscriptionId};
pub use tracker::RenderTracker;

// Re-export the shared data model so hosts can depend on a single crate.
pub use framepulse_core::{
    ComponentRenderStats, ElementHandle, FrameMeasurement, HeatmapTier, PerformanceHealth,
    PerformanceRecommendation, ProfilerConfig, ProfilerError, ProfilerResult, ProfilerStats,
    RankingTier, RecommendationCategory, RecommendationKind, RecommendationSeverity,
};
