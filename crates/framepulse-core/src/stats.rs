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

//! The profiler's data model: measurements, snapshots, and recommendations.

use crate::severity::RankingTier;
use serde::Serialize;
use std::fmt::Display;

/// A single measured unit of rendering work.
///
/// Immutable once created; owned exclusively by the aggregation store's
/// bounded history and evicted once it ages out of the window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FrameMeasurement {
    /// Duration of the frame in milliseconds.
    pub duration: f64,
    /// Wall-clock timestamp of the measurement, in epoch milliseconds.
    pub timestamp: u64,
}

/// An opaque, advisory handle to a host-side UI element.
///
/// The profiler never dereferences this; it exists solely so a host can map
/// a tracked name back to one of its own elements for highlighting. It is a
/// non-owning association and never appears in serialized output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementHandle(pub u64);

/// Per-component render statistics as they appear in a snapshot's top-N list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentRenderStats {
    /// Component or element name as reported by the host.
    pub name: String,
    /// Number of renders observed since the last reset.
    pub render_count: u64,
    /// Ranking-table severity for this count.
    pub severity: RankingTier,
    /// Advisory back-reference for host-side highlighting. Never serialized.
    #[serde(skip)]
    pub element: Option<ElementHandle>,
}

/// An immutable, atomically-produced summary of all aggregated measurements.
///
/// A snapshot is recomputed as a whole on every accepted mutation and
/// published to subscribers; observers never see partially-updated state.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfilerStats {
    /// Duration of the most recent frame in milliseconds (0 if none).
    pub last_frame_duration: f64,
    /// Arithmetic mean over the retained frame history (0 if empty).
    pub average_frame_duration: f64,
    /// Number of frames currently retained in the history window.
    pub frame_count: usize,
    /// Top components by render count, descending, at most ten entries.
    /// Ties keep first-seen order.
    pub top_components: Vec<ComponentRenderStats>,
    /// Wall-clock timestamp of the last mutation, in epoch milliseconds.
    pub last_measurement: u64,
    /// Recommendations derived from this snapshot. Each snapshot carries its
    /// own freshly-generated set.
    pub recommendations: Vec<PerformanceRecommendation>,
}

impl ProfilerStats {
    /// Creates the all-zero snapshot published before any measurement arrives.
    pub fn empty(timestamp_ms: u64) -> Self {
        Self {
            last_frame_duration: 0.0,
            average_frame_duration: 0.0,
            frame_count: 0,
            top_components: Vec::new(),
            last_measurement: timestamp_ms,
            recommendations: Vec::new(),
        }
    }

    /// Components graded `high` by the ranking table.
    pub fn high_render_components(&self) -> impl Iterator<Item = &ComponentRenderStats> {
        self.top_components
            .iter()
            .filter(|c| c.severity == RankingTier::High)
    }

    /// Components graded `medium` by the ranking table.
    pub fn medium_render_components(&self) -> impl Iterator<Item = &ComponentRenderStats> {
        self.top_components
            .iter()
            .filter(|c| c.severity == RankingTier::Medium)
    }
}

/// How a recommendation should be presented by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationKind {
    /// Something worth fixing soon.
    Warning,
    /// An active performance defect.
    Error,
    /// Informational only.
    Info,
    /// An improvement opportunity.
    Optimization,
}

/// Urgency of a recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationSeverity {
    /// Cosmetic or advisory.
    Low,
    /// Worth scheduling.
    Medium,
    /// Should be addressed promptly.
    High,
    /// Actively degrading the application.
    Critical,
}

/// Broad problem area a recommendation belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RecommendationCategory {
    /// Frame-time and throughput issues.
    Performance,
    /// Per-component render behavior.
    Rendering,
    /// Allocation and retention patterns.
    Memory,
    /// General engineering hygiene.
    BestPractice,
}

/// Overall health grade derived from the performance score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PerformanceHealth {
    /// Score 90 or above.
    Excellent,
    /// Score 75 to 89.
    Good,
    /// Score 60 to 74.
    Fair,
    /// Score 40 to 59.
    Poor,
    /// Score below 40.
    Critical,
}

impl Display for RecommendationSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecommendationSeverity::Low => write!(f, "low"),
            RecommendationSeverity::Medium => write!(f, "medium"),
            RecommendationSeverity::High => write!(f, "high"),
            RecommendationSeverity::Critical => write!(f, "critical"),
        }
    }
}

impl Display for PerformanceHealth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PerformanceHealth::Excellent => write!(f, "excellent"),
            PerformanceHealth::Good => write!(f, "good"),
            PerformanceHealth::Fair => write!(f, "fair"),
            PerformanceHealth::Poor => write!(f, "poor"),
            PerformanceHealth::Critical => write!(f, "critical"),
        }
    }
}

/// A single human-readable finding produced by one rule.
///
/// Generated fresh on every analysis pass and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerformanceRecommendation {
    /// Stable, rule-identifying id (e.g. `critical-frame-time`).
    pub id: &'static str,
    /// Presentation kind.
    #[serde(rename = "type")]
    pub kind: RecommendationKind,
    /// Short headline.
    pub title: String,
    /// Explanation seeded with the triggering metric values.
    pub description: String,
    /// Urgency grade.
    pub severity: RecommendationSeverity,
    /// Problem area.
    pub category: RecommendationCategory,
    /// Ordered, concrete remediation steps.
    pub suggestions: Vec<String>,
    /// Expected effect of acting on the recommendation.
    pub impact: String,
    /// Sort key; higher means more urgent.
    pub priority: u32,
}
