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

//! Structured export reports.
//!
//! Building a report is a pure function over a snapshot plus the raw counter
//! and history tables; no I/O happens here. The field set and wire names are
//! compatibility-sensitive: export consumers parse them, so changes are
//! format-version changes.

use crate::recommend::RecommendationEngine;
use chrono::{SecondsFormat, Utc};
use framepulse_core::thresholds::{
    ACCEPTABLE_FRAME_TIME_MS, CRITICAL_FRAME_TIME_MS, EXCELLENT_SCORE, FAIR_SCORE, GOOD_SCORE,
    POOR_SCORE, TARGET_FRAME_TIME_MS,
};
use framepulse_core::{
    FrameMeasurement, PerformanceHealth, PerformanceRecommendation, ProfilerError, ProfilerResult,
    ProfilerStats, RankingTier, RecommendationCategory,
};
use serde::Serialize;
use std::collections::BTreeMap;

/// The export format tag carried by every report.
pub const EXPORT_FORMAT: &str = "enhanced-json";

/// One ranked component as it appears in serialized output: the advisory
/// element handle is gone by construction.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportedComponent {
    /// Component name.
    pub name: String,
    /// Render count at export time.
    pub render_count: u64,
    /// Ranking-table severity.
    pub severity: RankingTier,
}

/// The overall judgement block of a report.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportedSummary {
    /// Score in `[0, 100]`.
    pub score: u32,
    /// Health grade.
    pub health: PerformanceHealth,
    /// Acceptability verdict.
    pub acceptable: bool,
    /// Number of critical-severity recommendations.
    pub critical_issues: usize,
    /// Number of high- or medium-severity recommendations.
    pub warnings: usize,
    /// Acceptability restated for consumers of the legacy field name.
    pub is_performance_acceptable: bool,
}

/// Recommendations grouped by their category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationsByCategory {
    /// Frame-time and throughput findings.
    pub performance: Vec<PerformanceRecommendation>,
    /// Per-component render findings.
    pub rendering: Vec<PerformanceRecommendation>,
    /// Allocation and retention findings.
    pub memory: Vec<PerformanceRecommendation>,
    /// General hygiene findings.
    #[serde(rename = "best-practice")]
    pub best_practice: Vec<PerformanceRecommendation>,
}

/// The fixed thresholds the analysis is measured against.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceThresholds {
    /// 60fps frame budget in milliseconds.
    pub target_frame_time: f64,
    /// 30fps frame budget in milliseconds.
    pub acceptable_frame_time: f64,
    /// Single-frame critical threshold in milliseconds.
    pub critical_frame_time: f64,
    /// Minimum score for `excellent`.
    pub excellent_score: u32,
    /// Minimum score for `good`.
    pub good_score: u32,
    /// Minimum score for `fair`.
    pub fair_score: u32,
    /// Minimum score for `poor`.
    pub poor_score: u32,
}

impl Default for PerformanceThresholds {
    fn default() -> Self {
        Self {
            target_frame_time: TARGET_FRAME_TIME_MS,
            acceptable_frame_time: ACCEPTABLE_FRAME_TIME_MS,
            critical_frame_time: CRITICAL_FRAME_TIME_MS,
            excellent_score: EXCELLENT_SCORE,
            good_score: GOOD_SCORE,
            fair_score: FAIR_SCORE,
            poor_score: POOR_SCORE,
        }
    }
}

/// A complete export report: snapshot, raw tables, analysis, and metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SerializedReport {
    /// Duration of the most recent frame in milliseconds.
    pub last_frame_duration: f64,
    /// Mean over the retained frame history in milliseconds.
    pub average_frame_duration: f64,
    /// Number of retained frames.
    pub frame_count: usize,
    /// Top components, element handles stripped.
    pub top_components: Vec<ExportedComponent>,
    /// Epoch-millisecond timestamp of the last mutation.
    pub last_measurement: u64,
    /// Every render counter, by name.
    pub render_counts: BTreeMap<String, u64>,
    /// The raw retained frame history, oldest first.
    pub frame_measurements: Vec<FrameMeasurement>,
    /// Score, health, and issue counts.
    pub performance_summary: ExportedSummary,
    /// The full recommendation list, priority descending.
    pub recommendations: Vec<PerformanceRecommendation>,
    /// Critical- and high-severity recommendations only.
    pub critical_recommendations: Vec<PerformanceRecommendation>,
    /// Recommendations grouped by category; every group always present.
    pub recommendations_by_category: RecommendationsByCategory,
    /// The thresholds the analysis used.
    pub performance_thresholds: PerformanceThresholds,
    /// RFC 3339 export timestamp.
    pub export_timestamp: String,
    /// Version of the profiler that produced the report.
    pub profiler_version: String,
    /// Format tag, currently `enhanced-json`.
    pub export_format: String,
}

/// Builds [`SerializedReport`]s from snapshots.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportExporter {
    engine: RecommendationEngine,
}

impl ReportExporter {
    /// Creates a new exporter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bundles a snapshot, its raw tables, and a fresh analysis into one
    /// serializable report. Pure; no side effects.
    pub fn build(
        &self,
        stats: &ProfilerStats,
        render_counts: BTreeMap<String, u64>,
        frame_measurements: Vec<FrameMeasurement>,
    ) -> SerializedReport {
        let summary = self.engine.summary(stats);
        let recommendations = self.engine.analyze(stats);
        let critical_recommendations = self.engine.critical_only(stats);
        let recommendations_by_category = RecommendationsByCategory {
            performance: self
                .engine
                .by_category(RecommendationCategory::Performance, stats),
            rendering: self
                .engine
                .by_category(RecommendationCategory::Rendering, stats),
            memory: self.engine.by_category(RecommendationCategory::Memory, stats),
            best_practice: self
                .engine
                .by_category(RecommendationCategory::BestPractice, stats),
        };
        let is_acceptable = self.engine.is_acceptable(stats);

        SerializedReport {
            last_frame_duration: stats.last_frame_duration,
            average_frame_duration: stats.average_frame_duration,
            frame_count: stats.frame_count,
            top_components: stats
                .top_components
                .iter()
                .map(|component| ExportedComponent {
                    name: component.name.clone(),
                    render_count: component.render_count,
                    severity: component.severity,
                })
                .collect(),
            last_measurement: stats.last_measurement,
            render_counts,
            frame_measurements,
            performance_summary: ExportedSummary {
                score: summary.score,
                health: summary.health,
                acceptable: summary.acceptable,
                critical_issues: summary.critical_issues,
                warnings: summary.warnings,
                is_performance_acceptable: is_acceptable,
            },
            recommendations,
            critical_recommendations,
            recommendations_by_category,
            performance_thresholds: PerformanceThresholds::default(),
            export_timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            profiler_version: env!("CARGO_PKG_VERSION").to_string(),
            export_format: EXPORT_FORMAT.to_string(),
        }
    }
}

/// Serializes a report to pretty-printed JSON.
pub fn to_json(report: &SerializedReport) -> ProfilerResult<String> {
    serde_json::to_string_pretty(report).map_err(|e| ProfilerError::Export(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use framepulse_core::severity::ranking_tier;
    use framepulse_core::{ComponentRenderStats, ElementHandle};

    fn sample_stats() -> ProfilerStats {
        let count = 25;
        ProfilerStats {
            last_frame_duration: 60.0,
            average_frame_duration: 26.67,
            frame_count: 3,
            top_components: vec![ComponentRenderStats {
                name: "data-grid".to_string(),
                render_count: count,
                severity: ranking_tier(count),
                element: Some(ElementHandle(9)),
            }],
            last_measurement: 1_700_000_000_000,
            recommendations: Vec::new(),
        }
    }

    fn sample_report() -> SerializedReport {
        let mut render_counts = BTreeMap::new();
        render_counts.insert("data-grid".to_string(), 25);
        let frames = vec![
            FrameMeasurement {
                duration: 10.0,
                timestamp: 1,
            },
            FrameMeasurement {
                duration: 60.0,
                timestamp: 2,
            },
        ];
        ReportExporter::new().build(&sample_stats(), render_counts, frames)
    }

    #[test]
    fn report_carries_full_field_set() {
        let json = serde_json::to_value(&sample_report()).unwrap();
        for key in [
            "lastFrameDuration",
            "averageFrameDuration",
            "frameCount",
            "topComponents",
            "lastMeasurement",
            "renderCounts",
            "frameMeasurements",
            "performanceSummary",
            "recommendations",
            "criticalRecommendations",
            "recommendationsByCategory",
            "performanceThresholds",
            "exportTimestamp",
            "profilerVersion",
            "exportFormat",
        ] {
            assert!(json.get(key).is_some(), "missing export field {key}");
        }
        assert_eq!(json["exportFormat"], "enhanced-json");
    }

    #[test]
    fn element_handles_never_reach_serialized_output() {
        let json = serde_json::to_value(&sample_report()).unwrap();
        let components = json["topComponents"].as_array().unwrap();
        assert_eq!(components.len(), 1);
        assert!(components[0].get("element").is_none());
        assert_eq!(components[0]["renderCount"], 25);
    }

    #[test]
    fn thresholds_block_matches_constants() {
        let json = serde_json::to_value(&sample_report()).unwrap();
        let thresholds = &json["performanceThresholds"];
        assert_eq!(thresholds["targetFrameTime"], 16.67);
        assert_eq!(thresholds["acceptableFrameTime"], 33.33);
        assert_eq!(thresholds["criticalFrameTime"], 50.0);
        assert_eq!(thresholds["excellentScore"], 90);
        assert_eq!(thresholds["poorScore"], 40);
    }

    #[test]
    fn category_groups_are_always_present() {
        let json = serde_json::to_value(&sample_report()).unwrap();
        let by_category = &json["recommendationsByCategory"];
        for key in ["performance", "rendering", "memory", "best-practice"] {
            assert!(by_category[key].is_array(), "missing category group {key}");
        }
    }

    #[test]
    fn summary_block_is_consistent_with_engine() {
        let report = sample_report();
        let engine = RecommendationEngine::new();
        let stats = sample_stats();
        assert_eq!(report.performance_summary.score, engine.score(&stats));
        assert!(!report.performance_summary.acceptable);
        assert!(!report.performance_summary.is_performance_acceptable);
        assert!(report.performance_summary.critical_issues >= 1);
    }

    #[test]
    fn to_json_round_trips_as_valid_json() {
        let text = to_json(&sample_report()).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed["frameCount"], 3);
    }
}
