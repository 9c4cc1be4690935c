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

//! Rule-based performance analysis over snapshots.
//!
//! Every rule is an independent pure predicate over the same immutable
//! snapshot; a satisfied rule yields exactly one recommendation. Rules are
//! evaluated in a fixed order and the result is stable-sorted by priority
//! descending, so equal priorities keep evaluation order.

use framepulse_core::thresholds::{
    CRITICAL_FRAME_TIME_MS, EXCELLENT_SCORE, FAIR_SCORE, GOOD_SCORE, POOR_SCORE,
    TARGET_FRAME_TIME_MS,
};
use framepulse_core::{
    PerformanceHealth, PerformanceRecommendation, ProfilerStats, RecommendationCategory,
    RecommendationKind, RecommendationSeverity,
};
use serde::Serialize;

/// A rule: maps a snapshot to at most one recommendation.
type RuleFn = fn(&ProfilerStats) -> Option<PerformanceRecommendation>;

/// All rules in evaluation order. This order is the tie-break for equal
/// priorities and must stay fixed.
const RULES: &[RuleFn] = &[
    critical_frame_time,
    high_average_frame_time,
    low_frame_count,
    critical_render_count,
    multiple_high_render_components,
    multiple_medium_render_components,
    component_composition,
    component_over_engineering,
    template_optimization,
    memory_best_practices,
    memory_pressure_detected,
    memory_render_correlation,
    performance_optimization,
    zone_optimization,
    network_performance,
    bundle_optimization,
    state_management,
];

/// Aggregate judgement over one snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceSummary {
    /// Score in `[0, 100]`, 100 being flawless.
    pub score: u32,
    /// Health grade derived from the score.
    pub health: PerformanceHealth,
    /// Whether all acceptability conditions hold.
    pub acceptable: bool,
    /// Number of critical-severity recommendations.
    pub critical_issues: usize,
    /// Number of high- or medium-severity recommendations.
    pub warnings: usize,
}

/// Evaluates the rule set and derives score, health, and summaries.
///
/// Stateless; every query runs over the snapshot it is given.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecommendationEngine;

impl RecommendationEngine {
    /// Creates a new engine.
    pub fn new() -> Self {
        Self
    }

    /// Runs every rule against `stats` and returns the findings sorted by
    /// priority descending (stable for ties).
    pub fn analyze(&self, stats: &ProfilerStats) -> Vec<PerformanceRecommendation> {
        let mut recommendations: Vec<PerformanceRecommendation> =
            RULES.iter().filter_map(|rule| rule(stats)).collect();
        recommendations.sort_by(|a, b| b.priority.cmp(&a.priority));
        recommendations
    }

    /// Finds a single recommendation by its stable id, if triggered.
    pub fn by_id(&self, id: &str, stats: &ProfilerStats) -> Option<PerformanceRecommendation> {
        self.analyze(stats).into_iter().find(|rec| rec.id == id)
    }

    /// Recommendations belonging to one category, in priority order.
    pub fn by_category(
        &self,
        category: RecommendationCategory,
        stats: &ProfilerStats,
    ) -> Vec<PerformanceRecommendation> {
        self.analyze(stats)
            .into_iter()
            .filter(|rec| rec.category == category)
            .collect()
    }

    /// Critical- and high-severity recommendations only.
    pub fn critical_only(&self, stats: &ProfilerStats) -> Vec<PerformanceRecommendation> {
        self.analyze(stats)
            .into_iter()
            .filter(|rec| {
                matches!(
                    rec.severity,
                    RecommendationSeverity::Critical | RecommendationSeverity::High
                )
            })
            .collect()
    }

    /// Performance score in `[0, 100]`.
    ///
    /// Starts at 100 and deducts for frame-time overruns (highest matching
    /// threshold wins) and for high/medium-tier components.
    pub fn score(&self, stats: &ProfilerStats) -> u32 {
        let mut score: i64 = 100;

        if stats.last_frame_duration > CRITICAL_FRAME_TIME_MS {
            score -= 30;
        } else if stats.last_frame_duration > 33.0 {
            score -= 20;
        } else if stats.last_frame_duration > TARGET_FRAME_TIME_MS {
            score -= 10;
        }

        if stats.average_frame_duration > 33.0 {
            score -= 25;
        } else if stats.average_frame_duration > TARGET_FRAME_TIME_MS {
            score -= 15;
        }

        score -= stats.high_render_components().count() as i64 * 10;
        score -= stats.medium_render_components().count() as i64 * 5;

        score.clamp(0, 100) as u32
    }

    /// Health grade derived from [`Self::score`].
    pub fn health(&self, stats: &ProfilerStats) -> PerformanceHealth {
        let score = self.score(stats);
        if score >= EXCELLENT_SCORE {
            PerformanceHealth::Excellent
        } else if score >= GOOD_SCORE {
            PerformanceHealth::Good
        } else if score >= FAIR_SCORE {
            PerformanceHealth::Fair
        } else if score >= POOR_SCORE {
            PerformanceHealth::Poor
        } else {
            PerformanceHealth::Critical
        }
    }

    /// True iff last and average frame times are within the 60fps budget and
    /// no component sits in the high ranking tier.
    pub fn is_acceptable(&self, stats: &ProfilerStats) -> bool {
        stats.last_frame_duration <= TARGET_FRAME_TIME_MS
            && stats.average_frame_duration <= TARGET_FRAME_TIME_MS
            && stats.high_render_components().count() == 0
    }

    /// Bundles score, health, acceptability, and issue counts.
    pub fn summary(&self, stats: &ProfilerStats) -> PerformanceSummary {
        let recommendations = self.analyze(stats);
        let critical_issues = recommendations
            .iter()
            .filter(|rec| rec.severity == RecommendationSeverity::Critical)
            .count();
        let warnings = recommendations
            .iter()
            .filter(|rec| {
                matches!(
                    rec.severity,
                    RecommendationSeverity::High | RecommendationSeverity::Medium
                )
            })
            .count();
        PerformanceSummary {
            score: self.score(stats),
            health: self.health(stats),
            acceptable: self.is_acceptable(stats),
            critical_issues,
            warnings,
        }
    }
}

fn suggestions(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn critical_frame_time(stats: &ProfilerStats) -> Option<PerformanceRecommendation> {
    if stats.last_frame_duration <= CRITICAL_FRAME_TIME_MS {
        return None;
    }
    Some(PerformanceRecommendation {
        id: "critical-frame-time",
        kind: RecommendationKind::Error,
        title: "Critical Frame Time Detected".to_string(),
        description: format!(
            "Last frame took {:.2}ms, which is significantly above the 16.67ms target for 60fps.",
            stats.last_frame_duration
        ),
        severity: RecommendationSeverity::Critical,
        category: RecommendationCategory::Performance,
        suggestions: suggestions(&[
            "Move heavy computation out of the render path",
            "Cache derived values instead of recomputing them each frame",
            "Virtualize large lists so only visible items render",
            "Offload expensive calculations to a background worker",
            "Capture a trace to identify the slowest pipeline stage",
        ]),
        impact: "Severe impact on user experience and perceived performance".to_string(),
        priority: 100,
    })
}

fn high_average_frame_time(stats: &ProfilerStats) -> Option<PerformanceRecommendation> {
    if stats.average_frame_duration <= 20.0 {
        return None;
    }
    Some(PerformanceRecommendation {
        id: "high-average-frame-time",
        kind: RecommendationKind::Warning,
        title: "High Average Frame Time".to_string(),
        description: format!(
            "Average frame time is {:.2}ms, above the recommended 16.67ms.",
            stats.average_frame_duration
        ),
        severity: RecommendationSeverity::High,
        category: RecommendationCategory::Performance,
        suggestions: suggestions(&[
            "Review components with frequent updates",
            "Debounce rapid state changes before they reach the UI",
            "Use keyed diffing for list rendering",
            "Lazy-load heavy components",
            "Simplify expressions evaluated on every update",
        ]),
        impact: "May cause noticeable lag and poor user experience".to_string(),
        priority: 80,
    })
}

fn low_frame_count(stats: &ProfilerStats) -> Option<PerformanceRecommendation> {
    if stats.frame_count >= 10 {
        return None;
    }
    Some(PerformanceRecommendation {
        id: "low-frame-count",
        kind: RecommendationKind::Info,
        title: "Limited Performance Data".to_string(),
        description: "Only a few frames have been measured. Consider interacting with the \
                      application to gather more data."
            .to_string(),
        severity: RecommendationSeverity::Low,
        category: RecommendationCategory::Performance,
        suggestions: suggestions(&[
            "Interact with various parts of the application",
            "Trigger different user actions to gather more data",
            "Wait for more performance data to be collected",
        ]),
        impact: "Limited data may not reflect real-world performance".to_string(),
        priority: 20,
    })
}

fn critical_render_count(stats: &ProfilerStats) -> Option<PerformanceRecommendation> {
    let worst = stats.high_render_components().next()?;
    Some(PerformanceRecommendation {
        id: "critical-render-count",
        kind: RecommendationKind::Error,
        title: "Excessive Component Renders".to_string(),
        description: format!(
            "Component \"{}\" has rendered {} times, indicating potential performance issues.",
            worst.name, worst.render_count
        ),
        severity: RecommendationSeverity::Critical,
        category: RecommendationCategory::Rendering,
        suggestions: suggestions(&[
            "Review what invalidates this component",
            "Check for unnecessary data bindings",
            "Skip updates when inputs are unchanged",
            "Memoize expensive calculations",
            "Review the parent component for cascading re-renders",
        ]),
        impact: "Excessive renders can cause significant performance degradation".to_string(),
        priority: 95,
    })
}

fn multiple_high_render_components(stats: &ProfilerStats) -> Option<PerformanceRecommendation> {
    let high = stats.high_render_components().count();
    if high <= 2 {
        return None;
    }
    Some(PerformanceRecommendation {
        id: "multiple-high-render-components",
        kind: RecommendationKind::Warning,
        title: "Multiple Components with High Render Counts".to_string(),
        description: format!(
            "{high} components are rendering excessively, indicating systemic performance issues."
        ),
        severity: RecommendationSeverity::High,
        category: RecommendationCategory::Rendering,
        suggestions: suggestions(&[
            "Review global state update patterns",
            "Check for circular update dependencies between components",
            "Tighten component update boundaries",
            "Centralize shared state behind a single source of truth",
            "Review how services propagate changes into the UI",
        ]),
        impact: "Systemic rendering issues affect overall application performance".to_string(),
        priority: 85,
    })
}

fn multiple_medium_render_components(stats: &ProfilerStats) -> Option<PerformanceRecommendation> {
    let medium = stats.medium_render_components().count();
    if medium <= 3 {
        return None;
    }
    Some(PerformanceRecommendation {
        id: "multiple-medium-render-components",
        kind: RecommendationKind::Warning,
        title: "Several Components with Moderate Render Counts".to_string(),
        description: format!(
            "{medium} components have moderate render counts that could be optimized."
        ),
        severity: RecommendationSeverity::Medium,
        category: RecommendationCategory::Rendering,
        suggestions: suggestions(&[
            "Review what triggers these updates",
            "Simplify per-update expressions",
            "Use keyed diffing in loops",
            "Consider composing smaller components differently",
            "Review input/output binding patterns",
        ]),
        impact: "Moderate performance impact that can accumulate".to_string(),
        priority: 60,
    })
}

fn component_composition(stats: &ProfilerStats) -> Option<PerformanceRecommendation> {
    if stats.top_components.len() <= 5 {
        return None;
    }
    Some(PerformanceRecommendation {
        id: "component-composition",
        kind: RecommendationKind::Optimization,
        title: "Component Composition Optimization".to_string(),
        description: "Many components are being tracked, suggesting potential composition \
                      improvements."
            .to_string(),
        severity: RecommendationSeverity::Low,
        category: RecommendationCategory::Rendering,
        suggestions: suggestions(&[
            "Separate presentation components from stateful containers",
            "Flatten unnecessarily deep component hierarchies",
            "Review each component's responsibilities",
            "Pass content through rather than duplicating wrappers",
            "Define clear interfaces between components",
        ]),
        impact: "Improves component maintainability and performance".to_string(),
        priority: 35,
    })
}

fn component_over_engineering(stats: &ProfilerStats) -> Option<PerformanceRecommendation> {
    if stats.top_components.len() <= 10 {
        return None;
    }
    Some(PerformanceRecommendation {
        id: "component-over-engineering",
        kind: RecommendationKind::Warning,
        title: "Potential Component Over-Engineering".to_string(),
        description: "Many small components detected. Consider if this level of granularity is \
                      necessary."
            .to_string(),
        severity: RecommendationSeverity::Medium,
        category: RecommendationCategory::Rendering,
        suggestions: suggestions(&[
            "Review component granularity",
            "Consider combining closely related components",
            "Draw clearer component boundaries",
            "Review how components communicate",
            "Group related components into feature units",
        ]),
        impact: "Reduces complexity and improves maintainability".to_string(),
        priority: 45,
    })
}

fn template_optimization(stats: &ProfilerStats) -> Option<PerformanceRecommendation> {
    if stats.high_render_components().next().is_none() {
        return None;
    }
    Some(PerformanceRecommendation {
        id: "template-optimization",
        kind: RecommendationKind::Optimization,
        title: "Template Optimization Opportunities".to_string(),
        description: "High render counts suggest template optimization opportunities.".to_string(),
        severity: RecommendationSeverity::Medium,
        category: RecommendationCategory::Rendering,
        suggestions: suggestions(&[
            "Skip re-rendering when inputs are unchanged",
            "Precompute expensive values outside the template",
            "Use keyed diffing for repeated elements",
            "Avoid calling functions from template expressions",
            "Bind directly to streams instead of polling them",
            "Prefer fine-grained reactive values over broad invalidation",
        ]),
        impact: "Reduces template evaluation overhead and improves performance".to_string(),
        priority: 70,
    })
}

fn memory_best_practices(stats: &ProfilerStats) -> Option<PerformanceRecommendation> {
    if stats.frame_count <= 100 {
        return None;
    }
    Some(PerformanceRecommendation {
        id: "memory-best-practices",
        kind: RecommendationKind::Optimization,
        title: "Memory Optimization Opportunities".to_string(),
        description: "With significant application usage, consider memory optimization \
                      strategies."
            .to_string(),
        severity: RecommendationSeverity::Medium,
        category: RecommendationCategory::Memory,
        suggestions: suggestions(&[
            "Tear down components completely when they leave the screen",
            "Cancel subscriptions when their owner is destroyed",
            "Use weak references for advisory back-pointers",
            "Skip work for components whose inputs are unchanged",
            "Clean up timers and scheduled callbacks",
            "Audit long-lived event listeners for leaks",
        ]),
        impact: "Prevents memory leaks and improves long-term performance".to_string(),
        priority: 50,
    })
}

fn memory_pressure_detected(stats: &ProfilerStats) -> Option<PerformanceRecommendation> {
    if stats.frame_count <= 500 {
        return None;
    }
    Some(PerformanceRecommendation {
        id: "memory-pressure-detected",
        kind: RecommendationKind::Warning,
        title: "Potential Memory Pressure Detected".to_string(),
        description: "High frame count suggests potential memory pressure or performance \
                      degradation over time."
            .to_string(),
        severity: RecommendationSeverity::High,
        category: RecommendationCategory::Memory,
        suggestions: suggestions(&[
            "Monitor memory usage with a heap profiler",
            "Check long-running operations for leaks",
            "Profile memory during development sessions",
            "Add continuous memory monitoring",
            "Review component lifecycle management",
            "Compare heap snapshots before and after heavy interactions",
        ]),
        impact: "Memory pressure can cause application crashes and poor performance".to_string(),
        priority: 75,
    })
}

fn memory_render_correlation(stats: &ProfilerStats) -> Option<PerformanceRecommendation> {
    if stats.high_render_components().next().is_none() {
        return None;
    }
    Some(PerformanceRecommendation {
        id: "memory-render-correlation",
        kind: RecommendationKind::Info,
        title: "Memory-Render Correlation".to_string(),
        description: "High render counts may indicate memory allocation patterns that could be \
                      optimized."
            .to_string(),
        severity: RecommendationSeverity::Medium,
        category: RecommendationCategory::Memory,
        suggestions: suggestions(&[
            "Review object creation in frequently rendered components",
            "Pool objects that are created and dropped every frame",
            "Memoize expensive calculations",
            "Prefer immutable data shared by reference",
            "Avoid per-render temporary allocations",
        ]),
        impact: "Reduces garbage collection pressure and improves performance".to_string(),
        priority: 45,
    })
}

fn performance_optimization(stats: &ProfilerStats) -> Option<PerformanceRecommendation> {
    if stats.frame_count <= 50 || stats.average_frame_duration <= 10.0 {
        return None;
    }
    Some(PerformanceRecommendation {
        id: "performance-optimization",
        kind: RecommendationKind::Optimization,
        title: "Performance Optimization Opportunities".to_string(),
        description: "Application shows opportunities for performance improvements.".to_string(),
        severity: RecommendationSeverity::Medium,
        category: RecommendationCategory::BestPractice,
        suggestions: suggestions(&[
            "Profile with dedicated tooling for a detailed breakdown",
            "Split code and load features on demand",
            "Strip unused code from the shipped artifact",
            "Pre-render content that rarely changes",
            "Cache results of repeated computations",
            "Batch related updates into a single pass",
        ]),
        impact: "Improves overall application performance and user experience".to_string(),
        priority: 70,
    })
}

fn zone_optimization(stats: &ProfilerStats) -> Option<PerformanceRecommendation> {
    if stats.frame_count <= 20 {
        return None;
    }
    Some(PerformanceRecommendation {
        id: "zone-optimization",
        kind: RecommendationKind::Optimization,
        title: "Change Detection Optimization".to_string(),
        description: "Consider optimizing change-detection scheduling for better performance."
            .to_string(),
        severity: RecommendationSeverity::Low,
        category: RecommendationCategory::BestPractice,
        suggestions: suggestions(&[
            "Run heavy computations outside the change-detection scope",
            "Opt hot components out of broad invalidation",
            "Coalesce async completions to minimize update passes",
            "Use keyed diffing in loops",
            "Contain failures so error handling does not trigger full refreshes",
        ]),
        impact: "Reduces unnecessary change detection cycles".to_string(),
        priority: 40,
    })
}

fn network_performance(stats: &ProfilerStats) -> Option<PerformanceRecommendation> {
    if stats.average_frame_duration <= 25.0 {
        return None;
    }
    Some(PerformanceRecommendation {
        id: "network-performance",
        kind: RecommendationKind::Warning,
        title: "Potential Network Performance Issues".to_string(),
        description: "High frame times may indicate network-related performance bottlenecks."
            .to_string(),
        severity: RecommendationSeverity::Medium,
        category: RecommendationCategory::BestPractice,
        suggestions: suggestions(&[
            "Cache request results where freshness allows",
            "Deduplicate identical in-flight requests",
            "Trim response payloads to what the UI needs",
            "Load large datasets progressively",
            "Move response parsing off the UI thread",
            "Serve repeat visits from a local cache",
        ]),
        impact: "Improves data loading performance and user experience".to_string(),
        priority: 65,
    })
}

fn bundle_optimization(stats: &ProfilerStats) -> Option<PerformanceRecommendation> {
    if stats.frame_count <= 30 {
        return None;
    }
    Some(PerformanceRecommendation {
        id: "bundle-optimization",
        kind: RecommendationKind::Optimization,
        title: "Bundle Optimization Opportunities".to_string(),
        description: "Consider optimizing your application bundle for better performance."
            .to_string(),
        severity: RecommendationSeverity::Medium,
        category: RecommendationCategory::BestPractice,
        suggestions: suggestions(&[
            "Split rarely-used features into deferred modules",
            "Enable build-time optimization flags",
            "Analyze the artifact for oversized dependencies",
            "Remove unused dependencies",
            "Import only the pieces of third-party libraries you use",
            "Prefer self-contained modules for better dead-code elimination",
        ]),
        impact: "Reduces initial load time and improves perceived performance".to_string(),
        priority: 55,
    })
}

fn state_management(stats: &ProfilerStats) -> Option<PerformanceRecommendation> {
    if stats.high_render_components().count() <= 1 {
        return None;
    }
    Some(PerformanceRecommendation {
        id: "state-management",
        kind: RecommendationKind::Optimization,
        title: "State Management Optimization".to_string(),
        description: "Multiple components with high render counts suggest state management \
                      improvements."
            .to_string(),
        severity: RecommendationSeverity::Medium,
        category: RecommendationCategory::BestPractice,
        suggestions: suggestions(&[
            "Introduce a single store for shared state",
            "Review how state flows into components",
            "Isolate unrelated state so updates stay local",
            "Publish state changes through explicit streams",
            "Use fine-grained reactive values for hot paths",
            "Review component communication patterns",
        ]),
        impact: "Improves state predictability and reduces unnecessary renders".to_string(),
        priority: 60,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use framepulse_core::severity::ranking_tier;
    use framepulse_core::ComponentRenderStats;

    fn component(name: &str, count: u64) -> ComponentRenderStats {
        ComponentRenderStats {
            name: name.to_string(),
            render_count: count,
            severity: ranking_tier(count),
            element: None,
        }
    }

    fn snapshot(last: f64, average: f64, frames: usize) -> ProfilerStats {
        ProfilerStats {
            last_frame_duration: last,
            average_frame_duration: average,
            frame_count: frames,
            top_components: Vec::new(),
            last_measurement: 0,
            recommendations: Vec::new(),
        }
    }

    #[test]
    fn quiet_snapshot_triggers_only_low_frame_count() {
        let engine = RecommendationEngine::new();
        let recs = engine.analyze(&snapshot(5.0, 5.0, 5));
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].id, "low-frame-count");
    }

    #[test]
    fn critical_frame_time_fires_above_50ms_and_sorts_first() {
        let engine = RecommendationEngine::new();
        let recs = engine.analyze(&snapshot(60.0, 5.0, 5));
        assert_eq!(recs[0].id, "critical-frame-time");
        assert_eq!(recs[0].priority, 100);
        assert!(recs[0].description.contains("60.00ms"));

        // Exactly at the threshold nothing fires.
        let at_threshold = engine.analyze(&snapshot(50.0, 5.0, 50));
        assert!(at_threshold.iter().all(|r| r.id != "critical-frame-time"));
    }

    #[test]
    fn priorities_are_sorted_descending() {
        let engine = RecommendationEngine::new();
        let mut stats = snapshot(60.0, 30.0, 600);
        stats.top_components = vec![
            component("a", 25),
            component("b", 24),
            component("c", 23),
            component("d", 15),
            component("e", 14),
            component("f", 13),
            component("g", 12),
            component("h", 4),
            component("i", 3),
            component("j", 2),
            component("k", 1),
        ];
        let recs = engine.analyze(&stats);
        assert!(recs.len() > 10);
        for pair in recs.windows(2) {
            assert!(pair[0].priority >= pair[1].priority);
        }
    }

    #[test]
    fn equal_priorities_keep_evaluation_order() {
        let engine = RecommendationEngine::new();
        // average > 10 with > 50 frames fires performance-optimization (70);
        // a high-tier component fires template-optimization (70). Template
        // optimization is evaluated first.
        let mut stats = snapshot(5.0, 12.0, 60);
        stats.top_components = vec![component("grid", 30)];
        let recs = engine.analyze(&stats);
        let ids: Vec<&str> = recs
            .iter()
            .filter(|r| r.priority == 70)
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, vec!["template-optimization", "performance-optimization"]);
    }

    #[test]
    fn critical_render_count_seeds_worst_component() {
        let engine = RecommendationEngine::new();
        let mut stats = snapshot(5.0, 5.0, 50);
        stats.top_components = vec![component("data-grid", 42), component("sidebar", 21)];
        let rec = engine.by_id("critical-render-count", &stats).unwrap();
        assert!(rec.description.contains("data-grid"));
        assert!(rec.description.contains("42"));
        assert_eq!(rec.severity, RecommendationSeverity::Critical);
    }

    #[test]
    fn component_count_rules_use_strict_thresholds() {
        let engine = RecommendationEngine::new();

        let mut stats = snapshot(5.0, 5.0, 50);
        stats.top_components = (0..5).map(|i| component(&format!("c{i}"), 1)).collect();
        assert!(engine.by_id("component-composition", &stats).is_none());

        stats.top_components.push(component("c5", 1));
        assert!(engine.by_id("component-composition", &stats).is_some());
        assert!(engine.by_id("component-over-engineering", &stats).is_none());

        for i in 6..11 {
            stats.top_components.push(component(&format!("c{i}"), 1));
        }
        assert!(engine.by_id("component-over-engineering", &stats).is_some());
    }

    #[test]
    fn high_component_rules() {
        let engine = RecommendationEngine::new();
        let mut stats = snapshot(5.0, 5.0, 50);

        stats.top_components = vec![component("a", 25), component("b", 23)];
        assert!(engine.by_id("critical-render-count", &stats).is_some());
        assert!(engine.by_id("state-management", &stats).is_some());
        assert!(engine
            .by_id("multiple-high-render-components", &stats)
            .is_none());

        stats.top_components.push(component("c", 22));
        assert!(engine
            .by_id("multiple-high-render-components", &stats)
            .is_some());
    }

    #[test]
    fn memory_rules_trigger_on_frame_count() {
        let engine = RecommendationEngine::new();
        assert!(engine
            .by_id("memory-best-practices", &snapshot(5.0, 5.0, 100))
            .is_none());
        assert!(engine
            .by_id("memory-best-practices", &snapshot(5.0, 5.0, 101))
            .is_some());
        assert!(engine
            .by_id("memory-pressure-detected", &snapshot(5.0, 5.0, 500))
            .is_none());
        assert!(engine
            .by_id("memory-pressure-detected", &snapshot(5.0, 5.0, 501))
            .is_some());
    }

    #[test]
    fn score_deductions_and_clamping() {
        let engine = RecommendationEngine::new();
        assert_eq!(engine.score(&snapshot(10.0, 10.0, 50)), 100);
        assert_eq!(engine.score(&snapshot(20.0, 10.0, 50)), 90);
        assert_eq!(engine.score(&snapshot(34.0, 10.0, 50)), 80);
        assert_eq!(engine.score(&snapshot(60.0, 10.0, 50)), 70);
        assert_eq!(engine.score(&snapshot(60.0, 20.0, 50)), 55);
        assert_eq!(engine.score(&snapshot(60.0, 40.0, 50)), 45);

        let mut stats = snapshot(60.0, 40.0, 50);
        stats.top_components = (0..6).map(|i| component(&format!("c{i}"), 30)).collect();
        // 45 - 60 clamps at 0.
        assert_eq!(engine.score(&stats), 0);
    }

    #[test]
    fn score_is_monotone_in_component_pressure() {
        let engine = RecommendationEngine::new();
        let mut stats = snapshot(10.0, 10.0, 50);
        let mut previous = engine.score(&stats);
        for i in 0..5 {
            stats.top_components.push(component(&format!("c{i}"), 30));
            let next = engine.score(&stats);
            assert!(next <= previous);
            previous = next;
        }
    }

    #[test]
    fn health_buckets() {
        let engine = RecommendationEngine::new();
        assert_eq!(
            engine.health(&snapshot(10.0, 10.0, 50)),
            PerformanceHealth::Excellent
        );
        assert_eq!(
            engine.health(&snapshot(20.0, 20.0, 50)),
            PerformanceHealth::Good
        );
        assert_eq!(
            engine.health(&snapshot(34.0, 20.0, 50)),
            PerformanceHealth::Fair
        );
        assert_eq!(
            engine.health(&snapshot(60.0, 40.0, 50)),
            PerformanceHealth::Poor
        );
        let mut critical = snapshot(60.0, 40.0, 50);
        critical.top_components = vec![component("a", 30)];
        assert_eq!(engine.health(&critical), PerformanceHealth::Critical);
    }

    #[test]
    fn acceptability_requires_all_conditions() {
        let engine = RecommendationEngine::new();
        assert!(engine.is_acceptable(&snapshot(16.0, 16.0, 50)));
        assert!(!engine.is_acceptable(&snapshot(17.0, 16.0, 50)));
        assert!(!engine.is_acceptable(&snapshot(16.0, 17.0, 50)));

        let mut stats = snapshot(16.0, 16.0, 50);
        stats.top_components = vec![component("a", 25)];
        assert!(!engine.is_acceptable(&stats));
    }

    #[test]
    fn filters_by_category_and_severity() {
        let engine = RecommendationEngine::new();
        let mut stats = snapshot(60.0, 30.0, 600);
        stats.top_components = vec![component("a", 30)];

        let rendering = engine.by_category(RecommendationCategory::Rendering, &stats);
        assert!(rendering.iter().all(|r| r.category == RecommendationCategory::Rendering));
        assert!(!rendering.is_empty());

        let critical = engine.critical_only(&stats);
        assert!(!critical.is_empty());
        assert!(critical.iter().all(|r| matches!(
            r.severity,
            RecommendationSeverity::Critical | RecommendationSeverity::High
        )));
    }

    #[test]
    fn summary_counts_issues() {
        let engine = RecommendationEngine::new();
        let mut stats = snapshot(60.0, 30.0, 600);
        stats.top_components = vec![component("a", 30)];
        let summary = engine.summary(&stats);
        assert_eq!(summary.score, engine.score(&stats));
        assert!(!summary.acceptable);
        // critical-frame-time and critical-render-count.
        assert_eq!(summary.critical_issues, 2);
        assert!(summary.warnings > 0);
    }
}
