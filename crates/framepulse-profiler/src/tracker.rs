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

//! Per-component render counters with severity grading.

use framepulse_core::severity;
use framepulse_core::{ComponentRenderStats, ElementHandle, HeatmapTier};
use std::collections::{BTreeMap, HashMap};

/// Tracks how often each named component has rendered.
///
/// Counts are monotonically non-decreasing between resets. The tracker also
/// keeps the first-seen order of names so that ranking ties resolve stably,
/// and a latest-wins table of advisory element handles for host highlighting.
#[derive(Debug, Default)]
pub struct RenderTracker {
    counts: HashMap<String, u64>,
    // First-seen order of names; the stable tie-break for equal counts.
    order: Vec<String>,
    elements: HashMap<String, ElementHandle>,
}

impl RenderTracker {
    /// Creates an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one render of `name`, creating its counter at 1 if absent.
    ///
    /// When `element` is supplied the advisory handle for `name` is replaced
    /// (latest wins).
    pub fn record_render(&mut self, name: &str, element: Option<ElementHandle>) {
        match self.counts.get_mut(name) {
            Some(count) => *count += 1,
            None => {
                self.counts.insert(name.to_string(), 1);
                self.order.push(name.to_string());
            }
        }
        if let Some(handle) = element {
            self.elements.insert(name.to_string(), handle);
        }
    }

    /// Render count for `name`; 0 if untracked.
    pub fn count(&self, name: &str) -> u64 {
        self.counts.get(name).copied().unwrap_or(0)
    }

    /// Number of distinct names tracked since the last reset.
    pub fn tracked(&self) -> usize {
        self.counts.len()
    }

    /// Latest advisory element handle recorded for `name`.
    pub fn element(&self, name: &str) -> Option<ElementHandle> {
        self.elements.get(name).copied()
    }

    /// Heatmap tier for `name` under the heatmap-suppression table.
    pub fn heatmap_tier(&self, name: &str) -> HeatmapTier {
        severity::heatmap_tier(self.count(name))
    }

    /// All counters in name order, for export.
    pub fn all_counts(&self) -> BTreeMap<String, u64> {
        self.counts
            .iter()
            .map(|(name, count)| (name.clone(), *count))
            .collect()
    }

    /// The top `limit` components by render count, descending.
    ///
    /// Ties keep first-seen order; severities come from the ranking table.
    pub fn ranked_components(&self, limit: usize) -> Vec<ComponentRenderStats> {
        let mut components: Vec<ComponentRenderStats> = self
            .order
            .iter()
            .map(|name| {
                let count = self.count(name);
                ComponentRenderStats {
                    name: name.clone(),
                    render_count: count,
                    severity: severity::ranking_tier(count),
                    element: self.element(name),
                }
            })
            .collect();
        // sort_by is stable, so equal counts stay in first-seen order.
        components.sort_by(|a, b| b.render_count.cmp(&a.render_count));
        components.truncate(limit);
        components
    }

    /// Clears all counters, order, and element handles.
    pub fn reset(&mut self) {
        self.counts.clear();
        self.order.clear();
        self.elements.clear();
    }
}
