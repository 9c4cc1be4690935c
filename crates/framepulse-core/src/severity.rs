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

//! Pure classification tables mapping render counts to severity tiers.
//!
//! Two tables coexist on purpose and MUST stay distinct: the heatmap table
//! decides whether an element is highlighted at all (counts up to 5 are
//! suppressed entirely), while the ranking table grades every tracked
//! component for the top-N list. They share tier names but encode different
//! policies, so they are kept as two independently testable functions.

use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Severity tier used for host-side element highlighting.
///
/// `None` means the element has not rendered often enough to be worth
/// highlighting; hosts should remove any marker for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeatmapTier {
    /// Below the highlighting threshold; no marker.
    None,
    /// Mildly elevated render frequency.
    Low,
    /// Elevated render frequency.
    Medium,
    /// Excessive render frequency.
    High,
}

/// Severity tier used to grade components in the top-N ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RankingTier {
    /// Unremarkable render count.
    Low,
    /// Render count worth watching.
    Medium,
    /// Excessive render count.
    High,
}

impl Display for HeatmapTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HeatmapTier::None => write!(f, "none"),
            HeatmapTier::Low => write!(f, "low"),
            HeatmapTier::Medium => write!(f, "medium"),
            HeatmapTier::High => write!(f, "high"),
        }
    }
}

impl Display for RankingTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RankingTier::Low => write!(f, "low"),
            RankingTier::Medium => write!(f, "medium"),
            RankingTier::High => write!(f, "high"),
        }
    }
}

/// Classifies a render count for heatmap highlighting.
///
/// Counts of five or fewer are deliberately suppressed so that elements
/// rendering a handful of times never light up.
pub fn heatmap_tier(render_count: u64) -> HeatmapTier {
    match render_count {
        0..=5 => HeatmapTier::None,
        6..=20 => HeatmapTier::Low,
        21..=50 => HeatmapTier::Medium,
        _ => HeatmapTier::High,
    }
}

/// Classifies a render count for the top-N component ranking.
pub fn ranking_tier(render_count: u64) -> RankingTier {
    match render_count {
        0..=5 => RankingTier::Low,
        6..=20 => RankingTier::Medium,
        _ => RankingTier::High,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heatmap_table_boundaries() {
        assert_eq!(heatmap_tier(0), HeatmapTier::None);
        assert_eq!(heatmap_tier(5), HeatmapTier::None);
        assert_eq!(heatmap_tier(6), HeatmapTier::Low);
        assert_eq!(heatmap_tier(20), HeatmapTier::Low);
        assert_eq!(heatmap_tier(21), HeatmapTier::Medium);
        assert_eq!(heatmap_tier(50), HeatmapTier::Medium);
        assert_eq!(heatmap_tier(51), HeatmapTier::High);
    }

    #[test]
    fn ranking_table_boundaries() {
        assert_eq!(ranking_tier(0), RankingTier::Low);
        assert_eq!(ranking_tier(5), RankingTier::Low);
        assert_eq!(ranking_tier(6), RankingTier::Medium);
        assert_eq!(ranking_tier(20), RankingTier::Medium);
        assert_eq!(ranking_tier(21), RankingTier::High);
    }

    #[test]
    fn tables_diverge_above_twenty() {
        // 21..=50 is "medium" for the heatmap but already "high" for ranking.
        assert_eq!(heatmap_tier(30), HeatmapTier::Medium);
        assert_eq!(ranking_tier(30), RankingTier::High);
    }

    #[test]
    fn tier_wire_names_are_lowercase() {
        assert_eq!(
            serde_json::to_string(&RankingTier::High).unwrap(),
            "\"high\""
        );
        assert_eq!(
            serde_json::to_string(&HeatmapTier::None).unwrap(),
            "\"none\""
        );
    }
}
