//! Strategy Planner
//!
//! Builds the sweep plan by filtering and ordering registered strategies.
//!
//! Filtering options:
//! - Regex pattern matching on strategy ID
//! - Group filtering
//!
//! Ordering: `inventory` yields entries in no particular order, so strategies
//! are sorted by their declared `order`, then by ID.

use sweepbench_core::StrategyDef;

/// Sweep plan
pub struct SweepPlan {
    /// Ordered list of strategies to run
    pub strategies: Vec<&'static StrategyDef>,
}

impl SweepPlan {
    /// Whether the plan selected nothing
    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }
}

/// Build sweep plan from discovered strategies
pub fn build_plan(
    strategies: impl IntoIterator<Item = &'static StrategyDef>,
    filter: Option<&regex::Regex>,
    group: Option<&str>,
) -> SweepPlan {
    let mut selected: Vec<_> = strategies
        .into_iter()
        .filter(|s| {
            if let Some(re) = filter {
                if !re.is_match(s.id) {
                    return false;
                }
            }

            if let Some(g) = group {
                if s.group != g {
                    return false;
                }
            }

            true
        })
        .collect();

    selected.sort_by_key(|s| (s.order, s.id));

    SweepPlan {
        strategies: selected,
    }
}
