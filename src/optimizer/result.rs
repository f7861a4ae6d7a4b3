//! Optimization result model.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

use crate::models::ScopeItem;

/// Why an item was left out of the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExclusionReason {
    /// The item does not fit in the remaining budget.
    OverBudget,
    /// At least one predecessor is not selected.
    PredecessorExcluded,
    /// The item adds no value under the current objective.
    LowValue,
}

/// An excluded item and its reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exclusion {
    pub item_id: String,
    pub reason: ExclusionReason,
}

/// Non-fatal conditions reported with a result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OptimizerWarning {
    /// Mandatory work alone exceeds the budget. It is included anyway.
    MandatoryOverBudget { mandatory_cost: f64, budget: f64 },
    /// Non-`must` items forced in because a `must` item depends on them.
    MandatoryPredecessorsAdded { item_ids: Vec<String> },
    /// The DP table would be too large; the greedy heuristic was used.
    GreedyFallback { table_cells: usize, max_table_cells: usize },
    /// The minimum ROI of a duration-minimizing run could not be reached.
    RoiFloorUnmet { achieved: f64, floor: f64 },
}

/// Budget-constrained selection.
///
/// The result is an immutable selection; the engine never touches the
/// callers' `included` flags. Use [`selection_flags`](Self::selection_flags)
/// to merge it back into caller-owned records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationResult {
    /// Selected item IDs, in input order.
    pub selected_ids: Vec<String>,
    /// Excluded items with reasons, in input order.
    pub excluded: Vec<Exclusion>,
    /// IDs of force-included items (`must` tier and their predecessors).
    pub mandatory_ids: Vec<String>,
    /// Total cost of the selection.
    pub total_cost: f64,
    /// Cost of the mandatory items.
    pub mandatory_cost: f64,
    /// Sum of `roi_impact` over the selection (percent points).
    pub total_roi: f64,
    /// Sum of score-weighted value over the selection.
    pub total_value: f64,
    /// Budget after normalization (negative → 0).
    pub budget: f64,
    /// `total_cost / budget`. With a zero budget: 0.0 if nothing costs, else 1.0.
    pub budget_utilization: f64,
    /// Mandatory work exceeds the budget.
    pub infeasible: bool,
    /// Whether the optional selection is provably optimal.
    pub exact: bool,
    /// Non-fatal conditions encountered.
    pub warnings: Vec<OptimizerWarning>,
}

impl OptimizationResult {
    /// Whether the item with `id` is selected.
    pub fn is_selected(&self, id: &str) -> bool {
        self.selected_ids.iter().any(|s| s == id)
    }

    /// Exclusion reason for `id`, if it was excluded.
    pub fn exclusion_reason(&self, id: &str) -> Option<ExclusionReason> {
        self.excluded
            .iter()
            .find(|e| e.item_id == id)
            .map(|e| e.reason)
    }

    /// Budget utilization as a percentage.
    pub fn utilization_percent(&self) -> f64 {
        self.budget_utilization * 100.0
    }

    /// Item ID → selected, for every item the run saw.
    pub fn selection_flags(&self) -> BTreeMap<String, bool> {
        self.selected_ids
            .iter()
            .map(|id| (id.clone(), true))
            .chain(self.excluded.iter().map(|e| (e.item_id.clone(), false)))
            .collect()
    }

    /// Copies of the selected items, in input order.
    pub fn selected_items(&self, items: &[ScopeItem]) -> Vec<ScopeItem> {
        let ids: HashSet<&str> = self.selected_ids.iter().map(String::as_str).collect();
        items
            .iter()
            .filter(|item| ids.contains(item.id.as_str()))
            .cloned()
            .collect()
    }
}
