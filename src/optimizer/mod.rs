//! Budget-constrained scope selection.
//!
//! Chooses which items to fund within a budget. `must` items and every item
//! they transitively depend on are always funded; the remaining budget goes
//! to the optional items.
//!
//! # Algorithm
//!
//! 1. Validate the dependency graph and score every item. An item's value is
//!    `roi_impact × score / 100`.
//! 2. Force in the mandatory set and charge it against the budget. If it
//!    does not fit, the result is flagged `infeasible` and the optional pass
//!    sees a zero budget.
//! 3. Select optional items:
//!    - [`Objective::MaximizeValue`]: exact 0/1 knapsack DP over the
//!      discretized remaining budget, or the value/cost greedy when the DP
//!      table would exceed `max_table_cells`.
//!    - [`Objective::MinimizeDuration`]: greedy search for the shortest
//!      schedule reaching the ROI floor.
//! 4. Drop any selected item whose predecessor is unselected (in topological
//!    order, so drops cascade), then refill leftover budget greedily. Each
//!    refill step funds a positive-value item together with its unselected
//!    predecessors, so zero-ROI enabling work (demolition, permits) is bought
//!    when a valuable dependent fits.
//!
//! Selection never depends on item order beyond tie-breaking, and the input
//! items are never mutated.
//!
//! # Usage
//!
//! ```
//! use u_scope::models::{PriorityTier, ProjectContext, ScopeItem, Strategy};
//! use u_scope::optimizer::{optimize, ExclusionReason, OptimizeOptions};
//!
//! let items = vec![
//!     ScopeItem::new("A").with_tier(PriorityTier::Must).with_cost(1000.0).with_roi(5.0),
//!     ScopeItem::new("B").with_cost(4000.0).with_roi(40.0).with_dependency("A"),
//!     ScopeItem::new("C").with_tier(PriorityTier::Nice).with_cost(500.0).with_roi(2.0),
//! ];
//! let options = OptimizeOptions::new(ProjectContext::new(Strategy::Flip));
//! let result = optimize(&items, 4500.0, &options).unwrap();
//!
//! assert_eq!(result.selected_ids, vec!["A", "C"]);
//! assert_eq!(result.exclusion_reason("B"), Some(ExclusionReason::OverBudget));
//! assert_eq!(result.total_cost, 1500.0);
//! ```
//!
//! # Reference
//! Kellerer, Pferschy & Pisinger (2004), "Knapsack Problems", Ch. 12
//! (precedence-constrained knapsack)

mod fastest;
mod knapsack;
mod options;
mod result;

pub use options::{Objective, OptimizeOptions, DEFAULT_MAX_TABLE_CELLS};
pub use result::{Exclusion, ExclusionReason, OptimizationResult, OptimizerWarning};

use tracing::{debug, warn};

use crate::error::ScopeResult;
use crate::models::ScopeItem;
use crate::scoring::score_all_with;
use crate::validation::ItemGraph;
use knapsack::Candidate;

const EPS: f64 = 1e-9;

/// Selects the items to fund within `budget`.
///
/// A negative or non-finite budget is treated as zero.
///
/// # Errors
/// Returns a validation or cycle error if the dependency graph is invalid.
pub fn optimize(
    items: &[ScopeItem],
    budget: f64,
    options: &OptimizeOptions,
) -> ScopeResult<OptimizationResult> {
    let graph = ItemGraph::build(items)?;
    let budget = if budget.is_finite() { budget.max(0.0) } else { 0.0 };
    let n = items.len();

    let values: Vec<f64> = score_all_with(items, &options.context, &options.tables)
        .iter()
        .zip(items)
        .map(|(score, item)| item.roi_impact * score.fraction())
        .collect();

    // Mandatory set: must items plus their transitive predecessors.
    let mut mandatory = vec![false; n];
    for (i, item) in items.iter().enumerate() {
        if item.priority_tier.is_mandatory() {
            mandatory[i] = true;
            for a in graph.ancestors(i) {
                mandatory[a] = true;
            }
        }
    }

    let mut warnings = Vec::new();
    let forced: Vec<String> = items
        .iter()
        .zip(&mandatory)
        .filter(|&(item, &m)| m && !item.priority_tier.is_mandatory())
        .map(|(item, _)| item.id.clone())
        .collect();
    if !forced.is_empty() {
        debug!(count = forced.len(), "predecessors of must items forced in");
        warnings.push(OptimizerWarning::MandatoryPredecessorsAdded { item_ids: forced });
    }

    let mandatory_cost: f64 = items
        .iter()
        .zip(&mandatory)
        .filter(|&(_, &m)| m)
        .map(|(item, _)| item.cost())
        .sum();
    let infeasible = mandatory_cost > budget + EPS;
    if infeasible {
        warn!(mandatory_cost, budget, "mandatory items exceed the budget");
        warnings.push(OptimizerWarning::MandatoryOverBudget {
            mandatory_cost,
            budget,
        });
    }
    let remaining = (budget - mandatory_cost).max(0.0);

    let mut selected = mandatory.clone();
    let mut exact = true;

    match options.objective {
        Objective::MaximizeValue => {
            let candidates: Vec<Candidate> = (0..n)
                .filter(|&i| !mandatory[i] && values[i] > 0.0)
                .map(|i| Candidate {
                    index: i,
                    cost: items[i].cost(),
                    value: values[i],
                })
                .collect();

            let granularity = options.effective_granularity();
            let capacity = knapsack::capacity(remaining, granularity)
                .min(knapsack::total_steps(&candidates, granularity));
            let table_cells = knapsack::table_cells(&candidates, capacity);

            let taken = if table_cells <= options.max_table_cells {
                knapsack::solve_dp(&candidates, capacity, granularity)
            } else {
                warn!(
                    table_cells,
                    max_table_cells = options.max_table_cells,
                    "knapsack table too large, using greedy selection"
                );
                warnings.push(OptimizerWarning::GreedyFallback {
                    table_cells,
                    max_table_cells: options.max_table_cells,
                });
                exact = false;
                knapsack::solve_greedy(&candidates, remaining)
            };
            for i in taken {
                selected[i] = true;
            }

            if repair_closure(&graph, &mut selected) {
                exact = false;
            }
            let spent: f64 = selected_cost(items, &selected);
            if refill(items, &graph, &values, &mut selected, budget.max(mandatory_cost) - spent) {
                exact = false;
            }
        }
        Objective::MinimizeDuration { min_roi } => {
            exact = false;
            let outcome = fastest::select(items, &graph, &mut selected, remaining, min_roi);
            debug!(
                added = outcome.added.len(),
                roi = outcome.roi,
                "duration-minimizing selection finished"
            );
            if !outcome.floor_met {
                warn!(achieved = outcome.roi, floor = min_roi, "ROI floor not reached");
                warnings.push(OptimizerWarning::RoiFloorUnmet {
                    achieved: outcome.roi,
                    floor: min_roi,
                });
            }
        }
    }

    let total_cost = selected_cost(items, &selected);
    let leftover = (budget - total_cost).max(0.0);

    let mut result = OptimizationResult {
        selected_ids: Vec::new(),
        excluded: Vec::new(),
        mandatory_ids: Vec::new(),
        total_cost,
        mandatory_cost,
        total_roi: 0.0,
        total_value: 0.0,
        budget,
        budget_utilization: utilization(total_cost, budget),
        infeasible,
        exact,
        warnings,
    };

    for (i, item) in items.iter().enumerate() {
        if mandatory[i] {
            result.mandatory_ids.push(item.id.clone());
        }
        if selected[i] {
            result.selected_ids.push(item.id.clone());
            result.total_roi += item.roi_impact;
            result.total_value += values[i];
            continue;
        }
        let reason = if graph.predecessors[i].iter().any(|&p| !selected[p]) {
            ExclusionReason::PredecessorExcluded
        } else if values[i] <= 0.0 {
            ExclusionReason::LowValue
        } else if item.cost() > leftover + EPS {
            ExclusionReason::OverBudget
        } else {
            ExclusionReason::LowValue
        };
        result.excluded.push(Exclusion {
            item_id: item.id.clone(),
            reason,
        });
    }

    debug!(
        selected = result.selected_ids.len(),
        excluded = result.excluded.len(),
        total_cost = result.total_cost,
        exact = result.exact,
        "optimization complete"
    );
    Ok(result)
}

/// Unselects items whose predecessors are not all selected.
///
/// Returns true if anything was dropped.
fn repair_closure(graph: &ItemGraph, selected: &mut [bool]) -> bool {
    let mut dropped = false;
    for &i in &graph.order {
        if selected[i] && graph.predecessors[i].iter().any(|&p| !selected[p]) {
            selected[i] = false;
            dropped = true;
        }
    }
    dropped
}

/// Adds affordable bundles, best value/cost ratio first.
///
/// A bundle is a positive-value item together with its unselected
/// predecessors, so zero-value enabling work is funded whenever something
/// valuable depends on it. Returns true if anything was added.
fn refill(
    items: &[ScopeItem],
    graph: &ItemGraph,
    values: &[f64],
    selected: &mut [bool],
    mut left: f64,
) -> bool {
    let mut added = false;
    loop {
        let mut best: Option<(Candidate, Vec<usize>)> = None;
        for (i, &value) in values.iter().enumerate() {
            if selected[i] || value <= 0.0 {
                continue;
            }
            let mut members: Vec<usize> = graph
                .ancestors(i)
                .into_iter()
                .filter(|&a| !selected[a])
                .collect();
            members.push(i);

            let cand = Candidate {
                index: i,
                cost: members.iter().map(|&m| items[m].cost()).sum(),
                value: members.iter().map(|&m| values[m]).sum(),
            };
            if cand.value <= 0.0 || cand.cost > left + EPS {
                continue;
            }
            if best
                .as_ref()
                .map_or(true, |(b, _)| knapsack::by_ratio(&cand, b).is_lt())
            {
                best = Some((cand, members));
            }
        }

        let Some((cand, members)) = best else {
            return added;
        };
        for m in members {
            selected[m] = true;
        }
        left -= cand.cost;
        added = true;
    }
}

fn selected_cost(items: &[ScopeItem], selected: &[bool]) -> f64 {
    items
        .iter()
        .zip(selected)
        .filter(|&(_, &s)| s)
        .map(|(item, _)| item.cost())
        .sum()
}

fn utilization(total_cost: f64, budget: f64) -> f64 {
    if budget > 0.0 {
        total_cost / budget
    } else if total_cost > 0.0 {
        1.0
    } else {
        0.0
    }
}
