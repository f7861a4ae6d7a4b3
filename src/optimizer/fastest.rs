//! Duration-minimizing selection under an ROI floor.
//!
//! # Algorithm
//!
//! Starting from the mandatory set, repeatedly add the eligible bundle that
//! lengthens the schedule least. A bundle is an optional item with positive
//! ROI together with its not-yet-selected predecessors; it is eligible when the
//! whole bundle is affordable. Ties go to larger ROI, then lower cost, then
//! input order. Stops as soon as the ROI floor is met or nothing is eligible.
//!
//! # Complexity
//! O(n² · (V + E)): each round re-evaluates the horizon per candidate.

use std::collections::BTreeSet;

use crate::models::ScopeItem;
use crate::schedule::selected_horizon;
use crate::validation::ItemGraph;

const EPS: f64 = 1e-9;

/// Outcome of the greedy duration search.
#[derive(Debug, Clone)]
pub(crate) struct FastestSelection {
    /// Indices added on top of the initial selection, in the order chosen.
    pub added: Vec<usize>,
    pub roi: f64,
    pub floor_met: bool,
}

struct Bundle {
    members: Vec<usize>,
    cost: f64,
    roi: f64,
    delta: i64,
}

impl Bundle {
    fn beats(&self, other: &Bundle) -> bool {
        if self.delta != other.delta {
            return self.delta < other.delta;
        }
        if (self.roi - other.roi).abs() > EPS {
            return self.roi > other.roi;
        }
        self.cost + EPS < other.cost
    }
}

/// Extends `selected` (mandatory items already marked) until `min_roi` is
/// reached. `remaining` is the budget left after the mandatory items.
pub(crate) fn select(
    items: &[ScopeItem],
    graph: &ItemGraph,
    selected: &mut [bool],
    remaining: f64,
    min_roi: f64,
) -> FastestSelection {
    let mut roi: f64 = items
        .iter()
        .zip(selected.iter())
        .filter(|&(_, &s)| s)
        .map(|(item, _)| item.roi_impact)
        .sum();
    let mut left = remaining;
    let mut added = Vec::new();

    while roi + EPS < min_roi {
        let base = selected_horizon(items, graph, selected);
        let mut best: Option<Bundle> = None;

        for (i, item) in items.iter().enumerate() {
            if selected[i] || item.roi_impact <= 0.0 {
                continue;
            }
            let mut members: BTreeSet<usize> = graph
                .ancestors(i)
                .into_iter()
                .filter(|&a| !selected[a])
                .collect();
            members.insert(i);

            let cost: f64 = members.iter().map(|&m| items[m].cost()).sum();
            if cost > left + EPS {
                continue;
            }
            let bundle_roi: f64 = members.iter().map(|&m| items[m].roi_impact).sum();

            for &m in &members {
                selected[m] = true;
            }
            let delta = selected_horizon(items, graph, selected) - base;
            for &m in &members {
                selected[m] = false;
            }

            let bundle = Bundle {
                members: members.into_iter().collect(),
                cost,
                roi: bundle_roi,
                delta,
            };
            if best.as_ref().map_or(true, |b| bundle.beats(b)) {
                best = Some(bundle);
            }
        }

        let Some(bundle) = best else {
            break;
        };
        for &m in &bundle.members {
            selected[m] = true;
        }
        left -= bundle.cost;
        roi += bundle.roi;
        added.extend(bundle.members);
    }

    FastestSelection {
        added,
        roi,
        floor_met: roi + EPS >= min_roi,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefers_parallel_items() {
        let items = vec![
            ScopeItem::new("base").with_days(5),
            ScopeItem::new("serial")
                .with_days(4)
                .with_roi(10.0)
                .with_dependency("base"),
            ScopeItem::new("parallel").with_days(3).with_roi(10.0),
        ];
        let graph = ItemGraph::build(&items).unwrap();
        let mut selected = vec![true, false, false];
        let out = select(&items, &graph, &mut selected, 1000.0, 10.0);
        assert_eq!(out.added, vec![2]);
        assert!(out.floor_met);
        assert_eq!(selected_horizon(&items, &graph, &selected), 5);
    }

    #[test]
    fn test_floor_unreachable() {
        let items = vec![
            ScopeItem::new("a").with_days(1).with_roi(5.0).with_cost(100.0),
            ScopeItem::new("b").with_days(1).with_roi(5.0).with_cost(900.0),
        ];
        let graph = ItemGraph::build(&items).unwrap();
        let mut selected = vec![false, false];
        let out = select(&items, &graph, &mut selected, 500.0, 8.0);
        assert_eq!(out.added, vec![0]);
        assert!(!out.floor_met);
        assert_eq!(out.roi, 5.0);
    }

    #[test]
    fn test_floor_already_met() {
        let items = vec![
            ScopeItem::new("must").with_roi(20.0),
            ScopeItem::new("extra").with_roi(5.0),
        ];
        let graph = ItemGraph::build(&items).unwrap();
        let mut selected = vec![true, false];
        let out = select(&items, &graph, &mut selected, 1000.0, 10.0);
        assert!(out.added.is_empty());
        assert!(out.floor_met);
    }

    #[test]
    fn test_pulls_in_predecessors() {
        let items = vec![
            ScopeItem::new("prep").with_days(2),
            ScopeItem::new("finish")
                .with_days(1)
                .with_roi(30.0)
                .with_dependency("prep"),
        ];
        let graph = ItemGraph::build(&items).unwrap();
        let mut selected = vec![false, false];
        let out = select(&items, &graph, &mut selected, 1000.0, 10.0);
        assert_eq!(out.added, vec![0, 1]);
        assert!(out.floor_met);
        assert_eq!(out.roi, 30.0);
    }
}
