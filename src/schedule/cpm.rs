//! Critical Path Method passes.
//!
//! # Algorithm
//!
//! 1. Validate the batch and obtain a topological order.
//! 2. Forward pass (topological order):
//!    `ES(i) = max(EF(p))` over predecessors, 0 with none; `EF(i) = ES(i) + d(i)`.
//! 3. Horizon `H = max(EF)`.
//! 4. Backward pass (reverse topological order):
//!    `LF(i) = min(LS(s))` over dependents, `H` with none; `LS(i) = LF(i) - d(i)`.
//! 5. `slack = max(0, LF - ES - d)`; critical iff slack is 0.
//!
//! Each item is visited once per pass, so the cost is O(V + E).
//!
//! # Reference
//! Kelley & Walker (1959), "Critical-Path Planning and Scheduling"

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ScopeResult;
use crate::models::ScopeItem;
use crate::validation::ItemGraph;

/// Schedule position of one item. All times are days from project start.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyMapping {
    /// Item ID.
    pub item_id: String,
    /// IDs of direct predecessors.
    pub predecessors: Vec<String>,
    /// IDs of items that directly depend on this one (reverse edges).
    pub dependents: Vec<String>,
    /// Normalized duration (days).
    pub duration_days: i64,
    /// Phase bucket copied from the item.
    pub phase: u32,
    /// Earliest start (ES).
    pub earliest_start: i64,
    /// Earliest finish (EF = ES + duration).
    pub earliest_finish: i64,
    /// Latest start (LS = LF - duration).
    pub latest_start: i64,
    /// Latest finish (LF).
    pub latest_finish: i64,
    /// Days the start can slip without delaying the project.
    pub slack: i64,
    /// Whether the item lies on a critical path (slack = 0).
    pub critical_path: bool,
}

/// Computes the CPM schedule for every item, in input order.
///
/// # Errors
/// `ScopeError::Validation` for duplicate or unknown IDs,
/// `ScopeError::CycleDetected` if the dependency graph is cyclic.
pub fn build_schedule(items: &[ScopeItem]) -> ScopeResult<Vec<DependencyMapping>> {
    let graph = ItemGraph::build(items)?;
    Ok(schedule_graph(items, &graph))
}

/// Forward and backward passes over an already validated graph.
pub(crate) fn schedule_graph(items: &[ScopeItem], graph: &ItemGraph) -> Vec<DependencyMapping> {
    let n = items.len();
    let durations: Vec<i64> = items.iter().map(ScopeItem::duration_days).collect();

    let mut es = vec![0i64; n];
    for &i in &graph.order {
        es[i] = graph.predecessors[i]
            .iter()
            .map(|&p| es[p] + durations[p])
            .max()
            .unwrap_or(0);
    }

    let horizon = (0..n).map(|i| es[i] + durations[i]).max().unwrap_or(0);

    let mut lf = vec![horizon; n];
    for &i in graph.order.iter().rev() {
        lf[i] = graph.successors[i]
            .iter()
            .map(|&s| lf[s] - durations[s])
            .min()
            .unwrap_or(horizon);
    }

    debug!(items = n, horizon, "computed CPM schedule");

    (0..n)
        .map(|i| {
            let slack = (lf[i] - es[i] - durations[i]).max(0);
            DependencyMapping {
                item_id: items[i].id.clone(),
                predecessors: graph.predecessors[i]
                    .iter()
                    .map(|&p| items[p].id.clone())
                    .collect(),
                dependents: graph.successors[i]
                    .iter()
                    .map(|&s| items[s].id.clone())
                    .collect(),
                duration_days: durations[i],
                phase: items[i].phase,
                earliest_start: es[i],
                earliest_finish: es[i] + durations[i],
                latest_start: lf[i] - durations[i],
                latest_finish: lf[i],
                slack,
                critical_path: slack == 0,
            }
        })
        .collect()
}

/// Length of the longest chain through the items marked in `selected`.
///
/// Predecessors outside the selection are ignored.
pub(crate) fn selected_horizon(
    items: &[ScopeItem],
    graph: &ItemGraph,
    selected: &[bool],
) -> i64 {
    let mut ef = vec![0i64; items.len()];
    let mut horizon = 0;
    for &i in &graph.order {
        if !selected[i] {
            continue;
        }
        let start = graph.predecessors[i]
            .iter()
            .filter(|&&p| selected[p])
            .map(|&p| ef[p])
            .max()
            .unwrap_or(0);
        ef[i] = start + items[i].duration_days();
        horizon = horizon.max(ef[i]);
    }
    horizon
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScopeError;
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    fn by_id<'a>(mappings: &'a [DependencyMapping], id: &str) -> &'a DependencyMapping {
        mappings.iter().find(|m| m.item_id == id).unwrap()
    }

    #[test]
    fn test_single_item() {
        let items = vec![ScopeItem::new("A").with_days(5)];
        let m = build_schedule(&items).unwrap();
        assert_eq!(m.len(), 1);
        assert_eq!(m[0].earliest_start, 0);
        assert_eq!(m[0].latest_finish, 5);
        assert_eq!(m[0].slack, 0);
        assert!(m[0].critical_path);
    }

    #[test]
    fn test_cycle_rejected() {
        let items = vec![
            ScopeItem::new("A").with_dependency("B"),
            ScopeItem::new("B").with_dependency("A"),
        ];
        match build_schedule(&items) {
            Err(ScopeError::CycleDetected { mut item_ids }) => {
                item_ids.sort();
                assert_eq!(item_ids, vec!["A", "B"]);
            }
            other => panic!("expected cycle error, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_dependency_rejected() {
        let items = vec![ScopeItem::new("A").with_dependency("ghost")];
        assert!(matches!(
            build_schedule(&items),
            Err(ScopeError::Validation { .. })
        ));
    }

    #[test]
    fn test_diamond_slack() {
        // demo(2) → electrical(5) → drywall(3)
        // demo(2) → plumbing(3)  → drywall(3)
        let items = vec![
            ScopeItem::new("demo").with_days(2),
            ScopeItem::new("electrical").with_days(5).with_dependency("demo"),
            ScopeItem::new("plumbing").with_days(3).with_dependency("demo"),
            ScopeItem::new("drywall")
                .with_days(3)
                .with_dependency("electrical")
                .with_dependency("plumbing"),
        ];
        let m = build_schedule(&items).unwrap();

        let drywall = by_id(&m, "drywall");
        assert_eq!(drywall.earliest_start, 7);
        assert_eq!(drywall.latest_finish, 10);
        assert!(drywall.critical_path);

        let plumbing = by_id(&m, "plumbing");
        assert_eq!(plumbing.earliest_start, 2);
        assert_eq!(plumbing.latest_finish, 7);
        assert_eq!(plumbing.slack, 2);
        assert!(!plumbing.critical_path);

        let demo = by_id(&m, "demo");
        assert_eq!(demo.dependents, vec!["electrical", "plumbing"]);
        assert!(demo.critical_path);
        assert!(by_id(&m, "electrical").critical_path);
    }

    #[test]
    fn test_independent_items() {
        let items = vec![
            ScopeItem::new("long").with_days(10),
            ScopeItem::new("short").with_days(4),
        ];
        let m = build_schedule(&items).unwrap();
        assert!(by_id(&m, "long").critical_path);
        let short = by_id(&m, "short");
        assert_eq!(short.latest_finish, 10);
        assert_eq!(short.slack, 6);
    }

    #[test]
    fn test_zero_and_negative_durations() {
        let items = vec![
            ScopeItem::new("inspect").with_days(0),
            ScopeItem::new("fix").with_days(-3).with_dependency("inspect"),
            ScopeItem::new("paint").with_days(2).with_dependency("fix"),
        ];
        let m = build_schedule(&items).unwrap();
        assert_eq!(by_id(&m, "fix").duration_days, 0);
        assert_eq!(by_id(&m, "paint").earliest_start, 0);
        assert!(m.iter().all(|x| x.critical_path));
    }

    #[test]
    fn test_empty_batch() {
        assert!(build_schedule(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_selected_horizon() {
        let items = vec![
            ScopeItem::new("A").with_days(3),
            ScopeItem::new("B").with_days(4).with_dependency("A"),
            ScopeItem::new("C").with_days(2),
        ];
        let graph = ItemGraph::build(&items).unwrap();
        assert_eq!(selected_horizon(&items, &graph, &[true, true, true]), 7);
        assert_eq!(selected_horizon(&items, &graph, &[true, false, true]), 3);
        assert_eq!(selected_horizon(&items, &graph, &[false, false, false]), 0);
    }

    /// Random DAG: item i may depend on any earlier item.
    fn random_dag(rng: &mut SmallRng, n: usize) -> Vec<ScopeItem> {
        (0..n)
            .map(|i| {
                let mut item = ScopeItem::new(format!("I{i}")).with_days(rng.random_range(0..15));
                for j in 0..i {
                    if rng.random_bool(0.2) {
                        item = item.with_dependency(format!("I{j}"));
                    }
                }
                item
            })
            .collect()
    }

    #[test]
    fn test_critical_items_form_chains() {
        let mut rng = SmallRng::seed_from_u64(42);
        for _ in 0..50 {
            let items = random_dag(&mut rng, 20);
            let m = build_schedule(&items).unwrap();
            let horizon = m.iter().map(|x| x.earliest_finish).max().unwrap_or(0);

            for x in m.iter().filter(|x| x.critical_path) {
                // Reachable from the start through critical items.
                if x.earliest_start > 0 {
                    assert!(x.predecessors.iter().any(|p| {
                        let p = by_id(&m, p);
                        p.critical_path && p.earliest_finish == x.earliest_start
                    }));
                }
                // Reaches the end through critical items.
                if x.earliest_finish < horizon {
                    assert!(x.dependents.iter().any(|s| {
                        let s = by_id(&m, s);
                        s.critical_path && s.earliest_start == x.earliest_finish
                    }));
                }
            }
        }
    }

    #[test]
    fn test_schedule_respects_precedence() {
        let mut rng = SmallRng::seed_from_u64(7);
        let items = random_dag(&mut rng, 30);
        let m = build_schedule(&items).unwrap();
        for x in &m {
            assert!(x.latest_finish >= x.earliest_finish);
            for p in &x.predecessors {
                assert!(by_id(&m, p).earliest_finish <= x.earliest_start);
            }
        }
    }
}
