//! Critical path extraction and phase grouping.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::cpm::{schedule_graph, DependencyMapping};
use crate::error::ScopeResult;
use crate::models::ScopeItem;
use crate::validation::ItemGraph;

/// Items sharing a `phase` value. Presentation only; independent of the graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseGroup {
    /// Phase number.
    pub phase: u32,
    /// Item IDs in input order.
    pub item_ids: Vec<String>,
    /// Earliest start among the phase's items.
    pub start: i64,
    /// Latest earliest-finish among the phase's items.
    pub finish: i64,
    /// Sum of item durations (work-days, not calendar span).
    pub total_days: i64,
    /// Number of critical items in the phase.
    pub critical_count: usize,
}

/// Critical path analysis of an item batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriticalPathResult {
    /// IDs of every zero-slack item, in topological order.
    pub critical_item_ids: Vec<String>,
    /// One concrete longest chain, from a start item to an end item.
    pub critical_chain: Vec<String>,
    /// Length of the longest chain (minimum project duration, days).
    pub total_duration: i64,
    /// Items bucketed by phase, ascending.
    pub phases: Vec<PhaseGroup>,
}

/// Computes the critical path and phase grouping.
///
/// # Errors
/// Same as [`build_schedule`](super::build_schedule).
pub fn critical_path(items: &[ScopeItem]) -> ScopeResult<CriticalPathResult> {
    let graph = ItemGraph::build(items)?;
    let mappings = schedule_graph(items, &graph);
    Ok(analyze(&graph, &mappings))
}

fn analyze(graph: &ItemGraph, mappings: &[DependencyMapping]) -> CriticalPathResult {
    let total_duration = mappings
        .iter()
        .map(|m| m.earliest_finish)
        .max()
        .unwrap_or(0);

    let critical_item_ids = graph
        .order
        .iter()
        .filter(|&&i| mappings[i].critical_path)
        .map(|&i| mappings[i].item_id.clone())
        .collect();

    CriticalPathResult {
        critical_item_ids,
        critical_chain: longest_chain(graph, mappings, total_duration),
        total_duration,
        phases: group_phases(mappings),
    }
}

/// Walks back from the first critical item finishing at the horizon,
/// always stepping to a critical predecessor that finishes exactly when the
/// current item starts.
fn longest_chain(
    graph: &ItemGraph,
    mappings: &[DependencyMapping],
    horizon: i64,
) -> Vec<String> {
    let end = graph
        .order
        .iter()
        .copied()
        .find(|&i| mappings[i].critical_path && mappings[i].earliest_finish == horizon);

    let mut chain = Vec::new();
    let mut current = end;
    while let Some(i) = current {
        chain.push(mappings[i].item_id.clone());
        current = graph.predecessors[i].iter().copied().find(|&p| {
            mappings[p].critical_path && mappings[p].earliest_finish == mappings[i].earliest_start
        });
    }
    chain.reverse();
    chain
}

fn group_phases(mappings: &[DependencyMapping]) -> Vec<PhaseGroup> {
    let mut buckets: BTreeMap<u32, Vec<&DependencyMapping>> = BTreeMap::new();
    for m in mappings {
        buckets.entry(m.phase).or_default().push(m);
    }

    buckets
        .into_iter()
        .map(|(phase, members)| PhaseGroup {
            phase,
            item_ids: members.iter().map(|m| m.item_id.clone()).collect(),
            start: members.iter().map(|m| m.earliest_start).min().unwrap_or(0),
            finish: members.iter().map(|m| m.earliest_finish).max().unwrap_or(0),
            total_days: members.iter().map(|m| m.duration_days).sum(),
            critical_count: members.iter().filter(|m| m.critical_path).count(),
        })
        .collect()
}
