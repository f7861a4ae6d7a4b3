//! Input validation for scope item batches.
//!
//! Checks structural integrity of the dependency graph before scheduling or
//! optimization. Detects:
//! - Duplicate IDs
//! - Unknown predecessor references
//! - Circular dependencies (DAG validation)
//!
//! A successful validation yields an indexed graph that the scheduler and
//! optimizer reuse, so each batch is indexed and sorted exactly once.
//!
//! # Reference
//! Cormen et al. (2009), "Introduction to Algorithms", Ch. 22.4 (Topological Sort)
//! Kahn (1962), "Topological sorting of large networks"

use std::collections::{BTreeSet, HashMap};

use crate::error::{ScopeError, ScopeResult, ValidationErrorKind};
use crate::models::ScopeItem;

/// Validates an item batch.
///
/// Checks, in order:
/// 1. No duplicate item IDs
/// 2. All `depends_on` references point to items in the batch
/// 3. No circular dependencies
///
/// The first failing check aborts validation.
pub fn validate_items(items: &[ScopeItem]) -> ScopeResult<()> {
    ItemGraph::build(items).map(|_| ())
}

/// Returns item indices in a topological order (predecessors first).
///
/// Ties are broken by input position, so the order is deterministic.
pub fn topological_order(items: &[ScopeItem]) -> ScopeResult<Vec<usize>> {
    ItemGraph::build(items).map(|g| g.order)
}

/// Indexed, validated dependency graph over an item slice.
///
/// Edges run predecessor → successor. Adjacency lists are deduplicated and
/// sorted by input index.
#[derive(Debug, Clone)]
pub(crate) struct ItemGraph {
    pub predecessors: Vec<Vec<usize>>,
    pub successors: Vec<Vec<usize>>,
    /// Topological order of item indices.
    pub order: Vec<usize>,
}

impl ItemGraph {
    pub fn build(items: &[ScopeItem]) -> ScopeResult<Self> {
        let mut index: HashMap<&str, usize> = HashMap::with_capacity(items.len());
        for (i, item) in items.iter().enumerate() {
            if index.insert(item.id.as_str(), i).is_some() {
                return Err(ScopeError::validation(
                    ValidationErrorKind::DuplicateId,
                    format!("Duplicate item ID: {}", item.id),
                ));
            }
        }

        let mut predecessors = vec![Vec::new(); items.len()];
        let mut successors = vec![Vec::new(); items.len()];
        for (i, item) in items.iter().enumerate() {
            let mut preds = BTreeSet::new();
            for dep in &item.depends_on {
                match index.get(dep.as_str()) {
                    Some(&p) => {
                        preds.insert(p);
                    }
                    None => {
                        return Err(ScopeError::validation(
                            ValidationErrorKind::UnknownDependency,
                            format!("Item '{}' depends on unknown item '{}'", item.id, dep),
                        ));
                    }
                }
            }
            for &p in &preds {
                successors[p].push(i);
            }
            predecessors[i] = preds.into_iter().collect();
        }
        for succ in &mut successors {
            succ.sort_unstable();
        }

        let order = kahn_order(&predecessors, &successors);
        if order.len() < items.len() {
            let cycle = find_cycle(&successors).unwrap_or_default();
            return Err(ScopeError::CycleDetected {
                item_ids: cycle.iter().map(|&i| items[i].id.clone()).collect(),
            });
        }

        Ok(Self {
            predecessors,
            successors,
            order,
        })
    }

    /// Indices of every transitive predecessor of `node`.
    pub fn ancestors(&self, node: usize) -> BTreeSet<usize> {
        let mut seen = BTreeSet::new();
        let mut stack: Vec<usize> = self.predecessors[node].clone();
        while let Some(n) = stack.pop() {
            if seen.insert(n) {
                stack.extend(self.predecessors[n].iter().copied());
            }
        }
        seen
    }
}

/// Kahn's algorithm. Returns fewer than `n` indices if the graph has a cycle.
fn kahn_order(predecessors: &[Vec<usize>], successors: &[Vec<usize>]) -> Vec<usize> {
    let mut in_degree: Vec<usize> = predecessors.iter().map(Vec::len).collect();
    let mut ready: BTreeSet<usize> = in_degree
        .iter()
        .enumerate()
        .filter(|&(_, &d)| d == 0)
        .map(|(i, _)| i)
        .collect();
    let mut order = Vec::with_capacity(predecessors.len());

    while let Some(node) = ready.pop_first() {
        order.push(node);
        for &next in &successors[node] {
            in_degree[next] -= 1;
            if in_degree[next] == 0 {
                ready.insert(next);
            }
        }
    }

    order
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    InStack,
    Done,
}

/// Finds one cycle using DFS and returns its nodes in edge order.
///
/// # Algorithm
/// A back-edge to a node currently on the recursion stack closes a cycle;
/// the cycle is the stack suffix starting at that node.
fn find_cycle(successors: &[Vec<usize>]) -> Option<Vec<usize>> {
    let mut marks = vec![Mark::Unvisited; successors.len()];
    let mut path = Vec::new();

    for node in 0..successors.len() {
        if marks[node] == Mark::Unvisited {
            if let Some(cycle) = cycle_dfs(node, successors, &mut marks, &mut path) {
                return Some(cycle);
            }
        }
    }

    None
}

fn cycle_dfs(
    node: usize,
    successors: &[Vec<usize>],
    marks: &mut [Mark],
    path: &mut Vec<usize>,
) -> Option<Vec<usize>> {
    marks[node] = Mark::InStack;
    path.push(node);

    for &next in &successors[node] {
        match marks[next] {
            Mark::InStack => {
                let start = path.iter().position(|&n| n == next)?;
                return Some(path[start..].to_vec()); // Back edge → cycle
            }
            Mark::Unvisited => {
                if let Some(cycle) = cycle_dfs(next, successors, marks, path) {
                    return Some(cycle);
                }
            }
            Mark::Done => {}
        }
    }

    path.pop();
    marks[node] = Mark::Done;
    None
}
