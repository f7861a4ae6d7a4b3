//! 0/1 knapsack selection over the optional items.
//!
//! # Algorithm
//!
//! The budget is discretized into `capacity = ⌊remaining / granularity⌋`
//! steps and every cost is rounded **up** to whole steps, so any DP solution
//! stays within the real budget. Capacity is capped at the candidates' total
//! steps. The value table is one row of `capacity + 1` cells; a separate
//! `items × (capacity + 1)` bit table records take/skip decisions for
//! backtracking.
//!
//! Ties are broken toward the earlier decision (strict `>` with tolerance),
//! which makes the selection deterministic for a given input order.
//!
//! # Complexity
//! O(n · capacity) time and space.
//!
//! # Reference
//! Martello & Toth (1990), "Knapsack Problems: Algorithms and Computer
//! Implementations", Ch. 2

const EPS: f64 = 1e-9;

/// One optional item offered to the knapsack.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Candidate {
    /// Index into the item slice.
    pub index: usize,
    pub cost: f64,
    pub value: f64,
}

/// Cost in whole budget steps, rounded up.
pub(crate) fn steps(cost: f64, granularity: f64) -> usize {
    let raw = (cost / granularity - EPS).ceil();
    if raw <= 0.0 {
        0
    } else {
        raw as usize
    }
}

/// Number of budget steps that fit in `remaining`.
pub(crate) fn capacity(remaining: f64, granularity: f64) -> usize {
    let raw = (remaining / granularity + EPS).floor();
    if raw <= 0.0 {
        0
    } else {
        raw as usize
    }
}

/// Sum of candidate costs in budget steps.
pub(crate) fn total_steps(candidates: &[Candidate], granularity: f64) -> usize {
    candidates
        .iter()
        .fold(0usize, |acc, c| acc.saturating_add(steps(c.cost, granularity)))
}

/// DP table size for `candidates` over `capacity` steps.
pub(crate) fn table_cells(candidates: &[Candidate], capacity: usize) -> usize {
    candidates.len().saturating_mul(capacity.saturating_add(1))
}

/// Exact DP. Returns the item indices to take, ascending.
///
/// `capacity` is clamped to [`total_steps`]; callers bound the table with
/// [`table_cells`] first.
pub(crate) fn solve_dp(candidates: &[Candidate], capacity: usize, granularity: f64) -> Vec<usize> {
    if candidates.is_empty() {
        return Vec::new();
    }
    let capacity = capacity.min(total_steps(candidates, granularity));
    let width = capacity.saturating_add(1);
    let weights: Vec<usize> = candidates.iter().map(|c| steps(c.cost, granularity)).collect();

    let mut best = vec![0.0f64; width];
    let mut keep = vec![false; candidates.len() * width];

    for (k, cand) in candidates.iter().enumerate() {
        let w = weights[k];
        if w > capacity {
            continue;
        }
        for c in (w..=capacity).rev() {
            let with = best[c - w] + cand.value;
            if with > best[c] + EPS {
                best[c] = with;
                keep[k * width + c] = true;
            }
        }
    }

    let mut taken = Vec::new();
    let mut c = capacity;
    for k in (0..candidates.len()).rev() {
        if keep[k * width + c] {
            taken.push(candidates[k].index);
            c -= weights[k];
        }
    }
    taken.sort_unstable();
    taken
}

/// Value-per-cost ordering used by the greedy paths.
///
/// Free items come first, then descending ratio, then input order.
pub(crate) fn by_ratio(a: &Candidate, b: &Candidate) -> std::cmp::Ordering {
    ratio(b)
        .partial_cmp(&ratio(a))
        .unwrap_or(std::cmp::Ordering::Equal)
        .then(a.index.cmp(&b.index))
}

fn ratio(c: &Candidate) -> f64 {
    if c.cost <= 0.0 {
        f64::INFINITY
    } else {
        c.value / c.cost
    }
}

/// Greedy by value/cost ratio. Returns the item indices to take, ascending.
pub(crate) fn solve_greedy(candidates: &[Candidate], remaining: f64) -> Vec<usize> {
    let mut sorted = candidates.to_vec();
    sorted.sort_by(by_ratio);

    let mut left = remaining;
    let mut taken = Vec::new();
    for cand in sorted {
        if cand.cost <= left + EPS {
            left -= cand.cost;
            taken.push(cand.index);
        }
    }
    taken.sort_unstable();
    taken
}
