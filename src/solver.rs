//! Visiting-order solver.
//!
//! Orders points as an open path with a fixed start at index 0. The primary
//! strategy is a cheapest-insertion construction improved by a budgeted tabu
//! search, with a bounded destroy-and-repair phase to escape local optima.
//! `nearest_neighbor` is the deterministic fallback; it can be materially
//! worse in total cost but always yields a complete permutation.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::matrix::CostMatrix;

const EPS: f64 = 1e-9;

/// Tabu iterations without a new best before the search gives up.
const STAGNATION_LIMIT: usize = 64;

/// Wall-clock budgets bounding the search.
///
/// Explicit configuration so tests can shrink them for fast, deterministic
/// runs of both strategies.
#[derive(Debug, Clone)]
pub struct SolverBudgets {
    /// Overall search budget.
    pub time_limit: Duration,
    /// Budget for each destroy-and-repair phase, capped by `time_limit`.
    pub lns_time_limit: Duration,
}

impl Default for SolverBudgets {
    fn default() -> Self {
        Self {
            time_limit: Duration::from_secs(60),
            lns_time_limit: Duration::from_secs(5),
        }
    }
}

/// Solves the ordering problem over a cost matrix.
///
/// Returns a permutation of `0..n` starting at node 0. Zero or one or two
/// points need no solving and come back in identity order. A matrix with
/// non-finite costs is handed straight to the greedy fallback.
pub fn solve(matrix: &CostMatrix, budgets: &SolverBudgets) -> Vec<usize> {
    let n = matrix.len();
    if n <= 2 {
        return (0..n).collect();
    }
    if !matrix.is_finite() {
        return nearest_neighbor(matrix);
    }

    let deadline = Instant::now() + budgets.time_limit;
    // Seed with the better of the two constructions; the improvement phase
    // never returns worse than its seed.
    let seed = {
        let inserted = cheapest_insertion(matrix);
        let greedy = nearest_neighbor(matrix);
        if path_cost(matrix, &greedy) < path_cost(matrix, &inserted) {
            greedy
        } else {
            inserted
        }
    };
    let (mut best, mut best_cost) = tabu_search(matrix, seed, deadline);

    while Instant::now() < deadline {
        let Some(kicked) = lns_kick(matrix, &best, best_cost, budgets.lns_time_limit, deadline)
        else {
            break;
        };
        // The kick only reports strictly better tours, and the follow-up
        // tabu pass can only improve on its seed.
        let (route, cost) = tabu_search(matrix, kicked, deadline);
        best = route;
        best_cost = cost;
    }

    debug!(cost = best_cost, points = n, "route search finished");
    if !is_permutation(&best, n) {
        return nearest_neighbor(matrix);
    }
    best
}

/// Greedy nearest-neighbor construction from node 0.
///
/// Ties go to the lowest index. A node whose remaining arcs are all
/// non-finite is treated as unreachable and appended lowest-index-first so
/// the route still covers every point.
pub fn nearest_neighbor(matrix: &CostMatrix) -> Vec<usize> {
    let n = matrix.len();
    if n == 0 {
        return Vec::new();
    }

    let mut visited = vec![false; n];
    let mut route = Vec::with_capacity(n);
    let mut current = 0;
    visited[0] = true;
    route.push(0);

    while route.len() < n {
        let mut next = None;
        let mut best = f64::INFINITY;
        for candidate in 0..n {
            if visited[candidate] {
                continue;
            }
            let cost = matrix.cost(current, candidate);
            if cost < best {
                best = cost;
                next = Some(candidate);
            }
        }

        let Some(node) = next.or_else(|| (0..n).find(|&candidate| !visited[candidate])) else {
            break;
        };
        visited[node] = true;
        route.push(node);
        current = node;
    }

    route
}

/// Total cost of an open path over consecutive pairs.
pub fn path_cost(matrix: &CostMatrix, route: &[usize]) -> f64 {
    route
        .windows(2)
        .map(|pair| matrix.cost(pair[0], pair[1]))
        .sum()
}

/// Builds an initial tour by repeatedly inserting the cheapest remaining
/// node at its cheapest position after the fixed start.
fn cheapest_insertion(matrix: &CostMatrix) -> Vec<usize> {
    let n = matrix.len();
    let mut route = vec![0];
    let mut remaining: Vec<usize> = (1..n).collect();

    while !remaining.is_empty() {
        let mut best_index = 0;
        let mut best_pos = 1;
        let mut best_delta = f64::INFINITY;
        for (index, &node) in remaining.iter().enumerate() {
            for pos in 1..=route.len() {
                let delta = insertion_delta(matrix, &route, node, pos);
                if delta < best_delta {
                    best_delta = delta;
                    best_index = index;
                    best_pos = pos;
                }
            }
        }
        let node = remaining.remove(best_index);
        route.insert(best_pos, node);
    }

    route
}

/// Cost change of inserting `node` at `pos` (1..=len, after the start).
fn insertion_delta(matrix: &CostMatrix, route: &[usize], node: usize, pos: usize) -> f64 {
    let prev = route[pos - 1];
    if pos == route.len() {
        matrix.cost(prev, node)
    } else {
        let next = route[pos];
        matrix.cost(prev, node) + matrix.cost(node, next) - matrix.cost(prev, next)
    }
}

/// Tabu-style improvement over 2-opt segment reversals.
///
/// Each iteration applies the best non-tabu move, improving or not, and
/// tracks the best tour seen. Stops on the deadline or after
/// `STAGNATION_LIMIT` iterations without a new best.
fn tabu_search(matrix: &CostMatrix, seed: Vec<usize>, deadline: Instant) -> (Vec<usize>, f64) {
    let n = seed.len();
    let mut current = seed;
    let mut current_cost = path_cost(matrix, &current);
    let mut best = current.clone();
    let mut best_cost = current_cost;

    let tenure = (n / 2).clamp(4, 32);
    let mut tabu: VecDeque<(usize, usize)> = VecDeque::with_capacity(tenure);
    let mut stale = 0;

    while Instant::now() < deadline && stale < STAGNATION_LIMIT {
        let mut chosen: Option<(usize, usize, f64)> = None;
        for i in 1..n - 1 {
            for j in i + 1..n {
                if tabu.contains(&(i, j)) {
                    continue;
                }
                let delta = two_opt_delta(matrix, &current, i, j);
                // Strict comparison keeps the lowest (i, j) on ties.
                if chosen.is_none_or(|(_, _, best_delta)| delta < best_delta) {
                    chosen = Some((i, j, delta));
                }
            }
        }
        let Some((i, j, delta)) = chosen else {
            break;
        };

        current[i..=j].reverse();
        current_cost += delta;
        tabu.push_back((i, j));
        if tabu.len() > tenure {
            tabu.pop_front();
        }

        if current_cost + EPS < best_cost {
            best.clone_from(&current);
            best_cost = current_cost;
            stale = 0;
        } else {
            stale += 1;
        }
    }

    (best, best_cost)
}

/// Cost change of reversing `route[i..=j]`, with `i >= 1`.
fn two_opt_delta(matrix: &CostMatrix, route: &[usize], i: usize, j: usize) -> f64 {
    let before = route[i - 1];
    let mut old = matrix.cost(before, route[i]);
    let mut new = matrix.cost(before, route[j]);
    if let Some(&after) = route.get(j + 1) {
        old += matrix.cost(route[j], after);
        new += matrix.cost(route[i], after);
    }
    new - old
}

/// One destroy-and-repair phase: remove a window of consecutive nodes and
/// reinsert each at its cheapest position. Returns the first strictly
/// better tour found within the sub-budget, or `None`.
fn lns_kick(
    matrix: &CostMatrix,
    route: &[usize],
    cost_to_beat: f64,
    sub_budget: Duration,
    deadline: Instant,
) -> Option<Vec<usize>> {
    let n = route.len();
    let window = (n / 4).clamp(2, 12);
    if n <= window + 1 {
        return None;
    }
    let end = deadline.min(Instant::now() + sub_budget);

    for start in 1..=n - window {
        if Instant::now() >= end {
            break;
        }
        let mut candidate: Vec<usize> = route[..start].to_vec();
        candidate.extend_from_slice(&route[start + window..]);
        for &node in &route[start..start + window] {
            let pos = (1..=candidate.len())
                .min_by(|&a, &b| {
                    insertion_delta(matrix, &candidate, node, a)
                        .total_cmp(&insertion_delta(matrix, &candidate, node, b))
                })
                .unwrap_or(candidate.len());
            candidate.insert(pos, node);
        }
        if path_cost(matrix, &candidate) + EPS < cost_to_beat {
            return Some(candidate);
        }
    }

    None
}

fn is_permutation(route: &[usize], n: usize) -> bool {
    if route.len() != n {
        return false;
    }
    let mut seen = vec![false; n];
    for &node in route {
        if node >= n || seen[node] {
            return false;
        }
        seen[node] = true;
    }
    true
}
