//! Ordering and traversal algorithms over adjacency matrices

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::fmt::Display;

use crate::error::{GraphError, Result};
use crate::graph::sparse::CsrMatrix;

/// Topological order of a directed acyclic graph.
///
/// Kahn's algorithm over the stored entries. Ties among simultaneously
/// ready nodes break by ascending index, so the order is deterministic for
/// a given matrix. Fails with `CycleDetected` when any node remains
/// unordered.
pub fn topological_sort(m: &CsrMatrix) -> Result<Vec<usize>> {
    if !m.is_square() {
        return Err(GraphError::InvalidShape(format!(
            "topological sort needs a square matrix, got {}x{}",
            m.rows, m.cols
        )));
    }

    let n = m.rows;
    let mut indegree = vec![0usize; n];
    for (_, c, v) in m.iter() {
        if v != 0.0 {
            indegree[c] += 1;
        }
    }

    let mut ready: BinaryHeap<Reverse<usize>> = (0..n)
        .filter(|&i| indegree[i] == 0)
        .map(Reverse)
        .collect();
    let mut order = Vec::with_capacity(n);
    while let Some(Reverse(u)) = ready.pop() {
        order.push(u);
        let (cols, vals) = m.row(u);
        for (&c, &v) in cols.iter().zip(vals) {
            if v == 0.0 {
                continue;
            }
            let c = c as usize;
            indegree[c] -= 1;
            if indegree[c] == 0 {
                ready.push(Reverse(c));
            }
        }
    }

    if order.len() != n {
        return Err(GraphError::CycleDetected);
    }
    Ok(order)
}

/// Depth-first traversal from `start`, descending into the lowest-index
/// unvisited neighbor first. Returns the visit order and, per node, the
/// predecessor it was discovered from.
pub fn depth_first_order(
    m: &CsrMatrix,
    start: usize,
) -> Result<(Vec<usize>, Vec<Option<usize>>)> {
    if !m.is_square() {
        return Err(GraphError::InvalidShape(format!(
            "traversal needs a square matrix, got {}x{}",
            m.rows, m.cols
        )));
    }
    if start >= m.rows {
        return Err(GraphError::InvalidShape(format!(
            "start node {} outside a graph of {} nodes",
            start, m.rows
        )));
    }

    let n = m.rows;
    let mut order = Vec::with_capacity(n);
    let mut predecessors = vec![None; n];
    let mut visited = vec![false; n];

    // frames carry the node and how many of its neighbors were examined
    let mut stack: Vec<(usize, usize)> = vec![(start, 0)];
    visited[start] = true;
    order.push(start);
    while let Some(frame) = stack.last_mut() {
        let (u, k) = *frame;
        let (cols, _) = m.row(u);
        if k < cols.len() {
            frame.1 += 1;
            let v = cols[k] as usize;
            if !visited[v] {
                visited[v] = true;
                predecessors[v] = Some(u);
                order.push(v);
                stack.push((v, 0));
            }
        } else {
            stack.pop();
        }
    }

    Ok((order, predecessors))
}

/// Order-independent identifier for an undirected edge: both labels joined
/// by `sep`, smaller label first.
pub fn edge_id<L: Ord + Display>(a: &L, b: &L, sep: &str) -> String {
    if a <= b {
        format!("{a}{sep}{b}")
    } else {
        format!("{b}{sep}{a}")
    }
}
