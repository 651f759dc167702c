//! Random graph models

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;

use crate::error::{GraphError, Result};
use crate::graph::sparse::CsrMatrix;

/// Random geometric graph.
///
/// Samples `n` points uniformly from the `dim`-dimensional unit hypercube
/// and connects every pair of nodes whose points lie strictly closer than
/// `threshold` in Euclidean distance. The output is a symmetric 0/1
/// adjacency matrix without self-loops, deterministic for a given seed.
pub fn geometric(n: usize, threshold: f64, dim: usize, seed: u64) -> Result<CsrMatrix> {
    let mut rng = Pcg64::seed_from_u64(seed);
    let points: Vec<Vec<f64>> = (0..n)
        .map(|_| (0..dim).map(|_| rng.gen::<f64>()).collect())
        .collect();

    let mut triplets = Vec::new();
    for i in 0..n {
        for j in (i + 1)..n {
            let dist = points[i]
                .iter()
                .zip(&points[j])
                .map(|(a, b)| (a - b) * (a - b))
                .sum::<f64>()
                .sqrt();
            if dist < threshold {
                triplets.push((i, j, 1.0));
                triplets.push((j, i, 1.0));
            }
        }
    }

    log::debug!(
        "geometric model: {} nodes, {} edges",
        n,
        triplets.len() / 2
    );
    CsrMatrix::from_triplets(n, n, triplets)
}

/// Random preferential-attachment graph.
///
/// Starts from a single edge between nodes 0 and 1. Each subsequent node
/// attaches to up to `k` distinct earlier nodes, sampled without
/// replacement with probability proportional to their current degree and
/// restricted to nodes that already have positive degree; when fewer than
/// `k` such nodes exist, all of them are used. Deterministic for a given
/// seed.
pub fn preferential(n: usize, k: usize, seed: u64) -> Result<CsrMatrix> {
    if n < 2 {
        return Err(GraphError::DegenerateInput(
            "preferential attachment needs at least two nodes".into(),
        ));
    }
    if k == 0 {
        return Err(GraphError::DegenerateInput(
            "every added node must attach to at least one target".into(),
        ));
    }

    let mut rng = Pcg64::seed_from_u64(seed);
    let mut degrees = vec![0usize; n];
    let mut triplets = Vec::new();

    triplets.push((0, 1, 1.0));
    triplets.push((1, 0, 1.0));
    degrees[0] = 1;
    degrees[1] = 1;

    for i in 2..n {
        let mut candidates: Vec<usize> = (0..i).filter(|&j| degrees[j] > 0).collect();
        let mut chosen = Vec::with_capacity(k);
        for _ in 0..k.min(candidates.len()) {
            let total: usize = candidates.iter().map(|&j| degrees[j]).sum();
            let mut draw = rng.gen_range(0..total);
            let mut pick = candidates.len() - 1;
            for (pos, &j) in candidates.iter().enumerate() {
                if draw < degrees[j] {
                    pick = pos;
                    break;
                }
                draw -= degrees[j];
            }
            chosen.push(candidates.swap_remove(pick));
        }

        for &target in &chosen {
            triplets.push((i, target, 1.0));
            triplets.push((target, i, 1.0));
            degrees[i] += 1;
            degrees[target] += 1;
        }
    }

    CsrMatrix::from_triplets(n, n, triplets)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn geometric_is_symmetric_without_self_loops() {
        let m = geometric(12, 0.5, 3, 7).unwrap();
        assert_eq!(m.transpose(), m);
        assert!(m.diagonal().iter().all(|&v| v == 0.0));
        assert!(m.values.iter().all(|&v| v == 1.0));
    }

    #[test]
    fn geometric_is_deterministic_per_seed() {
        let a = geometric(5, 0.5, 3, 42).unwrap();
        let b = geometric(5, 0.5, 3, 42).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn geometric_threshold_extremes() {
        // every distance in the unit cube is below sqrt(dim)
        let complete = geometric(6, 2.0, 3, 1).unwrap();
        assert_eq!(complete.nnz(), 6 * 5);

        let empty = geometric(6, 0.0, 3, 1).unwrap();
        assert_eq!(empty.nnz(), 0);
    }

    #[test]
    fn preferential_is_deterministic_per_seed() {
        let a = preferential(7, 1, 3).unwrap();
        let b = preferential(7, 1, 3).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn preferential_attaches_every_node() {
        let m = preferential(7, 1, 3).unwrap();
        assert_eq!(m.transpose(), m);
        assert_eq!(m.get(0, 1), 1.0);
        // with k = 1 each added node brings exactly one new edge
        assert_eq!(m.nnz(), 2 * 6);
        for d in m.row_nnz() {
            assert!(d >= 1);
        }
    }

    #[test]
    fn preferential_caps_targets_at_available_nodes() {
        // node 2 can only reach {0, 1}; node 3 reaches {0, 1, 2}
        let m = preferential(4, 10, 0).unwrap();
        assert_eq!(m.row_nnz()[2], 3);
        assert_eq!(m.row_nnz()[3], 3);
    }

    #[test]
    fn degenerate_inputs_are_rejected() {
        assert!(matches!(
            preferential(1, 1, 0),
            Err(GraphError::DegenerateInput(_))
        ));
        assert!(matches!(
            preferential(5, 0, 0),
            Err(GraphError::DegenerateInput(_))
        ));
    }
}
