//! Markov clustering module

pub mod mcl;

use serde::{Deserialize, Serialize};

use crate::cancel::CancelToken;

/// One cluster of node labels.
///
/// Clusters derive from attractor rows of the converged matrix and are not
/// guaranteed disjoint: two attractors may share nonzero columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cluster<L> {
    /// Position of this cluster in the returned sequence
    pub id: u32,

    /// Member node labels, in node-index order
    pub members: Vec<L>,

    /// Number of members
    pub size: usize,
}

/// Tuning parameters for Markov Clustering.
#[derive(Debug, Clone)]
pub struct MclParams {
    /// Expansion power: the matrix is self-multiplied this many times per
    /// iteration. Must be a positive integer.
    pub expansion: u32,

    /// Inflation exponent applied to every stored entry
    pub inflation: f64,

    /// Convergence threshold on the entries of the iteration difference
    pub threshold: f64,

    /// Add a self-loop per column, weighted by the column maximum
    pub add_self_loops: bool,

    /// Stored entries below this value are dropped after inflation
    pub cap: Option<f64>,

    /// Hard iteration ceiling. Exhausting it surfaces `NonConvergence`.
    pub max_iterations: usize,

    /// Optional cooperative cancellation hook
    pub cancel: Option<CancelToken>,
}

impl Default for MclParams {
    fn default() -> Self {
        Self {
            expansion: 2,
            inflation: 2.0,
            threshold: 1e-6,
            add_self_loops: true,
            cap: Some(0.001),
            max_iterations: 100,
            cancel: None,
        }
    }
}
