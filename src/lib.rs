//! Graph-analysis primitives over labeled sparse adjacency matrices:
//! Markov clustering, signal propagation, degree-preserving randomization,
//! random graph models, topological ordering, and sparse-aware Jaccard
//! distances.

pub mod cancel;
pub mod cluster;
pub mod diffusion;
pub mod error;
pub mod graph;
pub mod metrics;
pub mod random;

pub use cancel::CancelToken;
pub use cluster::{Cluster, MclParams};
pub use diffusion::PropagateOptions;
pub use error::{GraphError, Result};
pub use graph::{
    Comparison, CsrMatrix, DenseFrame, Edge, GraphBuilder, LabelIndex, NodeLabel, NodeVector,
    SparseGraph,
};
pub use random::{geometric, preferential, ShuffleOptions};
