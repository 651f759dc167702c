//! Error types shared across the library

use thiserror::Error;

/// Failures surfaced by graph construction and the analysis algorithms.
///
/// All of these are local, detectable conditions reported to the caller;
/// none are swallowed internally.
#[derive(Debug, Error)]
pub enum GraphError {
    /// A matrix is not square, operand shapes disagree, or a label set does
    /// not match the matrix dimension
    #[error("invalid shape: {0}")]
    InvalidShape(String),

    /// A signal vector's labels do not align with the graph's node index
    #[error("label mismatch: {0}")]
    LabelMismatch(String),

    /// An iterative algorithm exhausted its iteration budget without meeting
    /// its convergence threshold
    #[error("no convergence after {iterations} iterations")]
    NonConvergence { iterations: usize },

    /// Topological sort was given a graph containing a cycle
    #[error("graph contains a cycle")]
    CycleDetected,

    /// Input that would produce an undefined (0/0) result or that the
    /// algorithm cannot meaningfully process
    #[error("degenerate input: {0}")]
    DegenerateInput(String),

    /// The operation observed its cancellation token and stopped early
    #[error("operation cancelled")]
    Cancelled,
}

/// Result alias used throughout the crate.
pub type Result<T, E = GraphError> = std::result::Result<T, E>;
