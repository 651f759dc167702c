//! Graph representation and label-preserving operations

pub mod algorithms;
pub mod builder;
pub mod labels;
pub mod network;
pub mod sparse;

pub use builder::GraphBuilder;
pub use labels::{LabelIndex, NodeLabel, NodeVector};
pub use network::{Comparison, DenseFrame, Edge, SparseGraph};
pub use sparse::CsrMatrix;
