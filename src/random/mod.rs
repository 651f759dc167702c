//! Random graph generation and degree-preserving randomization

pub mod generate;
pub mod shuffle;

pub use generate::{geometric, preferential};
pub use shuffle::{shuffle_batch, shuffle_edges, ShuffleOptions};
