//! Incremental graph construction from edge records

use itertools::izip;

use crate::error::Result;
use crate::graph::labels::{LabelIndex, NodeLabel};
use crate::graph::network::SparseGraph;
use crate::graph::sparse::CsrMatrix;

/// Accumulates an edge list and builds a [`SparseGraph`] in one shot.
///
/// The node index is derived from the sorted union of all labels seen, and
/// weights on duplicate `(source, target)` positions are summed. In
/// symmetric mode the final matrix is `M + M^T`, so callers should supply
/// each undirected edge in one direction only.
pub struct GraphBuilder<L: NodeLabel> {
    sources: Vec<L>,
    targets: Vec<L>,
    weights: Vec<f64>,
    symmetric: bool,
}

impl<L: NodeLabel> GraphBuilder<L> {
    pub fn new(symmetric: bool) -> Self {
        Self {
            sources: Vec::new(),
            targets: Vec::new(),
            weights: Vec::new(),
            symmetric,
        }
    }

    pub fn with_capacity(symmetric: bool, capacity: usize) -> Self {
        Self {
            sources: Vec::with_capacity(capacity),
            targets: Vec::with_capacity(capacity),
            weights: Vec::with_capacity(capacity),
            symmetric,
        }
    }

    /// Record an edge with the default weight of 1.
    pub fn add_edge(&mut self, source: L, target: L) {
        self.add_weighted_edge(source, target, 1.0);
    }

    /// Record an edge with an explicit weight.
    pub fn add_weighted_edge(&mut self, source: L, target: L, weight: f64) {
        self.sources.push(source);
        self.targets.push(target);
        self.weights.push(weight);
    }

    /// Number of recorded edge records.
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Build the labeled graph.
    pub fn build(self) -> Result<SparseGraph<L>> {
        let index = LabelIndex::from_sorted_union(&self.sources, &self.targets);
        let n = index.len();

        let mut triplets = Vec::with_capacity(self.len());
        for (src, dst, w) in izip!(&self.sources, &self.targets, &self.weights) {
            // Both labels are part of the union, so the lookups cannot miss
            if let (Some(i), Some(j)) = (index.position(src), index.position(dst)) {
                triplets.push((i, j, *w));
            }
        }

        let matrix = CsrMatrix::from_triplets(n, n, triplets)?;
        let matrix = if self.symmetric {
            matrix.symmetrize()?
        } else {
            matrix
        };
        SparseGraph::assemble(matrix, index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn builder_matches_direct_construction() {
        let mut builder = GraphBuilder::new(true);
        builder.add_edge("a", "b");
        builder.add_edge("b", "c");
        builder.add_edge("c", "d");
        assert_eq!(builder.len(), 3);

        let graph = builder.build().unwrap();
        let direct =
            SparseGraph::from_indices(&["a", "b", "c"], &["b", "c", "d"], None, true).unwrap();
        assert_eq!(graph.matrix(), direct.matrix());
        assert_eq!(graph.labels(), direct.labels());
    }

    #[test]
    fn duplicate_records_sum_weights() {
        let mut builder = GraphBuilder::new(false);
        builder.add_weighted_edge(0u32, 1u32, 2.0);
        builder.add_weighted_edge(0u32, 1u32, 3.0);
        let graph = builder.build().unwrap();
        assert_eq!(graph.matrix().to_dense(), array![[0.0, 5.0], [0.0, 0.0]]);
    }
}
