//! Labeled sparse adjacency matrices

use std::collections::{BTreeMap, HashMap};

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::cluster::{self, Cluster, MclParams};
use crate::diffusion::{self, PropagateOptions};
use crate::error::{GraphError, Result};
use crate::graph::algorithms;
use crate::graph::builder::GraphBuilder;
use crate::graph::labels::{LabelIndex, NodeLabel, NodeVector};
use crate::graph::sparse::CsrMatrix;
use crate::metrics;
use crate::random::shuffle::{self, ShuffleOptions};

/// One weighted edge record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge<L> {
    pub source: L,
    pub target: L,
    pub weight: f64,
}

/// Dense label-by-label table, the alternate serialization of an adjacency
/// or distance matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct DenseFrame<L: NodeLabel> {
    pub labels: Vec<L>,
    pub data: Array2<f64>,
}

impl<L: NodeLabel> DenseFrame<L> {
    /// Value for a pair of labels, if both are present.
    pub fn value(&self, row: &L, col: &L) -> Option<f64> {
        let r = self.labels.iter().position(|l| l == row)?;
        let c = self.labels.iter().position(|l| l == col)?;
        Some(self.data[(r, c)])
    }
}

/// Elementwise comparison operators for [`SparseGraph::compare`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl Comparison {
    fn test(self, value: f64, threshold: f64) -> bool {
        match self {
            Comparison::Eq => value == threshold,
            Comparison::Ne => value != threshold,
            Comparison::Lt => value < threshold,
            Comparison::Le => value <= threshold,
            Comparison::Gt => value > threshold,
            Comparison::Ge => value >= threshold,
        }
    }
}

/// A square sparse adjacency matrix together with the labels of its nodes.
///
/// The matrix dimension always equals the label count. Operations that keep
/// the shape re-wrap their result with the same labels; anything that
/// collapses or changes shape returns unlabeled matrices, label-indexed
/// vectors, or scalars instead, never a graph with mismatched labels.
#[derive(Debug, Clone, PartialEq)]
pub struct SparseGraph<L: NodeLabel> {
    matrix: CsrMatrix,
    index: LabelIndex<L>,
}

impl<L: NodeLabel> SparseGraph<L> {
    pub(crate) fn assemble(matrix: CsrMatrix, index: LabelIndex<L>) -> Result<Self> {
        if !matrix.is_square() {
            return Err(GraphError::InvalidShape(format!(
                "adjacency matrix must be square, got {}x{}",
                matrix.rows, matrix.cols
            )));
        }
        if matrix.rows != index.len() {
            return Err(GraphError::InvalidShape(format!(
                "{} labels for a {}x{} matrix",
                index.len(),
                matrix.rows,
                matrix.cols
            )));
        }
        Ok(Self { matrix, index })
    }

    /// Wrap an existing square matrix with explicit node labels.
    pub fn wrap(matrix: CsrMatrix, labels: Vec<L>) -> Result<Self> {
        Self::assemble(matrix, LabelIndex::from_labels(labels)?)
    }

    /// Build a graph from parallel source/target label slices.
    ///
    /// The node index is the sorted union of all labels. Every edge record
    /// weighs 1 unless `weights` is given; duplicate positions are summed.
    /// With `symmetric` the matrix becomes `M + M^T`, so supplying both
    /// directions of the same edge doubles its weight.
    pub fn from_indices(
        sources: &[L],
        targets: &[L],
        weights: Option<&[f64]>,
        symmetric: bool,
    ) -> Result<Self> {
        if sources.len() != targets.len() {
            return Err(GraphError::InvalidShape(format!(
                "{} sources against {} targets",
                sources.len(),
                targets.len()
            )));
        }
        if let Some(w) = weights {
            if w.len() != sources.len() {
                return Err(GraphError::InvalidShape(format!(
                    "{} weights for {} edges",
                    w.len(),
                    sources.len()
                )));
            }
        }

        let mut builder = GraphBuilder::with_capacity(symmetric, sources.len());
        for (k, (src, dst)) in sources.iter().zip(targets).enumerate() {
            let weight = weights.map_or(1.0, |w| w[k]);
            builder.add_weighted_edge(src.clone(), dst.clone(), weight);
        }
        builder.build()
    }

    pub fn matrix(&self) -> &CsrMatrix {
        &self.matrix
    }

    pub fn index(&self) -> &LabelIndex<L> {
        &self.index
    }

    pub fn labels(&self) -> &[L] {
        self.index.labels()
    }

    pub fn node_count(&self) -> usize {
        self.index.len()
    }

    pub fn into_parts(self) -> (CsrMatrix, LabelIndex<L>) {
        (self.matrix, self.index)
    }

    /// Re-wrap a same-shaped matrix with this graph's labels.
    fn with_same_labels(&self, matrix: CsrMatrix) -> Self {
        debug_assert!(matrix.is_square() && matrix.rows == self.index.len());
        Self {
            matrix,
            index: self.index.clone(),
        }
    }

    fn labeled_vector<T>(&self, values: Vec<T>) -> NodeVector<L, T> {
        NodeVector::aligned(self.labels().to_vec(), values)
    }

    // ---- elementwise arithmetic ----

    /// Elementwise sum; the left operand's labels are kept.
    pub fn add(&self, other: &Self) -> Result<Self> {
        Ok(self.with_same_labels(self.matrix.add(&other.matrix)?))
    }

    /// Elementwise difference; the left operand's labels are kept.
    pub fn subtract(&self, other: &Self) -> Result<Self> {
        Ok(self.with_same_labels(self.matrix.subtract(&other.matrix)?))
    }

    /// Elementwise product; the left operand's labels are kept.
    pub fn multiply(&self, other: &Self) -> Result<Self> {
        Ok(self.with_same_labels(self.matrix.multiply(&other.matrix)?))
    }

    /// Elementwise maximum.
    pub fn maximum(&self, other: &Self) -> Result<Self> {
        Ok(self.with_same_labels(self.matrix.maximum(&other.matrix)?))
    }

    /// Elementwise minimum.
    pub fn minimum(&self, other: &Self) -> Result<Self> {
        Ok(self.with_same_labels(self.matrix.minimum(&other.matrix)?))
    }

    /// Matrix product. Square operands of equal dimension keep the shape,
    /// so the result is re-wrapped with this graph's labels.
    pub fn matmul(&self, other: &Self) -> Result<Self> {
        Ok(self.with_same_labels(self.matrix.matmul(&other.matrix)?))
    }

    /// Multiply every edge weight by a scalar.
    pub fn scale(&self, factor: f64) -> Self {
        self.with_same_labels(self.matrix.scale(factor))
    }

    /// Compare every stored entry against a scalar, yielding a 0/1
    /// indicator graph. Implicit zeros are never materialized, so
    /// comparisons that hold at zero (such as `Eq` with 0) only report
    /// explicitly stored entries.
    pub fn compare(&self, op: Comparison, threshold: f64) -> Self {
        self.with_same_labels(self.matrix.indicator_where(|v| op.test(v, threshold)))
    }

    // ---- entrywise maps over stored entries ----

    /// Absolute value of every stored entry.
    pub fn abs(&self) -> Self {
        self.with_same_labels(self.matrix.map_stored(f64::abs))
    }

    pub fn sqrt(&self) -> Self {
        self.with_same_labels(self.matrix.map_stored(f64::sqrt))
    }

    pub fn floor(&self) -> Self {
        self.with_same_labels(self.matrix.map_stored(f64::floor))
    }

    pub fn ceil(&self) -> Self {
        self.with_same_labels(self.matrix.map_stored(f64::ceil))
    }

    pub fn round(&self) -> Self {
        self.with_same_labels(self.matrix.map_stored(f64::round))
    }

    /// Sign of every stored entry.
    pub fn signum(&self) -> Self {
        self.with_same_labels(self.matrix.map_stored(f64::signum))
    }

    pub fn log1p(&self) -> Self {
        self.with_same_labels(self.matrix.map_stored(f64::ln_1p))
    }

    pub fn expm1(&self) -> Self {
        self.with_same_labels(self.matrix.map_stored(f64::exp_m1))
    }

    pub fn sin(&self) -> Self {
        self.with_same_labels(self.matrix.map_stored(f64::sin))
    }

    pub fn tan(&self) -> Self {
        self.with_same_labels(self.matrix.map_stored(f64::tan))
    }

    pub fn asin(&self) -> Self {
        self.with_same_labels(self.matrix.map_stored(f64::asin))
    }

    pub fn atan(&self) -> Self {
        self.with_same_labels(self.matrix.map_stored(f64::atan))
    }

    pub fn sinh(&self) -> Self {
        self.with_same_labels(self.matrix.map_stored(f64::sinh))
    }

    pub fn tanh(&self) -> Self {
        self.with_same_labels(self.matrix.map_stored(f64::tanh))
    }

    // ---- reductions ----

    /// Per-node sum of outgoing edge weights.
    pub fn row_sums(&self) -> NodeVector<L> {
        self.labeled_vector(self.matrix.row_sums())
    }

    /// Per-node sum of incoming edge weights.
    pub fn col_sums(&self) -> NodeVector<L> {
        self.labeled_vector(self.matrix.col_sums())
    }

    pub fn row_max(&self) -> NodeVector<L> {
        self.labeled_vector(self.matrix.row_max())
    }

    pub fn col_max(&self) -> NodeVector<L> {
        self.labeled_vector(self.matrix.col_max())
    }

    pub fn row_min(&self) -> NodeVector<L> {
        self.labeled_vector(self.matrix.row_min())
    }

    pub fn col_min(&self) -> NodeVector<L> {
        self.labeled_vector(self.matrix.col_min())
    }

    pub fn row_means(&self) -> NodeVector<L> {
        self.labeled_vector(self.matrix.row_means())
    }

    pub fn col_means(&self) -> NodeVector<L> {
        self.labeled_vector(self.matrix.col_means())
    }

    /// Per-node count of nonzero row entries.
    pub fn row_counts(&self) -> NodeVector<L, usize> {
        self.labeled_vector(self.matrix.row_nnz())
    }

    /// Per-node count of nonzero column entries.
    pub fn col_counts(&self) -> NodeVector<L, usize> {
        self.labeled_vector(self.matrix.col_nnz())
    }

    /// Sum over the whole matrix.
    pub fn sum(&self) -> f64 {
        self.matrix.sum()
    }

    /// Number of stored entries.
    pub fn nnz(&self) -> usize {
        self.matrix.nnz()
    }

    /// Main diagonal, label-indexed.
    pub fn diagonal(&self) -> NodeVector<L> {
        self.labeled_vector(self.matrix.diagonal())
    }

    /// Per-node degree: the count of nonzero entries in its row.
    pub fn degrees(&self) -> NodeVector<L, usize> {
        self.row_counts()
    }

    /// Histogram of occurring degree values. Degrees with no occurrences
    /// are omitted.
    pub fn degree_distribution(&self) -> BTreeMap<usize, usize> {
        let mut histogram = BTreeMap::new();
        for &d in self.matrix.row_nnz().iter() {
            *histogram.entry(d).or_insert(0) += 1;
        }
        histogram
    }

    /// Number of edges. In symmetric mode each off-diagonal pair counts
    /// once: `(nnz + diagonal nonzeros) / 2`.
    pub fn edge_count(&self, symmetric: bool) -> usize {
        if symmetric {
            let diag = self
                .matrix
                .diagonal()
                .iter()
                .filter(|&&v| v != 0.0)
                .count();
            (diag + self.matrix.nnz()) / 2
        } else {
            self.matrix.nnz()
        }
    }

    // ---- tabular conversion ----

    /// Edge-list form. With `symmetric`, only entries whose source position
    /// is at most the target position are reported, so each undirected edge
    /// appears once.
    pub fn to_edges(&self, symmetric: bool) -> Vec<Edge<L>> {
        self.matrix
            .iter()
            .filter(|&(r, c, _)| !symmetric || r <= c)
            .map(|(r, c, weight)| Edge {
                source: self.index.label(r).clone(),
                target: self.index.label(c).clone(),
                weight,
            })
            .collect()
    }

    /// Dense label-by-label table form.
    pub fn to_dense(&self) -> DenseFrame<L> {
        DenseFrame {
            labels: self.labels().to_vec(),
            data: self.matrix.to_dense(),
        }
    }

    /// Combine two graphs on their node labels. For an edge present in
    /// both, `other`'s weight wins. The result is directed; callers
    /// re-symmetrize if needed.
    pub fn merge(&self, other: &Self) -> Result<Self> {
        let mut last: HashMap<(L, L), f64> = HashMap::new();
        for e in self.to_edges(false).into_iter().chain(other.to_edges(false)) {
            last.insert((e.source, e.target), e.weight);
        }
        let mut builder = GraphBuilder::with_capacity(false, last.len());
        for ((source, target), weight) in last {
            builder.add_weighted_edge(source, target, weight);
        }
        builder.build()
    }

    // ---- algorithms ----

    /// Symmetric degree normalization `D^{-1/2} M D^{-1/2}` for propagation.
    pub fn normalize(&self) -> Result<Self> {
        Ok(self.with_same_labels(diffusion::normalize(&self.matrix)?))
    }

    /// Propagate a label-aligned signal across the graph. Fails with
    /// `LabelMismatch` unless `y` carries exactly this graph's labels in
    /// node order.
    pub fn propagate(&self, y: &NodeVector<L>, options: &PropagateOptions) -> Result<NodeVector<L>> {
        if y.labels() != self.labels() {
            return Err(GraphError::LabelMismatch(
                "signal labels do not match the graph's node index".into(),
            ));
        }
        let values = diffusion::propagate(&self.matrix, y.values(), options)?;
        Ok(self.labeled_vector(values))
    }

    /// Alias for [`propagate`](SparseGraph::propagate).
    pub fn smooth(&self, y: &NodeVector<L>, options: &PropagateOptions) -> Result<NodeVector<L>> {
        self.propagate(y, options)
    }

    /// Markov Clustering. Returns the interpreted clusters over this
    /// graph's labels.
    pub fn mcl(&self, params: &MclParams) -> Result<Vec<Cluster<L>>> {
        let clusters = cluster::mcl::mcl(&self.matrix, params)?;
        Ok(clusters
            .into_iter()
            .enumerate()
            .map(|(id, members)| {
                let members: Vec<L> = members
                    .into_iter()
                    .map(|p| self.index.label(p).clone())
                    .collect();
                Cluster {
                    id: id as u32,
                    size: members.len(),
                    members,
                }
            })
            .collect())
    }

    /// Markov Clustering without interpretation: the converged matrix.
    pub fn mcl_converged(&self, params: &MclParams) -> Result<CsrMatrix> {
        cluster::mcl::converge(&self.matrix, params)
    }

    /// Degree-preserving edge shuffle, in place. Returns the number of
    /// swaps performed.
    pub fn shuffle(&mut self, options: &ShuffleOptions) -> Result<usize> {
        shuffle::shuffle_edges(&mut self.matrix, options)
    }

    /// Topologically ordered labels of a DAG. Every edge points from an
    /// earlier to a later label in the returned order.
    pub fn topological_sort(&self) -> Result<Vec<L>> {
        let order = algorithms::topological_sort(&self.matrix)?;
        Ok(order.into_iter().map(|p| self.index.label(p).clone()).collect())
    }

    /// Depth-first traversal order starting from `start`.
    pub fn depth_first_order(&self, start: &L) -> Result<Vec<L>> {
        let position = self.index.position(start).ok_or_else(|| {
            GraphError::LabelMismatch(format!("start label {start:?} is not a node"))
        })?;
        let (order, _) = algorithms::depth_first_order(&self.matrix, position)?;
        Ok(order.into_iter().map(|p| self.index.label(p).clone()).collect())
    }

    /// Pairwise Jaccard distances between node rows, as a dense
    /// label-by-label table.
    pub fn pdist(&self) -> Result<DenseFrame<L>> {
        let data = metrics::jaccard_distance(&self.matrix, None)?;
        Ok(DenseFrame {
            labels: self.labels().to_vec(),
            data,
        })
    }
}

impl SparseGraph<usize> {
    /// Wrap a square matrix with default integer labels `0..n`.
    pub fn wrap_default(matrix: CsrMatrix) -> Result<Self> {
        let index = LabelIndex::sequential(matrix.rows);
        Self::assemble(matrix, index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cluster::MclParams;
    use crate::diffusion::PropagateOptions;
    use ndarray::array;

    fn letters(edges: &[(&'static str, &'static str)]) -> SparseGraph<&'static str> {
        let sources: Vec<_> = edges.iter().map(|&(s, _)| s).collect();
        let targets: Vec<_> = edges.iter().map(|&(_, t)| t).collect();
        SparseGraph::from_indices(&sources, &targets, None, true).unwrap()
    }

    #[test]
    fn from_indices_sorts_the_label_union() {
        let g = letters(&[("a", "b"), ("b", "c"), ("c", "d")]);
        assert_eq!(g.labels(), &["a", "b", "c", "d"]);
        assert_eq!(
            g.matrix().to_dense(),
            array![
                [0.0, 1.0, 0.0, 0.0],
                [1.0, 0.0, 1.0, 0.0],
                [0.0, 1.0, 0.0, 1.0],
                [0.0, 0.0, 1.0, 0.0]
            ]
        );
    }

    #[test]
    fn from_indices_with_weights() {
        let g = SparseGraph::from_indices(
            &["a", "b", "c"],
            &["b", "c", "d"],
            Some(&[1.0, 2.0, 3.0]),
            true,
        )
        .unwrap();
        assert_eq!(
            g.matrix().to_dense(),
            array![
                [0.0, 1.0, 0.0, 0.0],
                [1.0, 0.0, 2.0, 0.0],
                [0.0, 2.0, 0.0, 3.0],
                [0.0, 0.0, 3.0, 0.0]
            ]
        );
    }

    #[test]
    fn edge_list_round_trip() {
        let g = letters(&[("a", "b"), ("b", "c"), ("c", "d")]);
        let edges = g.to_edges(true);
        assert_eq!(
            edges,
            vec![
                Edge { source: "a", target: "b", weight: 1.0 },
                Edge { source: "b", target: "c", weight: 1.0 },
                Edge { source: "c", target: "d", weight: 1.0 },
            ]
        );

        let sources: Vec<_> = edges.iter().map(|e| e.source).collect();
        let targets: Vec<_> = edges.iter().map(|e| e.target).collect();
        let weights: Vec<_> = edges.iter().map(|e| e.weight).collect();
        let again =
            SparseGraph::from_indices(&sources, &targets, Some(&weights), true).unwrap();
        assert_eq!(again, g);
    }

    #[test]
    fn wrap_validates_shape_and_labels() {
        let rect = CsrMatrix::zeros(2, 3);
        assert!(matches!(
            SparseGraph::wrap(rect, vec!["a", "b"]),
            Err(GraphError::InvalidShape(_))
        ));

        let square = CsrMatrix::zeros(2, 2);
        assert!(SparseGraph::wrap(square.clone(), vec!["a"]).is_err());
        let g = SparseGraph::wrap_default(square).unwrap();
        assert_eq!(g.labels(), &[0, 1]);
    }

    #[test]
    fn merge_takes_weights_from_other() {
        let g = letters(&[("a", "b"), ("b", "c"), ("c", "d")]);
        let h = SparseGraph::from_indices(&["a", "a", "e"], &["b", "e", "d"], None, true)
            .unwrap()
            .scale(2.0);
        let merged = g.merge(&h).unwrap();
        assert_eq!(merged.labels(), &["a", "b", "c", "d", "e"]);
        assert_eq!(
            merged.to_dense().data,
            array![
                [0.0, 2.0, 0.0, 0.0, 2.0],
                [2.0, 0.0, 1.0, 0.0, 0.0],
                [0.0, 1.0, 0.0, 1.0, 0.0],
                [0.0, 0.0, 1.0, 0.0, 2.0],
                [2.0, 0.0, 0.0, 2.0, 0.0]
            ]
        );
    }

    #[test]
    fn degrees_and_distribution() {
        let g = letters(&[("a", "b"), ("b", "c"), ("c", "d")]);
        let degrees = g.degrees();
        assert_eq!(degrees.values(), &[1, 2, 2, 1]);
        assert_eq!(degrees.get(&"b"), Some(&2));

        let histogram = g.degree_distribution();
        assert_eq!(histogram.get(&1), Some(&2));
        assert_eq!(histogram.get(&2), Some(&2));
        assert_eq!(histogram.get(&0), None);
        assert_eq!(g.edge_count(true), 3);
        assert_eq!(g.edge_count(false), 6);
    }

    #[test]
    fn labeled_operations_keep_labels() {
        let g = letters(&[("a", "b"), ("b", "c")]);
        let doubled = g.add(&g).unwrap();
        assert_eq!(doubled.labels(), g.labels());
        assert_eq!(doubled.matrix(), &g.matrix().scale(2.0));

        let walked = g.matmul(&g).unwrap();
        assert_eq!(walked.labels(), g.labels());
        // two-step walks from a land back on a and on c
        assert_eq!(walked.matrix().get(0, 0), 1.0);
        assert_eq!(walked.matrix().get(0, 2), 1.0);

        let big = g.scale(3.0).compare(Comparison::Ge, 3.0);
        assert_eq!(big.nnz(), g.nnz());
        assert_eq!(big.matrix().get(0, 1), 1.0);
    }

    #[test]
    fn reductions_are_label_indexed() {
        let g = SparseGraph::from_indices(
            &["a", "b"],
            &["b", "c"],
            Some(&[2.0, 4.0]),
            true,
        )
        .unwrap();
        let sums = g.row_sums();
        assert_eq!(sums.get(&"b"), Some(&6.0));
        assert_eq!(g.col_max().get(&"c"), Some(&4.0));
        assert_eq!(g.sum(), 12.0);
        assert_eq!(g.diagonal().values(), &[0.0, 0.0, 0.0]);
    }

    #[test]
    fn propagation_requires_matching_labels() {
        let g = letters(&[("a", "b")]);
        let y = NodeVector::new(vec!["b", "a"], vec![1.0, 0.0]).unwrap();
        assert!(matches!(
            g.propagate(&y, &PropagateOptions::default()),
            Err(GraphError::LabelMismatch(_))
        ));
    }

    #[test]
    fn propagation_with_zero_alpha_returns_signal() {
        let g = letters(&[("a", "b"), ("b", "c"), ("a", "c")]);
        let y = NodeVector::new(vec!["a", "b", "c"], vec![0.2, 0.5, 0.9]).unwrap();
        let options = PropagateOptions {
            alpha: 0.0,
            ..Default::default()
        };
        let f = g.propagate(&y, &options).unwrap();
        assert_eq!(f.values(), y.values());
    }

    #[test]
    fn mcl_splits_two_communities() {
        // two communities bridged by a single d-f edge
        let g = SparseGraph::from_indices(
            &["a", "a", "b", "b", "b", "c", "c", "d", "d", "f", "f", "g"],
            &["b", "d", "d", "c", "e", "d", "e", "e", "f", "g", "h", "h"],
            None,
            true,
        )
        .unwrap();

        let clusters = g.mcl(&MclParams::default()).unwrap();
        let mut members: Vec<Vec<&str>> =
            clusters.iter().map(|c| c.members.clone()).collect();
        for m in &mut members {
            m.sort_unstable();
        }
        members.sort();
        assert_eq!(members, vec![vec!["a", "b", "c", "d", "e"], vec!["f", "g", "h"]]);
    }

    #[test]
    fn mcl_low_inflation_merges_communities() {
        let g = SparseGraph::from_indices(
            &["a", "a", "b", "b", "b", "c", "c", "d", "d", "f", "f", "g"],
            &["b", "d", "d", "c", "e", "d", "e", "e", "f", "g", "h", "h"],
            None,
            true,
        )
        .unwrap();

        let params = MclParams {
            inflation: 1.2,
            max_iterations: 500,
            ..Default::default()
        };
        let clusters = g.mcl(&params).unwrap();
        assert_eq!(clusters.len(), 1);
        let mut members = clusters[0].members.clone();
        members.sort_unstable();
        assert_eq!(members, vec!["a", "b", "c", "d", "e", "f", "g", "h"]);
    }

    #[test]
    fn mcl_two_disconnected_components() {
        let mut sources = Vec::new();
        let mut targets = Vec::new();
        let first = ["a", "b", "c", "d", "e"];
        for i in 0..first.len() {
            for j in (i + 1)..first.len() {
                sources.push(first[i]);
                targets.push(first[j]);
            }
        }
        let second = ["f", "g", "h"];
        for i in 0..second.len() {
            for j in (i + 1)..second.len() {
                sources.push(second[i]);
                targets.push(second[j]);
            }
        }
        let g = SparseGraph::from_indices(&sources, &targets, None, true).unwrap();

        let clusters = g.mcl(&MclParams::default()).unwrap();
        assert_eq!(clusters.len(), 2);
        let mut members: Vec<Vec<&str>> =
            clusters.iter().map(|c| c.members.clone()).collect();
        for m in &mut members {
            m.sort_unstable();
        }
        members.sort();
        assert_eq!(members[0], vec!["a", "b", "c", "d", "e"]);
        assert_eq!(members[1], vec!["f", "g", "h"]);
    }

    #[test]
    fn topological_sort_is_deterministic() {
        let g = SparseGraph::from_indices(
            &[7, 7, 5, 3, 3, 11, 11, 11, 8],
            &[11, 8, 11, 8, 10, 2, 9, 10, 9],
            None,
            false,
        )
        .unwrap();
        assert_eq!(g.topological_sort().unwrap(), vec![3, 5, 7, 8, 11, 2, 9, 10]);
    }

    #[test]
    fn pdist_has_zero_diagonal() {
        let g = letters(&[("a", "b"), ("b", "c"), ("c", "a")]);
        let frame = g.pdist().unwrap();
        for i in 0..3 {
            assert_eq!(frame.data[(i, i)], 0.0);
        }
        assert_eq!(frame.value(&"a", &"a"), Some(0.0));
    }

    #[test]
    fn shuffle_preserves_degrees() {
        let mut g = letters(&[
            ("a", "b"),
            ("b", "c"),
            ("c", "d"),
            ("d", "e"),
            ("e", "f"),
            ("f", "a"),
        ]);
        let before = g.degrees();
        let swaps = g
            .shuffle(&ShuffleOptions {
                max_iterations: Some(500),
                ..Default::default()
            })
            .unwrap();
        assert!(swaps > 0);
        assert_eq!(g.degrees(), before);
        // undirected shuffling keeps the matrix symmetric
        assert_eq!(g.matrix().transpose(), *g.matrix());
    }
}
