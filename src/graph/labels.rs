//! Node label bookkeeping

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

use crate::error::{GraphError, Result};

/// Values usable as node labels: hashable, totally orderable, printable.
/// Blanket-implemented, so strings and integers qualify out of the box.
pub trait NodeLabel: Clone + Ord + Hash + Debug {}

impl<T: Clone + Ord + Hash + Debug> NodeLabel for T {}

/// Bidirectional mapping between node labels and dense matrix positions.
///
/// Built once at graph construction and never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelIndex<L: NodeLabel> {
    labels: Vec<L>,
    positions: HashMap<L, usize>,
}

impl<L: NodeLabel> LabelIndex<L> {
    /// Index the given labels in their current order. Labels must be unique.
    pub fn from_labels(labels: Vec<L>) -> Result<Self> {
        let mut positions = HashMap::with_capacity(labels.len());
        for (i, label) in labels.iter().enumerate() {
            if positions.insert(label.clone(), i).is_some() {
                return Err(GraphError::InvalidShape(format!(
                    "duplicate node label {label:?}"
                )));
            }
        }
        Ok(Self { labels, positions })
    }

    /// Index the sorted, deduplicated union of two label sequences.
    pub fn from_sorted_union(a: &[L], b: &[L]) -> Self {
        let mut labels: Vec<L> = a.iter().chain(b).cloned().collect();
        labels.sort_unstable();
        labels.dedup();
        let positions = labels
            .iter()
            .enumerate()
            .map(|(i, l)| (l.clone(), i))
            .collect();
        Self { labels, positions }
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Position of a label, if it is indexed.
    pub fn position(&self, label: &L) -> Option<usize> {
        self.positions.get(label).copied()
    }

    /// Label at a position. Panics if out of range, like slice indexing.
    pub fn label(&self, position: usize) -> &L {
        &self.labels[position]
    }

    /// All labels in position order.
    pub fn labels(&self) -> &[L] {
        &self.labels
    }
}

impl LabelIndex<usize> {
    /// Default integer labels `0..n` for graphs wrapping a raw matrix.
    pub fn sequential(n: usize) -> Self {
        let labels: Vec<usize> = (0..n).collect();
        let positions = labels.iter().map(|&l| (l, l)).collect();
        Self { labels, positions }
    }
}

/// Per-node values aligned with a graph's node order.
///
/// Returned by axis reductions and consumed/produced by propagation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeVector<L: NodeLabel, T = f64> {
    labels: Vec<L>,
    values: Vec<T>,
}

impl<L: NodeLabel, T> NodeVector<L, T> {
    /// Pair labels with values. Lengths must match.
    pub fn new(labels: Vec<L>, values: Vec<T>) -> Result<Self> {
        if labels.len() != values.len() {
            return Err(GraphError::InvalidShape(format!(
                "{} labels against {} values",
                labels.len(),
                values.len()
            )));
        }
        Ok(Self { labels, values })
    }

    /// Internal constructor for sequences whose alignment is known.
    pub(crate) fn aligned(labels: Vec<L>, values: Vec<T>) -> Self {
        debug_assert_eq!(labels.len(), values.len());
        Self { labels, values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn labels(&self) -> &[L] {
        &self.labels
    }

    pub fn values(&self) -> &[T] {
        &self.values
    }

    pub fn into_values(self) -> Vec<T> {
        self.values
    }

    /// Value for one label, if present. Linear scan.
    pub fn get(&self, label: &L) -> Option<&T> {
        self.labels
            .iter()
            .position(|l| l == label)
            .map(|i| &self.values[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = (&L, &T)> {
        self.labels.iter().zip(&self.values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn union_index_is_sorted_and_deduplicated() {
        let index = LabelIndex::from_sorted_union(&["c", "a", "b"], &["b", "d"]);
        assert_eq!(index.labels(), &["a", "b", "c", "d"]);
        assert_eq!(index.position(&"c"), Some(2));
        assert_eq!(index.position(&"z"), None);
        assert_eq!(index.label(3), &"d");
    }

    #[test]
    fn duplicate_labels_are_rejected() {
        let err = LabelIndex::from_labels(vec!["a", "b", "a"]).unwrap_err();
        assert!(matches!(err, GraphError::InvalidShape(_)));
    }

    #[test]
    fn sequential_index_maps_positions_to_themselves() {
        let index = LabelIndex::sequential(3);
        assert_eq!(index.labels(), &[0, 1, 2]);
        assert_eq!(index.position(&2), Some(2));
    }

    #[test]
    fn node_vector_checks_alignment() {
        let v = NodeVector::new(vec!["a", "b"], vec![1.0, 2.0]).unwrap();
        assert_eq!(v.get(&"b"), Some(&2.0));
        assert_eq!(v.get(&"x"), None);
        assert!(NodeVector::new(vec!["a"], vec![1.0, 2.0]).is_err());
    }
}
