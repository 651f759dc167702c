//! Weighted compressed sparse row matrix

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::error::{GraphError, Result};

/// Sparse matrix in compressed row storage.
///
/// Row `i` spans `indices[offsets[i]..offsets[i + 1]]`, with column indices
/// sorted within each row and a parallel `values` array holding the stored
/// entries. Absent entries are zero. Fields are public so algorithms that
/// rewire the structure in place (edge shuffling) can reach the raw arrays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CsrMatrix {
    /// Number of rows
    pub rows: usize,

    /// Number of columns
    pub cols: usize,

    /// Row pointers: row i spans indices[offsets[i]..offsets[i+1]]
    pub offsets: Vec<usize>,

    /// Column indices, sorted within each row
    pub indices: Vec<u32>,

    /// Stored entry values
    pub values: Vec<f64>,
}

impl CsrMatrix {
    /// Empty `rows x cols` matrix with no stored entries.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            offsets: vec![0; rows + 1],
            indices: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Identity matrix.
    pub fn identity(n: usize) -> Self {
        Self {
            rows: n,
            cols: n,
            offsets: (0..=n).collect(),
            indices: (0..n as u32).collect(),
            values: vec![1.0; n],
        }
    }

    /// Build from `(row, col, value)` triplets. Duplicate positions are
    /// summed; entries that sum to exactly zero are kept out of the result.
    pub fn from_triplets(
        rows: usize,
        cols: usize,
        triplets: impl IntoIterator<Item = (usize, usize, f64)>,
    ) -> Result<Self> {
        let mut entries: Vec<(usize, usize, f64)> = triplets.into_iter().collect();
        for &(r, c, _) in &entries {
            if r >= rows || c >= cols {
                return Err(GraphError::InvalidShape(format!(
                    "entry ({r}, {c}) outside a {rows}x{cols} matrix"
                )));
            }
        }
        entries.sort_unstable_by_key(|&(r, c, _)| (r, c));

        let mut offsets = vec![0usize; rows + 1];
        let mut indices: Vec<u32> = Vec::with_capacity(entries.len());
        let mut values: Vec<f64> = Vec::with_capacity(entries.len());
        let mut last: Option<(usize, usize)> = None;
        for (r, c, v) in entries {
            if last == Some((r, c)) {
                if let Some(tail) = values.last_mut() {
                    *tail += v;
                }
            } else {
                offsets[r + 1] += 1;
                indices.push(c as u32);
                values.push(v);
                last = Some((r, c));
            }
        }
        for i in 0..rows {
            offsets[i + 1] += offsets[i];
        }

        let mut out = Self {
            rows,
            cols,
            offsets,
            indices,
            values,
        };
        out.compress();
        Ok(out)
    }

    /// Build from a dense array, storing only nonzero entries.
    pub fn from_dense(dense: &Array2<f64>) -> Self {
        let (rows, cols) = dense.dim();
        let mut offsets = Vec::with_capacity(rows + 1);
        offsets.push(0);
        let mut indices = Vec::new();
        let mut values = Vec::new();
        for r in 0..rows {
            for c in 0..cols {
                let v = dense[(r, c)];
                if v != 0.0 {
                    indices.push(c as u32);
                    values.push(v);
                }
            }
            offsets.push(indices.len());
        }
        Self {
            rows,
            cols,
            offsets,
            indices,
            values,
        }
    }

    /// Dense copy of the matrix.
    pub fn to_dense(&self) -> Array2<f64> {
        let mut out = Array2::zeros((self.rows, self.cols));
        for r in 0..self.rows {
            for k in self.offsets[r]..self.offsets[r + 1] {
                out[(r, self.indices[k] as usize)] = self.values[k];
            }
        }
        out
    }

    /// Number of stored entries.
    pub fn nnz(&self) -> usize {
        self.indices.len()
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// Column indices and values of one row.
    pub fn row(&self, r: usize) -> (&[u32], &[f64]) {
        let span = self.offsets[r]..self.offsets[r + 1];
        (&self.indices[span.clone()], &self.values[span])
    }

    /// Value at `(r, c)`, zero when the entry is not stored.
    pub fn get(&self, r: usize, c: usize) -> f64 {
        match self.entry_position(r, c) {
            Some(k) => self.values[k],
            None => 0.0,
        }
    }

    /// Whether an entry is stored at `(r, c)`.
    pub fn has_entry(&self, r: usize, c: usize) -> bool {
        self.entry_position(r, c).is_some()
    }

    /// Storage position of the entry at `(r, c)`, if present.
    pub fn entry_position(&self, r: usize, c: usize) -> Option<usize> {
        let (cols, _) = self.row(r);
        cols.binary_search(&(c as u32))
            .ok()
            .map(|k| self.offsets[r] + k)
    }

    /// Iterate stored entries as `(row, col, value)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        (0..self.rows).flat_map(move |r| {
            let (cols, vals) = self.row(r);
            cols.iter()
                .zip(vals)
                .map(move |(&c, &v)| (r, c as usize, v))
        })
    }

    /// Transposed copy, per-row ordering preserved.
    pub fn transpose(&self) -> Self {
        let mut offsets = vec![0usize; self.cols + 1];
        for &c in &self.indices {
            offsets[c as usize + 1] += 1;
        }
        for i in 0..self.cols {
            offsets[i + 1] += offsets[i];
        }

        let mut indices = vec![0u32; self.nnz()];
        let mut values = vec![0.0f64; self.nnz()];
        let mut next = offsets.clone();
        for r in 0..self.rows {
            for k in self.offsets[r]..self.offsets[r + 1] {
                let c = self.indices[k] as usize;
                indices[next[c]] = r as u32;
                values[next[c]] = self.values[k];
                next[c] += 1;
            }
        }

        Self {
            rows: self.cols,
            cols: self.rows,
            offsets,
            indices,
            values,
        }
    }

    /// Elementwise combination over the union of both patterns. Missing
    /// entries enter as zero; results that are exactly zero are dropped.
    pub fn merge_with(&self, other: &Self, f: impl Fn(f64, f64) -> f64) -> Result<Self> {
        if self.rows != other.rows || self.cols != other.cols {
            return Err(GraphError::InvalidShape(format!(
                "operand shapes {}x{} and {}x{} differ",
                self.rows, self.cols, other.rows, other.cols
            )));
        }

        let mut offsets = Vec::with_capacity(self.rows + 1);
        offsets.push(0);
        let mut indices = Vec::new();
        let mut values = Vec::new();
        for r in 0..self.rows {
            let (ac, av) = self.row(r);
            let (bc, bv) = other.row(r);
            let (mut i, mut j) = (0, 0);
            let mut push = |c: u32, v: f64| {
                if v != 0.0 {
                    indices.push(c);
                    values.push(v);
                }
            };
            while i < ac.len() && j < bc.len() {
                match ac[i].cmp(&bc[j]) {
                    std::cmp::Ordering::Less => {
                        push(ac[i], f(av[i], 0.0));
                        i += 1;
                    }
                    std::cmp::Ordering::Greater => {
                        push(bc[j], f(0.0, bv[j]));
                        j += 1;
                    }
                    std::cmp::Ordering::Equal => {
                        push(ac[i], f(av[i], bv[j]));
                        i += 1;
                        j += 1;
                    }
                }
            }
            while i < ac.len() {
                push(ac[i], f(av[i], 0.0));
                i += 1;
            }
            while j < bc.len() {
                push(bc[j], f(0.0, bv[j]));
                j += 1;
            }
            offsets.push(indices.len());
        }

        Ok(Self {
            rows: self.rows,
            cols: self.cols,
            offsets,
            indices,
            values,
        })
    }

    /// Elementwise sum.
    pub fn add(&self, other: &Self) -> Result<Self> {
        self.merge_with(other, |a, b| a + b)
    }

    /// Elementwise difference.
    pub fn subtract(&self, other: &Self) -> Result<Self> {
        self.merge_with(other, |a, b| a - b)
    }

    /// Elementwise product.
    pub fn multiply(&self, other: &Self) -> Result<Self> {
        self.merge_with(other, |a, b| a * b)
    }

    /// Elementwise maximum against the other matrix (implicit zeros included).
    pub fn maximum(&self, other: &Self) -> Result<Self> {
        self.merge_with(other, f64::max)
    }

    /// Elementwise minimum against the other matrix (implicit zeros included).
    pub fn minimum(&self, other: &Self) -> Result<Self> {
        self.merge_with(other, f64::min)
    }

    /// Multiply every stored entry by a scalar.
    pub fn scale(&self, factor: f64) -> Self {
        self.map_stored(|v| v * factor)
    }

    /// Apply a function to every stored entry. Implicit zeros are untouched,
    /// so `f` should map zero to zero for dense-equivalent semantics.
    pub fn map_stored(&self, f: impl Fn(f64) -> f64) -> Self {
        let mut out = self.clone();
        for v in &mut out.values {
            *v = f(*v);
        }
        out
    }

    /// 0/1 indicator of the stored entries satisfying `pred`. Implicit
    /// zeros are never materialized.
    pub fn indicator_where(&self, pred: impl Fn(f64) -> bool) -> Self {
        let mut out = self.clone();
        out.retain(|_, _, v| pred(v));
        for v in &mut out.values {
            *v = 1.0;
        }
        out
    }

    /// Keep only the stored entries satisfying `pred`.
    pub fn retain(&mut self, mut pred: impl FnMut(usize, usize, f64) -> bool) {
        let mut write = 0;
        let mut offsets = vec![0usize; self.rows + 1];
        for r in 0..self.rows {
            for k in self.offsets[r]..self.offsets[r + 1] {
                if pred(r, self.indices[k] as usize, self.values[k]) {
                    self.indices[write] = self.indices[k];
                    self.values[write] = self.values[k];
                    write += 1;
                }
            }
            offsets[r + 1] = write;
        }
        self.offsets = offsets;
        self.indices.truncate(write);
        self.values.truncate(write);
    }

    /// Drop stored entries whose value is strictly below `cap`.
    pub fn drop_below(&mut self, cap: f64) {
        self.retain(|_, _, v| v >= cap);
    }

    /// Drop explicitly stored zeros.
    pub fn compress(&mut self) {
        self.retain(|_, _, v| v != 0.0);
    }

    /// Sparse matrix product `self * other`.
    pub fn matmul(&self, other: &Self) -> Result<Self> {
        if self.cols != other.rows {
            return Err(GraphError::InvalidShape(format!(
                "cannot multiply {}x{} by {}x{}",
                self.rows, self.cols, other.rows, other.cols
            )));
        }

        let mut offsets = Vec::with_capacity(self.rows + 1);
        offsets.push(0);
        let mut indices: Vec<u32> = Vec::new();
        let mut values: Vec<f64> = Vec::new();

        // Dense accumulator with a stamp array marking the columns touched
        // in the current row
        let mut acc = vec![0.0f64; other.cols];
        let mut stamp = vec![usize::MAX; other.cols];
        let mut touched: Vec<u32> = Vec::new();

        for r in 0..self.rows {
            for k in self.offsets[r]..self.offsets[r + 1] {
                let a = self.values[k];
                let mid = self.indices[k] as usize;
                for k2 in other.offsets[mid]..other.offsets[mid + 1] {
                    let c = other.indices[k2] as usize;
                    if stamp[c] != r {
                        stamp[c] = r;
                        acc[c] = 0.0;
                        touched.push(c as u32);
                    }
                    acc[c] += a * other.values[k2];
                }
            }
            touched.sort_unstable();
            for &c in &touched {
                let v = acc[c as usize];
                if v != 0.0 {
                    indices.push(c);
                    values.push(v);
                }
            }
            offsets.push(indices.len());
            touched.clear();
        }

        Ok(Self {
            rows: self.rows,
            cols: other.cols,
            offsets,
            indices,
            values,
        })
    }

    /// Matrix-vector product.
    pub fn matvec(&self, x: &[f64]) -> Result<Vec<f64>> {
        if x.len() != self.cols {
            return Err(GraphError::InvalidShape(format!(
                "vector of length {} against a {}x{} matrix",
                x.len(),
                self.rows,
                self.cols
            )));
        }
        let mut out = vec![0.0f64; self.rows];
        for r in 0..self.rows {
            let (cols, vals) = self.row(r);
            let mut sum = 0.0;
            for (&c, &v) in cols.iter().zip(vals) {
                sum += v * x[c as usize];
            }
            out[r] = sum;
        }
        Ok(out)
    }

    /// Scale every entry of row `r` by `factors[r]`.
    pub fn scale_rows(&mut self, factors: &[f64]) -> Result<()> {
        if factors.len() != self.rows {
            return Err(GraphError::InvalidShape(format!(
                "{} row factors for {} rows",
                factors.len(),
                self.rows
            )));
        }
        for r in 0..self.rows {
            for k in self.offsets[r]..self.offsets[r + 1] {
                self.values[k] *= factors[r];
            }
        }
        Ok(())
    }

    /// Scale every entry of column `c` by `factors[c]`.
    pub fn scale_columns(&mut self, factors: &[f64]) -> Result<()> {
        if factors.len() != self.cols {
            return Err(GraphError::InvalidShape(format!(
                "{} column factors for {} columns",
                factors.len(),
                self.cols
            )));
        }
        for (k, &c) in self.indices.iter().enumerate() {
            self.values[k] *= factors[c as usize];
        }
        Ok(())
    }

    /// Per-row sum of stored entries.
    pub fn row_sums(&self) -> Vec<f64> {
        (0..self.rows)
            .map(|r| self.row(r).1.iter().sum())
            .collect()
    }

    /// Per-column sum of stored entries.
    pub fn col_sums(&self) -> Vec<f64> {
        let mut out = vec![0.0f64; self.cols];
        for (k, &c) in self.indices.iter().enumerate() {
            out[c as usize] += self.values[k];
        }
        out
    }

    /// Per-row maximum. Rows with any implicit zero fold zero into the
    /// result, matching dense semantics; empty rows yield zero.
    pub fn row_max(&self) -> Vec<f64> {
        (0..self.rows)
            .map(|r| {
                let (cols, vals) = self.row(r);
                let base = if cols.len() < self.cols {
                    0.0
                } else {
                    f64::NEG_INFINITY
                };
                vals.iter().fold(base, |m, &v| m.max(v))
            })
            .collect()
    }

    /// Per-row minimum, with the same implicit-zero handling as [`row_max`].
    ///
    /// [`row_max`]: CsrMatrix::row_max
    pub fn row_min(&self) -> Vec<f64> {
        (0..self.rows)
            .map(|r| {
                let (cols, vals) = self.row(r);
                let base = if cols.len() < self.cols {
                    0.0
                } else {
                    f64::INFINITY
                };
                vals.iter().fold(base, |m, &v| m.min(v))
            })
            .collect()
    }

    /// Per-column maximum, implicit zeros included as in [`row_max`].
    ///
    /// [`row_max`]: CsrMatrix::row_max
    pub fn col_max(&self) -> Vec<f64> {
        self.fold_columns(f64::NEG_INFINITY, f64::max)
    }

    /// Per-column minimum, implicit zeros included as in [`row_max`].
    ///
    /// [`row_max`]: CsrMatrix::row_max
    pub fn col_min(&self) -> Vec<f64> {
        self.fold_columns(f64::INFINITY, f64::min)
    }

    fn fold_columns(&self, empty: f64, f: impl Fn(f64, f64) -> f64) -> Vec<f64> {
        let mut out = vec![empty; self.cols];
        let mut counts = vec![0usize; self.cols];
        for (k, &c) in self.indices.iter().enumerate() {
            let c = c as usize;
            out[c] = f(out[c], self.values[k]);
            counts[c] += 1;
        }
        for c in 0..self.cols {
            if counts[c] < self.rows {
                out[c] = f(out[c], 0.0);
            }
        }
        out
    }

    /// Per-row mean over the full row length.
    pub fn row_means(&self) -> Vec<f64> {
        let denom = self.cols as f64;
        self.row_sums().iter().map(|&s| s / denom).collect()
    }

    /// Per-column mean over the full column length.
    pub fn col_means(&self) -> Vec<f64> {
        let denom = self.rows as f64;
        self.col_sums().iter().map(|&s| s / denom).collect()
    }

    /// Per-row count of nonzero entries.
    pub fn row_nnz(&self) -> Vec<usize> {
        (0..self.rows)
            .map(|r| self.row(r).1.iter().filter(|&&v| v != 0.0).count())
            .collect()
    }

    /// Per-column count of nonzero entries.
    pub fn col_nnz(&self) -> Vec<usize> {
        let mut out = vec![0usize; self.cols];
        for (k, &c) in self.indices.iter().enumerate() {
            if self.values[k] != 0.0 {
                out[c as usize] += 1;
            }
        }
        out
    }

    /// Sum of all entries.
    pub fn sum(&self) -> f64 {
        self.values.iter().sum()
    }

    /// Main diagonal as a dense vector.
    pub fn diagonal(&self) -> Vec<f64> {
        (0..self.rows.min(self.cols))
            .map(|i| self.get(i, i))
            .collect()
    }

    /// `self + self^T`, the symmetrized matrix.
    pub fn symmetrize(&self) -> Result<Self> {
        self.add(&self.transpose())
    }
}
