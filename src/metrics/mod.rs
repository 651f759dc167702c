//! Sparse-aware distance computation
//!
//! Rows are treated as sets of nonzero column indices; magnitudes beyond
//! presence are ignored. The sparse path works off presence-pattern
//! products; dense inputs go through a generic pairwise routine.

use ndarray::{Array2, ArrayView1, ArrayView2};
use rayon::prelude::*;

use crate::error::{GraphError, Result};
use crate::graph::sparse::CsrMatrix;

/// Inputs below this many rows are processed sequentially
const PARALLEL_ROW_THRESHOLD: usize = 1000;

/// Presence pattern: 1.0 wherever a nonzero entry is stored.
fn presence(m: &CsrMatrix) -> CsrMatrix {
    m.indicator_where(|v| v != 0.0)
}

/// Pairwise Jaccard distances between the rows of `x` and the rows of `y`
/// (defaulting to `x` itself).
///
/// Intersection sizes come from the boolean product of the presence
/// patterns; the union is the intersection plus the Manhattan distance
/// between the presence rows. Results are `1 - intersection/union`,
/// clipped to `[0, 1]`. A pair of all-zero rows counts as two identical
/// empty sets and yields distance 0 rather than 0/0.
pub fn jaccard_distance(x: &CsrMatrix, y: Option<&CsrMatrix>) -> Result<Array2<f64>> {
    let y = y.unwrap_or(x);
    if x.cols != y.cols {
        return Err(GraphError::InvalidShape(format!(
            "row sets over {} and {} columns are not comparable",
            x.cols, y.cols
        )));
    }

    let rows = x.rows;
    let cols = y.rows;
    if rows == 0 || cols == 0 {
        return Ok(Array2::zeros((rows, cols)));
    }

    let px = presence(x);
    let py = presence(y);
    let x_sizes: Vec<f64> = px.row_nnz().iter().map(|&c| c as f64).collect();
    let y_sizes: Vec<f64> = py.row_nnz().iter().map(|&c| c as f64).collect();
    let intersections = px.matmul(&py.transpose())?;

    let fill_row = |i: usize, out: &mut [f64]| {
        for (j, slot) in out.iter_mut().enumerate() {
            // two empty sets are identical, not undefined
            *slot = if x_sizes[i] == 0.0 && y_sizes[j] == 0.0 {
                0.0
            } else {
                1.0
            };
        }
        let (jcols, jvals) = intersections.row(i);
        for (&j, &inter) in jcols.iter().zip(jvals) {
            let j = j as usize;
            let manhattan = x_sizes[i] + y_sizes[j] - 2.0 * inter;
            let union = inter + manhattan;
            out[j] = (1.0 - inter / union).clamp(0.0, 1.0);
        }
    };

    let mut flat = vec![0.0f64; rows * cols];
    if rows < PARALLEL_ROW_THRESHOLD {
        for (i, out) in flat.chunks_mut(cols).enumerate() {
            fill_row(i, out);
        }
    } else {
        flat.par_chunks_mut(cols)
            .enumerate()
            .for_each(|(i, out)| fill_row(i, out));
    }

    Array2::from_shape_vec((rows, cols), flat)
        .map_err(|e| GraphError::InvalidShape(e.to_string()))
}

/// Generic pairwise-distance routine: applies `metric` to every pair of a
/// row of `x` and a row of `y`.
pub fn pairwise_distances<F>(
    x: ArrayView2<f64>,
    y: ArrayView2<f64>,
    metric: F,
) -> Result<Array2<f64>>
where
    F: Fn(ArrayView1<f64>, ArrayView1<f64>) -> f64 + Sync,
{
    if x.ncols() != y.ncols() {
        return Err(GraphError::InvalidShape(format!(
            "row sets over {} and {} columns are not comparable",
            x.ncols(),
            y.ncols()
        )));
    }

    let rows = x.nrows();
    let cols = y.nrows();
    if rows == 0 || cols == 0 {
        return Ok(Array2::zeros((rows, cols)));
    }

    let fill_row = |i: usize, out: &mut [f64]| {
        for (j, slot) in out.iter_mut().enumerate() {
            *slot = metric(x.row(i), y.row(j));
        }
    };

    let mut flat = vec![0.0f64; rows * cols];
    if rows < PARALLEL_ROW_THRESHOLD {
        for (i, out) in flat.chunks_mut(cols).enumerate() {
            fill_row(i, out);
        }
    } else {
        flat.par_chunks_mut(cols)
            .enumerate()
            .for_each(|(i, out)| fill_row(i, out));
    }

    Array2::from_shape_vec((rows, cols), flat)
        .map_err(|e| GraphError::InvalidShape(e.to_string()))
}

/// Standard Jaccard metric over the presence patterns of two dense rows.
fn jaccard_metric(a: ArrayView1<f64>, b: ArrayView1<f64>) -> f64 {
    let mut inter = 0usize;
    let mut union = 0usize;
    for (&av, &bv) in a.iter().zip(b.iter()) {
        let pa = av != 0.0;
        let pb = bv != 0.0;
        if pa && pb {
            inter += 1;
        }
        if pa || pb {
            union += 1;
        }
    }
    if union == 0 {
        0.0
    } else {
        1.0 - inter as f64 / union as f64
    }
}

/// Pairwise Jaccard distances for dense inputs, delegating to
/// [`pairwise_distances`].
pub fn jaccard_pdist_dense<'a>(
    x: ArrayView2<'a, f64>,
    y: Option<ArrayView2<'a, f64>>,
) -> Result<Array2<f64>> {
    pairwise_distances(x, y.unwrap_or(x), jaccard_metric)
}
