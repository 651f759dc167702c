//! Signal propagation across network edges
//!
//! Random-walk-with-restart smoothing: a numeric signal diffuses along
//! edges while a fixed restart probability pulls it back toward the
//! original values.

use crate::cancel::{self, CancelToken};
use crate::error::{GraphError, Result};
use crate::graph::sparse::CsrMatrix;

/// Tuning parameters for [`propagate`].
#[derive(Debug, Clone)]
pub struct PropagateOptions {
    /// Diffusion strength; `1 - alpha` is the restart probability
    pub alpha: f64,

    /// Convergence threshold on the L2 norm of the iteration difference
    pub eps: f64,

    /// Iteration budget; the last iterate is returned either way
    pub max_iterations: usize,

    /// Optional cooperative cancellation hook
    pub cancel: Option<CancelToken>,
}

impl Default for PropagateOptions {
    fn default() -> Self {
        Self {
            alpha: 0.6,
            eps: 1e-5,
            max_iterations: 1000,
            cancel: None,
        }
    }
}

/// Symmetric degree normalization `D^{-1/2} M D^{-1/2}`, where `D` is the
/// diagonal of row sums. Nodes with a zero row sum get a zero scaling
/// factor instead of an undefined one, so no NaN can leak out.
pub fn normalize(m: &CsrMatrix) -> Result<CsrMatrix> {
    if !m.is_square() {
        return Err(GraphError::InvalidShape(format!(
            "normalization needs a square matrix, got {}x{}",
            m.rows, m.cols
        )));
    }

    let mut factors = m.row_sums();
    for f in &mut factors {
        *f = if *f > 0.0 { 1.0 / f.sqrt() } else { 0.0 };
    }

    let mut out = m.clone();
    out.scale_rows(&factors)?;
    out.scale_columns(&factors)?;
    out.compress();
    Ok(out)
}

/// Propagate a signal `y` across the matrix.
///
/// Starts from `f = (1 - alpha) * y` and iterates
/// `f <- alpha * M * f + (1 - alpha) * y` until the L2 norm of the change
/// drops below `eps` or the iteration budget runs out, returning the last
/// iterate either way.
pub fn propagate(m: &CsrMatrix, y: &[f64], options: &PropagateOptions) -> Result<Vec<f64>> {
    if !m.is_square() || y.len() != m.rows {
        return Err(GraphError::InvalidShape(format!(
            "signal of length {} against a {}x{} matrix",
            y.len(),
            m.rows,
            m.cols
        )));
    }

    let restart: Vec<f64> = y.iter().map(|v| (1.0 - options.alpha) * v).collect();
    let mut f = restart.clone();
    for iteration in 0..options.max_iterations {
        cancel::check(options.cancel.as_ref())?;

        let mut next = m.matvec(&f)?;
        let mut delta_sq = 0.0;
        for (n, (&r, &old)) in next.iter_mut().zip(restart.iter().zip(&f)) {
            *n = options.alpha * *n + r;
            let d = *n - old;
            delta_sq += d * d;
        }
        f = next;
        if delta_sq.sqrt() < options.eps {
            log::debug!("propagation converged after {} iterations", iteration + 1);
            break;
        }
    }
    Ok(f)
}
