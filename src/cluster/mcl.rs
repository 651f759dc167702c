//! Markov Clustering over column-stochastic matrices
//!
//! Alternates expansion (matrix self-multiplication) and inflation
//! (entrywise powering) on a column-normalized adjacency matrix until the
//! iteration reaches a fixed point, then reads clusters off the attractor
//! rows.

use crate::cancel;
use crate::cluster::MclParams;
use crate::error::{GraphError, Result};
use crate::graph::sparse::CsrMatrix;

/// Column-normalize in place: divide each column by its sum, leaving
/// all-zero columns untouched.
fn normalize_columns(m: &mut CsrMatrix) -> Result<()> {
    let mut factors = m.col_sums();
    for f in &mut factors {
        *f = if *f > 0.0 { 1.0 / *f } else { 1.0 };
    }
    m.scale_columns(&factors)
}

/// Prepare the matrix for iteration: optionally set each diagonal entry to
/// its column's maximum (1.0 for all-zero columns), then column-normalize.
pub fn prepare(m: &CsrMatrix, add_self_loops: bool) -> Result<CsrMatrix> {
    if !m.is_square() {
        return Err(GraphError::InvalidShape(format!(
            "clustering needs a square matrix, got {}x{}",
            m.rows, m.cols
        )));
    }

    let mut prepared = if add_self_loops {
        let mut loops = m.col_max();
        for v in &mut loops {
            if *v == 0.0 {
                *v = 1.0;
            }
        }
        let triplets = m
            .iter()
            .filter(|&(r, c, _)| r != c)
            .chain(loops.iter().enumerate().map(|(c, &v)| (c, c, v)));
        CsrMatrix::from_triplets(m.rows, m.cols, triplets)?
    } else {
        m.clone()
    };

    normalize_columns(&mut prepared)?;
    Ok(prepared)
}

fn expand(m: &CsrMatrix, power: u32) -> Result<CsrMatrix> {
    let mut out = m.clone();
    for _ in 1..power {
        out = out.matmul(m)?;
    }
    Ok(out)
}

/// Run the expansion/inflation loop until it converges.
///
/// Fails with `NonConvergence` when the iteration budget is exhausted
/// before the difference between consecutive iterates drops below the
/// threshold on every stored entry.
pub fn converge(m: &CsrMatrix, params: &MclParams) -> Result<CsrMatrix> {
    if params.expansion == 0 {
        return Err(GraphError::DegenerateInput(
            "expansion must be a positive integer".into(),
        ));
    }

    let mut current = prepare(m, params.add_self_loops)?;
    for iteration in 0..params.max_iterations {
        cancel::check(params.cancel.as_ref())?;

        let mut next = expand(&current, params.expansion)?;
        next = next.map_stored(|v| v.powf(params.inflation));
        if let Some(cap) = params.cap {
            next.drop_below(cap);
        }
        normalize_columns(&mut next)?;

        let diff = next.subtract(&current)?;
        if diff.values.iter().all(|v| v.abs() < params.threshold) {
            log::debug!("mcl converged after {} iterations", iteration + 1);
            return Ok(next);
        }
        current = next;
    }

    Err(GraphError::NonConvergence {
        iterations: params.max_iterations,
    })
}

/// Read clusters off a converged matrix: every row with a positive sum is
/// an attractor whose cluster is the set of its nonzero columns. Attractors
/// of a fully symmetric block describe the same member set; exact
/// duplicates are reported once, keeping first-occurrence order.
pub fn interpret(m: &CsrMatrix) -> Vec<Vec<usize>> {
    let sums = m.row_sums();
    let mut clusters: Vec<Vec<usize>> = Vec::new();
    for r in 0..m.rows {
        if sums[r] <= 0.0 {
            continue;
        }
        let (cols, vals) = m.row(r);
        let members: Vec<usize> = cols
            .iter()
            .zip(vals)
            .filter(|&(_, &v)| v != 0.0)
            .map(|(&c, _)| c as usize)
            .collect();
        if !clusters.contains(&members) {
            clusters.push(members);
        }
    }
    log::debug!("interpreted {} clusters from attractor rows", clusters.len());
    clusters
}

/// Cluster the matrix: converge, then interpret.
pub fn mcl(m: &CsrMatrix, params: &MclParams) -> Result<Vec<Vec<usize>>> {
    Ok(interpret(&converge(m, params)?))
}
