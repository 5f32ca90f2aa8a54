//! Dense linear algebra used by the pseudoinverse learning rule.
//!
//! Only what the projection `P (PᵀP)⁻¹ Pᵀ` needs:
//! - [`transpose`]
//! - [`multiply`] / [`multiply_parallel`]
//! - [`inverse`] via Gauss–Jordan elimination on `[A | I]`
//!
//! ## Pivoting
//!
//! [`inverse`] takes pivots in index order and never swaps rows. For a Gram
//! matrix `PᵀP` of linearly independent patterns this is fine: the matrix is
//! symmetric positive definite, so every leading pivot is positive. Anything
//! else that hits a zero or negligible pivot is reported as
//! [`HopfieldError::SingularMatrix`], even if a different row order would have
//! worked.

use crate::core::{HopfieldError, HopfieldResult};
use ndarray::{s, Array2};
use rayon::prelude::*;

/// Relative pivot tolerance: a pivot `p` is rejected when
/// `|p| <= PIVOT_TOLERANCE * max|A|`.
pub const PIVOT_TOLERANCE: f64 = 1e-12;

/// Build a matrix from nested rows, rejecting ragged input.
pub fn from_rows(rows: &[Vec<f64>]) -> HopfieldResult<Array2<f64>> {
    if rows.is_empty() {
        return Ok(Array2::zeros((0, 0)));
    }
    let ncols = rows[0].len();
    if let Some((i, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != ncols) {
        return Err(HopfieldError::DimensionMismatch(format!(
            "ragged matrix: row 0 has {} columns, row {} has {}",
            ncols,
            i,
            row.len()
        )));
    }
    let flat: Vec<f64> = rows.iter().flat_map(|r| r.iter().copied()).collect();
    Array2::from_shape_vec((rows.len(), ncols), flat)
        .map_err(|e| HopfieldError::DimensionMismatch(format!("{e}")))
}

/// `n × n` identity.
pub fn identity(n: usize) -> Array2<f64> {
    Array2::eye(n)
}

/// Transpose of `a` as a new owned matrix.
pub fn transpose(a: &Array2<f64>) -> Array2<f64> {
    a.t().to_owned()
}

fn check_inner(a: &Array2<f64>, b: &Array2<f64>) -> HopfieldResult<()> {
    if a.ncols() != b.nrows() {
        return Err(HopfieldError::DimensionMismatch(format!(
            "cannot multiply {}x{} by {}x{}",
            a.nrows(),
            a.ncols(),
            b.nrows(),
            b.ncols()
        )));
    }
    Ok(())
}

/// Dense product `A · B`.
///
/// `result[i][j] = Σ_k A[i][k] * B[k][j]`, one output cell at a time.
///
/// # Errors
/// - `DimensionMismatch` if `a.ncols() != b.nrows()`
pub fn multiply(a: &Array2<f64>, b: &Array2<f64>) -> HopfieldResult<Array2<f64>> {
    check_inner(a, b)?;

    let mut result = Array2::zeros((a.nrows(), b.ncols()));
    for ((i, j), cell) in result.indexed_iter_mut() {
        *cell = a.row(i).dot(&b.column(j));
    }
    Ok(result)
}

/// Row-parallel `A · B` using Rayon.
///
/// Output rows are independent, so each one is computed on its own worker.
/// Produces the same values as [`multiply`].
pub fn multiply_parallel(a: &Array2<f64>, b: &Array2<f64>) -> HopfieldResult<Array2<f64>> {
    check_inner(a, b)?;

    let (rows, cols) = (a.nrows(), b.ncols());
    let flat: Vec<f64> = (0..rows)
        .into_par_iter()
        .flat_map_iter(|i| {
            let row = a.row(i);
            (0..cols).map(move |j| row.dot(&b.column(j)))
        })
        .collect();

    Array2::from_shape_vec((rows, cols), flat)
        .map_err(|e| HopfieldError::DimensionMismatch(format!("{e}")))
}

/// Invert a square matrix by Gauss–Jordan elimination without pivoting.
///
/// # Algorithm
///
/// ```text
/// aug = [A | I]
/// for i in 0..n:
///     aug[i]  /= aug[i][i]
///     aug[k]  -= aug[k][i] * aug[i]     for every k != i
/// A⁻¹ = right half of aug
/// ```
///
/// # Errors
/// - `DimensionMismatch` if `a` is not square
/// - `SingularMatrix` if a pivot is zero, NaN, or below the relative tolerance
///   at the moment it is used
pub fn inverse(a: &Array2<f64>) -> HopfieldResult<Array2<f64>> {
    let n = a.nrows();
    if a.ncols() != n {
        return Err(HopfieldError::DimensionMismatch(format!(
            "cannot invert non-square {}x{} matrix",
            n,
            a.ncols()
        )));
    }

    let scale = a.iter().fold(0.0f64, |m, v| m.max(v.abs()));
    let tolerance = PIVOT_TOLERANCE * scale;

    let mut aug = Array2::<f64>::zeros((n, 2 * n));
    aug.slice_mut(s![.., ..n]).assign(a);
    aug.slice_mut(s![.., n..]).assign(&identity(n));

    for i in 0..n {
        let pivot = aug[[i, i]];
        // NaN fails the comparison too
        if !(pivot.abs() > tolerance) {
            return Err(HopfieldError::SingularMatrix { pivot: i, value: pivot });
        }

        aug.row_mut(i).mapv_inplace(|v| v / pivot);
        let pivot_row = aug.row(i).to_owned();

        for k in 0..n {
            if k == i {
                continue;
            }
            let factor = aug[[k, i]];
            if factor != 0.0 {
                aug.row_mut(k).scaled_add(-factor, &pivot_row);
            }
        }
    }

    Ok(aug.slice(s![.., n..]).to_owned())
}
