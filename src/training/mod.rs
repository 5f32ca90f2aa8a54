//! Learning rules: weight deltas and how they are folded into `W`.
//!
//! ## Hebbian
//!
//! ```text
//! ΔW = Σ_m p_m ⊗ p_m          (outer products, diagonal zeroed)
//! ```
//!
//! ## Pseudoinverse
//!
//! With `P` the `N × M` matrix whose columns are the batch patterns:
//! ```text
//! ΔW = P (PᵀP)⁻¹ Pᵀ
//! ```
//! For linearly independent patterns this is the orthogonal projection onto
//! their span, so every stored pattern satisfies `ΔW p = p`.

use crate::core::{HopfieldError, HopfieldResult, Pattern, WeightMatrix};
use crate::linalg;
use ndarray::{Array2, Axis};
use serde::{Deserialize, Serialize};

/// Weight-update strategy, fixed for a network's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LearningRule {
    /// Sum of outer products
    Hebbian,
    /// Projection `P (PᵀP)⁻¹ Pᵀ`
    Pseudoinverse,
}

impl LearningRule {
    /// Name for logs and reports
    pub fn name(&self) -> &'static str {
        match self {
            LearningRule::Hebbian => "hebbian",
            LearningRule::Pseudoinverse => "pseudoinverse",
        }
    }
}

/// Which patterns make up `P` on each pseudoinverse `train` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PseudoinverseBatching {
    /// Only the patterns passed to this call. A single pattern degenerates to
    /// the normalized outer product `p pᵀ / N`.
    PerCall,
    /// Every pattern trained so far. Each call adds the change in projection,
    /// so `W` equals the off-diagonal of the full-batch projection.
    #[default]
    Accumulate,
}

fn check_lengths(patterns: &[Pattern], size: usize) -> HopfieldResult<()> {
    if let Some((m, p)) = patterns.iter().enumerate().find(|(_, p)| p.len() != size) {
        return Err(HopfieldError::DimensionMismatch(format!(
            "pattern {} has {} units, expected {}",
            m,
            p.len(),
            size
        )));
    }
    Ok(())
}

/// Build the `N × M` pattern matrix `P`, column `m` = pattern `m`.
///
/// # Errors
/// - `DimensionMismatch` if any pattern length differs from `size`
pub fn pattern_matrix(patterns: &[Pattern], size: usize) -> HopfieldResult<Array2<f64>> {
    check_lengths(patterns, size)?;

    let mut p = Array2::zeros((size, patterns.len()));
    for (mut column, pattern) in p.axis_iter_mut(Axis(1)).zip(patterns) {
        column.assign(&pattern.to_f64());
    }
    Ok(p)
}

/// Hebbian delta: sum of outer products with a zero diagonal.
///
/// # Algorithm
///
/// ```text
/// ΔW[i][j] = Σ_m p_m[i] * p_m[j]   for i != j
/// ΔW[i][i] = 0
/// ```
pub fn hebbian_delta(patterns: &[Pattern], size: usize) -> HopfieldResult<WeightMatrix> {
    let p = pattern_matrix(patterns, size)?;
    let mut delta = p.dot(&p.t());
    delta.diag_mut().fill(0.0);
    Ok(delta)
}

/// Pseudoinverse-rule delta `P (PᵀP)⁻¹ Pᵀ`, diagonal included.
///
/// The caller decides what to do with the diagonal; [`add_off_diagonal`]
/// drops it.
///
/// # Errors
/// - `DimensionMismatch` if any pattern length differs from `size`
/// - `SingularMatrix` if the patterns are linearly dependent (or `PᵀP` is
///   otherwise too ill-conditioned for unpivoted elimination)
pub fn projection(patterns: &[Pattern], size: usize) -> HopfieldResult<WeightMatrix> {
    let p = pattern_matrix(patterns, size)?;
    let p_t = linalg::transpose(&p);
    let gram = linalg::multiply(&p_t, &p)?;
    let gram_inv = linalg::inverse(&gram)?;
    let left = linalg::multiply(&p, &gram_inv)?;
    linalg::multiply(&left, &p_t)
}

/// `W[i][j] += delta[i][j]` for every `i != j`.
///
/// # Errors
/// - `DimensionMismatch` if shapes differ; `weights` is not touched
pub fn add_off_diagonal(weights: &mut WeightMatrix, delta: &WeightMatrix) -> HopfieldResult<()> {
    if weights.dim() != delta.dim() {
        return Err(HopfieldError::DimensionMismatch(format!(
            "weights are {:?}, delta is {:?}",
            weights.dim(),
            delta.dim()
        )));
    }

    for ((i, j), w) in weights.indexed_iter_mut() {
        if i != j {
            *w += delta[[i, j]];
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pat(values: &[i32]) -> Pattern {
        Pattern::from_ints(values).unwrap()
    }

    #[test]
    fn test_pattern_matrix_columns() {
        let p = pattern_matrix(&[pat(&[1, -1, 1]), pat(&[-1, -1, 1])], 3).unwrap();
        assert_eq!(p.dim(), (3, 2));
        assert_eq!(p.column(1).to_vec(), vec![-1.0, -1.0, 1.0]);
    }

    #[test]
    fn test_pattern_matrix_length_check() {
        assert!(matches!(
            pattern_matrix(&[pat(&[1, -1])], 3),
            Err(HopfieldError::DimensionMismatch(_))
        ));
    }

    #[test]
    fn test_hebbian_delta_superimposes() {
        let a = pat(&[1, 1, -1]);
        let b = pat(&[1, -1, 1]);
        let both = hebbian_delta(&[a.clone(), b.clone()], 3).unwrap();
        let sum = hebbian_delta(&[a], 3).unwrap() + hebbian_delta(&[b], 3).unwrap();
        assert_eq!(both, sum);
        assert_eq!(both[[0, 0]], 0.0);
        assert_eq!(both[[0, 1]], 0.0);
        assert_eq!(both[[1, 2]], -2.0);
    }

    #[test]
    fn test_projection_single_pattern_is_normalized_outer_product() {
        let p = pat(&[1, -1, 1, 1]);
        let proj = projection(&[p.clone()], 4).unwrap();
        let v = p.to_f64();
        for i in 0..4 {
            for j in 0..4 {
                assert!((proj[[i, j]] - v[i] * v[j] / 4.0).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn test_projection_dependent_patterns_singular() {
        let p = pat(&[1, -1, 1, 1]);
        let neg = pat(&[-1, 1, -1, -1]);
        assert!(matches!(
            projection(&[p, neg], 4),
            Err(HopfieldError::SingularMatrix { .. })
        ));
    }

    #[test]
    fn test_add_off_diagonal_skips_diagonal() {
        let mut w = Array2::zeros((2, 2));
        let delta = ndarray::arr2(&[[5.0, 1.0], [2.0, 5.0]]);
        add_off_diagonal(&mut w, &delta).unwrap();
        assert_eq!(w, ndarray::arr2(&[[0.0, 1.0], [2.0, 0.0]]));
    }

    #[test]
    fn test_add_off_diagonal_shape_mismatch() {
        let mut w = Array2::zeros((2, 2));
        let delta = Array2::ones((3, 3));
        assert!(add_off_diagonal(&mut w, &delta).is_err());
        assert!(w.iter().all(|&x| x == 0.0));
    }

    #[test]
    fn test_rule_names() {
        assert_eq!(LearningRule::Hebbian.name(), "hebbian");
        assert_eq!(
            serde_json::to_string(&LearningRule::Pseudoinverse).unwrap(),
            "\"pseudoinverse\""
        );
        assert_eq!(PseudoinverseBatching::default(), PseudoinverseBatching::Accumulate);
    }
}
