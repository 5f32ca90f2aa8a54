//! # Hopfield
//!
//! An associative memory that stores bipolar patterns and, given a distorted
//! or partial probe, relaxes to the closest stored pattern.
//!
//! ## Overview
//!
//! A [`Network`] over a `d × d` grid owns an `N × N` weight matrix
//! (`N = d²`). Training adds a rule-specific delta to the off-diagonal
//! weights; recall applies the synchronous sign update until the state stops
//! changing or an iteration cap is hit.
//!
//! Two learning rules are available:
//! - **Hebbian** — sum of outer products `Σ p pᵀ`
//! - **Pseudoinverse** — projection `P (PᵀP)⁻¹ Pᵀ`, which makes every stored
//!   pattern an exact fixed point as long as the patterns are linearly
//!   independent
//!
//! ## Structure
//!
//! - [`core`] — Patterns, errors, observers, and the weight-owning network
//! - [`linalg`] — Transpose, multiply, Gauss–Jordan inverse
//! - [`training`] — Hebbian and pseudoinverse weight deltas
//! - [`recall`] — Synchronous update, fixed-point search, energy
//! - [`data`] — Demonstration images, noise, grid rendering

pub mod core;
pub mod data;
pub mod linalg;
pub mod recall;
pub mod training;

pub use crate::core::{
    HopfieldError, HopfieldResult, LogObserver, Network, Observer, Pattern, WeightMatrix,
};
pub use crate::recall::{
    recall, recall_batch_parallel, update_once, RecallOutcome, DEFAULT_MAX_ITERATIONS,
};
pub use crate::training::{LearningRule, PseudoinverseBatching};

use serde::{Deserialize, Serialize};

/// Network configuration for training and recall.
///
/// Used by [`Network::with_config`]; [`Network::new`] takes the default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Cap on synchronous update steps per recall
    pub max_iterations: usize,
    /// How many previous states a new output is compared against.
    /// 1 detects fixed points only; larger values also stop on short cycles.
    pub history_window: usize,
    /// Batch composition for the pseudoinverse rule (ignored for Hebbian)
    pub batching: PseudoinverseBatching,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            history_window: 1,
            batching: PseudoinverseBatching::Accumulate,
        }
    }
}

impl Config {
    /// Reject zero iteration caps and zero history windows.
    pub fn validate(&self) -> HopfieldResult<()> {
        if self.max_iterations == 0 {
            return Err(HopfieldError::InvalidConfig(
                "max_iterations must be positive".to_string(),
            ));
        }
        if self.history_window == 0 {
            return Err(HopfieldError::InvalidConfig(
                "history_window must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
