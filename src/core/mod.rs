//! Core Hopfield network types.
//!
//! This module provides:
//! - [`Pattern`]: a validated bipolar state vector
//! - [`HopfieldError`] / [`HopfieldResult`]
//! - [`Observer`]: optional narration hooks for training and recall
//! - [`Network`]: owner of the `N × N` weight matrix, with `train` and `recall`
//!
//! ## Weight Matrix
//!
//! For a grid of side `dimension` the network has `N = dimension²` units and
//! an `N × N` weight matrix `W`, created all-zero. Learning only ever adds to
//! the off-diagonal entries, so `W[i][i]` stays 0 for the network's lifetime:
//! ```text
//! W ← W + offdiag(ΔW)
//! ```

use crate::recall::{self, RecallOutcome};
use crate::training::{self, LearningRule, PseudoinverseBatching};
use crate::Config;
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;

/// Error type for Hopfield operations.
#[derive(Debug, Clone, PartialEq)]
pub enum HopfieldError {
    /// Pattern length or matrix shapes disagree with what the operation expects
    DimensionMismatch(String),
    /// A Gauss–Jordan pivot was zero, NaN, or negligible
    SingularMatrix { pivot: usize, value: f64 },
    /// A pattern entry outside {-1, +1}
    NotBipolar { index: usize, value: i64 },
    /// Invalid network or recall configuration
    InvalidConfig(String),
}

impl fmt::Display for HopfieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HopfieldError::DimensionMismatch(msg) => write!(f, "Dimension mismatch: {}", msg),
            HopfieldError::SingularMatrix { pivot, value } => {
                write!(f, "Singular matrix: pivot {} is {}", pivot, value)
            }
            HopfieldError::NotBipolar { index, value } => {
                write!(f, "Not bipolar: entry {} is {}, expected -1 or 1", index, value)
            }
            HopfieldError::InvalidConfig(msg) => write!(f, "Invalid config: {}", msg),
        }
    }
}

impl Error for HopfieldError {}

pub type HopfieldResult<T> = Result<T, HopfieldError>;

/// Learned `N × N` association weights.
pub type WeightMatrix = Array2<f64>;

/// A bipolar state: every entry is -1 or +1.
///
/// Serialized as a plain integer array; deserialization re-validates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<i8>", into = "Vec<i8>")]
pub struct Pattern(Array1<i8>);

impl Pattern {
    /// Validate and wrap raw values.
    ///
    /// # Errors
    /// - `NotBipolar` on the first entry that is neither -1 nor 1
    pub fn new(values: Vec<i8>) -> HopfieldResult<Self> {
        if let Some((index, &value)) = values.iter().enumerate().find(|(_, v)| !is_bipolar(**v)) {
            return Err(HopfieldError::NotBipolar {
                index,
                value: i64::from(value),
            });
        }
        Ok(Self(Array1::from(values)))
    }

    /// Build a pattern from wider integers, e.g. literals typed as `i32`.
    pub fn from_ints(values: &[i32]) -> HopfieldResult<Self> {
        let mut out = Vec::with_capacity(values.len());
        for (index, &v) in values.iter().enumerate() {
            match v {
                1 => out.push(1),
                -1 => out.push(-1),
                _ => {
                    return Err(HopfieldError::NotBipolar {
                        index,
                        value: i64::from(v),
                    })
                }
            }
        }
        Ok(Self(Array1::from(out)))
    }

    /// Threshold real activations: `+1` if `x >= 0`, else `-1`.
    pub fn from_activations(sums: &Array1<f64>) -> Self {
        Self(sums.mapv(|s| if s >= 0.0 { 1 } else { -1 }))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn values(&self) -> &Array1<i8> {
        &self.0
    }

    pub fn to_vec(&self) -> Vec<i8> {
        self.0.to_vec()
    }

    /// The state as a real vector, for products with the weight matrix.
    pub fn to_f64(&self) -> Array1<f64> {
        self.0.mapv(f64::from)
    }

    /// Number of units where `self` and `other` disagree.
    ///
    /// # Errors
    /// - `DimensionMismatch` if lengths differ
    pub fn hamming_distance(&self, other: &Pattern) -> HopfieldResult<usize> {
        if self.len() != other.len() {
            return Err(HopfieldError::DimensionMismatch(format!(
                "pattern lengths {} and {}",
                self.len(),
                other.len()
            )));
        }
        Ok(self.0.iter().zip(other.0.iter()).filter(|(a, b)| a != b).count())
    }

    /// Copy with unit `index` negated. Out-of-range indices are ignored.
    pub fn flipped(&self, index: usize) -> Self {
        let mut next = self.0.clone();
        if let Some(v) = next.get_mut(index) {
            *v = -*v;
        }
        Self(next)
    }
}

fn is_bipolar(v: i8) -> bool {
    v == 1 || v == -1
}

impl TryFrom<Vec<i8>> for Pattern {
    type Error = HopfieldError;

    fn try_from(values: Vec<i8>) -> HopfieldResult<Self> {
        Self::new(values)
    }
}

impl From<Pattern> for Vec<i8> {
    fn from(pattern: Pattern) -> Self {
        pattern.0.to_vec()
    }
}

/// Hooks for narrating training and recall.
///
/// All methods default to no-ops; implement only what you need.
pub trait Observer: Send + Sync {
    /// Called after a batch has been folded into the weights.
    fn on_train(&self, _rule: LearningRule, _batch_len: usize) {}

    /// Called after every synchronous update step during recall.
    fn on_step(&self, _step: usize, _state: &Pattern) {}

    /// Called once recall stops, converged or not.
    fn on_finish(&self, _outcome: &RecallOutcome) {}
}

/// Observer that narrates through the `log` facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogObserver;

impl Observer for LogObserver {
    fn on_train(&self, rule: LearningRule, batch_len: usize) {
        log::info!("trained {} pattern(s) with {} rule", batch_len, rule.name());
    }

    fn on_step(&self, step: usize, _state: &Pattern) {
        log::debug!("recall step {}", step);
    }

    fn on_finish(&self, outcome: &RecallOutcome) {
        if outcome.converged {
            log::info!("recall converged after {} step(s)", outcome.steps);
        } else if let Some(period) = outcome.cycle_period {
            log::warn!(
                "recall entered a {}-cycle after {} step(s)",
                period,
                outcome.steps
            );
        } else {
            log::warn!("recall did not converge after {} step(s)", outcome.steps);
        }
    }
}

/// A Hopfield associative memory over a `dimension × dimension` grid.
///
/// # Architecture
///
/// - **Units:** `size = dimension²`, each in {-1, +1}
/// - **Weights:** `weights` is `size × size`, zero diagonal
/// - **Rule:** fixed at construction; see [`LearningRule`]
///
/// With [`PseudoinverseBatching::Accumulate`] the network also keeps every
/// trained pattern and the last full projection matrix, so each new call can
/// add exactly the change in projection.
pub struct Network {
    dimension: usize,
    size: usize,
    rule: LearningRule,
    config: Config,
    weights: WeightMatrix,
    /// Patterns folded in so far (pseudoinverse accumulate mode only)
    stored: Vec<Pattern>,
    /// `P (PᵀP)⁻¹ Pᵀ` for `stored`, diagonal included (0×0 unless accumulating)
    projection: WeightMatrix,
    observer: Option<Box<dyn Observer>>,
}

impl fmt::Debug for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Network")
            .field("dimension", &self.dimension)
            .field("size", &self.size)
            .field("rule", &self.rule)
            .field("config", &self.config)
            .field("weights", &format!("<{}x{} matrix>", self.size, self.size))
            .field("stored", &self.stored.len())
            .field("observer", &self.observer.is_some())
            .finish()
    }
}

impl Network {
    /// Create a network with default [`Config`].
    ///
    /// # Errors
    /// - `InvalidConfig` if `dimension` is 0
    pub fn new(dimension: usize, rule: LearningRule) -> HopfieldResult<Self> {
        Self::with_config(dimension, rule, Config::default())
    }

    /// Create a network with an explicit configuration.
    ///
    /// # Errors
    /// - `InvalidConfig` if `dimension`, `max_iterations` or `history_window` is 0,
    ///   or if the `dimension² × dimension²` weight matrix cannot be addressed
    pub fn with_config(
        dimension: usize,
        rule: LearningRule,
        config: Config,
    ) -> HopfieldResult<Self> {
        if dimension == 0 {
            return Err(HopfieldError::InvalidConfig(
                "dimension must be positive".to_string(),
            ));
        }
        config.validate()?;

        let size = dimension
            .checked_mul(dimension)
            .filter(|n| n.checked_mul(*n).is_some())
            .ok_or_else(|| {
                HopfieldError::InvalidConfig(format!("dimension {} is too large", dimension))
            })?;
        let keeps_projection = rule == LearningRule::Pseudoinverse
            && config.batching == PseudoinverseBatching::Accumulate;
        let projection_dim = if keeps_projection { size } else { 0 };
        Ok(Self {
            dimension,
            size,
            rule,
            config,
            weights: Array2::zeros((size, size)),
            stored: Vec::new(),
            projection: Array2::zeros((projection_dim, projection_dim)),
            observer: None,
        })
    }

    /// Attach an observer for training and recall narration.
    pub fn with_observer(mut self, observer: Box<dyn Observer>) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Number of units, `dimension²`.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn rule(&self) -> LearningRule {
        self.rule
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Read-only view of the learned weights.
    pub fn weights(&self) -> &WeightMatrix {
        &self.weights
    }

    /// Patterns retained for full-batch pseudoinverse recomputation.
    ///
    /// Empty for Hebbian and per-call pseudoinverse networks.
    pub fn stored_patterns(&self) -> &[Pattern] {
        &self.stored
    }

    fn check_pattern(&self, pattern: &Pattern) -> HopfieldResult<()> {
        if pattern.len() != self.size {
            return Err(HopfieldError::DimensionMismatch(format!(
                "pattern has {} units, network has {}",
                pattern.len(),
                self.size
            )));
        }
        Ok(())
    }

    /// Train a single pattern.
    ///
    /// Equivalent to `train_batch(&[pattern.clone()])`.
    ///
    /// With the default [`PseudoinverseBatching::Accumulate`], training a pattern
    /// that is already stored (or its negation) makes the full `PᵀP` singular and
    /// returns `SingularMatrix`, leaving the network unchanged. `PerCall` batching
    /// accepts the repeat, since each call only inverts its own batch.
    pub fn train(&mut self, pattern: &Pattern) -> HopfieldResult<()> {
        self.train_batch(std::slice::from_ref(pattern))
    }

    /// Fold a batch of patterns into the weights with the configured rule.
    ///
    /// # Algorithm
    ///
    /// - Hebbian: `ΔW = Σ_m p_m p_mᵀ`
    /// - Pseudoinverse, per call: `ΔW = P (PᵀP)⁻¹ Pᵀ` with `P` = this batch
    /// - Pseudoinverse, accumulate: `ΔW = Proj(all) - Proj(previous)`
    ///
    /// Only off-diagonal entries of `ΔW` are added.
    ///
    /// # Errors
    /// - `DimensionMismatch` if any pattern length differs from `size()`
    /// - `SingularMatrix` if `PᵀP` cannot be inverted
    ///
    /// On error the network is left exactly as it was.
    pub fn train_batch(&mut self, patterns: &[Pattern]) -> HopfieldResult<()> {
        for pattern in patterns {
            self.check_pattern(pattern)?;
        }
        if patterns.is_empty() {
            return Ok(());
        }

        match (self.rule, self.config.batching) {
            (LearningRule::Hebbian, _) => {
                let delta = training::hebbian_delta(patterns, self.size)?;
                training::add_off_diagonal(&mut self.weights, &delta)?;
            }
            (LearningRule::Pseudoinverse, PseudoinverseBatching::PerCall) => {
                let delta = training::projection(patterns, self.size)?;
                training::add_off_diagonal(&mut self.weights, &delta)?;
            }
            (LearningRule::Pseudoinverse, PseudoinverseBatching::Accumulate) => {
                let mut batch = self.stored.clone();
                batch.extend_from_slice(patterns);
                let next = training::projection(&batch, self.size)?;
                let delta = &next - &self.projection;
                training::add_off_diagonal(&mut self.weights, &delta)?;
                self.projection = next;
                self.stored = batch;
            }
        }

        if let Some(observer) = &self.observer {
            observer.on_train(self.rule, patterns.len());
        }
        Ok(())
    }

    /// Recall with the configured iteration cap and history window.
    pub fn recall(&self, input: &Pattern) -> HopfieldResult<RecallOutcome> {
        self.recall_with_limit(input, self.config.max_iterations)
    }

    /// Recall with an explicit iteration cap.
    ///
    /// # Errors
    /// - `DimensionMismatch` if `input` has the wrong length
    /// - `InvalidConfig` if `max_iterations` is 0
    pub fn recall_with_limit(
        &self,
        input: &Pattern,
        max_iterations: usize,
    ) -> HopfieldResult<RecallOutcome> {
        self.check_pattern(input)?;
        recall::recall_with_history(
            &self.weights,
            input,
            max_iterations,
            self.config.history_window,
            self.observer.as_deref(),
        )
    }

    /// Recall several probes in parallel against the current weights.
    ///
    /// Results are returned in input order. An attached observer sees every
    /// probe's steps, interleaved in no particular order.
    pub fn recall_many(&self, inputs: &[Pattern]) -> Vec<HopfieldResult<RecallOutcome>> {
        recall::recall_batch_parallel(
            &self.weights,
            inputs,
            self.config.max_iterations,
            self.config.history_window,
            self.observer.as_deref(),
        )
    }

    /// Hopfield energy `-½ sᵀWs` of `state` under the current weights.
    pub fn energy(&self, state: &Pattern) -> HopfieldResult<f64> {
        recall::energy(&self.weights, state)
    }
}
