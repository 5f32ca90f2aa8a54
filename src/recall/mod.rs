//! Synchronous recall: update rule, fixed-point search, energy.
//!
//! Everything here is a pure function of a weight matrix and an input
//! pattern; nothing mutates the weights.
//!
//! ## Update Rule
//!
//! ```text
//! s'[i] = +1 if Σ_j W[i][j] s[j] >= 0 else -1
//! ```
//! All units read the same snapshot `s`.
//!
//! ## Stopping
//!
//! Recall stops when the newest output equals one of the last `history_window`
//! states, or after `max_iterations` update steps. A match with the immediately
//! preceding state is a fixed point (converged); a match further back is a
//! cycle and is reported as not converged.

use crate::core::{HopfieldError, HopfieldResult, Observer, Pattern, WeightMatrix};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Default cap on update steps per recall.
pub const DEFAULT_MAX_ITERATIONS: usize = 100;

/// Result of a recall.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecallOutcome {
    /// Last computed state
    pub pattern: Pattern,
    /// Whether `pattern` is a fixed point of the update rule
    pub converged: bool,
    /// Number of update steps applied (at least 1)
    pub steps: usize,
    /// Period of the detected cycle, if recall stopped on one
    pub cycle_period: Option<usize>,
}

fn check_square(weights: &WeightMatrix, len: usize) -> HopfieldResult<()> {
    if weights.dim() != (len, len) {
        return Err(HopfieldError::DimensionMismatch(format!(
            "weights are {}x{}, pattern has {} units",
            weights.nrows(),
            weights.ncols(),
            len
        )));
    }
    Ok(())
}

/// One synchronous update of every unit.
///
/// # Errors
/// - `DimensionMismatch` unless `weights` is `len × len`
pub fn update_once(weights: &WeightMatrix, pattern: &Pattern) -> HopfieldResult<Pattern> {
    check_square(weights, pattern.len())?;
    let sums = weights.dot(&pattern.to_f64());
    Ok(Pattern::from_activations(&sums))
}

/// Iterate [`update_once`] until a fixed point or `max_iterations` steps.
///
/// Convergence means the output equals its immediate predecessor. A 2-cycle
/// never satisfies that and runs to the cap.
pub fn recall(
    weights: &WeightMatrix,
    input: &Pattern,
    max_iterations: usize,
) -> HopfieldResult<RecallOutcome> {
    recall_with_history(weights, input, max_iterations, 1, None)
}

/// Recall comparing each output against the last `history_window` states.
///
/// # Algorithm
///
/// ```text
/// history = [input]
/// out = update(input); steps = 1
/// loop:
///     k = position of out in history, counting back from newest (1-based)
///     k == 1          -> converged
///     k > 1           -> cycle of period k
///     steps == max    -> not converged
///     push out (keep newest history_window); out = update(out); steps += 1
/// ```
///
/// With `history_window = 1` this is plain predecessor comparison.
///
/// # Errors
/// - `InvalidConfig` if `max_iterations` or `history_window` is 0
/// - `DimensionMismatch` unless `weights` is `N × N` for `N = input.len()`
pub fn recall_with_history(
    weights: &WeightMatrix,
    input: &Pattern,
    max_iterations: usize,
    history_window: usize,
    observer: Option<&dyn Observer>,
) -> HopfieldResult<RecallOutcome> {
    if max_iterations == 0 {
        return Err(HopfieldError::InvalidConfig(
            "max_iterations must be positive".to_string(),
        ));
    }
    if history_window == 0 {
        return Err(HopfieldError::InvalidConfig(
            "history_window must be positive".to_string(),
        ));
    }
    check_square(weights, input.len())?;

    let mut history: VecDeque<Pattern> = VecDeque::with_capacity(history_window + 1);
    history.push_back(input.clone());

    let mut output = update_once(weights, input)?;
    let mut steps = 1;
    if let Some(obs) = observer {
        obs.on_step(steps, &output);
    }

    let (converged, cycle_period) = loop {
        let period = history.iter().rev().position(|s| *s == output).map(|k| k + 1);
        match period {
            Some(1) => break (true, None),
            Some(k) => break (false, Some(k)),
            None if steps >= max_iterations => break (false, None),
            None => {}
        }

        history.push_back(output);
        if history.len() > history_window {
            history.pop_front();
        }
        let newest = &history[history.len() - 1];
        output = update_once(weights, newest)?;
        steps += 1;
        if let Some(obs) = observer {
            obs.on_step(steps, &output);
        }
    };

    let outcome = RecallOutcome {
        pattern: output,
        converged,
        steps,
        cycle_period,
    };
    if let Some(obs) = observer {
        obs.on_finish(&outcome);
    }
    Ok(outcome)
}

/// Recall every input concurrently against the same weights.
///
/// Each result sits at its input's index. The observer is shared by all
/// workers, so its hooks interleave across inputs.
pub fn recall_batch_parallel(
    weights: &WeightMatrix,
    inputs: &[Pattern],
    max_iterations: usize,
    history_window: usize,
    observer: Option<&dyn Observer>,
) -> Vec<HopfieldResult<RecallOutcome>> {
    inputs
        .par_iter()
        .map(|input| {
            recall_with_history(weights, input, max_iterations, history_window, observer)
        })
        .collect()
}

/// Hopfield energy `E(s) = -½ sᵀ W s`.
pub fn energy(weights: &WeightMatrix, state: &Pattern) -> HopfieldResult<f64> {
    check_square(weights, state.len())?;
    let s = state.to_f64();
    Ok(-0.5 * s.dot(&weights.dot(&s)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::arr2;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn pat(values: &[i32]) -> Pattern {
        Pattern::from_ints(values).unwrap()
    }

    /// Two mutually inhibiting units: [1, 1] <-> [-1, -1].
    fn oscillator() -> WeightMatrix {
        arr2(&[[0.0, -1.0], [-1.0, 0.0]])
    }

    #[test]
    fn test_update_once_is_synchronous() {
        let w = oscillator();
        // Sequential updates would settle at [-1, 1]; synchronous flips both.
        assert_eq!(update_once(&w, &pat(&[1, 1])).unwrap(), pat(&[-1, -1]));
    }

    #[test]
    fn test_update_once_zero_weights_goes_positive() {
        let w = WeightMatrix::zeros((3, 3));
        assert_eq!(update_once(&w, &pat(&[-1, -1, 1])).unwrap(), pat(&[1, 1, 1]));
    }

    #[test]
    fn test_update_once_shape_mismatch() {
        let w = WeightMatrix::zeros((3, 3));
        assert!(matches!(
            update_once(&w, &pat(&[1, -1])),
            Err(HopfieldError::DimensionMismatch(_))
        ));
    }

    #[test]
    fn test_two_cycle_runs_to_cap() {
        let out = recall(&oscillator(), &pat(&[1, 1]), 7).unwrap();
        assert!(!out.converged);
        assert_eq!(out.steps, 7);
        assert_eq!(out.cycle_period, None);
        // odd number of flips from [1, 1]
        assert_eq!(out.pattern, pat(&[-1, -1]));
    }

    #[test]
    fn test_history_window_detects_cycle() {
        let out = recall_with_history(&oscillator(), &pat(&[1, 1]), 100, 2, None).unwrap();
        assert!(!out.converged);
        assert_eq!(out.cycle_period, Some(2));
        assert_eq!(out.steps, 2);
    }

    #[test]
    fn test_fixed_point_converges_in_one_step() {
        let w = arr2(&[[0.0, 1.0], [1.0, 0.0]]);
        let out = recall(&w, &pat(&[1, 1]), 100).unwrap();
        assert!(out.converged);
        assert_eq!(out.steps, 1);
        assert_eq!(out.pattern, pat(&[1, 1]));
    }

    #[test]
    fn test_single_iteration_cap() {
        let w = arr2(&[[0.0, 1.0], [1.0, 0.0]]);
        // [-1, 1] -> [1, -1], not equal to input, cap hit
        let out = recall(&w, &pat(&[-1, 1]), 1).unwrap();
        assert_eq!(out.steps, 1);
        assert!(!out.converged);
    }

    #[test]
    fn test_invalid_limits() {
        let w = oscillator();
        assert!(matches!(
            recall(&w, &pat(&[1, 1]), 0),
            Err(HopfieldError::InvalidConfig(_))
        ));
        assert!(matches!(
            recall_with_history(&w, &pat(&[1, 1]), 10, 0, None),
            Err(HopfieldError::InvalidConfig(_))
        ));
    }

    #[derive(Default)]
    struct Counter {
        steps: AtomicUsize,
        finished: AtomicUsize,
    }

    impl Observer for Counter {
        fn on_step(&self, _step: usize, _state: &Pattern) {
            self.steps.fetch_add(1, Ordering::SeqCst);
        }

        fn on_finish(&self, _outcome: &RecallOutcome) {
            self.finished.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn test_observer_sees_every_step() {
        let counter = Counter::default();
        let out =
            recall_with_history(&oscillator(), &pat(&[1, 1]), 5, 1, Some(&counter)).unwrap();
        assert_eq!(counter.steps.load(Ordering::SeqCst), out.steps);
        assert_eq!(counter.finished.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let w = oscillator();
        let inputs = vec![pat(&[1, 1]), pat(&[1, -1]), pat(&[-1, 1])];
        let parallel = recall_batch_parallel(&w, &inputs, 10, 1, None);
        for (input, result) in inputs.iter().zip(parallel) {
            assert_eq!(result.unwrap(), recall(&w, input, 10).unwrap());
        }
    }

    #[test]
    fn test_parallel_observer_finishes_once_per_input() {
        let counter = Counter::default();
        let inputs = vec![pat(&[1, 1]), pat(&[1, -1]), pat(&[-1, 1]), pat(&[-1, -1])];
        let results = recall_batch_parallel(&oscillator(), &inputs, 4, 1, Some(&counter));
        let total_steps: usize = results.into_iter().map(|r| r.unwrap().steps).sum();
        assert_eq!(counter.finished.load(Ordering::SeqCst), inputs.len());
        assert_eq!(counter.steps.load(Ordering::SeqCst), total_steps);
    }

    #[test]
    fn test_update_once_twice_on_fixed_point() {
        let w = arr2(&[[0.0, 1.0], [1.0, 0.0]]);
        let p = pat(&[1, 1]);
        let first = update_once(&w, &p).unwrap();
        let second = update_once(&w, &first).unwrap();
        assert_eq!(first, p);
        assert_eq!(second, p);
    }

    #[test]
    fn test_energy() {
        let w = arr2(&[[0.0, 1.0], [1.0, 0.0]]);
        assert_eq!(energy(&w, &pat(&[1, 1])).unwrap(), -1.0);
        assert_eq!(energy(&w, &pat(&[1, -1])).unwrap(), 1.0);
    }
}
