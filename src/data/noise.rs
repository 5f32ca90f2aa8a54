//! Random bipolar patterns and bit-flip corruption.
//!
//! Both helpers take the RNG from the caller so runs can be seeded.

use crate::core::{HopfieldError, HopfieldResult, Pattern};
use ndarray::Array1;
use ndarray_rand::RandomExt;
use rand::distributions::Uniform;
use rand::seq::index;
use rand::Rng;

/// Draw a uniformly random bipolar pattern of `len` units.
pub fn random_pattern<R: Rng + ?Sized>(len: usize, rng: &mut R) -> Pattern {
    let bits = Array1::random_using(len, Uniform::new(0.0f64, 1.0), rng);
    // threshold at 0.5 -> {-1, +1}
    Pattern::from_activations(&bits.mapv(|b| b - 0.5))
}

/// Copy of `pattern` with `flips` distinct units negated.
///
/// # Errors
/// - `InvalidConfig` if `flips` exceeds the pattern length
pub fn corrupt<R: Rng + ?Sized>(
    pattern: &Pattern,
    flips: usize,
    rng: &mut R,
) -> HopfieldResult<Pattern> {
    if flips > pattern.len() {
        return Err(HopfieldError::InvalidConfig(format!(
            "cannot flip {} of {} units",
            flips,
            pattern.len()
        )));
    }

    let mut values = pattern.to_vec();
    for i in index::sample(rng, pattern.len(), flips).iter() {
        values[i] = -values[i];
    }
    Pattern::new(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_corrupt_flips_exactly() {
        let mut rng = StdRng::seed_from_u64(7);
        let p = random_pattern(50, &mut rng);
        let noisy = corrupt(&p, 9, &mut rng).unwrap();
        assert_eq!(p.hamming_distance(&noisy).unwrap(), 9);
    }

    #[test]
    fn test_corrupt_too_many() {
        let mut rng = StdRng::seed_from_u64(7);
        let p = Pattern::from_ints(&[1, -1]).unwrap();
        assert!(corrupt(&p, 3, &mut rng).is_err());
        assert_eq!(corrupt(&p, 0, &mut rng).unwrap(), p);
    }

    #[test]
    fn test_random_pattern_is_seeded() {
        let a = random_pattern(64, &mut StdRng::seed_from_u64(1));
        let b = random_pattern(64, &mut StdRng::seed_from_u64(1));
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
    }
}
