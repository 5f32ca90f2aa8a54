//! Demonstration images: four 10×10 rings and three distorted probes.
//!
//! Each stored image is the same ring drawn in a different quadrant of the
//! grid. The probes are noisy copies that recall should clean up.

use crate::core::{HopfieldResult, Pattern};

/// Side length of every demonstration grid.
pub const GRID_SIDE: usize = 10;

const CELLS: usize = GRID_SIDE * GRID_SIDE;

/// Ring in the bottom-left quadrant.
#[rustfmt::skip]
const RING_BOTTOM_LEFT: [i8; CELLS] = [
    -1, -1, -1, -1, -1, -1, -1, -1, -1, -1,
    -1, -1, -1, -1, -1, -1, -1, -1, -1, -1,
    -1, -1, -1, -1, -1, -1, -1, -1, -1, -1,
    -1, -1, -1, -1, -1, -1, -1, -1, -1, -1,
    -1, -1,  1,  1, -1, -1, -1, -1, -1, -1,
    -1,  1,  1,  1,  1, -1, -1, -1, -1, -1,
     1,  1, -1, -1,  1,  1, -1, -1, -1, -1,
     1,  1, -1, -1,  1,  1, -1, -1, -1, -1,
    -1,  1,  1,  1,  1, -1, -1, -1, -1, -1,
    -1, -1,  1,  1, -1, -1, -1, -1, -1, -1,
];

/// Ring in the top-left quadrant.
#[rustfmt::skip]
const RING_TOP_LEFT: [i8; CELLS] = [
    -1, -1,  1,  1, -1, -1, -1, -1, -1, -1,
    -1,  1,  1,  1,  1, -1, -1, -1, -1, -1,
     1,  1, -1, -1,  1,  1, -1, -1, -1, -1,
     1,  1, -1, -1,  1,  1, -1, -1, -1, -1,
    -1,  1,  1,  1,  1, -1, -1, -1, -1, -1,
    -1, -1,  1,  1, -1, -1, -1, -1, -1, -1,
    -1, -1, -1, -1, -1, -1, -1, -1, -1, -1,
    -1, -1, -1, -1, -1, -1, -1, -1, -1, -1,
    -1, -1, -1, -1, -1, -1, -1, -1, -1, -1,
    -1, -1, -1, -1, -1, -1, -1, -1, -1, -1,
];

/// Ring in the top-right quadrant.
#[rustfmt::skip]
const RING_TOP_RIGHT: [i8; CELLS] = [
    -1, -1, -1, -1, -1, -1,  1,  1, -1, -1,
    -1, -1, -1, -1, -1,  1,  1,  1,  1, -1,
    -1, -1, -1, -1,  1,  1, -1, -1,  1,  1,
    -1, -1, -1, -1,  1,  1, -1, -1,  1,  1,
    -1, -1, -1, -1, -1,  1,  1,  1,  1, -1,
    -1, -1, -1, -1, -1, -1,  1,  1, -1, -1,
    -1, -1, -1, -1, -1, -1, -1, -1, -1, -1,
    -1, -1, -1, -1, -1, -1, -1, -1, -1, -1,
    -1, -1, -1, -1, -1, -1, -1, -1, -1, -1,
    -1, -1, -1, -1, -1, -1, -1, -1, -1, -1,
];

/// Ring in the bottom-right quadrant.
#[rustfmt::skip]
const RING_BOTTOM_RIGHT: [i8; CELLS] = [
    -1, -1, -1, -1, -1, -1, -1, -1, -1, -1,
    -1, -1, -1, -1, -1, -1, -1, -1, -1, -1,
    -1, -1, -1, -1, -1, -1, -1, -1, -1, -1,
    -1, -1, -1, -1, -1, -1, -1, -1, -1, -1,
    -1, -1, -1, -1, -1, -1,  1,  1, -1, -1,
    -1, -1, -1, -1, -1,  1,  1,  1,  1, -1,
    -1, -1, -1, -1,  1,  1, -1, -1,  1,  1,
    -1, -1, -1, -1,  1,  1, -1, -1,  1,  1,
    -1, -1, -1, -1, -1,  1,  1,  1,  1, -1,
    -1, -1, -1, -1, -1, -1,  1,  1, -1, -1,
];

/// Bottom-right ring with scattered flips.
#[rustfmt::skip]
const PROBE_BOTTOM_RIGHT: [i8; CELLS] = [
    -1, -1, -1, -1, -1, -1, -1, -1, -1, -1,
    -1, -1,  1, -1, -1, -1, -1, -1, -1, -1,
    -1, -1, -1, -1, -1, -1, -1, -1, -1, -1,
    -1, -1, -1, -1, -1, -1, -1, -1, -1, -1,
    -1, -1,  1, -1, -1, -1,  1,  1, -1, -1,
     1, -1, -1, -1, -1,  1,  1, -1,  1, -1,
    -1, -1, -1, -1,  1,  1,  1, -1,  1,  1,
    -1, -1, -1, -1,  1,  1, -1,  1,  1,  1,
    -1, -1, -1, -1, -1,  1,  1,  1,  1, -1,
    -1, -1, -1, -1, -1, -1,  1,  1, -1, -1,
];

/// Heavily distorted top-left ring.
#[rustfmt::skip]
const PROBE_TOP_LEFT: [i8; CELLS] = [
     1, -1,  1,  1, -1, -1, -1, -1, -1, -1,
     1,  1,  1,  1,  1, -1, -1, -1,  1,  1,
     1, -1,  1, -1,  1,  1, -1, -1, -1, -1,
     1,  1, -1, -1,  1,  1, -1,  1, -1,  1,
    -1,  1, -1,  1,  1, -1, -1, -1,  1, -1,
    -1, -1, -1,  1, -1, -1,  1, -1, -1, -1,
    -1, -1, -1, -1, -1,  1,  1, -1, -1, -1,
     1, -1, -1, -1, -1,  1, -1, -1,  1, -1,
    -1,  1, -1, -1, -1, -1, -1, -1,  1, -1,
    -1, -1, -1, -1, -1, -1, -1, -1,  1, -1,
];

/// Mostly noise; loosely closest to the bottom-left ring.
#[rustfmt::skip]
const PROBE_NOISE: [i8; CELLS] = [
    -1, -1, -1, -1, -1,  1,  1, -1, -1, -1,
    -1, -1, -1, -1,  1,  1, -1, -1, -1,  1,
    -1,  1, -1,  1, -1,  1, -1,  1, -1, -1,
     1, -1, -1,  1, -1,  1,  1, -1, -1, -1,
    -1, -1,  1, -1, -1, -1,  1, -1, -1,  1,
    -1,  1, -1,  1,  1,  1,  1, -1, -1,  1,
    -1, -1,  1, -1,  1, -1, -1, -1,  1,  1,
     1,  1, -1, -1,  1,  1, -1,  1,  1,  1,
    -1, -1, -1, -1,  1,  1, -1, -1, -1, -1,
    -1, -1,  1,  1, -1, -1, -1, -1,  1, -1,
];

fn to_patterns(grids: &[&[i8; CELLS]]) -> HopfieldResult<Vec<Pattern>> {
    grids.iter().map(|g| Pattern::new(g.to_vec())).collect()
}

/// The four ring images, in training order.
pub fn demo_patterns() -> HopfieldResult<Vec<Pattern>> {
    to_patterns(&[
        &RING_BOTTOM_LEFT,
        &RING_TOP_LEFT,
        &RING_TOP_RIGHT,
        &RING_BOTTOM_RIGHT,
    ])
}

/// The three distorted probes.
pub fn distorted_probes() -> HopfieldResult<Vec<Pattern>> {
    to_patterns(&[&PROBE_BOTTOM_RIGHT, &PROBE_TOP_LEFT, &PROBE_NOISE])
}
