//! Demonstration data, noise, and grid rendering.
//!
//! ## Submodules
//!
//! - [`samples`] — Built-in 10×10 ring images and distorted probes
//! - [`noise`] — Random bit flips and random bipolar patterns

pub mod noise;
pub mod samples;

pub use noise::{corrupt, random_pattern};
pub use samples::{demo_patterns, distorted_probes, GRID_SIDE};

use crate::core::{HopfieldError, HopfieldResult, Pattern};

/// Render a pattern as a grid, `x` for +1 and `-` for -1, row-major.
///
/// Each cell is followed by a space; rows end with a newline.
///
/// # Errors
/// - `DimensionMismatch` if `cols` is 0 or does not divide the pattern length
pub fn render_grid(pattern: &Pattern, cols: usize) -> HopfieldResult<String> {
    if cols == 0 || pattern.len() % cols != 0 {
        return Err(HopfieldError::DimensionMismatch(format!(
            "cannot lay out {} units in rows of {}",
            pattern.len(),
            cols
        )));
    }

    let mut out = String::with_capacity(pattern.len() * 2 + pattern.len() / cols);
    for row in pattern.values().as_slice().unwrap_or(&[]).chunks(cols) {
        for &v in row {
            out.push(if v == 1 { 'x' } else { '-' });
            out.push(' ');
        }
        out.push('\n');
    }
    Ok(out)
}
