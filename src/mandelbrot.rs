// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Mandelbrot evaluator
//!
//! Each pixel's point `c` is iterated as `z = z² + c`, starting from
//! `z = c`, for at most `ITERATIONS` steps.  A point that escapes the
//! radius-two circle gets a fractional escape count (the "smooth"
//! count) from the size of its last bounded iterate.  That count is
//! then blended with a per-pixel distance term and spread across the
//! palette.
//!
//! The distance term is the distance from the pixel's integer
//! coordinates to the nearest half-integer grid point, which for
//! integer coordinates is always zero.  Because of that the blend is
//! zero for every pixel, escaped or not, and the whole image lands on
//! palette entry zero rather than on the black band.  That is the
//! known behavior of this shading and is kept as-is.

use num::Complex;
use viewport::Pixel;

/// Iteration bound for the CPU evaluator.
pub const ITERATIONS: usize = 40;

/// Squared escape radius.
const BAILOUT: f64 = 4.0;

/// Grid resolution of the distance term: half-integer points.
const GRID_FACTOR: f64 = 2.0;

/// Multiplier that spreads the blended shade across the palette.
const SHADE_SPREAD: f64 = 10200.0;

/// What happened to one point.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Sample {
    /// The step on which the orbit left the bailout circle, or `None`
    /// if it stayed inside for every step.
    pub escaped_at: Option<usize>,
    /// The fractional escape count; zero for interior points and for
    /// escapes whose count could not be computed.
    pub smooth: f64,
    /// Running minimum of the distance term after the last bounded step.
    pub distance: f64,
    /// The same running minimum one step earlier.
    pub previous_distance: f64,
}

impl Sample {
    /// True if the orbit never escaped.
    pub fn is_interior(&self) -> bool {
        self.escaped_at.is_none()
    }

    /// Blends the smooth count with the distance terms and wraps the
    /// result into a palette of `palette_size` entries.
    pub fn color_index(&self, palette_size: usize) -> usize {
        let m = self.smooth;
        let shade = (m * self.distance + (1.0 - m) * self.previous_distance) * SHADE_SPREAD;
        (shade.round() as i64).rem_euclid(palette_size as i64) as usize
    }
}

/// Distance from a pixel's coordinates to the nearest point of the
/// half-integer grid.
pub fn grid_distance(pixel: &Pixel) -> f64 {
    let x = pixel.0 as f64;
    let y = pixel.1 as f64;
    let gx = (x * GRID_FACTOR).round() / GRID_FACTOR;
    let gy = (y * GRID_FACTOR).round() / GRID_FACTOR;
    ((x - gx) * (x - gx) + (y - gy) * (y - gy)).sqrt()
}

/// The fractional escape count for an orbit that escaped on step `n`,
/// given the squared modulus of the iterate *before* the escaping
/// step.  The nested logarithms are undefined when that modulus is
/// one or less; those orbits get `None`.
pub fn smooth_iteration(n: usize, modulus_sq: f64) -> Option<f64> {
    let m = n as f64 + 2.0 - (modulus_sq.sqrt().ln() / 2f64.ln()).ln() / 4f64.ln();
    if m.is_finite() {
        Some(m)
    } else {
        None
    }
}

/// Iterates the point `c`, which lies under `pixel`.
pub fn sample(c: Complex<f64>, pixel: &Pixel) -> Sample {
    let mut z = c;
    let mut d = 0.0_f64;
    let mut d1 = 0.0_f64;

    for n in 0..ITERATIONS {
        let next = z * z + c;
        if next.norm_sqr() > BAILOUT {
            let smooth = smooth_iteration(n, z.norm_sqr());
            if smooth.is_none() {
                trace!("smooth count undefined for {} at step {}", c, n);
            }
            return Sample {
                escaped_at: Some(n),
                smooth: smooth.unwrap_or(0.0),
                distance: d,
                previous_distance: d1,
            };
        }
        d1 = d;
        d = d.min(grid_distance(pixel));
        z = next;
    }

    Sample {
        escaped_at: None,
        smooth: 0.0,
        distance: d,
        previous_distance: d1,
    }
}
