// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Julia evaluator.  The pixel's point is the *starting* iterate and
//! the additive constant is fixed for the whole image.  Coloring is
//! the raw escape count, with no smoothing.

use num::Complex;

const BAILOUT: f64 = 4.0;

/// Iterates `z = z² + k` from `z0` and returns the step on which the
/// orbit left the bailout circle, or `limit` if it never did.
pub fn escape_count(z0: Complex<f64>, k: Complex<f64>, limit: usize) -> usize {
    let mut z = z0;
    for n in 0..limit {
        let next = z * z + k;
        if next.norm_sqr() > BAILOUT {
            return n;
        }
        z = next;
    }
    limit
}

/// Palette index for the point `z0` in a palette of `palette_size`
/// entries.  The iteration bound is the palette size, so an orbit that
/// never escapes would index one past the end; it is clamped onto the
/// last entry, which sits in the black band.
pub fn color_index(z0: Complex<f64>, k: Complex<f64>, palette_size: usize) -> usize {
    escape_count(z0, k, palette_size).min(palette_size - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use palette::PALETTE_SIZE;

    fn constant(re: f32, im: f32) -> Complex<f64> {
        Complex::new(f64::from(re), f64::from(im))
    }

    #[test]
    fn origin_escapes_for_the_presets() {
        let origin = Complex::new(0.0, 0.0);
        assert_eq!(escape_count(origin, constant(0.0, 0.8), PALETTE_SIZE), 17);
        assert_eq!(escape_count(origin, constant(-0.6, 0.6), PALETTE_SIZE), 11);
        assert_eq!(escape_count(origin, constant(0.39, 0.6), PALETTE_SIZE), 18);
        assert_eq!(escape_count(origin, constant(-0.8, 0.2), PALETTE_SIZE), 14);
    }

    #[test]
    fn escape_on_the_last_step_is_distinct_from_no_escape() {
        // The origin leaves on step 17 for 0.8i.
        let origin = Complex::new(0.0, 0.0);
        assert_eq!(escape_count(origin, constant(0.0, 0.8), 18), 17);
        assert_eq!(escape_count(origin, constant(0.0, 0.8), 17), 17);
        assert_eq!(color_index(origin, constant(0.0, 0.8), 18), 17);
        assert_eq!(color_index(origin, constant(0.0, 0.8), 17), 16);
    }

    #[test]
    fn bounded_orbits_run_to_the_limit() {
        // 0 -> -1 -> 0 -> -1 ...
        let origin = Complex::new(0.0, 0.0);
        assert_eq!(escape_count(origin, constant(-1.0, 0.0), PALETTE_SIZE), PALETTE_SIZE);
        assert_eq!(escape_count(origin, constant(-1.0, 0.0), 7), 7);
    }

    #[test]
    fn bounded_orbits_land_in_the_black_band() {
        let origin = Complex::new(0.0, 0.0);
        assert_eq!(
            color_index(origin, constant(-1.0, 0.0), PALETTE_SIZE),
            PALETTE_SIZE - 1
        );
    }

    #[test]
    fn far_points_escape_at_once() {
        let far = Complex::new(3.0, 0.0);
        assert_eq!(escape_count(far, constant(0.0, 0.8), PALETTE_SIZE), 0);
        assert_eq!(color_index(far, constant(0.0, 0.8), PALETTE_SIZE), 0);
    }
}
