// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The things that can go wrong.  There is no I/O in the core, so
//! every failure here is a caller handing us a bad parameter; none of
//! them are retryable.

use failure::Fail;

/// Errors produced while building a view or evaluating a kernel.
#[derive(Debug, Fail, Clone, PartialEq)]
pub enum FractalError {
    /// The viewport has a zero dimension, or a scale that is not a
    /// positive finite number.
    #[fail(
        display = "invalid viewport: {}x{} pixels at scale {}",
        width, height, scale
    )]
    InvalidViewport {
        /// Requested width, in pixels.
        width: u32,
        /// Requested height, in pixels.
        height: u32,
        /// Requested extent of the imaginary axis.
        scale: f64,
    },

    /// A palette selector outside of the four known ramps.
    #[fail(display = "invalid palette id {}: expected 0 through 3", _0)]
    InvalidPaletteId(usize),

    /// A kernel preset index outside of the catalog.
    #[fail(display = "invalid fractal preset {}: expected 0 through {}", _0, _1)]
    InvalidPreset(usize, usize),

    /// The caller's output buffer does not hold exactly one entry per pixel.
    #[fail(
        display = "pixel buffer holds {} entries but the viewport needs {}",
        actual, expected
    )]
    BufferSize {
        /// `width * height` of the viewport.
        expected: usize,
        /// Length of the buffer that was handed in.
        actual: usize,
    },

    /// A palette with no entries cannot color anything.
    #[fail(display = "palette has no entries")]
    EmptyPalette,
}
