#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! XFracts renderer
//!
//! Escape-time fractals are drawn by taking the point of the complex
//! plane under each pixel and feeding it, over and over, into a
//! simple recurrence.  Points whose orbits run off to infinity are
//! "outside" and get a color chosen by how fast they ran; points
//! whose orbits stay bounded are "inside."
//!
//! Two families are supported.  The Mandelbrot set iterates `z² + c`
//! starting from the pixel's own point `c`, and colors with a smoothed
//! (fractional) escape count blended with a pixel distance term.  A
//! Julia set iterates `z² + k` for a fixed constant `k`, starting from
//! the pixel's point, and colors with the raw escape count.
//!
//! Colors come out of a fixed-size palette whose last few entries are
//! black.  Everything here is a pure function of a kernel, a viewport,
//! and a palette; the `Renderer` worker wraps that in a background
//! thread for interactive callers, and the `shader` module emits the
//! reduced-fidelity GPU program for the same kernels.

extern crate crossbeam;
extern crate failure;
extern crate itertools;
#[macro_use]
extern crate log;
extern crate num;

pub mod errors;
pub mod julia;
pub mod kernel;
pub mod mandelbrot;
pub mod palette;
pub mod shader;
pub mod state;
pub mod viewport;
pub mod worker;

pub use errors::FractalError;
pub use kernel::{FractalKernel, Pass, PRESETS};
pub use palette::{Palette, PaletteId, Rgba, PALETTE_SIZE};
pub use state::{Changes, RenderState};
pub use viewport::{Pixel, Viewport};
pub use worker::{Frame, Renderer};
