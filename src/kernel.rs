// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The fractal kernels, their starting views, and the evaluation pass
//! that turns a viewport and a palette into a buffer of packed colors.

use errors::FractalError;
use julia;
use mandelbrot;
use num::Complex;
use palette::Palette;
use std::fmt;
use viewport::{Pixel, Viewport};

/// A fractal family together with its parameters.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum FractalKernel {
    /// The Mandelbrot set, shaded with a smooth escape count.
    Mandelbrot,
    /// The Julia set for the additive constant `re + im·i`.
    Julia {
        /// Real part of the constant.
        re: f32,
        /// Imaginary part of the constant.
        im: f32,
    },
}

/// The fixed catalog offered to users, in menu order.
pub const PRESETS: [FractalKernel; 6] = [
    FractalKernel::Mandelbrot,
    FractalKernel::Julia { re: 0.0, im: 0.8 },
    FractalKernel::Julia { re: -0.6, im: 0.6 },
    FractalKernel::Julia { re: 0.39, im: 0.6 },
    FractalKernel::Julia { re: -0.8, im: 0.2 },
    FractalKernel::Julia { re: -1.0, im: 0.0 },
];

/// How an evaluation pass ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Pass {
    /// Every pixel was written.
    Complete,
    /// The caller asked to stop; rows from this one onward were left
    /// untouched.
    Cancelled {
        /// The first row that was not evaluated.
        row: usize,
    },
}

impl FractalKernel {
    /// A Julia kernel for the constant `re + im·i`.
    pub fn julia(re: f32, im: f32) -> FractalKernel {
        FractalKernel::Julia { re, im }
    }

    /// Looks up a kernel in the catalog.
    pub fn preset(index: usize) -> Result<FractalKernel, FractalError> {
        PRESETS
            .get(index)
            .cloned()
            .ok_or(FractalError::InvalidPreset(index, PRESETS.len() - 1))
    }

    /// Extent of the imaginary axis when the kernel is first shown.
    pub fn initial_scale(&self) -> f64 {
        match *self {
            FractalKernel::Mandelbrot => f64::from(2.2_f32),
            FractalKernel::Julia { .. } => 2.0,
        }
    }

    /// Center offset when the kernel is first shown.
    pub fn initial_center(&self) -> Complex<f64> {
        match *self {
            FractalKernel::Mandelbrot => Complex::new(0.5, 0.0),
            FractalKernel::Julia { .. } => Complex::new(0.0, 0.0),
        }
    }

    /// The starting view at a given resolution.
    pub fn initial_viewport(&self, width: u32, height: u32) -> Result<Viewport, FractalError> {
        Viewport::new(self.initial_center(), self.initial_scale(), width, height)
    }

    /// Palette index for one pixel.  `palette_size` must be non-zero.
    pub fn color_index(&self, viewport: &Viewport, pixel: &Pixel, palette_size: usize) -> usize {
        let point = viewport.pixel_to_point(pixel);
        match *self {
            FractalKernel::Mandelbrot => {
                mandelbrot::sample(point, pixel).color_index(palette_size)
            }
            FractalKernel::Julia { re, im } => {
                let k = Complex::new(f64::from(re), f64::from(im));
                julia::color_index(point, k, palette_size)
            }
        }
    }

    /// Fills `pixels`, row-major from the top-left, with one palette
    /// color per pixel of the viewport.
    pub fn evaluate(
        &self,
        viewport: &Viewport,
        palette: &Palette,
        pixels: &mut [u32],
    ) -> Result<(), FractalError> {
        self.evaluate_until(viewport, palette, pixels, || true)
            .map(|_| ())
    }

    /// Like `evaluate`, but asks `keep_going` before starting each
    /// row and stops as soon as it answers `false`.
    pub fn evaluate_until<F>(
        &self,
        viewport: &Viewport,
        palette: &Palette,
        pixels: &mut [u32],
        mut keep_going: F,
    ) -> Result<Pass, FractalError>
    where
        F: FnMut() -> bool,
    {
        if pixels.len() != viewport.len() {
            return Err(FractalError::BufferSize {
                expected: viewport.len(),
                actual: pixels.len(),
            });
        }
        if palette.is_empty() {
            return Err(FractalError::EmptyPalette);
        }

        debug!(
            "evaluating {} over {}x{} at {} scale {}",
            self,
            viewport.width(),
            viewport.height(),
            viewport.center(),
            viewport.scale()
        );

        let size = palette.len();
        for (slot, pixel) in pixels.iter_mut().zip(viewport.pixels()) {
            if pixel.0 == 0 && !keep_going() {
                debug!("pass cancelled before row {}", pixel.1);
                return Ok(Pass::Cancelled { row: pixel.1 });
            }
            *slot = palette.color(self.color_index(viewport, &pixel, size));
        }
        Ok(Pass::Complete)
    }

    /// Allocates a buffer for the viewport and evaluates into it.
    pub fn render(&self, viewport: &Viewport, palette: &Palette) -> Result<Vec<u32>, FractalError> {
        let mut pixels = vec![0 as u32; viewport.len()];
        self.evaluate(viewport, palette, &mut pixels)?;
        Ok(pixels)
    }
}

impl Default for FractalKernel {
    fn default() -> FractalKernel {
        FractalKernel::Mandelbrot
    }
}

impl fmt::Display for FractalKernel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            FractalKernel::Mandelbrot => write!(f, "Mandelbrot"),
            FractalKernel::Julia { re, im } => write!(f, "Julia({}, {})", re, im),
        }
    }
}
