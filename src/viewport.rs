// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Contains the Viewport struct, which describes a relationship
//! between a rectangle on the integral plane with an origin at 0,0 in
//! the upper-left corner, and a window on the complex plane described
//! by a center offset and the height of the window.
use errors::FractalError;
use itertools::iproduct;
use num::Complex;
use std::mem;

/// Drag distances, in pixels, are divided by this before being scaled
/// into complex-plane units.
pub const DRAG_DIVISOR: f64 = 1024.0;

/// Describes the column and row of a pixel on the integral plane.
/// Rows count downward from the top of the image.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Pixel(pub usize, pub usize);

/// An immutable snapshot of what part of the complex plane is being
/// looked at, and at what resolution.
///
/// The center is stored the way the evaluators consume it: it is
/// *subtracted* from the scaled pixel position, so a center of
/// `(0.5, 0.0)` puts the complex point `(-0.5, 0.0)` in the middle of
/// the image.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Viewport {
    center: Complex<f64>,
    scale: f64,
    width: u32,
    height: u32,
}

impl Viewport {
    /// Constructor.  `scale` is the extent of the imaginary (vertical)
    /// axis; the real axis spans `scale * width / height`.  Refuses
    /// empty images and scales that are not positive and finite, so
    /// nothing downstream ever divides by zero.
    pub fn new(
        center: Complex<f64>,
        scale: f64,
        width: u32,
        height: u32,
    ) -> Result<Viewport, FractalError> {
        if width == 0
            || height == 0
            || !(scale > 0.0)
            || !scale.is_finite()
            || !center.re.is_finite()
            || !center.im.is_finite()
            || Viewport::buffer_bytes(width, height).is_none()
        {
            return Err(FractalError::InvalidViewport {
                width,
                height,
                scale,
            });
        }
        Ok(Viewport {
            center,
            scale,
            width,
            height,
        })
    }

    /// Size in bytes of a packed pixel buffer for this resolution, or
    /// `None` if it could not be allocated on this target.
    fn buffer_bytes(width: u32, height: u32) -> Option<usize> {
        (width as usize)
            .checked_mul(height as usize)
            .and_then(|len| len.checked_mul(mem::size_of::<u32>()))
            .filter(|bytes| *bytes <= ::std::isize::MAX as usize)
    }

    /// The center offset.
    pub fn center(&self) -> Complex<f64> {
        self.center
    }

    /// Extent of the imaginary axis.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Width over height.
    pub fn aspect_ratio(&self) -> f64 {
        f64::from(self.width) / f64::from(self.height)
    }

    /// The total number of points in the integral grid.  Used to
    /// size pixel buffers.
    pub fn len(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// A validated viewport always has at least one pixel.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Given a pixel on the integral cartesian plane, map it to the
    /// corresponding point on the complex plane.  Both axes increase
    /// with the pixel coordinates: moving right increases the real
    /// part and moving down increases the imaginary part.
    pub fn pixel_to_point(&self, pixel: &Pixel) -> Complex<f64> {
        let ratio = self.aspect_ratio();
        let x = pixel.0 as f64 / f64::from(self.width);
        let y = pixel.1 as f64 / f64::from(self.height);
        Complex::new(
            ratio * (x - 0.5) * self.scale - self.center.re,
            (y - 0.5) * self.scale - self.center.im,
        )
    }

    /// Every pixel of the image in buffer order: top row first, left
    /// to right within a row.
    pub fn pixels(&self) -> impl Iterator<Item = Pixel> {
        iproduct!(0..self.height as usize, 0..self.width as usize)
            .map(|(row, column)| Pixel(column, row))
    }

    /// The same window at a different resolution.
    pub fn resized(&self, width: u32, height: u32) -> Result<Viewport, FractalError> {
        Viewport::new(self.center, self.scale, width, height)
    }

    /// Translates a drag into a new view.  `dx` and `dy` are the
    /// previous pointer position minus the current one, in pixels.
    pub fn panned(&self, dx: f64, dy: f64) -> Result<Viewport, FractalError> {
        let center = Complex::new(
            self.center.re + dx * self.scale / DRAG_DIVISOR,
            self.center.im - dy * self.scale / DRAG_DIVISOR,
        );
        Viewport::new(center, self.scale, self.width, self.height)
    }

    /// Applies a pinch.  A factor above one zooms in.
    pub fn zoomed(&self, factor: f64) -> Result<Viewport, FractalError> {
        if !(factor > 0.0) || !factor.is_finite() {
            return Err(FractalError::InvalidViewport {
                width: self.width,
                height: self.height,
                scale: self.scale / factor,
            });
        }
        Viewport::new(self.center, self.scale / factor, self.width, self.height)
    }
}
