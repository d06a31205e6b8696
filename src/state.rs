// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! What is being drawn: which kernel, which palette, and where.
//!
//! A `RenderState` is a plain value.  Whoever owns it (a UI layer, the
//! command line, the `Renderer` worker) decides when to re-render by
//! comparing it with the state of the last frame it drew.

use errors::FractalError;
use kernel::FractalKernel;
use num::Complex;
use palette::{Palette, PaletteId};
use viewport::Viewport;

/// The complete input of one evaluation pass, minus the palette colors
/// themselves, which are derived from `palette`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RenderState {
    /// The fractal being drawn.
    pub kernel: FractalKernel,
    /// The palette it is drawn with.
    pub palette: PaletteId,
    viewport: Viewport,
}

/// Which parts of a `RenderState` differ from an earlier one.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Changes {
    /// A different kernel.
    pub kernel: bool,
    /// A different palette id.
    pub palette: bool,
    /// A different window or resolution.
    pub viewport: bool,
}

impl Changes {
    /// Nothing changed, so the previous frame is still current.
    pub fn is_empty(&self) -> bool {
        !(self.kernel || self.palette || self.viewport)
    }

    /// A GPU program is specific to its kernel and must be rebuilt.
    pub fn requires_relink(&self) -> bool {
        self.kernel
    }

    /// The palette texture or table must be regenerated.
    pub fn requires_palette(&self) -> bool {
        self.palette
    }
}

impl RenderState {
    /// A kernel at its initial view, with a palette.
    pub fn new(
        kernel: FractalKernel,
        palette: PaletteId,
        width: u32,
        height: u32,
    ) -> Result<RenderState, FractalError> {
        Ok(RenderState {
            kernel,
            palette,
            viewport: kernel.initial_viewport(width, height)?,
        })
    }

    /// The current view.
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Switches kernels.  The view always jumps to the new kernel's
    /// initial center and scale, discarding any pan or zoom, even when
    /// the kernel is the same one.  Kernel and view change together or
    /// not at all.
    pub fn select_kernel(&mut self, kernel: FractalKernel) -> Result<(), FractalError> {
        let viewport = kernel.initial_viewport(self.viewport.width(), self.viewport.height())?;
        self.viewport = viewport;
        self.kernel = kernel;
        Ok(())
    }

    /// Switches palettes.  The view is untouched.
    pub fn select_palette(&mut self, palette: PaletteId) {
        self.palette = palette;
    }

    /// Moves the view to an explicit center and scale.  On error the
    /// state is unchanged.
    pub fn look_at(&mut self, center: Complex<f64>, scale: f64) -> Result<(), FractalError> {
        self.viewport = Viewport::new(
            center,
            scale,
            self.viewport.width(),
            self.viewport.height(),
        )?;
        Ok(())
    }

    /// Applies a drag of `dx, dy` pixels (previous minus current
    /// pointer position).
    pub fn pan(&mut self, dx: f64, dy: f64) -> Result<(), FractalError> {
        self.viewport = self.viewport.panned(dx, dy)?;
        Ok(())
    }

    /// Applies a pinch; factors above one zoom in.
    pub fn zoom(&mut self, factor: f64) -> Result<(), FractalError> {
        self.viewport = self.viewport.zoomed(factor)?;
        Ok(())
    }

    /// Changes the output resolution, keeping the window.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), FractalError> {
        self.viewport = self.viewport.resized(width, height)?;
        Ok(())
    }

    /// Compares against the state of an earlier frame.
    pub fn changes_since(&self, earlier: &RenderState) -> Changes {
        Changes {
            kernel: self.kernel != earlier.kernel,
            palette: self.palette != earlier.palette,
            viewport: self.viewport != earlier.viewport,
        }
    }

    /// Generates the palette and evaluates one full frame.
    pub fn render(&self) -> Result<Vec<u32>, FractalError> {
        self.kernel.render(&self.viewport, &Palette::new(self.palette))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kernel::PRESETS;

    fn fresh(kernel: FractalKernel, size: u32) -> RenderState {
        RenderState::new(kernel, PaletteId::Frost, size, size).unwrap()
    }

    #[test]
    fn selecting_a_kernel_resets_the_view() {
        let mut state =
            RenderState::new(FractalKernel::Mandelbrot, PaletteId::Frost, 320, 200).unwrap();
        for kernel in PRESETS.iter() {
            state.pan(120.0, -40.0).unwrap();
            state.zoom(3.0).unwrap();
            state.select_kernel(*kernel).unwrap();
            assert_eq!(state.kernel, *kernel);
            assert_eq!(state.viewport().center(), kernel.initial_center());
            assert_eq!(state.viewport().scale(), kernel.initial_scale());
            assert_eq!(state.viewport().width(), 320);
            assert_eq!(state.viewport().height(), 200);
        }
    }

    #[test]
    fn selecting_the_same_kernel_still_resets() {
        let mut state = fresh(FractalKernel::julia(0.0, 0.8), 64);
        state.zoom(2.0).unwrap();
        state.select_kernel(FractalKernel::julia(0.0, 0.8)).unwrap();
        assert_eq!(state.viewport().scale(), 2.0);
    }

    #[test]
    fn selecting_a_palette_keeps_the_view() {
        let mut state = fresh(FractalKernel::Mandelbrot, 64);
        state.pan(10.0, 10.0).unwrap();
        let before = *state.viewport();
        state.select_palette(PaletteId::Ember);
        assert_eq!(*state.viewport(), before);
        assert_eq!(state.palette, PaletteId::Ember);
    }

    #[test]
    fn failed_updates_leave_the_state_alone() {
        let mut state = fresh(FractalKernel::Mandelbrot, 64);
        let before = state;
        assert!(state.zoom(0.0).is_err());
        assert!(state.resize(0, 64).is_err());
        assert!(state.look_at(Complex::new(0.0, 0.0), -1.0).is_err());
        assert_eq!(state, before);
        assert!(RenderState::new(FractalKernel::Mandelbrot, PaletteId::Frost, 0, 64).is_err());
    }

    #[test]
    fn changes_name_what_moved() {
        let first = fresh(FractalKernel::Mandelbrot, 64);
        assert!(first.changes_since(&first).is_empty());

        let mut second = first;
        second.select_palette(PaletteId::Ocean);
        let changes = second.changes_since(&first);
        assert_eq!(
            changes,
            Changes {
                kernel: false,
                palette: true,
                viewport: false
            }
        );
        assert!(changes.requires_palette());
        assert!(!changes.requires_relink());

        let mut third = second;
        third.select_kernel(FractalKernel::julia(-0.6, 0.6)).unwrap();
        let changes = third.changes_since(&second);
        assert!(changes.kernel && changes.viewport && !changes.palette);
        assert!(changes.requires_relink());
    }

    #[test]
    fn rendering_uses_the_state_palette() {
        let mut state = fresh(FractalKernel::Mandelbrot, 8);
        state.select_palette(PaletteId::Sunset);
        let pixels = state.render().unwrap();
        let palette = Palette::new(PaletteId::Sunset);
        assert!(pixels.iter().all(|p| *p == palette.color(0)));
    }
}
