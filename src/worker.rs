// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! A background renderer for interactive callers.
//!
//! Panning and zooming produce new states faster than frames can be
//! computed.  Every submitted state gets a generation number; the
//! worker abandons a pass between rows as soon as a newer generation
//! has been submitted, and skips queued requests that are already
//! stale.  Frames come back tagged with their generation so the caller
//! can throw away anything older than its newest request.
//!
//! This is one worker thread evaluating one frame at a time, in the
//! same row order as a direct call; it does not split frames.

use crossbeam::channel::{unbounded, Receiver, Sender};
use errors::FractalError;
use kernel::Pass;
use palette::Palette;
use state::RenderState;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

/// One finished pass.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    /// The request this frame answers.
    pub generation: u64,
    /// The state it was evaluated for.
    pub state: RenderState,
    /// Packed colors, row-major from the top-left.
    pub pixels: Vec<u32>,
}

enum Request {
    Render(u64, RenderState),
    Shutdown,
}

type Outcome = (u64, Result<Frame, FractalError>);

/// Owns the worker thread.  Dropping it stops the thread.
pub struct Renderer {
    requests: Sender<Request>,
    outcomes: Receiver<Outcome>,
    latest: Arc<AtomicU64>,
    handle: Option<JoinHandle<()>>,
}

impl Renderer {
    /// Starts the worker thread.
    pub fn spawn() -> Renderer {
        let (requests, inbox) = unbounded();
        let (outbox, outcomes) = unbounded();
        let latest = Arc::new(AtomicU64::new(0));
        let shared = latest.clone();
        let handle = thread::Builder::new()
            .name("xfracts-renderer".to_string())
            .spawn(move || run(&inbox, &outbox, &shared))
            .ok();
        if handle.is_none() {
            error!("could not start the renderer thread");
        }
        Renderer {
            requests,
            outcomes,
            latest,
            handle,
        }
    }

    /// Queues a state for rendering and returns its generation.  Any
    /// earlier request still in flight is superseded.
    pub fn submit(&self, state: RenderState) -> u64 {
        let generation = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        debug!("submitting generation {}: {}", generation, state.kernel);
        if self.requests.send(Request::Render(generation, state)).is_err() {
            warn!("renderer thread is gone; generation {} dropped", generation);
        }
        generation
    }

    /// The generation of the most recent `submit`.
    pub fn latest(&self) -> u64 {
        self.latest.load(Ordering::SeqCst)
    }

    /// Blocks until the frame for the most recent request arrives,
    /// discarding stale ones on the way.  Returns `None` if nothing
    /// has been submitted or the worker has stopped.
    pub fn recv_latest(&self) -> Option<Result<Frame, FractalError>> {
        if self.latest() == 0 {
            return None;
        }
        for (generation, outcome) in self.outcomes.iter() {
            if generation == self.latest() {
                return Some(outcome);
            }
            trace!("discarding stale generation {}", generation);
        }
        None
    }

    /// Like `recv_latest`, but only looks at what has already arrived.
    pub fn try_recv_latest(&self) -> Option<Result<Frame, FractalError>> {
        let mut found = None;
        for (generation, outcome) in self.outcomes.try_iter() {
            if generation == self.latest() {
                found = Some(outcome);
            }
        }
        found
    }
}

impl Drop for Renderer {
    fn drop(&mut self) {
        // Supersede whatever is in flight so the pass stops at its next row.
        self.latest.fetch_add(1, Ordering::SeqCst);
        let _ = self.requests.send(Request::Shutdown);
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                error!("renderer thread panicked");
            }
        }
    }
}

fn run(inbox: &Receiver<Request>, outbox: &Sender<Outcome>, latest: &AtomicU64) {
    let mut previous: Option<RenderState> = None;
    let mut palette: Option<Palette> = None;

    for request in inbox.iter() {
        let (generation, state) = match request {
            Request::Render(generation, state) => (generation, state),
            Request::Shutdown => break,
        };
        if generation < latest.load(Ordering::SeqCst) {
            trace!("skipping superseded generation {}", generation);
            continue;
        }

        let stale_palette = match (previous, palette.as_ref()) {
            (Some(ref earlier), Some(_)) => state.changes_since(earlier).requires_palette(),
            _ => true,
        };
        if stale_palette {
            debug!("generating palette {}", state.palette);
            palette = Some(Palette::new(state.palette));
        }
        previous = Some(state);
        let colors = match palette {
            Some(ref colors) => colors,
            None => continue,
        };

        let viewport = state.viewport();
        let mut pixels = vec![0 as u32; viewport.len()];
        let pass = state.kernel.evaluate_until(viewport, colors, &mut pixels, || {
            latest.load(Ordering::SeqCst) == generation
        });
        let outcome = match pass {
            Ok(Pass::Complete) => Ok(Frame {
                generation,
                state,
                pixels,
            }),
            Ok(Pass::Cancelled { row }) => {
                debug!("generation {} superseded at row {}", generation, row);
                continue;
            }
            Err(e) => {
                warn!("generation {} failed: {}", generation, e);
                Err(e)
            }
        };
        if outbox.send((generation, outcome)).is_err() {
            break;
        }
    }
    debug!("renderer thread exiting");
}

#[cfg(test)]
mod tests {
    use super::*;
    use kernel::FractalKernel;
    use palette::PaletteId;

    fn state(kernel: FractalKernel, palette: PaletteId) -> RenderState {
        RenderState::new(kernel, palette, 48, 32).unwrap()
    }

    #[test]
    fn nothing_submitted_means_nothing_received() {
        let renderer = Renderer::spawn();
        assert!(renderer.recv_latest().is_none());
        assert!(renderer.try_recv_latest().is_none());
    }

    #[test]
    fn a_single_request_comes_back() {
        let renderer = Renderer::spawn();
        let wanted = state(FractalKernel::julia(0.0, 0.8), PaletteId::Ocean);
        let generation = renderer.submit(wanted);
        assert_eq!(generation, 1);
        let frame = renderer.recv_latest().unwrap().unwrap();
        assert_eq!(frame.generation, 1);
        assert_eq!(frame.state, wanted);
        assert_eq!(frame.pixels, wanted.render().unwrap());
    }

    #[test]
    fn only_the_newest_request_is_delivered() {
        let renderer = Renderer::spawn();
        let mut current = state(FractalKernel::julia(-0.8, 0.2), PaletteId::Frost);
        for _ in 0..5 {
            current.zoom(1.5).unwrap();
            renderer.submit(current);
        }
        current.select_palette(PaletteId::Ember);
        let last = renderer.submit(current);

        let frame = renderer.recv_latest().unwrap().unwrap();
        assert_eq!(frame.generation, last);
        assert_eq!(frame.state, current);
        assert_eq!(frame.pixels, current.render().unwrap());
    }

    #[test]
    fn palette_changes_reach_the_worker() {
        let renderer = Renderer::spawn();
        let mut current = state(FractalKernel::Mandelbrot, PaletteId::Frost);
        renderer.submit(current);
        let first = renderer.recv_latest().unwrap().unwrap();

        current.select_palette(PaletteId::Ocean);
        renderer.submit(current);
        let second = renderer.recv_latest().unwrap().unwrap();

        assert_eq!(first.pixels[0], Palette::new(PaletteId::Frost).color(0));
        assert_eq!(second.pixels[0], Palette::new(PaletteId::Ocean).color(0));
    }

    #[test]
    fn dropping_supersedes_the_pass_in_flight() {
        let renderer = Renderer::spawn();
        let big =
            RenderState::new(FractalKernel::Mandelbrot, PaletteId::Frost, 4096, 4096).unwrap();
        let generation = renderer.submit(big);
        let latest = renderer.latest.clone();
        drop(renderer);
        assert!(latest.load(Ordering::SeqCst) > generation);
    }
}
