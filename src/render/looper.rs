//! Cooperative, cancellable per-frame render task.
//!
//! The host drives the loop by calling [`RenderLoop::tick`] from its display callback. The
//! loop holds no timer of its own; cancelling it (through any [`LoopHandle`], or by dropping
//! the loop when the surface is torn down) makes every later tick a no-op, so no frame is
//! painted after teardown.

use super::frame::{Scene, draw_frame};
use super::surface::Surface;
use log::debug;
use std::cell::Cell;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Stopped,
}

/// Shared cancellation switch of a [`RenderLoop`].
#[derive(Debug, Clone)]
pub struct LoopHandle {
    running: Rc<Cell<bool>>,
}

impl LoopHandle {
    pub fn cancel(&self) {
        self.running.set(false);
    }

    pub fn is_running(&self) -> bool {
        self.running.get()
    }
}

#[derive(Debug)]
pub struct RenderLoop {
    running: Rc<Cell<bool>>,
    frames: u64,
}

impl RenderLoop {
    pub fn start() -> Self {
        debug!("render loop started");
        Self {
            running: Rc::new(Cell::new(true)),
            frames: 0,
        }
    }

    pub fn handle(&self) -> LoopHandle {
        LoopHandle {
            running: Rc::clone(&self.running),
        }
    }

    pub fn state(&self) -> LoopState {
        if self.running.get() {
            LoopState::Running
        } else {
            LoopState::Stopped
        }
    }

    /// Frames painted so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Paints one frame unless the loop was cancelled; returns the state after the tick.
    pub fn tick<S: Surface + ?Sized>(&mut self, surface: &mut S, scene: &Scene) -> LoopState {
        if !self.running.get() {
            return LoopState::Stopped;
        }

        draw_frame(surface, scene);
        self.frames += 1;
        LoopState::Running
    }

    pub fn stop(&self) {
        self.running.set(false);
    }
}

impl Drop for RenderLoop {
    fn drop(&mut self) {
        if self.running.replace(false) {
            debug!("render loop stopped after {} frame(s)", self.frames);
        }
    }
}
