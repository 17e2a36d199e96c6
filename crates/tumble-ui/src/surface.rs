//! Embedded GPU surface view and its frame loop.

use tumble_engine::paint::Color;
use tumble_engine::render::{RenderCtx, RenderTarget};
use tumble_engine::time::FrameTime;

/// Content drawn into the window's GPU surface.
///
/// [`on_context_create`](Self::on_context_create) runs once, on the first frame
/// after the device and surface exist. After that every frame calls
/// [`update`](Self::update) then [`render`](Self::render).
pub trait SurfaceView: 'static {
    /// One-time GPU setup (shaders, buffers, pipelines).
    fn on_context_create(&mut self, ctx: &RenderCtx<'_>);

    /// Advances per-frame state. No GPU access.
    fn update(&mut self, time: &FrameTime);

    /// Records this frame's draws. Color and depth are already cleared.
    fn render(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>);

    fn clear_color(&self) -> Color {
        Color::BLACK
    }
}

/// Frame loop lifecycle.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum LoopState {
    /// No frame has run yet; the GPU context has not been handed to the view.
    Uninitialized,
    /// Steady state: one update + render per frame.
    Rendering,
    /// Stopped by the host; no more frames.
    Stopped,
}

/// What the host must do for the frame it is about to run.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FrameStep {
    /// Create the view's GPU context, then render.
    CreateContext,
    Render,
}

/// Drives [`LoopState`] transitions.
#[derive(Debug, Clone)]
pub struct FrameLoop {
    state: LoopState,
    frames: u64,
}

impl FrameLoop {
    pub fn new() -> Self {
        Self {
            state: LoopState::Uninitialized,
            frames: 0,
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Frames started so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Starts a frame. `None` once the loop has been stopped.
    pub fn begin_frame(&mut self) -> Option<FrameStep> {
        let step = match self.state {
            LoopState::Uninitialized => {
                self.state = LoopState::Rendering;
                FrameStep::CreateContext
            }
            LoopState::Rendering => FrameStep::Render,
            LoopState::Stopped => return None,
        };
        self.frames += 1;
        Some(step)
    }

    pub fn stop(&mut self) {
        if self.state != LoopState::Stopped {
            log::debug!("frame loop stopped after {} frames", self.frames);
            self.state = LoopState::Stopped;
        }
    }
}

impl Default for FrameLoop {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_frame_creates_context_once() {
        let mut fl = FrameLoop::new();
        assert_eq!(fl.state(), LoopState::Uninitialized);
        assert_eq!(fl.begin_frame(), Some(FrameStep::CreateContext));
        assert_eq!(fl.state(), LoopState::Rendering);
        for _ in 0..10 {
            assert_eq!(fl.begin_frame(), Some(FrameStep::Render));
        }
        assert_eq!(fl.frames(), 11);
    }

    #[test]
    fn stopped_loop_runs_no_frames() {
        let mut fl = FrameLoop::new();
        fl.begin_frame();
        fl.stop();
        assert_eq!(fl.begin_frame(), None);
        assert_eq!(fl.frames(), 1);
        assert_eq!(fl.state(), LoopState::Stopped);
    }

    #[test]
    fn stop_before_first_frame() {
        let mut fl = FrameLoop::new();
        fl.stop();
        assert_eq!(fl.begin_frame(), None);
    }
}
