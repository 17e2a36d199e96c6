//! Tumble UI: view composition on top of `tumble-engine`.
//!
//! The view tree is deliberately small: a full-screen [`RootView`] container
//! that owns a gesture recognizer, and one [`SurfaceView`] drawing into the
//! window's GPU surface.
//!
//! ```rust,ignore
//! use tumble_ui::prelude::*;
//!
//! struct Spinner;
//!
//! impl SurfaceView for Spinner {
//!     fn on_context_create(&mut self, ctx: &RenderCtx<'_>) { /* pipelines, buffers */ }
//!     fn update(&mut self, time: &FrameTime) { /* advance state */ }
//!     fn render(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>) { /* draw */ }
//! }
//!
//! Application::new().title("Spinner").run(Spinner);
//! ```

pub mod app;
pub mod event;
pub mod gate;
pub mod gesture;
pub mod surface;
pub mod view;

// Top-level re-exports: `use tumble_ui::Application`
pub use app::Application;
pub use surface::SurfaceView;
pub use view::RootView;

/// Everything a surface implementation needs. Import this in the app crate.
pub mod prelude {
    pub use crate::app::Application;
    pub use crate::event::EventResult;
    pub use crate::gate::{GestureGate, DEFAULT_GESTURE_WINDOW};
    pub use crate::gesture::{GestureConfig, GestureHandlers, GestureRecognizer, GestureState};
    pub use crate::surface::{FrameLoop, FrameStep, LoopState, SurfaceView};
    pub use crate::view::RootView;

    // Re-export the engine primitives surfaces need.
    pub use tumble_engine::paint::Color;
    pub use tumble_engine::render::{RenderCtx, RenderTarget};
    pub use tumble_engine::time::FrameTime;
}
