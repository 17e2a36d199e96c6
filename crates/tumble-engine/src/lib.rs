//! Tumble engine crate.
//!
//! Owns the platform + GPU runtime pieces used by the view layer: window and
//! event loop, device/surface, input translation, frame timing, logging and
//! shader program bootstrap.

pub mod core;
pub mod device;
pub mod input;
pub mod logging;
pub mod paint;
pub mod render;
pub mod time;
pub mod window;

