//! Color representation shared by the frame clear and renderers.

mod color;

pub use color::Color;
