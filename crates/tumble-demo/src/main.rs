//! Tumble: a rotating, Lambert-shaded cube in a full-screen GPU surface.
//!
//! Touch (or left mouse) gestures are recognized for the first three seconds
//! after the window opens, then the root view stops handling them.

mod config;
mod cube;
mod mesh;
mod scene;

use tumble_engine::device::GpuInit;
use tumble_engine::logging::{LoggingConfig, init_logging};
use tumble_ui::Application;

use crate::config::CubeConfig;
use crate::cube::CubeView;

fn main() {
    init_logging(LoggingConfig::default());

    // Shaded output goes to the surface as-is, without sRGB encoding.
    let gpu_init = GpuInit {
        prefer_srgb: false,
        ..GpuInit::default()
    };

    Application::new()
        .title("Tumble")
        .size(800.0, 600.0)
        .gpu_init(gpu_init)
        .run(CubeView::new(CubeConfig::default()));
}
