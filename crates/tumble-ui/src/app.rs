use std::time::Duration;

use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::window::WindowId;

use tumble_engine::core::{App as EngineApp, AppControl, FrameCtx};
use tumble_engine::device::GpuInit;
use tumble_engine::input::TouchEvent;
use tumble_engine::time::FrameTime;
use tumble_engine::window::{Runtime, RuntimeConfig};

use crate::gate::DEFAULT_GESTURE_WINDOW;
use crate::gesture::GestureConfig;
use crate::surface::{FrameLoop, FrameStep, SurfaceView};
use crate::view::RootView;

// ── Application ───────────────────────────────────────────────────────────

/// Top-level application builder.
///
/// Configure the window and the root view's gesture handling, then start the
/// event loop with [`run`](Self::run), passing the surface content.
///
/// ```rust,ignore
/// Application::new()
///     .title("Tumble")
///     .gesture_window(Duration::from_secs(3))
///     .run(MySurface::default());
/// ```
pub struct Application {
    title: String,
    width: f64,
    height: f64,
    gesture_window: Duration,
    gestures: GestureConfig,
    gpu_init: GpuInit,
}

impl Application {
    pub fn new() -> Self {
        Self {
            title: "tumble".to_string(),
            width: 800.0,
            height: 600.0,
            gesture_window: DEFAULT_GESTURE_WINDOW,
            gestures: GestureConfig::default(),
            gpu_init: GpuInit::default(),
        }
    }

    /// Set the window title.
    pub fn title(mut self, t: impl Into<String>) -> Self {
        self.title = t.into();
        self
    }

    /// Set the initial window size in logical pixels.
    pub fn size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// How long gesture handlers stay attached after the root view mounts.
    pub fn gesture_window(mut self, window: Duration) -> Self {
        self.gesture_window = window;
        self
    }

    /// Callbacks for the root view's gesture recognizer. Empty by default.
    pub fn gestures(mut self, config: GestureConfig) -> Self {
        self.gestures = config;
        self
    }

    pub fn gpu_init(mut self, init: GpuInit) -> Self {
        self.gpu_init = init;
        self
    }

    /// Start the event loop with `surface` as the full-screen content.
    ///
    /// This never returns.
    pub fn run<S: SurfaceView>(self, surface: S) -> ! {
        let config = RuntimeConfig {
            title: self.title,
            initial_size: LogicalSize::new(self.width, self.height),
        };
        let state = UiAppState::new(RootView::new(self.gestures, self.gesture_window), surface);

        if let Err(e) = Runtime::run(config, self.gpu_init, state) {
            eprintln!("tumble runtime error: {e:#}");
            std::process::exit(1);
        }
        std::process::exit(0);
    }
}

impl Default for Application {
    fn default() -> Self {
        Self::new()
    }
}

// ── UiAppState ────────────────────────────────────────────────────────────

/// Internal state that implements `tumble_engine::core::App`.
struct UiAppState<S: SurfaceView> {
    root: RootView,
    surface: S,
    frame_loop: FrameLoop,
}

impl<S: SurfaceView> UiAppState<S> {
    fn new(root: RootView, surface: S) -> Self {
        Self {
            root,
            surface,
            frame_loop: FrameLoop::new(),
        }
    }

    /// Everything a frame does before drawing: mount and update the root
    /// view, route this frame's touches, create the surface context on the
    /// first frame (through `create_context`), then update the surface.
    ///
    /// `None` once the loop has stopped; nothing is called in that case.
    fn advance<F>(
        &mut self,
        time: &FrameTime,
        touches: &[TouchEvent],
        create_context: F,
    ) -> Option<FrameStep>
    where
        F: FnOnce(&mut S),
    {
        let step = self.frame_loop.begin_frame()?;

        self.root.mount(time.now);
        self.root.update(time.now);

        for touch in touches {
            self.root.dispatch_touch(touch);
        }

        if step == FrameStep::CreateContext {
            create_context(&mut self.surface);
        }

        self.surface.update(time);
        Some(step)
    }
}

impl<S: SurfaceView> EngineApp for UiAppState<S> {
    fn on_window_event(&mut self, _window_id: WindowId, event: &WindowEvent) -> AppControl {
        if matches!(event, WindowEvent::CloseRequested | WindowEvent::Destroyed) {
            self.frame_loop.stop();
        }
        AppControl::Continue
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let step = self.advance(&ctx.time, &ctx.input_frame.touches, |surface| {
            let rctx = ctx.render_ctx();
            log::info!("surface context created ({}x{})", rctx.width, rctx.height);
            surface.on_context_create(&rctx);
        });
        if step.is_none() {
            return AppControl::Exit;
        }

        let clear = self.surface.clear_color();
        let surface = &mut self.surface;
        let control = ctx.render(clear, |rctx, target| surface.render(rctx, target));

        if control == AppControl::Exit {
            self.frame_loop.stop();
        }
        control
    }
}
