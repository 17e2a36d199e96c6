use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalSize};
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::core::{App as CoreApp, AppControl, FrameCtx, WindowCtx};
use crate::device::{Gpu, GpuInit};
use crate::input::platform::translate_window_event;
use crate::input::{InputFrame, InputState};
use crate::time::FrameClock;

/// Window configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "tumble".to_string(),
            initial_size: LogicalSize::new(800.0, 600.0),
        }
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens one window and drives `app` until the window closes or a callback
    /// returns [`AppControl::Exit`].
    ///
    /// Errors raised while the loop is running (window or GPU setup) end the
    /// loop and are returned here.
    pub fn run<A>(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Result<()>
    where
        A: 'static + CoreApp,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut host = Host::new(config, gpu_init, app);

        event_loop
            .run_app(&mut host)
            .context("winit event loop terminated with error")?;

        match host.fatal.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

/// The window together with everything borrowed from it.
#[self_referencing]
struct Surface {
    input_state: InputState,
    input_frame: InputFrame,
    clock: FrameClock,

    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

impl Surface {
    fn open(event_loop: &ActiveEventLoop, config: &RuntimeConfig, gpu_init: GpuInit) -> Result<Self> {
        let attrs = Window::default_attributes()
            .with_title(config.title.clone())
            .with_inner_size(config.initial_size);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        SurfaceTryBuilder {
            input_state: InputState::default(),
            input_frame: InputFrame::default(),
            clock: FrameClock::default(),
            window,
            gpu_builder: |w| pollster::block_on(Gpu::new(w, gpu_init)),
        }
        .try_build()
        .context("GPU initialization failed for window")
    }

    fn id(&self) -> WindowId {
        self.with_window(|w| w.id())
    }

    fn request_redraw(&self) {
        self.with_window(|w| w.request_redraw());
    }

    fn resize(&mut self, size: PhysicalSize<u32>) {
        self.with_gpu_mut(|gpu| gpu.resize(size));
        self.request_redraw();
    }

    /// Runs one frame of `app`, then drops this frame's input deltas.
    fn redraw<A: CoreApp>(&mut self, id: WindowId, app: &mut A) -> AppControl {
        self.with_mut(|fields| {
            let time = fields.clock.tick();
            let control = {
                let mut ctx = FrameCtx {
                    window: WindowCtx {
                        id,
                        window: fields.window,
                    },
                    gpu: fields.gpu,
                    input: fields.input_state,
                    input_frame: fields.input_frame,
                    time,
                };
                app.on_frame(&mut ctx)
            };
            fields.input_frame.clear();
            control
        })
    }
}

struct Host<A>
where
    A: CoreApp + 'static,
{
    config: RuntimeConfig,
    gpu_init: GpuInit,
    app: A,

    /// `None` until the platform resumes us, and again once the window closes.
    surface: Option<Surface>,
    exiting: bool,

    /// Failure that ended the loop early; returned from `Runtime::run`.
    fatal: Option<anyhow::Error>,
}

impl<A> Host<A>
where
    A: CoreApp + 'static,
{
    fn new(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Self {
        Self {
            config,
            gpu_init,
            app,
            surface: None,
            exiting: false,
            fatal: None,
        }
    }

    fn exit(&mut self, event_loop: &ActiveEventLoop) {
        self.exiting = true;
        event_loop.exit();
    }

    /// Drops the window and its GPU resources, which ends the frame loop.
    fn close(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(surface) = self.surface.take() {
            log::debug!("window {:?} closed; frame loop stopped", surface.id());
        }
        self.exit(event_loop);
    }
}

impl<A> ApplicationHandler for Host<A>
where
    A: CoreApp + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.surface.is_some() || self.exiting {
            return;
        }

        match Surface::open(event_loop, &self.config, self.gpu_init.clone()) {
            Ok(surface) => {
                surface.request_redraw();
                self.surface = Some(surface);
            }
            Err(e) => {
                log::error!("failed to create window: {e:#}");
                self.fatal = Some(e);
                self.exit(event_loop);
            }
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exiting {
            event_loop.exit();
            return;
        }

        event_loop.set_control_flow(ControlFlow::Wait);

        // Continuous redraw: the next frame is scheduled after every event batch.
        if let Some(surface) = &self.surface {
            surface.request_redraw();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.exiting {
            event_loop.exit();
            return;
        }

        let (app, surface) = (&mut self.app, &mut self.surface);
        let Some(surface) = surface.as_mut().filter(|s| s.id() == window_id) else {
            return;
        };

        let control = surface.with_mut(|fields| {
            if let Some(ev) = translate_window_event(fields.window, fields.input_state, &event) {
                fields.input_state.apply_event(fields.input_frame, ev);
            }
            app.on_window_event(window_id, &event)
        });

        if control == AppControl::Exit {
            self.close(event_loop);
            return;
        }

        match event {
            WindowEvent::CloseRequested | WindowEvent::Destroyed => self.close(event_loop),

            WindowEvent::Resized(size) => surface.resize(size),

            WindowEvent::ScaleFactorChanged { .. } => {
                let size = surface.with_window(|w| w.inner_size());
                surface.resize(size);
            }

            WindowEvent::RedrawRequested => {
                if surface.redraw(window_id, app) == AppControl::Exit {
                    self.close(event_loop);
                }
            }

            _ => {}
        }
    }
}
