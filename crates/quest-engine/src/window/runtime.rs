use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::coords::ColorRgba;
use crate::device::{Gpu, GpuInit};
use crate::error::{RenderError, RenderResult};
use crate::render::{FrameStats, ShapeRenderer};
use crate::scene::{ShapeList, presets};

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
    pub clear: ColorRgba,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "quest".to_string(),
            initial_size: LogicalSize::new(800.0, 800.0),
            clear: presets::CLEAR_COLOR,
        }
    }
}

impl RuntimeConfig {
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.initial_size = LogicalSize::new(width, height);
        self
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens one window, sets up `scene` and renders it once.
    ///
    /// The window stays open until closed. A setup or render failure is shown
    /// in the window title and returned once the loop ends.
    pub fn run(config: RuntimeConfig, gpu_init: GpuInit, scene: ShapeList) -> Result<()> {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState::new(config, gpu_init, scene);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        state.into_outcome()
    }
}

#[self_referencing]
struct WindowEntry {
    rendered: bool,

    window: Window,

    #[borrows(window)]
    #[covariant]
    renderer: RenderResult<ShapeRenderer<'this>>,
}

struct AppState {
    config: RuntimeConfig,
    gpu_init: GpuInit,
    scene: ShapeList,

    entry: Option<WindowEntry>,
    failure: Option<anyhow::Error>,
}

impl AppState {
    fn new(config: RuntimeConfig, gpu_init: GpuInit, scene: ShapeList) -> Self {
        Self {
            config,
            gpu_init,
            scene,
            entry: None,
            failure: None,
        }
    }

    fn create_window_entry(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let gpu_init = self.gpu_init.clone();
        let scene = self.scene.clone();
        let clear = self.config.clear;

        let entry = WindowEntryBuilder {
            rendered: false,
            window,
            renderer_builder: |w| {
                pollster::block_on(Gpu::new(w, gpu_init))
                    .and_then(|gpu| ShapeRenderer::setup(gpu, &scene))
                    .map(|r| r.with_clear_color(clear))
            },
        }
        .build();

        if let Err(err) = entry.borrow_renderer() {
            self.report(entry.borrow_window(), err.clone());
        }

        entry.with_window(|w| w.request_redraw());
        self.entry = Some(entry);
        Ok(())
    }

    /// Surfaces a fatal error: logged, and written into the window title.
    fn report(&mut self, window: &Window, err: RenderError) {
        log::error!("{err}");
        window.set_title(&format!("{} - error: {err}", self.config.title));
        self.record_failure(anyhow::Error::new(err).context("rendering failed"));
    }

    /// Keeps the first failure; later ones are consequences of it.
    fn record_failure(&mut self, err: anyhow::Error) {
        if self.failure.is_none() {
            self.failure = Some(err);
        }
    }

    fn into_outcome(self) -> Result<()> {
        match self.failure {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn render_once(&mut self) {
        let Some(entry) = self.entry.as_mut() else { return };
        if *entry.borrow_rendered() {
            return;
        }

        let outcome = entry.with_mut(|fields| {
            *fields.rendered = true;
            let window = fields.window;
            draw_if_ready(fields.renderer, || window.pre_present_notify())
        });

        match outcome {
            Some(Ok(stats)) => {
                log::info!("Rendering complete. ({} draws in {} pass)", stats.draws, stats.passes);
            }
            Some(Err(err)) => {
                if let Some(entry) = self.entry.take() {
                    self.report(entry.borrow_window(), err);
                    self.entry = Some(entry);
                }
            }
            None => {}
        }
    }
}

/// Renders the frame when setup succeeded. A failed setup was already
/// reported, so nothing is drawn and `before_present` is not called.
fn draw_if_ready(
    renderer: &mut RenderResult<ShapeRenderer<'_>>,
    before_present: impl FnOnce(),
) -> Option<RenderResult<FrameStats>> {
    let renderer = renderer.as_mut().ok()?;
    before_present();
    Some(renderer.render_once())
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.entry.is_some() {
            return;
        }

        if let Err(e) = self.create_window_entry(event_loop) {
            log::error!("{e:#}");
            self.record_failure(e);
            event_loop.exit();
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        // One frame only; nothing to animate.
        event_loop.set_control_flow(ControlFlow::Wait);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                self.entry = None;
                event_loop.exit();
            }

            WindowEvent::Resized(new_size) => {
                if let Some(entry) = self.entry.as_mut() {
                    entry.with_renderer_mut(|r| {
                        if let Ok(r) = r {
                            r.gpu_mut().resize(new_size);
                        }
                    });
                }
            }

            WindowEvent::RedrawRequested => self.render_once(),

            _ => {}
        }
    }
}
