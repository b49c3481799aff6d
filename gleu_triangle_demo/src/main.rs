/// GLEU triangle demo
///
/// Opens a window, creates a GL ES 2.0 context (desktop GL 2.1 as fallback) and
/// lets `TriangleViewController` draw a white triangle on every redraw.

use std::num::NonZeroU32;

use anyhow::{anyhow, Context as _, Result};
use gleu::log::FacadeLogger;
use gleu::{Config, TriangleConfig, TriangleViewController, ViewController};
use gleu_renderer_glow::GlowGraphicsDevice;
use glutin::config::{ConfigTemplateBuilder, GlConfig};
use glutin::context::{
    ContextApi, ContextAttributesBuilder, NotCurrentGlContext, PossiblyCurrentContext, Version,
};
use glutin::display::{GetGlDisplay, GlDisplay};
use glutin::surface::{GlSurface, Surface, SwapInterval, WindowSurface};
use glutin_winit::{DisplayBuilder, GlWindow};
use raw_window_handle::HasWindowHandle;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

/// Window settings
#[derive(Debug, Clone)]
struct DemoConfig {
    title: String,
    width: u32,
    height: u32,
    vsync: bool,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            title: "OpenGL Triangle".to_string(),
            width: 800,
            height: 600,
            vsync: true,
        }
    }
}

/// Everything that only exists while the window is alive
///
/// Field order is drop order: GL resources go before the context that owns them.
struct GlState {
    controller: TriangleViewController<GlowGraphicsDevice>,
    surface: Surface<WindowSurface>,
    context: PossiblyCurrentContext,
    window: Window,
}

struct TriangleApp {
    config: DemoConfig,
    state: Option<GlState>,
    failure: Option<anyhow::Error>,
}

impl TriangleApp {
    fn new(config: DemoConfig) -> Self {
        Self {
            config,
            state: None,
            failure: None,
        }
    }

    fn create_gl_state(&self, event_loop: &ActiveEventLoop) -> Result<GlState> {
        let window_attributes = Window::default_attributes()
            .with_title(self.config.title.as_str())
            .with_inner_size(LogicalSize::new(self.config.width, self.config.height));

        let template = ConfigTemplateBuilder::new().with_alpha_size(8);
        let (window, gl_config) = DisplayBuilder::new()
            .with_window_attributes(Some(window_attributes))
            .build(event_loop, template, |configs| {
                // glutin reports an empty config list as an error from `build`
                // before calling the picker, so there is always a candidate.
                most_samples(configs, |config| config.num_samples())
                    .expect("glutin handed the picker an empty config list")
            })
            .map_err(|e| anyhow!("failed to create window: {e}"))?;
        let window = window.context("display builder returned no window")?;

        let raw_handle = window
            .window_handle()
            .context("window has no native handle")?
            .as_raw();
        let gl_display = gl_config.display();

        let gles = ContextAttributesBuilder::new()
            .with_context_api(ContextApi::Gles(Some(Version::new(2, 0))))
            .build(Some(raw_handle));
        let desktop = ContextAttributesBuilder::new()
            .with_context_api(ContextApi::OpenGl(Some(Version::new(2, 1))))
            .build(Some(raw_handle));

        let not_current = unsafe {
            gl_display.create_context(&gl_config, &gles).or_else(|e| {
                log::info!("GL ES 2.0 unavailable ({e}), falling back to desktop GL 2.1");
                gl_display.create_context(&gl_config, &desktop)
            })
        }
        .context("failed to create GL context")?;

        let surface_attributes = window
            .build_surface_attributes(Default::default())
            .context("failed to describe window surface")?;
        let surface = unsafe { gl_display.create_window_surface(&gl_config, &surface_attributes) }
            .context("failed to create window surface")?;
        let context = not_current
            .make_current(&surface)
            .context("failed to make GL context current")?;

        let interval = if self.config.vsync {
            SwapInterval::Wait(NonZeroU32::MIN)
        } else {
            SwapInterval::DontWait
        };
        if let Err(e) = surface.set_swap_interval(&context, interval) {
            log::warn!("failed to set swap interval: {e}");
        }

        let gl = unsafe { glow::Context::from_loader_function_cstr(|name| gl_display.get_proc_address(name)) };

        let device_config = Config {
            app_name: self.config.title.clone(),
            ..Config::default()
        };
        let device = GlowGraphicsDevice::new(gl, &device_config)?;
        let mut controller = TriangleViewController::new(device, device_config, TriangleConfig::default());
        controller.setup()?;

        let size = window.inner_size();
        controller.resize(size.width, size.height)?;

        gleu::gleu_info!("gleu::demo", "Window ready ({}x{})", size.width, size.height);

        Ok(GlState {
            controller,
            surface,
            context,
            window,
        })
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: anyhow::Error) {
        log::error!("{error:#}");
        self.failure = Some(error);
        event_loop.exit();
    }
}

/// Candidate with the highest sample count (first one wins ties)
fn most_samples<C>(configs: impl Iterator<Item = C>, samples: impl Fn(&C) -> u8) -> Option<C> {
    configs.reduce(|best, candidate| {
        if samples(&candidate) > samples(&best) {
            candidate
        } else {
            best
        }
    })
}

impl ApplicationHandler for TriangleApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }

        match self.create_gl_state(event_loop) {
            Ok(state) => {
                state.window.request_redraw();
                self.state = Some(state);
            }
            Err(e) => self.fail(event_loop, e),
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        let Some(state) = self.state.as_mut() else {
            return;
        };

        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => event_loop.exit(),

            WindowEvent::Resized(size) => {
                // Minimized windows report 0x0
                if let (Some(width), Some(height)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height)) {
                    state.surface.resize(&state.context, width, height);
                    if let Err(e) = state.controller.resize(width.get(), height.get()) {
                        log::warn!("resize failed: {e}");
                    }
                }
            }

            WindowEvent::RedrawRequested => {
                if let Err(e) = state.controller.render_frame() {
                    self.fail(event_loop, e.into());
                    return;
                }
                if let Err(e) = state.surface.swap_buffers(&state.context) {
                    self.fail(event_loop, anyhow!("failed to swap buffers: {e}"));
                    return;
                }
                state.window.request_redraw();
            }

            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        // Release GL objects while the context is still current
        self.state = None;
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    gleu::log::set_logger(FacadeLogger);

    let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
    let mut app = TriangleApp::new(DemoConfig::default());

    event_loop
        .run_app(&mut app)
        .context("winit event loop terminated with error")?;

    match app.failure.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
