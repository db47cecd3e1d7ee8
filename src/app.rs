use std::fmt;
use std::sync::Arc;

use anyhow::Context;
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::*,
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use crate::config::AppConfig;
use crate::core::{FrameClock, Framebuffer};
use crate::gpu::{GraphicsContext, PresentError};
use crate::presenter::Presenter;

/// Where a fatal error happened; each site has its own process exit code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureSite {
    EventLoop,
    Window,
    GraphicsContext,
    ShaderProgram,
    Framebuffer,
    Runtime,
}

impl FailureSite {
    pub const fn exit_code(self) -> u8 {
        match self {
            FailureSite::EventLoop => 2,
            FailureSite::Window => 3,
            FailureSite::GraphicsContext => 4,
            FailureSite::ShaderProgram => 5,
            FailureSite::Framebuffer => 6,
            FailureSite::Runtime => 7,
        }
    }

    /// Startup site for a presenter initialization failure
    pub fn for_initialize(err: &PresentError) -> Self {
        match err {
            PresentError::ShaderCompile { .. } | PresentError::ShaderLink { .. } => FailureSite::ShaderProgram,
            PresentError::Allocation { .. } => FailureSite::Framebuffer,
            _ => FailureSite::GraphicsContext,
        }
    }
}

impl fmt::Display for FailureSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FailureSite::EventLoop => "event loop",
            FailureSite::Window => "window",
            FailureSite::GraphicsContext => "graphics context",
            FailureSite::ShaderProgram => "shader program",
            FailureSite::Framebuffer => "framebuffer",
            FailureSite::Runtime => "render loop",
        };
        f.write_str(name)
    }
}

/// Fatal application error
#[derive(Debug)]
pub struct AppError {
    pub site: FailureSite,
    pub source: anyhow::Error,
}

impl AppError {
    pub fn new(site: FailureSite, source: anyhow::Error) -> Self {
        Self { site, source }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} failure: {:#}", self.site, self.source)
    }
}

/// Open the window and run the render loop until the window closes
pub fn run(config: AppConfig) -> Result<(), AppError> {
    let (width, height) = config.buffer_size;
    let framebuffer = Framebuffer::new(width, height)
        .context("failed to allocate framebuffer")
        .map_err(|e| AppError::new(FailureSite::Framebuffer, e))?;

    let event_loop = EventLoop::new()
        .context("failed to create event loop")
        .map_err(|e| AppError::new(FailureSite::EventLoop, e))?;

    let mut app = App::new(config, framebuffer);
    event_loop
        .run_app(&mut app)
        .context("event loop terminated with error")
        .map_err(|e| AppError::new(FailureSite::EventLoop, e))?;

    match app.failure.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

struct App {
    config: AppConfig,
    framebuffer: Framebuffer,
    window: Option<Arc<Window>>,
    context: Option<GraphicsContext>,
    presenter: Presenter<GraphicsContext>,
    clock: FrameClock,
    close_requested: bool,
    failure: Option<AppError>,
}

impl App {
    fn new(config: AppConfig, framebuffer: Framebuffer) -> Self {
        Self {
            config,
            framebuffer,
            window: None,
            context: None,
            presenter: Presenter::new(),
            clock: FrameClock::new(),
            close_requested: false,
            failure: None,
        }
    }

    fn start(&mut self, event_loop: &ActiveEventLoop) -> Result<(), AppError> {
        let (width, height) = self.config.window_size;
        let window = event_loop
            .create_window(
                Window::default_attributes()
                    .with_title(self.config.title.clone())
                    .with_inner_size(LogicalSize::new(width, height)),
            )
            .context("failed to create window")
            .map_err(|e| AppError::new(FailureSite::Window, e))?;
        let window = Arc::new(window);

        let mut context = pollster::block_on(GraphicsContext::new(window.clone(), &self.config.context))
            .context("failed to initialize graphics context")
            .map_err(|e| AppError::new(FailureSite::GraphicsContext, e))?;

        let (buffer_width, buffer_height) = self.framebuffer.dimensions();
        if let Err(err) = self.presenter.initialize(&mut context, buffer_width, buffer_height) {
            let site = FailureSite::for_initialize(&err);
            return Err(AppError::new(
                site,
                anyhow::Error::new(err).context("failed to initialize presenter"),
            ));
        }

        log::info!("Framebuffer: {}x{}", buffer_width, buffer_height);

        self.window = Some(window);
        self.context = Some(context);
        Ok(())
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: AppError) {
        self.failure = Some(err);
        self.close_requested = true;
        event_loop.exit();
    }

    /// One frame: clear the framebuffer and present it
    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(context) = self.context.as_mut() else {
            return;
        };

        self.clock.tick();
        self.framebuffer.clear(self.config.clear_color);

        match self.presenter.present_frame(context, &self.framebuffer) {
            Ok(_) => {}
            Err(err) if err.is_fatal() => {
                let err = anyhow::Error::new(err).context("failed to present frame");
                self.fail(event_loop, AppError::new(FailureSite::Runtime, err));
            }
            Err(err) => log::warn!("frame {} dropped: {}", self.clock.total_frames(), err),
        }
    }

    /// Release GPU resources before the window goes away
    fn shutdown(&mut self) {
        if let Some(context) = self.context.as_mut() {
            if let Err(err) = self.presenter.shutdown(context) {
                log::debug!("presenter shutdown skipped: {}", err);
            }
        }
        self.context = None;
        self.window = None;
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() || self.close_requested {
            return;
        }

        if let Err(err) = self.start(event_loop) {
            self.fail(event_loop, err);
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => self.close_requested = true,
            WindowEvent::Resized(size) => {
                if let Some(context) = self.context.as_mut() {
                    context.resize(size.width, size.height);
                }
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        // Close is only honoured between frames
        if self.close_requested {
            self.shutdown();
            event_loop.exit();
        } else if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.shutdown();
        log::info!("Rendered {} frames", self.clock.total_frames());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gpu::PresenterState;

    const SITES: [FailureSite; 6] = [
        FailureSite::EventLoop,
        FailureSite::Window,
        FailureSite::GraphicsContext,
        FailureSite::ShaderProgram,
        FailureSite::Framebuffer,
        FailureSite::Runtime,
    ];

    #[test]
    fn test_exit_codes_distinct_and_nonzero() {
        let codes: std::collections::HashSet<u8> = SITES.iter().map(|s| s.exit_code()).collect();
        assert_eq!(codes.len(), SITES.len());
        assert!(!codes.contains(&0));
    }

    #[test]
    fn test_initialize_failure_sites() {
        let compile = PresentError::ShaderCompile {
            label: "x".into(),
            log: "bad".into(),
        };
        let link = PresentError::ShaderLink {
            label: "x".into(),
            log: "bad".into(),
        };
        let context = PresentError::GraphicsContext("no adapter".into());
        let state = PresentError::InvalidState {
            operation: "initialize",
            state: PresenterState::Ready,
        };
        let staging = PresentError::Allocation {
            width: u32::MAX,
            height: u32::MAX,
        };

        assert_eq!(FailureSite::for_initialize(&compile), FailureSite::ShaderProgram);
        assert_eq!(FailureSite::for_initialize(&link), FailureSite::ShaderProgram);
        assert_eq!(FailureSite::for_initialize(&context), FailureSite::GraphicsContext);
        assert_eq!(FailureSite::for_initialize(&state), FailureSite::GraphicsContext);
        assert_eq!(FailureSite::for_initialize(&staging), FailureSite::Framebuffer);
    }

    #[test]
    fn test_app_error_display_includes_chain() {
        let source = anyhow::Error::new(PresentError::OutOfMemory).context("failed to present frame");
        let err = AppError::new(FailureSite::Runtime, source);
        let text = err.to_string();
        assert!(text.starts_with("render loop failure"));
        assert!(text.contains("failed to present frame"));
        assert!(text.contains("surface out of memory"));
    }
}
