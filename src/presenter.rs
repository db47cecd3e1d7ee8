use std::panic::Location;

use crate::core::{letterbox, Framebuffer};
use crate::gpu::{FrameStatus, GraphicsDriver, PresentError, PresenterState, ShaderSource};

/// GPU resources owned while `Ready`
struct Resources<P, T> {
    program: P,
    texture: T,
    width: u32,
    height: u32,
}

enum State<P, T> {
    Uninitialized,
    Ready(Resources<P, T>),
}

/// Presenter - makes a framebuffer visible through a driver's surface.
///
/// Each frame the whole framebuffer replaces the texture contents, then one
/// 3-vertex draw covers the letterboxed viewport and the surface is swapped.
/// GPU errors reported between calls are logged and never abort a frame.
pub struct Presenter<D: GraphicsDriver> {
    state: State<D::Program, D::Texture>,
    staging: Vec<[u8; 4]>,
    diagnostics: u64,
}

impl<D: GraphicsDriver> Presenter<D> {
    pub fn new() -> Self {
        Self {
            state: State::Uninitialized,
            staging: Vec::new(),
            diagnostics: 0,
        }
    }

    pub fn state(&self) -> PresenterState {
        match self.state {
            State::Uninitialized => PresenterState::Uninitialized,
            State::Ready(_) => PresenterState::Ready,
        }
    }

    /// Size of the frame texture, if initialized
    pub fn texture_size(&self) -> Option<(u32, u32)> {
        match &self.state {
            State::Uninitialized => None,
            State::Ready(res) => Some((res.width, res.height)),
        }
    }

    /// Number of driver errors logged so far
    pub fn diagnostics_logged(&self) -> u64 {
        self.diagnostics
    }

    /// Build the program and a `width x height` texture
    pub fn initialize(&mut self, driver: &mut D, width: u32, height: u32) -> Result<(), PresentError> {
        if let State::Ready(_) = self.state {
            return Err(PresentError::InvalidState {
                operation: "initialize",
                state: PresenterState::Ready,
            });
        }
        if width == 0 || height == 0 {
            return Err(PresentError::InvalidDimensions { width, height });
        }
        driver.check_context()?;
        let staging = allocate_staging(width, height)?;

        driver.begin_group();
        let created = Self::create_resources(driver, width, height);
        log_diagnostics(driver, &mut self.diagnostics);

        self.state = State::Ready(created?);
        self.staging = staging;
        log::debug!("presenter ready for {}x{} frames", width, height);
        Ok(())
    }

    /// Upload `framebuffer`, draw it and swap
    pub fn present_frame(&mut self, driver: &mut D, framebuffer: &Framebuffer) -> Result<FrameStatus, PresentError> {
        let State::Ready(res) = &self.state else {
            return Err(PresentError::InvalidState {
                operation: "present a frame",
                state: PresenterState::Uninitialized,
            });
        };

        let expected = (res.width, res.height);
        let actual = framebuffer.dimensions();
        if actual != expected {
            return Err(PresentError::DimensionMismatch { expected, actual });
        }
        framebuffer
            .write_texels(&mut self.staging)
            .map_err(|_| PresentError::DimensionMismatch { expected, actual })?;

        let viewport = letterbox(expected, driver.surface_size());

        driver.begin_group();
        driver.upload_texture(&res.texture, bytemuck::cast_slice(&self.staging), res.width, res.height);
        let status = match viewport {
            Some(viewport) => driver.draw_fullscreen(&res.program, &res.texture, viewport),
            None => Ok(FrameStatus::Skipped),
        };
        if status == Ok(FrameStatus::Drawn) {
            driver.swap();
        }
        log_diagnostics(driver, &mut self.diagnostics);

        status
    }

    /// Release the texture and program
    pub fn shutdown(&mut self, driver: &mut D) -> Result<(), PresentError> {
        let State::Ready(res) = std::mem::replace(&mut self.state, State::Uninitialized) else {
            return Err(PresentError::InvalidState {
                operation: "shut down",
                state: PresenterState::Uninitialized,
            });
        };

        driver.begin_group();
        driver.release_texture(res.texture);
        driver.release_program(res.program);
        log_diagnostics(driver, &mut self.diagnostics);

        self.staging = Vec::new();
        Ok(())
    }

    fn create_resources(
        driver: &mut D,
        width: u32,
        height: u32,
    ) -> Result<Resources<D::Program, D::Texture>, PresentError> {
        let program = driver.compile_program(&ShaderSource::fullscreen_triangle())?;
        match driver.create_texture(&program, width, height) {
            Ok(texture) => Ok(Resources {
                program,
                texture,
                width,
                height,
            }),
            Err(err) => {
                driver.release_program(program);
                Err(err)
            }
        }
    }
}

impl<D: GraphicsDriver> Default for Presenter<D> {
    fn default() -> Self {
        Self::new()
    }
}

/// Zeroed texel staging, reporting allocation failure instead of aborting
fn allocate_staging(width: u32, height: u32) -> Result<Vec<[u8; 4]>, PresentError> {
    let allocation = PresentError::Allocation { width, height };
    let len = (width as usize)
        .checked_mul(height as usize)
        .ok_or_else(|| allocation.clone())?;

    let mut staging = Vec::new();
    staging.try_reserve_exact(len).map_err(|_| allocation)?;
    staging.resize(len, [0; 4]);
    Ok(staging)
}

/// Drain the driver's error queue, logging each entry with the call site
#[track_caller]
fn log_diagnostics<D: GraphicsDriver>(driver: &mut D, counter: &mut u64) {
    let location = Location::caller();
    for diag in driver.drain_errors() {
        log::warn!(
            "{} - {}:{}: {}",
            diag.kind,
            location.file(),
            location.line(),
            diag.description
        );
        *counter += 1;
    }
}
