use crate::core::Viewport;

use super::error::{GpuDiagnostic, PresentError};
use super::shader::ShaderSource;

/// Result of a single draw request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStatus {
    /// Frame was drawn and is ready to be swapped
    Drawn,
    /// Nothing to draw into this frame (minimised window, surface reconfigured)
    Skipped,
}

/// Graphics driver - compiles programs, owns textures and draws to a surface.
///
/// All calls happen on the thread that owns the surface.
pub trait GraphicsDriver {
    /// Compiled and linked program
    type Program;
    /// Texture bound to a program's sampler slot
    type Texture;

    /// Fail if no usable context is current (device lost, surface gone)
    fn check_context(&self) -> Result<(), PresentError>;

    /// Compile both stages and link them into a program
    fn compile_program(&mut self, source: &ShaderSource) -> Result<Self::Program, PresentError>;

    /// Create a `width x height` RGBA8 texture sampled by `program`
    fn create_texture(
        &mut self,
        program: &Self::Program,
        width: u32,
        height: u32,
    ) -> Result<Self::Texture, PresentError>;

    /// Replace the entire texture contents
    fn upload_texture(&mut self, texture: &Self::Texture, texels: &[u8], width: u32, height: u32);

    /// Draw the 3-vertex full-screen triangle into `viewport`
    fn draw_fullscreen(
        &mut self,
        program: &Self::Program,
        texture: &Self::Texture,
        viewport: Viewport,
    ) -> Result<FrameStatus, PresentError>;

    /// Present the last drawn frame
    fn swap(&mut self);

    /// Current surface size in physical pixels
    fn surface_size(&self) -> (u32, u32);

    /// Start capturing errors for a group of calls
    fn begin_group(&mut self);

    /// Errors captured since the matching `begin_group`
    fn drain_errors(&mut self) -> Vec<GpuDiagnostic>;

    fn release_texture(&mut self, texture: Self::Texture);

    fn release_program(&mut self, program: Self::Program);
}
