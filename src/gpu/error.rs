use std::fmt;

/// Category of an entry drained from the GPU error queue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GpuErrorKind {
    OutOfMemory,
    Validation,
    Internal,
    Unknown,
}

impl GpuErrorKind {
    pub const ALL: [GpuErrorKind; 4] = [
        GpuErrorKind::OutOfMemory,
        GpuErrorKind::Validation,
        GpuErrorKind::Internal,
        GpuErrorKind::Unknown,
    ];

    /// Diagnostic name printed in logs
    pub const fn as_str(self) -> &'static str {
        match self {
            GpuErrorKind::OutOfMemory => "OUT_OF_MEMORY",
            GpuErrorKind::Validation => "VALIDATION",
            GpuErrorKind::Internal => "INTERNAL",
            GpuErrorKind::Unknown => "UNKNOWN_ERROR",
        }
    }
}

impl fmt::Display for GpuErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One error reported by the graphics driver
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GpuDiagnostic {
    pub kind: GpuErrorKind,
    pub description: String,
}

impl GpuDiagnostic {
    pub fn new(kind: GpuErrorKind, description: impl Into<String>) -> Self {
        Self {
            kind,
            description: description.into(),
        }
    }
}

impl From<wgpu::Error> for GpuDiagnostic {
    fn from(err: wgpu::Error) -> Self {
        let kind = match &err {
            wgpu::Error::OutOfMemory { .. } => GpuErrorKind::OutOfMemory,
            wgpu::Error::Validation { .. } => GpuErrorKind::Validation,
            wgpu::Error::Internal { .. } => GpuErrorKind::Internal,
            #[allow(unreachable_patterns)]
            _ => GpuErrorKind::Unknown,
        };
        Self::new(kind, err.to_string())
    }
}

impl fmt::Display for GpuDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.description)
    }
}

/// Lifecycle state of a presenter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresenterState {
    Uninitialized,
    Ready,
}

impl fmt::Display for PresenterState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PresenterState::Uninitialized => f.write_str("uninitialized"),
            PresenterState::Ready => f.write_str("ready"),
        }
    }
}

/// Presentation failures
#[derive(Debug, Clone, PartialEq)]
pub enum PresentError {
    /// No usable surface, adapter or device, or the device was lost
    GraphicsContext(String),
    /// Shader stage rejected by the driver
    ShaderCompile { label: String, log: String },
    /// Stages compiled but could not be linked into a pipeline
    ShaderLink { label: String, log: String },
    /// Operation not valid in the presenter's current state
    InvalidState {
        operation: &'static str,
        state: PresenterState,
    },
    /// Texture dimensions must be positive and within the device limit
    InvalidDimensions { width: u32, height: u32 },
    /// Framebuffer does not match the texture the presenter was built for
    DimensionMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },
    /// Host-side staging for a `width x height` frame could not be allocated
    Allocation { width: u32, height: u32 },
    /// Surface could not allocate its next frame
    OutOfMemory,
}

impl PresentError {
    /// Fatal errors end the render loop; everything else costs at most one frame
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            PresentError::GraphicsContext(_)
                | PresentError::ShaderCompile { .. }
                | PresentError::ShaderLink { .. }
                | PresentError::OutOfMemory
        )
    }
}

impl fmt::Display for PresentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PresentError::GraphicsContext(msg) => write!(f, "graphics context error: {}", msg),
            PresentError::ShaderCompile { label, log } => {
                write!(f, "failed to compile shader '{}': {}", label, log)
            }
            PresentError::ShaderLink { label, log } => {
                write!(f, "failed to link program '{}': {}", label, log)
            }
            PresentError::InvalidState { operation, state } => {
                write!(f, "cannot {} while presenter is {}", operation, state)
            }
            PresentError::InvalidDimensions { width, height } => {
                write!(f, "unsupported texture dimensions {}x{}", width, height)
            }
            PresentError::DimensionMismatch { expected, actual } => write!(
                f,
                "framebuffer {}x{} does not match texture {}x{}",
                actual.0, actual.1, expected.0, expected.1
            ),
            PresentError::Allocation { width, height } => {
                write!(f, "failed to allocate staging for {}x{} frames", width, height)
            }
            PresentError::OutOfMemory => f.write_str("surface out of memory"),
        }
    }
}

impl std::error::Error for PresentError {}
