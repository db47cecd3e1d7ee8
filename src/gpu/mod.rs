pub mod context;
pub mod driver;
pub mod error;
pub mod shader;

pub use context::{check_texture_size, ContextOptions, GraphicsContext};
pub use driver::{FrameStatus, GraphicsDriver};
pub use error::{GpuDiagnostic, GpuErrorKind, PresentError, PresenterState};
pub use shader::{fullscreen_vertex, ShaderSource, FULLSCREEN_VERTEX_COUNT};
