pub mod app;
pub mod cli;
pub mod config;
pub mod core;
pub mod gpu;
pub mod logging;
pub mod presenter;

pub use crate::core::{pack_color, Framebuffer, FramebufferError};
pub use gpu::{FrameStatus, GraphicsContext, GraphicsDriver, PresentError};
pub use presenter::Presenter;
