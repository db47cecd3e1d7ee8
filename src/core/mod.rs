pub mod clock;
pub mod color;
pub mod framebuffer;
pub mod viewport;

pub use clock::FrameClock;
pub use color::{pack_color, texel, unpack_color, PackedColor};
pub use framebuffer::{Framebuffer, FramebufferError, ARCADE_HEIGHT, ARCADE_WIDTH};
pub use viewport::{letterbox, Viewport};
