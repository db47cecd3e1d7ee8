use std::fmt;

use super::color::{texel, PackedColor};

/// Arcade virtual resolution (the cabinet monitor is rotated, hence portrait)
pub const ARCADE_WIDTH: u32 = 224;
pub const ARCADE_HEIGHT: u32 = 256;

/// Framebuffer failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FramebufferError {
    /// Width or height was zero
    EmptyDimensions { width: u32, height: u32 },
    /// Pixel storage could not be obtained
    Allocation { width: u32, height: u32 },
    /// Coordinate outside `[0, width) x [0, height)`
    OutOfBounds { x: u32, y: u32, width: u32, height: u32 },
    /// Destination slice length differs from the pixel count
    LengthMismatch { expected: usize, actual: usize },
}

impl fmt::Display for FramebufferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyDimensions { width, height } => {
                write!(f, "framebuffer dimensions {}x{} must be positive", width, height)
            }
            Self::Allocation { width, height } => {
                write!(f, "failed to allocate {}x{} framebuffer", width, height)
            }
            Self::OutOfBounds { x, y, width, height } => {
                write!(f, "pixel ({}, {}) outside {}x{} framebuffer", x, y, width, height)
            }
            Self::LengthMismatch { expected, actual } => {
                write!(f, "expected {} texels, got {}", expected, actual)
            }
        }
    }
}

impl std::error::Error for FramebufferError {}

/// CPU-side frame: row-major grid of packed colors.
///
/// Row 0 is the bottom scanline on screen. Storage is released on drop and the
/// dimensions never change after creation.
#[derive(Clone, PartialEq, Eq)]
pub struct Framebuffer {
    pixels: Vec<PackedColor>,
    width: u32,
    height: u32,
}

impl Framebuffer {
    /// Allocate a `width * height` framebuffer with every pixel zeroed
    pub fn new(width: u32, height: u32) -> Result<Self, FramebufferError> {
        if width == 0 || height == 0 {
            return Err(FramebufferError::EmptyDimensions { width, height });
        }

        let allocation = FramebufferError::Allocation { width, height };
        let len = (width as usize)
            .checked_mul(height as usize)
            .ok_or_else(|| allocation.clone())?;

        let mut pixels = Vec::new();
        pixels.try_reserve_exact(len).map_err(|_| allocation)?;
        pixels.resize(len, 0);

        Ok(Self { pixels, width, height })
    }

    /// Framebuffer at the arcade resolution
    pub fn arcade() -> Result<Self, FramebufferError> {
        Self::new(ARCADE_WIDTH, ARCADE_HEIGHT)
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Number of pixels
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    pub fn pixels(&self) -> &[PackedColor] {
        &self.pixels
    }

    /// Fill every pixel with `color`
    pub fn clear(&mut self, color: PackedColor) {
        self.pixels.fill(color);
    }

    /// Write one pixel. Coordinates are never clamped or wrapped.
    pub fn set_pixel(&mut self, x: u32, y: u32, color: PackedColor) -> Result<(), FramebufferError> {
        let idx = self.index(x, y)?;
        self.pixels[idx] = color;
        Ok(())
    }

    pub fn pixel(&self, x: u32, y: u32) -> Result<PackedColor, FramebufferError> {
        self.index(x, y).map(|idx| self.pixels[idx])
    }

    /// Convert every pixel into its R, G, B, A byte lanes
    pub fn write_texels(&self, out: &mut [[u8; 4]]) -> Result<(), FramebufferError> {
        if out.len() != self.pixels.len() {
            return Err(FramebufferError::LengthMismatch {
                expected: self.pixels.len(),
                actual: out.len(),
            });
        }

        for (dst, &src) in out.iter_mut().zip(&self.pixels) {
            *dst = texel(src);
        }
        Ok(())
    }

    fn index(&self, x: u32, y: u32) -> Result<usize, FramebufferError> {
        if x >= self.width || y >= self.height {
            return Err(FramebufferError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(y as usize * self.width as usize + x as usize)
    }
}

impl fmt::Debug for Framebuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Framebuffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}
