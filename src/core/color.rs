/// Packed pixel color: `R<<24 | G<<16 | B<<8 | A`
pub type PackedColor = u32;

/// Alpha lane value. Blending is never used, so every packed color is opaque.
pub const OPAQUE_ALPHA: u8 = 255;

pub const BLACK: PackedColor = pack_color(0, 0, 0);
pub const WHITE: PackedColor = pack_color(255, 255, 255);
/// Background color of the arcade playfield
pub const ARCADE_GREEN: PackedColor = pack_color(0, 128, 0);

/// Pack three 8-bit channels into a single pixel value.
///
/// Red, green and blue occupy the three most-significant byte lanes, the
/// least-significant lane always holds [`OPAQUE_ALPHA`].
pub const fn pack_color(r: u8, g: u8, b: u8) -> PackedColor {
    ((r as u32) << 24) | ((g as u32) << 16) | ((b as u32) << 8) | OPAQUE_ALPHA as u32
}

/// Recover the red, green and blue channels of a packed color
pub const fn unpack_color(color: PackedColor) -> (u8, u8, u8) {
    ((color >> 24) as u8, (color >> 16) as u8, (color >> 8) as u8)
}

/// Byte lanes of a packed color in R, G, B, A order, as an `Rgba8Unorm` texel
#[inline]
pub const fn texel(color: PackedColor) -> [u8; 4] {
    color.to_be_bytes()
}
