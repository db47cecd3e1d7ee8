use space_invaders::core::color::{pack_color, unpack_color, OPAQUE_ALPHA};
use space_invaders::core::{Framebuffer, FramebufferError, ARCADE_HEIGHT, ARCADE_WIDTH};

// Varied dimensions: degenerate strips, odd sizes, arcade resolution
const DIMENSIONS: [(u32, u32); 9] = [
    (1, 1),
    (1, 17),
    (17, 1),
    (2, 3),
    (7, 5),
    (31, 29),
    (64, 64),
    (160, 144),
    (ARCADE_WIDTH, ARCADE_HEIGHT),
];

const COLORS: [u32; 5] = [0, 0x0080_00FF, 0xFFFF_FFFF, 0x1234_5678, 0xDEAD_BEEF];

// ============================================================================
// PackColor
// ============================================================================

#[test]
fn test_pack_color_deterministic_with_opaque_low_byte() {
    for r in 0..=255u8 {
        for g in 0..=255u8 {
            for b in [0u8, 1, 127, 128, 254, 255] {
                let first = pack_color(r, g, b);
                assert_eq!(first, pack_color(r, g, b));
                assert_eq!(first & 0xFF, OPAQUE_ALPHA as u32);
                assert_eq!(unpack_color(first), (r, g, b));
            }
        }
    }
}

#[test]
fn test_pack_color_channel_lanes() {
    assert_eq!(pack_color(0xFF, 0, 0), 0xFF00_00FF);
    assert_eq!(pack_color(0, 0xFF, 0), 0x00FF_00FF);
    assert_eq!(pack_color(0, 0, 0xFF), 0x0000_FFFF);
}

// ============================================================================
// Create / Clear
// ============================================================================

#[test]
fn test_create_allocates_exact_pixel_count() {
    for (w, h) in DIMENSIONS {
        let fb = Framebuffer::new(w, h).unwrap();
        assert_eq!(fb.len(), (w * h) as usize);
        assert_eq!(fb.pixels().len(), (w * h) as usize);
        assert_eq!(fb.dimensions(), (w, h));
    }
}

#[test]
fn test_clear_is_total() {
    for (w, h) in DIMENSIONS {
        let mut fb = Framebuffer::new(w, h).unwrap();
        for color in COLORS {
            fb.clear(color);
            assert!(fb.pixels().iter().all(|&p| p == color));
            for y in 0..h {
                for x in 0..w {
                    assert_eq!(fb.pixel(x, y), Ok(color));
                }
            }
        }
    }
}

#[test]
fn test_clear_is_idempotent() {
    for (w, h) in DIMENSIONS {
        let mut once = Framebuffer::new(w, h).unwrap();
        once.clear(0x1234_5678);

        let mut twice = once.clone();
        twice.clear(0x1234_5678);

        assert_eq!(once, twice);
    }
}

#[test]
fn test_clear_overwrites_previous_writes() {
    let mut fb = Framebuffer::new(8, 8).unwrap();
    fb.set_pixel(3, 4, pack_color(255, 0, 0)).unwrap();
    fb.clear(pack_color(0, 0, 255));
    assert_eq!(fb.pixel(3, 4), Ok(pack_color(0, 0, 255)));
}

#[test]
fn test_arcade_clear_scenario() {
    let mut fb = Framebuffer::new(224, 256).unwrap();
    fb.clear(pack_color(0, 128, 0));

    assert_eq!(fb.pixel(0, 0), Ok(0x0080_00FF));
    assert_eq!(fb.pixel(223, 255), Ok(0x0080_00FF));
}

#[test]
fn test_create_rejects_empty() {
    assert!(matches!(
        Framebuffer::new(0, 0),
        Err(FramebufferError::EmptyDimensions { .. })
    ));
}

// ============================================================================
// SetPixel
// ============================================================================

#[test]
fn test_set_pixel_in_bounds() {
    for (w, h) in DIMENSIONS {
        let mut fb = Framebuffer::new(w, h).unwrap();
        let corners = [(0, 0), (w - 1, 0), (0, h - 1), (w - 1, h - 1)];
        for (i, (x, y)) in corners.into_iter().enumerate() {
            let color = pack_color(i as u8, 0, 0);
            fb.set_pixel(x, y, color).unwrap();
            assert_eq!(fb.pixel(x, y), Ok(color));
        }
    }
}

#[test]
fn test_set_pixel_out_of_bounds_leaves_buffer_unmodified() {
    for (w, h) in DIMENSIONS {
        let mut fb = Framebuffer::new(w, h).unwrap();
        fb.clear(0x0080_00FF);
        let before = fb.clone();

        let outside = [(w, 0), (0, h), (w, h), (u32::MAX, 0), (0, u32::MAX), (w + 100, h + 100)];
        for (x, y) in outside {
            assert_eq!(
                fb.set_pixel(x, y, 0xFFFF_FFFF),
                Err(FramebufferError::OutOfBounds { x, y, width: w, height: h })
            );
            assert!(fb.pixel(x, y).is_err());
        }

        assert_eq!(fb, before);
    }
}

#[test]
fn test_out_of_bounds_message() {
    let mut fb = Framebuffer::new(224, 256).unwrap();
    let err = fb.set_pixel(224, 0, 0).unwrap_err();
    assert_eq!(err.to_string(), "pixel (224, 0) outside 224x256 framebuffer");
}

// ============================================================================
// Texel staging
// ============================================================================

#[test]
fn test_texels_follow_packed_lanes() {
    let mut fb = Framebuffer::new(3, 1).unwrap();
    fb.set_pixel(0, 0, pack_color(255, 0, 0)).unwrap();
    fb.set_pixel(1, 0, pack_color(0, 255, 0)).unwrap();
    fb.set_pixel(2, 0, pack_color(0, 0, 255)).unwrap();

    let mut texels = vec![[0u8; 4]; 3];
    fb.write_texels(&mut texels).unwrap();

    assert_eq!(texels, vec![[255, 0, 0, 255], [0, 255, 0, 255], [0, 0, 255, 255]]);
}
