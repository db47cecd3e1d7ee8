use std::borrow::Cow;

/// Shader program handed to the graphics driver as an opaque blob
#[derive(Debug, Clone)]
pub struct ShaderSource {
    pub label: &'static str,
    pub wgsl: Cow<'static, str>,
    pub vertex_entry: &'static str,
    pub fragment_entry: &'static str,
}

impl ShaderSource {
    /// Samples the frame texture across a single over-sized triangle.
    /// Draw with 3 vertices and no vertex buffer.
    pub fn fullscreen_triangle() -> Self {
        Self {
            label: "Fullscreen Triangle",
            wgsl: Cow::Borrowed(include_str!("fullscreen.wgsl")),
            vertex_entry: "vs_main",
            fragment_entry: "fs_main",
        }
    }
}

/// Vertex count of the full-screen draw
pub const FULLSCREEN_VERTEX_COUNT: u32 = 3;

/// CPU mirror of `vs_main`: (clip position, texture coordinate) for a vertex index
pub fn fullscreen_vertex(index: u32) -> ([f32; 2], [f32; 2]) {
    let u = if index == 2 { 2.0 } else { 0.0 };
    let v = if index == 1 { 2.0 } else { 0.0 };
    ([2.0 * u - 1.0, 2.0 * v - 1.0], [u, v])
}
