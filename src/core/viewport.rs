/// Target-space rectangle the frame is drawn into, in physical pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn aspect(&self) -> f32 {
        self.width / self.height
    }
}

/// Largest rectangle with the content's aspect ratio that fits in `target`,
/// centered on the spare axis.
///
/// Returns `None` when either extent is zero (minimised window).
pub fn letterbox(content: (u32, u32), target: (u32, u32)) -> Option<Viewport> {
    let (cw, ch) = content;
    let (tw, th) = target;
    if cw == 0 || ch == 0 || tw == 0 || th == 0 {
        return None;
    }

    let (cw, ch, tw, th) = (cw as f32, ch as f32, tw as f32, th as f32);
    let scale = (tw / cw).min(th / ch);
    // cw * (tw / cw) can round past tw on the limiting axis
    let width = (cw * scale).min(tw);
    let height = (ch * scale).min(th);

    Some(Viewport {
        x: ((tw - width) * 0.5).max(0.0),
        y: ((th - height) * 0.5).max(0.0),
        width,
        height,
    })
}
