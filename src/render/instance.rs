use bytemuck::{Pod, Zeroable};

use crate::geom::Rect;

/// Per-instance data uploaded to GPU each frame.
/// Stride = 20 bytes.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct RectInstance {
    /// Top-left corner in virtual screen pixels.
    pub origin: [f32; 2],
    /// Width and height in virtual screen pixels.
    pub size: [f32; 2],
    /// RGBA color packed as u32.
    pub color: u32,
}

impl RectInstance {
    pub fn from_rect(rect: &Rect, color: u32) -> Self {
        Self {
            origin: rect.min.into(),
            size: rect.size.into(),
            color,
        }
    }
}
