//! Backend-neutral draw commands in viewport pixel space (y down).

use geist_blocks::Rgba;
use geist_geom::Vec2;

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    /// Axis-aligned rectangle with its top-left corner at `pos`.
    FillRect { pos: Vec2, size: Vec2, color: Rgba },
    /// First point is the hub; consecutive rim points form the triangles.
    TriangleFan { points: Vec<Vec2>, color: Rgba },
    TriangleStrip { points: Vec<Vec2>, color: Rgba },
    Triangle { a: Vec2, b: Vec2, c: Vec2, color: Rgba },
    /// `pos` is the top-left of the text box.
    Text {
        text: String,
        pos: Vec2,
        size: u32,
        color: Rgba,
    },
}

impl DrawCommand {
    pub fn color(&self) -> Rgba {
        match self {
            DrawCommand::FillRect { color, .. }
            | DrawCommand::TriangleFan { color, .. }
            | DrawCommand::TriangleStrip { color, .. }
            | DrawCommand::Triangle { color, .. }
            | DrawCommand::Text { color, .. } => *color,
        }
    }
}
