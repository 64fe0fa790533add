//! Overlay primitives drawn around and over the terrain layer.

use std::f32::consts::TAU;

use geist_blocks::{Rgb, Rgba};
use geist_geom::{Vec2, Vec3};

use crate::draw::DrawCommand;
use crate::projection::{GridCell, Projection};
use crate::waypoint::Waypoint;

pub const DISC_COLOR: Rgba = Rgba::new(0, 0, 0, 180);
pub const BORDER_COLOR: Rgba = Rgba::WHITE;
pub const ARROW_COLOR: Rgba = Rgba::WHITE;
pub const LABEL_COLOR: Rgba = Rgba::WHITE;

/// Arrow pointing up (screen -y) before rotation.
pub const ARROW_SHAPE: [Vec2; 3] = [
    Vec2::new(0.0, -6.0),
    Vec2::new(-4.0, 4.0),
    Vec2::new(4.0, 4.0),
];

#[inline]
fn rim(center: Vec2, radius: f32, i: u32, segments: u32) -> Vec2 {
    center.on_circle(radius, i as f32 / segments as f32 * TAU)
}

/// Translucent disc behind the terrain.
pub fn background_disc(center: Vec2, radius: f32, segments: u32) -> DrawCommand {
    let segments = segments.max(3);
    let mut points = Vec::with_capacity(segments as usize + 2);
    points.push(center);
    points.extend((0..=segments).map(|i| rim(center, radius, i, segments)));
    DrawCommand::TriangleFan {
        points,
        color: DISC_COLOR,
    }
}

/// Two pixel wide ring between `radius - 1` and `radius + 1`.
pub fn border_ring(center: Vec2, radius: f32, segments: u32) -> DrawCommand {
    let segments = segments.max(3);
    let mut points = Vec::with_capacity(2 * (segments as usize + 1));
    for i in 0..=segments {
        points.push(rim(center, radius + 1.0, i, segments));
        points.push(rim(center, (radius - 1.0).max(0.0), i, segments));
    }
    DrawCommand::TriangleStrip {
        points,
        color: BORDER_COLOR,
    }
}

/// Heading indicator at the center, rotated by `yaw + 90` degrees.
pub fn orientation_arrow(center: Vec2, yaw_deg: f32, scale: f32) -> DrawCommand {
    let rot = yaw_deg + 90.0;
    let [a, b, c] = ARROW_SHAPE.map(|p| center + (p * scale).rotated_deg(rot));
    DrawCommand::Triangle {
        a,
        b,
        c,
        color: ARROW_COLOR,
    }
}

pub fn terrain_cell(cell: &GridCell, color: Rgb) -> DrawCommand {
    DrawCommand::FillRect {
        pos: cell.screen,
        size: Vec2::new(cell.size, cell.size),
        color: color.into(),
    }
}

/// Square marker for `waypoint`, or `None` if it falls outside the inset circle.
pub fn waypoint_marker(
    projection: &Projection,
    viewpoint: Vec3,
    waypoint: &Waypoint,
    half_size: f32,
    margin: f32,
) -> Option<DrawCommand> {
    let delta = waypoint.position.xz() - viewpoint.xz();
    let p = projection.project_inset(delta, margin);
    if !p.within_circle {
        return None;
    }
    Some(DrawCommand::FillRect {
        pos: p.screen - Vec2::new(half_size, half_size),
        size: Vec2::new(2.0 * half_size, 2.0 * half_size),
        color: waypoint.color.into(),
    })
}

pub fn coordinate_text(position: Vec3) -> String {
    format!(
        "XYZ: {}, {}, {}",
        position.x.round() as i64,
        position.y.round() as i64,
        position.z.round() as i64
    )
}

/// Viewpoint coordinates, `gap` pixels below the disc's bottom-left corner.
pub fn coordinate_label(center: Vec2, radius: f32, position: Vec3, gap: f32, size: u32) -> DrawCommand {
    DrawCommand::Text {
        text: coordinate_text(position),
        pos: Vec2::new(center.x - radius, center.y + radius + gap),
        size,
        color: LABEL_COLOR,
    }
}
