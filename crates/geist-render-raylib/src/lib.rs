//! Raylib submission of minimap draw commands.

use geist_geom::Vec2;
use geist_map::{DrawCommand, MinimapFrame};
use raylib::prelude::*;

use crate::conv::{rgba_to_rl, vec2_to_rl};

pub mod conv {
    use geist_blocks::Rgba;
    use geist_geom::Vec2;

    pub fn vec2_to_rl(v: Vec2) -> raylib::prelude::Vector2 {
        raylib::prelude::Vector2::new(v.x, v.y)
    }

    pub fn vec2_from_rl(v: raylib::prelude::Vector2) -> Vec2 {
        Vec2 { x: v.x, y: v.y }
    }

    pub fn rgba_to_rl(c: Rgba) -> raylib::prelude::Color {
        raylib::prelude::Color::new(c.r, c.g, c.b, c.a)
    }
}

/// Orders a triangle counter-clockwise on screen, which raylib needs to
/// avoid culling it. Screen space is y-down, so that is a negative perp dot.
pub fn screen_ccw(a: Vec2, b: Vec2, c: Vec2) -> (Vec2, Vec2, Vec2) {
    if (b - a).perp_dot(c - a) < 0.0 {
        (a, b, c)
    } else {
        (a, c, b)
    }
}

fn triangle<D: RaylibDraw>(d: &mut D, a: Vec2, b: Vec2, c: Vec2, color: Color) {
    let (a, b, c) = screen_ccw(a, b, c);
    d.draw_triangle(vec2_to_rl(a), vec2_to_rl(b), vec2_to_rl(c), color);
}

pub fn draw_command<D: RaylibDraw>(d: &mut D, cmd: &DrawCommand) {
    match cmd {
        DrawCommand::FillRect { pos, size, color } => {
            d.draw_rectangle_v(vec2_to_rl(*pos), vec2_to_rl(*size), rgba_to_rl(*color));
        }
        DrawCommand::TriangleFan { points, color } => {
            let color = rgba_to_rl(*color);
            if let Some((&hub, rim)) = points.split_first() {
                for w in rim.windows(2) {
                    triangle(d, hub, w[0], w[1], color);
                }
            }
        }
        DrawCommand::TriangleStrip { points, color } => {
            let color = rgba_to_rl(*color);
            for w in points.windows(3) {
                triangle(d, w[0], w[1], w[2], color);
            }
        }
        DrawCommand::Triangle { a, b, c, color } => {
            triangle(d, *a, *b, *c, rgba_to_rl(*color));
        }
        DrawCommand::Text {
            text,
            pos,
            size,
            color,
        } => {
            d.draw_text(
                text,
                pos.x.round() as i32,
                pos.y.round() as i32,
                *size as i32,
                rgba_to_rl(*color),
            );
        }
    }
}

/// Draws every command of `frame`, back to front.
pub fn draw_frame<D: RaylibDraw>(d: &mut D, frame: &MinimapFrame) {
    for cmd in frame.commands() {
        draw_command(d, cmd);
    }
}
