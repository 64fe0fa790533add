//! World-to-minimap projection. World +x maps to screen +x and world +z to
//! screen +y, so north (-z) is up.

use std::iter::StepBy;
use std::ops::Range;

use geist_geom::Vec2;
use geist_world::ColumnPos;

use crate::config::{Corner, MinimapConfig};

/// Where the disc sits on screen, in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub center: Vec2,
    pub radius_px: f32,
}

impl Viewport {
    pub fn new(center: Vec2, radius_px: f32) -> Self {
        Self { center, radius_px }
    }

    /// Places the disc in the configured screen corner. Bottom corners keep
    /// room for the coordinate label under the disc.
    pub fn anchored(screen_w: f32, screen_h: f32, cfg: &MinimapConfig) -> Self {
        let r = cfg.view.radius_px as f32;
        let m = cfg.anchor.margin;
        let label_room = cfg.view.label_gap + cfg.view.label_size as f32;
        let x = match cfg.anchor.corner {
            Corner::TopLeft | Corner::BottomLeft => m + r,
            Corner::TopRight | Corner::BottomRight => screen_w - m - r,
        };
        let y = match cfg.anchor.corner {
            Corner::TopLeft | Corner::TopRight => m + r,
            Corner::BottomLeft | Corner::BottomRight => screen_h - m - r - label_room,
        };
        Self::new(Vec2::new(x, y), r)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projected {
    /// Pixel offset from the disc center.
    pub offset: Vec2,
    /// Absolute screen position.
    pub screen: Vec2,
    pub within_circle: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridCell {
    pub column: ColumnPos,
    pub offset: Vec2,
    /// Top-left corner on screen.
    pub screen: Vec2,
    pub size: f32,
    pub within_circle: bool,
}

#[derive(Clone, Copy, Debug)]
pub struct Projection {
    viewport: Viewport,
    world_radius: i32,
    px_per_unit: f32,
}

impl Projection {
    pub fn new(viewport: Viewport, world_radius: u32) -> Self {
        let world_radius = world_radius.max(1) as i32;
        Self {
            viewport,
            world_radius,
            px_per_unit: viewport.radius_px / world_radius as f32,
        }
    }

    #[inline]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[inline]
    pub fn px_per_unit(&self) -> f32 {
        self.px_per_unit
    }

    #[inline]
    pub fn world_radius(&self) -> i32 {
        self.world_radius
    }

    /// Projects a world-space horizontal delta from the viewpoint.
    pub fn project(&self, delta: Vec2) -> Projected {
        self.project_within(delta, self.viewport.radius_px)
    }

    /// Like [`project`](Self::project) but tests against a circle shrunk by `margin`.
    pub fn project_inset(&self, delta: Vec2, margin: f32) -> Projected {
        self.project_within(delta, self.viewport.radius_px - margin)
    }

    fn project_within(&self, delta: Vec2, limit: f32) -> Projected {
        let offset = delta * self.px_per_unit;
        Projected {
            offset,
            screen: self.viewport.center + offset,
            within_circle: offset.length() <= limit,
        }
    }

    /// Stride-aligned columns in `[origin - world_radius, origin + world_radius)`
    /// on both axes, row by row (z outer, x inner).
    pub fn grid(&self, origin: ColumnPos, stride: u32) -> impl Iterator<Item = GridCell> + '_ {
        let stride = stride.max(1) as i32;
        let r = self.world_radius;
        let xs = aligned(origin.x - r, origin.x + r, stride);
        let zs = aligned(origin.z - r, origin.z + r, stride);
        zs.flat_map(move |z| {
            xs.clone()
                .map(move |x| self.cell(origin, ColumnPos::new(x, z), stride))
        })
    }

    fn cell(&self, origin: ColumnPos, column: ColumnPos, stride: i32) -> GridCell {
        let delta = Vec2::new((column.x - origin.x) as f32, (column.z - origin.z) as f32);
        let p = self.project(delta);
        GridCell {
            column,
            offset: p.offset,
            screen: p.screen,
            size: self.px_per_unit * stride as f32,
            within_circle: p.within_circle,
        }
    }
}

/// Multiples of `stride` in `[lo, hi)`.
fn aligned(lo: i32, hi: i32, stride: i32) -> StepBy<Range<i32>> {
    let first = lo + (stride - lo.rem_euclid(stride)) % stride;
    (first..hi).step_by(stride as usize)
}
