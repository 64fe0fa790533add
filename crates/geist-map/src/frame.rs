//! Per-frame orchestration: sample the stride grid through the cache, then
//! composite overlay layers into a [`MinimapFrame`].

use geist_blocks::palette::FALLBACK_COLOR;
use geist_blocks::{Palette, Rgb};
use geist_geom::{Vec2, Vec3};
use geist_world::{ClimateAccess, ColumnPos, SurfaceSample, WorldAccess, sample_full_column};

use crate::cache::{CacheStats, Clock, ColorCache, SystemClock};
use crate::config::MinimapConfig;
use crate::draw::DrawCommand;
use crate::overlay;
use crate::projection::{Projection, Viewport};
use crate::shade::{self, ShadeParams};
use crate::waypoint::Waypoint;

/// Color for columns whose chunk is not loaded.
pub const UNLOADED_COLOR: Rgb = Rgb::from_packed(0x2B2B2B);
/// Color for columns with nothing to show.
pub const VOID_COLOR: Rgb = Rgb::from_packed(0x0B0B14);

/// The thing the map is centered on.
pub trait Viewpoint {
    fn position(&self) -> Vec3;
    /// Heading in degrees.
    fn yaw(&self) -> f32;
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FramePhase {
    #[default]
    Idle,
    Sampling,
    Compositing,
    Done,
}

/// Draw commands for one frame, one list per layer.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MinimapFrame {
    pub background: Vec<DrawCommand>,
    pub terrain: Vec<DrawCommand>,
    pub border: Vec<DrawCommand>,
    pub arrow: Vec<DrawCommand>,
    pub markers: Vec<DrawCommand>,
    pub label: Vec<DrawCommand>,
}

impl MinimapFrame {
    /// All commands, back to front.
    pub fn commands(&self) -> impl Iterator<Item = &DrawCommand> {
        self.background
            .iter()
            .chain(&self.terrain)
            .chain(&self.border)
            .chain(&self.arrow)
            .chain(&self.markers)
            .chain(&self.label)
    }

    pub fn len(&self) -> usize {
        self.background.len()
            + self.terrain.len()
            + self.border.len()
            + self.arrow.len()
            + self.markers.len()
            + self.label.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Final color of one column: sample, classify, then tint and shade.
pub fn resolve_column(
    world: &dyn WorldAccess,
    climate: &dyn ClimateAccess,
    palette: &Palette,
    params: &ShadeParams,
    column: ColumnPos,
) -> Rgb {
    match sample_full_column(world, column) {
        SurfaceSample::Unloaded => UNLOADED_COLOR,
        SurfaceSample::Void => VOID_COLOR,
        SurfaceSample::Surface { top, material, .. } => {
            let sea = world.sea_level();
            match world.catalog().get(material) {
                Some(m) => {
                    let base = palette.classify(m);
                    let c = climate.climate_at(column.x, top, column.z);
                    shade::tint(base, top, sea, m, c, params)
                }
                None => shade::height_shade(FALLBACK_COLOR, top, sea, params),
            }
        }
    }
}

pub struct MinimapEngine {
    config: MinimapConfig,
    palette: Palette,
    shade: ShadeParams,
    cache: ColorCache,
    phase: FramePhase,
}

impl MinimapEngine {
    pub fn new(config: MinimapConfig) -> Self {
        Self::with_clock(config, Box::new(SystemClock::new()))
    }

    pub fn with_clock(config: MinimapConfig, clock: Box<dyn Clock>) -> Self {
        let config = config.sanitized();
        let palette = Palette::with_overrides(
            config
                .palette
                .overrides
                .iter()
                .map(|(k, v)| (k.clone(), *v)),
        );
        let shade = ShadeParams::from(&config.shade);
        let cache = ColorCache::new(config.cache.invalidation_ms, clock);
        Self {
            config,
            palette,
            shade,
            cache,
            phase: FramePhase::Idle,
        }
    }

    pub fn config(&self) -> &MinimapConfig {
        &self.config
    }

    pub fn phase(&self) -> FramePhase {
        self.phase
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Forgets every cached color, e.g. after the world was swapped.
    pub fn invalidate(&mut self) {
        self.cache.clear();
    }

    pub fn viewport_at(&self, center: Vec2) -> Viewport {
        Viewport::new(center, self.config.view.radius_px as f32)
    }

    pub fn anchored_viewport(&self, screen_w: f32, screen_h: f32) -> Viewport {
        Viewport::anchored(screen_w, screen_h, &self.config)
    }

    /// Builds the frame, or returns `None` if there is nothing to center on or
    /// no world to read. Only the viewport's center is used; the radius always
    /// comes from the config.
    pub fn render_frame(
        &mut self,
        viewport: Viewport,
        viewpoint: Option<&dyn Viewpoint>,
        world: Option<&dyn WorldAccess>,
        climate: &dyn ClimateAccess,
        waypoints: &[Waypoint],
    ) -> Option<MinimapFrame> {
        self.phase = FramePhase::Idle;
        let (Some(viewpoint), Some(world)) = (viewpoint, world) else {
            log::trace!(
                "minimap frame skipped (viewpoint: {}, world: {})",
                viewpoint.is_some(),
                world.is_some()
            );
            return None;
        };

        let view = &self.config.view;
        let viewport = Viewport::new(viewport.center, view.radius_px as f32);
        let position = viewpoint.position();
        let projection = Projection::new(viewport, view.world_radius);
        let origin = ColumnPos::containing(position.x, position.z);

        self.phase = FramePhase::Sampling;
        let mut frame = MinimapFrame::default();
        let (palette, params) = (&self.palette, &self.shade);
        for cell in projection.grid(origin, view.stride) {
            if !cell.within_circle {
                continue;
            }
            let color = self
                .cache
                .color_for(cell.column, |col| resolve_column(world, climate, palette, params, col));
            frame.terrain.push(overlay::terrain_cell(&cell, color));
        }

        self.phase = FramePhase::Compositing;
        let center = viewport.center;
        let radius = viewport.radius_px;
        frame
            .background
            .push(overlay::background_disc(center, radius, view.disc_segments));
        frame
            .border
            .push(overlay::border_ring(center, radius, view.border_segments));
        frame
            .arrow
            .push(overlay::orientation_arrow(center, viewpoint.yaw(), view.arrow_scale));
        frame.markers.extend(waypoints.iter().filter_map(|w| {
            overlay::waypoint_marker(
                &projection,
                position,
                w,
                view.marker_half_size,
                view.marker_margin,
            )
        }));
        frame.label.push(overlay::coordinate_label(
            center,
            radius,
            position,
            view.label_gap,
            view.label_size,
        ));

        self.phase = FramePhase::Done;
        Some(frame)
    }
}
