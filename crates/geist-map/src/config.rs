use serde::Deserialize;
use std::collections::HashMap;
use std::error::Error;
use std::fs;
use std::path::Path;

pub const MIN_SEGMENTS: u32 = 32;

#[derive(Clone, Debug, Default, Deserialize)]
pub struct MinimapConfig {
    #[serde(default)]
    pub view: View,
    #[serde(default)]
    pub anchor: Anchor,
    #[serde(default)]
    pub cache: Cache,
    #[serde(default)]
    pub shade: Shade,
    #[serde(default)]
    pub palette: PaletteCfg,
}

#[derive(Clone, Debug, Deserialize)]
pub struct View {
    #[serde(default = "default_radius_px")]
    pub radius_px: u32,
    /// Columns shown from the center to the rim.
    #[serde(default = "default_world_radius")]
    pub world_radius: u32,
    #[serde(default = "default_stride")]
    pub stride: u32,
    #[serde(default = "default_disc_segments")]
    pub disc_segments: u32,
    #[serde(default = "default_border_segments")]
    pub border_segments: u32,
    #[serde(default = "default_marker_half_size")]
    pub marker_half_size: f32,
    #[serde(default = "default_marker_margin")]
    pub marker_margin: f32,
    #[serde(default = "d_one")]
    pub arrow_scale: f32,
    #[serde(default = "default_label_gap")]
    pub label_gap: f32,
    #[serde(default = "default_label_size")]
    pub label_size: u32,
}
fn default_radius_px() -> u32 {
    64
}
fn default_world_radius() -> u32 {
    64
}
fn default_stride() -> u32 {
    1
}
fn default_disc_segments() -> u32 {
    32
}
fn default_border_segments() -> u32 {
    64
}
fn default_marker_half_size() -> f32 {
    3.0
}
fn default_marker_margin() -> f32 {
    4.0
}
fn d_one() -> f32 {
    1.0
}
fn default_label_gap() -> f32 {
    5.0
}
fn default_label_size() -> u32 {
    10
}
impl Default for View {
    fn default() -> Self {
        Self {
            radius_px: default_radius_px(),
            world_radius: default_world_radius(),
            stride: default_stride(),
            disc_segments: default_disc_segments(),
            border_segments: default_border_segments(),
            marker_half_size: default_marker_half_size(),
            marker_margin: default_marker_margin(),
            arrow_scale: d_one(),
            label_gap: default_label_gap(),
            label_size: default_label_size(),
        }
    }
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Anchor {
    #[serde(default = "default_corner")]
    pub corner: Corner,
    #[serde(default = "default_anchor_margin")]
    pub margin: f32,
}
fn default_corner() -> Corner {
    Corner::TopRight
}
fn default_anchor_margin() -> f32 {
    10.0
}
impl Default for Anchor {
    fn default() -> Self {
        Self {
            corner: default_corner(),
            margin: default_anchor_margin(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Cache {
    #[serde(default = "default_invalidation_ms")]
    pub invalidation_ms: u64,
}
fn default_invalidation_ms() -> u64 {
    1000
}
impl Default for Cache {
    fn default() -> Self {
        Self {
            invalidation_ms: default_invalidation_ms(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Shade {
    #[serde(default = "default_height_coefficient")]
    pub height_coefficient: f32,
    #[serde(default = "default_min_shade")]
    pub min_shade: f32,
    #[serde(default = "default_max_shade")]
    pub max_shade: f32,
}
fn default_height_coefficient() -> f32 {
    0.008
}
fn default_min_shade() -> f32 {
    0.4
}
fn default_max_shade() -> f32 {
    1.6
}
impl Default for Shade {
    fn default() -> Self {
        Self {
            height_coefficient: default_height_coefficient(),
            min_shade: default_min_shade(),
            max_shade: default_max_shade(),
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct PaletteCfg {
    /// Material key -> 0xRRGGBB.
    #[serde(default)]
    pub overrides: HashMap<String, u32>,
}

fn finite_or_default(value: &mut f32, default: f32, name: &str) {
    if !value.is_finite() {
        log::warn!("minimap: {} = {} is not finite; using {}", name, value, default);
        *value = default;
    }
}

impl MinimapConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, Box<dyn Error>> {
        let cfg: MinimapConfig = toml::from_str(s)?;
        Ok(cfg.sanitized())
    }

    pub fn from_path(path: &Path) -> Result<Self, Box<dyn Error>> {
        let s = fs::read_to_string(path)?;
        Self::from_toml_str(&s)
    }

    /// Clamps values the engine cannot work with, warning about each one.
    pub fn sanitized(mut self) -> Self {
        let v = &mut self.view;
        if v.radius_px == 0 {
            log::warn!("minimap: radius_px must be >= 1; using 1");
            v.radius_px = 1;
        }
        if v.world_radius == 0 {
            log::warn!("minimap: world_radius must be >= 1; using 1");
            v.world_radius = 1;
        }
        if v.stride == 0 {
            log::warn!("minimap: stride must be >= 1; using 1");
            v.stride = 1;
        }
        if v.disc_segments < MIN_SEGMENTS {
            log::warn!(
                "minimap: disc_segments {} below {}; clamping",
                v.disc_segments,
                MIN_SEGMENTS
            );
            v.disc_segments = MIN_SEGMENTS;
        }
        if v.border_segments < MIN_SEGMENTS {
            log::warn!(
                "minimap: border_segments {} below {}; clamping",
                v.border_segments,
                MIN_SEGMENTS
            );
            v.border_segments = MIN_SEGMENTS;
        }
        finite_or_default(&mut v.marker_half_size, default_marker_half_size(), "marker_half_size");
        finite_or_default(&mut v.marker_margin, default_marker_margin(), "marker_margin");
        finite_or_default(&mut v.arrow_scale, d_one(), "arrow_scale");
        finite_or_default(&mut v.label_gap, default_label_gap(), "label_gap");
        if v.marker_margin < 0.0 || v.marker_margin > v.radius_px as f32 {
            log::warn!("minimap: marker_margin {} out of range; using 0", v.marker_margin);
            v.marker_margin = 0.0;
        }
        finite_or_default(&mut self.anchor.margin, default_anchor_margin(), "anchor margin");
        let s = &mut self.shade;
        finite_or_default(&mut s.height_coefficient, default_height_coefficient(), "height_coefficient");
        finite_or_default(&mut s.min_shade, default_min_shade(), "min_shade");
        finite_or_default(&mut s.max_shade, default_max_shade(), "max_shade");
        if s.min_shade > s.max_shade {
            log::warn!(
                "minimap: min_shade {} > max_shade {}; swapping",
                s.min_shade,
                s.max_shade
            );
            std::mem::swap(&mut s.min_shade, &mut s.max_shade);
        }
        self
    }
}
