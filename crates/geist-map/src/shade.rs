//! Height shading and climate tint applied to classified base colors.

use geist_blocks::{Material, Rgb};
use geist_world::Climate;

use crate::config;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShadeParams {
    pub height_coefficient: f32,
    pub min_shade: f32,
    pub max_shade: f32,
}

impl Default for ShadeParams {
    fn default() -> Self {
        Self::from(&config::Shade::default())
    }
}

impl From<&config::Shade> for ShadeParams {
    fn from(cfg: &config::Shade) -> Self {
        Self {
            height_coefficient: cfg.height_coefficient,
            min_shade: cfg.min_shade,
            max_shade: cfg.max_shade,
        }
    }
}

impl ShadeParams {
    /// Brightness multiplier for a surface at `height`.
    #[inline]
    pub fn factor(&self, height: i32, sea_level: i32) -> f32 {
        let raw = 1.0 + (height - sea_level) as f32 * self.height_coefficient;
        // Not `clamp`: hand-built params may be unordered or NaN.
        raw.max(self.min_shade).min(self.max_shade)
    }
}

#[inline]
fn scale(c: Rgb, r: f32, g: f32, b: f32) -> Rgb {
    Rgb::from_f32_clamped(c.r as f32 * r, c.g as f32 * g, c.b as f32 * b)
}

/// Brighter above sea level, darker below.
pub fn height_shade(color: Rgb, height: i32, sea_level: i32, params: &ShadeParams) -> Rgb {
    let s = params.factor(height, sea_level);
    scale(color, s, s, s)
}

/// Rough humidity for climates that only report temperature.
pub fn estimate_humidity(temperature: f32) -> f32 {
    if temperature < 0.2 {
        0.2
    } else if temperature > 1.0 {
        0.1
    } else if temperature > 0.5 && temperature < 0.8 {
        0.6
    } else {
        0.4
    }
}

/// Cold shifts toward blue, hot toward yellow, dry toward brown.
pub fn climate_tint(base: Rgb, climate: Climate) -> Rgb {
    let temp = climate.temperature.clamp(0.0, 1.0);
    let humidity = climate
        .humidity
        .unwrap_or_else(|| estimate_humidity(climate.temperature));

    let (mut r, mut g, mut b) = (base.r as f32, base.g as f32, base.b as f32);
    if temp < 0.3 {
        g *= 0.9;
        b *= 1.1;
    } else if temp > 0.9 {
        r *= 1.1;
        g *= 0.95;
        b *= 0.8;
    }
    if humidity < 0.3 {
        r *= 0.9;
        g *= 0.85;
        b *= 0.8;
    }
    Rgb::from_f32_clamped(r, g, b)
}

/// Final terrain color: climate tint for foliage, then height shading.
pub fn tint(
    base: Rgb,
    height: i32,
    sea_level: i32,
    material: &Material,
    climate: Option<Climate>,
    params: &ShadeParams,
) -> Rgb {
    let tinted = match climate {
        Some(c) if material.is_foliage() => climate_tint(base, c),
        _ => base,
    };
    height_shade(tinted, height, sea_level, params)
}
