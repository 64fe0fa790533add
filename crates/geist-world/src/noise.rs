//! Procedural world driven by fastnoise-lite height and climate fields.

use std::cell::Cell;
use std::error::Error;
use std::fs;
use std::path::Path;

use fastnoise_lite::{FastNoiseLite, NoiseType};
use geist_blocks::{MaterialCatalog, MaterialId};
use serde::Deserialize;

use crate::access::{AccessError, ChunkPos, Climate, ClimateAccess, ColumnPos, WorldAccess};

#[derive(Clone, Debug, Deserialize)]
pub struct NoiseWorldConfig {
    #[serde(default = "default_seed")]
    pub seed: i32,
    #[serde(default)]
    pub bounds: Bounds,
    #[serde(default)]
    pub height: Height,
    #[serde(default)]
    pub climate: ClimateCfg,
    #[serde(default)]
    pub features: Features,
    /// Chunks (Chebyshev) around the focus that report as loaded.
    #[serde(default = "default_load_radius")]
    pub load_radius: i32,
}

impl Default for NoiseWorldConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            bounds: Bounds::default(),
            height: Height::default(),
            climate: ClimateCfg::default(),
            features: Features::default(),
            load_radius: default_load_radius(),
        }
    }
}

fn default_seed() -> i32 {
    1337
}
fn default_load_radius() -> i32 {
    5
}

#[derive(Clone, Debug, Deserialize)]
pub struct Bounds {
    #[serde(default = "default_bottom")]
    pub bottom: i32,
    #[serde(default = "default_top")]
    pub top: i32,
    #[serde(default = "default_sea_level")]
    pub sea_level: i32,
}
fn default_bottom() -> i32 {
    0
}
fn default_top() -> i32 {
    160
}
fn default_sea_level() -> i32 {
    64
}
impl Default for Bounds {
    fn default() -> Self {
        Self {
            bottom: default_bottom(),
            top: default_top(),
            sea_level: default_sea_level(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Height {
    #[serde(default = "default_height_freq")]
    pub frequency: f32,
    #[serde(default = "default_min_y")]
    pub min_y: i32,
    #[serde(default = "default_max_y")]
    pub max_y: i32,
    #[serde(default = "default_snow_line")]
    pub snow_line: i32,
}
fn default_height_freq() -> f32 {
    0.008
}
fn default_min_y() -> i32 {
    40
}
fn default_max_y() -> i32 {
    120
}
fn default_snow_line() -> i32 {
    105
}
impl Default for Height {
    fn default() -> Self {
        Self {
            frequency: default_height_freq(),
            min_y: default_min_y(),
            max_y: default_max_y(),
            snow_line: default_snow_line(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct ClimateCfg {
    #[serde(default = "default_climate_freq")]
    pub frequency: f32,
    /// Temperature drop per block above sea level.
    #[serde(default = "default_lapse")]
    pub lapse_rate: f32,
    /// Report humidity; otherwise consumers estimate it from temperature.
    #[serde(default)]
    pub provide_humidity: bool,
}
fn default_climate_freq() -> f32 {
    0.002
}
fn default_lapse() -> f32 {
    0.004
}
impl Default for ClimateCfg {
    fn default() -> Self {
        Self {
            frequency: default_climate_freq(),
            lapse_rate: default_lapse(),
            provide_humidity: false,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Features {
    /// Chance per column of a tree on grass.
    #[serde(default = "default_tree_chance")]
    pub tree_chance: f32,
    #[serde(default = "default_cave_threshold")]
    pub cave_threshold: f32,
}
fn default_tree_chance() -> f32 {
    0.02
}
fn default_cave_threshold() -> f32 {
    0.6
}
impl Default for Features {
    fn default() -> Self {
        Self {
            tree_chance: default_tree_chance(),
            cave_threshold: default_cave_threshold(),
        }
    }
}

/// Terrain needs one block of floor and eight of headroom for trees.
pub const MIN_WORLD_HEIGHT: i32 = 9;

impl NoiseWorldConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, Box<dyn Error>> {
        let cfg: NoiseWorldConfig = toml::from_str(s)?;
        Ok(cfg.sanitized())
    }

    pub fn from_path(path: &Path) -> Result<Self, Box<dyn Error>> {
        let s = fs::read_to_string(path)?;
        Self::from_toml_str(&s)
    }

    /// Replaces bounds the generator cannot fill, warning about each one.
    pub fn sanitized(mut self) -> Self {
        let b = &mut self.bounds;
        if b.top.saturating_sub(b.bottom) < MIN_WORLD_HEIGHT {
            log::warn!(
                "noise world: bounds {}..={} shorter than {} blocks; using defaults",
                b.bottom,
                b.top,
                MIN_WORLD_HEIGHT
            );
            *b = Bounds::default();
        }
        if b.sea_level < b.bottom || b.sea_level > b.top {
            let sea = b.sea_level.clamp(b.bottom, b.top);
            log::warn!("noise world: sea_level {} outside bounds; using {}", b.sea_level, sea);
            b.sea_level = sea;
        }
        if self.load_radius < 0 {
            log::warn!("noise world: load_radius {} is negative; using 0", self.load_radius);
            self.load_radius = 0;
        }
        self
    }
}

struct Ids {
    air: MaterialId,
    cave_air: MaterialId,
    water: MaterialId,
    grass: MaterialId,
    dirt: MaterialId,
    stone: MaterialId,
    sand: MaterialId,
    gravel: MaterialId,
    snow: MaterialId,
    log: MaterialId,
    leaves: MaterialId,
    spruce_leaves: MaterialId,
}

impl Ids {
    fn resolve(catalog: &MaterialCatalog) -> Self {
        let id = |k: &str| catalog.get_id(k).unwrap_or(MaterialId::AIR);
        Self {
            air: MaterialId::AIR,
            cave_air: id("cave_air"),
            water: id("water"),
            grass: id("grass_block"),
            dirt: id("dirt"),
            stone: id("stone"),
            sand: id("sand"),
            gravel: id("gravel"),
            snow: id("snow_block"),
            log: id("oak_log"),
            leaves: id("oak_leaves"),
            spruce_leaves: id("spruce_leaves"),
        }
    }
}

#[derive(Clone, Copy)]
struct ColumnInfo {
    x: i32,
    z: i32,
    height: i32,
    temperature: f32,
    tree_height: Option<i32>,
}

pub struct NoiseWorld {
    cfg: NoiseWorldConfig,
    catalog: MaterialCatalog,
    ids: Ids,
    terrain: FastNoiseLite,
    cave: FastNoiseLite,
    temp: FastNoiseLite,
    moist: FastNoiseLite,
    focus: ChunkPos,
    last_column: Cell<Option<ColumnInfo>>,
}

impl NoiseWorld {
    /// Uses the built-in catalog.
    pub fn new(cfg: NoiseWorldConfig) -> Self {
        Self::with_catalog(cfg, MaterialCatalog::builtin())
    }

    pub fn with_catalog(cfg: NoiseWorldConfig, catalog: MaterialCatalog) -> Self {
        let cfg = cfg.sanitized();
        let mut terrain = FastNoiseLite::with_seed(cfg.seed);
        terrain.set_noise_type(Some(NoiseType::OpenSimplex2));
        terrain.set_frequency(Some(cfg.height.frequency));
        let mut cave = FastNoiseLite::with_seed(cfg.seed ^ 41_337);
        cave.set_noise_type(Some(NoiseType::OpenSimplex2));
        cave.set_frequency(Some(0.05));
        let mut temp = FastNoiseLite::with_seed(cfg.seed ^ 0x1203_5F31);
        temp.set_noise_type(Some(NoiseType::OpenSimplex2));
        temp.set_frequency(Some(cfg.climate.frequency));
        let mut moist = FastNoiseLite::with_seed(((cfg.seed as u32) ^ 0x92E3_A1B2u32) as i32);
        moist.set_noise_type(Some(NoiseType::OpenSimplex2));
        moist.set_frequency(Some(cfg.climate.frequency));
        let ids = Ids::resolve(&catalog);
        Self {
            cfg,
            catalog,
            ids,
            terrain,
            cave,
            temp,
            moist,
            focus: ChunkPos::default(),
            last_column: Cell::new(None),
        }
    }

    pub fn config(&self) -> &NoiseWorldConfig {
        &self.cfg
    }

    /// Moves the loaded area so it is centred on `column`'s chunk.
    pub fn set_focus(&mut self, column: ColumnPos) {
        self.focus = ChunkPos::containing(column);
    }

    pub fn surface_height(&self, x: i32, z: i32) -> i32 {
        self.column(x, z).height
    }

    fn column(&self, x: i32, z: i32) -> ColumnInfo {
        if let Some(info) = self.last_column.get() {
            if info.x == x && info.z == z {
                return info;
            }
        }
        let h = &self.cfg.height;
        let n = self.terrain.get_noise_2d(x as f32, z as f32);
        let span = (h.max_y - h.min_y) as f32;
        let height = (((n + 1.0) * 0.5 * span) as i32 + h.min_y)
            .clamp(self.cfg.bounds.bottom + 1, self.cfg.bounds.top - 8);
        let temperature = self.temperature_at(x, z, height);
        let on_grass = height > self.cfg.bounds.sea_level + 1 && height < h.snow_line;
        let roll = column_hash(self.cfg.seed, x, z) as f32 / u32::MAX as f32;
        let tree_height = (on_grass && roll < self.cfg.features.tree_chance)
            .then(|| 4 + (column_hash(self.cfg.seed ^ 7, x, z) % 3) as i32);
        let info = ColumnInfo {
            x,
            z,
            height,
            temperature,
            tree_height,
        };
        self.last_column.set(Some(info));
        info
    }

    fn temperature_at(&self, x: i32, z: i32, height: i32) -> f32 {
        let base = (self.temp.get_noise_2d(x as f32, z as f32) * 0.5 + 0.5).clamp(0.0, 1.0);
        let above_sea = (height - self.cfg.bounds.sea_level).max(0) as f32;
        // Up to 1.2 so the hot-dry band is reachable.
        (base * 1.2 - above_sea * self.cfg.climate.lapse_rate).max(0.0)
    }

    fn surface_block(&self, info: &ColumnInfo) -> MaterialId {
        let sea = self.cfg.bounds.sea_level;
        if info.height < sea - 3 {
            self.ids.gravel
        } else if info.height <= sea + 1 {
            self.ids.sand
        } else if info.height >= self.cfg.height.snow_line || info.temperature < 0.1 {
            self.ids.snow
        } else {
            self.ids.grass
        }
    }
}

impl WorldAccess for NoiseWorld {
    fn is_loaded(&self, chunk: ChunkPos) -> bool {
        chunk.ring_distance(self.focus) <= self.cfg.load_radius
    }

    fn material_at(&self, x: i32, y: i32, z: i32) -> Result<MaterialId, AccessError> {
        let b = &self.cfg.bounds;
        if y < b.bottom || y > b.top {
            return Err(AccessError::OutOfBounds { x, y, z });
        }
        let info = self.column(x, z);
        if y > info.height {
            if let Some(trunk) = info.tree_height {
                let above = y - info.height;
                if above <= trunk {
                    return Ok(self.ids.log);
                }
                if above <= trunk + 2 {
                    return Ok(if info.temperature < 0.3 {
                        self.ids.spruce_leaves
                    } else {
                        self.ids.leaves
                    });
                }
            }
            return Ok(if y <= b.sea_level {
                self.ids.water
            } else {
                self.ids.air
            });
        }
        if y == info.height {
            return Ok(self.surface_block(&info));
        }
        if y < info.height - 4
            && self.cave.get_noise_3d(x as f32, y as f32, z as f32) > self.cfg.features.cave_threshold
        {
            return Ok(self.ids.cave_air);
        }
        Ok(if info.height - y <= 3 {
            self.ids.dirt
        } else {
            self.ids.stone
        })
    }

    fn top_bound(&self) -> i32 {
        self.cfg.bounds.top
    }

    fn bottom_bound(&self) -> i32 {
        self.cfg.bounds.bottom
    }

    fn sea_level(&self) -> i32 {
        self.cfg.bounds.sea_level
    }

    fn catalog(&self) -> &MaterialCatalog {
        &self.catalog
    }
}

impl ClimateAccess for NoiseWorld {
    fn climate_at(&self, x: i32, _y: i32, z: i32) -> Option<Climate> {
        let info = self.column(x, z);
        let humidity = self.cfg.climate.provide_humidity.then(|| {
            (self.moist.get_noise_2d(x as f32, z as f32) * 0.5 + 0.5).clamp(0.0, 1.0)
        });
        Some(Climate {
            temperature: info.temperature,
            humidity,
        })
    }
}

fn column_hash(seed: i32, x: i32, z: i32) -> u32 {
    let mut h = seed as u32 ^ 0x9E37_79B9;
    for v in [x as u32, z as u32] {
        h = h.wrapping_mul(31).wrapping_add(v);
        h ^= h >> 15;
        h = h.wrapping_mul(0x2C1B_3C6D);
        h ^= h >> 12;
    }
    h
}
