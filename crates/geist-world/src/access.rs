//! Read-only views of a world and its climate, as consumed by the minimap.

use geist_blocks::{MaterialCatalog, MaterialId};

pub const CHUNK_SIZE: i32 = 16;

/// Horizontal world coordinate of a column. Height never participates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColumnPos {
    pub x: i32,
    pub z: i32,
}

impl ColumnPos {
    #[inline]
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    #[inline]
    pub fn offset(self, dx: i32, dz: i32) -> Self {
        Self {
            x: self.x + dx,
            z: self.z + dz,
        }
    }

    /// Column under a floating point position (floor, so negatives round down).
    #[inline]
    pub fn containing(x: f32, z: f32) -> Self {
        Self {
            x: x.floor() as i32,
            z: z.floor() as i32,
        }
    }
}

impl From<(i32, i32)> for ColumnPos {
    fn from(value: (i32, i32)) -> Self {
        Self::new(value.0, value.1)
    }
}

/// Group of `CHUNK_SIZE x CHUNK_SIZE` columns; the unit of loading.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ChunkPos {
    pub cx: i32,
    pub cz: i32,
}

impl ChunkPos {
    #[inline]
    pub const fn new(cx: i32, cz: i32) -> Self {
        Self { cx, cz }
    }

    #[inline]
    pub fn containing(column: ColumnPos) -> Self {
        Self {
            cx: column.x.div_euclid(CHUNK_SIZE),
            cz: column.z.div_euclid(CHUNK_SIZE),
        }
    }

    /// Chebyshev distance in chunks.
    #[inline]
    pub fn ring_distance(self, other: ChunkPos) -> i32 {
        (self.cx - other.cx).abs().max((self.cz - other.cz).abs())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AccessError {
    /// Height outside the accessor's storage.
    OutOfBounds { x: i32, y: i32, z: i32 },
    /// Backing storage could not answer (e.g. chunk evicted mid-query).
    Unavailable(String),
}

impl std::fmt::Display for AccessError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AccessError::OutOfBounds { x, y, z } => {
                write!(f, "position ({}, {}, {}) out of bounds", x, y, z)
            }
            AccessError::Unavailable(msg) => write!(f, "world data unavailable: {}", msg),
        }
    }
}

impl std::error::Error for AccessError {}

/// World queries. Implementations must be non-blocking and in-memory.
pub trait WorldAccess {
    fn is_loaded(&self, chunk: ChunkPos) -> bool;
    fn material_at(&self, x: i32, y: i32, z: i32) -> Result<MaterialId, AccessError>;
    /// Highest valid y, inclusive.
    fn top_bound(&self) -> i32;
    /// Lowest valid y, inclusive.
    fn bottom_bound(&self) -> i32;
    fn sea_level(&self) -> i32;
    fn catalog(&self) -> &MaterialCatalog;
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Climate {
    pub temperature: f32,
    /// `None` when the source only knows temperature.
    pub humidity: Option<f32>,
}

impl Climate {
    #[inline]
    pub const fn with_temperature(temperature: f32) -> Self {
        Self {
            temperature,
            humidity: None,
        }
    }
}

pub trait ClimateAccess {
    /// `None` means climate is unavailable here; callers fall back to untinted colors.
    fn climate_at(&self, x: i32, y: i32, z: i32) -> Option<Climate>;
}

/// Climate source for worlds without climate data.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoClimate;

impl ClimateAccess for NoClimate {
    fn climate_at(&self, _x: i32, _y: i32, _z: i32) -> Option<Climate> {
        None
    }
}

/// Same climate everywhere.
#[derive(Clone, Copy, Debug)]
pub struct UniformClimate(pub Climate);

impl ClimateAccess for UniformClimate {
    fn climate_at(&self, _x: i32, _y: i32, _z: i32) -> Option<Climate> {
        Some(self.0)
    }
}
