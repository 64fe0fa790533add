//! Explicit voxel store with controllable loading, faults and climate.
//!
//! Everything not set is `air`. Useful for hosts that mirror a remote world and
//! for deterministic tests.

use std::cell::Cell;
use std::collections::{HashMap, HashSet};
use std::ops::RangeInclusive;

use geist_blocks::{MaterialCatalog, MaterialId};

use crate::access::{AccessError, ChunkPos, Climate, ClimateAccess, ColumnPos, WorldAccess};

pub struct SparseWorld {
    catalog: MaterialCatalog,
    bottom: i32,
    top: i32,
    sea_level: i32,
    voxels: HashMap<(i32, i32, i32), MaterialId>,
    unloaded: HashSet<ChunkPos>,
    faulty: HashSet<ColumnPos>,
    climate: HashMap<ColumnPos, Climate>,
    default_climate: Option<Climate>,
    queries: Cell<u64>,
}

impl SparseWorld {
    pub fn new(catalog: MaterialCatalog, bottom: i32, top: i32, sea_level: i32) -> Self {
        Self {
            catalog,
            bottom,
            top,
            sea_level,
            voxels: HashMap::new(),
            unloaded: HashSet::new(),
            faulty: HashSet::new(),
            climate: HashMap::new(),
            default_climate: None,
            queries: Cell::new(0),
        }
    }

    pub fn set(&mut self, x: i32, y: i32, z: i32, id: MaterialId) {
        if id == MaterialId::AIR {
            self.voxels.remove(&(x, y, z));
        } else {
            self.voxels.insert((x, y, z), id);
        }
    }

    pub fn fill(&mut self, x: i32, z: i32, ys: RangeInclusive<i32>, id: MaterialId) {
        for y in ys {
            self.set(x, y, z, id);
        }
    }

    /// Resets a column to air.
    pub fn clear_column(&mut self, x: i32, z: i32) {
        self.voxels.retain(|&(vx, _, vz), _| vx != x || vz != z);
    }

    pub fn unload_chunk(&mut self, chunk: ChunkPos) {
        self.unloaded.insert(chunk);
    }

    pub fn load_chunk(&mut self, chunk: ChunkPos) {
        self.unloaded.remove(&chunk);
    }

    /// Makes every `material_at` query in `column` fail.
    pub fn fail_column(&mut self, column: ColumnPos) {
        self.faulty.insert(column);
    }

    pub fn set_climate(&mut self, column: ColumnPos, climate: Climate) {
        self.climate.insert(column, climate);
    }

    pub fn set_default_climate(&mut self, climate: Option<Climate>) {
        self.default_climate = climate;
    }

    /// Number of `material_at` calls served so far.
    pub fn queries(&self) -> u64 {
        self.queries.get()
    }
}

impl WorldAccess for SparseWorld {
    fn is_loaded(&self, chunk: ChunkPos) -> bool {
        !self.unloaded.contains(&chunk)
    }

    fn material_at(&self, x: i32, y: i32, z: i32) -> Result<MaterialId, AccessError> {
        self.queries.set(self.queries.get() + 1);
        if self.faulty.contains(&ColumnPos::new(x, z)) {
            return Err(AccessError::Unavailable(format!("column ({}, {}) is faulty", x, z)));
        }
        if y < self.bottom || y > self.top {
            return Err(AccessError::OutOfBounds { x, y, z });
        }
        Ok(self.voxels.get(&(x, y, z)).copied().unwrap_or(MaterialId::AIR))
    }

    fn top_bound(&self) -> i32 {
        self.top
    }

    fn bottom_bound(&self) -> i32 {
        self.bottom
    }

    fn sea_level(&self) -> i32 {
        self.sea_level
    }

    fn catalog(&self) -> &MaterialCatalog {
        &self.catalog
    }
}

impl ClimateAccess for SparseWorld {
    fn climate_at(&self, x: i32, _y: i32, z: i32) -> Option<Climate> {
        self.climate
            .get(&ColumnPos::new(x, z))
            .copied()
            .or(self.default_climate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world() -> SparseWorld {
        SparseWorld::new(MaterialCatalog::builtin(), 0, 16, 8)
    }

    #[test]
    fn cleared_column_reads_as_air() {
        let mut w = world();
        let stone = w.catalog().get_id("stone").unwrap();
        w.fill(1, 1, 0..=10, stone);
        w.set(2, 5, 1, stone);
        w.clear_column(1, 1);
        assert_eq!(w.material_at(1, 5, 1), Ok(MaterialId::AIR));
        assert_eq!(w.material_at(2, 5, 1), Ok(stone));
    }

    #[test]
    fn column_climate_overrides_the_default() {
        let mut w = world();
        assert_eq!(w.climate_at(0, 0, 0), None);
        let cold = Climate::with_temperature(0.1);
        let hot = Climate::with_temperature(0.95);
        w.set_default_climate(Some(cold));
        w.set_climate(ColumnPos::new(3, 3), hot);
        assert_eq!(w.climate_at(0, 0, 0), Some(cold));
        assert_eq!(w.climate_at(3, 12, 3), Some(hot));
        w.set_default_climate(None);
        assert_eq!(w.climate_at(0, 0, 0), None);
    }

    #[test]
    fn heights_outside_the_bounds_are_errors() {
        let w = world();
        assert_eq!(w.material_at(0, 17, 0), Err(AccessError::OutOfBounds { x: 0, y: 17, z: 0 }));
        assert_eq!(w.queries(), 1);
    }
}
