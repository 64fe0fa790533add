//! Finds the visible surface of a column.

use geist_blocks::{MaterialId, MaterialKind};

use crate::access::{ChunkPos, ColumnPos, WorldAccess};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SurfaceSample {
    /// The column's chunk is not loaded; nothing was scanned.
    Unloaded,
    /// No solid or liquid material in the scanned range, or the accessor faulted.
    Void,
    Surface {
        column: ColumnPos,
        top: i32,
        material: MaterialId,
        water_only: bool,
    },
}

impl SurfaceSample {
    #[inline]
    pub fn is_sentinel(&self) -> bool {
        !matches!(self, SurfaceSample::Surface { .. })
    }
}

/// Scans `column` top-down between `search_top` and `search_bottom` (inclusive),
/// both clipped to the world's bounds.
///
/// The first material that is neither empty nor cave-empty is the surface. When
/// none exists, a second pass over the world's full height accepts only water
/// and marks the sample `water_only`. Accessor faults end the scan with
/// [`SurfaceSample::Void`].
pub fn sample_column<W: WorldAccess + ?Sized>(
    world: &W,
    column: ColumnPos,
    search_top: i32,
    search_bottom: i32,
) -> SurfaceSample {
    if !world.is_loaded(ChunkPos::containing(column)) {
        return SurfaceSample::Unloaded;
    }
    let top = search_top.min(world.top_bound());
    let bottom = search_bottom.max(world.bottom_bound());
    if top < bottom {
        return SurfaceSample::Void;
    }
    let catalog = world.catalog();

    for y in (bottom..=top).rev() {
        let id = match world.material_at(column.x, y, column.z) {
            Ok(id) => id,
            Err(e) => {
                log::trace!("sampler fault at ({}, {}, {}): {}", column.x, y, column.z, e);
                return SurfaceSample::Void;
            }
        };
        // Ids missing from the catalog count as solid.
        let kind = catalog.kind_of(id).unwrap_or(MaterialKind::Solid);
        if !kind.is_see_through() {
            return SurfaceSample::Surface {
                column,
                top: y,
                material: id,
                water_only: false,
            };
        }
    }

    // Inside the window the first pass would already have stopped at water.
    let (world_top, world_bottom) = (world.top_bound(), world.bottom_bound());
    if top == world_top && bottom == world_bottom {
        return SurfaceSample::Void;
    }
    for y in (world_bottom..=world_top).rev() {
        if (bottom..=top).contains(&y) {
            continue;
        }
        let id = match world.material_at(column.x, y, column.z) {
            Ok(id) => id,
            Err(e) => {
                log::trace!("sampler fault at ({}, {}, {}): {}", column.x, y, column.z, e);
                return SurfaceSample::Void;
            }
        };
        if catalog.kind_of(id) == Some(MaterialKind::Water) {
            return SurfaceSample::Surface {
                column,
                top: y,
                material: id,
                water_only: true,
            };
        }
    }

    SurfaceSample::Void
}

/// [`sample_column`] over the world's full height.
pub fn sample_full_column<W: WorldAccess + ?Sized>(world: &W, column: ColumnPos) -> SurfaceSample {
    sample_column(world, column, world.top_bound(), world.bottom_bound())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sparse::SparseWorld;
    use geist_blocks::MaterialCatalog;

    fn world() -> SparseWorld {
        SparseWorld::new(MaterialCatalog::builtin(), -8, 32, 10)
    }

    fn id(w: &SparseWorld, key: &str) -> MaterialId {
        w.catalog().get_id(key).unwrap()
    }

    #[test]
    fn finds_topmost_non_empty() {
        let mut w = world();
        let stone = id(&w, "stone");
        let grass = id(&w, "grass_block");
        w.fill(0, 0, -8..=11, stone);
        w.set(0, 12, 0, grass);
        let s = sample_full_column(&w, ColumnPos::new(0, 0));
        assert_eq!(
            s,
            SurfaceSample::Surface {
                column: ColumnPos::new(0, 0),
                top: 12,
                material: grass,
                water_only: false,
            }
        );
    }

    #[test]
    fn looks_through_cave_air() {
        let mut w = world();
        let stone = id(&w, "stone");
        let cave = id(&w, "cave_air");
        w.fill(3, 4, 0..=20, cave);
        w.set(3, 2, 4, stone);
        match sample_full_column(&w, ColumnPos::new(3, 4)) {
            SurfaceSample::Surface { top, material, .. } => {
                assert_eq!(top, 2);
                assert_eq!(material, stone);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn water_surface_is_a_regular_surface() {
        let mut w = world();
        let water = id(&w, "water");
        let sand = id(&w, "sand");
        w.fill(1, 1, 0..=5, sand);
        w.fill(1, 1, 6..=9, water);
        match sample_full_column(&w, ColumnPos::new(1, 1)) {
            SurfaceSample::Surface { top, water_only, .. } => {
                assert_eq!(top, 9);
                assert!(!water_only);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn water_outside_the_search_window_is_water_only() {
        let mut w = world();
        let water = id(&w, "water");
        let stone = id(&w, "stone");
        w.set(1, 2, 1, water);
        w.set(1, 1, 1, stone);
        assert_eq!(
            sample_column(&w, ColumnPos::new(1, 1), 32, 5),
            SurfaceSample::Surface {
                column: ColumnPos::new(1, 1),
                top: 2,
                material: water,
                water_only: true,
            }
        );
    }

    #[test]
    fn water_above_the_search_window_is_water_only() {
        let mut w = world();
        let water = id(&w, "water");
        let stone = id(&w, "stone");
        w.set(4, 30, 4, water);
        w.set(4, 25, 4, stone);
        let s = sample_column(&w, ColumnPos::new(4, 4), 20, 5);
        assert!(!s.is_sentinel());
        assert_eq!(
            s,
            SurfaceSample::Surface {
                column: ColumnPos::new(4, 4),
                top: 30,
                material: water,
                water_only: true,
            }
        );
    }

    #[test]
    fn sentinels_are_not_surfaces() {
        let mut w = world();
        assert!(sample_full_column(&w, ColumnPos::new(5, 5)).is_sentinel());
        w.unload_chunk(ChunkPos::containing(ColumnPos::new(40, 40)));
        assert!(sample_full_column(&w, ColumnPos::new(40, 40)).is_sentinel());
    }

    #[test]
    fn solids_outside_the_search_window_are_ignored() {
        let mut w = world();
        let stone = id(&w, "stone");
        w.fill(2, 2, -8..=3, stone);
        assert_eq!(sample_column(&w, ColumnPos::new(2, 2), 32, 5), SurfaceSample::Void);
    }

    #[test]
    fn empty_column_is_void() {
        let w = world();
        assert_eq!(sample_full_column(&w, ColumnPos::new(5, 5)), SurfaceSample::Void);
    }

    #[test]
    fn unloaded_column_short_circuits() {
        let mut w = world();
        let stone = id(&w, "stone");
        w.fill(40, 40, 0..=10, stone);
        w.unload_chunk(ChunkPos::containing(ColumnPos::new(40, 40)));
        assert_eq!(sample_full_column(&w, ColumnPos::new(40, 40)), SurfaceSample::Unloaded);
        assert_eq!(w.queries(), 0);
    }

    #[test]
    fn accessor_fault_becomes_void() {
        let mut w = world();
        let stone = id(&w, "stone");
        w.fill(7, 7, 0..=10, stone);
        w.fail_column(ColumnPos::new(7, 7));
        assert_eq!(sample_full_column(&w, ColumnPos::new(7, 7)), SurfaceSample::Void);
    }

    #[test]
    fn search_window_is_clipped_to_world() {
        let mut w = world();
        let stone = id(&w, "stone");
        w.set(0, 32, 0, stone);
        w.set(0, -8, 1, stone);
        assert!(matches!(
            sample_column(&w, ColumnPos::new(0, 0), 10_000, -10_000),
            SurfaceSample::Surface { top: 32, .. }
        ));
        assert!(matches!(
            sample_column(&w, ColumnPos::new(0, 1), 10_000, -10_000),
            SurfaceSample::Surface { top: -8, .. }
        ));
    }

    #[test]
    fn unknown_material_id_counts_as_solid() {
        let mut w = world();
        w.set(2, 3, 2, MaterialId(9_999));
        assert!(matches!(
            sample_full_column(&w, ColumnPos::new(2, 2)),
            SurfaceSample::Surface { top: 3, .. }
        ));
    }
}
