use geist_geom::Vec2;
use geist_map::{Projection, Viewport};
use geist_world::ColumnPos;
use proptest::prelude::*;

fn reference() -> Projection {
    Projection::new(Viewport::new(Vec2::new(200.0, 100.0), 64.0), 64)
}

#[test]
fn zero_delta_is_center_and_inside() {
    let p = reference().project(Vec2::ZERO);
    assert_eq!(p.offset, Vec2::ZERO);
    assert_eq!(p.screen, Vec2::new(200.0, 100.0));
    assert!(p.within_circle);
}

#[test]
fn rim_boundary_is_inclusive() {
    let proj = reference();
    assert_eq!(proj.px_per_unit(), 1.0);
    assert!(proj.project(Vec2::new(63.0, 0.0)).within_circle);
    assert!(proj.project(Vec2::new(64.0, 0.0)).within_circle);
    assert!(!proj.project(Vec2::new(65.0, 0.0)).within_circle);
    assert!(proj.project(Vec2::new(0.0, -64.0)).within_circle);
    assert!(!proj.project(Vec2::new(0.0, -65.0)).within_circle);
}

#[test]
fn inset_shrinks_the_circle() {
    let proj = reference();
    assert!(proj.project_inset(Vec2::new(60.0, 0.0), 4.0).within_circle);
    assert!(!proj.project_inset(Vec2::new(61.0, 0.0), 4.0).within_circle);
}

#[test]
fn zoomed_projection_scales_offsets() {
    let proj = Projection::new(Viewport::new(Vec2::ZERO, 64.0), 32);
    assert_eq!(proj.px_per_unit(), 2.0);
    let p = proj.project(Vec2::new(3.0, -4.0));
    assert_eq!(p.offset, Vec2::new(6.0, -8.0));
}

#[test]
fn unit_stride_covers_half_open_square() {
    let proj = reference();
    let origin = ColumnPos::new(3, -5);
    let cells: Vec<_> = proj.grid(origin, 1).collect();
    assert_eq!(cells.len(), 128 * 128);
    assert_eq!(cells.iter().map(|c| c.column.x).min(), Some(3 - 64));
    assert_eq!(cells.iter().map(|c| c.column.x).max(), Some(3 + 63));
    assert_eq!(cells.iter().map(|c| c.column.z).min(), Some(-5 - 64));
    assert_eq!(cells.iter().map(|c| c.column.z).max(), Some(-5 + 63));
    assert!(cells.iter().all(|c| c.size == 1.0));
}

#[test]
fn origin_cell_sits_at_center() {
    let proj = reference();
    let origin = ColumnPos::new(10, 10);
    let cell = proj
        .grid(origin, 1)
        .find(|c| c.column == origin)
        .expect("origin column in grid");
    assert_eq!(cell.offset, Vec2::ZERO);
    assert_eq!(cell.screen, Vec2::new(200.0, 100.0));
}

#[test]
fn stride_aligns_to_world_multiples() {
    let proj = reference();
    let cells: Vec<_> = proj.grid(ColumnPos::new(1, 2), 4).collect();
    assert!(cells
        .iter()
        .all(|c| c.column.x.rem_euclid(4) == 0 && c.column.z.rem_euclid(4) == 0));
    assert!(cells.iter().all(|c| c.size == 4.0));
    // x spans [-63, 65) and z spans [-62, 66): 32 multiples of 4 each.
    assert_eq!(cells.len(), 32 * 32);
}

proptest! {
    #[test]
    fn within_matches_distance(dx in -100.0f32..100.0, dz in -100.0f32..100.0) {
        let p = reference().project(Vec2::new(dx, dz));
        prop_assert_eq!(p.within_circle, p.offset.length() <= 64.0);
    }

    #[test]
    fn grid_columns_stay_in_window(
        ox in -10_000i32..10_000,
        oz in -10_000i32..10_000,
        stride in 1u32..9,
    ) {
        let proj = Projection::new(Viewport::new(Vec2::ZERO, 16.0), 16);
        let s = stride as i32;
        for cell in proj.grid(ColumnPos::new(ox, oz), stride) {
            prop_assert!(cell.column.x >= ox - 16 && cell.column.x < ox + 16);
            prop_assert!(cell.column.z >= oz - 16 && cell.column.z < oz + 16);
            prop_assert_eq!(cell.column.x.rem_euclid(s), 0);
            prop_assert_eq!(cell.column.z.rem_euclid(s), 0);
        }
    }
}
