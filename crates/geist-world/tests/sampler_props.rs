use geist_blocks::{MaterialCatalog, MaterialId, MaterialKind};
use geist_world::{
    ColumnPos, NoiseWorld, NoiseWorldConfig, SparseWorld, SurfaceSample, WorldAccess,
    sample_full_column,
};
use proptest::prelude::*;

const KEYS: &[&str] = &["air", "cave_air", "water", "stone", "sand", "oak_leaves"];

fn arb_stack() -> impl Strategy<Value = Vec<usize>> {
    prop::collection::vec(0usize..KEYS.len(), 1..40)
}

proptest! {
    // The sample is the highest voxel that is neither air nor cave air.
    #[test]
    fn sample_is_topmost_visible(stack in arb_stack()) {
        let mut w = SparseWorld::new(MaterialCatalog::builtin(), 0, 63, 32);
        let ids: Vec<MaterialId> = KEYS
            .iter()
            .map(|k| w.catalog().get_id(k).unwrap())
            .collect();
        for (y, &k) in stack.iter().enumerate() {
            w.set(4, y as i32, 4, ids[k]);
        }
        let expected = stack.iter().enumerate().rev().find(|(_, k)| {
            !w.catalog().kind_of(ids[**k]).unwrap().is_see_through()
        });
        let got = sample_full_column(&w, ColumnPos::new(4, 4));
        match expected {
            Some((y, &k)) => prop_assert_eq!(
                got,
                SurfaceSample::Surface {
                    column: ColumnPos::new(4, 4),
                    top: y as i32,
                    material: ids[k],
                    water_only: false,
                }
            ),
            None => prop_assert_eq!(got, SurfaceSample::Void),
        }
    }

    #[test]
    fn noise_world_is_deterministic(seed in any::<i32>(), x in -2000i32..2000, z in -2000i32..2000) {
        let cfg = NoiseWorldConfig { seed, ..Default::default() };
        let mut a = NoiseWorld::new(cfg.clone());
        let mut b = NoiseWorld::new(cfg);
        a.set_focus(ColumnPos::new(x, z));
        b.set_focus(ColumnPos::new(x, z));
        prop_assert_eq!(
            sample_full_column(&a, ColumnPos::new(x, z)),
            sample_full_column(&b, ColumnPos::new(x, z))
        );
    }
}

#[test]
fn noise_world_surface_is_never_empty() {
    let mut w = NoiseWorld::new(NoiseWorldConfig::default());
    w.set_focus(ColumnPos::new(0, 0));
    for x in -8..8 {
        for z in -8..8 {
            match sample_full_column(&w, ColumnPos::new(x, z)) {
                SurfaceSample::Surface { material, .. } => {
                    let kind = w.catalog().kind_of(material).unwrap();
                    assert!(!matches!(kind, MaterialKind::Empty | MaterialKind::CaveEmpty));
                }
                other => panic!("({}, {}) sampled {:?}", x, z, other),
            }
        }
    }
}
