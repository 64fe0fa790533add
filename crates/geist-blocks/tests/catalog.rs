use geist_blocks::material::MaterialCatalog;
use geist_blocks::types::{MaterialId, MaterialKind, MaterialTag};

#[test]
fn material_catalog_reserves_zero_id_for_air() {
    let materials = MaterialCatalog::from_toml_str(
        r#"
        [materials]
        jungle_leaves = { tag = "leaves" }
        unknown = "solid"
    "#,
    )
    .unwrap();
    assert_eq!(materials.materials[0].key, "air");
    assert_eq!(materials.kind_of(MaterialId::AIR), Some(MaterialKind::Empty));
    let jungle = materials.get_id("jungle_leaves").unwrap();
    let unknown = materials.get_id("unknown").unwrap();
    assert!(jungle.0 > 0);
    assert!(unknown.0 > 0);
    assert_eq!(materials.get(jungle).unwrap().tag, Some(MaterialTag::Leaves));
    assert_eq!(materials.get(jungle).unwrap().kind, MaterialKind::Solid);
}

#[test]
fn toml_ids_are_assigned_in_key_order() {
    let a = MaterialCatalog::from_toml_str(
        r#"
        [materials]
        zeta = "solid"
        alpha = "water"
        mid = { kind = "cave_empty" }
    "#,
    )
    .unwrap();
    assert_eq!(a.get_id("alpha"), Some(MaterialId(1)));
    assert_eq!(a.get_id("mid"), Some(MaterialId(2)));
    assert_eq!(a.get_id("zeta"), Some(MaterialId(3)));
    assert_eq!(a.kind_of(MaterialId(1)), Some(MaterialKind::Water));
    assert_eq!(a.kind_of(MaterialId(2)), Some(MaterialKind::CaveEmpty));
}

#[test]
fn extending_builtin_keeps_existing_ids() {
    let mut catalog = MaterialCatalog::builtin();
    let stone = catalog.get_id("stone").unwrap();
    let before = catalog.len();
    catalog
        .extend_from_toml_str(
            r#"
            [materials]
            stone = "water"
            "mymod:ruby_block" = "solid"
        "#,
        )
        .unwrap();
    assert_eq!(catalog.get_id("stone"), Some(stone));
    assert_eq!(catalog.kind_of(stone), Some(MaterialKind::Solid));
    assert_eq!(catalog.len(), before + 1);
    let ruby = catalog.get(catalog.get_id("mymod:ruby_block").unwrap()).unwrap();
    assert_eq!(ruby.local_key(), "ruby_block");
}

#[test]
fn builtin_marks_see_through_and_foliage() {
    let catalog = MaterialCatalog::builtin();
    let kind = |k: &str| catalog.kind_of(catalog.get_id(k).unwrap()).unwrap();
    assert!(kind("air").is_see_through());
    assert!(kind("cave_air").is_see_through());
    assert!(!kind("water").is_see_through());
    assert_eq!(kind("water"), MaterialKind::Water);
    let mat = |k: &str| catalog.get(catalog.get_id(k).unwrap()).unwrap().clone();
    assert!(mat("grass_block").is_foliage());
    assert!(mat("birch_leaves").is_foliage());
    assert!(!mat("stone").is_foliage());
}

#[test]
fn invalid_kind_is_a_parse_error() {
    let res = MaterialCatalog::from_toml_str(
        r#"
        [materials]
        bogus = "plasma"
    "#,
    );
    assert!(res.is_err());
}
