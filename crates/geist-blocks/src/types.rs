use serde::Deserialize;

/// Dense index into a [`crate::MaterialCatalog`]. Id 0 is always `air`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MaterialId(pub u16);

impl MaterialId {
    pub const AIR: MaterialId = MaterialId(0);
}

/// How the surface sampler treats a material while scanning a column.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaterialKind {
    #[default]
    Solid,
    Empty,
    CaveEmpty,
    Water,
}

impl MaterialKind {
    /// Empty and cave-empty cells are looked through when finding a surface.
    #[inline]
    pub fn is_see_through(self) -> bool {
        matches!(self, MaterialKind::Empty | MaterialKind::CaveEmpty)
    }
}

/// Coarse category used by the classifier heuristics and the climate tint.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaterialTag {
    Leaves,
    Grass,
    Ore,
    Wood,
}
