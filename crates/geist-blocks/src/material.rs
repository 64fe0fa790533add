use std::collections::HashMap;
use std::error::Error;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use super::types::{MaterialId, MaterialKind, MaterialTag};

#[derive(Clone, Debug, PartialEq)]
pub struct Material {
    pub id: MaterialId,
    pub key: String,
    pub kind: MaterialKind,
    pub tag: Option<MaterialTag>,
}

impl Material {
    /// Key without its `namespace:` prefix.
    #[inline]
    pub fn local_key(&self) -> &str {
        strip_namespace(&self.key)
    }

    /// Grass and foliage receive the climate tint.
    pub fn is_foliage(&self) -> bool {
        match self.tag {
            Some(MaterialTag::Leaves) | Some(MaterialTag::Grass) => true,
            _ => {
                let k = self.local_key();
                k == "grass_block" || k.ends_with("leaves")
            }
        }
    }
}

#[inline]
pub fn strip_namespace(key: &str) -> &str {
    key.rsplit_once(':').map(|(_, local)| local).unwrap_or(key)
}

const BUILTIN: &[(&str, MaterialKind, Option<MaterialTag>)] = &[
    ("cave_air", MaterialKind::CaveEmpty, None),
    ("void_air", MaterialKind::Empty, None),
    ("water", MaterialKind::Water, None),
    ("lava", MaterialKind::Solid, None),
    ("ice", MaterialKind::Solid, None),
    ("packed_ice", MaterialKind::Solid, None),
    ("blue_ice", MaterialKind::Solid, None),
    ("grass_block", MaterialKind::Solid, Some(MaterialTag::Grass)),
    ("dirt", MaterialKind::Solid, None),
    ("coarse_dirt", MaterialKind::Solid, None),
    ("podzol", MaterialKind::Solid, None),
    ("mycelium", MaterialKind::Solid, None),
    ("sand", MaterialKind::Solid, None),
    ("red_sand", MaterialKind::Solid, None),
    ("sandstone", MaterialKind::Solid, None),
    ("gravel", MaterialKind::Solid, None),
    ("clay", MaterialKind::Solid, None),
    ("stone", MaterialKind::Solid, None),
    ("cobblestone", MaterialKind::Solid, None),
    ("deepslate", MaterialKind::Solid, None),
    ("granite", MaterialKind::Solid, None),
    ("diorite", MaterialKind::Solid, None),
    ("andesite", MaterialKind::Solid, None),
    ("bedrock", MaterialKind::Solid, None),
    ("snow", MaterialKind::Solid, None),
    ("snow_block", MaterialKind::Solid, None),
    ("oak_log", MaterialKind::Solid, Some(MaterialTag::Wood)),
    ("birch_log", MaterialKind::Solid, Some(MaterialTag::Wood)),
    ("spruce_log", MaterialKind::Solid, Some(MaterialTag::Wood)),
    ("oak_leaves", MaterialKind::Solid, Some(MaterialTag::Leaves)),
    ("birch_leaves", MaterialKind::Solid, Some(MaterialTag::Leaves)),
    ("spruce_leaves", MaterialKind::Solid, Some(MaterialTag::Leaves)),
    ("jungle_leaves", MaterialKind::Solid, Some(MaterialTag::Leaves)),
    ("coal_ore", MaterialKind::Solid, Some(MaterialTag::Ore)),
    ("iron_ore", MaterialKind::Solid, Some(MaterialTag::Ore)),
    ("netherrack", MaterialKind::Solid, None),
    ("end_stone", MaterialKind::Solid, None),
];

#[derive(Clone, Debug)]
pub struct MaterialCatalog {
    pub materials: Vec<Material>,
    pub by_key: HashMap<String, MaterialId>,
}

impl Default for MaterialCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl MaterialCatalog {
    /// Catalog holding only `air` at id 0.
    pub fn new() -> Self {
        let mut catalog = Self {
            materials: Vec::new(),
            by_key: HashMap::new(),
        };
        catalog.insert("air", MaterialKind::Empty, None);
        catalog
    }

    /// Vanilla-like materials used by the demo worlds and tests.
    pub fn builtin() -> Self {
        let mut catalog = Self::new();
        for (key, kind, tag) in BUILTIN {
            catalog.insert(key, *kind, *tag);
        }
        catalog
    }

    /// Registers `key`, returning the existing id if the key is already known.
    pub fn insert(&mut self, key: &str, kind: MaterialKind, tag: Option<MaterialTag>) -> MaterialId {
        if let Some(id) = self.by_key.get(key) {
            return *id;
        }
        let id = MaterialId(self.materials.len() as u16);
        self.by_key.insert(key.to_string(), id);
        self.materials.push(Material {
            id,
            key: key.to_string(),
            kind,
            tag,
        });
        id
    }

    pub fn get_id(&self, key: &str) -> Option<MaterialId> {
        self.by_key.get(key).copied()
    }

    pub fn get(&self, id: MaterialId) -> Option<&Material> {
        self.materials.get(id.0 as usize)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.materials.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    pub fn kind_of(&self, id: MaterialId) -> Option<MaterialKind> {
        self.get(id).map(|m| m.kind)
    }

    pub fn from_toml_str(toml_str: &str) -> Result<Self, Box<dyn Error>> {
        let mut catalog = MaterialCatalog::new();
        catalog.extend_from_toml_str(toml_str)?;
        Ok(catalog)
    }

    /// Appends third-party materials. Keys already present keep their id.
    pub fn extend_from_toml_str(&mut self, toml_str: &str) -> Result<(), Box<dyn Error>> {
        let cfg: MaterialsConfig = toml::from_str(toml_str)?;
        let mut entries: Vec<(String, MaterialEntry)> = cfg.materials.into_iter().collect();
        // HashMap iteration order is nondeterministic; sort keys so MaterialId assignment is stable.
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        for (key, entry) in entries {
            let (kind, tag) = match entry {
                MaterialEntry::Kind(kind) => (kind, None),
                MaterialEntry::Detail { kind, tag } => (kind.unwrap_or_default(), tag),
            };
            self.insert(&key, kind, tag);
        }
        Ok(())
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, Box<dyn Error>> {
        let s = fs::read_to_string(path)?;
        Self::from_toml_str(&s)
    }
}

// --- Config ---

#[derive(Deserialize)]
pub struct MaterialsConfig {
    pub materials: HashMap<String, MaterialEntry>,
}

#[derive(Deserialize)]
#[serde(untagged)]
pub enum MaterialEntry {
    // Simple: ruby_block = "solid"
    Kind(MaterialKind),
    // Detailed: jade_leaves = { kind = "solid", tag = "leaves" }
    Detail {
        kind: Option<MaterialKind>,
        tag: Option<MaterialTag>,
    },
}
