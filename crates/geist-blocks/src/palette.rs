//! Material -> base color classification.
//!
//! Lookup is two-tier: an exact table keyed by the material's local key, then
//! name/tag heuristics for materials the table has never heard of. It never
//! fails; the last resort is [`FALLBACK_COLOR`].

use std::collections::HashMap;

use crate::color::Rgb;
use crate::material::{Material, MaterialCatalog, strip_namespace};
use crate::types::{MaterialId, MaterialTag};

pub const FALLBACK_COLOR: Rgb = Rgb::from_packed(0x8E8E8E);
pub const FOLIAGE_COLOR: Rgb = Rgb::from_packed(0x59AE30);
pub const GRASS_COLOR: Rgb = Rgb::from_packed(0x7CB342);
pub const BARK_COLOR: Rgb = Rgb::from_packed(0x976F3A);

const BASE_COLORS: &[(&str, u32)] = &[
    // liquids and ice
    ("water", 0x4A6EF7),
    ("lava", 0xFF4000),
    ("ice", 0xA0C4E4),
    ("packed_ice", 0xA0C4E4),
    ("blue_ice", 0xA0C4E4),
    // soil
    ("grass_block", 0x7CB342),
    ("dirt", 0x976F3A),
    ("coarse_dirt", 0x976F3A),
    ("podzol", 0x594A2E),
    ("mycelium", 0x705D75),
    ("gravel", 0x8A8480),
    ("clay", 0xA3A3A3),
    // sand
    ("sand", 0xF7E9A3),
    ("red_sand", 0xD68C59),
    ("sandstone", 0xF7E9A3),
    ("red_sandstone", 0xD68C59),
    // stone
    ("stone", 0x999999),
    ("cobblestone", 0x999999),
    ("deepslate", 0x646464),
    ("cobbled_deepslate", 0x646464),
    ("granite", 0x9F6A42),
    ("diorite", 0xC4C4C4),
    ("andesite", 0x8A8A8A),
    ("bedrock", 0x565656),
    // snow
    ("snow", 0xFFFEFE),
    ("snow_block", 0xFFFEFE),
    ("powder_snow", 0xFFFEFE),
    // logs
    ("oak_log", 0x976F3A),
    ("oak_wood", 0x976F3A),
    ("birch_log", 0xD7CA8B),
    ("birch_wood", 0xD7CA8B),
    ("spruce_log", 0x6B4423),
    ("spruce_wood", 0x6B4423),
    ("jungle_log", 0x976F3A),
    ("jungle_wood", 0x976F3A),
    ("acacia_log", 0xBA7E53),
    ("acacia_wood", 0xBA7E53),
    ("dark_oak_log", 0x4A2F17),
    ("dark_oak_wood", 0x4A2F17),
    ("cherry_log", 0xE8B4CB),
    ("cherry_wood", 0xE8B4CB),
    ("mangrove_log", 0x7A5543),
    ("mangrove_wood", 0x7A5543),
    // leaves
    ("oak_leaves", 0x59AE30),
    ("birch_leaves", 0x8DB360),
    ("spruce_leaves", 0x619A3C),
    ("jungle_leaves", 0x30B95A),
    ("acacia_leaves", 0x9CAB3C),
    ("dark_oak_leaves", 0x2D5016),
    ("cherry_leaves", 0xF2B2D6),
    ("mangrove_leaves", 0x59AE30),
    // nether
    ("netherrack", 0x7A342A),
    ("nether_bricks", 0x2C1414),
    ("soul_sand", 0x4C3426),
    ("soul_soil", 0x4C3426),
    ("crimson_nylium", 0x943F61),
    ("warped_nylium", 0x167E86),
    // end
    ("end_stone", 0xE0D99A),
    ("purpur_block", 0xAB8AAB),
];

/// Ore colors, also used by the `*ore*` heuristic.
const ORE_COLORS: &[(&str, u32)] = &[
    ("coal", 0x343434),
    ("iron", 0xD8AF93),
    ("gold", 0xFCEE4B),
    ("diamond", 0x5CDBD5),
    ("emerald", 0x00D93A),
    ("redstone", 0xD93A00),
    ("lapis", 0x4A4AFF),
    ("copper", 0xFF6A00),
    ("quartz", 0xE8E2D8),
];

const DYE_COLORS: &[(&str, u32)] = &[
    ("white", 0xD5D5D5),
    ("orange", 0xE06101),
    ("magenta", 0xA9309F),
    ("light_blue", 0x2489C7),
    ("yellow", 0xF9D71C),
    ("lime", 0x5EA918),
    ("pink", 0xD5658E),
    ("gray", 0x373A3E),
    ("light_gray", 0x7D7D73),
    ("cyan", 0x157788),
    ("purple", 0x64209C),
    ("blue", 0x3C44AA),
    ("brown", 0x603B1F),
    ("green", 0x5E7C16),
    ("red", 0xB02E26),
    ("black", 0x1D1D1D),
];

const DYED_SUFFIXES: &[&str] = &[
    "_concrete_powder",
    "_concrete",
    "_glazed_terracotta",
    "_terracotta",
    "_wool",
    "_carpet",
    "_stained_glass",
];

const BARK_SUFFIXES: &[&str] = &["_log", "_wood", "_stem", "_hyphae"];

/// Broad families checked last, by substring.
const FAMILY_COLORS: &[(&str, u32)] = &[
    ("water", 0x4A6EF7),
    ("lava", 0xFF4000),
    ("ice", 0xA0C4E4),
    ("snow", 0xFFFEFE),
    ("sand", 0xF7E9A3),
    ("deepslate", 0x646464),
    ("stone", 0x999999),
];

#[derive(Clone, Debug)]
pub struct Palette {
    exact: HashMap<&'static str, Rgb>,
    overrides: HashMap<String, Rgb>,
}

impl Default for Palette {
    fn default() -> Self {
        Self::new()
    }
}

impl Palette {
    pub fn new() -> Self {
        Self {
            exact: BASE_COLORS
                .iter()
                .map(|(k, c)| (*k, Rgb::from_packed(*c)))
                .collect(),
            overrides: HashMap::new(),
        }
    }

    /// Palette with per-key overrides. Keys may be namespaced (`mymod:ruby`) or local.
    pub fn with_overrides<I, K>(overrides: I) -> Self
    where
        I: IntoIterator<Item = (K, u32)>,
        K: Into<String>,
    {
        let mut palette = Self::new();
        for (k, c) in overrides {
            palette.overrides.insert(k.into(), Rgb::from_packed(c));
        }
        palette
    }

    pub fn classify(&self, material: &Material) -> Rgb {
        self.classify_key_tagged(&material.key, material.tag)
    }

    /// Classifies by id; ids unknown to the catalog get the fallback color.
    pub fn classify_id(&self, catalog: &MaterialCatalog, id: MaterialId) -> Rgb {
        catalog
            .get(id)
            .map(|m| self.classify(m))
            .unwrap_or(FALLBACK_COLOR)
    }

    /// Classifies a bare key with no catalog entry.
    pub fn classify_key(&self, key: &str) -> Rgb {
        self.classify_key_tagged(key, None)
    }

    fn classify_key_tagged(&self, key: &str, tag: Option<MaterialTag>) -> Rgb {
        let local = strip_namespace(key);
        if let Some(c) = self.overrides.get(key).or_else(|| self.overrides.get(local)) {
            return *c;
        }
        if let Some(c) = self.exact.get(local) {
            return *c;
        }
        heuristic_color(local, tag).unwrap_or(FALLBACK_COLOR)
    }
}

fn heuristic_color(local: &str, tag: Option<MaterialTag>) -> Option<Rgb> {
    if local.contains("ore") || tag == Some(MaterialTag::Ore) {
        if let Some((_, c)) = ORE_COLORS.iter().find(|(ore, _)| local.contains(ore)) {
            return Some(Rgb::from_packed(*c));
        }
    }
    if tag == Some(MaterialTag::Leaves) || local.ends_with("leaves") {
        return Some(FOLIAGE_COLOR);
    }
    if tag == Some(MaterialTag::Grass) {
        return Some(GRASS_COLOR);
    }
    if tag == Some(MaterialTag::Wood) || BARK_SUFFIXES.iter().any(|s| local.ends_with(s)) {
        return Some(BARK_COLOR);
    }
    if let Some(c) = dyed_color(local) {
        return Some(c);
    }
    FAMILY_COLORS
        .iter()
        .find(|(family, _)| local.contains(family))
        .map(|(_, c)| Rgb::from_packed(*c))
}

fn dyed_color(local: &str) -> Option<Rgb> {
    let suffix = DYED_SUFFIXES.iter().find(|s| local.ends_with(*s))?;
    let dye = &local[..local.len() - suffix.len()];
    DYE_COLORS
        .iter()
        .find(|(name, _)| *name == dye)
        .map(|(_, c)| Rgb::from_packed(*c))
}
