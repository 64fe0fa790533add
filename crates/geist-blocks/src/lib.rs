//! Material catalog and material -> color classification.
#![forbid(unsafe_code)]

pub mod color;
pub mod material;
pub mod palette;
pub mod types;

pub use color::{Rgb, Rgba};
pub use material::{Material, MaterialCatalog};
pub use palette::Palette;
pub use types::{MaterialId, MaterialKind, MaterialTag};
