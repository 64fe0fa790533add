//! World access traits, column sampling, and the demo/test worlds.
#![forbid(unsafe_code)]

pub mod access;
pub mod noise;
pub mod sampler;
pub mod sparse;

pub use access::{
    AccessError, CHUNK_SIZE, ChunkPos, Climate, ClimateAccess, ColumnPos, NoClimate,
    UniformClimate, WorldAccess,
};
pub use noise::{NoiseWorld, NoiseWorldConfig};
pub use sampler::{SurfaceSample, sample_column, sample_full_column};
pub use sparse::SparseWorld;
