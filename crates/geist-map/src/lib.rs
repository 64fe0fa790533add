//! Minimap engine: terrain color resolution with an epoch cache, circular
//! projection and overlay composition into backend-neutral draw commands.
#![forbid(unsafe_code)]

pub mod cache;
pub mod config;
pub mod draw;
pub mod frame;
pub mod overlay;
pub mod projection;
pub mod shade;
pub mod waypoint;

pub use cache::{CacheStats, Clock, ColorCache, ManualClock, SystemClock};
pub use config::MinimapConfig;
pub use draw::DrawCommand;
pub use frame::{FramePhase, MinimapEngine, MinimapFrame, Viewpoint, resolve_column};
pub use projection::{GridCell, Projected, Projection, Viewport};
pub use shade::{ShadeParams, tint};
pub use waypoint::Waypoint;
