use geist_blocks::Rgb;
use geist_geom::Vec3;

pub const DEFAULT_MARKER_COLOR: Rgb = Rgb::from_packed(0xFF0000);

/// A named world position shown as a marker. Owned by the host.
#[derive(Clone, Debug, PartialEq)]
pub struct Waypoint {
    pub name: String,
    pub position: Vec3,
    pub color: Rgb,
}

impl Waypoint {
    pub fn new(name: impl Into<String>, position: Vec3) -> Self {
        Self {
            name: name.into(),
            position,
            color: DEFAULT_MARKER_COLOR,
        }
    }

    pub fn with_color(mut self, color: Rgb) -> Self {
        self.color = color;
        self
    }
}
