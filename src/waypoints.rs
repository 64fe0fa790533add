//! Waypoint file loading (`[[waypoints]] name, x, y, z, color`).

use std::error::Error;
use std::fs;
use std::path::Path;

use geist_blocks::Rgb;
use geist_geom::Vec3;
use geist_map::Waypoint;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct WaypointFile {
    #[serde(default)]
    waypoints: Vec<WaypointEntry>,
}

#[derive(Debug, Deserialize)]
struct WaypointEntry {
    name: String,
    x: f32,
    y: f32,
    z: f32,
    /// 0xRRGGBB; markers are red when absent.
    #[serde(default)]
    color: Option<u32>,
}

impl From<WaypointEntry> for Waypoint {
    fn from(e: WaypointEntry) -> Self {
        let wp = Waypoint::new(e.name, Vec3::new(e.x, e.y, e.z));
        match e.color {
            Some(c) => wp.with_color(Rgb::from_packed(c)),
            None => wp,
        }
    }
}

pub fn parse(toml_str: &str) -> Result<Vec<Waypoint>, Box<dyn Error>> {
    let file: WaypointFile = toml::from_str(toml_str)?;
    Ok(file.waypoints.into_iter().map(Waypoint::from).collect())
}

pub fn load(path: &Path) -> Result<Vec<Waypoint>, Box<dyn Error>> {
    let s = fs::read_to_string(path)?;
    parse(&s)
}
