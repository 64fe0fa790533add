mod viewpoint;
mod waypoints;

use std::path::{Path, PathBuf};
use std::sync::mpsc::{Receiver, channel};

use clap::Parser;
use geist_geom::Vec3;
use geist_map::{MinimapConfig, MinimapEngine, Waypoint};
use geist_render_raylib::draw_frame;
use geist_world::{ColumnPos, NoiseWorld, NoiseWorldConfig, WorldAccess};
use raylib::prelude::*;

use viewpoint::{MoveInput, Player};

#[derive(Parser, Debug)]
#[command(name = "geist-minimap")]
#[command(about = "Circular terrain minimap over a procedural world")]
struct Args {
    /// Minimap config (TOML). Watched and reloaded on change.
    #[arg(short, long, default_value = "assets/minimap.toml")]
    config: PathBuf,

    /// Waypoint file (TOML, `[[waypoints]]` tables).
    #[arg(short, long)]
    waypoints: Option<PathBuf>,

    /// Demo world parameters (TOML).
    #[arg(long)]
    world: Option<PathBuf>,

    /// Overrides the world seed.
    #[arg(short, long)]
    seed: Option<i32>,

    #[arg(long, default_value_t = 1024)]
    width: i32,

    #[arg(long, default_value_t = 640)]
    height: i32,

    /// Default log filter when RUST_LOG is unset.
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn load_minimap_config(path: &Path) -> MinimapConfig {
    if !path.exists() {
        log::info!("minimap config {:?} not found; using defaults", path);
        return MinimapConfig::default();
    }
    match MinimapConfig::from_path(path) {
        Ok(cfg) => cfg,
        Err(e) => {
            log::warn!("failed to load minimap config {:?}: {}; using defaults", path, e);
            MinimapConfig::default()
        }
    }
}

fn load_world_config(path: Option<&Path>) -> NoiseWorldConfig {
    let Some(path) = path else {
        return NoiseWorldConfig::default();
    };
    match NoiseWorldConfig::from_path(path) {
        Ok(cfg) => cfg,
        Err(e) => {
            log::warn!("failed to load world config {:?}: {}; using defaults", path, e);
            NoiseWorldConfig::default()
        }
    }
}

fn load_waypoints(path: Option<&Path>) -> Vec<Waypoint> {
    let Some(path) = path else {
        return Vec::new();
    };
    match waypoints::load(path) {
        Ok(wps) => {
            log::info!("loaded {} waypoints from {:?}", wps.len(), path);
            wps
        }
        Err(e) => {
            log::warn!("failed to load waypoints {:?}: {}", path, e);
            Vec::new()
        }
    }
}

/// Signals on every change to `path`. The watcher lives on its own thread.
fn watch_file(path: PathBuf) -> Receiver<()> {
    let (tx, rx) = channel::<()>();
    std::thread::spawn(move || {
        use notify::{EventKind, RecursiveMode, Watcher};
        let watcher = notify::recommended_watcher(move |res: Result<notify::Event, notify::Error>| {
            if let Ok(event) = res {
                match event.kind {
                    EventKind::Modify(_) | EventKind::Create(_) | EventKind::Any => {
                        let _ = tx.send(());
                    }
                    _ => {}
                }
            }
        });
        match watcher {
            Ok(mut watcher) => {
                if let Err(e) = watcher.watch(&path, RecursiveMode::NonRecursive) {
                    log::warn!("cannot watch {:?}: {}", path, e);
                    return;
                }
                loop {
                    std::thread::sleep(std::time::Duration::from_secs(3600));
                }
            }
            Err(e) => log::warn!("file watcher unavailable: {}", e),
        }
    });
    rx
}

fn axis(rl: &RaylibHandle, pos: KeyboardKey, neg: KeyboardKey) -> f32 {
    let mut v = 0.0;
    if rl.is_key_down(pos) {
        v += 1.0;
    }
    if rl.is_key_down(neg) {
        v -= 1.0;
    }
    v
}

fn read_input(rl: &RaylibHandle) -> MoveInput {
    MoveInput {
        forward: axis(rl, KeyboardKey::KEY_W, KeyboardKey::KEY_S),
        strafe: axis(rl, KeyboardKey::KEY_D, KeyboardKey::KEY_A),
        rise: axis(rl, KeyboardKey::KEY_SPACE, KeyboardKey::KEY_LEFT_SHIFT),
        turn: axis(rl, KeyboardKey::KEY_E, KeyboardKey::KEY_Q),
    }
}

fn main() {
    let args = Args::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&args.log_level))
        .init();

    let mut world_cfg = load_world_config(args.world.as_deref());
    if let Some(seed) = args.seed {
        world_cfg.seed = seed;
    }
    log::info!("world seed {}", world_cfg.seed);
    let mut world = NoiseWorld::new(world_cfg);

    let mut engine = MinimapEngine::new(load_minimap_config(&args.config));
    let reload_rx = args
        .config
        .exists()
        .then(|| watch_file(args.config.clone()));
    let mut waypoints = load_waypoints(args.waypoints.as_deref());

    let spawn_y = world.surface_height(0, 0) as f32 + 2.0;
    let mut player = Player::new(Vec3::new(0.5, spawn_y, 0.5));

    let (mut rl, thread) = raylib::init()
        .size(args.width, args.height)
        .title("Geist Minimap")
        .resizable()
        .build();
    rl.set_target_fps(60);
    log::info!("minimap demo started ({}x{})", args.width, args.height);

    while !rl.window_should_close() {
        if let Some(rx) = &reload_rx {
            if rx.try_iter().count() > 0 {
                log::info!("minimap config changed; rebuilding engine");
                engine = MinimapEngine::new(load_minimap_config(&args.config));
            }
        }

        let dt = rl.get_frame_time();
        player.step(&read_input(&rl), dt);
        if rl.is_key_pressed(KeyboardKey::KEY_P) {
            let name = format!("waypoint {}", waypoints.len() + 1);
            log::info!("dropped {} at {:?}", name, player.position);
            waypoints.push(Waypoint::new(name, player.position));
        }
        world.set_focus(ColumnPos::containing(player.position.x, player.position.z));

        let (w, h) = (rl.get_screen_width() as f32, rl.get_screen_height() as f32);
        let viewport = engine.anchored_viewport(w, h);
        let frame = engine.render_frame(viewport, Some(&player), Some(&world), &world, &waypoints);

        let mut d = rl.begin_drawing(&thread);
        d.clear_background(Color::new(24, 26, 32, 255));
        if let Some(frame) = &frame {
            draw_frame(&mut d, frame);
        }
        let stats = engine.cache_stats();
        d.draw_text(
            "WASD move, Q/E turn, Space/Shift rise/fall, P drop waypoint",
            12,
            12,
            18,
            Color::LIGHTGRAY,
        );
        d.draw_text(
            &format!(
                "sea {}  cache {} colors, {} hits, {} misses, {} clears",
                world.sea_level(),
                stats.entries,
                stats.hits,
                stats.misses,
                stats.clears
            ),
            12,
            36,
            16,
            Color::GRAY,
        );
        d.draw_fps(12, 60);
    }
}
