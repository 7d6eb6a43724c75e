//! Super Maro - headless attract-mode runner
//!
//! Plays one autopilot run through the normal session flow, saves the
//! score, logs the leaderboard and writes the last frame to a PNG.

use std::path::Path;
use std::time::{Duration, Instant};

use super_maro::SpriteCatalog;
use super_maro::audio::open_audio;
use super_maro::consts::{SIM_DT, TICKS_PER_SECOND};
use super_maro::highscores::HighScores;
use super_maro::persistence::{DisabledStore, JsonFileStore, ScoreStore};
use super_maro::platform::{FixedStep, Key};
use super_maro::renderer::{Renderer, SoftwareRenderer};
use super_maro::settings::{SETTINGS_FILE, Settings};
use super_maro::sim::autopilot;
use super_maro::ui::App;

/// Name typed on the menu for the demo run
const DEMO_NAME: &str = "Autopilot";
/// Give up after five minutes of simulated play
const MAX_DEMO_TICKS: u64 = TICKS_PER_SECOND as u64 * 60 * 5;
const FRAME_PATH: &str = "super_maro_last_frame.png";

fn open_store(settings: &Settings) -> Box<dyn ScoreStore> {
    match JsonFileStore::open(&settings.scores_path) {
        Ok(store) => Box::new(store),
        Err(err) => {
            log::warn!("Scores will not be saved: {err}");
            Box::new(DisabledStore::new(err.to_string()))
        }
    }
}

fn main() {
    env_logger::init();
    log::info!("Super Maro (headless) starting...");

    let settings = Settings::load(Path::new(SETTINGS_FILE));
    let mut catalog = SpriteCatalog::load(&settings.asset_dir);
    if catalog.obstacle_count() == 0 {
        log::warn!(
            "No obstacle images under {}; using generated sprites",
            settings.asset_dir.display()
        );
        catalog = SpriteCatalog::procedural();
    }
    let audio = open_audio(&settings);
    let store = open_store(&settings);
    let realtime = settings.realtime;

    let mut app = App::new(catalog, settings, store, audio);
    let mut renderer = SoftwareRenderer::new();

    for ch in DEMO_NAME.chars() {
        app.handle_key(Key::Char(ch));
    }
    app.handle_key(Key::Enter);

    let mut clock = FixedStep::new();
    let mut last = Instant::now();
    let mut ticks = 0u64;
    let mut result = None;

    while result.is_none() && ticks < MAX_DEMO_TICKS {
        let steps = if realtime {
            std::thread::sleep(Duration::from_secs_f32(SIM_DT));
            let now = Instant::now();
            let dt = now.duration_since(last).as_secs_f32();
            last = now;
            clock.advance(dt)
        } else {
            1
        };

        for _ in 0..steps {
            let Some(run) = app.run() else {
                break;
            };
            renderer.present(&app.frame());
            let input = autopilot(run);
            app.queue_input(input);
            ticks += 1;
            if let Some(ended) = app.update() {
                result = Some(ended);
                break;
            }
        }
    }

    match &result {
        Some(result) => {
            log::info!(
                "{} scored {} (level {}, {} ticks)",
                result.player_name,
                result.score,
                result.level,
                result.ticks
            );
            if let Some(rank) = app.last_rank() {
                log::info!("New high score! Rank #{rank}");
            }
        }
        None => {
            log::info!("Autopilot survived {ticks} ticks; stopping");
            app.handle_key(Key::Escape);
        }
    }

    match HighScores::load(app.store()) {
        Ok(scores) if scores.is_empty() => log::info!("Leaderboard is empty"),
        Ok(scores) => {
            if let Some(best) = scores.top_score() {
                log::info!("Best score: {best}");
            }
            for line in scores.lines() {
                log::info!("{line}");
            }
        }
        Err(err) => log::warn!("Leaderboard unavailable: {err}"),
    }

    log::debug!("Rendered {} frames", renderer.frames_presented());
    for line in renderer.last_text() {
        log::debug!("HUD: {line}");
    }
    if let Err(err) = renderer.save_png(Path::new(FRAME_PATH)) {
        log::warn!("Could not write {FRAME_PATH}: {err}");
    }
}
