//! Neon Swarm entry point
//!
//! Headless demo driver: runs the deterministic simulation under a simple
//! autopilot and reports the run. Useful for balance checks and for
//! reproducing a run from its seed (`neon-swarm <seed>`). A renderer host
//! would drive the same `GameState`/`tick` pair from its frame callback.

use std::cmp::Ordering;
use std::path::Path;

use neon_swarm::highscores::{DEFAULT_STORE, HighScores};
use neon_swarm::settings::Config;
use neon_swarm::sim::{GamePhase, GameState, tick};

/// Nominal frame delta reported to the sim (diagnostics only).
const FRAME_DT: f32 = 1.0 / 60.0;
/// Hard cap so a lucky autopilot run cannot spin forever.
const MAX_FRAMES: u64 = 60 * 60 * 5;

fn main() {
    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(0x4E454F4E); // "NEON"

    let mut scores = HighScores::load(Path::new(DEFAULT_STORE));
    let mut state = GameState::new(Config::default(), seed);
    state.high_score = scores.best;

    state.fire(true); // start the run
    while state.phase == GamePhase::Playing && state.time_ticks < MAX_FRAMES {
        autopilot(&mut state);
        tick(&mut state, FRAME_DT);
    }

    if scores.record(state.score) {
        match scores.save(Path::new(DEFAULT_STORE)) {
            Ok(()) => log::info!("new best {} saved", scores.best),
            Err(err) => log::warn!("could not save high score: {err}"),
        }
    }

    println!(
        "seed {:#x}: score {} at level {} after {} frames (best {})",
        seed, state.score, state.level, state.time_ticks, scores.best
    );
}

/// Minimal demo AI: chase the nearest enemy column and hold the trigger.
fn autopilot(state: &mut GameState) {
    let ship_center = state.player.pos.x + state.player.width / 2.0;
    let target = state
        .enemies
        .iter()
        .min_by(|a, b| {
            let da = (a.pos.x + a.width / 2.0 - ship_center).abs();
            let db = (b.pos.x + b.width / 2.0 - ship_center).abs();
            da.partial_cmp(&db).unwrap_or(Ordering::Equal)
        })
        .map(|e| e.pos.x + e.width / 2.0);

    match target {
        Some(x) if x < ship_center - 4.0 => {
            state.move_right(false);
            state.move_left(true);
        }
        Some(x) if x > ship_center + 4.0 => {
            state.move_left(false);
            state.move_right(true);
        }
        _ => {
            state.move_left(false);
            state.move_right(false);
        }
    }
    state.fire(true);
}
