//! Starfield, formation and explosion spawning
//!
//! All randomness flows through the state-owned RNG so spawns replay
//! identically for a given seed.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;

use super::state::{Enemy, EnemyKind, GameState, Particle, Star};
use crate::consts;

/// Rebuild the background starfield: uniform positions across the
/// playfield, with per-star size, fall speed and brightness.
pub fn spawn_starfield(state: &mut GameState) {
    let width = state.config.playfield_width;
    let height = state.config.playfield_height;
    state.stars.clear();
    for _ in 0..state.config.star_count {
        let star = Star {
            x: state.rng.random_range(0.0..width),
            y: state.rng.random_range(0.0..height),
            size: state.rng.random_range(0.5..2.5),
            speed: state.rng.random_range(0.5..3.5),
            brightness: state.rng.random_range(0.0..1.0),
        };
        state.stars.push(star);
    }
}

/// Lay out a fresh enemy grid for the current level, centered
/// horizontally. Row 0 is the shooter rank; every other row is basic.
/// Horizontal speed scales linearly with level, and the shared march
/// direction resets to rightward.
pub fn spawn_formation(state: &mut GameState) {
    let config = state.config.clone();
    let speed = config.enemy_speed_x + state.level as f32 * consts::LEVEL_SPEED_STEP;
    let cell = config.enemy_size + config.enemy_padding;
    // An oversized grid is pulled back to the left edge, not allowed to
    // start at a negative x.
    let start_x = ((config.playfield_width - config.enemy_cols as f32 * cell) / 2.0).max(0.0);
    let start_y = consts::FORMATION_TOP;

    state.enemies.clear();
    state.formation_dir = 1.0;
    for row in 0..config.enemy_rows {
        for col in 0..config.enemy_cols {
            let kind = if row == 0 {
                EnemyKind::Shooter
            } else {
                EnemyKind::Basic
            };
            let id = state.next_entity_id();
            state.enemies.push(Enemy {
                id,
                kind,
                row,
                col,
                pos: Vec2::new(start_x + col as f32 * cell, start_y + row as f32 * cell),
                width: config.enemy_size,
                height: config.enemy_size,
                color: kind.color(),
                velocity: Vec2::new(speed, 0.0),
                marked_for_deletion: false,
            });
        }
    }
    log::info!(
        "spawned {}x{} formation for level {} at speed {:.1}",
        config.enemy_rows,
        config.enemy_cols,
        state.level,
        speed
    );
}

/// Burst a radial explosion at `center`: particles fly out at random
/// angles and speeds, starting at full life.
pub fn spawn_explosion(state: &mut GameState, center: Vec2, color: u32) {
    for _ in 0..consts::EXPLOSION_PARTICLES {
        let angle = state.rng.random_range(0.0..TAU);
        let speed = state.rng.random_range(1.0..5.0);
        let size = state.rng.random_range(2.0..6.0);
        let id = state.next_entity_id();
        state.particles.push(Particle {
            id,
            pos: center,
            width: size,
            height: size,
            color,
            velocity: Vec2::new(angle.cos(), angle.sin()) * speed,
            life: 1.0,
            max_life: 1.0,
            alpha: 1.0,
            marked_for_deletion: false,
        });
    }
}
