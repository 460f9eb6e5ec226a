//! The per-frame simulation step
//!
//! Phase order inside one tick is load-bearing: later phases must see the
//! positions this frame produced, and cleanup must run after every reader
//! of the deletion marks.

use glam::Vec2;
use rand::Rng;

use super::collision;
use super::spawn;
use super::state::{EnemyKind, GamePhase, GameState, Projectile};
use crate::consts;
use crate::palette;

/// Advance the simulation by one frame.
///
/// `dt` is the host-measured delta between ticks. It is accumulated for
/// diagnostics only: movement and cooldowns advance one fixed increment
/// per tick, so effective game speed follows the host's frame rate. This
/// keeps the original feel; a time-scaled variant was considered and
/// rejected (see DESIGN.md).
///
/// No-op outside the Playing phase.
pub fn tick(state: &mut GameState, dt: f32) {
    if state.phase != GamePhase::Playing {
        return;
    }
    state.time_ticks += 1;
    state.elapsed_secs += dt;

    // 1. Player motion, clamped into the playfield.
    let max_x = state.config.playfield_width - state.player.width;
    state.player.pos.x = (state.player.pos.x + state.player.velocity).clamp(0.0, max_x);

    // 2. Player fire control.
    if state.player.cooldown > 0 {
        state.player.cooldown -= 1;
    }
    if state.player.is_shooting && state.player.cooldown == 0 {
        let pos = Vec2::new(
            state.player.pos.x + state.player.width / 2.0 - consts::PLAYER_SHOT_WIDTH / 2.0,
            state.player.pos.y,
        );
        let id = state.next_entity_id();
        state.projectiles.push(Projectile {
            id,
            pos,
            width: consts::PLAYER_SHOT_WIDTH,
            height: consts::PLAYER_SHOT_HEIGHT,
            color: palette::PLAYER_SHOT,
            velocity: Vec2::new(0.0, -state.config.projectile_speed),
            from_enemy: false,
            marked_for_deletion: false,
        });
        state.player.cooldown = state.config.fire_cooldown_frames;
    }

    // 3. Projectile motion; anything leaving the field vertically is marked.
    let field_height = state.config.playfield_height;
    for proj in &mut state.projectiles {
        proj.pos += proj.velocity;
        if proj.pos.y < 0.0 || proj.pos.y > field_height {
            proj.marked_for_deletion = true;
        }
    }

    // 4. Enemy motion and edge detection. An empty formation means the
    // level was cleared last frame: advance and skip the rest of this one.
    if state.enemies.is_empty() {
        state.advance_level();
        return;
    }
    let dir = state.formation_dir;
    let field_width = state.config.playfield_width;
    let mut hit_edge = false;
    for enemy in state.enemies.iter_mut().filter(|e| !e.marked_for_deletion) {
        enemy.pos.x += enemy.velocity.x * dir;
        if enemy.pos.x <= 0.0 || enemy.pos.x >= field_width - enemy.width {
            hit_edge = true;
        }
    }

    // 5. Edge response: one flip and one descent step for the whole
    // formation, on the same frame the boundary was reached.
    if hit_edge {
        state.formation_dir = -state.formation_dir;
        let drop = state.config.enemy_drop_height;
        for enemy in state.enemies.iter_mut().filter(|e| !e.marked_for_deletion) {
            enemy.pos.y += drop;
        }
    }

    // 6. Enemy fire: an independent Bernoulli trial per living enemy per
    // frame. Shooters get a flat bonus on top of the level-scaled base.
    let base_chance = consts::BASE_FIRE_CHANCE * state.level as f32;
    let mut shots: Vec<Vec2> = Vec::new();
    for enemy in state.enemies.iter().filter(|e| !e.marked_for_deletion) {
        let chance = base_chance
            + if enemy.kind == EnemyKind::Shooter {
                consts::SHOOTER_FIRE_BONUS
            } else {
                0.0
            };
        if state.rng.random::<f32>() < chance {
            shots.push(Vec2::new(enemy.pos.x + enemy.width / 2.0, enemy.bottom()));
        }
    }
    for pos in shots {
        let id = state.next_entity_id();
        state.projectiles.push(Projectile {
            id,
            pos,
            width: consts::ENEMY_SHOT_WIDTH,
            height: consts::ENEMY_SHOT_HEIGHT,
            color: palette::ENEMY_SHOT,
            velocity: Vec2::new(0.0, state.config.enemy_projectile_speed),
            from_enemy: true,
            marked_for_deletion: false,
        });
    }

    // 7. Loss by descent: the formation reaching the ship's row ends the
    // run outright, independent of any collision.
    let player_y = state.player.pos.y;
    let descended = state
        .enemies
        .iter()
        .filter(|e| !e.marked_for_deletion)
        .any(|e| e.bottom() >= player_y);
    if descended {
        state.lives = 0;
        state.player.hp = 0;
        state.phase = GamePhase::GameOver;
        log::info!(
            "formation reached the ship at level {} with score {}",
            state.level,
            state.score
        );
    }

    // 8. Collision resolution.
    collision::resolve_projectiles(state);

    // 9. Cleanup: compact away everything marked this frame.
    state.enemies.retain(|e| !e.marked_for_deletion);
    state.projectiles.retain(|p| !p.marked_for_deletion);

    // 10. Particle motion and decay; alpha mirrors life.
    for particle in &mut state.particles {
        particle.pos += particle.velocity;
        particle.life = (particle.life - consts::PARTICLE_DECAY).max(0.0);
        particle.alpha = particle.life;
        if particle.life <= 0.0 {
            particle.marked_for_deletion = true;
        }
    }
    state.particles.retain(|p| !p.marked_for_deletion);

    // 11. Starfield scroll with vertical wrap.
    for star in &mut state.stars {
        star.y += star.speed;
        if star.y > field_height {
            star.y = 0.0;
            star.x = state.rng.random_range(0.0..field_width);
        }
    }

    // 12. Shadow the high score into the HUD while playing.
    if state.score > state.high_score {
        state.high_score = state.score;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Config;
    use crate::sim::state::Enemy;

    const DT: f32 = 1.0 / 60.0;

    fn playing_state() -> GameState {
        let mut state = GameState::new(Config::default(), 99);
        state.fire(true); // start
        state
    }

    /// A motionless player shot, parked where a test needs it.
    fn static_shot_at(state: &mut GameState, pos: Vec2) {
        let id = state.next_entity_id();
        state.projectiles.push(Projectile {
            id,
            pos,
            width: consts::PLAYER_SHOT_WIDTH,
            height: consts::PLAYER_SHOT_HEIGHT,
            color: palette::PLAYER_SHOT,
            velocity: Vec2::ZERO,
            from_enemy: false,
            marked_for_deletion: false,
        });
    }

    #[test]
    fn menu_and_game_over_run_no_simulation() {
        let mut state = GameState::new(Config::default(), 1);
        let before = state.enemies[0].pos;
        tick(&mut state, DT);
        assert_eq!(state.enemies[0].pos, before);
        assert_eq!(state.time_ticks, 0);

        state.phase = GamePhase::GameOver;
        tick(&mut state, DT);
        assert_eq!(state.time_ticks, 0);
    }

    #[test]
    fn holding_fire_respects_cooldown() {
        let mut state = playing_state();
        state.enemies.clear();
        // Park a lone enemy far away so the level never clears mid-test
        // and nothing gets hit.
        let id = state.next_entity_id();
        state.enemies.push(Enemy {
            id,
            kind: EnemyKind::Basic,
            row: 1,
            col: 0,
            pos: Vec2::new(300.0, 100.0),
            width: state.config.enemy_size,
            height: state.config.enemy_size,
            color: palette::ENEMY_BASIC,
            velocity: Vec2::ZERO,
            marked_for_deletion: false,
        });

        state.fire(true);
        tick(&mut state, DT);
        let player_shots = |state: &GameState| {
            state
                .projectiles
                .iter()
                .filter(|p| !p.from_enemy)
                .count()
        };
        assert_eq!(player_shots(&state), 1);
        assert_eq!(state.player.cooldown, state.config.fire_cooldown_frames);

        // The whole cooldown window passes without a second shot.
        for _ in 0..(state.config.fire_cooldown_frames - 1) {
            tick(&mut state, DT);
            assert_eq!(player_shots(&state), 1);
        }
        tick(&mut state, DT);
        assert_eq!(player_shots(&state), 2);
    }

    #[test]
    fn player_is_clamped_to_the_playfield() {
        let mut state = playing_state();
        state.move_left(true);
        for _ in 0..500 {
            tick(&mut state, DT);
            if state.phase != GamePhase::Playing {
                break;
            }
        }
        assert_eq!(state.player.pos.x, 0.0);

        state.move_left(false);
        state.move_right(true);
        for _ in 0..500 {
            tick(&mut state, DT);
            if state.phase != GamePhase::Playing {
                break;
            }
        }
        let max_x = state.config.playfield_width - state.player.width;
        assert!(state.player.pos.x <= max_x);
    }

    #[test]
    fn projectiles_vanish_off_field() {
        let mut state = playing_state();
        static_shot_at(&mut state, Vec2::new(100.0, 5.0));
        state.projectiles[0].velocity = Vec2::new(0.0, -state.config.projectile_speed);
        tick(&mut state, DT);
        assert!(state.projectiles.iter().all(|p| p.from_enemy));
    }

    #[test]
    fn cleared_formation_advances_exactly_one_level() {
        let mut state = playing_state();
        state.score = 700;
        state.lives = 2;
        state.enemies.clear();
        static_shot_at(&mut state, Vec2::new(10.0, 300.0));

        tick(&mut state, DT);

        assert_eq!(state.level, 2);
        assert_eq!(state.score, 700);
        assert_eq!(state.lives, 2);
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(state.projectiles.is_empty());
        assert!(state.particles.is_empty());
        assert_eq!(
            state.enemies.len(),
            (state.config.enemy_rows * state.config.enemy_cols) as usize
        );
        let expected_speed = state.config.enemy_speed_x + 2.0 * consts::LEVEL_SPEED_STEP;
        assert!(state.enemies.iter().all(|e| e.velocity.x == expected_speed));
    }

    #[test]
    fn edge_contact_flips_and_drops_same_frame() {
        let mut state = playing_state();
        let rightmost = state
            .enemies
            .iter()
            .map(|e| e.pos.x)
            .fold(f32::NEG_INFINITY, f32::max);
        // Shift the whole formation so its right flank sits on the boundary
        // after one step of movement.
        let step = state.enemies[0].velocity.x;
        let target = state.config.playfield_width - state.config.enemy_size - step;
        let shift = target - rightmost;
        let before: Vec<(u32, f32)> = state
            .enemies
            .iter()
            .map(|e| (e.id, e.pos.y))
            .collect();
        for enemy in &mut state.enemies {
            enemy.pos.x += shift;
        }

        tick(&mut state, DT);

        assert_eq!(state.formation_dir, -1.0);
        let drop = state.config.enemy_drop_height;
        for (id, old_y) in before {
            let enemy = state.enemies.iter().find(|e| e.id == id).expect("alive");
            assert_eq!(enemy.pos.y, old_y + drop);
        }
    }

    #[test]
    fn descent_to_player_row_is_immediate_defeat() {
        let mut state = playing_state();
        let player_y = state.player.pos.y;
        state.enemies[5].pos.y = player_y - state.enemies[5].height + 1.0;

        tick(&mut state, DT);

        assert_eq!(state.lives, 0);
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn shooters_first_scores_sixteen_hundred() {
        let mut state = playing_state();
        let shooter_centers: Vec<Vec2> = state
            .enemies
            .iter()
            .filter(|e| e.row == 0)
            .map(|e| e.rect().center())
            .collect();
        assert_eq!(shooter_centers.len(), state.config.enemy_cols as usize);
        for center in shooter_centers {
            static_shot_at(&mut state, center);
        }

        tick(&mut state, DT);

        assert_eq!(state.score, 8 * consts::SCORE_SHOOTER);
        assert!(state.enemies.iter().all(|e| e.row != 0));
        assert_eq!(state.high_score, state.score);
    }

    #[test]
    fn particles_decay_and_alpha_tracks_life() {
        let mut state = playing_state();
        spawn::spawn_explosion(&mut state, Vec2::new(400.0, 300.0), palette::ENEMY_BASIC);

        tick(&mut state, DT);

        for particle in &state.particles {
            assert!((particle.life - (1.0 - consts::PARTICLE_DECAY)).abs() < 1e-6);
            assert_eq!(particle.alpha, particle.life);
        }
        // A nearly-dead particle is gone after the next frame.
        for particle in &mut state.particles {
            particle.life = consts::PARTICLE_DECAY / 2.0;
        }
        tick(&mut state, DT);
        assert!(state.particles.is_empty());
    }

    #[test]
    fn stars_wrap_to_a_fresh_column() {
        let mut state = playing_state();
        state.stars[0].y = state.config.playfield_height + 1.0;
        tick(&mut state, DT);
        assert_eq!(state.stars[0].y, 0.0);
        assert!(state.stars[0].x < state.config.playfield_width);
    }

    #[test]
    fn identical_seeds_replay_identically() {
        let script = |state: &mut GameState| {
            state.fire(true);
            for frame in 0..240 {
                match (frame / 30) % 3 {
                    0 => {
                        state.move_right(false);
                        state.move_left(true);
                    }
                    1 => {
                        state.move_left(false);
                        state.move_right(true);
                    }
                    _ => {
                        state.move_left(false);
                        state.move_right(false);
                    }
                }
                tick(state, DT);
            }
        };

        let mut a = GameState::new(Config::default(), 2024);
        let mut b = GameState::new(Config::default(), 2024);
        script(&mut a);
        script(&mut b);

        assert_eq!(a.time_ticks, b.time_ticks);
        assert_eq!(a.score, b.score);
        assert_eq!(a.lives, b.lives);
        assert_eq!(a.player.pos, b.player.pos);
        assert_eq!(a.enemies.len(), b.enemies.len());
        assert_eq!(a.projectiles.len(), b.projectiles.len());
        for (ea, eb) in a.enemies.iter().zip(&b.enemies) {
            assert_eq!(ea.pos, eb.pos);
        }
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Player x never escapes the playfield, whatever the intents.
            #[test]
            fn player_stays_in_bounds(
                seed in any::<u64>(),
                moves in proptest::collection::vec(-1i8..=1, 1..200),
            ) {
                let mut state = GameState::new(Config::default(), seed);
                state.fire(true);
                let max_x = state.config.playfield_width - state.player.width;
                for step in moves {
                    match step {
                        -1 => {
                            state.move_right(false);
                            state.move_left(true);
                        }
                        1 => {
                            state.move_left(false);
                            state.move_right(true);
                        }
                        _ => {
                            state.move_left(false);
                            state.move_right(false);
                        }
                    }
                    tick(&mut state, DT);
                    prop_assert!(state.player.pos.x >= 0.0);
                    prop_assert!(state.player.pos.x <= max_x);
                }
            }

            /// Cooldown is bounded by its configured constant and every
            /// particle's alpha mirrors its life.
            #[test]
            fn frame_invariants_hold(seed in any::<u64>(), frames in 1usize..300) {
                let mut state = GameState::new(Config::default(), seed);
                state.fire(true);
                state.fire(true); // hold the trigger once playing
                for _ in 0..frames {
                    tick(&mut state, DT);
                    prop_assert!(state.player.cooldown <= state.config.fire_cooldown_frames);
                    for particle in &state.particles {
                        prop_assert!(particle.life >= 0.0);
                        prop_assert!(particle.alpha == particle.life);
                    }
                }
            }
        }
    }
}
