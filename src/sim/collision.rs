//! Axis-aligned collision detection and projectile resolution
//!
//! The only primitive is the AABB overlap test; resolution walks the
//! projectile list once, honoring the soft-delete marks so nothing
//! collides twice in a frame.

use glam::Vec2;

use super::spawn;
use super::state::{GamePhase, GameState};
use crate::palette;

/// Axis-aligned rectangle, position at the top-left corner.
#[derive(Debug, Clone, Copy)]
pub struct Rect {
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(pos: Vec2, width: f32, height: f32) -> Self {
        Self { pos, width, height }
    }

    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Strict AABB overlap: all four comparisons are strict, so rectangles
/// that merely share an edge do not collide.
pub fn overlaps(a: Rect, b: Rect) -> bool {
    a.pos.x < b.pos.x + b.width
        && a.pos.x + a.width > b.pos.x
        && a.pos.y < b.pos.y + b.height
        && a.pos.y + a.height > b.pos.y
}

/// Resolve every live projectile against its targets.
///
/// Player projectiles test against living enemies; the first overlap marks
/// both sides, bursts an explosion in the enemy's color and scores it, so
/// one projectile destroys at most one enemy per frame. Enemy projectiles
/// test against the player; a hit costs a life and at zero lives moves the
/// phase to GameOver.
pub(crate) fn resolve_projectiles(state: &mut GameState) {
    for pi in 0..state.projectiles.len() {
        let (proj_rect, from_enemy) = {
            let proj = &state.projectiles[pi];
            if proj.marked_for_deletion {
                continue;
            }
            (proj.rect(), proj.from_enemy)
        };

        if !from_enemy {
            for ei in 0..state.enemies.len() {
                let enemy = &state.enemies[ei];
                if enemy.marked_for_deletion || !overlaps(proj_rect, enemy.rect()) {
                    continue;
                }
                let center = enemy.rect().center();
                let color = enemy.color;
                let points = enemy.kind.score();
                state.enemies[ei].marked_for_deletion = true;
                state.projectiles[pi].marked_for_deletion = true;
                spawn::spawn_explosion(state, center, color);
                state.score += points;
                break;
            }
        } else if overlaps(proj_rect, state.player.rect()) {
            state.projectiles[pi].marked_for_deletion = true;
            let center = state.player.rect().center();
            spawn::spawn_explosion(state, center, palette::PLAYER);
            state.lives = state.lives.saturating_sub(1);
            state.player.hp = state.player.hp.saturating_sub(1);
            if state.lives == 0 && state.phase == GamePhase::Playing {
                state.phase = GamePhase::GameOver;
                log::info!(
                    "ship destroyed at level {} with score {}",
                    state.level,
                    state.score
                );
            }
        }
    }
}
