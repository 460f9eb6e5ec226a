//! Playfield and tuning configuration
//!
//! Every speed, size and layout number the simulation uses comes through
//! [`Config`]. Out-of-range values are clamped by [`Config::sanitize`]
//! rather than rejected; a config can therefore never fail to apply.

use serde::{Deserialize, Serialize};

use crate::consts;

/// Recognized configuration options. Unknown or missing fields fall back
/// to the defaults in [`crate::consts`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub playfield_width: f32,
    pub playfield_height: f32,
    pub player_speed: f32,
    pub player_size: f32,
    pub projectile_speed: f32,
    pub enemy_projectile_speed: f32,
    pub fire_cooldown_frames: u32,
    pub enemy_rows: u32,
    pub enemy_cols: u32,
    pub enemy_size: f32,
    pub enemy_padding: f32,
    pub enemy_speed_x: f32,
    pub enemy_drop_height: f32,
    pub star_count: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            playfield_width: consts::GAME_WIDTH,
            playfield_height: consts::GAME_HEIGHT,
            player_speed: consts::PLAYER_SPEED,
            player_size: consts::PLAYER_SIZE,
            projectile_speed: consts::PROJECTILE_SPEED,
            enemy_projectile_speed: consts::ENEMY_PROJECTILE_SPEED,
            fire_cooldown_frames: consts::FIRE_COOLDOWN_FRAMES,
            enemy_rows: consts::ENEMY_ROWS,
            enemy_cols: consts::ENEMY_COLS,
            enemy_size: consts::ENEMY_SIZE,
            enemy_padding: consts::ENEMY_PADDING,
            enemy_speed_x: consts::ENEMY_SPEED_X,
            enemy_drop_height: consts::ENEMY_DROP_HEIGHT,
            star_count: consts::STAR_COUNT,
        }
    }
}

impl Config {
    /// Clamp every option into a workable range. Invariant afterwards:
    /// the playfield is non-degenerate, all sizes are positive, and the
    /// formation has at least one cell.
    pub fn sanitize(mut self) -> Self {
        self.playfield_width = self.playfield_width.clamp(160.0, 16384.0);
        self.playfield_height = self.playfield_height.clamp(160.0, 16384.0);
        self.player_speed = self.player_speed.clamp(0.0, 100.0);
        self.player_size = self.player_size.clamp(1.0, 256.0);
        self.projectile_speed = self.projectile_speed.clamp(0.0, 200.0);
        self.enemy_projectile_speed = self.enemy_projectile_speed.clamp(0.0, 200.0);
        self.fire_cooldown_frames = self.fire_cooldown_frames.clamp(1, 600);
        self.enemy_rows = self.enemy_rows.clamp(1, 32);
        self.enemy_cols = self.enemy_cols.clamp(1, 64);
        self.enemy_size = self.enemy_size.clamp(1.0, 256.0);
        self.enemy_padding = self.enemy_padding.clamp(0.0, 128.0);
        self.enemy_speed_x = self.enemy_speed_x.clamp(0.0, 100.0);
        self.enemy_drop_height = self.enemy_drop_height.clamp(0.0, 256.0);
        self.star_count = self.star_count.min(10_000);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_consts() {
        let config = Config::default();
        assert_eq!(config.playfield_width, consts::GAME_WIDTH);
        assert_eq!(config.enemy_rows, consts::ENEMY_ROWS);
        assert_eq!(config.enemy_cols, consts::ENEMY_COLS);
        assert_eq!(config.fire_cooldown_frames, consts::FIRE_COOLDOWN_FRAMES);
    }

    #[test]
    fn sanitize_clamps_out_of_range() {
        let config = Config {
            playfield_width: -50.0,
            player_speed: 1e9,
            enemy_rows: 0,
            fire_cooldown_frames: 0,
            ..Config::default()
        }
        .sanitize();
        assert_eq!(config.playfield_width, 160.0);
        assert_eq!(config.player_speed, 100.0);
        assert_eq!(config.enemy_rows, 1);
        assert_eq!(config.fire_cooldown_frames, 1);
    }

    #[test]
    fn missing_fields_default() {
        let config: Config = serde_json::from_str(r#"{"enemy_cols": 12}"#)
            .expect("partial config parses");
        assert_eq!(config.enemy_cols, 12);
        assert_eq!(config.playfield_width, consts::GAME_WIDTH);
    }
}
