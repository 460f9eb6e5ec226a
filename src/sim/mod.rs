//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Frame-count timestep (one fixed increment per tick)
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Rect, overlaps};
pub use spawn::{spawn_explosion, spawn_formation, spawn_starfield};
pub use state::{
    Enemy, EnemyKind, GamePhase, GameState, Hud, Particle, Player, Projectile, Snapshot, Star,
};
pub use tick::tick;
