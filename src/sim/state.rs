//! Game state and core simulation types
//!
//! Everything the simulation owns lives here: the entity records, the
//! phase machine, and the input-intent surface the host pokes between
//! ticks. Mid-game state is deliberately not serializable; only
//! configuration and the best score persist.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::collision::Rect;
use super::spawn;
use crate::consts;
use crate::palette;
use crate::settings::Config;

/// Current phase of gameplay. `Victory` is reserved: current rules always
/// respawn the formation instead of ending the run in a win.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Menu,
    Playing,
    GameOver,
    Victory,
}

/// The player's ship. A singleton: reset on new game or level, never
/// destroyed.
#[derive(Debug, Clone)]
pub struct Player {
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    pub color: u32,
    /// Signed horizontal speed set by the input intents.
    pub velocity: f32,
    /// Trigger held; actual shots are gated by `cooldown`.
    pub is_shooting: bool,
    /// Frames until the next shot is allowed.
    pub cooldown: u32,
    pub hp: u32,
}

impl Player {
    fn spawn(config: &Config) -> Self {
        Self {
            pos: spawn_pos(config),
            width: config.player_size,
            height: config.player_size,
            color: palette::PLAYER,
            velocity: 0.0,
            is_shooting: false,
            cooldown: 0,
            hp: u32::from(consts::START_LIVES),
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.width, self.height)
    }
}

fn spawn_pos(config: &Config) -> Vec2 {
    Vec2::new(
        config.playfield_width / 2.0 - config.player_size / 2.0,
        (config.playfield_height - consts::PLAYER_BOTTOM_MARGIN).max(0.0),
    )
}

/// Enemy behavior class. `Diver` is reserved for a future dive-bombing
/// pattern; nothing spawns it yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyKind {
    Basic,
    Shooter,
    Diver,
}

impl EnemyKind {
    pub fn color(self) -> u32 {
        match self {
            EnemyKind::Shooter => palette::ENEMY_SHOOTER,
            _ => palette::ENEMY_BASIC,
        }
    }

    /// Points awarded when destroyed.
    pub fn score(self) -> u64 {
        match self {
            EnemyKind::Shooter => consts::SCORE_SHOOTER,
            _ => consts::SCORE_BASIC,
        }
    }
}

/// One formation member.
#[derive(Debug, Clone)]
pub struct Enemy {
    pub id: u32,
    pub kind: EnemyKind,
    /// Grid identity at spawn time; immutable for the wave's lifetime.
    pub row: u32,
    pub col: u32,
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    pub color: u32,
    pub velocity: Vec2,
    pub marked_for_deletion: bool,
}

impl Enemy {
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.width, self.height)
    }

    /// Lowest point, used for the loss-by-descent check.
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.height
    }
}

#[derive(Debug, Clone)]
pub struct Projectile {
    pub id: u32,
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    pub color: u32,
    pub velocity: Vec2,
    pub from_enemy: bool,
    pub marked_for_deletion: bool,
}

impl Projectile {
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.width, self.height)
    }
}

/// A short-lived explosion fragment. `alpha` mirrors `life` so renderers
/// can fade without recomputing.
#[derive(Debug, Clone)]
pub struct Particle {
    pub id: u32,
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    pub color: u32,
    pub velocity: Vec2,
    pub life: f32,
    pub max_life: f32,
    pub alpha: f32,
    pub marked_for_deletion: bool,
}

/// Background star. Decorative only: wraps vertically, never collides,
/// never destroyed.
#[derive(Debug, Clone)]
pub struct Star {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub speed: f32,
    pub brightness: f32,
}

/// HUD scalars handed to the renderer each frame.
#[derive(Debug, Clone, Copy)]
pub struct Hud {
    pub score: u64,
    pub lives: u8,
    pub level: u32,
    pub high_score: u64,
}

/// Read-only view of one frame for the renderer. No simulation mutation
/// is possible through it.
#[derive(Debug)]
pub struct Snapshot<'a> {
    /// `None` once the player is defeated.
    pub player: Option<&'a Player>,
    pub enemies: &'a [Enemy],
    pub projectiles: &'a [Projectile],
    pub particles: &'a [Particle],
    pub stars: &'a [Star],
    pub hud: Hud,
}

/// Complete game state. Owned by the host, mutated only by [`super::tick()`],
/// the intent setters, and the reset transitions.
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: Config,
    pub phase: GamePhase,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub projectiles: Vec<Projectile>,
    pub particles: Vec<Particle>,
    pub stars: Vec<Star>,
    /// Shared horizontal direction sign for the whole formation:
    /// +1 marching right, -1 marching left.
    pub formation_dir: f32,
    pub score: u64,
    pub lives: u8,
    pub level: u32,
    pub high_score: u64,
    /// Simulation tick counter.
    pub time_ticks: u64,
    /// Accumulated host-reported elapsed time. Diagnostics only: the
    /// simulation itself is frame-coupled, not time-scaled.
    pub elapsed_secs: f32,
    /// Run seed, kept for reproducing reports.
    pub seed: u64,
    pub(crate) rng: Pcg32,
    next_id: u32,
}

impl GameState {
    /// Create a new game in the menu phase. The starfield and a level-1
    /// formation are spawned immediately so the menu has a live backdrop.
    pub fn new(config: Config, seed: u64) -> Self {
        let config = config.sanitize();
        let player = Player::spawn(&config);
        let mut state = Self {
            config,
            phase: GamePhase::Menu,
            player,
            enemies: Vec::new(),
            projectiles: Vec::new(),
            particles: Vec::new(),
            stars: Vec::new(),
            formation_dir: 1.0,
            score: 0,
            lives: consts::START_LIVES,
            level: 1,
            high_score: 0,
            time_ticks: 0,
            elapsed_secs: 0.0,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        };
        spawn::spawn_starfield(&mut state);
        spawn::spawn_formation(&mut state);
        state
    }

    /// Allocate a new entity ID.
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Full reset into Playing: score, lives and level back to their
    /// starting values, fresh level-1 formation, everything transient
    /// cleared. Valid from any phase; the high score carries over.
    pub fn start(&mut self) {
        self.score = 0;
        self.lives = consts::START_LIVES;
        self.level = 1;
        self.reset_player();
        self.projectiles.clear();
        self.particles.clear();
        if self.stars.is_empty() {
            spawn::spawn_starfield(self);
        }
        spawn::spawn_formation(self);
        self.phase = GamePhase::Playing;
        log::info!("run started (seed {})", self.seed);
    }

    /// Partial reset after a cleared formation: level up, keep score and
    /// lives, respawn the grid at the new difficulty.
    pub(crate) fn advance_level(&mut self) {
        self.level += 1;
        self.reset_player();
        self.projectiles.clear();
        self.particles.clear();
        spawn::spawn_formation(self);
        log::info!("level {} reached at score {}", self.level, self.score);
    }

    fn reset_player(&mut self) {
        self.player.pos = spawn_pos(&self.config);
        self.player.velocity = 0.0;
        self.player.is_shooting = false;
        self.player.cooldown = 0;
        self.player.hp = u32::from(self.lives);
    }

    // --- Input intent surface -------------------------------------------
    //
    // Only the matching-direction release zeroes velocity, so releasing
    // one key never cancels an opposite motion that is still held.

    pub fn move_left(&mut self, active: bool) {
        if active {
            self.player.velocity = -self.config.player_speed;
        } else if self.player.velocity < 0.0 {
            self.player.velocity = 0.0;
        }
    }

    pub fn move_right(&mut self, active: bool) {
        if active {
            self.player.velocity = self.config.player_speed;
        } else if self.player.velocity > 0.0 {
            self.player.velocity = 0.0;
        }
    }

    /// Fire intent. Outside Playing an activation acts as start/retry
    /// instead of shooting.
    pub fn fire(&mut self, active: bool) {
        if self.phase == GamePhase::Playing {
            self.player.is_shooting = active;
        } else if active {
            self.start();
        }
    }

    /// Read-only view for the renderer.
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            player: (self.lives > 0).then_some(&self.player),
            enemies: &self.enemies,
            projectiles: &self.projectiles,
            particles: &self.particles,
            stars: &self.stars,
            hud: Hud {
                score: self.score,
                lives: self.lives,
                level: self.level,
                high_score: self.high_score,
            },
        }
    }
}
