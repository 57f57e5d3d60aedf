//! Neon Runner - a 2D side-scrolling runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, level generation)
//! - `theme`: Cosmetic level themes, optionally produced by an external service
//! - `profile`: Player customization and high score persisted across runs

pub mod profile;
pub mod sim;
pub mod theme;

pub use profile::Profile;
pub use sim::{GameState, RunOutcome, TickInput, tick};
pub use theme::{LevelTheme, Palette, ThemeSource};

/// Game configuration constants
///
/// Physics values are tuned for one application per tick at the nominal
/// tick rate; they are not delta-time scaled.
pub mod consts {
    /// Nominal tick duration (60 Hz frame cadence)
    pub const TICK_DT: f32 = 1.0 / 60.0;

    /// World dimensions
    pub const GAME_WIDTH: f32 = 800.0;
    pub const GAME_HEIGHT: f32 = 600.0;
    pub const GROUND_HEIGHT: f32 = 50.0;
    /// Top of the ground band (the line surfaces rest on)
    pub const GROUND_Y: f32 = GAME_HEIGHT - GROUND_HEIGHT;
    /// Every level is this long
    pub const LEVEL_LENGTH: f32 = 5000.0;
    /// Camera trails the player by this much
    pub const CAMERA_OFFSET: f32 = 100.0;

    /// Player
    pub const GRAVITY: f32 = 0.6;
    pub const JUMP_FORCE: f32 = -15.0;
    pub const PLAYER_SPEED: f32 = 5.0;
    pub const PLAYER_WIDTH: f32 = 40.0;
    pub const PLAYER_HEIGHT: f32 = 40.0;
    pub const PLAYER_START_X: f32 = 100.0;
    pub const START_AMMO: u32 = 10;

    /// Obstacles
    pub const OBSTACLE_MIN_HEIGHT: f32 = 20.0;
    pub const OBSTACLE_MAX_HEIGHT: f32 = 50.0;
    pub const OBSTACLE_WIDTH: f32 = 30.0;
    /// Tall boxes stretch the rolled height by this factor
    pub const TALL_BOX_FACTOR: f32 = 1.8;

    /// Collectibles, platforms, weapons
    pub const COLLECTIBLE_SIZE: f32 = 20.0;
    pub const PLATFORM_HEIGHT: f32 = 20.0;
    pub const PLATFORM_MIN_WIDTH: f32 = 80.0;
    pub const PLATFORM_MAX_WIDTH: f32 = 150.0;
    pub const WEAPON_WIDTH: f32 = 30.0;
    pub const WEAPON_HEIGHT: f32 = 30.0;

    /// Enemies and projectiles
    pub const ENEMY_WIDTH: f32 = 40.0;
    pub const ENEMY_HEIGHT: f32 = 40.0;
    pub const ENEMY_SPEED: f32 = 2.0;
    pub const PROJECTILE_WIDTH: f32 = 15.0;
    pub const PROJECTILE_HEIGHT: f32 = 5.0;
    pub const PROJECTILE_SPEED: f32 = 10.0;

    /// Vertical slack when deciding whether something stands on a support
    pub const SUPPORT_TOLERANCE: f32 = 5.0;

    /// Scoring
    pub const COLLECTIBLE_SCORE: u64 = 100;
    pub const ENEMY_KILL_SCORE: u64 = 250;
    pub const LEVEL_COMPLETE_BONUS: u64 = 1000;
    /// Ammo granted per weapon pickup
    pub const WEAPON_AMMO: u32 = 10;
}
