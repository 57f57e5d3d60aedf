//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only (level generation takes the RNG as a parameter)
//! - No rendering or platform dependencies

pub mod geometry;
pub mod level;
pub mod state;
pub mod tick;

pub use geometry::{Rect, overlaps};
pub use level::{DEFAULT_LAYOUT, Level, LevelSpec, PREDEFINED_LEVELS, generate_entities};
pub use state::{
    Ability, EndReason, Entity, EntityKind, GameState, ObstacleKind, Player, RunPhase,
};
pub use tick::{RunOutcome, TickInput, tick};
