//! Run state and core simulation types
//!
//! One `GameState` owns one run: the player, the entity store, camera, score
//! and the run phase machine. Only the tick driver mutates it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use super::level::Level;
use crate::consts::*;
use crate::theme::Palette;

/// Equipped player ability.
///
/// Only `DoubleJump` affects the simulation; `SpeedBoost` and `Shield` are
/// carried on the customization record but have no effect here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ability {
    #[default]
    DoubleJump,
    SpeedBoost,
    Shield,
}

/// Obstacle silhouette. Affects shape/height only; all obstacles are fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObstacleKind {
    Box,
    TallBox,
    Spike,
}

/// What kind of thing an entity is, with the per-kind fields that kind needs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EntityKind {
    Platform,
    Obstacle { kind: ObstacleKind },
    Collectible,
    Enemy { vx: f32 },
    Weapon,
    Projectile { vx: f32 },
}

/// Any non-player object in the level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Unique within the live entity set, assigned monotonically
    pub id: u32,
    /// Top-left corner
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    pub kind: EntityKind,
}

impl Entity {
    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.width, self.height)
    }

    pub fn is_platform(&self) -> bool {
        matches!(self.kind, EntityKind::Platform)
    }

    pub fn is_enemy(&self) -> bool {
        matches!(self.kind, EntityKind::Enemy { .. })
    }

    pub fn is_projectile(&self) -> bool {
        matches!(self.kind, EntityKind::Projectile { .. })
    }

    /// Touching this entity ends the run
    pub fn is_fatal(&self) -> bool {
        matches!(
            self.kind,
            EntityKind::Obstacle { .. } | EntityKind::Enemy { .. }
        )
    }
}

/// The player-controlled runner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    /// Vertical velocity; horizontal speed is the PLAYER_SPEED constant
    pub vel_y: f32,
    /// Jumps taken since last grounding
    pub jumps: u32,
    pub ammo: u32,
    pub ability: Ability,
}

impl Player {
    pub fn new(ability: Ability) -> Self {
        Self {
            pos: Vec2::new(PLAYER_START_X, GROUND_Y - PLAYER_HEIGHT),
            vel_y: 0.0,
            jumps: 0,
            ammo: START_AMMO,
            ability,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, PLAYER_WIDTH, PLAYER_HEIGHT)
    }

    /// Jump budget before a landing is required
    pub fn max_jumps(&self) -> u32 {
        if self.ability == Ability::DoubleJump {
            2
        } else {
            1
        }
    }
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndReason {
    Completed,
    Failed,
}

/// Run phase machine: NotStarted -> Running -> Ended. No way back out of
/// Ended; a new run requires a fresh `GameState`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunPhase {
    NotStarted,
    Running,
    Ended(EndReason),
}

/// Complete state of one run (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub level_name: String,
    /// Presentation colors, passed through untouched for whatever draws the run
    pub palette: Palette,
    pub player: Player,
    /// Live entity store, never contains the player
    pub entities: Vec<Entity>,
    pub camera_x: f32,
    pub score: u64,
    pub phase: RunPhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Accumulated wall-clock time reported by the frame driver
    pub time_secs: f32,
    next_id: u32,
}

impl GameState {
    /// Create a fresh run for a level
    pub fn new(level: Level, ability: Ability) -> Self {
        let next_id = level
            .entities
            .iter()
            .map(|e| e.id + 1)
            .max()
            .unwrap_or(0);
        Self {
            level_name: level.name,
            palette: level.palette,
            player: Player::new(ability),
            entities: level.entities,
            camera_x: 0.0,
            score: 0,
            phase: RunPhase::NotStarted,
            time_ticks: 0,
            time_secs: 0.0,
            next_id,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn is_running(&self) -> bool {
        self.phase == RunPhase::Running
    }

    /// Start the run. Only meaningful from NotStarted.
    pub fn start(&mut self) {
        if self.phase == RunPhase::NotStarted {
            log::debug!("run started on '{}'", self.level_name);
            self.phase = RunPhase::Running;
        }
    }

    /// Fraction of the level traversed. Not clamped past completion.
    pub fn progress(&self) -> f32 {
        self.player.pos.x / LEVEL_LENGTH
    }

    /// Attempt a jump. Allowed only while running and while the jump budget
    /// has room; grounding is not required, which is what makes the mid-air
    /// double jump work. Returns whether a jump happened.
    pub fn jump(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        if self.player.jumps >= self.player.max_jumps() {
            return false;
        }
        self.player.vel_y = JUMP_FORCE;
        self.player.jumps += 1;
        true
    }

    /// Attempt to shoot. Allowed only while running with ammo left; spends
    /// one round and spawns a projectile at the player's leading edge,
    /// vertically centered. Returns the projectile id if one was fired.
    pub fn shoot(&mut self) -> Option<u32> {
        if !self.is_running() || self.player.ammo == 0 {
            return None;
        }
        self.player.ammo -= 1;
        let id = self.next_entity_id();
        self.entities.push(Entity {
            id,
            pos: Vec2::new(
                self.player.pos.x + PLAYER_WIDTH,
                self.player.pos.y + PLAYER_HEIGHT / 2.0 - PROJECTILE_HEIGHT / 2.0,
            ),
            width: PROJECTILE_WIDTH,
            height: PROJECTILE_HEIGHT,
            kind: EntityKind::Projectile {
                vx: PROJECTILE_SPEED,
            },
        });
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::Palette;

    fn empty_level() -> Level {
        Level {
            name: "Test Track".to_string(),
            entities: Vec::new(),
            palette: Palette::custom_default(),
        }
    }

    #[test]
    fn test_player_spawns_on_ground() {
        let state = GameState::new(empty_level(), Ability::DoubleJump);
        assert_eq!(state.player.pos.x, PLAYER_START_X);
        assert_eq!(state.player.pos.y, GROUND_Y - PLAYER_HEIGHT);
        assert_eq!(state.player.ammo, START_AMMO);
        assert_eq!(state.phase, RunPhase::NotStarted);
    }

    #[test]
    fn test_jump_requires_running() {
        let mut state = GameState::new(empty_level(), Ability::DoubleJump);
        assert!(!state.jump());
        state.start();
        assert!(state.jump());
        assert_eq!(state.player.vel_y, JUMP_FORCE);
    }

    #[test]
    fn test_jump_budget_single() {
        let mut state = GameState::new(empty_level(), Ability::Shield);
        state.start();
        assert!(state.jump());
        let vel_after_first = state.player.vel_y;
        // Second attempt before landing is a no-op
        assert!(!state.jump());
        assert_eq!(state.player.vel_y, vel_after_first);
        assert_eq!(state.player.jumps, 1);
    }

    #[test]
    fn test_jump_budget_double() {
        let mut state = GameState::new(empty_level(), Ability::DoubleJump);
        state.start();
        assert!(state.jump());
        assert!(state.jump());
        assert!(!state.jump());
        assert_eq!(state.player.jumps, 2);
    }

    #[test]
    fn test_shoot_spawns_projectile_at_leading_edge() {
        // End-to-end scenario A: x=100, 10 ammo
        let mut state = GameState::new(empty_level(), Ability::DoubleJump);
        state.start();
        let id = state.shoot().expect("should fire with ammo");
        assert_eq!(state.player.ammo, 9);

        let projectile = state.entities.iter().find(|e| e.id == id).unwrap();
        assert_eq!(projectile.pos.x, 140.0);
        assert_eq!(
            projectile.kind,
            EntityKind::Projectile {
                vx: PROJECTILE_SPEED
            }
        );
    }

    #[test]
    fn test_shoot_requires_ammo() {
        let mut state = GameState::new(empty_level(), Ability::DoubleJump);
        state.start();
        state.player.ammo = 0;
        assert!(state.shoot().is_none());
        assert!(state.entities.is_empty());
    }

    #[test]
    fn test_entity_ids_continue_after_level() {
        let mut level = empty_level();
        level.entities.push(Entity {
            id: 7,
            pos: Vec2::new(900.0, GROUND_Y - 30.0),
            width: 30.0,
            height: 30.0,
            kind: EntityKind::Weapon,
        });
        let mut state = GameState::new(level, Ability::DoubleJump);
        state.start();
        let id = state.shoot().unwrap();
        assert!(id > 7);
    }
}
