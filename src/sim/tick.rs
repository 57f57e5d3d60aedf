//! Fixed timestep simulation tick
//!
//! One call advances the whole run by one frame: player physics, landing,
//! camera, projectile/enemy resolution, entity movement, pickups, cleanup.
//! The step order below is a contract; scoring and removals accumulate over
//! the pass and apply atomically at the end of the tick.
//!
//! The physics constants are tuned for one application per tick at the
//! nominal cadence. `dt` feeds the elapsed-time counter only; velocity and
//! position deltas are deliberately not scaled by it.

use std::collections::HashSet;

use super::geometry::{Rect, overlaps};
use super::state::{EndReason, EntityKind, GameState, RunPhase};
use crate::consts::*;

/// Input intents for a single tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Jump (also the start intent while the run has not begun)
    pub jump: bool,
    /// Shoot (also the start intent while the run has not begun)
    pub shoot: bool,
}

/// End-of-run report for the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOutcome {
    pub score: u64,
    pub reason: EndReason,
}

/// Advance the run by one tick. Returns the outcome on the tick the run
/// ends; `None` while it continues (or before it has started).
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) -> Option<RunOutcome> {
    // The first jump/shoot press only starts the run; it is consumed by the
    // transition and does not also jump or fire.
    if state.phase == RunPhase::NotStarted {
        if input.jump || input.shoot {
            state.start();
        }
        return None;
    }
    if !state.is_running() {
        return None;
    }

    if input.jump {
        state.jump();
    }
    if input.shoot {
        state.shoot();
    }

    state.time_ticks += 1;
    state.time_secs += dt;

    // --- Player physics ---
    let prev_bottom = state.player.pos.y + PLAYER_HEIGHT;
    state.player.vel_y += GRAVITY;
    state.player.pos.y += state.player.vel_y;

    // --- Landing resolution ---
    // Only while falling, and only onto platforms whose top the player was
    // at or above last tick; a side hit must not snap the player up. First
    // accepted platform wins.
    let mut landed = false;
    if state.player.vel_y > 0.0 {
        let player_rect = state.player.rect();
        let platform = state
            .entities
            .iter()
            .find(|e| e.is_platform() && overlaps(player_rect, e.rect()) && prev_bottom <= e.pos.y)
            .copied();
        if let Some(platform) = platform {
            state.player.pos.y = platform.pos.y - PLAYER_HEIGHT;
            state.player.vel_y = 0.0;
            state.player.jumps = 0;
            landed = true;
        }
    }

    // --- Ground fallback ---
    if !landed && state.player.pos.y >= GROUND_Y - PLAYER_HEIGHT {
        state.player.pos.y = GROUND_Y - PLAYER_HEIGHT;
        state.player.vel_y = 0.0;
        state.player.jumps = 0;
    }

    // --- Horizontal and camera advance ---
    state.player.pos.x += PLAYER_SPEED;
    state.camera_x = state.player.pos.x - CAMERA_OFFSET;

    // --- Level completion ---
    if state.player.pos.x >= LEVEL_LENGTH {
        state.score += LEVEL_COMPLETE_BONUS;
        return Some(end_run(state, EndReason::Completed));
    }

    let mut removals: HashSet<u32> = HashSet::new();
    let mut score_delta: u64 = 0;
    let mut ammo_delta: u32 = 0;

    // --- Projectile vs enemy resolution ---
    // Every overlapping pair resolves this tick. An enemy clipped by two
    // projectiles dies once but pays the bonus per projectile consumed;
    // the id set keeps removal idempotent.
    for projectile in state.entities.iter().filter(|e| e.is_projectile()) {
        for enemy in state.entities.iter().filter(|e| e.is_enemy()) {
            if overlaps(projectile.rect(), enemy.rect()) {
                removals.insert(projectile.id);
                removals.insert(enemy.id);
                score_delta += ENEMY_KILL_SCORE;
            }
        }
    }

    // --- Entity movement ---
    // Enemies patrol their support: when the projected next position would
    // walk an edge past either end of the support's span, the velocity is
    // negated before the move commits, so the bounce tick already moves back
    // inward. The ground is one long support under everything.
    let mut supports: Vec<Rect> = state
        .entities
        .iter()
        .filter(|e| e.is_platform())
        .map(|e| e.rect())
        .collect();
    supports.push(Rect::new(
        0.0,
        GROUND_Y,
        LEVEL_LENGTH + GAME_WIDTH,
        GROUND_HEIGHT,
    ));

    for entity in state.entities.iter_mut() {
        if removals.contains(&entity.id) {
            continue;
        }
        match &mut entity.kind {
            EntityKind::Enemy { vx } => {
                for support in &supports {
                    let on_support = (entity.pos.y + entity.height - support.y).abs()
                        < SUPPORT_TOLERANCE
                        && entity.pos.x > support.x
                        && entity.pos.x < support.right();
                    if on_support {
                        let next_x = entity.pos.x + *vx;
                        if next_x <= support.x || next_x + entity.width >= support.right() {
                            *vx = -*vx;
                        }
                        break;
                    }
                }
                entity.pos.x += *vx;
            }
            EntityKind::Projectile { vx } => {
                entity.pos.x += *vx;
            }
            _ => {}
        }
    }

    // --- Off-screen cleanup ---
    let camera_right = state.camera_x + GAME_WIDTH;
    for projectile in state.entities.iter().filter(|e| e.is_projectile()) {
        if projectile.pos.x > camera_right {
            removals.insert(projectile.id);
        }
    }

    // --- Player vs entity interactions ---
    // Evaluated against the player's new bounding box and this tick's moved
    // entity positions. A fatal entity ends the run but stays in the store;
    // pickups award once and are removed. Entities already marked for
    // removal (an enemy shot this very tick) no longer interact.
    let player_rect = state.player.rect();
    let mut failed = false;
    for entity in &state.entities {
        if removals.contains(&entity.id) || !overlaps(player_rect, entity.rect()) {
            continue;
        }
        match entity.kind {
            EntityKind::Obstacle { .. } | EntityKind::Enemy { .. } => failed = true,
            EntityKind::Collectible => {
                score_delta += COLLECTIBLE_SCORE;
                removals.insert(entity.id);
            }
            EntityKind::Weapon => {
                ammo_delta += WEAPON_AMMO;
                removals.insert(entity.id);
            }
            // Platforms resolved during landing; projectiles are friendly
            EntityKind::Platform | EntityKind::Projectile { .. } => {}
        }
    }

    // --- Commit ---
    state.entities.retain(|e| !removals.contains(&e.id));
    state.score += score_delta;
    state.player.ammo += ammo_delta;

    if failed {
        return Some(end_run(state, EndReason::Failed));
    }
    None
}

fn end_run(state: &mut GameState, reason: EndReason) -> RunOutcome {
    state.phase = RunPhase::Ended(reason);
    log::info!(
        "run ended after {} ticks: {:?}, score {}",
        state.time_ticks,
        reason,
        state.score
    );
    RunOutcome {
        score: state.score,
        reason,
    }
}
