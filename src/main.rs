//! Neon Runner entry point
//!
//! Headless demo driver: runs one level at the fixed tick cadence with a
//! scripted pilot standing in for player input, then reports the outcome and
//! updates the profile snapshot. Usage: `neon-runner [level 1-3] [seed]`.

use std::time::{Duration, Instant};

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use neon_runner::consts::*;
use neon_runner::profile::Profile;
use neon_runner::sim::{Entity, GameState, Level, TickInput, tick};

const PROFILE_PATH: &str = "neon-runner-profile.json";

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let level_index: usize = args.next().and_then(|s| s.parse().ok()).unwrap_or(1);
    let seed: u64 = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| rand::rng().random());

    let mut profile = load_profile();
    let mut rng = Pcg32::seed_from_u64(seed);
    let level = match Level::predefined(level_index, &mut rng) {
        Some(level) => level,
        None => Level::custom(None, &mut rng),
    };
    let mut state = GameState::new(level, profile.customization.ability);
    log::info!(
        "starting '{}' as {} (seed {seed})",
        state.level_name,
        profile.customization.avatar
    );

    // The first press starts the run
    let mut input = TickInput {
        jump: true,
        shoot: false,
    };
    let outcome = loop {
        let frame_start = Instant::now();
        if let Some(outcome) = tick(&mut state, &input, TICK_DT) {
            break outcome;
        }
        input = autopilot(&state);

        if state.is_running() && state.time_ticks % 120 == 0 {
            log::debug!(
                "progress {:.0}%, score {}, ammo {}",
                state.progress() * 100.0,
                state.score,
                state.player.ammo
            );
        }

        if let Some(rest) = Duration::from_secs_f32(TICK_DT).checked_sub(frame_start.elapsed()) {
            std::thread::sleep(rest);
        }
    };

    println!(
        "{}: {:?}, final score {}",
        state.level_name, outcome.reason, outcome.score
    );
    if profile.record_score(outcome.score) {
        println!("New high score!");
    }
    save_profile(&profile);
}

/// Scripted pilot: hop over fatal things coming up in the lane, shoot at
/// enemies ahead while ammo lasts.
fn autopilot(state: &GameState) -> TickInput {
    let player = &state.player;
    let ahead = |e: &Entity, range: f32| {
        e.pos.x + e.width > player.pos.x + PLAYER_WIDTH && e.pos.x < player.pos.x + range
    };
    let in_lane = |e: &Entity| {
        e.pos.y < player.pos.y + PLAYER_HEIGHT && e.pos.y + e.height > player.pos.y
    };

    let jump = player.jumps == 0
        && state
            .entities
            .iter()
            .any(|e| e.is_fatal() && ahead(e, 120.0) && in_lane(e));

    // Fire in bursts rather than every tick so the ammo lasts the level
    let shoot = player.ammo > 0
        && state.time_ticks % 10 == 0
        && state
            .entities
            .iter()
            .any(|e| e.is_enemy() && ahead(e, 400.0) && in_lane(e));

    TickInput { jump, shoot }
}

fn load_profile() -> Profile {
    match std::fs::read_to_string(PROFILE_PATH) {
        Ok(json) => Profile::from_json(&json),
        Err(_) => Profile::default(),
    }
}

fn save_profile(profile: &Profile) {
    match profile.to_json() {
        Ok(json) => {
            if let Err(err) = std::fs::write(PROFILE_PATH, json) {
                log::warn!("could not save profile: {err}");
            }
        }
        Err(err) => log::warn!("could not serialize profile: {err}"),
    }
}
