/// Pure game-logic functions.
///
/// `tick` takes an immutable reference to the current `RoundState`, the
/// frame's input, the frame's clock reading and an RNG handle, and returns a
/// brand-new `RoundState`. Side effects are limited to the injected RNG.

pub mod collision;
pub mod formation;
pub mod level;
pub mod motion;
pub mod powerups;

use rand::Rng;

use crate::config::SimConfig;
use crate::entities::{FrameInput, GameStatus, Hud, PowerUpKind, RoundState};

// ── Constructors ─────────────────────────────────────────────────────────────

/// Level 1 with a full grid, the ship centred at the bottom and nothing
/// spawned yet.
pub fn new_round(sim: SimConfig, high_score: u32) -> RoundState {
    RoundState {
        level: 1,
        score: 0,
        high_score,
        status: GameStatus::Playing,
        ship: motion::spawn_ship(&sim),
        projectiles: Vec::new(),
        invaders: formation::build_grid(&sim),
        bombers: Vec::new(),
        powerups: Vec::new(),
        explosions: Vec::new(),
        formation: level::formation_for_level(1),
        powerups_spawned: false,
        bombers_spawned: false,
        sim,
    }
}

// ── Pause ─────────────────────────────────────────────────────────────────────

/// Push every absolute deadline forward by `by_ms` so nothing ages while the
/// simulation is frozen.
fn shift_deadlines(mut state: RoundState, by_ms: u64) -> RoundState {
    if let Some(last) = state.ship.last_shot_ms.as_mut() {
        *last += by_ms;
    }
    for kind in PowerUpKind::ALL {
        let timer = state.ship.timer_mut(kind);
        if timer.active {
            timer.expires_at_ms += by_ms;
        }
    }
    // 0 means "no flip this level" and stays that way.
    if state.formation.last_flip_ms > 0 {
        state.formation.last_flip_ms += by_ms;
    }
    for explosion in &mut state.explosions {
        explosion.spawned_at_ms += by_ms;
    }
    state
}

fn toggle_pause(state: &RoundState, now_ms: u64) -> RoundState {
    match state.status {
        GameStatus::Playing => {
            tracing::debug!(now_ms, "paused");
            RoundState {
                status: GameStatus::Paused { since_ms: now_ms },
                ..state.clone()
            }
        }
        GameStatus::Paused { since_ms } => {
            let frozen_for = now_ms.saturating_sub(since_ms);
            tracing::debug!(frozen_for, "resumed");
            let resumed = RoundState {
                status: GameStatus::Playing,
                ..state.clone()
            };
            shift_deadlines(resumed, frozen_for)
        }
        GameStatus::GameOver { .. } => state.clone(),
    }
}

// ── Per-frame tick ─────────────────────────────────────────────────────────────

/// Advance the simulation by one frame.
///
/// `now_ms` is the frame's single clock reading; every timer compares
/// against it. All randomness comes through `rng` so callers control
/// determinism (useful for tests with a seeded RNG).
pub fn tick(
    state: &RoundState,
    input: &FrameInput,
    now_ms: u64,
    rng: &mut impl Rng,
) -> RoundState {
    debug_assert!(state.level >= 1, "levels start at 1");

    if state.is_over() {
        return state.clone();
    }
    if input.pause_pressed {
        return toggle_pause(state, now_ms);
    }
    if state.is_paused() {
        return state.clone();
    }

    let mut next = state.clone();

    // ── 1. Development trigger ───────────────────────────────────────────────
    if input.debug_spawn && next.sim.debug_powerups {
        let batch = powerups::spawn_batch(&next.sim, rng);
        tracing::debug!(count = batch.len(), "debug power-up batch");
        next.powerups.extend(batch);
    }

    // ── 2. Expire, then shoot ────────────────────────────────────────────────
    powerups::expire(&mut next.ship, now_ms);
    let next = motion::fire(next, input, now_ms);

    // ── 3. Once-per-level spawns ─────────────────────────────────────────────
    let next = powerups::spawn_for_level(next, rng);
    let next = level::spawn_bombers(next, rng);

    // ── 4. Motion ────────────────────────────────────────────────────────────
    let next = motion::move_ship(next, input);
    let next = motion::step_projectiles(next);
    let next = formation::step(next, now_ms);
    let next = motion::step_powerups(next);
    let next = motion::step_bombers(next, now_ms);
    let next = motion::prune_explosions(next, now_ms);

    // ── 5. Collisions & scoring ──────────────────────────────────────────────
    let next = collision::resolve(next, now_ms);
    if next.is_over() {
        return next;
    }

    // ── 6. Level progression ─────────────────────────────────────────────────
    level::advance_if_cleared(next)
}

// ── HUD ───────────────────────────────────────────────────────────────────────

/// Scalars for the renderer. While paused, timers read as of the pause.
pub fn hud(state: &RoundState, now_ms: u64) -> Hud {
    let at = match state.status {
        GameStatus::Paused { since_ms } => since_ms,
        _ => now_ms,
    };
    Hud {
        score: state.score,
        level: state.level,
        high_score: state.high_score,
        repeater_secs: powerups::seconds_left(&state.ship.repeater, at),
        buckshot_secs: powerups::seconds_left(&state.ship.buckshot, at),
        shield_secs: powerups::seconds_left(&state.ship.shield, at),
        bombers_active: state.level >= state.sim.bomber_start_level,
        paused: state.is_paused(),
        game_over: state.is_over(),
    }
}
