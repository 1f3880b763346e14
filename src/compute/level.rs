/// Level progression: difficulty tables, the per-level bomber wave and the
/// cleared-level reset.

use rand::Rng;

use crate::compute::formation;
use crate::config::SimConfig;
use crate::entities::{Bomber, Formation, Rect, RoundState};

// ── Difficulty tables ─────────────────────────────────────────────────────────

/// Shared invader speed: `min(4.0, 1.8 + 0.25·(level−1))`.
pub fn formation_speed(level: u32) -> f32 {
    debug_assert!(level >= 1, "levels start at 1");
    (1.8 + 0.25 * level.saturating_sub(1) as f32).min(4.0)
}

/// Drop on edge flip: `min(32, 24 + ⌊0.75·(level−1)⌋)`.
pub fn drop_distance(level: u32) -> f32 {
    debug_assert!(level >= 1, "levels start at 1");
    let bonus = (0.75 * level.saturating_sub(1) as f32) as u32;
    (24 + bonus).min(32) as f32
}

/// Bombers per level: none before `start_level`, then `2 + max(0, level/3 − 1)`.
pub fn bomber_count(level: u32, start_level: u32) -> usize {
    if level < start_level {
        return 0;
    }
    2 + (level / 3).saturating_sub(1) as usize
}

/// Homing speed grows by `bomber_speed_per_level` for each level past the start.
pub fn bomber_speed(sim: &SimConfig, base_speed: f32, level: u32) -> f32 {
    base_speed + sim.bomber_speed_per_level * level.saturating_sub(sim.bomber_start_level) as f32
}

pub fn formation_for_level(level: u32) -> Formation {
    Formation {
        direction: 1.0,
        speed: formation_speed(level),
        drop_dist: drop_distance(level),
        last_flip_ms: 0,
    }
}

// ── Per-level spawns ──────────────────────────────────────────────────────────

/// Build this level's bomber wave at random positions above the viewport.
pub fn bomber_wave(sim: &SimConfig, level: u32, rng: &mut impl Rng) -> Vec<Bomber> {
    let lo = sim.bomber_spawn_margin.min(sim.width / 2.0);
    let hi = (sim.width - sim.bomber_spawn_margin).max(lo);
    (0..bomber_count(level, sim.bomber_start_level))
        .map(|_| {
            let x = rng.gen_range(lo..=hi);
            let y = rng.gen_range(sim.bomber_spawn_y_min..=sim.bomber_spawn_y_max);
            Bomber {
                rect: Rect::from_center(x, y, sim.bomber_size, sim.bomber_size),
                base_speed: sim.bomber_base_speed,
                sway_phase: rng.gen_range(0.0..std::f32::consts::TAU),
            }
        })
        .collect()
}

/// Spawn the bomber wave once per level.
pub fn spawn_bombers(mut state: RoundState, rng: &mut impl Rng) -> RoundState {
    if state.bombers_spawned {
        return state;
    }
    let wave = bomber_wave(&state.sim, state.level, rng);
    if !wave.is_empty() {
        tracing::debug!(level = state.level, count = wave.len(), "bomber wave spawned");
    }
    state.bombers.extend(wave);
    state.bombers_spawned = true;
    state
}

// ── Transition ────────────────────────────────────────────────────────────────

/// Move to the next level once every invader is gone. Bombers never gate
/// progression.
pub fn advance_if_cleared(mut state: RoundState) -> RoundState {
    if !state.invaders.is_empty() {
        return state;
    }

    state.level += 1;
    state.formation = formation_for_level(state.level);
    state.invaders = formation::build_grid(&state.sim);

    state.powerups.clear();
    state.bombers.clear();
    state.explosions.clear();
    state.powerups_spawned = false;
    state.bombers_spawned = false;

    tracing::info!(
        level = state.level,
        score = state.score,
        speed = state.formation.speed,
        drop = state.formation.drop_dist,
        "level cleared"
    );
    state
}
