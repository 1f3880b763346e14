/// Timed power-ups: spawn policy, pickup, activation and expiry.

use rand::Rng;

use crate::config::SimConfig;
use crate::entities::{PowerUp, PowerUpKind, PowerUpTimer, Rect, RoundState, Ship};

/// Top edge each kind starts at, staggered so they don't arrive together.
fn spawn_top(kind: PowerUpKind) -> f32 {
    match kind {
        PowerUpKind::Repeater => -40.0,
        PowerUpKind::Buckshot => -100.0,
        PowerUpKind::Shield => -160.0,
    }
}

/// One of each kind at a random column above the viewport.
pub fn spawn_batch(sim: &SimConfig, rng: &mut impl Rng) -> Vec<PowerUp> {
    let lo = sim.powerup_spawn_margin.min(sim.width / 2.0);
    let hi = (sim.width - sim.powerup_spawn_margin).max(lo);
    PowerUpKind::ALL
        .iter()
        .map(|&kind| {
            let fall_speed = rng.gen_range(sim.powerup_min_fall..=sim.powerup_max_fall);
            let x = rng.gen_range(lo..=hi);
            PowerUp {
                rect: Rect::from_mid_top(x, spawn_top(kind), sim.powerup_size, sim.powerup_size),
                fall_speed,
                kind,
            }
        })
        .collect()
}

/// Drop the level's power-ups once per level.
pub fn spawn_for_level(mut state: RoundState, rng: &mut impl Rng) -> RoundState {
    if state.powerups_spawned {
        return state;
    }
    let batch = spawn_batch(&state.sim, rng);
    state.powerups.extend(batch);
    state.powerups_spawned = true;
    state
}

/// Activate `kind` until `now_ms + duration_ms`. A repeat pickup restarts
/// the timer from now; it never extends the old one.
pub fn activate(ship: &mut Ship, kind: PowerUpKind, now_ms: u64, duration_ms: u64) {
    *ship.timer_mut(kind) = PowerUpTimer {
        active: true,
        expires_at_ms: now_ms + duration_ms,
    };
}

/// Clear every power-up whose deadline has passed.
pub fn expire(ship: &mut Ship, now_ms: u64) {
    for kind in PowerUpKind::ALL {
        let timer = ship.timer_mut(kind);
        if timer.active && now_ms >= timer.expires_at_ms {
            timer.active = false;
            tracing::debug!(?kind, "power-up expired");
        }
    }
}

/// Whole seconds left on an active power-up.
pub fn seconds_left(timer: &PowerUpTimer, now_ms: u64) -> Option<u64> {
    timer
        .active
        .then(|| timer.expires_at_ms.saturating_sub(now_ms) / 1000)
}

/// Ship × power-up: every overlapping pickup is consumed and activated.
pub fn collect(mut state: RoundState, now_ms: u64) -> RoundState {
    let ship_rect = state.ship.rect;
    let duration = state.sim.powerup_duration_ms;
    let mut picked = Vec::new();

    state.powerups.retain(|p| {
        if p.rect.intersects(&ship_rect) {
            picked.push(p.kind);
            false
        } else {
            true
        }
    });

    for kind in picked {
        activate(&mut state.ship, kind, now_ms, duration);
        tracing::debug!(?kind, expires_at_ms = now_ms + duration, "power-up collected");
    }
    state
}
