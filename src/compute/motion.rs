/// Per-kind motion rules: the ship, shots, falling power-ups, homing
/// bombers and expanding explosions.

use crate::compute::level;
use crate::config::SimConfig;
use crate::entities::{Bomber, Explosion, FrameInput, Projectile, Rect, RoundState, Ship};

/// Buckshot spread, degrees from vertical.
pub const BUCKSHOT_ANGLES_DEG: [f32; 5] = [-15.0, -7.5, 0.0, 7.5, 15.0];

/// Added to homing distances before normalising.
const HOMING_EPSILON: f32 = 1e-6;

// ── Ship ──────────────────────────────────────────────────────────────────────

pub fn spawn_ship(sim: &SimConfig) -> Ship {
    Ship {
        rect: Rect::from_mid_bottom(
            sim.width / 2.0,
            sim.height - sim.ship_bottom_margin,
            sim.ship_width,
            sim.ship_height,
        ),
        speed: sim.ship_speed,
        last_shot_ms: None,
        repeater: Default::default(),
        buckshot: Default::default(),
        shield: Default::default(),
    }
}

/// Apply held direction keys, clamped to the viewport. Holding both cancels.
pub fn move_ship(mut state: RoundState, input: &FrameInput) -> RoundState {
    let ship = &mut state.ship;
    if input.left {
        ship.rect.x -= ship.speed;
    }
    if input.right {
        ship.rect.x += ship.speed;
    }
    let max_x = (state.sim.width - ship.rect.w).max(0.0);
    ship.rect.x = ship.rect.x.clamp(0.0, max_x);
    state
}

pub fn can_shoot(ship: &Ship, cooldown_ms: u64, now_ms: u64) -> bool {
    ship.last_shot_ms
        .map_or(true, |last| now_ms.saturating_sub(last) >= cooldown_ms)
}

/// Projectiles for one trigger pull: a single straight shot, or the
/// five-way fan while buckshot is active.
pub fn shot_pattern(ship: &Ship, sim: &SimConfig) -> Vec<Projectile> {
    let straight = [0.0_f32];
    let angles: &[f32] = if ship.buckshot.active {
        &BUCKSHOT_ANGLES_DEG
    } else {
        &straight
    };
    let (cx, _) = ship.rect.center();

    angles
        .iter()
        .map(|deg| {
            let rad = deg.to_radians();
            Projectile {
                rect: Rect::from_mid_bottom(
                    cx,
                    ship.rect.top(),
                    sim.projectile_width,
                    sim.projectile_height,
                ),
                vx: sim.projectile_speed * rad.sin(),
                vy: -sim.projectile_speed * rad.cos(),
            }
        })
        .collect()
}

/// Fire on a fresh press, or every frame the key is held while the repeater
/// is up. Both paths respect the shot cooldown.
pub fn fire(mut state: RoundState, input: &FrameInput, now_ms: u64) -> RoundState {
    let wants = input.fire_pressed || (state.ship.repeater.active && input.fire_held);
    if !wants || !can_shoot(&state.ship, state.sim.shot_cooldown_ms, now_ms) {
        return state;
    }
    let shots = shot_pattern(&state.ship, &state.sim);
    state.projectiles.extend(shots);
    state.ship.last_shot_ms = Some(now_ms);
    state
}

// ── Projectiles & power-ups ───────────────────────────────────────────────────

/// True once the box has completely left the viewport on any side.
pub fn outside_viewport(rect: &Rect, sim: &SimConfig) -> bool {
    rect.bottom() < 0.0 || rect.top() > sim.height || rect.right() < 0.0 || rect.left() > sim.width
}

pub fn step_projectiles(mut state: RoundState) -> RoundState {
    let sim = state.sim;
    state.projectiles.retain_mut(|p| {
        p.rect.translate(p.vx, p.vy);
        !outside_viewport(&p.rect, &sim)
    });
    state
}

pub fn step_powerups(mut state: RoundState) -> RoundState {
    let height = state.sim.height;
    state.powerups.retain_mut(|p| {
        p.rect.translate(0.0, p.fall_speed);
        p.rect.top() <= height
    });
    state
}

// ── Bombers ───────────────────────────────────────────────────────────────────

/// Velocity toward `target` at `speed`, plus the lateral sway on x.
pub fn bomber_velocity(
    bomber: &Bomber,
    target: (f32, f32),
    speed: f32,
    now_ms: u64,
    sim: &SimConfig,
) -> (f32, f32) {
    let (bx, by) = bomber.rect.center();
    let dx = target.0 - bx;
    let dy = target.1 - by;
    let dist = dx.hypot(dy) + HOMING_EPSILON;

    let wave = now_ms as f64 / sim.bomber_sway_period_ms as f64 + bomber.sway_phase as f64;
    let sway = wave.sin() as f32 * sim.bomber_sway_amplitude;

    (dx / dist * speed + sway, dy / dist * speed)
}

pub fn bomber_culled(rect: &Rect, sim: &SimConfig) -> bool {
    rect.top() > sim.height + sim.bomber_cull_below
        || rect.right() < -sim.bomber_cull_side
        || rect.left() > sim.width + sim.bomber_cull_side
}

/// Home every bomber on the ship's current centre. Far-off bombers are
/// culled without scoring.
pub fn step_bombers(mut state: RoundState, now_ms: u64) -> RoundState {
    let sim = state.sim;
    let target = state.ship.rect.center();
    let level = state.level;

    state.bombers.retain_mut(|b| {
        let speed = level::bomber_speed(&sim, b.base_speed, level);
        let (vx, vy) = bomber_velocity(b, target, speed, now_ms, &sim);
        b.rect.translate(vx, vy);
        !bomber_culled(&b.rect, &sim)
    });
    state
}

// ── Explosions ────────────────────────────────────────────────────────────────

pub fn spawn_explosion(sim: &SimConfig, center: (f32, f32), now_ms: u64) -> Explosion {
    Explosion {
        x: center.0,
        y: center.1,
        start_radius: sim.explosion_start_radius,
        max_radius: sim.explosion_max_radius,
        ttl_ms: sim.explosion_ttl_ms,
        spawned_at_ms: now_ms,
    }
}

/// Radius grows linearly from `start_radius` to `max_radius` over the TTL.
pub fn explosion_radius(explosion: &Explosion, now_ms: u64) -> f32 {
    if explosion.ttl_ms == 0 {
        return explosion.max_radius;
    }
    let elapsed = now_ms.saturating_sub(explosion.spawned_at_ms);
    let t = (elapsed as f32 / explosion.ttl_ms as f32).min(1.0);
    explosion.start_radius + (explosion.max_radius - explosion.start_radius) * t
}

pub fn explosion_expired(explosion: &Explosion, now_ms: u64) -> bool {
    now_ms.saturating_sub(explosion.spawned_at_ms) >= explosion.ttl_ms
}

pub fn prune_explosions(mut state: RoundState, now_ms: u64) -> RoundState {
    state.explosions.retain(|e| !explosion_expired(e, now_ms));
    state
}
