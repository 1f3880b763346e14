#![allow(dead_code)]

use rand::rngs::StdRng;
use rand::SeedableRng;

use space_shooter::compute::new_round;
use space_shooter::config::SimConfig;
use space_shooter::entities::{Bomber, Invader, InvaderKind, Projectile, Rect, RoundState};

pub fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

/// Level-1 round with the grid removed and the per-level spawns marked done,
/// so tests place exactly the entities they need.
pub fn make_state() -> RoundState {
    let mut s = new_round(SimConfig::default(), 0);
    s.invaders.clear();
    s.powerups_spawned = true;
    s.bombers_spawned = true;
    s
}

/// Invader centred on `(cx, cy)`.
pub fn invader_at(cx: f32, cy: f32) -> Invader {
    Invader {
        rect: Rect::from_center(cx, cy, 36.0, 26.0),
        kind: InvaderKind::A,
    }
}

/// Invader parked mid-screen, far from the edges, the ship and the bottom
/// line, so a round keeps running without a level change.
pub fn anchor_invader() -> Invader {
    invader_at(300.0, 300.0)
}

pub fn bomber_at(cx: f32, cy: f32) -> Bomber {
    Bomber {
        rect: Rect::from_center(cx, cy, 36.0, 36.0),
        base_speed: 2.4,
        sway_phase: 0.0,
    }
}

/// Straight-up shot whose box starts at `(x, y)`.
pub fn shot_at(x: f32, y: f32) -> Projectile {
    Projectile {
        rect: Rect::new(x, y, 4.0, 14.0),
        vx: 0.0,
        vy: -12.0,
    }
}

pub fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-3
}
