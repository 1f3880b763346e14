/// Collision resolution and scoring, run once per tick in a fixed order:
///
/// 1. shots × invaders, then shots × bombers
/// 2. explosion area damage (cascading)
/// 3. ship × power-ups
/// 4. ship × invaders / bombers (lethal unless shielded)
/// 5. invaders breaching the bottom (always lethal)

use crate::compute::{motion, powerups};
use crate::entities::{GameStatus, Invader, Projectile, RoundState};

/// Points per invader.
pub const INVADER_SCORE: u32 = 10;
/// Extra points per additional invader shot down in the same tick.
pub const COMBO_BONUS: u32 = 2;
/// Points per bomber.
pub const BOMBER_SCORE: u32 = 20;

/// Score for `n` invaders shot in one tick: `10·n + 2·(n−1)`.
pub fn combo_score(n: u32) -> u32 {
    if n == 0 {
        return 0;
    }
    INVADER_SCORE * n + COMBO_BONUS * (n - 1)
}

/// Remove every invader touched by a live shot. Each shot is spent on the
/// first invader it touches. Returns the number of invaders destroyed.
fn shoot_down(invaders: &mut Vec<Invader>, projectiles: &[Projectile], spent: &mut [bool]) -> u32 {
    let mut kills = 0;
    invaders.retain(|inv| {
        let mut hit = false;
        for (i, p) in projectiles.iter().enumerate() {
            if !spent[i] && p.rect.intersects(&inv.rect) {
                spent[i] = true;
                hit = true;
            }
        }
        if hit {
            kills += 1;
        }
        !hit
    });
    kills
}

/// Rule 1: shots against invaders, then the surviving shots against bombers.
pub fn resolve_shots(mut state: RoundState, now_ms: u64) -> RoundState {
    let mut spent = vec![false; state.projectiles.len()];

    let invader_kills = shoot_down(&mut state.invaders, &state.projectiles, &mut spent);
    state.score += combo_score(invader_kills);

    let mut deaths = Vec::new();
    {
        let projectiles = &state.projectiles;
        state.bombers.retain(|b| {
            let mut hit = false;
            for (i, p) in projectiles.iter().enumerate() {
                if !spent[i] && p.rect.intersects(&b.rect) {
                    spent[i] = true;
                    hit = true;
                }
            }
            if hit {
                deaths.push(b.rect.center());
            }
            !hit
        });
    }
    state.score += BOMBER_SCORE * deaths.len() as u32;
    for center in deaths {
        state.explosions.push(motion::spawn_explosion(&state.sim, center, now_ms));
    }

    let mut spent = spent.into_iter();
    state
        .projectiles
        .retain(|_| !spent.next().unwrap_or(false));

    if invader_kills > 0 {
        tracing::trace!(invader_kills, score = state.score, "shots landed");
    }
    state
}

fn within(center: (f32, f32), origin: (f32, f32), radius: f32) -> bool {
    let dx = center.0 - origin.0;
    let dy = center.1 - origin.1;
    dx * dx + dy * dy <= radius * radius
}

/// Rule 2: every live explosion destroys whatever centre lies inside its
/// current radius. Bombers caught in a blast leave their own explosion,
/// which is swept in the same pass.
pub fn resolve_explosions(mut state: RoundState, now_ms: u64) -> RoundState {
    let mut i = 0;
    while i < state.explosions.len() {
        let blast = &state.explosions[i];
        let origin = (blast.x, blast.y);
        let radius = motion::explosion_radius(blast, now_ms);

        let before = state.invaders.len();
        state.invaders.retain(|inv| !within(inv.rect.center(), origin, radius));
        let invader_kills = (before - state.invaders.len()) as u32;

        let mut deaths = Vec::new();
        state.bombers.retain(|b| {
            let center = b.rect.center();
            let caught = within(center, origin, radius);
            if caught {
                deaths.push(center);
            }
            !caught
        });

        state.score += INVADER_SCORE * invader_kills + BOMBER_SCORE * deaths.len() as u32;
        for center in deaths {
            state.explosions.push(motion::spawn_explosion(&state.sim, center, now_ms));
        }
        i += 1;
    }
    state
}

/// Rule 4: contact with an invader or bomber ends the round, unless the
/// shield is up. The shield then absorbs every contact this tick and the
/// touching enemies are removed without scoring.
pub fn resolve_contacts(mut state: RoundState) -> RoundState {
    let ship = state.ship.rect;
    let touching = state.invaders.iter().any(|inv| inv.rect.intersects(&ship))
        || state.bombers.iter().any(|b| b.rect.intersects(&ship));
    if !touching {
        return state;
    }

    if state.ship.shield.active {
        state.ship.shield.active = false;
        state.invaders.retain(|inv| !inv.rect.intersects(&ship));
        state.bombers.retain(|b| !b.rect.intersects(&ship));
        tracing::debug!(score = state.score, "shield absorbed a hit");
        return state;
    }

    game_over(state, "ship destroyed")
}

/// Rule 5: an invader low enough to breach the bottom line.
pub fn breached(state: &RoundState) -> bool {
    let line = state.sim.height - state.sim.bottom_breach;
    state.invaders.iter().any(|inv| inv.rect.bottom() >= line)
}

fn game_over(mut state: RoundState, cause: &str) -> RoundState {
    state.status = GameStatus::GameOver {
        final_score: state.score,
    };
    tracing::info!(level = state.level, score = state.score, cause, "game over");
    state
}

/// Run all five rules in order. Stops as soon as the round is lost.
pub fn resolve(state: RoundState, now_ms: u64) -> RoundState {
    let state = resolve_shots(state, now_ms);
    let state = resolve_explosions(state, now_ms);
    let state = powerups::collect(state, now_ms);
    let state = resolve_contacts(state);
    if state.is_over() {
        return state;
    }
    if breached(&state) {
        return game_over(state, "invaders reached the bottom");
    }
    state
}
