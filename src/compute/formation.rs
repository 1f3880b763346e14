/// The invader block: one direction, one speed, and the
/// edge-detect / flip / drop protocol.

use crate::config::SimConfig;
use crate::entities::{Formation, Invader, InvaderKind, Rect, RoundState};

/// Fresh rows × cols grid, horizontally centred, `invader_top_margin` from
/// the top.
pub fn build_grid(sim: &SimConfig) -> Vec<Invader> {
    let span = (sim.invader_cols.saturating_sub(1)) as f32 * sim.invader_spacing_x;
    let start_x = ((sim.width - span) / 2.0).floor();

    let mut invaders = Vec::with_capacity(sim.invader_rows * sim.invader_cols);
    for row in 0..sim.invader_rows {
        for col in 0..sim.invader_cols {
            invaders.push(Invader {
                rect: Rect::new(
                    start_x + col as f32 * sim.invader_spacing_x,
                    sim.invader_top_margin + row as f32 * sim.invader_spacing_y,
                    sim.invader_width,
                    sim.invader_height,
                ),
                kind: InvaderKind::for_row(row),
            });
        }
    }
    invaders
}

/// True if the invader is within `edge_margin` of either side.
pub fn touches_edge(invader: &Invader, sim: &SimConfig) -> bool {
    invader.rect.right() >= sim.width - sim.edge_margin || invader.rect.left() <= sim.edge_margin
}

pub fn edge_reached(invaders: &[Invader], sim: &SimConfig) -> bool {
    invaders.iter().any(|inv| touches_edge(inv, sim))
}

/// Whether a flip is allowed at `now_ms` given the last one.
pub fn flip_ready(formation: &Formation, cooldown_ms: u64, now_ms: u64) -> bool {
    now_ms.saturating_sub(formation.last_flip_ms) >= cooldown_ms
}

/// Shift every invader sideways by the shared velocity, then flip and drop
/// the whole block if it touched a side and the cooldown allows.
pub fn step(mut state: RoundState, now_ms: u64) -> RoundState {
    let formation = state.formation;
    debug_assert!(
        formation.direction == 1.0 || formation.direction == -1.0,
        "formation direction must be ±1"
    );

    let dx = formation.speed * formation.direction;
    for invader in &mut state.invaders {
        invader.rect.translate(dx, 0.0);
    }

    if edge_reached(&state.invaders, &state.sim)
        && flip_ready(&formation, state.sim.edge_cooldown_ms, now_ms)
    {
        for invader in &mut state.invaders {
            invader.rect.translate(0.0, formation.drop_dist);
        }
        state.formation = Formation {
            direction: -formation.direction,
            last_flip_ms: now_ms,
            ..formation
        };
        tracing::debug!(
            direction = state.formation.direction,
            drop = formation.drop_dist,
            "formation edge flip"
        );
    }

    state
}
