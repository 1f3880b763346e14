mod common;

use space_shooter::compute::collision::*;
use space_shooter::entities::*;

use common::{bomber_at, invader_at, make_state, shot_at};

fn blast(x: f32, y: f32, radius: f32) -> Explosion {
    Explosion {
        x,
        y,
        start_radius: radius,
        max_radius: radius,
        ttl_ms: 1000,
        spawned_at_ms: 0,
    }
}

// ── combo_score ───────────────────────────────────────────────────────────────

#[test]
fn combo_score_table() {
    assert_eq!(combo_score(0), 0);
    assert_eq!(combo_score(1), 10);
    assert_eq!(combo_score(2), 22);
    assert_eq!(combo_score(3), 34);
}

// ── Rule 1: shots ─────────────────────────────────────────────────────────────

#[test]
fn three_hits_in_one_tick_score_34() {
    let mut s = make_state();
    for x in [100.0, 200.0, 300.0] {
        s.invaders.push(invader_at(x, 100.0));
        s.projectiles.push(shot_at(x - 2.0, 95.0));
    }
    let s2 = resolve_shots(s, 1000);
    assert_eq!(s2.score, 34);
    assert!(s2.invaders.is_empty());
    assert!(s2.projectiles.is_empty());
}

#[test]
fn missed_shots_survive() {
    let mut s = make_state();
    s.invaders.push(invader_at(100.0, 100.0));
    s.projectiles.push(shot_at(400.0, 400.0));
    let s2 = resolve_shots(s, 1000);
    assert_eq!(s2.score, 0);
    assert_eq!(s2.invaders.len(), 1);
    assert_eq!(s2.projectiles.len(), 1);
}

#[test]
fn one_shot_destroys_at_most_one_invader() {
    let mut s = make_state();
    s.invaders.push(invader_at(100.0, 100.0));
    s.invaders.push(invader_at(120.0, 100.0));
    s.projectiles.push(shot_at(108.0, 95.0)); // overlaps both boxes
    let s2 = resolve_shots(s, 1000);
    assert_eq!(s2.invaders.len(), 1);
    assert_eq!(s2.score, 10);
    assert!(s2.projectiles.is_empty());
}

#[test]
fn bomber_kill_scores_20_and_leaves_one_explosion() {
    let mut s = make_state();
    s.bombers.push(bomber_at(400.0, 300.0));
    s.projectiles.push(shot_at(398.0, 295.0));

    let s2 = resolve_shots(s, 5000);
    assert_eq!(s2.score, 20);
    assert!(s2.bombers.is_empty());
    assert!(s2.projectiles.is_empty());
    assert_eq!(s2.explosions.len(), 1);
    let e = &s2.explosions[0];
    assert_eq!((e.x, e.y), (400.0, 300.0));
    assert_eq!(e.spawned_at_ms, 5000);
}

#[test]
fn invaders_take_the_shot_before_bombers() {
    let mut s = make_state();
    s.invaders.push(invader_at(200.0, 200.0));
    s.bombers.push(bomber_at(200.0, 200.0));
    s.projectiles.push(shot_at(198.0, 195.0));

    let s2 = resolve_shots(s, 1000);
    assert!(s2.invaders.is_empty());
    assert_eq!(s2.bombers.len(), 1);
    assert_eq!(s2.score, 10);
}

// ── Rule 2: explosions ────────────────────────────────────────────────────────

#[test]
fn explosion_destroys_inside_radius_and_spares_outside() {
    let mut s = make_state();
    s.explosions.push(blast(100.0, 100.0, 40.0));
    s.invaders.push(invader_at(110.0, 105.0)); // ≈11.2 away
    s.invaders.push(invader_at(200.0, 100.0)); // 100 away

    let s2 = resolve_explosions(s, 0);
    assert_eq!(s2.invaders.len(), 1);
    assert_eq!(s2.invaders[0].rect.center(), (200.0, 100.0));
    assert_eq!(s2.score, 10);
}

#[test]
fn explosion_radius_boundary_is_inclusive() {
    let mut s = make_state();
    s.explosions.push(blast(100.0, 100.0, 40.0));
    s.invaders.push(invader_at(140.0, 100.0)); // exactly on the rim
    let s2 = resolve_explosions(s, 0);
    assert!(s2.invaders.is_empty());
}

#[test]
fn explosion_kills_bombers_for_20() {
    let mut s = make_state();
    s.explosions.push(blast(100.0, 100.0, 40.0));
    s.bombers.push(bomber_at(120.0, 100.0));
    let s2 = resolve_explosions(s, 0);
    assert!(s2.bombers.is_empty());
    assert_eq!(s2.score, 20);
    // The bomber leaves its own blast behind.
    assert_eq!(s2.explosions.len(), 2);
}

#[test]
fn explosions_cascade_in_one_tick() {
    let mut s = make_state();
    s.sim.explosion_start_radius = 30.0;
    s.explosions.push(blast(100.0, 100.0, 40.0));
    s.bombers.push(bomber_at(130.0, 100.0)); // caught by the first blast
    s.invaders.push(invader_at(150.0, 100.0)); // 50 from the first, 20 from the second

    let s2 = resolve_explosions(s, 0);
    assert!(s2.bombers.is_empty());
    assert!(s2.invaders.is_empty());
    assert_eq!(s2.score, 30);
    assert_eq!(s2.explosions.len(), 2);
}

#[test]
fn every_live_explosion_is_swept() {
    let mut s = make_state();
    s.explosions.push(blast(100.0, 100.0, 20.0));
    s.explosions.push(blast(400.0, 100.0, 20.0));
    s.invaders.push(invader_at(100.0, 100.0));
    s.invaders.push(invader_at(400.0, 100.0));
    let s2 = resolve_explosions(s, 0);
    assert!(s2.invaders.is_empty());
    assert_eq!(s2.score, 20);
}

// ── Rule 4: contact ───────────────────────────────────────────────────────────

#[test]
fn contact_without_shield_ends_the_round() {
    let mut s = make_state();
    s.score = 120;
    let (cx, cy) = s.ship.rect.center();
    s.invaders.push(invader_at(cx, cy));

    let s2 = resolve_contacts(s);
    assert_eq!(s2.status, GameStatus::GameOver { final_score: 120 });
}

#[test]
fn bomber_contact_is_lethal_too() {
    let mut s = make_state();
    let (cx, cy) = s.ship.rect.center();
    s.bombers.push(bomber_at(cx + 10.0, cy - 10.0));
    let s2 = resolve_contacts(s);
    assert!(s2.is_over());
}

#[test]
fn shield_absorbs_contact() {
    let mut s = make_state();
    s.score = 50;
    s.ship.shield = PowerUpTimer {
        active: true,
        expires_at_ms: 9000,
    };
    let (cx, cy) = s.ship.rect.center();
    s.invaders.push(invader_at(cx, cy));
    s.bombers.push(bomber_at(cx, cy));
    s.invaders.push(invader_at(100.0, 100.0));

    let s2 = resolve_contacts(s);
    assert_eq!(s2.status, GameStatus::Playing);
    assert!(!s2.ship.shield.active);
    assert_eq!(s2.score, 50);
    // Touching enemies are gone, the rest untouched.
    assert_eq!(s2.invaders.len(), 1);
    assert!(s2.bombers.is_empty());
}

#[test]
fn no_contact_no_change() {
    let mut s = make_state();
    s.invaders.push(invader_at(100.0, 100.0));
    let s2 = resolve_contacts(s);
    assert_eq!(s2.status, GameStatus::Playing);
}

// ── Rule 5: bottom breach ─────────────────────────────────────────────────────

#[test]
fn bottom_breach_detected_at_the_line() {
    let mut s = make_state();
    s.invaders.push(invader_at(50.0, 727.0)); // bottom = 740 = 800 − 60
    assert!(breached(&s));

    let mut s = make_state();
    s.invaders.push(invader_at(50.0, 726.0)); // bottom = 739
    assert!(!breached(&s));
}

#[test]
fn bottom_breach_is_lethal_even_with_shield() {
    let mut s = make_state();
    s.ship.shield = PowerUpTimer {
        active: true,
        expires_at_ms: 9000,
    };
    s.invaders.push(invader_at(50.0, 730.0)); // beside the ship, not on it

    let s2 = resolve(s, 1000);
    assert!(s2.is_over());
    assert!(s2.ship.shield.active);
}

// ── resolve: ordering ─────────────────────────────────────────────────────────

#[test]
fn shield_picked_up_this_tick_saves_the_ship() {
    let mut s = make_state();
    let ship = s.ship.rect;
    let (cx, cy) = ship.center();
    s.powerups.push(PowerUp {
        rect: Rect::from_center(cx, cy, 28.0, 28.0),
        fall_speed: 5.0,
        kind: PowerUpKind::Shield,
    });
    s.bombers.push(bomber_at(cx, cy));
    s.invaders.push(invader_at(300.0, 300.0));

    let s2 = resolve(s, 1000);
    assert_eq!(s2.status, GameStatus::Playing);
    assert!(s2.powerups.is_empty());
    assert!(!s2.ship.shield.active);
}

#[test]
fn shot_kill_then_explosion_same_tick() {
    let mut s = make_state();
    s.sim.explosion_start_radius = 40.0;
    s.bombers.push(bomber_at(300.0, 300.0));
    s.projectiles.push(shot_at(298.0, 295.0));
    s.invaders.push(invader_at(330.0, 300.0)); // in the new blast, clear of the shot
    s.invaders.push(invader_at(100.0, 100.0));

    let s2 = resolve(s, 1000);
    assert_eq!(s2.score, 30);
    assert_eq!(s2.invaders.len(), 1);
    assert_eq!(s2.explosions.len(), 1);
}
