use space_shooter::clock::{Clock, ManualClock, MonotonicClock};
use space_shooter::config::{GameConfig, SimConfig};
use space_shooter::Error;

// ── Config ────────────────────────────────────────────────────────────────────

#[test]
fn defaults_match_the_reference_tuning() {
    let config = GameConfig::default();
    assert_eq!(config.fps, 60);
    assert_eq!(config.game_over_secs, 3);
    assert!(config.validate().is_ok());

    let sim = config.sim;
    assert_eq!((sim.width, sim.height), (600.0, 800.0));
    assert_eq!(sim.shot_cooldown_ms, 220);
    assert_eq!(sim.edge_cooldown_ms, 300);
    assert_eq!(sim.powerup_duration_ms, 8000);
    assert_eq!((sim.invader_rows, sim.invader_cols), (5, 8));
    assert_eq!(sim.bomber_start_level, 3);
    assert_eq!((sim.bomber_spawn_y_min, sim.bomber_spawn_y_max), (-160.0, -40.0));
    assert_eq!((sim.bomber_cull_below, sim.bomber_cull_side), (40.0, 60.0));
}

#[test]
fn partial_toml_keeps_the_other_defaults() {
    let config = GameConfig::from_toml_str(
        r#"
fps = 30
high_score_path = "/tmp/best.txt"

[sim]
ship_speed = 9.0
debug_powerups = false
"#,
    )
    .unwrap();

    assert_eq!(config.fps, 30);
    assert_eq!(config.high_score_path.to_str(), Some("/tmp/best.txt"));
    assert_eq!(config.sim.ship_speed, 9.0);
    assert!(!config.sim.debug_powerups);
    assert_eq!(config.sim.projectile_speed, SimConfig::default().projectile_speed);
    assert_eq!(config.game_over_secs, 3);
}

#[test]
fn empty_toml_is_the_default() {
    let config = GameConfig::from_toml_str("").unwrap();
    assert_eq!(config.sim, SimConfig::default());
}

#[test]
fn zero_fps_is_rejected() {
    let err = GameConfig::from_toml_str("fps = 0").unwrap_err();
    assert!(matches!(err, Error::InvalidConfig(_)));
}

#[test]
fn zero_durations_are_rejected() {
    for toml in [
        "game_over_secs = 0",
        "[sim]\npowerup_duration_ms = 0",
        "[sim]\nedge_cooldown_ms = 0",
        "[sim]\nshot_cooldown_ms = 0",
        "[sim]\nexplosion_ttl_ms = 0",
    ] {
        let err = GameConfig::from_toml_str(toml).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)), "accepted: {toml}");
    }
}

#[test]
fn inverted_bomber_spawn_band_is_rejected() {
    let err = GameConfig::from_toml_str(
        "[sim]\nbomber_spawn_y_min = -10.0\nbomber_spawn_y_max = -50.0\n",
    )
    .unwrap_err();
    assert!(matches!(err, Error::InvalidConfig(_)));
}

#[test]
fn inverted_fall_range_is_rejected() {
    let err = GameConfig::from_toml_str(
        "[sim]\npowerup_min_fall = 9.0\npowerup_max_fall = 5.0\n",
    )
    .unwrap_err();
    assert!(matches!(err, Error::InvalidConfig(_)));
}

#[test]
fn empty_grid_is_rejected() {
    let err = GameConfig::from_toml_str("[sim]\ninvader_rows = 0\n").unwrap_err();
    assert!(matches!(err, Error::InvalidConfig(_)));
}

#[test]
fn malformed_toml_is_a_parse_error() {
    let err = GameConfig::from_toml_str("fps = \"fast\"").unwrap_err();
    assert!(matches!(err, Error::ConfigParse(_)));
    assert!(err.to_string().starts_with("Cannot parse config"));
}

// ── Clock ─────────────────────────────────────────────────────────────────────

#[test]
fn manual_clock_moves_only_when_told() {
    let clock = ManualClock::new(1000);
    assert_eq!(clock.now_ms(), 1000);
    clock.advance(16);
    assert_eq!(clock.now_ms(), 1016);
    clock.set(5000);
    assert_eq!(clock.now_ms(), 5000);
}

#[test]
fn monotonic_clock_never_goes_backwards() {
    let clock = MonotonicClock::new();
    let a = clock.now_ms();
    let b = clock.now_ms();
    assert!(b >= a);
}
