mod display;

use std::io::{stdout, BufWriter, Write};
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::thread_rng;
use tracing_subscriber::EnvFilter;

use space_shooter::clock::{Clock, MonotonicClock};
use space_shooter::compute::{hud, new_round, tick};
use space_shooter::config::GameConfig;
use space_shooter::entities::{FrameInput, RoundState};
use space_shooter::highscore::{FileHighScore, HighScoreStore};
use space_shooter::input::KeyTracker;

use display::Screen;

// ── Logging ───────────────────────────────────────────────────────────────────

/// Log to a file: stdout belongs to the renderer.
fn init_logging() {
    let path = std::env::var("SPACE_SHOOTER_LOG").unwrap_or_else(|_| "space_shooter.log".to_string());
    let Ok(file) = std::fs::OpenOptions::new().create(true).append(true).open(&path) else {
        return;
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
}

// ── Game loop ─────────────────────────────────────────────────────────────────

enum LoopExit {
    Quit,
    Restart,
}

/// Runs one round until the player quits or asks for another round.
///
/// Each frame the keys the tracker still sees as held become the held half
/// of a `FrameInput`; fresh presses seen this frame become its
/// edge-triggered half.
fn game_loop<W: Write>(
    out: &mut W,
    config: &GameConfig,
    state: &mut RoundState,
    rx: &mpsc::Receiver<Event>,
    store: &mut FileHighScore,
    keyboard_enhanced: bool,
) -> std::io::Result<LoopExit> {
    let mut rng = thread_rng();
    let clock = MonotonicClock::new();
    let frame_time = Duration::from_secs_f64(1.0 / config.fps as f64);

    let mut keys = KeyTracker::new(config.fps, keyboard_enhanced);
    let mut game_over_at: Option<u64> = None;

    loop {
        let frame_start = Instant::now();
        keys.next_frame();

        let now = clock.now_ms();
        let restart_ready = game_over_at
            .map(|at| now.saturating_sub(at) >= config.game_over_secs * 1000)
            .unwrap_or(false);

        // ── Drain all pending input events (non-blocking) ─────────────────────
        let mut input = FrameInput::default();
        while let Ok(Event::Key(KeyEvent { code, kind, modifiers, .. })) = rx.try_recv() {
            if !keys.record(code, kind) {
                continue;
            }
            match code {
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                    return Ok(LoopExit::Quit);
                }
                KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                    return Ok(LoopExit::Quit);
                }
                KeyCode::Char('r') | KeyCode::Char('R') if restart_ready => {
                    return Ok(LoopExit::Restart);
                }
                KeyCode::Char(' ') => input.fire_pressed = true,
                KeyCode::Char('p') | KeyCode::Char('P') => input.pause_pressed = true,
                KeyCode::F(2) => input.debug_spawn = true,
                _ => {}
            }
        }

        input.left = keys.any_held(&[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')]);
        input.right = keys.any_held(&[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')]);
        input.fire_held = keys.is_held(&KeyCode::Char(' '));

        *state = tick(state, &input, now, &mut rng);

        if state.is_over() && game_over_at.is_none() {
            game_over_at = Some(now);
            match store.save(state.score) {
                Ok(true) => {}
                Ok(false) => tracing::debug!(score = state.score, "high score not beaten"),
                Err(e) => tracing::warn!(
                    path = %store.path().display(),
                    "failed to save high score: {e}"
                ),
            }
        }

        let (cols, rows) = terminal::size()?;
        let screen = Screen::new(cols, rows, state);
        display::render(out, state, &hud(state, now), &screen, now, restart_ready)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            thread::sleep(frame_time - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> std::io::Result<()> {
    init_logging();
    tracing::info!("space shooter starting");
    let config = GameConfig::load();

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break; // receiver dropped → program exiting
            }
        }
    });

    let result = run(&mut out, &config, &rx, keyboard_enhanced);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    if let Err(e) = &result {
        tracing::error!("terminal error: {e}");
    }
    tracing::info!("space shooter exiting");
    result
}

fn run<W: Write>(
    out: &mut W,
    config: &GameConfig,
    rx: &mpsc::Receiver<Event>,
    keyboard_enhanced: bool,
) -> std::io::Result<()> {
    let mut store = FileHighScore::new(config.high_score_path.clone());

    loop {
        let high_score = store.load();
        tracing::info!(high_score, "round starting");
        let mut state = new_round(config.sim, high_score);
        match game_loop(out, config, &mut state, rx, &mut store, keyboard_enhanced)? {
            LoopExit::Quit => {
                // Quitting mid-round still records the score.
                if let Err(e) = store.save(state.score) {
                    tracing::warn!("failed to save high score: {e}");
                }
                break;
            }
            LoopExit::Restart => {}
        }
    }
    Ok(())
}
