/// Rendering layer: all terminal I/O lives here.
///
/// Each function receives a mutable writer and an immutable view of the
/// round. No game logic is performed; this module only projects the logical
/// viewport onto terminal cells and translates state into terminal commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use space_shooter::compute::motion::explosion_radius;
use space_shooter::entities::{
    Bomber, Explosion, Hud, Invader, InvaderKind, PowerUp, PowerUpKind, Projectile, RoundState,
};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_LEVEL: Color = Color::White;
const C_PLAYER: Color = Color::White;
const C_PLAYER_SHIELDED: Color = Color::Cyan;
const C_INVADER_A: Color = Color::Magenta;
const C_INVADER_B: Color = Color::Green;
const C_INVADER_C: Color = Color::Cyan;
const C_BOMBER: Color = Color::Red;
const C_PROJECTILE: Color = Color::Yellow;
const C_EXPLOSION: Color = Color::DarkYellow;
const C_POWERUP_REPEATER: Color = Color::Cyan;
const C_POWERUP_BUCKSHOT: Color = Color::DarkYellow;
const C_POWERUP_SHIELD: Color = Color::Blue;
const C_HINT: Color = Color::DarkGrey;

/// Points sampled around an explosion ring.
const RING_POINTS: usize = 16;

// ── Screen mapping ────────────────────────────────────────────────────────────

/// Terminal size for this frame plus the mapping from logical coordinates.
/// Row 0 is the HUD, row 1 and row `rows-2` are the border, the last row
/// holds the key hints.
#[derive(Clone, Copy, Debug)]
pub struct Screen {
    pub cols: u16,
    pub rows: u16,
    logical_w: f32,
    logical_h: f32,
}

impl Screen {
    pub fn new(cols: u16, rows: u16, state: &RoundState) -> Self {
        Self {
            cols,
            rows,
            logical_w: state.sim.width,
            logical_h: state.sim.height,
        }
    }

    fn inner_cols(&self) -> f32 {
        self.cols.saturating_sub(2).max(1) as f32
    }

    fn inner_rows(&self) -> f32 {
        self.rows.saturating_sub(4).max(1) as f32
    }

    /// Cell for a logical point, or `None` if it falls outside the playfield.
    fn cell(&self, x: f32, y: f32) -> Option<(u16, u16)> {
        if x < 0.0 || y < 0.0 || x >= self.logical_w || y >= self.logical_h {
            return None;
        }
        let col = 1.0 + (x / self.logical_w * self.inner_cols()).floor();
        let row = 2.0 + (y / self.logical_h * self.inner_rows()).floor();
        Some((col as u16, row as u16))
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(
    out: &mut W,
    state: &RoundState,
    hud: &Hud,
    screen: &Screen,
    now_ms: u64,
    restart_ready: bool,
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_border(out, screen)?;
    draw_hud(out, hud, screen)?;

    for invader in &state.invaders {
        draw_invader(out, invader, screen)?;
    }
    for bomber in &state.bombers {
        draw_bomber(out, bomber, screen)?;
    }
    for powerup in &state.powerups {
        draw_powerup(out, powerup, screen)?;
    }
    for projectile in &state.projectiles {
        draw_projectile(out, projectile, screen)?;
    }
    for explosion in &state.explosions {
        draw_explosion(out, explosion, screen, now_ms)?;
    }

    draw_player(out, state, screen)?;
    draw_controls_hint(out, screen)?;

    if hud.paused {
        draw_banner(out, screen, "PAUSED  -  P to resume", Color::Yellow)?;
    }
    if hud.game_over {
        draw_game_over(out, hud, screen, restart_ready)?;
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, screen.rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, screen: &Screen) -> std::io::Result<()> {
    let w = screen.cols as usize;
    let h = screen.rows;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    out.queue(cursor::MoveTo(0, h.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    for row in 2..h.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(screen.cols.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, hud: &Hud, screen: &Screen) -> std::io::Result<()> {
    // Score and high score, left
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!(
        "Score:{:>6}  Hi:{:>6}",
        hud.score,
        hud.high_score.max(hud.score)
    )))?;

    // Level, centre
    let level_str = format!("[ LEVEL {} ]", hud.level);
    let lx = (screen.cols / 2).saturating_sub(level_str.len() as u16 / 2);
    out.queue(cursor::MoveTo(lx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_LEVEL))?;
    out.queue(Print(&level_str))?;

    // Power-up timers and the bomber warning, right-aligned
    let mut tags: Vec<(String, Color)> = Vec::new();
    if let Some(secs) = hud.repeater_secs {
        tags.push((format!("[» REPEAT {secs:>2}s]"), C_POWERUP_REPEATER));
    }
    if let Some(secs) = hud.buckshot_secs {
        tags.push((format!("[∴ BUCK {secs:>2}s]"), C_POWERUP_BUCKSHOT));
    }
    if let Some(secs) = hud.shield_secs {
        tags.push((format!("[◊ SHIELD {secs:>2}s]"), C_POWERUP_SHIELD));
    }
    if hud.bombers_active {
        tags.push(("BOMBERS".to_string(), C_BOMBER));
    }

    let width: usize = tags.iter().map(|(t, _)| t.chars().count() + 1).sum();
    let mut x = screen.cols.saturating_sub(width as u16 + 1);
    for (tag, color) in &tags {
        out.queue(cursor::MoveTo(x, 0))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(tag))?;
        x += tag.chars().count() as u16 + 1;
    }

    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

/// Print `sprite` centred on the logical point.
fn put_centered<W: Write>(
    out: &mut W,
    screen: &Screen,
    center: (f32, f32),
    sprite: &str,
    color: Color,
) -> std::io::Result<()> {
    let Some((col, row)) = screen.cell(center.0, center.1) else {
        return Ok(());
    };
    let half = sprite.chars().count() as u16 / 2;
    let col = col.saturating_sub(half).max(1);
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(sprite))?;
    Ok(())
}

fn draw_player<W: Write>(out: &mut W, state: &RoundState, screen: &Screen) -> std::io::Result<()> {
    //   ▲       ← tip (ship top)
    //  /█\      ← fuselage + wings (ship bottom)
    let ship = &state.ship.rect;
    let color = if state.ship.shield.active {
        C_PLAYER_SHIELDED
    } else {
        C_PLAYER
    };
    let (cx, _) = ship.center();
    put_centered(out, screen, (cx, ship.top()), "▲", color)?;
    put_centered(out, screen, (cx, ship.bottom() - 1.0), "/█\\", color)?;
    Ok(())
}

fn draw_invader<W: Write>(out: &mut W, invader: &Invader, screen: &Screen) -> std::io::Result<()> {
    let (sprite, color) = match invader.kind {
        InvaderKind::A => ("«▼»", C_INVADER_A),
        InvaderKind::B => ("╚═╝", C_INVADER_B),
        InvaderKind::C => ("[◘]", C_INVADER_C),
    };
    put_centered(out, screen, invader.rect.center(), sprite, color)
}

fn draw_bomber<W: Write>(out: &mut W, bomber: &Bomber, screen: &Screen) -> std::io::Result<()> {
    put_centered(out, screen, bomber.rect.center(), "(◎)", C_BOMBER)
}

fn draw_projectile<W: Write>(
    out: &mut W,
    projectile: &Projectile,
    screen: &Screen,
) -> std::io::Result<()> {
    put_centered(out, screen, projectile.rect.center(), "║", C_PROJECTILE)
}

/// Falling pickups:
///   »  (cyan)   Repeater
///   ∴  (orange) Buckshot
///   ◊  (blue)   Shield
fn draw_powerup<W: Write>(out: &mut W, powerup: &PowerUp, screen: &Screen) -> std::io::Result<()> {
    let (sprite, color) = match powerup.kind {
        PowerUpKind::Repeater => ("»", C_POWERUP_REPEATER),
        PowerUpKind::Buckshot => ("∴", C_POWERUP_BUCKSHOT),
        PowerUpKind::Shield => ("◊", C_POWERUP_SHIELD),
    };
    put_centered(out, screen, powerup.rect.center(), sprite, color)
}

/// A ring of sparks at the blast's current radius.
fn draw_explosion<W: Write>(
    out: &mut W,
    explosion: &Explosion,
    screen: &Screen,
    now_ms: u64,
) -> std::io::Result<()> {
    let radius = explosion_radius(explosion, now_ms);
    for i in 0..RING_POINTS {
        let theta = i as f32 / RING_POINTS as f32 * std::f32::consts::TAU;
        let point = (
            explosion.x + radius * theta.cos(),
            explosion.y + radius * theta.sin(),
        );
        put_centered(out, screen, point, "*", C_EXPLOSION)?;
    }
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, screen: &Screen) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, screen.rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(
        "← → / A D : Move   SPACE : Shoot   P : Pause   Q : Quit",
    ))?;
    Ok(())
}

// ── Overlays ──────────────────────────────────────────────────────────────────

fn draw_banner<W: Write>(
    out: &mut W,
    screen: &Screen,
    msg: &str,
    color: Color,
) -> std::io::Result<()> {
    let col = (screen.cols / 2).saturating_sub(msg.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, screen.rows / 2))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(msg))?;
    Ok(())
}

fn draw_game_over<W: Write>(
    out: &mut W,
    hud: &Hud,
    screen: &Screen,
    restart_ready: bool,
) -> std::io::Result<()> {
    let new_best = hud.score > hud.high_score;
    let score_line = format!("Final Score: {:>6}", hud.score);
    let best_line = if new_best {
        format!("★ NEW BEST: {:>6} ★", hud.score)
    } else {
        format!("Best Score:  {:>6}", hud.high_score)
    };

    let lines: &[(&str, Color)] = &[
        ("╔════════════════════╗", Color::Red),
        ("║    GAME  OVER      ║", Color::Red),
        ("╚════════════════════╝", Color::Red),
    ];
    let best_color = if new_best { Color::Yellow } else { Color::DarkGrey };

    let cx = screen.cols / 2;
    let total_rows = lines.len() + 3; // 3 box lines + score + best + hint
    let start_row = (screen.rows / 2).saturating_sub(total_rows as u16 / 2);

    for (i, (msg, color)) in lines.iter().enumerate() {
        let row = start_row + i as u16;
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*msg))?;
    }

    let score_row = start_row + lines.len() as u16;
    let col = cx.saturating_sub(score_line.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, score_row))?;
    out.queue(style::SetForegroundColor(Color::Yellow))?;
    out.queue(Print(&score_line))?;

    let best_row = score_row + 1;
    let col = cx.saturating_sub(best_line.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, best_row))?;
    out.queue(style::SetForegroundColor(best_color))?;
    out.queue(Print(&best_line))?;

    if restart_ready {
        let hint = "R - Play Again  Q - Quit";
        let col = cx.saturating_sub(hint.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, best_row + 1))?;
        out.queue(style::SetForegroundColor(Color::White))?;
        out.queue(Print(hint))?;
    }

    Ok(())
}
