/// All game entity types. Pure data, no game rules.
///
/// Positions live in the logical viewport (`SimConfig::width` x
/// `SimConfig::height`, y grows downward) and are stored as `f32` so slow
/// movers accumulate fractional motion instead of truncating every tick.

use crate::config::SimConfig;

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Axis-aligned bounding box, anchored at its top-left corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Box whose bottom edge is centred on `(cx, bottom)`.
    pub fn from_mid_bottom(cx: f32, bottom: f32, w: f32, h: f32) -> Self {
        Self::new(cx - w / 2.0, bottom - h, w, h)
    }

    /// Box whose top edge is centred on `(cx, top)`.
    pub fn from_mid_top(cx: f32, top: f32, w: f32, h: f32) -> Self {
        Self::new(cx - w / 2.0, top, w, h)
    }

    pub fn from_center(cx: f32, cy: f32, w: f32, h: f32) -> Self {
        Self::new(cx - w / 2.0, cy - h / 2.0, w, h)
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Strict overlap: boxes that merely share an edge do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }

    pub fn translate(&mut self, dx: f32, dy: f32) {
        self.x += dx;
        self.y += dy;
    }
}

// ── Kinds ─────────────────────────────────────────────────────────────────────

/// Invader flavour. Cosmetic only; every kind obeys the same rules.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InvaderKind {
    A,
    B,
    C,
}

impl InvaderKind {
    /// Rows cycle A, B, C from the top of the grid.
    pub fn for_row(row: usize) -> Self {
        match row % 3 {
            0 => InvaderKind::A,
            1 => InvaderKind::B,
            _ => InvaderKind::C,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PowerUpKind {
    /// Hold-to-fire, still gated by the shot cooldown.
    Repeater,
    /// Five-way spread shot.
    Buckshot,
    /// Absorbs one otherwise-lethal contact.
    Shield,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 3] = [
        PowerUpKind::Repeater,
        PowerUpKind::Buckshot,
        PowerUpKind::Shield,
    ];
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    /// Simulation frozen since the given tick timestamp.
    Paused { since_ms: u64 },
    /// Terminal for the round.
    GameOver { final_score: u32 },
}

// ── Player ────────────────────────────────────────────────────────────────────

/// A timed power-up slot on the ship.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PowerUpTimer {
    pub active: bool,
    pub expires_at_ms: u64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Ship {
    pub rect: Rect,
    /// Horizontal displacement per tick while a direction is held.
    pub speed: f32,
    /// Timestamp of the last shot, `None` until the first one.
    pub last_shot_ms: Option<u64>,
    pub repeater: PowerUpTimer,
    pub buckshot: PowerUpTimer,
    pub shield: PowerUpTimer,
}

impl Ship {
    pub fn timer(&self, kind: PowerUpKind) -> &PowerUpTimer {
        match kind {
            PowerUpKind::Repeater => &self.repeater,
            PowerUpKind::Buckshot => &self.buckshot,
            PowerUpKind::Shield => &self.shield,
        }
    }

    pub fn timer_mut(&mut self, kind: PowerUpKind) -> &mut PowerUpTimer {
        match kind {
            PowerUpKind::Repeater => &mut self.repeater,
            PowerUpKind::Buckshot => &mut self.buckshot,
            PowerUpKind::Shield => &mut self.shield,
        }
    }
}

// ── Projectiles & enemies ─────────────────────────────────────────────────────

/// A player shot. `vx` is non-zero only for angled buckshot pellets.
#[derive(Clone, Debug, PartialEq)]
pub struct Projectile {
    pub rect: Rect,
    pub vx: f32,
    pub vy: f32,
}

/// One member of the formation. Speed and direction live on `Formation`.
#[derive(Clone, Debug, PartialEq)]
pub struct Invader {
    pub rect: Rect,
    pub kind: InvaderKind,
}

/// Homing enemy that dives at the ship.
#[derive(Clone, Debug, PartialEq)]
pub struct Bomber {
    pub rect: Rect,
    pub base_speed: f32,
    /// Per-instance offset into the lateral sway wave, in radians.
    pub sway_phase: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PowerUp {
    pub rect: Rect,
    pub fall_speed: f32,
    pub kind: PowerUpKind,
}

/// Growing damage volume left behind by a dead bomber.
#[derive(Clone, Debug, PartialEq)]
pub struct Explosion {
    /// Centre of the blast.
    pub x: f32,
    pub y: f32,
    pub start_radius: f32,
    pub max_radius: f32,
    pub ttl_ms: u64,
    pub spawned_at_ms: u64,
}

// ── Formation ─────────────────────────────────────────────────────────────────

/// Movement shared by every invader in the round.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Formation {
    /// +1.0 (right) or -1.0 (left).
    pub direction: f32,
    pub speed: f32,
    pub drop_dist: f32,
    /// Timestamp of the most recent edge flip, 0 after a level reset.
    pub last_flip_ms: u64,
}

// ── Input & HUD ───────────────────────────────────────────────────────────────

/// One frame of input as sampled by the poller.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameInput {
    pub left: bool,
    pub right: bool,
    /// Fire key went down this frame.
    pub fire_pressed: bool,
    /// Fire key is currently held.
    pub fire_held: bool,
    pub pause_pressed: bool,
    /// Development-only: drop one of each power-up.
    pub debug_spawn: bool,
}

/// Scalars the renderer draws around the playfield.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Hud {
    pub score: u32,
    pub level: u32,
    pub high_score: u32,
    /// Whole seconds left on each active power-up.
    pub repeater_secs: Option<u64>,
    pub buckshot_secs: Option<u64>,
    pub shield_secs: Option<u64>,
    pub bombers_active: bool,
    pub paused: bool,
    pub game_over: bool,
}

// ── Master round state ────────────────────────────────────────────────────────

/// Everything one round of play owns. Cloneable so `tick` can return a new
/// copy without mutating the caller's state.
#[derive(Clone, Debug)]
pub struct RoundState {
    pub sim: SimConfig,
    pub level: u32,
    pub score: u32,
    /// Best score loaded at round start, shown on the HUD.
    pub high_score: u32,
    pub status: GameStatus,
    pub ship: Ship,
    pub projectiles: Vec<Projectile>,
    pub invaders: Vec<Invader>,
    pub bombers: Vec<Bomber>,
    pub powerups: Vec<PowerUp>,
    pub explosions: Vec<Explosion>,
    pub formation: Formation,
    pub powerups_spawned: bool,
    pub bombers_spawned: bool,
}

impl RoundState {
    pub fn is_over(&self) -> bool {
        matches!(self.status, GameStatus::GameOver { .. })
    }

    pub fn is_paused(&self) -> bool {
        matches!(self.status, GameStatus::Paused { .. })
    }
}
