/// Keyboard sampling on top of crossterm key events.
///
/// Instead of acting on each event individually, the tracker records the
/// frame number of the last press/repeat for every key. A key counts as
/// held while that stamp is within the hold window, which covers terminals
/// that never send key-release events.

use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyEventKind};

/// How long a key stays "held" after its last press/repeat. The OS
/// key-repeat rate is ≥ 15 Hz, so this is always refreshed before expiry
/// once auto-repeat is running.
pub const HOLD_WINDOW_MS: u64 = 133;

/// Hold window in frames at `fps`, never less than one frame.
pub fn hold_window_frames(fps: u32) -> u64 {
    (HOLD_WINDOW_MS * fps as u64).div_ceil(1000).max(1)
}

#[derive(Debug, Clone)]
pub struct KeyTracker {
    key_frame: HashMap<KeyCode, u64>,
    frame: u64,
    hold_window: u64,
    /// The terminal reports Repeat and Release kinds. Without them, OS
    /// auto-repeat arrives as a stream of Press events.
    reports_event_types: bool,
}

impl KeyTracker {
    pub fn new(fps: u32, reports_event_types: bool) -> Self {
        Self {
            key_frame: HashMap::new(),
            frame: 0,
            hold_window: hold_window_frames(fps),
            reports_event_types,
        }
    }

    pub fn hold_window(&self) -> u64 {
        self.hold_window
    }

    /// Start sampling a new frame.
    pub fn next_frame(&mut self) {
        self.frame += 1;
    }

    /// Record one key event. Returns true only for a fresh press: a Press
    /// that arrives while the key is still held is auto-repeat in disguise.
    pub fn record(&mut self, code: KeyCode, kind: KeyEventKind) -> bool {
        match kind {
            KeyEventKind::Press => {
                let fresh = self.reports_event_types || !self.is_held(&code);
                self.key_frame.insert(code, self.frame);
                fresh
            }
            KeyEventKind::Repeat => {
                self.key_frame.insert(code, self.frame);
                false
            }
            KeyEventKind::Release => {
                self.key_frame.remove(&code);
                false
            }
        }
    }

    /// True if `key` was seen within the last `hold_window` frames.
    pub fn is_held(&self, key: &KeyCode) -> bool {
        self.key_frame
            .get(key)
            .map(|&last| self.frame.saturating_sub(last) <= self.hold_window)
            .unwrap_or(false)
    }

    pub fn any_held(&self, keys: &[KeyCode]) -> bool {
        keys.iter().any(|k| self.is_held(k))
    }
}
