/// Input state tracker.
///
/// Tracks which keys are currently held down, enabling:
///   - Continuous movement while a key is held (both players at once)
///   - Edge-triggered start/restart (only fire on initial press)
///
/// Uses crossterm's keyboard enhancement for Release events when
/// available, falling back to timeout-based release detection on
/// terminals that don't support it. Mouse position and left clicks are
/// tracked for the Start button.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use crossterm::event::{self, poll, Event, KeyCode, KeyModifiers, MouseButton, MouseEventKind};

/// After this duration without a Press/Repeat event, consider the key
/// released. Only used when the terminal doesn't report Release events.
const HOLD_TIMEOUT: Duration = Duration::from_millis(160);

pub struct InputState {
    /// Timestamp of last Press/Repeat event for each key.
    last_active: HashMap<KeyCode, Instant>,

    /// Keys that transitioned from "not held" → "held" during the most
    /// recent drain_events() call. Used for edge-triggered actions.
    fresh_presses: Vec<KeyCode>,

    /// True while a Ctrl+C arrived this frame.
    ctrl_c: bool,

    /// Last known mouse position (terminal cells), if any.
    mouse_pos: Option<(u16, u16)>,

    /// Left button went down this frame.
    clicked: bool,

    /// Whether to honor Release events. Only true when keyboard
    /// enhancement is confirmed working.
    pub honor_release: bool,
}

impl InputState {
    pub fn new() -> Self {
        InputState {
            last_active: HashMap::with_capacity(16),
            fresh_presses: Vec::with_capacity(8),
            ctrl_c: false,
            mouse_pos: None,
            clicked: false,
            honor_release: false,
        }
    }

    /// Drain all pending terminal events and update key/mouse state.
    /// Call this once per frame, before the simulation update.
    pub fn drain_events(&mut self) {
        self.fresh_presses.clear();
        self.ctrl_c = false;
        self.clicked = false;

        while poll(Duration::ZERO).unwrap_or(false) {
            match event::read() {
                Ok(Event::Key(key)) => {
                    if key.modifiers.contains(KeyModifiers::CONTROL)
                        && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C'))
                    {
                        self.ctrl_c = true;
                    }

                    match key.kind {
                        event::KeyEventKind::Release if self.honor_release => {
                            self.last_active.remove(&key.code);
                        }
                        event::KeyEventKind::Release => {
                            // Rely on timeout-based expiry instead
                        }
                        _ => {
                            let was_held = self.is_held_inner(key.code);
                            self.last_active.insert(key.code, Instant::now());
                            if !was_held {
                                self.fresh_presses.push(key.code);
                            }
                        }
                    }
                }
                Ok(Event::Mouse(mouse)) => match mouse.kind {
                    MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                        self.mouse_pos = Some((mouse.column, mouse.row));
                    }
                    MouseEventKind::Down(MouseButton::Left) => {
                        self.mouse_pos = Some((mouse.column, mouse.row));
                        self.clicked = true;
                    }
                    _ => {}
                },
                _ => {}
            }
        }

        // Expire keys that have timed out (fallback for terminals
        // without Release events)
        let now = Instant::now();
        self.last_active.retain(|_, t| now.duration_since(*t) < HOLD_TIMEOUT);
    }

    /// Is this key currently held down? (continuous actions)
    pub fn is_held(&self, code: KeyCode) -> bool {
        self.is_held_inner(code)
    }

    /// Convenience: is any of these keys held?
    pub fn any_held(&self, codes: &[KeyCode]) -> bool {
        codes.iter().any(|c| self.is_held(*c))
    }

    /// Was this key freshly pressed this frame? (edge trigger)
    pub fn was_pressed(&self, code: KeyCode) -> bool {
        self.fresh_presses.contains(&code)
    }

    /// Convenience: was any of these keys freshly pressed?
    pub fn any_pressed(&self, codes: &[KeyCode]) -> bool {
        codes.iter().any(|c| self.was_pressed(*c))
    }

    pub fn ctrl_c_pressed(&self) -> bool {
        self.ctrl_c
    }

    /// Last known mouse position in terminal cells.
    pub fn mouse_position(&self) -> Option<(u16, u16)> {
        self.mouse_pos
    }

    /// Did the left button go down this frame?
    pub fn left_clicked(&self) -> bool {
        self.clicked
    }

    // ── Internal ──

    fn is_held_inner(&self, code: KeyCode) -> bool {
        self.last_active
            .get(&code)
            .map(|t| t.elapsed() < HOLD_TIMEOUT)
            .unwrap_or(false)
    }
}
