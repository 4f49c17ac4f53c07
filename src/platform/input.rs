//! Terminal input
//!
//! Terminals that support the keyboard enhancement protocol report key
//! releases. Others only send presses and auto-repeats, so a held key is
//! considered released once its repeats stop arriving.

use std::collections::BTreeMap;
use std::io::{self, Stdout};
use std::time::{Duration, Instant};

use crossterm::ExecutableCommand;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers, KeyboardEnhancementFlags, MouseButton, MouseEvent, MouseEventKind,
    PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};

use super::{Key, PlatformEvent};
use crate::renderer::Viewport;

/// Hold time before the first auto-repeat is expected
const INITIAL_HOLD: Duration = Duration::from_millis(500);
/// Gap between auto-repeats after which a key counts as released
const REPEAT_HOLD: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, Copy)]
struct Held {
    last_seen: Instant,
    repeating: bool,
}

/// Turns raw presses/releases into down/up edges
#[derive(Debug, Clone, Default)]
pub struct KeyTracker {
    held: BTreeMap<Key, Held>,
    releases_reported: bool,
}

impl KeyTracker {
    /// `releases_reported`: the terminal sends key release events
    pub fn new(releases_reported: bool) -> Self {
        Self {
            held: BTreeMap::new(),
            releases_reported,
        }
    }

    /// A press or auto-repeat. Only the first press of a key that is not
    /// already held is a down edge; the rest are repeats.
    pub fn press(&mut self, key: Key, now: Instant) -> PlatformEvent {
        let id = key.normalized();
        match self.held.get_mut(&id) {
            Some(held) => {
                held.last_seen = now;
                held.repeating = true;
                PlatformEvent::KeyRepeat(key)
            }
            None => {
                self.held.insert(
                    id,
                    Held {
                        last_seen: now,
                        repeating: false,
                    },
                );
                PlatformEvent::KeyDown(key)
            }
        }
    }

    pub fn release(&mut self, key: Key) -> PlatformEvent {
        self.releases_reported = true;
        self.held.remove(&key.normalized());
        PlatformEvent::KeyUp(key)
    }

    /// Synthesize releases for keys whose repeats stopped (only when the
    /// terminal does not report releases itself)
    pub fn expire(&mut self, now: Instant) -> Vec<PlatformEvent> {
        if self.releases_reported {
            return Vec::new();
        }
        let released: Vec<Key> = self
            .held
            .iter()
            .filter(|(_, h)| {
                let hold = if h.repeating { REPEAT_HOLD } else { INITIAL_HOLD };
                now.saturating_duration_since(h.last_seen) > hold
            })
            .map(|(key, _)| *key)
            .collect();
        for key in &released {
            self.held.remove(key);
        }
        released.into_iter().map(PlatformEvent::KeyUp).collect()
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains_key(&key.normalized())
    }
}

fn map_key_code(code: KeyCode) -> Option<Key> {
    let key = match code {
        KeyCode::Char(c) => Key::Char(c),
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Enter => Key::Enter,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Tab => Key::Tab,
        KeyCode::BackTab => Key::BackTab,
        KeyCode::Esc => Key::Esc,
        _ => return None,
    };
    Some(key)
}

/// Convert one crossterm event, appending the resulting platform events
pub fn convert_event(
    event: &Event,
    viewport: &Viewport,
    tracker: &mut KeyTracker,
    now: Instant,
    out: &mut Vec<PlatformEvent>,
) {
    match event {
        Event::Key(KeyEvent {
            code, modifiers, kind, ..
        }) => {
            if *code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
                if *kind != KeyEventKind::Release {
                    out.push(PlatformEvent::Quit);
                }
                return;
            }
            let Some(key) = map_key_code(*code) else {
                return;
            };
            match kind {
                KeyEventKind::Press | KeyEventKind::Repeat => out.push(tracker.press(key, now)),
                KeyEventKind::Release => out.push(tracker.release(key)),
            }
        }
        Event::Mouse(MouseEvent {
            kind, column, row, ..
        }) => {
            let Some(point) = viewport.to_field(*column, *row) else {
                return;
            };
            match kind {
                MouseEventKind::Down(MouseButton::Left) => out.push(PlatformEvent::MouseDown(point)),
                MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                    out.push(PlatformEvent::MouseMove(point))
                }
                _ => {}
            }
        }
        _ => {}
    }
}

/// Drains pending terminal events each frame
#[derive(Debug, Default)]
pub struct TerminalInput {
    tracker: KeyTracker,
}

impl TerminalInput {
    pub fn new(releases_reported: bool) -> Self {
        Self {
            tracker: KeyTracker::new(releases_reported),
        }
    }

    /// Read every event already queued, without blocking
    pub fn drain(&mut self, viewport: &Viewport) -> io::Result<Vec<PlatformEvent>> {
        let mut events = Vec::new();
        while event::poll(Duration::ZERO)? {
            let raw = event::read()?;
            convert_event(&raw, viewport, &mut self.tracker, Instant::now(), &mut events);
        }
        events.extend(self.tracker.expire(Instant::now()));
        Ok(events)
    }
}

/// Enables mouse capture and key release reporting; undone on drop
pub struct TerminalGuard {
    stdout: Stdout,
    enhanced: bool,
}

impl TerminalGuard {
    pub fn enter() -> io::Result<Self> {
        let mut stdout = io::stdout();
        stdout.execute(EnableMouseCapture)?;
        let enhanced = crossterm::terminal::supports_keyboard_enhancement().unwrap_or(false);
        if enhanced {
            stdout.execute(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))?;
        }
        log::info!("Key release reporting: {}", if enhanced { "on" } else { "emulated" });
        Ok(Self { stdout, enhanced })
    }

    /// Whether the terminal reports key releases
    pub fn releases_reported(&self) -> bool {
        self.enhanced
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if self.enhanced {
            let _ = self.stdout.execute(PopKeyboardEnhancementFlags);
        }
        let _ = self.stdout.execute(DisableMouseCapture);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryScoreStore;
    use crate::platform::match_input;
    use crate::settings::Settings;
    use crate::sim::{MatchState, tick};
    use crossterm::event::KeyEventState;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use glam::IVec2;
    use ratatui::layout::Rect as CellRect;

    fn viewport() -> Viewport {
        Viewport::new(CellRect::new(0, 0, 90, 50), 900, 500)
    }

    fn key(code: KeyCode, kind: KeyEventKind) -> Event {
        Event::Key(KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind,
            state: KeyEventState::NONE,
        })
    }

    #[test]
    fn test_press_release_pairs() {
        let mut tracker = KeyTracker::new(true);
        let now = Instant::now();
        let mut out = Vec::new();
        convert_event(&key(KeyCode::Char('w'), KeyEventKind::Press), &viewport(), &mut tracker, now, &mut out);
        convert_event(&key(KeyCode::Char('w'), KeyEventKind::Release), &viewport(), &mut tracker, now, &mut out);
        assert_eq!(
            out,
            vec![
                PlatformEvent::KeyDown(Key::Char('w')),
                PlatformEvent::KeyUp(Key::Char('w')),
            ]
        );
        assert!(!tracker.is_held(Key::Char('w')));
    }

    #[test]
    fn test_auto_repeat_is_not_a_new_press() {
        let mut tracker = KeyTracker::new(true);
        let now = Instant::now();
        let mut out = Vec::new();
        convert_event(&key(KeyCode::Char(' '), KeyEventKind::Press), &viewport(), &mut tracker, now, &mut out);
        for _ in 0..3 {
            convert_event(&key(KeyCode::Char(' '), KeyEventKind::Repeat), &viewport(), &mut tracker, now, &mut out);
        }
        assert_eq!(out[0], PlatformEvent::KeyDown(Key::Char(' ')));
        assert!(out[1..].iter().all(|e| *e == PlatformEvent::KeyRepeat(Key::Char(' '))));

        // Pause toggles once and stays on while the key is held
        let mut state = MatchState::new(
            &Settings::default(),
            Default::default(),
            Pcg32::seed_from_u64(1),
        );
        let mut store = MemoryScoreStore::default();
        let mut paused = Vec::new();
        for event in &out {
            let inputs: Vec<_> = match_input(event).into_iter().collect();
            tick(&mut state, &inputs, 0, &mut store);
            paused.push(state.paused);
        }
        assert_eq!(paused, vec![true; 4]);
    }

    #[test]
    fn test_emulated_repeat_press_is_not_a_new_press() {
        let mut tracker = KeyTracker::new(false);
        let t0 = Instant::now();
        assert_eq!(tracker.press(Key::Char('i'), t0), PlatformEvent::KeyDown(Key::Char('i')));
        assert_eq!(
            tracker.press(Key::Char('i'), t0 + Duration::from_millis(450)),
            PlatformEvent::KeyRepeat(Key::Char('i'))
        );
        tracker.expire(t0 + Duration::from_millis(700));
        assert_eq!(
            tracker.press(Key::Char('i'), t0 + Duration::from_millis(800)),
            PlatformEvent::KeyDown(Key::Char('i'))
        );
    }

    #[test]
    fn test_ctrl_c_quits() {
        let mut tracker = KeyTracker::default();
        let mut out = Vec::new();
        let event = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        convert_event(&event, &viewport(), &mut tracker, Instant::now(), &mut out);
        assert_eq!(out, vec![PlatformEvent::Quit]);
    }

    #[test]
    fn test_release_emulated_after_repeats_stop() {
        let mut tracker = KeyTracker::new(false);
        let t0 = Instant::now();
        tracker.press(Key::Char('s'), t0);
        assert!(tracker.expire(t0 + Duration::from_millis(400)).is_empty());

        // Auto-repeat begins
        tracker.press(Key::Char('s'), t0 + Duration::from_millis(450));
        assert!(tracker.expire(t0 + Duration::from_millis(520)).is_empty());

        let released = tracker.expire(t0 + Duration::from_millis(600));
        assert_eq!(released, vec![PlatformEvent::KeyUp(Key::Char('s'))]);
        assert!(!tracker.is_held(Key::Char('s')));
    }

    #[test]
    fn test_no_emulation_when_releases_reported() {
        let mut tracker = KeyTracker::new(true);
        let t0 = Instant::now();
        tracker.press(Key::Up, t0);
        assert!(tracker.expire(t0 + Duration::from_secs(10)).is_empty());
        assert!(tracker.is_held(Key::Up));
    }

    #[test]
    fn test_mouse_click_maps_to_field() {
        let mut tracker = KeyTracker::default();
        let mut out = Vec::new();
        let event = Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 45,
            row: 25,
            modifiers: KeyModifiers::NONE,
        });
        convert_event(&event, &viewport(), &mut tracker, Instant::now(), &mut out);
        assert_eq!(out, vec![PlatformEvent::MouseDown(IVec2::new(455, 255))]);
    }
}
