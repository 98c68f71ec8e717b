//! Terminal input → game operations.
//!
//! Input model: instead of acting on each key event individually, we keep a
//! `key_frame` map recording the frame of the last press/repeat event for
//! every key.  Each frame, keys that are still "fresh" (within `HOLD_WINDOW`
//! frames) count as held.  This lets steering and firing be held together.
//!
//! Works on two classes of terminal:
//! * **Keyboard-enhancement capable** (kitty protocol): proper `Press` /
//!   `Repeat` / `Release` events, so keys drop out on release.
//! * **Classic terminals**: only `Press` events (OS key-repeat shows up as
//!   repeated `Press`).  Keys expire after `HOLD_WINDOW` frames of silence
//!   (`FIRE_HOLD_WINDOW` for the fire key).
//!
//! Mouse events map straight onto the pointer operations.

use std::collections::HashMap;

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::audio::AudioSink;
use crate::display::terminal::CellMapping;
use crate::entities::GamePhase;
use crate::game::Game;

/// A key counts as held if its last press/repeat arrived within this many
/// frames.  8 frames @ 60 FPS ≈ 133 ms, longer than the OS repeat interval
/// (≥ 15 Hz), so a repeating key never lapses between repeats.
pub const HOLD_WINDOW: u64 = 8;

/// Hold window for the fire key.  Must also outlast the OS initial repeat
/// delay (~500 ms) or a held fire key would drop out before its first repeat
/// and then restart with an extra shot.  36 frames @ 60 FPS = 600 ms.
pub const FIRE_HOLD_WINDOW: u64 = 36;

/// What the caller's loop should do after an event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
    /// The terminal changed size; re-layout and redraw.
    Resize(u16, u16),
}

fn is_fire_key(code: &KeyCode) -> bool {
    *code == KeyCode::Char(' ')
}

#[derive(Debug, Default)]
pub struct InputTracker {
    /// Maps each held key → the frame it was last seen (press or repeat).
    key_frame: HashMap<KeyCode, u64>,
    frame: u64,
    /// The fire key has started a repeat that we are responsible for stopping.
    key_firing: bool,
}

impl InputTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin_frame(&mut self) {
        self.frame += 1;
    }

    /// Returns true if `key` was seen within its hold window.
    pub fn is_held(&self, key: &KeyCode) -> bool {
        let window = if is_fire_key(key) {
            FIRE_HOLD_WINDOW
        } else {
            HOLD_WINDOW
        };
        self.key_frame
            .get(key)
            .map(|&last| self.frame.saturating_sub(last) <= window)
            .unwrap_or(false)
    }

    pub fn handle_event<A: AudioSink>(
        &mut self,
        event: Event,
        game: &mut Game<A>,
        mapping: &CellMapping,
    ) -> Flow {
        match event {
            Event::Key(key) => self.handle_key(key, game),
            Event::Mouse(mouse) => {
                handle_mouse(mouse, game, mapping);
                Flow::Continue
            }
            Event::Resize(cols, rows) => Flow::Resize(cols, rows),
            _ => Flow::Continue,
        }
    }

    fn handle_key<A: AudioSink>(&mut self, key: KeyEvent, game: &mut Game<A>) -> Flow {
        let KeyEvent {
            code,
            kind,
            modifiers,
            ..
        } = key;

        match kind {
            // Press: record key + handle one-shot actions
            KeyEventKind::Press => {
                self.key_frame.insert(code, self.frame);
                match code {
                    KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Flow::Quit,
                    KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                        return Flow::Quit;
                    }
                    KeyCode::Char('r') | KeyCode::Char('R')
                        if game.phase() == GamePhase::GameOver =>
                    {
                        game.reset();
                        self.key_firing = false;
                    }
                    _ if is_fire_key(&code) => self.press_fire(game),
                    _ => {}
                }
            }
            // Repeat: refresh timestamp so key stays "held"; a fire key held
            // across a new round picks firing back up
            KeyEventKind::Repeat => {
                self.key_frame.insert(code, self.frame);
                if is_fire_key(&code) {
                    self.press_fire(game);
                }
            }
            // Release: remove key immediately (keyboard-enhancement path)
            KeyEventKind::Release => {
                self.key_frame.remove(&code);
                if is_fire_key(&code) {
                    self.release_fire(game);
                }
            }
        }
        Flow::Continue
    }

    /// Apply held-key effects for this frame: steering, and stopping the fire
    /// repeat once the fire key has expired.
    pub fn apply_held<A: AudioSink>(&mut self, game: &mut Game<A>) {
        let left = self.is_held(&KeyCode::Left)
            || self.is_held(&KeyCode::Char('a'))
            || self.is_held(&KeyCode::Char('A'));
        let right = self.is_held(&KeyCode::Right)
            || self.is_held(&KeyCode::Char('d'))
            || self.is_held(&KeyCode::Char('D'));

        if left && !right {
            game.nudge(-1.0);
        } else if right && !left {
            game.nudge(1.0);
        }

        if game.phase() != GamePhase::Playing {
            // the round's end already stopped the repeat
            self.key_firing = false;
        } else if self.key_firing && !self.is_held(&KeyCode::Char(' ')) {
            self.release_fire(game);
        }
    }

    fn press_fire<A: AudioSink>(&mut self, game: &mut Game<A>) {
        if !self.key_firing && game.phase() == GamePhase::Playing {
            game.fire();
            game.start_firing();
            self.key_firing = true;
        }
    }

    fn release_fire<A: AudioSink>(&mut self, game: &mut Game<A>) {
        if self.key_firing {
            game.stop_firing();
            self.key_firing = false;
        }
    }
}

fn handle_mouse<A: AudioSink>(mouse: MouseEvent, game: &mut Game<A>, mapping: &CellMapping) {
    let x = mapping.col_to_x(mouse.column);
    match mouse.kind {
        MouseEventKind::Moved | MouseEventKind::Drag(MouseButton::Left) => game.pointer_move(x),
        MouseEventKind::Down(MouseButton::Left) => game.activate_start(x),
        MouseEventKind::Up(MouseButton::Left) => game.activate_end(),
        _ => {}
    }
}
