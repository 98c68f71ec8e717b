//! Shared test doubles and fixtures.
//!
//! Each integration test binary includes this module but uses only part of it.
#![allow(dead_code)]

use chicken_shooter::audio::{AudioSink, SoundHandle};
use chicken_shooter::display::{DrawSurface, ImageHandle, TextStyle};
use chicken_shooter::entities::{GameState, Projectile, Target};
use chicken_shooter::geometry::Rect;
use chicken_shooter::{Game, GameConfig};

use rand::rngs::StdRng;
use rand::SeedableRng;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cue {
    Play(SoundHandle),
    Pause(SoundHandle),
}

#[derive(Debug, Default)]
pub struct RecordingAudio {
    pub cues: Vec<Cue>,
}

impl RecordingAudio {
    pub fn count(&self, cue: Cue) -> usize {
        self.cues.iter().filter(|&&c| c == cue).count()
    }
}

impl AudioSink for RecordingAudio {
    fn play(&mut self, sound: SoundHandle) {
        self.cues.push(Cue::Play(sound));
    }

    fn pause(&mut self, sound: SoundHandle) {
        self.cues.push(Cue::Pause(sound));
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCall {
    Clear(Rect),
    Image(ImageHandle, Rect),
    Text(String, f32, f32, TextStyle),
}

#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub calls: Vec<DrawCall>,
}

impl RecordingSurface {
    pub fn images(&self, handle: ImageHandle) -> Vec<Rect> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                DrawCall::Image(h, r) if *h == handle => Some(*r),
                _ => None,
            })
            .collect()
    }

    pub fn texts(&self) -> Vec<String> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                DrawCall::Text(t, ..) => Some(t.clone()),
                _ => None,
            })
            .collect()
    }
}

impl DrawSurface for RecordingSurface {
    fn clear(&mut self, region: Rect) {
        self.calls.push(DrawCall::Clear(region));
    }

    fn draw_image(&mut self, image: ImageHandle, rect: Rect) {
        self.calls.push(DrawCall::Image(image, rect));
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32, style: TextStyle) {
        self.calls.push(DrawCall::Text(text.to_string(), x, y, style));
    }
}

/// Viewport 1000 × 800, ship 100 × 100 — the default tunables.
pub fn config() -> GameConfig {
    GameConfig::default()
}

pub fn new_game() -> Game<RecordingAudio> {
    Game::new(config(), RecordingAudio::default()).expect("default config is valid")
}

pub fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

pub fn target(x: f32, y: f32, size: f32, speed: f32) -> Target {
    Target {
        rect: Rect::new(x, y, size, size),
        speed,
    }
}

pub fn projectile(x: f32, y: f32, size: f32, speed: f32) -> Projectile {
    Projectile {
        rect: Rect::new(x, y, size, size),
        speed,
    }
}

/// A stationary target resting on the ship's right shoulder, so the next tick
/// ends the round.  Clear of the column projectiles launch through.
pub fn doom_target(state: &GameState) -> Target {
    let ship = state.ship.rect;
    target(ship.right() - 25.0, ship.y - 1.0, 50.0, 0.0)
}
