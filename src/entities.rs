//! All game entity types — pure data, no logic.

use std::time::Duration;

use crate::geometry::Rect;
use crate::store::EntityStore;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GamePhase {
    Playing,
    GameOver,
}

// ── Moving rectangles ─────────────────────────────────────────────────────────

/// A shot travelling up the screen.
#[derive(Clone, Debug, PartialEq)]
pub struct Projectile {
    pub rect: Rect,
    /// Units per frame, applied upward.
    pub speed: f32,
}

/// Something falling toward the ship.
#[derive(Clone, Debug, PartialEq)]
pub struct Target {
    pub rect: Rect,
    /// Units per frame, applied downward.  Fixed at spawn time.
    pub speed: f32,
}

/// Short-lived visual left behind where a target was shot down.
#[derive(Clone, Debug, PartialEq)]
pub struct Explosion {
    pub rect: Rect,
    /// Remaining frames to display.
    pub frames: u32,
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Ship {
    pub rect: Rect,
    /// Keyboard steering step.  Pointer input positions the ship absolutely.
    pub speed: f32,
}

// ── Difficulty ────────────────────────────────────────────────────────────────

/// Spawn pacing and target speed for the current round.
///
/// Both multipliers start at 1.0 and only ever grow, up to their caps.
#[derive(Clone, Debug, PartialEq)]
pub struct DifficultyState {
    /// Base spawn period before the multiplier is applied.
    pub spawn_interval: Duration,
    pub speed_multiplier: f32,
    pub spawn_multiplier: f32,
}

// ── Master game state ─────────────────────────────────────────────────────────

/// Everything that belongs to one round.  Owned by the `Game` controller and
/// passed explicitly to every update function.
#[derive(Clone, Debug)]
pub struct GameState {
    pub ship: Ship,
    pub projectiles: EntityStore<Projectile>,
    pub targets: EntityStore<Target>,
    pub explosions: EntityStore<Explosion>,
    pub score: u32,
    pub difficulty: DifficultyState,
    pub phase: GamePhase,
    /// Frames simulated this round.
    pub frame: u64,
    pub width: f32,
    pub height: f32,
}
