//! Game-logic functions.
//!
//! Every function takes the round's `GameState` explicitly (plus the config
//! and, where needed, an injected RNG).  Nothing here knows about timers,
//! terminals or audio; the `Game` controller wires those up.

use std::time::Duration;

use rand::Rng;
use tracing::debug;

use crate::config::GameConfig;
use crate::entities::{
    DifficultyState, Explosion, GamePhase, GameState, Projectile, Ship, Target,
};
use crate::geometry::{intersects, Rect};
use crate::store::EntityStore;

// ── Constructors ─────────────────────────────────────────────────────────────

pub fn initial_difficulty(config: &GameConfig) -> DifficultyState {
    DifficultyState {
        spawn_interval: config.spawn_interval,
        speed_multiplier: 1.0,
        spawn_multiplier: 1.0,
    }
}

/// Ship centred horizontally, resting on the bottom edge of the viewport.
pub fn initial_ship(config: &GameConfig) -> Ship {
    Ship {
        rect: Rect::new(
            ((config.viewport_width - config.ship_width) / 2.0).max(0.0),
            config.viewport_height - config.ship_height,
            config.ship_width,
            config.ship_height,
        ),
        speed: config.ship_speed,
    }
}

/// Build the state of a fresh round.
pub fn init_state(config: &GameConfig) -> GameState {
    GameState {
        ship: initial_ship(config),
        projectiles: EntityStore::new(),
        targets: EntityStore::new(),
        explosions: EntityStore::new(),
        score: 0,
        difficulty: initial_difficulty(config),
        phase: GamePhase::Playing,
        frame: 0,
        width: config.viewport_width,
        height: config.viewport_height,
    }
}

// ── Ship control ─────────────────────────────────────────────────────────────

/// Centre the ship under the pointer, keeping it fully inside the viewport.
/// Out-of-range pointers are clamped, never rejected.
pub fn set_ship_from_pointer(state: &mut GameState, px: f32) {
    let ship = &mut state.ship.rect;
    let max_x = (state.width - ship.width).max(0.0);
    let x = px - ship.width / 2.0;
    ship.x = if x.is_nan() { 0.0 } else { x.clamp(0.0, max_x) };
}

/// Keyboard steering: move by `steps * ship.speed`, clamped the same way.
pub fn nudge_ship(state: &mut GameState, steps: f32) {
    let centre = state.ship.rect.x + state.ship.rect.width / 2.0;
    set_ship_from_pointer(state, centre + steps * state.ship.speed);
}

/// Launch one projectile from the middle of the ship's top edge.
pub fn fire_projectile(state: &mut GameState, config: &GameConfig) {
    let ship = &state.ship.rect;
    let size = config.projectile_size;
    state.projectiles.push(Projectile {
        rect: Rect::new(ship.x + ship.width / 2.0 - size / 2.0, ship.y, size, size),
        speed: config.projectile_speed,
    });
}

// ── Spawner ──────────────────────────────────────────────────────────────────

/// Period of the spawn timer under the given difficulty.
pub fn effective_spawn_interval(difficulty: &DifficultyState) -> Duration {
    difficulty
        .spawn_interval
        .div_f32(difficulty.spawn_multiplier.max(1.0))
}

/// Drop one new target just above the top edge at a random column.
/// All randomness comes through `rng` so tests can seed it.
pub fn spawn_target(state: &mut GameState, config: &GameConfig, rng: &mut impl Rng) {
    let size = config.target_size;
    let max_x = (state.width - size).max(0.0);
    let x = rng.gen_range(0.0..=max_x);
    let speed = config.target_base_speed * state.difficulty.speed_multiplier;

    debug!(x, speed, "spawning target");
    state.targets.push(Target {
        rect: Rect::new(x, -size, size, size),
        speed,
    });
}

// ── Difficulty ramp ──────────────────────────────────────────────────────────

/// One step of the saturating ramp.  Returns `true` when either multiplier
/// moved, i.e. the spawn timer needs re-arming.
pub fn ramp_difficulty(difficulty: &mut DifficultyState, config: &GameConfig) -> bool {
    let before = difficulty.clone();

    difficulty.spawn_multiplier =
        (difficulty.spawn_multiplier * config.spawn_ramp_factor).min(config.spawn_multiplier_cap);
    difficulty.speed_multiplier =
        (difficulty.speed_multiplier * config.speed_ramp_factor).min(config.speed_multiplier_cap);

    debug!(
        spawn = difficulty.spawn_multiplier,
        speed = difficulty.speed_multiplier,
        "difficulty ramped"
    );
    *difficulty != before
}

// ── Per-frame tick ───────────────────────────────────────────────────────────

/// What happened during one tick, for the controller's side effects.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickOutcome {
    /// Where each shot-down target was.  One entry per point scored.
    pub hits: Vec<Rect>,
    /// A target touched the ship; the round is over.
    pub ship_hit: bool,
}

/// Advance the simulation by one frame.  Does nothing outside `Playing`.
pub fn tick(state: &mut GameState, config: &GameConfig) -> TickOutcome {
    if state.phase != GamePhase::Playing {
        return TickOutcome::default();
    }
    state.frame += 1;

    // ── 0. Age explosions from earlier frames ────────────────────────────────
    for explosion in state.explosions.iter_mut() {
        explosion.frames = explosion.frames.saturating_sub(1);
    }
    state.explosions.retain(|e| e.frames > 0);

    // ── 1. Move everything ───────────────────────────────────────────────────
    for target in state.targets.iter_mut() {
        target.rect.y += target.speed;
    }
    for projectile in state.projectiles.iter_mut() {
        projectile.rect.y -= projectile.speed;
    }

    // ── 2. Drop whatever left the viewport ───────────────────────────────────
    let height = state.height;
    state.targets.retain(|t| t.rect.y <= height);
    state.projectiles.retain(|p| p.rect.y >= 0.0);

    // ── 3. Collision: projectiles ↔ targets ──────────────────────────────────
    let mut killed_targets: Vec<usize> = Vec::new();
    let mut used_projectiles: Vec<usize> = Vec::new();

    for (pi, projectile) in state.projectiles.iter().enumerate() {
        for (ti, target) in state.targets.iter().enumerate() {
            if !killed_targets.contains(&ti) && intersects(&projectile.rect, &target.rect) {
                killed_targets.push(ti);
                used_projectiles.push(pi);
                break;
            }
        }
    }

    let hits: Vec<Rect> = killed_targets
        .iter()
        .filter_map(|&i| state.targets.get(i).map(|t| t.rect))
        .collect();

    state.targets.remove_indices(&killed_targets);
    state.projectiles.remove_indices(&used_projectiles);
    state.score += hits.len() as u32;

    if config.explosion_frames > 0 {
        for rect in &hits {
            state.explosions.push(Explosion {
                rect: *rect,
                frames: config.explosion_frames,
            });
        }
    }
    if !hits.is_empty() {
        debug!(hits = hits.len(), score = state.score, "targets destroyed");
    }

    // ── 4. Collision: targets ↔ ship ─────────────────────────────────────────
    let ship_hit = state
        .targets
        .iter()
        .any(|t| intersects(&t.rect, &state.ship.rect));
    if ship_hit {
        state.phase = GamePhase::GameOver;
    }

    TickOutcome { hits, ship_hit }
}
