//! Round controller: owns the game state, every timer handle and the audio
//! sink, and exposes the only operations allowed to mutate them.

use std::time::Duration;

use rand::Rng;
use tracing::{debug, info, warn};

use crate::audio::{AudioSink, SoundHandle};
use crate::compute::{
    effective_spawn_interval, fire_projectile, init_state, nudge_ship, ramp_difficulty,
    set_ship_from_pointer, spawn_target, tick,
};
use crate::config::GameConfig;
use crate::display::{render_game_over, render_scene, DrawSurface};
use crate::entities::{GamePhase, GameState};
use crate::error::ConfigError;
use crate::timer::{FrameDriver, IntervalTimer};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum TimerSlot {
    Spawn,
    Difficulty,
    FireRepeat,
}

pub struct Game<A: AudioSink> {
    config: GameConfig,
    state: GameState,
    spawn_timer: IntervalTimer,
    difficulty_timer: IntervalTimer,
    fire_timer: IntervalTimer,
    frame_driver: FrameDriver,
    audio: A,
}

impl<A: AudioSink> Game<A> {
    /// Validate `config` and start the first round.
    pub fn new(config: GameConfig, audio: A) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut game = Self {
            state: init_state(&config),
            config,
            spawn_timer: IntervalTimer::new(),
            difficulty_timer: IntervalTimer::new(),
            fire_timer: IntervalTimer::new(),
            frame_driver: FrameDriver::default(),
            audio,
        };
        game.start_round();
        Ok(game)
    }

    // ── Accessors ────────────────────────────────────────────────────────────

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct access for scripted scenarios.  Normal play goes through the
    /// input and timer operations.
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn spawn_timer(&self) -> &IntervalTimer {
        &self.spawn_timer
    }

    pub fn difficulty_timer(&self) -> &IntervalTimer {
        &self.difficulty_timer
    }

    pub fn fire_timer(&self) -> &IntervalTimer {
        &self.fire_timer
    }

    pub fn frame_requested(&self) -> bool {
        self.frame_driver.is_requested()
    }

    // ── Round lifecycle ──────────────────────────────────────────────────────

    /// Start a new round.  Only honoured from `GameOver`; returns whether a
    /// round was started.
    pub fn reset(&mut self) -> bool {
        if self.state.phase != GamePhase::GameOver {
            warn!("reset ignored while a round is in progress");
            return false;
        }
        self.start_round();
        true
    }

    fn start_round(&mut self) {
        self.state = init_state(&self.config);

        self.fire_timer.stop();
        self.spawn_timer
            .start(effective_spawn_interval(&self.state.difficulty));
        self.difficulty_timer.start(self.config.ramp_period);
        self.frame_driver.request();
        self.audio.play(SoundHandle::Ambient);

        info!(
            width = self.state.width,
            height = self.state.height,
            "round started"
        );
    }

    fn end_round(&mut self) {
        self.spawn_timer.stop();
        self.difficulty_timer.stop();
        self.fire_timer.stop();
        self.frame_driver.cancel();
        self.audio.pause(SoundHandle::Ambient);

        info!(score = self.state.score, frame = self.state.frame, "game over");
    }

    // ── Input ────────────────────────────────────────────────────────────────

    pub fn pointer_move(&mut self, x: f32) {
        if self.state.phase == GamePhase::Playing {
            set_ship_from_pointer(&mut self.state, x);
        }
    }

    /// Press or tap: move under the pointer, fire at once, keep firing.
    pub fn activate_start(&mut self, x: f32) {
        self.pointer_move(x);
        self.fire();
        self.start_firing();
    }

    pub fn activate_end(&mut self) {
        self.stop_firing();
    }

    /// A single discrete shot.
    pub fn fire(&mut self) {
        if self.state.phase != GamePhase::Playing {
            return;
        }
        fire_projectile(&mut self.state, &self.config);
        self.audio.play(SoundHandle::Fire);
    }

    /// Fire every `fire_repeat` until `stop_firing`.  Replaces any repeat
    /// already running.
    pub fn start_firing(&mut self) {
        if self.state.phase == GamePhase::Playing {
            self.fire_timer.start(self.config.fire_repeat);
        }
    }

    /// Cancel the repeat.  Harmless when nothing is repeating.
    pub fn stop_firing(&mut self) {
        self.fire_timer.stop();
    }

    /// Keyboard steering by `steps` ship-speed increments (negative = left).
    pub fn nudge(&mut self, steps: f32) {
        if self.state.phase == GamePhase::Playing {
            nudge_ship(&mut self.state, steps);
        }
    }

    // ── Time ─────────────────────────────────────────────────────────────────

    /// Let `dt` of simulated time pass, dispatching every timer firing that
    /// falls inside it in chronological order.  Ties go spawn, difficulty,
    /// fire-repeat.  A timer re-armed by a callback starts its new period at
    /// the instant of that callback.
    pub fn advance(&mut self, dt: Duration, rng: &mut impl Rng) {
        let mut remaining = dt;
        loop {
            let next = [
                (TimerSlot::Spawn, self.spawn_timer.until_next()),
                (TimerSlot::Difficulty, self.difficulty_timer.until_next()),
                (TimerSlot::FireRepeat, self.fire_timer.until_next()),
            ]
            .into_iter()
            .filter_map(|(slot, due)| due.map(|d| (slot, d)))
            .min_by_key(|&(_, d)| d);

            match next {
                Some((slot, due)) if due <= remaining => {
                    self.elapse_all(due);
                    remaining -= due;
                    self.fire_slot(slot, rng);
                }
                _ => {
                    self.elapse_all(remaining);
                    return;
                }
            }
        }
    }

    fn elapse_all(&mut self, dt: Duration) {
        self.spawn_timer.elapse(dt);
        self.difficulty_timer.elapse(dt);
        self.fire_timer.elapse(dt);
    }

    fn fire_slot(&mut self, slot: TimerSlot, rng: &mut impl Rng) {
        match slot {
            TimerSlot::Spawn => {
                if self.spawn_timer.take_due() {
                    spawn_target(&mut self.state, &self.config, rng);
                }
            }
            TimerSlot::Difficulty => {
                if self.difficulty_timer.take_due()
                    && ramp_difficulty(&mut self.state.difficulty, &self.config)
                {
                    let interval = effective_spawn_interval(&self.state.difficulty);
                    debug!(?interval, "re-arming spawn timer");
                    self.spawn_timer.start(interval);
                }
            }
            TimerSlot::FireRepeat => {
                if self.fire_timer.take_due() {
                    self.fire();
                }
            }
        }
    }

    /// Run the render tick if one was requested.  Returns whether it ran.
    ///
    /// While playing, every tick requests the next one.  The tick that ends
    /// the round cancels all timers, draws the game-over screen and requests
    /// nothing further; only `reset` starts frames again.
    pub fn frame<S: DrawSurface + ?Sized>(&mut self, surface: &mut S) -> bool {
        if !self.frame_driver.take() {
            return false;
        }

        let outcome = tick(&mut self.state, &self.config);
        for _ in &outcome.hits {
            self.audio.play(SoundHandle::Explosion);
        }

        if self.state.phase == GamePhase::GameOver {
            self.end_round();
        } else {
            self.frame_driver.request();
        }
        self.render(surface);
        true
    }

    /// Draw the current phase without simulating anything.
    pub fn render<S: DrawSurface + ?Sized>(&self, surface: &mut S) {
        match self.state.phase {
            GamePhase::Playing => render_scene(surface, &self.state),
            GamePhase::GameOver => render_game_over(surface, &self.state),
        }
    }
}
