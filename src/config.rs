//! Tunable gameplay constants.

use std::time::Duration;

use crate::error::ConfigError;

/// Everything a round needs to know about sizes, speeds and timing.
///
/// Distances are logical viewport units; speeds are units per frame.
#[derive(Clone, Debug, PartialEq)]
pub struct GameConfig {
    pub viewport_width: f32,
    pub viewport_height: f32,

    pub ship_width: f32,
    pub ship_height: f32,
    /// Keyboard steering step, applied once per frame while a direction is held.
    pub ship_speed: f32,

    pub target_size: f32,
    pub target_base_speed: f32,

    pub projectile_size: f32,
    pub projectile_speed: f32,

    /// Base spawn period, divided by the current spawn multiplier.
    pub spawn_interval: Duration,
    pub ramp_period: Duration,
    pub spawn_ramp_factor: f32,
    pub speed_ramp_factor: f32,
    pub spawn_multiplier_cap: f32,
    pub speed_multiplier_cap: f32,

    pub fire_repeat: Duration,
    /// How many frames an explosion stays on screen.
    pub explosion_frames: u32,
    pub frame_rate: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            viewport_width: 1000.0,
            viewport_height: 800.0,
            ship_width: 100.0,
            ship_height: 100.0,
            ship_speed: 5.0,
            target_size: 50.0,
            target_base_speed: 2.0,
            projectile_size: 40.0,
            projectile_speed: 10.0,
            spawn_interval: Duration::from_millis(500),
            ramp_period: Duration::from_millis(1000),
            spawn_ramp_factor: 1.2,
            speed_ramp_factor: 1.1,
            spawn_multiplier_cap: 2.0,
            speed_multiplier_cap: 1.5,
            fire_repeat: Duration::from_millis(200),
            explosion_frames: 8,
            frame_rate: 60,
        }
    }
}

impl GameConfig {
    /// Same tunables, different viewport.
    pub fn with_viewport(self, width: f32, height: f32) -> Self {
        Self {
            viewport_width: width,
            viewport_height: height,
            ..self
        }
    }

    pub fn frame_duration(&self) -> Duration {
        Duration::from_secs(1) / self.frame_rate.max(1)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("viewport_width", self.viewport_width),
            ("viewport_height", self.viewport_height),
            ("ship_width", self.ship_width),
            ("ship_height", self.ship_height),
            ("target_size", self.target_size),
            ("target_base_speed", self.target_base_speed),
            ("projectile_size", self.projectile_size),
            ("projectile_speed", self.projectile_speed),
        ];
        for (name, value) in positive {
            if value.is_nan() || value <= 0.0 {
                return Err(ConfigError::NotPositive { name, value });
            }
            if value.is_infinite() {
                return Err(ConfigError::NotFinite { name });
            }
        }

        let at_least_one = [
            ("spawn_ramp_factor", self.spawn_ramp_factor),
            ("speed_ramp_factor", self.speed_ramp_factor),
            ("spawn_multiplier_cap", self.spawn_multiplier_cap),
            ("speed_multiplier_cap", self.speed_multiplier_cap),
        ];
        for (name, value) in at_least_one {
            if value.is_nan() || value < 1.0 {
                return Err(ConfigError::BelowOne { name, value });
            }
            if value.is_infinite() {
                return Err(ConfigError::NotFinite { name });
            }
        }

        let durations = [
            ("spawn_interval", self.spawn_interval),
            ("ramp_period", self.ramp_period),
            ("fire_repeat", self.fire_repeat),
        ];
        for (name, value) in durations {
            if value.is_zero() {
                return Err(ConfigError::ZeroDuration { name });
            }
        }
        if self.frame_rate == 0 {
            return Err(ConfigError::NotPositive {
                name: "frame_rate",
                value: 0.0,
            });
        }

        if self.ship_width > self.viewport_width {
            return Err(ConfigError::ShipTooWide {
                ship: self.ship_width,
                viewport: self.viewport_width,
            });
        }
        Ok(())
    }
}
