pub mod audio;
pub mod compute;
pub mod config;
pub mod display;
pub mod entities;
pub mod error;
pub mod game;
pub mod geometry;
pub mod input;
pub mod store;
pub mod timer;

pub use config::GameConfig;
pub use error::ConfigError;
pub use game::Game;
