// Player character: configuration, state flags and the controller

pub mod config;
pub mod controller;
pub mod state;

pub use config::{ConfigError, PlayerConfig};
pub use controller::Player;
pub use state::{state_line, BodyPart, PlayerState};
