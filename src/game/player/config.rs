// Character tuning values

use thiserror::Error;

/// Errors from validating a character configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f32 },
}

/// Tuning values for the character
///
/// All lengths are in world units (one tile = one unit), speeds in
/// units per second.
#[derive(Debug, Clone)]
pub struct PlayerConfig {
    // Movement
    /// Horizontal run speed
    pub speed: f32,
    /// Terminal fall speed
    pub fall_speed: f32,
    /// Gravity applied per tick while falling
    pub gravity_pull: f32,
    /// Fall speed and gravity multiplier while fast falling
    pub fast_fall_rate: f32,

    // Jumping
    /// Upward velocity at the start of a jump
    pub jump_power: f32,
    /// Ascent distance after which the jump tips into falling
    pub max_jump_height: f32,

    // Dashing
    /// Ground distance covered by a full dash
    pub dash_length: f32,
    /// Run speed multiplier while dashing
    pub dash_power: f32,

    // Collision probes
    /// Horizontal distance of the wall probe from the pivot
    pub x_collision_correction: f32,
    /// Downward probe shift applied while ascending
    pub y_collision_correction: f32,
    /// Vertical offset added to the contact cell when landing
    pub land_y_adjust: f32,

    // Attack
    /// Time one sword swing stays active
    pub attack_duration: f32,

    // Dimensions (sprite bounds and physics collider)
    /// Character width in world units
    pub width: f32,
    /// Character height in world units
    pub height: f32,
}

/// Tuning for the samurai character
pub const SAMURAI_CONFIG: PlayerConfig = PlayerConfig {
    speed: 3.2,
    fall_speed: 6.0,
    gravity_pull: 0.3,
    fast_fall_rate: 2.0,

    jump_power: 6.0,
    max_jump_height: 2.0,

    dash_length: 3.2,
    dash_power: 2.5,

    x_collision_correction: 0.65,
    y_collision_correction: 0.20,
    land_y_adjust: 0.0,

    attack_duration: 0.2,

    width: 0.6,
    height: 1.0,
};

impl Default for PlayerConfig {
    fn default() -> Self {
        SAMURAI_CONFIG
    }
}

impl PlayerConfig {
    /// Check that every value the simulation divides by or scales with
    /// is usable
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("speed", self.speed),
            ("fall_speed", self.fall_speed),
            ("gravity_pull", self.gravity_pull),
            ("fast_fall_rate", self.fast_fall_rate),
            ("jump_power", self.jump_power),
            ("max_jump_height", self.max_jump_height),
            ("dash_length", self.dash_length),
            ("dash_power", self.dash_power),
            ("attack_duration", self.attack_duration),
            ("width", self.width),
            ("height", self.height),
        ];

        for (field, value) in positive {
            if value <= 0.0 {
                return Err(ConfigError::NonPositive { field, value });
            }
        }

        Ok(())
    }
}
