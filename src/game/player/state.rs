// Character state flags

use crate::core::transitions::TransitionSet;

/// Flags describing what the character is doing
///
/// These are not exclusive: a character is usually holding several at
/// once, e.g. OnGround + MovingRight + Attacking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerState {
    /// Moving left under player input
    MovingLeft,
    /// Moving right under player input
    MovingRight,
    /// Ascending from a jump
    Jumping,
    /// Airborne and no longer ascending
    Falling,
    /// Falling with the down modifier held
    FastFalling,
    /// Feet touching the ground
    OnGround,
    /// Mid-dash
    Dashing,
    /// Swinging the sword
    Attacking,
    /// A second swing was buffered during the current one
    ContinueAttack,
}

impl PlayerState {
    /// Short label used in the diagnostics line
    pub fn label(&self) -> &'static str {
        match self {
            Self::MovingLeft => "MOVING_LEFT",
            Self::MovingRight => "MOVING_RIGHT",
            Self::Jumping => "JUMPING",
            Self::Falling => "FALLING",
            Self::FastFalling => "FAST_FALLING",
            Self::OnGround => "ON_GROUND",
            Self::Dashing => "DASHING",
            Self::Attacking => "ATTACKING",
            Self::ContinueAttack => "CONTINUE_ATTACK",
        }
    }
}

/// Sections of the character's collider, stacked bottom to top
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BodyPart {
    Feet,
    Body,
    Head,
}

/// Render the current state flags as a single diagnostics line
pub fn state_line(states: &TransitionSet<PlayerState>) -> String {
    let mut labels: Vec<&'static str> = states.iter().map(|state| state.label()).collect();
    labels.sort_unstable();
    labels.join(" ")
}
