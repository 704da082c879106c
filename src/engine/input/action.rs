// Game action definitions and default key bindings

use winit::keyboard::KeyCode;

/// Represents all possible in-game actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    // Movement
    MoveLeft,
    MoveRight,
    /// Down modifier: fast-fall in the air, dash when combined with Jump
    Down,
    Jump,

    // Combat
    Attack,

    // Meta actions
    Pause,
    Menu,
}

/// Default keyboard bindings
pub fn default_bindings() -> Vec<(KeyCode, Action)> {
    vec![
        // Movement
        (KeyCode::KeyA, Action::MoveLeft),
        (KeyCode::KeyD, Action::MoveRight),
        (KeyCode::KeyS, Action::Down),
        (KeyCode::KeyJ, Action::Jump),
        // Combat
        (KeyCode::KeyK, Action::Attack),
        // Meta - Pause and Menu are dispatched in main.rs at event time,
        // so they keep working while the game is paused
        (KeyCode::KeyP, Action::Pause),
        (KeyCode::Escape, Action::Menu),
    ]
}
