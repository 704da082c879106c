// Input handling system
//
// Translates winit keyboard events into game actions with per-tick
// press/release edges:
//
// - `action`: game actions and the default key layout
// - `state`: held/pressed/released action state for one tick
// - `manager`: key bindings plus event processing

pub mod action;
pub mod manager;
pub mod state;

// Re-export commonly used types
pub use action::Action;
pub use manager::InputManager;
pub use state::InputState;
