// Input manager - translates winit keyboard events into action state

use super::action::{default_bindings, Action};
use super::state::InputState;
use std::collections::HashMap;
use winit::event::{ElementState, KeyEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Owns the key bindings and the per-tick action state
pub struct InputManager {
    /// Mapping from physical keys to game actions
    bindings: HashMap<KeyCode, Action>,

    /// Current action state
    state: InputState,
}

impl InputManager {
    /// Create an input manager with the default bindings
    pub fn new() -> Self {
        let mut bindings = HashMap::new();
        for (key, action) in default_bindings() {
            bindings.insert(key, action);
        }

        Self {
            bindings,
            state: InputState::new(),
        }
    }

    /// Process a keyboard event from winit
    pub fn process_keyboard_event(&mut self, event: &KeyEvent) {
        // Only process physical key presses
        if let PhysicalKey::Code(key_code) = event.physical_key {
            let Some(action) = self.bindings.get(&key_code).copied() else {
                return;
            };

            match event.state {
                ElementState::Pressed => {
                    if !event.repeat {
                        // Only register if not a key repeat
                        self.state.press(action);
                    }
                }
                ElementState::Released => {
                    self.state.release(action);
                }
            }
        }
    }

    /// Look up the action bound to a key
    pub fn action_for(&self, key: KeyCode) -> Option<Action> {
        self.bindings.get(&key).copied()
    }

    /// Bind a key to an action, replacing any previous binding of that key
    pub fn bind(&mut self, key: KeyCode, action: Action) {
        self.bindings.insert(key, action);
    }

    /// Remove the binding for a key
    pub fn unbind(&mut self, key: KeyCode) {
        self.bindings.remove(&key);
    }

    /// Get the current action state
    pub fn state(&self) -> &InputState {
        &self.state
    }

    /// Clear this tick's edges
    /// Call once after each simulation tick has consumed them
    pub fn update(&mut self) {
        self.state.update();
    }

    /// Release all held input (e.g. on window focus loss)
    pub fn reset(&mut self) {
        self.state.reset();
    }
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manager_has_default_bindings() {
        let manager = InputManager::new();
        assert_eq!(manager.action_for(KeyCode::KeyA), Some(Action::MoveLeft));
        assert_eq!(manager.action_for(KeyCode::KeyD), Some(Action::MoveRight));
        assert_eq!(manager.action_for(KeyCode::KeyJ), Some(Action::Jump));
        assert_eq!(manager.action_for(KeyCode::KeyK), Some(Action::Attack));
        assert_eq!(manager.action_for(KeyCode::KeyQ), None);
    }

    #[test]
    fn test_rebind_key() {
        let mut manager = InputManager::new();
        manager.bind(KeyCode::Space, Action::Jump);

        assert_eq!(manager.action_for(KeyCode::Space), Some(Action::Jump));
        // The old binding stays until explicitly unbound
        assert_eq!(manager.action_for(KeyCode::KeyJ), Some(Action::Jump));

        manager.unbind(KeyCode::KeyJ);
        assert_eq!(manager.action_for(KeyCode::KeyJ), None);
    }

    #[test]
    fn test_update_clears_edges() {
        let mut manager = InputManager::new();
        manager.state.press(Action::Jump);
        assert!(manager.state().just_pressed(Action::Jump));

        manager.update();
        assert!(!manager.state().just_pressed(Action::Jump));
        assert!(manager.state().is_pressed(Action::Jump));
    }

    #[test]
    fn test_reset() {
        let mut manager = InputManager::new();
        manager.state.press(Action::MoveLeft);
        manager.reset();

        assert!(!manager.state().is_pressed(Action::MoveLeft));
    }
}
