// Per-tick input state

use super::action::Action;
use crate::core::transitions::TransitionSet;

/// Tracks which actions are held, pressed, or released this tick
///
/// Backed by a [`TransitionSet`]: membership is the held level, the
/// added/removed history is the press/release edge pair. `update()` clears
/// the edges once the tick that consumed them is done.
#[derive(Debug, Default)]
pub struct InputState {
    actions: TransitionSet<Action>,
}

impl InputState {
    /// Create a new input state with nothing held
    pub fn new() -> Self {
        Self {
            actions: TransitionSet::new(),
        }
    }

    /// Check if an action is currently held
    pub fn is_pressed(&self, action: Action) -> bool {
        self.actions.has(action)
    }

    /// Check if an action was pressed this tick
    pub fn just_pressed(&self, action: Action) -> bool {
        self.actions.was_added(action)
    }

    /// Check if an action was released this tick
    pub fn just_released(&self, action: Action) -> bool {
        self.actions.was_removed(action)
    }

    /// Register an action press
    ///
    /// Key repeats are filtered by the caller; a press while already held
    /// records no new edge either way.
    pub(crate) fn press(&mut self, action: Action) {
        self.actions.add(action);
    }

    /// Register an action release
    pub(crate) fn release(&mut self, action: Action) {
        self.actions.remove(action);
    }

    /// Clear this tick's edges, keeping held actions
    ///
    /// Call once after each simulation tick so edges survive frames that
    /// run zero fixed updates.
    pub(crate) fn update(&mut self) {
        self.actions.clear_history();
    }

    /// Release every held action, recording the release edges
    ///
    /// Used on focus loss, where the matching key-up events never
    /// arrive. The synthesized releases reach consumers as ordinary
    /// `just_released` edges on the next tick, so anything derived from
    /// a held key unwinds the same way a real release would.
    pub fn reset(&mut self) {
        for action in self.held_actions() {
            self.actions.remove(action);
        }
    }

    /// Get all currently held actions
    pub fn held_actions(&self) -> Vec<Action> {
        self.actions.iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_action() {
        let mut input = InputState::new();
        input.press(Action::Jump);

        assert!(input.is_pressed(Action::Jump));
        assert!(input.just_pressed(Action::Jump));
    }

    #[test]
    fn test_release_action() {
        let mut input = InputState::new();
        input.press(Action::Jump);
        input.update();
        input.release(Action::Jump);

        assert!(!input.is_pressed(Action::Jump));
        assert!(input.just_released(Action::Jump));
    }

    #[test]
    fn test_update_clears_edges() {
        let mut input = InputState::new();
        input.press(Action::Attack);
        assert!(input.just_pressed(Action::Attack));

        input.update();
        assert!(input.is_pressed(Action::Attack));
        assert!(!input.just_pressed(Action::Attack));
    }

    #[test]
    fn test_repeat_press_no_edge() {
        let mut input = InputState::new();
        input.press(Action::MoveRight);
        input.update();

        input.press(Action::MoveRight);
        assert!(!input.just_pressed(Action::MoveRight));
        assert!(input.is_pressed(Action::MoveRight));
    }

    #[test]
    fn test_release_unpressed_action() {
        let mut input = InputState::new();
        input.release(Action::Jump);

        assert!(!input.just_released(Action::Jump));
    }

    #[test]
    fn test_reset_releases_held_actions() {
        let mut input = InputState::new();
        input.press(Action::Jump);
        input.press(Action::MoveLeft);
        input.update();

        input.reset();

        assert!(!input.is_pressed(Action::Jump));
        assert!(!input.is_pressed(Action::MoveLeft));
        assert!(input.held_actions().is_empty());
        assert!(input.just_released(Action::Jump));
        assert!(input.just_released(Action::MoveLeft));
    }

    #[test]
    fn test_held_actions() {
        let mut input = InputState::new();
        input.press(Action::MoveRight);
        input.press(Action::Down);

        let held = input.held_actions();
        assert_eq!(held.len(), 2);
        assert!(held.contains(&Action::MoveRight));
        assert!(held.contains(&Action::Down));
    }
}
