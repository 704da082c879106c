use rapier2d::prelude::*;
use std::sync::{Arc, Mutex};

/// Collision groups for filtering what objects can collide with each other
///
/// The player's body-part sensors must see terrain and trigger regions but
/// never each other, so each side gets its own membership bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionGroups {
    /// Default group - interacts with everything
    Default = 0b0000_0001,

    /// Player body-part sensors (feet, body, head)
    Player = 0b0000_0010,

    /// Solid level geometry
    Terrain = 0b0000_0100,

    /// Trigger regions (room bounds for the camera)
    Trigger = 0b0000_1000,
}

impl CollisionGroups {
    /// Convert to rapier2d's InteractionGroups
    pub fn to_interaction_groups(self) -> InteractionGroups {
        let memberships = Group::from_bits_truncate(self as u32);

        let filter = match self {
            // Player parts touch terrain and trigger regions, never other parts
            CollisionGroups::Player => Group::from_bits_truncate(
                CollisionGroups::Terrain as u32 | CollisionGroups::Trigger as u32,
            ),

            // Terrain only reports against the player
            CollisionGroups::Terrain => Group::from_bits_truncate(CollisionGroups::Player as u32),

            // Trigger regions only report against the player
            CollisionGroups::Trigger => Group::from_bits_truncate(CollisionGroups::Player as u32),

            // Default interacts with everything
            CollisionGroups::Default => Group::ALL,
        };

        InteractionGroups::new(memberships, filter)
    }
}

/// Custom collision event for game logic
#[derive(Debug, Clone, Copy)]
pub enum CollisionEvent {
    /// Two colliders started touching
    Started {
        collider1: ColliderHandle,
        collider2: ColliderHandle,
    },

    /// Two colliders stopped touching
    Stopped {
        collider1: ColliderHandle,
        collider2: ColliderHandle,
    },
}

/// Queue for storing collision events during physics step
pub struct CollisionEventQueue {
    events: Arc<Mutex<Vec<CollisionEvent>>>,
}

impl CollisionEventQueue {
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::with_capacity(32))),
        }
    }

    /// Clear all events (call at start of physics step)
    pub fn clear(&self) {
        if let Ok(mut events) = self.events.lock() {
            events.clear();
        }
    }

    /// Get all collision events from this frame
    pub fn events(&self) -> Vec<CollisionEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    /// Add a collision event
    fn push(&self, event: CollisionEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

impl Default for CollisionEventQueue {
    fn default() -> Self {
        Self::new()
    }
}

// Implement rapier2d's EventHandler trait for our event queue
impl EventHandler for CollisionEventQueue {
    fn handle_collision_event(
        &self,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        event: rapier2d::prelude::CollisionEvent,
        _contact_pair: Option<&ContactPair>,
    ) {
        match event {
            rapier2d::prelude::CollisionEvent::Started(h1, h2, _flags) => {
                self.push(CollisionEvent::Started {
                    collider1: h1,
                    collider2: h2,
                });
            }
            rapier2d::prelude::CollisionEvent::Stopped(h1, h2, _flags) => {
                self.push(CollisionEvent::Stopped {
                    collider1: h1,
                    collider2: h2,
                });
            }
        }
    }

    fn handle_contact_force_event(
        &self,
        _dt: Real,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        _contact_pair: &ContactPair,
        _total_force_magnitude: Real,
    ) {
        // Force events are unused; the character is kinematic
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collision_groups_bits() {
        // Ensure each group has a unique bit
        let groups = [
            CollisionGroups::Default,
            CollisionGroups::Player,
            CollisionGroups::Terrain,
            CollisionGroups::Trigger,
        ];

        for (i, group1) in groups.iter().enumerate() {
            for (j, group2) in groups.iter().enumerate() {
                if i != j {
                    assert_ne!(
                        *group1 as u32, *group2 as u32,
                        "Groups must have unique bits"
                    );
                }
            }
        }
    }

    #[test]
    fn test_player_doesnt_collide_with_player() {
        let player_groups = CollisionGroups::Player.to_interaction_groups();
        let player_membership = player_groups.memberships;

        assert!(
            !player_groups.filter.contains(player_membership),
            "Player parts should not report against each other"
        );
    }

    #[test]
    fn test_player_collides_with_terrain_and_triggers() {
        let player_groups = CollisionGroups::Player.to_interaction_groups();
        let terrain_bit = Group::from_bits_truncate(CollisionGroups::Terrain as u32);
        let trigger_bit = Group::from_bits_truncate(CollisionGroups::Trigger as u32);

        assert!(player_groups.filter.contains(terrain_bit));
        assert!(player_groups.filter.contains(trigger_bit));
    }

    #[test]
    fn test_terrain_filter_is_mutual() {
        let terrain_groups = CollisionGroups::Terrain.to_interaction_groups();
        let player_bit = Group::from_bits_truncate(CollisionGroups::Player as u32);

        assert!(
            terrain_groups.filter.contains(player_bit),
            "Terrain must report against the player"
        );
    }
}
