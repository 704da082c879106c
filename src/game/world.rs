// Game world: simulation root wiring the player, physics, camera and effects

use crate::core::math::Rect;
use crate::engine::input::InputState;
use crate::engine::physics::{
    body::presets, BodyBuilder, ColliderHandle, CollisionEvent, PhysicsWorld, RigidBodyHandle,
};
use crate::game::camera::FollowCamera;
use crate::game::effects::{EffectQueue, EffectSystem};
use crate::game::player::{state_line, BodyPart, ConfigError, Player, PlayerConfig};
use crate::game::tilemap::TileMap;
use glam::Vec2;
use rapier2d::prelude::Collider;
use std::collections::HashMap;

/// What a physics collider represents in the scene
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColliderTag {
    /// One of the character's part sensors
    PlayerPart(BodyPart),
    /// Solid level geometry
    Terrain,
    /// Room-bounds region for the camera
    CameraBounds,
}

/// The running scene
///
/// Owns the player, the level and the physics pipeline, and routes
/// collision events between them. The level geometry is split into one
/// collider per tile run, so a part can touch several of them at once.
/// Per-part contact counters collapse that into the single enter and
/// leave notification the character logic expects.
pub struct GameWorld {
    physics: PhysicsWorld,
    map: TileMap,
    player: Player,
    camera: FollowCamera,
    effects: EffectSystem,
    player_body: RigidBodyHandle,
    collider_tags: HashMap<ColliderHandle, ColliderTag>,
    terrain_contacts: HashMap<BodyPart, u32>,
}

impl GameWorld {
    /// Build the scene: level colliders, the character and its sensors
    pub fn new(
        map: TileMap,
        config: PlayerConfig,
        spawn: Vec2,
        camera: FollowCamera,
    ) -> Result<Self, ConfigError> {
        let effect_queue = EffectQueue::new();
        let effects = EffectSystem::new(effect_queue.clone());
        let player = Player::new(config, spawn, effect_queue)?;

        let mut physics = PhysicsWorld::new();
        let mut collider_tags = HashMap::new();

        for handle in map.populate_physics(&mut physics) {
            collider_tags.insert(handle, ColliderTag::Terrain);
        }

        let player_body = physics.add_rigid_body(presets::character_body(spawn.x, spawn.y));
        for (part, collider) in part_sensors(player.config()) {
            let handle = physics.add_collider(collider, player_body);
            collider_tags.insert(handle, ColliderTag::PlayerPart(part));
        }

        log::info!("Game world ready, {} tagged colliders", collider_tags.len());

        Ok(Self {
            physics,
            map,
            player,
            camera,
            effects,
            player_body,
            collider_tags,
            terrain_contacts: HashMap::new(),
        })
    }

    /// Add a room-bounds region the camera clamps to while the player
    /// is inside it
    pub fn add_trigger_region(&mut self, bounds: Rect) {
        let center = bounds.center();
        let size = bounds.size();

        let body = self.physics.add_rigid_body(
            BodyBuilder::new_fixed().position(center.x, center.y).build(),
        );
        let handle = self
            .physics
            .add_collider(presets::trigger_collider(size.x, size.y), body);
        self.collider_tags.insert(handle, ColliderTag::CameraBounds);
    }

    /// Advance the scene by one fixed tick
    ///
    /// The character moves first and feeds its position to the physics
    /// body, so the collision events routed afterwards describe the
    /// tick that just happened. Reactions land as state transitions on
    /// the next tick.
    pub fn tick(&mut self, input: &InputState, dt: f32) {
        self.player.update(input, &self.map, dt);
        self.physics
            .set_next_position(self.player_body, self.player.position);
        self.physics.step(dt);
        self.route_collision_events();

        self.effects.update(self.player.position, dt);
        self.camera.follow(self.player.position);
    }

    fn route_collision_events(&mut self) {
        let events = self.physics.collision_events();

        // Entering contacts resolve first, so crossing a seam between
        // two level colliders inside one tick never reads as leaving
        // the ground.
        for event in &events {
            if let CollisionEvent::Started {
                collider1,
                collider2,
            } = event
            {
                self.contact_started(*collider1, *collider2);
            }
        }
        for event in &events {
            if let CollisionEvent::Stopped {
                collider1,
                collider2,
            } = event
            {
                self.contact_stopped(*collider1, *collider2);
            }
        }
    }

    fn contact_started(&mut self, a: ColliderHandle, b: ColliderHandle) {
        let Some((part, part_handle, other_handle, other_tag)) = self.resolve_pair(a, b) else {
            return;
        };

        match other_tag {
            ColliderTag::Terrain => {
                let count = {
                    let entry = self.terrain_contacts.entry(part).or_insert(0);
                    *entry += 1;
                    *entry
                };
                if count == 1 {
                    let point = self.contact_cell(part_handle);
                    self.player.on_collide(part, point);
                }
            }
            ColliderTag::CameraBounds => {
                if let Some(bounds) = self.physics.collider_aabb(other_handle) {
                    log::debug!(
                        "Entered room ({:.1}, {:.1})..({:.1}, {:.1})",
                        bounds.min.x,
                        bounds.min.y,
                        bounds.max.x,
                        bounds.max.y
                    );
                    self.camera.set_room_bounds(bounds);
                }
            }
            ColliderTag::PlayerPart(_) => {}
        }
    }

    fn contact_stopped(&mut self, a: ColliderHandle, b: ColliderHandle) {
        let Some((part, _, _, other_tag)) = self.resolve_pair(a, b) else {
            return;
        };
        if other_tag != ColliderTag::Terrain {
            return;
        }

        let count = {
            let entry = self.terrain_contacts.entry(part).or_insert(0);
            *entry = entry.saturating_sub(1);
            *entry
        };
        if count == 0 {
            self.player.on_collision_leave(part);
        }
    }

    /// Split a collider pair into the player part and the other side
    fn resolve_pair(
        &self,
        a: ColliderHandle,
        b: ColliderHandle,
    ) -> Option<(BodyPart, ColliderHandle, ColliderHandle, ColliderTag)> {
        let tag_a = self.collider_tags.get(&a).copied()?;
        let tag_b = self.collider_tags.get(&b).copied()?;

        match (tag_a, tag_b) {
            (ColliderTag::PlayerPart(part), other) => Some((part, a, b, other)),
            (other, ColliderTag::PlayerPart(part)) => Some((part, b, a, other)),
            _ => None,
        }
    }

    /// Grid cell under a part sensor, reported as the contact point
    fn contact_cell(&self, handle: ColliderHandle) -> Vec2 {
        let translation = self
            .physics
            .get_collider(handle)
            .map(|collider| Vec2::new(collider.translation().x, collider.translation().y))
            .unwrap_or(self.player.position);
        TileMap::world_to_cell(translation).as_vec2()
    }

    /// Space-separated labels of the active character states
    pub fn state_line(&self) -> String {
        state_line(self.player.states())
    }

    /// The player character
    pub fn player(&self) -> &Player {
        &self.player
    }

    /// The follow camera
    pub fn camera(&self) -> &FollowCamera {
        &self.camera
    }

    /// Visual effects currently playing
    pub fn effects(&self) -> &EffectSystem {
        &self.effects
    }

    /// The level grid
    pub fn map(&self) -> &TileMap {
        &self.map
    }
}

/// Feet, torso and head sensors sized for the character sprite
///
/// The feet box is deep enough that its center is still inside the
/// surface row on the tick an overlap starts, even at fast-fall speed.
/// Feet and head are slightly narrower than the torso so walls register
/// on the torso first.
fn part_sensors(config: &PlayerConfig) -> [(BodyPart, Collider); 3] {
    let w = config.width;
    let h = config.height;

    [
        (
            BodyPart::Feet,
            presets::part_sensor(w / 2.0 - 0.05, h * 0.2, -h * 0.3),
        ),
        (
            BodyPart::Body,
            presets::part_sensor(w / 2.0, h * 0.2, h * 0.1),
        ),
        (
            BodyPart::Head,
            presets::part_sensor(w / 2.0 - 0.05, h * 0.1, h * 0.4),
        ),
    ]
}
