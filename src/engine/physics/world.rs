use super::collision::{CollisionEvent, CollisionEventQueue};
use crate::core::math::Rect;
use glam::Vec2;
use rapier2d::prelude::*;

/// Physics world managing all physics simulation
///
/// Gravity is zero on purpose: the character integrates its own velocity
/// and feeds the body positions, so the pipeline only has to detect
/// overlaps between the part sensors and the level.
pub struct PhysicsWorld {
    pub rigid_body_set: RigidBodySet,
    pub collider_set: ColliderSet,
    integration_parameters: IntegrationParameters,
    physics_pipeline: PhysicsPipeline,
    island_manager: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    impulse_joint_set: ImpulseJointSet,
    multibody_joint_set: MultibodyJointSet,
    ccd_solver: CCDSolver,
    query_pipeline: QueryPipeline,
    event_queue: CollisionEventQueue,
}

impl PhysicsWorld {
    /// Create a new physics world
    pub fn new() -> Self {
        log::info!("Initializing physics world");

        Self {
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            integration_parameters: IntegrationParameters::default(),
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            impulse_joint_set: ImpulseJointSet::new(),
            multibody_joint_set: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
            event_queue: CollisionEventQueue::new(),
        }
    }

    /// Step the physics simulation forward by the given delta time
    pub fn step(&mut self, delta_time: f32) {
        self.integration_parameters.dt = delta_time;
        self.event_queue.clear();

        self.physics_pipeline.step(
            &vector![0.0, 0.0],
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_body_set,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            Some(&mut self.query_pipeline),
            &(),
            &self.event_queue,
        );
    }

    /// Add a rigid body to the world
    pub fn add_rigid_body(&mut self, body: RigidBody) -> RigidBodyHandle {
        self.rigid_body_set.insert(body)
    }

    /// Add a collider attached to a rigid body
    pub fn add_collider(&mut self, collider: Collider, body_handle: RigidBodyHandle) -> ColliderHandle {
        self.collider_set
            .insert_with_parent(collider, body_handle, &mut self.rigid_body_set)
    }

    /// Get a reference to a rigid body
    pub fn get_rigid_body(&self, handle: RigidBodyHandle) -> Option<&RigidBody> {
        self.rigid_body_set.get(handle)
    }

    /// Get a mutable reference to a rigid body
    pub fn get_rigid_body_mut(&mut self, handle: RigidBodyHandle) -> Option<&mut RigidBody> {
        self.rigid_body_set.get_mut(handle)
    }

    /// Get a reference to a collider
    pub fn get_collider(&self, handle: ColliderHandle) -> Option<&Collider> {
        self.collider_set.get(handle)
    }

    /// Feed a kinematic body its position for the next step
    pub fn set_next_position(&mut self, handle: RigidBodyHandle, position: Vec2) {
        if let Some(body) = self.rigid_body_set.get_mut(handle) {
            body.set_next_kinematic_translation(vector![position.x, position.y]);
        }
    }

    /// Get the current translation of a body
    pub fn translation(&self, handle: RigidBodyHandle) -> Option<Vec2> {
        self.rigid_body_set
            .get(handle)
            .map(|body| Vec2::new(body.translation().x, body.translation().y))
    }

    /// Get the world-space bounding box of a collider
    pub fn collider_aabb(&self, handle: ColliderHandle) -> Option<Rect> {
        self.collider_set.get(handle).map(|collider| {
            let aabb = collider.compute_aabb();
            Rect::from_min_max(
                Vec2::new(aabb.mins.x, aabb.mins.y),
                Vec2::new(aabb.maxs.x, aabb.maxs.y),
            )
        })
    }

    /// Get collision events from the last physics step
    pub fn collision_events(&self) -> Vec<CollisionEvent> {
        self.event_queue.events()
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::physics::body::presets;

    #[test]
    fn test_physics_world_creation() {
        let world = PhysicsWorld::new();
        assert_eq!(world.rigid_body_set.len(), 0);
        assert_eq!(world.collider_set.len(), 0);
    }

    #[test]
    fn test_add_body_and_collider() {
        let mut world = PhysicsWorld::new();

        let body = presets::terrain_body(0.0, 0.0);
        let body_handle = world.add_rigid_body(body);

        let collider = presets::terrain_collider(1.0, 1.0);
        world.add_collider(collider, body_handle);

        assert_eq!(world.rigid_body_set.len(), 1);
        assert_eq!(world.collider_set.len(), 1);
    }

    #[test]
    fn test_set_next_position_moves_kinematic_body() {
        let mut world = PhysicsWorld::new();

        let body = presets::character_body(0.0, 0.0);
        let handle = world.add_rigid_body(body);

        world.set_next_position(handle, Vec2::new(2.0, 3.0));
        world.step(1.0 / 60.0);

        let translation = world.translation(handle).unwrap();
        assert!((translation.x - 2.0).abs() < 1e-5);
        assert!((translation.y - 3.0).abs() < 1e-5);
    }

    #[test]
    fn test_sensor_vs_terrain_reports_events() {
        let mut world = PhysicsWorld::new();

        let character = world.add_rigid_body(presets::character_body(0.0, 0.0));
        world.add_collider(presets::part_sensor(0.3, 0.1, 0.0), character);

        let terrain = world.add_rigid_body(presets::terrain_body(0.0, 0.0));
        world.add_collider(presets::terrain_collider(1.0, 1.0), terrain);

        world.step(1.0 / 60.0);

        let events = world.collision_events();
        assert!(
            events
                .iter()
                .any(|e| matches!(e, CollisionEvent::Started { .. })),
            "expected an intersection event between the sensor and terrain"
        );
    }

    #[test]
    fn test_collider_aabb() {
        let mut world = PhysicsWorld::new();

        let body = world.add_rigid_body(presets::terrain_body(5.0, 2.0));
        let handle = world.add_collider(presets::trigger_collider(4.0, 2.0), body);

        let aabb = world.collider_aabb(handle).unwrap();
        assert!((aabb.min.x - 3.0).abs() < 1e-5);
        assert!((aabb.max.x - 7.0).abs() < 1e-5);
        assert!((aabb.min.y - 1.0).abs() < 1e-5);
        assert!((aabb.max.y - 3.0).abs() < 1e-5);
    }
}
