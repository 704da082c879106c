// Camera that follows the character within room bounds

use crate::core::math::Rect;
use glam::Vec2;

/// Camera that tracks a target and stays inside the current room
///
/// Room bounds arrive from trigger regions in the level, so the camera
/// stops scrolling at room edges instead of showing the void outside.
pub struct FollowCamera {
    position: Vec2,
    half_extents: Vec2,
    room_bounds: Option<Rect>,
}

impl FollowCamera {
    /// Create a camera from the vertical half extent and aspect ratio
    pub fn new(vert_extent: f32, aspect: f32) -> Self {
        Self {
            position: Vec2::ZERO,
            half_extents: Vec2::new(vert_extent * aspect, vert_extent),
            room_bounds: None,
        }
    }

    /// Set the room the view is confined to
    pub fn set_room_bounds(&mut self, bounds: Rect) {
        self.room_bounds = Some(bounds);
    }

    /// Current camera center
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Half the view size on each axis
    pub fn half_extents(&self) -> Vec2 {
        self.half_extents
    }

    /// Center on the target, pushed back inside the room bounds
    ///
    /// The view edges are computed from the raw target once, then each
    /// overflowing edge pushes the center back by its overflow.
    pub fn follow(&mut self, target: Vec2) {
        let mut target_x = target.x;
        let mut target_y = target.y;

        let min_view_y = target.y - self.half_extents.y;
        let max_view_y = target.y + self.half_extents.y;
        let min_view_x = target.x - self.half_extents.x;
        let max_view_x = target.x + self.half_extents.x;

        if let Some(room) = self.room_bounds {
            if min_view_y < room.min.y {
                target_y += room.min.y - min_view_y;
            }
            if max_view_y > room.max.y {
                target_y -= max_view_y - room.max.y;
            }
            if min_view_x < room.min.x {
                target_x += room.min.x - min_view_x;
            }
            if max_view_x > room.max.x {
                target_x -= max_view_x - room.max.x;
            }
        }

        self.position = Vec2::new(target_x, target_y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera_4x3() -> FollowCamera {
        // Half extents of 4 wide by 3 tall
        FollowCamera::new(3.0, 4.0 / 3.0)
    }

    #[test]
    fn test_follow_without_room_tracks_target() {
        let mut camera = camera_4x3();
        camera.follow(Vec2::new(7.5, -2.0));
        assert_eq!(camera.position(), Vec2::new(7.5, -2.0));
    }

    #[test]
    fn test_left_edge_pushes_camera_right() {
        let mut camera = camera_4x3();
        camera.set_room_bounds(Rect::from_min_max(
            Vec2::new(0.0, 0.0),
            Vec2::new(20.0, 10.0),
        ));

        camera.follow(Vec2::new(1.0, 5.0));
        // View would start at x=-3, so the camera sits at the room edge
        assert_eq!(camera.position(), Vec2::new(4.0, 5.0));
    }

    #[test]
    fn test_right_edge_pushes_camera_left() {
        let mut camera = camera_4x3();
        camera.set_room_bounds(Rect::from_min_max(
            Vec2::new(0.0, 0.0),
            Vec2::new(20.0, 10.0),
        ));

        camera.follow(Vec2::new(19.0, 5.0));
        assert_eq!(camera.position(), Vec2::new(16.0, 5.0));
    }

    #[test]
    fn test_bottom_and_top_edges_clamp() {
        let mut camera = camera_4x3();
        camera.set_room_bounds(Rect::from_min_max(
            Vec2::new(0.0, 0.0),
            Vec2::new(20.0, 10.0),
        ));

        camera.follow(Vec2::new(10.0, 1.0));
        assert_eq!(camera.position(), Vec2::new(10.0, 3.0));

        camera.follow(Vec2::new(10.0, 9.5));
        assert_eq!(camera.position(), Vec2::new(10.0, 7.0));
    }

    #[test]
    fn test_interior_target_is_not_pushed() {
        let mut camera = camera_4x3();
        camera.set_room_bounds(Rect::from_min_max(
            Vec2::new(0.0, 0.0),
            Vec2::new(20.0, 10.0),
        ));

        camera.follow(Vec2::new(10.0, 5.0));
        assert_eq!(camera.position(), Vec2::new(10.0, 5.0));
    }

    #[test]
    fn test_room_narrower_than_view() {
        let mut camera = camera_4x3();
        camera.set_room_bounds(Rect::from_min_max(
            Vec2::new(0.0, 0.0),
            Vec2::new(6.0, 10.0),
        ));

        // Both x pushes fire and cancel around the room center
        camera.follow(Vec2::new(3.0, 5.0));
        assert_eq!(camera.position(), Vec2::new(3.0, 5.0));
    }

    #[test]
    fn test_new_room_takes_effect() {
        let mut camera = camera_4x3();
        camera.set_room_bounds(Rect::from_min_max(
            Vec2::new(0.0, 0.0),
            Vec2::new(20.0, 10.0),
        ));
        camera.follow(Vec2::new(1.0, 5.0));
        assert_eq!(camera.position(), Vec2::new(4.0, 5.0));

        camera.set_room_bounds(Rect::from_min_max(
            Vec2::new(-10.0, 0.0),
            Vec2::new(20.0, 10.0),
        ));
        camera.follow(Vec2::new(1.0, 5.0));
        assert_eq!(camera.position(), Vec2::new(1.0, 5.0));
    }
}
