use glam::Vec2;

use crate::geometry::CollisionRect;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

/// Kinematic state of one controllable actor. Position is the top-left corner
/// of its bounding box in world pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActorState {
    pub position: Vec2,
    pub width: f32,
    pub height: f32,
    pub vertical_velocity: f32,
    pub is_jumping: bool,
    pub is_airborne: bool,
    pub facing: Facing,
}

impl ActorState {
    /// Fresh actor at its spawn box: at rest, airborne until the first tick
    /// finds ground under it.
    pub fn spawn(bounds: CollisionRect) -> Self {
        Self {
            position: Vec2::new(bounds.x, bounds.y),
            width: bounds.width,
            height: bounds.height,
            vertical_velocity: 0.0,
            is_jumping: false,
            is_airborne: true,
            facing: Facing::default(),
        }
    }

    pub fn bounds(&self) -> CollisionRect {
        CollisionRect::new(self.position.x, self.position.y, self.width, self.height)
    }

    pub fn set_bounds(&mut self, bounds: CollisionRect) {
        self.position = Vec2::new(bounds.x, bounds.y);
    }

    pub fn is_grounded(&self) -> bool {
        !self.is_airborne
    }
}
