use glam::Vec3;

use crate::collision::Aabb;
use crate::input::{Action, ActionSet, Look};

#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub size: f32,
}

impl Player {
    pub fn new(position: Vec3, size: f32) -> Self {
        Self {
            position,
            yaw: 0.0,
            pitch: 0.0,
            size,
        }
    }

    /// Orientation follows the accumulated look directly, no smoothing
    pub fn apply_look(&mut self, look: Look) {
        self.yaw = look.yaw;
        self.pitch = look.pitch;
    }

    /// Unit vector the player faces on the ground plane
    pub fn forward(&self) -> Vec3 {
        Vec3::new(self.yaw.sin(), 0.0, self.yaw.cos())
    }

    /// Unit vector to the player's right on the ground plane
    pub fn right(&self) -> Vec3 {
        Vec3::new(self.yaw.cos(), 0.0, -self.yaw.sin())
    }

    /// Steps along every held direction. Offsets add up, so diagonals
    /// cover more ground than a single direction.
    pub fn advance(&mut self, actions: &ActionSet, speed: f32) {
        let forward = self.forward() * speed;
        let right = self.right() * speed;

        if actions.is_held(Action::MoveForward) {
            self.position += forward;
        }
        if actions.is_held(Action::MoveBack) {
            self.position -= forward;
        }
        if actions.is_held(Action::StrafeLeft) {
            self.position -= right;
        }
        if actions.is_held(Action::StrafeRight) {
            self.position += right;
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::cube(self.position, self.size)
    }
}
