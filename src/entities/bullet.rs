use glam::Vec3;

use crate::collision::Aabb;

#[derive(Debug, Clone, PartialEq)]
pub struct Bullet {
    pub position: Vec3,
    /// Orientation frozen from the player at the moment of firing
    pub yaw: f32,
    pub pitch: f32,
    /// Travel budget left; the bullet expires once this goes negative
    pub remaining_distance: f32,
    pub size: f32,
}

impl Bullet {
    pub fn new(position: Vec3, yaw: f32, pitch: f32, distance: f32, size: f32) -> Self {
        Self {
            position,
            yaw,
            pitch,
            remaining_distance: distance,
            size,
        }
    }

    /// Moves one frame along the frozen heading. Positive pitch aims down.
    pub fn advance(&mut self, speed: f32) {
        self.position.x += speed * self.yaw.sin();
        self.position.y -= speed * self.pitch.sin();
        self.position.z += speed * self.yaw.cos();
        self.remaining_distance -= speed;
        debug_assert!(self.remaining_distance.is_finite());
    }

    pub fn is_expired(&self) -> bool {
        self.remaining_distance < 0.0
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::cube(self.position, self.size)
    }
}
