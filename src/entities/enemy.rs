use glam::Vec3;

use crate::collision::Aabb;

#[derive(Debug, Clone, PartialEq)]
pub struct Enemy {
    pub position: Vec3,
    pub diameter: f32,
}

impl Enemy {
    pub fn new(position: Vec3, diameter: f32) -> Self {
        Self { position, diameter }
    }

    /// Closes `fraction` of the gap to `target`. Recomputed every frame,
    /// so the enemy keeps chasing a moving player.
    pub fn home_towards(&mut self, target: Vec3, fraction: f32) {
        self.position += (target - self.position) * fraction;
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::cube(self.position, self.diameter)
    }
}
