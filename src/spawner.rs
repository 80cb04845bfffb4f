use glam::Vec3;
use rand::Rng;

use crate::config::GameConfig;
use crate::entities::{Bullet, Enemy, Player};
use crate::pool::EntityPool;

/// Uniform draws consumed per enemy placement, in the order they are taken
pub const POSITION_DRAWS: usize = 5;

/// Creates bullets on fire input and enemies at random
#[derive(Debug, Clone, PartialEq)]
pub struct Spawner {
    /// Time left before the next shot; firing needs it at or below zero
    pub cooldown: f32,
    /// Probability of an enemy spawning on a given frame
    pub spawn_rate: f32,
}

impl Spawner {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            cooldown: 0.0,
            spawn_rate: config.enemy_spawn_rate,
        }
    }

    /// Fires a bullet from the player's position and heading if the trigger is
    /// held, the cooldown has run out and the pool is below the cap
    pub fn try_fire(
        &mut self,
        fire_held: bool,
        player: &Player,
        bullets: &mut EntityPool<Bullet>,
        config: &GameConfig,
    ) -> bool {
        if !fire_held || self.cooldown > 0.0 || bullets.len() >= config.bullet_cap {
            return false;
        }

        bullets.push(Bullet::new(
            player.position,
            player.yaw,
            player.pitch,
            config.bullet_distance,
            config.bullet_size,
        ));
        self.cooldown = config.bullet_timeout;
        true
    }

    /// Counts the cooldown down; it stops once it is no longer positive
    pub fn tick_cooldown(&mut self, config: &GameConfig) {
        if self.cooldown > 0.0 {
            self.cooldown -= config.bullet_cooldown_step;
        }
    }

    /// Rolls once against the spawn rate and places an enemy around the
    /// player on success. Returns the new enemy's position.
    pub fn roll_enemy<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        player: &Player,
        enemies: &mut EntityPool<Enemy>,
        config: &GameConfig,
    ) -> Option<Vec3> {
        let roll: f32 = rng.random();
        if roll > self.spawn_rate {
            return None;
        }

        let mut draws = [0.0; POSITION_DRAWS];
        for draw in &mut draws {
            *draw = rng.random();
        }
        let position = enemy_spawn_position(player.position, draws, config);
        enemies.push(Enemy::new(position, config.enemy_diameter));
        Some(position)
    }

    /// Each kill makes spawns a little more likely
    pub fn register_kill(&mut self, config: &GameConfig) {
        self.spawn_rate += config.enemy_rate_step;
        debug_assert!(self.spawn_rate.is_finite());
    }
}

/// Spawn point for an enemy around `origin`.
///
/// `draws` are uniform samples in `[0, 1)`: x side, x distance, height,
/// z side, z distance. Horizontal offsets are `ceil((0.5 - side) * distance)`
/// with distance spread between the configured min and max. Height is one of
/// `enemy_heights` whole-unit levels starting at y = 1, independent of the origin.
pub fn enemy_spawn_position(origin: Vec3, draws: [f32; POSITION_DRAWS], config: &GameConfig) -> Vec3 {
    let [x_side, x_distance, height, z_side, z_distance] = draws;
    let spread = config.enemy_max_distance - config.enemy_min_distance;
    let offset = |side: f32, distance: f32| {
        ((0.5 - side) * (config.enemy_min_distance + spread * distance)).ceil()
    };

    let levels = config.enemy_heights.max(1) as f32;
    let level = (height * levels).floor().min(levels - 1.0);

    Vec3::new(
        origin.x + offset(x_side, x_distance),
        1.0 + level,
        origin.z + offset(z_side, z_distance),
    )
}
