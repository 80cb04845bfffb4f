use glam::Vec3;

use crate::entities::{Bullet, Enemy, Player};
use crate::pool::EntityPool;

/// Axis-aligned bounding box, the overlap volume used for every hit test
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// Cube of edge `size` centered on `center`
    pub fn cube(center: Vec3, size: f32) -> Self {
        let half = Vec3::splat(size * 0.5);
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Touching faces count as overlap
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.cmple(other.max).all() && other.min.cmple(self.max).all()
    }
}

/// A bullet credited with destroying an enemy this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    pub bullet: usize,
    pub enemy: usize,
}

/// Pairs bullets with the enemies they hit.
///
/// Each bullet claims at most the first overlapping enemy in pool order, and a
/// claimed enemy is skipped by later bullets, so every hit is credited once.
/// Entities already queued for removal take no part.
pub fn find_hits(bullets: &EntityPool<Bullet>, enemies: &EntityPool<Enemy>) -> Vec<Hit> {
    let mut hits: Vec<Hit> = Vec::new();

    for (b_idx, bullet) in bullets.iter().enumerate() {
        if bullets.is_marked(b_idx) {
            continue;
        }
        let bullet_bounds = bullet.bounds();

        for (e_idx, enemy) in enemies.iter().enumerate() {
            if enemies.is_marked(e_idx) || hits.iter().any(|hit| hit.enemy == e_idx) {
                continue;
            }
            if bullet_bounds.intersects(&enemy.bounds()) {
                hits.push(Hit {
                    bullet: b_idx,
                    enemy: e_idx,
                });
                break;
            }
        }
    }

    hits
}

/// Index of the first enemy touching the player, ignoring enemies already
/// queued for removal
pub fn find_contact(player: &Player, enemies: &EntityPool<Enemy>) -> Option<usize> {
    let player_bounds = player.bounds();
    enemies
        .iter()
        .enumerate()
        .find(|(idx, enemy)| !enemies.is_marked(*idx) && player_bounds.intersects(&enemy.bounds()))
        .map(|(idx, _)| idx)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bullet_at(x: f32, z: f32) -> Bullet {
        Bullet::new(Vec3::new(x, 1.0, z), 0.0, 0.0, 10.0, 0.1)
    }

    fn enemy_at(x: f32, z: f32) -> Enemy {
        Enemy::new(Vec3::new(x, 1.0, z), 1.0)
    }

    #[test]
    fn test_aabb_overlap() {
        let a = Aabb::cube(Vec3::ZERO, 1.0);
        assert!(a.intersects(&Aabb::cube(Vec3::new(0.9, 0.0, 0.0), 1.0)));
        assert!(a.intersects(&Aabb::cube(Vec3::new(1.0, 0.0, 0.0), 1.0)));
        assert!(!a.intersects(&Aabb::cube(Vec3::new(1.1, 0.0, 0.0), 1.0)));
        assert!(!a.intersects(&Aabb::cube(Vec3::new(0.0, 2.0, 0.0), 1.0)));
    }

    #[test]
    fn test_bullet_claims_first_enemy_only() {
        let mut bullets = EntityPool::new();
        bullets.push(bullet_at(0.0, 5.0));
        let mut enemies = EntityPool::new();
        enemies.push(enemy_at(0.2, 5.0));
        enemies.push(enemy_at(-0.2, 5.0));

        let hits = find_hits(&bullets, &enemies);
        assert_eq!(hits, vec![Hit { bullet: 0, enemy: 0 }]);
    }

    #[test]
    fn test_enemy_credited_to_one_bullet() {
        let mut bullets = EntityPool::new();
        bullets.push(bullet_at(0.0, 5.0));
        bullets.push(bullet_at(0.1, 5.0));
        let mut enemies = EntityPool::new();
        enemies.push(enemy_at(0.0, 5.0));

        let hits = find_hits(&bullets, &enemies);
        assert_eq!(hits, vec![Hit { bullet: 0, enemy: 0 }]);
    }

    #[test]
    fn test_second_bullet_takes_next_enemy() {
        let mut bullets = EntityPool::new();
        bullets.push(bullet_at(0.0, 5.0));
        bullets.push(bullet_at(0.0, 5.0));
        let mut enemies = EntityPool::new();
        enemies.push(enemy_at(0.0, 5.0));
        enemies.push(enemy_at(0.0, 5.2));

        let hits = find_hits(&bullets, &enemies);
        assert_eq!(
            hits,
            vec![Hit { bullet: 0, enemy: 0 }, Hit { bullet: 1, enemy: 1 }]
        );
    }

    #[test]
    fn test_marked_entities_are_ignored() {
        let mut bullets = EntityPool::new();
        bullets.push(bullet_at(0.0, 5.0));
        let mut enemies = EntityPool::new();
        enemies.push(enemy_at(0.0, 5.0));
        enemies.mark_for_removal(0);
        assert!(find_hits(&bullets, &enemies).is_empty());
    }

    #[test]
    fn test_player_contact_finds_first_toucher() {
        let player = Player::new(Vec3::new(0.0, 1.0, 0.0), 1.0);
        let mut enemies = EntityPool::new();
        enemies.push(enemy_at(30.0, 0.0));
        enemies.push(enemy_at(0.5, 0.0));
        enemies.push(enemy_at(0.0, 0.5));
        assert_eq!(find_contact(&player, &enemies), Some(1));

        enemies.mark_for_removal(1);
        assert_eq!(find_contact(&player, &enemies), Some(2));
    }

    #[test]
    fn test_no_contact_when_far_apart() {
        let player = Player::new(Vec3::new(0.0, 1.0, 0.0), 1.0);
        let mut enemies = EntityPool::new();
        enemies.push(enemy_at(40.0, 40.0));
        assert_eq!(find_contact(&player, &enemies), None);
    }
}
