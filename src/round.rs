use rand::Rng;

use crate::collision::{self, Hit};
use crate::config::GameConfig;
use crate::entities::{Bullet, Enemy, Player};
use crate::events::{EventQueue, GameEvent};
use crate::input::{Action, InputSnapshot};
use crate::pool::EntityPool;
use crate::score::ScoreTracker;
use crate::spawner::Spawner;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundOutcome {
    Alive,
    PlayerDied,
}

/// All state of one play session, from entering gameplay to the player's death
#[derive(Debug, Clone)]
pub struct Round {
    pub player: Player,
    pub bullets: EntityPool<Bullet>,
    pub enemies: EntityPool<Enemy>,
    pub spawner: Spawner,
    frame: u64,
    alive: bool,
}

impl Round {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            player: Player::new(config.player_start, config.player_size),
            bullets: EntityPool::new(),
            enemies: EntityPool::new(),
            spawner: Spawner::new(config),
            frame: 0,
            alive: true,
        }
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Advances the round by one frame.
    ///
    /// Order within the frame: player look and movement, firing, bullet
    /// flight and expiry, enemy spawn roll, enemy homing, bullet hits,
    /// player contact. Removals are applied once at the end.
    pub fn step<R: Rng + ?Sized>(
        &mut self,
        input: &InputSnapshot,
        rng: &mut R,
        score: &mut ScoreTracker,
        events: &mut EventQueue,
        config: &GameConfig,
    ) -> RoundOutcome {
        if !self.alive {
            return RoundOutcome::PlayerDied;
        }
        self.frame += 1;

        self.player.apply_look(input.look);
        self.player.advance(&input.actions, config.player_speed);

        let fire_held = input.actions.is_held(Action::Fire);
        if self
            .spawner
            .try_fire(fire_held, &self.player, &mut self.bullets, config)
        {
            events.push(GameEvent::BulletFired {
                position: self.player.position,
            });
        }
        self.spawner.tick_cooldown(config);

        let bullet_speed = config.bullet_speed;
        self.bullets.sweep(|bullet| {
            bullet.advance(bullet_speed);
            bullet.is_expired()
        });

        if let Some(position) = self
            .spawner
            .roll_enemy(rng, &self.player, &mut self.enemies, config)
        {
            log::debug!("enemy spawned at {position}");
            events.push(GameEvent::EnemySpawned { position });
        }

        let target = self.player.position;
        for enemy in self.enemies.iter_mut() {
            enemy.home_towards(target, config.enemy_speed);
        }

        for hit in collision::find_hits(&self.bullets, &self.enemies) {
            self.resolve_hit(hit, score, events, config);
        }

        let contact = collision::find_contact(&self.player, &self.enemies);

        self.bullets.apply_removals();
        self.enemies.apply_removals();

        if contact.is_some() {
            self.alive = false;
            events.push(GameEvent::PlayerDied {
                score: score.score(),
            });
            return RoundOutcome::PlayerDied;
        }
        RoundOutcome::Alive
    }

    fn resolve_hit(
        &mut self,
        hit: Hit,
        score: &mut ScoreTracker,
        events: &mut EventQueue,
        config: &GameConfig,
    ) {
        let bullet_queued = self.bullets.mark_for_removal(hit.bullet);
        let enemy_queued = self.enemies.mark_for_removal(hit.enemy);
        debug_assert!(bullet_queued && enemy_queued);

        let Some(enemy) = self.enemies.get(hit.enemy) else {
            return;
        };
        let position = enemy.position;

        self.spawner.register_kill(config);
        score.add_kill(config.kill_reward);
        log::debug!(
            "enemy killed at {position}, score {}, spawn rate {}",
            score.score(),
            self.spawner.spawn_rate
        );
        events.push(GameEvent::EnemyKilled {
            position,
            score: score.score(),
        });
    }

    /// Releases every remaining bullet and enemy; returns how many were released
    pub fn clear(&mut self) -> usize {
        self.bullets.clear().len() + self.enemies.clear().len()
    }
}
