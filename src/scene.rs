use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::config::GameConfig;
use crate::events::{EventQueue, GameEvent};
use crate::input::InputSnapshot;
use crate::round::{Round, RoundOutcome};
use crate::score::ScoreTracker;

/// The one live scene. Gameplay owns the round; leaving gameplay drops it.
#[derive(Debug, Clone)]
pub enum Scene {
    Menu,
    /// Crossfading out of the menu; gameplay starts once the level reaches zero
    Transitioning { fade_level: f32 },
    Gameplay(Box<Round>),
}

/// Field-less view of [`Scene`] for display and comparisons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneKind {
    Menu,
    Transitioning,
    Gameplay,
}

/// Top-level game: scene state machine, score and the frame's event queue
pub struct Game {
    scene: Scene,
    score: ScoreTracker,
    rng: ChaCha8Rng,
    events: EventQueue,
    config: GameConfig,
}

impl Game {
    /// Seeds from `config.seed` when present, otherwise from the OS
    pub fn new(config: GameConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_os_rng(),
        };
        Self::with_rng(config, rng)
    }

    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self::with_rng(config, ChaCha8Rng::seed_from_u64(seed))
    }

    fn with_rng(config: GameConfig, rng: ChaCha8Rng) -> Self {
        Self {
            scene: Scene::Menu,
            score: ScoreTracker::new(),
            rng,
            events: EventQueue::new(),
            config,
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn kind(&self) -> SceneKind {
        match self.scene {
            Scene::Menu => SceneKind::Menu,
            Scene::Transitioning { .. } => SceneKind::Transitioning,
            Scene::Gameplay(_) => SceneKind::Gameplay,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn score(&self) -> u32 {
        self.score.score()
    }

    pub fn high_score(&self) -> u32 {
        self.score.high_score()
    }

    /// Crossfade level while transitioning
    pub fn fade_level(&self) -> Option<f32> {
        match self.scene {
            Scene::Transitioning { fade_level } => Some(fade_level),
            _ => None,
        }
    }

    pub fn round(&self) -> Option<&Round> {
        match &self.scene {
            Scene::Gameplay(round) => Some(&**round),
            _ => None,
        }
    }

    pub fn round_mut(&mut self) -> Option<&mut Round> {
        match &mut self.scene {
            Scene::Gameplay(round) => Some(&mut **round),
            _ => None,
        }
    }

    /// Starts the crossfade from the menu. Ignored anywhere else, including
    /// while a crossfade is already running.
    pub fn press_play(&mut self) -> bool {
        if !matches!(self.scene, Scene::Menu) {
            return false;
        }
        self.scene = Scene::Transitioning { fade_level: 1.0 };
        log::debug!("play pressed, crossfade started");
        true
    }

    /// Runs one frame of whichever scene is live
    pub fn step(&mut self, input: &InputSnapshot) {
        match &mut self.scene {
            Scene::Menu => {}
            Scene::Transitioning { fade_level } => {
                *fade_level -= self.config.fade_step;
                if *fade_level <= 0.0 {
                    self.enter_gameplay();
                }
            }
            Scene::Gameplay(round) => {
                let outcome = round.step(
                    input,
                    &mut self.rng,
                    &mut self.score,
                    &mut self.events,
                    &self.config,
                );
                if outcome == RoundOutcome::PlayerDied {
                    self.return_to_menu();
                }
            }
        }
    }

    fn enter_gameplay(&mut self) {
        let round = Box::new(Round::new(&self.config));
        let previous = std::mem::replace(&mut self.scene, Scene::Gameplay(round));
        drop(previous);

        log::info!("round started, high score {}", self.score.high_score());
        self.events.push(GameEvent::RoundStarted);
    }

    /// Death path: flush the score and snap straight back to the menu.
    /// Does nothing unless a round is live, so repeated deaths collapse to one.
    fn return_to_menu(&mut self) {
        let mut round = match std::mem::replace(&mut self.scene, Scene::Menu) {
            Scene::Gameplay(round) => round,
            other => {
                self.scene = other;
                return;
            }
        };

        let final_score = self.score.flush_on_death();
        let released = round.clear();
        log::info!(
            "player died after {} frames with score {final_score}, high score {}",
            round.frame(),
            self.score.high_score()
        );
        self.events.push(GameEvent::ReturnedToMenu {
            high_score: self.score.high_score(),
            released,
        });
    }

    /// Takes every event queued since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.events.drain()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_until(game: &mut Game, kind: SceneKind, limit: usize) -> usize {
        for frame in 1..=limit {
            game.step(&InputSnapshot::default());
            if game.kind() == kind {
                return frame;
            }
        }
        panic!("never reached {kind:?}");
    }

    #[test]
    fn test_starts_on_menu() {
        let game = Game::with_seed(GameConfig::default(), 3);
        assert_eq!(game.kind(), SceneKind::Menu);
        assert_eq!(game.score(), 0);
        assert_eq!(game.high_score(), 0);
        assert!(game.round().is_none());
    }

    #[test]
    fn test_menu_idles_without_play() {
        let mut game = Game::with_seed(GameConfig::default(), 3);
        for _ in 0..100 {
            game.step(&InputSnapshot::default());
        }
        assert_eq!(game.kind(), SceneKind::Menu);
    }

    #[test]
    fn test_crossfade_counts_down_then_enters_gameplay() {
        let mut game = Game::with_seed(GameConfig::default(), 3);
        assert!(game.press_play());
        assert_eq!(game.fade_level(), Some(1.0));

        game.step(&InputSnapshot::default());
        let level = game.fade_level().unwrap();
        assert!((level - 0.95).abs() < 1e-6);

        let frames = run_until(&mut game, SceneKind::Gameplay, 50);
        // 1.0 at 0.05 per frame, one frame already spent
        assert!((19..=20).contains(&frames));
        assert!(game.fade_level().is_none());

        let round = game.round().unwrap();
        assert!(round.bullets.is_empty() && round.enemies.is_empty());
        assert!(game.drain_events().contains(&GameEvent::RoundStarted));
    }

    #[test]
    fn test_play_is_ignored_outside_menu() {
        let mut game = Game::with_seed(GameConfig::default(), 3);
        assert!(game.press_play());
        game.step(&InputSnapshot::default());
        assert!(!game.press_play());
        assert!(game.fade_level().unwrap() < 1.0);

        run_until(&mut game, SceneKind::Gameplay, 50);
        assert!(!game.press_play());
        assert_eq!(game.kind(), SceneKind::Gameplay);
    }
}
