//! Things that happened during a frame, queued for whoever reacts to them.

use glam::Vec3;

/// Named sound assets the host can play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCue {
    Kill,
    Death,
}

#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    RoundStarted,
    BulletFired { position: Vec3 },
    EnemySpawned { position: Vec3 },
    EnemyKilled { position: Vec3, score: u32 },
    PlayerDied { score: u32 },
    /// Back on the menu, with the number of entities released from the round
    ReturnedToMenu { high_score: u32, released: usize },
}

impl GameEvent {
    pub fn sound(&self) -> Option<SoundCue> {
        match self {
            GameEvent::EnemyKilled { .. } => Some(SoundCue::Kill),
            GameEvent::PlayerDied { .. } => Some(SoundCue::Death),
            _ => None,
        }
    }
}

/// FIFO of events, filled during a step and drained once afterwards
#[derive(Debug, Clone, Default)]
pub struct EventQueue {
    events: Vec<GameEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, GameEvent> {
        self.events.iter()
    }

    pub fn drain(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
