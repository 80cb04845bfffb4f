// Library exports for testing
pub use collision::{Aabb, Hit};
pub use config::GameConfig;
pub use entities::{Bullet, Enemy, Player};
pub use events::{EventQueue, GameEvent, SoundCue};
pub use input::{Action, ActionSet, InputSnapshot, Look};
pub use pool::EntityPool;
pub use round::{Round, RoundOutcome};
pub use scene::{Game, Scene, SceneKind};
pub use score::ScoreTracker;
pub use spawner::{Spawner, enemy_spawn_position};

pub mod app;
pub mod audio;
pub mod collision;
pub mod config;
pub mod entities;
pub mod events;
pub mod input;
pub mod pool;
pub mod renderer;
pub mod round;
pub mod scene;
pub mod score;
pub mod spawner;
