mod bullet;
mod enemy;
mod player;

pub use bullet::Bullet;
pub use enemy::Enemy;
pub use player::Player;
