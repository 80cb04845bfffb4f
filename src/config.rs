use color_eyre::{
    Result,
    eyre::{WrapErr, ensure},
};
use glam::Vec3;
use serde::Deserialize;
use std::f32::consts::PI;
use std::path::Path;

/// File the binary looks for in the working directory
pub const CONFIG_FILE: &str = "paradox_kick.toml";

/// Tuning values for the simulation and the host loop.
///
/// Every field has a default, so a config file only needs the values it
/// wants to change. Distances are world units, rates are per frame.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct GameConfig {
    /// Player step per frame along each held direction
    pub player_speed: f32,
    pub player_start: Vec3,
    /// Edge length of the player's box
    pub player_size: f32,
    pub pitch_min: f32,
    pub pitch_max: f32,
    /// Radians of look per terminal cell of pointer motion
    pub mouse_sensitivity: f32,
    /// Radians of look per frame while a look key is held
    pub look_key_step: f32,

    /// Maximum number of live bullets
    pub bullet_cap: usize,
    pub bullet_speed: f32,
    /// Cooldown applied after each shot
    pub bullet_timeout: f32,
    /// Cooldown decrement per frame
    pub bullet_cooldown_step: f32,
    /// Travel budget before a bullet expires
    pub bullet_distance: f32,
    pub bullet_size: f32,

    /// Fraction of the distance to the player an enemy closes each frame
    pub enemy_speed: f32,
    /// Spawn probability per frame at the start of a round
    pub enemy_spawn_rate: f32,
    /// Spawn probability added per kill
    pub enemy_rate_step: f32,
    pub enemy_min_distance: f32,
    pub enemy_max_distance: f32,
    pub enemy_diameter: f32,
    /// Number of discrete spawn heights, starting at y = 1
    pub enemy_heights: u32,

    pub kill_reward: u32,
    /// Crossfade decrement per frame
    pub fade_step: f32,

    /// Fixed RNG seed; entropy is used when absent
    pub seed: Option<u64>,
    pub kill_sound: String,
    pub death_sound: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            player_speed: 0.1,
            player_start: Vec3::new(0.0, 1.0, 0.0),
            player_size: 1.0,
            pitch_min: -PI / 3.0,
            pitch_max: PI / 4.0,
            mouse_sensitivity: 0.02,
            look_key_step: 0.03,
            bullet_cap: 5,
            bullet_speed: 0.1,
            bullet_timeout: 0.16,
            bullet_cooldown_step: 0.01,
            bullet_distance: 10.0,
            bullet_size: 0.1,
            enemy_speed: 0.02,
            enemy_spawn_rate: 0.005,
            enemy_rate_step: 0.00003,
            enemy_min_distance: 80.0,
            enemy_max_distance: 115.0,
            enemy_diameter: 1.0,
            enemy_heights: 3,
            kill_reward: 100,
            fade_step: 0.05,
            seed: None,
            kill_sound: "assets/sounds/pop.mp3".to_string(),
            death_sound: "assets/sounds/chopin_b_minor.mp3".to_string(),
        }
    }
}

impl GameConfig {
    /// Parse a config from TOML text
    pub fn from_toml(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text).wrap_err("invalid game config")?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects values that would panic the look clamp or stall the simulation
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.pitch_min.is_finite() && self.pitch_max.is_finite(),
            "pitch limits must be finite, got [{}, {}]",
            self.pitch_min,
            self.pitch_max
        );
        ensure!(
            self.pitch_min <= self.pitch_max,
            "pitch_min ({}) must not exceed pitch_max ({})",
            self.pitch_min,
            self.pitch_max
        );
        for (name, value) in [
            ("fade_step", self.fade_step),
            ("bullet_speed", self.bullet_speed),
            ("bullet_cooldown_step", self.bullet_cooldown_step),
            ("player_speed", self.player_speed),
        ] {
            ensure!(value > 0.0, "{name} must be positive, got {value}");
        }
        ensure!(
            self.enemy_min_distance <= self.enemy_max_distance,
            "enemy_min_distance ({}) must not exceed enemy_max_distance ({})",
            self.enemy_min_distance,
            self.enemy_max_distance
        );
        Ok(())
    }

    /// Load the config at `path`, falling back to defaults when the file is missing
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            log::info!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let text = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read {}", path.display()))?;
        let config =
            Self::from_toml(&text).wrap_err_with(|| format!("failed to parse {}", path.display()))?;
        log::info!("loaded config from {}", path.display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_arcade_tuning() {
        let config = GameConfig::default();
        assert_eq!(config.bullet_cap, 5);
        assert_eq!(config.kill_reward, 100);
        assert_eq!(config.enemy_spawn_rate, 0.005);
        assert_eq!(config.player_start, Vec3::new(0.0, 1.0, 0.0));
        assert!(config.pitch_min < 0.0 && config.pitch_max > 0.0);
    }

    #[test]
    fn test_partial_toml_keeps_other_defaults() {
        let config = GameConfig::from_toml("bullet_cap = 8\nseed = 42\n").unwrap();
        assert_eq!(config.bullet_cap, 8);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.bullet_speed, GameConfig::default().bullet_speed);
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        assert!(GameConfig::from_toml("bullet_cap = \"many\"").is_err());
    }

    #[test]
    fn test_defaults_are_valid() {
        assert!(GameConfig::default().validate().is_ok());
    }

    #[test]
    fn test_inverted_pitch_limits_are_rejected() {
        let err = GameConfig::from_toml("pitch_min = 1.0\npitch_max = 0.0\n").unwrap_err();
        assert!(format!("{err:#}").contains("pitch_min"));

        let config = GameConfig {
            pitch_max: f32::INFINITY,
            ..GameConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_non_positive_steps_are_rejected() {
        for field in [
            "fade_step",
            "bullet_speed",
            "bullet_cooldown_step",
            "player_speed",
        ] {
            for value in ["0.0", "-0.5", "nan"] {
                let err = GameConfig::from_toml(&format!("{field} = {value}\n")).unwrap_err();
                assert!(
                    format!("{err:#}").contains(field),
                    "{field} = {value} gave {err:#}"
                );
            }
        }
    }

    #[test]
    fn test_inverted_enemy_distances_are_rejected() {
        let err = GameConfig::from_toml("enemy_min_distance = 120.0\n").unwrap_err();
        assert!(format!("{err:#}").contains("enemy_min_distance"));
        assert!(GameConfig::from_toml("enemy_min_distance = 115.0\n").is_ok());
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let config = GameConfig::load("definitely/not/here.toml").unwrap();
        assert_eq!(config, GameConfig::default());
    }
}
