use serde::Deserialize;
use std::fs;

use crate::error::GameError;
use crate::game::{GameOptions, MazeGame, SpawnPolicy};
use crate::generate::Algorithm;
use crate::mechanics::{
    DelayedVisibility, FullVisibility, LineOfSightVisibility, Mechanic, RadiusVisibility,
};

#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub maze: MazeConfig,
    #[serde(default)]
    pub spawn: SpawnConfig,
    #[serde(default)]
    pub rewards: RewardConfig,
    #[serde(default)]
    pub visibility: VisibilityConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize)]
pub struct MazeConfig {
    #[serde(default = "default_width")]
    pub width: i32,
    #[serde(default = "default_height")]
    pub height: i32,
    #[serde(default = "default_algorithm")]
    pub algorithm: String,
}

#[derive(Debug, Deserialize)]
pub struct SpawnConfig {
    #[serde(default = "default_spawn_policy")]
    pub policy: String,
    #[serde(default = "default_max_spawn_attempts")]
    pub max_attempts: u32,
}

#[derive(Debug, Deserialize)]
pub struct RewardConfig {
    #[serde(default = "default_step_penalty")]
    pub step_penalty: f64,
    #[serde(default = "default_terminal_reward")]
    pub terminal_reward: f64,
}

#[derive(Debug, Deserialize)]
pub struct VisibilityConfig {
    #[serde(default = "default_mechanic")]
    pub mechanic: String,
    #[serde(default = "default_vision_radius")]
    pub radius: i32,
    #[serde(default)]
    pub show_target: bool,
    /// 0 = no delay decoration; > 0 keeps the maze hidden that many steps
    #[serde(default)]
    pub delay: u32,
}

#[derive(Debug, Deserialize)]
pub struct SessionConfig {
    #[serde(default)]
    pub deterministic: bool,
    #[serde(default = "default_seed")]
    pub seed: u64,
    #[serde(default = "default_episodes_per_maze")]
    pub episodes_per_maze: u32,
}

#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub enable_episode_log: bool,
    #[serde(default = "default_episode_log_path")]
    pub episode_log_path: String,
}

// Default values
fn default_width() -> i32 { 15 }
fn default_height() -> i32 { 15 }
fn default_algorithm() -> String { "backtracker".to_string() }
fn default_spawn_policy() -> String { "random".to_string() }
fn default_max_spawn_attempts() -> u32 { 16 }
fn default_step_penalty() -> f64 { -0.01 }
fn default_terminal_reward() -> f64 { 1.0 }
fn default_mechanic() -> String { "full".to_string() }
fn default_vision_radius() -> i32 { 3 }
fn default_seed() -> u64 { 1337 }
fn default_episodes_per_maze() -> u32 { 1 }
fn default_episode_log_path() -> String { "episode_log.json".to_string() }

impl Default for MazeConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            algorithm: default_algorithm(),
        }
    }
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            policy: default_spawn_policy(),
            max_attempts: default_max_spawn_attempts(),
        }
    }
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self {
            step_penalty: default_step_penalty(),
            terminal_reward: default_terminal_reward(),
        }
    }
}

impl Default for VisibilityConfig {
    fn default() -> Self {
        Self {
            mechanic: default_mechanic(),
            radius: default_vision_radius(),
            show_target: false,
            delay: 0,
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            deterministic: false,
            seed: default_seed(),
            episodes_per_maze: default_episodes_per_maze(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enable_episode_log: false,
            episode_log_path: default_episode_log_path(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            maze: MazeConfig::default(),
            spawn: SpawnConfig::default(),
            rewards: RewardConfig::default(),
            visibility: VisibilityConfig::default(),
            session: SessionConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl VisibilityConfig {
    /// Build the configured fog-of-war strategy. Unknown names and
    /// unusable radii fail here, at configuration time, never mid-episode.
    pub fn mechanic(&self) -> Result<Box<dyn Mechanic>, GameError> {
        let inner: Box<dyn Mechanic> = match self.mechanic.as_str() {
            "full" => Box::new(FullVisibility::new()),
            "radius" => {
                self.check_radius()?;
                Box::new(RadiusVisibility::new(self.radius, self.show_target))
            }
            "line_of_sight" => {
                self.check_radius()?;
                Box::new(LineOfSightVisibility::new(self.radius, self.show_target))
            }
            other => {
                return Err(GameError::InvalidConfig(format!(
                    "unknown visibility mechanic '{}'",
                    other
                )))
            }
        };

        Ok(if self.delay > 0 {
            Box::new(DelayedVisibility::new(inner, self.delay))
        } else {
            inner
        })
    }

    fn check_radius(&self) -> Result<(), GameError> {
        if self.radius < 1 {
            return Err(GameError::InvalidConfig(format!(
                "visibility radius must be at least 1, got {}",
                self.radius
            )));
        }
        Ok(())
    }
}

impl Config {
    /// Load configuration from file, or use defaults if file doesn't exist
    pub fn load() -> Self {
        match fs::read_to_string("config.toml") {
            Ok(contents) => {
                match toml::from_str(&contents) {
                    Ok(config) => {
                        println!("Loaded configuration from config.toml");
                        config
                    }
                    Err(e) => {
                        eprintln!("Warning: Failed to parse config.toml: {}", e);
                        eprintln!("Using default configuration");
                        Config::default()
                    }
                }
            }
            Err(_) => {
                println!("No config.toml found, using default configuration");
                Config::default()
            }
        }
    }

    /// Build the configured environment instance. The one factory: takes
    /// the full configuration surface and returns a ready (already reset)
    /// game, or fails fast on invalid dimensions/names.
    pub fn build(&self) -> Result<MazeGame, GameError> {
        let algorithm = Algorithm::from_name(&self.maze.algorithm).ok_or_else(|| {
            GameError::InvalidConfig(format!("unknown maze algorithm '{}'", self.maze.algorithm))
        })?;
        let spawn = SpawnPolicy::from_name(&self.spawn.policy).ok_or_else(|| {
            GameError::InvalidConfig(format!("unknown spawn policy '{}'", self.spawn.policy))
        })?;
        let mechanic = self.visibility.mechanic()?;

        let options = GameOptions {
            width: self.maze.width,
            height: self.maze.height,
            algorithm,
            spawn,
            max_spawn_attempts: self.spawn.max_attempts,
            step_penalty: self.rewards.step_penalty,
            terminal_reward: self.rewards.terminal_reward,
            episodes_per_maze: self.session.episodes_per_maze,
            seed: if self.session.deterministic {
                Some(self.session.seed)
            } else {
                None
            },
            log_episodes: self.logging.enable_episode_log,
        };

        MazeGame::new(options, mechanic)
    }
}
