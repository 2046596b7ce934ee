use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use crate::cell::Direction;
use crate::episode_log::EpisodeLog;
use crate::error::GameError;
use crate::generate::{generate, Algorithm};
use crate::maze::Maze;
use crate::mechanics::{GameView, Mechanic};
use crate::observe::Observation;
use crate::pathfinding::{find_path, Position};

// Trace logging flag - set to true to enable debug output
const TRACE_EPISODES: bool = false;

/// How player and target spawns are chosen on reset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnPolicy {
    /// Uniformly random distinct cells, retried until mutually reachable
    Random,
    /// Player at (0, 0), target at (width-1, height-1)
    Corners,
}

impl SpawnPolicy {
    pub fn from_name(name: &str) -> Option<SpawnPolicy> {
        match name {
            "random" => Some(SpawnPolicy::Random),
            "corners" => Some(SpawnPolicy::Corners),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            SpawnPolicy::Random => "random",
            SpawnPolicy::Corners => "corners",
        }
    }
}

/// Construction-time knobs of the environment. `Config::build` fills this
/// from TOML; tests and embedders can fill it directly.
#[derive(Debug, Clone)]
pub struct GameOptions {
    pub width: i32,
    pub height: i32,
    pub algorithm: Algorithm,
    pub spawn: SpawnPolicy,
    pub max_spawn_attempts: u32,
    /// Reward for a non-terminal step, bump or not. Two magnitudes are in
    /// live use downstream (-0.01 and -1.0); keep it configurable.
    pub step_penalty: f64,
    pub terminal_reward: f64,
    /// Keep one maze layout for this many episodes before regenerating
    pub episodes_per_maze: u32,
    /// Seed the RNG for fully reproducible generation and spawns
    pub seed: Option<u64>,
    pub log_episodes: bool,
}

impl Default for GameOptions {
    fn default() -> Self {
        GameOptions {
            width: 15,
            height: 15,
            algorithm: Algorithm::Backtracker,
            spawn: SpawnPolicy::Random,
            max_spawn_attempts: 16,
            step_penalty: -0.01,
            terminal_reward: 1.0,
            episodes_per_maze: 1,
            seed: None,
            log_episodes: false,
        }
    }
}

/// Per-step info payload, always populated
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Info {
    pub optimal_path_length: usize,
    pub step_count: u32,
}

/// Return value of `MazeGame::step`
#[derive(Debug, Clone, Serialize)]
pub struct Step {
    pub observation: Observation,
    pub reward: f64,
    pub terminal: bool,
    pub info: Info,
}

/// The episodic maze environment.
///
/// Owns the maze, both positions, the terminal flag, the step counter and
/// the cached optimal path; all of it is mutated only by `reset` and
/// `step`. Single-threaded and turn-based: one call completes fully
/// before the next, and callers wanting parallel rollouts run one
/// instance per actor.
pub struct MazeGame {
    width: i32,
    height: i32,
    algorithm: Algorithm,
    spawn: SpawnPolicy,
    max_spawn_attempts: u32,
    step_penalty: f64,
    terminal_reward: f64,
    episodes_per_maze: u32,
    episode_idx: u32,
    rng: StdRng,
    maze: Maze,
    player: Position,
    target: Position,
    terminal: bool,
    player_steps: u32,
    optimal_path: Vec<Position>,
    optimal_path_length: usize,
    mechanic: Box<dyn Mechanic>,
    episode_log: Option<EpisodeLog>,
}

impl MazeGame {
    /// Build a configured environment and run the first reset. This is
    /// the single entry point: no global registries, no load-time side
    /// effects. Fails fast on dimensions an episode could not satisfy.
    pub fn new(options: GameOptions, mechanic: Box<dyn Mechanic>) -> Result<Self, GameError> {
        if options.width < 2 || options.height < 2 {
            return Err(GameError::InvalidDimensions {
                width: options.width,
                height: options.height,
            });
        }

        let rng = match options.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut game = MazeGame {
            width: options.width,
            height: options.height,
            algorithm: options.algorithm,
            spawn: options.spawn,
            max_spawn_attempts: options.max_spawn_attempts.max(1),
            step_penalty: options.step_penalty,
            terminal_reward: options.terminal_reward,
            episodes_per_maze: options.episodes_per_maze.max(1),
            episode_idx: 0,
            rng,
            maze: Maze::sealed(options.width, options.height),
            player: Position::new(0, 0),
            target: Position::new(0, 0),
            terminal: false,
            player_steps: 0,
            optimal_path: Vec::new(),
            optimal_path_length: 0,
            mechanic,
            episode_log: if options.log_episodes {
                Some(EpisodeLog::new())
            } else {
                None
            },
        };
        game.reset(None)?;
        Ok(game)
    }

    /// Start a new episode. With `Some(seed)` the RNG is reseeded first,
    /// so two resets with the same seed produce bit-identical mazes and
    /// spawns. The maze itself is rebuilt every `episodes_per_maze`
    /// episodes and kept otherwise.
    pub fn reset(&mut self, seed: Option<u64>) -> Result<Observation, GameError> {
        if let Some(seed) = seed {
            self.rng = StdRng::seed_from_u64(seed);
            self.episode_idx = 0;
        }

        if self.episode_idx % self.episodes_per_maze == 0 {
            self.maze = generate(self.width, self.height, self.algorithm, &mut self.rng);
        }
        let episode = self.episode_idx;
        self.episode_idx = self.episode_idx.wrapping_add(1);

        let (player, target, optimal_length, optimal_path) = self.spawn_players()?;
        self.player = player;
        self.target = target;
        self.optimal_path_length = optimal_length;
        self.optimal_path = optimal_path;
        self.terminal = false;
        self.player_steps = 0;

        self.mechanic.on_start(&GameView {
            maze: &self.maze,
            player: self.player,
            target: self.target,
        });

        if TRACE_EPISODES {
            println!(
                "[reset] episode {}: player ({},{}), target ({},{}), optimal {}",
                episode, player.x, player.y, target.x, target.y, optimal_length
            );
        }

        if let Some(log) = &mut self.episode_log {
            log.log_reset(episode, player, target, optimal_length);
        }

        Ok(self.observation())
    }

    /// Advance one turn.
    ///
    /// Actions: 0=down, 1=up, 2=left, 3=right; anything else is
    /// `GameError::InvalidAction`. Once the target has been reached every
    /// further call is an idempotent no-op reporting success again, so a
    /// caller that forgets to reset cannot corrupt state. A blocked or
    /// out-of-bounds move keeps the player in place but still consumes a
    /// step and earns the step penalty.
    pub fn step(&mut self, action: u8) -> Result<Step, GameError> {
        let dir = Direction::from_action(action).ok_or(GameError::InvalidAction(action))?;

        if self.terminal {
            return Ok(self.outcome(self.terminal_reward));
        }

        let from = self.player;
        let reward;
        if self.maze.can_move(self.player.x, self.player.y, dir) {
            self.player = self.player.step(dir);
            self.player_steps += 1;
            self.mechanic.on_update(&GameView {
                maze: &self.maze,
                player: self.player,
                target: self.target,
            });

            if self.player == self.target {
                self.terminal = true;
                self.mechanic.on_terminal(&GameView {
                    maze: &self.maze,
                    player: self.player,
                    target: self.target,
                });
                reward = self.terminal_reward;
            } else {
                reward = self.step_penalty;
            }
        } else {
            self.player_steps += 1;
            reward = self.step_penalty;
        }

        if let Some(log) = &mut self.episode_log {
            log.log_step(action, from, self.player, reward, self.terminal);
        }

        Ok(self.outcome(reward))
    }

    fn outcome(&self, reward: f64) -> Step {
        Step {
            observation: self.observation(),
            reward,
            terminal: self.terminal,
            info: Info {
                optimal_path_length: self.optimal_path_length,
                step_count: self.player_steps,
            },
        }
    }

    /// Current observation without advancing the game
    pub fn observation(&self) -> Observation {
        Observation::capture(
            &self.maze,
            self.player,
            self.target,
            self.mechanic.state(),
            self.player_steps,
        )
    }

    fn spawn_players(&mut self) -> Result<(Position, Position, usize, Vec<Position>), GameError> {
        match self.spawn {
            SpawnPolicy::Corners => {
                let player = Position::new(0, 0);
                let target = Position::new(self.width - 1, self.height - 1);
                match find_path(&self.maze, player, target) {
                    Some((len, path)) => Ok((player, target, len, path)),
                    None => Err(GameError::UnreachableTarget { attempts: 1 }),
                }
            }
            SpawnPolicy::Random => {
                for _ in 0..self.max_spawn_attempts {
                    let target = self.random_position();
                    let player = self.random_position();
                    if player == target {
                        continue;
                    }
                    if let Some((len, path)) = find_path(&self.maze, player, target) {
                        return Ok((player, target, len, path));
                    }
                }
                Err(GameError::UnreachableTarget {
                    attempts: self.max_spawn_attempts,
                })
            }
        }
    }

    fn random_position(&mut self) -> Position {
        Position::new(
            self.rng.gen_range(0..self.width),
            self.rng.gen_range(0..self.height),
        )
    }

    pub fn maze(&self) -> &Maze {
        &self.maze
    }

    pub fn player(&self) -> Position {
        self.player
    }

    pub fn target(&self) -> Position {
        self.target
    }

    pub fn is_terminal(&self) -> bool {
        self.terminal
    }

    pub fn step_count(&self) -> u32 {
        self.player_steps
    }

    pub fn optimal_path_length(&self) -> usize {
        self.optimal_path_length
    }

    /// One cached shortest player-to-target path for the current episode
    pub fn optimal_path(&self) -> &[Position] {
        &self.optimal_path
    }

    pub fn episode_log(&self) -> Option<&EpisodeLog> {
        self.episode_log.as_ref()
    }
}
