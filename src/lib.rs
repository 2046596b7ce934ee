pub mod cell;
pub mod config;
pub mod episode_log;
pub mod error;
pub mod game;
pub mod generate;
pub mod maze;
pub mod mechanics;
pub mod observe;
pub mod pathfinding;

pub use cell::{Cell, Direction};
pub use config::Config;
pub use error::GameError;
pub use game::{GameOptions, Info, MazeGame, SpawnPolicy, Step};
pub use generate::{generate, Algorithm};
pub use maze::Maze;
pub use mechanics::{
    DelayedVisibility, FullVisibility, GameView, LineOfSightVisibility, Mechanic,
    RadiusVisibility, VisibilityState,
};
pub use observe::{Observation, Tile};
pub use pathfinding::{find_path, format_path, Position};
