use thiserror::Error;

/// Errors surfaced by environment construction, reset and step.
///
/// A blocked or out-of-bounds move is NOT an error: it is a defined no-op
/// with a penalty reward, handled inside `MazeGame::step`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GameError {
    #[error("action must be an integer between 0 and 3, got {0}")]
    InvalidAction(u8),

    #[error("could not place mutually reachable player and target after {attempts} attempts")]
    UnreachableTarget { attempts: u32 },

    #[error("maze dimensions must be at least 2x2, got {width}x{height}")]
    InvalidDimensions { width: i32, height: i32 },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
