use serde::{Deserialize, Serialize};

use crate::{Board, BoardSizeError, PiecePosition, PieceSeed, engine::input::InputResolution};

/// Parameters fixed for the lifetime of a [`GameSession`](super::GameSession).
///
/// The defaults describe the classic console game: a 10×20 board with pieces
/// spawning at column 3 of the top row.
///
/// ```
/// use blockfall_engine::SessionConfig;
///
/// let config = SessionConfig {
///     width: 12,
///     ..SessionConfig::default()
/// };
/// assert!(config.validate().is_ok());
/// assert!(SessionConfig { height: 0, ..config }.validate().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct SessionConfig {
    pub width: usize,
    pub height: usize,
    pub spawn: PiecePosition,
    pub input_resolution: InputResolution,
    /// Seed for the piece generator. A random seed is drawn when unset.
    pub seed: Option<PieceSeed>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            width: Board::DEFAULT_WIDTH,
            height: Board::DEFAULT_HEIGHT,
            spawn: PiecePosition::SPAWN,
            input_resolution: InputResolution::default(),
            seed: None,
        }
    }
}

impl SessionConfig {
    pub fn validate(&self) -> Result<(), BoardSizeError> {
        if self.width == 0 || self.height == 0 {
            return Err(BoardSizeError {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }
}
