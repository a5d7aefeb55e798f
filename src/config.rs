use crate::common::{BoardError, Coord};

/// Dimensions and mine count of one game, fixed for its lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "std",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RawBoardConfig")
)]
pub struct BoardConfig {
    rows: usize,
    cols: usize,
    mines: usize,
}

/// Unchecked wire form; deserialized configs go through [`BoardConfig::new`].
#[cfg(feature = "std")]
#[derive(serde::Deserialize)]
struct RawBoardConfig {
    rows: usize,
    cols: usize,
    mines: usize,
}

#[cfg(feature = "std")]
impl TryFrom<RawBoardConfig> for BoardConfig {
    type Error = BoardError;

    fn try_from(raw: RawBoardConfig) -> Result<Self, Self::Error> {
        BoardConfig::new(raw.rows, raw.cols, raw.mines)
    }
}

impl BoardConfig {
    pub fn new(rows: usize, cols: usize, mines: usize) -> Result<Self, BoardError> {
        if rows == 0 || cols == 0 || mines == 0 {
            return Err(BoardError::InvalidConfig);
        }
        let cells = rows.checked_mul(cols).ok_or(BoardError::InvalidConfig)?;
        if mines >= cells {
            return Err(BoardError::InvalidConfig);
        }
        Ok(Self { rows, cols, mines })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn mines(&self) -> usize {
        self.mines
    }

    pub fn cells(&self) -> usize {
        self.rows * self.cols
    }

    /// Cell clicked first in every round, just up and left of the centre.
    pub fn opening_cell(&self) -> Coord {
        ((self.rows / 2).saturating_sub(1), (self.cols / 2).saturating_sub(1))
    }
}

/// Difficulty presets offered by the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize, clap::ValueEnum))]
pub enum GameLevel {
    Beginner,
    Easy,
    Advanced,
    Expert,
}

impl GameLevel {
    pub const ALL: [GameLevel; 4] = [
        GameLevel::Beginner,
        GameLevel::Easy,
        GameLevel::Advanced,
        GameLevel::Expert,
    ];

    pub const fn size(self) -> (usize, usize) {
        match self {
            GameLevel::Beginner => (8, 8),
            GameLevel::Easy => (12, 12),
            GameLevel::Advanced => (16, 16),
            GameLevel::Expert => (16, 30),
        }
    }

    pub const fn mines(self) -> usize {
        match self {
            GameLevel::Beginner => 10,
            GameLevel::Easy => 22,
            GameLevel::Advanced => 40,
            GameLevel::Expert => 99,
        }
    }

    pub fn board_config(self) -> BoardConfig {
        let (rows, cols) = self.size();
        BoardConfig {
            rows,
            cols,
            mines: self.mines(),
        }
    }
}

#[cfg(feature = "std")]
pub use session_config::SessionConfig;

#[cfg(feature = "std")]
mod session_config {
    use std::path::PathBuf;
    use std::time::Duration;

    use super::{BoardConfig, GameLevel};

    /// Policy of the outer game loop.
    #[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
    pub struct SessionConfig {
        pub board: BoardConfig,
        /// Random reveals performed after the opening cell.
        pub opening_moves: usize,
        /// Wins faster than this count against the `wins` budget.
        pub win_threshold: Duration,
        /// Losses that survived longer than this get a snapshot.
        pub min_loss_elapsed: Duration,
        /// Fast wins required before the session stops.
        pub wins: u32,
        /// Hard cap on rounds played, regardless of wins.
        pub max_rounds: Option<u32>,
        /// Directory receiving `lose_{n}.txt` snapshots.
        pub snapshot_dir: Option<PathBuf>,
        /// Extra refresh attempts before a round is abandoned as lost.
        pub refresh_retries: u32,
        /// Consecutive adapter failures tolerated before the session gives up.
        pub max_consecutive_failures: u32,
    }

    impl SessionConfig {
        pub fn for_level(level: GameLevel) -> Self {
            Self {
                board: level.board_config(),
                ..Self::default()
            }
        }
    }

    impl Default for SessionConfig {
        fn default() -> Self {
            Self {
                board: GameLevel::Beginner.board_config(),
                opening_moves: 3,
                win_threshold: Duration::from_secs(70),
                min_loss_elapsed: Duration::from_secs(2),
                wins: 5,
                max_rounds: None,
                snapshot_dir: None,
                refresh_retries: 2,
                max_consecutive_failures: 5,
            }
        }
    }
}
