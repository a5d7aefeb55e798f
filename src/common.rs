//! Common types for the solver: cell states, raw observations, outcomes and board errors.

/// Grid position as `(row, col)`.
pub type Coord = (usize, usize);

/// What is known about one grid position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Cell {
    /// Not revealed and not deduced to be a mine.
    #[default]
    Unknown,
    /// Mine-free, carrying the number of mines among its neighbours.
    Revealed(u8),
    /// Deduced or observed to hold a mine. Never revealed.
    FlaggedMine,
}

impl Cell {
    pub fn is_unknown(self) -> bool {
        matches!(self, Cell::Unknown)
    }

    /// Clue value of a revealed cell.
    pub fn clue(self) -> Option<u8> {
        match self {
            Cell::Revealed(n) => Some(n),
            _ => None,
        }
    }

    /// Symbol used by the diagnostic snapshot.
    pub fn symbol(self) -> char {
        match self {
            Cell::Unknown => 'E',
            Cell::Revealed(0) => ' ',
            Cell::Revealed(n) => char::from_digit(u32::from(n), 10).unwrap_or('?'),
            Cell::FlaggedMine => 'X',
        }
    }
}

/// Raw reading of a single cell as reported by a board source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum ObservedValue {
    /// Revealed cell showing its neighbour mine count.
    Empty(u8),
    /// A mine is shown; the game has been lost.
    Mine,
    /// The source shows a flag on the cell.
    Flag,
    /// The source shows its victory marker.
    GameWon,
    /// The source reports that the game is over.
    GameLost,
}

impl ObservedValue {
    /// Cell state this observation resolves to, `None` for terminal signals.
    pub fn as_cell(self) -> Option<Cell> {
        match self {
            ObservedValue::Empty(n) => Some(Cell::Revealed(n)),
            ObservedValue::Flag => Some(Cell::FlaggedMine),
            ObservedValue::Mine | ObservedValue::GameWon | ObservedValue::GameLost => None,
        }
    }
}

/// Classification of a round after a refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome {
    Continue,
    Win,
    Loss,
}

impl Outcome {
    pub fn is_terminal(self) -> bool {
        !matches!(self, Outcome::Continue)
    }
}

/// Errors returned by board operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardError {
    /// Cell is no longer `Unknown`.
    InvalidTransition { row: usize, col: usize },
    /// Coordinate lies outside the grid.
    OutOfBounds { row: usize, col: usize },
    /// A clue outside `0..=8`.
    InvalidClue(u8),
    /// Rows, cols and mines must be positive with `mines < rows * cols`.
    InvalidConfig,
    /// The source produced malformed or inconsistent data for a refresh.
    RefreshFailure { row: usize, col: usize },
}

impl core::fmt::Display for BoardError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            BoardError::InvalidTransition { row, col } => {
                write!(f, "Cell ({}, {}) is no longer unknown", row, col)
            }
            BoardError::OutOfBounds { row, col } => {
                write!(f, "Cell ({}, {}) is out of bounds", row, col)
            }
            BoardError::InvalidClue(n) => write!(f, "Clue {} is outside 0..=8", n),
            BoardError::InvalidConfig => write!(
                f,
                "Board dimensions and mine count must be positive with fewer mines than cells"
            ),
            BoardError::RefreshFailure { row, col } => {
                write!(f, "Refresh produced malformed data for cell ({}, {})", row, col)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for BoardError {}
