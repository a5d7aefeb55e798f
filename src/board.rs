//! Authoritative model of what is known about each cell of one game.

use alloc::collections::{BTreeMap, BTreeSet};
use alloc::vec::Vec;
use core::fmt;

use crate::common::{BoardError, Cell, Coord, ObservedValue, Outcome};
use crate::config::BoardConfig;

/// One refresh worth of readings. Cells still showing the hidden tile are absent.
pub type Observations = BTreeMap<Coord, ObservedValue>;

const MAX_CLUE: u8 = 8;

/// Partially observed minefield.
///
/// Cells only ever move `Unknown -> Revealed(n)` or `Unknown -> FlaggedMine`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoardState {
    config: BoardConfig,
    cells: Vec<Cell>,
    flagged: usize,
}

impl BoardState {
    /// Fresh board with every cell `Unknown`.
    pub fn new(config: BoardConfig) -> Self {
        Self {
            config,
            cells: alloc::vec![Cell::Unknown; config.cells()],
            flagged: 0,
        }
    }

    pub fn config(&self) -> BoardConfig {
        self.config
    }

    pub fn rows(&self) -> usize {
        self.config.rows()
    }

    pub fn cols(&self) -> usize {
        self.config.cols()
    }

    pub fn total_mines(&self) -> usize {
        self.config.mines()
    }

    /// Cells flagged as mines so far, by deduction or observation.
    pub fn flagged(&self) -> usize {
        self.flagged
    }

    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        self.index(row, col).map(|i| self.cells[i])
    }

    fn index(&self, row: usize, col: usize) -> Option<usize> {
        (row < self.rows() && col < self.cols()).then(|| row * self.cols() + col)
    }

    fn checked_index(&self, row: usize, col: usize) -> Result<usize, BoardError> {
        self.index(row, col).ok_or(BoardError::OutOfBounds { row, col })
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (Coord, Cell)> + '_ {
        let cols = self.cols();
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &cell)| ((i / cols, i % cols), cell))
    }

    /// Every cell still `Unknown`.
    pub fn unknown_cells(&self) -> BTreeSet<Coord> {
        self.cells()
            .filter(|(_, cell)| cell.is_unknown())
            .map(|(coord, _)| coord)
            .collect()
    }

    pub fn has_unknown(&self) -> bool {
        self.cells.iter().any(|c| c.is_unknown())
    }

    /// Up to eight adjacent positions, row-major, clipped to the grid.
    pub fn neighbors(&self, row: usize, col: usize) -> Vec<Coord> {
        let mut out = Vec::with_capacity(8);
        for r in row.saturating_sub(1)..=row + 1 {
            for c in col.saturating_sub(1)..=col + 1 {
                if (r, c) != (row, col) && r < self.rows() && c < self.cols() {
                    out.push((r, c));
                }
            }
        }
        out
    }

    /// Record an external reading of a cell.
    ///
    /// Returns `Ok(false)` without touching the board when the cell is already
    /// resolved, since a refresh may race with our own flags.
    pub fn apply_observation(
        &mut self,
        row: usize,
        col: usize,
        observed: Cell,
    ) -> Result<bool, BoardError> {
        let i = self.checked_index(row, col)?;
        if let Cell::Revealed(n) = observed {
            if n > MAX_CLUE {
                return Err(BoardError::InvalidClue(n));
            }
        }
        if !self.cells[i].is_unknown() || observed.is_unknown() {
            return Ok(false);
        }
        if observed == Cell::FlaggedMine {
            self.flagged += 1;
        }
        self.cells[i] = observed;
        Ok(true)
    }

    /// Transition `Unknown -> FlaggedMine`.
    pub fn mark_mine(&mut self, row: usize, col: usize) -> Result<(), BoardError> {
        let i = self.checked_index(row, col)?;
        if !self.cells[i].is_unknown() {
            return Err(BoardError::InvalidTransition { row, col });
        }
        self.cells[i] = Cell::FlaggedMine;
        self.flagged += 1;
        Ok(())
    }

    /// Apply a whole refresh, or nothing at all.
    ///
    /// Terminal signals win over cell data: any `Mine`/`GameLost` is a loss,
    /// otherwise any `GameWon` is a win, and the board is left untouched.
    pub fn apply_refresh(&mut self, observations: &Observations) -> Result<Outcome, BoardError> {
        let mut won = false;
        for (&(row, col), &value) in observations {
            if self.index(row, col).is_none() {
                return Err(BoardError::RefreshFailure { row, col });
            }
            match value {
                ObservedValue::Empty(n) if n > MAX_CLUE => {
                    return Err(BoardError::RefreshFailure { row, col })
                }
                ObservedValue::Mine | ObservedValue::GameLost => return Ok(Outcome::Loss),
                ObservedValue::GameWon => won = true,
                ObservedValue::Empty(_) | ObservedValue::Flag => {}
            }
        }
        if won {
            return Ok(Outcome::Win);
        }

        let mut changed = 0usize;
        for (&(row, col), &value) in observations {
            if let Some(cell) = value.as_cell() {
                if self.apply_observation(row, col, cell)? {
                    changed += 1;
                }
            }
        }
        log::trace!("refresh resolved {} cells", changed);
        Ok(self.outcome())
    }

    /// `Win` once no `Unknown` cell remains.
    pub fn outcome(&self) -> Outcome {
        if self.has_unknown() {
            Outcome::Continue
        } else {
            Outcome::Win
        }
    }
}

/// Diagnostic snapshot: one line per row, each cell symbol followed by a space.
impl fmt::Display for BoardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.cols()) {
            for cell in row {
                write!(f, "{} ", cell.symbol())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
