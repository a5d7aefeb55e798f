//! Hidden-mine game used as an in-process board source.

use alloc::vec::Vec;

use rand::seq::index;
use rand::Rng;

use crate::common::{BoardError, Coord, ObservedValue, Outcome};
use crate::config::BoardConfig;

/// Result of revealing one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealResult {
    /// Already revealed, or the game is over.
    NoOp,
    /// Safe; carries the number of cells opened including flood fill.
    Opened(usize),
    HitMine,
}

/// Ground truth of one game.
///
/// Mines are laid on the first reveal and never under the first revealed cell.
#[derive(Debug, Clone)]
pub struct Minefield {
    config: BoardConfig,
    mines: Vec<bool>,
    revealed: Vec<bool>,
    placed: bool,
    remaining_safe: usize,
    status: Outcome,
}

impl Minefield {
    pub fn new(config: BoardConfig) -> Self {
        let cells = config.cells();
        Self {
            config,
            mines: alloc::vec![false; cells],
            revealed: alloc::vec![false; cells],
            placed: false,
            remaining_safe: cells - config.mines(),
            status: Outcome::Continue,
        }
    }

    /// Game with a fixed mine layout. The layout must hold exactly
    /// `config.mines()` distinct in-bounds cells.
    pub fn with_mines(config: BoardConfig, layout: &[Coord]) -> Result<Self, BoardError> {
        let mut field = Self::new(config);
        for &(row, col) in layout {
            let i = field.checked_index(row, col)?;
            if field.mines[i] {
                return Err(BoardError::InvalidConfig);
            }
            field.mines[i] = true;
        }
        if layout.len() != config.mines() {
            return Err(BoardError::InvalidConfig);
        }
        field.placed = true;
        Ok(field)
    }

    pub fn config(&self) -> BoardConfig {
        self.config
    }

    pub fn status(&self) -> Outcome {
        self.status
    }

    fn index(&self, row: usize, col: usize) -> Option<usize> {
        (row < self.config.rows() && col < self.config.cols())
            .then(|| row * self.config.cols() + col)
    }

    fn checked_index(&self, row: usize, col: usize) -> Result<usize, BoardError> {
        self.index(row, col).ok_or(BoardError::OutOfBounds { row, col })
    }

    fn neighbors(&self, row: usize, col: usize) -> impl Iterator<Item = usize> + '_ {
        let rows = row.saturating_sub(1)..=row + 1;
        rows.flat_map(move |r| (col.saturating_sub(1)..=col + 1).map(move |c| (r, c)))
            .filter(move |&rc| rc != (row, col))
            .filter_map(move |(r, c)| self.index(r, c))
    }

    pub fn is_mine(&self, row: usize, col: usize) -> bool {
        self.index(row, col).is_some_and(|i| self.mines[i])
    }

    /// Number of mines around `(row, col)`.
    pub fn adjacent_mines(&self, row: usize, col: usize) -> u8 {
        self.neighbors(row, col).filter(|&i| self.mines[i]).count() as u8
    }

    fn place_mines<R: Rng + ?Sized>(&mut self, rng: &mut R, safe: usize) {
        let cells = self.config.cells();
        for pick in index::sample(rng, cells - 1, self.config.mines()) {
            // skip over the protected cell
            let i = if pick >= safe { pick + 1 } else { pick };
            self.mines[i] = true;
        }
        self.placed = true;
    }

    /// Reveal a cell, flooding outward from zeros.
    pub fn reveal<R: Rng + ?Sized>(
        &mut self,
        row: usize,
        col: usize,
        rng: &mut R,
    ) -> Result<RevealResult, BoardError> {
        let start = self.checked_index(row, col)?;
        if self.status.is_terminal() || self.revealed[start] {
            return Ok(RevealResult::NoOp);
        }
        if !self.placed {
            self.place_mines(rng, start);
        }
        if self.mines[start] {
            self.revealed[start] = true;
            self.status = Outcome::Loss;
            return Ok(RevealResult::HitMine);
        }

        let cols = self.config.cols();
        let mut opened = 0;
        let mut stack = alloc::vec![start];
        while let Some(i) = stack.pop() {
            if self.revealed[i] {
                continue;
            }
            self.revealed[i] = true;
            opened += 1;
            let (r, c) = (i / cols, i % cols);
            if self.adjacent_mines(r, c) == 0 {
                stack.extend(self.neighbors(r, c).filter(|&n| !self.revealed[n] && !self.mines[n]));
            }
        }
        self.remaining_safe -= opened;
        if self.remaining_safe == 0 {
            self.status = Outcome::Win;
        }
        Ok(RevealResult::Opened(opened))
    }

    /// What a player would read off the cell, `None` for the hidden tile.
    pub fn observe(&self, row: usize, col: usize) -> Result<Option<ObservedValue>, BoardError> {
        let i = self.checked_index(row, col)?;
        let value = match (self.status, self.mines[i]) {
            (Outcome::Loss, true) => Some(ObservedValue::Mine),
            (Outcome::Win, true) => Some(ObservedValue::GameWon),
            _ if self.revealed[i] => Some(ObservedValue::Empty(self.adjacent_mines(row, col))),
            _ => None,
        };
        Ok(value)
    }
}
