// Risk estimate for unknown cells when deduction has nothing certain to offer.
//
// Evidence from every informative clue around a cell is summed, not averaged,
// so cells shared by several clues count their overlap more than once. This is
// a ranking heuristic, not a joint probability.

use alloc::vec::Vec;

use rand::seq::IndexedRandom;
use rand::Rng;

use crate::board::BoardState;
use crate::common::{Cell, Coord};
use crate::deduce::surrounding;

/// Risk assigned to an unknown cell with no informative neighbour while some
/// other unknown cell does have one.
pub const NO_EVIDENCE: f64 = 1.0;

/// Per-cell mine likelihood, `None` for resolved cells.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbabilityGrid {
    rows: usize,
    cols: usize,
    values: Vec<Option<f64>>,
}

impl ProbabilityGrid {
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row < self.rows && col < self.cols {
            self.values[row * self.cols + col]
        } else {
            None
        }
    }

    /// Estimated cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Coord, f64)> + '_ {
        let cols = self.cols;
        self.values
            .iter()
            .enumerate()
            .filter_map(move |(i, v)| v.map(|p| ((i / cols, i % cols), p)))
    }

    /// Every cell attaining the minimum estimate. Empty when nothing is unknown.
    pub fn least_risky(&self) -> Vec<Coord> {
        let min = self.iter().map(|(_, p)| p).fold(f64::INFINITY, f64::min);
        self.iter()
            .filter(|&(_, p)| p == min)
            .map(|(coord, _)| coord)
            .collect()
    }
}

/// Summed evidence from the informative clues around one unknown cell.
fn local_estimate(board: &BoardState, row: usize, col: usize) -> Option<f64> {
    let mut bomb_count = 0i32;
    let mut unknown_count = 0usize;
    let mut informed = false;
    for (r, c) in board.neighbors(row, col) {
        if !matches!(board.get(r, c), Some(Cell::Revealed(n)) if n > 0) {
            continue;
        }
        if let Some(s) = surrounding(board, r, c) {
            informed = true;
            bomb_count += s.remaining;
            unknown_count += s.unknown.len();
        }
    }
    if !informed {
        return None;
    }
    if unknown_count == 0 {
        return Some(NO_EVIDENCE);
    }
    Some((f64::from(bomb_count) / unknown_count as f64).clamp(0.0, 1.0))
}

/// Estimate the mine likelihood of every unknown cell.
///
/// When no unknown cell touches a revealed clue above zero, every unknown cell
/// gets the global prior `total_mines / total_cells`.
pub fn estimate(board: &BoardState) -> ProbabilityGrid {
    let local: Vec<Option<Option<f64>>> = board
        .cells()
        .map(|((r, c), cell)| cell.is_unknown().then(|| local_estimate(board, r, c)))
        .collect();
    let any_informed = local.iter().any(|v| matches!(v, Some(Some(_))));
    let prior = board.total_mines() as f64 / board.config().cells() as f64;

    let values = local
        .into_iter()
        .map(|v| {
            v.map(|est| match est {
                Some(p) => p,
                None if any_informed => NO_EVIDENCE,
                None => prior,
            })
        })
        .collect();

    ProbabilityGrid {
        rows: board.rows(),
        cols: board.cols(),
        values,
    }
}

/// Pick uniformly among tied candidates.
pub fn choose_move<R: Rng + ?Sized>(candidates: &[Coord], rng: &mut R) -> Option<Coord> {
    candidates.choose(rng).copied()
}

/// Estimate, then pick one of the least risky cells.
pub fn estimate_and_choose<R: Rng + ?Sized>(
    board: &BoardState,
    rng: &mut R,
) -> Option<(Coord, f64)> {
    let grid = estimate(board);
    let coord = choose_move(&grid.least_risky(), rng)?;
    let p = grid.get(coord.0, coord.1)?;
    log::debug!("guessing ({}, {}) at risk {:.3}", coord.0, coord.1, p);
    Some((coord, p))
}
