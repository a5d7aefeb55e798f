// Local single-constraint deduction over a board.
//
// Each revealed clue is examined on its own: there is no combination of
// overlapping constraints and no iteration to a fixed point. One row-major
// pass is made per call; mines flagged early in the pass are already visible
// to clues examined later in the same pass.

use alloc::collections::BTreeSet;
use alloc::vec::Vec;

use crate::board::BoardState;
use crate::common::{Cell, Coord};

/// Local view of a clue cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Surrounding {
    /// Clue minus the already flagged neighbours. Negative on a contradiction.
    pub remaining: i32,
    /// Neighbours still `Unknown`.
    pub unknown: Vec<Coord>,
}

/// Result of one deduction pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Deduction {
    /// Cells proven safe to reveal.
    pub safe: BTreeSet<Coord>,
    /// Cells flagged as mines during this pass, in the order they were marked.
    pub mines: Vec<Coord>,
}

impl Deduction {
    pub fn is_empty(&self) -> bool {
        self.safe.is_empty() && self.mines.is_empty()
    }
}

/// Remaining mine count and unknown neighbours of the clue at `(row, col)`.
///
/// Returns `None` unless the cell is revealed.
pub fn surrounding(board: &BoardState, row: usize, col: usize) -> Option<Surrounding> {
    let clue = board.get(row, col)?.clue()?;
    let mut remaining = i32::from(clue);
    let mut unknown = Vec::new();
    for (r, c) in board.neighbors(row, col) {
        match board.get(r, c) {
            Some(Cell::Unknown) => unknown.push((r, c)),
            Some(Cell::FlaggedMine) => remaining -= 1,
            _ => {}
        }
    }
    Some(Surrounding { remaining, unknown })
}

/// Run the saturation and zero rules once over every revealed cell.
///
/// Saturated clues flag their unknown neighbours on `board` immediately.
/// Contradictions (more flags than the clue allows) are skipped silently.
pub fn deduce(board: &mut BoardState) -> Deduction {
    let mut out = Deduction::default();
    for row in 0..board.rows() {
        for col in 0..board.cols() {
            let Some(Surrounding { remaining, unknown }) = surrounding(board, row, col) else {
                continue;
            };
            if unknown.is_empty() {
                continue;
            }
            if remaining > 0 && remaining as usize == unknown.len() {
                for (r, c) in unknown {
                    match board.mark_mine(r, c) {
                        Ok(()) => out.mines.push((r, c)),
                        Err(e) => log::warn!("saturation at ({}, {}): {}", row, col, e),
                    }
                }
            } else if remaining == 0 {
                out.safe.extend(unknown);
            }
        }
    }
    // a cell found safe early may have been flagged by a contradicting clue later on
    out.safe
        .retain(|&(r, c)| board.get(r, c).is_some_and(Cell::is_unknown));
    if !out.is_empty() {
        log::debug!(
            "deduction: {} safe, {} mines flagged",
            out.safe.len(),
            out.mines.len()
        );
    }
    out
}
