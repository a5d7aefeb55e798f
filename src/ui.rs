#![cfg(feature = "std")]

use crate::board::BoardState;
use crate::common::Cell;
use crate::probability::ProbabilityGrid;

fn print_header(cols: usize, width: usize) {
    std::print!("   ");
    for c in 0..cols {
        std::print!(" {:>width$}", c, width = width);
    }
    std::println!();
}

/// Print the board as the solver currently sees it.
pub fn print_board(board: &BoardState) {
    print_header(board.cols(), 2);
    for r in 0..board.rows() {
        std::print!("{:2} ", r);
        for c in 0..board.cols() {
            let sym = match board.get(r, c) {
                Some(Cell::Unknown) => '.',
                Some(Cell::Revealed(0)) => ' ',
                Some(cell) => cell.symbol(),
                None => '?',
            };
            std::print!(" {:>2}", sym);
        }
        std::println!();
    }
    std::println!(
        "{} of {} mines flagged",
        board.flagged(),
        board.total_mines()
    );
}

/// Print the estimated mine likelihood of every unknown cell.
pub fn print_probability_board(grid: &ProbabilityGrid) {
    std::println!("\nMine likelihood:");
    print_header(grid.cols(), 4);
    for r in 0..grid.rows() {
        std::print!("{:2} ", r);
        for c in 0..grid.cols() {
            match grid.get(r, c) {
                Some(p) => std::print!(" {:4.2}", p),
                None => std::print!("    -"),
            }
        }
        std::println!();
    }
}
