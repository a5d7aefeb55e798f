use rand::rngs::SmallRng;
use rand::SeedableRng;
use sweeper::{
    choose_move, estimate, estimate_and_choose, BoardConfig, BoardState, Cell, GameLevel,
};

fn row_board(clues: &[Option<u8>], mines: usize) -> BoardState {
    let mut board = BoardState::new(BoardConfig::new(1, clues.len(), mines).unwrap());
    for (c, clue) in clues.iter().enumerate() {
        if let Some(n) = clue {
            board.apply_observation(0, c, Cell::Revealed(*n)).unwrap();
        }
    }
    board
}

#[test]
fn test_prior_when_nothing_is_informative() {
    let board = BoardState::new(GameLevel::Beginner.board_config());
    let grid = estimate(&board);
    let prior = 10.0 / 64.0;
    assert_eq!(grid.iter().count(), 64);
    assert!(grid.iter().all(|(_, p)| p == prior));
    assert_eq!(grid.least_risky().len(), 64);
}

#[test]
fn test_zero_clues_alone_keep_the_prior() {
    let mut board = BoardState::new(BoardConfig::new(4, 4, 2).unwrap());
    board.apply_observation(0, 0, Cell::Revealed(0)).unwrap();
    let grid = estimate(&board);
    assert_eq!(grid.get(0, 0), None);
    assert_eq!(grid.get(3, 3), Some(2.0 / 16.0));
    assert_eq!(grid.least_risky().len(), 15);
}

#[test]
fn test_single_clue_spreads_over_its_unknowns() {
    let mut board = BoardState::new(BoardConfig::new(3, 3, 1).unwrap());
    board.apply_observation(1, 1, Cell::Revealed(1)).unwrap();
    let grid = estimate(&board);
    assert_eq!(grid.get(1, 1), None);
    assert_eq!(grid.get(0, 0), Some(0.125));
    assert_eq!(grid.least_risky().len(), 8);
}

#[test]
fn test_cells_away_from_clues_are_avoided() {
    let board = row_board(&[None, None, Some(1), None, None, None], 1);
    let grid = estimate(&board);
    assert_eq!(grid.get(0, 1), Some(0.5));
    assert_eq!(grid.get(0, 3), Some(0.5));
    assert_eq!(grid.get(0, 0), Some(1.0));
    assert_eq!(grid.get(0, 5), Some(1.0));
    assert_eq!(grid.least_risky(), vec![(0, 1), (0, 3)]);
}

#[test]
fn test_evidence_is_summed_across_clues() {
    let board = row_board(&[None, Some(1), None, Some(1), None], 2);
    let grid = estimate(&board);
    // (0,2) sees both clues: (1 + 1) / (2 + 2)
    assert_eq!(grid.get(0, 2), Some(0.5));
    assert_eq!(grid.get(0, 0), Some(0.5));
}

#[test]
fn test_flags_reduce_remaining_risk() {
    let mut board = row_board(&[None, Some(1), None], 1);
    board.mark_mine(0, 0).unwrap();
    let grid = estimate(&board);
    assert_eq!(grid.get(0, 0), None);
    assert_eq!(grid.get(0, 2), Some(0.0));
    assert_eq!(grid.least_risky(), vec![(0, 2)]);
}

#[test]
fn test_overcounted_clue_clamps_to_zero() {
    let mut board = BoardState::new(BoardConfig::new(2, 3, 3).unwrap());
    board.apply_observation(0, 1, Cell::Revealed(1)).unwrap();
    board.mark_mine(0, 0).unwrap();
    board.mark_mine(0, 2).unwrap();
    let grid = estimate(&board);
    for c in 0..3 {
        assert_eq!(grid.get(1, c), Some(0.0));
    }
}

#[test]
fn test_resolved_board_yields_no_candidates() {
    let mut board = row_board(&[Some(1), None], 1);
    board.mark_mine(0, 1).unwrap();
    let grid = estimate(&board);
    assert!(grid.least_risky().is_empty());
    let mut rng = SmallRng::seed_from_u64(1);
    assert!(estimate_and_choose(&board, &mut rng).is_none());
    assert!(choose_move(&[], &mut rng).is_none());
}

#[test]
fn test_choice_is_among_ties() {
    let mut board = BoardState::new(BoardConfig::new(3, 3, 1).unwrap());
    board.apply_observation(1, 1, Cell::Revealed(1)).unwrap();
    let mut rng = SmallRng::seed_from_u64(7);
    for _ in 0..20 {
        let ((r, c), p) = estimate_and_choose(&board, &mut rng).unwrap();
        assert_ne!((r, c), (1, 1));
        assert_eq!(p, 0.125);
    }
}
