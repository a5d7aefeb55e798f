use sweeper::{
    BoardConfig, BoardError, BoardState, Cell, GameLevel, ObservedValue, Observations, Outcome,
    SessionConfig,
};

fn board(rows: usize, cols: usize, mines: usize) -> BoardState {
    BoardState::new(BoardConfig::new(rows, cols, mines).unwrap())
}

#[test]
fn test_new_board_is_all_unknown() {
    let board = BoardState::new(GameLevel::Beginner.board_config());
    assert_eq!(board.unknown_cells().len(), 64);
    assert_eq!(board.flagged(), 0);
    assert_eq!(board.total_mines(), 10);
    assert_eq!(board.outcome(), Outcome::Continue);
}

#[test]
fn test_config_validation() {
    assert_eq!(BoardConfig::new(0, 8, 1).unwrap_err(), BoardError::InvalidConfig);
    assert_eq!(BoardConfig::new(8, 0, 1).unwrap_err(), BoardError::InvalidConfig);
    assert_eq!(BoardConfig::new(8, 8, 0).unwrap_err(), BoardError::InvalidConfig);
    assert_eq!(BoardConfig::new(8, 8, 64).unwrap_err(), BoardError::InvalidConfig);
    assert!(BoardConfig::new(8, 8, 63).is_ok());
}

#[test]
fn test_deserialized_config_is_validated() {
    for bad in [
        r#"{"rows":0,"cols":0,"mines":5}"#,
        r#"{"rows":8,"cols":8,"mines":0}"#,
        r#"{"rows":3,"cols":3,"mines":9}"#,
    ] {
        assert!(serde_json::from_str::<BoardConfig>(bad).is_err(), "{bad}");
    }

    let config: BoardConfig = serde_json::from_str(r#"{"rows":16,"cols":30,"mines":99}"#).unwrap();
    assert_eq!(config, GameLevel::Expert.board_config());
    let text = serde_json::to_string(&config).unwrap();
    assert_eq!(serde_json::from_str::<BoardConfig>(&text).unwrap(), config);

    let mut session = serde_json::to_value(SessionConfig::default()).unwrap();
    session["board"]["cols"] = 0.into();
    assert!(serde_json::from_value::<SessionConfig>(session).is_err());
}

#[test]
fn test_level_presets() {
    let expert = GameLevel::Expert.board_config();
    assert_eq!((expert.rows(), expert.cols(), expert.mines()), (16, 30, 99));
    let easy = GameLevel::Easy.board_config();
    assert_eq!((easy.rows(), easy.cols(), easy.mines()), (12, 12, 22));
    assert_eq!(GameLevel::Beginner.board_config().opening_cell(), (3, 3));
    assert_eq!(expert.opening_cell(), (7, 14));
}

#[test]
fn test_neighbors_are_clipped_and_ordered() {
    let board = board(3, 3, 1);
    assert_eq!(board.neighbors(0, 0), vec![(0, 1), (1, 0), (1, 1)]);
    assert_eq!(
        board.neighbors(1, 1),
        vec![(0, 0), (0, 1), (0, 2), (1, 0), (1, 2), (2, 0), (2, 1), (2, 2)]
    );
    assert_eq!(board.neighbors(2, 1).len(), 5);
}

#[test]
fn test_mark_mine_only_from_unknown() {
    let mut board = board(3, 3, 2);
    board.mark_mine(1, 1).unwrap();
    assert_eq!(board.get(1, 1), Some(Cell::FlaggedMine));
    assert_eq!(board.flagged(), 1);
    assert_eq!(
        board.mark_mine(1, 1).unwrap_err(),
        BoardError::InvalidTransition { row: 1, col: 1 }
    );
    board.apply_observation(0, 0, Cell::Revealed(1)).unwrap();
    assert_eq!(
        board.mark_mine(0, 0).unwrap_err(),
        BoardError::InvalidTransition { row: 0, col: 0 }
    );
    assert_eq!(board.flagged(), 1);
    assert_eq!(
        board.mark_mine(3, 0).unwrap_err(),
        BoardError::OutOfBounds { row: 3, col: 0 }
    );
}

#[test]
fn test_reobserving_resolved_cell_is_noop() {
    let mut board = board(4, 4, 3);
    assert!(board.apply_observation(2, 2, Cell::Revealed(3)).unwrap());
    assert!(!board.apply_observation(2, 2, Cell::Revealed(5)).unwrap());
    assert_eq!(board.get(2, 2), Some(Cell::Revealed(3)));

    board.mark_mine(0, 0).unwrap();
    assert!(!board.apply_observation(0, 0, Cell::Revealed(1)).unwrap());
    assert_eq!(board.get(0, 0), Some(Cell::FlaggedMine));
}

#[test]
fn test_observation_validation() {
    let mut board = board(2, 2, 1);
    assert_eq!(
        board.apply_observation(0, 0, Cell::Revealed(9)).unwrap_err(),
        BoardError::InvalidClue(9)
    );
    assert_eq!(
        board.apply_observation(2, 0, Cell::Revealed(1)).unwrap_err(),
        BoardError::OutOfBounds { row: 2, col: 0 }
    );
    assert!(board.apply_observation(0, 1, Cell::FlaggedMine).unwrap());
    assert_eq!(board.flagged(), 1);
}

#[test]
fn test_refresh_applies_cells() {
    let mut board = board(2, 2, 1);
    let mut obs = Observations::new();
    obs.insert((0, 0), ObservedValue::Empty(1));
    obs.insert((0, 1), ObservedValue::Empty(1));
    obs.insert((1, 1), ObservedValue::Flag);
    assert_eq!(board.apply_refresh(&obs).unwrap(), Outcome::Continue);
    assert_eq!(board.get(0, 0), Some(Cell::Revealed(1)));
    assert_eq!(board.get(1, 1), Some(Cell::FlaggedMine));
    assert_eq!(board.flagged(), 1);
    assert_eq!(board.unknown_cells().into_iter().collect::<Vec<_>>(), vec![(1, 0)]);

    let mut last = Observations::new();
    last.insert((1, 0), ObservedValue::Empty(1));
    assert_eq!(board.apply_refresh(&last).unwrap(), Outcome::Win);
}

#[test]
fn test_malformed_refresh_is_discarded() {
    let mut board = board(2, 2, 1);
    let mut obs = Observations::new();
    obs.insert((0, 0), ObservedValue::Empty(1));
    obs.insert((5, 5), ObservedValue::Empty(1));
    assert_eq!(
        board.apply_refresh(&obs).unwrap_err(),
        BoardError::RefreshFailure { row: 5, col: 5 }
    );
    assert_eq!(board.get(0, 0), Some(Cell::Unknown));

    let mut bad_clue = Observations::new();
    bad_clue.insert((0, 0), ObservedValue::Empty(1));
    bad_clue.insert((1, 1), ObservedValue::Empty(9));
    assert_eq!(
        board.apply_refresh(&bad_clue).unwrap_err(),
        BoardError::RefreshFailure { row: 1, col: 1 }
    );
    assert_eq!(board.unknown_cells().len(), 4);
}

#[test]
fn test_terminal_signals_short_circuit() {
    let mut board = board(3, 3, 1);
    let mut lost = Observations::new();
    lost.insert((0, 0), ObservedValue::Empty(0));
    lost.insert((2, 2), ObservedValue::Mine);
    assert_eq!(board.apply_refresh(&lost).unwrap(), Outcome::Loss);
    assert_eq!(board.get(0, 0), Some(Cell::Unknown));

    let mut game_lost = Observations::new();
    game_lost.insert((1, 1), ObservedValue::GameLost);
    game_lost.insert((0, 1), ObservedValue::GameWon);
    assert_eq!(board.apply_refresh(&game_lost).unwrap(), Outcome::Loss);

    let mut won = Observations::new();
    won.insert((0, 0), ObservedValue::Empty(0));
    won.insert((2, 2), ObservedValue::GameWon);
    assert_eq!(board.apply_refresh(&won).unwrap(), Outcome::Win);
    assert_eq!(board.unknown_cells().len(), 9);
}

#[test]
fn test_snapshot_format() {
    let mut board = board(2, 3, 1);
    board.apply_observation(0, 0, Cell::Revealed(1)).unwrap();
    board.apply_observation(0, 1, Cell::Revealed(0)).unwrap();
    board.mark_mine(1, 0).unwrap();
    board.apply_observation(1, 1, Cell::Revealed(2)).unwrap();
    assert_eq!(board.to_string(), "1   E \nX 2 E \n");
}
