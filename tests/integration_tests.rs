//! Integration tests for the board state machine and undo

use std::collections::VecDeque;

use tui_undo_tetris::core::{Board, GameConfig, Grid, MoveOutcome, Piece, Position};
use tui_undo_tetris::input::CommandSource;
use tui_undo_tetris::types::{Command, Direction};

/// Everything undo promises to restore
#[derive(Debug, Clone, PartialEq, Eq)]
struct Observed {
    grid: Grid,
    piece: Piece,
    position: Position,
    score: u32,
    lines: u32,
}

fn observe(board: &Board) -> Observed {
    Observed {
        grid: board.grid().clone(),
        piece: *board.active(),
        position: board.position(),
        score: board.score(),
        lines: board.lines(),
    }
}

fn spawn_x(board: &Board) -> i32 {
    board.grid().width() as i32 / 2 - board.active().width() as i32 / 2
}

#[test]
fn test_game_starts_with_centered_piece() {
    let board = Board::new(GameConfig::default().with_seed(12345));
    assert_eq!(board.position(), Position::new(spawn_x(&board), 0));
    assert_eq!(board.score(), 0);
    assert_eq!(board.lines(), 0);
    assert_eq!(board.level(), 1);
    assert!(!board.game_over());
}

#[test]
fn test_soft_drop_to_bottom_locks_and_respawns() {
    let mut board = Board::new(GameConfig::default().with_seed(12345));
    let first = board.active().kind();
    let height = board.active().height() as i32;

    let mut moves = 0;
    while board.move_piece(Direction::Down) == MoveOutcome::Moved {
        moves += 1;
    }
    assert_eq!(moves, 20 - height);

    assert_eq!(board.lines(), 0);
    assert_eq!(board.score(), 0);
    assert!(!board.game_over());
    assert_eq!(board.position(), Position::new(spawn_x(&board), 0));

    let locked = board
        .grid()
        .cells()
        .iter()
        .filter(|c| **c == Some(first))
        .count();
    assert_eq!(locked, 4);
}

#[test]
fn test_undo_after_each_single_action() {
    let mut board = Board::new(GameConfig::default().with_seed(7));
    let actions = [
        Command::Left,
        Command::Rotate,
        Command::Right,
        Command::SoftDown,
        Command::Rotate,
    ];

    for command in actions {
        let before = observe(&board);
        board.apply(command);
        assert!(board.undo(), "{:?} should leave a snapshot", command);
        assert_eq!(observe(&board), before, "undo after {:?}", command);
        // replay so the next action starts from a moved state
        board.apply(command);
    }
}

#[test]
fn test_undo_after_blocked_down_lock() {
    let mut board = Board::new(GameConfig::default().with_seed(3));
    let first = *board.active();
    while board.move_piece(Direction::Down) == MoveOutcome::Moved {}
    assert_ne!(board.grid(), &Grid::new(10, 20));

    // the lock snapshot holds the piece resting on the floor, not yet placed
    assert!(board.undo());
    assert_eq!(*board.active(), first);
    assert_eq!(board.position().y, 20 - first.height() as i32);
    assert!(board.grid().cells().iter().all(|c| c.is_none()));
}

#[test]
fn test_hard_drop_takes_two_undos() {
    let mut board = Board::new(GameConfig::default().with_seed(99));
    let before = observe(&board);
    board.hard_drop();

    assert!(board.undo());
    assert_ne!(observe(&board), before, "first undo only reverts the lock");
    assert!(board.undo());
    assert_eq!(observe(&board), before);
}

#[test]
fn test_undo_drains_back_to_initial_spawn() {
    let mut board = Board::new(GameConfig::default().with_seed(2));
    let initial = observe(&board);

    for command in [
        Command::Left,
        Command::HardDrop,
        Command::Rotate,
        Command::Right,
        Command::Right,
        Command::HardDrop,
        Command::SoftDown,
    ] {
        board.apply(command);
    }
    assert!(board.history_len() >= 7);

    while board.undo() {}
    assert_eq!(board.history_len(), 0);
    assert_eq!(observe(&board), initial);
}

#[test]
fn test_undo_with_empty_history_is_noop() {
    let mut board = Board::new(GameConfig::default());
    let before = observe(&board);
    assert!(!board.undo());
    assert_eq!(observe(&board), before);
}

#[test]
fn test_stacking_in_one_column_ends_game() {
    let mut board = Board::new(GameConfig::default().with_seed(5));
    let mut drops = 0;
    while !board.game_over() {
        board.hard_drop();
        drops += 1;
        assert!(drops < 200, "game never ended");
    }

    let after = observe(&board);
    // a finished game ignores play commands
    board.apply(Command::Left);
    board.apply(Command::HardDrop);
    board.update(60_000);
    assert_eq!(observe(&board), after);

    // undo still steps back but cannot revive the game
    assert!(board.undo());
    assert!(board.game_over());
}

#[test]
fn test_gravity_moves_piece_once_per_interval() {
    let config = GameConfig {
        drop_interval_ms: 100,
        ..GameConfig::default()
    };
    let mut board = Board::new(config);
    assert_eq!(board.drop_interval_ms(), 100);

    for frame in 1..=10 {
        board.update(50);
        assert_eq!(board.position().y, frame / 2);
    }
}

#[test]
fn test_gravity_lock_restarts_timer() {
    let config = GameConfig {
        drop_interval_ms: 10,
        ..GameConfig::default()
    };
    let mut board = Board::new(config);
    let mut ticks = 0;
    while board.grid().cells().iter().all(|c| c.is_none()) {
        board.update(10);
        ticks += 1;
        assert!(ticks <= 21, "piece never locked");
    }
    // after the lock the new piece waits a full interval again
    assert_eq!(board.position().y, 0);
    board.update(9);
    assert_eq!(board.position().y, 0);
    board.update(1);
    assert_eq!(board.position().y, 1);
}

#[test]
fn test_scripted_session_through_command_source() {
    let mut board = Board::new(GameConfig::default().with_seed(11));
    let mut script: VecDeque<Command> = [
        Command::Left,
        Command::Left,
        Command::Undo,
        Command::HardDrop,
        Command::Quit,
        Command::Right,
    ]
    .into_iter()
    .collect();

    let start = board.position();
    let mut frames = 0;
    while let Some(command) = script.poll_command().unwrap() {
        frames += 1;
        if command == Command::Quit {
            break;
        }
        board.apply(command);
        if frames == 3 {
            assert_eq!(board.position(), Position::new(start.x - 1, 0));
        }
    }

    assert_eq!(frames, 5);
    assert_eq!(script.len(), 1);
    assert_eq!(board.grid().cells().iter().filter(|c| c.is_some()).count(), 4);
}
