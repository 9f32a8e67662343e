//! Board module - the game orchestrator
//!
//! Ties together the grid, the active piece, the piece source and the undo
//! history. Every state-changing action records a snapshot first, so undo can
//! always step back one action at a time.
//!
//! Life of a piece: spawned at the top centre, moved/rotated while falling,
//! locked into the grid when it cannot move down (or on hard drop). Locking
//! clears full rows, scores them and spawns the next piece, unless the lock
//! happened at the spawn row, which ends the game.

use log::{debug, info, trace};

use crate::config::GameConfig;
use crate::grid::Grid;
use crate::history::{History, Snapshot};
use crate::piece::{Piece, Position};
use crate::rng::PieceSource;
use crate::scoring::line_clear_score;
use crate::types::{Command, Direction, PieceKind, START_LEVEL};
use crate::view::BoardView;

/// Result of a one-cell move attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The piece moved
    Moved,
    /// The target was occupied or out of bounds; nothing changed
    Blocked,
    /// A blocked downward move locked the piece into the grid
    Locked,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct Board {
    grid: Grid,
    active: Piece,
    position: Position,
    source: PieceSource,
    history: History,
    score: u32,
    level: u32,
    lines: u32,
    /// Once set, stays set
    game_over: bool,
    drop_interval_ms: u32,
    /// Time accumulated since the last gravity step
    drop_timer_ms: u32,
}

impl Board {
    /// Create a new game and spawn its first piece.
    ///
    /// The config is expected to have passed [`GameConfig::validate`]; debug
    /// builds panic on one that does not.
    pub fn new(config: GameConfig) -> Self {
        debug_assert!(
            config.validate().is_ok(),
            "invalid game config: {:?}",
            config
        );
        let mut source = PieceSource::new(config.seed);
        let active = source.next();

        let mut board = Self {
            grid: Grid::new(config.width, config.height),
            active,
            position: Position::default(),
            source,
            history: History::new(),
            score: 0,
            level: START_LEVEL,
            lines: 0,
            game_over: false,
            drop_interval_ms: config.drop_interval_ms,
            drop_timer_ms: 0,
        };
        board.enter_spawn(active);
        board
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn active(&self) -> &Piece {
        &self.active
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    /// Kind of the piece that spawns after the active one
    pub fn next_kind(&self) -> PieceKind {
        self.source.peek()
    }

    /// Number of snapshots undo can still step back through
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn drop_interval_ms(&self) -> u32 {
        self.drop_interval_ms
    }

    /// Read-only projection for renderers
    pub fn view(&self) -> BoardView<'_> {
        BoardView {
            grid: &self.grid,
            piece: &self.active,
            position: self.position,
            score: self.score,
            lines: self.lines,
            level: self.level,
            game_over: self.game_over,
            next: self.next_kind(),
        }
    }

    /// Apply a player command. `Quit` belongs to the control loop and is ignored.
    pub fn apply(&mut self, command: Command) {
        if let Some(direction) = command.direction() {
            self.move_piece(direction);
            return;
        }
        match command {
            Command::Rotate => {
                self.rotate();
            }
            Command::HardDrop => {
                self.hard_drop();
            }
            Command::Undo => {
                self.undo();
            }
            Command::Left | Command::Right | Command::SoftDown | Command::Quit => {}
        }
    }

    /// Move the active piece one cell.
    ///
    /// A blocked downward move locks the piece instead.
    pub fn move_piece(&mut self, direction: Direction) -> MoveOutcome {
        if self.game_over {
            return MoveOutcome::Blocked;
        }

        let candidate = self.position.translated(direction);
        if self.grid.is_valid_position(&self.active, candidate) {
            self.save_state();
            self.position = candidate;
            MoveOutcome::Moved
        } else if direction == Direction::Down {
            self.lock();
            MoveOutcome::Locked
        } else {
            MoveOutcome::Blocked
        }
    }

    /// Rotate the active piece clockwise in place.
    ///
    /// The attempt is always recorded in history; a rotation that does not fit
    /// restores the previous shape. Returns whether the rotation stuck.
    pub fn rotate(&mut self) -> bool {
        if self.game_over {
            return false;
        }

        self.save_state();
        let before = self.active;
        self.active.rotate();
        if self.grid.is_valid_position(&self.active, self.position) {
            true
        } else {
            self.active = before;
            false
        }
    }

    /// Drop the active piece as far as it goes and lock it.
    ///
    /// Returns the number of rows the piece fell.
    pub fn hard_drop(&mut self) -> u32 {
        if self.game_over {
            return 0;
        }

        self.save_state();
        let mut rows = 0;
        loop {
            let below = self.position.translated(Direction::Down);
            if !self.grid.is_valid_position(&self.active, below) {
                break;
            }
            self.position = below;
            rows += 1;
        }
        self.lock();
        rows
    }

    /// Advance gravity by `elapsed_ms`.
    ///
    /// Once a full drop interval has accumulated the piece moves down one
    /// cell (locking if blocked) and the timer restarts.
    pub fn update(&mut self, elapsed_ms: u32) {
        if self.game_over {
            return;
        }

        self.drop_timer_ms = self.drop_timer_ms.saturating_add(elapsed_ms);
        if self.drop_timer_ms >= self.drop_interval_ms {
            self.move_piece(Direction::Down);
            self.drop_timer_ms = 0;
        }
    }

    /// Restore the most recent snapshot.
    ///
    /// Returns false when there is nothing to undo. The game-over flag is not
    /// part of a snapshot, so a finished game stays finished.
    pub fn undo(&mut self) -> bool {
        let Some(snapshot) = self.history.pop() else {
            return false;
        };

        self.grid = snapshot.grid;
        self.active = snapshot.piece;
        self.position = snapshot.position;
        self.score = snapshot.score;
        self.lines = snapshot.lines;
        trace!("undo, {} snapshots left", self.history.len());
        true
    }

    fn save_state(&mut self) {
        self.history.push(Snapshot {
            grid: self.grid.clone(),
            piece: self.active,
            position: self.position,
            score: self.score,
            lines: self.lines,
        });
    }

    /// Write the active piece into the grid, clear rows, spawn the next piece
    fn lock(&mut self) {
        self.save_state();

        if self.grid.place(&self.active, self.position) {
            self.game_over = true;
            info!(
                "game over: {:?} locked at row {}, score {}, lines {}",
                self.active.kind(),
                self.position.y,
                self.score,
                self.lines
            );
            return;
        }

        let cleared = self.grid.clear_full_rows();
        if cleared > 0 {
            let points = line_clear_score(cleared, self.level);
            self.score = self.score.saturating_add(points);
            self.lines += cleared;
            debug!("cleared {} rows for {} points", cleared, points);
        }

        self.spawn();
        self.drop_timer_ms = 0;
    }

    /// Draw the next piece and put it at the top centre
    fn spawn(&mut self) {
        let piece = self.source.next();
        self.enter_spawn(piece);
    }

    fn enter_spawn(&mut self, piece: Piece) {
        let x = self.grid.width() as i32 / 2 - piece.width() as i32 / 2;
        self.active = piece;
        self.position = Position::new(x, 0);
        trace!("spawned {:?} at {:?}", piece.kind(), self.position);

        if !self.grid.is_valid_position(&self.active, self.position) {
            self.game_over = true;
            info!("game over: no room to spawn {:?}", piece.kind());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board() -> Board {
        Board::new(GameConfig::default())
    }

    fn with_piece(board: &mut Board, kind: PieceKind, x: i32, y: i32) {
        board.active = Piece::new(kind);
        board.position = Position::new(x, y);
    }

    #[test]
    fn test_first_piece_spawns_top_centre() {
        let board = board();
        let expected_x = 5 - board.active().width() as i32 / 2;
        assert_eq!(board.position(), Position::new(expected_x, 0));
        assert_eq!(board.score(), 0);
        assert_eq!(board.level(), 1);
        assert_eq!(board.history_len(), 0);
        assert!(!board.game_over());
    }

    #[test]
    fn test_move_records_history() {
        let mut board = board();
        let start = board.position();
        assert_eq!(board.move_piece(Direction::Left), MoveOutcome::Moved);
        assert_eq!(board.position(), Position::new(start.x - 1, 0));
        assert_eq!(board.history_len(), 1);
    }

    #[test]
    fn test_blocked_side_move_changes_nothing() {
        let mut board = board();
        with_piece(&mut board, PieceKind::O, 0, 5);
        assert_eq!(board.move_piece(Direction::Left), MoveOutcome::Blocked);
        assert_eq!(board.position(), Position::new(0, 5));
        assert_eq!(board.history_len(), 0);
    }

    #[test]
    fn test_blocked_down_locks() {
        let mut board = board();
        with_piece(&mut board, PieceKind::O, 0, 18);
        assert_eq!(board.move_piece(Direction::Down), MoveOutcome::Locked);

        assert_eq!(board.grid().get(0, 18), Some(Some(PieceKind::O)));
        assert_eq!(board.grid().get(1, 19), Some(Some(PieceKind::O)));
        assert_eq!(board.position().y, 0);
        assert_eq!(board.history_len(), 1);
        assert!(!board.game_over());
    }

    #[test]
    fn test_failed_rotation_reverts_but_is_recorded() {
        let mut board = board();
        // Horizontal I on the floor: turning it vertical would poke through.
        with_piece(&mut board, PieceKind::I, 0, 19);
        assert!(!board.rotate());
        assert_eq!(*board.active(), Piece::new(PieceKind::I));
        assert_eq!(board.position(), Position::new(0, 19));
        assert_eq!(board.history_len(), 1);
    }

    #[test]
    fn test_rotation_may_overhang_top() {
        let mut board = board();
        with_piece(&mut board, PieceKind::I, 3, -2);
        assert!(board.rotate());
        assert_eq!(board.active().height(), 4);
    }

    #[test]
    fn test_hard_drop_lands_on_floor() {
        let mut board = board();
        with_piece(&mut board, PieceKind::O, 4, 0);
        assert_eq!(board.hard_drop(), 18);

        assert_eq!(board.grid().get(4, 18), Some(Some(PieceKind::O)));
        assert_eq!(board.grid().get(5, 19), Some(Some(PieceKind::O)));
        // one snapshot for the drop, one for the lock
        assert_eq!(board.history_len(), 2);
        assert_eq!(board.score(), 0);
    }

    #[test]
    fn test_double_clear_scores_300() {
        let mut board = board();
        for y in [18, 19] {
            board.grid.fill_row(y, PieceKind::Z);
            board.grid.set(4, y, None);
            board.grid.set(5, y, None);
        }
        with_piece(&mut board, PieceKind::O, 4, 0);
        board.hard_drop();

        assert_eq!(board.lines(), 2);
        assert_eq!(board.score(), 300);
        assert!(board.grid().cells().iter().all(|c| c.is_none()));
    }

    #[test]
    fn test_clearing_rows_two_and_three_scores_300() {
        let mut board = board();
        for y in [2, 3] {
            board.grid.fill_row(y, PieceKind::J);
            board.grid.set(4, y, None);
            board.grid.set(5, y, None);
        }
        // ledge under the gap, not a full row itself
        board.grid.fill_row(4, PieceKind::T);
        board.grid.set(0, 4, None);
        with_piece(&mut board, PieceKind::O, 4, 0);

        assert_eq!(board.hard_drop(), 2);
        assert_eq!((board.lines(), board.score()), (2, 300));
        assert!(!board.game_over());
        // rows above collapse onto the ledge, which stays put
        for y in 0..4 {
            assert!(board.grid().row(y).iter().all(|c| c.is_none()), "row {}", y);
        }
        assert_eq!(board.grid().get(0, 4), Some(None));
        assert_eq!(board.grid().get(1, 4), Some(Some(PieceKind::T)));
    }

    #[test]
    fn test_tetris_scores_800() {
        let mut board = board();
        for y in 16..20 {
            board.grid.fill_row(y, PieceKind::L);
            board.grid.set(9, y, None);
        }
        with_piece(&mut board, PieceKind::I, 6, 0);
        assert!(board.rotate());
        // vertical I sits in column 6 after rotation; walk it to the well
        for _ in 0..3 {
            assert_eq!(board.move_piece(Direction::Right), MoveOutcome::Moved);
        }
        board.hard_drop();

        assert_eq!(board.lines(), 4);
        assert_eq!(board.score(), 800);
    }

    #[test]
    fn test_undo_restores_previous_state() {
        let mut board = board();
        let before = (board.grid().clone(), *board.active(), board.position());
        board.move_piece(Direction::Right);
        board.rotate();

        assert!(board.undo());
        assert!(board.undo());
        assert_eq!(
            (board.grid().clone(), *board.active(), board.position()),
            before
        );
        assert!(!board.undo());
    }

    #[test]
    fn test_undo_after_clear_restores_score_and_rows() {
        let mut board = board();
        board.grid.fill_row(19, PieceKind::T);
        board.grid.set(0, 19, None);
        with_piece(&mut board, PieceKind::I, 0, 0);
        assert!(board.rotate());
        board.hard_drop();
        assert_eq!((board.score(), board.lines()), (100, 1));

        // lock snapshot: piece resting in the well, row not yet cleared
        assert!(board.undo());
        assert_eq!((board.score(), board.lines()), (0, 0));
        assert_eq!(board.grid().get(0, 19), Some(None));
        assert_eq!(board.grid().get(5, 19), Some(Some(PieceKind::T)));
        assert_eq!(board.active().kind(), PieceKind::I);
        assert_eq!(board.position(), Position::new(0, 16));
    }

    #[test]
    fn test_lock_at_spawn_row_ends_game() {
        let mut board = board();
        board.grid.fill_row(1, PieceKind::S);
        board.grid.fill_row(0, PieceKind::S);
        for x in 3..7 {
            board.grid.set(x, 0, None);
        }
        with_piece(&mut board, PieceKind::I, 3, 0);
        let remaining = board.source.remaining();

        assert_eq!(board.move_piece(Direction::Down), MoveOutcome::Locked);
        assert!(board.game_over());
        // no clear and no respawn
        assert!(board.grid().is_row_full(0));
        assert!(board.grid().is_row_full(1));
        assert_eq!(board.lines(), 0);
        assert_eq!(board.active().kind(), PieceKind::I);
        assert_eq!(board.source.remaining(), remaining);
    }

    #[test]
    fn test_overhanging_lock_ends_game() {
        let mut board = board();
        board.grid.fill_row(3, PieceKind::S);
        with_piece(&mut board, PieceKind::I, 0, -1);
        assert!(board.rotate());

        assert_eq!(board.move_piece(Direction::Down), MoveOutcome::Locked);
        assert!(board.game_over());
        for y in 0..3 {
            assert_eq!(board.grid().get(0, y), Some(Some(PieceKind::I)));
        }
    }

    #[test]
    fn test_lock_below_spawn_row_keeps_playing() {
        let mut board = board();
        board.grid.fill_row(3, PieceKind::S);
        board.grid.set(9, 3, None);
        with_piece(&mut board, PieceKind::O, 0, 1);

        assert_eq!(board.move_piece(Direction::Down), MoveOutcome::Locked);
        assert!(!board.game_over());
        assert_eq!(board.grid().get(1, 2), Some(Some(PieceKind::O)));
    }

    #[test]
    fn test_spawn_collision_sets_game_over() {
        let mut board = board();
        board.grid.set(4, 0, Some(PieceKind::T));
        board.grid.set(5, 0, Some(PieceKind::T));
        board.grid.set(4, 1, Some(PieceKind::T));
        board.grid.set(5, 1, Some(PieceKind::T));
        board.spawn();
        assert!(board.game_over());
    }

    #[test]
    fn test_game_over_freezes_play_but_not_undo() {
        let mut board = board();
        board.move_piece(Direction::Left);
        board.game_over = true;
        let position = board.position();

        assert_eq!(board.move_piece(Direction::Left), MoveOutcome::Blocked);
        assert!(!board.rotate());
        assert_eq!(board.hard_drop(), 0);
        board.update(10_000);
        assert_eq!(board.position(), position);

        assert!(board.undo());
        assert!(board.game_over());
    }

    #[test]
    fn test_gravity_waits_for_full_interval() {
        let mut board = board();
        let y = board.position().y;
        board.update(799);
        assert_eq!(board.position().y, y);
        board.update(1);
        assert_eq!(board.position().y, y + 1);
        board.update(799);
        assert_eq!(board.position().y, y + 1);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "invalid game config")]
    fn test_oversized_config_is_rejected() {
        Board::new(GameConfig::default().with_size(u16::MAX, u16::MAX));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "invalid game config")]
    fn test_zero_drop_interval_is_rejected() {
        Board::new(GameConfig {
            drop_interval_ms: 0,
            ..GameConfig::default()
        });
    }

    #[test]
    fn test_apply_movement_matches_move_piece() {
        let mut board = board();
        with_piece(&mut board, PieceKind::O, 0, 18);

        board.apply(Command::Left);
        assert_eq!(board.position(), Position::new(0, 18));
        assert_eq!(board.history_len(), 0);

        board.apply(Command::SoftDown);
        assert_eq!(board.grid().get(0, 18), Some(Some(PieceKind::O)));
        assert_eq!(board.grid().get(1, 19), Some(Some(PieceKind::O)));
        assert_eq!(board.position().y, 0);

        let x = board.position().x;
        board.apply(Command::Left);
        assert_eq!(board.position().x, x - 1);
    }

    #[test]
    fn test_apply_dispatches_commands() {
        let mut board = board();
        let start = board.position();
        board.apply(Command::Right);
        assert_eq!(board.position().x, start.x + 1);
        board.apply(Command::SoftDown);
        assert_eq!(board.position().y, 1);
        board.apply(Command::Undo);
        board.apply(Command::Undo);
        assert_eq!(board.position(), start);
        board.apply(Command::Quit);
        assert_eq!(board.history_len(), 0);
    }
}
