use tracing::{debug, info, instrument, trace};

use crate::board::Board;
use crate::types::{
    DiscCounts, GameError, GameResult, GameState, GameStatus, MoveOutcome, Player, Position,
};

/// Turn controller for one game session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    board: Board,
    current_player: Player,
    status: GameStatus,
    last_flipped: Vec<Position>,
}

impl Game {
    pub fn new() -> Self {
        Self::from_board(Board::new(), Player::Black)
    }

    pub fn with_size(size: usize) -> Result<Self, GameError> {
        Ok(Self::from_board(Board::with_size(size)?, Player::Black))
    }

    /// Starts from an arbitrary position. If `to_move` cannot move the turn
    /// goes to the opponent; if neither can, the game is already over.
    pub fn from_board(board: Board, to_move: Player) -> Self {
        let mut game = Self {
            board,
            current_player: to_move,
            status: GameStatus::InProgress,
            last_flipped: Vec::new(),
        };

        if !game.board.has_legal_move(to_move) {
            if game.board.has_legal_move(to_move.opposite()) {
                game.current_player = to_move.opposite();
                game.status = GameStatus::OpponentPassed;
            } else {
                game.status = GameStatus::GameOver;
            }
        }

        info!(
            size = game.board.size(),
            to_move = ?game.current_player,
            status = ?game.status,
            "game started"
        );
        game
    }

    /// Plays `(row, col)` for the side to move.
    ///
    /// Rejections leave the game untouched.
    #[instrument(level = "debug", skip(self), fields(player = ?self.current_player))]
    pub fn attempt_move(&mut self, row: usize, col: usize) -> Result<MoveOutcome, GameError> {
        if self.status == GameStatus::GameOver {
            return Err(GameError::GameAlreadyOver);
        }
        // Propagates OutOfRange for coordinates off the board.
        self.board.cell_at(row, col)?;

        let mover = self.current_player;
        if !self.board.is_legal_move(row, col, mover) {
            trace!("rejected illegal move");
            return Err(GameError::IllegalMove { row, col });
        }

        self.last_flipped = self.board.apply_move(row, col, mover);
        debug!(flipped = self.last_flipped.len(), "move applied");

        let opponent = mover.opposite();
        let outcome = if self.board.has_legal_move(opponent) {
            self.current_player = opponent;
            self.status = GameStatus::InProgress;
            MoveOutcome::Advanced { next: opponent }
        } else if self.board.has_legal_move(mover) {
            self.status = GameStatus::OpponentPassed;
            debug!(passed = ?opponent, "opponent has no legal move");
            MoveOutcome::OpponentPassed { next: mover }
        } else {
            self.status = GameStatus::GameOver;
            let counts = self.board.count();
            info!(black = counts.black, white = counts.white, "game over");
            MoveOutcome::GameOver { counts }
        };

        Ok(outcome)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_player(&self) -> Player {
        self.current_player
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_game_over(&self) -> bool {
        self.status == GameStatus::GameOver
    }

    /// Legal cells for the side to move; empty once the game is over.
    pub fn legal_moves(&self) -> Vec<Position> {
        if self.is_game_over() {
            return Vec::new();
        }
        self.board.legal_moves(self.current_player)
    }

    pub fn counts(&self) -> DiscCounts {
        self.board.count()
    }

    pub fn last_flipped(&self) -> &[Position] {
        &self.last_flipped
    }

    /// Side with more discs once the game is over. `None` while playing or on a draw.
    pub fn winner(&self) -> Option<Player> {
        if !self.is_game_over() {
            return None;
        }
        let counts = self.counts();
        match counts.black.cmp(&counts.white) {
            std::cmp::Ordering::Greater => Some(Player::Black),
            std::cmp::Ordering::Less => Some(Player::White),
            std::cmp::Ordering::Equal => None,
        }
    }

    pub fn to_game_state(&self) -> GameState {
        let counts = self.counts();
        GameState {
            size: self.board.size(),
            board: self.board.to_array(),
            current_player: self.current_player,
            status: self.status,
            black_count: counts.black,
            white_count: counts.white,
            is_game_over: self.is_game_over(),
            legal_moves: self.legal_moves(),
            flipped: self.last_flipped.clone(),
        }
    }

    pub fn to_game_result(&self) -> GameResult {
        let counts = self.counts();
        GameResult {
            winner: self.winner(),
            black_count: counts.black,
            white_count: counts.white,
        }
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
