//! Othello drawn through the [`GridGame`] interface.
//!
//! The view owns the session's [`Game`] and derives everything the host
//! draws (discs, hints, flip highlights, status line) from it. The engine
//! never calls back into the view.

use serde::Serialize;
use tracing::{debug, trace};
use web_time::{Duration, Instant};

use crate::config::GameConfig;
use crate::game::Game;
use crate::grid::{DelayQueue, GridGame, GridLayout};
use crate::types::{GameError, GameStatus, MoveOutcome, Player, Position};

/// What to draw in one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CellVisual {
    Empty,
    Disc { player: Player, highlighted: bool },
    /// Translucent disc marking a legal move for `player`.
    Hint { player: Player },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ViewEvent {
    ClearHighlight { generation: u64 },
}

#[derive(Debug, Clone)]
pub struct OthelloView {
    game: Game,
    initial: Game,
    layout: GridLayout,
    show_legal_moves: bool,
    highlight_delay: Duration,
    highlighted: Vec<Position>,
    highlight_generation: u64,
    timers: DelayQueue<ViewEvent>,
    status: String,
}

impl OthelloView {
    pub fn new(config: &GameConfig) -> Result<Self, GameError> {
        config.validate()?;
        let game = Game::with_size(config.board_size)?;
        let size = config.board_size;
        let status = status_text(&game);
        Ok(Self {
            initial: game.clone(),
            game,
            layout: GridLayout::new(size, size, config.padding, config.width, config.height),
            show_legal_moves: config.show_legal_moves,
            highlight_delay: Duration::from_millis(config.highlight_millis),
            highlighted: Vec::new(),
            highlight_generation: 0,
            timers: DelayQueue::new(),
            status,
        })
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn status_text(&self) -> &str {
        &self.status
    }

    pub fn set_show_legal_moves(&mut self, show: bool) {
        self.show_legal_moves = show;
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.layout.resize(width, height);
    }

    /// Starts a fresh game on the same board size.
    pub fn restart(&mut self) {
        self.game = self.initial.clone();
        self.highlighted.clear();
        self.timers.clear();
        self.status = status_text(&self.game);
    }

    /// Plays `(row, col)`, highlighting the flipped discs until `now` plus the
    /// configured delay. Rejected clicks change nothing.
    pub fn play_at(
        &mut self,
        row: usize,
        col: usize,
        now: Instant,
    ) -> Result<MoveOutcome, GameError> {
        let outcome = self.game.attempt_move(row, col).inspect_err(|err| {
            trace!(%err, "click ignored");
        })?;

        self.highlight_generation += 1;
        self.highlighted = self.game.last_flipped().to_vec();
        self.timers.after(
            now,
            self.highlight_delay,
            ViewEvent::ClearHighlight {
                generation: self.highlight_generation,
            },
        );
        self.status = status_text(&self.game);
        debug!(?outcome, status = %self.status, "view updated");

        Ok(outcome)
    }

    /// Expires due highlights. Returns true when the host should repaint.
    pub fn tick(&mut self, now: Instant) -> bool {
        let mut repaint = false;
        for event in self.timers.drain_due(now) {
            match event {
                ViewEvent::ClearHighlight { generation } => {
                    if generation == self.highlight_generation && !self.highlighted.is_empty() {
                        self.highlighted.clear();
                        repaint = true;
                    }
                }
            }
        }
        repaint
    }

    pub fn has_pending_animation(&self) -> bool {
        !self.timers.is_empty()
    }
}

impl GridGame for OthelloView {
    type Visual = CellVisual;
    type Outcome = Result<MoveOutcome, GameError>;

    fn layout(&self) -> &GridLayout {
        &self.layout
    }

    fn paint_cell(&self, row: usize, col: usize) -> CellVisual {
        let board = self.game.board();
        match board.cell_at(row, col).ok().and_then(|cell| cell.player()) {
            Some(player) => CellVisual::Disc {
                player,
                highlighted: self.highlighted.contains(&Position::new(row, col)),
            },
            None => {
                let player = self.game.current_player();
                if self.show_legal_moves
                    && !self.game.is_game_over()
                    && board.is_legal_move(row, col, player)
                {
                    CellVisual::Hint { player }
                } else {
                    CellVisual::Empty
                }
            }
        }
    }

    fn cell_clicked(&mut self, row: usize, col: usize) -> Self::Outcome {
        self.play_at(row, col, Instant::now())
    }
}

/// Text for the status line under the board.
pub fn status_text(game: &Game) -> String {
    let player = game.current_player();
    match game.status() {
        GameStatus::InProgress => format!("{} to move", player.name()),
        GameStatus::OpponentPassed => format!(
            "{} has no legal moves; {} moves again",
            player.opposite().name(),
            player.name()
        ),
        GameStatus::GameOver => {
            let counts = game.counts();
            let verdict = match game.winner() {
                Some(winner) => format!("{} wins.", winner.name()),
                None => "Draw.".to_string(),
            };
            format!(
                "Game over: Black {}, White {}. {verdict}",
                counts.black, counts.white
            )
        }
    }
}
