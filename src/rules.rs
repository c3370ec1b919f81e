//! Move legality and disc reversal.
//!
//! Both are derived from [`Board::anchored_run`], so a cell is legal exactly
//! when applying it flips at least one disc.

use crate::board::Board;
use crate::types::{Cell, Player, Position};

const DIRECTIONS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

impl Board {
    /// Length of the opponent run starting next to `(row, col)` in direction
    /// `(dr, dc)`, if that run is non-empty and closed by a disc of `player`.
    pub fn anchored_run(
        &self,
        row: usize,
        col: usize,
        player: Player,
        dr: isize,
        dc: isize,
    ) -> Option<usize> {
        let me = Cell::from(player);
        let opp = Cell::from(player.opposite());
        let mut r = row as isize + dr;
        let mut c = col as isize + dc;
        let mut run = 0;

        while self.in_bounds(r, c) {
            let cell = self.get(r as usize, c as usize);
            if cell == opp {
                run += 1;
            } else if cell == me {
                return (run > 0).then_some(run);
            } else {
                return None;
            }
            r += dr;
            c += dc;
        }

        None
    }

    pub fn is_legal_move(&self, row: usize, col: usize, player: Player) -> bool {
        if !self.contains(row, col) || !self.get(row, col).is_empty() {
            return false;
        }
        DIRECTIONS
            .iter()
            .any(|&(dr, dc)| self.anchored_run(row, col, player, dr, dc).is_some())
    }

    /// Legal cells for `player` in row-major order.
    pub fn legal_moves(&self, player: Player) -> Vec<Position> {
        let size = self.size();
        (0..size)
            .flat_map(|row| (0..size).map(move |col| Position::new(row, col)))
            .filter(|pos| self.is_legal_move(pos.row, pos.col, player))
            .collect()
    }

    pub fn has_legal_move(&self, player: Player) -> bool {
        let size = self.size();
        (0..size).any(|row| (0..size).any(|col| self.is_legal_move(row, col, player)))
    }

    /// Places a disc for `player` and flips every anchored run.
    /// Returns the flipped positions.
    ///
    /// The move must be legal; this is not re-checked in release builds.
    pub fn apply_move(&mut self, row: usize, col: usize, player: Player) -> Vec<Position> {
        debug_assert!(
            self.is_legal_move(row, col, player),
            "apply_move called with an illegal move at ({row}, {col})"
        );

        let mut flipped = Vec::new();
        for (dr, dc) in DIRECTIONS {
            let Some(run) = self.anchored_run(row, col, player, dr, dc) else {
                continue;
            };
            for step in 1..=run as isize {
                let r = (row as isize + dr * step) as usize;
                let c = (col as isize + dc * step) as usize;
                flipped.push(Position::new(r, c));
            }
        }

        let disc = Cell::from(player);
        self.set_cell(row, col, disc);
        for pos in &flipped {
            self.set_cell(pos.row, pos.col, disc);
        }

        flipped
    }
}
