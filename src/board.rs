use std::fmt;
use std::str::FromStr;

use crate::types::{Cell, DiscCounts, GameError, Player};

pub const DEFAULT_BOARD_SIZE: usize = 8;
pub const MIN_BOARD_SIZE: usize = 4;
pub const MAX_BOARD_SIZE: usize = 16;

/// Square Othello board stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    size: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Creates the standard 8x8 starting board:
    /// d4=white, e4=black, d5=black, e5=white.
    pub fn new() -> Self {
        Self::starting(DEFAULT_BOARD_SIZE)
    }

    /// Creates a starting board of the given size.
    pub fn with_size(size: usize) -> Result<Self, GameError> {
        validate_size(size)?;
        Ok(Self::starting(size))
    }

    fn starting(size: usize) -> Self {
        let mut board = Self::empty(size);
        let c = size / 2 - 1;
        board.set_cell(c, c, Cell::White);
        board.set_cell(c, c + 1, Cell::Black);
        board.set_cell(c + 1, c, Cell::Black);
        board.set_cell(c + 1, c + 1, Cell::White);
        board
    }

    fn empty(size: usize) -> Self {
        Self {
            size,
            cells: vec![Cell::Empty; size * size],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns the cell at `(row, col)`.
    pub fn cell_at(&self, row: usize, col: usize) -> Result<Cell, GameError> {
        if !self.contains(row, col) {
            return Err(GameError::OutOfRange { row, col });
        }
        Ok(self.cells[self.index(row, col)])
    }

    /// Accepts signed coordinates so direction scans can step off the edge.
    pub fn in_bounds(&self, row: isize, col: isize) -> bool {
        let size = self.size as isize;
        (0..size).contains(&row) && (0..size).contains(&col)
    }

    pub(crate) fn contains(&self, row: usize, col: usize) -> bool {
        row < self.size && col < self.size
    }

    /// Unchecked write; callers stay inside the board.
    pub(crate) fn set_cell(&mut self, row: usize, col: usize, cell: Cell) {
        let idx = self.index(row, col);
        self.cells[idx] = cell;
    }

    /// Reads a cell already known to be in bounds.
    pub(crate) fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[self.index(row, col)]
    }

    pub fn count(&self) -> DiscCounts {
        self.cells
            .iter()
            .fold(DiscCounts::default(), |mut counts, cell| {
                match cell.player() {
                    Some(Player::Black) => counts.black += 1,
                    Some(Player::White) => counts.white += 1,
                    None => {}
                }
                counts
            })
    }

    pub fn empty_count(&self) -> usize {
        self.cells.len() - self.count().total()
    }

    /// Converts board to row-major codes where 0=empty, 1=black, 2=white.
    pub fn to_array(&self) -> Vec<u8> {
        self.cells.iter().map(|cell| cell.code()).collect()
    }

    fn index(&self, row: usize, col: usize) -> usize {
        row * self.size + col
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) fn validate_size(size: usize) -> Result<(), GameError> {
    if size % 2 != 0 || !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&size) {
        return Err(GameError::InvalidBoardSize(size));
    }
    Ok(())
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.size) {
            for cell in row {
                let c = match cell {
                    Cell::Empty => '.',
                    Cell::Black => 'B',
                    Cell::White => 'W',
                };
                write!(f, "{c}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Parses the `Display` form. `X`/`O`/`-` are accepted as aliases and
/// whitespace inside a row is ignored, so `"B W ."` and `"BW."` are equal.
impl FromStr for Board {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows: Vec<Vec<Cell>> = s
            .lines()
            .map(|line| {
                line.chars()
                    .filter(|c| !c.is_whitespace())
                    .map(|c| match c {
                        '.' | '-' => Ok(Cell::Empty),
                        'B' | 'b' | 'X' | 'x' => Ok(Cell::Black),
                        'W' | 'w' | 'O' | 'o' => Ok(Cell::White),
                        other => Err(GameError::InvalidLayout(format!(
                            "unexpected character {other:?}"
                        ))),
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .filter(|row| !matches!(row, Ok(cells) if cells.is_empty()))
            .collect::<Result<_, _>>()?;

        let size = rows.len();
        validate_size(size).map_err(|_| {
            GameError::InvalidLayout(format!("{size} rows is not a valid board size"))
        })?;
        if let Some((idx, row)) = rows.iter().enumerate().find(|(_, row)| row.len() != size) {
            return Err(GameError::InvalidLayout(format!(
                "row {idx} has {} cells, expected {size}",
                row.len()
            )));
        }

        Ok(Self {
            size,
            cells: rows.into_iter().flatten().collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_board_has_four_centre_discs() {
        let board = Board::new();

        assert_eq!(board.cell_at(3, 3), Ok(Cell::White));
        assert_eq!(board.cell_at(3, 4), Ok(Cell::Black));
        assert_eq!(board.cell_at(4, 3), Ok(Cell::Black));
        assert_eq!(board.cell_at(4, 4), Ok(Cell::White));
        assert_eq!(board.count(), DiscCounts { black: 2, white: 2 });
        assert_eq!(board.empty_count(), 60);
    }

    #[test]
    fn cell_at_rejects_coordinates_outside_the_board() {
        let board = Board::new();

        assert_eq!(board.cell_at(8, 0), Err(GameError::OutOfRange { row: 8, col: 0 }));
        assert_eq!(board.cell_at(0, 8), Err(GameError::OutOfRange { row: 0, col: 8 }));
        assert_eq!(board.cell_at(7, 7), Ok(Cell::Empty));
    }

    #[test]
    fn in_bounds_handles_negative_and_edge_coordinates() {
        let board = Board::new();

        assert!(board.in_bounds(0, 0));
        assert!(board.in_bounds(7, 7));
        assert!(!board.in_bounds(-1, 0));
        assert!(!board.in_bounds(0, 8));
    }

    #[test]
    fn with_size_places_centre_discs_for_small_boards() {
        let board = Board::with_size(4).unwrap();

        assert_eq!(board.to_string(), "....\n.WB.\n.BW.\n....\n");
    }

    #[test]
    fn with_size_rejects_odd_and_out_of_range_sizes() {
        assert_eq!(Board::with_size(7), Err(GameError::InvalidBoardSize(7)));
        assert_eq!(Board::with_size(2), Err(GameError::InvalidBoardSize(2)));
        assert_eq!(Board::with_size(18), Err(GameError::InvalidBoardSize(18)));
    }

    #[test]
    fn to_array_uses_numeric_cell_codes() {
        let cells = Board::new().to_array();

        assert_eq!(cells.len(), 64);
        assert_eq!(cells[27], 2);
        assert_eq!(cells[28], 1);
        assert_eq!(cells[35], 1);
        assert_eq!(cells[36], 2);
        assert_eq!(cells.iter().filter(|&&c| c == 0).count(), 60);
    }

    #[test]
    fn parse_accepts_display_output_and_aliases() {
        let board = Board::new();
        assert_eq!(board.to_string().parse::<Board>(), Ok(board));

        let spaced: Board = "
            . . . .
            . O X .
            . X O .
            - - - -
        "
        .parse()
        .unwrap();
        assert_eq!(spaced, Board::with_size(4).unwrap());
    }

    #[test]
    fn parse_rejects_ragged_or_unknown_layouts() {
        assert!(matches!(
            "....\n...\n....\n....".parse::<Board>(),
            Err(GameError::InvalidLayout(_))
        ));
        assert!(matches!(
            "....\n.?..\n....\n....".parse::<Board>(),
            Err(GameError::InvalidLayout(_))
        ));
        assert!(matches!("...\n...\n...".parse::<Board>(), Err(GameError::InvalidLayout(_))));
    }
}
