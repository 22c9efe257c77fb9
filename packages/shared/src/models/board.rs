use serde::{Deserialize, Serialize};

use crate::models::game::Move;

/// The 8 winning triples: 3 rows, 3 columns, 2 diagonals.
pub const WIN_PATTERNS: [[(usize, usize); 3]; 8] = [
    [(0, 0), (0, 1), (0, 2)],
    [(1, 0), (1, 1), (1, 2)],
    [(2, 0), (2, 1), (2, 2)],
    [(0, 0), (1, 0), (2, 0)],
    [(0, 1), (1, 1), (2, 1)],
    [(0, 2), (1, 2), (2, 2)],
    [(0, 0), (1, 1), (2, 2)],
    [(0, 2), (1, 1), (2, 0)],
];

/// Player symbol. X always opens the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    pub fn opponent(self) -> Mark {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }

    pub fn from_symbol(symbol: &str) -> Option<Mark> {
        match symbol {
            "X" => Some(Mark::X),
            "O" => Some(Mark::O),
            _ => None,
        }
    }
}

impl std::fmt::Display for Mark {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mark::X => write!(f, "X"),
            Mark::O => write!(f, "O"),
        }
    }
}

/// Terminal evaluation of a move log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Win(Mark),
    Draw,
    Open,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    CellConflict { row: u8, col: u8 },
}

impl std::fmt::Display for BoardError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BoardError::CellConflict { row, col } => {
                write!(f, "cell ({}, {}) occupied twice in the move log", row, col)
            }
        }
    }
}

impl std::error::Error for BoardError {}

/// 3x3 grid of cell occupancy. Always derived from a game's ordered move
/// log, never stored on its own.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board(pub [[Option<Mark>; 3]; 3]);

impl Board {
    /// Fold an ordered move log into a board. Two moves landing on the same
    /// cell mean the log is corrupt (the validator never admits one); that
    /// is a consistency error, never a user-facing rejection.
    pub fn from_moves(moves: &[Move]) -> Result<Board, BoardError> {
        let mut cells: [[Option<Mark>; 3]; 3] = Default::default();
        for m in moves {
            let cell = &mut cells[m.row as usize][m.col as usize];
            if cell.is_some() {
                return Err(BoardError::CellConflict {
                    row: m.row,
                    col: m.col,
                });
            }
            *cell = Some(m.player);
        }
        Ok(Board(cells))
    }

    /// The mark holding a complete triple, if any. In any state reachable
    /// through the validator at most one mark can hold one.
    pub fn winning_mark(&self) -> Option<Mark> {
        for pattern in &WIN_PATTERNS {
            let [a, b, c] = pattern;
            if let Some(mark) = self.0[a.0][a.1] {
                if self.0[b.0][b.1] == Some(mark) && self.0[c.0][c.1] == Some(mark) {
                    return Some(mark);
                }
            }
        }
        None
    }

    /// Terminal evaluation: a win for whoever holds a triple, a draw once
    /// all 9 cells are filled, otherwise still open. Pure function of the
    /// move log.
    pub fn evaluate(moves: &[Move]) -> Result<Outcome, BoardError> {
        let board = Board::from_moves(moves)?;
        if let Some(mark) = board.winning_mark() {
            Ok(Outcome::Win(mark))
        } else if moves.len() == 9 {
            Ok(Outcome::Draw)
        } else {
            Ok(Outcome::Open)
        }
    }
}
