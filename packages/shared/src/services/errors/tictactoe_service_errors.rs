/// Rejections of a proposed move, in validation priority order. The display
/// strings are the stable reasons clients see.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TicTacToeServiceError {
    GameComplete,
    NotYourTurn,
    CellTaken,
    /// The move log violates an invariant (a cell written twice). Never a
    /// client fault; surfaced as a server error.
    CorruptLog(String),
}

impl std::fmt::Display for TicTacToeServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TicTacToeServiceError::GameComplete => write!(f, "Game is already complete"),
            TicTacToeServiceError::NotYourTurn => write!(f, "Not your turn"),
            TicTacToeServiceError::CellTaken => write!(f, "Position already taken"),
            TicTacToeServiceError::CorruptLog(msg) => write!(f, "Corrupted move log: {}", msg),
        }
    }
}

impl std::error::Error for TicTacToeServiceError {}
