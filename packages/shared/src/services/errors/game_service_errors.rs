use crate::repositories::errors::game_repository_errors::GameRepositoryError;
use crate::services::errors::tictactoe_service_errors::TicTacToeServiceError;

#[derive(Debug)]
pub enum GameServiceError {
    GameNotFound,
    ValidationError(String),
    RuleViolation(TicTacToeServiceError),
    ConsistencyError(String),
    RepositoryError(String),
}

impl std::fmt::Display for GameServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameServiceError::GameNotFound => write!(f, "Game not found"),
            GameServiceError::ValidationError(msg) => write!(f, "{}", msg),
            GameServiceError::RuleViolation(err) => write!(f, "{}", err),
            GameServiceError::ConsistencyError(msg) => write!(f, "Consistency error: {}", msg),
            GameServiceError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
        }
    }
}

impl std::error::Error for GameServiceError {}

impl From<GameRepositoryError> for GameServiceError {
    fn from(err: GameRepositoryError) -> Self {
        match err {
            GameRepositoryError::NotFound => GameServiceError::GameNotFound,
            other => GameServiceError::RepositoryError(other.to_string()),
        }
    }
}

impl From<TicTacToeServiceError> for GameServiceError {
    fn from(err: TicTacToeServiceError) -> Self {
        match err {
            TicTacToeServiceError::CorruptLog(msg) => GameServiceError::ConsistencyError(msg),
            other => GameServiceError::RuleViolation(other),
        }
    }
}
