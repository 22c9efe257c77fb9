use crate::models::board::{Board, Mark, Outcome};
use crate::models::game::{Game, GameStatus, Move, Winner};
use crate::services::errors::tictactoe_service_errors::TicTacToeServiceError;

/// The rules engine: decides move legality against a game snapshot and
/// applies accepted moves to it. Stateless; persistence and locking belong
/// to the game service.
#[derive(Debug, Clone, Default)]
pub struct TicTacToeService;

impl TicTacToeService {
    pub fn new() -> Self {
        TicTacToeService
    }

    /// Check a proposed move against the given game state. Coordinate range
    /// (0..=2) is enforced at the HTTP boundary and never reaches this far.
    pub fn validate_move(
        &self,
        game: &Game,
        player: Mark,
        row: u8,
        col: u8,
    ) -> Result<(), TicTacToeServiceError> {
        debug_assert!(row <= 2 && col <= 2);

        if game.status == GameStatus::Complete {
            return Err(TicTacToeServiceError::GameComplete);
        }
        if game.current_player != player {
            return Err(TicTacToeServiceError::NotYourTurn);
        }
        if game.moves.iter().any(|m| m.row == row && m.col == col) {
            return Err(TicTacToeServiceError::CellTaken);
        }
        Ok(())
    }

    /// Validate and apply a move: append it with the next sequence number,
    /// re-evaluate the board from the full log and either complete the game
    /// or pass the turn. On completion `current_player` stays on the mover.
    pub fn validate_and_make_move(
        &self,
        game: &mut Game,
        player: Mark,
        row: u8,
        col: u8,
    ) -> Result<Outcome, TicTacToeServiceError> {
        self.validate_move(game, player, row, col)?;

        game.moves.push(Move {
            player,
            row,
            col,
            seq: game.moves.len() as u32 + 1,
        });

        let outcome = Board::evaluate(&game.moves)
            .map_err(|e| TicTacToeServiceError::CorruptLog(e.to_string()))?;

        match outcome {
            Outcome::Win(mark) => {
                game.status = GameStatus::Complete;
                game.winner = Some(Winner::from(mark));
            }
            Outcome::Draw => {
                game.status = GameStatus::Complete;
                game.winner = Some(Winner::Draw);
            }
            Outcome::Open => {
                game.current_player = player.opponent();
            }
        }

        Ok(outcome)
    }
}
