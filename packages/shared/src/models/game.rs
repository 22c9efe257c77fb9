use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::board::{Board, BoardError, Mark};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameStatus {
    InProgress,
    Complete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Winner {
    X,
    O,
    Draw,
}

impl From<Mark> for Winner {
    fn from(mark: Mark) -> Self {
        match mark {
            Mark::X => Winner::X,
            Mark::O => Winner::O,
        }
    }
}

/// One placement in a game, ordered by `seq` (1-based, assigned at
/// insertion). Odd sequence positions are always X.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub player: Mark,
    pub row: u8,
    pub col: u8,
    pub seq: u32,
}

/// A game session as persisted: the move log is the source of truth for the
/// board, which is derived on every read and never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    pub id: String,
    pub player_x: String,
    pub player_o: String,
    pub current_player: Mark,
    pub status: GameStatus,
    pub winner: Option<Winner>,
    pub moves: Vec<Move>,
    pub created_at: DateTime<Utc>,
}

impl Game {
    pub fn new(player_x: &str, player_o: &str) -> Self {
        Game {
            id: Uuid::new_v4().to_string(),
            player_x: player_x.to_string(),
            player_o: player_o.to_string(),
            current_player: Mark::X,
            status: GameStatus::InProgress,
            winner: None,
            moves: Vec::new(),
            created_at: Utc::now(),
        }
    }

    pub fn board(&self) -> Result<Board, BoardError> {
        Board::from_moves(&self.moves)
    }

    /// The public view of this game, with its board freshly derived from
    /// the move log.
    pub fn view(&self) -> Result<GameView, BoardError> {
        Ok(GameView {
            id: self.id.clone(),
            player_x: self.player_x.clone(),
            player_o: self.player_o.clone(),
            current_player: self.current_player,
            status: self.status,
            winner: self.winner,
            board: self.board()?,
            created_at: self.created_at,
        })
    }
}

/// What clients see. `board` is a projection of the move log; clients hand
/// a serialized `GameView` back as the snapshot when long-polling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameView {
    pub id: String,
    pub player_x: String,
    pub player_o: String,
    pub current_player: Mark,
    pub status: GameStatus,
    pub winner: Option<Winner>,
    pub board: Board,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_game_fields() {
        let game = Game::new("Alice", "Bob");

        assert!(!game.id.is_empty());
        assert_eq!(game.player_x, "Alice");
        assert_eq!(game.player_o, "Bob");
        assert_eq!(game.current_player, Mark::X);
        assert_eq!(game.status, GameStatus::InProgress);
        assert!(game.winner.is_none());
        assert!(game.moves.is_empty());

        // created_at should be recent
        let now = Utc::now();
        assert!((now - game.created_at).num_seconds() < 10);
    }

    #[test]
    fn test_game_id_uniqueness() {
        let game1 = Game::new("Alice", "Bob");
        let game2 = Game::new("Alice", "Bob");

        assert_ne!(game1.id, game2.id);
    }

    #[test]
    fn test_identical_player_names_are_allowed() {
        // Self-play is not forbidden; turns are tracked by symbol, not name.
        let game = Game::new("Alice", "Alice");
        assert_eq!(game.player_x, game.player_o);
        assert_eq!(game.current_player, Mark::X);
    }

    #[test]
    fn test_view_of_new_game_has_empty_board() {
        let game = Game::new("Alice", "Bob");
        let view = game.view().unwrap();

        assert_eq!(view.id, game.id);
        assert_eq!(view.board, Board::default());
        assert_eq!(view.status, GameStatus::InProgress);
        assert!(view.winner.is_none());
    }

    #[test]
    fn test_view_derives_board_from_move_log() {
        let mut game = Game::new("Alice", "Bob");
        game.moves.push(Move {
            player: Mark::X,
            row: 2,
            col: 0,
            seq: 1,
        });

        let view = game.view().unwrap();
        assert_eq!(view.board.0[2][0], Some(Mark::X));
    }

    #[test]
    fn test_game_wire_format_is_camel_case() {
        let game = Game::new("Alice", "Bob");
        let json = serde_json::to_value(&game).unwrap();

        assert_eq!(json["playerX"], "Alice");
        assert_eq!(json["playerO"], "Bob");
        assert_eq!(json["currentPlayer"], "X");
        assert_eq!(json["status"], "IN_PROGRESS");
        assert_eq!(json["winner"], serde_json::Value::Null);
        assert!(json["createdAt"].is_string());

        let roundtrip: Game = serde_json::from_value(json).unwrap();
        assert_eq!(roundtrip.id, game.id);
        assert_eq!(roundtrip.created_at, game.created_at);
    }

    #[test]
    fn test_status_and_winner_serialization() {
        assert_eq!(
            serde_json::to_string(&GameStatus::Complete).unwrap(),
            "\"COMPLETE\""
        );
        assert_eq!(
            serde_json::to_string(&Winner::Draw).unwrap(),
            "\"DRAW\""
        );
        assert_eq!(serde_json::to_string(&Winner::X).unwrap(), "\"X\"");
    }

    #[test]
    fn test_mark_helpers() {
        assert_eq!(Mark::X.opponent(), Mark::O);
        assert_eq!(Mark::O.opponent(), Mark::X);
        assert_eq!(Mark::from_symbol("X"), Some(Mark::X));
        assert_eq!(Mark::from_symbol("O"), Some(Mark::O));
        assert_eq!(Mark::from_symbol("Z"), None);
        assert_eq!(Mark::from_symbol("x"), None);
    }
}
