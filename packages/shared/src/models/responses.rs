use serde::{Deserialize, Serialize};

use crate::models::board::Mark;
use crate::models::game::{GameStatus, Winner};

/// Result of an accepted move. `next_player` is omitted once the game is
/// complete, since nobody moves again.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveResult {
    pub id: String,
    pub player: Mark,
    pub row: u8,
    pub col: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_player: Option<Mark>,
    pub status: GameStatus,
    pub winner: Option<Winner>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
