use serde::{Deserialize, Serialize};

/// Body of `POST /api/games`. Fields are optional so that missing names can
/// be rejected with a 400 and a reason, not a deserialization failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGameRequest {
    pub player_x: Option<String>,
    pub player_o: Option<String>,
}

/// Body of `POST /api/games/{id}/move`. The boundary checks presence, the
/// 0..=2 coordinate range and the player symbol before anything reaches the
/// rules engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveRequest {
    pub player: Option<String>,
    pub row: Option<i64>,
    pub col: Option<i64>,
}

/// Query of `GET /api/games/{id}/poll`: the client's last-known serialized
/// game view, if it has one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollQuery {
    pub state: Option<String>,
}
