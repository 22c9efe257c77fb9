use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};

use shared::models::board::Mark;
use shared::models::game::GameView;
use shared::models::requests::{CreateGameRequest, MoveRequest, PollQuery};
use shared::models::responses::{ErrorResponse, MoveResult};
use shared::services::errors::game_service_errors::GameServiceError;
use shared::services::poll_service::PollOutcome;

use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/games", get(list_games).post(create_game))
        .route("/api/games/{id}", get(get_game))
        .route("/api/games/player/{name}", get(games_by_player))
        .route("/api/games/{id}/move", post(make_move))
        .route("/api/games/{id}/poll", get(poll_game))
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn error_response(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}

fn map_service_error(error: GameServiceError) -> ApiError {
    match &error {
        GameServiceError::GameNotFound => {
            error_response(StatusCode::NOT_FOUND, error.to_string())
        }
        GameServiceError::ValidationError(_) | GameServiceError::RuleViolation(_) => {
            error_response(StatusCode::BAD_REQUEST, error.to_string())
        }
        GameServiceError::ConsistencyError(_) | GameServiceError::RepositoryError(_) => {
            error_response(StatusCode::INTERNAL_SERVER_ERROR, error.to_string())
        }
    }
}

async fn list_games(State(state): State<AppState>) -> Result<Json<Vec<GameView>>, ApiError> {
    state
        .game_service
        .list_games()
        .await
        .map(Json)
        .map_err(map_service_error)
}

async fn create_game(
    State(state): State<AppState>,
    Json(payload): Json<CreateGameRequest>,
) -> Result<(StatusCode, Json<GameView>), ApiError> {
    let (Some(player_x), Some(player_o)) = (payload.player_x, payload.player_o) else {
        return Err(error_response(
            StatusCode::BAD_REQUEST,
            "Both player names are required",
        ));
    };

    match state.game_service.create_game(&player_x, &player_o).await {
        Ok(view) => Ok((StatusCode::CREATED, Json(view))),
        Err(e) => Err(map_service_error(e)),
    }
}

async fn get_game(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<GameView>, ApiError> {
    state
        .game_service
        .get_game(&id)
        .await
        .map(Json)
        .map_err(map_service_error)
}

async fn games_by_player(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<Vec<GameView>>, ApiError> {
    state
        .game_service
        .list_games_by_player(&name)
        .await
        .map(Json)
        .map_err(map_service_error)
}

async fn make_move(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<MoveRequest>,
) -> Result<Json<MoveResult>, ApiError> {
    let (Some(player), Some(row), Some(col)) = (payload.player, payload.row, payload.col) else {
        return Err(error_response(
            StatusCode::BAD_REQUEST,
            "Row, column and player are required",
        ));
    };
    // Coordinate range is a boundary precondition; the rules engine never
    // sees out-of-range values.
    if !(0..=2).contains(&row) || !(0..=2).contains(&col) {
        return Err(error_response(
            StatusCode::BAD_REQUEST,
            "Row and column must be between 0 and 2",
        ));
    }
    let Some(player) = Mark::from_symbol(&player) else {
        return Err(error_response(
            StatusCode::BAD_REQUEST,
            "Player must be X or O",
        ));
    };

    state
        .game_service
        .make_move(&id, player, row as u8, col as u8)
        .await
        .map(Json)
        .map_err(map_service_error)
}

async fn poll_game(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<PollQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    match state
        .poll_service
        .await_change(&id, query.state.as_deref())
        .await
    {
        Ok(PollOutcome::Changed(view)) => serde_json::to_value(view)
            .map(Json)
            .map_err(|e| error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())),
        Ok(PollOutcome::NoChange) => Ok(Json(serde_json::json!({ "noChange": true }))),
        Err(e) => Err(map_service_error(e)),
    }
}
