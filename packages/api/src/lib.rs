use axum::{routing::get, Router};
use tower_http::cors::{Any, CorsLayer};

pub mod routes;
pub mod state;

use state::AppState;

pub fn app(state: AppState) -> Router {
    // Configure CORS
    // ToDo: Tighten this up
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(routes::health::health_check))
        .merge(routes::games::routes())
        .layer(cors)
        .with_state(state)
}
