use std::sync::Arc;

use shared::repositories::game_repository::{DynamoDbGameRepository, GameRepository};
use shared::repositories::memory_game_repository::MemoryGameRepository;
use shared::services::game_service::GameService;
use shared::services::poll_service::PollService;
use tracing::info;

use api::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(false)
        .init();

    // DynamoDB when a table is configured, in-memory otherwise (local runs).
    let repository: Arc<dyn GameRepository + Send + Sync> =
        if std::env::var("GAMES_TABLE").is_ok() {
            let config = aws_config::load_from_env().await;
            let client = aws_sdk_dynamodb::Client::new(&config);
            Arc::new(DynamoDbGameRepository::new(client))
        } else {
            info!("GAMES_TABLE not set, using the in-memory game store");
            Arc::new(MemoryGameRepository::new())
        };

    let game_service = Arc::new(GameService::new(repository));
    let poll_service = Arc::new(PollService::new(game_service.clone()));

    let app = api::app(AppState {
        game_service,
        poll_service,
    });

    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;
    info!("Server is running on port {}", port);
    axum::serve(listener, app).await?;

    Ok(())
}
