use std::sync::Arc;

use shared::services::game_service::GameService;
use shared::services::poll_service::PollService;

#[derive(Clone)]
pub struct AppState {
    pub game_service: Arc<GameService>,
    pub poll_service: Arc<PollService>,
}
