use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::models::game::Game;
use crate::repositories::errors::game_repository_errors::GameRepositoryError;
use crate::repositories::game_repository::GameRepository;

/// In-process store, used for local runs (no `GAMES_TABLE` configured) and
/// in tests. Same contract as the DynamoDB repository.
#[derive(Default)]
pub struct MemoryGameRepository {
    games: RwLock<HashMap<String, Game>>,
}

impl MemoryGameRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn sorted_newest_first(mut games: Vec<Game>) -> Vec<Game> {
    games.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    games
}

#[async_trait]
impl GameRepository for MemoryGameRepository {
    async fn create_game(&self, game: &Game) -> Result<(), GameRepositoryError> {
        let mut games = self.games.write().await;
        if games.contains_key(&game.id) {
            return Err(GameRepositoryError::Storage(format!(
                "game {} already exists",
                game.id
            )));
        }
        games.insert(game.id.clone(), game.clone());
        Ok(())
    }

    async fn get_game(&self, game_id: &str) -> Result<Option<Game>, GameRepositoryError> {
        Ok(self.games.read().await.get(game_id).cloned())
    }

    async fn update_game(&self, game: &Game) -> Result<(), GameRepositoryError> {
        let mut games = self.games.write().await;
        match games.get_mut(&game.id) {
            Some(existing) => {
                *existing = game.clone();
                Ok(())
            }
            None => Err(GameRepositoryError::NotFound),
        }
    }

    async fn list_games(&self) -> Result<Vec<Game>, GameRepositoryError> {
        let games = self.games.read().await.values().cloned().collect();
        Ok(sorted_newest_first(games))
    }

    async fn list_games_by_player(
        &self,
        player: &str,
    ) -> Result<Vec<Game>, GameRepositoryError> {
        let games = self
            .games
            .read()
            .await
            .values()
            .filter(|game| game.player_x == player || game.player_o == player)
            .cloned()
            .collect();
        Ok(sorted_newest_first(games))
    }
}
