use async_trait::async_trait;
use aws_sdk_dynamodb::error::SdkError;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;

use crate::models::game::Game;
use crate::repositories::errors::game_repository_errors::GameRepositoryError;

/// Durable store of games. The whole session, move log included, is one
/// record keyed by id; the board is never persisted, only derived.
#[async_trait]
pub trait GameRepository: Send + Sync {
    async fn create_game(&self, game: &Game) -> Result<(), GameRepositoryError>;

    async fn get_game(&self, game_id: &str) -> Result<Option<Game>, GameRepositoryError>;

    /// Replace an existing game's record. Fails with `NotFound` if the game
    /// was never created.
    async fn update_game(&self, game: &Game) -> Result<(), GameRepositoryError>;

    /// All games, newest first.
    async fn list_games(&self) -> Result<Vec<Game>, GameRepositoryError>;

    /// Games where the name matches either player slot, newest first.
    async fn list_games_by_player(&self, player: &str)
        -> Result<Vec<Game>, GameRepositoryError>;
}

pub struct DynamoDbGameRepository {
    pub client: Client,
    pub table_name: String,
}

impl DynamoDbGameRepository {
    pub fn new(client: Client) -> Self {
        let table_name = std::env::var("GAMES_TABLE")
            .expect("GAMES_TABLE environment variable must be set");
        Self { client, table_name }
    }

    fn sorted_newest_first(mut games: Vec<Game>) -> Vec<Game> {
        games.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        games
    }
}

#[async_trait]
impl GameRepository for DynamoDbGameRepository {
    async fn create_game(&self, game: &Game) -> Result<(), GameRepositoryError> {
        let item = serde_dynamo::to_item(game)
            .map_err(|e| GameRepositoryError::Serialization(e.to_string()))?;

        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .condition_expression("attribute_not_exists(id)")
            .send()
            .await
            .map_err(|e| GameRepositoryError::Storage(e.to_string()))?;

        Ok(())
    }

    async fn get_game(&self, game_id: &str) -> Result<Option<Game>, GameRepositoryError> {
        let result = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key("id", AttributeValue::S(game_id.to_string()))
            .send()
            .await
            .map_err(|e| GameRepositoryError::Storage(e.to_string()))?;

        if let Some(item) = result.item {
            let game: Game = serde_dynamo::from_item(item)
                .map_err(|e| GameRepositoryError::Serialization(e.to_string()))?;
            Ok(Some(game))
        } else {
            Ok(None)
        }
    }

    async fn update_game(&self, game: &Game) -> Result<(), GameRepositoryError> {
        let item = serde_dynamo::to_item(game)
            .map_err(|e| GameRepositoryError::Serialization(e.to_string()))?;

        let result = self
            .client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .condition_expression("attribute_exists(id)")
            .send()
            .await;

        match result {
            Ok(_) => Ok(()),
            Err(e) => {
                if let SdkError::ServiceError(service_err) = &e {
                    if service_err.err().is_conditional_check_failed_exception() {
                        return Err(GameRepositoryError::NotFound);
                    }
                }
                Err(GameRepositoryError::Storage(e.to_string()))
            }
        }
    }

    async fn list_games(&self) -> Result<Vec<Game>, GameRepositoryError> {
        let result = self
            .client
            .scan()
            .table_name(&self.table_name)
            .send()
            .await
            .map_err(|e| GameRepositoryError::Storage(e.to_string()))?;

        let mut games = Vec::new();
        if let Some(items) = result.items {
            for item in items {
                let game: Game = serde_dynamo::from_item(item)
                    .map_err(|e| GameRepositoryError::Serialization(e.to_string()))?;
                games.push(game);
            }
        }

        Ok(Self::sorted_newest_first(games))
    }

    async fn list_games_by_player(
        &self,
        player: &str,
    ) -> Result<Vec<Game>, GameRepositoryError> {
        let result = self
            .client
            .scan()
            .table_name(&self.table_name)
            .filter_expression("playerX = :player OR playerO = :player")
            .expression_attribute_values(":player", AttributeValue::S(player.to_string()))
            .send()
            .await
            .map_err(|e| GameRepositoryError::Storage(e.to_string()))?;

        let mut games = Vec::new();
        if let Some(items) = result.items {
            for item in items {
                let game: Game = serde_dynamo::from_item(item)
                    .map_err(|e| GameRepositoryError::Serialization(e.to_string()))?;
                games.push(game);
            }
        }

        Ok(Self::sorted_newest_first(games))
    }
}
