use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::sync::Mutex as AsyncMutex;
use tracing::{error, info};

use crate::models::board::Mark;
use crate::models::game::{Game, GameStatus, GameView};
use crate::models::responses::MoveResult;
use crate::repositories::game_repository::GameRepository;
use crate::services::errors::game_service_errors::GameServiceError;
use crate::services::errors::tictactoe_service_errors::TicTacToeServiceError;
use crate::services::tictactoe_service::TicTacToeService;

/// Orchestrates the rules engine and the store. Every returned view carries
/// a board freshly derived from the persisted move log.
pub struct GameService {
    repository: Arc<dyn GameRepository + Send + Sync>,
    rules: TicTacToeService,
    // One async mutex per game id so validate+append+persist is serialized
    // per game while unrelated games proceed independently.
    move_locks: Mutex<HashMap<String, Arc<AsyncMutex<()>>>>,
}

impl GameService {
    pub fn new(repository: Arc<dyn GameRepository + Send + Sync>) -> Self {
        GameService {
            repository,
            rules: TicTacToeService::new(),
            move_locks: Mutex::new(HashMap::new()),
        }
    }

    pub async fn create_game(
        &self,
        player_x: &str,
        player_o: &str,
    ) -> Result<GameView, GameServiceError> {
        if player_x.is_empty() || player_o.is_empty() {
            return Err(GameServiceError::ValidationError(
                "Both player names are required".to_string(),
            ));
        }

        let game = Game::new(player_x, player_o);
        self.repository.create_game(&game).await?;
        info!(game_id = %game.id, player_x, player_o, "game created");
        self.view_of(&game)
    }

    pub async fn get_game(&self, game_id: &str) -> Result<GameView, GameServiceError> {
        let game = self
            .repository
            .get_game(game_id)
            .await?
            .ok_or(GameServiceError::GameNotFound)?;
        self.view_of(&game)
    }

    pub async fn list_games(&self) -> Result<Vec<GameView>, GameServiceError> {
        let games = self.repository.list_games().await?;
        games.iter().map(|game| self.view_of(game)).collect()
    }

    pub async fn list_games_by_player(
        &self,
        player: &str,
    ) -> Result<Vec<GameView>, GameServiceError> {
        let games = self.repository.list_games_by_player(player).await?;
        games.iter().map(|game| self.view_of(game)).collect()
    }

    /// Validate and apply one move. Runs under the game's lock so that two
    /// concurrent moves can never both be accepted against the same
    /// `current_player`; the persisted state each move sees is the state it
    /// is applied to.
    pub async fn make_move(
        &self,
        game_id: &str,
        player: Mark,
        row: u8,
        col: u8,
    ) -> Result<MoveResult, GameServiceError> {
        let lock = self.lock_for(game_id);
        let _guard = lock.lock().await;

        let mut game = self
            .repository
            .get_game(game_id)
            .await?
            .ok_or(GameServiceError::GameNotFound)?;

        if let Err(e) = self.rules.validate_and_make_move(&mut game, player, row, col) {
            if matches!(e, TicTacToeServiceError::CorruptLog(_)) {
                error!(game_id, %e, "move log invariant broken");
            }
            return Err(e.into());
        }

        self.repository.update_game(&game).await?;
        info!(
            game_id,
            %player,
            row,
            col,
            status = ?game.status,
            "move applied"
        );

        let next_player = match game.status {
            GameStatus::InProgress => Some(game.current_player),
            GameStatus::Complete => None,
        };
        Ok(MoveResult {
            id: game.id,
            player,
            row,
            col,
            next_player,
            status: game.status,
            winner: game.winner,
        })
    }

    fn view_of(&self, game: &Game) -> Result<GameView, GameServiceError> {
        game.view().map_err(|e| {
            error!(game_id = %game.id, %e, "board derivation failed");
            GameServiceError::ConsistencyError(e.to_string())
        })
    }

    fn lock_for(&self, game_id: &str) -> Arc<AsyncMutex<()>> {
        let mut locks = self.move_locks.lock().expect("move lock map poisoned");
        locks.entry(game_id.to_string()).or_default().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::game::Winner;
    use crate::repositories::errors::game_repository_errors::GameRepositoryError;
    use crate::repositories::memory_game_repository::MemoryGameRepository;
    use async_trait::async_trait;

    fn service() -> Arc<GameService> {
        Arc::new(GameService::new(Arc::new(MemoryGameRepository::new())))
    }

    // Repository that fails every call, for fault-path tests.
    struct FailingRepository;

    #[async_trait]
    impl GameRepository for FailingRepository {
        async fn create_game(&self, _game: &Game) -> Result<(), GameRepositoryError> {
            Err(GameRepositoryError::Storage("store down".to_string()))
        }

        async fn get_game(&self, _game_id: &str) -> Result<Option<Game>, GameRepositoryError> {
            Err(GameRepositoryError::Storage("store down".to_string()))
        }

        async fn update_game(&self, _game: &Game) -> Result<(), GameRepositoryError> {
            Err(GameRepositoryError::Storage("store down".to_string()))
        }

        async fn list_games(&self) -> Result<Vec<Game>, GameRepositoryError> {
            Err(GameRepositoryError::Storage("store down".to_string()))
        }

        async fn list_games_by_player(
            &self,
            _player: &str,
        ) -> Result<Vec<Game>, GameRepositoryError> {
            Err(GameRepositoryError::Storage("store down".to_string()))
        }
    }

    #[tokio::test]
    async fn test_create_game_starts_with_x_and_empty_board() {
        let service = service();
        let view = service.create_game("Alice", "Bob").await.unwrap();

        assert_eq!(view.player_x, "Alice");
        assert_eq!(view.player_o, "Bob");
        assert_eq!(view.current_player, Mark::X);
        assert_eq!(view.status, GameStatus::InProgress);
        assert!(view.winner.is_none());
        assert!(view
            .board
            .0
            .iter()
            .all(|row| row.iter().all(|cell| cell.is_none())));
    }

    #[tokio::test]
    async fn test_create_game_rejects_empty_names() {
        let service = service();
        for (x, o) in [("", "Bob"), ("Alice", "")] {
            let result = service.create_game(x, o).await;
            assert!(matches!(
                result,
                Err(GameServiceError::ValidationError(_))
            ));
        }
    }

    #[tokio::test]
    async fn test_get_unknown_game_is_not_found() {
        let service = service();
        let result = service.get_game("missing").await;
        assert!(matches!(result, Err(GameServiceError::GameNotFound)));
    }

    #[tokio::test]
    async fn test_move_on_unknown_game_is_not_found() {
        let service = service();
        let result = service.make_move("missing", Mark::X, 0, 0).await;
        assert!(matches!(result, Err(GameServiceError::GameNotFound)));
    }

    #[tokio::test]
    async fn test_accepted_move_result_and_persisted_turn() {
        let service = service();
        let game = service.create_game("Alice", "Bob").await.unwrap();

        let result = service.make_move(&game.id, Mark::X, 0, 0).await.unwrap();
        assert_eq!(result.player, Mark::X);
        assert_eq!(result.next_player, Some(Mark::O));
        assert_eq!(result.status, GameStatus::InProgress);
        assert!(result.winner.is_none());

        let view = service.get_game(&game.id).await.unwrap();
        assert_eq!(view.current_player, Mark::O);
        assert_eq!(view.board.0[0][0], Some(Mark::X));
    }

    #[tokio::test]
    async fn test_full_win_scenario() {
        let service = service();
        let game = service.create_game("Alice", "Bob").await.unwrap();
        assert_eq!(game.current_player, Mark::X);

        service.make_move(&game.id, Mark::X, 0, 0).await.unwrap();
        service.make_move(&game.id, Mark::O, 1, 1).await.unwrap();
        service.make_move(&game.id, Mark::X, 0, 1).await.unwrap();
        service.make_move(&game.id, Mark::O, 2, 2).await.unwrap();
        let result = service.make_move(&game.id, Mark::X, 0, 2).await.unwrap();

        assert_eq!(result.status, GameStatus::Complete);
        assert_eq!(result.winner, Some(Winner::X));
        assert!(result.next_player.is_none());

        let view = service.get_game(&game.id).await.unwrap();
        assert_eq!(
            view.board.0[0],
            [Some(Mark::X), Some(Mark::X), Some(Mark::X)]
        );

        let rejected = service.make_move(&game.id, Mark::O, 1, 0).await;
        assert!(matches!(
            rejected,
            Err(GameServiceError::RuleViolation(
                TicTacToeServiceError::GameComplete
            ))
        ));
    }

    #[tokio::test]
    async fn test_wrong_turn_and_taken_cell_rejections() {
        let service = service();
        let game = service.create_game("Alice", "Bob").await.unwrap();

        let wrong_turn = service.make_move(&game.id, Mark::O, 0, 0).await;
        assert!(matches!(
            wrong_turn,
            Err(GameServiceError::RuleViolation(
                TicTacToeServiceError::NotYourTurn
            ))
        ));

        service.make_move(&game.id, Mark::X, 0, 0).await.unwrap();
        let taken = service.make_move(&game.id, Mark::O, 0, 0).await;
        assert!(matches!(
            taken,
            Err(GameServiceError::RuleViolation(
                TicTacToeServiceError::CellTaken
            ))
        ));
    }

    #[tokio::test]
    async fn test_concurrent_moves_serialize_per_game() {
        let service = service();
        let game = service.create_game("Alice", "Bob").await.unwrap();

        // Three racing X moves to distinct cells: exactly one may be
        // accepted, the rest must see the flipped turn.
        let (a, b, c) = tokio::join!(
            service.make_move(&game.id, Mark::X, 0, 0),
            service.make_move(&game.id, Mark::X, 1, 1),
            service.make_move(&game.id, Mark::X, 2, 2),
        );

        let accepted = [&a, &b, &c].iter().filter(|r| r.is_ok()).count();
        assert_eq!(accepted, 1);
        for result in [a, b, c] {
            if let Err(e) = result {
                assert!(matches!(
                    e,
                    GameServiceError::RuleViolation(TicTacToeServiceError::NotYourTurn)
                ));
            }
        }

        let view = service.get_game(&game.id).await.unwrap();
        assert_eq!(view.current_player, Mark::O);
    }

    #[tokio::test]
    async fn test_games_on_different_ids_do_not_interfere() {
        let service = service();
        let first = service.create_game("Alice", "Bob").await.unwrap();
        let second = service.create_game("Carol", "Dave").await.unwrap();

        let (a, b) = tokio::join!(
            service.make_move(&first.id, Mark::X, 0, 0),
            service.make_move(&second.id, Mark::X, 2, 2),
        );
        assert!(a.is_ok());
        assert!(b.is_ok());
    }

    #[tokio::test]
    async fn test_list_games_newest_first_with_derived_boards() {
        let service = service();
        let first = service.create_game("Alice", "Bob").await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        let second = service.create_game("Alice", "Carol").await.unwrap();

        service.make_move(&first.id, Mark::X, 1, 1).await.unwrap();

        let games = service.list_games().await.unwrap();
        assert_eq!(games.len(), 2);
        assert_eq!(games[0].id, second.id);
        assert_eq!(games[1].id, first.id);
        assert_eq!(games[1].board.0[1][1], Some(Mark::X));

        let bobs = service.list_games_by_player("Bob").await.unwrap();
        assert_eq!(bobs.len(), 1);
        assert_eq!(bobs[0].id, first.id);

        let alices = service.list_games_by_player("Alice").await.unwrap();
        assert_eq!(alices.len(), 2);
        assert_eq!(alices[0].id, second.id);
    }

    #[tokio::test]
    async fn test_repository_failures_surface_as_repository_errors() {
        let service = GameService::new(Arc::new(FailingRepository));

        let create = service.create_game("Alice", "Bob").await;
        assert!(matches!(
            create,
            Err(GameServiceError::RepositoryError(_))
        ));

        let make_move = service.make_move("any", Mark::X, 0, 0).await;
        assert!(matches!(
            make_move,
            Err(GameServiceError::RepositoryError(_))
        ));
    }
}
