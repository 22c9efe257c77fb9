pub mod errors;
pub mod game_repository;
pub mod memory_game_repository;
