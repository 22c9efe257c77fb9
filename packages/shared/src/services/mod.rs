pub mod errors;
pub mod game_service;
pub mod poll_service;
pub mod tictactoe_service;
