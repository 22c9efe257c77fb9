pub mod game_service_errors;
pub mod tictactoe_service_errors;
