pub mod game_turn;
pub mod turn;
