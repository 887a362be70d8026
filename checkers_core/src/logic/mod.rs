pub mod board;
pub mod eval_constants;
pub mod game;
pub mod opening;
pub mod player;
pub mod rules;
