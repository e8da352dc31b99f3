//! GUI module for the Xiangqi viewer
//!
//! A hotseat board built on egui/eframe for inspecting the rules engine:
//! legal destinations, fingerprints and the text rendering of each position.

mod app;
mod board_view;
mod game_state;
mod theme;

pub use app::XiangqiApp;
pub use game_state::GameState;
