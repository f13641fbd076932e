//! インメモリ実装

pub mod game_state;

pub use game_state::InMemoryGameStateRepository;
