//! Engine-wide building blocks: stat vocabulary, errors, configuration,
//! sampling helpers and the player state.

pub mod config;
pub mod constants;
pub mod context;
pub mod error;
pub mod game_state;
pub mod sampling;
pub mod stats;

pub use config::*;
pub use context::*;
pub use error::*;
pub use game_state::*;
pub use stats::*;
