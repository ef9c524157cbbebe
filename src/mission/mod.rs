//! Missions: a fixed sequence of encounters with rewards on success.

pub mod runner;
pub mod types;

pub use runner::*;
pub use types::*;
