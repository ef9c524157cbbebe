//! Monte Carlo balance simulator.
//!
//! Runs many exiles through a route of missions using the same engine calls
//! a game would make, and aggregates where they stall, die or flee.

mod config;
mod report;
mod runner;

pub use config::SimConfig;
pub use report::{MissionBalance, RunStats, SimReport};
pub use runner::run_simulation;
