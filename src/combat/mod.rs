//! Monster spawning, hit resolution and encounter simulation.

pub mod mitigation;
pub mod simulator;
pub mod spawn;
pub mod turn_based;
pub mod types;
pub mod win_chance;

pub use mitigation::*;
pub use simulator::simulate;
pub use spawn::*;
pub use turn_based::*;
pub use types::*;
pub use win_chance::*;
