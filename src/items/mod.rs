//! Item system: stat and rarity tables, generation, crafting, equipment, and scoring.

pub mod bases;
pub mod crafting;
pub mod drops;
pub mod equipment;
pub mod generation;
pub mod rarity;
pub mod scoring;
pub mod stat_table;
pub mod types;

pub use bases::*;
pub use crafting::*;
pub use drops::*;
pub use equipment::*;
pub use generation::*;
pub use rarity::*;
pub use scoring::*;
pub use stat_table::*;
pub use types::*;
