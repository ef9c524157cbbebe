//! Classes, passives, stat aggregation, the exile and morale.

pub mod aggregate;
pub mod classes;
pub mod exile;
pub mod modifiers;
pub mod morale;
pub mod passives;

pub use aggregate::*;
pub use classes::*;
pub use exile::*;
pub use modifiers::*;
pub use morale::*;
pub use passives::*;
