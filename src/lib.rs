//! Exile - RPG engine library
//!
//! Stat resolution, item generation and crafting, combat simulation and
//! morale for exiles sent out on missions. All randomness flows through an
//! injected `rand::Rng`, so every operation is reproducible from a seed.

pub mod character;
pub mod combat;
pub mod content;
pub mod core;
pub mod items;
pub mod mission;
pub mod simulator;
