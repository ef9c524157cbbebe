//! Engine error taxonomy.
//!
//! Expected domain conditions are returned as values. Only `CorruptTable`
//! signals a programming or content error that callers should not recover
//! from.

/// Errors produced by engine operations.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("unknown {kind} '{id}'")]
    UnknownEntity { kind: EntityKind, id: String },

    #[error("not enough {resource}: need {required}, have {available}")]
    InsufficientResource {
        resource: &'static str,
        required: u32,
        available: u32,
    },

    #[error("no eligible {pool} left to sample")]
    ExhaustedPool { pool: &'static str },

    #[error("{item} cannot be placed in the {slot} slot")]
    InvalidSlot { item: String, slot: String },

    #[error("{rarity} items cannot hold more than {cap} affixes")]
    AffixCapReached { rarity: String, cap: u32 },

    #[error("corrupt {table} table: {reason}")]
    CorruptTable { table: &'static str, reason: String },
}

impl EngineError {
    pub fn unknown(kind: EntityKind, id: impl Into<String>) -> Self {
        EngineError::UnknownEntity {
            kind,
            id: id.into(),
        }
    }

    pub fn corrupt(table: &'static str, reason: impl Into<String>) -> Self {
        EngineError::CorruptTable {
            table,
            reason: reason.into(),
        }
    }

    /// Static identifier for this error variant.
    pub fn code(&self) -> &'static str {
        match self {
            EngineError::UnknownEntity { .. } => "unknown_entity",
            EngineError::InsufficientResource { .. } => "insufficient_resource",
            EngineError::ExhaustedPool { .. } => "exhausted_pool",
            EngineError::InvalidSlot { .. } => "invalid_slot",
            EngineError::AffixCapReached { .. } => "affix_cap_reached",
            EngineError::CorruptTable { .. } => "corrupt_table",
        }
    }
}

/// Kinds of static-table entities looked up by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Class,
    Passive,
    Monster,
    ItemBase,
    Mission,
    Rarity,
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            EntityKind::Class => "class",
            EntityKind::Passive => "passive",
            EntityKind::Monster => "monster",
            EntityKind::ItemBase => "item base",
            EntityKind::Mission => "mission",
            EntityKind::Rarity => "rarity",
        };
        f.write_str(name)
    }
}
