//! Read-only lookup tables keyed by string id.

use crate::core::error::{EngineError, EntityKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::warn;

/// A static definition addressable by id.
pub trait Identified {
    const KIND: EntityKind;

    fn id(&self) -> &str;
}

/// Definitions of one kind, in id order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    bound(serialize = "T: Serialize + Clone", deserialize = "T: Deserialize<'de> + Identified"),
    into = "Vec<T>",
    try_from = "Vec<T>"
)]
pub struct Table<T> {
    entries: BTreeMap<String, T>,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }
}

impl<T: Identified> Table<T> {
    /// Builds a table, rejecting duplicate ids.
    pub fn new(definitions: Vec<T>) -> Result<Self, EngineError> {
        let mut entries = BTreeMap::new();
        for def in definitions {
            let id = def.id().to_string();
            if entries.contains_key(&id) {
                return Err(EngineError::corrupt(
                    "content",
                    format!("duplicate {} id '{id}'", T::KIND),
                ));
            }
            entries.insert(id, def);
        }
        Ok(Self { entries })
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.entries.get(id)
    }

    /// Like `get`, but logs and returns `UnknownEntity` for a missing id.
    pub fn require(&self, id: &str) -> Result<&T, EngineError> {
        self.get(id).ok_or_else(|| {
            warn!(kind = %T::KIND, id, "unknown id");
            EngineError::unknown(T::KIND, id)
        })
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a, T> IntoIterator for &'a Table<T> {
    type Item = &'a T;
    type IntoIter = std::collections::btree_map::Values<'a, String, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.values()
    }
}

impl<T: Clone> From<Table<T>> for Vec<T> {
    fn from(table: Table<T>) -> Self {
        table.entries.into_values().collect()
    }
}

impl<T: Identified> TryFrom<Vec<T>> for Table<T> {
    type Error = EngineError;

    fn try_from(definitions: Vec<T>) -> Result<Self, Self::Error> {
        Table::new(definitions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Beast {
        id: String,
        teeth: u32,
    }

    impl Identified for Beast {
        const KIND: EntityKind = EntityKind::Monster;

        fn id(&self) -> &str {
            &self.id
        }
    }

    fn beast(id: &str, teeth: u32) -> Beast {
        Beast {
            id: id.to_string(),
            teeth,
        }
    }

    #[test]
    fn test_get_and_require() {
        let table = Table::new(vec![beast("wolf", 42), beast("bat", 20)]).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.get("wolf").unwrap().teeth, 42);
        assert!(table.get("drake").is_none());
        assert_eq!(
            table.require("drake").unwrap_err(),
            EngineError::unknown(EntityKind::Monster, "drake")
        );
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let err = Table::new(vec![beast("wolf", 1), beast("wolf", 2)]).unwrap_err();
        assert_eq!(err.code(), "corrupt_table");
    }

    #[test]
    fn test_table_serializes_as_list() {
        let table = Table::new(vec![beast("wolf", 42)]).unwrap();
        let json = serde_json::to_string(&table).unwrap();
        assert_eq!(json, r#"[{"id":"wolf","teeth":42}]"#);

        let back: Table<Beast> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, table);
        assert!(serde_json::from_str::<Table<Beast>>(
            r#"[{"id":"a","teeth":1},{"id":"a","teeth":2}]"#
        )
        .is_err());
    }
}
