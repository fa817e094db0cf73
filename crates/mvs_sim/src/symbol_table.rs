//! Current value of every signal during one simulation run.

use crate::error::SimError;
use mvs_common::Value;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Mapping from signal name to its current value.
///
/// Values are stored as given; width masking is the caller's job.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SymbolTable {
    values: BTreeMap<String, Value>,
}

impl SymbolTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value of `name`, failing if it was never set.
    pub fn get(&self, name: &str) -> Result<Value, SimError> {
        self.lookup(name).ok_or_else(|| SimError::UndefinedSymbol {
            name: name.to_string(),
        })
    }

    /// Returns the value of `name`, if set.
    pub fn lookup(&self, name: &str) -> Option<Value> {
        self.values.get(name).copied()
    }

    /// Inserts or overwrites `name`.
    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        self.values.insert(name.into(), value);
    }

    /// Returns `true` if `name` has a value.
    pub fn is_defined(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Number of defined signals.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if nothing is defined.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates over `(name, value)` in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Value)> + '_ {
        self.values.iter().map(|(k, &v)| (k.as_str(), v))
    }
}

impl FromIterator<(String, Value)> for SymbolTable {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_undefined_fails() {
        let table = SymbolTable::new();
        assert_eq!(
            table.get("x"),
            Err(SimError::UndefinedSymbol { name: "x".into() })
        );
        assert!(!table.is_defined("x"));
    }

    #[test]
    fn set_overwrites_without_masking() {
        let mut table = SymbolTable::new();
        table.set("x", 1);
        table.set("x", 0x1_0000_0000);
        assert_eq!(table.get("x"), Ok(0x1_0000_0000));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn iter_is_sorted() {
        let table: SymbolTable = [("b".to_string(), 2), ("a".to_string(), 1)]
            .into_iter()
            .collect();
        let names: Vec<_> = table.iter().map(|(n, _)| n).collect();
        assert_eq!(names, ["a", "b"]);
    }

    #[test]
    fn serializes_as_plain_map() {
        let mut table = SymbolTable::new();
        table.set("y", 3);
        assert_eq!(serde_json::to_string(&table).unwrap(), r#"{"y":3}"#);
    }
}
