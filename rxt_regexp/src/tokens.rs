/**
 * The table of named tokens and their replacement texts.
 */

use std::collections::BTreeMap;
use serde::{Deserialize, Serialize};
use crate::error::Error;

/// Maps token names (as written between braces, `{name}`) to replacement text.
/// Only names present here are recognized as tokens by the translator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenTable(BTreeMap<String, String>);

impl TokenTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a flat JSON object of strings, like `{"num": "[0-9]+"}`.
    /// Anything else (nested values, numbers, arrays) is rejected.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn insert(&mut self, name: impl Into<String>, replacement: impl Into<String>) -> Option<String> {
        self.0.insert(name.into(), replacement.into())
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn names(&self) -> Vec<&str> {
        self.0.keys().map(String::as_str).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl <K, V> std::iter::FromIterator<(K, V)> for TokenTable where K : Into<String>, V : Into<String> {
    fn from_iter<I>(iter: I) -> Self where I : IntoIterator<Item = (K, V)> {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl From<std::collections::HashMap<String, String>> for TokenTable {
    fn from(map: std::collections::HashMap<String, String>) -> Self {
        Self(map.into_iter().collect())
    }
}

// Tests ///////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod token_table_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn reads_flat_json_object() {
        let table = TokenTable::from_json(r#"{"num": "1+1", "id": "x"}"#).unwrap();
        assert_eq!(table.get("num"), Some("1+1"));
        assert_eq!(table.names(), vec!["id", "num"]);
    }

    #[test]
    fn rejects_non_string_values() {
        let err = TokenTable::from_json(r#"{"num": 1}"#).unwrap_err();
        assert!(matches!(err, Error::TokenTable(_)));
    }

    #[test]
    fn rejects_non_object() {
        assert!(TokenTable::from_json(r#"["num"]"#).is_err());
    }

    #[test]
    fn collects_from_pairs() {
        let table: TokenTable = vec![("a", "1"), ("b", "2")].into_iter().collect();
        assert_eq!(table.len(), 2);
        assert_eq!(table.iter().collect::<Vec<_>>(), vec![("a", "1"), ("b", "2")]);
    }
}
