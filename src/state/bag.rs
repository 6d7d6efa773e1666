//! Open-ended key/value bags
//!
//! Filters and setup-wizard state are loosely shaped: callers add ad hoc keys,
//! so both are stored as a string-keyed map of JSON values. Known keys get typed
//! accessors; anything else passes through untouched.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// String-keyed map of loosely-typed values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct PropertyBag {
    values: BTreeMap<String, Value>,
}

/// Current dashboard filters (replaced wholesale on every update)
pub type FilterSet = PropertyBag;

/// Setup-wizard state (shallow-merged on every update)
pub type SetupState = PropertyBag;

/// Well-known keys
pub mod keys {
    /// Filter: alert importance
    pub const IMPORTANCE: &str = "importance";
    /// Filter: market segment
    pub const MARKET: &str = "market";
    /// Filter: company
    pub const COMPANY: &str = "company";
    /// Setup: selected persona
    pub const PERSONA: &str = "persona";
    /// Setup: free-text query
    pub const QUERY: &str = "query";
    /// Setup: feed name
    pub const NAME: &str = "name";
    /// Setup: connected source ids
    pub const SOURCES: &str = "sources";
    /// Setup: output configuration object
    pub const OUTPUT: &str = "output";
}

impl PropertyBag {
    /// Create an empty bag
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert or overwrite a value
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(key.into(), value.into());
    }

    /// Get a raw value
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Get a value as a string slice, if it is a string
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.values.get(key).and_then(Value::as_str)
    }

    /// Shallow merge: every top-level key of `partial` overwrites ours
    pub fn merge(&mut self, partial: PropertyBag) {
        self.values.extend(partial.values);
    }

    /// Remove every entry
    pub fn clear(&mut self) {
        self.values.clear();
    }

    /// Whether the bag has no entries
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Iterate over entries in key order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.values.iter()
    }

    /// `importance` filter value
    pub fn importance(&self) -> Option<&str> {
        self.get_str(keys::IMPORTANCE)
    }

    /// `market` filter value
    pub fn market(&self) -> Option<&str> {
        self.get_str(keys::MARKET)
    }

    /// `company` filter value
    pub fn company(&self) -> Option<&str> {
        self.get_str(keys::COMPANY)
    }

    /// `persona` chosen in the setup wizard
    pub fn persona(&self) -> Option<&str> {
        self.get_str(keys::PERSONA)
    }

    /// Free-text `query` entered in the setup wizard
    pub fn query(&self) -> Option<&str> {
        self.get_str(keys::QUERY)
    }

    /// Source ids connected in the setup wizard (non-string entries are skipped)
    pub fn sources(&self) -> Vec<&str> {
        self.get(keys::SOURCES)
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }
}

impl FromIterator<(String, Value)> for PropertyBag {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}
