//! Named child outcomes of a single test

use super::{expect_object, JsonRecord, TYPE_KEY};
use crate::error::Result;
use crate::status::{status_from_value, Status};
use indexmap::IndexMap;
use serde_json::{Map, Value};

/// Subtest name to status, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Subtests {
    entries: IndexMap<String, Status>,
}

impl Subtests {
    pub fn new() -> Self {
        Subtests::default()
    }

    /// Store a status, replacing any previous value for `name` in place.
    pub fn insert(&mut self, name: impl Into<String>, status: Status) {
        self.entries.insert(name.into(), status);
    }

    /// Store a status given as a token.
    ///
    /// Unrecognized tokens leave the subtests untouched.
    pub fn set(&mut self, name: impl Into<String>, token: &str) -> Result<()> {
        let status = token.parse()?;
        self.insert(name, status);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<Status> {
        self.entries.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Status)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn values(&self) -> impl Iterator<Item = Status> + '_ {
        self.entries.values().copied()
    }

    /// The most severe subtest status, if any.
    pub fn worst(&self) -> Option<Status> {
        self.values().max()
    }

    /// Merge a `name -> token` mapping, coercing every value.
    ///
    /// All values are validated before any is stored.
    pub fn merge_value(&mut self, value: &Value) -> Result<()> {
        let parsed = Self::from_dict(value)?;
        self.entries.extend(parsed.entries);
        Ok(())
    }
}

impl<S: Into<String>> FromIterator<(S, Status)> for Subtests {
    fn from_iter<I: IntoIterator<Item = (S, Status)>>(iter: I) -> Self {
        Subtests {
            entries: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

impl<S: Into<String>> Extend<(S, Status)> for Subtests {
    fn extend<I: IntoIterator<Item = (S, Status)>>(&mut self, iter: I) {
        self.entries
            .extend(iter.into_iter().map(|(k, v)| (k.into(), v)));
    }
}

impl JsonRecord for Subtests {
    const TYPE_TAG: &'static str = "Subtests";

    fn to_json(&self) -> Value {
        let mut map: Map<String, Value> = self
            .entries
            .iter()
            .map(|(name, status)| (name.clone(), status.to_json()))
            .collect();
        map.insert(TYPE_KEY.to_string(), Value::from(Self::TYPE_TAG));
        Value::Object(map)
    }

    fn from_dict(value: &Value) -> Result<Self> {
        let map = expect_object(value, Self::TYPE_TAG)?;
        let mut subtests = Subtests::new();
        for (name, token) in map.iter().filter(|(k, _)| k.as_str() != TYPE_KEY) {
            subtests.insert(name.clone(), status_from_value(token)?);
        }
        Ok(subtests)
    }
}
