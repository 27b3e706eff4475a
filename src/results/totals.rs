//! Per-status occurrence counts

use super::{expect_object, JsonRecord, TYPE_KEY};
use crate::error::{Error, Result};
use crate::status::Status;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::ops::{Add, AddAssign, Index, IndexMut};

/// Count of each status within a group. Every status is always present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Totals {
    counts: BTreeMap<Status, u64>,
}

impl Default for Totals {
    fn default() -> Self {
        Totals {
            counts: Status::ALL.iter().map(|s| (*s, 0)).collect(),
        }
    }
}

impl Totals {
    pub fn new() -> Self {
        Totals::default()
    }

    pub fn increment(&mut self, status: Status) {
        self[status] += 1;
    }

    /// True if any count is nonzero.
    pub fn is_nonzero(&self) -> bool {
        self.counts.values().any(|c| *c > 0)
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Sum of counts for failing statuses.
    pub fn failures(&self) -> u64 {
        self.iter()
            .filter(|(status, _)| status.is_failure())
            .map(|(_, count)| count)
            .sum()
    }

    /// Counts from least to most severe status.
    pub fn iter(&self) -> impl Iterator<Item = (Status, u64)> + '_ {
        self.counts.iter().map(|(s, c)| (*s, *c))
    }
}

impl Index<Status> for Totals {
    type Output = u64;

    fn index(&self, status: Status) -> &u64 {
        &self.counts[&status]
    }
}

impl IndexMut<Status> for Totals {
    fn index_mut(&mut self, status: Status) -> &mut u64 {
        self.counts.entry(status).or_insert(0)
    }
}

impl AddAssign<&Totals> for Totals {
    fn add_assign(&mut self, other: &Totals) {
        for (status, count) in other.iter() {
            self[status] += count;
        }
    }
}

impl Add for Totals {
    type Output = Totals;

    fn add(mut self, other: Totals) -> Totals {
        self += &other;
        self
    }
}

impl Add<&Totals> for &Totals {
    type Output = Totals;

    fn add(self, other: &Totals) -> Totals {
        let mut sum = self.clone();
        sum += other;
        sum
    }
}

impl JsonRecord for Totals {
    const TYPE_TAG: &'static str = "Totals";

    fn to_json(&self) -> Value {
        let mut map: Map<String, Value> = self
            .iter()
            .map(|(status, count)| (status.as_str().to_string(), Value::from(count)))
            .collect();
        map.insert(TYPE_KEY.to_string(), Value::from(Self::TYPE_TAG));
        Value::Object(map)
    }

    fn from_dict(value: &Value) -> Result<Self> {
        let map = expect_object(value, Self::TYPE_TAG)?;
        let mut totals = Totals::new();
        for (token, count) in map.iter().filter(|(k, _)| k.as_str() != TYPE_KEY) {
            let status: Status = token.parse()?;
            totals[status] = count
                .as_u64()
                .ok_or_else(|| Error::Decode(format!("count for {} must be a non-negative integer", token)))?;
        }
        Ok(totals)
    }
}
