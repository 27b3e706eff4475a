//! Result records for test runs
//!
//! This module holds the in-memory model of a run: per-test records, their
//! subtests and timing, and per-group status totals. Every record serializes
//! to a JSON mapping carrying a `__type__` discriminator so that readers can
//! dispatch on it (see [`crate::codec`]).

use crate::error::{Error, Result};
use crate::text::value_kind;
use serde_json::{Map, Value};

pub mod subtests;
pub mod test_result;
pub mod testrun;
pub mod time;
pub mod totals;

pub use subtests::Subtests;
pub use test_result::TestResult;
pub use testrun::{TestrunResult, RESULTS_VERSION};
pub use time::TimeAttribute;
pub use totals::Totals;

/// Key of the type discriminator in serialized records.
pub const TYPE_KEY: &str = "__type__";

/// A record with a tagged JSON representation.
///
/// `from_dict` is structural: it accepts mappings with or without the
/// `__type__` key, but rejects a tag naming a different record.
pub trait JsonRecord: Sized {
    /// Value written under `__type__`.
    const TYPE_TAG: &'static str;

    /// Serialize to a tagged mapping.
    fn to_json(&self) -> Value;

    /// Rebuild from a mapping previously produced by `to_json`.
    fn from_dict(value: &Value) -> Result<Self>;
}

/// Borrow `value` as a mapping, checking any `__type__` tag against `tag`.
pub(crate) fn expect_object<'a>(value: &'a Value, tag: &str) -> Result<&'a Map<String, Value>> {
    let map = value
        .as_object()
        .ok_or_else(|| Error::Decode(format!("{} must be a mapping, got {}", tag, value_kind(value))))?;

    match map.get(TYPE_KEY) {
        None => Ok(map),
        Some(Value::String(found)) if found == tag => Ok(map),
        Some(other) => Err(Error::Decode(format!(
            "expected {} {:?}, found {}",
            TYPE_KEY, tag, other
        ))),
    }
}

/// Optional text as a JSON string or `null`.
pub(crate) fn optional_json(value: &Option<String>) -> Value {
    value.as_ref().map_or(Value::Null, |s| Value::from(s.as_str()))
}
