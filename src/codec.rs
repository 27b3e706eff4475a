//! Tagged decoding of serialized result records
//!
//! Result files are JSON documents in which every record carries a
//! `__type__` discriminator. [`decode`] maps the tag to the matching
//! constructor; bare strings are statuses.

use crate::error::{Error, Result};
use crate::results::{
    JsonRecord, Subtests, TestResult, TestrunResult, TimeAttribute, Totals, TYPE_KEY,
};
use crate::status::Status;
use serde_json::Value;
use std::io::{Read, Write};

/// Any record that can appear in a result file.
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    Status(Status),
    TimeAttribute(TimeAttribute),
    Subtests(Subtests),
    Totals(Totals),
    TestResult(TestResult),
    TestrunResult(TestrunResult),
}

impl Record {
    /// The `__type__` tag this record serializes with.
    pub fn type_tag(&self) -> &'static str {
        match self {
            Record::Status(_) => "Status",
            Record::TimeAttribute(_) => TimeAttribute::TYPE_TAG,
            Record::Subtests(_) => Subtests::TYPE_TAG,
            Record::Totals(_) => Totals::TYPE_TAG,
            Record::TestResult(_) => TestResult::TYPE_TAG,
            Record::TestrunResult(_) => TestrunResult::TYPE_TAG,
        }
    }
}

/// Decode a tagged value into the record it names.
pub fn decode(value: &Value) -> Result<Record> {
    if let Value::String(token) = value {
        return Ok(Record::Status(token.parse()?));
    }

    let tag = value
        .get(TYPE_KEY)
        .and_then(Value::as_str)
        .ok_or_else(|| Error::Decode(format!("missing {} tag", TYPE_KEY)))?;

    let record = match tag {
        "TimeAttribute" => Record::TimeAttribute(TimeAttribute::from_dict(value)?),
        "Subtests" => Record::Subtests(Subtests::from_dict(value)?),
        "Totals" => Record::Totals(Totals::from_dict(value)?),
        "TestResult" => Record::TestResult(TestResult::from_dict(value)?),
        "TestrunResult" => Record::TestrunResult(TestrunResult::from_dict(value)?),
        other => return Err(Error::Decode(format!("unknown record type {:?}", other))),
    };
    Ok(record)
}

/// Encode a record into its tagged form.
pub fn encode(record: &Record) -> Value {
    match record {
        Record::Status(s) => s.to_json(),
        Record::TimeAttribute(t) => t.to_json(),
        Record::Subtests(s) => s.to_json(),
        Record::Totals(t) => t.to_json(),
        Record::TestResult(t) => t.to_json(),
        Record::TestrunResult(r) => r.to_json(),
    }
}

/// Read a run from a JSON document.
///
/// The document must be tagged `TestrunResult`.
pub fn read_results<R: Read>(reader: R) -> Result<TestrunResult> {
    let value: Value = serde_json::from_reader(reader)?;
    match decode(&value)? {
        Record::TestrunResult(run) => Ok(run),
        other => Err(Error::Decode(format!(
            "expected a TestrunResult document, found {}",
            other.type_tag()
        ))),
    }
}

/// Write a run as a pretty-printed JSON document.
pub fn write_results<W: Write>(run: &TestrunResult, mut writer: W) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, &run.to_json())?;
    writeln!(writer)?;
    Ok(())
}
