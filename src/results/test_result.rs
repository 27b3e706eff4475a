//! The record of a single test

use super::{expect_object, optional_json, JsonRecord, Subtests, TimeAttribute, TYPE_KEY};
use crate::error::{Error, Result};
use crate::status::{status_from_value, Status};
use crate::text::{optional_text_from_value, text_from_value, value_kind, Text};
use log::debug;
use serde_json::{json, Map, Value};

/// Outcome of one test: status, captured output, timing and subtests.
///
/// # Examples
///
/// ```
/// use conformance_results::results::TestResult;
/// use conformance_results::status::Status;
///
/// let mut test = TestResult::new(Status::Pass);
/// assert_eq!(test.result(), Status::Pass);
///
/// // Subtests take precedence over the stored status.
/// test.subtests.insert("a", Status::Fail);
/// test.subtests.insert("b", Status::Crash);
/// assert_eq!(test.result(), Status::Crash);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TestResult {
    result: Status,
    err: String,
    out: String,
    environment: String,
    command: String,
    /// Exit code of the test process.
    pub returncode: Option<i64>,
    pub time: TimeAttribute,
    pub subtests: Subtests,
    /// Description of an exception raised while running the test.
    pub exception: Option<String>,
    pub traceback: Option<String>,
    /// Kernel log captured around the test.
    pub dmesg: Option<String>,
    pub pid: Option<u32>,
}

impl Default for TestResult {
    fn default() -> Self {
        TestResult::new(Status::NotRun)
    }
}

impl TestResult {
    pub fn new(result: Status) -> Self {
        TestResult {
            result,
            err: String::new(),
            out: String::new(),
            environment: String::new(),
            command: String::new(),
            returncode: None,
            time: TimeAttribute::default(),
            subtests: Subtests::new(),
            exception: None,
            traceback: None,
            dmesg: None,
            pid: None,
        }
    }

    /// The effective status: the worst subtest if there are any subtests,
    /// otherwise the stored status.
    pub fn result(&self) -> Status {
        self.subtests.worst().unwrap_or(self.result)
    }

    pub fn set_status(&mut self, status: Status) {
        self.result = status;
    }

    /// Set the stored status from a token.
    pub fn set_result(&mut self, token: &str) -> Result<()> {
        self.result = token.parse()?;
        Ok(())
    }

    pub fn err(&self) -> &str {
        &self.err
    }

    pub fn out(&self) -> &str {
        &self.out
    }

    pub fn environment(&self) -> &str {
        &self.environment
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    pub fn set_err(&mut self, value: impl Into<Text>) {
        self.err = value.into().into_string();
    }

    pub fn set_out(&mut self, value: impl Into<Text>) {
        self.out = value.into().into_string();
    }

    pub fn set_environment(&mut self, value: impl Into<Text>) {
        self.environment = value.into().into_string();
    }

    pub fn set_command(&mut self, value: impl Into<Text>) {
        self.command = value.into().into_string();
    }

    /// Assign a text field from an untyped value.
    ///
    /// On a type error the previous value is kept.
    pub fn set_text_field(&mut self, field: &str, value: &Value) -> Result<()> {
        let slot = match field {
            "err" => &mut self.err,
            "out" => &mut self.out,
            "environment" => &mut self.environment,
            "command" => &mut self.command,
            other => return Err(Error::NotFound(format!("text field {}", other))),
        };
        *slot = text_from_value(field, value)?.into_string();
        Ok(())
    }

    /// Merge a partial result into this record.
    ///
    /// Known top-level fields present in `partial` overwrite the current
    /// values. A nested `subtest` (or `subtests`) mapping is merged into the
    /// existing subtests. Unknown keys are ignored. Nothing is applied if any
    /// field fails to convert.
    pub fn update(&mut self, partial: &Value) -> Result<()> {
        let map = partial.as_object().ok_or_else(|| {
            Error::Decode(format!(
                "partial result must be a mapping, got {}",
                value_kind(partial)
            ))
        })?;

        let mut next = self.clone();
        for (key, value) in map {
            match key.as_str() {
                "result" => next.result = status_from_value(value)?,
                "subtest" | "subtests" => next.subtests.merge_value(value)?,
                "err" | "out" | "environment" | "command" => next.set_text_field(key, value)?,
                "returncode" => next.returncode = integer_field(key, value)?,
                "pid" => {
                    next.pid = integer_field(key, value)?
                        .map(|p| {
                            u32::try_from(p)
                                .map_err(|_| Error::Decode(format!("invalid pid {}", p)))
                        })
                        .transpose()?
                }
                "time" => next.time = TimeAttribute::from_value(value)?,
                "exception" => next.exception = optional_text_from_value(key, value)?,
                "traceback" => next.traceback = optional_text_from_value(key, value)?,
                "dmesg" => next.dmesg = optional_text_from_value(key, value)?,
                TYPE_KEY => {}
                other => debug!("Ignoring unknown result field {:?}", other),
            }
        }

        *self = next;
        Ok(())
    }
}

fn integer_field(key: &str, value: &Value) -> Result<Option<i64>> {
    match value {
        Value::Null => Ok(None),
        v => v
            .as_i64()
            .map(Some)
            .ok_or_else(|| Error::Decode(format!("{} must be an integer, got {}", key, value_kind(v)))),
    }
}

impl JsonRecord for TestResult {
    const TYPE_TAG: &'static str = "TestResult";

    fn to_json(&self) -> Value {
        json!({
            "result": self.result.to_json(),
            "returncode": self.returncode,
            "err": self.err,
            "out": self.out,
            "environment": self.environment,
            "command": self.command,
            "time": self.time.to_json(),
            "subtests": self.subtests.to_json(),
            "exception": optional_json(&self.exception),
            "traceback": optional_json(&self.traceback),
            "dmesg": optional_json(&self.dmesg),
            "pid": self.pid,
            TYPE_KEY: Self::TYPE_TAG,
        })
    }

    /// Missing fields keep their defaults. `time` may be the legacy bare
    /// number of seconds.
    fn from_dict(value: &Value) -> Result<Self> {
        let map: &Map<String, Value> = expect_object(value, Self::TYPE_TAG)?;
        let mut test = TestResult::default();
        test.update(&Value::Object(map.clone()))?;
        Ok(test)
    }
}
