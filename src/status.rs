//! Test outcome severities
//!
//! Every test and subtest ends in one [`Status`]. Statuses are totally ordered
//! by severity so that the worst outcome of a set can be picked with `max`.

use crate::error::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Outcome of a test or subtest.
///
/// Ordering follows [`Status::severity`], not declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    /// Test was never executed.
    NotRun,
    /// Test passed.
    Pass,
    /// Test was skipped (missing extension, unsupported configuration, ...).
    Skip,
    /// Test passed with warnings.
    Warn,
    /// Test passed but the kernel log reported warnings.
    DmesgWarn,
    /// Test failed.
    Fail,
    /// Test failed and the kernel log reported problems.
    DmesgFail,
    /// Test exceeded its time limit.
    Timeout,
    /// Test process crashed.
    Crash,
    /// Test did not finish; the run was interrupted while it was executing.
    Incomplete,
}

impl Status {
    /// All statuses, from least to most severe.
    pub const ALL: [Status; 10] = [
        Status::NotRun,
        Status::Pass,
        Status::Skip,
        Status::Warn,
        Status::DmesgWarn,
        Status::Fail,
        Status::DmesgFail,
        Status::Timeout,
        Status::Crash,
        Status::Incomplete,
    ];

    /// Rank in the severity table. Higher is worse.
    pub fn severity(self) -> u8 {
        match self {
            Status::NotRun => 0,
            Status::Pass => 1,
            Status::Skip => 2,
            Status::Warn => 3,
            Status::DmesgWarn => 4,
            Status::Fail => 5,
            Status::DmesgFail => 6,
            Status::Timeout => 7,
            Status::Crash => 8,
            Status::Incomplete => 9,
        }
    }

    /// The canonical wire token.
    pub fn as_str(self) -> &'static str {
        match self {
            Status::NotRun => "notrun",
            Status::Pass => "pass",
            Status::Skip => "skip",
            Status::Warn => "warn",
            Status::DmesgWarn => "dmesg-warn",
            Status::Fail => "fail",
            Status::DmesgFail => "dmesg-fail",
            Status::Timeout => "timeout",
            Status::Crash => "crash",
            Status::Incomplete => "incomplete",
        }
    }

    /// Returns true if this status is non-failing.
    ///
    /// Successes include: Pass, Skip and NotRun.
    pub fn is_success(self) -> bool {
        matches!(self, Status::Pass | Status::Skip | Status::NotRun)
    }

    /// Returns true if this status represents a failure condition.
    ///
    /// This is the truth value of a status: anything that is not a success.
    pub fn is_failure(self) -> bool {
        !self.is_success()
    }

    /// Serialized form, identical to the token.
    pub fn to_json(self) -> serde_json::Value {
        serde_json::Value::String(self.as_str().to_string())
    }
}

impl FromStr for Status {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let token = s.trim().to_ascii_lowercase();
        let status = match token.as_str() {
            "notrun" | "not-run" | "not_run" => Status::NotRun,
            "pass" | "passed" | "success" => Status::Pass,
            "skip" | "skipped" => Status::Skip,
            "warn" | "warning" => Status::Warn,
            "dmesg-warn" | "dmesg_warn" => Status::DmesgWarn,
            "fail" | "failed" | "failure" => Status::Fail,
            "dmesg-fail" | "dmesg_fail" => Status::DmesgFail,
            "timeout" => Status::Timeout,
            "crash" => Status::Crash,
            "incomplete" => Status::Incomplete,
            _ => return Err(Error::InvalidStatus(s.to_string())),
        };
        Ok(status)
    }
}

impl TryFrom<&str> for Status {
    type Error = Error;

    fn try_from(s: &str) -> Result<Self> {
        s.parse()
    }
}

impl PartialOrd for Status {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Status {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.severity().cmp(&other.severity())
    }
}

impl PartialEq<str> for Status {
    fn eq(&self, other: &str) -> bool {
        other.parse::<Status>().map(|s| s == *self).unwrap_or(false)
    }
}

impl PartialEq<&str> for Status {
    fn eq(&self, other: &&str) -> bool {
        *self == **other
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Status {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Status {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let token = String::deserialize(deserializer)?;
        token.parse().map_err(serde::de::Error::custom)
    }
}

/// Parse a status out of an arbitrary JSON value.
pub(crate) fn status_from_value(value: &serde_json::Value) -> Result<Status> {
    match value {
        serde_json::Value::String(s) => s.parse(),
        other => Err(Error::InvalidStatus(other.to_string())),
    }
}
