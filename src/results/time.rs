//! Start/end timestamps of a test or run

use super::{expect_object, JsonRecord, TYPE_KEY};
use crate::error::{Error, Result};
use crate::text::value_kind;
use serde_json::{json, Value};

/// Wall-clock interval, in seconds since the epoch (or any common origin).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TimeAttribute {
    pub start: f64,
    pub end: f64,
}

impl TimeAttribute {
    pub fn new(start: f64, end: f64) -> Self {
        TimeAttribute { start, end }
    }

    /// Elapsed seconds. Never negative.
    pub fn total(&self) -> f64 {
        (self.end - self.start).max(0.0)
    }

    /// Elapsed time rendered as `H:MM:SS`, with microseconds when present
    /// and a day count for intervals of a day or more.
    pub fn delta(&self) -> String {
        let delta = chrono::Duration::microseconds((self.total() * 1_000_000.0).round() as i64);

        let days = delta.num_days();
        let hours = delta.num_hours() % 24;
        let minutes = delta.num_minutes() % 60;
        let seconds = delta.num_seconds() % 60;
        let micros = delta.num_microseconds().unwrap_or(0) % 1_000_000;

        let mut rendered = String::new();
        if days > 0 {
            let unit = if days == 1 { "day" } else { "days" };
            rendered.push_str(&format!("{} {}, ", days, unit));
        }
        rendered.push_str(&format!("{}:{:02}:{:02}", hours, minutes, seconds));
        if micros > 0 {
            rendered.push_str(&format!(".{:06}", micros));
        }
        rendered
    }

    /// Stamp the start with the current time.
    pub fn start_now(&mut self) {
        self.start = now_seconds();
    }

    /// Stamp the end with the current time.
    pub fn stop_now(&mut self) {
        self.end = now_seconds();
    }

    /// Decode either a tagged `{start, end}` mapping or a bare number of
    /// seconds, as written by older result files.
    pub fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Number(n) => n
                .as_f64()
                .map(|t| TimeAttribute::new(0.0, t))
                .ok_or_else(|| Error::Decode(format!("invalid time value: {}", n))),
            Value::Object(_) => Self::from_dict(value),
            other => Err(Error::Decode(format!(
                "time must be a number or mapping, got {}",
                value_kind(other)
            ))),
        }
    }
}

fn now_seconds() -> f64 {
    chrono::Utc::now().timestamp_micros() as f64 / 1_000_000.0
}

fn seconds_field(map: &serde_json::Map<String, Value>, key: &str) -> Result<f64> {
    match map.get(key) {
        None | Some(Value::Null) => Ok(0.0),
        Some(v) => v
            .as_f64()
            .ok_or_else(|| Error::Decode(format!("TimeAttribute.{} must be a number", key))),
    }
}

impl JsonRecord for TimeAttribute {
    const TYPE_TAG: &'static str = "TimeAttribute";

    fn to_json(&self) -> Value {
        json!({
            "start": self.start,
            "end": self.end,
            TYPE_KEY: Self::TYPE_TAG,
        })
    }

    fn from_dict(value: &Value) -> Result<Self> {
        let map = expect_object(value, Self::TYPE_TAG)?;
        Ok(TimeAttribute {
            start: seconds_field(map, "start")?,
            end: seconds_field(map, "end")?,
        })
    }
}
