//! Configuration file (results.conf) parsing
//!
//! The configuration uses INI format:
//!
//! ```ini
//! [summary]
//! exclude=skip notrun
//!
//! [expected-failures]
//! cl/vload/half2=
//!
//! [expected-crashes]
//! cl/vload/double16=
//! ```
//!
//! Every section is optional.

use crate::error::{Error, Result};
use crate::status::Status;
use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::Path;

/// Default configuration file name, looked up next to the results file.
pub const CONFIG_FILE: &str = "results.conf";

/// Configuration loaded from results.conf
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultsConfig {
    /// Statuses hidden from summary output
    pub exclude: BTreeSet<Status>,

    /// Tests whose failure is expected
    pub expected_failures: BTreeSet<String>,

    /// Tests whose crash is expected
    pub expected_crashes: BTreeSet<String>,
}

impl ResultsConfig {
    /// Load configuration from a file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read {}: {}", path.display(), e)))?;

        Self::parse(&contents)
    }

    /// Load `path` if given, else `results.conf` in `dir` if it exists, else
    /// defaults.
    pub fn discover(path: Option<&Path>, dir: &Path) -> Result<Self> {
        match path {
            Some(p) => Self::load_from_file(p),
            None => {
                let candidate = dir.join(CONFIG_FILE);
                if candidate.exists() {
                    Self::load_from_file(&candidate)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Parse configuration from a string
    pub fn parse(contents: &str) -> Result<Self> {
        let ini: HashMap<String, HashMap<String, String>> = serde_ini::from_str(contents)
            .map_err(|e| Error::Config(format!("Failed to parse {}: {}", CONFIG_FILE, e)))?;

        let mut config = ResultsConfig::default();

        if let Some(summary) = ini.get("summary") {
            if let Some(exclude) = summary.get("exclude") {
                config.exclude = parse_status_list(exclude)?;
            }
        }

        if let Some(section) = ini.get("expected-failures") {
            config.expected_failures = section.keys().cloned().collect();
        }

        if let Some(section) = ini.get("expected-crashes") {
            config.expected_crashes = section.keys().cloned().collect();
        }

        Ok(config)
    }

    /// Whether a failing `status` for `test` is anticipated by the configuration
    pub fn is_expected(&self, test: &str, status: Status) -> bool {
        match status {
            Status::Crash => self.expected_crashes.contains(test),
            s if s.is_failure() => self.expected_failures.contains(test),
            _ => false,
        }
    }
}

fn parse_status_list(list: &str) -> Result<BTreeSet<Status>> {
    list.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
        .map(|t| {
            t.parse::<Status>()
                .map_err(|_| Error::Config(format!("Unknown status in exclude: {}", t)))
        })
        .collect()
}
