//! conformance-results - result data model for conformance test runs
//!
//! This crate records, aggregates and serializes the outcome of running a
//! graphics/compute conformance suite: per-test status, captured output,
//! timing, subtests, and status totals for every group of tests.
//!
//! # Architecture
//!
//! - [`status`]: ordered outcome severities
//! - [`results`]: [`results::TestResult`], [`results::TestrunResult`] and their parts
//! - [`grouptools`]: slash-separated group path helpers
//! - [`codec`]: `__type__`-tagged decoding and JSON document I/O
//! - [`config`]: results.conf parsing
//! - [`commands`]: the `cresults` subcommands
//! - [`ui`]: User interface abstraction for output
//! - [`error`]: Error types and Result alias
//!
//! # Example
//!
//! ```
//! use conformance_results::results::{JsonRecord, TestResult, TestrunResult};
//! use conformance_results::status::Status;
//!
//! # fn main() -> conformance_results::error::Result<()> {
//! let mut run = TestrunResult::new();
//! run.name = Some("nightly".to_string());
//!
//! let mut test = TestResult::new(Status::Pass);
//! test.update(&serde_json::json!({"subtest": {"int2": "pass", "half2": "fail"}}))?;
//! run.tests.insert("cl/vload/global".to_string(), test);
//!
//! run.calculate_group_totals();
//! assert_eq!(run.totals["cl/vload"][Status::Fail], 1);
//! assert_eq!(run.get_result("cl/vload/global/half2")?, Status::Fail);
//!
//! let restored = TestrunResult::from_dict(&run.to_json())?;
//! assert_eq!(restored, run);
//! # Ok(())
//! # }
//! ```

pub mod codec;
pub mod commands;
pub mod config;
pub mod error;
pub mod grouptools;
pub mod results;
pub mod status;
pub mod text;
pub mod ui;

pub use error::{Error, Result};
