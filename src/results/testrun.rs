//! The record of a whole run

use super::{expect_object, optional_json, JsonRecord, TestResult, TimeAttribute, Totals, TYPE_KEY};
use crate::error::{Error, Result};
use crate::grouptools;
use crate::status::Status;
use crate::text::{optional_text_from_value, value_kind};
use indexmap::IndexMap;
use log::warn;
use serde_json::{json, Map, Value};
use std::collections::BTreeMap;

/// Version of the serialized result format written by this crate.
pub const RESULTS_VERSION: u64 = 9;

/// Key under which totals for the whole run are stored.
pub const ROOT_GROUP: &str = "root";

/// A complete run: metadata, per-test records and grouped totals.
///
/// Totals are not kept in sync with `tests`; call
/// [`TestrunResult::calculate_group_totals`] once results are collected.
///
/// # Examples
///
/// ```
/// use conformance_results::results::{TestResult, TestrunResult};
/// use conformance_results::status::Status;
///
/// let mut run = TestrunResult::new();
/// run.tests.insert("oink".to_string(), TestResult::new(Status::Pass));
/// run.tests.insert("foo/bar".to_string(), TestResult::new(Status::Fail));
/// run.calculate_group_totals();
///
/// assert_eq!(run.totals["root"][Status::Pass], 1);
/// assert_eq!(run.totals["foo"][Status::Fail], 1);
/// assert_eq!(run.get_result("foo/bar").unwrap(), Status::Fail);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TestrunResult {
    pub name: Option<String>,
    pub uname: Option<String>,
    pub glxinfo: Option<String>,
    pub clinfo: Option<String>,
    pub wglinfo: Option<String>,
    pub lspci: Option<String>,
    /// Configuration the run was started with.
    pub options: Map<String, Value>,
    pub time_elapsed: TimeAttribute,
    /// Test records keyed by group path.
    pub tests: IndexMap<String, TestResult>,
    pub results_version: u64,
    /// Status counts keyed by group path, plus [`ROOT_GROUP`].
    pub totals: BTreeMap<String, Totals>,
}

impl Default for TestrunResult {
    fn default() -> Self {
        TestrunResult {
            name: None,
            uname: None,
            glxinfo: None,
            clinfo: None,
            wglinfo: None,
            lspci: None,
            options: Map::new(),
            time_elapsed: TimeAttribute::default(),
            tests: IndexMap::new(),
            results_version: RESULTS_VERSION,
            totals: BTreeMap::new(),
        }
    }
}

impl TestrunResult {
    pub fn new() -> Self {
        TestrunResult::default()
    }

    /// Compute totals for every group from the current tests.
    ///
    /// A test without subtests adds one count for its status to each of its
    /// ancestor groups and to the root. A test with subtests is itself a
    /// group: each subtest adds one count to the test's own path, its
    /// ancestors and the root, and the test's stored status is not counted.
    pub fn group_totals(&self) -> BTreeMap<String, Totals> {
        let mut totals: BTreeMap<String, Totals> = BTreeMap::new();
        totals.entry(ROOT_GROUP.to_string()).or_default();

        let mut add = |group: &str, status: Status| {
            totals.entry(group.to_string()).or_default().increment(status);
        };

        // A group literally named "root" shares the root counts.
        for (name, test) in &self.tests {
            let groups = || grouptools::ancestors(name).filter(|g| *g != ROOT_GROUP);
            if test.subtests.is_empty() {
                let status = test.result();
                for group in groups() {
                    add(group, status);
                }
                add(ROOT_GROUP, status);
            } else {
                for status in test.subtests.values() {
                    if name != ROOT_GROUP {
                        add(name.as_str(), status);
                    }
                    for group in groups() {
                        add(group, status);
                    }
                    add(ROOT_GROUP, status);
                }
            }
        }

        totals
    }

    /// Recompute and store [`TestrunResult::totals`].
    pub fn calculate_group_totals(&mut self) {
        self.totals = self.group_totals();
    }

    /// Look up a test or subtest status by path.
    ///
    /// A path naming a test returns that test's effective status. Otherwise
    /// the last segment is looked up as a subtest of the test named by the
    /// rest of the path.
    pub fn get_result(&self, path: &str) -> Result<Status> {
        if let Some(test) = self.tests.get(path) {
            return Ok(test.result());
        }

        let (parent, subtest) = grouptools::splitname(path);
        self.tests
            .get(parent)
            .and_then(|test| test.subtests.get(subtest))
            .ok_or_else(|| Error::NotFound(path.to_string()))
    }
}

fn optional_field(map: &Map<String, Value>, key: &str) -> Result<Option<String>> {
    map.get(key)
        .map_or(Ok(None), |v| optional_text_from_value(key, v))
}

impl JsonRecord for TestrunResult {
    const TYPE_TAG: &'static str = "TestrunResult";

    /// Totals are included; they are computed on the fly if they have not
    /// been calculated yet.
    fn to_json(&self) -> Value {
        let totals = if self.totals.is_empty() {
            self.group_totals()
        } else {
            self.totals.clone()
        };

        let tests: Map<String, Value> = self
            .tests
            .iter()
            .map(|(name, test)| (name.clone(), test.to_json()))
            .collect();
        let totals: Map<String, Value> = totals
            .iter()
            .map(|(group, t)| (group.clone(), t.to_json()))
            .collect();

        json!({
            "name": optional_json(&self.name),
            "uname": optional_json(&self.uname),
            "glxinfo": optional_json(&self.glxinfo),
            "clinfo": optional_json(&self.clinfo),
            "wglinfo": optional_json(&self.wglinfo),
            "lspci": optional_json(&self.lspci),
            "options": self.options,
            "time_elapsed": self.time_elapsed.to_json(),
            "tests": tests,
            "results_version": self.results_version,
            "totals": totals,
            TYPE_KEY: Self::TYPE_TAG,
        })
    }

    /// Stored totals are restored as-is; when absent they are recomputed.
    fn from_dict(value: &Value) -> Result<Self> {
        let map = expect_object(value, Self::TYPE_TAG)?;
        let mut run = TestrunResult {
            name: optional_field(map, "name")?,
            uname: optional_field(map, "uname")?,
            glxinfo: optional_field(map, "glxinfo")?,
            clinfo: optional_field(map, "clinfo")?,
            wglinfo: optional_field(map, "wglinfo")?,
            lspci: optional_field(map, "lspci")?,
            ..TestrunResult::default()
        };

        match map.get("options") {
            None | Some(Value::Null) => {}
            Some(Value::Object(options)) => run.options = options.clone(),
            Some(other) => {
                return Err(Error::Decode(format!(
                    "options must be a mapping, got {}",
                    value_kind(other)
                )))
            }
        }

        if let Some(time) = map.get("time_elapsed").filter(|v| !v.is_null()) {
            run.time_elapsed = TimeAttribute::from_value(time)?;
        }

        if let Some(version) = map.get("results_version") {
            run.results_version = version
                .as_u64()
                .ok_or_else(|| Error::Decode("results_version must be an integer".to_string()))?;
            if run.results_version > RESULTS_VERSION {
                warn!(
                    "Results version {} is newer than supported version {}",
                    run.results_version, RESULTS_VERSION
                );
            }
        }

        if let Some(tests) = map.get("tests") {
            let tests = expect_object(tests, "tests")?;
            for (name, test) in tests {
                run.tests.insert(name.clone(), TestResult::from_dict(test)?);
            }
        }

        match map.get("totals").and_then(Value::as_object) {
            Some(totals) if !totals.is_empty() => {
                for (group, t) in totals {
                    run.totals.insert(group.clone(), Totals::from_dict(t)?);
                }
            }
            _ => run.calculate_group_totals(),
        }

        Ok(run)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grouptools::join;

    fn totals_of(pairs: &[(Status, u64)]) -> Totals {
        let mut totals = Totals::new();
        for (status, count) in pairs {
            totals[*status] = *count;
        }
        totals
    }

    fn sample_run() -> TestrunResult {
        let mut run = TestrunResult::new();
        run.tests
            .insert("oink".to_string(), TestResult::new(Status::Pass));
        run.tests
            .insert(join(&["foo", "bar"]), TestResult::new(Status::Fail));
        run.tests
            .insert(join(&["foo", "foo", "bar"]), TestResult::new(Status::Crash));
        run.tests
            .insert(join(&["foo", "foo", "oink"]), TestResult::new(Status::Skip));
        run
    }

    #[test]
    fn test_default() {
        let run = TestrunResult::new();
        assert_eq!(run.results_version, RESULTS_VERSION);
        assert!(run.tests.is_empty());
        assert!(run.totals.is_empty());
    }

    #[test]
    fn test_totals_root() {
        let mut run = sample_run();
        run.calculate_group_totals();

        assert_eq!(
            run.totals["root"],
            totals_of(&[
                (Status::Pass, 1),
                (Status::Fail, 1),
                (Status::Crash, 1),
                (Status::Skip, 1)
            ])
        );
    }

    #[test]
    fn test_totals_recurse() {
        let mut run = sample_run();
        run.calculate_group_totals();

        assert_eq!(
            run.totals["foo"],
            totals_of(&[(Status::Fail, 1), (Status::Crash, 1), (Status::Skip, 1)])
        );
        assert_eq!(
            run.totals["foo/foo"],
            totals_of(&[(Status::Crash, 1), (Status::Skip, 1)])
        );
    }

    #[test]
    fn test_totals_leaf_tests_are_not_groups() {
        let mut run = sample_run();
        run.calculate_group_totals();

        assert!(!run.totals.contains_key("oink"));
        assert!(!run.totals.contains_key("foo/bar"));
        assert!(!run.totals.contains_key(""));
    }

    #[test]
    fn test_totals_with_subtests() {
        let mut test = TestResult::new(Status::Crash);
        test.subtests.insert("foo", Status::Pass);
        test.subtests.insert("bar", Status::Crash);
        test.subtests.insert("oink", Status::Fail);

        let mut run = TestrunResult::new();
        run.tests.insert(join(&["sub", "test"]), test);
        run.calculate_group_totals();

        let expected = totals_of(&[(Status::Pass, 1), (Status::Crash, 1), (Status::Fail, 1)]);
        assert_eq!(run.totals["root"], expected);
        assert_eq!(run.totals["sub"], expected);
        assert_eq!(run.totals["sub/test"], expected);
    }

    #[test]
    fn test_totals_recalculation_replaces() {
        let mut run = sample_run();
        run.calculate_group_totals();
        run.tests.shift_remove("oink");
        run.calculate_group_totals();
        assert_eq!(run.totals["root"][Status::Pass], 0);
        assert_eq!(run.totals["root"].total(), 3);
    }

    #[test]
    fn test_totals_group_named_root_counted_once() {
        let mut nested = TestResult::new(Status::Pass);
        nested.subtests.insert("a", Status::Fail);

        let mut run = TestrunResult::new();
        run.tests
            .insert("root/x".to_string(), TestResult::new(Status::Fail));
        run.tests.insert("root".to_string(), nested);
        run.calculate_group_totals();

        assert_eq!(run.totals["root"][Status::Fail], 2);
        assert_eq!(run.totals["root"].total(), 2);
        assert_eq!(run.totals.len(), 1);
    }

    #[test]
    fn test_empty_run_has_zero_root() {
        let mut run = TestrunResult::new();
        run.calculate_group_totals();
        assert!(!run.totals["root"].is_nonzero());
    }

    fn lookup_run() -> TestrunResult {
        let mut sub = TestResult::new(Status::Crash);
        sub.subtests.insert("foo", Status::Pass);

        let mut run = TestrunResult::new();
        run.tests.insert("sub".to_string(), sub);
        run.tests
            .insert("test".to_string(), TestResult::new(Status::Pass));
        run.calculate_group_totals();
        run
    }

    #[test]
    fn test_get_result_test() {
        assert_eq!(lookup_run().get_result("test").unwrap(), Status::Pass);
    }

    #[test]
    fn test_get_result_subtest() {
        assert_eq!(
            lookup_run().get_result(&join(&["sub", "foo"])).unwrap(),
            Status::Pass
        );
    }

    #[test]
    fn test_get_result_missing() {
        let run = lookup_run();
        assert!(matches!(
            run.get_result("fooobar"),
            Err(Error::NotFound(ref p)) if p == "fooobar"
        ));
        assert!(run.get_result("sub/missing").is_err());
        assert!(run.get_result("test/foo").is_err());
    }

    fn populated_run() -> TestrunResult {
        let mut subtest = TestResult::new(Status::Fail);
        subtest.subtests.insert("foo", Status::Pass);

        let mut run = TestrunResult::new();
        run.name = Some("name".to_string());
        run.uname = Some("this is uname".to_string());
        run.options
            .insert("some".to_string(), Value::from("option"));
        run.glxinfo = Some("glxinfo".to_string());
        run.clinfo = Some("clinfo".to_string());
        run.wglinfo = Some("wglinfo".to_string());
        run.lspci = Some("this is lspci".to_string());
        run.time_elapsed.end = 1.23;
        run.tests
            .insert("a test".to_string(), TestResult::new(Status::Pass));
        run.tests.insert("subtest".to_string(), subtest);
        run
    }

    #[test]
    fn test_to_json() {
        let run = populated_run();
        let value = run.to_json();

        assert_eq!(value["__type__"], json!("TestrunResult"));
        assert_eq!(value["name"], json!("name"));
        assert_eq!(value["uname"], json!("this is uname"));
        assert_eq!(value["options"], json!({"some": "option"}));
        assert_eq!(value["glxinfo"], json!("glxinfo"));
        assert_eq!(value["wglinfo"], json!("wglinfo"));
        assert_eq!(value["clinfo"], json!("clinfo"));
        assert_eq!(value["lspci"], json!("this is lspci"));
        assert_eq!(value["time_elapsed"]["end"], json!(1.23));
        assert_eq!(value["tests"]["a test"]["result"], json!("pass"));
        assert_eq!(value["tests"]["a test"]["__type__"], json!("TestResult"));
        assert_eq!(value["results_version"], json!(RESULTS_VERSION));
        assert_eq!(value["totals"]["root"]["pass"], json!(2));
        assert_eq!(value["totals"]["subtest"]["__type__"], json!("Totals"));
    }

    #[test]
    fn test_from_dict_round_trip() {
        let mut baseline = populated_run();
        baseline.results_version = 100000;
        let value = baseline.to_json();
        baseline.calculate_group_totals();

        let restored = TestrunResult::from_dict(&value).unwrap();
        assert_eq!(restored.name, baseline.name);
        assert_eq!(restored.uname, baseline.uname);
        assert_eq!(restored.glxinfo, baseline.glxinfo);
        assert_eq!(restored.wglinfo, baseline.wglinfo);
        assert_eq!(restored.clinfo, baseline.clinfo);
        assert_eq!(restored.lspci, baseline.lspci);
        assert_eq!(restored.results_version, 100000);
        assert_eq!(restored.options, baseline.options);
        assert_eq!(restored.time_elapsed, baseline.time_elapsed);
        assert_eq!(restored.tests["a test"].result(), Status::Pass);
        assert_eq!(
            restored.tests["subtest"].subtests.get("foo"),
            Some(Status::Pass)
        );
        assert_eq!(restored.totals, baseline.totals);
        assert_eq!(restored, baseline);
    }

    #[test]
    fn test_from_dict_computes_missing_totals() {
        let value = json!({
            "tests": {
                "foo/bar": {"result": "fail"},
                "foo/baz": {"result": "pass"},
            }
        });
        let run = TestrunResult::from_dict(&value).unwrap();
        assert_eq!(run.totals["foo"].total(), 2);
        assert_eq!(run.results_version, RESULTS_VERSION);
        assert_eq!(run.name, None);
    }

    #[test]
    fn test_from_dict_errors() {
        assert!(TestrunResult::from_dict(&json!({"tests": []})).is_err());
        assert!(TestrunResult::from_dict(&json!({"options": "x"})).is_err());
        assert!(matches!(
            TestrunResult::from_dict(&json!({"tests": {"a": {"result": "nope"}}})),
            Err(Error::InvalidStatus(_))
        ));
    }
}
