//! Merge a partial result into one test of a results file

use crate::commands::utils::{load_run, save_run};
use crate::commands::Command;
use crate::error::Result;
use crate::ui::UI;
use log::info;
use serde_json::Value;
use std::path::PathBuf;

pub struct UpdateCommand {
    results_path: PathBuf,
    test_name: String,
    partial: String,
}

impl UpdateCommand {
    /// `partial` is a JSON mapping as accepted by `TestResult::update`.
    pub fn new(
        results_path: impl Into<PathBuf>,
        test_name: impl Into<String>,
        partial: impl Into<String>,
    ) -> Self {
        UpdateCommand {
            results_path: results_path.into(),
            test_name: test_name.into(),
            partial: partial.into(),
        }
    }
}

impl Command for UpdateCommand {
    fn execute(&self, ui: &mut dyn UI) -> Result<i32> {
        let partial: Value = serde_json::from_str(&self.partial)?;
        let mut run = load_run(&self.results_path)?;

        let test = run.tests.entry(self.test_name.clone()).or_default();
        test.update(&partial)?;
        let status = test.result();

        run.calculate_group_totals();
        save_run(&self.results_path, &run)?;

        info!("Updated {} in {}", self.test_name, self.results_path.display());
        ui.output(&format!("{}: {}", self.test_name, status))?;
        Ok(0)
    }

    fn name(&self) -> &str {
        "update"
    }

    fn help(&self) -> &str {
        "Merge a partial JSON result into a test"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::results::{TestResult, TestrunResult};
    use crate::status::Status;
    use crate::ui::test_ui::TestUI;
    use tempfile::TempDir;

    fn write_run(temp: &TempDir) -> PathBuf {
        let mut run = TestrunResult::new();
        run.tests
            .insert("cl/a".to_string(), TestResult::new(Status::Pass));
        let path = temp.path().join("results.json");
        save_run(&path, &run).unwrap();
        path
    }

    #[test]
    fn test_update_existing_test() {
        let temp = TempDir::new().unwrap();
        let path = write_run(&temp);

        let mut ui = TestUI::new();
        let cmd = UpdateCommand::new(&path, "cl/a", r#"{"subtest": {"x": "fail"}}"#);
        assert_eq!(cmd.execute(&mut ui).unwrap(), 0);
        assert_eq!(ui.output, vec!["cl/a: fail"]);

        let run = load_run(&path).unwrap();
        assert_eq!(run.get_result("cl/a/x").unwrap(), Status::Fail);
        assert_eq!(run.totals["cl/a"][Status::Fail], 1);
    }

    #[test]
    fn test_update_creates_missing_test() {
        let temp = TempDir::new().unwrap();
        let path = write_run(&temp);

        let mut ui = TestUI::new();
        let cmd = UpdateCommand::new(&path, "cl/b", r#"{"result": "incomplete"}"#);
        cmd.execute(&mut ui).unwrap();

        let run = load_run(&path).unwrap();
        assert_eq!(run.tests.len(), 2);
        assert_eq!(run.get_result("cl/b").unwrap(), Status::Incomplete);
    }

    #[test]
    fn test_update_invalid_partial_leaves_file() {
        let temp = TempDir::new().unwrap();
        let path = write_run(&temp);

        let mut ui = TestUI::new();
        let cmd = UpdateCommand::new(&path, "cl/a", r#"{"result": "poop"}"#);
        assert!(matches!(cmd.execute(&mut ui), Err(Error::InvalidStatus(_))));

        let cmd = UpdateCommand::new(&path, "cl/a", "not json");
        assert!(matches!(cmd.execute(&mut ui), Err(Error::Json(_))));

        assert_eq!(load_run(&path).unwrap().get_result("cl/a").unwrap(), Status::Pass);
    }
}
