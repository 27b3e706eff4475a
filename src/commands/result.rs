//! Look up a single test or subtest status

use crate::commands::utils::load_run;
use crate::commands::Command;
use crate::error::Result;
use crate::ui::UI;
use std::path::PathBuf;

pub struct ResultCommand {
    results_path: PathBuf,
    test_path: String,
}

impl ResultCommand {
    pub fn new(results_path: impl Into<PathBuf>, test_path: impl Into<String>) -> Self {
        ResultCommand {
            results_path: results_path.into(),
            test_path: test_path.into(),
        }
    }
}

impl Command for ResultCommand {
    fn execute(&self, ui: &mut dyn UI) -> Result<i32> {
        let run = load_run(&self.results_path)?;
        let status = run.get_result(&self.test_path)?;
        ui.output(status.as_str())?;
        Ok(0)
    }

    fn name(&self) -> &str {
        "result"
    }

    fn help(&self) -> &str {
        "Show the status of a test or subtest"
    }
}
