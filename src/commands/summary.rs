//! Summarize a results file

use crate::commands::utils::load_run;
use crate::commands::Command;
use crate::config::ResultsConfig;
use crate::error::Result;
use crate::results::testrun::ROOT_GROUP;
use crate::results::Totals;
use crate::ui::UI;
use log::info;
use std::path::{Path, PathBuf};

pub struct SummaryCommand {
    results_path: PathBuf,
    config_path: Option<PathBuf>,
}

impl SummaryCommand {
    pub fn new(results_path: impl Into<PathBuf>) -> Self {
        SummaryCommand {
            results_path: results_path.into(),
            config_path: None,
        }
    }

    pub fn with_config(results_path: impl Into<PathBuf>, config_path: Option<PathBuf>) -> Self {
        SummaryCommand {
            results_path: results_path.into(),
            config_path,
        }
    }

    fn format_totals(&self, totals: &Totals, config: &ResultsConfig) -> Option<String> {
        let parts: Vec<String> = totals
            .iter()
            .filter(|(status, count)| *count > 0 && !config.exclude.contains(status))
            .map(|(status, count)| format!("{} {}", status, count))
            .collect();

        if parts.is_empty() {
            None
        } else {
            Some(parts.join(", "))
        }
    }
}

impl Command for SummaryCommand {
    fn execute(&self, ui: &mut dyn UI) -> Result<i32> {
        let mut run = load_run(&self.results_path)?;
        let config_dir = self
            .results_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let config = ResultsConfig::discover(self.config_path.as_deref(), config_dir)?;

        info!(
            "Summarizing {} tests from {}",
            run.tests.len(),
            self.results_path.display()
        );
        run.calculate_group_totals();

        ui.output(&format!(
            "Name: {}",
            run.name.as_deref().unwrap_or("<unnamed>")
        ))?;
        ui.output(&format!("Tests: {}", run.tests.len()))?;
        ui.output(&format!("Time: {}", run.time_elapsed.delta()))?;

        // Root first, then groups in path order.
        let groups = run
            .totals
            .get_key_value(ROOT_GROUP)
            .into_iter()
            .chain(run.totals.iter().filter(|(g, _)| g.as_str() != ROOT_GROUP));
        for (group, totals) in groups {
            if let Some(line) = self.format_totals(totals, &config) {
                ui.output(&format!("{}: {}", group, line))?;
            }
        }

        let failures: Vec<(&String, bool, String)> = run
            .tests
            .iter()
            .filter(|(_, test)| test.result().is_failure())
            .map(|(name, test)| {
                let status = test.result();
                (name, config.is_expected(name, status), status.to_string())
            })
            .collect();

        if failures.is_empty() {
            return Ok(0);
        }

        ui.output("")?;
        ui.output("Failures:")?;
        for (name, expected, status) in &failures {
            if *expected {
                ui.output(&format!("  {}: {} (expected)", status, name))?;
            } else {
                ui.output(&format!("  {}: {}", status, name))?;
            }
        }

        let unexpected = failures.iter().filter(|(_, expected, _)| !expected).count();
        if unexpected > 0 {
            ui.warning(&format!("{} unexpected failure(s)", unexpected))?;
            Ok(1)
        } else {
            Ok(0)
        }
    }

    fn name(&self) -> &str {
        "summary"
    }

    fn help(&self) -> &str {
        "Show grouped status totals and failing tests of a results file"
    }
}
