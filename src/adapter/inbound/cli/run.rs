//! Handler for the `run` command.

use chrono::Utc;
use serde_json::json;
use tabled::{Table, Tabled};
use uuid::Uuid;

use crate::adapter::inbound::cli::command::RunArgs;
use crate::adapter::inbound::cli::output;
use crate::application::scenario::{self, ScenarioOutcome, ScenarioRunner};
use crate::error::{Error, Result};
use crate::infrastructure::config::settings::Config;
use crate::infrastructure::factory::delivery::build_delivery;

#[derive(Tabled)]
struct OutcomeRow {
    #[tabled(rename = "Scenario")]
    name: String,
    #[tabled(rename = "Result")]
    result: String,
    #[tabled(rename = "Elapsed")]
    elapsed: String,
    #[tabled(rename = "Detail")]
    detail: String,
}

impl From<&ScenarioOutcome> for OutcomeRow {
    fn from(outcome: &ScenarioOutcome) -> Self {
        Self {
            name: outcome.name.clone(),
            result: if outcome.passed { "pass" } else { "FAIL" }.to_string(),
            elapsed: format!("{}ms", outcome.elapsed.as_millis()),
            detail: outcome.failure.clone().unwrap_or_default(),
        }
    }
}

/// Apply command-line overrides on top of the loaded configuration.
fn effective_config(args: &RunArgs) -> Result<Config> {
    let mut config = Config::load_or_default(&args.config)?;
    if let Some(kind) = args.delivery {
        config.delivery.kind = kind;
    }
    if let Some(timeout_ms) = args.timeout_ms {
        config.wait.timeout_ms = timeout_ms;
    }
    if let Some(silence_ms) = args.silence_ms {
        config.wait.silence_ms = silence_ms;
    }
    config.validate()?;
    Ok(config)
}

/// Execute the run command.
///
/// Fails with [`Error::Scenario`] if any scenario fails, after the report
/// has been printed.
pub fn execute(args: &RunArgs) -> Result<()> {
    let config = effective_config(args)?;
    config.init_logging();

    let scenarios = scenario::select(&args.scenarios)?;
    let stack = build_delivery(&config.delivery)?;
    let runner = ScenarioRunner::new(
        stack.context(),
        config.wait.timeout(),
        config.wait.silence(),
    );

    let run_id = Uuid::new_v4();
    let started_at = Utc::now();

    output::header(env!("CARGO_PKG_VERSION"));
    output::field("Delivery", config.delivery.kind);
    output::field("Timeout", format!("{}ms", config.wait.timeout_ms));
    if output::verbosity() > 0 {
        output::field("Thread", &config.delivery.thread_name);
        output::field("Silence", format!("{}ms", config.wait.silence_ms));
        output::field("Run ID", run_id);
    }

    let pb = output::spinner("Running scenarios");
    let mut outcomes = Vec::with_capacity(scenarios.len());
    for scenario in &scenarios {
        pb.set_message(format!("Running {}", scenario.name()));
        outcomes.push(runner.run(scenario));
    }

    let failed = outcomes.iter().filter(|outcome| !outcome.passed).count();
    let total = outcomes.len();
    if failed == 0 {
        output::spinner_success(&pb, &format!("{total} scenario(s) passed"));
    } else {
        output::spinner_fail(&pb, &format!("{failed} of {total} scenario(s) failed"));
    }

    if output::is_json() {
        output::json_output(json!({
            "command": "run",
            "run_id": run_id,
            "started_at": started_at,
            "delivery": config.delivery.kind,
            "timeout_ms": config.wait.timeout_ms,
            "passed": total - failed,
            "failed": failed,
            "scenarios": outcomes,
        }));
    } else if !output::is_quiet() || failed > 0 {
        print_table(&outcomes);
    }

    if failed > 0 {
        return Err(Error::Scenario(format!(
            "{failed} of {total} scenario(s) failed"
        )));
    }
    Ok(())
}

fn print_table(outcomes: &[ScenarioOutcome]) {
    let rows: Vec<OutcomeRow> = outcomes.iter().map(OutcomeRow::from).collect();
    let table = Table::new(rows).to_string();
    // Shown even in quiet mode when something failed.
    for line in table.lines() {
        println!("  {line}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::time::Duration;

    fn args(config: PathBuf) -> RunArgs {
        RunArgs {
            config,
            scenarios: Vec::new(),
            delivery: None,
            timeout_ms: None,
            silence_ms: None,
        }
    }

    #[test]
    fn test_missing_config_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let mut run = args(dir.path().join("absent.toml"));
        run.timeout_ms = Some(900);

        let config = effective_config(&run).unwrap();
        assert_eq!(config.wait.timeout_ms, 900);
        assert_eq!(config.delivery.thread_name, "CallbackThread");
    }

    #[test]
    fn test_overrides_are_validated() {
        let dir = tempfile::tempdir().unwrap();
        let mut run = args(dir.path().join("absent.toml"));
        run.silence_ms = Some(0);

        assert!(effective_config(&run).is_err());
    }

    #[test]
    fn test_outcome_row_marks_failures() {
        let outcome = ScenarioOutcome {
            name: "destroyed".into(),
            passed: false,
            elapsed: Duration::from_millis(7),
            failure: Some("timed out".into()),
        };
        let row = OutcomeRow::from(&outcome);
        assert_eq!(row.result, "FAIL");
        assert_eq!(row.elapsed, "7ms");
        assert_eq!(row.detail, "timed out");
    }
}
