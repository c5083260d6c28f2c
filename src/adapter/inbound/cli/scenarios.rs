//! Scenario listing.

use serde_json::json;
use tabled::{Table, Tabled};

use crate::adapter::inbound::cli::output;
use crate::application::scenario::{catalog, Scenario};
use crate::error::Result;

#[derive(Tabled)]
struct ScenarioRow {
    #[tabled(rename = "Name")]
    name: &'static str,
    #[tabled(rename = "Source")]
    source: String,
    #[tabled(rename = "Expects")]
    expects: &'static str,
}

impl From<&Scenario> for ScenarioRow {
    fn from(scenario: &Scenario) -> Self {
        match scenario.kind() {
            Some(kind) => Self {
                name: scenario.name(),
                source: kind.source().to_string(),
                expects: "one callback",
            },
            None => Self {
                name: scenario.name(),
                source: "-".to_string(),
                expects: "no callback",
            },
        }
    }
}

/// List the built-in scenarios.
pub fn list() -> Result<()> {
    let scenarios = catalog();

    if output::is_json() {
        let entries: Vec<_> = scenarios
            .iter()
            .map(|scenario| {
                json!({
                    "name": scenario.name(),
                    "source": scenario.kind().map(|kind| kind.source().to_string()),
                })
            })
            .collect();
        output::json_output(json!({
            "command": "scenarios",
            "scenarios": entries,
        }));
        return Ok(());
    }
    if output::is_quiet() {
        return Ok(());
    }

    output::header(env!("CARGO_PKG_VERSION"));
    output::section("Available scenarios");

    let rows: Vec<ScenarioRow> = scenarios.iter().map(ScenarioRow::from).collect();
    output::lines(&Table::new(rows).to_string());

    output::section("Usage");
    output::note("callback-harness run --scenario <name>");
    Ok(())
}
