//! Validate command implementation.

use crate::cli::Output;
use crate::config::Settings;
use crate::guardrails::{format_validation_report, validate_task_input};
use anyhow::{Context, Result};
use serde_json::Value;

/// Run the validate command.
///
/// The input is either inline JSON or, with `--file`, a path to a JSON
/// file. The report goes to stdout; the exit code reflects validity.
pub fn run_validate(input: &str, file: bool, settings: Settings) -> Result<()> {
    let raw = if file {
        std::fs::read_to_string(input)
            .with_context(|| format!("failed to read task file {}", input))?
    } else {
        input.to_string()
    };

    let task: Value = serde_json::from_str(&raw).context("task input is not valid JSON")?;

    let result = validate_task_input(&task, &settings.guardrails);
    println!("{}", format_validation_report(&result, "Task Input"));

    if !result.is_valid {
        Output::error(&format!(
            "{} issue(s) found.",
            result.issues.len()
        ));
        std::process::exit(1);
    }

    Ok(())
}
