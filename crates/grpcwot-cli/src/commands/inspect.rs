//! Inspect command implementation.
//!
//! Prints the automatic classification of a service without writing files.

use super::common::{classifier, load_model};
use anyhow::{Context, Result};
use colored::Colorize;
use grpcwot_core::cli::{ExitCode, OutputFormat};
use grpcwot_td::{AffordanceOverview, overview};
use serde::Serialize;
use std::path::Path;

/// Classification overview of one service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InspectResult {
    /// Service name
    pub service: String,
    /// One row per affordance
    pub affordances: Vec<AffordanceOverview>,
}

/// Classifies a service model automatically.
///
/// # Errors
///
/// Returns an error if the model cannot be loaded, resolved or classified.
pub fn inspect(model_path: &Path, only: Vec<String>) -> Result<InspectResult> {
    let model = load_model(model_path)?;
    let (_, classification) = classifier(only)
        .classify_model(&model, None)
        .with_context(|| format!("failed to classify service '{}'", model.service))?;

    Ok(InspectResult {
        service: model.service,
        affordances: overview(&classification.affordances),
    })
}

/// Runs the inspect command.
///
/// # Errors
///
/// See [`inspect`].
pub fn run(model_path: &Path, only: Vec<String>, output_format: OutputFormat) -> Result<ExitCode> {
    let result = inspect(model_path, only)?;

    match output_format {
        OutputFormat::Pretty => print_table(&result),
        format => println!("{}", crate::formatters::format_output(&result, format)?),
    }
    Ok(ExitCode::SUCCESS)
}

fn print_table(result: &InspectResult) {
    println!("{}", result.service.bold().cyan());
    println!("{}", "─".repeat(50));
    for row in &result.affordances {
        let kind = match row.access {
            Some(access) => format!("{} ({})", row.kind, access_label(access)),
            None => row.kind.to_string(),
        };
        println!(
            "  {:<28} {:<22} {}",
            row.name.bold(),
            kind.green(),
            row.rpcs.join(", ").dimmed()
        );
    }
}

const fn access_label(access: grpcwot_core::Access) -> &'static str {
    match access {
        grpcwot_core::Access::ReadOnly => "read-only",
        grpcwot_core::Access::WriteOnly => "write-only",
        grpcwot_core::Access::ReadWrite => "read-write",
    }
}
