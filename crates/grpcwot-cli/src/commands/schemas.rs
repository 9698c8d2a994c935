//! Schemas command implementation.

use super::common::load_model;
use anyhow::{Context, Result};
use grpcwot_core::cli::{ExitCode, OutputFormat};
use grpcwot_resolver::ResolvedSchemas;
use std::path::Path;

/// Resolves every message schema of a service model.
///
/// # Errors
///
/// Returns an error if the model cannot be loaded or resolved.
pub fn resolve_schemas(model_path: &Path) -> Result<ResolvedSchemas> {
    let model = load_model(model_path)?;
    grpcwot_resolver::resolve(&model.messages)
        .with_context(|| format!("failed to resolve messages of service '{}'", model.service))
}

/// Runs the schemas command.
///
/// Prints a map of message name to resolved schema, in declaration order.
///
/// # Errors
///
/// See [`resolve_schemas`].
pub fn run(model_path: &Path, output_format: OutputFormat) -> Result<ExitCode> {
    let schemas = resolve_schemas(model_path)?;
    println!("{}", crate::formatters::format_output(&schemas, output_format)?);
    Ok(ExitCode::SUCCESS)
}
