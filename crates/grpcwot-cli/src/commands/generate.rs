//! Generate command implementation.
//!
//! Generates a Thing Description from a service model. This command:
//! 1. Loads the configuration and applies command-line overrides
//! 2. Resolves message schemas and classifies RPCs, replaying the
//!    classification record when one exists
//! 3. Assembles the Thing Description
//! 4. Writes the Thing Description and the updated classification record

use super::common::{classifier, load_model, load_record, write_files};
use crate::config::Config;
use anyhow::{Context, Result, bail};
use grpcwot_core::cli::{ExitCode, OutputFormat};
use grpcwot_td::assemble;
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

/// Options of the generate command.
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    /// Service model JSON file
    pub model: PathBuf,
    /// Classification record to replay and update
    pub classification: Option<PathBuf>,
    /// RPC allow-list
    pub only: Vec<String>,
    /// Host override
    pub host: Option<String>,
    /// Port override
    pub port: Option<u16>,
    /// Output directory override
    pub output: Option<PathBuf>,
    /// Configuration file
    pub config: Option<PathBuf>,
}

/// Result of Thing Description generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationResult {
    /// Service name, the Thing Description title
    pub service: String,
    /// `automatic` or `replayed`
    pub mode: String,
    /// Number of property affordances
    pub properties: usize,
    /// Number of action affordances
    pub actions: usize,
    /// Number of event affordances
    pub events: usize,
    /// Written Thing Description
    pub td_path: String,
    /// Written classification record
    pub classification_path: String,
}

/// Runs the whole pipeline and writes both output files.
///
/// Nothing is written unless resolution, classification and assembly all
/// succeed.
///
/// # Errors
///
/// Returns an error if:
/// - The configuration, model or record cannot be loaded
/// - Schema resolution or classification fails
/// - An output file cannot be written
pub fn generate(options: &GenerateOptions) -> Result<GenerationResult> {
    let mut config = Config::load(options.config.as_deref())?;
    if let Some(host) = &options.host {
        config.target.host.clone_from(host);
    }
    if let Some(port) = options.port {
        config.target.port = port;
    }
    if let Some(dir) = &options.output {
        config.output.dir.clone_from(dir);
    }
    config.validate()?;

    let record_path = options
        .classification
        .clone()
        .unwrap_or_else(|| config.classification_path());
    let td_path = config.td_path();
    if td_path == record_path {
        bail!(
            "Thing Description and classification record would both be written to {}",
            td_path.display()
        );
    }

    let model = load_model(&options.model)?;
    let record = load_record(&record_path)?;

    let (_, classification) = classifier(options.only.clone())
        .classify_model(&model, record.as_ref())
        .with_context(|| format!("failed to classify service '{}'", model.service))?;

    let td = assemble(&model.service, &classification.affordances, &config.td_settings());
    let td_json = td.to_json_string()?;
    let record_json = classification.record.to_json_string()?;

    write_files(&[
        (record_path.as_path(), record_json.as_str()),
        (td_path.as_path(), td_json.as_str()),
    ])?;
    info!(
        "Wrote {} and {}",
        td_path.display(),
        record_path.display()
    );

    let affordances = &classification.affordances;
    Ok(GenerationResult {
        service: model.service,
        mode: classification.mode.to_string(),
        properties: affordances.properties.len(),
        actions: affordances.actions.len(),
        events: affordances.events.len(),
        td_path: td_path.display().to_string(),
        classification_path: record_path.display().to_string(),
    })
}

/// Runs the generate command.
///
/// # Errors
///
/// See [`generate`].
pub fn run(options: &GenerateOptions, output_format: OutputFormat) -> Result<ExitCode> {
    let result = generate(options)?;

    let formatted = crate::formatters::format_output(&result, output_format)?;
    println!("{formatted}");

    info!(
        "Generated Thing Description for '{}' ({} classification)",
        result.service, result.mode
    );
    Ok(ExitCode::SUCCESS)
}
