//! grpcwot CLI.
//!
//! Generates W3C Web of Things Thing Descriptions from gRPC service models.
//!
//! # Examples
//!
//! ```bash
//! # Generate td.jsonld and classificationConfig.json in the current directory
//! grpcwot generate lamp.json
//!
//! # Show how each RPC is classified
//! grpcwot inspect lamp.json
//!
//! # Print resolved message schemas as JSON
//! grpcwot --format json schemas lamp.json
//! ```

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use grpcwot_cli::cli::Cli;
use grpcwot_cli::runner::{execute_command, exit_code_for, init_logging};
use grpcwot_core::cli::OutputFormat;

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose)?;

    // Parse output format
    let output_format = cli
        .format
        .parse::<OutputFormat>()
        .map_err(|e| anyhow::anyhow!("{e}"))?;

    // Execute command and get exit code
    let exit_code = match execute_command(cli.command, output_format) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{} {err:#}", "error:".red().bold());
            exit_code_for(&err)
        }
    };

    std::process::exit(exit_code.as_i32());
}
