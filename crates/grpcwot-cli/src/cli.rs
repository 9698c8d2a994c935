//! CLI argument definitions and parsing.
//!
//! Defines the command-line interface structure using clap:
//! - `Cli` - Main CLI entry point
//! - `Commands` - Available subcommands

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// grpcwot - Web of Things Thing Descriptions from gRPC services.
///
/// Reads a parsed gRPC service model, resolves its message schemas,
/// classifies every RPC as a property, action or event, and writes the
/// resulting Thing Description.
#[derive(Parser, Debug)]
#[command(name = "grpcwot")]
#[command(version, about, long_about = None)]
#[command(author = "grpcwot Team")]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format (json, text, pretty)
    #[arg(long = "format", global = true, default_value = "pretty")]
    pub format: String,
}

/// Available CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a Thing Description and its classification record.
    ///
    /// When the classification file already exists it is replayed instead
    /// of classifying heuristically, so edits to it are honored.
    ///
    /// # Examples
    ///
    /// ```bash
    /// # First run: classify automatically, write td.jsonld and classificationConfig.json
    /// grpcwot generate lamp.json
    ///
    /// # Only describe two RPCs, served on another port
    /// grpcwot generate lamp.json --only GetColor --only SetColor --port 8080
    /// ```
    Generate {
        /// Service model JSON file
        model: PathBuf,

        /// Classification record to replay and update
        /// (default: `<output>/classificationConfig.json`)
        #[arg(short, long)]
        classification: Option<PathBuf>,

        /// Only describe these RPCs
        #[arg(long = "only", num_args = 1)]
        only: Vec<String>,

        /// Host the service is reachable on
        #[arg(long)]
        host: Option<String>,

        /// Port the service is reachable on
        #[arg(long)]
        port: Option<u16>,

        /// Output directory
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Configuration file (default: `<config_dir>/grpcwot/config.toml`)
        #[arg(long, env = "GRPCWOT_CONFIG")]
        config: Option<PathBuf>,
    },

    /// Show how each RPC would be classified.
    ///
    /// Runs automatic classification and prints one row per affordance
    /// without writing any file.
    Inspect {
        /// Service model JSON file
        model: PathBuf,

        /// Only classify these RPCs
        #[arg(long = "only", num_args = 1)]
        only: Vec<String>,
    },

    /// Print the resolved schema of every message.
    Schemas {
        /// Service model JSON file
        model: PathBuf,
    },

    /// Generate shell completions.
    ///
    /// Generates completion scripts for various shells that can be
    /// sourced or saved to enable tab completion for this CLI.
    Completions {
        /// Target shell for completion generation
        #[arg(value_enum)]
        shell: Shell,
    },
}
