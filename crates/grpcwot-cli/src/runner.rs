//! Command execution and runtime logic.
//!
//! Contains the main command execution loop and logging initialization.

use anyhow::Result;
use grpcwot_core::cli::{ExitCode, OutputFormat};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::Commands;
use crate::commands;
use crate::commands::generate::GenerateOptions;

/// Initializes logging infrastructure.
///
/// Sets up tracing with appropriate log levels based on verbosity flag.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_logging(verbose: bool) -> Result<()> {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()?;

    Ok(())
}

/// Executes the specified CLI command.
///
/// Routes commands to their respective handlers and returns an exit code.
///
/// # Errors
///
/// Returns an error if command execution fails.
pub fn execute_command(command: Commands, output_format: OutputFormat) -> Result<ExitCode> {
    match command {
        Commands::Generate {
            model,
            classification,
            only,
            host,
            port,
            output,
            config,
        } => {
            let options = GenerateOptions {
                model,
                classification,
                only,
                host,
                port,
                output,
                config,
            };
            commands::generate::run(&options, output_format)
        }
        Commands::Inspect { model, only } => commands::inspect::run(&model, only, output_format),
        Commands::Schemas { model } => commands::schemas::run(&model, output_format),
        Commands::Completions { shell } => {
            use crate::cli::Cli;
            use clap::CommandFactory;
            let mut cmd = Cli::command();
            commands::completions::run(shell, &mut cmd)
        }
    }
}

/// Maps a failed command to the process exit code.
///
/// Input errors in the model or classification record map to
/// [`ExitCode::INVALID_INPUT`], file system failures to
/// [`ExitCode::IO_ERROR`], anything else to [`ExitCode::ERROR`].
#[must_use]
pub fn exit_code_for(err: &anyhow::Error) -> ExitCode {
    if let Some(err) = err.downcast_ref::<grpcwot_core::Error>() {
        return ExitCode::from(err);
    }
    if err.downcast_ref::<std::io::Error>().is_some() {
        return ExitCode::IO_ERROR;
    }
    ExitCode::ERROR
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_exit_code_for_pipeline_error() {
        let err = Err::<(), _>(grpcwot_core::Error::DuplicateRpcName {
            name: "Ping".to_string(),
        })
        .context("failed to classify service 'Lamp'")
        .unwrap_err();
        assert_eq!(exit_code_for(&err), ExitCode::INVALID_INPUT);
    }

    #[test]
    fn test_exit_code_for_io_error() {
        let err = Err::<(), _>(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"))
            .context("failed to read service model")
            .unwrap_err();
        assert_eq!(exit_code_for(&err), ExitCode::IO_ERROR);
    }

    #[test]
    fn test_exit_code_for_other_error() {
        let err = anyhow::anyhow!("target.port must be greater than 0");
        assert_eq!(exit_code_for(&err), ExitCode::ERROR);
    }
}
