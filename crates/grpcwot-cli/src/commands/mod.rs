//! Command implementations for the grpcwot CLI.
//!
//! Each command module is responsible for executing its operation and
//! formatting output according to the requested format.

pub mod common;
pub mod completions;
pub mod generate;
pub mod inspect;
pub mod schemas;
