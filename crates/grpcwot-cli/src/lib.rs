//! grpcwot CLI library.
//!
//! This library provides the core functionality for the `grpcwot` tool,
//! exposing modules for commands, configuration and formatters that can be
//! tested.

pub mod cli;
pub mod commands;
pub mod config;
pub mod formatters;
pub mod runner;
