//! Core types and errors for gRPC to Thing Description generation.
//!
//! This crate provides the foundational types shared by every other crate
//! in the grpcwot workspace.
//!
//! # Architecture
//!
//! The core consists of:
//! - The parsed service model (`ServiceModel`, `MessageDecl`, `RpcDecl`)
//! - Resolved payload schemas (`DataSchema`)
//! - Classified interaction affordances (`AffordanceSet`)
//! - The persisted `ClassificationRecord` used for deterministic replay
//! - Error hierarchy with contextual information
//! - CLI support types

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

mod affordance;
mod classification;
mod error;
mod model;
mod schema;
mod types;

pub mod cli;

pub use affordance::{
    Access, AffordanceKind, AffordanceSet, OperationAffordance, PropertyAffordance,
    PropertyBackers, RpcBinding,
};
pub use classification::{ClassificationEntry, ClassificationRecord};
pub use error::{Error, Result};
pub use model::{FieldDecl, FieldType, MessageDecl, OneofGroup, PrimitiveKind, RpcDecl, ServiceModel};
pub use schema::DataSchema;
pub use types::ScopedName;
