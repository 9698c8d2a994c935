//! Message schema resolution.
//!
//! Turns the message declarations of a service model into one acyclic
//! [`DataSchema`](grpcwot_core::DataSchema) per message, replacing every
//! field that references another message by a full copy of that message's
//! schema.
//!
//! Resolution runs in three phases so that it either completes or fails
//! before any schema is built:
//!
//! 1. every type reference is resolved against the enclosing scopes of the
//!    message declaring it, innermost first;
//! 2. the reference graph is checked for cycles;
//! 3. schemas are injected in dependency order until no reference is left.
//!
//! # Examples
//!
//! ```
//! use grpcwot_core::MessageDecl;
//! use grpcwot_resolver::resolve;
//!
//! let messages = vec![
//!     MessageDecl::new("Point").field("x", "double").field("y", "double"),
//!     MessageDecl::new("Line").field("from", "Point").field("to", "Point"),
//! ];
//!
//! let schemas = resolve(&messages)?;
//! let line = schemas.get("Line").unwrap();
//! assert_eq!(line.property("from"), schemas.get("Point"));
//! # Ok::<(), grpcwot_core::Error>(())
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

mod graph;
mod resolver;
pub mod scope;
mod types;

pub use resolver::{SchemaResolver, resolve};
pub use types::{ResolvedSchemas, Slot, UnresolvedReference};
