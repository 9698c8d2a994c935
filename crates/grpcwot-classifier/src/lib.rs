//! Affordance classification for gRPC services.
//!
//! Maps every RPC of a service, joined with its resolved request and
//! response schemas, to exactly one Web of Things interaction affordance:
//!
//! - **Property**: `Get<Name>` / `Set<Name>` methods, paired into one
//!   read-write property when the getter's response schema equals the
//!   setter's request schema
//! - **Event**: methods taking nothing and returning a payload
//! - **Action**: everything else
//!
//! The heuristics are plain predicates held in [`ClassifierRules`] and can
//! be recombined with [`rules::and`], [`rules::or`] and [`rules::not`].
//! A [`ClassificationRecord`](grpcwot_core::ClassificationRecord) from an
//! earlier run replaces the heuristics entirely.

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

mod automatic;
mod classifier;
mod join;
mod replay;

pub mod rules;

pub use classifier::{Classification, ClassificationMode, Classifier};
pub use join::bind_rpcs;
pub use rules::ClassifierRules;
