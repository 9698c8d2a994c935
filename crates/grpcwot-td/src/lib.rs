//! Thing Description assembly.
//!
//! Turns a classified [`AffordanceSet`](grpcwot_core::AffordanceSet) into a
//! W3C Web of Things Thing Description. Every affordance gets a single form
//! pointing at `http://{host}:{port}/{title}/{name}`:
//!
//! | affordance | schema fields | form operations |
//! |---|---|---|
//! | property | getter response, else setter request | `readproperty` / `writeproperty` |
//! | action | `input` = request, `output` = response | `invokeaction` |
//! | event | `data` = response | `subscribeevent` |

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

mod document;
mod overview;
mod settings;

pub use document::{
    ActionDescription, EventDescription, Form, NOSEC_SCHEME, Operation, PropertyDescription,
    SecurityScheme, TD_CONTEXT, ThingDescription, assemble,
};
pub use overview::{AffordanceOverview, overview};
pub use settings::{DEFAULT_CONTENT_TYPE, DEFAULT_HOST, DEFAULT_PORT, TdSettings};
