//! Error types for Thing Description generation.
//!
//! Every error that aborts a generation run is a variant of [`Error`]. Each
//! variant carries the offending identifiers so the caller can fix the input
//! and re-run; the pipeline is a pure function of its inputs, so no error is
//! retryable.
//!
//! # Examples
//!
//! ```
//! use grpcwot_core::{Error, Result};
//!
//! fn find_rpc(name: &str) -> Result<()> {
//!     Err(Error::IncompleteClassificationConfig {
//!         rpc_name: name.to_string(),
//!     })
//! }
//!
//! let err = find_rpc("GetColor").unwrap_err();
//! assert!(err.is_classification_error());
//! ```

use thiserror::Error;

/// Main error type for Thing Description generation.
///
/// All errors in the pipeline use this type, providing consistent error
/// handling across all crates in the workspace.
#[derive(Error, Debug)]
pub enum Error {
    /// Two RPCs in the service share the same name.
    #[error("Duplicate RPC name found in service: {name}")]
    DuplicateRpcName {
        /// The repeated RPC name
        name: String,
    },

    /// Two messages share the same fully-qualified name.
    #[error("Duplicate message name found in model: {name}")]
    DuplicateMessageName {
        /// The repeated scoped message name
        name: String,
    },

    /// A field references a type that names no message in any enclosing scope.
    ///
    /// Resolution searches outward from the defining message's scope up to
    /// the root scope before giving up.
    #[error("No corresponding message found for type reference {type_name} in message {in_message}")]
    UnresolvedTypeReference {
        /// The type name as written in the field declaration
        type_name: String,
        /// Scoped name of the message declaring the field
        in_message: String,
    },

    /// Message references form a cycle.
    ///
    /// A payload value cannot recursively contain itself, so a message that
    /// transitively depends on its own completion can never be resolved.
    #[error("Circular message reference between messages: {}", messages.join(", "))]
    CircularMessageReference {
        /// Messages that can never be completed, sorted by name
        messages: Vec<String>,
    },

    /// An RPC request or response type names no resolved message.
    #[error("Not able to determine message for type {type_name} in RPC {rpc}")]
    UnknownRpcMessage {
        /// The RPC whose signature is broken
        rpc: String,
        /// The request or response type name as written
        type_name: String,
    },

    /// The classification record has no entry for a parsed RPC.
    #[error("Could not find pre-configured classification for RPC {rpc_name}")]
    IncompleteClassificationConfig {
        /// The RPC missing from the record
        rpc_name: String,
    },

    /// The classification record names an affordance class that does not exist.
    #[error("Invalid affordance class '{value}' configured for RPC {rpc_name}")]
    InvalidClassificationClass {
        /// The RPC carrying the invalid class
        rpc_name: String,
        /// The unrecognized class value
        value: String,
    },

    /// The classification record has an entry for an RPC the service does not declare.
    #[error("Classification record contains entry for unknown RPC {rpc_name}")]
    UnknownClassificationEntry {
        /// The record key with no matching RPC
        rpc_name: String,
    },

    /// RPCs grouped under one property name cannot form a getter/setter pair.
    #[error("Invalid property group '{name}' with RPCs: {}", rpcs.join(", "))]
    InvalidPropertyGroup {
        /// The shared affordance name
        name: String,
        /// The RPCs mapped to that name
        rpcs: Vec<String>,
    },

    /// Several RPCs are recorded as actions or as events under one name.
    #[error("Affordance name '{name}' used by more than one RPC: {}", rpcs.join(", "))]
    DuplicateAffordanceName {
        /// The shared affordance name
        name: String,
        /// The RPCs mapped to that name
        rpcs: Vec<String>,
    },

    /// Serialization/deserialization error.
    ///
    /// Raised when the service model or classification record JSON is malformed.
    #[error("Serialization error: {message}")]
    SerializationError {
        /// Description of the serialization failure
        message: String,
        /// Underlying serde error
        #[source]
        source: Option<serde_json::Error>,
    },
}

impl Error {
    /// Returns `true` if this error stems from the message declarations.
    ///
    /// # Examples
    ///
    /// ```
    /// use grpcwot_core::Error;
    ///
    /// let err = Error::CircularMessageReference {
    ///     messages: vec!["A".to_string(), "B".to_string()],
    /// };
    /// assert!(err.is_schema_error());
    /// ```
    #[must_use]
    pub const fn is_schema_error(&self) -> bool {
        matches!(
            self,
            Self::DuplicateMessageName { .. }
                | Self::UnresolvedTypeReference { .. }
                | Self::CircularMessageReference { .. }
        )
    }

    /// Returns `true` if this error stems from the RPC declarations.
    ///
    /// # Examples
    ///
    /// ```
    /// use grpcwot_core::Error;
    ///
    /// let err = Error::DuplicateRpcName {
    ///     name: "GetColor".to_string(),
    /// };
    /// assert!(err.is_rpc_error());
    /// ```
    #[must_use]
    pub const fn is_rpc_error(&self) -> bool {
        matches!(
            self,
            Self::DuplicateRpcName { .. } | Self::UnknownRpcMessage { .. }
        )
    }

    /// Returns `true` if this error stems from a supplied classification record.
    ///
    /// # Examples
    ///
    /// ```
    /// use grpcwot_core::Error;
    ///
    /// let err = Error::InvalidClassificationClass {
    ///     rpc_name: "Alert".to_string(),
    ///     value: "signal".to_string(),
    /// };
    /// assert!(err.is_classification_error());
    /// ```
    #[must_use]
    pub const fn is_classification_error(&self) -> bool {
        matches!(
            self,
            Self::IncompleteClassificationConfig { .. }
                | Self::InvalidClassificationClass { .. }
                | Self::UnknownClassificationEntry { .. }
                | Self::InvalidPropertyGroup { .. }
                | Self::DuplicateAffordanceName { .. }
        )
    }

    /// Returns `true` if this is a serialization error.
    #[must_use]
    pub const fn is_serialization_error(&self) -> bool {
        matches!(self, Self::SerializationError { .. })
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError {
            message: err.to_string(),
            source: Some(err),
        }
    }
}

/// Result type alias for generation operations.
///
/// # Examples
///
/// ```
/// use grpcwot_core::{Error, Result};
///
/// fn check_rpc(name: &str) -> Result<&str> {
///     if name.is_empty() {
///         return Err(Error::DuplicateRpcName {
///             name: name.to_string(),
///         });
///     }
///     Ok(name)
/// }
///
/// assert!(check_rpc("GetColor").is_ok());
/// assert!(check_rpc("").is_err());
/// ```
pub type Result<T> = std::result::Result<T, Error>;
