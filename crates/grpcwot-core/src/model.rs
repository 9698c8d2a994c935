//! Parsed service model.
//!
//! The model is the output of an external `.proto` parser: ordered message
//! declarations (nested messages flattened under their scoped names) and
//! ordered RPC declarations of one service. It is immutable input for one
//! generation run and is usually loaded from JSON.
//!
//! # Examples
//!
//! ```
//! use grpcwot_core::ServiceModel;
//!
//! let model = ServiceModel::from_json_str(r#"{
//!     "service": "Lamp",
//!     "messages": [
//!         {"name": "Empty"},
//!         {"name": "ColorMsg", "fields": [{"name": "rgb", "type": "uint32"}]}
//!     ],
//!     "rpcs": [
//!         {"name": "GetColor", "request_type": "Empty", "response_type": "ColorMsg"}
//!     ]
//! }"#)?;
//!
//! assert_eq!(model.service, "Lamp");
//! assert_eq!(model.messages.len(), 2);
//! # Ok::<(), grpcwot_core::Error>(())
//! ```

use crate::{Result, ScopedName};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Primitive payload kinds a field can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveKind {
    /// Floating point number
    Number,
    /// Integral number
    Integer,
    /// Boolean flag
    Boolean,
    /// Text or raw bytes
    String,
}

impl PrimitiveKind {
    /// Maps a protobuf scalar type name to its primitive kind.
    ///
    /// The kind names themselves (`number`, `integer`, `boolean`, `string`)
    /// are accepted as well. Returns `None` for anything else, which is then
    /// a reference to a message type.
    ///
    /// # Examples
    ///
    /// ```
    /// use grpcwot_core::PrimitiveKind;
    ///
    /// assert_eq!(PrimitiveKind::from_proto_type("sfixed64"), Some(PrimitiveKind::Integer));
    /// assert_eq!(PrimitiveKind::from_proto_type("bytes"), Some(PrimitiveKind::String));
    /// assert_eq!(PrimitiveKind::from_proto_type("ColorMsg"), None);
    /// ```
    #[must_use]
    pub fn from_proto_type(type_name: &str) -> Option<Self> {
        match type_name {
            "double" | "float" | "number" => Some(Self::Number),
            "int32" | "int64" | "uint32" | "uint64" | "sint32" | "sint64" | "fixed32"
            | "fixed64" | "sfixed32" | "sfixed64" | "integer" => Some(Self::Integer),
            "bool" | "boolean" => Some(Self::Boolean),
            "string" | "bytes" => Some(Self::String),
            _ => None,
        }
    }

    /// Returns the schema type name of this kind.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
            Self::String => "string",
        }
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Declared type of a field: a primitive or an unresolved type reference.
///
/// Serialized as the type name as written in the IDL.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldType {
    /// A scalar payload
    Primitive(PrimitiveKind),
    /// A message type name as written, resolved against enclosing scopes later
    Reference(String),
}

impl From<String> for FieldType {
    fn from(type_name: String) -> Self {
        PrimitiveKind::from_proto_type(&type_name).map_or(Self::Reference(type_name), Self::Primitive)
    }
}

impl From<&str> for FieldType {
    fn from(type_name: &str) -> Self {
        Self::from(type_name.to_string())
    }
}

impl From<FieldType> for String {
    fn from(ty: FieldType) -> Self {
        match ty {
            FieldType::Primitive(kind) => kind.as_str().to_string(),
            FieldType::Reference(name) => name,
        }
    }
}

/// A single field of a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDecl {
    /// Field name
    pub name: String,
    /// Declared field type
    #[serde(rename = "type")]
    pub ty: FieldType,
}

impl FieldDecl {
    /// Creates a field from its name and declared type name.
    ///
    /// # Examples
    ///
    /// ```
    /// use grpcwot_core::{FieldDecl, FieldType, PrimitiveKind};
    ///
    /// let field = FieldDecl::new("on", "bool");
    /// assert_eq!(field.ty, FieldType::Primitive(PrimitiveKind::Boolean));
    /// ```
    #[must_use]
    pub fn new(name: impl Into<String>, ty: impl Into<FieldType>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
        }
    }
}

/// A `oneof` group: a named set of mutually exclusive fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OneofGroup {
    /// Group name, used as the property name in the resolved schema
    pub name: String,
    /// Alternatives in declaration order
    #[serde(default)]
    pub fields: Vec<FieldDecl>,
}

/// A message declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageDecl {
    /// Fully-qualified name following the nesting chain
    pub name: ScopedName,
    /// Plain fields in declaration order
    #[serde(default)]
    pub fields: Vec<FieldDecl>,
    /// `oneof` groups in declaration order
    #[serde(default)]
    pub oneofs: Vec<OneofGroup>,
}

impl MessageDecl {
    /// Creates a message with no fields.
    #[must_use]
    pub fn new(name: impl Into<ScopedName>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
            oneofs: Vec::new(),
        }
    }

    /// Adds a plain field.
    ///
    /// # Examples
    ///
    /// ```
    /// use grpcwot_core::MessageDecl;
    ///
    /// let msg = MessageDecl::new("ColorMsg")
    ///     .field("red", "uint32")
    ///     .field("green", "uint32");
    /// assert_eq!(msg.fields.len(), 2);
    /// ```
    #[must_use]
    pub fn field(mut self, name: impl Into<String>, ty: impl Into<FieldType>) -> Self {
        self.fields.push(FieldDecl::new(name, ty));
        self
    }

    /// Adds a `oneof` group.
    #[must_use]
    pub fn oneof(mut self, name: impl Into<String>, fields: Vec<FieldDecl>) -> Self {
        self.oneofs.push(OneofGroup {
            name: name.into(),
            fields,
        });
        self
    }

    /// Returns `true` if the message declares neither fields nor `oneof` groups.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.oneofs.is_empty()
    }
}

/// An RPC method declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RpcDecl {
    /// Method name
    pub name: String,
    /// Request message type name as written
    pub request_type: String,
    /// Response message type name as written
    pub response_type: String,
}

impl RpcDecl {
    /// Creates an RPC declaration.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        request_type: impl Into<String>,
        response_type: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            request_type: request_type.into(),
            response_type: response_type.into(),
        }
    }
}

/// A parsed service: its name, messages and RPCs.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ServiceModel {
    /// Service name, used as the Thing Description title
    pub service: String,
    /// Message declarations in file order
    #[serde(default)]
    pub messages: Vec<MessageDecl>,
    /// RPC declarations in file order
    #[serde(default)]
    pub rpcs: Vec<RpcDecl>,
}

impl ServiceModel {
    /// Parses a service model from its JSON representation.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::SerializationError`] if the JSON is malformed
    /// or misses required fields.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
