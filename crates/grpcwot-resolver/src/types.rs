//! Resolver input and output types.

use grpcwot_core::{DataSchema, ScopedName};
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use std::collections::HashMap;

/// Well-known empty message that services reference without declaring it.
const WELL_KNOWN_EMPTY: &str = "google.protobuf.Empty";

static EMPTY: DataSchema = DataSchema::Empty;

/// Position of a placeholder inside a message's object schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Slot {
    /// Index of the property in declaration order
    pub property: usize,
    /// Index of the alternative when the property is a `oneof` group
    pub alternative: Option<usize>,
}

impl Slot {
    /// Slot of a plain field.
    #[must_use]
    pub const fn field(property: usize) -> Self {
        Self {
            property,
            alternative: None,
        }
    }

    /// Slot of a `oneof` alternative.
    #[must_use]
    pub const fn alternative(property: usize, alternative: usize) -> Self {
        Self {
            property,
            alternative: Some(alternative),
        }
    }

    /// Replaces the placeholder at this slot with `value`.
    ///
    /// Returns `false` if the schema has no such slot.
    pub(crate) fn fill(self, schema: &mut DataSchema, value: DataSchema) -> bool {
        let DataSchema::Object(props) = schema else {
            return false;
        };
        let Some((_, prop)) = props.get_mut(self.property) else {
            return false;
        };
        match (self.alternative, prop) {
            (None, prop) => {
                *prop = value;
                true
            }
            (Some(index), DataSchema::OneOf(alternatives)) => match alternatives.get_mut(index) {
                Some(alt) => {
                    *alt = value;
                    true
                }
                None => false,
            },
            (Some(_), _) => false,
        }
    }
}

/// A field whose declared type names another message, not yet resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedReference {
    /// Message declaring the field
    pub defining_message: ScopedName,
    /// Type name as written in the field declaration
    pub type_name: String,
    /// Name of the field
    pub field_name: String,
    /// Placeholder position in the defining message's schema
    pub slot: Slot,
}

/// Resolved schemas of all messages, in declaration order.
///
/// Every schema is fully resolved: no placeholder or reference remains.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResolvedSchemas {
    entries: Vec<(ScopedName, DataSchema)>,
    index: HashMap<String, usize>,
}

impl ResolvedSchemas {
    pub(crate) fn new(entries: Vec<(ScopedName, DataSchema)>) -> Self {
        let index = entries
            .iter()
            .enumerate()
            .map(|(i, (name, _))| (name.as_str().to_string(), i))
            .collect();
        Self { entries, index }
    }

    /// Returns the schema of a message by fully-qualified name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&DataSchema> {
        self.index.get(name).map(|&i| &self.entries[i].1)
    }

    /// Returns the schema for a type name used in an RPC signature.
    ///
    /// RPC signatures live at file scope, so the name is looked up at the
    /// root scope only; a leading `.` is ignored. The well-known
    /// `google.protobuf.Empty` resolves to [`DataSchema::Empty`] unless the
    /// model declares it.
    ///
    /// # Examples
    ///
    /// ```
    /// use grpcwot_core::{DataSchema, MessageDecl};
    /// use grpcwot_resolver::resolve;
    ///
    /// let schemas = resolve(&[MessageDecl::new("Ping")])?;
    /// assert_eq!(schemas.lookup_rpc_type(".Ping"), Some(&DataSchema::Empty));
    /// assert_eq!(schemas.lookup_rpc_type("google.protobuf.Empty"), Some(&DataSchema::Empty));
    /// assert!(schemas.lookup_rpc_type("Pong").is_none());
    /// # Ok::<(), grpcwot_core::Error>(())
    /// ```
    #[must_use]
    pub fn lookup_rpc_type(&self, type_name: &str) -> Option<&DataSchema> {
        let name = type_name.strip_prefix('.').unwrap_or(type_name);
        self.get(name)
            .or_else(|| (name == WELL_KNOWN_EMPTY).then_some(&EMPTY))
    }

    /// Returns `true` if a message with this name was resolved.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Iterates over `(name, schema)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&ScopedName, &DataSchema)> {
        self.entries.iter().map(|(name, schema)| (name, schema))
    }

    /// Number of resolved messages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no message was resolved.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Consumes the result, yielding `(name, schema)` pairs in declaration order.
    #[must_use]
    pub fn into_entries(self) -> Vec<(ScopedName, DataSchema)> {
        self.entries
    }
}

impl Serialize for ResolvedSchemas {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, schema) in &self.entries {
            map.serialize_entry(name.as_str(), schema)?;
        }
        map.end()
    }
}
