//! Resolved payload schemas.
//!
//! A [`DataSchema`] is the acyclic structural description of a message
//! payload after every type reference has been replaced by a copy of the
//! referenced message's schema. It serializes to the Web of Things
//! `DataSchema` vocabulary.

use crate::PrimitiveKind;
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

/// Resolved, acyclic description of a payload.
///
/// Equality is structural: two schemas are equal when their trees are equal,
/// regardless of which messages they were resolved from.
///
/// # Examples
///
/// ```
/// use grpcwot_core::{DataSchema, PrimitiveKind};
///
/// let color = DataSchema::object([("rgb", DataSchema::Primitive(PrimitiveKind::Integer))]);
/// assert!(color.has_payload());
/// assert!(!DataSchema::Empty.has_payload());
///
/// let json = serde_json::to_value(&color)?;
/// assert_eq!(json["properties"]["rgb"]["type"], "integer");
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSchema {
    /// A scalar value
    Primitive(PrimitiveKind),
    /// A message without any payload
    Empty,
    /// Named properties in declaration order
    Object(Vec<(String, DataSchema)>),
    /// Mutually exclusive alternatives in declaration order
    OneOf(Vec<DataSchema>),
}

impl DataSchema {
    /// Builds an object schema from `(name, schema)` pairs.
    #[must_use]
    pub fn object<N: Into<String>>(properties: impl IntoIterator<Item = (N, Self)>) -> Self {
        Self::Object(
            properties
                .into_iter()
                .map(|(name, schema)| (name.into(), schema))
                .collect(),
        )
    }

    /// Returns `true` iff the schema is an object with at least one property.
    ///
    /// An `Empty` schema and an object without properties carry no payload.
    #[must_use]
    pub fn has_payload(&self) -> bool {
        matches!(self, Self::Object(props) if !props.is_empty())
    }

    /// Returns the object properties, or `None` if this is not an object.
    #[must_use]
    pub fn properties(&self) -> Option<&[(String, Self)]> {
        match self {
            Self::Object(props) => Some(props),
            _ => None,
        }
    }

    /// Looks up an object property by name.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&Self> {
        self.properties()?
            .iter()
            .find(|(prop, _)| prop == name)
            .map(|(_, schema)| schema)
    }

    /// Looks up an object property by name for modification.
    pub fn property_mut(&mut self, name: &str) -> Option<&mut Self> {
        match self {
            Self::Object(props) => props
                .iter_mut()
                .find(|(prop, _)| prop == name)
                .map(|(_, schema)| schema),
            _ => None,
        }
    }

    /// Returns the Web of Things type name of the schema, if it has one.
    ///
    /// `OneOf` schemas carry no type of their own.
    #[must_use]
    pub const fn type_name(&self) -> Option<&'static str> {
        match self {
            Self::Primitive(kind) => Some(kind.as_str()),
            Self::Empty | Self::Object(_) => Some("object"),
            Self::OneOf(_) => None,
        }
    }

    /// Returns the nesting depth of the schema tree.
    ///
    /// Primitives and empty schemas have depth 1.
    #[must_use]
    pub fn depth(&self) -> usize {
        match self {
            Self::Primitive(_) | Self::Empty => 1,
            Self::Object(props) => 1 + props.iter().map(|(_, s)| s.depth()).max().unwrap_or(0),
            Self::OneOf(alts) => 1 + alts.iter().map(Self::depth).max().unwrap_or(0),
        }
    }
}

struct Properties<'a>(&'a [(String, DataSchema)]);

impl Serialize for Properties<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, schema) in self.0 {
            map.serialize_entry(name, schema)?;
        }
        map.end()
    }
}

impl Serialize for DataSchema {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Primitive(kind) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("type", kind.as_str())?;
                map.end()
            }
            Self::Empty => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("type", "object")?;
                map.end()
            }
            Self::Object(props) => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("type", "object")?;
                map.serialize_entry("properties", &Properties(props))?;
                map.end()
            }
            Self::OneOf(alternatives) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("oneOf", alternatives)?;
                map.end()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn int() -> DataSchema {
        DataSchema::Primitive(PrimitiveKind::Integer)
    }

    #[test]
    fn test_has_payload() {
        assert!(DataSchema::object([("a", int())]).has_payload());
        assert!(!DataSchema::Object(Vec::new()).has_payload());
        assert!(!DataSchema::Empty.has_payload());
        assert!(!int().has_payload());
        assert!(!DataSchema::OneOf(vec![int()]).has_payload());
    }

    #[test]
    fn test_structural_equality_ignores_origin() {
        let a = DataSchema::object([("x", int()), ("y", int())]);
        let b = DataSchema::object([("x", int()), ("y", int())]);
        let c = DataSchema::object([("y", int()), ("x", int())]);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_property_lookup_and_mutation() {
        let mut schema = DataSchema::object([("x", int()), ("inner", DataSchema::Empty)]);
        assert_eq!(schema.property("x"), Some(&int()));
        assert!(schema.property("missing").is_none());

        *schema.property_mut("inner").unwrap() = DataSchema::object([("z", int())]);
        assert!(schema.property("inner").unwrap().has_payload());
        assert!(int().property("x").is_none());
    }

    #[test]
    fn test_depth() {
        assert_eq!(int().depth(), 1);
        assert_eq!(DataSchema::Object(Vec::new()).depth(), 1);
        let nested = DataSchema::object([("a", DataSchema::object([("b", int())]))]);
        assert_eq!(nested.depth(), 3);
    }

    #[test]
    fn test_serialize_wot_shapes() {
        let schema = DataSchema::object([
            ("id", DataSchema::Primitive(PrimitiveKind::String)),
            ("shape", DataSchema::OneOf(vec![int(), DataSchema::Empty])),
        ]);
        let value = serde_json::to_value(&schema).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "object",
                "properties": {
                    "id": {"type": "string"},
                    "shape": {"oneOf": [{"type": "integer"}, {"type": "object"}]}
                }
            })
        );
    }

    #[test]
    fn test_serialize_keeps_declaration_order() {
        let schema = DataSchema::object([("zeta", int()), ("alpha", int())]);
        let text = serde_json::to_string(&schema).unwrap();
        assert!(text.find("zeta").unwrap() < text.find("alpha").unwrap());
    }
}
