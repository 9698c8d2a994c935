//! Three-phase schema resolver.

use crate::graph;
use crate::scope;
use crate::types::{ResolvedSchemas, Slot, UnresolvedReference};
use grpcwot_core::{DataSchema, Error, FieldDecl, FieldType, MessageDecl, Result};
use std::collections::HashMap;
use tracing::{debug, info};

/// A reference whose target message is known.
#[derive(Debug, Clone, Copy)]
struct ResolvedReference {
    referencing: usize,
    target: usize,
    slot: Slot,
}

/// Resolves the message declarations of one service model.
///
/// The resolver owns its registry for a single invocation; independent
/// models are resolved by independent resolvers.
///
/// # Examples
///
/// ```
/// use grpcwot_core::{Error, MessageDecl};
/// use grpcwot_resolver::SchemaResolver;
///
/// let messages = vec![
///     MessageDecl::new("A").field("b", "B"),
///     MessageDecl::new("B").field("a", "A"),
/// ];
///
/// let err = SchemaResolver::new(&messages)?.resolve().unwrap_err();
/// assert!(matches!(err, Error::CircularMessageReference { .. }));
/// # Ok::<(), grpcwot_core::Error>(())
/// ```
#[derive(Debug)]
pub struct SchemaResolver<'a> {
    messages: &'a [MessageDecl],
    index: HashMap<&'a str, usize>,
}

impl<'a> SchemaResolver<'a> {
    /// Builds the message registry.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateMessageName`] if two messages share a scoped name.
    pub fn new(messages: &'a [MessageDecl]) -> Result<Self> {
        let mut index = HashMap::with_capacity(messages.len());
        for (i, msg) in messages.iter().enumerate() {
            if index.insert(msg.name.as_str(), i).is_some() {
                return Err(Error::DuplicateMessageName {
                    name: msg.name.to_string(),
                });
            }
        }
        Ok(Self { messages, index })
    }

    /// Runs all phases and returns the resolved schemas.
    ///
    /// # Errors
    ///
    /// - [`Error::UnresolvedTypeReference`] if a field type names no message
    ///   in any enclosing scope
    /// - [`Error::CircularMessageReference`] if messages reference each other
    ///   in a cycle
    pub fn resolve(self) -> Result<ResolvedSchemas> {
        let (schemas, pending) = self.seed();
        debug!(
            "Seeded {} messages with {} pending references",
            schemas.len(),
            pending.len()
        );

        let references = self.resolve_references(&pending)?;
        self.check_cycles(&references)?;
        let schemas = self.inject(schemas, references)?;

        info!("Resolved schemas for {} messages", schemas.len());
        Ok(ResolvedSchemas::new(
            self.messages
                .iter()
                .map(|m| m.name.clone())
                .zip(schemas)
                .collect(),
        ))
    }

    /// Translates every message into its initial schema.
    ///
    /// Primitive fields are translated directly. Each field referencing a
    /// message is recorded as pending and left as an empty placeholder.
    /// Schemas are returned in declaration order.
    #[must_use]
    pub fn seed(&self) -> (Vec<DataSchema>, Vec<UnresolvedReference>) {
        let mut pending = Vec::new();
        let schemas = self
            .messages
            .iter()
            .map(|msg| seed_message(msg, &mut pending))
            .collect();
        (schemas, pending)
    }

    fn resolve_references(&self, pending: &[UnresolvedReference]) -> Result<Vec<ResolvedReference>> {
        pending
            .iter()
            .map(|reference| {
                let target = scope::candidates(&reference.defining_message, &reference.type_name)
                    .find_map(|candidate| self.index.get(candidate.as_str()).copied())
                    .ok_or_else(|| Error::UnresolvedTypeReference {
                        type_name: reference.type_name.clone(),
                        in_message: reference.defining_message.to_string(),
                    })?;
                debug!(
                    "{}.{}: {} -> {}",
                    reference.defining_message,
                    reference.field_name,
                    reference.type_name,
                    self.messages[target].name
                );
                Ok(ResolvedReference {
                    referencing: self.index[reference.defining_message.as_str()],
                    target,
                    slot: reference.slot,
                })
            })
            .collect()
    }

    fn check_cycles(&self, references: &[ResolvedReference]) -> Result<()> {
        let blocked = graph::blocked_messages(self.messages.len(), &edges(references));
        if blocked.is_empty() {
            return Ok(());
        }
        Err(self.circular_error(&blocked))
    }

    fn inject(
        &self,
        mut schemas: Vec<DataSchema>,
        mut pending: Vec<ResolvedReference>,
    ) -> Result<Vec<DataSchema>> {
        let mut remaining = graph::pending_counts(self.messages.len(), &edges(&pending));
        let mut pass = 0;

        while !pending.is_empty() {
            pass += 1;
            let (ready, blocked): (Vec<_>, Vec<_>) =
                pending.into_iter().partition(|r| remaining[r.target] == 0);

            if ready.is_empty() {
                let mut stuck: Vec<usize> = blocked.iter().map(|r| r.referencing).collect();
                stuck.sort_unstable();
                stuck.dedup();
                return Err(self.circular_error(&stuck));
            }

            for reference in &ready {
                let value = schemas[reference.target].clone();
                let filled = reference.slot.fill(&mut schemas[reference.referencing], value);
                debug_assert!(filled, "seeded slot must exist");
                remaining[reference.referencing] -= 1;
            }
            debug!("Injection pass {pass}: {} injected, {} pending", ready.len(), blocked.len());
            pending = blocked;
        }

        Ok(schemas)
    }

    fn circular_error(&self, blocked: &[usize]) -> Error {
        let mut messages: Vec<String> = blocked
            .iter()
            .map(|&i| self.messages[i].name.to_string())
            .collect();
        messages.sort();
        Error::CircularMessageReference { messages }
    }
}

/// Resolves message declarations into acyclic schemas.
///
/// Shorthand for [`SchemaResolver::new`] followed by [`SchemaResolver::resolve`].
///
/// # Errors
///
/// See [`SchemaResolver::new`] and [`SchemaResolver::resolve`].
pub fn resolve(messages: &[MessageDecl]) -> Result<ResolvedSchemas> {
    SchemaResolver::new(messages)?.resolve()
}

fn edges(references: &[ResolvedReference]) -> Vec<(usize, usize)> {
    references.iter().map(|r| (r.target, r.referencing)).collect()
}

fn seed_message(msg: &MessageDecl, pending: &mut Vec<UnresolvedReference>) -> DataSchema {
    if msg.is_empty() {
        return DataSchema::Empty;
    }

    let mut props = Vec::with_capacity(msg.fields.len() + msg.oneofs.len());
    for field in &msg.fields {
        let slot = Slot::field(props.len());
        props.push((field.name.clone(), seed_field(msg, field, slot, pending)));
    }
    for group in &msg.oneofs {
        let property = props.len();
        let alternatives = group
            .fields
            .iter()
            .enumerate()
            .map(|(i, field)| seed_field(msg, field, Slot::alternative(property, i), pending))
            .collect();
        props.push((group.name.clone(), DataSchema::OneOf(alternatives)));
    }
    DataSchema::Object(props)
}

fn seed_field(
    msg: &MessageDecl,
    field: &FieldDecl,
    slot: Slot,
    pending: &mut Vec<UnresolvedReference>,
) -> DataSchema {
    match &field.ty {
        FieldType::Primitive(kind) => DataSchema::Primitive(*kind),
        FieldType::Reference(type_name) => {
            pending.push(UnresolvedReference {
                defining_message: msg.name.clone(),
                type_name: type_name.clone(),
                field_name: field.name.clone(),
                slot,
            });
            DataSchema::Empty
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grpcwot_core::{FieldDecl, PrimitiveKind};

    fn int() -> DataSchema {
        DataSchema::Primitive(PrimitiveKind::Integer)
    }

    #[test]
    fn test_seed_records_references_with_slots() {
        let messages = vec![
            MessageDecl::new("M")
                .field("n", "int32")
                .field("other", "Other")
                .oneof("choice", vec![FieldDecl::new("flag", "bool"), FieldDecl::new("o", "Other")]),
            MessageDecl::new("Other"),
        ];
        let resolver = SchemaResolver::new(&messages).unwrap();
        let (schemas, pending) = resolver.seed();

        assert_eq!(schemas[1], DataSchema::Empty);
        assert_eq!(pending.len(), 2);
        assert_eq!(pending[0].field_name, "other");
        assert_eq!(pending[0].slot, Slot::field(1));
        assert_eq!(pending[1].field_name, "o");
        assert_eq!(pending[1].slot, Slot::alternative(2, 1));
        assert_eq!(schemas[0].property("n"), Some(&int()));
    }

    #[test]
    fn test_duplicate_message_name() {
        let messages = vec![MessageDecl::new("A"), MessageDecl::new("A")];
        let err = SchemaResolver::new(&messages).unwrap_err();
        assert!(matches!(err, Error::DuplicateMessageName { name } if name == "A"));
    }

    #[test]
    fn test_unresolved_reference_names_type_and_message() {
        let messages = vec![MessageDecl::new("Outer.Inner").field("x", "Missing")];
        let err = resolve(&messages).unwrap_err();
        match err {
            Error::UnresolvedTypeReference {
                type_name,
                in_message,
            } => {
                assert_eq!(type_name, "Missing");
                assert_eq!(in_message, "Outer.Inner");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_self_reference_is_circular() {
        let messages = vec![MessageDecl::new("Node").field("next", "Node")];
        let err = resolve(&messages).unwrap_err();
        assert!(matches!(err, Error::CircularMessageReference { messages } if messages == ["Node"]));
    }

    #[test]
    fn test_deep_chain_declared_in_reverse() {
        let messages = vec![
            MessageDecl::new("D").field("c", "C"),
            MessageDecl::new("C").field("b", "B"),
            MessageDecl::new("B").field("a", "A"),
            MessageDecl::new("A").field("v", "int64"),
        ];
        let schemas = resolve(&messages).unwrap();
        let d = schemas.get("D").unwrap();
        assert_eq!(d.depth(), 5);
        assert_eq!(
            d.property("c").and_then(|c| c.property("b")).and_then(|b| b.property("a")),
            schemas.get("A")
        );
    }

    #[test]
    fn test_oneof_alternative_is_injected() {
        let messages = vec![
            MessageDecl::new("Circle").field("radius", "double"),
            MessageDecl::new("Shape").oneof(
                "kind",
                vec![FieldDecl::new("circle", "Circle"), FieldDecl::new("label", "string")],
            ),
        ];
        let schemas = resolve(&messages).unwrap();
        let kind = schemas.get("Shape").unwrap().property("kind").unwrap();
        assert_eq!(
            kind,
            &DataSchema::OneOf(vec![
                schemas.get("Circle").unwrap().clone(),
                DataSchema::Primitive(PrimitiveKind::String),
            ])
        );
    }

    #[test]
    fn test_reference_to_empty_message_keeps_property() {
        let messages = vec![
            MessageDecl::new("Nothing"),
            MessageDecl::new("Holder").field("n", "Nothing"),
        ];
        let schemas = resolve(&messages).unwrap();
        let holder = schemas.get("Holder").unwrap();
        assert!(holder.has_payload());
        assert_eq!(holder.property("n"), Some(&DataSchema::Empty));
    }
}
