//! Classification predicates and their combinators.
//!
//! A predicate looks at one RPC together with its resolved request and
//! response schemas. Predicates are plain function values; [`and`], [`or`]
//! and [`not`] compose them into new ones without boxing.
//!
//! # Examples
//!
//! ```
//! use grpcwot_classifier::rules::{self, ClassifierRules};
//! use grpcwot_core::{AffordanceKind, DataSchema, PrimitiveKind, RpcBinding};
//!
//! // Only `Get...` methods become properties, everything else uses the defaults.
//! let custom = ClassifierRules::new(rules::starts_with_get, rules::looks_like_event);
//!
//! let payload = DataSchema::object([("v", DataSchema::Primitive(PrimitiveKind::Integer))]);
//! let setter = RpcBinding::new("SetLevel", payload, DataSchema::Empty);
//!
//! assert_eq!(ClassifierRules::default().kind_of(&setter), AffordanceKind::Property);
//! assert_eq!(custom.kind_of(&setter), AffordanceKind::Action);
//! ```

use grpcwot_core::{AffordanceKind, DataSchema, RpcBinding};
use std::fmt;

/// A classification predicate as a plain function pointer.
pub type Rule = fn(&RpcBinding) -> bool;

/// Accessor role implied by a method name prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Accessor {
    /// `Get` prefix
    Get,
    /// `Set` prefix
    Set,
}

/// Splits a method name into its accessor role and base name.
///
/// The prefix match is case-insensitive; the base is returned as written.
///
/// # Examples
///
/// ```
/// use grpcwot_classifier::rules::{Accessor, accessor_of};
///
/// assert_eq!(accessor_of("GetColor"), Some((Accessor::Get, "Color")));
/// assert_eq!(accessor_of("setColor"), Some((Accessor::Set, "Color")));
/// assert_eq!(accessor_of("Reset"), None);
/// ```
#[must_use]
pub fn accessor_of(name: &str) -> Option<(Accessor, &str)> {
    let prefix = name.get(..3)?;
    let accessor = if prefix.eq_ignore_ascii_case("get") {
        Accessor::Get
    } else if prefix.eq_ignore_ascii_case("set") {
        Accessor::Set
    } else {
        return None;
    };
    Some((accessor, &name[3..]))
}

/// Returns `true` iff the schema is an object with at least one property.
#[must_use]
pub fn has_payload(schema: &DataSchema) -> bool {
    schema.has_payload()
}

/// Returns `true` if the name starts with `Get` or `Set`, ignoring case.
#[must_use]
pub fn is_accessor_name(name: &str) -> bool {
    accessor_of(name).is_some()
}

/// The method name starts with `Get`, ignoring case.
#[must_use]
pub fn starts_with_get(rpc: &RpcBinding) -> bool {
    matches!(accessor_of(&rpc.rpc), Some((Accessor::Get, _)))
}

/// The method name starts with `Set`, ignoring case.
#[must_use]
pub fn starts_with_set(rpc: &RpcBinding) -> bool {
    matches!(accessor_of(&rpc.rpc), Some((Accessor::Set, _)))
}

/// The method name looks like a getter or setter.
#[must_use]
pub fn looks_like_accessor(rpc: &RpcBinding) -> bool {
    is_accessor_name(&rpc.rpc)
}

/// The request carries a payload.
#[must_use]
pub fn has_request_payload(rpc: &RpcBinding) -> bool {
    has_payload(&rpc.request)
}

/// The response carries a payload.
#[must_use]
pub fn has_response_payload(rpc: &RpcBinding) -> bool {
    has_payload(&rpc.response)
}

/// Nothing is sent but something comes back.
#[must_use]
pub fn looks_like_event(rpc: &RpcBinding) -> bool {
    !has_request_payload(rpc) && has_response_payload(rpc)
}

/// Both predicates hold.
pub fn and<A, B>(a: A, b: B) -> impl Fn(&RpcBinding) -> bool
where
    A: Fn(&RpcBinding) -> bool,
    B: Fn(&RpcBinding) -> bool,
{
    move |rpc: &RpcBinding| a(rpc) && b(rpc)
}

/// At least one predicate holds.
pub fn or<A, B>(a: A, b: B) -> impl Fn(&RpcBinding) -> bool
where
    A: Fn(&RpcBinding) -> bool,
    B: Fn(&RpcBinding) -> bool,
{
    move |rpc: &RpcBinding| a(rpc) || b(rpc)
}

/// The predicate does not hold.
pub fn not<A>(a: A) -> impl Fn(&RpcBinding) -> bool
where
    A: Fn(&RpcBinding) -> bool,
{
    move |rpc: &RpcBinding| !a(rpc)
}

/// The predicates driving automatic classification.
///
/// The property rule is tried first, then the event rule; an RPC matching
/// neither becomes an action.
pub struct ClassifierRules<P = Rule, E = Rule> {
    /// Selects property candidates
    pub property: P,
    /// Selects events among the remaining RPCs
    pub event: E,
}

impl<P, E> ClassifierRules<P, E>
where
    P: Fn(&RpcBinding) -> bool,
    E: Fn(&RpcBinding) -> bool,
{
    /// Creates rules from a property and an event predicate.
    pub const fn new(property: P, event: E) -> Self {
        Self { property, event }
    }

    /// Returns the affordance kind the rules assign to an RPC.
    pub fn kind_of(&self, rpc: &RpcBinding) -> AffordanceKind {
        if (self.property)(rpc) {
            AffordanceKind::Property
        } else if (self.event)(rpc) {
            AffordanceKind::Event
        } else {
            AffordanceKind::Action
        }
    }
}

impl Default for ClassifierRules {
    fn default() -> Self {
        Self {
            property: looks_like_accessor,
            event: looks_like_event,
        }
    }
}

impl<P, E> fmt::Debug for ClassifierRules<P, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassifierRules").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grpcwot_core::PrimitiveKind;

    fn payload() -> DataSchema {
        DataSchema::object([("v", DataSchema::Primitive(PrimitiveKind::Integer))])
    }

    fn rpc(name: &str, request: DataSchema, response: DataSchema) -> RpcBinding {
        RpcBinding::new(name, request, response)
    }

    #[test]
    fn test_accessor_prefix_is_case_insensitive() {
        assert_eq!(accessor_of("GETLEVEL"), Some((Accessor::Get, "LEVEL")));
        assert_eq!(accessor_of("Set"), Some((Accessor::Set, "")));
        assert_eq!(accessor_of("Ge"), None);
        assert_eq!(accessor_of(""), None);
        assert!(is_accessor_name("getter"));
        assert!(!is_accessor_name("Compute"));
    }

    #[test]
    fn test_accessor_of_handles_multibyte_names() {
        assert_eq!(accessor_of("Gé"), None);
        assert_eq!(accessor_of("ÄÖÜ"), None);
    }

    #[test]
    fn test_has_payload() {
        assert!(has_payload(&payload()));
        assert!(!has_payload(&DataSchema::Empty));
        assert!(!has_payload(&DataSchema::Object(Vec::new())));
    }

    #[test]
    fn test_event_boundary() {
        assert!(looks_like_event(&rpc("Alert", DataSchema::Empty, payload())));
        assert!(!looks_like_event(&rpc("Compute", payload(), payload())));
        assert!(!looks_like_event(&rpc("Ping", DataSchema::Empty, DataSchema::Empty)));
    }

    #[test]
    fn test_combinators_match_default_rules() {
        let composed = ClassifierRules::new(
            or(starts_with_get, starts_with_set),
            and(not(has_request_payload), has_response_payload),
        );
        let defaults = ClassifierRules::default();

        let samples = [
            rpc("GetColor", DataSchema::Empty, payload()),
            rpc("SetColor", payload(), DataSchema::Empty),
            rpc("Alert", DataSchema::Empty, payload()),
            rpc("Compute", payload(), payload()),
            rpc("Reset", DataSchema::Empty, DataSchema::Empty),
        ];
        for sample in &samples {
            assert_eq!(composed.kind_of(sample), defaults.kind_of(sample), "{}", sample.rpc);
        }
    }

    #[test]
    fn test_kind_of_defaults() {
        let rules = ClassifierRules::default();
        assert_eq!(rules.kind_of(&rpc("getColor", DataSchema::Empty, payload())), AffordanceKind::Property);
        assert_eq!(rules.kind_of(&rpc("Alert", DataSchema::Empty, payload())), AffordanceKind::Event);
        assert_eq!(rules.kind_of(&rpc("Compute", payload(), payload())), AffordanceKind::Action);
        assert_eq!(rules.kind_of(&rpc("Reset", DataSchema::Empty, DataSchema::Empty)), AffordanceKind::Action);
    }

    #[test]
    fn test_rules_debug() {
        assert!(format!("{:?}", ClassifierRules::default()).starts_with("ClassifierRules"));
    }
}
