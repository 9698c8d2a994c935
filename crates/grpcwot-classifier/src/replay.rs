//! Classification replayed from a persisted record.

use crate::rules::{Accessor, accessor_of};
use grpcwot_core::{
    AffordanceKind, AffordanceSet, ClassificationRecord, Error, OperationAffordance,
    PropertyAffordance, Result, RpcBinding,
};
use tracing::debug;

/// Classifies bound RPCs exactly as the record says.
///
/// Every binding must have an entry, and every entry must name a binding
/// unless `is_ignored` accepts its key. Property RPCs sharing an affordance
/// name form one property of at most one getter and one setter. Schemas are
/// taken as recorded and not re-validated.
///
/// # Errors
///
/// - [`Error::IncompleteClassificationConfig`] if a binding has no entry
/// - [`Error::InvalidClassificationClass`] if an entry names an unknown class
/// - [`Error::UnknownClassificationEntry`] if an entry names no binding
/// - [`Error::InvalidPropertyGroup`] if property RPCs sharing a name cannot form one property
/// - [`Error::DuplicateAffordanceName`] if two actions or two events share a name
pub fn classify<F>(bindings: Vec<RpcBinding>, record: &ClassificationRecord, is_ignored: F) -> Result<AffordanceSet>
where
    F: Fn(&str) -> bool,
{
    for (rpc_name, _) in record.iter() {
        if !is_ignored(rpc_name) && !bindings.iter().any(|b| b.rpc == rpc_name) {
            return Err(Error::UnknownClassificationEntry {
                rpc_name: rpc_name.to_string(),
            });
        }
    }

    let mut set = AffordanceSet::default();
    let mut groups: Vec<(String, Vec<RpcBinding>)> = Vec::new();

    for binding in bindings {
        let entry = record
            .get(&binding.rpc)
            .ok_or_else(|| Error::IncompleteClassificationConfig {
                rpc_name: binding.rpc.clone(),
            })?;
        let kind = entry.kind().map_err(|value| Error::InvalidClassificationClass {
            rpc_name: binding.rpc.clone(),
            value,
        })?;
        let name = entry.affordance_name(&binding.rpc).to_string();

        match kind {
            AffordanceKind::Property => match groups.iter_mut().find(|(n, _)| *n == name) {
                Some((_, members)) => members.push(binding),
                None => groups.push((name, vec![binding])),
            },
            AffordanceKind::Action => set.actions.push(OperationAffordance { name, rpc: binding }),
            AffordanceKind::Event => set.events.push(OperationAffordance { name, rpc: binding }),
        }
    }

    for (name, members) in groups {
        set.properties.push(build_property(name, members)?);
    }
    ensure_unique(&set.actions)?;
    ensure_unique(&set.events)?;

    debug!(
        "Replayed {} properties, {} actions, {} events",
        set.properties.len(),
        set.actions.len(),
        set.events.len()
    );
    Ok(set)
}

fn ensure_unique(affordances: &[OperationAffordance]) -> Result<()> {
    for (i, affordance) in affordances.iter().enumerate() {
        let rpcs: Vec<String> = affordances[i..]
            .iter()
            .filter(|other| other.name == affordance.name)
            .map(|other| other.rpc.rpc.clone())
            .collect();
        if rpcs.len() > 1 {
            return Err(Error::DuplicateAffordanceName {
                name: affordance.name.clone(),
                rpcs,
            });
        }
    }
    Ok(())
}

fn side_of(binding: &RpcBinding) -> Accessor {
    match accessor_of(&binding.rpc) {
        Some((accessor, _)) => accessor,
        None if binding.request.has_payload() => Accessor::Set,
        None => Accessor::Get,
    }
}

fn build_property(name: String, members: Vec<RpcBinding>) -> Result<PropertyAffordance> {
    let invalid = |members: &[RpcBinding], name: String| Error::InvalidPropertyGroup {
        name,
        rpcs: members.iter().map(|b| b.rpc.clone()).collect(),
    };
    if members.len() > 2 {
        return Err(invalid(&members, name));
    }

    let mut getter = None;
    let mut setter = None;
    for binding in &members {
        let side = match side_of(binding) {
            Accessor::Get => &mut getter,
            Accessor::Set => &mut setter,
        };
        if side.is_some() {
            return Err(invalid(&members, name));
        }
        *side = Some(binding.clone());
    }

    PropertyAffordance::from_sides(name.clone(), getter, setter).ok_or_else(|| invalid(&members, name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use grpcwot_core::{Access, ClassificationEntry, DataSchema, PrimitiveKind};

    fn payload() -> DataSchema {
        DataSchema::object([("v", DataSchema::Primitive(PrimitiveKind::Integer))])
    }

    fn bindings() -> Vec<RpcBinding> {
        vec![
            RpcBinding::new("GetColor", DataSchema::Empty, payload()),
            RpcBinding::new("SetColor", payload(), DataSchema::Empty),
            RpcBinding::new("Alert", DataSchema::Empty, payload()),
        ]
    }

    fn entry(kind: AffordanceKind, name: &str, rpc: &str) -> (String, ClassificationEntry) {
        (rpc.to_string(), ClassificationEntry::new(kind, name, rpc))
    }

    fn never(_: &str) -> bool {
        false
    }

    #[test]
    fn test_record_overrides_heuristics() {
        let record: ClassificationRecord = [
            entry(AffordanceKind::Action, "GetColor", "GetColor"),
            entry(AffordanceKind::Property, "Tint", "SetColor"),
            entry(AffordanceKind::Action, "RaiseAlert", "Alert"),
        ]
        .into_iter()
        .collect();

        let set = classify(bindings(), &record, never).unwrap();
        assert!(set.action("GetColor").is_some());
        assert_eq!(set.property("Tint").unwrap().access(), Access::WriteOnly);
        assert_eq!(set.action("RaiseAlert").unwrap().rpc.rpc, "Alert");
        assert!(set.events.is_empty());
    }

    #[test]
    fn test_missing_entry() {
        let record: ClassificationRecord = [entry(AffordanceKind::Event, "Alert", "Alert")]
            .into_iter()
            .collect();
        let err = classify(bindings(), &record, never).unwrap_err();
        assert!(matches!(err, Error::IncompleteClassificationConfig { rpc_name } if rpc_name == "GetColor"));
    }

    #[test]
    fn test_invalid_class() {
        let record = ClassificationRecord::from_json_str(
            r#"{"GetColor":{"AffClass":"property","Name":"Color"},
                "SetColor":{"AffClass":"property","Name":"Color"},
                "Alert":{"AffClass":"signal"}}"#,
        )
        .unwrap();
        let err = classify(bindings(), &record, never).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidClassificationClass { ref rpc_name, ref value } if rpc_name == "Alert" && value == "signal"
        ));
    }

    #[test]
    fn test_unknown_entry_unless_ignored() {
        let record: ClassificationRecord = [
            entry(AffordanceKind::Property, "Color", "GetColor"),
            entry(AffordanceKind::Property, "Color", "SetColor"),
            entry(AffordanceKind::Event, "Alert", "Alert"),
            entry(AffordanceKind::Action, "Removed", "Removed"),
        ]
        .into_iter()
        .collect();

        let err = classify(bindings(), &record, never).unwrap_err();
        assert!(matches!(err, Error::UnknownClassificationEntry { rpc_name } if rpc_name == "Removed"));

        let set = classify(bindings(), &record, |name| name == "Removed").unwrap();
        assert_eq!(set.property("Color").unwrap().access(), Access::ReadWrite);
    }

    #[test]
    fn test_group_of_three_is_invalid() {
        let mut members = bindings();
        members.push(RpcBinding::new("GetShade", DataSchema::Empty, payload()));
        let record: ClassificationRecord = ["GetColor", "SetColor", "Alert", "GetShade"]
            .into_iter()
            .map(|rpc| entry(AffordanceKind::Property, "Color", rpc))
            .collect();
        let err = classify(members, &record, never).unwrap_err();
        match err {
            Error::InvalidPropertyGroup { name, rpcs } => {
                assert_eq!(name, "Color");
                assert_eq!(rpcs.len(), 4);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_two_getters_in_one_group_is_invalid() {
        let members = vec![
            RpcBinding::new("GetColor", DataSchema::Empty, payload()),
            RpcBinding::new("GetShade", DataSchema::Empty, payload()),
        ];
        let record: ClassificationRecord = [
            entry(AffordanceKind::Property, "Color", "GetColor"),
            entry(AffordanceKind::Property, "Color", "GetShade"),
        ]
        .into_iter()
        .collect();
        let err = classify(members, &record, never).unwrap_err();
        assert!(err.is_classification_error());
    }

    #[test]
    fn test_side_falls_back_to_payload() {
        let members = vec![
            RpcBinding::new("Read", DataSchema::Empty, payload()),
            RpcBinding::new("Write", payload(), DataSchema::Empty),
        ];
        let record: ClassificationRecord = [
            entry(AffordanceKind::Property, "Level", "Read"),
            entry(AffordanceKind::Property, "Level", "Write"),
        ]
        .into_iter()
        .collect();
        let set = classify(members, &record, never).unwrap();
        let level = set.property("Level").unwrap();
        assert_eq!(level.getter().unwrap().rpc, "Read");
        assert_eq!(level.setter().unwrap().rpc, "Write");
    }

    #[test]
    fn test_mismatched_schemas_not_revalidated() {
        let members = vec![
            RpcBinding::new("GetColor", DataSchema::Empty, payload()),
            RpcBinding::new("SetColor", DataSchema::object([("s", DataSchema::Primitive(PrimitiveKind::String))]), DataSchema::Empty),
        ];
        let record: ClassificationRecord = [
            entry(AffordanceKind::Property, "Color", "GetColor"),
            entry(AffordanceKind::Property, "Color", "SetColor"),
        ]
        .into_iter()
        .collect();
        let set = classify(members, &record, never).unwrap();
        assert_eq!(set.property("Color").unwrap().access(), Access::ReadWrite);
    }

    #[test]
    fn test_shared_action_name_is_fatal() {
        let record: ClassificationRecord = [
            entry(AffordanceKind::Action, "Color", "GetColor"),
            entry(AffordanceKind::Action, "Color", "SetColor"),
            entry(AffordanceKind::Event, "Alert", "Alert"),
        ]
        .into_iter()
        .collect();
        let err = classify(bindings(), &record, never).unwrap_err();
        match err {
            Error::DuplicateAffordanceName { name, rpcs } => {
                assert_eq!(name, "Color");
                assert_eq!(rpcs, vec!["GetColor".to_string(), "SetColor".to_string()]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_shared_name_across_sections_is_allowed() {
        let record: ClassificationRecord = [
            entry(AffordanceKind::Property, "Color", "GetColor"),
            entry(AffordanceKind::Action, "Color", "SetColor"),
            entry(AffordanceKind::Event, "Color", "Alert"),
        ]
        .into_iter()
        .collect();
        let set = classify(bindings(), &record, never).unwrap();
        assert_eq!(set.len(), 3);
    }
}
