//! Compact per-affordance summary.

use grpcwot_core::{Access, AffordanceKind, AffordanceSet};
use serde::Serialize;

/// One affordance with the RPCs backing it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AffordanceOverview {
    /// Affordance name
    pub name: String,
    /// Affordance kind
    pub kind: AffordanceKind,
    /// Access mode, for properties only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access: Option<Access>,
    /// Backing RPC names, getter first
    pub rpcs: Vec<String>,
}

/// Summarizes an affordance set: properties, then actions, then events.
#[must_use]
pub fn overview(affordances: &AffordanceSet) -> Vec<AffordanceOverview> {
    let properties = affordances.properties.iter().map(|p| AffordanceOverview {
        name: p.name.clone(),
        kind: AffordanceKind::Property,
        access: Some(p.access()),
        rpcs: p.rpc_names().into_iter().map(str::to_string).collect(),
    });
    let operations = [
        (AffordanceKind::Action, &affordances.actions),
        (AffordanceKind::Event, &affordances.events),
    ]
    .into_iter()
    .flat_map(|(kind, ops)| {
        ops.iter().map(move |op| AffordanceOverview {
            name: op.name.clone(),
            kind,
            access: None,
            rpcs: vec![op.rpc.rpc.clone()],
        })
    });
    properties.chain(operations).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use grpcwot_core::{DataSchema, OperationAffordance, PropertyAffordance, RpcBinding};

    #[test]
    fn test_overview_order_and_fields() {
        let binding = |name: &str| RpcBinding::new(name, DataSchema::Empty, DataSchema::Empty);
        let set = AffordanceSet {
            properties: vec![PropertyAffordance::from_sides("Power", Some(binding("GetPower")), None).unwrap()],
            actions: vec![OperationAffordance::from_binding(binding("Reboot"))],
            events: vec![OperationAffordance::from_binding(binding("Alarm"))],
        };

        let rows = overview(&set);
        let kinds: Vec<AffordanceKind> = rows.iter().map(|r| r.kind).collect();
        assert_eq!(kinds, vec![AffordanceKind::Property, AffordanceKind::Action, AffordanceKind::Event]);
        assert_eq!(rows[0].access, Some(Access::ReadOnly));
        assert_eq!(rows[0].rpcs, vec!["GetPower".to_string()]);

        let json = serde_json::to_value(&rows).unwrap();
        assert_eq!(json[0]["access"], "readOnly");
        assert!(json[1].get("access").is_none());
        assert_eq!(json[2]["kind"], "event");
    }
}
