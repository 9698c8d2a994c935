//! Thing Description document model and assembly.

use crate::TdSettings;
use grpcwot_core::{AffordanceSet, DataSchema, OperationAffordance, PropertyAffordance, Result};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{info, warn};

/// JSON-LD context of Thing Description 1.0.
pub const TD_CONTEXT: &str = "https://www.w3.org/2019/wot/td/v1";

/// Name of the single security definition.
pub const NOSEC_SCHEME: &str = "nosec_sc";

/// Operation a form supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// Read a property
    ReadProperty,
    /// Write a property
    WriteProperty,
    /// Invoke an action
    InvokeAction,
    /// Subscribe to an event
    SubscribeEvent,
}

/// A protocol binding for an affordance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Form {
    /// Target IRI
    pub href: String,
    /// Payload content type
    #[serde(rename = "contentType")]
    pub content_type: String,
    /// Supported operations
    pub op: Vec<Operation>,
}

/// A security scheme definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SecurityScheme {
    /// Scheme identifier
    pub scheme: String,
}

/// A property affordance as it appears in the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PropertyDescription {
    /// Value schema
    #[serde(flatten)]
    pub schema: DataSchema,
    /// Set when the property has no setter
    #[serde(rename = "readOnly")]
    pub read_only: bool,
    /// Set when the property has no getter
    #[serde(rename = "writeOnly")]
    pub write_only: bool,
    /// Protocol bindings
    pub forms: Vec<Form>,
}

/// An action affordance as it appears in the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionDescription {
    /// Request schema
    pub input: DataSchema,
    /// Response schema
    pub output: DataSchema,
    /// Protocol bindings
    pub forms: Vec<Form>,
}

/// An event affordance as it appears in the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventDescription {
    /// Emitted payload schema
    pub data: DataSchema,
    /// Protocol bindings
    pub forms: Vec<Form>,
}

/// A Web of Things Thing Description.
///
/// Affordance maps are sorted by name so that assembling the same
/// affordances always yields the same JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThingDescription {
    /// JSON-LD context
    #[serde(rename = "@context")]
    pub context: String,
    /// Thing title, the service name
    pub title: String,
    /// Named security schemes
    #[serde(rename = "securityDefinitions")]
    pub security_definitions: BTreeMap<String, SecurityScheme>,
    /// Security schemes in force
    pub security: Vec<String>,
    /// Property affordances
    pub properties: BTreeMap<String, PropertyDescription>,
    /// Action affordances
    pub actions: BTreeMap<String, ActionDescription>,
    /// Event affordances
    pub events: BTreeMap<String, EventDescription>,
}

impl ThingDescription {
    /// Creates an empty document for a thing.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            context: TD_CONTEXT.to_string(),
            title: title.into(),
            security_definitions: BTreeMap::from([(
                NOSEC_SCHEME.to_string(),
                SecurityScheme {
                    scheme: "nosec".to_string(),
                },
            )]),
            security: vec![NOSEC_SCHEME.to_string()],
            properties: BTreeMap::new(),
            actions: BTreeMap::new(),
            events: BTreeMap::new(),
        }
    }

    /// Total number of affordances in the document.
    #[must_use]
    pub fn affordance_count(&self) -> usize {
        self.properties.len() + self.actions.len() + self.events.len()
    }

    /// Serializes the document to pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`grpcwot_core::Error::SerializationError`] if serialization fails.
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Converts the document to a JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`grpcwot_core::Error::SerializationError`] if serialization fails.
    pub fn to_json_value(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}

/// Builds the Thing Description of a classified service.
///
/// # Examples
///
/// ```
/// use grpcwot_core::{AffordanceSet, DataSchema, OperationAffordance, RpcBinding};
/// use grpcwot_td::{TdSettings, assemble};
///
/// let mut set = AffordanceSet::default();
/// set.actions.push(OperationAffordance::from_binding(
///     RpcBinding::new("Reboot", DataSchema::Empty, DataSchema::Empty),
/// ));
///
/// let td = assemble("Router", &set, &TdSettings::default());
/// assert_eq!(td.actions["Reboot"].forms[0].href, "http://127.0.0.1:50051/Router/Reboot");
/// ```
#[must_use]
pub fn assemble(title: &str, affordances: &AffordanceSet, settings: &TdSettings) -> ThingDescription {
    let mut td = ThingDescription::new(title);

    for property in &affordances.properties {
        let description = describe_property(title, property, settings);
        if td.properties.insert(property.name.clone(), description).is_some() {
            warn!("Property {} defined more than once, keeping the last", property.name);
        }
    }
    for action in &affordances.actions {
        let description = ActionDescription {
            input: action.rpc.request.clone(),
            output: action.rpc.response.clone(),
            forms: vec![form(title, action, Operation::InvokeAction, settings)],
        };
        if td.actions.insert(action.name.clone(), description).is_some() {
            warn!("Action {} defined more than once, keeping the last", action.name);
        }
    }
    for event in &affordances.events {
        let description = EventDescription {
            data: event.rpc.response.clone(),
            forms: vec![form(title, event, Operation::SubscribeEvent, settings)],
        };
        if td.events.insert(event.name.clone(), description).is_some() {
            warn!("Event {} defined more than once, keeping the last", event.name);
        }
    }

    info!(
        "Assembled Thing Description '{title}' with {} affordances",
        td.affordance_count()
    );
    td
}

fn describe_property(title: &str, property: &PropertyAffordance, settings: &TdSettings) -> PropertyDescription {
    let access = property.access();
    let mut op = Vec::with_capacity(2);
    if access.is_readable() {
        op.push(Operation::ReadProperty);
    }
    if access.is_writable() {
        op.push(Operation::WriteProperty);
    }

    PropertyDescription {
        schema: property.schema().clone(),
        read_only: !access.is_writable(),
        write_only: !access.is_readable(),
        forms: vec![Form {
            href: settings.href(title, &property.name),
            content_type: settings.content_type.clone(),
            op,
        }],
    }
}

fn form(title: &str, affordance: &OperationAffordance, op: Operation, settings: &TdSettings) -> Form {
    Form {
        href: settings.href(title, &affordance.name),
        content_type: settings.content_type.clone(),
        op: vec![op],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grpcwot_core::{PrimitiveKind, RpcBinding};
    use serde_json::json;

    fn level() -> DataSchema {
        DataSchema::object([("value", DataSchema::Primitive(PrimitiveKind::Integer))])
    }

    fn lamp() -> AffordanceSet {
        AffordanceSet {
            properties: vec![
                PropertyAffordance::from_sides(
                    "Level",
                    Some(RpcBinding::new("GetLevel", DataSchema::Empty, level())),
                    Some(RpcBinding::new("SetLevel", level(), DataSchema::Empty)),
                )
                .unwrap(),
                PropertyAffordance::from_sides(
                    "Schedule",
                    None,
                    Some(RpcBinding::new("SetSchedule", level(), DataSchema::Empty)),
                )
                .unwrap(),
            ],
            actions: vec![OperationAffordance::from_binding(RpcBinding::new(
                "Blink",
                level(),
                DataSchema::Empty,
            ))],
            events: vec![OperationAffordance::from_binding(RpcBinding::new(
                "Overheat",
                DataSchema::Empty,
                level(),
            ))],
        }
    }

    #[test]
    fn test_document_header() {
        let value = assemble("Lamp", &AffordanceSet::default(), &TdSettings::default())
            .to_json_value()
            .unwrap();
        assert_eq!(value["@context"], TD_CONTEXT);
        assert_eq!(value["title"], "Lamp");
        assert_eq!(value["securityDefinitions"], json!({"nosec_sc": {"scheme": "nosec"}}));
        assert_eq!(value["security"], json!(["nosec_sc"]));
        assert_eq!(value["properties"], json!({}));
    }

    #[test]
    fn test_read_write_property() {
        let value = assemble("Lamp", &lamp(), &TdSettings::default()).to_json_value().unwrap();
        let level = &value["properties"]["Level"];
        assert_eq!(level["type"], "object");
        assert_eq!(level["properties"]["value"]["type"], "integer");
        assert_eq!(level["readOnly"], false);
        assert_eq!(level["writeOnly"], false);
        assert_eq!(level["forms"][0]["op"], json!(["readproperty", "writeproperty"]));
        assert_eq!(level["forms"][0]["href"], "http://127.0.0.1:50051/Lamp/Level");
        assert_eq!(level["forms"][0]["contentType"], "application/grpc+proto");
    }

    #[test]
    fn test_write_only_property_uses_setter_request() {
        let value = assemble("Lamp", &lamp(), &TdSettings::default()).to_json_value().unwrap();
        let schedule = &value["properties"]["Schedule"];
        assert_eq!(schedule["writeOnly"], true);
        assert_eq!(schedule["readOnly"], false);
        assert_eq!(schedule["properties"]["value"]["type"], "integer");
        assert_eq!(schedule["forms"][0]["op"], json!(["writeproperty"]));
    }

    #[test]
    fn test_action_and_event() {
        let value = assemble("Lamp", &lamp(), &TdSettings::default()).to_json_value().unwrap();
        let blink = &value["actions"]["Blink"];
        assert_eq!(blink["input"]["properties"]["value"]["type"], "integer");
        assert_eq!(blink["output"], json!({"type": "object"}));
        assert_eq!(blink["forms"][0]["op"], json!(["invokeaction"]));

        let overheat = &value["events"]["Overheat"];
        assert_eq!(overheat["data"]["type"], "object");
        assert_eq!(overheat["forms"][0]["op"], json!(["subscribeevent"]));
    }

    #[test]
    fn test_custom_settings() {
        let settings = TdSettings::default()
            .with_host("lamp.local")
            .with_port(7000)
            .with_content_type("application/grpc");
        let td = assemble("Lamp", &lamp(), &settings);
        let form = &td.events["Overheat"].forms[0];
        assert_eq!(form.href, "http://lamp.local:7000/Lamp/Overheat");
        assert_eq!(form.content_type, "application/grpc");
    }

    #[test]
    fn test_assembly_is_deterministic() {
        let first = assemble("Lamp", &lamp(), &TdSettings::default()).to_json_string().unwrap();
        let second = assemble("Lamp", &lamp(), &TdSettings::default()).to_json_string().unwrap();
        assert_eq!(first, second);
    }
}
