//! Classified interaction affordances.
//!
//! Every RPC of a service ends up backing exactly one affordance: a
//! property (read through a getter, written through a setter, or both), an
//! action, or an event. Each backing RPC travels with value copies of its
//! resolved request and response schemas.

use crate::{ClassificationEntry, ClassificationRecord, DataSchema};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of interaction affordance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AffordanceKind {
    /// State that can be read and/or written
    Property,
    /// Invocable operation
    Action,
    /// Notification emitted by the thing
    Event,
}

impl AffordanceKind {
    /// Returns the class name used in classification records.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Property => "property",
            Self::Action => "action",
            Self::Event => "event",
        }
    }
}

impl fmt::Display for AffordanceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AffordanceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "property" => Ok(Self::Property),
            "action" => Ok(Self::Action),
            "event" => Ok(Self::Event),
            other => Err(other.to_string()),
        }
    }
}

/// Access mode of a property, derived from which accessors back it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Access {
    /// Only a getter exists
    ReadOnly,
    /// Only a setter exists
    WriteOnly,
    /// Both getter and setter exist
    ReadWrite,
}

impl Access {
    /// Returns `true` if the property can be read.
    #[must_use]
    pub const fn is_readable(&self) -> bool {
        matches!(self, Self::ReadOnly | Self::ReadWrite)
    }

    /// Returns `true` if the property can be written.
    #[must_use]
    pub const fn is_writable(&self) -> bool {
        matches!(self, Self::WriteOnly | Self::ReadWrite)
    }
}

/// An RPC joined with its resolved request and response schemas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RpcBinding {
    /// RPC name
    pub rpc: String,
    /// Resolved request schema
    pub request: DataSchema,
    /// Resolved response schema
    pub response: DataSchema,
}

impl RpcBinding {
    /// Creates a binding.
    #[must_use]
    pub fn new(rpc: impl Into<String>, request: DataSchema, response: DataSchema) -> Self {
        Self {
            rpc: rpc.into(),
            request,
            response,
        }
    }
}

/// The RPCs backing a property. A property always has at least one backer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyBackers {
    /// Backed by a getter only
    ReadOnly {
        /// Getter RPC
        getter: RpcBinding,
    },
    /// Backed by a setter only
    WriteOnly {
        /// Setter RPC
        setter: RpcBinding,
    },
    /// Backed by a getter and a setter with matching schemas
    ReadWrite {
        /// Getter RPC
        getter: RpcBinding,
        /// Setter RPC
        setter: RpcBinding,
    },
}

/// A property affordance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyAffordance {
    /// Externally visible property name
    pub name: String,
    /// Backing RPCs
    pub backers: PropertyBackers,
}

impl PropertyAffordance {
    /// Creates a property from an optional getter and setter.
    ///
    /// Returns `None` if neither side is present.
    ///
    /// # Examples
    ///
    /// ```
    /// use grpcwot_core::{Access, DataSchema, PropertyAffordance, RpcBinding};
    ///
    /// let getter = RpcBinding::new("GetColor", DataSchema::Empty, DataSchema::Empty);
    /// let prop = PropertyAffordance::from_sides("Color", Some(getter), None).unwrap();
    /// assert_eq!(prop.access(), Access::ReadOnly);
    /// assert!(PropertyAffordance::from_sides("Color", None, None).is_none());
    /// ```
    #[must_use]
    pub fn from_sides(
        name: impl Into<String>,
        getter: Option<RpcBinding>,
        setter: Option<RpcBinding>,
    ) -> Option<Self> {
        let backers = match (getter, setter) {
            (Some(getter), Some(setter)) => PropertyBackers::ReadWrite { getter, setter },
            (Some(getter), None) => PropertyBackers::ReadOnly { getter },
            (None, Some(setter)) => PropertyBackers::WriteOnly { setter },
            (None, None) => return None,
        };
        Some(Self {
            name: name.into(),
            backers,
        })
    }

    /// Returns the access mode.
    #[must_use]
    pub const fn access(&self) -> Access {
        match self.backers {
            PropertyBackers::ReadOnly { .. } => Access::ReadOnly,
            PropertyBackers::WriteOnly { .. } => Access::WriteOnly,
            PropertyBackers::ReadWrite { .. } => Access::ReadWrite,
        }
    }

    /// Returns the getter, if any.
    #[must_use]
    pub const fn getter(&self) -> Option<&RpcBinding> {
        match &self.backers {
            PropertyBackers::ReadOnly { getter } | PropertyBackers::ReadWrite { getter, .. } => {
                Some(getter)
            }
            PropertyBackers::WriteOnly { .. } => None,
        }
    }

    /// Returns the setter, if any.
    #[must_use]
    pub const fn setter(&self) -> Option<&RpcBinding> {
        match &self.backers {
            PropertyBackers::WriteOnly { setter } | PropertyBackers::ReadWrite { setter, .. } => {
                Some(setter)
            }
            PropertyBackers::ReadOnly { .. } => None,
        }
    }

    /// Returns the value schema of the property.
    ///
    /// This is the getter's response when a getter exists, otherwise the
    /// setter's request.
    #[must_use]
    pub fn schema(&self) -> &DataSchema {
        match &self.backers {
            PropertyBackers::ReadOnly { getter } | PropertyBackers::ReadWrite { getter, .. } => {
                &getter.response
            }
            PropertyBackers::WriteOnly { setter } => &setter.request,
        }
    }

    /// Returns the backing RPC names, getter first.
    #[must_use]
    pub fn rpc_names(&self) -> Vec<&str> {
        self.getter()
            .into_iter()
            .chain(self.setter())
            .map(|binding| binding.rpc.as_str())
            .collect()
    }
}

/// An action or event affordance, backed by exactly one RPC.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationAffordance {
    /// Externally visible affordance name
    pub name: String,
    /// Backing RPC
    pub rpc: RpcBinding,
}

impl OperationAffordance {
    /// Creates an affordance named after its RPC.
    #[must_use]
    pub fn from_binding(rpc: RpcBinding) -> Self {
        Self {
            name: rpc.rpc.clone(),
            rpc,
        }
    }
}

/// Final classification result: every RPC assigned to exactly one affordance.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AffordanceSet {
    /// Property affordances
    pub properties: Vec<PropertyAffordance>,
    /// Action affordances
    pub actions: Vec<OperationAffordance>,
    /// Event affordances
    pub events: Vec<OperationAffordance>,
}

impl AffordanceSet {
    /// Total number of affordances.
    #[must_use]
    pub fn len(&self) -> usize {
        self.properties.len() + self.actions.len() + self.events.len()
    }

    /// Returns `true` if no affordance was produced.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Looks up a property by affordance name.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&PropertyAffordance> {
        self.properties.iter().find(|p| p.name == name)
    }

    /// Looks up an action by affordance name.
    #[must_use]
    pub fn action(&self, name: &str) -> Option<&OperationAffordance> {
        self.actions.iter().find(|a| a.name == name)
    }

    /// Looks up an event by affordance name.
    #[must_use]
    pub fn event(&self, name: &str) -> Option<&OperationAffordance> {
        self.events.iter().find(|e| e.name == name)
    }

    /// Captures the final `rpc → (affordance name, kind)` decisions.
    ///
    /// The record replays this exact classification on a later run.
    ///
    /// # Examples
    ///
    /// ```
    /// use grpcwot_core::{AffordanceKind, AffordanceSet, DataSchema, OperationAffordance, RpcBinding};
    ///
    /// let mut set = AffordanceSet::default();
    /// set.actions.push(OperationAffordance::from_binding(
    ///     RpcBinding::new("Compute", DataSchema::Empty, DataSchema::Empty),
    /// ));
    ///
    /// let record = set.record();
    /// let entry = record.get("Compute").unwrap();
    /// assert_eq!(entry.affordance_class, "action");
    /// assert_eq!(entry.name, None);
    /// ```
    #[must_use]
    pub fn record(&self) -> ClassificationRecord {
        let mut record = ClassificationRecord::default();
        for property in &self.properties {
            for rpc in property.rpc_names() {
                record.insert(rpc, ClassificationEntry::new(AffordanceKind::Property, &property.name, rpc));
            }
        }
        for (kind, operations) in [
            (AffordanceKind::Action, &self.actions),
            (AffordanceKind::Event, &self.events),
        ] {
            for op in operations {
                record.insert(&op.rpc.rpc, ClassificationEntry::new(kind, &op.name, &op.rpc.rpc));
            }
        }
        record
    }
}
