//! Classifier entry point.

use crate::rules::{ClassifierRules, Rule};
use crate::{automatic, join, replay};
use grpcwot_core::{AffordanceSet, ClassificationRecord, Result, RpcBinding, RpcDecl, ServiceModel};
use grpcwot_resolver::ResolvedSchemas;
use std::collections::BTreeSet;
use std::fmt;
use tracing::info;

/// How a classification was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClassificationMode {
    /// Heuristic rules with getter/setter pairing
    Automatic,
    /// Replayed from a supplied record
    Replayed,
}

impl fmt::Display for ClassificationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Automatic => f.write_str("automatic"),
            Self::Replayed => f.write_str("replayed"),
        }
    }
}

/// Result of a classification run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    /// Mode the affordances were produced in
    pub mode: ClassificationMode,
    /// Final affordances
    pub affordances: AffordanceSet,
    /// Record of the final decisions, suitable for replay
    ///
    /// When a record was replayed under an allow-list, its entries for the
    /// dropped RPCs are carried over unchanged.
    pub record: ClassificationRecord,
}

/// Assigns every RPC of a service to exactly one affordance.
///
/// Without a record the classifier applies its rules; with a record it
/// reproduces the recorded decisions.
///
/// # Examples
///
/// ```
/// use grpcwot_classifier::Classifier;
/// use grpcwot_core::{Access, MessageDecl, RpcDecl};
///
/// let messages = vec![
///     MessageDecl::new("Empty"),
///     MessageDecl::new("Color").field("rgb", "int32"),
/// ];
/// let rpcs = vec![
///     RpcDecl::new("GetColor", "Empty", "Color"),
///     RpcDecl::new("SetColor", "Color", "Empty"),
/// ];
/// let schemas = grpcwot_resolver::resolve(&messages)?;
///
/// let first = Classifier::new().classify(&rpcs, &schemas, None)?;
/// assert_eq!(first.affordances.property("Color").unwrap().access(), Access::ReadWrite);
///
/// let replayed = Classifier::new().classify(&rpcs, &schemas, Some(&first.record))?;
/// assert_eq!(replayed.affordances, first.affordances);
/// # Ok::<(), grpcwot_core::Error>(())
/// ```
pub struct Classifier<P = Rule, E = Rule> {
    rules: ClassifierRules<P, E>,
    allow_list: Option<BTreeSet<String>>,
}

impl Classifier {
    /// Creates a classifier with the default rules and no allow-list.
    #[must_use]
    pub fn new() -> Self {
        Self::with_rules(ClassifierRules::default())
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new()
    }
}

impl<P, E> Classifier<P, E>
where
    P: Fn(&RpcBinding) -> bool,
    E: Fn(&RpcBinding) -> bool,
{
    /// Creates a classifier with custom rules.
    pub const fn with_rules(rules: ClassifierRules<P, E>) -> Self {
        Self {
            rules,
            allow_list: None,
        }
    }

    /// Restricts classification to the named RPCs.
    ///
    /// RPCs outside the list are dropped before classification.
    #[must_use]
    pub fn with_allow_list<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allow_list = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Returns the allow-list, if any.
    #[must_use]
    pub const fn allow_list(&self) -> Option<&BTreeSet<String>> {
        self.allow_list.as_ref()
    }

    /// Classifies RPCs against resolved schemas.
    ///
    /// Record entries for RPCs the allow-list drops are ignored during
    /// replay and copied into the output record.
    ///
    /// # Errors
    ///
    /// Fails on duplicate RPC names, RPC types naming no resolved message,
    /// and, when a record is given, on any mismatch between the record and
    /// the RPCs. See [`grpcwot_core::Error`].
    pub fn classify(
        &self,
        rpcs: &[RpcDecl],
        schemas: &ResolvedSchemas,
        record: Option<&ClassificationRecord>,
    ) -> Result<Classification> {
        let bindings = join::bind_rpcs(rpcs, schemas, self.allow_list.as_ref())?;
        let count = bindings.len();
        let dropped = |name: &str| rpcs.iter().any(|rpc| rpc.name == name) && !self.is_allowed(name);

        let (mode, affordances) = match record {
            Some(record) => (ClassificationMode::Replayed, replay::classify(bindings, record, &dropped)?),
            None => (ClassificationMode::Automatic, automatic::classify(bindings, &self.rules)),
        };

        info!(
            "Classified {count} RPCs ({mode}): {} properties, {} actions, {} events",
            affordances.properties.len(),
            affordances.actions.len(),
            affordances.events.len()
        );

        let mut decisions = affordances.record();
        if let Some(record) = record {
            for (rpc_name, entry) in record.iter().filter(|(rpc_name, _)| dropped(rpc_name)) {
                decisions.insert(rpc_name, entry.clone());
            }
        }
        Ok(Classification {
            mode,
            affordances,
            record: decisions,
        })
    }

    /// Resolves a service model's messages and classifies its RPCs.
    ///
    /// Either both steps succeed or nothing is returned.
    ///
    /// # Errors
    ///
    /// Any resolution or classification error.
    pub fn classify_model(
        &self,
        model: &ServiceModel,
        record: Option<&ClassificationRecord>,
    ) -> Result<(ResolvedSchemas, Classification)> {
        let schemas = grpcwot_resolver::resolve(&model.messages)?;
        let classification = self.classify(&model.rpcs, &schemas, record)?;
        Ok((schemas, classification))
    }

    fn is_allowed(&self, name: &str) -> bool {
        self.allow_list.as_ref().is_none_or(|allowed| allowed.contains(name))
    }
}

impl<P, E> fmt::Debug for Classifier<P, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Classifier")
            .field("rules", &self.rules)
            .field("allow_list", &self.allow_list)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grpcwot_core::{Access, AffordanceKind, ClassificationEntry, Error, MessageDecl};

    fn model() -> ServiceModel {
        ServiceModel {
            service: "Lamp".to_string(),
            messages: vec![
                MessageDecl::new("Empty"),
                MessageDecl::new("Level").field("value", "int32"),
            ],
            rpcs: vec![
                RpcDecl::new("GetLevel", "Empty", "Level"),
                RpcDecl::new("SetLevel", "Level", "Empty"),
                RpcDecl::new("Blink", "Level", "Level"),
            ],
        }
    }

    #[test]
    fn test_allow_list_reduces_output() {
        let classifier = Classifier::new().with_allow_list(["GetLevel"]);
        let (_, result) = classifier.classify_model(&model(), None).unwrap();
        assert_eq!(result.mode, ClassificationMode::Automatic);
        assert_eq!(result.affordances.len(), 1);
        assert_eq!(result.record.len(), 1);
    }

    #[test]
    fn test_replay_ignores_entries_dropped_by_allow_list() {
        let (_, full) = Classifier::new().classify_model(&model(), None).unwrap();
        assert_eq!(full.record.len(), 3);

        let reduced = Classifier::new().with_allow_list(["Blink"]);
        let (_, replayed) = reduced.classify_model(&model(), Some(&full.record)).unwrap();
        assert_eq!(replayed.mode, ClassificationMode::Replayed);
        assert!(replayed.affordances.action("Blink").is_some());
        assert_eq!(replayed.affordances.len(), 1);
        assert_eq!(replayed.record, full.record);
    }

    #[test]
    fn test_reduced_replay_keeps_renamed_dropped_entries() {
        let (_, full) = Classifier::new().classify_model(&model(), None).unwrap();
        let mut record = full.record.clone();
        record.insert(
            "GetLevel",
            ClassificationEntry::new(AffordanceKind::Event, "LevelChanged", "GetLevel"),
        );

        let reduced = Classifier::new().with_allow_list(["Blink"]);
        let (_, replayed) = reduced.classify_model(&model(), Some(&record)).unwrap();
        assert_eq!(replayed.record, record);

        let (_, again) = Classifier::new()
            .classify_model(&model(), Some(&replayed.record))
            .unwrap();
        assert!(again.affordances.event("LevelChanged").is_some());
        assert_eq!(again.affordances.property("Level").unwrap().access(), Access::WriteOnly);
    }

    #[test]
    fn test_automatic_reduced_record_covers_allowed_rpcs() {
        let reduced = Classifier::new().with_allow_list(["Blink"]);
        let (_, result) = reduced.classify_model(&model(), None).unwrap();
        assert_eq!(result.record.iter().map(|(name, _)| name).collect::<Vec<_>>(), vec!["Blink"]);
    }

    #[test]
    fn test_replay_rejects_entries_for_undeclared_rpcs() {
        let (_, full) = Classifier::new().classify_model(&model(), None).unwrap();
        let mut shrunk = model();
        shrunk.rpcs.pop();
        let err = Classifier::new().classify_model(&shrunk, Some(&full.record)).unwrap_err();
        assert!(matches!(err, Error::UnknownClassificationEntry { rpc_name } if rpc_name == "Blink"));
    }

    #[test]
    fn test_resolution_failure_aborts_classification() {
        let mut broken = model();
        broken.messages.push(MessageDecl::new("Loop").field("me", "Loop"));
        let err = Classifier::new().classify_model(&broken, None).unwrap_err();
        assert!(err.is_schema_error());
    }

    #[test]
    fn test_debug_lists_allow_list() {
        let classifier = Classifier::new().with_allow_list(["A"]);
        assert!(format!("{classifier:?}").contains("\"A\""));
        assert_eq!(classifier.allow_list().map(BTreeSet::len), Some(1));
    }
}
