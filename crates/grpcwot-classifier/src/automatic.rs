//! Heuristic classification with getter/setter pairing.

use crate::rules::{Accessor, ClassifierRules, accessor_of};
use grpcwot_core::{AffordanceKind, AffordanceSet, OperationAffordance, PropertyAffordance, RpcBinding};
use std::collections::BTreeSet;
use tracing::{debug, warn};

/// A property candidate with its position in the RPC list.
#[derive(Debug)]
struct Candidate {
    index: usize,
    binding: RpcBinding,
}

/// Output of the pairing pass, keyed by the index of the first backer.
#[derive(Debug, Default)]
struct Assembly {
    properties: Vec<(usize, PropertyAffordance)>,
    actions: Vec<(usize, OperationAffordance)>,
    events: Vec<(usize, OperationAffordance)>,
    /// Property names already emitted
    claimed: BTreeSet<String>,
}

impl Assembly {
    fn property(&mut self, index: usize, name: &str, getter: Option<RpcBinding>, setter: Option<RpcBinding>) {
        if let Some(property) = PropertyAffordance::from_sides(name, getter, setter) {
            debug!("Property {} ({:?})", property.name, property.access());
            self.claimed.insert(property.name.clone());
            self.properties.push((index, property));
        }
    }

    fn is_claimed(&self, name: &str) -> bool {
        self.claimed.contains(name)
    }

    fn demote(&mut self, candidate: Candidate) {
        self.actions
            .push((candidate.index, OperationAffordance::from_binding(candidate.binding)));
    }

    fn finish(mut self) -> AffordanceSet {
        self.properties.sort_by_key(|(i, _)| *i);
        self.actions.sort_by_key(|(i, _)| *i);
        self.events.sort_by_key(|(i, _)| *i);
        AffordanceSet {
            properties: self.properties.into_iter().map(|(_, p)| p).collect(),
            actions: self.actions.into_iter().map(|(_, a)| a).collect(),
            events: self.events.into_iter().map(|(_, e)| e).collect(),
        }
    }
}

/// Classifies bound RPCs with the given rules.
///
/// Every binding ends up in exactly one affordance. Output lists are in the
/// order of each affordance's first backing RPC.
pub fn classify<P, E>(bindings: Vec<RpcBinding>, rules: &ClassifierRules<P, E>) -> AffordanceSet
where
    P: Fn(&RpcBinding) -> bool,
    E: Fn(&RpcBinding) -> bool,
{
    let mut assembly = Assembly::default();
    let mut candidates = Vec::new();

    for (index, binding) in bindings.into_iter().enumerate() {
        match rules.kind_of(&binding) {
            AffordanceKind::Property => candidates.push(Some(Candidate { index, binding })),
            AffordanceKind::Event => assembly
                .events
                .push((index, OperationAffordance::from_binding(binding))),
            AffordanceKind::Action => assembly
                .actions
                .push((index, OperationAffordance::from_binding(binding))),
        }
    }

    pair(&mut candidates, &mut assembly);
    assembly.finish()
}

/// Consumes every property candidate exactly once.
///
/// A property name is used at most once: a candidate whose name is already
/// taken by an earlier property is demoted to an action.
fn pair(candidates: &mut [Option<Candidate>], assembly: &mut Assembly) {
    for i in 0..candidates.len() {
        let Some(current) = candidates[i].take() else {
            continue;
        };
        let accessor = accessor_of(&current.binding.rpc).map(|(accessor, base)| (accessor, base.to_string()));
        let name = accessor
            .as_ref()
            .map_or(current.binding.rpc.as_str(), |(_, base)| base.as_str());

        if assembly.is_claimed(name) {
            warn!(
                "Property {name} already defined, {} classified as action",
                current.binding.rpc
            );
            assembly.demote(current);
            continue;
        }

        match accessor {
            None => {
                let name = current.binding.rpc.clone();
                if current.binding.request.has_payload() {
                    assembly.property(current.index, &name, None, Some(current.binding));
                } else {
                    assembly.property(current.index, &name, Some(current.binding), None);
                }
            }
            Some((_, base)) if base.is_empty() => {
                debug!("{} has no property name, classified as action", current.binding.rpc);
                assembly.demote(current);
            }
            Some((Accessor::Get, base)) => pair_getter(current, &base, candidates, assembly),
            Some((Accessor::Set, base)) => pair_setter(current, &base, candidates, assembly),
        }
    }
}

fn same_base(candidate: Option<&Candidate>, accessor: Accessor, base: &str) -> bool {
    candidate.is_some_and(|c| accessor_of(&c.binding.rpc) == Some((accessor, base)))
}

/// Pairs a getter with the first setter whose request matches its response.
///
/// Same-base setters with a differing schema are demoted. Further matching
/// setters are left in place and demoted when their turn comes.
fn pair_getter(getter: Candidate, base: &str, candidates: &mut [Option<Candidate>], assembly: &mut Assembly) {
    let mut partner = None;
    for slot in candidates.iter_mut() {
        if !same_base(slot.as_ref(), Accessor::Set, base) {
            continue;
        }
        let Some(setter) = slot.take() else { continue };
        if partner.is_none() && setter.binding.request == getter.binding.response {
            partner = Some(setter);
        } else if setter.binding.request == getter.binding.response {
            *slot = Some(setter);
        } else {
            warn!(
                "Schema of {} does not match {}, classified as action",
                setter.binding.rpc, getter.binding.rpc
            );
            assembly.demote(setter);
        }
    }

    let index = partner.as_ref().map_or(getter.index, |s| s.index.min(getter.index));
    assembly.property(index, base, Some(getter.binding), partner.map(|s| s.binding));
}

/// Pairs a setter with the first getter whose response matches its request.
///
/// If same-base getters exist but none matches, the setter is demoted.
fn pair_setter(setter: Candidate, base: &str, candidates: &mut [Option<Candidate>], assembly: &mut Assembly) {
    let mut has_getter = false;
    let mut partner = None;
    for slot in candidates.iter_mut() {
        if !same_base(slot.as_ref(), Accessor::Get, base) {
            continue;
        }
        has_getter = true;
        if let Some(getter) = slot.take_if(|g| g.binding.response == setter.binding.request) {
            partner = Some(getter);
            break;
        }
    }

    match partner {
        Some(getter) => {
            let index = getter.index.min(setter.index);
            assembly.property(index, base, Some(getter.binding), Some(setter.binding));
        }
        None if has_getter => {
            warn!(
                "Schema of {} does not match its getter, classified as action",
                setter.binding.rpc
            );
            assembly.demote(setter);
        }
        None => assembly.property(setter.index, base, None, Some(setter.binding)),
    }
}
