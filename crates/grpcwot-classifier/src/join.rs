//! Joins RPC declarations with their resolved payload schemas.

use grpcwot_core::{DataSchema, Error, Result, RpcBinding, RpcDecl};
use grpcwot_resolver::ResolvedSchemas;
use std::collections::{BTreeSet, HashSet};
use tracing::debug;

/// Checks RPC names, applies the allow-list, and binds request and response schemas.
///
/// Duplicate names are rejected on the full list, before the allow-list is
/// applied. Bindings keep declaration order.
///
/// # Errors
///
/// - [`Error::DuplicateRpcName`] if two RPCs share a name
/// - [`Error::UnknownRpcMessage`] if a request or response type names no resolved message
pub fn bind_rpcs(
    rpcs: &[RpcDecl],
    schemas: &ResolvedSchemas,
    allow_list: Option<&BTreeSet<String>>,
) -> Result<Vec<RpcBinding>> {
    let mut seen = HashSet::with_capacity(rpcs.len());
    for rpc in rpcs {
        if !seen.insert(rpc.name.as_str()) {
            return Err(Error::DuplicateRpcName {
                name: rpc.name.clone(),
            });
        }
    }

    rpcs.iter()
        .filter(|rpc| allow_list.is_none_or(|allowed| allowed.contains(&rpc.name)))
        .map(|rpc| {
            let request = lookup(schemas, rpc, &rpc.request_type)?;
            let response = lookup(schemas, rpc, &rpc.response_type)?;
            debug!(
                "Bound {}({}) -> {}",
                rpc.name, rpc.request_type, rpc.response_type
            );
            Ok(RpcBinding::new(rpc.name.clone(), request, response))
        })
        .collect()
}

fn lookup(schemas: &ResolvedSchemas, rpc: &RpcDecl, type_name: &str) -> Result<DataSchema> {
    schemas
        .lookup_rpc_type(type_name)
        .cloned()
        .ok_or_else(|| Error::UnknownRpcMessage {
            rpc: rpc.name.clone(),
            type_name: type_name.to_string(),
        })
}
