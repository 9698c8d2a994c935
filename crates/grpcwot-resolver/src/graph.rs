//! Dependency graph over message references.
//!
//! An edge `target → referencing` means the target message must be complete
//! before its schema can be copied into the referencing message.

/// Counts how many references each message is still waiting on.
///
/// `edges` holds `(target, referencing)` pairs over message indices.
pub(crate) fn pending_counts(message_count: usize, edges: &[(usize, usize)]) -> Vec<usize> {
    let mut counts = vec![0; message_count];
    for &(_, referencing) in edges {
        counts[referencing] += 1;
    }
    counts
}

/// Returns the messages that can never be completed, in index order.
///
/// Repeatedly completes messages that wait on nothing and releases the
/// references onto them. Whatever is left over either sits on a cycle or
/// depends on one; an empty result proves a finite completion order exists.
pub(crate) fn blocked_messages(message_count: usize, edges: &[(usize, usize)]) -> Vec<usize> {
    let mut counts = pending_counts(message_count, edges);
    let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); message_count];
    for &(target, referencing) in edges {
        dependents[target].push(referencing);
    }

    let mut ready: Vec<usize> = (0..message_count).filter(|&m| counts[m] == 0).collect();
    while let Some(done) = ready.pop() {
        for &dependent in &dependents[done] {
            counts[dependent] -= 1;
            if counts[dependent] == 0 {
                ready.push(dependent);
            }
        }
    }

    (0..message_count).filter(|&m| counts[m] > 0).collect()
}
