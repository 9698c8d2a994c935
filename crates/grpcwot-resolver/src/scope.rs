//! Scoped type-name lookup.
//!
//! A field's type name is interpreted relative to the message declaring it.
//! Candidates are tried from the innermost scope (the declaring message
//! itself, which may contain nested messages) outward to the root scope.
//!
//! # Examples
//!
//! ```
//! use grpcwot_core::ScopedName;
//! use grpcwot_resolver::scope::candidates;
//!
//! let scope = ScopedName::new("Outer.Inner");
//! let tried: Vec<String> = candidates(&scope, "Other").collect();
//! assert_eq!(tried, ["Outer.Inner.Other", "Outer.Other", "Other"]);
//! ```

use grpcwot_core::ScopedName;

/// Yields the fully-qualified names a type reference may denote, innermost first.
///
/// A type name starting with `.` is already fully qualified and yields only
/// itself without the leading dot.
pub fn candidates<'a>(scope: &'a ScopedName, type_name: &'a str) -> impl Iterator<Item = String> + 'a {
    let absolute = type_name.strip_prefix('.');
    let segments: Vec<&str> = if absolute.is_some() {
        Vec::new()
    } else {
        scope.segments().collect()
    };
    let bare = absolute.unwrap_or(type_name);

    (0..=segments.len()).rev().map(move |depth| {
        if depth == 0 {
            bare.to_string()
        } else {
            format!("{}.{bare}", segments[..depth].join("."))
        }
    })
}

/// Resolves a type reference to the first known fully-qualified name.
///
/// Returns `None` if no enclosing scope contains a matching message.
///
/// # Examples
///
/// ```
/// use grpcwot_core::ScopedName;
/// use grpcwot_resolver::scope::resolve_scoped;
///
/// let known = ["Outer.Other", "Other"];
/// let scope = ScopedName::new("Outer.Inner");
///
/// let found = resolve_scoped(&scope, "Other", |name| known.contains(&name));
/// assert_eq!(found.as_deref(), Some("Outer.Other"));
/// ```
pub fn resolve_scoped(
    scope: &ScopedName,
    type_name: &str,
    is_known: impl Fn(&str) -> bool,
) -> Option<String> {
    candidates(scope, type_name).find(|candidate| is_known(candidate))
}
