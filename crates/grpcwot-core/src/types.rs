//! Strong domain types.
//!
//! # Examples
//!
//! ```
//! use grpcwot_core::ScopedName;
//!
//! let name = ScopedName::new("Outer.Inner");
//! assert_eq!(name.leaf(), "Inner");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Fully-qualified message name (newtype over String).
///
/// A dotted path from the root scope to the message, following the nesting
/// chain of message declarations: `Outer.Inner` is the message `Inner`
/// declared inside `Outer`.
///
/// # Examples
///
/// ```
/// use grpcwot_core::ScopedName;
///
/// let name = ScopedName::new("Outer.Inner");
/// assert_eq!(name.as_str(), "Outer.Inner");
/// assert_eq!(name.segments().collect::<Vec<_>>(), ["Outer", "Inner"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScopedName(String);

impl ScopedName {
    /// Creates a new scoped name.
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Creates the name of a message nested inside `self`.
    ///
    /// # Examples
    ///
    /// ```
    /// use grpcwot_core::ScopedName;
    ///
    /// let outer = ScopedName::new("Outer");
    /// assert_eq!(outer.child("Inner").as_str(), "Outer.Inner");
    /// ```
    #[must_use]
    pub fn child(&self, name: &str) -> Self {
        Self(format!("{}.{name}", self.0))
    }

    /// Returns the scoped name as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Iterates over the path segments, root first.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('.')
    }

    /// Returns the last path segment (the message's own name).
    #[must_use]
    pub fn leaf(&self) -> &str {
        self.0.rsplit('.').next().unwrap_or(&self.0)
    }

    /// Consumes the `ScopedName` and returns the inner `String`.
    #[inline]
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ScopedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ScopedName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ScopedName {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for ScopedName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
