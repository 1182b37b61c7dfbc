//! # Identifier Value Objects
//!
//! String-based identifiers with normalized equality.
//!
//! This module provides the [`VenueId`] type identifying an exchange venue.
//! Identifiers are normalized to lowercase at construction so lookups are
//! case-insensitive by construction rather than at every call site.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier for an exchange venue.
///
/// Normalized to lowercase at construction; two ids that differ only in
/// case are equal.
///
/// # Examples
///
/// ```
/// use spot_router::domain::value_objects::VenueId;
///
/// let a = VenueId::new("Kraken");
/// let b = VenueId::new("kraken");
///
/// assert_eq!(a, b);
/// assert_eq!(a.as_str(), "kraken");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String")]
#[serde(into = "String")]
pub struct VenueId(String);

impl VenueId {
    /// Creates a new venue id, lowercasing the input.
    #[must_use]
    pub fn new(id: impl AsRef<str>) -> Self {
        Self(id.as_ref().trim().to_lowercase())
    }

    /// Returns the id as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VenueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for VenueId {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<VenueId> for String {
    fn from(value: VenueId) -> Self {
        value.0
    }
}

impl From<&str> for VenueId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_on_construction() {
        let id = VenueId::new("OKX");
        assert_eq!(id.as_str(), "okx");
    }

    #[test]
    fn trims_whitespace() {
        let id = VenueId::new("  kraken ");
        assert_eq!(id.as_str(), "kraken");
    }

    #[test]
    fn case_insensitive_equality() {
        assert_eq!(VenueId::new("Gate.IO"), VenueId::new("gate.io"));
    }

    #[test]
    fn display() {
        assert_eq!(VenueId::new("kraken").to_string(), "kraken");
    }

    #[test]
    fn serde_round_trip() {
        let id = VenueId::new("Kraken");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"kraken\"");
        let back: VenueId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
