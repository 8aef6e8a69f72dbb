//! Voter address type.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An opaque address-like identifier for a participant.
///
/// The engine compares addresses for equality only; it attaches no meaning to
/// their contents beyond "non-empty string". Whatever enrollment authority
/// sits in front of the engine decides what an address actually is (a key
/// fingerprint, an account name, a test label).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VoterAddress(String);

impl VoterAddress {
    /// Create a new voter address from a raw string.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Return the raw address string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Validate that this address is well-formed (non-empty).
    pub fn is_valid(&self) -> bool {
        !self.0.is_empty()
    }
}

impl fmt::Display for VoterAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for VoterAddress {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for VoterAddress {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn address_display_matches_raw() {
        let addr = VoterAddress::new("alice");
        assert_eq!(addr.to_string(), "alice");
        assert_eq!(addr.as_str(), "alice");
    }

    #[test]
    fn empty_address_is_invalid() {
        assert!(!VoterAddress::new("").is_valid());
        assert!(VoterAddress::new("a").is_valid());
    }

    #[test]
    fn addresses_compare_by_content() {
        assert_eq!(VoterAddress::from("bob"), VoterAddress::new("bob"));
        assert_ne!(VoterAddress::from("bob"), VoterAddress::new("carol"));
    }
}
