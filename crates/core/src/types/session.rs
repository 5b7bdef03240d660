//! Anonymous cart session identifiers.

use std::convert::Infallible;

use serde::{Deserialize, Serialize};

/// An opaque, client-chosen token scoping a shopping cart.
///
/// There is no authentication behind it and no validation of its contents:
/// any client presenting the same token sees the same cart. Blank tokens
/// resolve to the shared [`SessionId::ANONYMOUS`] bucket.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Bucket used by every client that does not send a session token.
    pub const ANONYMOUS: &'static str = "anonymous";

    /// The shared anonymous session.
    #[must_use]
    pub fn anonymous() -> Self {
        Self(Self::ANONYMOUS.to_owned())
    }

    /// Wrap a client-supplied token.
    ///
    /// A blank token maps to the anonymous session; anything else is kept
    /// verbatim.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        if s.trim().is_empty() {
            Self::anonymous()
        } else {
            Self(s.to_owned())
        }
    }

    /// Returns the token as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::anonymous()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for SessionId {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_maps_to_anonymous() {
        assert_eq!(SessionId::parse("").as_str(), SessionId::ANONYMOUS);
        assert_eq!(SessionId::parse("   ").as_str(), SessionId::ANONYMOUS);
        assert_eq!(SessionId::default().as_str(), "anonymous");
    }

    #[test]
    fn test_client_token_is_kept_verbatim() {
        let id = SessionId::parse("session_1700000000000_k3j9x2abc");
        assert_eq!(id.as_str(), "session_1700000000000_k3j9x2abc");
    }

    #[test]
    fn test_long_token_is_kept_verbatim() {
        let long = "s".repeat(500);
        assert_eq!(SessionId::parse(&long).as_str(), long);
    }
}
