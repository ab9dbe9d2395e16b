//! Sensitive data wrapper types.
//!
//! Invitation tokens are capability credentials: anyone holding one can
//! accept the invitation. This module keeps them out of logs.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A wrapper for sensitive string data that prevents accidental logging.
///
/// `SecretString` implements `Debug` and `Display` to show `[REDACTED]`
/// instead of the actual content. The only place the plain value escapes is
/// [`expose_secret`](SecretString::expose_secret) and serde serialization
/// (so a transport layer can deliver the token to the invitee).
///
/// # Example
///
/// ```rust
/// use vestibule::SecretString;
///
/// let token = SecretString::new("a1b2c3");
///
/// assert_eq!(format!("{:?}", token), "SecretString([REDACTED])");
/// assert_eq!(token.expose_secret(), "a1b2c3");
/// ```
#[derive(Clone)]
pub struct SecretString(String);

impl SecretString {
    /// Creates a new `SecretString` from any type that can be converted to a `String`.
    #[must_use]
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    /// Exposes the secret value.
    ///
    /// Use this only at the point the plain value is actually needed, such
    /// as hashing the token for lookup or embedding it in an invite email.
    #[must_use]
    pub fn expose_secret(&self) -> &str {
        &self.0
    }

    /// Returns true if the secret is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the length of the secret in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretString([REDACTED])")
    }
}

impl fmt::Display for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl From<String> for SecretString {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for SecretString {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl PartialEq for SecretString {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl Eq for SecretString {}

impl Serialize for SecretString {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // Expose the actual value for serialization (delivering the token
        // in an API response is the one sanctioned escape hatch).
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for SecretString {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(SecretString(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secret_string_debug_redacted() {
        let secret = SecretString::new("invite-token");
        assert_eq!(format!("{secret:?}"), "SecretString([REDACTED])");
    }

    #[test]
    fn test_secret_string_display_redacted() {
        let secret = SecretString::new("invite-token");
        assert_eq!(format!("{secret}"), "[REDACTED]");
    }

    #[test]
    fn test_secret_string_expose_secret() {
        let secret = SecretString::new("invite-token");
        assert_eq!(secret.expose_secret(), "invite-token");
    }

    #[test]
    fn test_secret_string_from_str() {
        let secret: SecretString = "invite-token".into();
        assert_eq!(secret.expose_secret(), "invite-token");
        assert_eq!(secret.len(), 12);
        assert!(!secret.is_empty());
    }

    #[test]
    fn test_secret_string_serde_roundtrip() {
        let original = SecretString::new("invite-token");
        let json = serde_json::to_string(&original).unwrap();
        assert_eq!(json, "\"invite-token\"");
        let restored: SecretString = serde_json::from_str(&json).unwrap();
        assert_eq!(original, restored);
    }
}
