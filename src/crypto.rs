//! Invitation token generation and hashing.
//!
//! Token issuance is a capability-issuance operation: the token is the
//! credential that lets its holder accept an invitation, so it must come
//! from a secure random source and only its hash may be persisted.

use rand::rngs::OsRng;
use rand::Rng;
use sha2::{Digest, Sha256};

/// Default token length in characters.
///
/// 32 alphanumeric characters carry ~190 bits of entropy, comfortably past
/// the 128-bit floor for an unguessable credential.
pub const DEFAULT_TOKEN_LENGTH: usize = 32;

/// Generates a cryptographically secure random token.
///
/// The token consists of alphanumeric characters (a-z, A-Z, 0-9), drawn
/// from the operating system's CSPRNG, providing approximately 5.95 bits
/// of entropy per character.
///
/// # Example
///
/// ```rust
/// use vestibule::crypto::generate_token;
///
/// let token = generate_token(32);
/// assert_eq!(token.len(), 32);
/// ```
pub fn generate_token(length: usize) -> String {
    let mut rng = OsRng;
    (0..length)
        .map(|_| char::from(rng.sample(rand::distributions::Alphanumeric)))
        .collect()
}

/// Generates a token with the default length (32 characters).
pub fn generate_token_default() -> String {
    generate_token(DEFAULT_TOKEN_LENGTH)
}

/// Hashes a token using SHA-256 for storage.
///
/// Unlike passwords, invitation tokens are high-entropy random strings,
/// so a fast hash is appropriate. Only the hash is persisted; lookup at
/// accept time re-hashes the presented token.
pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    let result = hasher.finalize();
    hex::encode(result)
}
