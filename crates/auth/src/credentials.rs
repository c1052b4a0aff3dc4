//! Pluggable secret verification.
//!
//! The ledger's access gates are shared secrets. Where they are checked is
//! fixed; how they are checked is a [`CredentialVerifier`].

use sha2::{Digest, Sha256};

use crate::AuthzError;

/// Checks a presented secret.
pub trait CredentialVerifier: Send + Sync + core::fmt::Debug {
    fn verify(&self, candidate: &str) -> bool;
}

impl<V> CredentialVerifier for Box<V>
where
    V: CredentialVerifier + ?Sized,
{
    fn verify(&self, candidate: &str) -> bool {
        (**self).verify(candidate)
    }
}

/// Secret kept in memory as-is and compared for equality.
pub struct PlaintextSecret(String);

impl PlaintextSecret {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }
}

impl core::fmt::Debug for PlaintextSecret {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("PlaintextSecret(<redacted>)")
    }
}

impl CredentialVerifier for PlaintextSecret {
    fn verify(&self, candidate: &str) -> bool {
        equal_bytes(self.0.as_bytes(), candidate.as_bytes())
    }
}

/// Secret kept only as a lowercase hex SHA-256 digest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sha256Secret {
    digest_hex: String,
}

impl Sha256Secret {
    /// Hash `secret` now; the plaintext is not retained.
    pub fn from_plaintext(secret: &str) -> Self {
        Self {
            digest_hex: hex_digest(secret),
        }
    }

    /// Use a digest computed elsewhere (e.g. supplied by the host).
    pub fn from_digest_hex(digest: &str) -> Result<Self, AuthzError> {
        let digest = digest.trim().to_ascii_lowercase();
        if digest.len() != 64 || !digest.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(AuthzError::InvalidDigest(
                "expected 64 hexadecimal characters".to_string(),
            ));
        }
        Ok(Self { digest_hex: digest })
    }

    pub fn digest_hex(&self) -> &str {
        &self.digest_hex
    }
}

impl CredentialVerifier for Sha256Secret {
    fn verify(&self, candidate: &str) -> bool {
        equal_bytes(self.digest_hex.as_bytes(), hex_digest(candidate).as_bytes())
    }
}

fn hex_digest(input: &str) -> String {
    let hash = Sha256::digest(input.as_bytes());
    format!("{hash:x}")
}

/// Compares every byte before deciding, so timing does not reveal the
/// length of the matching prefix.
fn equal_bytes(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
