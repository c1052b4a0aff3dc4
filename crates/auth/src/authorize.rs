use std::collections::{HashMap, HashSet};

use thiserror::Error;

use crate::{CredentialVerifier, Permission, Role, role_permissions};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    #[error("invalid credential for role '{0}'")]
    InvalidCredential(String),

    #[error("forbidden: missing permission '{0}'")]
    Forbidden(String),

    #[error("invalid secret digest: {0}")]
    InvalidDigest(String),
}

/// Roles a session has unlocked so far.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Grant {
    roles: HashSet<Role>,
}

impl Grant {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, role: Role) {
        self.roles.insert(role);
    }

    /// Drop a single role. Returns whether it was held.
    pub fn revoke(&mut self, role: &Role) -> bool {
        self.roles.remove(role)
    }

    pub fn has_role(&self, role: &Role) -> bool {
        self.roles.contains(role)
    }

    pub fn roles(&self) -> impl Iterator<Item = &Role> {
        self.roles.iter()
    }

    pub fn clear(&mut self) {
        self.roles.clear();
    }

    pub fn permissions(&self) -> HashSet<Permission> {
        self.roles.iter().flat_map(role_permissions).collect()
    }
}

/// Check that `grant` holds `required`.
///
/// - No IO
/// - No panics
/// - Pure policy check
pub fn authorize(grant: &Grant, required: &Permission) -> Result<(), AuthzError> {
    let perms = grant.permissions();
    if perms.contains(&Permission::WILDCARD) || perms.contains(required) {
        Ok(())
    } else {
        tracing::warn!(permission = %required, "authorization denied");
        Err(AuthzError::Forbidden(required.as_str().to_string()))
    }
}

/// Holds one verifier per role and checks presented secrets against them.
#[derive(Debug, Default)]
pub struct Gatekeeper {
    verifiers: HashMap<Role, Box<dyn CredentialVerifier>>,
}

impl Gatekeeper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, role: Role, verifier: impl CredentialVerifier + 'static) -> Self {
        self.verifiers.insert(role, Box::new(verifier));
        self
    }

    /// Verify `candidate` for `role` without granting anything.
    ///
    /// A role with no configured verifier can never be unlocked.
    pub fn verify(&self, role: &Role, candidate: &str) -> Result<(), AuthzError> {
        match self.verifiers.get(role) {
            Some(verifier) if verifier.verify(candidate) => Ok(()),
            _ => {
                tracing::warn!(role = %role, "credential rejected");
                Err(AuthzError::InvalidCredential(role.as_str().to_string()))
            }
        }
    }

    /// Verify and, on success, add `role` to `grant`.
    pub fn unlock(&self, grant: &mut Grant, role: &Role, candidate: &str) -> Result<(), AuthzError> {
        self.verify(role, candidate)?;
        grant.insert(role.clone());
        tracing::info!(role = %role, "role unlocked");
        Ok(())
    }
}
