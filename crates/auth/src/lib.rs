//! `gearledger-auth` — shared-secret access gates and permission checks.
//!
//! This crate is intentionally decoupled from the ledger and from any
//! presentation layer: it only answers "does this secret unlock that role"
//! and "does this session hold that permission".

pub mod authorize;
pub mod credentials;
pub mod permissions;
pub mod roles;

pub use authorize::{AuthzError, Gatekeeper, Grant, authorize};
pub use credentials::{CredentialVerifier, PlaintextSecret, Sha256Secret};
pub use permissions::Permission;
pub use roles::{Role, role_permissions};
