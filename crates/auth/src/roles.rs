use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::Permission;

/// Role unlocked by presenting a shared secret.
///
/// The three built-in roles correspond to the event password, the admin
/// password and the master (danger zone) password. Each is unlocked
/// independently; holding `ADMIN` does not imply `MASTER`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Role(Cow<'static, str>);

impl Role {
    pub const EVENT: Role = Role(Cow::Borrowed("event"));
    pub const ADMIN: Role = Role(Cow::Borrowed("admin"));
    pub const MASTER: Role = Role(Cow::Borrowed("master"));

    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Permissions granted by a role. Unknown roles grant nothing.
pub fn role_permissions(role: &Role) -> Vec<Permission> {
    match role.as_str() {
        "event" => vec![Permission::INVENTORY_READ, Permission::REQUESTS_READ],
        "admin" => vec![
            Permission::INVENTORY_READ,
            Permission::REQUESTS_READ,
            Permission::INVENTORY_WRITE,
            Permission::REQUESTS_REVIEW,
            Permission::SETTINGS_WRITE,
        ],
        "master" => vec![Permission::LEDGER_RESET],
        _ => vec![],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_can_do_everything_but_reset() {
        let perms = role_permissions(&Role::ADMIN);
        assert!(perms.contains(&Permission::INVENTORY_WRITE));
        assert!(perms.contains(&Permission::REQUESTS_REVIEW));
        assert!(!perms.contains(&Permission::LEDGER_RESET));
    }

    #[test]
    fn event_role_is_read_only() {
        assert_eq!(
            role_permissions(&Role::EVENT),
            vec![Permission::INVENTORY_READ, Permission::REQUESTS_READ]
        );
    }

    #[test]
    fn unknown_role_grants_nothing() {
        assert!(role_permissions(&Role::new("guest")).is_empty());
    }

    #[test]
    fn roles_serialize_as_plain_strings() {
        assert_eq!(serde_json::to_string(&Role::MASTER).unwrap(), "\"master\"");
    }
}
