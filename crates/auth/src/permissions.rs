use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// Permission identifier.
///
/// Permissions are modeled as opaque strings (e.g. "inventory.read").
/// A special wildcard permission `"*"` grants everything.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Permission(Cow<'static, str>);

impl Permission {
    /// View the inventory listing and export it.
    pub const INVENTORY_READ: Permission = Permission(Cow::Borrowed("inventory.read"));
    /// View pending requests.
    pub const REQUESTS_READ: Permission = Permission(Cow::Borrowed("requests.read"));
    /// Add, edit, delete items and move them through their lifecycle.
    pub const INVENTORY_WRITE: Permission = Permission(Cow::Borrowed("inventory.write"));
    /// Approve or deny pending requests.
    pub const REQUESTS_REVIEW: Permission = Permission(Cow::Borrowed("requests.review"));
    /// Change event settings.
    pub const SETTINGS_WRITE: Permission = Permission(Cow::Borrowed("settings.write"));
    /// Wipe (and restore) the whole ledger.
    pub const LEDGER_RESET: Permission = Permission(Cow::Borrowed("ledger.reset"));
    pub const WILDCARD: Permission = Permission(Cow::Borrowed("*"));

    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_wildcard(&self) -> bool {
        self.as_str() == "*"
    }
}

impl core::fmt::Display for Permission {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}
