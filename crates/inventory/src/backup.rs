//! Point-in-time copy of a ledger, used to undo a reset.

use serde::{Deserialize, Serialize};

use crate::item::InventoryItem;
use crate::request::Request;

/// Full ledger contents plus both key counters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerBackup {
    pub items: Vec<InventoryItem>,
    pub requests: Vec<Request>,
    pub next_item: u64,
    pub next_request: u64,
}

impl LedgerBackup {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty() && self.requests.is_empty()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
