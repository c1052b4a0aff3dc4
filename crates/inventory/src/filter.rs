use serde::{Deserialize, Serialize};

use crate::item::InventoryItem;
use crate::status::ItemStatus;

/// Selection applied to the inventory listing.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "value")]
pub enum ItemFilter {
    #[default]
    All,
    /// Items whose derived status equals the given one.
    Status(ItemStatus),
    /// Items with a recorded shortfall, whatever their status.
    HasMissing,
    Expendable(bool),
}

impl ItemFilter {
    pub fn matches(&self, item: &InventoryItem) -> bool {
        match self {
            ItemFilter::All => true,
            ItemFilter::Status(status) => item.status() == *status,
            ItemFilter::HasMissing => item.missing() > 0,
            ItemFilter::Expendable(expendable) => item.is_expendable() == *expendable,
        }
    }
}

/// Number of items per derived status.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    pub missing: usize,
    pub received: usize,
    pub assigned: usize,
    pub returned: usize,
}

impl StatusCounts {
    pub fn record(&mut self, status: ItemStatus) {
        match status {
            ItemStatus::Missing => self.missing += 1,
            ItemStatus::Received => self.received += 1,
            ItemStatus::Assigned => self.assigned += 1,
            ItemStatus::Returned => self.returned += 1,
        }
    }

    pub fn get(&self, status: ItemStatus) -> usize {
        match status {
            ItemStatus::Missing => self.missing,
            ItemStatus::Received => self.received,
            ItemStatus::Assigned => self.assigned,
            ItemStatus::Returned => self.returned,
        }
    }

    pub fn total(&self) -> usize {
        self.missing + self.received + self.assigned + self.returned
    }
}

impl<'a> FromIterator<&'a InventoryItem> for StatusCounts {
    fn from_iter<I: IntoIterator<Item = &'a InventoryItem>>(iter: I) -> Self {
        let mut counts = StatusCounts::default();
        for item in iter {
            counts.record(item.status());
        }
        counts
    }
}
