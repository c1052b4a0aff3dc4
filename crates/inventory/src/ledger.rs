//! The inventory ledger: pending requests, tracked items and every mutation
//! allowed on them.

use chrono::{DateTime, Utc};

use gearledger_core::{DomainError, DomainResult};

use crate::backup::LedgerBackup;
use crate::export::ExportRow;
use crate::filter::{ItemFilter, StatusCounts};
use crate::id::{ItemId, RequestId};
use crate::item::{InventoryItem, ItemPatch, NewItem};
use crate::request::{Request, RequestForm};
use crate::status::ItemStatus;
use crate::table::Table;

/// Exclusive owner of the item and request tables.
///
/// Every operation is a single in-memory step: it either fails without
/// touching state or completes fully. One ledger is built per session and
/// passed by reference to whoever needs it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ledger {
    items: Table<InventoryItem>,
    requests: Table<Request>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    // ── reads ──────────────────────────────────────────────────────────────

    pub fn item(&self, id: &ItemId) -> Option<&InventoryItem> {
        self.items.get(id)
    }

    pub fn request(&self, id: &RequestId) -> Option<&Request> {
        self.requests.get(id)
    }

    /// Items in insertion order.
    pub fn items(&self) -> impl Iterator<Item = (&ItemId, &InventoryItem)> {
        self.items.iter()
    }

    /// Pending requests in submission order.
    pub fn requests(&self) -> impl Iterator<Item = (&RequestId, &Request)> {
        self.requests.iter()
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn pending_count(&self) -> usize {
        self.requests.len()
    }

    pub fn status_of(&self, id: &ItemId) -> DomainResult<ItemStatus> {
        self.items
            .get(id)
            .map(InventoryItem::status)
            .ok_or_else(DomainError::not_found)
    }

    pub fn filter_items(&self, filter: ItemFilter) -> Vec<(&ItemId, &InventoryItem)> {
        self.items
            .iter()
            .filter(|(_, item)| filter.matches(item))
            .collect()
    }

    pub fn status_counts(&self) -> StatusCounts {
        self.items.values().collect()
    }

    /// One flattened row per item, in insertion order. Pure read.
    pub fn export_snapshot(&self) -> Vec<ExportRow> {
        self.items.values().map(ExportRow::from).collect()
    }

    // ── requests ───────────────────────────────────────────────────────────

    pub fn submit_request(&mut self, form: RequestForm, occurred_at: DateTime<Utc>) -> DomainResult<RequestId> {
        let id = self
            .requests
            .try_insert_with(|id| Request::submit(id, form, occurred_at))?;
        tracing::info!(request_id = %id, "request submitted");
        Ok(id)
    }

    /// Move a pending request into the item table, fully received.
    pub fn approve_request(&mut self, id: RequestId, occurred_at: DateTime<Utc>) -> DomainResult<ItemId> {
        let request = self.requests.remove(&id).ok_or_else(DomainError::not_found)?;
        let item_id = self
            .items
            .try_insert_with(|item_id| Ok::<_, DomainError>(request.into_item(item_id, occurred_at)))?;
        tracing::info!(request_id = %id, item_id = %item_id, "request approved");
        Ok(item_id)
    }

    pub fn deny_request(&mut self, id: RequestId) -> DomainResult<()> {
        self.requests.remove(&id).ok_or_else(DomainError::not_found)?;
        tracing::info!(request_id = %id, "request denied");
        Ok(())
    }

    // ── items ──────────────────────────────────────────────────────────────

    pub fn add_item(&mut self, new: NewItem, occurred_at: DateTime<Utc>) -> DomainResult<ItemId> {
        let id = self
            .items
            .try_insert_with(|id| InventoryItem::create(id, new, occurred_at))?;
        tracing::info!(item_id = %id, "item added");
        Ok(id)
    }

    /// Overwrite the received quantity of a `Missing` item.
    ///
    /// `missing` is left as is.
    pub fn record_received(&mut self, id: ItemId, quantity: u32) -> DomainResult<()> {
        let item = self.item_in(&id, ItemStatus::Missing, "record received")?;
        item.received = quantity;
        tracing::debug!(item_id = %id, quantity, status = %item.status(), "received recorded");
        Ok(())
    }

    pub fn assign(&mut self, id: ItemId) -> DomainResult<()> {
        let item = self.item_in(&id, ItemStatus::Received, "assign")?;
        item.verified = true;
        tracing::debug!(item_id = %id, custodian = %item.custodian, "item assigned");
        Ok(())
    }

    pub fn mark_returned(&mut self, id: ItemId) -> DomainResult<()> {
        let item = self.item_in(&id, ItemStatus::Assigned, "mark returned")?;
        item.returned = true;
        tracing::debug!(item_id = %id, "item returned");
        Ok(())
    }

    /// Record how many units came back from an assigned item.
    ///
    /// Afterwards `received + missing == requested`. Does not flip `returned`.
    pub fn record_return_outcome(&mut self, id: ItemId, returned_amount: u32) -> DomainResult<()> {
        let item = self.item_in(&id, ItemStatus::Assigned, "record return outcome")?;
        if returned_amount > item.requested {
            return Err(DomainError::validation(format!(
                "returned amount must be between 0 and {}",
                item.requested
            )));
        }
        item.received = returned_amount;
        item.missing = item.requested - returned_amount;
        tracing::debug!(item_id = %id, returned_amount, missing = item.missing, "return outcome recorded");
        Ok(())
    }

    pub fn edit_item(&mut self, id: ItemId, patch: ItemPatch) -> DomainResult<()> {
        let item = self.items.get_mut(&id).ok_or_else(DomainError::not_found)?;
        item.apply_patch(patch)?;
        tracing::debug!(item_id = %id, status = %item.status(), "item edited");
        Ok(())
    }

    pub fn delete_item(&mut self, id: ItemId) -> DomainResult<()> {
        self.items.remove(&id).ok_or_else(DomainError::not_found)?;
        tracing::info!(item_id = %id, "item deleted");
        Ok(())
    }

    // ── whole-ledger ───────────────────────────────────────────────────────

    /// Empty both tables. Key sequences keep counting.
    pub fn reset_all(&mut self) {
        let (items, requests) = (self.items.len(), self.requests.len());
        self.items.clear();
        self.requests.clear();
        tracing::warn!(items, requests, "ledger reset");
    }

    pub fn backup(&self) -> LedgerBackup {
        LedgerBackup {
            items: self.items.values().cloned().collect(),
            requests: self.requests.values().cloned().collect(),
            next_item: self.items.next_sequence(),
            next_request: self.requests.next_sequence(),
        }
    }

    /// Replace the contents with `backup`.
    ///
    /// Every row must pass the same checks as on entry and ids must be
    /// unique; otherwise the ledger is left as it was.
    pub fn restore(&mut self, backup: LedgerBackup) -> DomainResult<()> {
        backup.items.iter().try_for_each(InventoryItem::check)?;
        backup.requests.iter().try_for_each(Request::check)?;

        let (items, requests) = (backup.items.len(), backup.requests.len());
        let item_table = Table::from_rows(backup.items, backup.next_item)?;
        let request_table = Table::from_rows(backup.requests, backup.next_request)?;
        self.items.replace_all(item_table);
        self.requests.replace_all(request_table);
        tracing::info!(items, requests, "ledger restored");
        Ok(())
    }

    fn item_in(&mut self, id: &ItemId, expected: ItemStatus, action: &str) -> DomainResult<&mut InventoryItem> {
        let item = self.items.get_mut(id).ok_or_else(DomainError::not_found)?;
        let status = item.status();
        if status != expected {
            return Err(DomainError::invalid_state(format!(
                "cannot {action} {id}: status is {status}, expected {expected}"
            )));
        }
        Ok(item)
    }
}
