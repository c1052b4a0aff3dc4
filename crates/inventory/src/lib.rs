//! Inventory ledger: equipment requests, tracked items and their lifecycle.
//!
//! This crate contains the business rules for the inventory ledger, implemented
//! as deterministic domain logic (no IO, no HTTP, no storage). Callers supply
//! timestamps; status is always derived from stored fields, never stored.

pub mod backup;
pub mod export;
pub mod filter;
pub mod id;
pub mod item;
pub mod ledger;
pub mod request;
pub mod status;
pub mod table;

mod validate;

pub use backup::LedgerBackup;
pub use export::{ExportError, ExportRow, export_file_name, to_csv_string, write_csv};
pub use filter::{ItemFilter, StatusCounts};
pub use id::{ItemId, RequestId, SequenceKey};
pub use item::{InventoryItem, ItemPatch, NewItem};
pub use ledger::Ledger;
pub use request::{Request, RequestForm};
pub use status::{ItemStatus, derive_status};
pub use table::Table;
