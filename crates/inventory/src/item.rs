use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use gearledger_core::{DomainResult, Entity};

use crate::id::ItemId;
use crate::status::{ItemStatus, derive_status};
use crate::validate;

/// A tracked inventory row.
///
/// Fields are only mutated through [`crate::Ledger`] operations; readers get
/// accessors. `missing` is only meaningful while the item is not fully received.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    pub(crate) id: ItemId,
    pub(crate) item_name: String,
    pub(crate) requested: u32,
    pub(crate) on_hand: u32,
    pub(crate) received: u32,
    pub(crate) missing: u32,
    pub(crate) custodian: String,
    pub(crate) location: String,
    pub(crate) email: String,
    pub(crate) phone: String,
    pub(crate) expendable: bool,
    pub(crate) verified: bool,
    pub(crate) returned: bool,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub(crate) timestamp: DateTime<Utc>,
}

impl InventoryItem {
    pub(crate) fn create(id: ItemId, new: NewItem, occurred_at: DateTime<Utc>) -> DomainResult<Self> {
        let requested = validate::positive_quantity("requested", new.requested)?;
        Ok(Self {
            id,
            item_name: validate::required("item name", &new.item_name)?,
            requested,
            on_hand: new.on_hand,
            received: 0,
            missing: validate::at_most("missing", new.missing, requested)?,
            custodian: validate::optional(&new.custodian),
            location: validate::optional(&new.location),
            email: validate::optional(&new.email),
            phone: validate::optional(&new.phone),
            expendable: new.expendable,
            verified: false,
            returned: false,
            timestamp: occurred_at,
        })
    }

    /// Re-apply the rules [`InventoryItem::create`] enforces to a row that was
    /// built elsewhere (a deserialized backup).
    pub(crate) fn check(&self) -> DomainResult<()> {
        validate::required("item name", &self.item_name)
            .and_then(|_| validate::positive_quantity("requested", self.requested))
            .map(drop)
            .map_err(|err| validate::in_row(self.id, err))
    }

    pub fn status(&self) -> ItemStatus {
        derive_status(self.returned, self.verified, self.received, self.requested)
    }

    pub fn item_name(&self) -> &str {
        &self.item_name
    }

    pub fn requested(&self) -> u32 {
        self.requested
    }

    pub fn on_hand(&self) -> u32 {
        self.on_hand
    }

    pub fn received(&self) -> u32 {
        self.received
    }

    pub fn missing(&self) -> u32 {
        self.missing
    }

    pub fn custodian(&self) -> &str {
        &self.custodian
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn is_expendable(&self) -> bool {
        self.expendable
    }

    pub fn is_verified(&self) -> bool {
        self.verified
    }

    pub fn is_returned(&self) -> bool {
        self.returned
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Apply an edit. Validates everything before touching any field.
    pub(crate) fn apply_patch(&mut self, patch: ItemPatch) -> DomainResult<()> {
        let item_name = patch
            .item_name
            .map(|name| validate::required("item name", &name))
            .transpose()?;
        let requested = patch
            .requested
            .map(|n| validate::positive_quantity("requested", n))
            .transpose()?;

        if let Some(v) = item_name {
            self.item_name = v;
        }
        if let Some(v) = requested {
            self.requested = v;
        }
        if let Some(v) = patch.on_hand {
            self.on_hand = v;
        }
        if let Some(v) = patch.received {
            self.received = v;
        }
        if let Some(v) = patch.custodian {
            self.custodian = validate::optional(&v);
        }
        if let Some(v) = patch.location {
            self.location = validate::optional(&v);
        }
        if let Some(v) = patch.email {
            self.email = validate::optional(&v);
        }
        if let Some(v) = patch.phone {
            self.phone = validate::optional(&v);
        }
        if let Some(v) = patch.expendable {
            self.expendable = v;
        }
        Ok(())
    }
}

impl Entity for InventoryItem {
    type Id = ItemId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Administrator direct-entry input.
///
/// Only `item_name` and `requested` are required; everything else defaults.
/// `missing` records a shortfall already known at entry and may not exceed
/// `requested`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewItem {
    pub item_name: String,
    pub requested: u32,
    pub on_hand: u32,
    pub missing: u32,
    pub custodian: String,
    pub location: String,
    pub email: String,
    pub phone: String,
    pub expendable: bool,
}

impl NewItem {
    pub fn new(item_name: impl Into<String>, requested: u32) -> Self {
        Self {
            item_name: item_name.into(),
            requested,
            ..Self::default()
        }
    }
}

/// Partial replacement of an item's editable fields.
///
/// Workflow flags (`verified`, `returned`) and `missing` are deliberately absent:
/// those only move through the lifecycle operations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemPatch {
    pub item_name: Option<String>,
    pub requested: Option<u32>,
    pub on_hand: Option<u32>,
    pub received: Option<u32>,
    pub custodian: Option<String>,
    pub location: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub expendable: Option<bool>,
}
