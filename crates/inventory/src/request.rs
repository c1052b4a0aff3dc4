use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use gearledger_core::{DomainResult, Entity};

use crate::id::{ItemId, RequestId};
use crate::item::InventoryItem;
use crate::validate;

/// A pre-approval record.
///
/// Has no status: being present in the pending table is its state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    pub(crate) id: RequestId,
    pub(crate) item_name: String,
    pub(crate) requested: u32,
    pub(crate) custodian: String,
    pub(crate) location: String,
    pub(crate) email: String,
    pub(crate) phone: String,
    pub(crate) expendable: bool,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub(crate) timestamp: DateTime<Utc>,
}

impl Request {
    pub(crate) fn submit(id: RequestId, form: RequestForm, occurred_at: DateTime<Utc>) -> DomainResult<Self> {
        Ok(Self {
            id,
            item_name: validate::required("item name", &form.item_name)?,
            requested: validate::positive_quantity("requested", form.requested)?,
            custodian: validate::required("custodian", &form.custodian)?,
            location: validate::required("location", &form.location)?,
            email: validate::required("email", &form.email)?,
            phone: validate::optional(&form.phone),
            expendable: form.expendable,
            timestamp: occurred_at,
        })
    }

    /// Re-apply the intake rules to a row that was built elsewhere (a
    /// deserialized backup).
    pub(crate) fn check(&self) -> DomainResult<()> {
        let fields = [
            ("item name", &self.item_name),
            ("custodian", &self.custodian),
            ("location", &self.location),
            ("email", &self.email),
        ];
        fields
            .into_iter()
            .try_for_each(|(field, value)| validate::required(field, value).map(drop))
            .and_then(|()| validate::positive_quantity("requested", self.requested).map(drop))
            .map_err(|err| validate::in_row(self.id, err))
    }

    /// Convert an approved request into a tracked item, already fully received.
    pub(crate) fn into_item(self, id: ItemId, occurred_at: DateTime<Utc>) -> InventoryItem {
        InventoryItem {
            id,
            item_name: self.item_name,
            requested: self.requested,
            on_hand: 0,
            received: self.requested,
            missing: 0,
            custodian: self.custodian,
            location: self.location,
            email: self.email,
            phone: self.phone,
            expendable: self.expendable,
            verified: false,
            returned: false,
            timestamp: occurred_at,
        }
    }

    pub fn item_name(&self) -> &str {
        &self.item_name
    }

    pub fn requested(&self) -> u32 {
        self.requested
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

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

impl Entity for Request {
    type Id = RequestId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Intake form fields.
///
/// Item name, custodian, location and email are required (non-empty after
/// trimming); the email is not checked for shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestForm {
    pub item_name: String,
    pub requested: u32,
    pub custodian: String,
    pub location: String,
    pub email: String,
    pub phone: String,
    pub expendable: bool,
}
