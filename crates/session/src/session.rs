use std::sync::Arc;

use chrono::Utc;

use gearledger_auth::{Gatekeeper, Grant, Permission, Role, authorize};
use gearledger_core::{DomainError, SessionId};
use gearledger_inventory::{
    InventoryItem, ItemFilter, ItemId, ItemPatch, Ledger, LedgerBackup, NewItem, Request, RequestForm,
    RequestId, StatusCounts, export_file_name, to_csv_string,
};
use gearledger_survey::{SurveyForm, SurveyLog, survey_file_name};

use crate::error::SessionResult;
use crate::settings::EventSettings;

/// One user's view of the inventory.
///
/// Owns its ledger outright; two sessions never share state.
#[derive(Debug)]
pub struct Session {
    id: SessionId,
    ledger: Ledger,
    grant: Grant,
    settings: EventSettings,
    surveys: SurveyLog,
    gatekeeper: Arc<Gatekeeper>,
}

impl Session {
    pub fn new(gatekeeper: Arc<Gatekeeper>, settings: EventSettings) -> Self {
        Self::with_ledger(gatekeeper, settings, Ledger::new())
    }

    /// Start from pre-populated ledger contents (e.g. sample data).
    pub fn with_ledger(gatekeeper: Arc<Gatekeeper>, settings: EventSettings, ledger: Ledger) -> Self {
        let id = SessionId::new();
        tracing::debug!(session_id = %id, items = ledger.item_count(), "session opened");
        Self {
            id,
            ledger,
            grant: Grant::new(),
            settings,
            surveys: SurveyLog::new(),
            gatekeeper,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn settings(&self) -> &EventSettings {
        &self.settings
    }

    // ── access ─────────────────────────────────────────────────────────────

    pub fn unlock(&mut self, role: &Role, secret: &str) -> SessionResult<()> {
        self.gatekeeper.unlock(&mut self.grant, role, secret)?;
        Ok(())
    }

    /// Forget every unlocked role.
    pub fn lock(&mut self) {
        self.grant.clear();
    }

    pub fn has_role(&self, role: &Role) -> bool {
        self.grant.has_role(role)
    }

    fn require(&self, permission: &Permission) -> SessionResult<()> {
        authorize(&self.grant, permission)?;
        Ok(())
    }

    /// Read gates only apply while the event requires a password.
    fn require_read(&self, permission: &Permission) -> SessionResult<()> {
        if self.settings.password_required {
            self.require(permission)?;
        }
        Ok(())
    }

    // ── open to everyone ───────────────────────────────────────────────────

    pub fn submit_request(&mut self, form: RequestForm) -> SessionResult<RequestId> {
        Ok(self.ledger.submit_request(form, Utc::now())?)
    }

    /// Record a feedback survey response. Only accepted while the survey is
    /// enabled.
    pub fn submit_survey(&mut self, form: SurveyForm) -> SessionResult<()> {
        if !self.settings.survey_enabled {
            return Err(DomainError::invalid_state("survey is not enabled").into());
        }
        Ok(self.surveys.record(form, Utc::now())?)
    }

    // ── reads ──────────────────────────────────────────────────────────────

    pub fn items(&self, filter: ItemFilter) -> SessionResult<Vec<(&ItemId, &InventoryItem)>> {
        self.require_read(&Permission::INVENTORY_READ)?;
        Ok(self.ledger.filter_items(filter))
    }

    pub fn item(&self, id: &ItemId) -> SessionResult<Option<&InventoryItem>> {
        self.require_read(&Permission::INVENTORY_READ)?;
        Ok(self.ledger.item(id))
    }

    pub fn status_counts(&self) -> SessionResult<StatusCounts> {
        self.require_read(&Permission::INVENTORY_READ)?;
        Ok(self.ledger.status_counts())
    }

    pub fn pending_requests(&self) -> SessionResult<Vec<(&RequestId, &Request)>> {
        self.require_read(&Permission::REQUESTS_READ)?;
        Ok(self.ledger.requests().collect())
    }

    pub fn pending_count(&self) -> SessionResult<usize> {
        self.require_read(&Permission::REQUESTS_READ)?;
        Ok(self.ledger.pending_count())
    }

    /// CSV of the whole inventory plus the file name to offer it under.
    pub fn export_csv(&self) -> SessionResult<(String, String)> {
        self.require_read(&Permission::INVENTORY_READ)?;
        let csv = to_csv_string(&self.ledger.export_snapshot())?;
        Ok((export_file_name(Utc::now().date_naive()), csv))
    }

    // ── request review ─────────────────────────────────────────────────────

    pub fn approve_request(&mut self, id: RequestId) -> SessionResult<ItemId> {
        self.require(&Permission::REQUESTS_REVIEW)?;
        Ok(self.ledger.approve_request(id, Utc::now())?)
    }

    pub fn deny_request(&mut self, id: RequestId) -> SessionResult<()> {
        self.require(&Permission::REQUESTS_REVIEW)?;
        Ok(self.ledger.deny_request(id)?)
    }

    // ── item administration ────────────────────────────────────────────────

    pub fn add_item(&mut self, new: NewItem) -> SessionResult<ItemId> {
        self.require(&Permission::INVENTORY_WRITE)?;
        Ok(self.ledger.add_item(new, Utc::now())?)
    }

    pub fn edit_item(&mut self, id: ItemId, patch: ItemPatch) -> SessionResult<()> {
        self.require(&Permission::INVENTORY_WRITE)?;
        Ok(self.ledger.edit_item(id, patch)?)
    }

    pub fn delete_item(&mut self, id: ItemId) -> SessionResult<()> {
        self.require(&Permission::INVENTORY_WRITE)?;
        Ok(self.ledger.delete_item(id)?)
    }

    pub fn record_received(&mut self, id: ItemId, quantity: u32) -> SessionResult<()> {
        self.require(&Permission::INVENTORY_WRITE)?;
        Ok(self.ledger.record_received(id, quantity)?)
    }

    pub fn assign(&mut self, id: ItemId) -> SessionResult<()> {
        self.require(&Permission::INVENTORY_WRITE)?;
        Ok(self.ledger.assign(id)?)
    }

    pub fn mark_returned(&mut self, id: ItemId) -> SessionResult<()> {
        self.require(&Permission::INVENTORY_WRITE)?;
        Ok(self.ledger.mark_returned(id)?)
    }

    pub fn record_return_outcome(&mut self, id: ItemId, returned_amount: u32) -> SessionResult<()> {
        self.require(&Permission::INVENTORY_WRITE)?;
        Ok(self.ledger.record_return_outcome(id, returned_amount)?)
    }

    // ── settings ───────────────────────────────────────────────────────────

    pub fn set_event_name(&mut self, name: &str) -> SessionResult<()> {
        self.require(&Permission::SETTINGS_WRITE)?;
        self.settings.set_event_name(name)?;
        tracing::info!(session_id = %self.id, event_name = %self.settings.event_name(), "event renamed");
        Ok(())
    }

    pub fn set_password_required(&mut self, required: bool) -> SessionResult<()> {
        self.require(&Permission::SETTINGS_WRITE)?;
        self.settings.password_required = required;
        Ok(())
    }

    pub fn set_survey_enabled(&mut self, enabled: bool) -> SessionResult<()> {
        self.require(&Permission::SETTINGS_WRITE)?;
        self.settings.survey_enabled = enabled;
        Ok(())
    }

    pub fn survey_count(&self) -> SessionResult<usize> {
        self.require(&Permission::SETTINGS_WRITE)?;
        Ok(self.surveys.len())
    }

    /// CSV of every survey response plus the file name to offer it under.
    pub fn export_surveys_csv(&self) -> SessionResult<(String, String)> {
        self.require(&Permission::SETTINGS_WRITE)?;
        let csv = gearledger_survey::to_csv_string(&self.surveys.export_snapshot())?;
        Ok((survey_file_name(Utc::now().date_naive()), csv))
    }

    // ── danger zone ────────────────────────────────────────────────────────

    /// Wipe items and requests.
    ///
    /// Needs an admin session and the master secret. Returns what was there
    /// so the caller can offer [`Session::undo_reset`].
    pub fn reset_all(&mut self, master_secret: &str) -> SessionResult<LedgerBackup> {
        self.as_master(master_secret, |ledger| {
            let backup = ledger.backup();
            ledger.reset_all();
            Ok(backup)
        })
    }

    /// Put back a ledger taken by [`Session::reset_all`]. Same gate as the
    /// reset itself.
    pub fn undo_reset(&mut self, master_secret: &str, backup: LedgerBackup) -> SessionResult<()> {
        self.as_master(master_secret, |ledger| Ok(ledger.restore(backup)?))
    }

    /// Run `op` with the master role unlocked. The role is dropped again
    /// afterwards whether or not `op` succeeds.
    fn as_master<T>(
        &mut self,
        master_secret: &str,
        op: impl FnOnce(&mut Ledger) -> SessionResult<T>,
    ) -> SessionResult<T> {
        self.require(&Permission::INVENTORY_WRITE)?;
        self.gatekeeper.unlock(&mut self.grant, &Role::MASTER, master_secret)?;
        let result = match self.require(&Permission::LEDGER_RESET) {
            Ok(()) => op(&mut self.ledger),
            Err(err) => Err(err),
        };
        self.grant.revoke(&Role::MASTER);
        result
    }
}
