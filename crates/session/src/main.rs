//! `gearledger` — print the inventory export for a configured session.
//!
//! Usage: `gearledger [EVENT_PASSWORD]`. The password is only needed while
//! the event requires one.

use std::io::Write;
use std::sync::Arc;

use anyhow::Context;
use chrono::Utc;

use gearledger_auth::Role;
use gearledger_inventory::Ledger;
use gearledger_session::{Session, SessionConfig, seed_sample_inventory};

fn main() -> anyhow::Result<()> {
    gearledger_observability::init();

    let config = SessionConfig::from_env().context("invalid configuration")?;
    let gatekeeper = Arc::new(config.gatekeeper().context("invalid configuration")?);

    let mut ledger = Ledger::new();
    if config.seed_sample {
        seed_sample_inventory(&mut ledger, Utc::now()).context("failed to seed sample inventory")?;
    }

    let mut session = Session::with_ledger(gatekeeper, config.settings.clone(), ledger);
    tracing::info!(session_id = %session.id(), event_name = %session.settings().event_name(), "session ready");

    if let Some(password) = std::env::args().nth(1) {
        session
            .unlock(&Role::EVENT, &password)
            .context("event password rejected")?;
    }

    let (file_name, csv) = session.export_csv().context("export failed")?;
    tracing::info!(file_name = %file_name, "export written");

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(csv.as_bytes()).context("failed to write export")?;
    stdout.flush()?;
    Ok(())
}
