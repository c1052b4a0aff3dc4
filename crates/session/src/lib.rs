//! Per-session façade over the inventory ledger.
//!
//! A [`Session`] is what a presentation layer holds for one connected user:
//! its own ledger, the roles it has unlocked, and the event settings. Every
//! call checks permissions before touching the ledger and supplies the
//! current time.

pub mod config;
pub mod error;
pub mod sample;
pub mod session;
pub mod settings;

pub use config::{ConfigError, SecretSource, SessionConfig};
pub use error::{SessionError, SessionResult};
pub use sample::seed_sample_inventory;
pub use session::Session;
pub use settings::EventSettings;
