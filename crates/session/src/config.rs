//! Environment configuration for a hosted ledger.
//!
//! | variable | meaning | default |
//! |---|---|---|
//! | `GEARLEDGER_EVENT_PASSWORD` | event (read) secret | `event` (warns) |
//! | `GEARLEDGER_ADMIN_PASSWORD` | admin secret | `admin` (warns) |
//! | `GEARLEDGER_MASTER_PASSWORD` | reset secret | `master` (warns) |
//! | `GEARLEDGER_EVENT_NAME` | event display name | `Inventory` |
//! | `GEARLEDGER_PASSWORD_REQUIRED` | gate reads behind the event secret | `true` |
//! | `GEARLEDGER_SEED_SAMPLE` | start with demonstration items | `false` |
//!
//! Each `*_PASSWORD` may instead be given as a hex SHA-256 digest in
//! `*_PASSWORD_SHA256`, which takes precedence.

use thiserror::Error;

use gearledger_auth::{AuthzError, CredentialVerifier, Gatekeeper, PlaintextSecret, Role, Sha256Secret};

use crate::settings::EventSettings;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var}: {source}")]
    Secret {
        var: &'static str,
        #[source]
        source: AuthzError,
    },

    #[error("{var}: {source}")]
    EventName {
        var: &'static str,
        #[source]
        source: gearledger_core::DomainError,
    },
}

/// Where a role's secret comes from.
#[derive(Clone, PartialEq, Eq)]
pub enum SecretSource {
    Plaintext(String),
    Sha256Hex(String),
}

impl core::fmt::Debug for SecretSource {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SecretSource::Plaintext(_) => f.write_str("Plaintext(<redacted>)"),
            SecretSource::Sha256Hex(digest) => f.debug_tuple("Sha256Hex").field(digest).finish(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub event_secret: SecretSource,
    pub admin_secret: SecretSource,
    pub master_secret: SecretSource,
    pub settings: EventSettings,
    pub seed_sample: bool,
}

impl SessionConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (the environment, or a map in tests).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut settings = EventSettings::default();
        if let Some(name) = lookup("GEARLEDGER_EVENT_NAME") {
            settings
                .set_event_name(&name)
                .map_err(|source| ConfigError::EventName {
                    var: "GEARLEDGER_EVENT_NAME",
                    source,
                })?;
        }
        settings.password_required = flag(&lookup, "GEARLEDGER_PASSWORD_REQUIRED", true);

        Ok(Self {
            event_secret: secret(&lookup, "GEARLEDGER_EVENT_PASSWORD", "event"),
            admin_secret: secret(&lookup, "GEARLEDGER_ADMIN_PASSWORD", "admin"),
            master_secret: secret(&lookup, "GEARLEDGER_MASTER_PASSWORD", "master"),
            settings,
            seed_sample: flag(&lookup, "GEARLEDGER_SEED_SAMPLE", false),
        })
    }

    /// One verifier per built-in role.
    pub fn gatekeeper(&self) -> Result<Gatekeeper, ConfigError> {
        Ok(Gatekeeper::new()
            .with(Role::EVENT, verifier(&self.event_secret, "GEARLEDGER_EVENT_PASSWORD_SHA256")?)
            .with(Role::ADMIN, verifier(&self.admin_secret, "GEARLEDGER_ADMIN_PASSWORD_SHA256")?)
            .with(Role::MASTER, verifier(&self.master_secret, "GEARLEDGER_MASTER_PASSWORD_SHA256")?))
    }
}

fn secret(lookup: &impl Fn(&str) -> Option<String>, var: &'static str, default: &str) -> SecretSource {
    if let Some(digest) = lookup(&format!("{var}_SHA256")) {
        return SecretSource::Sha256Hex(digest);
    }
    match lookup(var) {
        Some(value) => SecretSource::Plaintext(value),
        None => {
            tracing::warn!(var, "secret not set; using insecure dev default");
            SecretSource::Plaintext(default.to_string())
        }
    }
}

fn flag(lookup: &impl Fn(&str) -> Option<String>, var: &'static str, default: bool) -> bool {
    match lookup(var) {
        None => default,
        Some(value) => value.trim().parse::<bool>().unwrap_or_else(|_| {
            tracing::warn!(var, value = %value, default, "not a boolean; using default");
            default
        }),
    }
}

/// Boxed so the three roles can use different verifier types.
fn verifier(source: &SecretSource, var: &'static str) -> Result<Box<dyn CredentialVerifier>, ConfigError> {
    let verifier: Box<dyn CredentialVerifier> = match source {
        SecretSource::Plaintext(secret) => Box::new(PlaintextSecret::new(secret.clone())),
        SecretSource::Sha256Hex(digest) => Box::new(
            Sha256Secret::from_digest_hex(digest).map_err(|source| ConfigError::Secret { var, source })?,
        ),
    };
    Ok(verifier)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = SessionConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.admin_secret, SecretSource::Plaintext("admin".to_string()));
        assert_eq!(config.settings, EventSettings::default());
        assert!(!config.seed_sample);
    }

    #[test]
    fn reads_values_and_flags() {
        let config = SessionConfig::from_lookup(lookup(&[
            ("GEARLEDGER_EVENT_NAME", " Squadron 72 "),
            ("GEARLEDGER_EVENT_PASSWORD", "squadron72"),
            ("GEARLEDGER_PASSWORD_REQUIRED", "false"),
            ("GEARLEDGER_SEED_SAMPLE", "true"),
        ]))
        .unwrap();
        assert_eq!(config.settings.event_name(), "Squadron 72");
        assert!(!config.settings.password_required);
        assert!(config.seed_sample);
        assert_eq!(config.event_secret, SecretSource::Plaintext("squadron72".to_string()));
    }

    #[test]
    fn bad_flag_falls_back_to_default() {
        let config = SessionConfig::from_lookup(lookup(&[("GEARLEDGER_PASSWORD_REQUIRED", "nope")])).unwrap();
        assert!(config.settings.password_required);
    }

    #[test]
    fn blank_event_name_is_an_error() {
        let err = SessionConfig::from_lookup(lookup(&[("GEARLEDGER_EVENT_NAME", "  ")])).unwrap_err();
        assert!(matches!(err, ConfigError::EventName { .. }));
    }

    #[test]
    fn digest_takes_precedence_and_verifies() {
        let digest = Sha256Secret::from_plaintext("s3cret").digest_hex().to_string();
        let config = SessionConfig::from_lookup(lookup(&[
            ("GEARLEDGER_ADMIN_PASSWORD", "ignored"),
            ("GEARLEDGER_ADMIN_PASSWORD_SHA256", digest.as_str()),
        ]))
        .unwrap();
        let gk = config.gatekeeper().unwrap();
        assert!(gk.verify(&Role::ADMIN, "s3cret").is_ok());
        assert!(gk.verify(&Role::ADMIN, "ignored").is_err());
    }

    #[test]
    fn malformed_digest_fails_gatekeeper() {
        let config =
            SessionConfig::from_lookup(lookup(&[("GEARLEDGER_MASTER_PASSWORD_SHA256", "xyz")])).unwrap();
        let err = config.gatekeeper().unwrap_err();
        assert!(matches!(err, ConfigError::Secret { var: "GEARLEDGER_MASTER_PASSWORD_SHA256", .. }));
    }

    #[test]
    fn plaintext_is_redacted_in_debug() {
        let config = SessionConfig::from_lookup(lookup(&[("GEARLEDGER_ADMIN_PASSWORD", "hunter2")])).unwrap();
        assert!(!format!("{config:?}").contains("hunter2"));
    }
}
