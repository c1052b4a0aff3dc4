use gearledger_core::{DomainError, DomainResult};

pub const DEFAULT_EVENT_NAME: &str = "Inventory";

/// Per-event display and access settings, editable by an administrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventSettings {
    event_name: String,
    /// When off, reading inventory and requests needs no event password.
    pub password_required: bool,
    /// Whether the feedback survey prompt is shown.
    pub survey_enabled: bool,
}

impl Default for EventSettings {
    fn default() -> Self {
        Self {
            event_name: DEFAULT_EVENT_NAME.to_string(),
            password_required: true,
            survey_enabled: false,
        }
    }
}

impl EventSettings {
    pub fn event_name(&self) -> &str {
        &self.event_name
    }

    pub fn set_event_name(&mut self, name: &str) -> DomainResult<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::validation("event name is required"));
        }
        self.event_name = name.to_string();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let settings = EventSettings::default();
        assert_eq!(settings.event_name(), DEFAULT_EVENT_NAME);
        assert!(settings.password_required);
        assert!(!settings.survey_enabled);
    }

    #[test]
    fn event_name_is_trimmed_and_required() {
        let mut settings = EventSettings::default();
        settings.set_event_name("  Squadron 72 ").unwrap();
        assert_eq!(settings.event_name(), "Squadron 72");
        assert!(settings.set_event_name("   ").is_err());
        assert_eq!(settings.event_name(), "Squadron 72");
    }
}
