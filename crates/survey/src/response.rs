use core::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use gearledger_core::{DomainError, DomainResult};

use crate::export::SurveyRow;

macro_rules! survey_choice {
    ($(#[$meta:meta])* $name:ident, $field:literal { $($variant:ident => $value:literal, $label:literal;)+ }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $value)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Wire value, as submitted by the form.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $value,)+
                }
            }

            /// Human-readable answer.
            pub fn label(&self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim() {
                    "" => Err(DomainError::validation(concat!($field, " is required"))),
                    $($value => Ok($name::$variant),)+
                    other => Err(DomainError::validation(format!(concat!("unknown ", $field, " {:?}"), other))),
                }
            }
        }
    };
}

survey_choice! {
    /// Who answered.
    UserType, "user type" {
        EventSeniorStaff => "event-senior-staff", "Event Senior Staff";
        EventParticipant => "event-participant", "Event Participant";
        RequestorOnly => "requestor-only", "Requestor Only";
    }
}

survey_choice! {
    WouldUseAgain, "would use again" {
        Yes => "yes", "Yes";
        No => "no", "No";
        Maybe => "maybe", "Maybe";
    }
}

survey_choice! {
    /// Preference over tracking inventory in a spreadsheet.
    PreferOverExcel, "prefer over excel" {
        Yes => "yes", "Yes";
        No => "no", "No";
        Depends => "depends", "Depends on the situation";
    }
}

/// Survey fields as submitted. The three choices are required; feedback is
/// free text and optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurveyForm {
    pub user_type: String,
    pub would_use_again: String,
    pub prefer_over_excel: String,
    pub feedback: String,
}

/// One recorded answer set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyResponse {
    user_type: UserType,
    would_use_again: WouldUseAgain,
    prefer_over_excel: PreferOverExcel,
    #[serde(skip_serializing_if = "Option::is_none")]
    feedback: Option<String>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    timestamp: DateTime<Utc>,
}

impl SurveyResponse {
    pub fn submit(form: SurveyForm, occurred_at: DateTime<Utc>) -> DomainResult<Self> {
        let feedback = form.feedback.trim();
        Ok(Self {
            user_type: form.user_type.parse()?,
            would_use_again: form.would_use_again.parse()?,
            prefer_over_excel: form.prefer_over_excel.parse()?,
            feedback: (!feedback.is_empty()).then(|| feedback.to_string()),
            timestamp: occurred_at,
        })
    }

    pub fn user_type(&self) -> UserType {
        self.user_type
    }

    pub fn would_use_again(&self) -> WouldUseAgain {
        self.would_use_again
    }

    pub fn prefer_over_excel(&self) -> PreferOverExcel {
        self.prefer_over_excel
    }

    pub fn feedback(&self) -> Option<&str> {
        self.feedback.as_deref()
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

/// Responses in submission order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SurveyLog {
    responses: Vec<SurveyResponse>,
}

impl SurveyLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and append a response.
    pub fn record(&mut self, form: SurveyForm, occurred_at: DateTime<Utc>) -> DomainResult<()> {
        let response = SurveyResponse::submit(form, occurred_at)?;
        tracing::info!(
            user_type = %response.user_type,
            would_use_again = %response.would_use_again,
            "survey response recorded"
        );
        self.responses.push(response);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.responses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.responses.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SurveyResponse> {
        self.responses.iter()
    }

    pub fn export_snapshot(&self) -> Vec<SurveyRow> {
        self.responses.iter().map(SurveyRow::from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_time() -> DateTime<Utc> {
        DateTime::from_timestamp_millis(1_735_862_400_000).unwrap()
    }

    fn staff_form() -> SurveyForm {
        SurveyForm {
            user_type: "event-senior-staff".to_string(),
            would_use_again: "yes".to_string(),
            prefer_over_excel: "depends".to_string(),
            feedback: String::new(),
        }
    }

    #[test]
    fn choices_parse_their_wire_values() {
        for user_type in UserType::ALL {
            assert_eq!(user_type.as_str().parse::<UserType>(), Ok(*user_type));
        }
        assert_eq!(" maybe ".parse::<WouldUseAgain>(), Ok(WouldUseAgain::Maybe));
        assert_eq!(PreferOverExcel::Depends.label(), "Depends on the situation");
    }

    #[test]
    fn every_choice_is_required() {
        let blanks: [fn(&mut SurveyForm); 3] = [
            |f| f.user_type.clear(),
            |f| f.would_use_again = "  ".to_string(),
            |f| f.prefer_over_excel.clear(),
        ];
        for blank in blanks {
            let mut form = staff_form();
            blank(&mut form);
            let err = SurveyResponse::submit(form, test_time()).unwrap_err();
            assert!(matches!(err, DomainError::Validation(_)));
        }
    }

    #[test]
    fn unknown_answers_are_rejected() {
        let form = SurveyForm {
            user_type: "vendor".to_string(),
            ..staff_form()
        };
        assert_eq!(
            SurveyResponse::submit(form, test_time()),
            Err(DomainError::validation("unknown user type \"vendor\""))
        );
    }

    #[test]
    fn blank_feedback_is_dropped() {
        let response = SurveyResponse::submit(staff_form(), test_time()).unwrap();
        assert_eq!(response.feedback(), None);

        let form = SurveyForm {
            feedback: "  Faster than the spreadsheet. ".to_string(),
            ..staff_form()
        };
        let response = SurveyResponse::submit(form, test_time()).unwrap();
        assert_eq!(response.feedback(), Some("Faster than the spreadsheet."));
    }

    #[test]
    fn serializes_wire_values_and_millisecond_timestamp() {
        let response = SurveyResponse::submit(staff_form(), test_time()).unwrap();
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["userType"], "event-senior-staff");
        assert_eq!(json["preferOverExcel"], "depends");
        assert_eq!(json["timestamp"], 1_735_862_400_000i64);
        assert!(json.get("feedback").is_none());
    }

    #[test]
    fn log_keeps_submission_order_and_skips_invalid() {
        let mut log = SurveyLog::new();
        log.record(staff_form(), test_time()).unwrap();
        let bad = SurveyForm {
            would_use_again: "perhaps".to_string(),
            ..staff_form()
        };
        assert!(log.record(bad, test_time()).is_err());
        let participant = SurveyForm {
            user_type: "event-participant".to_string(),
            ..staff_form()
        };
        log.record(participant, test_time()).unwrap();

        let types: Vec<_> = log.iter().map(SurveyResponse::user_type).collect();
        assert_eq!(types, vec![UserType::EventSeniorStaff, UserType::EventParticipant]);
        assert_eq!(log.len(), 2);
    }
}
