//! Feedback survey: validated responses from event users and their export.
//!
//! Deterministic domain logic like the inventory crate; callers supply
//! timestamps and decide whether the survey is open.

pub mod export;
pub mod response;

pub use export::{ExportError, SurveyRow, survey_file_name, to_csv_string, write_csv};
pub use response::{PreferOverExcel, SurveyForm, SurveyLog, SurveyResponse, UserType, WouldUseAgain};
