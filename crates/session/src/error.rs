use thiserror::Error;

use gearledger_auth::AuthzError;
use gearledger_core::DomainError;
use gearledger_inventory::ExportError;
use gearledger_survey::ExportError as SurveyExportError;

pub type SessionResult<T> = Result<T, SessionError>;

/// Anything a session call can fail with. All of it is user-facing and
/// recoverable.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Auth(#[from] AuthzError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error(transparent)]
    SurveyExport(#[from] SurveyExportError),
}

impl SessionError {
    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            SessionError::Auth(AuthzError::Forbidden(_)) => "forbidden",
            SessionError::Auth(_) => "invalid_credential",
            SessionError::Domain(e) => e.code(),
            SessionError::Export(_) | SessionError::SurveyExport(_) => "export_error",
        }
    }
}
