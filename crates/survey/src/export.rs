//! Tabular export of survey responses (comma-separated values).

use chrono::NaiveDate;
use thiserror::Error;

use crate::response::SurveyResponse;

/// One flattened response, answers as their readable labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurveyRow {
    /// UTC, `YYYY-MM-DD HH:MM:SS`.
    pub submitted_at: String,
    pub user_type: &'static str,
    pub would_use_again: &'static str,
    pub prefer_over_excel: &'static str,
    pub feedback: String,
}

type Column = (&'static str, fn(&SurveyRow) -> String);

const COLUMNS: [Column; 5] = [
    ("Submitted At", |r: &SurveyRow| r.submitted_at.clone()),
    ("User Type", |r: &SurveyRow| r.user_type.to_string()),
    ("Would Use Again", |r: &SurveyRow| r.would_use_again.to_string()),
    ("Prefer Over Excel", |r: &SurveyRow| r.prefer_over_excel.to_string()),
    ("Feedback", |r: &SurveyRow| r.feedback.clone()),
];

impl SurveyRow {
    pub fn headers() -> impl Iterator<Item = &'static str> {
        COLUMNS.iter().map(|(title, _)| *title)
    }

    fn cells(&self) -> impl Iterator<Item = String> + '_ {
        COLUMNS.iter().map(move |(_, cell)| cell(self))
    }
}

impl From<&SurveyResponse> for SurveyRow {
    fn from(response: &SurveyResponse) -> Self {
        Self {
            submitted_at: response.timestamp().format("%Y-%m-%d %H:%M:%S").to_string(),
            user_type: response.user_type().label(),
            would_use_again: response.would_use_again().label(),
            prefer_over_excel: response.prefer_over_excel().label(),
            feedback: response.feedback().unwrap_or_default().to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("csv write failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("io failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("export is not valid utf-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Write `rows` as CSV, header first even when there are no responses.
pub fn write_csv<W: std::io::Write>(rows: &[SurveyRow], writer: W) -> Result<(), ExportError> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(SurveyRow::headers())?;
    for row in rows {
        wtr.write_record(row.cells())?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn to_csv_string(rows: &[SurveyRow]) -> Result<String, ExportError> {
    let mut buf = Vec::new();
    write_csv(rows, &mut buf)?;
    Ok(String::from_utf8(buf)?)
}

pub fn survey_file_name(date: NaiveDate) -> String {
    format!("survey_export_{}.csv", date.format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::response::{SurveyForm, SurveyLog};
    use chrono::{DateTime, Utc};

    fn test_time() -> DateTime<Utc> {
        DateTime::from_timestamp_millis(1_735_862_400_000).unwrap()
    }

    #[test]
    fn empty_export_has_only_headers() {
        assert_eq!(
            to_csv_string(&[]).unwrap(),
            "Submitted At,User Type,Would Use Again,Prefer Over Excel,Feedback\n"
        );
    }

    #[test]
    fn rows_use_labels_and_quote_feedback() {
        let mut log = SurveyLog::new();
        let form = SurveyForm {
            user_type: "requestor-only".to_string(),
            would_use_again: "maybe".to_string(),
            prefer_over_excel: "depends".to_string(),
            feedback: "Quick, mostly".to_string(),
        };
        log.record(form, test_time()).unwrap();

        let csv = to_csv_string(&log.export_snapshot()).unwrap();
        let lines: Vec<_> = csv.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[1],
            "2025-01-03 00:00:00,Requestor Only,Maybe,Depends on the situation,\"Quick, mostly\""
        );
    }

    #[test]
    fn file_name_uses_iso_date() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 7).unwrap();
        assert_eq!(survey_file_name(date), "survey_export_2026-03-07.csv");
    }
}
