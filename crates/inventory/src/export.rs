//! Tabular export of the inventory (comma-separated values).

use chrono::NaiveDate;
use thiserror::Error;

use crate::item::InventoryItem;

/// One flattened inventory row, status materialized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRow {
    pub item_name: String,
    pub requested: u32,
    pub on_hand: u32,
    pub received: u32,
    pub missing: u32,
    pub custodian: String,
    pub location: String,
    pub email: String,
    pub phone: String,
    /// `Yes` or `No`.
    pub expendable: &'static str,
    /// Title-cased derived status.
    pub status: &'static str,
}

type Column = (&'static str, fn(&ExportRow) -> String);

/// Header title and cell of every column, in output order.
const COLUMNS: [Column; 11] = [
    ("Item Name", |r: &ExportRow| r.item_name.clone()),
    ("Requested", |r: &ExportRow| r.requested.to_string()),
    ("On Hand", |r: &ExportRow| r.on_hand.to_string()),
    ("Received", |r: &ExportRow| r.received.to_string()),
    ("Missing", |r: &ExportRow| r.missing.to_string()),
    ("Custodian", |r: &ExportRow| r.custodian.clone()),
    ("Location", |r: &ExportRow| r.location.clone()),
    ("Email", |r: &ExportRow| r.email.clone()),
    ("Phone", |r: &ExportRow| r.phone.clone()),
    ("Expendable", |r: &ExportRow| r.expendable.to_string()),
    ("Status", |r: &ExportRow| r.status.to_string()),
];

impl ExportRow {
    /// Column titles in output order.
    pub fn headers() -> impl Iterator<Item = &'static str> {
        COLUMNS.iter().map(|(title, _)| *title)
    }

    fn cells(&self) -> impl Iterator<Item = String> + '_ {
        COLUMNS.iter().map(move |(_, cell)| cell(self))
    }
}

impl From<&InventoryItem> for ExportRow {
    fn from(item: &InventoryItem) -> Self {
        Self {
            item_name: item.item_name().to_string(),
            requested: item.requested(),
            on_hand: item.on_hand(),
            received: item.received(),
            missing: item.missing(),
            custodian: item.custodian().to_string(),
            location: item.location().to_string(),
            email: item.email().to_string(),
            phone: item.phone().to_string(),
            expendable: if item.is_expendable() { "Yes" } else { "No" },
            status: item.status().title(),
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

/// Write `rows` as CSV. The header row is written even when `rows` is empty.
pub fn write_csv<W: std::io::Write>(rows: &[ExportRow], writer: W) -> Result<(), ExportError> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(ExportRow::headers())?;
    for row in rows {
        wtr.write_record(row.cells())?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn to_csv_string(rows: &[ExportRow]) -> Result<String, ExportError> {
    let mut buf = Vec::new();
    write_csv(rows, &mut buf)?;
    Ok(String::from_utf8(buf)?)
}

/// Download name for an export taken on `date`.
pub fn export_file_name(date: NaiveDate) -> String {
    format!("inventory_export_{}.csv", date.format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(name: &str) -> ExportRow {
        ExportRow {
            item_name: name.to_string(),
            requested: 3,
            on_hand: 0,
            received: 3,
            missing: 0,
            custodian: "Smith".to_string(),
            location: "Bay1".to_string(),
            email: "a@b.com".to_string(),
            phone: String::new(),
            expendable: "No",
            status: "Received",
        }
    }

    #[test]
    fn empty_export_has_only_headers() {
        let csv = to_csv_string(&[]).unwrap();
        assert_eq!(
            csv,
            "Item Name,Requested,On Hand,Received,Missing,Custodian,Location,Email,Phone,Expendable,Status\n"
        );
    }

    #[test]
    fn rows_follow_header_order() {
        let csv = to_csv_string(&[row("Radio")]).unwrap();
        let lines: Vec<_> = csv.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], "Radio,3,0,3,0,Smith,Bay1,a@b.com,,No,Received");
    }

    #[test]
    fn fields_with_commas_and_quotes_are_quoted() {
        let csv = to_csv_string(&[row("Vest, \"large\"")]).unwrap();
        assert!(csv.contains("\"Vest, \"\"large\"\"\",3"));
    }

    #[test]
    fn every_column_has_a_title_and_a_cell() {
        let titles: Vec<_> = ExportRow::headers().collect();
        assert_eq!(titles.first(), Some(&"Item Name"));
        assert_eq!(titles.last(), Some(&"Status"));
        assert_eq!(row("Radio").cells().count(), titles.len());
    }

    #[test]
    fn file_name_uses_iso_date() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 7).unwrap();
        assert_eq!(export_file_name(date), "inventory_export_2026-03-07.csv");
    }
}
