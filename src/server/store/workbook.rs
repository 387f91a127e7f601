use std::collections::HashMap;
use std::path::Path;
use anyhow::{anyhow, Context, Error};
use calamine::{open_workbook_auto, Data, Range, Reader};
use crate::server::model::record::{FieldValue, OrderRecord};

/// Read every row of the first worksheet as an order, using the first row as headers.
pub(crate) fn read_orders(path: &Path) -> Result<Vec<OrderRecord>, Error> {
    let mut workbook = open_workbook_auto(path)
        .with_context(|| format!("failed to open workbook '{}'", path.display()))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| anyhow!("workbook '{}' has no worksheets", path.display()))?
        .context("failed to read first worksheet")?;
    Ok(records_from_range(&range))
}

pub(crate) fn records_from_range(range: &Range<Data>) -> Vec<OrderRecord> {
    let mut rows = range.rows();
    let headers = match rows.next() {
        Some(header_row) => header_names(header_row),
        None => return vec![],
    };
    rows.filter(|row| !row.iter().all(|cell| matches!(cell, Data::Empty)))
        .map(|row| {
            let fields = headers
                .iter()
                .zip(row.iter())
                .map(|(name, cell)| (name.clone(), field_value(cell)))
                .collect();
            OrderRecord::new(fields)
        })
        .collect()
}

/// Blank headers become `Unnamed: <idx>`, repeats get a `.N` suffix.
fn header_names(row: &[Data]) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    row.iter()
        .enumerate()
        .map(|(idx, cell)| {
            let base = match cell {
                Data::Empty => format!("Unnamed: {idx}"),
                Data::String(s) if s.trim().is_empty() => format!("Unnamed: {idx}"),
                other => field_value(other).header_text(),
            };
            let count = seen.entry(base.clone()).or_insert(0);
            let name = match *count {
                0 => base,
                n => format!("{base}.{n}"),
            };
            *count += 1;
            name
        })
        .collect()
}

fn field_value(cell: &Data) -> FieldValue {
    match cell {
        Data::Empty | Data::Error(_) => FieldValue::Null,
        Data::Bool(b) => FieldValue::Bool(*b),
        Data::Int(i) => FieldValue::Int(*i),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => FieldValue::Int(*f as i64),
        Data::Float(f) => FieldValue::Float(*f),
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => FieldValue::String(s.clone()),
        Data::DateTime(dt) => dt
            .as_datetime()
            .map(FieldValue::DateTime)
            .unwrap_or(FieldValue::Float(dt.as_f64())),
    }
}

impl FieldValue {
    fn header_text(&self) -> String {
        match self {
            FieldValue::Null => String::new(),
            FieldValue::Bool(b) => b.to_string(),
            FieldValue::Int(i) => i.to_string(),
            FieldValue::Float(f) => f.to_string(),
            FieldValue::String(s) => s.clone(),
            FieldValue::DateTime(dt) => dt.to_string(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::server::model::record::ORDER_DATE_FIELD;
    use chrono::NaiveDate;
    use std::io::Write;

    fn sheet(cells: &[&[Data]]) -> Range<Data> {
        let height = cells.len() as u32;
        let width = cells.iter().map(|r| r.len()).max().unwrap_or(0) as u32;
        let mut range = Range::new((0, 0), (height - 1, width - 1));
        for (r, row) in cells.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                range.set_value((r as u32, c as u32), cell.clone());
            }
        }
        range
    }

    fn text(s: &str) -> Data {
        Data::String(s.to_string())
    }

    #[test]
    fn rows_become_records_keyed_by_header() {
        let range = sheet(&[
            &[text("OrderID"), text(ORDER_DATE_FIELD), text("Amount")],
            &[Data::Float(1.0), text("2024-01-11"), Data::Float(9.5)],
            &[Data::Int(2), Data::DateTimeIso("2024-01-12T10:00:00".to_string()), Data::Bool(true)],
        ]);
        let records = records_from_range(&range);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get("OrderID"), Some(&FieldValue::Int(1)));
        assert_eq!(records[0].get("Amount"), Some(&FieldValue::Float(9.5)));
        assert_eq!(records[0].order_date().map(|d| d.date()), NaiveDate::from_ymd_opt(2024, 1, 11));
        assert_eq!(records[1].get("Amount"), Some(&FieldValue::Bool(true)));
        assert_eq!(records[1].order_date().map(|d| d.date()), NaiveDate::from_ymd_opt(2024, 1, 12));
    }

    #[test]
    fn blank_and_duplicate_headers_are_renamed() {
        let range = sheet(&[
            &[text("Item"), Data::Empty, text("Item"), text("Item")],
            &[text("a"), text("b"), text("c"), text("d")],
        ]);
        let json = serde_json::to_value(&records_from_range(&range)[0]).unwrap();
        assert_eq!(json, serde_json::json!({"Item": "a", "Unnamed: 1": "b", "Item.1": "c", "Item.2": "d"}));
    }

    #[test]
    fn empty_rows_are_skipped_and_error_cells_are_null() {
        let range = sheet(&[
            &[text("OrderID"), text(ORDER_DATE_FIELD)],
            &[Data::Empty, Data::Empty],
            &[Data::Int(3), Data::Error(calamine::CellErrorType::Value)],
        ]);
        let records = records_from_range(&range);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].get(ORDER_DATE_FIELD), Some(&FieldValue::Null));
        assert_eq!(records[0].order_date(), None);
    }

    #[test]
    fn header_only_sheet_has_no_records() {
        let range = sheet(&[&[text("OrderID"), text(ORDER_DATE_FIELD)]]);
        assert!(records_from_range(&range).is_empty());
        assert!(records_from_range(&Range::<Data>::empty()).is_empty());
    }

    #[test]
    fn corrupt_workbook_is_an_error() {
        let mut file = tempfile::Builder::new().suffix(".xlsx").tempfile().unwrap();
        file.write_all(b"definitely not a zip archive").unwrap();
        assert!(read_orders(file.path()).is_err());
    }
}
