// CSV to observation table parsing
use crate::domain::error::DashboardError;
use crate::domain::table::{Column, ObservationTable, TimeIndex, TIME_COLUMN_CANDIDATES};
use chrono::{DateTime, NaiveDate, NaiveDateTime};

const DATETIME_FORMATS: [&str; 9] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S%.f",
    "%Y/%m/%d %H:%M",
    "%m/%d/%Y %H:%M:%S%.f",
    "%m/%d/%Y %H:%M",
    "%m/%d/%Y %I:%M:%S %p",
];

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

/// Parse CSV text with a header row into a table sorted by its time column.
///
/// Columns whose non-empty cells all parse as numbers become numeric, with
/// empty cells stored as NaN; every other column is kept as text. The first
/// header matching one of `TIME_COLUMN_CANDIDATES` becomes the time index.
/// Rows with an empty time cell are dropped.
pub fn parse_table(text: &str) -> Result<ObservationTable, DashboardError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    if headers.is_empty() || headers.iter().all(String::is_empty) {
        return Err(DashboardError::Csv("missing header row".to_string()));
    }

    let time_idx = TIME_COLUMN_CANDIDATES
        .iter()
        .find_map(|candidate| headers.iter().position(|h| h == *candidate));

    let mut times = Vec::new();
    let mut cells: Vec<Vec<String>> = vec![Vec::new(); headers.len()];
    let mut dropped = 0usize;
    for record in reader.records() {
        let record = record?;
        if let Some(idx) = time_idx {
            let value = &record[idx];
            if value.is_empty() {
                dropped += 1;
                continue;
            }
            let parsed = parse_timestamp(value).ok_or_else(|| DashboardError::Timestamp {
                column: headers[idx].clone(),
                value: value.to_string(),
            })?;
            times.push(parsed);
        }
        for (idx, cell) in record.iter().enumerate() {
            cells[idx].push(cell.to_string());
        }
    }
    if dropped > 0 {
        tracing::warn!("Dropped {} rows with an empty time cell", dropped);
    }

    let mut time = None;
    let mut columns = Vec::with_capacity(headers.len());
    for (idx, (name, raw)) in headers.into_iter().zip(cells).enumerate() {
        if time_idx == Some(idx) {
            time = Some(TimeIndex {
                name,
                values: std::mem::take(&mut times),
            });
        } else {
            columns.push((name, infer_column(raw)));
        }
    }

    let mut table = ObservationTable::new(time, columns);
    table.sort_by_time();
    Ok(table)
}

fn infer_column(raw: Vec<String>) -> Column {
    let parsed: Option<Vec<f64>> = raw
        .iter()
        .map(|cell| {
            if cell.is_empty() {
                Some(f64::NAN)
            } else {
                cell.parse::<f64>().ok()
            }
        })
        .collect();

    match parsed {
        Some(values) => Column::Numeric(values),
        None => Column::Text(raw),
    }
}

pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_utc());
    }
    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Some(dt);
        }
    }
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}
