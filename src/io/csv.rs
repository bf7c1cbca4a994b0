//! CSV loading for revenue series and exported forecast tables.

use crate::core::{ForecastRow, ForecastTable, TimeSeries};
use crate::engine::export::{INTERVAL_COLUMNS, POINT_COLUMNS};
use crate::error::{ForecastError, Result};
use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord, Trim};
use std::io;
use std::path::Path;
use tracing::debug;

const DATE_COLUMN: &str = "date";
const VALUE_COLUMN: &str = "revenue";

/// Read a `date,revenue` CSV into a validated series.
///
/// Headers are trimmed and matched case-insensitively; other columns are
/// ignored. Rows are sorted by date before validation, so duplicate dates
/// surface as a [`ForecastError::DataFormat`].
pub fn read_series<R: io::Read>(reader: R) -> Result<TimeSeries> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let date_idx = column_index(&headers, DATE_COLUMN)?;
    let value_idx = column_index(&headers, VALUE_COLUMN)?;

    let mut rows = Vec::new();
    for (i, record) in rdr.records().enumerate() {
        let record = record?;
        let line = i + 2;
        let date = parse_date(field(&record, date_idx), line)?;
        let value = parse_number(field(&record, value_idx), VALUE_COLUMN, line)?;
        rows.push((date, value));
    }

    rows.sort_by_key(|(date, _)| *date);
    let (dates, values): (Vec<NaiveDate>, Vec<f64>) = rows.into_iter().unzip();
    debug!(rows = values.len(), "series loaded");
    TimeSeries::new(dates, values)
}

/// Read a series from a CSV file.
pub fn read_series_from_path<P: AsRef<Path>>(path: P) -> Result<TimeSeries> {
    let file = std::fs::File::open(path.as_ref()).map_err(|e| {
        ForecastError::Csv(format!("cannot open {}: {}", path.as_ref().display(), e))
    })?;
    read_series(file)
}

/// Re-parse a table written by [`crate::engine::ExportEngine`].
///
/// The interval columns are optional but must appear together.
pub fn read_forecast_table<R: io::Read>(reader: R) -> Result<ForecastTable> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let point: Vec<usize> = POINT_COLUMNS
        .iter()
        .map(|name| column_index(&headers, name))
        .collect::<Result<_>>()?;
    let lower_idx = column_index(&headers, INTERVAL_COLUMNS[0]).ok();
    let upper_idx = column_index(&headers, INTERVAL_COLUMNS[1]).ok();
    let bounds = match (lower_idx, upper_idx) {
        (Some(l), Some(u)) => Some((l, u)),
        (None, None) => None,
        _ => {
            return Err(ForecastError::Schema(format!(
                "expected both {} and {} columns",
                INTERVAL_COLUMNS[0], INTERVAL_COLUMNS[1]
            )))
        }
    };

    let mut rows = Vec::new();
    for (i, record) in rdr.records().enumerate() {
        let record = record?;
        let line = i + 2;
        let (ar_lower, ar_upper) = match bounds {
            Some((l, u)) => (
                Some(parse_number(field(&record, l), INTERVAL_COLUMNS[0], line)?),
                Some(parse_number(field(&record, u), INTERVAL_COLUMNS[1], line)?),
            ),
            None => (None, None),
        };
        rows.push(ForecastRow {
            step_index: i + 1,
            date: parse_date(field(&record, point[0]), line)?,
            baseline_prediction: parse_number(field(&record, point[1]), POINT_COLUMNS[1], line)?,
            ar_prediction: parse_number(field(&record, point[2]), POINT_COLUMNS[2], line)?,
            ar_lower,
            ar_upper,
        });
    }

    Ok(ForecastTable::from_rows(rows))
}

fn column_index(headers: &StringRecord, name: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h.trim().eq_ignore_ascii_case(name))
        .ok_or_else(|| ForecastError::Schema(format!("missing required column '{}'", name)))
}

fn field(record: &StringRecord, idx: usize) -> &str {
    record.get(idx).unwrap_or("")
}

fn parse_date(raw: &str, line: usize) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(raw, "%Y/%m/%d"))
        .or_else(|_| NaiveDate::parse_from_str(&format!("{}-01", raw), "%Y-%m-%d"))
        .map_err(|_| ForecastError::DataFormat(format!("line {}: invalid date '{}'", line, raw)))
}

fn parse_number(raw: &str, column: &str, line: usize) -> Result<f64> {
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(ForecastError::DataFormat(format!(
            "line {}: invalid {} value '{}'",
            line, column, raw
        ))),
    }
}
