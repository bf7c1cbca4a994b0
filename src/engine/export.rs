//! Forecast table serialization.

use crate::core::ForecastTable;
use crate::error::{ForecastError, Result};
use csv::Writer;
use std::io;

/// Header of a table without interval columns.
pub const POINT_COLUMNS: [&str; 3] = ["date", "baseline_prediction", "ar_prediction"];
/// Interval columns appended when every row carries bounds.
pub const INTERVAL_COLUMNS: [&str; 2] = ["ar_lower", "ar_upper"];

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Writes forecast tables as CSV with fixed-precision numbers.
///
/// Output is byte-identical for identical input: columns are in a fixed order,
/// rows follow step order, and numbers use `{:.N}` formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportEngine {
    precision: usize,
}

impl Default for ExportEngine {
    fn default() -> Self {
        Self { precision: 6 }
    }
}

impl ExportEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of decimal places for numeric columns.
    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    pub fn precision(&self) -> usize {
        self.precision
    }

    /// Serialize `table` to a CSV string.
    pub fn serialize(&self, table: &ForecastTable) -> Result<String> {
        let mut buffer = Vec::new();
        self.write_to(table, &mut buffer)?;
        String::from_utf8(buffer)
            .map_err(|e| ForecastError::Csv(format!("export is not valid UTF-8: {}", e)))
    }

    /// Write `table` as CSV into `writer`.
    pub fn write_to<W: io::Write>(&self, table: &ForecastTable, writer: W) -> Result<()> {
        let intervals = table.has_intervals();
        let mut wtr = Writer::from_writer(writer);

        let mut header: Vec<&str> = POINT_COLUMNS.to_vec();
        if intervals {
            header.extend(INTERVAL_COLUMNS);
        }
        wtr.write_record(&header)?;

        for row in table.rows() {
            let mut record = vec![
                row.date.format(DATE_FORMAT).to_string(),
                self.number(row.baseline_prediction),
                self.number(row.ar_prediction),
            ];
            if let (true, Some(lower), Some(upper)) = (intervals, row.ar_lower, row.ar_upper) {
                record.push(self.number(lower));
                record.push(self.number(upper));
            }
            wtr.write_record(&record)?;
        }

        wtr.flush()
            .map_err(|e| ForecastError::Csv(format!("flush failed: {}", e)))
    }

    fn number(&self, value: f64) -> String {
        format!("{:.*}", self.precision, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ForecastRow;
    use chrono::NaiveDate;

    fn row(step: usize, month: u32, bounds: Option<(f64, f64)>) -> ForecastRow {
        ForecastRow {
            step_index: step,
            date: NaiveDate::from_ymd_opt(2024, month, 1).unwrap(),
            baseline_prediction: 1000.0 + step as f64,
            ar_prediction: 1234.5678901,
            ar_lower: bounds.map(|b| b.0),
            ar_upper: bounds.map(|b| b.1),
        }
    }

    #[test]
    fn serialize_with_intervals() {
        let table = ForecastTable::from_rows(vec![
            row(1, 1, Some((1100.0, 1300.0))),
            row(2, 2, Some((1050.0, 1350.0))),
        ]);
        let text = ExportEngine::new().with_precision(2).serialize(&table).unwrap();

        assert_eq!(
            text,
            "date,baseline_prediction,ar_prediction,ar_lower,ar_upper\n\
             2024-01-01,1001.00,1234.57,1100.00,1300.00\n\
             2024-02-01,1002.00,1234.57,1050.00,1350.00\n"
        );
    }

    #[test]
    fn serialize_without_intervals_omits_columns() {
        let table = ForecastTable::from_rows(vec![row(1, 3, None)]);
        let text = ExportEngine::default().serialize(&table).unwrap();

        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("date,baseline_prediction,ar_prediction"));
        assert_eq!(lines.next(), Some("2024-03-01,1001.000000,1234.567890"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn serialize_empty_table_writes_header() {
        let text = ExportEngine::new().serialize(&ForecastTable::default()).unwrap();
        assert_eq!(text, "date,baseline_prediction,ar_prediction\n");
    }

    #[test]
    fn serialize_is_deterministic() {
        let table = ForecastTable::from_rows(vec![row(1, 5, Some((1.0, 2.0)))]);
        let engine = ExportEngine::new();
        assert_eq!(
            engine.serialize(&table).unwrap(),
            engine.serialize(&table).unwrap()
        );
    }

    #[test]
    fn large_values_have_no_separators() {
        let mut r = row(1, 1, None);
        r.baseline_prediction = 12_345_678.9;
        let text = ExportEngine::new()
            .with_precision(1)
            .serialize(&ForecastTable::from_rows(vec![r]))
            .unwrap();
        assert!(text.contains("12345678.9"));
    }
}
