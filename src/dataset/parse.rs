//! CSV Parsing
//!
//! Turns the source CSV into a [`Dataset`]. Columns are located by header
//! name, so their position and any extra columns do not matter. Rows are
//! not cleaned: a blank `Value` cell is kept as a missing value.

use std::io::Read;

use super::error::{DatasetError, DatasetResult};
use super::types::{DataSample, Dataset, Record, PERIOD_COLUMN, SAMPLE_ROWS, VALUE_COLUMN};

/// Parse a dataset from any reader
pub fn parse_csv<R: Read>(input: R) -> DatasetResult<Dataset> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::Headers)
        .from_reader(input);

    let headers = reader.headers()?.clone();
    let period_idx = column_index(&headers, PERIOD_COLUMN)?;
    let value_idx = column_index(&headers, VALUE_COLUMN)?;

    let mut records = Vec::new();
    let mut sample = DataSample {
        columns: headers.iter().map(str::to_string).collect(),
        rows: Vec::with_capacity(SAMPLE_ROWS),
    };

    for result in reader.records() {
        let row = result?;
        let line = row.position().map(|p| p.line() as usize).unwrap_or_default();

        let period_str = row.get(period_idx).unwrap_or_default().trim();
        let ref_period = parse_period(period_str).ok_or_else(|| DatasetError::InvalidPeriod {
            line,
            value: period_str.to_string(),
        })?;

        let value_str = row.get(value_idx).unwrap_or_default().trim();
        let value = if value_str.is_empty() {
            None
        } else {
            Some(
                value_str
                    .parse::<f64>()
                    .map_err(|_| DatasetError::InvalidValue {
                        line,
                        value: value_str.to_string(),
                    })?,
            )
        };

        if sample.rows.len() < SAMPLE_ROWS {
            sample.rows.push(row.iter().map(str::to_string).collect());
        }

        records.push(Record { ref_period, value });
    }

    tracing::debug!(rows = records.len(), "Parsed debt dataset");

    Ok(Dataset::with_sample(records, sample))
}

/// Parse a dataset from an in-memory string
pub fn parse_csv_str(data: &str) -> DatasetResult<Dataset> {
    parse_csv(data.as_bytes())
}

fn column_index(headers: &csv::StringRecord, name: &str) -> DatasetResult<usize> {
    headers
        .iter()
        .position(|h| h == name)
        .ok_or_else(|| DatasetError::MissingColumn(name.to_string()))
}

/// Years may be written as "2008" or, by some exporters, "2008.0"
fn parse_period(s: &str) -> Option<i32> {
    if let Ok(year) = s.parse::<i32>() {
        return Some(year);
    }

    let year = s.parse::<f64>().ok()?;
    if year.fract() == 0.0 && year >= i32::MIN as f64 && year <= i32::MAX as f64 {
        Some(year as i32)
    } else {
        None
    }
}
