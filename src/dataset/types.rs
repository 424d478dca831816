//! Core data types for the debt dataset
//!
//! This module defines the fundamental types used throughout the dashboard:
//! - `Record`: One (year, amount) observation
//! - `Dataset`: The loaded table plus a raw preview sample
//! - `YearBounds`: Observed period extremes
//! - `RangeSelection`: A user-chosen year interval for one chart

use serde::{Deserialize, Serialize};

use super::filter::{filter, FilteredView};

/// Number of raw rows kept for the data preview panel
pub const SAMPLE_ROWS: usize = 5;

/// Name of the period column in the source CSV
pub const PERIOD_COLUMN: &str = "refPeriod";

/// Name of the value column in the source CSV
pub const VALUE_COLUMN: &str = "Value";

/// A single observation
///
/// Serialized with the source column names so JSON output lines up with the CSV.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Record {
    /// Year the figure refers to
    #[serde(rename = "refPeriod")]
    pub ref_period: i32,
    /// External debt amount; `None` when the source cell is blank
    #[serde(rename = "Value")]
    pub value: Option<f64>,
}

impl Record {
    /// Create a record with a known value
    pub fn new(ref_period: i32, value: f64) -> Self {
        Self {
            ref_period,
            value: Some(value),
        }
    }

    /// Create a record whose value cell was blank
    pub fn blank(ref_period: i32) -> Self {
        Self {
            ref_period,
            value: None,
        }
    }
}

/// First few raw rows of the source, all columns kept as text
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct DataSample {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl DataSample {
    /// Build a sample from typed records when no raw rows are available
    pub fn from_records(records: &[Record]) -> Self {
        let rows = records
            .iter()
            .take(SAMPLE_ROWS)
            .map(|r| {
                vec![
                    r.ref_period.to_string(),
                    r.value.map(|v| v.to_string()).unwrap_or_default(),
                ]
            })
            .collect();

        Self {
            columns: vec![PERIOD_COLUMN.to_string(), VALUE_COLUMN.to_string()],
            rows,
        }
    }
}

/// Observed minimum and maximum `refPeriod`
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct YearBounds {
    pub min: i32,
    pub max: i32,
}

impl YearBounds {
    /// Compute bounds over records, `None` when there are none
    pub fn of(records: &[Record]) -> Option<Self> {
        let min = records.iter().map(|r| r.ref_period).min()?;
        let max = records.iter().map(|r| r.ref_period).max()?;
        Some(Self { min, max })
    }

    /// Clamp a year into these bounds
    pub fn clamp(&self, year: i32) -> i32 {
        year.clamp(self.min, self.max)
    }
}

impl std::fmt::Display for YearBounds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.min, self.max)
    }
}

/// The loaded table
///
/// Immutable once built; a fresh one is produced on every fetch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    records: Vec<Record>,
    sample: DataSample,
}

impl Dataset {
    /// Create a dataset from records, deriving the preview sample from them
    pub fn new(records: Vec<Record>) -> Self {
        let sample = DataSample::from_records(&records);
        Self { records, sample }
    }

    /// Create a dataset with a raw sample captured during parsing
    pub fn with_sample(records: Vec<Record>, sample: DataSample) -> Self {
        Self { records, sample }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn sample(&self) -> &DataSample {
        &self.sample
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Observed period extremes
    pub fn bounds(&self) -> Option<YearBounds> {
        YearBounds::of(&self.records)
    }

    /// Rows whose period falls inside the selection
    pub fn filter(&self, selection: RangeSelection) -> FilteredView {
        filter(&self.records, selection.lower, selection.upper)
    }
}

/// A (lower, upper) year interval chosen for one chart
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct RangeSelection {
    pub lower: i32,
    pub upper: i32,
}

impl RangeSelection {
    pub fn new(lower: i32, upper: i32) -> Self {
        Self { lower, upper }
    }

    /// Default selection covering every observed year
    pub fn full(bounds: YearBounds) -> Self {
        Self {
            lower: bounds.min,
            upper: bounds.max,
        }
    }

    /// Resolve raw slider input against the observed bounds
    ///
    /// Missing ends default to the full range and present ends are clamped
    /// into it. The order of the two ends is left alone; an inverted pair
    /// simply selects nothing.
    pub fn from_widget(bounds: Option<YearBounds>, lower: Option<i32>, upper: Option<i32>) -> Self {
        match bounds {
            Some(b) => Self {
                lower: b.clamp(lower.unwrap_or(b.min)),
                upper: b.clamp(upper.unwrap_or(b.max)),
            },
            None => Self {
                lower: lower.unwrap_or_default(),
                upper: upper.unwrap_or_default(),
            },
        }
    }

    /// Whether the year lies inside the inclusive interval
    pub fn contains(&self, year: i32) -> bool {
        self.lower <= year && year <= self.upper
    }
}

impl std::fmt::Display for RangeSelection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.lower, self.upper)
    }
}
