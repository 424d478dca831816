//! Year-range filtering
//!
//! The one piece of logic every render runs twice: once per chart.

use serde::Serialize;

use super::types::{RangeSelection, Record};

/// Records of a dataset that fall inside a year range, in source order
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(transparent)]
pub struct FilteredView {
    records: Vec<Record>,
}

impl FilteredView {
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn into_records(self) -> Vec<Record> {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Narrow this view further
    pub fn filter(&self, selection: RangeSelection) -> FilteredView {
        filter(&self.records, selection.lower, selection.upper)
    }
}

/// Keep every record with `lower <= refPeriod <= upper`
///
/// Pure and order-preserving. An inverted pair (`lower > upper`) matches
/// nothing rather than failing.
pub fn filter(records: &[Record], lower: i32, upper: i32) -> FilteredView {
    let selection = RangeSelection::new(lower, upper);
    let records = records
        .iter()
        .filter(|r| selection.contains(r.ref_period))
        .copied()
        .collect();

    FilteredView { records }
}
