//! Debt Dataset
//!
//! In-memory representation of the external debt table and the year-range
//! filter applied to it:
//!
//! - **types**: Core data structures (Record, Dataset, RangeSelection)
//! - **parse**: CSV to `Dataset`
//! - **filter**: Year-range filtering into a `FilteredView`
//! - **error**: Error types
//!
//! # Example
//!
//! ```rust
//! use debtscope::dataset::{parse_csv_str, RangeSelection};
//!
//! let ds = parse_csv_str("refPeriod,Value\n2008,44\n2009,60\n2010,80").unwrap();
//! let view = ds.filter(RangeSelection::new(2008, 2009));
//! assert_eq!(view.len(), 2);
//! ```

pub mod error;
pub mod filter;
pub mod parse;
pub mod types;

pub use error::{DatasetError, DatasetResult};
pub use filter::{filter, FilteredView};
pub use parse::{parse_csv, parse_csv_str};
pub use types::{
    DataSample, Dataset, RangeSelection, Record, YearBounds, PERIOD_COLUMN, SAMPLE_ROWS,
    VALUE_COLUMN,
};
