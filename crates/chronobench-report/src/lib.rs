//! chronobench-report — run report rendering.
//!
//! Turns a `RunReport` into human-readable markdown or flat CSV for
//! spreadsheet analysis. Chart rendering is left to downstream consumers of
//! the CSV export.

pub mod csv;
pub mod markdown;

pub use csv::write_csv_records;
pub use markdown::write_markdown_report;
