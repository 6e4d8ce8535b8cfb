//! Parser module for lineagescope.
//!
//! Turns delimited lineage text into typed [`LineageRow`] records.
//!
//! # Input Format
//!
//! - First line: column headers
//! - Every other line: one `parent -> child` edge
//! - Five semantic columns are required; their names come from a
//!   [`ColumnMapping`] and any other columns are kept as extras
//! - Rows with the wrong field count are skipped and counted
//!
//! # Example
//!
//! ```
//! use lineagescope::parser::{parse_str, ColumnMapping};
//!
//! let text = "childTableName,childTableType,relationship,parentTableName,parentTableType\n\
//!             orders_v,View,reads,orders,Table\n";
//! let loaded = parse_str(text, &ColumnMapping::default()).unwrap();
//! assert_eq!(loaded.rows[0].parent_name, "orders");
//! ```

pub mod lineage_csv;
pub mod types;

// Re-export commonly used types for convenience
pub use lineage_csv::{parse_file, parse_reader, parse_str, LoadedRows, ParseError, ParseResult};

pub use types::{ColumnMapping, LineageRow};
