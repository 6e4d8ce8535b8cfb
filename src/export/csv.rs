//! CSV export implementation.
//!
//! Writes one row per rendered edge, so the output can be fed back into a
//! spreadsheet or another lineage tool.

use super::{ExportData, Exporter};
use std::io::{self, Write};

/// CSV exporter implementation.
pub struct CsvExporter;

impl CsvExporter {
    /// Escape a field value for CSV format.
    ///
    /// Wraps the value in quotes if it contains commas, quotes or line breaks.
    fn escape_field(value: &str) -> String {
        if value.contains(&[',', '"', '\n', '\r'][..]) {
            format!("\"{}\"", value.replace('"', "\"\""))
        } else {
            value.to_string()
        }
    }
}

impl Exporter for CsvExporter {
    fn export<W: Write>(&self, data: &ExportData, writer: &mut W) -> io::Result<()> {
        writeln!(writer, "source,target,relationship,kind,via,via_relationship")?;

        for edge in data.graph.edges() {
            let kind = if edge.is_direct() { "direct" } else { "indirect" };
            writeln!(
                writer,
                "{},{},{},{},{},{}",
                Self::escape_field(&edge.source),
                Self::escape_field(&edge.target),
                Self::escape_field(&edge.relationship),
                kind,
                Self::escape_field(edge.via().unwrap_or_default()),
                Self::escape_field(edge.via_relationship().unwrap_or_default()),
            )?;
        }

        Ok(())
    }
}
