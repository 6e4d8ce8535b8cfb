//! Export functionality for computed lineage views.
//!
//! This module provides exporters for writing the currently visible graph
//! in various formats: JSON, CSV, and Markdown.

pub mod csv;
pub mod json;
pub mod markdown;

use crate::projection::{TypeCount, ViewStatus};
use crate::session::LineageSession;
use crate::visibility::{ViewState, VisibleGraph};
use std::io::{self, Write};

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// JSON format - machine-readable, full data
    Json,
    /// CSV format - one row per rendered edge
    Csv,
    /// Markdown format - documentation/reporting
    Markdown,
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "csv" => Ok(ExportFormat::Csv),
            "markdown" | "md" => Ok(ExportFormat::Markdown),
            _ => Err(format!(
                "Unknown export format: '{}'. Valid formats: json, csv, markdown",
                s
            )),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportFormat::Json => write!(f, "json"),
            ExportFormat::Csv => write!(f, "csv"),
            ExportFormat::Markdown => write!(f, "markdown"),
        }
    }
}

/// One constrained filter column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveFilter {
    pub column: String,
    pub selected: Vec<String>,
    /// Dropdown text, e.g. `"2 items selected (2/5)"`
    pub summary: String,
}

/// Data container for export operations.
///
/// A snapshot of one session's view at the time of export.
#[derive(Debug, Clone)]
pub struct ExportData {
    /// Name of the input (usually the file name)
    pub source: String,
    /// The computed view
    pub graph: VisibleGraph,
    pub status: ViewStatus,
    pub type_counts: Vec<TypeCount>,
    /// Hide-sets in effect
    pub view: ViewState,
    /// Columns with a non-empty selection, in header order
    pub filters: Vec<ActiveFilter>,
}

impl ExportData {
    /// Snapshot the current view of a session.
    pub fn from_session(source: impl Into<String>, session: &mut LineageSession) -> Self {
        let graph = session.visible().clone();
        let status = session.status();
        let type_counts = session.type_counts();

        let filter = session.filter();
        let filters = filter
            .columns()
            .iter()
            .filter_map(|column| {
                let selection = filter.selection(column)?;
                if selection.selected.is_empty() {
                    return None;
                }
                Some(ActiveFilter {
                    column: column.clone(),
                    selected: selection.selected.iter().cloned().collect(),
                    summary: selection.summary(),
                })
            })
            .collect();

        Self {
            source: source.into(),
            graph,
            status,
            type_counts,
            view: session.view().clone(),
            filters,
        }
    }
}

/// Trait for exporters.
pub trait Exporter {
    /// Export the data to the given writer.
    fn export<W: Write>(&self, data: &ExportData, writer: &mut W) -> io::Result<()>;
}

/// Export data in the specified format.
pub fn export<W: Write>(
    format: ExportFormat,
    data: &ExportData,
    writer: &mut W,
) -> io::Result<()> {
    match format {
        ExportFormat::Json => json::JsonExporter.export(data, writer),
        ExportFormat::Csv => csv::CsvExporter.export(data, writer),
        ExportFormat::Markdown => markdown::MarkdownExporter.export(data, writer),
    }
}

/// Export data to a string.
pub fn export_to_string(format: ExportFormat, data: &ExportData) -> io::Result<String> {
    let mut buffer = Vec::new();
    export(format, data, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::ExportData;
    use crate::graph::LineageStore;
    use crate::parser::LineageRow;
    use crate::session::LineageSession;

    /// `src -> mid -> dst` with `mid` hidden, plus a direct `src -> side`.
    pub fn bridged_session() -> LineageSession {
        let mut session = LineageSession::new(LineageStore::build(vec![
            LineageRow::new("mid", "Staging", "loads", "src", "Table"),
            LineageRow::new("dst", "View", "reads", "mid", "Staging"),
            LineageRow::new("side", "Table", "copies", "src", "Table"),
        ]));
        session.toggle_node_individual("mid");
        session
    }

    pub fn bridged_data() -> ExportData {
        ExportData::from_session("lineage.csv", &mut bridged_session())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_format_from_str() {
        assert_eq!("json".parse::<ExportFormat>().unwrap(), ExportFormat::Json);
        assert_eq!("JSON".parse::<ExportFormat>().unwrap(), ExportFormat::Json);
        assert_eq!("csv".parse::<ExportFormat>().unwrap(), ExportFormat::Csv);
        assert_eq!("md".parse::<ExportFormat>().unwrap(), ExportFormat::Markdown);
        assert!("dot".parse::<ExportFormat>().is_err());
    }

    #[test]
    fn test_export_format_display() {
        assert_eq!(format!("{}", ExportFormat::Json), "json");
        assert_eq!(format!("{}", ExportFormat::Markdown), "markdown");
    }

    #[test]
    fn test_export_data_snapshot() {
        let data = test_support::bridged_data();

        assert_eq!(data.source, "lineage.csv");
        assert_eq!(data.graph.node_count(), 3);
        assert_eq!(data.status.hidden_names, vec!["mid"]);
        assert!(data.view.hidden_node_ids.contains("mid"));
        assert!(data.filters.is_empty());
    }

    #[test]
    fn test_export_data_active_filters() {
        let mut session = test_support::bridged_session();
        session.set_column_filter("relationship", ["copies"]);

        let data = ExportData::from_session("x", &mut session);
        assert_eq!(data.filters.len(), 1);
        assert_eq!(data.filters[0].column, "relationship");
        assert_eq!(data.filters[0].selected, vec!["copies"]);
        assert_eq!(data.filters[0].summary, "copies (1/3)");
    }

    #[test]
    fn test_export_to_string_all_formats() {
        let data = test_support::bridged_data();
        for format in [ExportFormat::Json, ExportFormat::Csv, ExportFormat::Markdown] {
            let out = export_to_string(format, &data).unwrap();
            assert!(out.contains("src"), "{} output missing node", format);
        }
    }
}
