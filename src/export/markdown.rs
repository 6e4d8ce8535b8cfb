//! Markdown export implementation.
//!
//! Exports the current view as a Markdown report for documentation and reviews.

use super::{ExportData, Exporter};
use std::collections::BTreeSet;
use std::io::{self, Write};

/// Markdown exporter implementation.
pub struct MarkdownExporter;

fn join_or_none(values: &BTreeSet<String>) -> String {
    if values.is_empty() {
        "None".to_string()
    } else {
        values.iter().cloned().collect::<Vec<_>>().join(", ")
    }
}

impl Exporter for MarkdownExporter {
    fn export<W: Write>(&self, data: &ExportData, writer: &mut W) -> io::Result<()> {
        writeln!(writer, "# Lineage View Report")?;
        writeln!(writer)?;
        writeln!(writer, "**Source:** {}", data.source)?;
        writeln!(writer)?;

        // Summary section
        let status = &data.status;
        writeln!(writer, "## Summary")?;
        writeln!(writer)?;
        writeln!(writer, "| Metric | Count |")?;
        writeln!(writer, "|--------|-------|")?;
        writeln!(writer, "| Total Nodes | {} |", status.total_nodes)?;
        writeln!(writer, "| Visible Nodes | {} |", status.visible_nodes)?;
        writeln!(writer, "| Hidden Nodes | {} |", status.hidden_nodes)?;
        writeln!(writer, "| Direct Edges | {} |", status.direct_edges)?;
        writeln!(writer, "| Indirect Edges | {} |", status.indirect_edges)?;
        if status.skipped_rows > 0 {
            writeln!(writer, "| Skipped Rows | {} |", status.skipped_rows)?;
        }
        writeln!(writer)?;

        // View settings
        writeln!(writer, "## View")?;
        writeln!(writer)?;
        writeln!(writer, "- **Hidden nodes:** {}", join_or_none(&data.view.hidden_node_ids))?;
        writeln!(
            writer,
            "- **Hidden node types:** {}",
            join_or_none(&data.view.hidden_node_types)
        )?;
        writeln!(
            writer,
            "- **Hidden relationships:** {}",
            join_or_none(&data.view.hidden_relationships)
        )?;
        for filter in &data.filters {
            writeln!(writer, "- **Filter `{}`:** {}", filter.column, filter.summary)?;
        }
        writeln!(writer)?;

        if !data.type_counts.is_empty() {
            writeln!(writer, "### Node Types")?;
            writeln!(writer)?;
            writeln!(writer, "| Type | Visible | Total | Type Hidden |")?;
            writeln!(writer, "|------|---------|-------|-------------|")?;
            for count in &data.type_counts {
                writeln!(
                    writer,
                    "| {} | {} | {} | {} |",
                    count.node_type,
                    count.visible,
                    count.total,
                    if count.hidden { "yes" } else { "no" }
                )?;
            }
            writeln!(writer)?;
        }

        // Edges
        let (direct, indirect): (Vec<_>, Vec<_>) =
            data.graph.edges().iter().partition(|e| e.is_direct());

        writeln!(writer, "## Edges")?;
        writeln!(writer)?;

        if data.graph.edges().is_empty() {
            writeln!(writer, "No edges in the current view.")?;
            writeln!(writer)?;
        }

        if !direct.is_empty() {
            writeln!(writer, "### Direct ({})", direct.len())?;
            writeln!(writer)?;
            writeln!(writer, "| Parent | Relationship | Child |")?;
            writeln!(writer, "|--------|--------------|-------|")?;
            for edge in &direct {
                writeln!(
                    writer,
                    "| {} | {} | {} |",
                    edge.source, edge.relationship, edge.target
                )?;
            }
            writeln!(writer)?;
        }

        if !indirect.is_empty() {
            writeln!(writer, "### Indirect ({})", indirect.len())?;
            writeln!(writer)?;
            writeln!(writer, "| Parent | Relationship | Via | Then | Child |")?;
            writeln!(writer, "|--------|--------------|-----|------|-------|")?;
            for edge in &indirect {
                writeln!(
                    writer,
                    "| {} | {} | {} | {} | {} |",
                    edge.source,
                    edge.relationship,
                    edge.via().unwrap_or_default(),
                    edge.via_relationship().unwrap_or_default(),
                    edge.target
                )?;
            }
            writeln!(writer)?;
        }

        // Footer
        writeln!(writer, "---")?;
        writeln!(writer, "*Generated by LineageScope*")?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::test_support::{bridged_data, bridged_session};
    use crate::graph::LineageStore;
    use crate::session::LineageSession;

    fn render(data: &ExportData) -> String {
        let mut output = Vec::new();
        MarkdownExporter.export(data, &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_markdown_export_summary() {
        let md_str = render(&bridged_data());

        assert!(md_str.contains("# Lineage View Report"));
        assert!(md_str.contains("**Source:** lineage.csv"));
        assert!(md_str.contains("| Total Nodes | 4 |"));
        assert!(md_str.contains("| Visible Nodes | 3 |"));
        assert!(md_str.contains("| Indirect Edges | 1 |"));
        assert!(!md_str.contains("Skipped Rows"));
    }

    #[test]
    fn test_markdown_export_view_settings() {
        let mut session = bridged_session();
        session.toggle_relationship_type("copies");
        session.set_column_filter("childTableType", ["View", "Table"]);
        let md_str = render(&ExportData::from_session("x", &mut session));

        assert!(md_str.contains("- **Hidden nodes:** mid"));
        assert!(md_str.contains("- **Hidden node types:** None"));
        assert!(md_str.contains("- **Hidden relationships:** copies"));
        assert!(md_str.contains("- **Filter `childTableType`:** 2 items selected (2/3)"));
    }

    #[test]
    fn test_markdown_export_edge_tables() {
        let md_str = render(&bridged_data());

        assert!(md_str.contains("### Direct (1)"));
        assert!(md_str.contains("| src | copies | side |"));
        assert!(md_str.contains("### Indirect (1)"));
        assert!(md_str.contains("| src | loads | mid | reads | dst |"));
        assert!(md_str.contains("| Staging | 0 | 1 | no |"));
    }

    #[test]
    fn test_markdown_export_empty_view() {
        let mut session = LineageSession::new(LineageStore::build(Vec::new()));
        let md_str = render(&ExportData::from_session("empty.csv", &mut session));

        assert!(md_str.contains("No edges in the current view."));
        assert!(!md_str.contains("### Direct"));
        assert!(!md_str.contains("### Node Types"));
        assert!(md_str.contains("*Generated by LineageScope*"));
    }
}
