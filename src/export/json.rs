//! JSON export implementation.
//!
//! Exports the visible graph in JSON format for machine-readable output.

use super::{ExportData, Exporter};
use crate::graph::LineageNode;
use crate::projection::{TypeCount, ViewStatus};
use crate::visibility::DerivedEdge;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::io::{self, Write};

/// JSON exporter implementation.
pub struct JsonExporter;

/// Hide-sets and column filters for JSON output.
#[derive(Serialize)]
struct JsonView<'a> {
    hidden_nodes: &'a BTreeSet<String>,
    hidden_node_types: &'a BTreeSet<String>,
    hidden_relationships: &'a BTreeSet<String>,
    filters: BTreeMap<&'a str, &'a [String]>,
}

/// Root JSON export structure.
#[derive(Serialize)]
struct JsonExport<'a> {
    source: &'a str,
    summary: &'a ViewStatus,
    view: JsonView<'a>,
    node_types: &'a [TypeCount],
    nodes: &'a [LineageNode],
    edges: &'a [DerivedEdge],
}

impl Exporter for JsonExporter {
    fn export<W: Write>(&self, data: &ExportData, writer: &mut W) -> io::Result<()> {
        let export = JsonExport {
            source: &data.source,
            summary: &data.status,
            view: JsonView {
                hidden_nodes: &data.view.hidden_node_ids,
                hidden_node_types: &data.view.hidden_node_types,
                hidden_relationships: &data.view.hidden_relationships,
                filters: data
                    .filters
                    .iter()
                    .map(|f| (f.column.as_str(), f.selected.as_slice()))
                    .collect(),
            },
            node_types: &data.type_counts,
            nodes: data.graph.nodes(),
            edges: data.graph.edges(),
        };

        let json = serde_json::to_string_pretty(&export)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        writeln!(writer, "{}", json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::test_support::{bridged_data, bridged_session};

    fn export_value(data: &ExportData) -> serde_json::Value {
        let mut output = Vec::new();
        JsonExporter.export(data, &mut output).unwrap();
        serde_json::from_slice(&output).unwrap()
    }

    #[test]
    fn test_json_export_summary() {
        let parsed = export_value(&bridged_data());

        assert_eq!(parsed["source"], "lineage.csv");
        assert_eq!(parsed["summary"]["total_nodes"], 4);
        assert_eq!(parsed["summary"]["visible_nodes"], 3);
        assert_eq!(parsed["summary"]["hidden_names"][0], "mid");
        assert_eq!(parsed["summary"]["direct_edges"], 1);
        assert_eq!(parsed["summary"]["indirect_edges"], 1);
        assert_eq!(parsed["view"]["hidden_nodes"][0], "mid");
    }

    #[test]
    fn test_json_export_nodes_and_edges() {
        let parsed = export_value(&bridged_data());

        let nodes = parsed["nodes"].as_array().unwrap();
        assert_eq!(nodes.len(), 3);
        assert!(nodes.iter().all(|n| n["id"] != "mid"));
        assert!(nodes.iter().any(|n| n["id"] == "src" && n["type"] == "Table"));

        let edges = parsed["edges"].as_array().unwrap();
        let bridge = edges.iter().find(|e| e["kind"] == "indirect").unwrap();
        assert_eq!(bridge["source"], "src");
        assert_eq!(bridge["target"], "dst");
        assert_eq!(bridge["relationship"], "loads");
        assert_eq!(bridge["via"], "mid");
        assert_eq!(bridge["via_relationship"], "reads");

        let direct = edges.iter().find(|e| e["kind"] == "direct").unwrap();
        assert!(direct.get("via").is_none());
    }

    #[test]
    fn test_json_export_filters() {
        let mut session = bridged_session();
        session.set_column_filter("parentTableType", ["Table"]);
        let parsed = export_value(&ExportData::from_session("x", &mut session));

        assert_eq!(parsed["view"]["filters"]["parentTableType"][0], "Table");
    }

    #[test]
    fn test_json_export_type_counts() {
        let parsed = export_value(&bridged_data());

        let types = parsed["node_types"].as_array().unwrap();
        let staging = types.iter().find(|t| t["node_type"] == "Staging").unwrap();
        assert_eq!(staging["total"], 1);
        assert_eq!(staging["visible"], 0);
        assert_eq!(staging["hidden"], false);
    }
}
