//! Lineage store implementation using petgraph.
//!
//! Holds the immutable source-of-truth edge list parsed from input rows,
//! the de-duplicated node set, and a directed adjacency structure used by
//! the visibility engine to find the edges around a node.

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::path::Path;

use tracing::{debug, warn};

use crate::parser::{self, ColumnMapping, LineageRow, LoadedRows, ParseResult};

/// A table (or any other lineage entity) in the graph.
///
/// The id is the node name; it is unique across the store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct LineageNode {
    /// Unique node name, used as the id
    pub id: String,
    /// Category label (e.g. "Table", "View")
    #[serde(rename = "type")]
    pub node_type: String,
}

impl LineageNode {
    /// Creates a new node.
    pub fn new(id: impl Into<String>, node_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            node_type: node_type.into(),
        }
    }
}

/// A directed `parent -> child` lineage edge.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct LineageEdge {
    /// Parent node id
    pub source: String,
    /// Child node id
    pub target: String,
    /// Relationship label
    pub relationship: String,
}

impl LineageEdge {
    /// Creates a new edge.
    pub fn new(
        source: impl Into<String>,
        target: impl Into<String>,
        relationship: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            relationship: relationship.into(),
        }
    }
}

/// A node name that appeared with more than one type.
///
/// The store keeps the first type it saw; later disagreeing rows are
/// recorded here so the ambiguity stays visible instead of being fixed
/// silently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeConflict {
    /// The node id
    pub node_id: String,
    /// The type the store kept (first occurrence)
    pub kept_type: String,
    /// The disagreeing type that was ignored
    pub ignored_type: String,
    /// Index of the row that carried the ignored type
    pub row: usize,
}

impl TypeConflict {
    /// Returns a human-readable description of the conflict.
    pub fn description(&self) -> String {
        format!(
            "{}: kept type '{}', ignored '{}' from row {}",
            self.node_id,
            self.kept_type,
            self.ignored_type,
            self.row + 1
        )
    }
}

/// The lineage store: rows, nodes and edges built once from input.
///
/// Edge `i` corresponds one-to-one with row `i`, and both keep input order.
/// Nodes keep first-seen order. The store is never mutated after it is
/// built.
///
/// # Example
///
/// ```rust
/// use lineagescope::graph::LineageStore;
/// use lineagescope::parser::LineageRow;
///
/// let store = LineageStore::build(vec![
///     LineageRow::edge("A", "owns", "B", "T"),
///     LineageRow::edge("B", "owns", "C", "T"),
/// ]);
///
/// assert_eq!(store.node_count(), 3);
/// assert_eq!(store.edge_count(), 2);
/// assert_eq!(store.children("A")[0].id, "B");
/// ```
#[derive(Debug, Clone)]
pub struct LineageStore {
    /// Node weights are nodes, edge weights are row indices
    graph: DiGraph<LineageNode, usize>,
    /// Maps node ids to their node indices for O(1) lookup
    node_indices: HashMap<String, NodeIndex>,
    edges: Vec<LineageEdge>,
    rows: Vec<LineageRow>,
    headers: Vec<String>,
    mapping: ColumnMapping,
    skipped_rows: usize,
    type_conflicts: Vec<TypeConflict>,
}

impl Default for LineageStore {
    fn default() -> Self {
        Self::build(Vec::new())
    }
}

impl LineageStore {
    /// Builds a store from rows using the default column mapping.
    pub fn build(rows: Vec<LineageRow>) -> Self {
        let mapping = ColumnMapping::default();
        let headers = mapping.required().iter().map(|s| s.to_string()).collect();
        Self::from_parts(rows, headers, mapping, 0)
    }

    /// Builds a store from the output of the loader.
    pub fn from_loaded(loaded: LoadedRows, mapping: ColumnMapping) -> Self {
        Self::from_parts(loaded.rows, loaded.headers, mapping, loaded.skipped_rows)
    }

    /// Loads and builds a store from a lineage file.
    pub fn load_file(path: &Path, mapping: ColumnMapping) -> ParseResult<Self> {
        let loaded = parser::parse_file(path, &mapping)?;
        Ok(Self::from_loaded(loaded, mapping))
    }

    /// Loads and builds a store from lineage text.
    pub fn load_str(content: &str, mapping: ColumnMapping) -> ParseResult<Self> {
        let loaded = parser::parse_str(content, &mapping)?;
        Ok(Self::from_loaded(loaded, mapping))
    }

    fn from_parts(
        rows: Vec<LineageRow>,
        headers: Vec<String>,
        mapping: ColumnMapping,
        skipped_rows: usize,
    ) -> Self {
        let mut store = Self {
            graph: DiGraph::with_capacity(rows.len(), rows.len()),
            node_indices: HashMap::with_capacity(rows.len()),
            edges: Vec::with_capacity(rows.len()),
            rows: Vec::new(),
            headers,
            mapping,
            skipped_rows,
            type_conflicts: Vec::new(),
        };

        for (row_idx, row) in rows.iter().enumerate() {
            let parent = store.register_node(&row.parent_name, &row.parent_type, row_idx);
            let child = store.register_node(&row.child_name, &row.child_type, row_idx);

            store.graph.add_edge(parent, child, row_idx);
            store.edges.push(LineageEdge::new(
                &row.parent_name,
                &row.child_name,
                &row.relationship,
            ));
        }

        store.rows = rows;

        debug!(
            nodes = store.node_count(),
            edges = store.edge_count(),
            type_conflicts = store.type_conflicts.len(),
            "built lineage store"
        );

        store
    }

    /// Returns the existing index for `id`, or adds the node.
    ///
    /// A name only ever carries the first type it was seen with.
    fn register_node(&mut self, id: &str, node_type: &str, row: usize) -> NodeIndex {
        if let Some(&idx) = self.node_indices.get(id) {
            let kept = &self.graph[idx].node_type;
            if kept != node_type {
                warn!(node = id, kept = %kept, ignored = node_type, "node seen with conflicting types");
                self.type_conflicts.push(TypeConflict {
                    node_id: id.to_string(),
                    kept_type: kept.clone(),
                    ignored_type: node_type.to_string(),
                    row,
                });
            }
            return idx;
        }

        let idx = self.graph.add_node(LineageNode::new(id, node_type));
        self.node_indices.insert(id.to_string(), idx);
        idx
    }

    /// Gets a node by id.
    pub fn node(&self, id: &str) -> Option<&LineageNode> {
        self.node_indices
            .get(id)
            .and_then(|&idx| self.graph.node_weight(idx))
    }

    /// Iterates nodes in first-seen order.
    pub fn nodes(&self) -> impl Iterator<Item = &LineageNode> {
        self.graph.node_weights()
    }

    /// All edges, in row order.
    pub fn edges(&self) -> &[LineageEdge] {
        &self.edges
    }

    /// All rows, in input order.
    pub fn rows(&self) -> &[LineageRow] {
        &self.rows
    }

    /// Header names of the source data.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// The column mapping the rows were read with.
    pub fn mapping(&self) -> &ColumnMapping {
        &self.mapping
    }

    /// Number of input lines rejected while loading.
    pub fn skipped_rows(&self) -> usize {
        self.skipped_rows
    }

    /// Names that appeared with more than one type.
    pub fn type_conflicts(&self) -> &[TypeConflict] {
        &self.type_conflicts
    }

    /// Returns the number of nodes.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Returns the number of edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Checks if the store holds no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Checks if a node exists.
    pub fn contains(&self, id: &str) -> bool {
        self.node_indices.contains_key(id)
    }

    /// Distinct node types in first-seen order.
    pub fn node_types(&self) -> Vec<&str> {
        first_seen(self.nodes().map(|n| n.node_type.as_str()))
    }

    /// Distinct relationship labels in first-seen order.
    pub fn relationship_types(&self) -> Vec<&str> {
        first_seen(self.edges.iter().map(|e| e.relationship.as_str()))
    }

    /// Nodes carrying the given type.
    pub fn nodes_of_type<'a>(&'a self, node_type: &'a str) -> impl Iterator<Item = &'a LineageNode> {
        self.nodes().filter(move |n| n.node_type == node_type)
    }

    /// Row indices of the edges pointing at `id`, ascending.
    pub fn incoming_edges(&self, id: &str) -> Vec<usize> {
        self.edge_indices(id, Direction::Incoming)
    }

    /// Row indices of the edges leaving `id`, ascending.
    pub fn outgoing_edges(&self, id: &str) -> Vec<usize> {
        self.edge_indices(id, Direction::Outgoing)
    }

    fn edge_indices(&self, id: &str, direction: Direction) -> Vec<usize> {
        let Some(&idx) = self.node_indices.get(id) else {
            return Vec::new();
        };

        // petgraph walks adjacency newest-first; callers rely on row order
        let mut indices: Vec<usize> = self
            .graph
            .edges_directed(idx, direction)
            .map(|edge| *edge.weight())
            .collect();
        indices.sort_unstable();
        indices
    }

    /// Gets the parents of a node (sources of its incoming edges).
    pub fn parents(&self, id: &str) -> Vec<&LineageNode> {
        let Some(&idx) = self.node_indices.get(id) else {
            return Vec::new();
        };

        self.graph
            .edges_directed(idx, Direction::Incoming)
            .filter_map(|edge| self.graph.node_weight(edge.source()))
            .collect()
    }

    /// Gets the children of a node (targets of its outgoing edges).
    pub fn children(&self, id: &str) -> Vec<&LineageNode> {
        let Some(&idx) = self.node_indices.get(id) else {
            return Vec::new();
        };

        self.graph
            .edges_directed(idx, Direction::Outgoing)
            .filter_map(|edge| self.graph.node_weight(edge.target()))
            .collect()
    }
}

fn first_seen<'a>(values: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut seen = HashSet::new();
    values.filter(|v| seen.insert(*v)).collect()
}
