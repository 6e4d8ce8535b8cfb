//! Row models for the explorer panes
//!
//! `Panes` is the terminal's [`RenderSurface`]: it receives each projected
//! frame and turns it, together with the session's control state, into
//! flat row lists the list widgets can draw.

use std::collections::HashMap;

use crate::graph::LineageNode;
use crate::projection::{parallel_offset, ProjectionFrame, RenderSurface, TypeCount, ViewStatus};
use crate::session::LineageSession;
use crate::visibility::{DerivedEdge, NodeVisibility, VisibleGraph};

/// A focusable pane of the explorer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pane {
    Nodes,
    Types,
    Relationships,
    Filters,
    Edges,
}

impl Pane {
    /// Panes in tab order
    pub const ALL: [Pane; 5] = [
        Pane::Nodes,
        Pane::Types,
        Pane::Relationships,
        Pane::Filters,
        Pane::Edges,
    ];

    pub fn next(self) -> Self {
        let i = Self::ALL.iter().position(|p| *p == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }

    pub fn previous(self) -> Self {
        let i = Self::ALL.iter().position(|p| *p == self).unwrap_or(0);
        Self::ALL[(i + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    pub fn title(self) -> &'static str {
        match self {
            Pane::Nodes => "Nodes",
            Pane::Types => "Node Types",
            Pane::Relationships => "Relationships",
            Pane::Filters => "Filters",
            Pane::Edges => "Edges",
        }
    }
}

/// One node of the store with its current state
#[derive(Debug, Clone, PartialEq)]
pub struct NodeRow {
    pub id: String,
    pub node_type: String,
    pub state: NodeVisibility,
    /// Whether the node is in the computed view
    pub in_view: bool,
}

/// One relationship label with its legend slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationshipRow {
    pub label: String,
    pub hidden: bool,
    pub slot: Option<usize>,
}

/// An entry of the filters pane: a column header or one of its options
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterRow {
    Column { column: String, summary: String },
    Value { column: String, value: String, selected: bool },
}

impl FilterRow {
    pub fn column(&self) -> &str {
        match self {
            FilterRow::Column { column, .. } | FilterRow::Value { column, .. } => column,
        }
    }
}

/// A rendered edge and its parallel offset
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeRow {
    pub edge: DerivedEdge,
    pub offset: f64,
}

/// Everything the panes draw, rebuilt after every projection
#[derive(Debug, Clone, Default)]
pub struct Panes {
    pub graph: VisibleGraph,
    pub status: ViewStatus,
    pub types: Vec<TypeCount>,
    pub edges: Vec<EdgeRow>,
    pub nodes: Vec<NodeRow>,
    pub relationships: Vec<RelationshipRow>,
    pub filters: Vec<FilterRow>,
    /// Nodes the layout has not positioned yet
    pub unplaced: usize,
    slots: HashMap<String, usize>,
}

impl RenderSurface for Panes {
    fn render(&mut self, frame: &ProjectionFrame<'_>) {
        let edges = frame.graph.edges();
        self.edges = edges
            .iter()
            .map(|edge| EdgeRow {
                edge: edge.clone(),
                offset: parallel_offset(edge, edges),
            })
            .collect();

        self.graph = frame.graph.clone();
        self.status = frame.status.clone();
        self.types = frame.type_counts.to_vec();
        self.unplaced = frame.placements.iter().filter(|p| p.position.is_none()).count();
        self.slots = frame
            .palette
            .labels()
            .iter()
            .filter_map(|label| Some((label.clone(), frame.palette.slot(label)?)))
            .collect();
    }
}

impl Panes {
    /// Rebuilds the control rows (nodes, relationships, filters) from the
    /// session, using the view captured by the last render.
    pub fn sync_controls(&mut self, session: &LineageSession) {
        let store = session.store();
        let view = session.view();

        self.nodes = store
            .nodes()
            .map(|node| NodeRow {
                id: node.id.clone(),
                node_type: node.node_type.clone(),
                state: view.node_visibility(node),
                in_view: self.graph.contains_node(&node.id),
            })
            .collect();

        self.relationships = store
            .relationship_types()
            .into_iter()
            .map(|label| RelationshipRow {
                label: label.to_string(),
                hidden: view.is_relationship_hidden(label),
                slot: self.slots.get(label).copied(),
            })
            .collect();

        let filter = session.filter();
        self.filters.clear();
        for column in filter.columns() {
            let Some(selection) = filter.selection(column) else {
                continue;
            };
            self.filters.push(FilterRow::Column {
                column: column.clone(),
                summary: selection.summary(),
            });
            // Selected values narrowed out by other columns stay listed so
            // they can still be unchecked.
            let mut values = session.options_for(column);
            let narrowed: Vec<String> = selection
                .selected
                .iter()
                .filter(|value| !values.contains(*value))
                .cloned()
                .collect();
            values.extend(narrowed);

            for value in values {
                let selected = selection.is_selected(&value);
                self.filters.push(FilterRow::Value {
                    column: column.clone(),
                    value,
                    selected,
                });
            }
        }
    }

    /// Number of rows in a pane
    pub fn len(&self, pane: Pane) -> usize {
        match pane {
            Pane::Nodes => self.nodes.len(),
            Pane::Types => self.types.len(),
            Pane::Relationships => self.relationships.len(),
            Pane::Filters => self.filters.len(),
            Pane::Edges => self.edges.len(),
        }
    }

    /// Tooltip text for a node: its direct parents and children in view
    pub fn neighbour_summary(&self, id: &str) -> Option<String> {
        if !self.graph.contains_node(id) {
            return None;
        }

        let names = |nodes: Vec<&LineageNode>| {
            let mut ids: Vec<&str> = Vec::new();
            for node in nodes {
                if !ids.contains(&node.id.as_str()) {
                    ids.push(&node.id);
                }
            }
            if ids.is_empty() {
                "none".to_string()
            } else {
                ids.join(", ")
            }
        };

        Some(format!(
            "Parents: {}  Children: {}",
            names(self.graph.parents(id)),
            names(self.graph.children(id))
        ))
    }
}
