//! Legend, status and per-type counts for the controls around the graph.

use serde::Serialize;

use crate::graph::LineageStore;
use crate::visibility::{ViewState, VisibleGraph};

/// Number of distinct relationship style classes before they repeat.
pub const PALETTE_SIZE: usize = 10;

/// Maps relationship labels to style slots in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct RelationshipPalette {
    labels: Vec<String>,
}

impl RelationshipPalette {
    /// Builds the palette from every relationship label in the store.
    pub fn new(store: &LineageStore) -> Self {
        Self {
            labels: store
                .relationship_types()
                .into_iter()
                .map(str::to_string)
                .collect(),
        }
    }

    /// Style slot of a label, cycling through [`PALETTE_SIZE`] slots.
    pub fn slot(&self, relationship: &str) -> Option<usize> {
        self.labels
            .iter()
            .position(|l| l == relationship)
            .map(|i| i % PALETTE_SIZE)
    }

    /// Style class name of a label, e.g. `relationship-3`.
    pub fn class_for(&self, relationship: &str) -> Option<String> {
        self.slot(relationship)
            .map(|slot| format!("relationship-{}", slot))
    }

    /// Labels in legend order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }
}

/// Visible/hidden node counts for a status bar.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ViewStatus {
    pub total_nodes: usize,
    pub visible_nodes: usize,
    pub hidden_nodes: usize,
    /// Names of nodes not in the view, in store order
    pub hidden_names: Vec<String>,
    pub direct_edges: usize,
    pub indirect_edges: usize,
    pub skipped_rows: usize,
}

impl ViewStatus {
    pub fn new(store: &LineageStore, graph: &VisibleGraph) -> Self {
        let hidden_names: Vec<String> = store
            .nodes()
            .filter(|n| !graph.contains_node(&n.id))
            .map(|n| n.id.clone())
            .collect();

        Self {
            total_nodes: store.node_count(),
            visible_nodes: graph.node_count(),
            hidden_nodes: hidden_names.len(),
            hidden_names,
            direct_edges: graph.direct_count(),
            indirect_edges: graph.indirect_count(),
            skipped_rows: store.skipped_rows(),
        }
    }

    /// The hidden list as one line, `None` when nothing is hidden.
    pub fn hidden_list(&self) -> String {
        if self.hidden_names.is_empty() {
            "None".to_string()
        } else {
            self.hidden_names.join(", ")
        }
    }
}

/// Membership counts of one node type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeCount {
    pub node_type: String,
    pub total: usize,
    pub visible: usize,
    /// Whether the type itself is in the hide-set
    pub hidden: bool,
}

impl TypeCount {
    /// Control text, e.g. `Hide All Tables (2/3 visible)`.
    pub fn label(&self) -> String {
        if self.hidden {
            format!(
                "Show All {}s ({}/{} hidden)",
                self.node_type,
                self.total - self.visible,
                self.total
            )
        } else {
            format!(
                "Hide All {}s ({}/{} visible)",
                self.node_type, self.visible, self.total
            )
        }
    }
}

/// Counts every node type of the store against the current view.
pub fn type_counts(store: &LineageStore, view: &ViewState, graph: &VisibleGraph) -> Vec<TypeCount> {
    store
        .node_types()
        .into_iter()
        .map(|node_type| {
            let members: Vec<_> = store.nodes_of_type(node_type).collect();
            TypeCount {
                node_type: node_type.to_string(),
                total: members.len(),
                visible: members.iter().filter(|n| graph.contains_node(&n.id)).count(),
                hidden: view.hidden_node_types.contains(node_type),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::FilterState;
    use crate::parser::LineageRow;
    use crate::visibility::compute_visibility;

    fn create_test_store() -> LineageStore {
        LineageStore::build(vec![
            LineageRow::new("v1", "View", "reads", "t1", "Table"),
            LineageRow::new("v2", "View", "writes", "t1", "Table"),
            LineageRow::new("t2", "Table", "copies", "t1", "Table"),
        ])
    }

    #[test]
    fn test_palette_slots_first_seen() {
        let store = create_test_store();
        let palette = RelationshipPalette::new(&store);

        assert_eq!(palette.labels(), &["reads", "writes", "copies"]);
        assert_eq!(palette.slot("writes"), Some(1));
        assert_eq!(palette.class_for("copies").as_deref(), Some("relationship-2"));
        assert_eq!(palette.slot("unknown"), None);
    }

    #[test]
    fn test_palette_wraps() {
        let rows = (0..12)
            .map(|i| LineageRow::edge("a", format!("rel{}", i), "b", "T"))
            .collect();
        let palette = RelationshipPalette::new(&LineageStore::build(rows));
        assert_eq!(palette.slot("rel10"), Some(0));
        assert_eq!(palette.slot("rel11"), Some(1));
    }

    #[test]
    fn test_status_counts() {
        let store = create_test_store();
        let mut view = ViewState::default();
        view.toggle_node("v2");
        let graph = compute_visibility(&store, &FilterState::new(&store), &view);

        let status = ViewStatus::new(&store, &graph);
        assert_eq!(status.total_nodes, 4);
        assert_eq!(status.visible_nodes, 3);
        assert_eq!(status.hidden_nodes, 1);
        assert_eq!(status.hidden_list(), "v2");
        assert_eq!(status.direct_edges, 2);
    }

    #[test]
    fn test_status_nothing_hidden() {
        let store = create_test_store();
        let graph = compute_visibility(&store, &FilterState::new(&store), &ViewState::default());
        assert_eq!(ViewStatus::new(&store, &graph).hidden_list(), "None");
    }

    #[test]
    fn test_type_counts_and_labels() {
        let store = create_test_store();
        let mut view = ViewState::default();
        view.toggle_node_type(&store, "View");
        view.toggle_node("t2");
        let graph = compute_visibility(&store, &FilterState::new(&store), &view);

        let counts = type_counts(&store, &view, &graph);
        assert_eq!(counts.len(), 2);

        let tables = &counts[0];
        assert_eq!(tables.node_type, "Table");
        assert_eq!((tables.total, tables.visible, tables.hidden), (2, 1, false));
        assert_eq!(tables.label(), "Hide All Tables (1/2 visible)");

        let views = &counts[1];
        assert_eq!(views.label(), "Show All Views (2/2 hidden)");
    }
}
