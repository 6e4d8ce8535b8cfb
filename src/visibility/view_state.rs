//! Explicit hide-sets and the per-node visibility state machine.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::graph::{LineageNode, LineageStore};

/// Why a node is (not) shown, as far as the hide-sets are concerned.
///
/// Column filtering is a separate axis; a node can be `Visible` here and
/// still be absent from a computed view because none of its rows are
/// admitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum NodeVisibility {
    /// Neither the node nor its type is hidden
    Visible,
    /// Only the node's type is hidden
    HiddenByType,
    /// Only the node itself is hidden
    HiddenIndividual,
    /// Both the node and its type are hidden
    HiddenBoth,
}

impl NodeVisibility {
    /// Returns true for [`NodeVisibility::Visible`].
    pub fn is_visible(&self) -> bool {
        matches!(self, NodeVisibility::Visible)
    }

    /// Short marker used in list views.
    pub fn indicator(&self) -> &'static str {
        match self {
            NodeVisibility::Visible => "[ ]",
            NodeVisibility::HiddenByType => "[t]",
            NodeVisibility::HiddenIndividual => "[x]",
            NodeVisibility::HiddenBoth => "[X]",
        }
    }
}

impl fmt::Display for NodeVisibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            NodeVisibility::Visible => "visible",
            NodeVisibility::HiddenByType => "hidden-by-type",
            NodeVisibility::HiddenIndividual => "hidden-individual",
            NodeVisibility::HiddenBoth => "hidden-both",
        };
        write!(f, "{}", s)
    }
}

/// The three independent hide-sets a user controls.
///
/// A node is hidden if its id is in `hidden_node_ids` OR its type is in
/// `hidden_node_types`. Relationship hiding only affects edges.
///
/// # Example
///
/// ```rust
/// use lineagescope::graph::LineageStore;
/// use lineagescope::parser::LineageRow;
/// use lineagescope::visibility::{NodeVisibility, ViewState};
///
/// let store = LineageStore::build(vec![LineageRow::edge("A", "owns", "B", "T")]);
/// let mut view = ViewState::default();
///
/// view.toggle_node_type(&store, "T");
/// view.toggle_node("A");
/// assert_eq!(view.node_visibility(store.node("A").unwrap()), NodeVisibility::HiddenBoth);
///
/// // Showing the type also clears individual hides of its members
/// view.toggle_node_type(&store, "T");
/// assert_eq!(view.node_visibility(store.node("A").unwrap()), NodeVisibility::Visible);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewState {
    /// Individually hidden node ids
    pub hidden_node_ids: BTreeSet<String>,
    /// Hidden node type labels
    pub hidden_node_types: BTreeSet<String>,
    /// Hidden relationship labels
    pub hidden_relationships: BTreeSet<String>,
}

impl ViewState {
    /// Creates a view state with nothing hidden.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the hide-set state of a node.
    pub fn node_visibility(&self, node: &LineageNode) -> NodeVisibility {
        let by_type = self.hidden_node_types.contains(&node.node_type);
        let individual = self.hidden_node_ids.contains(&node.id);

        match (by_type, individual) {
            (false, false) => NodeVisibility::Visible,
            (true, false) => NodeVisibility::HiddenByType,
            (false, true) => NodeVisibility::HiddenIndividual,
            (true, true) => NodeVisibility::HiddenBoth,
        }
    }

    /// Returns true if any hide-set hides the node.
    pub fn is_node_hidden(&self, node: &LineageNode) -> bool {
        !self.node_visibility(node).is_visible()
    }

    /// Returns true if edges with this label are hidden.
    pub fn is_relationship_hidden(&self, relationship: &str) -> bool {
        self.hidden_relationships.contains(relationship)
    }

    /// Flips a node's membership in the individual hide-set.
    ///
    /// Type hiding is untouched. Returns `true` if the node is now in the
    /// individual hide-set.
    pub fn toggle_node(&mut self, id: &str) -> bool {
        if self.hidden_node_ids.remove(id) {
            false
        } else {
            self.hidden_node_ids.insert(id.to_string());
            true
        }
    }

    /// Flips a node type's membership in the type hide-set.
    ///
    /// Hiding a type leaves individual flags alone. Showing a type also
    /// clears the individual flag of every node of that type. Returns
    /// `true` if the type is now hidden.
    pub fn toggle_node_type(&mut self, store: &LineageStore, node_type: &str) -> bool {
        if self.hidden_node_types.remove(node_type) {
            for node in store.nodes_of_type(node_type) {
                self.hidden_node_ids.remove(&node.id);
            }
            false
        } else {
            self.hidden_node_types.insert(node_type.to_string());
            true
        }
    }

    /// Flips a relationship label's membership in the relationship
    /// hide-set. Returns `true` if the label is now hidden.
    pub fn toggle_relationship(&mut self, relationship: &str) -> bool {
        if self.hidden_relationships.remove(relationship) {
            false
        } else {
            self.hidden_relationships.insert(relationship.to_string());
            true
        }
    }

    /// Empties all three hide-sets.
    pub fn clear(&mut self) {
        self.hidden_node_ids.clear();
        self.hidden_node_types.clear();
        self.hidden_relationships.clear();
    }

    /// Returns true if nothing is hidden.
    pub fn is_clear(&self) -> bool {
        self.hidden_node_ids.is_empty()
            && self.hidden_node_types.is_empty()
            && self.hidden_relationships.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::LineageRow;

    fn create_test_store() -> LineageStore {
        LineageStore::build(vec![
            LineageRow::new("v1", "View", "reads", "t1", "Table"),
            LineageRow::new("v2", "View", "reads", "t1", "Table"),
        ])
    }

    #[test]
    fn test_default_is_clear() {
        let view = ViewState::new();
        assert!(view.is_clear());
    }

    #[test]
    fn test_four_states() {
        let store = create_test_store();
        let v1 = store.node("v1").unwrap();
        let mut view = ViewState::new();

        assert_eq!(view.node_visibility(v1), NodeVisibility::Visible);

        view.toggle_node("v1");
        assert_eq!(view.node_visibility(v1), NodeVisibility::HiddenIndividual);

        view.toggle_node_type(&store, "View");
        assert_eq!(view.node_visibility(v1), NodeVisibility::HiddenBoth);

        view.toggle_node("v1");
        assert_eq!(view.node_visibility(v1), NodeVisibility::HiddenByType);
    }

    #[test]
    fn test_toggle_node_flips_only_individual_set() {
        let store = create_test_store();
        let mut view = ViewState::new();

        view.toggle_node_type(&store, "View");
        // Hidden by type only: toggling adds the individual flag
        assert!(view.toggle_node("v1"));
        assert!(view.hidden_node_ids.contains("v1"));
        assert!(view.hidden_node_types.contains("View"));

        assert!(!view.toggle_node("v1"));
        assert!(view.hidden_node_ids.is_empty());
    }

    #[test]
    fn test_hiding_type_keeps_individual_flags() {
        let store = create_test_store();
        let mut view = ViewState::new();

        view.toggle_node("v1");
        assert!(view.toggle_node_type(&store, "View"));
        assert!(view.hidden_node_ids.contains("v1"));
    }

    #[test]
    fn test_showing_type_clears_individual_flags_of_that_type() {
        let store = create_test_store();
        let mut view = ViewState::new();

        view.toggle_node("v1");
        view.toggle_node("t1");
        view.toggle_node_type(&store, "View");
        assert!(!view.toggle_node_type(&store, "View"));

        assert!(!view.hidden_node_ids.contains("v1"));
        // Other types keep their flags
        assert!(view.hidden_node_ids.contains("t1"));
    }

    #[test]
    fn test_toggle_relationship() {
        let mut view = ViewState::new();
        assert!(view.toggle_relationship("reads"));
        assert!(view.is_relationship_hidden("reads"));
        assert!(!view.toggle_relationship("reads"));
        assert!(!view.is_relationship_hidden("reads"));
    }

    #[test]
    fn test_clear() {
        let store = create_test_store();
        let mut view = ViewState::new();
        view.toggle_node("v1");
        view.toggle_node_type(&store, "Table");
        view.toggle_relationship("reads");

        view.clear();
        assert!(view.is_clear());
    }

    #[test]
    fn test_visibility_display() {
        assert_eq!(NodeVisibility::Visible.to_string(), "visible");
        assert_eq!(NodeVisibility::HiddenByType.to_string(), "hidden-by-type");
        assert_eq!(NodeVisibility::HiddenIndividual.to_string(), "hidden-individual");
        assert_eq!(NodeVisibility::HiddenBoth.to_string(), "hidden-both");
    }
}
