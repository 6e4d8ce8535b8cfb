//! An explicitly owned lineage session.
//!
//! The session owns the immutable store and the only mutable inputs: the
//! column filters and the hide-sets. Every mutation drops the memoized
//! view; the next read recomputes it in full.

use tracing::debug;

use crate::filter::FilterState;
use crate::graph::LineageStore;
use crate::projection::{type_counts, TypeCount, ViewStatus};
use crate::visibility::{compute_visibility, NodeVisibility, ViewState, VisibleGraph};

/// Store, filters and hide-sets of one interactive session.
///
/// # Example
///
/// ```rust
/// use lineagescope::graph::LineageStore;
/// use lineagescope::parser::LineageRow;
/// use lineagescope::session::LineageSession;
///
/// let mut session = LineageSession::new(LineageStore::build(vec![
///     LineageRow::edge("A", "owns", "B", "T"),
///     LineageRow::edge("B", "owns", "C", "T"),
/// ]));
///
/// session.toggle_node_individual("B");
/// assert_eq!(session.visible().node_count(), 2);
///
/// session.reset_all();
/// assert_eq!(session.visible().node_count(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct LineageSession {
    store: LineageStore,
    filter: FilterState,
    view: ViewState,
    cached: Option<VisibleGraph>,
}

impl LineageSession {
    /// Starts a session with no filters and nothing hidden.
    pub fn new(store: LineageStore) -> Self {
        Self::with_view(store, ViewState::default())
    }

    /// Starts a session with initial hide-sets.
    pub fn with_view(store: LineageStore, view: ViewState) -> Self {
        let filter = FilterState::new(&store);
        Self {
            store,
            filter,
            view,
            cached: None,
        }
    }

    /// The loaded rows and node set.
    pub fn store(&self) -> &LineageStore {
        &self.store
    }

    /// Per-column selections.
    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    /// Hidden nodes, node types and relationship labels.
    pub fn view(&self) -> &ViewState {
        &self.view
    }

    /// The current view, recomputed only after a mutation.
    pub fn visible(&mut self) -> &VisibleGraph {
        self.parts().2
    }

    /// Borrows the store and hide-sets alongside the memoized view.
    fn parts(&mut self) -> (&LineageStore, &ViewState, &VisibleGraph) {
        let Self {
            store,
            filter,
            view,
            cached,
        } = self;
        let (store, filter, view) = (&*store, &*filter, &*view);
        let graph = cached.get_or_insert_with(|| compute_visibility(store, filter, view));
        (store, view, graph)
    }

    /// Computes the current view without touching the memo.
    pub fn compute(&self) -> VisibleGraph {
        compute_visibility(&self.store, &self.filter, &self.view)
    }

    fn invalidate(&mut self, changed: bool) -> bool {
        if changed {
            self.cached = None;
        }
        changed
    }

    /// Replaces a column's selection. An empty list lifts the constraint.
    pub fn set_column_filter<I, S>(&mut self, column: &str, values: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let changed = self.filter.set_selection(column, values);
        debug!(column, changed, "set column filter");
        self.invalidate(changed)
    }

    /// Includes or excludes one value of a column.
    pub fn set_filter_value(&mut self, column: &str, value: &str, included: bool) -> bool {
        let changed = self.filter.set_selected(column, value, included);
        self.invalidate(changed)
    }

    /// Selects every option of a column, or clears it.
    pub fn select_all(&mut self, column: &str, included: bool) -> bool {
        let changed = self.filter.select_all(column, included);
        self.invalidate(changed)
    }

    /// Options of a column narrowed by every other column's selection.
    pub fn options_for(&self, column: &str) -> Vec<String> {
        self.filter.options_for(column, self.store.rows())
    }

    /// Flips a node's individual hide flag.
    ///
    /// Returns the node's new state, or `None` for an unknown id.
    pub fn toggle_node_individual(&mut self, id: &str) -> Option<NodeVisibility> {
        if !self.store.contains(id) {
            debug!(node = id, "ignoring toggle of unknown node");
            return None;
        }
        self.view.toggle_node(id);
        self.invalidate(true);
        self.node_state(id)
    }

    /// Flips a node type's hide flag; showing a type also clears the
    /// individual flags of its members. Returns `true` if now hidden.
    pub fn toggle_node_type(&mut self, node_type: &str) -> bool {
        let hidden = self.view.toggle_node_type(&self.store, node_type);
        debug!(node_type, hidden, "toggled node type");
        self.invalidate(true);
        hidden
    }

    /// Flips a relationship label's hide flag. Returns `true` if now hidden.
    pub fn toggle_relationship_type(&mut self, relationship: &str) -> bool {
        let hidden = self.view.toggle_relationship(relationship);
        debug!(relationship, hidden, "toggled relationship");
        self.invalidate(true);
        hidden
    }

    /// Clears every hide-set and every column selection.
    pub fn reset_all(&mut self) {
        self.view.clear();
        self.filter.clear();
        self.invalidate(true);
    }

    /// Hide-set state of a node, `None` for an unknown id.
    pub fn node_state(&self, id: &str) -> Option<NodeVisibility> {
        self.store.node(id).map(|n| self.view.node_visibility(n))
    }

    /// Status bar counts of the current view.
    pub fn status(&mut self) -> ViewStatus {
        let (store, _, graph) = self.parts();
        ViewStatus::new(store, graph)
    }

    /// Per-type visible/total counts of the current view.
    pub fn type_counts(&mut self) -> Vec<TypeCount> {
        let (store, view, graph) = self.parts();
        type_counts(store, view, graph)
    }
}
