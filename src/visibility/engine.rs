//! The visibility engine.
//!
//! Given the lineage store, the column filters and the hide-sets, computes
//! the exact set of nodes to show and the edges to draw between them,
//! including indirect edges that bridge around a single hidden node.
//!
//! The computation is a pure function of its inputs; every mutation of
//! the filter or the hide-sets is followed by a full recompute.

use serde::Serialize;
use std::collections::HashSet;

use tracing::debug;

use super::view_state::ViewState;
use crate::filter::FilterState;
use crate::graph::{LineageEdge, LineageNode, LineageStore};

/// How a rendered edge came to be.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EdgeKind {
    /// One admitted row between two visible nodes
    Direct,
    /// Synthesized across exactly one hidden intermediate node
    Indirect {
        /// The hidden node the edge bridges around
        via: String,
        /// Relationship label of the hidden node's outgoing edge
        via_relationship: String,
    },
}

/// An edge of the computed view.
///
/// Edges are individually addressable by `(source, target, relationship)`;
/// no two edges of one view share that triple.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct DerivedEdge {
    /// Parent node id
    pub source: String,
    /// Child node id
    pub target: String,
    /// Relationship label (for indirect edges, the incoming edge's label)
    pub relationship: String,
    /// Direct or indirect
    #[serde(flatten)]
    pub kind: EdgeKind,
}

impl DerivedEdge {
    /// Creates a direct edge from a lineage edge.
    pub fn direct(edge: &LineageEdge) -> Self {
        Self {
            source: edge.source.clone(),
            target: edge.target.clone(),
            relationship: edge.relationship.clone(),
            kind: EdgeKind::Direct,
        }
    }

    /// Creates an indirect edge `incoming.source -> outgoing.target`.
    pub fn indirect(incoming: &LineageEdge, outgoing: &LineageEdge, via: &str) -> Self {
        Self {
            source: incoming.source.clone(),
            target: outgoing.target.clone(),
            relationship: incoming.relationship.clone(),
            kind: EdgeKind::Indirect {
                via: via.to_string(),
                via_relationship: outgoing.relationship.clone(),
            },
        }
    }

    /// The identity triple of the edge.
    pub fn key(&self) -> (&str, &str, &str) {
        (&self.source, &self.target, &self.relationship)
    }

    /// Returns true for direct edges.
    pub fn is_direct(&self) -> bool {
        self.kind == EdgeKind::Direct
    }

    /// The hidden intermediate of an indirect edge.
    pub fn via(&self) -> Option<&str> {
        match &self.kind {
            EdgeKind::Direct => None,
            EdgeKind::Indirect { via, .. } => Some(via),
        }
    }

    /// The outgoing label on the far side of the hidden intermediate.
    pub fn via_relationship(&self) -> Option<&str> {
        match &self.kind {
            EdgeKind::Direct => None,
            EdgeKind::Indirect {
                via_relationship, ..
            } => Some(via_relationship),
        }
    }

    /// Returns true if the edge joins `a` and `b` in either direction.
    pub fn connects(&self, a: &str, b: &str) -> bool {
        (self.source == a && self.target == b) || (self.source == b && self.target == a)
    }
}

/// The output of one recompute: visible nodes and the edges to render.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VisibleGraph {
    nodes: Vec<LineageNode>,
    edges: Vec<DerivedEdge>,
    #[serde(skip)]
    admitted_rows: usize,
}

impl VisibleGraph {
    /// Visible nodes, in store order.
    pub fn nodes(&self) -> &[LineageNode] {
        &self.nodes
    }

    /// Edges to render: direct edges in row order, then indirect edges.
    pub fn edges(&self) -> &[DerivedEdge] {
        &self.edges
    }

    /// Number of rows that passed the column filters.
    pub fn admitted_rows(&self) -> usize {
        self.admitted_rows
    }

    /// Returns the number of visible nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the number of rendered edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Returns the number of direct edges.
    pub fn direct_count(&self) -> usize {
        self.edges.iter().filter(|e| e.is_direct()).count()
    }

    /// Returns the number of indirect edges.
    pub fn indirect_count(&self) -> usize {
        self.edges.iter().filter(|e| !e.is_direct()).count()
    }

    /// Checks if the view contains no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Checks if a node is visible.
    pub fn contains_node(&self, id: &str) -> bool {
        self.nodes.iter().any(|n| n.id == id)
    }

    /// Looks up an edge by its identity triple.
    pub fn edge(&self, source: &str, target: &str, relationship: &str) -> Option<&DerivedEdge> {
        self.edges
            .iter()
            .find(|e| e.key() == (source, target, relationship))
    }

    /// All edges joining `a` and `b`, in either direction.
    pub fn edges_between<'a>(&'a self, a: &'a str, b: &'a str) -> impl Iterator<Item = &'a DerivedEdge> {
        self.edges.iter().filter(move |e| e.connects(a, b))
    }

    /// Direct parents of a visible node.
    pub fn parents(&self, id: &str) -> Vec<&LineageNode> {
        self.edges
            .iter()
            .filter(|e| e.is_direct() && e.target == id)
            .filter_map(|e| self.nodes.iter().find(|n| n.id == e.source))
            .collect()
    }

    /// Direct children of a visible node.
    pub fn children(&self, id: &str) -> Vec<&LineageNode> {
        self.edges
            .iter()
            .filter(|e| e.is_direct() && e.source == id)
            .filter_map(|e| self.nodes.iter().find(|n| n.id == e.target))
            .collect()
    }
}

/// Computes the visible nodes and rendered edges.
///
/// 1. Rows are admitted by the column filters.
/// 2. A node is visible if it is an endpoint of an admitted row and no
///    hide-set hides it.
/// 3. Each admitted row with a shown relationship between two visible
///    nodes yields a direct edge.
/// 4. Each node that is an endpoint of an admitted row but is not visible
///    is a bridge point: every pair of admitted, shown incoming `x -> h`
///    and outgoing `h -> y` edges with `x` and `y` visible yields an
///    indirect edge `x -> y`. Bridging is single-hop only; a chain of two
///    hidden nodes is not bridged.
///
/// Edges are de-duplicated by `(source, target, relationship)`, keeping
/// the first.
///
/// # Example
///
/// ```rust
/// use lineagescope::filter::FilterState;
/// use lineagescope::graph::LineageStore;
/// use lineagescope::parser::LineageRow;
/// use lineagescope::visibility::{compute_visibility, ViewState};
///
/// let store = LineageStore::build(vec![
///     LineageRow::edge("A", "owns", "B", "T"),
///     LineageRow::edge("B", "owns", "C", "T"),
/// ]);
/// let filter = FilterState::new(&store);
/// let mut view = ViewState::default();
/// view.toggle_node("B");
///
/// let graph = compute_visibility(&store, &filter, &view);
/// assert_eq!(graph.node_count(), 2);
///
/// let bridge = graph.edge("A", "C", "owns").unwrap();
/// assert_eq!(bridge.via(), Some("B"));
/// ```
pub fn compute_visibility(
    store: &LineageStore,
    filter: &FilterState,
    view: &ViewState,
) -> VisibleGraph {
    let edges = store.edges();

    let admitted: Vec<bool> = store
        .rows()
        .iter()
        .map(|row| filter.is_row_admitted(row))
        .collect();

    let endpoints: HashSet<&str> = edges
        .iter()
        .zip(&admitted)
        .filter(|(_, ok)| **ok)
        .flat_map(|(e, _)| [e.source.as_str(), e.target.as_str()])
        .collect();

    let visible: HashSet<&str> = store
        .nodes()
        .filter(|n| endpoints.contains(n.id.as_str()) && !view.is_node_hidden(n))
        .map(|n| n.id.as_str())
        .collect();

    let shown =
        |idx: usize| admitted[idx] && !view.is_relationship_hidden(&edges[idx].relationship);

    let mut seen: HashSet<(&str, &str, &str)> = HashSet::new();
    let mut rendered = Vec::new();

    for (idx, edge) in edges.iter().enumerate() {
        if !shown(idx) {
            continue;
        }
        let (source, target) = (edge.source.as_str(), edge.target.as_str());
        // An endpoint absent from the node set is never in `visible`
        if visible.contains(source)
            && visible.contains(target)
            && seen.insert((source, target, edge.relationship.as_str()))
        {
            rendered.push(DerivedEdge::direct(edge));
        }
    }
    let direct = rendered.len();

    for hidden in store.nodes() {
        let id = hidden.id.as_str();
        if !endpoints.contains(id) || visible.contains(id) {
            continue;
        }

        let incoming: Vec<&LineageEdge> = store
            .incoming_edges(id)
            .into_iter()
            .filter(|&idx| shown(idx))
            .map(|idx| &edges[idx])
            .filter(|e| visible.contains(e.source.as_str()))
            .collect();
        if incoming.is_empty() {
            continue;
        }

        let outgoing: Vec<&LineageEdge> = store
            .outgoing_edges(id)
            .into_iter()
            .filter(|&idx| shown(idx))
            .map(|idx| &edges[idx])
            .filter(|e| visible.contains(e.target.as_str()))
            .collect();

        for inc in &incoming {
            for out in &outgoing {
                let key = (
                    inc.source.as_str(),
                    out.target.as_str(),
                    inc.relationship.as_str(),
                );
                if seen.insert(key) {
                    rendered.push(DerivedEdge::indirect(inc, out, id));
                }
            }
        }
    }

    let nodes: Vec<LineageNode> = store
        .nodes()
        .filter(|n| visible.contains(n.id.as_str()))
        .cloned()
        .collect();

    let admitted_rows = admitted.iter().filter(|&&ok| ok).count();

    debug!(
        admitted = admitted_rows,
        nodes = nodes.len(),
        direct,
        indirect = rendered.len() - direct,
        "recomputed visibility"
    );

    VisibleGraph {
        nodes,
        edges: rendered,
        admitted_rows,
    }
}
