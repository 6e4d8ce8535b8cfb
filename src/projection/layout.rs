//! Position continuity and parallel-edge offsets.
//!
//! The force simulation itself lives outside this crate. What lives here
//! is the bookkeeping that keeps the picture stable across recomputes:
//! positions keyed by node id, remembered positions for nodes that left
//! and came back, and a stable offset for edges sharing a node pair.

use serde::Serialize;
use std::collections::{HashMap, HashSet};

use crate::visibility::{DerivedEdge, VisibleGraph};

/// Spacing between parallel edges of one node pair.
pub const PARALLEL_EDGE_STEP: f64 = 8.0;

/// A 2D position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Where a visible node should be drawn after a recompute.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Placement {
    /// Node id
    pub id: String,
    /// Known position, `None` for a node the layout has never placed
    pub position: Option<Point>,
    /// Whether the layout must keep the node fixed
    pub pinned: bool,
}

/// Remembers node positions across recomputes.
///
/// # Example
///
/// ```rust
/// use lineagescope::projection::{Point, PositionCache};
///
/// let mut cache = PositionCache::new();
/// cache.set_position("A", Point::new(10.0, 20.0));
/// assert_eq!(cache.position("A"), Some(Point::new(10.0, 20.0)));
/// ```
#[derive(Debug, Clone, Default)]
pub struct PositionCache {
    current: HashMap<String, Point>,
    remembered: HashMap<String, Point>,
    pinned: HashSet<String>,
}

impl PositionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a position reported by the layout for an on-screen node.
    pub fn set_position(&mut self, id: &str, point: Point) {
        self.current.insert(id.to_string(), point);
    }

    /// Fixes a node where the user dropped it.
    pub fn pin(&mut self, id: &str, point: Point) {
        self.current.insert(id.to_string(), point);
        self.remembered.insert(id.to_string(), point);
        self.pinned.insert(id.to_string());
    }

    /// Releases a pinned node.
    pub fn unpin(&mut self, id: &str) -> bool {
        self.pinned.remove(id)
    }

    /// The current position of an on-screen node.
    pub fn position(&self, id: &str) -> Option<Point> {
        self.current.get(id).copied()
    }

    /// Returns true if the node is pinned.
    pub fn is_pinned(&self, id: &str) -> bool {
        self.pinned.contains(id)
    }

    /// Reconciles the cache with a freshly computed view.
    ///
    /// Nodes that stayed keep their position. Nodes that left are moved to
    /// the remembered set. Nodes that come back are restored to their
    /// remembered position and pinned there. Brand-new nodes are unplaced.
    pub fn sync(&mut self, graph: &VisibleGraph) -> Vec<Placement> {
        let visible: HashSet<&str> = graph.nodes().iter().map(|n| n.id.as_str()).collect();

        let departed: Vec<String> = self
            .current
            .keys()
            .filter(|id| !visible.contains(id.as_str()))
            .cloned()
            .collect();
        for id in departed {
            if let Some(point) = self.current.remove(&id) {
                self.remembered.insert(id, point);
            }
        }

        graph
            .nodes()
            .iter()
            .map(|node| {
                let mut position = self.current.get(&node.id).copied();
                if position.is_none() {
                    if let Some(&point) = self.remembered.get(&node.id) {
                        self.current.insert(node.id.clone(), point);
                        self.pinned.insert(node.id.clone());
                        position = Some(point);
                    }
                }

                Placement {
                    id: node.id.clone(),
                    position,
                    pinned: self.pinned.contains(&node.id),
                }
            })
            .collect()
    }
}

/// Returns true if any placement still needs the layout to position it.
pub fn needs_layout(placements: &[Placement]) -> bool {
    placements.iter().any(|p| p.position.is_none())
}

/// Perpendicular offset for an edge that shares its node pair.
///
/// All edges joining the same two nodes (either direction) are sorted by
/// relationship label; edge `i` of `n` gets
/// `-(n - 1) * step / 2 + i * step`. A lone edge gets `0.0`.
///
/// # Example
///
/// ```rust
/// use lineagescope::graph::LineageEdge;
/// use lineagescope::projection::parallel_offset;
/// use lineagescope::visibility::DerivedEdge;
///
/// let edges = vec![
///     DerivedEdge::direct(&LineageEdge::new("A", "B", "writes")),
///     DerivedEdge::direct(&LineageEdge::new("A", "B", "reads")),
/// ];
/// assert_eq!(parallel_offset(&edges[1], &edges), -4.0);
/// assert_eq!(parallel_offset(&edges[0], &edges), 4.0);
/// ```
pub fn parallel_offset(edge: &DerivedEdge, edges: &[DerivedEdge]) -> f64 {
    let mut group: Vec<&DerivedEdge> = edges
        .iter()
        .filter(|e| e.connects(&edge.source, &edge.target))
        .collect();

    if group.len() <= 1 {
        return 0.0;
    }

    group.sort_by(|a, b| a.relationship.cmp(&b.relationship));

    let Some(index) = group.iter().position(|e| e.key() == edge.key()) else {
        return 0.0;
    };

    let total = group.len() as f64;
    let start = -(total - 1.0) * PARALLEL_EDGE_STEP / 2.0;
    start + index as f64 * PARALLEL_EDGE_STEP
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::FilterState;
    use crate::graph::{LineageEdge, LineageStore};
    use crate::parser::LineageRow;
    use crate::visibility::{compute_visibility, ViewState};

    fn view_of(store: &LineageStore, view: &ViewState) -> VisibleGraph {
        compute_visibility(store, &FilterState::new(store), view)
    }

    fn create_test_store() -> LineageStore {
        LineageStore::build(vec![
            LineageRow::edge("A", "r", "B", "T"),
            LineageRow::edge("B", "r", "C", "T"),
        ])
    }

    #[test]
    fn test_new_nodes_are_unplaced() {
        let store = create_test_store();
        let mut cache = PositionCache::new();

        let placements = cache.sync(&view_of(&store, &ViewState::default()));
        assert_eq!(placements.len(), 3);
        assert!(placements.iter().all(|p| p.position.is_none() && !p.pinned));
        assert!(needs_layout(&placements));
    }

    #[test]
    fn test_positions_survive_recompute() {
        let store = create_test_store();
        let mut cache = PositionCache::new();
        let graph = view_of(&store, &ViewState::default());

        cache.sync(&graph);
        for (i, node) in graph.nodes().iter().enumerate() {
            cache.set_position(&node.id, Point::new(i as f64, 0.0));
        }

        let placements = cache.sync(&graph);
        assert!(!needs_layout(&placements));
        assert_eq!(placements[2].position, Some(Point::new(2.0, 0.0)));
        assert!(!placements[2].pinned);
    }

    #[test]
    fn test_reappearing_node_restored_and_pinned() {
        let store = create_test_store();
        let mut cache = PositionCache::new();
        let full = view_of(&store, &ViewState::default());

        cache.sync(&full);
        cache.set_position("B", Point::new(5.0, 7.0));

        let mut view = ViewState::default();
        view.toggle_node("B");
        let placements = cache.sync(&view_of(&store, &view));
        assert!(placements.iter().all(|p| p.id != "B"));
        assert_eq!(cache.position("B"), None);

        let placements = cache.sync(&full);
        let b = placements.iter().find(|p| p.id == "B").unwrap();
        assert_eq!(b.position, Some(Point::new(5.0, 7.0)));
        assert!(b.pinned);
    }

    #[test]
    fn test_pin_and_unpin() {
        let mut cache = PositionCache::new();
        cache.pin("A", Point::new(1.0, 1.0));
        assert!(cache.is_pinned("A"));
        assert_eq!(cache.position("A"), Some(Point::new(1.0, 1.0)));
        assert!(cache.unpin("A"));
        assert!(!cache.is_pinned("A"));
    }

    #[test]
    fn test_lone_edge_has_no_offset() {
        let edges = vec![DerivedEdge::direct(&LineageEdge::new("A", "B", "r"))];
        assert_eq!(parallel_offset(&edges[0], &edges), 0.0);
    }

    #[test]
    fn test_offsets_sorted_by_label_across_directions() {
        let edges = vec![
            DerivedEdge::direct(&LineageEdge::new("A", "B", "writes")),
            DerivedEdge::direct(&LineageEdge::new("B", "A", "copies")),
            DerivedEdge::direct(&LineageEdge::new("A", "B", "reads")),
            DerivedEdge::direct(&LineageEdge::new("A", "C", "reads")),
        ];

        assert_eq!(parallel_offset(&edges[1], &edges), -8.0);
        assert_eq!(parallel_offset(&edges[2], &edges), 0.0);
        assert_eq!(parallel_offset(&edges[0], &edges), 8.0);
        assert_eq!(parallel_offset(&edges[3], &edges), 0.0);
    }

    #[test]
    fn test_offsets_are_distinct_for_parallel_edges() {
        let store = LineageStore::build(vec![
            LineageRow::edge("A", "reads", "B", "T"),
            LineageRow::edge("A", "writes", "B", "T"),
        ]);
        let graph = view_of(&store, &ViewState::default());
        let offsets: Vec<f64> = graph
            .edges()
            .iter()
            .map(|e| parallel_offset(e, graph.edges()))
            .collect();
        assert_eq!(offsets, vec![-4.0, 4.0]);
    }
}
