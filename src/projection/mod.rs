//! View projection: what a rendering surface receives after a recompute.
//!
//! The surface (terminal UI, an SVG front end, a test recorder) never
//! derives anything from raw rows. It gets the visible nodes, the rendered
//! edges, where to put each node, and the counts for its controls.

pub mod layout;
pub mod legend;

pub use layout::{needs_layout, parallel_offset, Placement, Point, PositionCache};
pub use legend::{type_counts, RelationshipPalette, TypeCount, ViewStatus};

use crate::session::LineageSession;
use crate::visibility::VisibleGraph;

/// Everything a surface needs to draw one state of the session.
#[derive(Debug, Clone, Copy)]
pub struct ProjectionFrame<'a> {
    pub graph: &'a VisibleGraph,
    pub placements: &'a [Placement],
    pub status: &'a ViewStatus,
    pub type_counts: &'a [TypeCount],
    pub palette: &'a RelationshipPalette,
}

/// A consumer of computed views.
pub trait RenderSurface {
    /// Draws the frame. `frame.graph.edges()` is the complete edge set.
    fn render(&mut self, frame: &ProjectionFrame<'_>);
}

/// Drives a [`RenderSurface`] from a [`LineageSession`], keeping node
/// positions stable between recomputes.
#[derive(Debug, Clone)]
pub struct Projector {
    positions: PositionCache,
    palette: RelationshipPalette,
}

impl Projector {
    /// Starts with no remembered positions and a palette over every
    /// relationship label of the session's store.
    pub fn new(session: &LineageSession) -> Self {
        Self {
            positions: PositionCache::new(),
            palette: RelationshipPalette::new(session.store()),
        }
    }

    /// Positions remembered across recomputes.
    pub fn positions(&self) -> &PositionCache {
        &self.positions
    }

    /// Layout feedback (simulation ticks, drag-end pins) goes here.
    pub fn positions_mut(&mut self) -> &mut PositionCache {
        &mut self.positions
    }

    /// Style slots of the relationship labels.
    pub fn palette(&self) -> &RelationshipPalette {
        &self.palette
    }

    /// Recomputes (or reuses) the session's view and hands it to the
    /// surface. Returns whether the layout has unplaced nodes to position.
    pub fn project<S: RenderSurface>(&mut self, session: &mut LineageSession, surface: &mut S) -> bool {
        let graph = session.visible().clone();
        let placements = self.positions.sync(&graph);
        let status = ViewStatus::new(session.store(), &graph);
        let counts = type_counts(session.store(), session.view(), &graph);

        surface.render(&ProjectionFrame {
            graph: &graph,
            placements: &placements,
            status: &status,
            type_counts: &counts,
            palette: &self.palette,
        });

        needs_layout(&placements)
    }
}
