//! Visibility module: hide-sets and the visibility engine.
//!
//! [`ViewState`] holds the three user-controlled hide-sets and the
//! per-node state machine; [`compute_visibility`] derives the visible
//! nodes and the edges to render, bridging around hidden nodes.

mod engine;
mod view_state;

pub use engine::{compute_visibility, DerivedEdge, EdgeKind, VisibleGraph};
pub use view_state::{NodeVisibility, ViewState};
