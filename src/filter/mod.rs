//! Column filter module.
//!
//! Provides [`FilterState`], the per-column multi-select state that decides
//! which rows are admitted into the visible graph, independent of graph
//! topology.

mod selection;

pub use selection::{ColumnSelection, FilterState};
