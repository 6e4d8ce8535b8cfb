//! Graph module for lineage modeling.
//!
//! This module provides the [`LineageStore`], the immutable source of
//! truth built once from input rows: a de-duplicated node set and the
//! ordered edge list, backed by a petgraph directed graph.
//!
//! # Example
//!
//! ```rust
//! use lineagescope::graph::LineageStore;
//! use lineagescope::parser::LineageRow;
//!
//! let store = LineageStore::build(vec![
//!     LineageRow::new("orders_v", "View", "reads", "orders", "Table"),
//! ]);
//!
//! assert_eq!(store.node_count(), 2);
//! assert_eq!(store.edge_count(), 1);
//! ```

mod lineage_graph;

pub use lineage_graph::{LineageEdge, LineageNode, LineageStore, TypeConflict};
