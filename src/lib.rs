//! LineageScope - terminal explorer for data lineage graphs
//!
//! This crate loads parent/child lineage rows from CSV, narrows them with
//! per-column filters, hides nodes, node types and relationship labels, and
//! computes the visible graph, bridging edges around single hidden nodes.

pub mod config;
pub mod export;
pub mod filter;
pub mod graph;
pub mod parser;
pub mod projection;
pub mod session;
pub mod ui;
pub mod visibility;
