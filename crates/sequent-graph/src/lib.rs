//! Sequent Graph
//!
//! This crate turns a flat list of [`Declaration`](sequent_config::Declaration)s
//! into a dependency [`Graph`]. Every node knows both directions of its edges:
//!
//! - `incoming`: the components it depends on (copied from `dependsOn`)
//! - `outgoing`: the components that depend on it (computed)
//!
//! The graph preserves declaration order. Sorting relies on that order for its
//! tie-break, so two resolutions of the same input always agree.

mod builder;
mod graph;
mod node;

pub use builder::{DuplicatePolicy, GraphBuilder};
pub use graph::Graph;
pub use node::Node;
