//! Sequent Resolver
//!
//! Orders a dependency [`Graph`](sequent_graph::Graph) so that every component
//! comes after everything it depends on.
//!
//! ```text
//! declarations ──▶ GraphBuilder ──▶ Graph ──▶ TopologicalSorter ──▶ [SortedEntry]
//! ```
//!
//! Among the components that are ready at any point, the one declared first
//! goes next. Resolving the same input twice therefore yields the same order.

mod error;
mod resolver;
mod sorter;

pub use error::ResolveError;
pub use resolver::{Resolver, ResolverConfig};
pub use sorter::{SortedEntry, TopologicalSorter};
