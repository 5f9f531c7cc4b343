use serde_json::Value;
use tracing::info;

use sequent_config::Declaration;
use sequent_graph::{DuplicatePolicy, GraphBuilder};

use crate::error::ResolveError;
use crate::sorter::{SortedEntry, TopologicalSorter};

/// Configuration for the resolver.
#[derive(Debug, Clone, Default)]
pub struct ResolverConfig {
  /// How declarations sharing a name are handled.
  pub duplicates: DuplicatePolicy,
}

/// Turns declarations into an execution order.
///
/// Each call builds a fresh graph, sorts it and drops it; nothing is kept
/// between calls.
#[derive(Debug, Clone, Default)]
pub struct Resolver {
  builder: GraphBuilder,
  sorter: TopologicalSorter,
}

impl Resolver {
  pub fn new(config: ResolverConfig) -> Self {
    Self {
      builder: GraphBuilder::new().with_duplicates(config.duplicates),
      sorter: TopologicalSorter::new(),
    }
  }

  /// Resolve typed declarations.
  pub fn resolve(&self, declarations: Vec<Declaration>) -> Result<Vec<SortedEntry>, ResolveError> {
    let declared = declarations.len();
    let graph = self.builder.build(declarations)?;
    let sorted = self.sorter.sort(graph)?;

    info!(declared, resolved = sorted.len(), "dependencies resolved");
    Ok(sorted)
  }

  /// Validate raw JSON declarations and resolve them.
  pub fn resolve_value(&self, input: &Value) -> Result<Vec<SortedEntry>, ResolveError> {
    let declarations = sequent_config::parse_declarations(input)?;
    self.resolve(declarations)
  }
}
