use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, trace};

use sequent_config::Action;
use sequent_graph::Graph;

use crate::error::ResolveError;

/// One component in execution order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SortedEntry {
  pub component: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub action: Option<Action>,
}

/// Kahn's algorithm over a [`Graph`].
///
/// The ready set is ordered by declaration index, so the next component is
/// always the earliest-declared one with no remaining incoming edges.
#[derive(Debug, Clone, Copy, Default)]
pub struct TopologicalSorter;

impl TopologicalSorter {
  pub fn new() -> Self {
    Self
  }

  /// Load a graph from its JSON object form and sort it.
  pub fn sort_value(&self, value: &Value) -> Result<Vec<SortedEntry>, ResolveError> {
    let graph = Graph::from_value(value)?;
    self.sort(graph)
  }

  /// Sort the graph, consuming it.
  ///
  /// Selecting a node removes one occurrence of its name from the incoming
  /// list of every node named in its outgoing list. When nothing is ready but
  /// nodes remain the graph is cyclic and no partial order is returned.
  pub fn sort(&self, graph: Graph) -> Result<Vec<SortedEntry>, ResolveError> {
    let nodes = graph.into_nodes();
    let total = nodes.len();

    let dependents: Vec<Vec<usize>> = nodes
      .values()
      .map(|node| {
        node
          .outgoing()
          .iter()
          .filter_map(|target| nodes.get_index_of(target.as_str()))
          .collect()
      })
      .collect();
    let mut pending: Vec<Vec<String>> = nodes
      .values()
      .map(|node| node.incoming().to_vec())
      .collect();
    let mut ready: BTreeSet<usize> = pending
      .iter()
      .enumerate()
      .filter(|(_, incoming)| incoming.is_empty())
      .map(|(index, _)| index)
      .collect();
    let mut slots: Vec<Option<(String, Option<Action>)>> = nodes
      .into_iter()
      .map(|(name, node)| Some((name, node.into_action())))
      .collect();

    let mut sorted = Vec::with_capacity(total);
    while let Some(index) = ready.pop_first() {
      let Some((name, action)) = slots[index].take() else {
        continue;
      };
      trace!(component = %name, "component_ready");

      for &target in &dependents[index] {
        let incoming = &mut pending[target];
        if let Some(position) = incoming.iter().position(|dep| *dep == name) {
          incoming.remove(position);
          if incoming.is_empty() && slots[target].is_some() {
            ready.insert(target);
          }
        }
      }

      sorted.push(SortedEntry {
        component: name,
        action,
      });
    }

    if sorted.len() < total {
      let unresolved: Vec<String> = slots
        .into_iter()
        .flatten()
        .map(|(name, _)| name)
        .collect();
      debug!(unresolved = ?unresolved, "dependencies are cyclic");
      return Err(ResolveError::Cycle { unresolved });
    }

    debug!(
      order = ?sorted.iter().map(|e| e.component.as_str()).collect::<Vec<_>>(),
      "graph_sorted"
    );
    Ok(sorted)
  }
}
