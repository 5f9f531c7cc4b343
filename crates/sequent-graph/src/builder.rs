use std::collections::HashMap;

use indexmap::IndexMap;
use serde_json::Value;
use tracing::{debug, warn};

use sequent_config::{Declaration, InputError, parse_declarations};

use crate::graph::Graph;
use crate::node::Node;

/// What to do when two declarations share a name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DuplicatePolicy {
  /// The later declaration replaces the earlier one but keeps its position.
  #[default]
  Overwrite,
  /// Fail with [`InputError::DuplicateName`].
  Reject,
}

/// Builds a [`Graph`] from declarations.
#[derive(Debug, Clone, Default)]
pub struct GraphBuilder {
  duplicates: DuplicatePolicy,
}

impl GraphBuilder {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_duplicates(mut self, policy: DuplicatePolicy) -> Self {
    self.duplicates = policy;
    self
  }

  /// Validate raw JSON declarations and build the graph.
  pub fn build_value(&self, input: &Value) -> Result<Graph, InputError> {
    let declarations = parse_declarations(input)?;
    self.build(declarations)
  }

  /// Build the graph.
  ///
  /// `incoming` is copied from each declaration's `dependsOn`. Names that are
  /// never declared are kept as edges; they can never be satisfied.
  /// `outgoing` lists the declarations depending on a node, in declaration
  /// order, each at most once. A self-dependency is not mirrored as an
  /// outgoing edge.
  pub fn build(&self, declarations: Vec<Declaration>) -> Result<Graph, InputError> {
    let mut collapsed: IndexMap<String, Declaration> = IndexMap::with_capacity(declarations.len());

    for (index, declaration) in declarations.into_iter().enumerate() {
      if declaration.name.is_empty() {
        return Err(InputError::MissingName { index });
      }

      match collapsed.get_mut(&declaration.name) {
        Some(existing) => match self.duplicates {
          DuplicatePolicy::Reject => {
            return Err(InputError::DuplicateName {
              name: declaration.name,
            });
          }
          DuplicatePolicy::Overwrite => {
            warn!(component = %declaration.name, "duplicate declaration overwrites earlier one");
            *existing = declaration;
          }
        },
        None => {
          collapsed.insert(declaration.name.clone(), declaration);
        }
      }
    }

    // Reverse index: dependency name -> dependents, in declaration order.
    let mut dependents: HashMap<String, Vec<String>> = HashMap::new();
    for declaration in collapsed.values() {
      for dependency in &declaration.depends_on {
        if *dependency == declaration.name {
          continue;
        }
        let entry = dependents.entry(dependency.clone()).or_default();
        if entry.last() != Some(&declaration.name) {
          entry.push(declaration.name.clone());
        }
      }
    }

    let nodes: IndexMap<String, Node> = collapsed
      .into_iter()
      .map(|(name, declaration)| {
        let outgoing = dependents.remove(&name).unwrap_or_default();
        let node = Node::new(
          name.clone(),
          declaration.depends_on,
          outgoing,
          declaration.action,
        );
        (name, node)
      })
      .collect();

    // Whatever is left was depended upon but never declared.
    for phantom in dependents.keys() {
      debug!(component = %phantom, "dependency is not declared");
    }

    let graph = Graph::from_nodes(nodes);
    debug!(
      nodes = graph.len(),
      entry_points = ?graph.entry_points(),
      "graph_built"
    );

    Ok(graph)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use sequent_config::Action;
  use serde_json::json;

  fn names(list: &[String]) -> Vec<&str> {
    list.iter().map(String::as_str).collect()
  }

  #[test]
  fn test_empty_input_builds_empty_graph() {
    let graph = GraphBuilder::new().build_value(&json!([])).unwrap();
    assert!(graph.is_empty());
    assert_eq!(serde_json::to_value(&graph).unwrap(), json!({}));
  }

  #[test]
  fn test_builds_incoming_and_outgoing_edges() {
    let graph = GraphBuilder::new()
      .build_value(&json!([
        { "component": "image.jpg", "dependsOn": ["abc.docx", "def.txt"] },
        { "component": "abc.docx", "dependsOn": ["def.txt"] },
        { "component": "def.txt", "dependsOn": [] }
      ]))
      .unwrap();

    assert_eq!(
      serde_json::to_value(&graph).unwrap(),
      json!({
        "image.jpg": { "incoming": ["abc.docx", "def.txt"], "outgoing": [] },
        "abc.docx": { "incoming": ["def.txt"], "outgoing": ["image.jpg"] },
        "def.txt": { "incoming": [], "outgoing": ["image.jpg", "abc.docx"] }
      })
    );
  }

  #[test]
  fn test_carries_actions_onto_nodes() {
    let mut payload = serde_json::Map::new();
    payload.insert("url".to_string(), json!("http://localhost:8080/api/bears"));
    payload.insert("method".to_string(), json!("GET"));

    let graph = GraphBuilder::new()
      .build(vec![
        Declaration::new("a").with_action(Action::from(payload.clone())),
        Declaration::new("b").depends_on(["a"]),
      ])
      .unwrap();

    assert_eq!(graph.get("a").unwrap().action(), Some(&Action::from(payload)));
    assert!(graph.get("b").unwrap().action().is_none());
  }

  #[test]
  fn test_edges_are_dual() {
    let graph = GraphBuilder::new()
      .build(vec![
        Declaration::new("d").depends_on(["b", "c"]),
        Declaration::new("a"),
        Declaration::new("b").depends_on(["a"]),
        Declaration::new("c").depends_on(["a"]),
      ])
      .unwrap();

    for node in graph.nodes() {
      for dependency in node.incoming() {
        let upstream = graph.get(dependency).unwrap();
        assert!(upstream.outgoing().iter().any(|n| n == node.name()));
      }
      for dependent in node.outgoing() {
        let downstream = graph.get(dependent).unwrap();
        assert!(downstream.incoming().iter().any(|n| n == node.name()));
      }
    }
  }

  #[test]
  fn test_phantom_dependency_is_kept_as_incoming() {
    let graph = GraphBuilder::new()
      .build(vec![Declaration::new("a").depends_on(["ghost"])])
      .unwrap();

    assert_eq!(names(graph.get("a").unwrap().incoming()), vec!["ghost"]);
    assert!(graph.get("ghost").is_none());
  }

  #[test]
  fn test_self_dependency_is_not_outgoing() {
    let graph = GraphBuilder::new()
      .build(vec![Declaration::new("a").depends_on(["a"])])
      .unwrap();

    let node = graph.get("a").unwrap();
    assert_eq!(names(node.incoming()), vec!["a"]);
    assert!(node.outgoing().is_empty());
  }

  #[test]
  fn test_repeated_dependency_is_one_outgoing_edge() {
    let graph = GraphBuilder::new()
      .build(vec![
        Declaration::new("a"),
        Declaration::new("b").depends_on(["a", "a"]),
      ])
      .unwrap();

    assert_eq!(names(graph.get("a").unwrap().outgoing()), vec!["b"]);
    assert_eq!(names(graph.get("b").unwrap().incoming()), vec!["a", "a"]);
  }

  #[test]
  fn test_duplicate_overwrites_in_place() {
    let graph = GraphBuilder::new()
      .build(vec![
        Declaration::new("a").depends_on(["x"]),
        Declaration::new("b"),
        Declaration::new("a"),
      ])
      .unwrap();

    let order: Vec<&str> = graph.nodes().map(Node::name).collect();
    assert_eq!(order, vec!["a", "b"]);
    assert!(graph.get("a").unwrap().incoming().is_empty());
  }

  #[test]
  fn test_duplicate_rejected_when_configured() {
    let result = GraphBuilder::new()
      .with_duplicates(DuplicatePolicy::Reject)
      .build(vec![Declaration::new("a"), Declaration::new("a")]);

    match result {
      Err(InputError::DuplicateName { name }) => assert_eq!(name, "a"),
      other => panic!("expected DuplicateName, got {:?}", other),
    }
  }

  #[test]
  fn test_empty_name_rejected_for_typed_declarations() {
    let result = GraphBuilder::new().build(vec![Declaration::new("a"), Declaration::new("")]);
    assert!(matches!(result, Err(InputError::MissingName { index: 1 })));
  }

  #[test]
  fn test_structural_error_yields_no_graph() {
    let result = GraphBuilder::new().build_value(&json!([
      { "name": "a", "dependsOn": [] },
      { "name": "b", "dependsOn": "a" }
    ]));
    assert!(matches!(result, Err(InputError::DependsOnNotArray { .. })));
  }
}
