use indexmap::IndexMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

use sequent_config::{Action, InputError};

use crate::node::Node;

/// Dependency graph keyed by component name, in declaration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Graph {
  nodes: IndexMap<String, Node>,
}

/// Wire form of a node: `{ "incoming": [..], "outgoing": [..], "action": {..} }`.
#[derive(Serialize)]
struct NodeView<'a> {
  incoming: &'a [String],
  outgoing: &'a [String],
  #[serde(skip_serializing_if = "Option::is_none")]
  action: Option<&'a Action>,
}

#[derive(Deserialize)]
struct NodeRecord {
  #[serde(alias = "incomingfile")]
  incoming: Vec<String>,
  #[serde(alias = "outgoingfile")]
  outgoing: Vec<String>,
  #[serde(default, alias = "options")]
  action: Option<Action>,
}

impl Graph {
  pub(crate) fn from_nodes(nodes: IndexMap<String, Node>) -> Self {
    Self { nodes }
  }

  /// Load a graph from its JSON object form.
  ///
  /// The edge lists are taken as given; no duality check is made, so the
  /// caller is responsible for consistent `incoming`/`outgoing` lists.
  pub fn from_value(value: &Value) -> Result<Self, InputError> {
    let object = value.as_object().ok_or(InputError::NotAGraph)?;

    let mut nodes = IndexMap::with_capacity(object.len());
    for (name, raw) in object {
      let record: NodeRecord =
        serde_json::from_value(raw.clone()).map_err(|e| InputError::InvalidNode {
          name: name.clone(),
          message: e.to_string(),
        })?;
      nodes.insert(
        name.clone(),
        Node::new(name.clone(), record.incoming, record.outgoing, record.action),
      );
    }

    Ok(Self { nodes })
  }

  pub fn len(&self) -> usize {
    self.nodes.len()
  }

  pub fn is_empty(&self) -> bool {
    self.nodes.is_empty()
  }

  pub fn get(&self, name: &str) -> Option<&Node> {
    self.nodes.get(name)
  }

  /// Nodes in declaration order.
  pub fn nodes(&self) -> impl Iterator<Item = &Node> {
    self.nodes.values()
  }

  /// Nodes with no incoming edges.
  pub fn entry_points(&self) -> Vec<&str> {
    self
      .nodes
      .values()
      .filter(|node| node.incoming().is_empty())
      .map(Node::name)
      .collect()
  }

  /// Consume the graph, yielding its nodes in declaration order.
  pub fn into_nodes(self) -> IndexMap<String, Node> {
    self.nodes
  }
}

impl Serialize for Graph {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_map(self.nodes.iter().map(|(name, node)| {
      (
        name,
        NodeView {
          incoming: node.incoming(),
          outgoing: node.outgoing(),
          action: node.action(),
        },
      )
    }))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn test_from_value_rejects_array() {
    let result = Graph::from_value(&json!([]));
    assert!(matches!(result, Err(InputError::NotAGraph)));
  }

  #[test]
  fn test_from_value_accepts_legacy_edge_names() {
    let graph = Graph::from_value(&json!({
      "1": { "incomingfile": [], "outgoingfile": ["2"] },
      "2": { "incomingfile": ["1"], "outgoingfile": [] }
    }))
    .unwrap();

    assert_eq!(graph.len(), 2);
    assert_eq!(graph.get("2").unwrap().incoming(), &["1".to_string()]);
    assert_eq!(graph.entry_points(), vec!["1"]);
  }

  #[test]
  fn test_from_value_reports_bad_node() {
    let result = Graph::from_value(&json!({ "a": { "incoming": [] } }));
    match result {
      Err(InputError::InvalidNode { name, .. }) => assert_eq!(name, "a"),
      other => panic!("expected InvalidNode, got {:?}", other),
    }
  }

  #[test]
  fn test_serialize_preserves_order_and_omits_missing_action() {
    let graph = Graph::from_value(&json!({
      "b": { "incoming": ["a"], "outgoing": [], "action": { "url": "http://b" } },
      "a": { "incoming": [], "outgoing": ["b"] }
    }))
    .unwrap();

    let text = serde_json::to_string(&graph).unwrap();
    assert_eq!(
      text,
      r#"{"b":{"incoming":["a"],"outgoing":[],"action":{"url":"http://b"}},"a":{"incoming":[],"outgoing":["b"]}}"#
    );
  }
}
