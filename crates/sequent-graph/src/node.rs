use sequent_config::Action;

/// A graph vertex.
///
/// Edges are read-only from the outside. A graph produced by
/// [`GraphBuilder`](crate::GraphBuilder) keeps `incoming` and `outgoing` as two
/// views of one edge set.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
  name: String,
  incoming: Vec<String>,
  outgoing: Vec<String>,
  action: Option<Action>,
}

impl Node {
  pub(crate) fn new(
    name: String,
    incoming: Vec<String>,
    outgoing: Vec<String>,
    action: Option<Action>,
  ) -> Self {
    Self {
      name,
      incoming,
      outgoing,
      action,
    }
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  /// Components this node depends on.
  pub fn incoming(&self) -> &[String] {
    &self.incoming
  }

  /// Components that depend on this node.
  pub fn outgoing(&self) -> &[String] {
    &self.outgoing
  }

  pub fn action(&self) -> Option<&Action> {
    self.action.as_ref()
  }

  pub fn into_action(self) -> Option<Action> {
    self.action
  }
}
