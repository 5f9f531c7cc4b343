use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Opaque action payload attached to a component.
///
/// Always a JSON object. Its shape is only interpreted by the action performer
/// (for example the HTTP performer reads `url`, `method`, `headers`, `body`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Action(Map<String, Value>);

impl Action {
  pub fn new() -> Self {
    Self::default()
  }

  /// Look up a single field of the payload.
  pub fn get(&self, key: &str) -> Option<&Value> {
    self.0.get(key)
  }

  pub fn as_map(&self) -> &Map<String, Value> {
    &self.0
  }

  pub fn into_value(self) -> Value {
    Value::Object(self.0)
  }
}

impl From<Map<String, Value>> for Action {
  fn from(map: Map<String, Value>) -> Self {
    Self(map)
  }
}

/// A single component declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Declaration {
  /// Component name, unique within one resolution.
  #[serde(alias = "component")]
  pub name: String,

  /// Names of the components that must run before this one.
  /// Forward references are allowed.
  pub depends_on: Vec<String>,

  #[serde(default, alias = "options", skip_serializing_if = "Option::is_none")]
  pub action: Option<Action>,
}

impl Declaration {
  /// Create a declaration with no dependencies and no action.
  pub fn new(name: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      depends_on: Vec::new(),
      action: None,
    }
  }

  pub fn depends_on<I, S>(mut self, names: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.depends_on = names.into_iter().map(Into::into).collect();
    self
  }

  pub fn with_action(mut self, action: Action) -> Self {
    self.action = Some(action);
    self
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn test_deserialize_accepts_component_and_options_aliases() {
    let decl: Declaration = serde_json::from_value(json!({
      "component": "image.jpg",
      "dependsOn": ["abc.docx"],
      "options": { "url": "http://localhost:8080/api/bears", "method": "GET" }
    }))
    .unwrap();

    assert_eq!(decl.name, "image.jpg");
    assert_eq!(decl.depends_on, vec!["abc.docx".to_string()]);
    let action = decl.action.unwrap();
    assert_eq!(action.get("method"), Some(&json!("GET")));
  }

  #[test]
  fn test_serialize_omits_missing_action() {
    let decl = Declaration::new("a").depends_on(["b"]);
    let value = serde_json::to_value(&decl).unwrap();
    assert_eq!(value, json!({ "name": "a", "dependsOn": ["b"] }));
  }
}
