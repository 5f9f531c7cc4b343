use thiserror::Error;

/// Structural problems with declarations or with a graph supplied as JSON.
///
/// These are always detected before any sorting or execution begins.
#[derive(Debug, Error)]
pub enum InputError {
  #[error("input is not an array")]
  NotAnArray,

  #[error("element {index} is null")]
  NullElement { index: usize },

  #[error("element {index} is not an object")]
  NotAnObject { index: usize },

  #[error("element {index} is missing a component name")]
  MissingName { index: usize },

  #[error("component '{name}' is missing dependsOn")]
  MissingDependsOn { name: String },

  #[error("dependsOn of component '{name}' is not an array")]
  DependsOnNotArray { name: String },

  #[error("dependency {position} of component '{name}' is not a string")]
  InvalidDependency { name: String, position: usize },

  #[error("action of component '{name}' is not an object")]
  ActionNotObject { name: String },

  /// Only raised when duplicates are configured to be rejected.
  #[error("duplicate component name: {name}")]
  DuplicateName { name: String },

  #[error("input is not a graph")]
  NotAGraph,

  #[error("invalid graph node '{name}': {message}")]
  InvalidNode { name: String, message: String },

  #[error("malformed json: {0}")]
  Json(#[from] serde_json::Error),
}
