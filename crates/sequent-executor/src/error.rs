//! Error types for sequential execution.

use thiserror::Error;

/// Type-erased error returned by an action performer.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur while executing a resolved order.
#[derive(Debug, Error)]
pub enum ExecutionError {
  /// A component without an action was found and actions are required.
  /// Raised before anything is dispatched.
  #[error("component '{component}' has no action")]
  MissingAction { component: String },

  /// The performer failed. `source` is the performer's own error.
  #[error("action failed for component '{component}': {source}")]
  Action {
    component: String,
    #[source]
    source: BoxError,
  },
}

impl ExecutionError {
  /// The component the error refers to.
  pub fn component(&self) -> &str {
    match self {
      ExecutionError::MissingAction { component } => component,
      ExecutionError::Action { component, .. } => component,
    }
  }
}
