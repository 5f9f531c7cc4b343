use sequent_config::InputError;
use thiserror::Error;

/// Errors that can occur while resolving an execution order.
#[derive(Debug, Error)]
pub enum ResolveError {
  /// Declarations or graph were structurally invalid.
  #[error(transparent)]
  Input(#[from] InputError),

  /// No component is ready but some remain. Undeclared dependencies end up
  /// here as well, since they can never be satisfied.
  #[error("dependencies are cyclic")]
  Cycle { unresolved: Vec<String> },
}
