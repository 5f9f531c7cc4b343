use async_trait::async_trait;

use sequent_config::Action;

/// Performs the external action attached to a component.
///
/// The executor only looks at success or failure. Timeouts, transport and
/// payload interpretation all belong to the implementation.
#[async_trait]
pub trait ActionPerformer: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  async fn perform(&self, component: &str, action: &Action) -> Result<(), Self::Error>;
}
