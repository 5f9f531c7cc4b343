//! Sequential executor implementation.

use tracing::{debug, error, info, instrument};

use sequent_resolver::SortedEntry;

use crate::error::ExecutionError;
use crate::events::{ExecutionEvent, ExecutionNotifier, NoopNotifier};
use crate::performer::ActionPerformer;

/// What to do with an entry that carries no action.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MissingActionPolicy {
  /// Record the component as skipped and move on.
  #[default]
  Skip,
  /// Fail with [`ExecutionError::MissingAction`] before dispatching anything.
  Reject,
}

/// Configuration for the sequential executor.
#[derive(Debug, Clone, Default)]
pub struct ExecutorConfig {
  pub missing_action: MissingActionPolicy,
}

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionReport {
  pub run_id: String,
  /// Components whose action succeeded, in execution order.
  pub performed: Vec<String>,
  /// Components without an action, in execution order.
  pub skipped: Vec<String>,
}

/// Dispatches actions one at a time, stopping at the first failure.
///
/// Generic over `N: ExecutionNotifier`. Use `SequentialExecutor::new()` for
/// no-op notifications or `SequentialExecutor::with_notifier()` to observe
/// events.
pub struct SequentialExecutor<N: ExecutionNotifier = NoopNotifier> {
  config: ExecutorConfig,
  notifier: N,
}

impl SequentialExecutor<NoopNotifier> {
  pub fn new(config: ExecutorConfig) -> Self {
    Self::with_notifier(config, NoopNotifier)
  }
}

impl<N: ExecutionNotifier> SequentialExecutor<N> {
  pub fn with_notifier(config: ExecutorConfig, notifier: N) -> Self {
    Self { config, notifier }
  }

  /// Run every entry's action in order.
  ///
  /// Exactly one action is in flight at a time. On failure the remaining
  /// entries are not attempted and the performer's error is returned inside
  /// [`ExecutionError::Action`]. Earlier actions are not rolled back.
  #[instrument(
    name = "sequence_run",
    skip(self, entries, performer),
    fields(entries = entries.len())
  )]
  pub async fn run<P>(
    &self,
    entries: &[SortedEntry],
    performer: &P,
  ) -> Result<ExecutionReport, ExecutionError>
  where
    P: ActionPerformer + ?Sized,
  {
    let run_id = uuid::Uuid::new_v4().to_string();

    info!(run_id = %run_id, entries = entries.len(), "run_started");
    self.notifier.notify(ExecutionEvent::RunStarted {
      run_id: run_id.clone(),
      entries: entries.len(),
    });

    let result = self.dispatch(&run_id, entries, performer).await;

    match &result {
      Ok(report) => {
        info!(
          run_id = %run_id,
          performed = report.performed.len(),
          skipped = report.skipped.len(),
          "run_completed"
        );
        self.notifier.notify(ExecutionEvent::RunCompleted {
          run_id: run_id.clone(),
          performed: report.performed.len(),
        });
      }
      Err(e) => {
        error!(run_id = %run_id, error = %e, "run_failed");
        self.notifier.notify(ExecutionEvent::RunFailed {
          run_id: run_id.clone(),
          error: e.to_string(),
        });
      }
    }

    result
  }

  async fn dispatch<P>(
    &self,
    run_id: &str,
    entries: &[SortedEntry],
    performer: &P,
  ) -> Result<ExecutionReport, ExecutionError>
  where
    P: ActionPerformer + ?Sized,
  {
    if self.config.missing_action == MissingActionPolicy::Reject {
      if let Some(entry) = entries.iter().find(|e| e.action.is_none()) {
        return Err(ExecutionError::MissingAction {
          component: entry.component.clone(),
        });
      }
    }

    let mut performed = Vec::with_capacity(entries.len());
    let mut skipped = Vec::new();

    for entry in entries {
      let Some(action) = &entry.action else {
        debug!(run_id = %run_id, component = %entry.component, "action_skipped");
        self.notifier.notify(ExecutionEvent::ActionSkipped {
          run_id: run_id.to_string(),
          component: entry.component.clone(),
        });
        skipped.push(entry.component.clone());
        continue;
      };

      info!(run_id = %run_id, component = %entry.component, "action_started");
      self.notifier.notify(ExecutionEvent::ActionStarted {
        run_id: run_id.to_string(),
        component: entry.component.clone(),
      });

      if let Err(e) = performer.perform(&entry.component, action).await {
        error!(
          run_id = %run_id,
          component = %entry.component,
          error = %e,
          "action_failed"
        );
        self.notifier.notify(ExecutionEvent::ActionFailed {
          run_id: run_id.to_string(),
          component: entry.component.clone(),
          error: e.to_string(),
        });
        return Err(ExecutionError::Action {
          component: entry.component.clone(),
          source: Box::new(e),
        });
      }

      info!(run_id = %run_id, component = %entry.component, "action_completed");
      self.notifier.notify(ExecutionEvent::ActionCompleted {
        run_id: run_id.to_string(),
        component: entry.component.clone(),
      });
      performed.push(entry.component.clone());
    }

    Ok(ExecutionReport {
      run_id: run_id.to_string(),
      performed,
      skipped,
    })
  }
}
