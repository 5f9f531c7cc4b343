//! Execution events and notifiers for observability.
//!
//! Events are emitted as a run progresses so callers can observe it (print
//! progress, stream to a UI, assert on it in tests) without touching the
//! control flow.

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

/// Events emitted during a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ExecutionEvent {
  /// A run has started.
  RunStarted { run_id: String, entries: usize },

  /// An action has been dispatched.
  ActionStarted { run_id: String, component: String },

  /// An action reported success.
  ActionCompleted { run_id: String, component: String },

  /// A component had no action and was passed over.
  ActionSkipped { run_id: String, component: String },

  /// An action reported failure. Nothing after it runs.
  ActionFailed {
    run_id: String,
    component: String,
    error: String,
  },

  /// Every entry was handled.
  RunCompleted { run_id: String, performed: usize },

  /// The run stopped on an error.
  RunFailed { run_id: String, error: String },
}

/// Trait for receiving execution events.
///
/// The executor calls `notify` for each event, in order, from the task
/// driving the run.
pub trait ExecutionNotifier: Send + Sync {
  fn notify(&self, event: ExecutionEvent);
}

/// A notifier that discards all events.
#[derive(Debug, Clone, Default)]
pub struct NoopNotifier;

impl ExecutionNotifier for NoopNotifier {
  fn notify(&self, _event: ExecutionEvent) {}
}

/// A notifier that forwards events to an unbounded channel.
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
  // NOTE: Unbounded so a slow consumer never blocks the executor between
  // actions. A run sends at most two events per entry plus two, so the
  // buffer stays small. Switch to a bounded channel with `try_send` if
  // notifiers ever outlive a single run.
  sender: mpsc::UnboundedSender<ExecutionEvent>,
}

impl ChannelNotifier {
  pub fn new(sender: mpsc::UnboundedSender<ExecutionEvent>) -> Self {
    Self { sender }
  }
}

impl ExecutionNotifier for ChannelNotifier {
  fn notify(&self, event: ExecutionEvent) {
    // Receiver may have been dropped
    let _ = self.sender.send(event);
  }
}
