//! Sequent Executor
//!
//! Drives an [`ActionPerformer`] over a resolved order, one component at a
//! time. The next action is only dispatched once the previous one has
//! reported success; the first failure ends the run.
//!
//! Actions that already ran are not undone when a later one fails.
//!
//! # Usage
//!
//! ```ignore
//! use sequent_executor::{ExecutorConfig, SequentialExecutor};
//!
//! let order = Resolver::default().resolve(declarations)?;
//! let executor = SequentialExecutor::new(ExecutorConfig::default());
//! let report = executor.run(&order, &performer).await?;
//! ```

mod error;
mod events;
mod executor;
mod performer;

pub use error::{BoxError, ExecutionError};
pub use events::{ChannelNotifier, ExecutionEvent, ExecutionNotifier, NoopNotifier};
pub use executor::{ExecutionReport, ExecutorConfig, MissingActionPolicy, SequentialExecutor};
pub use performer::ActionPerformer;
