//! Sequent HTTP host
//!
//! [`HttpPerformer`] implements [`ActionPerformer`](sequent_executor::ActionPerformer)
//! by issuing one HTTP request per action. The action payload describes the
//! request:
//!
//! ```json
//! {
//!   "url": "http://www.createresources.com/food",
//!   "method": "POST",
//!   "headers": { "food": "dhokla" },
//!   "body": { "servings": 2 },
//!   "timeout_ms": 5000
//! }
//! ```
//!
//! `uri` is accepted for `url` and `json` for `body`. Other fields are ignored.
//! Requests are checked against an [`HttpPolicy`] before anything is sent.

mod error;
mod performer;
mod policy;
mod request;

pub use error::HttpError;
pub use performer::{HttpConfig, HttpPerformer};
pub use policy::HttpPolicy;
pub use request::HttpRequestSpec;
