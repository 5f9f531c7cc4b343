//! Sequent Config
//!
//! This crate contains the serializable component declaration types for sequent.
//! A declaration names a component, the components it depends on, and an
//! optional action payload that is handed to an action performer once the
//! component's turn comes up in the execution order.
//!
//! Declarations can be loaded from:
//! - JSON files (via CLI with `sequent run declarations.json`)
//! - Any `serde_json::Value` already in memory
//!
//! Raw JSON goes through [`parse_declarations`], which applies the structural
//! checks in a fixed order and reports the first violation as an [`InputError`].
//!
//! # Example
//!
//! ```json
//! [
//!   { "name": "knife", "dependsOn": [], "action": { "url": "http://localhost/knife" } },
//!   { "name": "food", "dependsOn": ["knife"], "action": { "url": "http://localhost/food", "method": "POST" } }
//! ]
//! ```

mod declaration;
mod error;
mod parse;

pub use declaration::{Action, Declaration};
pub use error::InputError;
pub use parse::{from_json_str, parse_declarations};
