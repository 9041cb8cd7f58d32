//! # Demoreel Script
//!
//! Demo script model, `${VAR}` substitution and schema validation.

mod error;
mod loader;
mod schema;
mod validator;
mod variables;

pub use error::{ScriptError, UnknownStepKind, ValidationError, ValidationReport};
pub use loader::{ScriptFormat, ScriptLoader};
pub use schema::*;
pub use validator::ScriptValidator;
pub use variables::Variables;
