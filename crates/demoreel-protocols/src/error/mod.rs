//! Error types for the demoreel protocol layer.

mod browser;
mod control;
mod narration;

pub use browser::*;
pub use control::*;
pub use narration::*;
