//! Browser automation protocol.

mod options;
mod traits;

pub use options::*;
pub use traits::*;
