//! Control channel errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ControlError {
    #[error("Control input closed")]
    Closed,

    #[error("Control input failed: {0}")]
    Io(#[from] std::io::Error),
}
