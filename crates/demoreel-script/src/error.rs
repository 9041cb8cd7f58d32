//! Script loading errors.

use std::fmt;

use thiserror::Error;

/// A step `type` that no executor handles.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown step kind: {0}")]
pub struct UnknownStepKind(pub String);

/// A single schema violation, qualified by its path in the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Every schema violation found in one document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub errors: Vec<ValidationError>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Whether any error is reported at exactly `path`.
    pub fn has_error_at(&self, path: &str) -> bool {
        self.errors.iter().any(|e| e.path == path)
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.errors.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "  - {}", error)?;
        }
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("Unsupported file format: {0}. Use .json, .yaml, or .yml")]
    UnsupportedFormat(String),

    #[error("Failed to parse {path}: {message}")]
    Parse { path: String, message: String },

    #[error(
        "Missing variable \"{0}\". Set it in your shell (e.g. export {0}=...) or in .env before running the demo."
    )]
    MissingVariable(String),

    #[error("Script validation failed:\n{0}")]
    Validation(ValidationReport),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
