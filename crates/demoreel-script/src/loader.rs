//! Script loader.

use std::fs;
use std::path::Path;

use serde_json::Value;
use tracing::debug;

use crate::error::ScriptError;
use crate::schema::DemoScript;
use crate::validator::ScriptValidator;
use crate::variables::Variables;

/// Script file format, chosen by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptFormat {
    Json,
    Yaml,
}

impl ScriptFormat {
    pub fn from_path(path: &Path) -> Result<Self, ScriptError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("json") => Ok(ScriptFormat::Json),
            Some("yaml") | Some("yml") => Ok(ScriptFormat::Yaml),
            _ => Err(ScriptError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Script loader with `${VAR}` substitution.
pub struct ScriptLoader {
    variables: Variables,
}

impl ScriptLoader {
    pub fn new(variables: Variables) -> Self {
        Self { variables }
    }

    pub fn variables(&self) -> &Variables {
        &self.variables
    }

    /// Load, substitute and validate a script file.
    pub fn load(&self, path: &Path) -> Result<DemoScript, ScriptError> {
        let format = ScriptFormat::from_path(path)?;
        let content = fs::read_to_string(path)?;
        debug!("Loading {:?} script from {}", format, path.display());
        self.load_named(&content, format, &path.display().to_string())
    }

    /// Load a script from a string.
    pub fn load_str(&self, content: &str, format: ScriptFormat) -> Result<DemoScript, ScriptError> {
        self.load_named(content, format, "<input>")
    }

    /// Substitute and validate an already-parsed document.
    pub fn validate(&self, raw: Value) -> Result<DemoScript, ScriptError> {
        let substituted = self.variables.substitute(raw)?;
        ScriptValidator::validate(&substituted).map_err(ScriptError::Validation)
    }

    fn load_named(
        &self,
        content: &str,
        format: ScriptFormat,
        name: &str,
    ) -> Result<DemoScript, ScriptError> {
        let raw = parse(content, format).map_err(|message| ScriptError::Parse {
            path: name.to_string(),
            message,
        })?;
        self.validate(raw)
    }
}

fn parse(content: &str, format: ScriptFormat) -> Result<Value, String> {
    match format {
        ScriptFormat::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
        ScriptFormat::Yaml => serde_yml::from_str(content).map_err(|e| e.to_string()),
    }
}
