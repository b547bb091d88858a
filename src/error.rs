//! Failures that are reported to the user instead of aborting

use std::path::PathBuf;
use thiserror::Error;

/// Command that populates the API key file
pub const KEY_GENERATION_HINT: &str = "go run server/cmd/mcp-api-key/main.go -action=create";

/// A precondition that failed before anything was written
#[derive(Debug, Error)]
pub enum UpdateError {
    #[error("API Key file not found at {}", .0.display())]
    MissingKeyFile(PathBuf),

    #[error("API Key is empty")]
    EmptyKey(PathBuf),

    #[error("mcp.json not found at {}", .0.display())]
    MissingConfigFile(PathBuf),

    #[error("Failed to parse {}: {source}", .path.display())]
    InvalidConfig {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Expected `{field}` to be a JSON object in {}", .path.display())]
    UnexpectedShape { path: PathBuf, field: String },
}

impl UpdateError {
    /// Follow-up instruction printed after the error, if any
    pub fn hint(&self) -> Option<String> {
        match self {
            UpdateError::MissingKeyFile(_) => Some(format!("Run: {}", KEY_GENERATION_HINT)),
            _ => None,
        }
    }
}
