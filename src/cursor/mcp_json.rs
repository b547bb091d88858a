//! MCP server configuration
//!
//! Handles updates to ~/.cursor/mcp.json. Only the EasyGrid entry under
//! `mcpServers` is touched; every other key keeps its value and position.

use anyhow::{Context, Result};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::UpdateError;

/// Top-level key holding the server entries
pub const MCP_SERVERS_KEY: &str = "mcpServers";
/// Preferred entry name, created when no EasyGrid entry exists yet
pub const PRIMARY_SERVER_NAME: &str = "easygrid";
/// Older entry name, updated only when the preferred one is absent
pub const LEGACY_SERVER_NAME: &str = "easygrid-mcp";
/// Header the EasyGrid MCP endpoint authenticates with
pub const API_KEY_HEADER: &str = "X-MCP-API-Key";
pub const DEFAULT_URL: &str = "http://localhost:8080/api/mcp/v1";
pub const DEFAULT_DESCRIPTION: &str = "EasyGrid CRUD - MCP HTTP";

/// Values written into the selected server entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EasygridEntry {
    pub api_key: String,
    pub url: String,
    pub description: String,
}

impl EasygridEntry {
    /// Entry pointing at the local EasyGrid server
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            url: DEFAULT_URL.to_string(),
            description: DEFAULT_DESCRIPTION.to_string(),
        }
    }
}

/// A parsed mcp.json, remembering where it came from
#[derive(Debug, Clone)]
pub struct McpDocument {
    path: PathBuf,
    root: Value,
}

impl McpDocument {
    /// Read and parse the document at `path`
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(UpdateError::MissingConfigFile(path.to_path_buf()).into());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read: {}", path.display()))?;

        Ok(Self::parse(&content, path)?)
    }

    /// Parse document text; `path` is only used in error messages
    pub fn parse(content: &str, path: &Path) -> Result<Self, UpdateError> {
        let root = serde_json::from_str(content).map_err(|source| UpdateError::InvalidConfig {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Self {
            path: path.to_path_buf(),
            root,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn root(&self) -> &Value {
        &self.root
    }

    /// Pretty-print with two-space indentation; non-ASCII is kept as-is
    pub fn render(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.root)
            .with_context(|| format!("Failed to serialize: {}", self.path.display()))
    }

    /// Name of the entry an update would touch
    ///
    /// `easygrid` wins over `easygrid-mcp`; when neither exists a new
    /// `easygrid` entry gets created.
    pub fn select_server_name(&self) -> &'static str {
        let servers = self.root.get(MCP_SERVERS_KEY).and_then(Value::as_object);
        match servers {
            Some(s) if !s.contains_key(PRIMARY_SERVER_NAME) && s.contains_key(LEGACY_SERVER_NAME) => {
                LEGACY_SERVER_NAME
            }
            _ => PRIMARY_SERVER_NAME,
        }
    }

    /// Write the key, URL and description into the selected entry
    ///
    /// Returns the name of the entry that was updated.
    pub fn apply_easygrid_entry(
        &mut self,
        entry: &EasygridEntry,
    ) -> Result<&'static str, UpdateError> {
        let name = self.select_server_name();
        let path = self.path.clone();
        let shape = |field: String| UpdateError::UnexpectedShape {
            path: path.clone(),
            field,
        };

        let root = self
            .root
            .as_object_mut()
            .ok_or_else(|| shape("(root)".to_string()))?;

        let servers = root
            .entry(MCP_SERVERS_KEY)
            .or_insert_with(|| Value::Object(Map::new()))
            .as_object_mut()
            .ok_or_else(|| shape(MCP_SERVERS_KEY.to_string()))?;

        let server = servers
            .entry(name)
            .or_insert_with(|| Value::Object(Map::new()))
            .as_object_mut()
            .ok_or_else(|| shape(format!("{}.{}", MCP_SERVERS_KEY, name)))?;

        let headers = server
            .entry("headers")
            .or_insert_with(|| Value::Object(Map::new()))
            .as_object_mut()
            .ok_or_else(|| shape(format!("{}.{}.headers", MCP_SERVERS_KEY, name)))?;

        headers.insert(
            API_KEY_HEADER.to_string(),
            Value::String(entry.api_key.clone()),
        );
        server.insert("url".to_string(), Value::String(entry.url.clone()));
        server.insert(
            "description".to_string(),
            Value::String(entry.description.clone()),
        );

        tracing::debug!(server = name, "applied EasyGrid entry");
        Ok(name)
    }
}
