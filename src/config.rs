//! Default locations of the files this tool reads and writes

use anyhow::{Context, Result};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Get the EasyGrid API key file (~/.easygrid/api-key)
pub fn default_api_key_path() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(api_key_path_in(&home))
}

/// Get the Cursor MCP configuration file (~/.cursor/mcp.json)
pub fn default_mcp_config_path() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(mcp_config_path_in(&home))
}

fn api_key_path_in(home: &Path) -> PathBuf {
    home.join(".easygrid").join("api-key")
}

fn mcp_config_path_in(home: &Path) -> PathBuf {
    home.join(".cursor").join("mcp.json")
}

/// Sibling backup path: `mcp.json` becomes `mcp.json.bak`
pub fn backup_path(config_path: &Path) -> PathBuf {
    let mut name: OsString = config_path
        .file_name()
        .map(OsString::from)
        .unwrap_or_default();
    name.push(".bak");
    config_path.with_file_name(name)
}
