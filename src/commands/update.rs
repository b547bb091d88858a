//! Update command - Inject the EasyGrid API key into Cursor's mcp.json

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config;
use crate::cursor::mcp_json::{EasygridEntry, McpDocument, DEFAULT_DESCRIPTION, DEFAULT_URL};
use crate::easygrid::api_key;

/// Inputs for a single update run
#[derive(Debug, Clone)]
pub struct UpdateOptions {
    pub key_file: PathBuf,
    pub config_file: PathBuf,
    pub url: String,
    pub description: String,
    pub dry_run: bool,
}

impl UpdateOptions {
    /// Options for the given files, writing the local EasyGrid endpoint
    pub fn new(key_file: PathBuf, config_file: PathBuf) -> Self {
        Self {
            key_file,
            config_file,
            url: DEFAULT_URL.to_string(),
            description: DEFAULT_DESCRIPTION.to_string(),
            dry_run: false,
        }
    }
}

/// What a run did
#[derive(Debug)]
pub struct UpdateOutcome {
    /// Entry under `mcpServers` that received the key
    pub server_name: String,
    /// Backup location, `None` for a dry run
    pub backup_file: Option<PathBuf>,
    /// Rendered document after the update
    pub document: String,
}

/// Execute the update command
///
/// All checks and the in-memory mutation happen before the first write, so a
/// handled failure never leaves a backup or a modified config behind.
pub fn execute(options: &UpdateOptions) -> Result<UpdateOutcome> {
    tracing::debug!(
        key_file = %options.key_file.display(),
        config_file = %options.config_file.display(),
        "resolved paths"
    );

    let key = api_key::read_api_key(&options.key_file)?;
    let mut document = McpDocument::read(&options.config_file)?;
    let snapshot = document.render()?;

    let entry = EasygridEntry {
        api_key: key,
        url: options.url.clone(),
        description: options.description.clone(),
    };
    let server_name = document.apply_easygrid_entry(&entry)?;
    let updated = document.render()?;

    if options.dry_run {
        println!("{}", updated);
        println!();
        println!(
            "{} would update mcpServers.{} in {}",
            "(DRY-RUN)".blue(),
            server_name,
            options.config_file.display()
        );
        return Ok(UpdateOutcome {
            server_name: server_name.to_string(),
            backup_file: None,
            document: updated,
        });
    }

    let backup_file = config::backup_path(&options.config_file);
    write_file(&backup_file, &snapshot)?;
    tracing::debug!(path = %backup_file.display(), "wrote backup");

    write_file(&options.config_file, &updated)?;
    tracing::debug!(path = %options.config_file.display(), server = server_name, "wrote config");

    println!(
        "{} {} with API Key from {}",
        "Updated:".green(),
        options.config_file.display(),
        options.key_file.display()
    );
    println!("  Server: mcpServers.{}", server_name);
    println!("  Backup: {}", backup_file.display().dimmed());
    println!("Please restart Cursor to apply changes");

    Ok(UpdateOutcome {
        server_name: server_name.to_string(),
        backup_file: Some(backup_file),
        document: updated,
    })
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).with_context(|| format!("Failed to write: {}", path.display()))
}
