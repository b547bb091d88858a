//! easygrid-cursor-mcp: point Cursor's MCP config at the local EasyGrid server
//!
//! Reads the API key written by the EasyGrid key generator and stores it in
//! the `easygrid` entry of ~/.cursor/mcp.json, keeping a backup of the
//! previous file next to it.

use anyhow::Result;
use clap::Parser;
use easygrid_cursor_mcp::commands::update::{self, UpdateOptions};
use easygrid_cursor_mcp::config;
use easygrid_cursor_mcp::error::UpdateError;
use owo_colors::OwoColorize;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "easygrid-cursor-mcp")]
#[command(about = "Inject the EasyGrid API key into Cursor's mcp.json", long_about = None)]
#[command(version)]
struct Cli {
    /// API key file (default: ~/.easygrid/api-key)
    #[arg(long)]
    key_file: Option<PathBuf>,

    /// Cursor MCP config file (default: ~/.cursor/mcp.json)
    #[arg(long)]
    config: Option<PathBuf>,

    /// MCP endpoint written to the entry
    #[arg(long)]
    url: Option<String>,

    /// Description written to the entry
    #[arg(long)]
    description: Option<String>,

    /// Show the resulting config without writing anything
    #[arg(short = 'n', long)]
    dry_run: bool,

    /// Print debug logs to stderr
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    /// Flags win; missing paths fall back to the home directory
    fn into_options(self) -> Result<UpdateOptions> {
        let key_file = match self.key_file {
            Some(path) => path,
            None => config::default_api_key_path()?,
        };
        let config_file = match self.config {
            Some(path) => path,
            None => config::default_mcp_config_path()?,
        };

        let mut options = UpdateOptions::new(key_file, config_file);
        if let Some(url) = self.url {
            options.url = url;
        }
        if let Some(description) = self.description {
            options.description = description;
        }
        options.dry_run = self.dry_run;
        Ok(options)
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    run(cli, &mut io::stdout())
}

/// Run the update, reporting handled failures on `out`
fn run(cli: Cli, out: &mut impl Write) -> Result<ExitCode> {
    if cli.dry_run {
        writeln!(out, "{}", "(DRY-RUN MODE - no changes will be made)".blue())?;
    }

    let options = cli.into_options()?;
    tracing::debug!(
        key_file = %options.key_file.display(),
        config_file = %options.config_file.display(),
        "using files"
    );

    match update::execute(&options) {
        Ok(_) => Ok(ExitCode::SUCCESS),
        Err(err) => match err.downcast_ref::<UpdateError>() {
            Some(handled) => {
                writeln!(out, "{} {}", "Error:".red(), handled)?;
                if let Some(hint) = handled.hint() {
                    writeln!(out, "{}", hint)?;
                }
                Ok(ExitCode::FAILURE)
            }
            None => Err(err),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_arguments_uses_defaults() {
        let cli = Cli::try_parse_from(["easygrid-cursor-mcp"]).unwrap();
        assert!(!cli.dry_run);
        assert!(cli.url.is_none());
        assert!(cli.description.is_none());
    }

    #[test]
    fn test_overrides_apply() {
        let cli = Cli::try_parse_from([
            "easygrid-cursor-mcp",
            "--key-file",
            "/tmp/key",
            "--config",
            "/tmp/mcp.json",
            "--url",
            "http://grid:9000/api/mcp/v1",
            "-n",
        ])
        .unwrap();

        let options = cli.into_options().unwrap();
        assert_eq!(options.key_file, PathBuf::from("/tmp/key"));
        assert_eq!(options.config_file, PathBuf::from("/tmp/mcp.json"));
        assert_eq!(options.url, "http://grid:9000/api/mcp/v1");
        assert_eq!(options.description, "EasyGrid CRUD - MCP HTTP");
        assert!(options.dry_run);
    }

    /// Run the CLI against files in a temp dir, returning the exit code and stdout
    fn run_with(dir: &std::path::Path, extra: &[&str]) -> (ExitCode, String) {
        let key_file = dir.join("api-key");
        let config_file = dir.join("mcp.json");
        let mut args = vec![
            "easygrid-cursor-mcp".to_string(),
            "--key-file".to_string(),
            key_file.to_string_lossy().to_string(),
            "--config".to_string(),
            config_file.to_string_lossy().to_string(),
        ];
        args.extend(extra.iter().map(|s| s.to_string()));

        let cli = Cli::try_parse_from(args).unwrap();
        let mut out = Vec::new();
        let code = run(cli, &mut out).unwrap();
        (code, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_run_missing_key_file_prints_hint() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("mcp.json"), r#"{"mcpServers":{}}"#).unwrap();

        let (code, out) = run_with(dir.path(), &[]);

        assert_eq!(code, ExitCode::FAILURE);
        assert!(out.contains("Error:"), "{out}");
        assert!(out.contains("API Key file not found at"), "{out}");
        assert!(
            out.contains("Run: go run server/cmd/mcp-api-key/main.go -action=create"),
            "{out}"
        );
        assert_eq!(
            std::fs::read_to_string(dir.path().join("mcp.json")).unwrap(),
            r#"{"mcpServers":{}}"#
        );
        assert!(!dir.path().join("mcp.json.bak").exists());
    }

    #[test]
    fn test_run_whitespace_key_has_no_hint() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("api-key"), " \n\t").unwrap();
        std::fs::write(dir.path().join("mcp.json"), r#"{"mcpServers":{}}"#).unwrap();

        let (code, out) = run_with(dir.path(), &[]);

        assert_eq!(code, ExitCode::FAILURE);
        assert!(out.contains("API Key is empty"), "{out}");
        assert!(!out.contains("Run:"), "{out}");
        assert!(!dir.path().join("mcp.json.bak").exists());
    }

    #[test]
    fn test_run_missing_config_fails() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("api-key"), "abc123\n").unwrap();

        let (code, out) = run_with(dir.path(), &[]);

        assert_eq!(code, ExitCode::FAILURE);
        assert!(out.contains("mcp.json not found at"), "{out}");
        assert!(!out.contains("Run:"), "{out}");
        assert!(!dir.path().join("mcp.json").exists());
    }

    #[test]
    fn test_run_success() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("api-key"), "abc123\n").unwrap();
        std::fs::write(dir.path().join("mcp.json"), r#"{"mcpServers":{}}"#).unwrap();

        let (code, out) = run_with(dir.path(), &[]);

        assert_eq!(code, ExitCode::SUCCESS);
        assert!(!out.contains("Error:"), "{out}");
        let written: serde_json::Value = serde_json::from_str(
            &std::fs::read_to_string(dir.path().join("mcp.json")).unwrap(),
        )
        .unwrap();
        assert_eq!(
            written["mcpServers"]["easygrid"]["headers"]["X-MCP-API-Key"],
            "abc123"
        );
        assert!(dir.path().join("mcp.json.bak").exists());
    }

    #[test]
    fn test_run_dry_run_banner() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("api-key"), "abc123").unwrap();
        std::fs::write(dir.path().join("mcp.json"), "{}").unwrap();

        let (code, out) = run_with(dir.path(), &["--dry-run"]);

        assert_eq!(code, ExitCode::SUCCESS);
        assert!(out.contains("DRY-RUN MODE"), "{out}");
        assert_eq!(
            std::fs::read_to_string(dir.path().join("mcp.json")).unwrap(),
            "{}"
        );
    }
}
