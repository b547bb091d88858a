//! easygrid-cursor-mcp library
//!
//! Wires a locally stored EasyGrid API key into Cursor's MCP server
//! configuration (~/.cursor/mcp.json).

pub mod commands;
pub mod config;
pub mod cursor;
pub mod easygrid;
pub mod error;
