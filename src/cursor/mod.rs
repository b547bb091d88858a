//! Cursor IDE configuration files

pub mod mcp_json;

// Re-exports for library consumers
#[allow(unused_imports)]
pub use mcp_json::{EasygridEntry, McpDocument};
