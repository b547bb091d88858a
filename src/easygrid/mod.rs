//! Files produced by the EasyGrid tooling

pub mod api_key;

// Re-exports for library consumers
#[allow(unused_imports)]
pub use api_key::read_api_key;
