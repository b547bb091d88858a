//! API key file written by the EasyGrid key generator
//!
//! The file holds a single opaque secret. Surrounding whitespace (usually a
//! trailing newline) is ignored.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::error::UpdateError;

/// Read and trim the API key stored at `path`
pub fn read_api_key<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(UpdateError::MissingKeyFile(path.to_path_buf()).into());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read: {}", path.display()))?;

    let key = content.trim();
    if key.is_empty() {
        return Err(UpdateError::EmptyKey(path.to_path_buf()).into());
    }

    tracing::debug!(path = %path.display(), len = key.len(), "read API key");
    Ok(key.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_read_api_key_trims_newline() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "abc123").unwrap();

        assert_eq!(read_api_key(file.path()).unwrap(), "abc123");
    }

    #[test]
    fn test_read_api_key_keeps_inner_text() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "  key_id:key_secret \r\n").unwrap();

        assert_eq!(read_api_key(file.path()).unwrap(), "key_id:key_secret");
    }

    #[test]
    fn test_read_api_key_missing() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_api_key(dir.path().join("api-key")).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<UpdateError>(),
            Some(UpdateError::MissingKeyFile(_))
        ));
    }

    #[test]
    fn test_read_api_key_whitespace_only() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, " \n\t\n").unwrap();

        let err = read_api_key(file.path()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<UpdateError>(),
            Some(UpdateError::EmptyKey(_))
        ));
    }
}
