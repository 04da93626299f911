//! Path-or-literal input resolution
//!
//! The engine only ever sees resolved text; everything filesystem-shaped
//! lives here.

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Input resolution error
#[derive(Debug, Error)]
pub enum InputError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Resolve a caller-supplied argument to the text to analyze
///
/// If the argument names an existing regular file, its contents are read and
/// returned; otherwise the argument itself is the text. Only a file that
/// exists but cannot be read produces an error.
pub fn resolve(arg: &str) -> Result<String, InputError> {
    let path = Path::new(arg);

    if path.is_file() {
        fs::read_to_string(path).map_err(|source| InputError::Read {
            path: path.to_path_buf(),
            source,
        })
    } else {
        Ok(arg.to_string())
    }
}
