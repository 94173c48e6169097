//! Shared credentials/config file store.
//!
//! The store is two plain-text files: the credentials file, whose blocks
//! carry the secrets, and the config file, whose blocks carry per-profile
//! settings. Both are keyed by profile name and are read and rewritten
//! independently.

mod block;
mod parser;

pub use block::{remove_block, BlockLayout, HeaderStyle};
pub use parser::{parse_profiles, parse_profiles_from};

use std::io::{self, BufRead};
use std::path::{Path, PathBuf};

use serde::Serialize;

/// File access failures raised while reading or rewriting the store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl StoreError {
    pub(crate) fn io(path: &Path, source: io::Error) -> Self {
        StoreError::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    /// The underlying I/O error kind.
    pub fn kind(&self) -> io::ErrorKind {
        match self {
            StoreError::Io { source, .. } => source.kind(),
        }
    }
}

/// Raw lines of `reader` with the `\n` or `\r\n` terminator stripped.
///
/// Store files are not required to be UTF-8, so lines stay as bytes.
pub(crate) fn raw_lines<R: BufRead>(
    reader: R,
) -> impl Iterator<Item = io::Result<Vec<u8>>> {
    reader.split(b'\n').map(|line| {
        line.map(|mut line| {
            if line.last() == Some(&b'\r') {
                line.pop();
            }
            line
        })
    })
}

/// Locations of the two store files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StorePaths {
    pub credentials_file: PathBuf,
    pub config_file: PathBuf,
}

impl StorePaths {
    pub fn new(credentials_file: impl Into<PathBuf>, config_file: impl Into<PathBuf>) -> Self {
        Self {
            credentials_file: credentials_file.into(),
            config_file: config_file.into(),
        }
    }
}

/// Block shapes used when deleting from each store file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreLayouts {
    pub credentials: BlockLayout,
    pub config: BlockLayout,
}

impl Default for StoreLayouts {
    fn default() -> Self {
        Self {
            credentials: BlockLayout::credentials(),
            config: BlockLayout::config(),
        }
    }
}
