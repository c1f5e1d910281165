//! Error type for a single hashmv invocation.

use std::io;
use std::path::PathBuf;

/// Failure of one invocation. Directory errors are detected before any
/// filesystem mutation; `Io` may surface after a partial step (e.g. the
/// size gate read the metadata but the rename failed).
#[derive(Debug, thiserror::Error)]
pub enum HashmvError {
    /// `--hold` does not name an existing directory.
    #[error("hold directory not found: {} (check the spelling and that the directory exists)", .0.display())]
    HoldDirMissing(PathBuf),

    /// `--web` does not name an existing directory.
    #[error("web directory not found: {} (check the spelling and that the directory exists)", .0.display())]
    WebDirMissing(PathBuf),

    #[error("{op} {}: {source}", .path.display())]
    Io {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl HashmvError {
    pub(crate) fn io(op: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        HashmvError::Io {
            op,
            path: path.into(),
            source,
        }
    }

    /// Process exit status for this error: 1 for a missing directory, 2 otherwise.
    pub fn exit_code(&self) -> i32 {
        match self {
            HashmvError::HoldDirMissing(_) | HashmvError::WebDirMissing(_) => 1,
            HashmvError::Io { .. } => 2,
        }
    }
}

pub type Result<T> = std::result::Result<T, HashmvError>;
