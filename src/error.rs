// src/error.rs

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("no git repository encloses {}", path.display())]
    RepositoryNotFound { path: PathBuf },

    #[error("{path} has no commit history")]
    PathNotTracked { path: String },

    #[error("cannot read {path} at {commit}")]
    SnapshotUnavailable {
        commit: String,
        path: String,
        #[source]
        source: git2::Error,
    },

    #[error("unknown revision {revision}")]
    UnknownRevision { revision: String },

    #[error("invalid line range {start}-{end}")]
    InvalidRange { start: usize, end: usize },

    #[error("search cancelled")]
    Cancelled,

    #[error(transparent)]
    Git(#[from] git2::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
