use std::{io, path::PathBuf};
use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Every way a run can fail, all of them end with exit status 1
#[derive(Debug, Error)]
pub enum Error {
    /// bad or missing command line arguments
    #[error("{0}")]
    Usage(String),

    #[error("failed to list the content of {}: {cause:#}", root.display())]
    Traversal { root: PathBuf, cause: anyhow::Error },

    #[error("failed to create the S3 session: {0:#}")]
    Session(anyhow::Error),

    #[error("failed to open: {}: {source}", path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to compress: {}: {source}", path.display())]
    Compression {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("unsupported compression: {0:?}, valid values are \"\", \"gzip\" and \"br\"")]
    UnsupportedCompression(String),

    #[error("failed to upload: {}: {cause:#}", path.display())]
    Upload { path: PathBuf, cause: anyhow::Error },

    #[error("failed to list bucket content for syncing: {0:#}")]
    List(anyhow::Error),

    #[error("failed to delete {key}: {cause:#}")]
    Delete { key: String, cause: anyhow::Error },

    #[error("interrupted")]
    Interrupted,
}
