use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures that stop a trajectory from loading at all. Malformed content and
/// read errors past the open are never fatal; they degrade to zero-valued
/// records instead.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Cannot find trajectory input data file at path {}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to allocate memory for {count} trajectory records")]
    Allocation { count: usize },
}
