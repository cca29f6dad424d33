use std::path::PathBuf;
use thiserror::Error;

/// Fatal preconditions of a scan. Everything else degrades to partial data.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("root path {} does not exist", .0.display())]
    RootNotFound(PathBuf),

    #[error("root path {} is not a directory", .0.display())]
    RootNotDirectory(PathBuf),

    #[error("cannot read root directory {}", .path.display())]
    RootUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
