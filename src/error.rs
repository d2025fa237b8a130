//! Unified error type.

use std::path::PathBuf;

use thiserror::Error;

/// The error type returned by sitesim's fallible operations.
///
/// Per-request failures (no acceptable representation, unreadable file) are
/// expressed as HTTP [`Response`](crate::Response) values, not as `Error`s.
/// This type surfaces infrastructure and configuration failures: binding a
/// port, walking the website directory, or building an inconsistent route
/// table. All of them are fatal to startup.
#[derive(Debug, Error)]
pub enum Error {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    /// The website root could not be listed.
    #[error("cannot read {}: {source}", path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("website root {} is not a directory", .0.display())]
    NotADirectory(PathBuf),

    #[error("{} is not inside the website root", .0.display())]
    OutsideRoot(PathBuf),

    /// Two files claim the same route, extension and method.
    #[error("{} and {} both serve `{key}` as .{extension}", first.display(), second.display())]
    DuplicateFile {
        key: String,
        extension: String,
        first: PathBuf,
        second: PathBuf,
    },

    /// Two rules expanded to the same URL key.
    #[error("route `{0}` is defined more than once")]
    DuplicateRoute(String),

    /// The router refused a pattern, usually because it conflicts with one
    /// registered earlier.
    #[error("invalid route `{path}`: {source}")]
    InvalidRoute {
        path: String,
        #[source]
        source: matchit::InsertError,
    },

    #[error("cannot dump the route table: {0}")]
    Dump(#[source] serde_json::Error),
}
