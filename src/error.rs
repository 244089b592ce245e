use std::io;

/// Failures of a page load. None of these are fatal; the list absorbs them.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LoadError {
    #[error("fetch failed: {0}")]
    FetchFailure(String),

    /// The result resolved after the list was torn down or reset.
    #[error("result arrived after teardown")]
    StaleTeardown,

    #[error("malformed page: {0}")]
    MalformedPage(String),
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
