use thiserror::Error;

/// Errors that can occur while serving the reference database.
#[derive(Error, Debug)]
pub enum FolioError {
    #[error("tag not found: {tag}")]
    NotFound { tag: String },

    #[error("bad request: {message}")]
    BadRequest { message: String },

    #[error("database error: {message} (operation: {operation})")]
    Database { message: String, operation: String },

    #[error("config error: {message}")]
    Config { message: String },

    #[error("render error: {0}")]
    Render(#[from] askama::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias for results using `FolioError`.
pub type Result<T> = std::result::Result<T, FolioError>;
