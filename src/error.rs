use thiserror::Error;

#[derive(Debug, Error)]
pub enum PermitError {
    #[error("fetch from {source_desc} failed: {message}")]
    Fetch {
        source_desc: String,
        message: String,
    },
    #[error("fetch from {source_desc} returned HTTP {status}")]
    HttpStatus { source_desc: String, status: u16 },
    #[error("failed to read {path}: {message}")]
    Read { path: String, message: String },
    #[error("dataset is not valid JSON: {0}")]
    Parse(String),
    #[error("dataset must be a JSON array, got {0}")]
    NotAnArray(&'static str),
    #[error("config file invalid or unreadable: {0}")]
    InvalidConfig(String),
}
