use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CircuitError {
    #[error("circuit document not found: {0}")]
    NotFound(PathBuf),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("invalid circuit document, {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("malformed {field} value {value:?}")]
    MalformedField { field: &'static str, value: String },
}
