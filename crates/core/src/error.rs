use thiserror::Error;

#[derive(Error, Debug)]
pub enum GroveError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Syntax tree error: {0}")]
    Tree(#[from] grove_syntax::TreeError),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Unknown document: {0}")]
    UnknownDocument(String),
}

pub type Result<T> = std::result::Result<T, GroveError>;
