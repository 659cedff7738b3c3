use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid noise pattern `{pattern}`: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Embedding backend failed: {0}")]
    Embedding(String),
}
