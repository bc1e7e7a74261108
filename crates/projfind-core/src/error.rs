use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Corpus store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Lexical dictionary unavailable: {0}")]
    DictionaryUnavailable(String),

    #[error("Ingest failed: {0}")]
    Ingest(String),
}

pub type Result<T> = std::result::Result<T, Error>;
