use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid album filter: {0:?}")]
    InvalidAlbum(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
