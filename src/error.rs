use thiserror::Error;

#[derive(Error, Debug)]
pub enum VotdubError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Not a valid YouTube link: {0}")]
    InvalidUrl(String),

    #[error("Download error: {0}")]
    Download(String),

    #[error("Translation error: {0}")]
    Translate(String),

    #[error("Media processing error: {0}")]
    Media(String),
}

pub type Result<T> = std::result::Result<T, VotdubError>;
