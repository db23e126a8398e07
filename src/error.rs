use thiserror::Error;

#[derive(Debug, Error)]
pub enum ArcadeError {
    #[error("unknown game: {0}")]
    UnknownGame(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),
}
