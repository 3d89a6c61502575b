use thiserror::Error;

pub type ClusterResult<T> = std::result::Result<T, ClusterError>;

#[derive(Debug, Error)]
pub enum ClusterError {
    #[error("invalid resource request: {0}")]
    InvalidResources(String),

    #[error("invalid notification target: {0}")]
    InvalidMail(String),

    #[error("batch job has no command to wrap")]
    EmptyCommand,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
