use thiserror::Error;

#[derive(Debug, Error)]
pub enum StageError {
    #[error("{node} node could not be created: {reason}")]
    NodeCreation { node: &'static str, reason: String },

    #[error("invalid scene configuration: {0}")]
    InvalidConfig(String),

    #[error("invalid preset value {value:?} at position {position}")]
    InvalidPreset { position: usize, value: String },

    #[error("effect send {0} does not exist")]
    UnknownEffect(usize),

    #[error("playback failed: {0}")]
    Playback(String),
}

pub type Result<T> = std::result::Result<T, StageError>;
