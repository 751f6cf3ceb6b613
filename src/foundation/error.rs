/// Crate-wide result alias.
pub type FactReelResult<T> = Result<T, FactReelError>;

#[derive(thiserror::Error, Debug)]
pub enum FactReelError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("evaluation error: {0}")]
    Evaluation(String),

    #[error("serialization error: {0}")]
    Serde(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FactReelError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    pub fn evaluation(msg: impl Into<String>) -> Self {
        Self::Evaluation(msg.into())
    }

    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<reqwest::Error> for FactReelError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            Self::Serde(e.to_string())
        } else {
            Self::Network(e.to_string())
        }
    }
}
