pub type StarfieldResult<T> = Result<T, StarfieldError>;

#[derive(thiserror::Error, Debug)]
pub enum StarfieldError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StarfieldError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}
