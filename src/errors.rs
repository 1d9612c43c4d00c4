use thiserror::Error;

#[derive(Debug, Error)]
pub enum CsfGraphError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("io error: {0}")]
    Io(String),
}

impl CsfGraphError {
    pub fn invalid_input<T: Into<String>>(msg: T) -> Self {
        CsfGraphError::InvalidInput(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        CsfGraphError::NotFound(msg.into())
    }

    pub fn io<T: Into<String>>(msg: T) -> Self {
        CsfGraphError::Io(msg.into())
    }
}
