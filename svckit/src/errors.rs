use thiserror::Error;

#[derive(Error, Debug)]
pub enum InsightError {
    #[error("Configuration error: {0}")]
    ConfigError(String),
    
    #[error("Validation error: {0}")]
    ValidationError(String),
    
    #[error("Unknown period: {0}")]
    UnknownPeriod(String),
    
    #[error("Invalid date '{value}': expected YYYY-MM-DD")]
    InvalidDate { value: String },
    
    #[error("Network error: {0}")]
    NetworkError(String),
    
    #[error("Unknown error: {0}")]
    Unknown(String),
}

pub type Result<T> = std::result::Result<T, InsightError>;

#[cfg(feature = "server")]
impl From<config::ConfigError> for InsightError {
    fn from(err: config::ConfigError) -> Self {
        InsightError::ConfigError(err.to_string())
    }
}

impl From<anyhow::Error> for InsightError {
    fn from(err: anyhow::Error) -> Self {
        InsightError::Unknown(err.to_string())
    }
}
