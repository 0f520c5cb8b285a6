use thiserror::Error;

use shared_types::InvalidSquareFootage;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ComplianceError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid input: unknown vent type '{0}'")]
    UnknownVentType(String),
}

impl From<InvalidSquareFootage> for ComplianceError {
    fn from(err: InvalidSquareFootage) -> Self {
        ComplianceError::InvalidInput(err.to_string())
    }
}

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to parse vent catalog: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Failed to read vent catalog: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid vent catalog: {0}")]
    Invalid(String),
}
