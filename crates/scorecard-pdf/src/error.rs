use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Failed to build PDF content: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("Failed to serialize PDF: {0}")]
    Serialize(String),

    #[error("Failed to write report: {0}")]
    Io(#[from] std::io::Error),
}
