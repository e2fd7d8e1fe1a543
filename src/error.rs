//! Error handling for JobFit

use thiserror::Error;

#[derive(Error, Debug)]
pub enum JobFitError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF extraction error: {0}")]
    PdfExtraction(String),

    #[error("PDF rendering error: {0}")]
    PdfRender(String),

    #[error("Missing input: {0}")]
    MissingInput(String),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Rate limited by provider: {0}")]
    RateLimit(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("No JSON object found in model output")]
    NoJsonFound,

    #[error("Response schema mismatch: {0}")]
    SchemaMismatch(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, JobFitError>;
