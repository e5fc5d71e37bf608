use thiserror::Error;

/// Document-level failures of the record-recovery engine.
///
/// Per-line and per-page problems never show up here; they are absorbed by
/// the classifier and the scanner.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid document identifier: {0}")]
    InvalidIdentifier(String),

    #[error("Invalid scan configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("No records were extracted from the document")]
    NoRecords,
}
