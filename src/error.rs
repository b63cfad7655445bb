use thiserror::Error;

pub type Result<T> = std::result::Result<T, DashboardError>;

/// Structural failure to read an uploaded file. The whole upload is rejected.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unreadable workbook: {0}")]
    Workbook(#[from] calamine::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Unsupported file type: {0}")]
    UnsupportedFormat(String),
}

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("An upload is already in progress")]
    UploadInProgress,

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Missing required data: {0}")]
    MissingData(String),

    #[error("Async task error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

impl DashboardError {
    /// True when the upload failed because the file itself could not be read.
    pub fn is_parse_error(&self) -> bool {
        matches!(self, DashboardError::Parse(_))
    }
}
