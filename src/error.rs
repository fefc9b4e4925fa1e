use thiserror::Error;
use tonic::Status;

/// Main error type for the application.
#[derive(Error, Debug)]
pub enum AppError {
    /// Requested page number is outside the volume's page range.
    #[error("page {number} out of range: volume has {pages} pages")]
    OutOfRange {
        /// The requested page number.
        number: u32,
        /// Total pages in the volume.
        pages: u32,
    },

    /// An in-range page has no backing data (corrupt or inconsistent volume).
    #[error("not found: {0}")]
    NotFound(String),

    /// Volume layout is unusable (missing metadata, page count mismatch).
    #[error("invalid volume: {0}")]
    InvalidFormat(String),

    /// I/O error reading the backing medium.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// ZIP archive error.
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Metadata record parsing error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<AppError> for Status {
    fn from(err: AppError) -> Self {
        tracing::error!(error = %err, "Request error");

        match &err {
            AppError::OutOfRange { .. } => Status::out_of_range(err.to_string()),
            AppError::NotFound(_) => Status::not_found(err.to_string()),
            AppError::Io(_) => Status::unavailable(err.to_string()),
            AppError::Zip(_) | AppError::Json(_) => Status::data_loss(err.to_string()),
            _ => Status::internal(err.to_string()),
        }
    }
}

/// Result type alias for the application.
pub type Result<T> = std::result::Result<T, AppError>;
