use thiserror::Error;

/// Convenient alias for fallible results returned throughout the crate.
pub type Result<T> = std::result::Result<T, ReportError>;

/// Error type covering the different failure cases that can occur while the
/// tool fetches inventory, renders reports, or merges them.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Wrapper for IO failures such as creating the reports directory.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Transport failures and non-success HTTP statuses from the dashboard API.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Raised when JSON parsing fails.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Errors bubbled up from the Excel writer implementation.
    #[error("Excel write error: {0}")]
    ExcelWrite(#[from] rust_xlsxwriter::XlsxError),

    /// Errors bubbled up from the Excel reader implementation.
    #[error("Excel read error: {0}")]
    ExcelRead(#[from] calamine::XlsxError),

    /// Raised when a required environment variable is absent or blank.
    #[error("missing configuration: environment variable {0} is not set")]
    MissingConfig(&'static str),

    /// Raised when a configuration value cannot be used as given.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Raised when a report file does not contain a readable sheet.
    #[error("invalid workbook structure: {0}")]
    InvalidWorkbook(String),

    /// Raised when the tracing subscriber fails to initialise.
    #[error("failed to initialise logging: {0}")]
    Logging(String),
}
