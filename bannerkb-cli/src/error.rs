use thiserror::Error;

/// Errors that can occur during CLI command execution.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// I/O error
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// Database open or migration failed
    #[error("Database error: {0}")]
    Schema(#[from] bannerkb_db::schema::SchemaError),

    /// Database operation failed
    #[error("Database error: {0}")]
    Database(#[from] bannerkb_db::OperationError),

    /// Import pipeline failed
    #[error("Import error: {0}")]
    Import(#[from] bannerkb_import::ImportError),

    /// Source text could not be parsed as CSV
    #[error("CSV error: {0}")]
    Csv(#[from] bannerkb_import::CsvError),

    /// Spreadsheet or image fetch failed
    #[error("Fetch error: {0}")]
    Sheet(#[from] bannerkb_sheets::SheetError),

    /// AI call failed
    #[error("AI error: {0}")]
    Ai(#[from] bannerkb_ai::AiError),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),

    /// Catch-all for other errors
    #[error("{0}")]
    Other(String),
}

impl CliError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub(crate) fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }
}
