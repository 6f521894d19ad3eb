/// Error types for template generation and CSV conversion
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SheetError {
    /// The first header cell is missing or is not exactly `key`
    MissingKeyColumn,
    /// The header has no language columns after `key`
    NoLanguageColumns,
    /// The CSV reader rejected the input
    ParseError(String),
    /// The archive could not be assembled
    PackagingError(String),
    /// Unexpected failure while building or serializing documents
    ConversionFailed(String),
    /// No target language left once the base language is removed
    EmptyTargetSet,
    /// A code that is not part of the language catalog
    InvalidCode(String),
    /// A malformed output file name pattern
    InvalidPattern(String),
    /// A catalog that could not be loaded or validated
    CatalogError(String),
    /// File system failure in one of the loaders
    IoError(String),
}

impl SheetError {
    /// Short, human-readable message for the status line.
    ///
    /// Parser detail is the only lower-level text shown to the user; every
    /// other variant keeps its detail for the log.
    pub fn user_message(&self) -> String {
        match self {
            SheetError::MissingKeyColumn => "Error: First column must be \"key\".".to_string(),
            SheetError::NoLanguageColumns => {
                "Error: Provide at least one language column.".to_string()
            }
            SheetError::ParseError(msg) => format!("Failed to parse CSV: {}", msg),
            SheetError::PackagingError(_) => "Failed to build archive.".to_string(),
            SheetError::ConversionFailed(_) => {
                "Conversion failed. Check logs for details.".to_string()
            }
            SheetError::EmptyTargetSet => "Please select at least one target language".to_string(),
            SheetError::InvalidCode(code) => format!("Unknown language code: {}", code),
            SheetError::InvalidPattern(_) => "Invalid output file name pattern.".to_string(),
            SheetError::CatalogError(_) => "Failed to load language catalog.".to_string(),
            SheetError::IoError(msg) => msg.clone(),
        }
    }
}

impl std::fmt::Display for SheetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SheetError::MissingKeyColumn => write!(f, "First header cell must be \"key\""),
            SheetError::NoLanguageColumns => write!(f, "No language columns in header"),
            SheetError::ParseError(msg) => write!(f, "CSV parse error: {}", msg),
            SheetError::PackagingError(msg) => write!(f, "Packaging error: {}", msg),
            SheetError::ConversionFailed(msg) => write!(f, "Conversion failed: {}", msg),
            SheetError::EmptyTargetSet => write!(f, "Target language set is empty"),
            SheetError::InvalidCode(code) => write!(f, "Invalid language code: {}", code),
            SheetError::InvalidPattern(msg) => write!(f, "Invalid file name pattern: {}", msg),
            SheetError::CatalogError(msg) => write!(f, "Catalog error: {}", msg),
            SheetError::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl std::error::Error for SheetError {}

impl From<csv::Error> for SheetError {
    fn from(err: csv::Error) -> Self {
        SheetError::ParseError(err.to_string())
    }
}

impl From<zip::result::ZipError> for SheetError {
    fn from(err: zip::result::ZipError) -> Self {
        SheetError::PackagingError(err.to_string())
    }
}

impl From<serde_json::Error> for SheetError {
    fn from(err: serde_json::Error) -> Self {
        SheetError::ConversionFailed(err.to_string())
    }
}

impl From<std::io::Error> for SheetError {
    fn from(err: std::io::Error) -> Self {
        SheetError::IoError(err.to_string())
    }
}

/// Result type for arbsheet operations
pub type SheetResult<T> = Result<T, SheetError>;
