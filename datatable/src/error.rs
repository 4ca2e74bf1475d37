//! Error types

/// Errors raised by the table engine.
///
/// State transitions themselves never fail. Errors only come from the
/// boundaries: parsing action tags, building rows from JSON and loading a
/// configuration.
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    /// An action tag that the state engine does not know about.
    #[error("Unhandled action type: {0}")]
    UnknownAction(String),

    /// A record was built without its identity field.
    #[error("Key field '{field}' not found in record")]
    MissingKey { field: String },

    /// The input could not be turned into a record.
    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    /// The configuration document could not be deserialized.
    #[error("Invalid table configuration: {0}")]
    Config(#[from] serde_json::Error),
}

impl TableError {
    /// Creates a new missing key error.
    pub fn missing_key(field: impl Into<String>) -> Self {
        Self::MissingKey {
            field: field.into(),
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, TableError>;
