use std::fmt;

/// Malformed input that the engine or the dataset codec refuses to interpret.
///
/// Inside the engine these come only from bad configuration tables (a color
/// constant that is not valid hex); at the import boundary they describe a
/// dataset the caller should reject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    InvalidHex(String),
    InvalidJson(String),
    MissingEntries,
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::InvalidHex(hex) => write!(f, "invalid hex color: {hex:?}"),
            FormatError::InvalidJson(msg) => write!(f, "invalid JSON: {msg}"),
            FormatError::MissingEntries => {
                write!(f, "invalid JSON format: missing entries array")
            }
        }
    }
}

impl std::error::Error for FormatError {}

impl From<serde_json::Error> for FormatError {
    fn from(e: serde_json::Error) -> Self {
        FormatError::InvalidJson(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, FormatError>;
