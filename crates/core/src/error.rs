use thiserror::Error;

/// Reason a raw session value could not be coerced into its typed form.
///
/// These never reach the user. The slot validator logs them and substitutes
/// the field's default at the call site.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("slot is not set")]
    Missing,

    #[error("expected {expected}, got {found}")]
    WrongType {
        expected: &'static str,
        found: &'static str,
    },

    #[error("not an integer: {0:?}")]
    NotAnInteger(String),

    #[error("value {value} outside {min}..={max}")]
    OutOfRange { value: i64, min: i64, max: i64 },

    #[error("unknown municipality: {0}")]
    UnknownMunicipality(String),

    #[error("no code in selection matched the code table")]
    NoValidCodes,
}

/// Code table loading errors
#[derive(Debug, Error)]
pub enum CodeTableError {
    #[error("failed to read code tables from {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse code tables: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Failure to recover an access token from a session transfer redirect URL
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("invalid redirect url: {0}")]
    InvalidUrl(String),

    #[error("redirect url has no {0} query parameter")]
    MissingParameter(&'static str),
}
