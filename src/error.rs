use thiserror::Error;

/// Errors from the one fallible user-input surface: turning a key/value
/// pair from the CLI into a typed preference update. Store operations
/// themselves never fail visibly.
#[derive(Error, Debug)]
pub enum PrefError {
    #[error("unknown preference key '{0}'")]
    UnknownKey(String),

    #[error("invalid value '{value}' for preference '{key}'")]
    InvalidValue { key: String, value: String },
}

/// Result type for preference parsing
pub type PrefResult<T> = Result<T, PrefError>;
