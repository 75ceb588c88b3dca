use thiserror::Error;

/// Main error type for query construction
#[derive(Error, Debug)]
pub enum SolrqError {
    #[error("Q object can be built only from field/value terms or from children, not both")]
    ConflictingArguments,

    #[error("<{operator}> operator can receive only a single Q object as operand, got {got}")]
    InvalidArity { operator: &'static str, got: usize },

    #[error("boundaries value must be one of {allowed}, got {given:?}")]
    InvalidBoundaries { given: String, allowed: String },

    #[error("factor must be either int or float, got {got}")]
    InvalidFactor { got: String },

    #[error("Invalid timestamp {given:?}: {source}")]
    InvalidTimestamp {
        given: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("Duration out of range: {days} days, {seconds} seconds, {milliseconds} milliseconds")]
    InvalidDuration {
        days: i64,
        seconds: i64,
        milliseconds: i64,
    },

    #[error("Query document error: {0}")]
    Document(#[from] serde_json::Error),
}

/// Result type alias for query construction
pub type Result<T> = std::result::Result<T, SolrqError>;

impl SolrqError {
    /// Invalid-argument class: the caller broke a construction contract
    pub fn is_usage_error(&self) -> bool {
        matches!(
            self,
            SolrqError::ConflictingArguments
                | SolrqError::InvalidArity { .. }
                | SolrqError::InvalidBoundaries { .. }
        )
    }

    /// Type-error class: a value of the wrong kind was supplied
    pub fn is_type_error(&self) -> bool {
        matches!(
            self,
            SolrqError::InvalidFactor { .. }
                | SolrqError::InvalidTimestamp { .. }
                | SolrqError::InvalidDuration { .. }
        )
    }
}
