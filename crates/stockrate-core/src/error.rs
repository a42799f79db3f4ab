use std::num::ParseFloatError;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

/// Failure of the decimal normalizer on a single token.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecimalError {
    #[error("empty value after cleaning")]
    Empty,

    #[error(transparent)]
    Parse(#[from] ParseFloatError),

    #[error("value is not a finite number")]
    NotFinite,
}

/// Why a raw rating could not be turned into a [`crate::Rating`].
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid {field} value '{raw}': {source}")]
    InvalidNumber {
        field: &'static str,
        raw: String,
        #[source]
        source: DecimalError,
    },

    #[error("{field} is empty after cleaning")]
    EmptyValue { field: &'static str },

    #[error("invalid time format '{raw}': could not parse with any known format: {source}")]
    InvalidTimestamp {
        raw: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("field '{field}' in item {index} has unsupported type: {kind}")]
    UnsupportedFieldType {
        field: String,
        index: usize,
        kind: &'static str,
    },

    #[error("error in item {index}: {source}")]
    InvalidItem {
        index: usize,
        item: Box<serde_json::Value>,
        #[source]
        source: Box<IngestError>,
    },
}

impl IngestError {
    /// Stable machine-readable kind, suitable for API error payloads.
    ///
    /// `InvalidItem` reports the kind of the error it wraps.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            IngestError::MissingField { .. } => "missing_field",
            IngestError::InvalidNumber { .. } => "invalid_number",
            IngestError::EmptyValue { .. } => "empty_value",
            IngestError::InvalidTimestamp { .. } => "invalid_timestamp",
            IngestError::UnsupportedFieldType { .. } => "unsupported_field_type",
            IngestError::InvalidItem { source, .. } => source.code(),
        }
    }

    /// Index of the offending bulk item, if the error came from a batch.
    #[must_use]
    pub fn item_index(&self) -> Option<usize> {
        match self {
            IngestError::UnsupportedFieldType { index, .. }
            | IngestError::InvalidItem { index, .. } => Some(*index),
            _ => None,
        }
    }
}
