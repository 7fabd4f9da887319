//! Value model errors

use thiserror::Error;

use crate::{BaseType, Cardinality};

/// Result type for value construction
pub type ValueResult<T> = Result<T, ValueError>;

/// Errors raised while building or parsing runtime values
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// Unknown base type name
    #[error("Unknown base type '{0}'")]
    UnknownBaseType(String),

    /// Unknown base type wire code
    #[error("Unknown base type code {0}")]
    UnknownBaseTypeCode(u8),

    /// Unknown cardinality name
    #[error("Unknown cardinality '{0}'")]
    UnknownCardinality(String),

    /// Unknown cardinality wire code
    #[error("Unknown cardinality code {0}")]
    UnknownCardinalityCode(u8),

    /// A container element does not match the container base type
    #[error("Container of base type {expected} cannot hold a value of base type {found}")]
    BaseTypeMismatch { expected: BaseType, found: BaseType },

    /// A value of a given cardinality was expected
    #[error("Expected a value of cardinality {expected}, found {found}")]
    CardinalityMismatch {
        expected: Cardinality,
        found: Cardinality,
    },

    /// The coords base type has no runtime scalar
    #[error("Base type {0} cannot be held by a runtime value")]
    UnsupportedBaseType(BaseType),

    /// Malformed ISO 8601 duration
    #[error("Invalid ISO 8601 duration '{0}'")]
    InvalidDuration(String),

    /// Malformed scalar literal
    #[error("Invalid {base_type} literal '{literal}'")]
    InvalidLiteral { base_type: BaseType, literal: String },

    /// Malformed shape coordinates
    #[error("Invalid coords for shape {shape}: {message}")]
    InvalidCoords { shape: String, message: String },
}

impl ValueError {
    /// Create an invalid literal error
    pub fn invalid_literal(base_type: BaseType, literal: impl Into<String>) -> Self {
        Self::InvalidLiteral {
            base_type,
            literal: literal.into(),
        }
    }

    /// Create an invalid coords error
    pub fn invalid_coords(shape: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidCoords {
            shape: shape.into(),
            message: message.into(),
        }
    }
}
