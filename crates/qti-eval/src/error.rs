//! Processing errors raised while evaluating QTI expressions

use qti_types::{BaseType, Cardinality, ValueError};
use thiserror::Error;

/// Result type for processing operations
pub type ProcessingResult<T> = Result<T, ProcessingError>;

/// Discriminated error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProcessingErrorCode {
    WrongCardinality,
    WrongBaseType,
    WrongBaseTypeOrCardinality,
    NotEnoughOperands,
    TooMuchOperands,
    NonexistentVariable,
    WrongVariableBaseType,
    WrongVariableCardinality,
    RuntimeError,
    LogicError,
    UnresolvedCustomOperator,
}

/// Errors that abort the evaluation of an expression tree
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ProcessingError {
    /// An operand has a cardinality the operator does not accept
    #[error("The '{operator}' operator {message}")]
    WrongCardinality { operator: String, message: String },

    /// An operand has a base type the operator does not accept
    #[error("The '{operator}' operator {message}")]
    WrongBaseType { operator: String, message: String },

    #[error("The '{operator}' operator {message}")]
    WrongBaseTypeOrCardinality { operator: String, message: String },

    #[error("The '{operator}' operator requires at least {min} operand(s), {found} given")]
    NotEnoughOperands {
        operator: String,
        min: usize,
        found: usize,
    },

    #[error("The '{operator}' operator accepts at most {max} operand(s), {found} given")]
    TooMuchOperands {
        operator: String,
        max: usize,
        found: usize,
    },

    /// A referenced variable is unknown or holds NULL
    #[error("Variable '{identifier}' does not exist or has no value")]
    NonexistentVariable { identifier: String },

    #[error("Variable '{identifier}' must have base type {expected}, found {found}")]
    WrongVariableBaseType {
        identifier: String,
        expected: String,
        found: String,
    },

    #[error("Variable '{identifier}' must have single cardinality, found {found}")]
    WrongVariableCardinality {
        identifier: String,
        found: Cardinality,
    },

    /// Failure of the computation itself, e.g. an invalid pattern
    #[error("Runtime error in '{operator}': {message}")]
    RuntimeError { operator: String, message: String },

    #[error("Logic error: {message}")]
    LogicError { message: String },

    #[error("Cannot resolve custom operator{}: {message}", quoted(.class))]
    UnresolvedCustomOperator {
        class: Option<String>,
        message: String,
    },

    #[error("Maximum expression depth of {max_depth} exceeded")]
    RecursionLimit { max_depth: usize },

    #[error(transparent)]
    Value(#[from] ValueError),
}

fn quoted(class: &Option<String>) -> String {
    class.as_ref().map(|c| format!(" '{}'", c)).unwrap_or_default()
}

impl ProcessingError {
    /// Discriminated code of this error
    pub fn code(&self) -> ProcessingErrorCode {
        match self {
            Self::WrongCardinality { .. } => ProcessingErrorCode::WrongCardinality,
            Self::WrongBaseType { .. } => ProcessingErrorCode::WrongBaseType,
            Self::WrongBaseTypeOrCardinality { .. } => ProcessingErrorCode::WrongBaseTypeOrCardinality,
            Self::NotEnoughOperands { .. } => ProcessingErrorCode::NotEnoughOperands,
            Self::TooMuchOperands { .. } => ProcessingErrorCode::TooMuchOperands,
            Self::NonexistentVariable { .. } => ProcessingErrorCode::NonexistentVariable,
            Self::WrongVariableBaseType { .. } => ProcessingErrorCode::WrongVariableBaseType,
            Self::WrongVariableCardinality { .. } => ProcessingErrorCode::WrongVariableCardinality,
            Self::RuntimeError { .. } | Self::RecursionLimit { .. } => ProcessingErrorCode::RuntimeError,
            Self::LogicError { .. } | Self::Value(_) => ProcessingErrorCode::LogicError,
            Self::UnresolvedCustomOperator { .. } => ProcessingErrorCode::UnresolvedCustomOperator,
        }
    }

    pub fn wrong_cardinality(operator: &str, message: impl Into<String>) -> Self {
        Self::WrongCardinality {
            operator: operator.to_string(),
            message: message.into(),
        }
    }

    pub fn wrong_base_type(operator: &str, message: impl Into<String>) -> Self {
        Self::WrongBaseType {
            operator: operator.to_string(),
            message: message.into(),
        }
    }

    pub fn wrong_base_type_or_cardinality(operator: &str, message: impl Into<String>) -> Self {
        Self::WrongBaseTypeOrCardinality {
            operator: operator.to_string(),
            message: message.into(),
        }
    }

    pub fn nonexistent_variable(identifier: impl Into<String>) -> Self {
        Self::NonexistentVariable {
            identifier: identifier.into(),
        }
    }

    pub fn wrong_variable_base_type(
        identifier: impl Into<String>,
        expected: &str,
        found: Option<BaseType>,
    ) -> Self {
        Self::WrongVariableBaseType {
            identifier: identifier.into(),
            expected: expected.to_string(),
            found: found.map_or_else(|| "none".to_string(), |bt| bt.to_string()),
        }
    }

    pub fn runtime(operator: &str, message: impl Into<String>) -> Self {
        Self::RuntimeError {
            operator: operator.to_string(),
            message: message.into(),
        }
    }

    pub fn logic(message: impl Into<String>) -> Self {
        Self::LogicError {
            message: message.into(),
        }
    }

    pub fn unresolved_custom_operator(class: Option<&str>, message: impl Into<String>) -> Self {
        Self::UnresolvedCustomOperator {
            class: class.map(str::to_string),
            message: message.into(),
        }
    }
}
