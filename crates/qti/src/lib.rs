//! IMS QTI runtime for Rust
//!
//! This crate bundles the QTI runtime crates:
//! - [`types`]: base types, cardinalities, scalars, containers and records
//! - [`expr`]: the expression tree and operator descriptors
//! - [`eval`]: the expression engine and custom operator registry
//! - [`binary`]: binary persistence of variable values and session state
//!
//! # Example
//!
//! ```
//! use qti::{Expression, ExpressionEngine, Operator, QtiValue, State};
//!
//! let expr = Expression::operator(
//!     Operator::Gte,
//!     [Expression::variable("SCORE"), Expression::float(0.5)],
//! );
//! let state = State::new().with_variable(
//!     qti::Variable::with_value(
//!         qti::VariableDeclaration::new("SCORE", qti::Cardinality::Single, qti::BaseType::Float),
//!         QtiValue::from(0.75),
//!     )
//!     .unwrap(),
//! );
//! let passed = ExpressionEngine::new().evaluate_in_scope(&expr, &state).unwrap();
//! assert_eq!(passed, Some(QtiValue::from(true)));
//! ```

// Re-export all public APIs from internal crates
pub use qti_binary as binary;
pub use qti_eval as eval;
pub use qti_expr as expr;
pub use qti_types as types;

pub use qti_eval::custom;

// Convenience re-exports
pub use qti_binary::{
    BinaryStream, FileStream, ItemSessionSnapshot, MemoryStream, QtiBinaryStreamAccess,
};
pub use qti_eval::{
    CustomOperator, CustomOperatorRegistry, ExpressionEngine, ProcessingError,
    ProcessingErrorCode, State,
};
pub use qti_expr::{Expression, Operator};
pub use qti_types::{BaseType, Cardinality, QtiScalar, QtiValue, Variable, VariableDeclaration};
