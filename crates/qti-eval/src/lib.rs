//! QTI expression evaluation engine
//!
//! Evaluates [`qti_expr::Expression`] trees against a variable scope:
//!
//! - `ExpressionEngine`: walks the tree, resolving each operator node to a
//!   processor before evaluating its operands
//! - `ProcessorFactory`: maps operators to built-in processors and resolves
//!   `customOperator` classes through a `CustomOperatorRegistry`
//! - `Operands`: the evaluated operand list and the contract predicates
//!   (NULL, cardinality, base type) processors check
//! - `EvaluationContext`: variable scope, random source and depth tracking
//!
//! # NULL
//!
//! NULL is `None`. Empty strings and containers without a non-null element
//! are NULL too. Most operators return NULL when any operand is NULL; the
//! exceptions are documented on the operators themselves:
//!
//! - `and`: false dominates (NULL and false = false)
//! - `or`: true dominates (NULL or true = true)
//! - `isNull`, `containerSize`: never NULL
//! - `multiple`, `ordered`, `repeat`: NULL operands are skipped
//!
//! # Example
//!
//! ```
//! use qti_eval::{ExpressionEngine, State};
//! use qti_expr::{Expression, Operator};
//! use qti_types::QtiValue;
//!
//! let engine = ExpressionEngine::new();
//! let expr = Expression::operator(Operator::Sum, [Expression::integer(1), Expression::integer(2)]);
//! let result = engine.evaluate_in_scope(&expr, &State::new()).unwrap();
//! assert_eq!(result, Some(QtiValue::from(3)));
//! ```

pub mod context;
pub mod custom;
pub mod engine;
pub mod error;
pub mod factory;
pub mod numeric;
pub mod operands;
pub mod processor;
pub mod processors;
pub mod xsd_regex;

pub use context::{
    DEFAULT_MAX_DEPTH, EngineConfig, EvaluationContext, EvaluationContextBuilder, State,
    VariableScope,
};
pub use custom::{CustomOperator, CustomOperatorRegistry};
pub use engine::ExpressionEngine;
pub use error::{ProcessingError, ProcessingErrorCode, ProcessingResult};
pub use factory::ProcessorFactory;
pub use operands::Operands;
pub use processor::{OperatorProcessor, ProcessorKind};
