//! Operator integration tests
//!
//! Every operator is evaluated through the engine, from expression tree to
//! value. These tests verify:
//! - Correct computation and integer/float result typing
//! - NULL propagation taking precedence over contract checks
//! - Contract failures (cardinality, base type, arity) and their codes
//! - Variable-reference parameters

mod arithmetic;
mod comparison;
mod container;
mod custom;
mod logical;
mod math;
mod string;

use qti_eval::{ExpressionEngine, ProcessingErrorCode, ProcessingResult, State};
use qti_expr::{Expression, Operator};
use qti_types::{
    BaseType, Cardinality, Container, QtiScalar, QtiValue, RecordContainer, Variable,
    VariableDeclaration,
};

// ============================================================================
// Test Helpers
// ============================================================================

/// Variables visible to every test expression
pub fn state() -> State {
    let single = |id: &str, bt: BaseType, value: QtiValue| {
        Variable::with_value(VariableDeclaration::new(id, Cardinality::Single, bt), value).unwrap()
    };
    State::from_iter([
        single("THREE", BaseType::Integer, QtiValue::from(3)),
        single("HALF", BaseType::Float, QtiValue::from(0.5)),
        single("DIGITS", BaseType::String, QtiValue::string("[0-9]+")),
        single("CHOICE", BaseType::Identifier, QtiValue::identifier("A")),
        Variable::new(VariableDeclaration::new("UNSET", Cardinality::Single, BaseType::Integer)),
        Variable::with_value(
            VariableDeclaration::new("LIST", Cardinality::Multiple, BaseType::Integer),
            ints_multiple(&[1, 2, 3]).unwrap(),
        )
        .unwrap(),
        Variable::with_value(
            VariableDeclaration::record("RECORD"),
            QtiValue::Record(
                RecordContainer::new()
                    .with_field("score", Some(QtiScalar::Integer(7)))
                    .with_field("label", Some(QtiScalar::String("seven".to_string())))
                    .with_field("missing", None),
            ),
        )
        .unwrap(),
    ])
}

pub fn eval(expr: &Expression) -> ProcessingResult<Option<QtiValue>> {
    ExpressionEngine::new().evaluate_in_scope(expr, &state())
}

/// Value of an expression expected to succeed
pub fn value_of(expr: Expression) -> Option<QtiValue> {
    eval(&expr).unwrap()
}

/// Code of an expression expected to fail
pub fn error_of(expr: Expression) -> ProcessingErrorCode {
    eval(&expr).unwrap_err().code()
}

pub fn op(operator: Operator, operands: impl IntoIterator<Item = Expression>) -> Expression {
    Expression::operator(operator, operands)
}

pub fn multiple_of(operands: impl IntoIterator<Item = Expression>) -> Expression {
    op(Operator::Multiple, operands)
}

pub fn ordered_of(operands: impl IntoIterator<Item = Expression>) -> Expression {
    op(Operator::Ordered, operands)
}

pub fn ids(values: &[&str]) -> Vec<Expression> {
    values.iter().map(|v| Expression::identifier(*v)).collect()
}

pub fn int(i: i32) -> Option<QtiValue> {
    Some(QtiValue::from(i))
}

pub fn float(f: f64) -> Option<QtiValue> {
    Some(QtiValue::from(f))
}

pub fn boolean(b: bool) -> Option<QtiValue> {
    Some(QtiValue::from(b))
}

pub fn string(s: &str) -> Option<QtiValue> {
    Some(QtiValue::string(s))
}

pub fn ints_multiple(values: &[i32]) -> Option<QtiValue> {
    Some(QtiValue::Multiple(
        Container::from_scalars(BaseType::Integer, values.iter().map(|v| QtiScalar::Integer(*v))).unwrap(),
    ))
}

pub fn ints_ordered(values: &[i32]) -> Option<QtiValue> {
    Some(QtiValue::Ordered(
        Container::from_scalars(BaseType::Integer, values.iter().map(|v| QtiScalar::Integer(*v))).unwrap(),
    ))
}

/// `true`, `false` or the NULL expression
pub fn tri(value: Option<bool>) -> Expression {
    value.map_or_else(Expression::null, Expression::boolean)
}

/// Floating-point result within a small tolerance
pub fn assert_float(result: Option<QtiValue>, expected: f64) {
    match result {
        Some(QtiValue::Single(QtiScalar::Float(x))) => {
            assert!((x - expected).abs() < 1e-9, "expected {}, got {}", expected, x)
        }
        other => panic!("expected float {}, got {:?}", expected, other),
    }
}
