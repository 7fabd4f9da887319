//! Custom Operator Tests
//!
//! Tests for: customOperator resolution, bundled operators and user
//! registered implementations

use qti_eval::{
    CustomOperator, CustomOperatorRegistry, EvaluationContext, ExpressionEngine, Operands,
    ProcessingErrorCode, ProcessingResult, ProcessorFactory,
};
use qti_expr::{Arity, Expression, Operator, VariableRef};
use qti_types::{BaseType, Container, QtiScalar, QtiValue};

use crate::{error_of, op, state, string, value_of};

fn custom(class: &str) -> Operator {
    Operator::CustomOperator {
        class: Some(class.to_string()),
        definition: None,
    }
}

/// Count of non-null operands
struct CountNonNull;

impl CustomOperator for CountNonNull {
    fn process(
        &self,
        operands: &Operands,
        _ctx: &mut EvaluationContext<'_>,
    ) -> ProcessingResult<Option<QtiValue>> {
        Ok(Some(QtiValue::from(operands.non_null().count() as i32)))
    }
}

// ============================================================================
// Bundled Operators
// ============================================================================

#[test]
fn test_explode() {
    let expr = op(
        custom("qti.custom.Explode"),
        [Expression::string(" "), Expression::string("to be or")],
    );
    let expected = Container::from_scalars(
        BaseType::String,
        ["to", "be", "or"].map(|s| QtiScalar::String(s.to_string())),
    )
    .unwrap();
    assert_eq!(value_of(expr), Some(QtiValue::Ordered(expected)));
}

#[test]
fn test_implode_of_explode() {
    let exploded = op(
        custom("qti.custom.Explode"),
        [Expression::string(","), Expression::string("a,b")],
    );
    let expr = op(custom("qti.custom.Implode"), [Expression::string("+"), exploded]);
    assert_eq!(value_of(expr), string("a+b"));
}

#[test]
fn test_bundled_arity() {
    let expr = op(custom("qti.custom.Explode"), [Expression::string(",")]);
    assert_eq!(error_of(expr), ProcessingErrorCode::NotEnoughOperands);
}

// ============================================================================
// Resolution
// ============================================================================

#[test]
fn test_unresolved_class_fails_before_operands() {
    // Evaluating this operand would fail with NonexistentVariable.
    let failing = Expression::Default(VariableRef::new("NOPE"));
    let expr = op(custom("com.example.Missing"), [failing]);
    assert_eq!(error_of(expr), ProcessingErrorCode::UnresolvedCustomOperator);
}

#[test]
fn test_missing_class_attribute() {
    let operator = Operator::CustomOperator {
        class: None,
        definition: Some("http://example.com/op".to_string()),
    };
    assert_eq!(
        error_of(op(operator, [Expression::integer(1)])),
        ProcessingErrorCode::UnresolvedCustomOperator
    );
}

#[test]
fn test_user_registered_operator() {
    let mut registry = CustomOperatorRegistry::new();
    registry.register("org.example.CountNonNull", CountNonNull);
    let engine = ExpressionEngine::new().with_factory(ProcessorFactory::new(registry));

    let expr = op(
        custom("org.example.CountNonNull"),
        [Expression::integer(1), Expression::null(), Expression::string("x")],
    );
    let result = engine.evaluate_in_scope(&expr, &state()).unwrap();
    assert_eq!(result, Some(QtiValue::from(2)));

    // The bundled operators are not part of a fresh registry
    let expr = op(custom("qti.custom.Explode"), [Expression::string(","), Expression::string("a")]);
    let err = engine.evaluate_in_scope(&expr, &state()).unwrap_err();
    assert_eq!(err.code(), ProcessingErrorCode::UnresolvedCustomOperator);
}

#[test]
fn test_default_arity_accepts_any_count() {
    assert_eq!(CountNonNull.arity(), Arity::at_least(0));
}
