//! Logical Operator Tests
//!
//! Tests for: and, or, not, anyN, isNull

use qti_eval::ProcessingErrorCode;
use qti_expr::{Expression, IntOrVariableRef, Operator};
use rstest::rstest;

use crate::{boolean, error_of, multiple_of, op, tri, value_of};

fn any_n(min: impl Into<IntOrVariableRef>, max: impl Into<IntOrVariableRef>) -> Operator {
    Operator::AnyN {
        min: min.into(),
        max: max.into(),
    }
}

// ============================================================================
// And / Or - Three-Valued Logic
// ============================================================================

/// And Truth Table:
/// | A     | B     | A and B |
/// |-------|-------|---------|
/// | true  | true  | true    |
/// | true  | false | false   |
/// | true  | null  | null    |
/// | false | null  | false   | <- false dominates null
/// | null  | null  | null    |
#[rstest]
#[case(Some(true), Some(true), Some(true))]
#[case(Some(true), Some(false), Some(false))]
#[case(Some(false), Some(true), Some(false))]
#[case(Some(true), None, None)]
#[case(Some(false), None, Some(false))]
#[case(None, Some(false), Some(false))]
#[case(None, None, None)]
fn test_and(#[case] a: Option<bool>, #[case] b: Option<bool>, #[case] expected: Option<bool>) {
    let result = value_of(op(Operator::And, [tri(a), tri(b)]));
    assert_eq!(result, expected.and_then(boolean));
}

/// Or Truth Table:
/// | A     | B     | A or B |
/// |-------|-------|--------|
/// | false | false | false  |
/// | true  | null  | true   | <- true dominates null
/// | false | null  | null   |
/// | null  | null  | null   |
#[rstest]
#[case(Some(false), Some(false), Some(false))]
#[case(Some(true), Some(false), Some(true))]
#[case(Some(true), None, Some(true))]
#[case(None, Some(true), Some(true))]
#[case(Some(false), None, None)]
#[case(None, None, None)]
fn test_or(#[case] a: Option<bool>, #[case] b: Option<bool>, #[case] expected: Option<bool>) {
    let result = value_of(op(Operator::Or, [tri(a), tri(b)]));
    assert_eq!(result, expected.and_then(boolean));
}

#[test]
fn test_and_many_operands() {
    let operands = [true, true, true, true, true].map(Expression::boolean);
    assert_eq!(value_of(op(Operator::And, operands)), boolean(true));
}

#[test]
fn test_and_null_hides_type_mismatch() {
    assert_eq!(value_of(op(Operator::And, [Expression::null(), Expression::integer(1)])), None);
}

#[test]
fn test_and_contract_failures() {
    assert_eq!(
        error_of(op(Operator::And, [Expression::integer(1), Expression::boolean(true)])),
        ProcessingErrorCode::WrongBaseType
    );
    assert_eq!(
        error_of(op(
            Operator::And,
            [multiple_of([Expression::boolean(true)]), Expression::boolean(true)]
        )),
        ProcessingErrorCode::WrongCardinality
    );
    assert_eq!(error_of(op(Operator::And, Vec::<Expression>::new())), ProcessingErrorCode::NotEnoughOperands);
}

#[rstest]
#[case::and(Operator::And)]
#[case::or(Operator::Or)]
#[case::any_n(any_n(1, 2))]
fn test_both_contracts_broken(#[case] operator: Operator) {
    let operands = [
        multiple_of([Expression::integer(1), Expression::integer(2)]),
        Expression::boolean(true),
    ];
    assert_eq!(
        error_of(op(operator, operands)),
        ProcessingErrorCode::WrongBaseTypeOrCardinality
    );
}

// ============================================================================
// Not
// ============================================================================

#[test]
fn test_not() {
    assert_eq!(value_of(op(Operator::Not, [Expression::boolean(true)])), boolean(false));
    assert_eq!(value_of(op(Operator::Not, [Expression::boolean(false)])), boolean(true));
    assert_eq!(value_of(op(Operator::Not, [Expression::null()])), None);
    assert_eq!(
        error_of(op(Operator::Not, [Expression::boolean(true), Expression::boolean(true)])),
        ProcessingErrorCode::TooMuchOperands
    );
}

// ============================================================================
// AnyN
// ============================================================================

#[test]
fn test_any_n_too_many_true() {
    let expr = op(any_n(1, 1), [Expression::boolean(true), Expression::boolean(true)]);
    assert_eq!(value_of(expr), boolean(false));
}

#[rstest]
// t = 1 already in range
#[case(1, 2, Some(true))]
// t = 1 short of min, t + n = 2 reaches it
#[case(2, 3, None)]
// t + n = 2 still short of min
#[case(3, 4, Some(false))]
fn test_any_n_with_null(#[case] min: i32, #[case] max: i32, #[case] expected: Option<bool>) {
    let expr = op(
        any_n(min, max),
        [Expression::boolean(true), Expression::boolean(false), Expression::null()],
    );
    assert_eq!(value_of(expr), expected.and_then(boolean));
}

#[test]
fn test_any_n_variable_bounds() {
    let operands = [true, true, true, false].map(Expression::boolean);
    let expr = op(any_n(IntOrVariableRef::variable("THREE"), 4), operands.clone());
    assert_eq!(value_of(expr), boolean(true));

    let expr = op(any_n(IntOrVariableRef::variable("NOPE"), 4), operands.clone());
    assert_eq!(error_of(expr), ProcessingErrorCode::NonexistentVariable);

    let expr = op(any_n(IntOrVariableRef::variable("HALF"), 4), operands);
    assert_eq!(error_of(expr), ProcessingErrorCode::WrongVariableBaseType);
}

// ============================================================================
// IsNull
// ============================================================================

#[test]
fn test_is_null() {
    assert_eq!(value_of(op(Operator::IsNull, [Expression::null()])), boolean(true));
    assert_eq!(value_of(op(Operator::IsNull, [Expression::string("")])), boolean(true));
    assert_eq!(value_of(op(Operator::IsNull, [multiple_of(Vec::<Expression>::new())])), boolean(true));
    assert_eq!(value_of(op(Operator::IsNull, [Expression::variable("UNSET")])), boolean(true));
    assert_eq!(value_of(op(Operator::IsNull, [Expression::integer(0)])), boolean(false));
    assert_eq!(value_of(op(Operator::IsNull, [Expression::variable("LIST")])), boolean(false));
}
