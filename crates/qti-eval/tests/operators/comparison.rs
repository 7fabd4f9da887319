//! Comparison Operator Tests
//!
//! Tests for: lt, gt, lte, gte, equal, equalRounded, durationLT,
//! durationGTE, match

use qti_eval::ProcessingErrorCode;
use qti_expr::{Expression, FloatOrVariableRef, IntOrVariableRef, Operator, RoundingMode, ToleranceMode};
use qti_types::{QtiDuration, QtiScalar};
use rstest::rstest;

use crate::{boolean, error_of, ids, multiple_of, op, ordered_of, value_of};

fn equal(mode: ToleranceMode, tolerance: Vec<FloatOrVariableRef>, bounds: (bool, bool)) -> Operator {
    Operator::Equal {
        tolerance_mode: mode,
        tolerance,
        include_lower_bound: bounds.0,
        include_upper_bound: bounds.1,
    }
}

fn duration(iso: &str) -> Expression {
    Expression::base_value(QtiScalar::Duration(QtiDuration::parse(iso).unwrap()))
}

// ============================================================================
// Numeric Comparison
// ============================================================================

#[rstest]
#[case(Operator::Lt, 1.0, 2.0, true)]
#[case(Operator::Lt, 2.0, 2.0, false)]
#[case(Operator::Lte, 2.0, 2.0, true)]
#[case(Operator::Gt, 3.0, 2.0, true)]
#[case(Operator::Gte, 1.5, 2.0, false)]
fn test_numeric_comparison(#[case] operator: Operator, #[case] a: f64, #[case] b: f64, #[case] expected: bool) {
    let result = value_of(op(operator, [Expression::float(a), Expression::float(b)]));
    assert_eq!(result, boolean(expected));
}

#[test]
fn test_comparison_mixes_integer_and_float() {
    let expr = op(Operator::Lt, [Expression::integer(1), Expression::float(1.5)]);
    assert_eq!(value_of(expr), boolean(true));
}

#[test]
fn test_comparison_null_and_contract() {
    assert_eq!(value_of(op(Operator::Gt, [Expression::null(), Expression::string("x")])), None);
    assert_eq!(
        error_of(op(Operator::Gt, [Expression::string("x"), Expression::integer(1)])),
        ProcessingErrorCode::WrongBaseType
    );
}

// ============================================================================
// Equal
// ============================================================================

#[test]
fn test_equal_exact() {
    let operator = equal(ToleranceMode::Exact, vec![], (true, true));
    assert_eq!(
        value_of(op(operator.clone(), [Expression::integer(2), Expression::float(2.0)])),
        boolean(true)
    );
    assert_eq!(
        value_of(op(operator, [Expression::integer(2), Expression::float(2.1)])),
        boolean(false)
    );
}

#[rstest]
#[case(9.0, (true, true), true)]
#[case(9.0, (false, true), false)]
#[case(11.0, (true, true), true)]
#[case(11.0, (true, false), false)]
#[case(11.5, (true, true), false)]
fn test_equal_absolute(#[case] y: f64, #[case] bounds: (bool, bool), #[case] expected: bool) {
    let operator = equal(ToleranceMode::Absolute, vec![1.0.into()], bounds);
    let result = value_of(op(operator, [Expression::float(10.0), Expression::float(y)]));
    assert_eq!(result, boolean(expected));
}

#[test]
fn test_equal_relative_with_two_tolerances() {
    // x = 200, lower bound 200 * 0.9 = 180, upper bound 200 * 1.2 = 240
    let operator = equal(ToleranceMode::Relative, vec![10.0.into(), 20.0.into()], (true, true));
    let check = |y: f64| value_of(op(operator.clone(), [Expression::float(200.0), Expression::float(y)]));
    assert_eq!(check(185.0), boolean(true));
    assert_eq!(check(239.0), boolean(true));
    assert_eq!(check(179.0), boolean(false));
    assert_eq!(check(241.0), boolean(false));
}

#[test]
fn test_equal_tolerance_from_variable() {
    let operator = equal(
        ToleranceMode::Absolute,
        vec![FloatOrVariableRef::variable("HALF")],
        (true, true),
    );
    let result = value_of(op(operator, [Expression::float(1.0), Expression::float(1.4)]));
    assert_eq!(result, boolean(true));
}

#[test]
fn test_equal_missing_tolerance() {
    let operator = equal(ToleranceMode::Absolute, vec![], (true, true));
    let expr = op(operator, [Expression::float(1.0), Expression::float(1.0)]);
    assert_eq!(error_of(expr), ProcessingErrorCode::LogicError);
}

#[test]
fn test_equal_rounded() {
    let operator = Operator::EqualRounded {
        rounding_mode: RoundingMode::SignificantFigures,
        figures: IntOrVariableRef::Int(3),
    };
    let expr = op(operator.clone(), [Expression::float(3.175), Expression::float(3.183)]);
    assert_eq!(value_of(expr), boolean(true));
    let expr = op(operator, [Expression::float(3.175), Expression::float(3.1749)]);
    assert_eq!(value_of(expr), boolean(false));
}

#[test]
fn test_equal_rounded_tiny_values() {
    let operator = Operator::EqualRounded {
        rounding_mode: RoundingMode::SignificantFigures,
        figures: IntOrVariableRef::Int(3),
    };
    let expr = op(operator.clone(), [Expression::float(1.23456e-27), Expression::float(1.2349e-27)]);
    assert_eq!(value_of(expr), boolean(true));
    let expr = op(operator, [Expression::float(1.23456e-27), Expression::float(1.2e-27)]);
    assert_eq!(value_of(expr), boolean(false));
}

// ============================================================================
// Durations
// ============================================================================

#[test]
fn test_duration_comparison() {
    let expr = op(Operator::DurationLt, [duration("PT1M"), duration("PT90S")]);
    assert_eq!(value_of(expr), boolean(true));
    let expr = op(Operator::DurationGte, [duration("PT60S"), duration("PT1M")]);
    assert_eq!(value_of(expr), boolean(true));
    let expr = op(Operator::DurationGte, [duration("PT1S"), Expression::integer(1)]);
    assert_eq!(error_of(expr), ProcessingErrorCode::WrongBaseType);
}

// ============================================================================
// Match
// ============================================================================

#[test]
fn test_match_single() {
    let expr = op(Operator::Match, [Expression::identifier("A"), Expression::variable("CHOICE")]);
    assert_eq!(value_of(expr), boolean(true));
    let expr = op(Operator::Match, [Expression::identifier("B"), Expression::variable("CHOICE")]);
    assert_eq!(value_of(expr), boolean(false));
}

#[test]
fn test_match_containers() {
    let expr = op(
        Operator::Match,
        [multiple_of(ids(&["A", "B"])), multiple_of(ids(&["B", "A"]))],
    );
    assert_eq!(value_of(expr), boolean(true));

    let expr = op(
        Operator::Match,
        [ordered_of(ids(&["A", "B"])), ordered_of(ids(&["B", "A"]))],
    );
    assert_eq!(value_of(expr), boolean(false));
}

#[test]
fn test_match_contract_failures() {
    let expr = op(
        Operator::Match,
        [multiple_of(ids(&["A"])), ordered_of(ids(&["A"]))],
    );
    assert_eq!(error_of(expr), ProcessingErrorCode::WrongCardinality);

    let expr = op(Operator::Match, [Expression::identifier("A"), Expression::string("A")]);
    assert_eq!(error_of(expr), ProcessingErrorCode::WrongBaseType);

    let expr = op(Operator::Match, [Expression::variable("RECORD"), Expression::variable("RECORD")]);
    assert_eq!(error_of(expr), ProcessingErrorCode::WrongCardinality);
}

#[test]
fn test_match_null_hides_mismatch() {
    let expr = op(Operator::Match, [Expression::null(), multiple_of(ids(&["A"]))]);
    assert_eq!(value_of(expr), None);
}
