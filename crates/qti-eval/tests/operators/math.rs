//! Math and Statistics Operator Tests
//!
//! Tests for: mathOperator, statsOperator

use qti_eval::ProcessingErrorCode;
use qti_expr::{Expression, MathFunction, Operator, StatsFunction};
use rstest::rstest;
use std::f64::consts::PI;

use crate::{assert_float, error_of, float, int, multiple_of, op, ordered_of, value_of};

fn math(function: MathFunction, operands: impl IntoIterator<Item = Expression>) -> Expression {
    op(Operator::MathOperator { function }, operands)
}

fn stats(function: StatsFunction, values: &[f64]) -> Expression {
    op(
        Operator::StatsOperator { function },
        [ordered_of(values.iter().map(|v| Expression::float(*v)))],
    )
}

// ============================================================================
// MathOperator
// ============================================================================

#[rstest]
#[case(MathFunction::Sin, PI / 2.0, 1.0)]
#[case(MathFunction::Cos, 0.0, 1.0)]
#[case(MathFunction::Exp, 0.0, 1.0)]
#[case(MathFunction::Ln, 1.0, 0.0)]
#[case(MathFunction::Log, 1000.0, 3.0)]
#[case(MathFunction::ToDegrees, PI, 180.0)]
#[case(MathFunction::ToRadians, 180.0, PI)]
#[case(MathFunction::Abs, -2.5, 2.5)]
fn test_math_functions(#[case] name: MathFunction, #[case] x: f64, #[case] expected: f64) {
    assert_float(value_of(math(name, [Expression::float(x)])), expected);
}

#[test]
fn test_math_integer_results() {
    assert_eq!(value_of(math(MathFunction::Floor, [Expression::float(2.7)])), int(2));
    assert_eq!(value_of(math(MathFunction::Ceil, [Expression::float(-2.7)])), int(-2));
    assert_eq!(value_of(math(MathFunction::Abs, [Expression::integer(-4)])), int(4));
    assert_eq!(value_of(math(MathFunction::Signum, [Expression::integer(-4)])), int(-1));
    assert_eq!(value_of(math(MathFunction::Signum, [Expression::float(0.0)])), float(0.0));
}

#[test]
fn test_math_atan2() {
    let expr = math(MathFunction::Atan2, [Expression::float(1.0), Expression::float(1.0)]);
    assert_float(value_of(expr), PI / 4.0);
    assert_eq!(
        error_of(math(MathFunction::Atan2, [Expression::float(1.0)])),
        ProcessingErrorCode::NotEnoughOperands
    );
}

#[test]
fn test_math_undefined_results_are_null() {
    assert_eq!(value_of(math(MathFunction::Ln, [Expression::float(-1.0)])), None);
    assert_eq!(value_of(math(MathFunction::Csc, [Expression::float(0.0)])), None);
    assert_eq!(value_of(math(MathFunction::Asin, [Expression::float(2.0)])), None);
}

#[test]
fn test_math_contract_failures() {
    assert_eq!(
        error_of(math(MathFunction::Sin, [Expression::string("x")])),
        ProcessingErrorCode::WrongBaseType
    );
    assert_eq!(
        error_of(math(MathFunction::Sin, [Expression::float(1.0), Expression::float(2.0)])),
        ProcessingErrorCode::TooMuchOperands
    );
}

// ============================================================================
// StatsOperator
// ============================================================================

#[rstest]
#[case(StatsFunction::Mean, 5.0)]
#[case(StatsFunction::PopVariance, 4.0)]
#[case(StatsFunction::PopSd, 2.0)]
#[case(StatsFunction::SampleVariance, 32.0 / 7.0)]
fn test_stats(#[case] name: StatsFunction, #[case] expected: f64) {
    let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
    assert_float(value_of(stats(name, &values)), expected);
}

#[test]
fn test_sample_variance_needs_two_values() {
    assert_eq!(value_of(stats(StatsFunction::SampleVariance, &[1.0])), None);
    assert_eq!(value_of(stats(StatsFunction::SampleSd, &[1.0])), None);
}

#[test]
fn test_stats_over_integers() {
    let expr = op(
        Operator::StatsOperator { function: StatsFunction::Mean },
        [Expression::variable("LIST")],
    );
    assert_eq!(value_of(expr), float(2.0));
}

#[test]
fn test_stats_rejects_single() {
    let expr = op(
        Operator::StatsOperator { function: StatsFunction::Mean },
        [Expression::float(1.0)],
    );
    assert_eq!(error_of(expr), ProcessingErrorCode::WrongCardinality);

    let expr = op(
        Operator::StatsOperator { function: StatsFunction::Mean },
        [multiple_of([Expression::string("a")])],
    );
    assert_eq!(error_of(expr), ProcessingErrorCode::WrongBaseType);
}
