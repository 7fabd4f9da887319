//! Arithmetic Operator Tests
//!
//! Tests for: sum, product, subtract, divide, power, integerDivide,
//! integerModulus, integerToFloat, truncate, round, roundTo, gcd, lcm, min, max

use qti_eval::ProcessingErrorCode;
use qti_expr::{Expression, IntOrVariableRef, Operator, RoundingMode};
use rstest::rstest;

use crate::{assert_float, error_of, float, int, multiple_of, op, value_of};

fn ints(values: &[i32]) -> Vec<Expression> {
    values.iter().map(|v| Expression::integer(*v)).collect()
}

fn round_to(mode: RoundingMode, figures: impl Into<IntOrVariableRef>) -> Operator {
    Operator::RoundTo {
        rounding_mode: mode,
        figures: figures.into(),
    }
}

// ============================================================================
// Sum / Product / Subtract
// ============================================================================

#[test]
fn test_sum_integers_stay_integer() {
    assert_eq!(value_of(op(Operator::Sum, ints(&[1, 2, 3]))), int(6));
}

#[test]
fn test_sum_with_float_is_float() {
    let result = value_of(op(Operator::Sum, [Expression::integer(1), Expression::float(2.0)]));
    assert_eq!(result, float(3.0));
}

#[test]
fn test_sum_null_and_overflow() {
    assert_eq!(value_of(op(Operator::Sum, [Expression::integer(1), Expression::null()])), None);
    assert_eq!(value_of(op(Operator::Sum, ints(&[i32::MAX, 1]))), None);
}

#[test]
fn test_sum_null_hides_contract_violation() {
    let expr = op(Operator::Sum, [Expression::string("a"), Expression::null()]);
    assert_eq!(value_of(expr), None);
}

#[test]
fn test_sum_contract_failures() {
    assert_eq!(
        error_of(op(Operator::Sum, [Expression::string("a"), Expression::integer(1)])),
        ProcessingErrorCode::WrongBaseType
    );
    assert_eq!(
        error_of(op(Operator::Sum, [multiple_of(ints(&[1, 2]))])),
        ProcessingErrorCode::WrongCardinality
    );
}

#[test]
fn test_product_and_subtract() {
    assert_eq!(value_of(op(Operator::Product, ints(&[2, 3, 4]))), int(24));
    assert_eq!(value_of(op(Operator::Subtract, ints(&[5, 7]))), int(-2));
    assert_float(
        value_of(op(Operator::Subtract, [Expression::float(5.5), Expression::integer(1)])),
        4.5,
    );
}

// ============================================================================
// Divide / Power
// ============================================================================

#[test]
fn test_divide_is_float() {
    assert_eq!(value_of(op(Operator::Divide, ints(&[7, 2]))), float(3.5));
    assert_eq!(value_of(op(Operator::Divide, ints(&[1, 0]))), None);
}

#[test]
fn test_power() {
    assert_eq!(value_of(op(Operator::Power, ints(&[2, 10]))), int(1024));
    assert_eq!(value_of(op(Operator::Power, ints(&[2, -1]))), float(0.5));
    assert_eq!(
        value_of(op(Operator::Power, [Expression::float(-8.0), Expression::float(0.5)])),
        None
    );
}

// ============================================================================
// Integer Division
// ============================================================================

#[rstest]
#[case(7, 2, Some(3), Some(1))]
#[case(-7, 2, Some(-4), Some(1))]
#[case(7, -2, Some(-4), Some(-1))]
#[case(1, 0, None, None)]
fn test_integer_divide_and_modulus(
    #[case] x: i32,
    #[case] y: i32,
    #[case] quotient: Option<i32>,
    #[case] remainder: Option<i32>,
) {
    assert_eq!(value_of(op(Operator::IntegerDivide, ints(&[x, y]))), quotient.and_then(int));
    assert_eq!(value_of(op(Operator::IntegerModulus, ints(&[x, y]))), remainder.and_then(int));
}

#[test]
fn test_integer_divide_rejects_floats() {
    let expr = op(Operator::IntegerDivide, [Expression::float(4.0), Expression::integer(2)]);
    assert_eq!(error_of(expr), ProcessingErrorCode::WrongBaseType);
}

#[test]
fn test_integer_to_float() {
    assert_eq!(value_of(op(Operator::IntegerToFloat, ints(&[3]))), float(3.0));
}

// ============================================================================
// Truncate / Round / RoundTo
// ============================================================================

#[rstest]
#[case(2.7, 2, 3)]
#[case(-2.7, -2, -3)]
#[case(2.5, 2, 3)]
#[case(-2.5, -2, -2)]
#[case(-2.6, -2, -3)]
fn test_truncate_and_round(#[case] x: f64, #[case] truncated: i32, #[case] rounded: i32) {
    assert_eq!(value_of(op(Operator::Truncate, [Expression::float(x)])), int(truncated));
    assert_eq!(value_of(op(Operator::Round, [Expression::float(x)])), int(rounded));
}

#[test]
fn test_round_keeps_infinity() {
    let result = value_of(op(Operator::Round, [Expression::float(f64::INFINITY)]));
    assert_eq!(result, float(f64::INFINITY));
}

#[test]
fn test_round_to_significant_figures() {
    let expr = op(
        round_to(RoundingMode::SignificantFigures, 3),
        [Expression::integer(1239451)],
    );
    assert_eq!(value_of(expr), int(1240000));

    let expr = op(
        round_to(RoundingMode::SignificantFigures, 2),
        [Expression::float(0.012345)],
    );
    assert_float(value_of(expr), 0.012);
}

#[rstest]
#[case(RoundingMode::SignificantFigures, 3, 1.23456e-27, 1.23e-27)]
#[case(RoundingMode::DecimalPlaces, 30, 1.23456e-27, 1.235e-27)]
#[case(RoundingMode::SignificantFigures, 2, 6.02214e23, 6.0e23)]
fn test_round_to_extreme_magnitudes(
    #[case] mode: RoundingMode,
    #[case] figures: i32,
    #[case] x: f64,
    #[case] expected: f64,
) {
    let expr = op(round_to(mode, figures), [Expression::float(x)]);
    assert_eq!(value_of(expr), float(expected));
}

#[test]
fn test_round_to_decimal_places() {
    let expr = op(round_to(RoundingMode::DecimalPlaces, 2), [Expression::float(5.055)]);
    assert_float(value_of(expr), 5.06);

    let expr = op(
        round_to(RoundingMode::DecimalPlaces, IntOrVariableRef::variable("THREE")),
        [Expression::float(3.14159)],
    );
    assert_float(value_of(expr), 3.142);
}

#[test]
fn test_round_to_invalid_figures() {
    let expr = op(round_to(RoundingMode::SignificantFigures, 0), [Expression::float(1.5)]);
    assert_eq!(error_of(expr), ProcessingErrorCode::RuntimeError);

    let expr = op(round_to(RoundingMode::DecimalPlaces, -1), [Expression::float(1.5)]);
    assert_eq!(error_of(expr), ProcessingErrorCode::RuntimeError);
}

// ============================================================================
// Gcd / Lcm
// ============================================================================

#[test]
fn test_gcd() {
    let expr = op(Operator::Gcd, [Expression::integer(12), multiple_of(ints(&[18, 24]))]);
    assert_eq!(value_of(expr), int(6));
    assert_eq!(value_of(op(Operator::Gcd, ints(&[0, 0]))), int(0));
    assert_eq!(value_of(op(Operator::Gcd, ints(&[-4, 6]))), int(2));
}

#[test]
fn test_lcm() {
    assert_eq!(value_of(op(Operator::Lcm, ints(&[4, 6]))), int(12));
    assert_eq!(value_of(op(Operator::Lcm, ints(&[0, 5]))), int(0));
    assert_eq!(
        error_of(op(Operator::Lcm, [Expression::float(2.0)])),
        ProcessingErrorCode::WrongBaseType
    );
}

// ============================================================================
// Min / Max
// ============================================================================

#[test]
fn test_min_max() {
    let expr = op(Operator::Min, [Expression::integer(3), multiple_of(ints(&[1, 2]))]);
    assert_eq!(value_of(expr), int(1));

    let expr = op(Operator::Min, [Expression::integer(3), Expression::float(1.5)]);
    assert_eq!(value_of(expr), float(1.5));

    let expr = op(Operator::Max, [Expression::integer(3), Expression::float(1.5)]);
    assert_eq!(value_of(expr), float(3.0));

    assert_eq!(value_of(op(Operator::Max, ints(&[1, 9, 4]))), int(9));
}
