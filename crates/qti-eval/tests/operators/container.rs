//! Container Operator Tests
//!
//! Tests for: multiple, ordered, containerSize, contains, member, delete,
//! index, repeat, random, fieldValue, inside

use qti_eval::{EvaluationContext, ExpressionEngine, ProcessingErrorCode};
use qti_expr::{Expression, IntOrVariableRef, Operator};
use qti_types::{BaseType, Container, Coords, QtiPoint, QtiScalar, QtiValue, Shape};

use crate::{
    boolean, error_of, ids, int, ints_multiple, ints_ordered, multiple_of, op, ordered_of, state,
    string, value_of,
};

fn ints(values: &[i32]) -> Vec<Expression> {
    values.iter().map(|v| Expression::integer(*v)).collect()
}

fn floats(values: &[f64]) -> Vec<Expression> {
    values.iter().map(|v| Expression::float(*v)).collect()
}

fn index(n: impl Into<IntOrVariableRef>) -> Operator {
    Operator::Index { n: n.into() }
}

fn repeat(n: impl Into<IntOrVariableRef>) -> Operator {
    Operator::Repeat {
        number_repeats: n.into(),
    }
}

fn point(x: i32, y: i32) -> Expression {
    Expression::base_value(QtiPoint::new(x, y))
}

// ============================================================================
// Multiple / Ordered
// ============================================================================

#[test]
fn test_multiple_flattens_and_skips_null() {
    let expr = multiple_of([
        Expression::integer(1),
        Expression::null(),
        multiple_of(ints(&[2, 3])),
    ]);
    assert_eq!(value_of(expr), ints_multiple(&[3, 1, 2]));
}

#[test]
fn test_ordered_keeps_order() {
    let expr = ordered_of([ordered_of(ints(&[1, 2])), Expression::integer(3)]);
    assert_eq!(value_of(expr), ints_ordered(&[1, 2, 3]));
    assert_ne!(value_of(ordered_of(ints(&[2, 1]))), ints_ordered(&[1, 2]));
}

#[test]
fn test_multiple_of_nulls_is_null() {
    assert_eq!(value_of(multiple_of([Expression::null(), Expression::null()])), None);
    assert_eq!(value_of(ordered_of(Vec::<Expression>::new())), None);
}

#[test]
fn test_multiple_contract_failures() {
    let expr = multiple_of([Expression::integer(1), Expression::float(2.0)]);
    assert_eq!(error_of(expr), ProcessingErrorCode::WrongBaseType);

    let expr = multiple_of([ordered_of(ints(&[1]))]);
    assert_eq!(error_of(expr), ProcessingErrorCode::WrongCardinality);

    let expr = ordered_of([multiple_of(ints(&[1]))]);
    assert_eq!(error_of(expr), ProcessingErrorCode::WrongCardinality);
}

// ============================================================================
// ContainerSize
// ============================================================================

#[test]
fn test_container_size() {
    assert_eq!(value_of(op(Operator::ContainerSize, [Expression::variable("LIST")])), int(3));
    assert_eq!(value_of(op(Operator::ContainerSize, [Expression::null()])), int(0));
    assert_eq!(
        error_of(op(Operator::ContainerSize, [Expression::integer(1)])),
        ProcessingErrorCode::WrongCardinality
    );
}

// ============================================================================
// Contains
// ============================================================================

#[test]
fn test_contains_ordered_needs_contiguous_run() {
    let abc = || ordered_of(ids(&["A", "B", "C"]));
    let expr = op(Operator::Contains, [abc(), ordered_of(ids(&["B", "C"]))]);
    assert_eq!(value_of(expr), boolean(true));
    let expr = op(Operator::Contains, [abc(), ordered_of(ids(&["C", "B"]))]);
    assert_eq!(value_of(expr), boolean(false));
    let expr = op(Operator::Contains, [abc(), ordered_of(ids(&["A", "C"]))]);
    assert_eq!(value_of(expr), boolean(false));
}

#[test]
fn test_contains_multiple_ignores_order() {
    let expr = op(
        Operator::Contains,
        [multiple_of(ids(&["A", "B", "C"])), multiple_of(ids(&["C", "B"]))],
    );
    assert_eq!(value_of(expr), boolean(true));
}

#[test]
fn test_contains_multiple_counts_occurrences() {
    let expr = op(
        Operator::Contains,
        [multiple_of(ids(&["A", "B"])), multiple_of(ids(&["A", "A"]))],
    );
    assert_eq!(value_of(expr), boolean(false));
    let expr = op(
        Operator::Contains,
        [multiple_of(ids(&["A", "B", "A"])), multiple_of(ids(&["A", "A"]))],
    );
    assert_eq!(value_of(expr), boolean(true));
}

#[test]
fn test_contains_contract_failures() {
    let expr = op(
        Operator::Contains,
        [multiple_of(ids(&["A"])), ordered_of(ids(&["A"]))],
    );
    assert_eq!(error_of(expr), ProcessingErrorCode::WrongCardinality);

    let expr = op(
        Operator::Contains,
        [multiple_of(ids(&["A"])), multiple_of([Expression::string("A")])],
    );
    assert_eq!(error_of(expr), ProcessingErrorCode::WrongBaseType);
}

// ============================================================================
// Member / Delete
// ============================================================================

#[test]
fn test_member_float() {
    let expr = op(
        Operator::Member,
        [Expression::float(10.1), multiple_of(floats(&[1.1, 2.1, 3.1]))],
    );
    assert_eq!(value_of(expr), boolean(false));

    let expr = op(
        Operator::Member,
        [Expression::float(10.1), multiple_of(floats(&[1.1, 2.1, 3.1, 10.1]))],
    );
    assert_eq!(value_of(expr), boolean(true));
}

#[test]
fn test_member_contract_failures() {
    let expr = op(Operator::Member, [Expression::integer(1), Expression::integer(1)]);
    assert_eq!(error_of(expr), ProcessingErrorCode::WrongCardinality);

    let expr = op(Operator::Member, [Expression::float(1.0), Expression::variable("LIST")]);
    assert_eq!(error_of(expr), ProcessingErrorCode::WrongBaseType);
}

#[test]
fn test_delete_every_occurrence() {
    let expr = op(
        Operator::Delete,
        [Expression::integer(2), ordered_of(ints(&[1, 2, 3, 2]))],
    );
    assert_eq!(value_of(expr), ints_ordered(&[1, 3]));

    let expr = op(Operator::Delete, [Expression::integer(2), Expression::variable("LIST")]);
    assert_eq!(value_of(expr), ints_multiple(&[1, 3]));
}

// ============================================================================
// Index / Repeat
// ============================================================================

#[test]
fn test_index() {
    let list = || ordered_of(ints(&[10, 20, 30]));
    assert_eq!(value_of(op(index(1), [list()])), int(10));
    assert_eq!(value_of(op(index(IntOrVariableRef::variable("THREE")), [list()])), int(30));
    assert_eq!(value_of(op(index(4), [list()])), None);
    assert_eq!(error_of(op(index(0), [list()])), ProcessingErrorCode::RuntimeError);
    assert_eq!(
        error_of(op(index(1), [Expression::variable("LIST")])),
        ProcessingErrorCode::WrongCardinality
    );
}

#[test]
fn test_repeat() {
    let expr = op(repeat(2), [ordered_of(ints(&[1, 2])), Expression::integer(3)]);
    assert_eq!(value_of(expr), ints_ordered(&[1, 2, 3, 1, 2, 3]));

    let expr = op(repeat(0), [Expression::integer(1)]);
    assert_eq!(value_of(expr), None);

    let expr = op(repeat(3), [Expression::null(), Expression::identifier("A")]);
    let expected = Container::from_scalars(
        BaseType::Identifier,
        ["A", "A", "A"].map(|s| QtiScalar::Identifier(s.to_string())),
    )
    .unwrap();
    assert_eq!(value_of(expr), Some(QtiValue::Ordered(expected)));
}

// ============================================================================
// Random
// ============================================================================

#[test]
fn test_random_picks_an_element() {
    let engine = ExpressionEngine::new();
    let state = state();
    let mut ctx = EvaluationContext::builder(&state).seed(3).build();
    let expr = op(Operator::Random, [Expression::variable("LIST")]);
    for _ in 0..20 {
        let picked = engine.evaluate(&expr, &mut ctx).unwrap().and_then(|v| v.as_integer());
        assert!(matches!(picked, Some(1..=3)), "unexpected {:?}", picked);
    }
}

#[test]
fn test_random_over_null_is_null() {
    assert_eq!(value_of(op(Operator::Random, [Expression::null()])), None);
}

// ============================================================================
// FieldValue
// ============================================================================

#[test]
fn test_field_value() {
    let field = |name: &str| Operator::FieldValue {
        field_identifier: name.to_string(),
    };
    assert_eq!(value_of(op(field("score"), [Expression::variable("RECORD")])), int(7));
    assert_eq!(value_of(op(field("label"), [Expression::variable("RECORD")])), string("seven"));
    assert_eq!(value_of(op(field("missing"), [Expression::variable("RECORD")])), None);
    assert_eq!(value_of(op(field("absent"), [Expression::variable("RECORD")])), None);
    assert_eq!(
        error_of(op(field("score"), [Expression::variable("LIST")])),
        ProcessingErrorCode::WrongCardinality
    );
}

// ============================================================================
// Inside
// ============================================================================

#[test]
fn test_inside() {
    let rect = Operator::Inside {
        coords: Coords::new(Shape::Rect, vec![0, 0, 10, 10]).unwrap(),
    };
    assert_eq!(value_of(op(rect.clone(), [point(5, 5)])), boolean(true));
    assert_eq!(value_of(op(rect.clone(), [point(11, 5)])), boolean(false));
    assert_eq!(
        value_of(op(rect.clone(), [multiple_of([point(20, 20), point(1, 1)])])),
        boolean(true)
    );
    assert_eq!(
        error_of(op(rect, [Expression::integer(5)])),
        ProcessingErrorCode::WrongBaseType
    );
}
