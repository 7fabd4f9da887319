//! String Operator Tests
//!
//! Tests for: stringMatch, substring, patternMatch

use qti_eval::ProcessingErrorCode;
use qti_expr::{Expression, Operator, StringOrVariableRef};
use rstest::rstest;

use crate::{boolean, error_of, op, value_of};

fn pattern_match(pattern: StringOrVariableRef, subject: &str) -> Expression {
    op(Operator::PatternMatch { pattern }, [Expression::string(subject)])
}

// ============================================================================
// StringMatch / Substring
// ============================================================================

#[rstest]
#[case("Hello", "Hello", true, false, true)]
#[case("Hello", "hello", true, false, false)]
#[case("Hello", "hello", false, false, true)]
#[case("Hello world", "world", true, true, true)]
#[case("Hello world", "WORLD", false, true, true)]
#[case("Hello", "Hello world", true, true, false)]
fn test_string_match(
    #[case] a: &str,
    #[case] b: &str,
    #[case] case_sensitive: bool,
    #[case] substring: bool,
    #[case] expected: bool,
) {
    let operator = Operator::StringMatch {
        case_sensitive,
        substring,
    };
    let result = value_of(op(operator, [Expression::string(a), Expression::string(b)]));
    assert_eq!(result, boolean(expected));
}

#[test]
fn test_substring_looks_for_first_in_second() {
    let operator = Operator::Substring { case_sensitive: false };
    let expr = op(operator.clone(), [Expression::string("WORLD"), Expression::string("Hello world")]);
    assert_eq!(value_of(expr), boolean(true));
    let expr = op(operator, [Expression::string("Hello world"), Expression::string("world")]);
    assert_eq!(value_of(expr), boolean(false));
}

#[test]
fn test_string_operators_null_and_contract() {
    let operator = Operator::Substring { case_sensitive: true };
    assert_eq!(
        value_of(op(operator.clone(), [Expression::string(""), Expression::string("abc")])),
        None
    );
    assert_eq!(
        error_of(op(operator, [Expression::identifier("abc"), Expression::string("abc")])),
        ProcessingErrorCode::WrongBaseType
    );
}

// ============================================================================
// PatternMatch
// ============================================================================

#[test]
fn test_pattern_dot_matches_everything() {
    let result = value_of(pattern_match(StringOrVariableRef::literal(".*"), "stringString"));
    assert_eq!(result, boolean(true));
    let result = value_of(pattern_match(StringOrVariableRef::literal(".*"), "two\nlines"));
    assert_eq!(result, boolean(true));
}

#[rstest]
#[case("abc", true)]
#[case("ab\u{e7}", false)]
fn test_pattern_unicode_block(#[case] subject: &str, #[case] expected: bool) {
    let pattern = StringOrVariableRef::literal(r"\p{IsBasicLatin}*");
    assert_eq!(value_of(pattern_match(pattern, subject)), boolean(expected));
}

#[test]
fn test_pattern_caret_and_dollar_are_literal() {
    let result = value_of(pattern_match(StringOrVariableRef::literal("^String$"), "String"));
    assert_eq!(result, boolean(false));
    let result = value_of(pattern_match(StringOrVariableRef::literal("^String$"), "^String$"));
    assert_eq!(result, boolean(true));
}

#[test]
fn test_pattern_is_anchored() {
    let result = value_of(pattern_match(StringOrVariableRef::literal("[0-9]+"), "abc123"));
    assert_eq!(result, boolean(false));
    let result = value_of(pattern_match(StringOrVariableRef::literal("[0-9]+"), "123"));
    assert_eq!(result, boolean(true));
}

#[test]
fn test_pattern_from_variable() {
    let result = value_of(pattern_match(StringOrVariableRef::variable("DIGITS"), "2024"));
    assert_eq!(result, boolean(true));
    let err = error_of(pattern_match(StringOrVariableRef::variable("THREE"), "2024"));
    assert_eq!(err, ProcessingErrorCode::WrongVariableBaseType);
}

#[test]
fn test_invalid_pattern_is_runtime_error() {
    let err = crate::eval(&pattern_match(StringOrVariableRef::literal("(unclosed"), "x")).unwrap_err();
    assert_eq!(err.code(), ProcessingErrorCode::RuntimeError);
    assert!(err.to_string().contains("patternMatch"));
}
