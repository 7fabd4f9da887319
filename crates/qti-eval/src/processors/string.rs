//! String operators: stringMatch, substring, patternMatch

use qti_expr::StringOrVariableRef;
use qti_types::QtiScalar;

use super::{Output, null, value};
use crate::context::EvaluationContext;
use crate::error::{ProcessingError, ProcessingResult};
use crate::processor::OperatorProcessor;
use crate::xsd_regex;

impl OperatorProcessor<'_> {
    fn check_single_string(&self) -> ProcessingResult<()> {
        self.check_contract(
            (self.operands.exclusively_single(), "single"),
            (self.operands.exclusively_string(), "string"),
        )
    }

    fn string_operand(&self, index: usize) -> Option<&str> {
        match self.scalar(index)? {
            QtiScalar::String(s) => Some(s),
            _ => None,
        }
    }

    fn string_pair(&self, case_sensitive: bool) -> Option<(String, String)> {
        let (a, b) = (self.string_operand(0)?, self.string_operand(1)?);
        if case_sensitive {
            Some((a.to_string(), b.to_string()))
        } else {
            Some((a.to_lowercase(), b.to_lowercase()))
        }
    }

    /// With `substring` set, true when the first string contains the second
    pub(crate) fn process_string_match(&self, case_sensitive: bool, substring: bool) -> Output {
        if self.operands.contains_null() {
            return null();
        }
        self.check_single_string()?;
        match self.string_pair(case_sensitive) {
            Some((a, b)) if substring => value(a.contains(&b)),
            Some((a, b)) => value(a == b),
            None => null(),
        }
    }

    /// True when the first string occurs in the second
    pub(crate) fn process_substring(&self, case_sensitive: bool) -> Output {
        if self.operands.contains_null() {
            return null();
        }
        self.check_single_string()?;
        match self.string_pair(case_sensitive) {
            Some((needle, haystack)) => value(haystack.contains(&needle)),
            None => null(),
        }
    }

    /// Matches the whole string against an XML Schema pattern
    pub(crate) fn process_pattern_match(
        &self,
        pattern: &StringOrVariableRef,
        ctx: &mut EvaluationContext<'_>,
    ) -> Output {
        if self.operands.contains_null() {
            return null();
        }
        self.check_single_string()?;
        let pattern = ctx.resolve_string(pattern)?;
        let regex = xsd_regex::compile(pattern)
            .map_err(|e| ProcessingError::runtime(self.name(), e.to_string()))?;
        match self.string_operand(0) {
            Some(s) => value(regex.is_match(s)),
            None => null(),
        }
    }
}
