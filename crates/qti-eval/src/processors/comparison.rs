//! Comparison operators: lt, gt, lte, gte, equal, equalRounded,
//! durationLT, durationGTE, match

use qti_expr::{FloatOrVariableRef, IntOrVariableRef, RoundingMode, ToleranceMode};
use qti_types::{QtiDuration, QtiScalar};

use super::arithmetic::round_with_mode;
use super::{Output, null, value};
use crate::context::EvaluationContext;
use crate::error::ProcessingError;
use crate::processor::OperatorProcessor;

impl OperatorProcessor<'_> {
    fn numbers(&self) -> Option<(f64, f64)> {
        Some((
            self.scalar(0)?.as_number()?,
            self.scalar(1)?.as_number()?,
        ))
    }

    pub(crate) fn process_numeric_comparison(&self, compare: fn(f64, f64) -> bool) -> Output {
        if self.operands.contains_null() {
            return null();
        }
        self.check_single_numeric()?;
        match self.numbers() {
            Some((a, b)) => value(compare(a, b)),
            None => null(),
        }
    }

    /// `exact` compares directly. `absolute` accepts `y` within
    /// `[x - t0, x + t1]`, `relative` within `[x * (1 - t0 / 100), x * (1 + t1 / 100)]`;
    /// a single tolerance value is used for both bounds.
    pub(crate) fn process_equal(
        &self,
        mode: ToleranceMode,
        tolerance: &[FloatOrVariableRef],
        (include_lower, include_upper): (bool, bool),
        ctx: &mut EvaluationContext<'_>,
    ) -> Output {
        if self.operands.contains_null() {
            return null();
        }
        self.check_single_numeric()?;
        let Some((x, y)) = self.numbers() else {
            return null();
        };

        if mode == ToleranceMode::Exact {
            return value(x == y);
        }

        let (t0, t1) = match tolerance {
            [t] => {
                let t = ctx.resolve_float(t)?;
                (t, t)
            }
            [t0, t1] => (ctx.resolve_float(t0)?, ctx.resolve_float(t1)?),
            _ => {
                return Err(ProcessingError::logic(format!(
                    "the '{}' operator needs one or two tolerance values in {:?} mode, {} given",
                    self.name(),
                    mode,
                    tolerance.len()
                )));
            }
        };

        let (lower, upper) = match mode {
            ToleranceMode::Absolute => (x - t0, x + t1),
            _ => (x * (1.0 - t0 / 100.0), x * (1.0 + t1 / 100.0)),
        };
        let above_lower = if include_lower { y >= lower } else { y > lower };
        let below_upper = if include_upper { y <= upper } else { y < upper };
        value(above_lower && below_upper)
    }

    pub(crate) fn process_equal_rounded(
        &self,
        mode: RoundingMode,
        figures: &IntOrVariableRef,
        ctx: &mut EvaluationContext<'_>,
    ) -> Output {
        if self.operands.contains_null() {
            return null();
        }
        self.check_single_numeric()?;
        let figures = ctx.resolve_int(figures)?;
        let Some((x, y)) = self.numbers() else {
            return null();
        };
        let x = round_with_mode(self.name(), x, mode, figures)?;
        let y = round_with_mode(self.name(), y, mode, figures)?;
        match (x, y) {
            (Some(x), Some(y)) => value(x == y),
            _ => null(),
        }
    }

    pub(crate) fn process_duration_comparison(
        &self,
        compare: fn(&QtiDuration, &QtiDuration) -> bool,
    ) -> Output {
        if self.operands.contains_null() {
            return null();
        }
        self.check_contract(
            (self.operands.exclusively_single(), "single"),
            (self.operands.exclusively_duration(), "duration"),
        )?;
        match (
            self.scalar(0).and_then(QtiScalar::as_duration),
            self.scalar(1).and_then(QtiScalar::as_duration),
        ) {
            (Some(a), Some(b)) => value(compare(a, b)),
            _ => null(),
        }
    }

    /// Equality of two values of the same cardinality and base type:
    /// multiset equality for multiple containers, positional for ordered
    pub(crate) fn process_match(&self) -> Output {
        if self.operands.contains_null() {
            return null();
        }
        self.check_cardinality(self.operands.anything_but_record(), "single, multiple or ordered")?;
        self.check_cardinality(self.operands.same_cardinality(), "identical")?;
        if !self.operands.same_base_type() {
            return Err(ProcessingError::wrong_base_type(
                self.name(),
                "only accepts operands with the same base type",
            ));
        }
        match (self.operands.value(0), self.operands.value(1)) {
            (Some(a), Some(b)) => value(a == b),
            _ => null(),
        }
    }
}
