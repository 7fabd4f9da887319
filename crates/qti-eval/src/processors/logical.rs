//! Logical operators: and, or, not, anyN, isNull
//!
//! `and`, `or` and `anyN` use three-valued logic: with NULL operands present
//! the result is only forced when the definite values settle it.

use qti_expr::IntOrVariableRef;
use qti_types::QtiValue;

use super::{Output, null, value};
use crate::context::EvaluationContext;
use crate::processor::OperatorProcessor;

impl OperatorProcessor<'_> {
    fn check_boolean_operands(&self) -> crate::error::ProcessingResult<()> {
        self.check_contract(
            (self.operands.exclusively_single(), "single"),
            (self.operands.exclusively_boolean(), "boolean"),
        )
    }

    fn definite_booleans(&self) -> impl Iterator<Item = bool> + '_ {
        self.single_scalars().filter_map(|s| s.as_boolean())
    }

    /// Truth table:
    /// | A     | B     | A and B |
    /// |-------|-------|---------|
    /// | true  | true  | true    |
    /// | true  | false | false   |
    /// | true  | null  | null    |
    /// | false | null  | false   |
    /// | null  | null  | null    |
    pub(crate) fn process_and(&self) -> Output {
        if self.operands.contains_null() {
            return if self.definite_booleans().any(|b| !b) {
                value(false)
            } else {
                null()
            };
        }
        self.check_boolean_operands()?;
        value(self.definite_booleans().all(|b| b))
    }

    /// Truth table:
    /// | A     | B     | A or B  |
    /// |-------|-------|---------|
    /// | true  | null  | true    |
    /// | false | false | false   |
    /// | false | null  | null    |
    /// | null  | null  | null    |
    pub(crate) fn process_or(&self) -> Output {
        if self.operands.contains_null() {
            return if self.definite_booleans().any(|b| b) {
                value(true)
            } else {
                null()
            };
        }
        self.check_boolean_operands()?;
        value(self.definite_booleans().any(|b| b))
    }

    pub(crate) fn process_not(&self) -> Output {
        if self.operands.contains_null() {
            return null();
        }
        self.check_boolean_operands()?;
        match self.scalar(0).and_then(|s| s.as_boolean()) {
            Some(b) => value(!b),
            None => null(),
        }
    }

    /// True when the number of true operands `t` lies in `min..=max`.
    /// Otherwise NULL when the NULL operands (`n`) could still bring it
    /// there (`min <= t + n <= max`), false if not.
    pub(crate) fn process_any_n(
        &self,
        min: &IntOrVariableRef,
        max: &IntOrVariableRef,
        ctx: &mut EvaluationContext<'_>,
    ) -> Output {
        let min = i64::from(ctx.resolve_int(min)?);
        let max = i64::from(ctx.resolve_int(max)?);

        let nulls = self
            .operands
            .iter()
            .filter(|v| v.as_ref().is_none_or(QtiValue::is_null))
            .count() as i64;
        if nulls == 0 {
            self.check_boolean_operands()?;
        }
        let trues = self.definite_booleans().filter(|b| *b).count() as i64;

        if (min..=max).contains(&trues) {
            value(true)
        } else if (min..=max).contains(&(trues + nulls)) {
            null()
        } else {
            value(false)
        }
    }

    /// Never NULL
    pub(crate) fn process_is_null(&self) -> Output {
        value(self.operands.contains_null())
    }
}
