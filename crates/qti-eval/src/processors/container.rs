//! Container operators
//!
//! `multiple`, `ordered` and `repeat` ignore NULL operands instead of
//! propagating them, and `containerSize` counts a NULL operand as empty.
//! Multiple containers are compared as multisets, ordered ones by position.

use qti_expr::IntOrVariableRef;
use qti_types::{Cardinality, Container, QtiScalar, QtiValue};

use super::{Output, null, value};
use crate::context::EvaluationContext;
use crate::error::{ProcessingError, ProcessingResult};
use crate::processor::OperatorProcessor;

/// Whether `needle` occurs in `haystack` as a contiguous run
fn contains_run(haystack: &[Option<QtiScalar>], needle: &[Option<QtiScalar>]) -> bool {
    needle.is_empty() || haystack.windows(needle.len()).any(|window| window == needle)
}

/// Whether every value of `needle` occurs in `haystack` at least as often
fn contains_all(haystack: &Container, needle: &Container) -> bool {
    needle
        .iter()
        .all(|value| haystack.occurrences(value) >= needle.occurrences(value))
}

impl OperatorProcessor<'_> {
    fn all_operands_null(&self) -> bool {
        self.operands.non_null().next().is_none()
    }

    fn check_same_base_type_ignoring_null(&self) -> ProcessingResult<()> {
        if self.all_operands_null() || self.operands.same_base_type_ignoring_null() {
            Ok(())
        } else {
            Err(ProcessingError::wrong_base_type(
                self.name(),
                "only accepts operands with the same base type",
            ))
        }
    }

    /// Gather every non-null operand and element into one container
    fn collect_elements(&self) -> ProcessingResult<Option<Container>> {
        let Some(base_type) = self.operands.non_null().find_map(QtiValue::base_type) else {
            return Ok(None);
        };
        let mut builder = Container::builder(base_type);
        for operand in self.operands.non_null() {
            match operand {
                QtiValue::Single(scalar) => {
                    builder.push(Some(scalar.clone()))?;
                }
                QtiValue::Multiple(c) | QtiValue::Ordered(c) => {
                    for element in c.values() {
                        builder.push(element.clone())?;
                    }
                }
                QtiValue::Record(_) => {}
            }
        }
        Ok(Some(builder.build()))
    }

    pub(crate) fn process_multiple(&self) -> Output {
        self.check_cardinality(
            self.operands.exclusively_single_or_multiple() || self.all_operands_null(),
            "single or multiple",
        )?;
        self.check_same_base_type_ignoring_null()?;
        Ok(self.collect_elements()?.map(QtiValue::Multiple))
    }

    pub(crate) fn process_ordered(&self) -> Output {
        self.check_cardinality(
            self.operands.exclusively_single_or_ordered() || self.all_operands_null(),
            "single or ordered",
        )?;
        self.check_same_base_type_ignoring_null()?;
        Ok(self.collect_elements()?.map(QtiValue::Ordered))
    }

    /// Never NULL: a NULL operand has size 0
    pub(crate) fn process_container_size(&self) -> Output {
        if self.operands.contains_null() {
            return value(0);
        }
        self.check_cardinality(self.operands.exclusively_multiple_or_ordered(), "multiple or ordered")?;
        let size = self
            .operands
            .value(0)
            .and_then(QtiValue::as_container)
            .map_or(0, Container::len);
        value(i32::try_from(size).unwrap_or(i32::MAX))
    }

    /// Multiple: every value of the second container occurs in the first at
    /// least as often. Ordered: the second container is a contiguous run of
    /// the first.
    pub(crate) fn process_contains(&self) -> Output {
        if self.operands.contains_null() {
            return null();
        }
        self.check_cardinality(
            self.operands.exclusively_multiple_or_ordered() && self.operands.same_cardinality(),
            "identical multiple or ordered",
        )?;
        if !self.operands.same_base_type() {
            return Err(ProcessingError::wrong_base_type(
                self.name(),
                "only accepts operands with the same base type",
            ));
        }
        match (self.operands.value(0), self.operands.value(1)) {
            (Some(QtiValue::Multiple(haystack)), Some(QtiValue::Multiple(needle))) => {
                value(contains_all(haystack, needle))
            }
            (Some(QtiValue::Ordered(haystack)), Some(QtiValue::Ordered(needle))) => {
                value(contains_run(haystack.values(), needle.values()))
            }
            _ => null(),
        }
    }

    /// Single first operand and the container it is looked up in
    fn single_and_container(&self) -> ProcessingResult<Option<(&QtiScalar, &Container)>> {
        let first = self.operands.value(0);
        let second = self.operands.value(1);
        let cardinalities_ok = first.is_some_and(|v| v.cardinality() == Cardinality::Single)
            && second.is_some_and(|v| matches!(v.cardinality(), Cardinality::Multiple | Cardinality::Ordered));
        self.check_cardinality(cardinalities_ok, "single then multiple or ordered")?;
        if !self.operands.same_base_type() {
            return Err(ProcessingError::wrong_base_type(
                self.name(),
                "only accepts operands with the same base type",
            ));
        }
        Ok(first
            .and_then(QtiValue::as_scalar)
            .zip(second.and_then(QtiValue::as_container)))
    }

    pub(crate) fn process_member(&self) -> Output {
        if self.operands.contains_null() {
            return null();
        }
        match self.single_and_container()? {
            Some((needle, container)) => value(container.contains(needle)),
            None => null(),
        }
    }

    /// Remove every occurrence of the first operand from the container
    pub(crate) fn process_delete(&self) -> Output {
        if self.operands.contains_null() {
            return null();
        }
        let Some((needle, container)) = self.single_and_container()? else {
            return null();
        };
        let kept = Container::from_values(
            container.base_type(),
            container
                .values()
                .iter()
                .filter(|v| v.as_ref() != Some(needle))
                .cloned(),
        )?;
        match self.operands.value(1).map(QtiValue::cardinality) {
            Some(Cardinality::Ordered) => value(QtiValue::Ordered(kept)),
            _ => value(QtiValue::Multiple(kept)),
        }
    }

    /// 1-based; NULL past the end of the container
    pub(crate) fn process_index(&self, n: &IntOrVariableRef, ctx: &mut EvaluationContext<'_>) -> Output {
        if self.operands.contains_null() {
            return null();
        }
        self.check_cardinality(self.operands.exclusively_ordered(), "ordered")?;
        let n = ctx.resolve_int(n)?;
        if n < 1 {
            return Err(ProcessingError::runtime(
                self.name(),
                format!("'n' must be a positive integer, {} given", n),
            ));
        }
        let index = usize::try_from(n - 1).unwrap_or(usize::MAX);
        match self
            .operands
            .value(0)
            .and_then(QtiValue::as_container)
            .and_then(|c| c.get(index))
        {
            Some(scalar) => value(scalar.clone()),
            None => null(),
        }
    }

    /// Ordered concatenation of the operands, `numberRepeats` times
    pub(crate) fn process_repeat(
        &self,
        number_repeats: &IntOrVariableRef,
        ctx: &mut EvaluationContext<'_>,
    ) -> Output {
        self.check_cardinality(
            self.operands.exclusively_single_or_ordered() || self.all_operands_null(),
            "single or ordered",
        )?;
        self.check_same_base_type_ignoring_null()?;
        let repeats = ctx.resolve_int(number_repeats)?;
        if repeats < 1 {
            return null();
        }
        let Some(once) = self.collect_elements()? else {
            return null();
        };
        let mut builder = Container::builder(once.base_type());
        for _ in 0..repeats {
            for element in once.values() {
                builder.push(element.clone())?;
            }
        }
        let result = builder.build();
        if result.is_null() {
            null()
        } else {
            value(QtiValue::Ordered(result))
        }
    }

    /// A randomly selected element
    pub(crate) fn process_random(&self, ctx: &mut EvaluationContext<'_>) -> Output {
        if self.operands.contains_null() {
            return null();
        }
        self.check_cardinality(self.operands.exclusively_multiple_or_ordered(), "multiple or ordered")?;
        let Some(container) = self.operands.value(0).and_then(QtiValue::as_container) else {
            return null();
        };
        let candidates: Vec<&QtiScalar> = container.scalars().collect();
        if candidates.is_empty() {
            return null();
        }
        let pick = ctx.rng().usize(..candidates.len());
        value(candidates[pick].clone())
    }

    /// Field of a record; NULL when the field is absent or NULL
    pub(crate) fn process_field_value(&self, field_identifier: &str) -> Output {
        if self.operands.contains_null() {
            return null();
        }
        self.check_cardinality(self.operands.exclusively_record(), "record")?;
        match self
            .operands
            .value(0)
            .and_then(QtiValue::as_record)
            .and_then(|record| record.get(field_identifier))
        {
            Some(scalar) => value(scalar.clone()),
            None => null(),
        }
    }
}
