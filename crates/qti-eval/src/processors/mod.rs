//! Built-in operator processors
//!
//! Each submodule adds the `process_*` methods for one family of operators
//! to [`OperatorProcessor`]; dispatch lives in `processor.rs`.

mod area;
mod arithmetic;
mod comparison;
mod container;
mod logical;
mod math;
mod string;

use qti_types::{QtiScalar, QtiValue};

use crate::error::{ProcessingError, ProcessingResult};
use crate::processor::OperatorProcessor;

type Output = ProcessingResult<Option<QtiValue>>;

impl OperatorProcessor<'_> {
    pub(crate) fn check_cardinality(&self, accepted: bool, expected: &str) -> ProcessingResult<()> {
        if accepted {
            Ok(())
        } else {
            Err(ProcessingError::wrong_cardinality(
                self.name(),
                format!("only accepts operands with {} cardinality", expected),
            ))
        }
    }

    pub(crate) fn check_base_type(&self, accepted: bool, expected: &str) -> ProcessingResult<()> {
        if accepted {
            Ok(())
        } else {
            Err(ProcessingError::wrong_base_type(
                self.name(),
                format!("only accepts operands with {} base type", expected),
            ))
        }
    }

    /// Both contracts at once; breaking both reports the combined error
    pub(crate) fn check_contract(
        &self,
        cardinality: (bool, &str),
        base_type: (bool, &str),
    ) -> ProcessingResult<()> {
        if !cardinality.0 && !base_type.0 {
            return Err(ProcessingError::wrong_base_type_or_cardinality(
                self.name(),
                format!(
                    "only accepts operands with {} cardinality and {} base type",
                    cardinality.1, base_type.1
                ),
            ));
        }
        self.check_cardinality(cardinality.0, cardinality.1)?;
        self.check_base_type(base_type.0, base_type.1)
    }

    /// Scalars of the non-null single operands
    pub(crate) fn single_scalars(&self) -> impl Iterator<Item = &QtiScalar> {
        self.operands.non_null().filter_map(QtiValue::as_scalar)
    }

    /// Scalar of the operand at `index`, if it is a non-null single value
    pub(crate) fn scalar(&self, index: usize) -> Option<&QtiScalar> {
        self.operands.value(index).and_then(QtiValue::as_scalar)
    }

    /// Every non-null scalar, container elements included
    pub(crate) fn flattened_scalars(&self) -> Option<Vec<&QtiScalar>> {
        let mut scalars = Vec::new();
        for value in self.operands.non_null() {
            match value {
                QtiValue::Single(scalar) => scalars.push(scalar),
                QtiValue::Multiple(c) | QtiValue::Ordered(c) => {
                    for element in c.iter() {
                        scalars.push(element?);
                    }
                }
                QtiValue::Record(_) => return None,
            }
        }
        Some(scalars)
    }
}

fn null() -> Output {
    Ok(None)
}

fn value(value: impl Into<QtiValue>) -> Output {
    Ok(Some(value.into()))
}

/// NaN and infinite results are NULL
fn finite(result: f64) -> Output {
    if result.is_finite() {
        value(result)
    } else {
        null()
    }
}
