//! Arithmetic operators
//!
//! Results are integers when every contributing value is an integer and
//! floats otherwise. Division by zero and results that are NaN or out of
//! range are NULL.

use qti_expr::{IntOrVariableRef, RoundingMode};
use qti_types::QtiScalar;

use super::{Output, finite, null, value};
use crate::context::EvaluationContext;
use crate::error::{ProcessingError, ProcessingResult};
use crate::numeric;
use crate::processor::OperatorProcessor;

fn all_integers(scalars: &[&QtiScalar]) -> bool {
    scalars.iter().all(|s| matches!(s, QtiScalar::Integer(_)))
}

/// Round `x` to `figures`, NULL for NaN; infinities are kept
pub(crate) fn round_with_mode(
    operator: &str,
    x: f64,
    mode: RoundingMode,
    figures: i32,
) -> ProcessingResult<Option<f64>> {
    if x.is_nan() {
        return Ok(None);
    }
    if x.is_infinite() {
        return Ok(Some(x));
    }
    match mode {
        RoundingMode::SignificantFigures => {
            let figures = u32::try_from(figures).ok().filter(|f| *f >= 1).ok_or_else(|| {
                ProcessingError::runtime(operator, "significant figures must be at least 1")
            })?;
            Ok(numeric::round_to_significant_figures(x, figures))
        }
        RoundingMode::DecimalPlaces => {
            let places = u32::try_from(figures).map_err(|_| {
                ProcessingError::runtime(operator, "decimal places must not be negative")
            })?;
            Ok(numeric::round_to_decimal_places(x, places))
        }
    }
}

impl OperatorProcessor<'_> {
    pub(crate) fn check_single_numeric(&self) -> ProcessingResult<()> {
        self.check_contract(
            (self.operands.exclusively_single(), "single"),
            (self.operands.exclusively_numeric(), "integer or float"),
        )
    }

    fn check_single_integer(&self) -> ProcessingResult<()> {
        self.check_contract(
            (self.operands.exclusively_single(), "single"),
            (self.operands.exclusively_integer(), "integer"),
        )
    }

    fn fold_numeric(
        &self,
        int_init: i32,
        int_op: fn(i32, i32) -> Option<i32>,
        float_init: f64,
        float_op: fn(f64, f64) -> f64,
    ) -> Output {
        let scalars: Vec<&QtiScalar> = self.single_scalars().collect();
        if all_integers(&scalars) {
            let mut acc = int_init;
            for i in scalars.iter().filter_map(|s| s.as_integer()) {
                match int_op(acc, i) {
                    Some(next) => acc = next,
                    None => return null(),
                }
            }
            value(acc)
        } else {
            finite(
                scalars
                    .iter()
                    .filter_map(|s| s.as_number())
                    .fold(float_init, float_op),
            )
        }
    }

    /// Both operands of a binary numeric operator
    fn numeric_pair(&self) -> Option<(&QtiScalar, &QtiScalar)> {
        Some((self.scalar(0)?, self.scalar(1)?))
    }

    pub(crate) fn process_sum(&self) -> Output {
        if self.operands.contains_null() {
            return null();
        }
        self.check_single_numeric()?;
        self.fold_numeric(0, i32::checked_add, 0.0, |a, b| a + b)
    }

    pub(crate) fn process_product(&self) -> Output {
        if self.operands.contains_null() {
            return null();
        }
        self.check_single_numeric()?;
        self.fold_numeric(1, i32::checked_mul, 1.0, |a, b| a * b)
    }

    pub(crate) fn process_subtract(&self) -> Output {
        if self.operands.contains_null() {
            return null();
        }
        self.check_single_numeric()?;
        match self.numeric_pair() {
            Some((QtiScalar::Integer(a), QtiScalar::Integer(b))) => {
                a.checked_sub(*b).map_or_else(null, value)
            }
            Some((a, b)) => match (a.as_number(), b.as_number()) {
                (Some(a), Some(b)) => finite(a - b),
                _ => null(),
            },
            None => null(),
        }
    }

    /// Always a float
    pub(crate) fn process_divide(&self) -> Output {
        if self.operands.contains_null() {
            return null();
        }
        self.check_single_numeric()?;
        match self.numeric_pair().map(|(a, b)| (a.as_number(), b.as_number())) {
            Some((Some(_), Some(divisor))) if divisor == 0.0 => null(),
            Some((Some(a), Some(b))) => finite(a / b),
            _ => null(),
        }
    }

    /// Integer when both operands are integers, the exponent is not negative
    /// and the result fits
    pub(crate) fn process_power(&self) -> Output {
        if self.operands.contains_null() {
            return null();
        }
        self.check_single_numeric()?;
        let Some((base, exponent)) = self.numeric_pair() else {
            return null();
        };
        if let (QtiScalar::Integer(b), QtiScalar::Integer(e)) = (base, exponent) {
            if let Some(result) = u32::try_from(*e).ok().and_then(|e| b.checked_pow(e)) {
                return value(result);
            }
        }
        match (base.as_number(), exponent.as_number()) {
            (Some(b), Some(e)) => finite(b.powf(e)),
            _ => null(),
        }
    }

    /// Rounds down towards negative infinity
    pub(crate) fn process_integer_divide(&self) -> Output {
        if self.operands.contains_null() {
            return null();
        }
        self.check_single_integer()?;
        match (self.scalar(0).and_then(QtiScalar::as_integer), self.scalar(1).and_then(QtiScalar::as_integer)) {
            (Some(x), Some(y)) => numeric::floor_div(x, y).map_or_else(null, value),
            _ => null(),
        }
    }

    pub(crate) fn process_integer_modulus(&self) -> Output {
        if self.operands.contains_null() {
            return null();
        }
        self.check_single_integer()?;
        match (self.scalar(0).and_then(QtiScalar::as_integer), self.scalar(1).and_then(QtiScalar::as_integer)) {
            (Some(x), Some(y)) => numeric::floor_mod(x, y).map_or_else(null, value),
            _ => null(),
        }
    }

    pub(crate) fn process_integer_to_float(&self) -> Output {
        if self.operands.contains_null() {
            return null();
        }
        self.check_single_integer()?;
        match self.scalar(0).and_then(QtiScalar::as_integer) {
            Some(i) => value(f64::from(i)),
            None => null(),
        }
    }

    fn round_unary(&self, round: fn(f64) -> f64) -> Output {
        if self.operands.contains_null() {
            return null();
        }
        self.check_single_numeric()?;
        match self.scalar(0) {
            Some(QtiScalar::Integer(i)) => value(*i),
            Some(QtiScalar::Float(f)) if f.is_nan() => null(),
            Some(QtiScalar::Float(f)) if f.is_infinite() => value(*f),
            Some(QtiScalar::Float(f)) => numeric::to_i32(round(*f)).map_or_else(null, value),
            _ => null(),
        }
    }

    /// Towards zero
    pub(crate) fn process_truncate(&self) -> Output {
        self.round_unary(f64::trunc)
    }

    /// `n + 0.5` rounds up to `n + 1`, `-n - 0.5` rounds up to `-n`
    pub(crate) fn process_round(&self) -> Output {
        self.round_unary(|x| (x + 0.5).floor())
    }

    pub(crate) fn process_round_to(
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
        match self.scalar(0) {
            Some(QtiScalar::Integer(i)) => {
                let rounded = round_with_mode(self.name(), f64::from(*i), mode, figures)?;
                rounded.and_then(numeric::to_i32).map_or_else(null, value)
            }
            Some(QtiScalar::Float(f)) => {
                round_with_mode(self.name(), *f, mode, figures)?.map_or_else(null, value)
            }
            _ => null(),
        }
    }

    fn flattened_integers(&self) -> ProcessingResult<Option<Vec<i64>>> {
        self.check_contract(
            (self.operands.anything_but_record(), "single, multiple or ordered"),
            (self.operands.exclusively_integer(), "integer"),
        )?;
        Ok(self.flattened_scalars().map(|scalars| {
            scalars
                .iter()
                .filter_map(|s| s.as_integer())
                .map(i64::from)
                .collect()
        }))
    }

    pub(crate) fn process_gcd(&self) -> Output {
        if self.operands.contains_null() {
            return null();
        }
        let Some(values) = self.flattened_integers()? else {
            return null();
        };
        let result = values.into_iter().fold(0, numeric::gcd);
        i32::try_from(result).map_or_else(|_| null(), value)
    }

    pub(crate) fn process_lcm(&self) -> Output {
        if self.operands.contains_null() {
            return null();
        }
        let Some(values) = self.flattened_integers()? else {
            return null();
        };
        let mut acc = 1i64;
        for v in values {
            acc = numeric::lcm(acc, v);
            if acc == 0 {
                return value(0);
            }
            if acc > i64::from(i32::MAX) {
                return null();
            }
        }
        i32::try_from(acc).map_or_else(|_| null(), value)
    }

    fn extremum(&self, pick_first: fn(f64, f64) -> bool) -> Output {
        if self.operands.contains_null() {
            return null();
        }
        self.check_contract(
            (self.operands.anything_but_record(), "single, multiple or ordered"),
            (self.operands.exclusively_numeric(), "integer or float"),
        )?;
        let Some(scalars) = self.flattened_scalars() else {
            return null();
        };
        let mut best: Option<&QtiScalar> = None;
        for scalar in &scalars {
            let replace = match (best.and_then(QtiScalar::as_number), scalar.as_number()) {
                (None, _) => true,
                (Some(current), Some(candidate)) => pick_first(candidate, current),
                (Some(_), None) => false,
            };
            if replace {
                best = Some(*scalar);
            }
        }
        match best {
            Some(QtiScalar::Integer(i)) if all_integers(&scalars) => value(*i),
            Some(scalar) => scalar.as_number().map_or_else(null, finite),
            None => null(),
        }
    }

    pub(crate) fn process_min(&self) -> Output {
        self.extremum(|candidate, current| candidate < current)
    }

    pub(crate) fn process_max(&self) -> Output {
        self.extremum(|candidate, current| candidate > current)
    }
}
