//! mathOperator and statsOperator

use qti_expr::{MathFunction, StatsFunction};
use qti_types::QtiScalar;
use std::f64::consts::PI;

use super::{Output, finite, null, value};
use crate::numeric;
use crate::processor::OperatorProcessor;

fn signum(x: f64) -> f64 {
    if x == 0.0 { 0.0 } else { x.signum() }
}

impl OperatorProcessor<'_> {
    /// Floats, except `floor` and `ceil` (always integers) and `abs` and
    /// `signum` over an integer
    pub(crate) fn process_math(&self, function: MathFunction) -> Output {
        if self.operands.contains_null() {
            return null();
        }
        self.check_single_numeric()?;

        let Some(first) = self.scalar(0) else {
            return null();
        };
        let Some(x) = first.as_number() else {
            return null();
        };

        if let QtiScalar::Integer(i) = first {
            match function {
                MathFunction::Abs => return i.checked_abs().map_or_else(null, value),
                MathFunction::Signum => return value(i.signum()),
                _ => {}
            }
        }

        let result = match function {
            MathFunction::Sin => x.sin(),
            MathFunction::Cos => x.cos(),
            MathFunction::Tan => x.tan(),
            MathFunction::Sec => 1.0 / x.cos(),
            MathFunction::Csc => 1.0 / x.sin(),
            MathFunction::Cot => 1.0 / x.tan(),
            MathFunction::Asin => x.asin(),
            MathFunction::Acos => x.acos(),
            MathFunction::Atan => x.atan(),
            MathFunction::Atan2 => match self.scalar(1).and_then(QtiScalar::as_number) {
                Some(x2) => x.atan2(x2),
                None => return null(),
            },
            MathFunction::Asec => (1.0 / x).acos(),
            MathFunction::Acsc => (1.0 / x).asin(),
            MathFunction::Acot => (1.0 / x).atan(),
            MathFunction::Sinh => x.sinh(),
            MathFunction::Cosh => x.cosh(),
            MathFunction::Tanh => x.tanh(),
            MathFunction::Sech => 1.0 / x.cosh(),
            MathFunction::Csch => 1.0 / x.sinh(),
            MathFunction::Coth => 1.0 / x.tanh(),
            MathFunction::Log => x.log10(),
            MathFunction::Ln => x.ln(),
            MathFunction::Exp => x.exp(),
            MathFunction::Abs => x.abs(),
            MathFunction::Signum => signum(x),
            MathFunction::Floor => return numeric::to_i32(x.floor()).map_or_else(null, value),
            MathFunction::Ceil => return numeric::to_i32(x.ceil()).map_or_else(null, value),
            MathFunction::ToDegrees => x * 180.0 / PI,
            MathFunction::ToRadians => x * PI / 180.0,
        };
        finite(result)
    }

    pub(crate) fn process_stats(&self, function: StatsFunction) -> Output {
        if self.operands.contains_null() {
            return null();
        }
        self.check_contract(
            (self.operands.exclusively_multiple_or_ordered(), "multiple or ordered"),
            (self.operands.exclusively_numeric(), "integer or float"),
        )?;

        let Some(values) = self
            .flattened_scalars()
            .map(|scalars| scalars.iter().filter_map(|s| s.as_number()).collect::<Vec<_>>())
        else {
            return null();
        };

        let result = match function {
            StatsFunction::Mean => numeric::mean(&values),
            StatsFunction::SampleVariance => numeric::sample_variance(&values),
            StatsFunction::SampleSd => numeric::sample_variance(&values).map(f64::sqrt),
            StatsFunction::PopVariance => numeric::population_variance(&values),
            StatsFunction::PopSd => numeric::population_variance(&values).map(f64::sqrt),
        };
        result.map_or_else(null, finite)
    }
}
