//! Operator processors
//!
//! A processor is an operator with its operands attached. Attaching checks
//! the operand count against the operator's arity; `process` then validates
//! the operand contracts and computes the result.

use qti_expr::{Arity, Operator};
use qti_types::QtiValue;
use std::fmt;
use std::sync::Arc;

use crate::context::EvaluationContext;
use crate::custom::CustomOperator;
use crate::error::{ProcessingError, ProcessingResult};
use crate::operands::Operands;

/// The implementation selected for an operator
#[derive(Clone)]
pub enum ProcessorKind<'o> {
    /// One of the QTI operators
    Builtin(&'o Operator),
    /// A `customOperator` resolved through the registry
    Custom {
        operator: &'o Operator,
        class: String,
        implementation: Arc<dyn CustomOperator>,
    },
}

impl<'o> ProcessorKind<'o> {
    pub fn operator(&self) -> &'o Operator {
        match self {
            Self::Builtin(operator) | Self::Custom { operator, .. } => operator,
        }
    }

    pub fn arity(&self) -> Arity {
        match self {
            Self::Builtin(operator) => operator.arity(),
            Self::Custom { implementation, .. } => implementation.arity(),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Builtin(operator) => operator.name(),
            Self::Custom { class, .. } => class,
        }
    }

    /// Check an operand count against the arity
    pub fn check_arity(&self, count: usize) -> ProcessingResult<()> {
        let arity = self.arity();
        if count < arity.min {
            return Err(ProcessingError::NotEnoughOperands {
                operator: self.name().to_string(),
                min: arity.min,
                found: count,
            });
        }
        if let Some(max) = arity.max.filter(|max| count > *max) {
            return Err(ProcessingError::TooMuchOperands {
                operator: self.name().to_string(),
                max,
                found: count,
            });
        }
        Ok(())
    }

    /// Attach evaluated operands, producing a processor
    pub fn attach(self, operands: Operands) -> ProcessingResult<OperatorProcessor<'o>> {
        self.check_arity(operands.len())?;
        Ok(OperatorProcessor {
            kind: self,
            operands,
        })
    }
}

impl fmt::Debug for ProcessorKind<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Builtin(operator) => f.debug_tuple("Builtin").field(operator).finish(),
            Self::Custom { class, .. } => f.debug_struct("Custom").field("class", class).finish(),
        }
    }
}

/// An operator ready to be processed over its operands
#[derive(Debug, Clone)]
pub struct OperatorProcessor<'o> {
    kind: ProcessorKind<'o>,
    pub(crate) operands: Operands,
}

impl<'o> OperatorProcessor<'o> {
    pub fn kind(&self) -> &ProcessorKind<'o> {
        &self.kind
    }

    pub fn operands(&self) -> &Operands {
        &self.operands
    }

    pub fn name(&self) -> &str {
        self.kind.name()
    }

    /// Compute the result, `None` being NULL
    pub fn process(&self, ctx: &mut EvaluationContext<'_>) -> ProcessingResult<Option<QtiValue>> {
        let result = match &self.kind {
            ProcessorKind::Builtin(operator) => self.process_builtin(operator, ctx),
            ProcessorKind::Custom { implementation, .. } => {
                implementation.process(&self.operands, ctx)
            }
        };
        if let Err(err) = &result {
            log::debug!("{} failed: {}", self.name(), err);
        }
        result
    }

    fn process_builtin(
        &self,
        operator: &Operator,
        ctx: &mut EvaluationContext<'_>,
    ) -> ProcessingResult<Option<QtiValue>> {
        match operator {
            // Logic
            Operator::And => self.process_and(),
            Operator::Or => self.process_or(),
            Operator::Not => self.process_not(),
            Operator::AnyN { min, max } => self.process_any_n(min, max, ctx),
            Operator::IsNull => self.process_is_null(),

            // Arithmetic
            Operator::Sum => self.process_sum(),
            Operator::Product => self.process_product(),
            Operator::Subtract => self.process_subtract(),
            Operator::Divide => self.process_divide(),
            Operator::Power => self.process_power(),
            Operator::IntegerDivide => self.process_integer_divide(),
            Operator::IntegerModulus => self.process_integer_modulus(),
            Operator::IntegerToFloat => self.process_integer_to_float(),
            Operator::Truncate => self.process_truncate(),
            Operator::Round => self.process_round(),
            Operator::RoundTo {
                rounding_mode,
                figures,
            } => self.process_round_to(*rounding_mode, figures, ctx),
            Operator::Gcd => self.process_gcd(),
            Operator::Lcm => self.process_lcm(),
            Operator::Min => self.process_min(),
            Operator::Max => self.process_max(),
            Operator::StatsOperator { function } => self.process_stats(*function),
            Operator::MathOperator { function } => self.process_math(*function),

            // Comparison
            Operator::Lt => self.process_numeric_comparison(|a, b| a < b),
            Operator::Gt => self.process_numeric_comparison(|a, b| a > b),
            Operator::Lte => self.process_numeric_comparison(|a, b| a <= b),
            Operator::Gte => self.process_numeric_comparison(|a, b| a >= b),
            Operator::Equal {
                tolerance_mode,
                tolerance,
                include_lower_bound,
                include_upper_bound,
            } => self.process_equal(
                *tolerance_mode,
                tolerance,
                (*include_lower_bound, *include_upper_bound),
                ctx,
            ),
            Operator::EqualRounded {
                rounding_mode,
                figures,
            } => self.process_equal_rounded(*rounding_mode, figures, ctx),
            Operator::DurationLt => self.process_duration_comparison(|a, b| a < b),
            Operator::DurationGte => self.process_duration_comparison(|a, b| a >= b),
            Operator::Match => self.process_match(),

            // Strings
            Operator::StringMatch {
                case_sensitive,
                substring,
            } => self.process_string_match(*case_sensitive, *substring),
            Operator::Substring { case_sensitive } => self.process_substring(*case_sensitive),
            Operator::PatternMatch { pattern } => self.process_pattern_match(pattern, ctx),

            // Containers
            Operator::Multiple => self.process_multiple(),
            Operator::Ordered => self.process_ordered(),
            Operator::ContainerSize => self.process_container_size(),
            Operator::Contains => self.process_contains(),
            Operator::Member => self.process_member(),
            Operator::Delete => self.process_delete(),
            Operator::Index { n } => self.process_index(n, ctx),
            Operator::Repeat { number_repeats } => self.process_repeat(number_repeats, ctx),
            Operator::Random => self.process_random(ctx),
            Operator::FieldValue { field_identifier } => self.process_field_value(field_identifier),

            // Areas
            Operator::Inside { coords } => self.process_inside(coords),

            Operator::CustomOperator { class, .. } => Err(ProcessingError::unresolved_custom_operator(
                class.as_deref(),
                "custom operators must be resolved through the processor factory",
            )),
        }
    }
}
