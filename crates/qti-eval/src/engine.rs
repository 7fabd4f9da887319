//! Expression engine
//!
//! Walks an expression tree depth-first. Leaves are evaluated in place;
//! an operator node is resolved to its processor before its operands are
//! evaluated, so a misconfigured custom operator or a wrong operand count
//! fails without touching the operands.

use qti_expr::{Expression, MathConstantName, OperatorExpression, RandomFloat, RandomInteger};
use qti_types::{QtiValue, Variable};

use crate::context::{EngineConfig, EvaluationContext, VariableScope};
use crate::error::{ProcessingError, ProcessingResult};
use crate::factory::ProcessorFactory;
use crate::operands::Operands;

/// Evaluates QTI expressions
#[derive(Debug, Clone, Default)]
pub struct ExpressionEngine {
    config: EngineConfig,
    factory: ProcessorFactory,
}

impl ExpressionEngine {
    /// Create an engine with the default configuration and bundled custom operators
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Use a factory with a caller-configured custom operator registry
    pub fn with_factory(mut self, factory: ProcessorFactory) -> Self {
        self.factory = factory;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn factory(&self) -> &ProcessorFactory {
        &self.factory
    }

    /// Evaluate an expression against a scope with a fresh context
    pub fn evaluate_in_scope(
        &self,
        expr: &Expression,
        scope: &dyn VariableScope,
    ) -> ProcessingResult<Option<QtiValue>> {
        let mut ctx = EvaluationContext::new(scope);
        self.evaluate(expr, &mut ctx)
    }

    /// Evaluate an expression, `None` being NULL
    pub fn evaluate(
        &self,
        expr: &Expression,
        ctx: &mut EvaluationContext<'_>,
    ) -> ProcessingResult<Option<QtiValue>> {
        ctx.enter(self.config.max_depth)?;
        let result = self.evaluate_node(expr, ctx);
        ctx.leave();
        result
    }

    fn evaluate_node(
        &self,
        expr: &Expression,
        ctx: &mut EvaluationContext<'_>,
    ) -> ProcessingResult<Option<QtiValue>> {
        match expr {
            Expression::BaseValue(base) => Ok(Some(QtiValue::Single(base.value.clone()))),
            Expression::Variable(var) => Ok(ctx.value(&var.identifier).cloned()),
            Expression::Null => Ok(None),
            Expression::Default(var) => {
                Ok(declared_variable(ctx, &var.identifier)?.default_value.clone())
            }
            Expression::Correct(var) => {
                Ok(declared_variable(ctx, &var.identifier)?.correct_response.clone())
            }
            Expression::MathConstant(constant) => Ok(Some(QtiValue::from(match constant.name {
                MathConstantName::Pi => std::f64::consts::PI,
                MathConstantName::E => std::f64::consts::E,
            }))),
            Expression::RandomInteger(random) => random_integer(random, ctx),
            Expression::RandomFloat(random) => random_float(random, ctx),
            Expression::Operator(node) => self.evaluate_operator(node, ctx),
        }
    }

    fn evaluate_operator(
        &self,
        node: &OperatorExpression,
        ctx: &mut EvaluationContext<'_>,
    ) -> ProcessingResult<Option<QtiValue>> {
        let kind = self.factory.resolve(&node.operator)?;
        kind.check_arity(node.operands.len())?;

        let mut operands = Operands::new();
        for operand in &node.operands {
            operands.push(self.evaluate(operand, ctx)?);
        }

        let processor = kind.attach(operands)?;
        let result = processor.process(ctx)?;
        log::trace!(
            "{} -> {}",
            processor.name(),
            result.as_ref().map_or_else(|| "NULL".to_string(), ToString::to_string)
        );
        Ok(result)
    }
}

fn declared_variable<'s>(
    ctx: &EvaluationContext<'s>,
    identifier: &str,
) -> ProcessingResult<&'s Variable> {
    ctx.scope()
        .variable(identifier)
        .ok_or_else(|| ProcessingError::nonexistent_variable(identifier))
}

/// `min + k * step` for a random `k`, never above `max`
fn random_integer(
    random: &RandomInteger,
    ctx: &mut EvaluationContext<'_>,
) -> ProcessingResult<Option<QtiValue>> {
    let min = ctx.resolve_int(&random.min)?;
    let max = ctx.resolve_int(&random.max)?;
    let step = ctx.resolve_int(&random.step)?;
    if step < 1 {
        return Err(ProcessingError::runtime(
            "randomInteger",
            format!("'step' must be a positive integer, {} given", step),
        ));
    }
    if max < min {
        return Err(ProcessingError::runtime(
            "randomInteger",
            format!("'max' ({}) must not be less than 'min' ({})", max, min),
        ));
    }
    let steps = (i64::from(max) - i64::from(min)) / i64::from(step);
    let k = ctx.rng().i64(0..=steps);
    let value = i64::from(min) + k * i64::from(step);
    Ok(i32::try_from(value).ok().map(QtiValue::from))
}

fn random_float(
    random: &RandomFloat,
    ctx: &mut EvaluationContext<'_>,
) -> ProcessingResult<Option<QtiValue>> {
    let min = ctx.resolve_float(&random.min)?;
    let max = ctx.resolve_float(&random.max)?;
    if max < min {
        return Err(ProcessingError::runtime(
            "randomFloat",
            format!("'max' ({}) must not be less than 'min' ({})", max, min),
        ));
    }
    let value = min + ctx.rng().f64() * (max - min);
    Ok(Some(QtiValue::from(value)))
}
