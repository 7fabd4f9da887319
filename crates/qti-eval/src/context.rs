//! Evaluation context: variable scope, random source and engine settings

use indexmap::IndexMap;
use qti_expr::{FloatOrVariableRef, IntOrVariableRef, StringOrVariableRef};
use qti_types::{BaseType, QtiScalar, QtiValue, Variable};

use crate::error::{ProcessingError, ProcessingResult};

/// Default limit on the nesting depth of evaluated expressions
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Engine configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Maximum nesting depth of an expression tree
    pub max_depth: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl EngineConfig {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

/// Read access to the variables an expression may refer to
pub trait VariableScope {
    fn variable(&self, identifier: &str) -> Option<&Variable>;
}

/// Plain variable scope keyed by identifier
#[derive(Debug, Clone, Default)]
pub struct State {
    variables: IndexMap<String, Variable>,
}

impl State {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a variable
    pub fn set_variable(&mut self, variable: Variable) {
        self.variables
            .insert(variable.identifier().to_string(), variable);
    }

    pub fn with_variable(mut self, variable: Variable) -> Self {
        self.set_variable(variable);
        self
    }

    pub fn get_mut(&mut self, identifier: &str) -> Option<&mut Variable> {
        self.variables.get_mut(identifier)
    }

    pub fn remove(&mut self, identifier: &str) -> Option<Variable> {
        self.variables.shift_remove(identifier)
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Variable> {
        self.variables.values()
    }
}

impl VariableScope for State {
    fn variable(&self, identifier: &str) -> Option<&Variable> {
        self.variables.get(identifier)
    }
}

impl FromIterator<Variable> for State {
    fn from_iter<T: IntoIterator<Item = Variable>>(iter: T) -> Self {
        let mut state = Self::new();
        for variable in iter {
            state.set_variable(variable);
        }
        state
    }
}

/// Per-evaluation context
///
/// Holds the variable scope expressions are evaluated against, the random
/// source used by `random`, `randomInteger` and `randomFloat`, and the
/// current expression depth.
pub struct EvaluationContext<'s> {
    scope: &'s dyn VariableScope,
    rng: fastrand::Rng,
    depth: usize,
}

impl<'s> EvaluationContext<'s> {
    /// Create a context over `scope` with an unseeded random source
    pub fn new(scope: &'s dyn VariableScope) -> Self {
        Self::builder(scope).build()
    }

    pub fn builder(scope: &'s dyn VariableScope) -> EvaluationContextBuilder<'s> {
        EvaluationContextBuilder { scope, seed: None }
    }

    pub fn scope(&self) -> &'s dyn VariableScope {
        self.scope
    }

    pub fn rng(&mut self) -> &mut fastrand::Rng {
        &mut self.rng
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub(crate) fn enter(&mut self, max_depth: usize) -> ProcessingResult<()> {
        if self.depth >= max_depth {
            return Err(ProcessingError::RecursionLimit { max_depth });
        }
        self.depth += 1;
        Ok(())
    }

    pub(crate) fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Value of a variable, NULL when it is unknown or unset
    pub fn value(&self, identifier: &str) -> Option<&'s QtiValue> {
        self.scope.variable(identifier).and_then(|v| v.value.as_ref())
    }

    // === Variable-reference parameters ===

    /// Single, non-null value of a variable referenced by an operator attribute
    fn referenced_scalar(&self, identifier: &str) -> ProcessingResult<&'s QtiScalar> {
        let value = self
            .value(identifier)
            .filter(|v| !v.is_null())
            .ok_or_else(|| ProcessingError::nonexistent_variable(identifier))?;
        value
            .as_scalar()
            .ok_or_else(|| ProcessingError::WrongVariableCardinality {
                identifier: identifier.to_string(),
                found: value.cardinality(),
            })
    }

    pub fn resolve_int(&self, param: &IntOrVariableRef) -> ProcessingResult<i32> {
        match param {
            IntOrVariableRef::Int(i) => Ok(*i),
            IntOrVariableRef::VariableRef(identifier) => {
                let scalar = self.referenced_scalar(identifier)?;
                scalar.as_integer().ok_or_else(|| {
                    ProcessingError::wrong_variable_base_type(
                        identifier.as_str(),
                        BaseType::Integer.name(),
                        Some(scalar.base_type()),
                    )
                })
            }
        }
    }

    /// Integers are accepted and widened
    pub fn resolve_float(&self, param: &FloatOrVariableRef) -> ProcessingResult<f64> {
        match param {
            FloatOrVariableRef::Float(f) => Ok(*f),
            FloatOrVariableRef::VariableRef(identifier) => {
                let scalar = self.referenced_scalar(identifier)?;
                scalar.as_number().ok_or_else(|| {
                    ProcessingError::wrong_variable_base_type(
                        identifier.as_str(),
                        "integer or float",
                        Some(scalar.base_type()),
                    )
                })
            }
        }
    }

    pub fn resolve_string<'p>(&self, param: &'p StringOrVariableRef) -> ProcessingResult<&'p str>
    where
        's: 'p,
    {
        match param {
            StringOrVariableRef::String(s) => Ok(s),
            StringOrVariableRef::VariableRef(identifier) => {
                match self.referenced_scalar(identifier)? {
                    QtiScalar::String(s) => Ok(s),
                    other => Err(ProcessingError::wrong_variable_base_type(
                        identifier.as_str(),
                        BaseType::String.name(),
                        Some(other.base_type()),
                    )),
                }
            }
        }
    }
}

/// Builder for [`EvaluationContext`]
pub struct EvaluationContextBuilder<'s> {
    scope: &'s dyn VariableScope,
    seed: Option<u64>,
}

impl<'s> EvaluationContextBuilder<'s> {
    /// Seed the random source for reproducible evaluations
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn build(self) -> EvaluationContext<'s> {
        let rng = match self.seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        };
        EvaluationContext {
            scope: self.scope,
            rng,
            depth: 0,
        }
    }
}
