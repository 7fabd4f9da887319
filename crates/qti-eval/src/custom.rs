//! Custom operators
//!
//! `customOperator` elements name their implementation with a dotted class
//! path (`qti.custom.Explode`). Implementations are registered under the
//! matching Rust path (`qti::custom::Explode`) in a [`CustomOperatorRegistry`].

use indexmap::IndexMap;
use qti_expr::Arity;
use qti_types::{BaseType, Container, QtiScalar, QtiValue};
use std::fmt;
use std::sync::Arc;

use crate::context::EvaluationContext;
use crate::error::{ProcessingError, ProcessingResult};
use crate::operands::Operands;

/// A user-provided operator
pub trait CustomOperator: Send + Sync {
    /// Operand count accepted by the implementation
    fn arity(&self) -> Arity {
        Arity::at_least(0)
    }

    fn process(
        &self,
        operands: &Operands,
        ctx: &mut EvaluationContext<'_>,
    ) -> ProcessingResult<Option<QtiValue>>;
}

/// Translate a dotted class path into a Rust path: `a.b.C` -> `a::b::C`
pub fn rust_path(class: &str) -> String {
    class.trim().replace('.', "::")
}

/// Custom operator implementations keyed by Rust path
#[derive(Clone, Default)]
pub struct CustomOperatorRegistry {
    operators: IndexMap<String, Arc<dyn CustomOperator>>,
}

impl CustomOperatorRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the bundled `qti::custom` operators
    pub fn with_bundled_operators() -> Self {
        let mut registry = Self::new();
        registry.register("qti::custom::Explode", Explode);
        registry.register("qti::custom::Implode", Implode);
        registry
    }

    /// Register an implementation under a Rust or dotted path
    pub fn register(&mut self, path: &str, operator: impl CustomOperator + 'static) {
        let path = rust_path(path);
        log::debug!("registering custom operator {}", path);
        self.operators.insert(path, Arc::new(operator));
    }

    /// Resolve the implementation of a dotted class path
    pub fn resolve(&self, class: &str) -> Option<Arc<dyn CustomOperator>> {
        let path = rust_path(class);
        let found = self.operators.get(&path).cloned();
        log::debug!(
            "resolving custom operator {} as {}: {}",
            class,
            path,
            if found.is_some() { "found" } else { "not registered" }
        );
        found
    }

    pub fn contains(&self, class: &str) -> bool {
        self.operators.contains_key(&rust_path(class))
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.operators.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.operators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operators.is_empty()
    }
}

impl fmt::Debug for CustomOperatorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.operators.keys()).finish()
    }
}

// === Bundled operators ===

fn single_string<'a>(operator: &str, operands: &'a Operands, index: usize) -> ProcessingResult<&'a str> {
    match operands.value(index) {
        Some(QtiValue::Single(QtiScalar::String(s))) => Ok(s),
        Some(QtiValue::Single(_)) => Err(ProcessingError::wrong_base_type(
            operator,
            "only accepts operands with string base type",
        )),
        _ => Err(ProcessingError::wrong_cardinality(
            operator,
            "only accepts operands with single cardinality",
        )),
    }
}

/// Split a string on a delimiter into an ordered container of strings
///
/// Operands: the delimiter, then the string to split.
#[derive(Debug, Clone, Copy, Default)]
pub struct Explode;

impl CustomOperator for Explode {
    fn arity(&self) -> Arity {
        Arity::exactly(2)
    }

    fn process(
        &self,
        operands: &Operands,
        _ctx: &mut EvaluationContext<'_>,
    ) -> ProcessingResult<Option<QtiValue>> {
        if operands.contains_null() {
            return Ok(None);
        }
        let delimiter = single_string("explode", operands, 0)?;
        let text = single_string("explode", operands, 1)?;
        let parts = text
            .split(delimiter)
            .map(|part| QtiScalar::String(part.to_string()));
        Ok(Some(QtiValue::Ordered(Container::from_scalars(BaseType::String, parts)?)))
    }
}

/// Join a container of strings with a glue string
///
/// Operands: the glue, then a multiple or ordered container of strings.
#[derive(Debug, Clone, Copy, Default)]
pub struct Implode;

impl CustomOperator for Implode {
    fn arity(&self) -> Arity {
        Arity::exactly(2)
    }

    fn process(
        &self,
        operands: &Operands,
        _ctx: &mut EvaluationContext<'_>,
    ) -> ProcessingResult<Option<QtiValue>> {
        if operands.contains_null() {
            return Ok(None);
        }
        let glue = single_string("implode", operands, 0)?;
        let container = operands
            .value(1)
            .and_then(QtiValue::as_container)
            .ok_or_else(|| {
                ProcessingError::wrong_cardinality(
                    "implode",
                    "only accepts a multiple or ordered second operand",
                )
            })?;
        if container.base_type() != BaseType::String {
            return Err(ProcessingError::wrong_base_type(
                "implode",
                "only accepts a container of strings",
            ));
        }
        let parts: Vec<&str> = container.scalars().filter_map(QtiScalar::as_str).collect();
        Ok(Some(QtiValue::string(parts.join(glue))))
    }
}
