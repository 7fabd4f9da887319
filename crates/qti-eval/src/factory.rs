//! Processor factory
//!
//! Maps an operator descriptor to its implementation. QTI operators map to
//! the built-in processors; `customOperator` is resolved by class through a
//! [`CustomOperatorRegistry`].

use qti_expr::Operator;
use std::sync::Arc;

use crate::custom::CustomOperatorRegistry;
use crate::error::{ProcessingError, ProcessingResult};
use crate::operands::Operands;
use crate::processor::{OperatorProcessor, ProcessorKind};

/// Creates processors for operator expressions
#[derive(Debug, Clone)]
pub struct ProcessorFactory {
    registry: Arc<CustomOperatorRegistry>,
}

impl Default for ProcessorFactory {
    fn default() -> Self {
        Self::new(CustomOperatorRegistry::with_bundled_operators())
    }
}

impl ProcessorFactory {
    /// Create a factory resolving custom operators through `registry`
    pub fn new(registry: CustomOperatorRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
        }
    }

    pub fn registry(&self) -> &CustomOperatorRegistry {
        &self.registry
    }

    /// Select the implementation of an operator
    ///
    /// Fails with `UnresolvedCustomOperator` when a custom operator has no
    /// class or the class is not registered.
    pub fn resolve<'o>(&self, operator: &'o Operator) -> ProcessingResult<ProcessorKind<'o>> {
        let Operator::CustomOperator { class, .. } = operator else {
            return Ok(ProcessorKind::Builtin(operator));
        };
        let Some(class) = class.as_deref().map(str::trim).filter(|c| !c.is_empty()) else {
            return Err(ProcessingError::unresolved_custom_operator(
                None,
                "no class attribute given",
            ));
        };
        match self.registry.resolve(class) {
            Some(implementation) => Ok(ProcessorKind::Custom {
                operator,
                class: class.to_string(),
                implementation,
            }),
            None => Err(ProcessingError::unresolved_custom_operator(
                Some(class),
                "no implementation registered for this class",
            )),
        }
    }

    /// Resolve an operator and attach its evaluated operands
    pub fn create<'o>(
        &self,
        operator: &'o Operator,
        operands: Operands,
    ) -> ProcessingResult<OperatorProcessor<'o>> {
        self.resolve(operator)?.attach(operands)
    }
}
