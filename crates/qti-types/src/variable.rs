//! Variable declarations and runtime variables

use serde::{Deserialize, Serialize};

use crate::error::{ValueError, ValueResult};
use crate::{BaseType, Cardinality, QtiValue};

/// Declared shape of a variable: what the codec needs to read its value back
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariableDeclaration {
    pub identifier: String,
    pub cardinality: Cardinality,
    /// Absent for records
    pub base_type: Option<BaseType>,
}

impl VariableDeclaration {
    pub fn new(identifier: impl Into<String>, cardinality: Cardinality, base_type: BaseType) -> Self {
        Self {
            identifier: identifier.into(),
            cardinality,
            base_type: Some(base_type),
        }
    }

    /// Declaration of a record variable
    pub fn record(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            cardinality: Cardinality::Record,
            base_type: None,
        }
    }

    /// Check that `value` conforms to this declaration
    pub fn check(&self, value: &QtiValue) -> ValueResult<()> {
        if value.cardinality() != self.cardinality {
            return Err(ValueError::CardinalityMismatch {
                expected: self.cardinality,
                found: value.cardinality(),
            });
        }
        match (self.base_type, value.base_type()) {
            (Some(expected), Some(found)) if expected != found => {
                Err(ValueError::BaseTypeMismatch { expected, found })
            }
            _ => Ok(()),
        }
    }
}

/// A declared variable together with its current value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variable {
    pub declaration: VariableDeclaration,
    pub value: Option<QtiValue>,
    pub default_value: Option<QtiValue>,
    pub correct_response: Option<QtiValue>,
}

impl Variable {
    pub fn new(declaration: VariableDeclaration) -> Self {
        Self {
            declaration,
            value: None,
            default_value: None,
            correct_response: None,
        }
    }

    /// Create a variable holding `value`, checked against the declaration
    pub fn with_value(declaration: VariableDeclaration, value: QtiValue) -> ValueResult<Self> {
        declaration.check(&value)?;
        Ok(Self {
            value: Some(value),
            ..Self::new(declaration)
        })
    }

    pub fn with_default_value(mut self, value: QtiValue) -> ValueResult<Self> {
        self.declaration.check(&value)?;
        self.default_value = Some(value);
        Ok(self)
    }

    pub fn with_correct_response(mut self, value: QtiValue) -> ValueResult<Self> {
        self.declaration.check(&value)?;
        self.correct_response = Some(value);
        Ok(self)
    }

    pub fn identifier(&self) -> &str {
        &self.declaration.identifier
    }

    pub fn cardinality(&self) -> Cardinality {
        self.declaration.cardinality
    }

    pub fn base_type(&self) -> Option<BaseType> {
        self.declaration.base_type
    }

    /// Replace the current value
    pub fn set_value(&mut self, value: Option<QtiValue>) -> ValueResult<()> {
        if let Some(v) = &value {
            self.declaration.check(v)?;
        }
        self.value = value;
        Ok(())
    }

    /// Reset the current value to the default value
    pub fn reset(&mut self) {
        self.value = self.default_value.clone();
    }
}
