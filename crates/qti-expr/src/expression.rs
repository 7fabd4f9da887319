//! Expression tree
//!
//! Leaves produce values directly (literals, variable lookups, random
//! numbers); operator nodes combine the values of their children.

use qti_types::{BaseType, QtiScalar};
use serde::{Deserialize, Serialize};

use crate::operator::Operator;
use crate::params::{FloatOrVariableRef, IntOrVariableRef};

/// A QTI expression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Expression {
    // === Leaves ===
    BaseValue(BaseValue),
    Variable(VariableRef),
    Null,
    Default(VariableRef),
    Correct(VariableRef),
    MathConstant(MathConstant),
    RandomInteger(RandomInteger),
    RandomFloat(RandomFloat),

    // === Operators ===
    Operator(OperatorExpression),
}

impl Expression {
    pub fn base_value(value: impl Into<QtiScalar>) -> Self {
        let value = value.into();
        Self::BaseValue(BaseValue {
            base_type: value.base_type(),
            value,
        })
    }

    pub fn integer(value: i32) -> Self {
        Self::base_value(value)
    }

    pub fn float(value: f64) -> Self {
        Self::base_value(value)
    }

    pub fn boolean(value: bool) -> Self {
        Self::base_value(value)
    }

    pub fn string(value: impl Into<String>) -> Self {
        Self::base_value(QtiScalar::String(value.into()))
    }

    pub fn identifier(value: impl Into<String>) -> Self {
        Self::base_value(QtiScalar::Identifier(value.into()))
    }

    pub fn variable(identifier: impl Into<String>) -> Self {
        Self::Variable(VariableRef::new(identifier))
    }

    pub fn null() -> Self {
        Self::Null
    }

    /// Operator node over the given operand expressions
    pub fn operator(operator: Operator, operands: impl IntoIterator<Item = Expression>) -> Self {
        Self::Operator(OperatorExpression {
            operator,
            operands: operands.into_iter().collect(),
        })
    }

    /// QTI element name of the node
    pub fn name(&self) -> &'static str {
        match self {
            Self::BaseValue(_) => "baseValue",
            Self::Variable(_) => "variable",
            Self::Null => "null",
            Self::Default(_) => "default",
            Self::Correct(_) => "correct",
            Self::MathConstant(_) => "mathConstant",
            Self::RandomInteger(_) => "randomInteger",
            Self::RandomFloat(_) => "randomFloat",
            Self::Operator(op) => op.operator.name(),
        }
    }
}

/// A literal value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseValue {
    pub base_type: BaseType,
    pub value: QtiScalar,
}

/// Reference to a variable by identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VariableRef {
    pub identifier: String,
}

impl VariableRef {
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MathConstantName {
    Pi,
    E,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MathConstant {
    pub name: MathConstantName,
}

/// Random integer in `min..=max`, on the grid `min + k * step`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RandomInteger {
    #[serde(default = "zero")]
    pub min: IntOrVariableRef,
    pub max: IntOrVariableRef,
    #[serde(default = "one")]
    pub step: IntOrVariableRef,
}

fn zero() -> IntOrVariableRef {
    IntOrVariableRef::Int(0)
}

fn one() -> IntOrVariableRef {
    IntOrVariableRef::Int(1)
}

/// Random float in `min..=max`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomFloat {
    #[serde(default = "zero_float")]
    pub min: FloatOrVariableRef,
    pub max: FloatOrVariableRef,
}

fn zero_float() -> FloatOrVariableRef {
    FloatOrVariableRef::Float(0.0)
}

/// An operator applied to operand sub-expressions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperatorExpression {
    pub operator: Operator,
    #[serde(default)]
    pub operands: Vec<Expression>,
}
