//! QTI expression model
//!
//! This crate defines the expression tree handed to the evaluation engine:
//! leaf expressions (base values, variable references, constants, random
//! generators) and operator nodes. Each operator node carries an
//! [`Operator`] descriptor naming the operator and its literal parameters,
//! some of which may be references to variables resolved at evaluation time.

pub mod expression;
pub mod operator;
pub mod params;

pub use expression::{
    BaseValue, Expression, MathConstant, MathConstantName, OperatorExpression, RandomFloat,
    RandomInteger, VariableRef,
};
pub use operator::{Arity, Operator};
pub use params::{
    FloatOrVariableRef, IntOrVariableRef, MathFunction, ParamError, RoundingMode, StatsFunction,
    StringOrVariableRef, ToleranceMode,
};
