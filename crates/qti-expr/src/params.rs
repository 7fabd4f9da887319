//! Operator parameters
//!
//! Literal attributes carried by operator descriptors. Several of them accept
//! either a literal or a reference to a variable, written `{IDENTIFIER}` in
//! QTI content; bare identifiers are also accepted where the literal is
//! numeric.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error parsing an operator parameter
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Invalid value '{value}' for {param}")]
pub struct ParamError {
    pub param: &'static str,
    pub value: String,
}

impl ParamError {
    fn new(param: &'static str, value: &str) -> Self {
        Self {
            param,
            value: value.to_string(),
        }
    }
}

fn strip_variable_ref(s: &str) -> Option<&str> {
    s.strip_prefix('{')
        .and_then(|rest| rest.strip_suffix('}'))
        .filter(|name| !name.is_empty())
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    matches!(chars.next(), Some(c) if c.is_alphabetic() || c == '_')
        && chars.all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.'))
}

/// An integer literal or a variable reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IntOrVariableRef {
    Int(i32),
    VariableRef(String),
}

impl IntOrVariableRef {
    pub fn variable(identifier: impl Into<String>) -> Self {
        Self::VariableRef(identifier.into())
    }
}

impl From<i32> for IntOrVariableRef {
    fn from(value: i32) -> Self {
        Self::Int(value)
    }
}

impl FromStr for IntOrVariableRef {
    type Err = ParamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(i) = s.parse::<i32>() {
            return Ok(Self::Int(i));
        }
        match strip_variable_ref(s) {
            Some(name) => Ok(Self::VariableRef(name.to_string())),
            None if is_identifier(s) => Ok(Self::VariableRef(s.to_string())),
            None => Err(ParamError::new("integerOrVariableRef", s)),
        }
    }
}

impl fmt::Display for IntOrVariableRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(i) => write!(f, "{}", i),
            Self::VariableRef(name) => write!(f, "{{{}}}", name),
        }
    }
}

/// A float literal or a variable reference
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FloatOrVariableRef {
    Float(f64),
    VariableRef(String),
}

impl FloatOrVariableRef {
    pub fn variable(identifier: impl Into<String>) -> Self {
        Self::VariableRef(identifier.into())
    }
}

impl From<f64> for FloatOrVariableRef {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl FromStr for FloatOrVariableRef {
    type Err = ParamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(f) = s.parse::<f64>() {
            return Ok(Self::Float(f));
        }
        match strip_variable_ref(s) {
            Some(name) => Ok(Self::VariableRef(name.to_string())),
            None if is_identifier(s) => Ok(Self::VariableRef(s.to_string())),
            None => Err(ParamError::new("floatOrVariableRef", s)),
        }
    }
}

/// A string literal or a variable reference (`{IDENTIFIER}`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StringOrVariableRef {
    String(String),
    VariableRef(String),
}

impl StringOrVariableRef {
    pub fn literal(value: impl Into<String>) -> Self {
        Self::String(value.into())
    }

    pub fn variable(identifier: impl Into<String>) -> Self {
        Self::VariableRef(identifier.into())
    }
}

impl From<&str> for StringOrVariableRef {
    fn from(s: &str) -> Self {
        match strip_variable_ref(s) {
            Some(name) => Self::VariableRef(name.to_string()),
            None => Self::String(s.to_string()),
        }
    }
}

/// Rounding mode of `roundTo` and `equalRounded`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RoundingMode {
    #[default]
    SignificantFigures,
    DecimalPlaces,
}

impl FromStr for RoundingMode {
    type Err = ParamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "significantFigures" => Ok(Self::SignificantFigures),
            "decimalPlaces" => Ok(Self::DecimalPlaces),
            other => Err(ParamError::new("roundingMode", other)),
        }
    }
}

/// Tolerance mode of `equal`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ToleranceMode {
    #[default]
    Exact,
    Absolute,
    Relative,
}

impl FromStr for ToleranceMode {
    type Err = ParamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "exact" => Ok(Self::Exact),
            "absolute" => Ok(Self::Absolute),
            "relative" => Ok(Self::Relative),
            other => Err(ParamError::new("toleranceMode", other)),
        }
    }
}

macro_rules! named_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident ($param:literal) {
            $($variant:ident => $text:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $text)] $variant),+
        }

        impl $name {
            pub const fn name(&self) -> &'static str {
                match self {
                    $(Self::$variant => $text),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }

        impl FromStr for $name {
            type Err = ParamError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok(Self::$variant),)+
                    other => Err(ParamError::new($param, other)),
                }
            }
        }
    };
}

named_enum! {
    /// Function applied by `mathOperator`
    pub enum MathFunction ("mathOperator name") {
        Sin => "sin",
        Cos => "cos",
        Tan => "tan",
        Sec => "sec",
        Csc => "csc",
        Cot => "cot",
        Asin => "asin",
        Acos => "acos",
        Atan => "atan",
        Atan2 => "atan2",
        Asec => "asec",
        Acsc => "acsc",
        Acot => "acot",
        Sinh => "sinh",
        Cosh => "cosh",
        Tanh => "tanh",
        Sech => "sech",
        Csch => "csch",
        Coth => "coth",
        Log => "log",
        Ln => "ln",
        Exp => "exp",
        Abs => "abs",
        Signum => "signum",
        Floor => "floor",
        Ceil => "ceil",
        ToDegrees => "toDegrees",
        ToRadians => "toRadians",
    }
}

named_enum! {
    /// Statistic computed by `statsOperator`
    pub enum StatsFunction ("statsOperator name") {
        Mean => "mean",
        SampleVariance => "sampleVariance",
        SampleSd => "sampleSD",
        PopVariance => "popVariance",
        PopSd => "popSD",
    }
}
