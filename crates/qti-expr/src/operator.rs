//! Operator descriptors
//!
//! Every QTI operator is one variant of [`Operator`], carrying the literal
//! attributes it is declared with. Arity is a property of the kind and is
//! checked when operands are attached to a processor.

use qti_types::Coords;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::params::{
    FloatOrVariableRef, IntOrVariableRef, MathFunction, RoundingMode, StatsFunction,
    StringOrVariableRef, ToleranceMode,
};

/// Minimum and (optional) maximum number of operands an operator accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arity {
    pub min: usize,
    /// `None` when unbounded
    pub max: Option<usize>,
}

impl Arity {
    pub const fn exactly(n: usize) -> Self {
        Self { min: n, max: Some(n) }
    }

    pub const fn between(min: usize, max: usize) -> Self {
        Self { min, max: Some(max) }
    }

    pub const fn at_least(min: usize) -> Self {
        Self { min, max: None }
    }

    pub fn accepts(&self, count: usize) -> bool {
        count >= self.min && self.max.is_none_or(|max| count <= max)
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.max {
            Some(max) if max == self.min => write!(f, "{}", max),
            Some(max) => write!(f, "{}..{}", self.min, max),
            None => write!(f, "{}..", self.min),
        }
    }
}

/// A QTI operator together with its literal attributes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "name", rename_all = "camelCase")]
pub enum Operator {
    // === Logic ===
    And,
    Or,
    Not,
    #[serde(rename = "anyN")]
    AnyN {
        min: IntOrVariableRef,
        max: IntOrVariableRef,
    },
    IsNull,

    // === Arithmetic ===
    Sum,
    Product,
    Subtract,
    Divide,
    Power,
    IntegerDivide,
    IntegerModulus,
    IntegerToFloat,
    Truncate,
    Round,
    #[serde(rename_all = "camelCase")]
    RoundTo {
        rounding_mode: RoundingMode,
        figures: IntOrVariableRef,
    },
    Gcd,
    Lcm,
    Min,
    Max,
    StatsOperator {
        function: StatsFunction,
    },
    MathOperator {
        function: MathFunction,
    },

    // === Comparison ===
    Lt,
    Gt,
    Lte,
    Gte,
    #[serde(rename_all = "camelCase")]
    Equal {
        tolerance_mode: ToleranceMode,
        /// One value (used for both bounds) or two (lower, upper)
        #[serde(default)]
        tolerance: Vec<FloatOrVariableRef>,
        include_lower_bound: bool,
        include_upper_bound: bool,
    },
    #[serde(rename_all = "camelCase")]
    EqualRounded {
        rounding_mode: RoundingMode,
        figures: IntOrVariableRef,
    },
    #[serde(rename = "durationLT")]
    DurationLt,
    #[serde(rename = "durationGTE")]
    DurationGte,
    Match,

    // === Strings ===
    #[serde(rename_all = "camelCase")]
    StringMatch {
        case_sensitive: bool,
        substring: bool,
    },
    #[serde(rename_all = "camelCase")]
    Substring {
        case_sensitive: bool,
    },
    PatternMatch {
        pattern: StringOrVariableRef,
    },

    // === Containers ===
    Multiple,
    Ordered,
    ContainerSize,
    Contains,
    Member,
    Delete,
    Index {
        n: IntOrVariableRef,
    },
    #[serde(rename_all = "camelCase")]
    Repeat {
        number_repeats: IntOrVariableRef,
    },
    Random,
    #[serde(rename_all = "camelCase")]
    FieldValue {
        field_identifier: String,
    },

    // === Areas ===
    Inside {
        coords: Coords,
    },

    // === Extension point ===
    CustomOperator {
        /// Dotted path of the implementation, e.g. `qti.custom.Explode`
        #[serde(default)]
        class: Option<String>,
        #[serde(default)]
        definition: Option<String>,
    },
}

impl Operator {
    /// QTI element name of the operator
    pub const fn name(&self) -> &'static str {
        match self {
            Self::And => "and",
            Self::Or => "or",
            Self::Not => "not",
            Self::AnyN { .. } => "anyN",
            Self::IsNull => "isNull",
            Self::Sum => "sum",
            Self::Product => "product",
            Self::Subtract => "subtract",
            Self::Divide => "divide",
            Self::Power => "power",
            Self::IntegerDivide => "integerDivide",
            Self::IntegerModulus => "integerModulus",
            Self::IntegerToFloat => "integerToFloat",
            Self::Truncate => "truncate",
            Self::Round => "round",
            Self::RoundTo { .. } => "roundTo",
            Self::Gcd => "gcd",
            Self::Lcm => "lcm",
            Self::Min => "min",
            Self::Max => "max",
            Self::StatsOperator { .. } => "statsOperator",
            Self::MathOperator { .. } => "mathOperator",
            Self::Lt => "lt",
            Self::Gt => "gt",
            Self::Lte => "lte",
            Self::Gte => "gte",
            Self::Equal { .. } => "equal",
            Self::EqualRounded { .. } => "equalRounded",
            Self::DurationLt => "durationLT",
            Self::DurationGte => "durationGTE",
            Self::Match => "match",
            Self::StringMatch { .. } => "stringMatch",
            Self::Substring { .. } => "substring",
            Self::PatternMatch { .. } => "patternMatch",
            Self::Multiple => "multiple",
            Self::Ordered => "ordered",
            Self::ContainerSize => "containerSize",
            Self::Contains => "contains",
            Self::Member => "member",
            Self::Delete => "delete",
            Self::Index { .. } => "index",
            Self::Repeat { .. } => "repeat",
            Self::Random => "random",
            Self::FieldValue { .. } => "fieldValue",
            Self::Inside { .. } => "inside",
            Self::CustomOperator { .. } => "customOperator",
        }
    }

    /// Number of operands the operator accepts
    ///
    /// For custom operators this is the envelope; the resolved
    /// implementation declares its own arity.
    pub fn arity(&self) -> Arity {
        match self {
            Self::And
            | Self::Or
            | Self::AnyN { .. }
            | Self::Sum
            | Self::Product
            | Self::Gcd
            | Self::Lcm
            | Self::Min
            | Self::Max
            | Self::Repeat { .. } => Arity::at_least(1),

            Self::Not
            | Self::IsNull
            | Self::IntegerToFloat
            | Self::Truncate
            | Self::Round
            | Self::RoundTo { .. }
            | Self::StatsOperator { .. }
            | Self::PatternMatch { .. }
            | Self::ContainerSize
            | Self::Index { .. }
            | Self::Random
            | Self::FieldValue { .. }
            | Self::Inside { .. } => Arity::exactly(1),

            Self::MathOperator {
                function: MathFunction::Atan2,
            } => Arity::exactly(2),
            Self::MathOperator { .. } => Arity::exactly(1),

            Self::Subtract
            | Self::Divide
            | Self::Power
            | Self::IntegerDivide
            | Self::IntegerModulus
            | Self::Lt
            | Self::Gt
            | Self::Lte
            | Self::Gte
            | Self::Equal { .. }
            | Self::EqualRounded { .. }
            | Self::DurationLt
            | Self::DurationGte
            | Self::Match
            | Self::StringMatch { .. }
            | Self::Substring { .. }
            | Self::Contains
            | Self::Member
            | Self::Delete => Arity::exactly(2),

            Self::Multiple | Self::Ordered | Self::CustomOperator { .. } => Arity::at_least(0),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
