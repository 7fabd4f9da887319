//! QTI base types and cardinalities

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValueError;

/// QTI base type
///
/// The discriminant of each variant is its wire code, as written by the
/// binary codec in front of heterogeneous record fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[repr(u8)]
pub enum BaseType {
    Identifier = 0,
    Boolean = 1,
    Integer = 2,
    Float = 3,
    String = 4,
    Point = 5,
    Pair = 6,
    DirectedPair = 7,
    Duration = 8,
    File = 9,
    Uri = 10,
    IntOrIdentifier = 11,
    /// Only used by declarations; no runtime scalar carries it
    Coords = 12,
}

impl BaseType {
    /// All base types, in wire-code order
    pub const ALL: [BaseType; 13] = [
        Self::Identifier,
        Self::Boolean,
        Self::Integer,
        Self::Float,
        Self::String,
        Self::Point,
        Self::Pair,
        Self::DirectedPair,
        Self::Duration,
        Self::File,
        Self::Uri,
        Self::IntOrIdentifier,
        Self::Coords,
    ];

    /// Get the QTI name of this base type
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Identifier => "identifier",
            Self::Boolean => "boolean",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::String => "string",
            Self::Point => "point",
            Self::Pair => "pair",
            Self::DirectedPair => "directedPair",
            Self::Duration => "duration",
            Self::File => "file",
            Self::Uri => "uri",
            Self::IntOrIdentifier => "intOrIdentifier",
            Self::Coords => "coords",
        }
    }

    /// Get the wire code of this base type
    pub const fn code(&self) -> u8 {
        *self as u8
    }

    /// Resolve a base type from its wire code
    pub fn from_code(code: u8) -> Result<Self, ValueError> {
        Self::ALL
            .get(code as usize)
            .copied()
            .ok_or(ValueError::UnknownBaseTypeCode(code))
    }

    /// Integer or float
    pub const fn is_numeric(&self) -> bool {
        matches!(self, Self::Integer | Self::Float)
    }

    /// String-like base types sharing the string payload on the wire
    pub const fn is_textual(&self) -> bool {
        matches!(self, Self::String | Self::Identifier | Self::Uri)
    }
}

impl fmt::Display for BaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BaseType {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|t| t.name() == s)
            .copied()
            .ok_or_else(|| ValueError::UnknownBaseType(s.to_string()))
    }
}

/// QTI cardinality
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[repr(u8)]
pub enum Cardinality {
    Single = 0,
    Multiple = 1,
    Ordered = 2,
    Record = 3,
}

impl Cardinality {
    /// Get the QTI name of this cardinality
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Multiple => "multiple",
            Self::Ordered => "ordered",
            Self::Record => "record",
        }
    }

    /// Get the wire code of this cardinality
    pub const fn code(&self) -> u8 {
        *self as u8
    }

    /// Resolve a cardinality from its wire code
    pub fn from_code(code: u8) -> Result<Self, ValueError> {
        match code {
            0 => Ok(Self::Single),
            1 => Ok(Self::Multiple),
            2 => Ok(Self::Ordered),
            3 => Ok(Self::Record),
            other => Err(ValueError::UnknownCardinalityCode(other)),
        }
    }

    /// Multiple or ordered
    pub const fn is_container(&self) -> bool {
        matches!(self, Self::Multiple | Self::Ordered)
    }
}

impl fmt::Display for Cardinality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Cardinality {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "single" => Ok(Self::Single),
            "multiple" => Ok(Self::Multiple),
            "ordered" => Ok(Self::Ordered),
            "record" => Ok(Self::Record),
            other => Err(ValueError::UnknownCardinality(other.to_string())),
        }
    }
}
