//! QTI scalar values

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{ValueError, ValueResult};
use crate::{BaseType, QtiDuration};

/// A single, non-null QTI value
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "baseType", content = "value", rename_all = "camelCase")]
pub enum QtiScalar {
    Boolean(bool),
    Integer(i32),
    Float(f64),
    String(String),
    Identifier(String),
    Duration(QtiDuration),
    Point(QtiPoint),
    Pair(QtiPair),
    DirectedPair(QtiDirectedPair),
    Uri(String),
    File(QtiFile),
    IntOrIdentifier(IntOrIdentifier),
}

impl QtiScalar {
    /// Get the base type of this scalar
    pub fn base_type(&self) -> BaseType {
        match self {
            Self::Boolean(_) => BaseType::Boolean,
            Self::Integer(_) => BaseType::Integer,
            Self::Float(_) => BaseType::Float,
            Self::String(_) => BaseType::String,
            Self::Identifier(_) => BaseType::Identifier,
            Self::Duration(_) => BaseType::Duration,
            Self::Point(_) => BaseType::Point,
            Self::Pair(_) => BaseType::Pair,
            Self::DirectedPair(_) => BaseType::DirectedPair,
            Self::Uri(_) => BaseType::Uri,
            Self::File(_) => BaseType::File,
            Self::IntOrIdentifier(_) => BaseType::IntOrIdentifier,
        }
    }

    /// Parse a scalar from its QTI textual form
    ///
    /// Points and pairs are written as two space-separated components.
    pub fn parse(base_type: BaseType, literal: &str) -> ValueResult<Self> {
        let invalid = || ValueError::invalid_literal(base_type, literal);
        let trimmed = literal.trim();
        match base_type {
            BaseType::Boolean => match trimmed {
                "true" | "1" => Ok(Self::Boolean(true)),
                "false" | "0" => Ok(Self::Boolean(false)),
                _ => Err(invalid()),
            },
            BaseType::Integer => trimmed.parse().map(Self::Integer).map_err(|_| invalid()),
            BaseType::Float => trimmed.parse().map(Self::Float).map_err(|_| invalid()),
            BaseType::String => Ok(Self::String(literal.to_string())),
            BaseType::Identifier => Ok(Self::Identifier(trimmed.to_string())),
            BaseType::Uri => Ok(Self::Uri(trimmed.to_string())),
            BaseType::Duration => QtiDuration::parse(trimmed).map(Self::Duration),
            BaseType::Point => {
                let (x, y) = split_pair(trimmed).ok_or_else(invalid)?;
                let x = x.parse().map_err(|_| invalid())?;
                let y = y.parse().map_err(|_| invalid())?;
                Ok(Self::Point(QtiPoint::new(x, y)))
            }
            BaseType::Pair => {
                let (a, b) = split_pair(trimmed).ok_or_else(invalid)?;
                Ok(Self::Pair(QtiPair::new(a, b)))
            }
            BaseType::DirectedPair => {
                let (a, b) = split_pair(trimmed).ok_or_else(invalid)?;
                Ok(Self::DirectedPair(QtiDirectedPair::new(a, b)))
            }
            BaseType::IntOrIdentifier => Ok(Self::IntOrIdentifier(
                trimmed
                    .parse::<i32>()
                    .map(IntOrIdentifier::Int)
                    .unwrap_or_else(|_| IntOrIdentifier::Identifier(trimmed.to_string())),
            )),
            BaseType::File => Ok(Self::File(QtiFile::from_path(trimmed))),
            BaseType::Coords => Err(ValueError::UnsupportedBaseType(BaseType::Coords)),
        }
    }

    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i32> {
        match self {
            Self::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Numeric value, widening integers to floats
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Integer(i) => Some(*i as f64),
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Text of string-like scalars (string, identifier, URI)
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) | Self::Identifier(s) | Self::Uri(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_duration(&self) -> Option<&QtiDuration> {
        match self {
            Self::Duration(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_point(&self) -> Option<&QtiPoint> {
        match self {
            Self::Point(p) => Some(p),
            _ => None,
        }
    }

    /// The empty string is a NULL value for operator purposes
    pub fn is_empty_string(&self) -> bool {
        matches!(self, Self::String(s) if s.is_empty())
    }
}

fn split_pair(literal: &str) -> Option<(&str, &str)> {
    let mut parts = literal.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(a), Some(b), None) => Some((a, b)),
        _ => None,
    }
}

impl PartialEq for QtiScalar {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Boolean(a), Self::Boolean(b)) => a == b,
            (Self::Integer(a), Self::Integer(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a == b,
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Identifier(a), Self::Identifier(b)) => a == b,
            (Self::Uri(a), Self::Uri(b)) => a == b,
            (Self::Duration(a), Self::Duration(b)) => a == b,
            (Self::Point(a), Self::Point(b)) => a == b,
            (Self::Pair(a), Self::Pair(b)) => a == b,
            (Self::DirectedPair(a), Self::DirectedPair(b)) => a == b,
            (Self::File(a), Self::File(b)) => a == b,
            (Self::IntOrIdentifier(a), Self::IntOrIdentifier(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for QtiScalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Boolean(b) => write!(f, "{}", b),
            Self::Integer(i) => write!(f, "{}", i),
            Self::Float(x) => write!(f, "{}", x),
            Self::String(s) => write!(f, "'{}'", s),
            Self::Identifier(s) | Self::Uri(s) => f.write_str(s),
            Self::Duration(d) => write!(f, "{}", d),
            Self::Point(p) => write!(f, "{}", p),
            Self::Pair(p) => write!(f, "{}", p),
            Self::DirectedPair(p) => write!(f, "{}", p),
            Self::File(file) => write!(f, "{}", file),
            Self::IntOrIdentifier(v) => write!(f, "{}", v),
        }
    }
}

impl From<bool> for QtiScalar {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<i32> for QtiScalar {
    fn from(value: i32) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for QtiScalar {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<QtiDuration> for QtiScalar {
    fn from(value: QtiDuration) -> Self {
        Self::Duration(value)
    }
}

impl From<QtiPoint> for QtiScalar {
    fn from(value: QtiPoint) -> Self {
        Self::Point(value)
    }
}

/// A point on a two-dimensional grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QtiPoint {
    pub x: i32,
    pub y: i32,
}

impl QtiPoint {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for QtiPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.x, self.y)
    }
}

/// An unordered pair of identifiers: `A B` equals `B A`
#[derive(Debug, Clone, Eq, Serialize, Deserialize)]
pub struct QtiPair {
    pub first: String,
    pub second: String,
}

impl QtiPair {
    pub fn new(first: impl Into<String>, second: impl Into<String>) -> Self {
        Self {
            first: first.into(),
            second: second.into(),
        }
    }
}

impl PartialEq for QtiPair {
    fn eq(&self, other: &Self) -> bool {
        (self.first == other.first && self.second == other.second)
            || (self.first == other.second && self.second == other.first)
    }
}

impl fmt::Display for QtiPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.first, self.second)
    }
}

/// An ordered pair of identifiers: `A B` differs from `B A`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QtiDirectedPair {
    pub source: String,
    pub destination: String,
}

impl QtiDirectedPair {
    pub fn new(source: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
        }
    }
}

impl fmt::Display for QtiDirectedPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.source, self.destination)
    }
}

/// Handle on a file submitted as a response
///
/// The content itself lives behind `path`, which is what gets persisted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QtiFile {
    pub path: String,
    pub filename: String,
    pub mime_type: String,
}

impl QtiFile {
    pub const DEFAULT_MIME_TYPE: &'static str = "application/octet-stream";

    pub fn new(
        path: impl Into<String>,
        filename: impl Into<String>,
        mime_type: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            filename: filename.into(),
            mime_type: mime_type.into(),
        }
    }

    /// File handle whose name is the last path segment
    pub fn from_path(path: impl Into<String>) -> Self {
        let path = path.into();
        let filename = path
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or_default()
            .to_string();
        Self {
            path,
            filename,
            mime_type: Self::DEFAULT_MIME_TYPE.to_string(),
        }
    }
}

impl fmt::Display for QtiFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.filename, self.mime_type)
    }
}

/// Either an integer or an identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IntOrIdentifier {
    Int(i32),
    Identifier(String),
}

impl fmt::Display for IntOrIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(i) => write!(f, "{}", i),
            Self::Identifier(s) => f.write_str(s),
        }
    }
}
