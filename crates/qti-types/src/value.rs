//! QTI runtime values
//!
//! `QtiValue` is the value produced by every expression evaluation. It wraps
//! a scalar (single cardinality) or a container (multiple, ordered, record).
//! A NULL value is `None` at the use site; empty containers and empty
//! strings are additionally treated as NULL by `QtiValue::is_null`.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{ValueError, ValueResult};
use crate::{BaseType, Cardinality, QtiScalar};

/// A non-null QTI runtime value
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "cardinality", content = "value", rename_all = "camelCase")]
pub enum QtiValue {
    /// Single cardinality
    Single(QtiScalar),
    /// Unordered bag; equality is multiset equality
    Multiple(Container),
    /// Sequence; equality is positional
    Ordered(Container),
    /// Heterogeneous named fields
    Record(RecordContainer),
}

impl QtiValue {
    /// Create a single-cardinality value
    pub fn single(value: impl Into<QtiScalar>) -> Self {
        Self::Single(value.into())
    }

    /// Create a single string value
    pub fn string(value: impl Into<String>) -> Self {
        Self::Single(QtiScalar::String(value.into()))
    }

    /// Create a single identifier value
    pub fn identifier(value: impl Into<String>) -> Self {
        Self::Single(QtiScalar::Identifier(value.into()))
    }

    /// Get the cardinality of this value
    pub fn cardinality(&self) -> Cardinality {
        match self {
            Self::Single(_) => Cardinality::Single,
            Self::Multiple(_) => Cardinality::Multiple,
            Self::Ordered(_) => Cardinality::Ordered,
            Self::Record(_) => Cardinality::Record,
        }
    }

    /// Get the base type of this value
    ///
    /// Records have no base type of their own.
    pub fn base_type(&self) -> Option<BaseType> {
        match self {
            Self::Single(scalar) => Some(scalar.base_type()),
            Self::Multiple(container) | Self::Ordered(container) => Some(container.base_type()),
            Self::Record(_) => None,
        }
    }

    /// NULL for operator purposes: empty string, or container without any
    /// non-null element
    pub fn is_null(&self) -> bool {
        match self {
            Self::Single(scalar) => scalar.is_empty_string(),
            Self::Multiple(container) | Self::Ordered(container) => container.is_null(),
            Self::Record(record) => record.is_empty(),
        }
    }

    pub fn as_scalar(&self) -> Option<&QtiScalar> {
        match self {
            Self::Single(scalar) => Some(scalar),
            _ => None,
        }
    }

    /// Container of a multiple or ordered value
    pub fn as_container(&self) -> Option<&Container> {
        match self {
            Self::Multiple(container) | Self::Ordered(container) => Some(container),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&RecordContainer> {
        match self {
            Self::Record(record) => Some(record),
            _ => None,
        }
    }

    pub fn as_boolean(&self) -> Option<bool> {
        self.as_scalar().and_then(QtiScalar::as_boolean)
    }

    pub fn as_integer(&self) -> Option<i32> {
        self.as_scalar().and_then(QtiScalar::as_integer)
    }

    pub fn as_number(&self) -> Option<f64> {
        self.as_scalar().and_then(QtiScalar::as_number)
    }

    pub fn as_str(&self) -> Option<&str> {
        self.as_scalar().and_then(QtiScalar::as_str)
    }
}

impl PartialEq for QtiValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Single(a), Self::Single(b)) => a == b,
            (Self::Multiple(a), Self::Multiple(b)) => a.multiset_eq(b),
            (Self::Ordered(a), Self::Ordered(b)) => a.sequence_eq(b),
            (Self::Record(a), Self::Record(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for QtiValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single(scalar) => write!(f, "{}", scalar),
            Self::Multiple(container) => {
                f.write_str("[")?;
                container.fmt_elements(f)?;
                f.write_str("]")
            }
            Self::Ordered(container) => {
                f.write_str("<")?;
                container.fmt_elements(f)?;
                f.write_str(">")
            }
            Self::Record(record) => write!(f, "{}", record),
        }
    }
}

impl From<QtiScalar> for QtiValue {
    fn from(value: QtiScalar) -> Self {
        Self::Single(value)
    }
}

impl From<bool> for QtiValue {
    fn from(value: bool) -> Self {
        Self::Single(QtiScalar::Boolean(value))
    }
}

impl From<i32> for QtiValue {
    fn from(value: i32) -> Self {
        Self::Single(QtiScalar::Integer(value))
    }
}

impl From<f64> for QtiValue {
    fn from(value: f64) -> Self {
        Self::Single(QtiScalar::Float(value))
    }
}

impl From<RecordContainer> for QtiValue {
    fn from(value: RecordContainer) -> Self {
        Self::Record(value)
    }
}

/// Homogeneous element list backing multiple and ordered values
///
/// Every non-null element has the container's base type; this is checked
/// when the container is built and cannot be broken afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Container {
    base_type: BaseType,
    values: Vec<Option<QtiScalar>>,
}

impl Container {
    /// Create an empty container
    pub fn new(base_type: BaseType) -> Self {
        Self {
            base_type,
            values: Vec::new(),
        }
    }

    /// Start building a container of the given base type
    pub fn builder(base_type: BaseType) -> ContainerBuilder {
        ContainerBuilder {
            container: Self::new(base_type),
        }
    }

    /// Build a container from possibly-null values
    pub fn from_values(
        base_type: BaseType,
        values: impl IntoIterator<Item = Option<QtiScalar>>,
    ) -> ValueResult<Self> {
        let mut builder = Self::builder(base_type);
        for value in values {
            builder.push(value)?;
        }
        Ok(builder.build())
    }

    /// Build a container from non-null values
    pub fn from_scalars(
        base_type: BaseType,
        values: impl IntoIterator<Item = QtiScalar>,
    ) -> ValueResult<Self> {
        Self::from_values(base_type, values.into_iter().map(Some))
    }

    pub fn base_type(&self) -> BaseType {
        self.base_type
    }

    pub fn values(&self) -> &[Option<QtiScalar>] {
        &self.values
    }

    pub fn into_values(self) -> Vec<Option<QtiScalar>> {
        self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// True when the container holds no non-null element
    pub fn is_null(&self) -> bool {
        self.values.iter().all(Option::is_none)
    }

    pub fn get(&self, index: usize) -> Option<&QtiScalar> {
        self.values.get(index).and_then(Option::as_ref)
    }

    /// Iterate over every element, NULL included
    pub fn iter(&self) -> impl Iterator<Item = Option<&QtiScalar>> {
        self.values.iter().map(Option::as_ref)
    }

    /// Iterate over non-null elements
    pub fn scalars(&self) -> impl Iterator<Item = &QtiScalar> {
        self.values.iter().flatten()
    }

    /// Number of elements equal to `value`
    pub fn occurrences(&self, value: Option<&QtiScalar>) -> usize {
        self.iter().filter(|v| *v == value).count()
    }

    pub fn contains(&self, value: &QtiScalar) -> bool {
        self.occurrences(Some(value)) > 0
    }

    /// Equality ignoring element order, respecting occurrence counts
    pub fn multiset_eq(&self, other: &Container) -> bool {
        self.base_type == other.base_type
            && self.len() == other.len()
            && self
                .iter()
                .all(|value| self.occurrences(value) == other.occurrences(value))
    }

    /// Positional equality
    pub fn sequence_eq(&self, other: &Container) -> bool {
        self.base_type == other.base_type && self.values == other.values
    }

    fn fmt_elements(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, value) in self.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            match value {
                Some(scalar) => write!(f, "{}", scalar)?,
                None => f.write_str("NULL")?,
            }
        }
        Ok(())
    }
}

/// Validating builder for [`Container`]
#[derive(Debug, Clone)]
pub struct ContainerBuilder {
    container: Container,
}

impl ContainerBuilder {
    /// Append a value, rejecting base types other than the container's
    pub fn push(&mut self, value: Option<QtiScalar>) -> ValueResult<&mut Self> {
        if self.container.base_type == BaseType::Coords {
            return Err(ValueError::UnsupportedBaseType(BaseType::Coords));
        }
        if let Some(scalar) = &value {
            let found = scalar.base_type();
            if found != self.container.base_type {
                return Err(ValueError::BaseTypeMismatch {
                    expected: self.container.base_type,
                    found,
                });
            }
        }
        self.container.values.push(value);
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.container.len()
    }

    pub fn is_empty(&self) -> bool {
        self.container.is_empty()
    }

    pub fn build(self) -> Container {
        self.container
    }
}

/// Record value: named fields of heterogeneous base types
///
/// Field values may be NULL. Field order is kept for display and
/// persistence but does not take part in equality.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecordContainer {
    fields: IndexMap<String, Option<QtiScalar>>,
}

impl RecordContainer {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a record from (name, value) pairs
    pub fn from_fields(
        fields: impl IntoIterator<Item = (impl Into<String>, Option<QtiScalar>)>,
    ) -> Self {
        Self {
            fields: fields.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    /// Add or replace a field
    pub fn with_field(mut self, name: impl Into<String>, value: Option<QtiScalar>) -> Self {
        self.fields.insert(name.into(), value);
        self
    }

    /// Get a non-null field value
    pub fn get(&self, name: &str) -> Option<&QtiScalar> {
        self.fields.get(name).and_then(Option::as_ref)
    }

    pub fn contains_field(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Base type of a field, absent for NULL or unknown fields
    pub fn field_base_type(&self, name: &str) -> Option<BaseType> {
        self.get(name).map(QtiScalar::base_type)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&QtiScalar>)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_ref()))
    }
}

impl PartialEq for RecordContainer {
    fn eq(&self, other: &Self) -> bool {
        self.fields == other.fields
    }
}

impl fmt::Display for RecordContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (name, value)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            match value {
                Some(scalar) => write!(f, "{}: {}", name, scalar)?,
                None => write!(f, "{}: NULL", name)?,
            }
        }
        f.write_str("}")
    }
}
