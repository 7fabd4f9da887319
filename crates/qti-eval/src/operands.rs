//! Operand lists and the contract predicates processors check them against
//!
//! Processors check, in this order: NULL short-circuit, cardinality, base
//! type. The cardinality and base-type gates skip NULL operands, so they can
//! also be used by the operators that tolerate NULL (`and`, `or`, `multiple`
//! ...); over an empty list (or a list of NULLs only) every gate is false.

use qti_types::{BaseType, Cardinality, QtiValue};
use smallvec::SmallVec;
use std::ops::Deref;

/// Evaluated operands of one operator invocation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Operands {
    values: SmallVec<[Option<QtiValue>; 4]>,
}

impl Operands {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, value: Option<QtiValue>) {
        self.values.push(value);
    }

    /// Non-null operands
    pub fn non_null(&self) -> impl Iterator<Item = &QtiValue> {
        self.values
            .iter()
            .flatten()
            .filter(|value| !value.is_null())
    }

    /// Operand at `index`, `None` when it is absent or NULL
    pub fn value(&self, index: usize) -> Option<&QtiValue> {
        self.values
            .get(index)
            .and_then(Option::as_ref)
            .filter(|value| !value.is_null())
    }

    // === NULL ===

    /// True if any operand is NULL, an empty string, or a NULL container
    pub fn contains_null(&self) -> bool {
        self.values
            .iter()
            .any(|value| value.as_ref().is_none_or(QtiValue::is_null))
    }

    // === Cardinality gates ===

    fn all_non_null(&self, predicate: impl Fn(&QtiValue) -> bool) -> bool {
        let mut seen = false;
        for value in self.non_null() {
            if !predicate(value) {
                return false;
            }
            seen = true;
        }
        seen
    }

    fn all_cardinalities(&self, accepted: &[Cardinality]) -> bool {
        self.all_non_null(|value| accepted.contains(&value.cardinality()))
    }

    pub fn exclusively_single(&self) -> bool {
        self.all_cardinalities(&[Cardinality::Single])
    }

    pub fn exclusively_multiple_or_ordered(&self) -> bool {
        self.all_cardinalities(&[Cardinality::Multiple, Cardinality::Ordered])
    }

    pub fn exclusively_ordered(&self) -> bool {
        self.all_cardinalities(&[Cardinality::Ordered])
    }

    pub fn exclusively_single_or_multiple(&self) -> bool {
        self.all_cardinalities(&[Cardinality::Single, Cardinality::Multiple])
    }

    pub fn exclusively_single_or_ordered(&self) -> bool {
        self.all_cardinalities(&[Cardinality::Single, Cardinality::Ordered])
    }

    pub fn anything_but_record(&self) -> bool {
        self.all_cardinalities(&[Cardinality::Single, Cardinality::Multiple, Cardinality::Ordered])
    }

    pub fn exclusively_record(&self) -> bool {
        self.all_cardinalities(&[Cardinality::Record])
    }

    // === Base-type gates ===

    fn all_base_types(&self, accepted: &[BaseType]) -> bool {
        self.all_non_null(|value| value.base_type().is_some_and(|bt| accepted.contains(&bt)))
    }

    pub fn exclusively_boolean(&self) -> bool {
        self.all_base_types(&[BaseType::Boolean])
    }

    /// Integer or float
    pub fn exclusively_numeric(&self) -> bool {
        self.all_base_types(&[BaseType::Integer, BaseType::Float])
    }

    pub fn exclusively_integer(&self) -> bool {
        self.all_base_types(&[BaseType::Integer])
    }

    pub fn exclusively_string(&self) -> bool {
        self.all_base_types(&[BaseType::String])
    }

    pub fn exclusively_point(&self) -> bool {
        self.all_base_types(&[BaseType::Point])
    }

    pub fn exclusively_duration(&self) -> bool {
        self.all_base_types(&[BaseType::Duration])
    }

    // === Pairwise gates ===

    /// Every operand is non-null and has the same cardinality
    pub fn same_cardinality(&self) -> bool {
        !self.is_empty()
            && !self.contains_null()
            && self
                .non_null()
                .all(|value| Some(value.cardinality()) == self.value(0).map(QtiValue::cardinality))
    }

    /// Every operand is non-null and has the same base type
    ///
    /// Records have no base type and never satisfy this gate.
    pub fn same_base_type(&self) -> bool {
        let Some(first) = self.value(0).and_then(QtiValue::base_type) else {
            return false;
        };
        !self.contains_null() && self.non_null().all(|value| value.base_type() == Some(first))
    }

    /// Same base type among the non-null operands only
    pub fn same_base_type_ignoring_null(&self) -> bool {
        let mut base_types = self.non_null().map(QtiValue::base_type);
        match base_types.next() {
            Some(Some(first)) => base_types.all(|bt| bt == Some(first)),
            _ => false,
        }
    }
}

impl Deref for Operands {
    type Target = [Option<QtiValue>];

    fn deref(&self) -> &Self::Target {
        &self.values
    }
}

impl FromIterator<Option<QtiValue>> for Operands {
    fn from_iter<T: IntoIterator<Item = Option<QtiValue>>>(iter: T) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

impl From<Vec<Option<QtiValue>>> for Operands {
    fn from(values: Vec<Option<QtiValue>>) -> Self {
        Self {
            values: SmallVec::from_vec(values),
        }
    }
}

impl<'a> IntoIterator for &'a Operands {
    type Item = &'a Option<QtiValue>;
    type IntoIter = std::slice::Iter<'a, Option<QtiValue>>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}
