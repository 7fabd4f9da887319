//! Variable-value codec
//!
//! Values are written schema-directed: the cardinality and base type come
//! from the variable's declaration, which the reader must supply again.
//! Layout of a value:
//!
//! ```text
//! null flag (bool)
//! single:            payload
//! multiple/ordered:  count (short), then per element: null flag, payload
//! record:            count (short), then per field:
//!                    name (string), null flag, base type code (tinyint), payload
//! ```
//!
//! Base-type payloads:
//!
//! | base type                    | payload                                   |
//! |------------------------------|-------------------------------------------|
//! | identifier, string, uri      | string                                    |
//! | boolean                      | boolean                                   |
//! | integer                      | integer                                   |
//! | float                        | float                                     |
//! | point                        | two shorts                                |
//! | pair, directedPair           | two strings                               |
//! | duration                     | ISO 8601 string                           |
//! | file                         | path string, resolved by a [`FileResolver`] |
//! | intOrIdentifier              | tinyint 1 + integer, or tinyint 0 + string |

use indexmap::IndexMap;
use parking_lot::RwLock;
use std::ops::{Deref, DerefMut};
use std::sync::Arc;

use qti_types::{
    BaseType, Cardinality, Container, IntOrIdentifier, QtiDirectedPair, QtiDuration, QtiFile,
    QtiPair, QtiPoint, QtiScalar, QtiValue, RecordContainer, Variable, VariableDeclaration,
};

use crate::access::BinaryStreamAccess;
use crate::error::{CodecError, CodecResult};
use crate::stream::BinaryStream;

const INT_DISCRIMINATOR: u8 = 1;
const IDENTIFIER_DISCRIMINATOR: u8 = 0;

// ============================================================================
// Collaborators
// ============================================================================

/// Materializes a file value from its persisted path
pub trait FileResolver: Send + Sync {
    fn resolve(&self, path: &str) -> CodecResult<QtiFile>;
}

/// Resolves any non-empty path to a file handle named after its last segment
#[derive(Debug, Clone, Copy, Default)]
pub struct PathFileResolver;

impl FileResolver for PathFileResolver {
    fn resolve(&self, path: &str) -> CodecResult<QtiFile> {
        if path.is_empty() {
            return Err(CodecError::file_resolution(path, "empty path"));
        }
        Ok(QtiFile::from_path(path))
    }
}

/// In-memory file registry, shared between clones
#[derive(Debug, Clone, Default)]
pub struct MemoryFileStore {
    files: Arc<RwLock<IndexMap<String, QtiFile>>>,
}

impl MemoryFileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a file under its path, replacing any previous entry
    pub fn insert(&self, file: QtiFile) {
        self.files.write().insert(file.path.clone(), file);
    }

    pub fn get(&self, path: &str) -> Option<QtiFile> {
        self.files.read().get(path).cloned()
    }

    pub fn len(&self) -> usize {
        self.files.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.read().is_empty()
    }
}

impl FileResolver for MemoryFileStore {
    fn resolve(&self, path: &str) -> CodecResult<QtiFile> {
        self.get(path)
            .ok_or_else(|| CodecError::file_resolution(path, "no such file in store"))
    }
}

/// Source of variable declarations for decoding
pub trait DeclarationLookup {
    fn declaration(&self, identifier: &str) -> Option<&VariableDeclaration>;
}

impl DeclarationLookup for IndexMap<String, VariableDeclaration> {
    fn declaration(&self, identifier: &str) -> Option<&VariableDeclaration> {
        self.get(identifier)
    }
}

impl DeclarationLookup for [VariableDeclaration] {
    fn declaration(&self, identifier: &str) -> Option<&VariableDeclaration> {
        self.iter().find(|d| d.identifier == identifier)
    }
}

impl DeclarationLookup for Vec<VariableDeclaration> {
    fn declaration(&self, identifier: &str) -> Option<&VariableDeclaration> {
        self.as_slice().declaration(identifier)
    }
}

// ============================================================================
// Codec
// ============================================================================

/// QTI-aware reader and writer on top of [`BinaryStreamAccess`]
///
/// Primitive methods stay reachable through `Deref`.
pub struct QtiBinaryStreamAccess<S> {
    access: BinaryStreamAccess<S>,
    files: Arc<dyn FileResolver>,
}

impl<S: BinaryStream> QtiBinaryStreamAccess<S> {
    /// Wrap a stream, resolving files with [`PathFileResolver`]
    pub fn new(stream: S) -> Self {
        Self {
            access: BinaryStreamAccess::new(stream),
            files: Arc::new(PathFileResolver),
        }
    }

    pub fn with_file_resolver(mut self, files: Arc<dyn FileResolver>) -> Self {
        self.files = files;
        self
    }

    pub fn into_inner(self) -> S {
        self.access.into_inner()
    }

    // ------------------------------------------------------------------------
    // Variable values
    // ------------------------------------------------------------------------

    /// Read a value shaped by `declaration`; `None` is NULL
    pub fn read_variable_value(
        &mut self,
        declaration: &VariableDeclaration,
    ) -> CodecResult<Option<QtiValue>> {
        if self.access.read_boolean()? {
            return Ok(None);
        }
        let value = match declaration.cardinality {
            Cardinality::Single => QtiValue::Single(self.read_scalar(declared(declaration)?)?),
            Cardinality::Multiple => QtiValue::Multiple(self.read_container(declared(declaration)?)?),
            Cardinality::Ordered => QtiValue::Ordered(self.read_container(declared(declaration)?)?),
            Cardinality::Record => QtiValue::Record(self.read_record()?),
        };
        Ok(Some(value))
    }

    /// Write a value shaped by `declaration`; `None` is NULL
    ///
    /// A value that does not conform to the declaration is rejected before
    /// anything is written.
    pub fn write_variable_value(
        &mut self,
        declaration: &VariableDeclaration,
        value: Option<&QtiValue>,
    ) -> CodecResult<()> {
        let Some(value) = value else {
            self.access.write_boolean(true)?;
            return Ok(());
        };
        declaration.check(value)?;
        if declaration.cardinality != Cardinality::Record {
            declared(declaration)?;
        }
        check_encodable(value)?;

        self.access.write_boolean(false)?;
        match value {
            QtiValue::Single(scalar) => self.write_scalar(scalar),
            QtiValue::Multiple(container) | QtiValue::Ordered(container) => {
                self.write_container(container)
            }
            QtiValue::Record(record) => self.write_record(record),
        }
    }

    /// Read the value of a declared variable
    pub fn read_variable(&mut self, declaration: &VariableDeclaration) -> CodecResult<Variable> {
        let mut variable = Variable::new(declaration.clone());
        variable.value = self.read_variable_value(declaration)?;
        Ok(variable)
    }

    /// Write the current value of a variable
    pub fn write_variable(&mut self, variable: &Variable) -> CodecResult<()> {
        self.write_variable_value(&variable.declaration, variable.value.as_ref())
    }

    /// Read a counted list of identified variables
    pub fn read_variables(
        &mut self,
        declarations: &dyn DeclarationLookup,
    ) -> CodecResult<Vec<Variable>> {
        let count = self.access.read_short()?;
        let mut variables = Vec::with_capacity(count as usize);
        for _ in 0..count {
            let identifier = self.access.read_string()?;
            let declaration = declarations
                .declaration(&identifier)
                .ok_or(CodecError::UnknownVariable(identifier))?;
            variables.push(self.read_variable(declaration)?);
        }
        Ok(variables)
    }

    /// Write a counted list of variables, each preceded by its identifier
    pub fn write_variables(&mut self, variables: &[Variable]) -> CodecResult<()> {
        self.write_count("variable", variables.len())?;
        for variable in variables {
            self.access.write_string(variable.identifier())?;
            self.write_variable(variable)?;
        }
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Containers and records
    // ------------------------------------------------------------------------

    fn read_container(&mut self, base_type: BaseType) -> CodecResult<Container> {
        let count = self.access.read_short()?;
        let mut builder = Container::builder(base_type);
        for _ in 0..count {
            let value = if self.access.read_boolean()? {
                None
            } else {
                Some(self.read_scalar(base_type)?)
            };
            builder.push(value)?;
        }
        Ok(builder.build())
    }

    fn write_container(&mut self, container: &Container) -> CodecResult<()> {
        self.write_count("container element", container.len())?;
        for value in container.iter() {
            self.write_nullable(value)?;
        }
        Ok(())
    }

    fn read_record(&mut self) -> CodecResult<RecordContainer> {
        let count = self.access.read_short()?;
        let mut record = RecordContainer::new();
        for _ in 0..count {
            let name = self.access.read_string()?;
            let value = if self.access.read_boolean()? {
                None
            } else {
                let base_type = BaseType::from_code(self.access.read_tiny_int()?)?;
                Some(self.read_scalar(base_type)?)
            };
            record = record.with_field(name, value);
        }
        Ok(record)
    }

    fn write_record(&mut self, record: &RecordContainer) -> CodecResult<()> {
        self.write_count("record field", record.len())?;
        for (name, value) in record.iter() {
            self.access.write_string(name)?;
            match value {
                None => self.access.write_boolean(true)?,
                Some(scalar) => {
                    self.access.write_boolean(false)?;
                    self.access.write_tiny_int(scalar.base_type().code())?;
                    self.write_scalar(scalar)?;
                }
            }
        }
        Ok(())
    }

    fn write_nullable(&mut self, value: Option<&QtiScalar>) -> CodecResult<()> {
        match value {
            None => self.access.write_boolean(true)?,
            Some(scalar) => {
                self.access.write_boolean(false)?;
                self.write_scalar(scalar)?;
            }
        }
        Ok(())
    }

    fn write_count(&mut self, what: &'static str, count: usize) -> CodecResult<()> {
        let count = checked_count(what, count)?;
        self.access.write_short(count)?;
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Scalars
    // ------------------------------------------------------------------------

    /// Read a single base-type payload
    pub fn read_scalar(&mut self, base_type: BaseType) -> CodecResult<QtiScalar> {
        let access = &mut self.access;
        let scalar = match base_type {
            BaseType::Identifier => QtiScalar::Identifier(access.read_string()?),
            BaseType::String => QtiScalar::String(access.read_string()?),
            BaseType::Uri => QtiScalar::Uri(access.read_string()?),
            BaseType::Boolean => QtiScalar::Boolean(access.read_boolean()?),
            BaseType::Integer => QtiScalar::Integer(access.read_integer()?),
            BaseType::Float => QtiScalar::Float(access.read_float()?),
            BaseType::Point => {
                let x = access.read_short()?;
                let y = access.read_short()?;
                QtiScalar::Point(QtiPoint::new(i32::from(x), i32::from(y)))
            }
            BaseType::Pair => {
                let first = access.read_string()?;
                let second = access.read_string()?;
                QtiScalar::Pair(QtiPair::new(first, second))
            }
            BaseType::DirectedPair => {
                let source = access.read_string()?;
                let destination = access.read_string()?;
                QtiScalar::DirectedPair(QtiDirectedPair::new(source, destination))
            }
            BaseType::Duration => QtiScalar::Duration(QtiDuration::parse(&access.read_string()?)?),
            BaseType::File => {
                let path = access.read_string()?;
                QtiScalar::File(self.files.resolve(&path)?)
            }
            BaseType::IntOrIdentifier => match access.read_tiny_int()? {
                INT_DISCRIMINATOR => {
                    QtiScalar::IntOrIdentifier(IntOrIdentifier::Int(access.read_integer()?))
                }
                IDENTIFIER_DISCRIMINATOR => QtiScalar::IntOrIdentifier(
                    IntOrIdentifier::Identifier(access.read_string()?),
                ),
                other => return Err(CodecError::InvalidDiscriminator(other)),
            },
            BaseType::Coords => return Err(CodecError::UnsupportedBaseType(base_type)),
        };
        Ok(scalar)
    }

    /// Write a single base-type payload
    pub fn write_scalar(&mut self, scalar: &QtiScalar) -> CodecResult<()> {
        let access = &mut self.access;
        match scalar {
            QtiScalar::Identifier(s) | QtiScalar::String(s) | QtiScalar::Uri(s) => {
                access.write_string(s)?
            }
            QtiScalar::Boolean(b) => access.write_boolean(*b)?,
            QtiScalar::Integer(i) => access.write_integer(*i)?,
            QtiScalar::Float(f) => access.write_float(*f)?,
            QtiScalar::Point(point) => {
                let (Ok(x), Ok(y)) = (u16::try_from(point.x), u16::try_from(point.y)) else {
                    return Err(CodecError::PointOutOfRange(*point));
                };
                access.write_short(x)?;
                access.write_short(y)?;
            }
            QtiScalar::Pair(pair) => {
                access.write_string(&pair.first)?;
                access.write_string(&pair.second)?;
            }
            QtiScalar::DirectedPair(pair) => {
                access.write_string(&pair.source)?;
                access.write_string(&pair.destination)?;
            }
            QtiScalar::Duration(duration) => access.write_string(&duration.to_string())?,
            QtiScalar::File(file) => access.write_string(&file.path)?,
            QtiScalar::IntOrIdentifier(IntOrIdentifier::Int(i)) => {
                access.write_tiny_int(INT_DISCRIMINATOR)?;
                access.write_integer(*i)?;
            }
            QtiScalar::IntOrIdentifier(IntOrIdentifier::Identifier(s)) => {
                access.write_tiny_int(IDENTIFIER_DISCRIMINATOR)?;
                access.write_string(s)?;
            }
        }
        Ok(())
    }
}

fn declared(declaration: &VariableDeclaration) -> CodecResult<BaseType> {
    match declaration.base_type {
        Some(BaseType::Coords) => Err(CodecError::UnsupportedBaseType(BaseType::Coords)),
        Some(base_type) => Ok(base_type),
        None => Err(CodecError::MissingBaseType(declaration.identifier.clone())),
    }
}

impl<S> Deref for QtiBinaryStreamAccess<S> {
    type Target = BinaryStreamAccess<S>;

    fn deref(&self) -> &Self::Target {
        &self.access
    }
}

impl<S> DerefMut for QtiBinaryStreamAccess<S> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.access
    }
}

impl<S: std::fmt::Debug> std::fmt::Debug for QtiBinaryStreamAccess<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QtiBinaryStreamAccess")
            .field("access", &self.access)
            .finish_non_exhaustive()
    }
}

fn checked_count(what: &'static str, count: usize) -> CodecResult<u16> {
    u16::try_from(count).map_err(|_| CodecError::TooMany { what, count })
}

fn check_point(scalar: &QtiScalar) -> CodecResult<()> {
    match scalar {
        QtiScalar::Point(point)
            if u16::try_from(point.x).is_err() || u16::try_from(point.y).is_err() =>
        {
            Err(CodecError::PointOutOfRange(*point))
        }
        _ => Ok(()),
    }
}

// Counts and point coordinates are checked before the null flag goes out
fn check_encodable(value: &QtiValue) -> CodecResult<()> {
    match value {
        QtiValue::Single(scalar) => check_point(scalar),
        QtiValue::Multiple(container) | QtiValue::Ordered(container) => {
            checked_count("container element", container.len())?;
            container.iter().flatten().try_for_each(check_point)
        }
        QtiValue::Record(record) => {
            checked_count("record field", record.len())?;
            record.iter().filter_map(|(_, value)| value).try_for_each(check_point)
        }
    }
}
