//! Errors of the binary persistence layer
//!
//! Three layers, each wrapping the one below:
//! - [`StreamError`]: the byte stream itself (not open, end of stream, I/O)
//! - [`BinaryStreamAccessError`]: a primitive that could not be read or written
//! - [`CodecError`]: a variable value or session artifact that could not be
//!   encoded or decoded

use qti_types::{BaseType, QtiPoint, ValueError};
use std::fmt;
use std::io;
use thiserror::Error;

/// Result type for stream operations
pub type StreamResult<T> = Result<T, StreamError>;

/// Result type for primitive reads and writes
pub type AccessResult<T> = Result<T, BinaryStreamAccessError>;

/// Result type for value and artifact encoding
pub type CodecResult<T> = Result<T, CodecError>;

#[derive(Debug, Error)]
pub enum StreamError {
    #[error("The stream is not open")]
    NotOpen,

    #[error("The stream is already open")]
    AlreadyOpen,

    #[error("Unexpected end of stream: {requested} byte(s) requested, {available} available")]
    UnexpectedEof { requested: usize, available: usize },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Primitive types of the binary layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    /// 1 byte, unsigned
    TinyInt,
    /// 2 bytes, unsigned, little-endian
    Short,
    /// 4 bytes, signed, little-endian
    Integer,
    /// 8 bytes, IEEE-754, little-endian
    Float,
    /// 1 byte
    Boolean,
    /// 2-byte length followed by UTF-8 bytes
    String,
    /// 2-byte length followed by raw bytes
    Binary,
}

impl Primitive {
    pub fn name(self) -> &'static str {
        match self {
            Self::TinyInt => "tinyint",
            Self::Short => "short",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Boolean => "boolean",
            Self::String => "string",
            Self::Binary => "binary data",
        }
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Error)]
pub enum BinaryStreamAccessError {
    /// The underlying stream is closed
    #[error("The underlying stream is not open")]
    NotOpen,

    #[error("An error occurred while reading a {primitive}: {source}")]
    Read {
        primitive: Primitive,
        #[source]
        source: StreamError,
    },

    #[error("An error occurred while writing a {primitive}: {source}")]
    Write {
        primitive: Primitive,
        #[source]
        source: StreamError,
    },

    #[error("A {primitive} of {len} bytes does not fit a 2-byte length prefix")]
    TooLong { primitive: Primitive, len: usize },

    #[error("A string is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),
}

impl BinaryStreamAccessError {
    pub(crate) fn read(primitive: Primitive, source: StreamError) -> Self {
        match source {
            StreamError::NotOpen => Self::NotOpen,
            source => Self::Read { primitive, source },
        }
    }

    pub(crate) fn write(primitive: Primitive, source: StreamError) -> Self {
        match source {
            StreamError::NotOpen => Self::NotOpen,
            source => Self::Write { primitive, source },
        }
    }

    /// The primitive that failed, if the failure concerns one
    pub fn primitive(&self) -> Option<Primitive> {
        match self {
            Self::Read { primitive, .. }
            | Self::Write { primitive, .. }
            | Self::TooLong { primitive, .. } => Some(*primitive),
            Self::InvalidUtf8(_) => Some(Primitive::String),
            Self::NotOpen => None,
        }
    }

    /// True when a read ran past the end of the stream
    pub fn is_eof(&self) -> bool {
        matches!(
            self,
            Self::Read {
                source: StreamError::UnexpectedEof { .. },
                ..
            }
        )
    }
}

#[derive(Debug, Error)]
pub enum CodecError {
    #[error(transparent)]
    Access(#[from] BinaryStreamAccessError),

    #[error(transparent)]
    Value(#[from] ValueError),

    /// A byte outside the closed set of an enumerated field
    #[error("Invalid {field} code {value}")]
    InvalidEnumValue { field: &'static str, value: u8 },

    #[error("Invalid intOrIdentifier discriminator {0}")]
    InvalidDiscriminator(u8),

    #[error("Base type {0} has no binary encoding")]
    UnsupportedBaseType(BaseType),

    #[error("Variable '{0}' has no declared base type")]
    MissingBaseType(String),

    #[error("No declaration found for variable '{0}'")]
    UnknownVariable(String),

    #[error("Point {0} does not fit two unsigned shorts")]
    PointOutOfRange(QtiPoint),

    #[error("{what} count {count} does not fit a 2-byte count")]
    TooMany { what: &'static str, count: usize },

    #[error("Cannot resolve file '{path}': {message}")]
    FileResolution { path: String, message: String },
}

impl CodecError {
    pub fn file_resolution(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::FileResolution {
            path: path.into(),
            message: message.into(),
        }
    }

    /// The primitive-level failure behind this error, if any
    pub fn access_error(&self) -> Option<&BinaryStreamAccessError> {
        match self {
            Self::Access(err) => Some(err),
            _ => None,
        }
    }
}
