//! Binary persistence of QTI variable values and session state
//!
//! Three layers:
//! - [`stream`]: positioned byte streams over memory or a file
//! - [`access`]: little-endian primitives with typed decode failures
//! - [`codec`] and [`session`]: declaration-directed variable values and
//!   the item session, route position and pending responses artifacts
//!
//! # Example
//!
//! ```
//! use qti_binary::{BinaryStream, MemoryStream, QtiBinaryStreamAccess};
//! use qti_types::{BaseType, Cardinality, QtiValue, VariableDeclaration};
//!
//! let decl = VariableDeclaration::new("SCORE", Cardinality::Single, BaseType::Integer);
//!
//! let mut stream = MemoryStream::new();
//! stream.open().unwrap();
//! let mut codec = QtiBinaryStreamAccess::new(stream);
//! codec.write_variable_value(&decl, Some(&QtiValue::from(7))).unwrap();
//!
//! codec.stream_mut().rewind().unwrap();
//! assert_eq!(codec.read_variable_value(&decl).unwrap(), Some(QtiValue::from(7)));
//! ```

pub mod access;
pub mod codec;
pub mod error;
pub mod session;
pub mod stream;

pub use access::BinaryStreamAccess;
pub use codec::{
    DeclarationLookup, FileResolver, MemoryFileStore, PathFileResolver, QtiBinaryStreamAccess,
};
pub use error::{
    AccessResult, BinaryStreamAccessError, CodecError, CodecResult, Primitive, StreamError,
    StreamResult,
};
pub use session::{
    ItemSessionSnapshot, ItemSessionState, NavigationMode, PendingResponses, RoutePosition,
    SubmissionMode,
};
pub use stream::{BinaryStream, FileStream, MemoryStream};
