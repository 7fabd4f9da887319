//! QTI runtime value model
//!
//! This crate defines the values manipulated by the QTI expression engine
//! and persisted by the binary session codec:
//! - Base types and cardinalities, with their QTI names and wire codes
//! - Scalars (boolean, integer, float, string, identifier, duration, point,
//!   pair, directed pair, URI, file, int-or-identifier)
//! - Containers (multiple, ordered) and records
//! - Shapes and coordinates for area-based operators
//! - Variable declarations and runtime variables
//!
//! A NULL value is represented by `Option::None` wherever a value may be
//! absent; there is no dedicated null variant.

pub mod base_type;
pub mod duration;
pub mod error;
pub mod scalar;
pub mod shape;
pub mod value;
pub mod variable;

pub use base_type::{BaseType, Cardinality};
pub use duration::QtiDuration;
pub use error::{ValueError, ValueResult};
pub use scalar::{IntOrIdentifier, QtiDirectedPair, QtiFile, QtiPair, QtiPoint, QtiScalar};
pub use shape::{Coords, Shape};
pub use value::{Container, QtiValue, RecordContainer};
pub use variable::{Variable, VariableDeclaration};
