//! Core data model for codecforge
//!
//! This crate defines the canonical types shared by every other layer:
//!
//! - [`Value`] - the dynamic value model decoded instances are built from
//! - [`TypeDescriptor`] / [`RawType`] - resolved generic-type trees used to
//!   select and construct codecs
//! - [`PropertySchema`] / [`TypeSchema`] - the canonical per-type description
//!   of serializable properties
//! - [`TypeConfig`] - the explicit per-type configuration record
//! - binding-time error types ([`SchemaError`], [`TypeBindingError`]) and the
//!   non-fatal [`ApplicabilityWarning`]
//!
//! Everything here is plain data: schemas and descriptors are built once when
//! a type's codec is first requested and are immutable afterwards.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod descriptor;
mod error;
mod schema;
mod value;

pub use descriptor::{BoundKind, RawType, TypeDescriptor};
pub use error::{ApplicabilityWarning, SchemaError, TypeBindingError, WarningKind};
pub use schema::{PropertySchema, TypeConfig, TypeSchema};
pub use value::{RecordValue, Value};
