//! Engine error composition
//!
//! Binding-time failures keep their own types ([`SchemaError`],
//! [`TypeBindingError`]); value-time failures are [`ProtocolViolation`]s.
//! [`CodecError`] is the composition the engine's entry points return, since
//! lazy codec construction can surface a binding failure in the middle of a
//! value operation.

use thiserror::Error;

use forge_core::{SchemaError, TypeBindingError};
use forge_wire::ProtocolViolation;

/// Any failure an engine operation can produce.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CodecError {
    /// Schema or instantiation protocol resolution failed.
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// Generic binding failed.
    #[error(transparent)]
    Binding(#[from] TypeBindingError),

    /// The token stream or a runtime value was malformed.
    #[error(transparent)]
    Protocol(#[from] ProtocolViolation),

    /// Bug or invariant violation inside the engine.
    #[error("internal error: {0}")]
    Internal(String),
}
