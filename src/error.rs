//! Unified error type for codecforge.
//!
//! This module wraps the member-crate errors and presents one consistent
//! interface at the facade: schema and binding failures at codec
//! construction, protocol violations at value time.

use thiserror::Error;

use forge_engine::CodecError;

/// All codecforge errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A type's schema or instantiation protocol could not be resolved.
    #[error("schema error: {0}")]
    Schema(#[from] forge_core::SchemaError),

    /// A declared type could not be represented or bound.
    #[error("type binding error: {0}")]
    Binding(#[from] forge_core::TypeBindingError),

    /// The token stream or a runtime value was malformed.
    #[error("protocol violation: {0}")]
    Protocol(#[from] forge_wire::ProtocolViolation),

    /// Internal error (bug or invariant violation).
    #[error("internal error: {0}")]
    Internal(String),
}

/// Result type for codecforge operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Check if this error is a binding-time failure (schema or binding).
    pub fn is_binding_time(&self) -> bool {
        matches!(self, Error::Schema(_) | Error::Binding(_))
    }

    /// Check if this is a serious/unrecoverable error.
    pub fn is_serious(&self) -> bool {
        matches!(self, Error::Internal(_))
    }
}

impl From<CodecError> for Error {
    fn from(e: CodecError) -> Self {
        match e {
            CodecError::Schema(e) => Error::Schema(e),
            CodecError::Binding(e) => Error::Binding(e),
            CodecError::Protocol(e) => Error::Protocol(e),
            CodecError::Internal(msg) => Error::Internal(msg),
        }
    }
}
