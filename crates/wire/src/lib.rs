//! Streaming JSON wire layer for codecforge
//!
//! This crate defines the token-level contracts synthesized codecs are
//! written against, and text implementations of both:
//!
//! - [`JsonReader`] / [`JsonWriter`] - the streaming contracts (begin/end
//!   object and array, names, peeking, typed scalar reads and writes)
//! - [`TextReader`] / [`TextWriter`] - pull parser over a string slice and
//!   writer into an owned string
//! - [`read_value`] / [`write_value`] - generic any-shape bridging to the
//!   core [`Value`](forge_core::Value) model, used for unknown-field capture
//! - [`ProtocolViolation`] - the one value-time error type
//!
//! The wire format is plain RFC 8259 JSON. Readers and writers are stateful,
//! single-cursor objects; they must not be shared across concurrent
//! operations.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod json;

pub use json::{
    read_value, write_value, JsonReader, JsonWriter, NumberValue, ProtocolViolation, Result,
    TextReader, TextWriter, TokenKind,
};
