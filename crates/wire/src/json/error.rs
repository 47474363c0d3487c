//! Value-time error type
//!
//! Everything that can go wrong while tokens flow - malformed input on
//! decode, misuse of the writer, a value that does not fit its schema type -
//! is a [`ProtocolViolation`]. There is no retry and no partial-result
//! recovery; whatever state was accumulated is discarded by propagation.

use thiserror::Error;

/// Result alias for wire operations.
pub type Result<T> = std::result::Result<T, ProtocolViolation>;

/// A malformed token stream or a value that cannot be represented on it.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProtocolViolation {
    /// The next token is not what the caller asked for.
    #[error("expected {expected}, found `{found}` at offset {offset}")]
    UnexpectedToken {
        /// What the caller asked for.
        expected: &'static str,
        /// A short snippet of what is actually there.
        found: String,
        /// Byte offset into the input.
        offset: usize,
    },

    /// Input ended in the middle of a value.
    #[error("unexpected end of input")]
    UnexpectedEnd,

    /// A number literal violates the JSON grammar.
    #[error("malformed number `{literal}` at offset {offset}")]
    MalformedNumber {
        /// The offending literal (or a snippet of it).
        literal: String,
        /// Byte offset into the input.
        offset: usize,
    },

    /// An integer literal does not fit in 64 bits.
    #[error("number out of range `{literal}`")]
    NumberOutOfRange {
        /// The offending literal.
        literal: String,
    },

    /// A string literal never closed.
    #[error("unterminated string starting at offset {offset}")]
    UnterminatedString {
        /// Byte offset of the opening quote.
        offset: usize,
    },

    /// An escape sequence is not valid JSON.
    #[error("invalid escape sequence `{escape}` at offset {offset}")]
    InvalidEscape {
        /// The offending escape text.
        escape: String,
        /// Byte offset into the input.
        offset: usize,
    },

    /// A control character appeared unescaped inside a string.
    #[error("unescaped control character in string at offset {offset}")]
    UnescapedControl {
        /// Byte offset into the input.
        offset: usize,
    },

    /// Content remained after the document's single top-level value.
    #[error("trailing data after document at offset {offset}")]
    TrailingData {
        /// Byte offset where the trailing content starts.
        offset: usize,
    },

    /// NaN and infinities have no JSON representation.
    #[error("non-finite number cannot be encoded")]
    NonFiniteNumber,

    /// The writer was driven out of order.
    #[error("invalid writer state: {detail}")]
    InvalidWrite {
        /// What was attempted.
        detail: &'static str,
    },

    /// A runtime value does not match the schema type it is encoded under.
    #[error("value does not match schema type: expected {expected}, found {found}")]
    ValueMismatch {
        /// What the schema called for.
        expected: String,
        /// What the value actually was.
        found: String,
    },
}
