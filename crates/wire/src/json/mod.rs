//! Token-level JSON reading and writing
//!
//! The reader contract distinguishes token kinds (at minimum `Null` from
//! everything else) so codecs can peek before committing to a typed read.
//! Scalar reads and writes carry exact types; numbers preserve their
//! integer-versus-float nature through [`NumberValue`].

mod error;
mod reader;
mod value;
mod writer;

pub use error::{ProtocolViolation, Result};
pub use reader::{JsonReader, NumberValue, TextReader, TokenKind};
pub use value::{read_value, write_value};
pub use writer::{JsonWriter, TextWriter};
