//! Any-shape bridging between the token stream and [`Value`]
//!
//! Unknown fields captured by a sink property have no schema; they are
//! parsed generically into [`Value`] with their shape preserved (object entry
//! order included) and written back out the same way.

use forge_core::Value;

use super::error::{ProtocolViolation, Result};
use super::reader::{JsonReader, NumberValue, TokenKind};
use super::writer::JsonWriter;

/// Parse the next value generically, preserving arbitrary JSON shape.
///
/// Numbers become `Int` when the literal is integral and fits 64 bits,
/// `Float` otherwise. Objects keep their entry order.
pub fn read_value(reader: &mut dyn JsonReader) -> Result<Value> {
    match reader.peek()? {
        TokenKind::Null => {
            reader.next_null()?;
            Ok(Value::Null)
        }
        TokenKind::Bool => Ok(Value::Bool(reader.next_bool()?)),
        TokenKind::Number => Ok(match reader.next_number()? {
            NumberValue::Int(i) => Value::Int(i),
            NumberValue::Float(f) => Value::Float(f),
        }),
        TokenKind::String => Ok(Value::String(reader.next_string()?)),
        TokenKind::BeginArray => {
            reader.begin_array()?;
            let mut items = Vec::new();
            while reader.has_next()? {
                items.push(read_value(reader)?);
            }
            reader.end_array()?;
            Ok(Value::List(items))
        }
        TokenKind::BeginObject => {
            reader.begin_object()?;
            let mut entries = Vec::new();
            while reader.has_next()? {
                let name = reader.next_name()?;
                let value = read_value(reader)?;
                entries.push((name, value));
            }
            reader.end_object()?;
            Ok(Value::Map(entries))
        }
        TokenKind::EndObject | TokenKind::EndArray | TokenKind::End => {
            Err(ProtocolViolation::UnexpectedEnd)
        }
    }
}

/// Write a value generically, by its runtime shape.
///
/// Sets write as arrays and chars as one-character strings. Records carry no
/// field names of their own and cannot be written without a schema codec.
pub fn write_value(writer: &mut dyn JsonWriter, value: &Value) -> Result<()> {
    match value {
        Value::Null => writer.null_value(),
        Value::Bool(b) => writer.bool_value(*b),
        Value::Int(i) => writer.int_value(*i),
        Value::Float(f) => writer.float_value(*f),
        Value::Char(c) => {
            let mut buf = [0u8; 4];
            writer.string_value(c.encode_utf8(&mut buf))
        }
        Value::String(s) => writer.string_value(s),
        Value::List(items) | Value::Set(items) => {
            writer.begin_array()?;
            for item in items {
                write_value(writer, item)?;
            }
            writer.end_array()
        }
        Value::Map(entries) => {
            writer.begin_object()?;
            for (name, value) in entries {
                writer.name(name)?;
                write_value(writer, value)?;
            }
            writer.end_object()
        }
        Value::Record(_) => Err(ProtocolViolation::InvalidWrite {
            detail: "record values require a schema codec",
        }),
    }
}
