//! Codec contract and built-in codecs
//!
//! A [`Codec`] reads one value off a streaming reader or writes one value to
//! a streaming writer. Codecs hold no references to each other; nested
//! codecs are resolved through the per-instance adapter cache in the
//! [`CodecCtx`] passed to every operation, which is what lets cyclic type
//! graphs terminate.

use std::sync::Arc;

use forge_core::{RawType, TypeDescriptor, Value};
use forge_wire::{read_value, write_value, JsonReader, JsonWriter, ProtocolViolation, TokenKind};

use crate::cache::AdapterCache;
use crate::engine::Engine;
use crate::error::CodecError;

/// The paired encode/decode logic for one concrete type binding.
pub trait Codec: Send + Sync {
    /// Write `value` to the writer.
    fn encode(
        &self,
        ctx: &CodecCtx<'_>,
        writer: &mut dyn JsonWriter,
        value: &Value,
    ) -> Result<(), CodecError>;

    /// Read one value off the reader.
    fn decode(&self, ctx: &CodecCtx<'_>, reader: &mut dyn JsonReader) -> Result<Value, CodecError>;
}

/// Resolution context threaded through every codec operation.
///
/// Carries the engine (for record-spec resolution) and the owning codec
/// instance's adapter cache (for nested codec lookup).
pub struct CodecCtx<'a> {
    engine: &'a Engine,
    cache: &'a AdapterCache,
}

impl<'a> CodecCtx<'a> {
    pub(crate) fn new(engine: &'a Engine, cache: &'a AdapterCache) -> Self {
        CodecCtx { engine, cache }
    }

    /// Resolve the codec for `descriptor` through the adapter cache,
    /// constructing it on first use.
    pub fn resolve(&self, descriptor: &TypeDescriptor) -> Result<Arc<dyn Codec>, CodecError> {
        self.cache
            .get_with(descriptor, &|d| self.engine.construct(d, self))
    }
}

pub(crate) fn mismatch(expected: impl Into<String>, value: &Value) -> CodecError {
    CodecError::Protocol(ProtocolViolation::ValueMismatch {
        expected: expected.into(),
        found: value.type_name().to_string(),
    })
}

// ----------------------------------------------------------------------------
// Scalars

pub(crate) struct BoolCodec;

impl Codec for BoolCodec {
    fn encode(
        &self,
        _ctx: &CodecCtx<'_>,
        writer: &mut dyn JsonWriter,
        value: &Value,
    ) -> Result<(), CodecError> {
        match value {
            Value::Bool(b) => Ok(writer.bool_value(*b)?),
            other => Err(mismatch("Bool", other)),
        }
    }

    fn decode(&self, _ctx: &CodecCtx<'_>, reader: &mut dyn JsonReader) -> Result<Value, CodecError> {
        Ok(Value::Bool(reader.next_bool()?))
    }
}

pub(crate) struct IntCodec;

impl Codec for IntCodec {
    fn encode(
        &self,
        _ctx: &CodecCtx<'_>,
        writer: &mut dyn JsonWriter,
        value: &Value,
    ) -> Result<(), CodecError> {
        match value {
            Value::Int(i) => Ok(writer.int_value(*i)?),
            other => Err(mismatch("Int", other)),
        }
    }

    fn decode(&self, _ctx: &CodecCtx<'_>, reader: &mut dyn JsonReader) -> Result<Value, CodecError> {
        Ok(Value::Int(reader.next_int()?))
    }
}

pub(crate) struct FloatCodec;

impl Codec for FloatCodec {
    fn encode(
        &self,
        _ctx: &CodecCtx<'_>,
        writer: &mut dyn JsonWriter,
        value: &Value,
    ) -> Result<(), CodecError> {
        match value {
            Value::Float(f) => Ok(writer.float_value(*f)?),
            other => Err(mismatch("Float", other)),
        }
    }

    fn decode(&self, _ctx: &CodecCtx<'_>, reader: &mut dyn JsonReader) -> Result<Value, CodecError> {
        Ok(Value::Float(reader.next_float()?))
    }
}

pub(crate) struct CharCodec;

impl Codec for CharCodec {
    fn encode(
        &self,
        _ctx: &CodecCtx<'_>,
        writer: &mut dyn JsonWriter,
        value: &Value,
    ) -> Result<(), CodecError> {
        match value {
            Value::Char(c) => {
                let mut buf = [0u8; 4];
                Ok(writer.string_value(c.encode_utf8(&mut buf))?)
            }
            other => Err(mismatch("Char", other)),
        }
    }

    fn decode(&self, _ctx: &CodecCtx<'_>, reader: &mut dyn JsonReader) -> Result<Value, CodecError> {
        let text = reader.next_string()?;
        let mut chars = text.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(Value::Char(c)),
            _ => Err(CodecError::Protocol(ProtocolViolation::ValueMismatch {
                expected: "single-character string".to_string(),
                found: format!("string of length {}", text.chars().count()),
            })),
        }
    }
}

pub(crate) struct StringCodec;

impl Codec for StringCodec {
    fn encode(
        &self,
        _ctx: &CodecCtx<'_>,
        writer: &mut dyn JsonWriter,
        value: &Value,
    ) -> Result<(), CodecError> {
        match value {
            Value::String(s) => Ok(writer.string_value(s)?),
            other => Err(mismatch("String", other)),
        }
    }

    fn decode(&self, _ctx: &CodecCtx<'_>, reader: &mut dyn JsonReader) -> Result<Value, CodecError> {
        Ok(Value::String(reader.next_string()?))
    }
}

/// Any-shape codec: the runtime value decides the wire form.
pub(crate) struct DynamicCodec;

impl Codec for DynamicCodec {
    fn encode(
        &self,
        _ctx: &CodecCtx<'_>,
        writer: &mut dyn JsonWriter,
        value: &Value,
    ) -> Result<(), CodecError> {
        Ok(write_value(writer, value)?)
    }

    fn decode(&self, _ctx: &CodecCtx<'_>, reader: &mut dyn JsonReader) -> Result<Value, CodecError> {
        Ok(read_value(reader)?)
    }
}

// ----------------------------------------------------------------------------
// Containers

pub(crate) struct ListCodec {
    pub elem: TypeDescriptor,
}

impl Codec for ListCodec {
    fn encode(
        &self,
        ctx: &CodecCtx<'_>,
        writer: &mut dyn JsonWriter,
        value: &Value,
    ) -> Result<(), CodecError> {
        let items = match value {
            Value::List(items) => items,
            other => return Err(mismatch("List", other)),
        };
        let elem_codec = ctx.resolve(&self.elem)?;
        writer.begin_array()?;
        for item in items {
            elem_codec.encode(ctx, writer, item)?;
        }
        writer.end_array()?;
        Ok(())
    }

    fn decode(&self, ctx: &CodecCtx<'_>, reader: &mut dyn JsonReader) -> Result<Value, CodecError> {
        let elem_codec = ctx.resolve(&self.elem)?;
        reader.begin_array()?;
        let mut items = Vec::new();
        while reader.has_next()? {
            items.push(elem_codec.decode(ctx, reader)?);
        }
        reader.end_array()?;
        Ok(Value::List(items))
    }
}

pub(crate) struct SetCodec {
    pub elem: TypeDescriptor,
}

impl Codec for SetCodec {
    fn encode(
        &self,
        ctx: &CodecCtx<'_>,
        writer: &mut dyn JsonWriter,
        value: &Value,
    ) -> Result<(), CodecError> {
        let items = match value {
            Value::Set(items) => items,
            other => return Err(mismatch("Set", other)),
        };
        let elem_codec = ctx.resolve(&self.elem)?;
        writer.begin_array()?;
        for item in items {
            elem_codec.encode(ctx, writer, item)?;
        }
        writer.end_array()?;
        Ok(())
    }

    fn decode(&self, ctx: &CodecCtx<'_>, reader: &mut dyn JsonReader) -> Result<Value, CodecError> {
        let elem_codec = ctx.resolve(&self.elem)?;
        reader.begin_array()?;
        let mut items: Vec<Value> = Vec::new();
        while reader.has_next()? {
            let item = elem_codec.decode(ctx, reader)?;
            // First occurrence wins.
            if !items.contains(&item) {
                items.push(item);
            }
        }
        reader.end_array()?;
        Ok(Value::Set(items))
    }
}

pub(crate) struct MapCodec {
    pub value_type: TypeDescriptor,
}

impl Codec for MapCodec {
    fn encode(
        &self,
        ctx: &CodecCtx<'_>,
        writer: &mut dyn JsonWriter,
        value: &Value,
    ) -> Result<(), CodecError> {
        let entries = match value {
            Value::Map(entries) => entries,
            other => return Err(mismatch("Map", other)),
        };
        let value_codec = ctx.resolve(&self.value_type)?;
        writer.begin_object()?;
        for (name, entry) in entries {
            writer.name(name)?;
            if entry.is_null() {
                writer.null_value()?;
            } else {
                value_codec.encode(ctx, writer, entry)?;
            }
        }
        writer.end_object()?;
        Ok(())
    }

    fn decode(&self, ctx: &CodecCtx<'_>, reader: &mut dyn JsonReader) -> Result<Value, CodecError> {
        let value_codec = ctx.resolve(&self.value_type)?;
        reader.begin_object()?;
        let mut entries: Vec<(String, Value)> = Vec::new();
        while reader.has_next()? {
            let name = reader.next_name()?;
            let entry = if reader.peek()? == TokenKind::Null {
                reader.next_null()?;
                Value::Null
            } else {
                value_codec.decode(ctx, reader)?
            };
            match entries.iter_mut().find(|(existing, _)| *existing == name) {
                Some(slot) => slot.1 = entry,
                None => entries.push((name, entry)),
            }
        }
        reader.end_object()?;
        Ok(Value::Map(entries))
    }
}

/// Shared by the generic optional and the three primitive-specialized forms;
/// absence is a null token on the wire and `Value::Null` in memory.
pub(crate) struct OptionalCodec {
    pub inner: TypeDescriptor,
}

impl Codec for OptionalCodec {
    fn encode(
        &self,
        ctx: &CodecCtx<'_>,
        writer: &mut dyn JsonWriter,
        value: &Value,
    ) -> Result<(), CodecError> {
        if value.is_null() {
            writer.null_value()?;
            return Ok(());
        }
        let inner_codec = ctx.resolve(&self.inner)?;
        inner_codec.encode(ctx, writer, value)
    }

    fn decode(&self, ctx: &CodecCtx<'_>, reader: &mut dyn JsonReader) -> Result<Value, CodecError> {
        if reader.peek()? == TokenKind::Null {
            reader.next_null()?;
            return Ok(Value::Null);
        }
        let inner_codec = ctx.resolve(&self.inner)?;
        inner_codec.decode(ctx, reader)
    }
}

/// The built-in codec table: descriptor head to codec constructor.
///
/// Record heads are not handled here; the engine synthesizes those from
/// schema, protocol, and bindings.
pub(crate) fn builtin(
    raw: &RawType,
    args: &[TypeDescriptor],
) -> Option<Arc<dyn Codec>> {
    match raw {
        RawType::Bool => Some(Arc::new(BoolCodec)),
        RawType::Int => Some(Arc::new(IntCodec)),
        RawType::Float => Some(Arc::new(FloatCodec)),
        RawType::Char => Some(Arc::new(CharCodec)),
        RawType::String => Some(Arc::new(StringCodec)),
        RawType::Dynamic => Some(Arc::new(DynamicCodec)),
        RawType::List => Some(Arc::new(ListCodec {
            elem: args[0].clone(),
        })),
        RawType::Set => Some(Arc::new(SetCodec {
            elem: args[0].clone(),
        })),
        RawType::Map => Some(Arc::new(MapCodec {
            value_type: args[1].clone(),
        })),
        RawType::Optional => Some(Arc::new(OptionalCodec {
            inner: args[0].clone(),
        })),
        RawType::OptionalInt => Some(Arc::new(OptionalCodec {
            inner: TypeDescriptor::simple(RawType::Int),
        })),
        RawType::OptionalFloat => Some(Arc::new(OptionalCodec {
            inner: TypeDescriptor::simple(RawType::Float),
        })),
        RawType::OptionalBool => Some(Arc::new(OptionalCodec {
            inner: TypeDescriptor::simple(RawType::Bool),
        })),
        RawType::Record(_) => None,
    }
}
