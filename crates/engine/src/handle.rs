//! Codec instance handle
//!
//! A [`CodecHandle`] pairs a root codec with the adapter cache it resolves
//! nested codecs through. The cache lives exactly as long as the handle;
//! dropping the handle frees every memoized codec.

use std::sync::Arc;

use forge_core::{TypeDescriptor, Value};
use forge_wire::{JsonReader, JsonWriter, TextReader, TextWriter};

use crate::cache::AdapterCache;
use crate::codec::{Codec, CodecCtx};
use crate::engine::Engine;
use crate::error::CodecError;

/// A constructed codec for one concrete type binding.
pub struct CodecHandle {
    engine: Arc<Engine>,
    cache: AdapterCache,
    root: Arc<dyn Codec>,
    descriptor: TypeDescriptor,
}

impl CodecHandle {
    /// Construct the codec instance for a fully bound descriptor.
    ///
    /// The handle owns its adapter cache; two handles for different bindings
    /// of the same generic type are fully independent.
    pub fn construct(engine: Arc<Engine>, descriptor: TypeDescriptor) -> Result<Self, CodecError> {
        let cache = AdapterCache::new();
        let root = {
            let ctx = CodecCtx::new(engine.as_ref(), &cache);
            ctx.resolve(&descriptor)?
        };
        Ok(CodecHandle {
            engine,
            cache,
            root,
            descriptor,
        })
    }

    /// The descriptor this codec was constructed for.
    pub fn descriptor(&self) -> &TypeDescriptor {
        &self.descriptor
    }

    /// Encode `value` to a streaming writer.
    pub fn encode(&self, writer: &mut dyn JsonWriter, value: &Value) -> Result<(), CodecError> {
        let ctx = CodecCtx::new(&self.engine, &self.cache);
        self.root.encode(&ctx, writer, value)
    }

    /// Decode one value from a streaming reader.
    pub fn decode(&self, reader: &mut dyn JsonReader) -> Result<Value, CodecError> {
        let ctx = CodecCtx::new(&self.engine, &self.cache);
        self.root.decode(&ctx, reader)
    }

    /// Encode `value` to a JSON string.
    pub fn encode_to_string(&self, value: &Value) -> Result<String, CodecError> {
        let mut writer = TextWriter::new();
        self.encode(&mut writer, value)?;
        Ok(writer.finish()?)
    }

    /// Decode a complete JSON document.
    pub fn decode_str(&self, json: &str) -> Result<Value, CodecError> {
        let mut reader = TextReader::new(json);
        let value = self.decode(&mut reader)?;
        reader.end_document()?;
        Ok(value)
    }
}
