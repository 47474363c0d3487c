//! Facade entry point
//!
//! [`ForgeBuilder`] collects type surfaces (and optionally an artifact sink)
//! and builds a [`Forge`], the handle codecs are requested from. Each
//! requested codec owns its own adapter cache; the forge itself only owns
//! the engine and the once-per-type resolved specs.

use std::sync::Arc;

use forge_core::{ApplicabilityWarning, TypeDescriptor, Value};
use forge_engine::{ArtifactSink, CodecHandle, Engine, SchemaProvider, StaticProvider, TypeSurface};
use forge_wire::{JsonReader, JsonWriter};

use crate::error::Result;

/// Builder for a [`Forge`].
pub struct ForgeBuilder {
    provider: StaticProvider,
    sink: Option<Box<dyn ArtifactSink>>,
}

impl ForgeBuilder {
    /// An empty builder.
    pub fn new() -> Self {
        ForgeBuilder {
            provider: StaticProvider::new(),
            sink: None,
        }
    }

    /// Register a type surface.
    pub fn register(mut self, surface: TypeSurface) -> Self {
        self.provider.register(surface);
        self
    }

    /// Forward resolved record specs to an external emitter.
    pub fn artifact_sink(mut self, sink: Box<dyn ArtifactSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Build the forge.
    pub fn build(self) -> Forge {
        let provider: Arc<dyn SchemaProvider> = Arc::new(self.provider);
        let engine = match self.sink {
            Some(sink) => Engine::with_artifact_sink(provider, sink),
            None => Engine::new(provider),
        };
        Forge {
            engine: Arc::new(engine),
        }
    }
}

impl Default for ForgeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Entry point for requesting synthesized codecs.
pub struct Forge {
    engine: Arc<Engine>,
}

impl Forge {
    /// Start building a forge.
    pub fn builder() -> ForgeBuilder {
        ForgeBuilder::new()
    }

    /// A forge over a custom metadata provider.
    pub fn with_provider(provider: Arc<dyn SchemaProvider>) -> Self {
        Forge {
            engine: Arc::new(Engine::new(provider)),
        }
    }

    /// Codec for a non-generic record type.
    pub fn codec(&self, type_name: &str) -> Result<Codec> {
        self.codec_with(type_name, &[])
    }

    /// Codec for a record type bound to concrete type arguments.
    pub fn codec_with(&self, type_name: &str, args: &[TypeDescriptor]) -> Result<Codec> {
        self.codec_for(TypeDescriptor::record(type_name, args.to_vec()))
    }

    /// Codec for an arbitrary fully bound descriptor.
    pub fn codec_for(&self, descriptor: TypeDescriptor) -> Result<Codec> {
        let inner = CodecHandle::construct(Arc::clone(&self.engine), descriptor)?;
        Ok(Codec { inner })
    }

    /// Applicability warnings collected so far.
    pub fn warnings(&self) -> Vec<ApplicabilityWarning> {
        self.engine.warnings()
    }
}

/// A synthesized codec for one concrete type binding.
///
/// Wraps the engine's codec instance and reports failures through the
/// facade's unified [`Error`](crate::Error).
pub struct Codec {
    inner: CodecHandle,
}

impl std::fmt::Debug for Codec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Codec")
            .field("descriptor", self.inner.descriptor())
            .finish()
    }
}

impl Codec {
    /// The descriptor this codec was constructed for.
    pub fn descriptor(&self) -> &TypeDescriptor {
        self.inner.descriptor()
    }

    /// Encode `value` to a streaming writer.
    pub fn encode(&self, writer: &mut dyn JsonWriter, value: &Value) -> Result<()> {
        Ok(self.inner.encode(writer, value)?)
    }

    /// Decode one value from a streaming reader.
    pub fn decode(&self, reader: &mut dyn JsonReader) -> Result<Value> {
        Ok(self.inner.decode(reader)?)
    }

    /// Encode `value` to a JSON string.
    pub fn encode_to_string(&self, value: &Value) -> Result<String> {
        Ok(self.inner.encode_to_string(value)?)
    }

    /// Decode a complete JSON document.
    pub fn decode_str(&self, json: &str) -> Result<Value> {
        Ok(self.inner.decode_str(json)?)
    }
}
