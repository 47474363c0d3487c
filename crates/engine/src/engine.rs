//! The synthesis engine
//!
//! [`Engine`] owns the metadata provider, the once-per-type record specs,
//! the collected applicability warnings, and the artifact sink. Codec
//! construction dispatches through an explicit table: built-in heads map to
//! their codecs, record heads go through spec resolution and binding.

use std::sync::Arc;

use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use tracing::{debug, warn};

use forge_core::{ApplicabilityWarning, RawType, TypeBindingError, TypeDescriptor};

use crate::applicability::{analyze, Applicability};
use crate::codec::{builtin, Codec, CodecCtx};
use crate::emit::{ArtifactSink, NoopSink};
use crate::error::CodecError;
use crate::protocol::{self, InstantiationProtocol};
use crate::surface::SchemaProvider;
use crate::synth::{lower_schema, RecordCodec, RecordSpec};

/// The codec synthesis engine.
pub struct Engine {
    provider: Arc<dyn SchemaProvider>,
    specs: Mutex<FxHashMap<String, Arc<RecordSpec>>>,
    warnings: Mutex<Vec<ApplicabilityWarning>>,
    sink: Mutex<Box<dyn ArtifactSink>>,
}

impl Engine {
    /// An engine over `provider` with the no-op artifact sink.
    pub fn new(provider: Arc<dyn SchemaProvider>) -> Self {
        Engine::with_artifact_sink(provider, Box::new(NoopSink))
    }

    /// An engine that forwards resolved specs to `sink`.
    pub fn with_artifact_sink(provider: Arc<dyn SchemaProvider>, sink: Box<dyn ArtifactSink>) -> Self {
        Engine {
            provider,
            specs: Mutex::new(FxHashMap::default()),
            warnings: Mutex::new(Vec::new()),
            sink: Mutex::new(sink),
        }
    }

    /// Applicability warnings collected so far, in discovery order.
    pub fn warnings(&self) -> Vec<ApplicabilityWarning> {
        self.warnings.lock().clone()
    }

    /// The explicit descriptor-to-codec table.
    pub(crate) fn construct(
        &self,
        descriptor: &TypeDescriptor,
        ctx: &CodecCtx<'_>,
    ) -> Result<Arc<dyn Codec>, CodecError> {
        match descriptor {
            TypeDescriptor::Variable(index) => {
                Err(TypeBindingError::UnboundVariable { index: *index }.into())
            }
            // A wildcard reads and writes through its bound.
            TypeDescriptor::Wildcard { bound, .. } => ctx.resolve(bound),
            TypeDescriptor::Concrete(raw, args) => {
                if let Some(expected) = raw.builtin_arity() {
                    if args.len() != expected {
                        return Err(TypeBindingError::ArityMismatch {
                            type_name: raw.name().to_string(),
                            expected,
                            actual: args.len(),
                        }
                        .into());
                    }
                }
                if *raw == RawType::Map {
                    if !matches!(args[0].head(), Some(RawType::String)) {
                        return Err(TypeBindingError::UnsupportedMapKey {
                            type_name: descriptor.to_string(),
                        }
                        .into());
                    }
                }
                match builtin(raw, args) {
                    Some(codec) => Ok(codec),
                    None => match raw {
                        RawType::Record(name) => self.record_codec(name, args),
                        _ => Err(CodecError::Internal(format!(
                            "no codec constructor for `{}`",
                            descriptor
                        ))),
                    },
                }
            }
        }
    }

    fn record_codec(
        &self,
        name: &str,
        args: &[TypeDescriptor],
    ) -> Result<Arc<dyn Codec>, CodecError> {
        let spec = self.record_spec(name)?;
        if args.len() != spec.schema.type_param_count() {
            return Err(TypeBindingError::ArityMismatch {
                type_name: name.to_string(),
                expected: spec.schema.type_param_count(),
                actual: args.len(),
            }
            .into());
        }
        Ok(Arc::new(RecordCodec::new(spec, args)?))
    }

    /// Resolve (and memoize) the spec for a record type. Failures are not
    /// memoized; each type's resolution is independent of its siblings.
    pub(crate) fn record_spec(&self, name: &str) -> Result<Arc<RecordSpec>, CodecError> {
        if let Some(spec) = self.specs.lock().get(name) {
            return Ok(Arc::clone(spec));
        }

        let surface = self
            .provider
            .surface(name)
            .ok_or_else(|| TypeBindingError::UnknownType {
                name: name.to_string(),
            })?;

        let (applicability, warning) = analyze(&surface);
        if let Some(warning) = warning {
            warn!(type_name = %warning.type_name, factory = %warning.factory, "{}", warning);
            self.warnings.lock().push(warning);
        }
        if applicability == Applicability::NotApplicable {
            return Err(TypeBindingError::NotApplicable {
                type_name: name.to_string(),
            }
            .into());
        }

        let schema = lower_schema(&surface)?;
        let protocol = protocol::resolve(&surface, &schema)?;

        if let InstantiationProtocol::Builder(builder) = &protocol {
            if let Some(initial) = &builder.initial_values {
                if initial.len() != schema.properties().len() {
                    return Err(CodecError::Internal(format!(
                        "type `{}`: builder initial values cover {} of {} properties",
                        name,
                        initial.len(),
                        schema.properties().len()
                    )));
                }
            }
        }
        if schema.config().omit_defaults {
            let obtainable = matches!(
                &protocol,
                InstantiationProtocol::Builder(b) if b.initial_values.is_some()
            );
            if !obtainable {
                debug!(
                    type_name = name,
                    "omit-defaults enabled but no default-valued builder is obtainable; mode is inert"
                );
            }
        }

        debug!(type_name = name, ?applicability, "resolved record spec");
        let spec = Arc::new(RecordSpec {
            applicability,
            schema,
            protocol,
        });
        self.sink.lock().emit(&spec);
        self.specs
            .lock()
            .insert(name.to_string(), Arc::clone(&spec));
        Ok(spec)
    }
}
