//! Record codec synthesis
//!
//! A [`RecordSpec`] is the once-per-type product of schema lowering,
//! applicability analysis, and protocol resolution. A `RecordCodec` is the
//! once-per-binding product of substituting a spec's type variables with the
//! actual type arguments of a construction site; its encode and decode loops
//! live in the sibling modules.

mod decode;
mod encode;

use std::sync::Arc;

use rustc_hash::FxHashMap;

use forge_core::{PropertySchema, RawType, SchemaError, TypeConfig, TypeDescriptor, TypeSchema, Value};
use forge_wire::{JsonReader, JsonWriter};

use crate::applicability::Applicability;
use crate::binder::TypeBinder;
use crate::codec::{Codec, CodecCtx};
use crate::error::CodecError;
use crate::protocol::InstantiationProtocol;
use crate::surface::TypeSurface;

/// The resolved, binding-independent synthesis product for one type:
/// validated schema, applicability verdict, and instantiation protocol.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordSpec {
    /// How the type opted into generation.
    pub applicability: Applicability,
    /// The validated schema.
    pub schema: TypeSchema,
    /// The resolved construction strategy.
    pub protocol: InstantiationProtocol,
}

/// Lower a surface into a validated schema.
pub(crate) fn lower_schema(surface: &TypeSurface) -> Result<TypeSchema, CodecError> {
    let binder = TypeBinder::new(&surface.name);
    let mut properties = Vec::with_capacity(surface.properties.len());
    for property in &surface.properties {
        let declared = binder.bind(&property.declared)?;
        properties.push(PropertySchema {
            name: property.name.clone(),
            human_name: property.human_name.clone(),
            declared,
            nullable: property.nullable,
            serialized_name: property
                .serialized_name
                .clone()
                .unwrap_or_else(|| property.human_name.clone()),
            serialized_aliases: property.serialized_aliases.clone(),
            ignore_on_encode: property.ignore_on_encode,
            ignore_on_decode: property.ignore_on_decode,
            is_unknown_field_sink: property.is_unknown_field_sink,
            default_literal: property.default_literal.clone(),
        });
    }
    let schema = TypeSchema::new(
        surface.name.clone(),
        surface.type_param_count,
        surface.config,
        properties,
    )?;
    validate_ignored_defaults(&schema)?;
    Ok(schema)
}

// A property that decode never touches must still end up with a value:
// nullable, an explicit literal, a primitive zero, or an empty collection.
fn validate_ignored_defaults(schema: &TypeSchema) -> Result<(), SchemaError> {
    for property in schema.properties() {
        if property.ignore_on_decode
            && !property.nullable
            && !has_usable_default(property, schema.config())
        {
            return Err(SchemaError::IgnoredWithoutDefault {
                type_name: schema.type_name().to_string(),
                property: property.name.clone(),
            });
        }
    }
    Ok(())
}

pub(crate) fn has_usable_default(property: &PropertySchema, config: &TypeConfig) -> bool {
    property.default_literal.is_some()
        || property.declared.is_primitive()
        || (config.collections_default_to_empty && property.declared.is_collection())
}

/// The default-value rule: explicit literal first, then primitive zero
/// values, then empty collections when enabled and statically determinable,
/// otherwise the null sentinel.
pub(crate) fn seed_value(property: &PropertySchema, config: &TypeConfig) -> Value {
    if let Some(literal) = &property.default_literal {
        return literal.clone();
    }
    match property.declared.head() {
        Some(RawType::Bool) => Value::Bool(false),
        Some(RawType::Int) => Value::Int(0),
        Some(RawType::Float) => Value::Float(0.0),
        Some(RawType::Char) => Value::Char('\0'),
        Some(RawType::List) if config.collections_default_to_empty && !property.nullable => {
            Value::List(Vec::new())
        }
        Some(RawType::Set) if config.collections_default_to_empty && !property.nullable => {
            Value::Set(Vec::new())
        }
        Some(RawType::Map) if config.collections_default_to_empty && !property.nullable => {
            Value::Map(Vec::new())
        }
        _ => Value::Null,
    }
}

/// The synthesized codec for one concrete binding of a record type.
pub(crate) struct RecordCodec {
    pub(crate) spec: Arc<RecordSpec>,
    /// Per-property declared descriptors with type variables substituted.
    pub(crate) bound: Vec<TypeDescriptor>,
    /// Wire name (canonical and aliases) to property index.
    pub(crate) wire_index: FxHashMap<String, usize>,
}

impl RecordCodec {
    /// Bind a spec against the actual type arguments of the request site.
    pub(crate) fn new(spec: Arc<RecordSpec>, args: &[TypeDescriptor]) -> Result<Self, CodecError> {
        let mut bound = Vec::with_capacity(spec.schema.properties().len());
        for property in spec.schema.properties() {
            bound.push(property.declared.substitute(args)?);
        }
        let mut wire_index = FxHashMap::default();
        for (index, property) in spec.schema.properties().iter().enumerate() {
            if property.is_unknown_field_sink {
                continue;
            }
            for name in property.wire_names() {
                wire_index.insert(name.to_string(), index);
            }
        }
        Ok(RecordCodec {
            spec,
            bound,
            wire_index,
        })
    }
}

impl Codec for RecordCodec {
    fn encode(
        &self,
        ctx: &CodecCtx<'_>,
        writer: &mut dyn JsonWriter,
        value: &Value,
    ) -> Result<(), CodecError> {
        encode::encode_record(self, ctx, writer, value)
    }

    fn decode(&self, ctx: &CodecCtx<'_>, reader: &mut dyn JsonReader) -> Result<Value, CodecError> {
        decode::decode_record(self, ctx, reader)
    }
}
