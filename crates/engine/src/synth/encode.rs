//! Record encoding
//!
//! Properties are emitted in declaration order; that order is part of the
//! wire contract. Absent non-primitive properties emit a null token without
//! constructing their codec; the codec for a property's type is only built,
//! through the adapter cache, the first time a present value is actually
//! encoded. The sink property re-emits its captured entries in insertion
//! order through the dynamic per-value codec.

use forge_core::Value;
use forge_wire::{write_value, JsonWriter, ProtocolViolation};

use crate::codec::{mismatch, CodecCtx};
use crate::error::CodecError;
use crate::protocol::InstantiationProtocol;

use super::RecordCodec;

pub(crate) fn encode_record(
    codec: &RecordCodec,
    ctx: &CodecCtx<'_>,
    writer: &mut dyn JsonWriter,
    value: &Value,
) -> Result<(), CodecError> {
    let schema = &codec.spec.schema;
    let record = match value {
        Value::Record(record) => record,
        other => return Err(mismatch(schema.type_name(), other)),
    };
    if record.type_name != schema.type_name() {
        return Err(CodecError::Protocol(ProtocolViolation::ValueMismatch {
            expected: schema.type_name().to_string(),
            found: record.type_name.clone(),
        }));
    }
    if record.fields.len() != schema.properties().len() {
        return Err(CodecError::Protocol(ProtocolViolation::ValueMismatch {
            expected: format!(
                "record with {} fields",
                schema.properties().len()
            ),
            found: format!("record with {} fields", record.fields.len()),
        }));
    }

    // Omit-defaults suppression compares against the default-valued builder,
    // so it is only live when one is obtainable.
    let omit_against = match (&codec.spec.protocol, schema.config().omit_defaults) {
        (InstantiationProtocol::Builder(protocol), true) => protocol
            .initial_values
            .as_ref()
            .map(|initial| (initial, &protocol.getters)),
        _ => None,
    };

    writer.begin_object()?;
    for (index, property) in schema.properties().iter().enumerate() {
        if property.ignore_on_encode {
            continue;
        }
        let field = &record.fields[index];

        if property.is_unknown_field_sink {
            match field {
                Value::Null => {}
                Value::Map(entries) => {
                    for (name, entry) in entries {
                        writer.name(name)?;
                        write_value(writer, entry)?;
                    }
                }
                other => return Err(mismatch("Map", other)),
            }
            continue;
        }

        if let Some((initial, getters)) = omit_against {
            if getters[index] && field == &initial[index] {
                continue;
            }
        }

        writer.name(&property.serialized_name)?;
        if field.is_null() && !codec.bound[index].is_primitive() {
            writer.null_value()?;
            continue;
        }
        let property_codec = ctx.resolve(&codec.bound[index])?;
        property_codec.encode(ctx, writer, field)?;
    }
    writer.end_object()?;
    Ok(())
}
