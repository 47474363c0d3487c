//! Record decoding
//!
//! One pass over the reader's field entries. Constructor-protocol types
//! pre-seed one local per property from the default-value rule and construct
//! positionally after the loop; builder-protocol types start from the
//! builder's initial values and apply each decoded value through its
//! resolved setter path. A peeked null token is consumed without touching
//! any property, uniformly. Unrecognized fields go to the sink when one
//! exists and are skipped without structural parsing otherwise.

use forge_core::Value;
use forge_wire::{read_value, JsonReader, TokenKind};

use crate::codec::{mismatch, CodecCtx};
use crate::error::CodecError;
use crate::protocol::{InstantiationProtocol, MergeOp, SetterPath};

use super::{seed_value, RecordCodec};

pub(crate) fn decode_record(
    codec: &RecordCodec,
    ctx: &CodecCtx<'_>,
    reader: &mut dyn JsonReader,
) -> Result<Value, CodecError> {
    let schema = &codec.spec.schema;
    let config = schema.config();

    let mut slots: Vec<Value> = match &codec.spec.protocol {
        InstantiationProtocol::Constructor => schema
            .properties()
            .iter()
            .map(|property| seed_value(property, config))
            .collect(),
        InstantiationProtocol::Builder(protocol) => match &protocol.initial_values {
            Some(initial) => initial.clone(),
            None => schema
                .properties()
                .iter()
                .map(|property| seed_value(property, config))
                .collect(),
        },
    };

    reader.begin_object()?;
    while reader.has_next()? {
        let name = reader.next_name()?;

        // A null value never touches a property, regardless of protocol.
        if reader.peek()? == TokenKind::Null {
            reader.next_null()?;
            continue;
        }

        match codec.wire_index.get(name.as_str()).copied() {
            Some(index) => {
                let property = &schema.properties()[index];
                if property.ignore_on_decode {
                    reader.skip_value()?;
                    continue;
                }
                let property_codec = ctx.resolve(&codec.bound[index])?;
                let value = property_codec.decode(ctx, reader)?;
                apply(codec, index, value, &mut slots)?;
            }
            None => match schema.sink_index() {
                Some(sink) => {
                    let value = read_value(reader)?;
                    if !matches!(slots[sink], Value::Map(_)) {
                        slots[sink] = Value::Map(Vec::new());
                    }
                    if let Value::Map(entries) = &mut slots[sink] {
                        match entries.iter_mut().find(|(existing, _)| *existing == name) {
                            Some(entry) => entry.1 = value,
                            None => entries.push((name, value)),
                        }
                    }
                }
                None => reader.skip_value()?,
            },
        }
    }
    reader.end_object()?;

    Ok(Value::record(schema.type_name(), slots))
}

fn apply(
    codec: &RecordCodec,
    index: usize,
    value: Value,
    slots: &mut [Value],
) -> Result<(), CodecError> {
    match &codec.spec.protocol {
        InstantiationProtocol::Constructor => {
            slots[index] = value;
            Ok(())
        }
        InstantiationProtocol::Builder(protocol) => match &protocol.setters[index] {
            Some(SetterPath::Direct { .. }) => {
                slots[index] = value;
                Ok(())
            }
            Some(SetterPath::UnwrapIfPresent { .. }) => {
                if !value.is_null() {
                    slots[index] = value;
                }
                Ok(())
            }
            Some(SetterPath::SubBuilderMerge { op, .. }) => merge(slots, index, value, *op),
            None => Err(CodecError::Internal(format!(
                "no setter path resolved for decoded property `{}`",
                codec.spec.schema.properties()[index].name
            ))),
        },
    }
}

fn merge(slots: &mut [Value], index: usize, value: Value, op: MergeOp) -> Result<(), CodecError> {
    if slots[index].is_null() {
        slots[index] = value;
        return Ok(());
    }
    match op {
        MergeOp::AddAll => match (&mut slots[index], value) {
            (Value::List(existing), Value::List(items)) => {
                existing.extend(items);
                Ok(())
            }
            (Value::Set(existing), Value::Set(items)) => {
                for item in items {
                    if !existing.contains(&item) {
                        existing.push(item);
                    }
                }
                Ok(())
            }
            (_, value) => Err(mismatch("List", &value)),
        },
        MergeOp::PutAll => match (&mut slots[index], value) {
            (Value::Map(existing), Value::Map(entries)) => {
                for (name, entry) in entries {
                    match existing.iter_mut().find(|(k, _)| *k == name) {
                        Some(slot) => slot.1 = entry,
                        None => existing.push((name, entry)),
                    }
                }
                Ok(())
            }
            (_, value) => Err(mismatch("Map", &value)),
        },
    }
}
