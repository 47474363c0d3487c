//! Canonical property schema model
//!
//! A [`TypeSchema`] is the validated, immutable description of one type's
//! serializable surface: its properties in declaration order, its per-type
//! configuration, and the index of its unknown-field sink if it has one.
//!
//! Declaration order is a contract, not an implementation detail: it governs
//! wire output order and positional record construction.

use crate::descriptor::{RawType, TypeDescriptor};
use crate::error::SchemaError;
use crate::value::Value;

/// Explicit per-type configuration record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TypeConfig {
    /// The type carries the explicit opt-in marker.
    pub explicitly_applicable: bool,
    /// Suppress fields equal to the builder-default value on encode.
    pub omit_defaults: bool,
    /// Absent non-nullable collections decode to empty instances.
    pub collections_default_to_empty: bool,
}

/// One serializable property.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertySchema {
    /// Declared identifier.
    pub name: String,
    /// Logical property name used for defaulting the serialized name.
    pub human_name: String,
    /// Resolved declared type.
    pub declared: TypeDescriptor,
    /// Whether an absent/null value is acceptable.
    pub nullable: bool,
    /// Canonical wire name (defaults to `human_name`).
    pub serialized_name: String,
    /// Decode-only synonyms, in declaration order.
    pub serialized_aliases: Vec<String>,
    /// Never emit this property.
    pub ignore_on_encode: bool,
    /// Never read this property; its default is used instead.
    pub ignore_on_decode: bool,
    /// This property accumulates fields not otherwise recognized.
    pub is_unknown_field_sink: bool,
    /// Explicit default, used only when decode is skipped.
    pub default_literal: Option<Value>,
}

impl PropertySchema {
    /// All wire names that route to this property on decode.
    pub fn wire_names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.serialized_name.as_str())
            .chain(self.serialized_aliases.iter().map(String::as_str))
    }
}

/// The validated serializable surface of one type.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeSchema {
    type_name: String,
    type_param_count: usize,
    config: TypeConfig,
    properties: Vec<PropertySchema>,
    sink_index: Option<usize>,
}

impl TypeSchema {
    /// Validate and freeze a schema.
    ///
    /// Fails when wire names collide across properties, when more than one
    /// property claims the unknown-field sink role, or when the sink property
    /// is not map-typed.
    pub fn new(
        type_name: impl Into<String>,
        type_param_count: usize,
        config: TypeConfig,
        properties: Vec<PropertySchema>,
    ) -> Result<Self, SchemaError> {
        let type_name = type_name.into();

        let mut sink_index = None;
        for (index, property) in properties.iter().enumerate() {
            if property.is_unknown_field_sink {
                if sink_index.is_some() {
                    return Err(SchemaError::MultipleSinks { type_name });
                }
                match property.declared.head() {
                    Some(RawType::Map) => {}
                    _ => {
                        return Err(SchemaError::NonMapSink {
                            type_name,
                            property: property.name.clone(),
                        });
                    }
                }
                sink_index = Some(index);
            }
        }

        let mut seen = Vec::new();
        for property in &properties {
            if property.is_unknown_field_sink {
                continue;
            }
            for wire_name in property.wire_names() {
                if seen.iter().any(|existing: &&str| *existing == wire_name) {
                    return Err(SchemaError::DuplicateSerializedName {
                        type_name,
                        name: wire_name.to_string(),
                    });
                }
                seen.push(wire_name);
            }
        }

        Ok(TypeSchema {
            type_name,
            type_param_count,
            config,
            properties,
            sink_index,
        })
    }

    /// Name of the described type.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Declared type-parameter count.
    pub fn type_param_count(&self) -> usize {
        self.type_param_count
    }

    /// Per-type configuration.
    pub fn config(&self) -> &TypeConfig {
        &self.config
    }

    /// Properties in declaration order.
    pub fn properties(&self) -> &[PropertySchema] {
        &self.properties
    }

    /// Index of the unknown-field sink property, if any.
    pub fn sink_index(&self) -> Option<usize> {
        self.sink_index
    }

    /// Index of the property a wire name routes to, honoring aliases.
    ///
    /// The sink never matches by name; it only receives leftovers.
    pub fn property_for_wire_name(&self, wire_name: &str) -> Option<usize> {
        self.properties.iter().position(|property| {
            !property.is_unknown_field_sink && property.wire_names().any(|n| n == wire_name)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn property(name: &str, declared: TypeDescriptor) -> PropertySchema {
        PropertySchema {
            name: name.to_string(),
            human_name: name.to_string(),
            declared,
            nullable: false,
            serialized_name: name.to_string(),
            serialized_aliases: Vec::new(),
            ignore_on_encode: false,
            ignore_on_decode: false,
            is_unknown_field_sink: false,
            default_literal: None,
        }
    }

    fn string_map() -> TypeDescriptor {
        TypeDescriptor::Concrete(
            RawType::Map,
            vec![
                TypeDescriptor::simple(RawType::String),
                TypeDescriptor::simple(RawType::Dynamic),
            ],
        )
    }

    #[test]
    fn accepts_unique_wire_names() {
        let schema = TypeSchema::new(
            "Address",
            0,
            TypeConfig::default(),
            vec![
                property("street", TypeDescriptor::simple(RawType::String)),
                property("city", TypeDescriptor::simple(RawType::String)),
            ],
        )
        .unwrap();
        assert_eq!(schema.properties().len(), 2);
        assert_eq!(schema.property_for_wire_name("city"), Some(1));
    }

    #[test]
    fn alias_routes_to_same_property() {
        let mut street = property("street_name", TypeDescriptor::simple(RawType::String));
        street.serialized_name = "streetName".to_string();
        street.serialized_aliases = vec!["street-name".to_string()];
        let schema = TypeSchema::new("Address", 0, TypeConfig::default(), vec![street]).unwrap();
        assert_eq!(schema.property_for_wire_name("streetName"), Some(0));
        assert_eq!(schema.property_for_wire_name("street-name"), Some(0));
    }

    #[test]
    fn rejects_duplicate_wire_names() {
        let mut a = property("a", TypeDescriptor::simple(RawType::Int));
        a.serialized_aliases = vec!["b".to_string()];
        let b = property("b", TypeDescriptor::simple(RawType::Int));
        let err = TypeSchema::new("T", 0, TypeConfig::default(), vec![a, b]).unwrap_err();
        assert_eq!(
            err,
            SchemaError::DuplicateSerializedName {
                type_name: "T".to_string(),
                name: "b".to_string(),
            }
        );
    }

    #[test]
    fn rejects_second_sink() {
        let mut first = property("rest", string_map());
        first.is_unknown_field_sink = true;
        let mut second = property("more", string_map());
        second.is_unknown_field_sink = true;
        let err = TypeSchema::new("T", 0, TypeConfig::default(), vec![first, second]).unwrap_err();
        assert_eq!(
            err,
            SchemaError::MultipleSinks {
                type_name: "T".to_string()
            }
        );
    }

    #[test]
    fn rejects_non_map_sink() {
        let mut sink = property("rest", TypeDescriptor::simple(RawType::String));
        sink.is_unknown_field_sink = true;
        let err = TypeSchema::new("T", 0, TypeConfig::default(), vec![sink]).unwrap_err();
        assert_eq!(
            err,
            SchemaError::NonMapSink {
                type_name: "T".to_string(),
                property: "rest".to_string(),
            }
        );
    }

    #[test]
    fn sink_never_matches_by_name() {
        let mut sink = property("rest", string_map());
        sink.is_unknown_field_sink = true;
        let schema = TypeSchema::new("T", 0, TypeConfig::default(), vec![sink]).unwrap();
        assert_eq!(schema.sink_index(), Some(0));
        assert_eq!(schema.property_for_wire_name("rest"), None);
    }
}
