//! End-to-end codec synthesis scenarios
//!
//! Each module exercises one contract of the synthesis engine through the
//! public facade: naming and aliases, unknown-field passthrough, builder
//! setter paths, generic binding, cyclic schemas, defaults, and the
//! binding-time error taxonomy.

use codecforge::prelude::*;
use codecforge::{RawType, SchemaError, TypeBindingError, WarningKind};

fn string_list() -> TypeRef {
    TypeRef::of("List", vec![TypeRef::named("String")])
}

fn sink_map() -> TypeRef {
    TypeRef::of(
        "Map",
        vec![TypeRef::named("String"), TypeRef::named("Dynamic")],
    )
}

// ============================================================================
// Naming and aliases
// ============================================================================

mod naming {
    use super::*;

    #[test]
    fn explicit_serialized_name_round_trips_exactly() {
        let forge = ForgeBuilder::new()
            .register(
                TypeSurface::new("Address")
                    .explicitly_applicable()
                    .property(
                        PropertySurface::new("street_name", TypeRef::named("String"))
                            .serialized_as("street-name"),
                    )
                    .property(PropertySurface::new("city", TypeRef::named("String"))),
            )
            .build();
        let codec = forge.codec("Address").unwrap();

        let input = r#"{"street-name":"Main","city":"Springfield"}"#;
        let value = codec.decode_str(input).unwrap();
        assert_eq!(
            value,
            Value::record(
                "Address",
                vec![
                    Value::String("Main".to_string()),
                    Value::String("Springfield".to_string()),
                ]
            )
        );
        assert_eq!(codec.encode_to_string(&value).unwrap(), input);
    }

    #[test]
    fn aliases_converge_and_encode_emits_canonical_name() {
        let forge = ForgeBuilder::new()
            .register(
                TypeSurface::new("Address")
                    .explicitly_applicable()
                    .property(
                        PropertySurface::new("street", TypeRef::named("String"))
                            .serialized_as("streetName")
                            .alias("street-name")
                            .alias("street_name"),
                    ),
            )
            .build();
        let codec = forge.codec("Address").unwrap();

        for input in [
            r#"{"streetName":"Main"}"#,
            r#"{"street-name":"Main"}"#,
            r#"{"street_name":"Main"}"#,
        ] {
            let value = codec.decode_str(input).unwrap();
            assert_eq!(
                value,
                Value::record("Address", vec![Value::String("Main".to_string())])
            );
            assert_eq!(
                codec.encode_to_string(&value).unwrap(),
                r#"{"streetName":"Main"}"#
            );
        }
    }

    #[test]
    fn duplicate_wire_names_fail_schema_resolution() {
        let forge = ForgeBuilder::new()
            .register(
                TypeSurface::new("Clash")
                    .explicitly_applicable()
                    .property(PropertySurface::new("a", TypeRef::named("Int")).alias("b"))
                    .property(PropertySurface::new("b", TypeRef::named("Int"))),
            )
            .build();
        match forge.codec("Clash").unwrap_err() {
            Error::Schema(SchemaError::DuplicateSerializedName { name, .. }) => {
                assert_eq!(name, "b");
            }
            other => panic!("expected duplicate-name error, got {other:?}"),
        }
    }
}

// ============================================================================
// Unknown-field sink
// ============================================================================

mod sink {
    use super::*;

    fn forge() -> Forge {
        ForgeBuilder::new()
            .register(
                TypeSurface::new("Payload")
                    .explicitly_applicable()
                    .property(PropertySurface::new("knownField", TypeRef::named("Int")))
                    .property(
                        PropertySurface::new("unrecognised", super::sink_map()).unknown_field_sink(),
                    ),
            )
            .build()
    }

    #[test]
    fn unknown_fields_are_captured_and_reemitted_verbatim() {
        let codec = forge().codec("Payload").unwrap();
        let input = r#"{"knownField":9,"extra":7,"flag":true}"#;
        let value = codec.decode_str(input).unwrap();
        assert_eq!(
            value,
            Value::record(
                "Payload",
                vec![
                    Value::Int(9),
                    Value::Map(vec![
                        ("extra".to_string(), Value::Int(7)),
                        ("flag".to_string(), Value::Bool(true)),
                    ]),
                ]
            )
        );
        assert_eq!(codec.encode_to_string(&value).unwrap(), input);
    }

    #[test]
    fn structured_unknown_fields_preserve_shape_and_order() {
        let codec = forge().codec("Payload").unwrap();
        let input = r#"{"knownField":1,"z":{"b":[1,2.5,"x"],"a":null},"y":[{"k":"v"}]}"#;
        let value = codec.decode_str(input).unwrap();
        let output = codec.encode_to_string(&value).unwrap();
        assert_eq!(output, input);
        // The re-emitted text is well-formed JSON, not just byte-equal.
        let reparsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(reparsed, serde_json::from_str::<serde_json::Value>(input).unwrap());
    }

    #[test]
    fn null_valued_unknown_fields_are_not_captured() {
        let codec = forge().codec("Payload").unwrap();
        let value = codec
            .decode_str(r#"{"knownField":1,"extra":null}"#)
            .unwrap();
        assert_eq!(
            value,
            Value::record("Payload", vec![Value::Int(1), Value::Null])
        );
        assert_eq!(
            codec.encode_to_string(&value).unwrap(),
            r#"{"knownField":1}"#
        );
    }

    #[test]
    fn without_a_sink_unknown_fields_are_skipped() {
        let forge = ForgeBuilder::new()
            .register(
                TypeSurface::new("Plain")
                    .explicitly_applicable()
                    .property(PropertySurface::new("x", TypeRef::named("Int"))),
            )
            .build();
        let codec = forge.codec("Plain").unwrap();
        let value = codec
            .decode_str(r#"{"x":1,"junk":{"deep":[1,2],"more":"s"}}"#)
            .unwrap();
        assert_eq!(value, Value::record("Plain", vec![Value::Int(1)]));
        assert_eq!(codec.encode_to_string(&value).unwrap(), r#"{"x":1}"#);
    }
}

// ============================================================================
// Builder setter paths
// ============================================================================

mod builder {
    use super::*;

    #[test]
    fn optional_property_uses_unwrapped_setter_only_when_present() {
        let forge = ForgeBuilder::new()
            .register(
                TypeSurface::new("Profile")
                    .explicitly_applicable()
                    .property(PropertySurface::new(
                        "note",
                        TypeRef::of("Optional", vec![TypeRef::named("String")]),
                    ))
                    .builder(
                        BuilderSurface::new()
                            .accessor(MethodSurface::static_method("builder"))
                            .build_method(MethodSurface::instance_method("build"))
                            .setter(SetterSurface::new("note", TypeRef::named("String")))
                            .initial_values(vec![Value::String("unset".to_string())]),
                    ),
            )
            .build();
        let codec = forge.codec("Profile").unwrap();

        // Absent: the builder's own default survives.
        let value = codec.decode_str("{}").unwrap();
        assert_eq!(
            value,
            Value::record("Profile", vec![Value::String("unset".to_string())])
        );

        // Null token: consumed without touching the property.
        let value = codec.decode_str(r#"{"note":null}"#).unwrap();
        assert_eq!(
            value,
            Value::record("Profile", vec![Value::String("unset".to_string())])
        );

        // Present: the unwrapped setter is invoked with the inner value.
        let value = codec.decode_str(r#"{"note":"x"}"#).unwrap();
        assert_eq!(
            value,
            Value::record("Profile", vec![Value::String("x".to_string())])
        );
    }

    #[test]
    fn list_property_reaches_builder_through_add_all_merge() {
        let forge = ForgeBuilder::new()
            .register(
                TypeSurface::new("Bag")
                    .explicitly_applicable()
                    .property(PropertySurface::new("items", super::string_list()))
                    .builder(
                        BuilderSurface::new()
                            .accessor(MethodSurface::static_method("builder"))
                            .build_method(MethodSurface::instance_method("build"))
                            .sub_builder(
                                SubBuilderSurface::new("items", "itemsBuilder").with_add_all(),
                            ),
                    ),
            )
            .build();
        let codec = forge.codec("Bag").unwrap();
        let value = codec.decode_str(r#"{"items":["a","b"]}"#).unwrap();
        assert_eq!(
            value,
            Value::record(
                "Bag",
                vec![Value::List(vec![
                    Value::String("a".to_string()),
                    Value::String("b".to_string()),
                ])]
            )
        );
    }

    #[test]
    fn map_property_reaches_builder_through_put_all_merge() {
        let forge = ForgeBuilder::new()
            .register(
                TypeSurface::new("Labels")
                    .explicitly_applicable()
                    .property(PropertySurface::new(
                        "labels",
                        TypeRef::of(
                            "Map",
                            vec![TypeRef::named("String"), TypeRef::named("String")],
                        ),
                    ))
                    .builder(
                        BuilderSurface::new()
                            .accessor(MethodSurface::static_method("builder"))
                            .build_method(MethodSurface::instance_method("build"))
                            .sub_builder(
                                SubBuilderSurface::new("labels", "labelsBuilder").with_put_all(),
                            )
                            .initial_values(vec![Value::Map(vec![(
                                "env".to_string(),
                                Value::String("dev".to_string()),
                            )])]),
                    ),
            )
            .build();
        let codec = forge.codec("Labels").unwrap();
        // Decoded entries merge into the builder's initial map, last wins.
        let value = codec
            .decode_str(r#"{"labels":{"env":"prod","tier":"web"}}"#)
            .unwrap();
        assert_eq!(
            value,
            Value::record(
                "Labels",
                vec![Value::Map(vec![
                    ("env".to_string(), Value::String("prod".to_string())),
                    ("tier".to_string(), Value::String("web".to_string())),
                ])]
            )
        );
    }

    #[test]
    fn ambiguous_builder_access_is_a_schema_error() {
        let forge = ForgeBuilder::new()
            .register(
                TypeSurface::new("T")
                    .explicitly_applicable()
                    .property(PropertySurface::new("x", TypeRef::named("Int")))
                    .builder(
                        BuilderSurface::new()
                            .accessor(MethodSurface::static_method("builder"))
                            .accessor(MethodSurface::static_method("newBuilder"))
                            .build_method(MethodSurface::instance_method("build"))
                            .setter(SetterSurface::new("x", TypeRef::named("Int"))),
                    ),
            )
            .build();
        match forge.codec("T").unwrap_err() {
            Error::Schema(SchemaError::AmbiguousBuilderAccess { candidates, .. }) => {
                assert_eq!(candidates, 2);
            }
            other => panic!("expected ambiguous-builder-access error, got {other:?}"),
        }
    }
}

// ============================================================================
// Generic binding
// ============================================================================

mod generics {
    use super::*;

    fn trio_forge() -> Forge {
        ForgeBuilder::new()
            .register(
                TypeSurface::new("Trio")
                    .explicitly_applicable()
                    .type_params(3)
                    .property(PropertySurface::new("a", TypeRef::param(0)))
                    .property(PropertySurface::new("b", TypeRef::param(1)))
                    .property(PropertySurface::new("c", TypeRef::param(2))),
            )
            .build()
    }

    fn trio_args() -> Vec<TypeDescriptor> {
        vec![
            TypeDescriptor::simple(RawType::Int),
            TypeDescriptor::simple(RawType::String),
            TypeDescriptor::Concrete(
                RawType::List,
                vec![TypeDescriptor::simple(RawType::String)],
            ),
        ]
    }

    #[test]
    fn variables_decode_with_their_bound_codecs() {
        let forge = trio_forge();
        let codec = forge.codec_with("Trio", &trio_args()).unwrap();
        let value = codec
            .decode_str(r#"{"a":1,"b":"x","c":["y","z"]}"#)
            .unwrap();
        assert_eq!(
            value,
            Value::record(
                "Trio",
                vec![
                    Value::Int(1),
                    Value::String("x".to_string()),
                    Value::List(vec![
                        Value::String("y".to_string()),
                        Value::String("z".to_string()),
                    ]),
                ]
            )
        );
        assert_eq!(
            codec.encode_to_string(&value).unwrap(),
            r#"{"a":1,"b":"x","c":["y","z"]}"#
        );
    }

    #[test]
    fn bound_codecs_enforce_their_types() {
        let forge = trio_forge();
        let codec = forge.codec_with("Trio", &trio_args()).unwrap();
        // `a` is bound to Int; a string is a protocol violation, not a
        // generic fallback.
        assert!(matches!(
            codec.decode_str(r#"{"a":"oops","b":"x","c":[]}"#),
            Err(Error::Protocol(_))
        ));
    }

    #[test]
    fn argument_arity_is_enforced() {
        let forge = trio_forge();
        match forge
            .codec_with("Trio", &[TypeDescriptor::simple(RawType::Int)])
            .unwrap_err()
        {
            Error::Binding(TypeBindingError::ArityMismatch {
                expected, actual, ..
            }) => {
                assert_eq!((expected, actual), (3, 1));
            }
            other => panic!("expected arity error, got {other:?}"),
        }
    }

    #[test]
    fn sibling_bindings_are_independent() {
        let forge = trio_forge();
        let ints = forge
            .codec_with(
                "Trio",
                &[
                    TypeDescriptor::simple(RawType::Int),
                    TypeDescriptor::simple(RawType::Int),
                    TypeDescriptor::simple(RawType::Int),
                ],
            )
            .unwrap();
        let strings = forge
            .codec_with(
                "Trio",
                &[
                    TypeDescriptor::simple(RawType::String),
                    TypeDescriptor::simple(RawType::String),
                    TypeDescriptor::simple(RawType::String),
                ],
            )
            .unwrap();
        assert!(ints.decode_str(r#"{"a":1,"b":2,"c":3}"#).is_ok());
        assert!(strings.decode_str(r#"{"a":"1","b":"2","c":"3"}"#).is_ok());
        assert!(strings.decode_str(r#"{"a":1,"b":2,"c":3}"#).is_err());
    }
}

// ============================================================================
// Cyclic type graphs
// ============================================================================

mod recursion {
    use super::*;

    #[test]
    fn self_referential_schema_round_trips() {
        let forge = ForgeBuilder::new()
            .register(
                TypeSurface::new("TreeNode")
                    .explicitly_applicable()
                    .property(PropertySurface::new("value", TypeRef::named("Int")))
                    .property(PropertySurface::new(
                        "children",
                        TypeRef::of("List", vec![TypeRef::named("TreeNode")]),
                    )),
            )
            .build();
        let codec = forge.codec("TreeNode").unwrap();

        let leaf = |v: i64| Value::record("TreeNode", vec![Value::Int(v), Value::List(vec![])]);
        let tree = Value::record(
            "TreeNode",
            vec![
                Value::Int(1),
                Value::List(vec![
                    leaf(2),
                    Value::record("TreeNode", vec![Value::Int(3), Value::List(vec![leaf(4)])]),
                ]),
            ],
        );
        let json = codec.encode_to_string(&tree).unwrap();
        assert_eq!(
            json,
            r#"{"value":1,"children":[{"value":2,"children":[]},{"value":3,"children":[{"value":4,"children":[]}]}]}"#
        );
        assert_eq!(codec.decode_str(&json).unwrap(), tree);
    }

    #[test]
    fn mutually_referential_schemas_round_trip() {
        let forge = ForgeBuilder::new()
            .register(
                TypeSurface::new("Author")
                    .explicitly_applicable()
                    .property(PropertySurface::new("name", TypeRef::named("String")))
                    .property(PropertySurface::new(
                        "posts",
                        TypeRef::of("List", vec![TypeRef::named("Post")]),
                    )),
            )
            .register(
                TypeSurface::new("Post")
                    .explicitly_applicable()
                    .property(PropertySurface::new("title", TypeRef::named("String")))
                    .property(
                        PropertySurface::new("author", TypeRef::named("Author")).nullable(),
                    ),
            )
            .build();
        let codec = forge.codec("Author").unwrap();

        let value = Value::record(
            "Author",
            vec![
                Value::String("ada".to_string()),
                Value::List(vec![Value::record(
                    "Post",
                    vec![Value::String("hello".to_string()), Value::Null],
                )]),
            ],
        );
        let json = codec.encode_to_string(&value).unwrap();
        assert_eq!(codec.decode_str(&json).unwrap(), value);
    }
}

// ============================================================================
// Defaults and null preservation
// ============================================================================

mod defaults {
    use super::*;

    #[test]
    fn absent_primitives_decode_to_zero_values() {
        let forge = ForgeBuilder::new()
            .register(
                TypeSurface::new("Counts")
                    .explicitly_applicable()
                    .property(PropertySurface::new("n", TypeRef::named("Int")))
                    .property(PropertySurface::new("ratio", TypeRef::named("Float")))
                    .property(PropertySurface::new("on", TypeRef::named("Bool")))
                    .property(PropertySurface::new("initial", TypeRef::named("Char"))),
            )
            .build();
        let codec = forge.codec("Counts").unwrap();
        let value = codec.decode_str("{}").unwrap();
        assert_eq!(
            value,
            Value::record(
                "Counts",
                vec![
                    Value::Int(0),
                    Value::Float(0.0),
                    Value::Bool(false),
                    Value::Char('\0'),
                ]
            )
        );
    }

    #[test]
    fn nullable_property_encodes_null_and_decodes_back_to_absent() {
        let forge = ForgeBuilder::new()
            .register(
                TypeSurface::new("Note")
                    .explicitly_applicable()
                    .property(PropertySurface::new("id", TypeRef::named("Int")))
                    .property(PropertySurface::new("text", TypeRef::named("String")).nullable()),
            )
            .build();
        let codec = forge.codec("Note").unwrap();
        let value = Value::record("Note", vec![Value::Int(1), Value::Null]);
        let json = codec.encode_to_string(&value).unwrap();
        assert_eq!(json, r#"{"id":1,"text":null}"#);
        assert_eq!(codec.decode_str(&json).unwrap(), value);
    }

    #[test]
    fn default_literal_overrides_the_zero_value() {
        let forge = ForgeBuilder::new()
            .register(
                TypeSurface::new("Retry")
                    .explicitly_applicable()
                    .property(
                        PropertySurface::new("attempts", TypeRef::named("Int"))
                            .default_literal(Value::Int(3)),
                    ),
            )
            .build();
        let codec = forge.codec("Retry").unwrap();
        assert_eq!(
            codec.decode_str("{}").unwrap(),
            Value::record("Retry", vec![Value::Int(3)])
        );
    }

    #[test]
    fn collections_default_to_empty_when_enabled() {
        let forge = ForgeBuilder::new()
            .register(
                TypeSurface::new("Tags")
                    .config(TypeConfig {
                        explicitly_applicable: true,
                        omit_defaults: false,
                        collections_default_to_empty: true,
                    })
                    .property(PropertySurface::new("tags", super::string_list())),
            )
            .build();
        let codec = forge.codec("Tags").unwrap();
        assert_eq!(
            codec.decode_str("{}").unwrap(),
            Value::record("Tags", vec![Value::List(vec![])])
        );
    }

    #[test]
    fn ignored_required_property_without_default_is_rejected() {
        let forge = ForgeBuilder::new()
            .register(
                TypeSurface::new("Bad")
                    .explicitly_applicable()
                    .property(
                        PropertySurface::new("token", TypeRef::named("String")).ignore_on_decode(),
                    ),
            )
            .build();
        assert!(matches!(
            forge.codec("Bad").unwrap_err(),
            Error::Schema(SchemaError::IgnoredWithoutDefault { .. })
        ));
    }

    #[test]
    fn omit_defaults_suppresses_fields_equal_to_the_builder_default() {
        let forge = ForgeBuilder::new()
            .register(
                TypeSurface::new("Job")
                    .config(TypeConfig {
                        explicitly_applicable: true,
                        omit_defaults: true,
                        collections_default_to_empty: false,
                    })
                    .property(PropertySurface::new("retries", TypeRef::named("Int")))
                    .property(PropertySurface::new("label", TypeRef::named("String")))
                    .builder(
                        BuilderSurface::new()
                            .accessor(MethodSurface::static_method("builder"))
                            .build_method(MethodSurface::instance_method("build"))
                            .setter(SetterSurface::new("retries", TypeRef::named("Int")))
                            .setter(SetterSurface::new("label", TypeRef::named("String")))
                            .initial_values(vec![
                                Value::Int(3),
                                Value::String("none".to_string()),
                            ])
                            .property_getter("retries")
                            .property_getter("label"),
                    ),
            )
            .build();
        let codec = forge.codec("Job").unwrap();

        let value = Value::record(
            "Job",
            vec![Value::Int(3), Value::String("x".to_string())],
        );
        // `retries` equals the default-valued builder; it is suppressed and
        // reproduced on decode.
        let json = codec.encode_to_string(&value).unwrap();
        assert_eq!(json, r#"{"label":"x"}"#);
        assert_eq!(codec.decode_str(&json).unwrap(), value);
    }
}

// ============================================================================
// Lazy property-codec construction
// ============================================================================

mod laziness {
    use super::*;

    // A property typed by an unregistered record only fails once a present
    // value actually needs its codec; absent values never construct it.
    fn forge() -> Forge {
        ForgeBuilder::new()
            .register(
                TypeSurface::new("Holder")
                    .explicitly_applicable()
                    .property(PropertySurface::new("id", TypeRef::named("Int")))
                    .property(
                        PropertySurface::new("extra", TypeRef::named("Ghost")).nullable(),
                    ),
            )
            .build()
    }

    #[test]
    fn absent_values_encode_null_without_building_the_codec() {
        let codec = forge().codec("Holder").unwrap();
        let value = Value::record("Holder", vec![Value::Int(1), Value::Null]);
        assert_eq!(
            codec.encode_to_string(&value).unwrap(),
            r#"{"id":1,"extra":null}"#
        );
    }

    #[test]
    fn present_values_construct_the_codec_and_surface_its_failure() {
        let codec = forge().codec("Holder").unwrap();
        let value = Value::record(
            "Holder",
            vec![Value::Int(1), Value::record("Ghost", vec![])],
        );
        assert!(matches!(
            codec.encode_to_string(&value).unwrap_err(),
            Error::Binding(TypeBindingError::UnknownType { .. })
        ));
    }
}

// ============================================================================
// Applicability
// ============================================================================

mod applicability {
    use super::*;

    fn codec_of(subject: TypeRef) -> TypeRef {
        TypeRef::of("Codec", vec![subject])
    }

    #[test]
    fn factory_convention_opts_in_without_a_marker() {
        let forge = ForgeBuilder::new()
            .register(
                TypeSurface::new("Point")
                    .factory(FactorySurface::new("codec", codec_of(TypeRef::named("Point"))))
                    .property(PropertySurface::new("x", TypeRef::named("Int"))),
            )
            .build();
        assert!(forge.codec("Point").is_ok());
        assert!(forge.warnings().is_empty());
    }

    #[test]
    fn mismatched_factory_warns_and_skips_the_type() {
        // Warnings also go to the log; keep it visible under --nocapture.
        tracing_subscriber::fmt().try_init().ok();
        let forge = ForgeBuilder::new()
            .register(
                TypeSurface::new("Point")
                    .factory(FactorySurface::new("codec", codec_of(TypeRef::named("Other"))))
                    .property(PropertySurface::new("x", TypeRef::named("Int"))),
            )
            .build();
        assert!(matches!(
            forge.codec("Point").unwrap_err(),
            Error::Binding(TypeBindingError::NotApplicable { .. })
        ));
        let warnings = forge.warnings();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].kind, WarningKind::MismatchedFactoryReturn);
    }

    #[test]
    fn raw_factory_warns_with_its_own_kind() {
        let forge = ForgeBuilder::new()
            .register(
                TypeSurface::new("Point")
                    .factory(FactorySurface::new("codec", TypeRef::named("Codec")))
                    .property(PropertySurface::new("x", TypeRef::named("Int"))),
            )
            .build();
        assert!(forge.codec("Point").is_err());
        assert_eq!(forge.warnings()[0].kind, WarningKind::RawFactory);
    }

    #[test]
    fn skipped_types_do_not_affect_siblings() {
        let forge = ForgeBuilder::new()
            .register(
                TypeSurface::new("Bad")
                    .factory(FactorySurface::new("codec", codec_of(TypeRef::named("Other"))))
                    .property(PropertySurface::new("x", TypeRef::named("Int"))),
            )
            .register(
                TypeSurface::new("Good")
                    .explicitly_applicable()
                    .property(PropertySurface::new("x", TypeRef::named("Int"))),
            )
            .build();
        assert!(forge.codec("Bad").is_err());
        assert!(forge.codec("Good").is_ok());
    }

    #[test]
    fn unregistered_types_are_unknown() {
        let forge = ForgeBuilder::new().build();
        assert!(matches!(
            forge.codec("Ghost").unwrap_err(),
            Error::Binding(TypeBindingError::UnknownType { .. })
        ));
    }
}

// ============================================================================
// Ignore markers
// ============================================================================

mod ignore_markers {
    use super::*;

    #[test]
    fn ignore_on_encode_reads_but_never_writes() {
        let forge = ForgeBuilder::new()
            .register(
                TypeSurface::new("Secretive")
                    .explicitly_applicable()
                    .property(PropertySurface::new("visible", TypeRef::named("Int")))
                    .property(
                        PropertySurface::new("hidden", TypeRef::named("String"))
                            .nullable()
                            .ignore_on_encode(),
                    ),
            )
            .build();
        let codec = forge.codec("Secretive").unwrap();
        let value = codec
            .decode_str(r#"{"visible":1,"hidden":"s"}"#)
            .unwrap();
        assert_eq!(
            value,
            Value::record(
                "Secretive",
                vec![Value::Int(1), Value::String("s".to_string())]
            )
        );
        assert_eq!(codec.encode_to_string(&value).unwrap(), r#"{"visible":1}"#);
    }

    #[test]
    fn ignore_on_decode_skips_the_field_and_keeps_the_default() {
        let forge = ForgeBuilder::new()
            .register(
                TypeSurface::new("Stamped")
                    .explicitly_applicable()
                    .property(PropertySurface::new("id", TypeRef::named("Int")))
                    .property(
                        PropertySurface::new("stamp", TypeRef::named("Int"))
                            .ignore_on_decode()
                            .default_literal(Value::Int(7)),
                    ),
            )
            .build();
        let codec = forge.codec("Stamped").unwrap();
        let value = codec.decode_str(r#"{"id":1,"stamp":999}"#).unwrap();
        assert_eq!(
            value,
            Value::record("Stamped", vec![Value::Int(1), Value::Int(7)])
        );
    }
}

// ============================================================================
// Malformed input
// ============================================================================

mod malformed {
    use super::*;

    #[test]
    fn malformed_documents_fail_without_partial_results() {
        let forge = ForgeBuilder::new()
            .register(
                TypeSurface::new("Point")
                    .explicitly_applicable()
                    .property(PropertySurface::new("x", TypeRef::named("Int"))),
            )
            .build();
        let codec = forge.codec("Point").unwrap();
        for bad in [
            r#"{"x":}"#,
            r#"{"x":1"#,
            r#"{"x" 1}"#,
            r#"[1]"#,
            r#"{"x":1}}"#,
        ] {
            assert!(
                matches!(codec.decode_str(bad), Err(Error::Protocol(_))),
                "input `{bad}` must fail as a protocol violation"
            );
        }
    }
}
