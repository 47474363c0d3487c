//! Type surfaces supplied by the metadata provider
//!
//! A [`TypeSurface`] is everything the engine knows about a type: its
//! properties with declared types and markers, its factory methods, and its
//! builder's accessor/setter/build-method candidates. Surfaces are plain
//! data built ahead of time; the engine never inspects live objects.
//!
//! Declared types arrive as [`TypeRef`] syntax trees and are lowered to
//! resolved descriptors by the generic binder.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use forge_core::{BoundKind, TypeConfig, Value};

/// A declared-type syntax tree, before binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeRef {
    /// A named head type with type arguments.
    Named(String, Vec<TypeRef>),
    /// A reference to the enclosing type's `index`-th type parameter.
    Param(usize),
    /// A wildcard. More than one bound is representable here and rejected by
    /// the binder.
    Wildcard {
        /// The declared bounds.
        bounds: Vec<TypeRef>,
        /// Whether the bounds are upper or lower bounds.
        direction: BoundKind,
    },
}

impl TypeRef {
    /// An argument-free named type.
    pub fn named(name: impl Into<String>) -> Self {
        TypeRef::Named(name.into(), Vec::new())
    }

    /// A named type with arguments.
    pub fn of(name: impl Into<String>, args: Vec<TypeRef>) -> Self {
        TypeRef::Named(name.into(), args)
    }

    /// A type-parameter reference.
    pub fn param(index: usize) -> Self {
        TypeRef::Param(index)
    }
}

/// A static factory method, inspected by the applicability analyzer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FactorySurface {
    /// Method name.
    pub name: String,
    /// Whether the method is visible outside the type.
    pub non_private: bool,
    /// Whether the method is static.
    pub is_static: bool,
    /// Declared return type.
    pub returns: TypeRef,
}

impl FactorySurface {
    /// A non-private static factory returning `returns`.
    pub fn new(name: impl Into<String>, returns: TypeRef) -> Self {
        FactorySurface {
            name: name.into(),
            non_private: true,
            is_static: true,
            returns,
        }
    }

    /// Mark the factory private.
    pub fn private(mut self) -> Self {
        self.non_private = false;
        self
    }
}

/// One declared property, before binding.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertySurface {
    /// Declared identifier.
    pub name: String,
    /// Logical property name; defaults the serialized name.
    pub human_name: String,
    /// Declared type.
    pub declared: TypeRef,
    /// Whether an absent/null value is acceptable.
    pub nullable: bool,
    /// Explicit serialized name from the name-with-alternates marker.
    pub serialized_name: Option<String>,
    /// Decode-only synonyms from the name-with-alternates marker.
    pub serialized_aliases: Vec<String>,
    /// Never emit this property.
    pub ignore_on_encode: bool,
    /// Never read this property.
    pub ignore_on_decode: bool,
    /// This property accumulates unrecognized fields.
    pub is_unknown_field_sink: bool,
    /// Explicit default, used only when decode is skipped.
    pub default_literal: Option<Value>,
}

impl PropertySurface {
    /// A plain required property.
    pub fn new(name: impl Into<String>, declared: TypeRef) -> Self {
        let name = name.into();
        PropertySurface {
            human_name: name.clone(),
            name,
            declared,
            nullable: false,
            serialized_name: None,
            serialized_aliases: Vec::new(),
            ignore_on_encode: false,
            ignore_on_decode: false,
            is_unknown_field_sink: false,
            default_literal: None,
        }
    }

    /// Accept absent/null values.
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Set the canonical wire name.
    pub fn serialized_as(mut self, name: impl Into<String>) -> Self {
        self.serialized_name = Some(name.into());
        self
    }

    /// Add a decode-only alias.
    pub fn alias(mut self, name: impl Into<String>) -> Self {
        self.serialized_aliases.push(name.into());
        self
    }

    /// Never emit this property.
    pub fn ignore_on_encode(mut self) -> Self {
        self.ignore_on_encode = true;
        self
    }

    /// Never read this property.
    pub fn ignore_on_decode(mut self) -> Self {
        self.ignore_on_decode = true;
        self
    }

    /// Mark as the unknown-field sink.
    pub fn unknown_field_sink(mut self) -> Self {
        self.is_unknown_field_sink = true;
        self
    }

    /// Supply an explicit default literal.
    pub fn default_literal(mut self, value: Value) -> Self {
        self.default_literal = Some(value);
        self
    }
}

/// A builder accessor or build-method candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodSurface {
    /// Method name.
    pub name: String,
    /// Whether the method is visible outside the type.
    pub non_private: bool,
    /// Whether the method is static.
    pub is_static: bool,
    /// Number of declared parameters.
    pub arg_count: usize,
    /// Carries the explicit single-method designation marker.
    pub designated: bool,
}

impl MethodSurface {
    /// A non-private static zero-argument method.
    pub fn static_method(name: impl Into<String>) -> Self {
        MethodSurface {
            name: name.into(),
            non_private: true,
            is_static: true,
            arg_count: 0,
            designated: false,
        }
    }

    /// A non-private instance zero-argument method.
    pub fn instance_method(name: impl Into<String>) -> Self {
        MethodSurface {
            name: name.into(),
            non_private: true,
            is_static: false,
            arg_count: 0,
            designated: false,
        }
    }

    /// Mark the method private.
    pub fn private(mut self) -> Self {
        self.non_private = false;
        self
    }

    /// Set the declared parameter count.
    pub fn args(mut self, count: usize) -> Self {
        self.arg_count = count;
        self
    }

    /// Carry the explicit designation marker.
    pub fn designated(mut self) -> Self {
        self.designated = true;
        self
    }
}

/// A builder setter candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetterSurface {
    /// Method name.
    pub name: String,
    /// Whether the setter is visible outside the builder.
    pub non_private: bool,
    /// Declared parameter type.
    pub param: TypeRef,
}

impl SetterSurface {
    /// A non-private setter taking `param`.
    pub fn new(name: impl Into<String>, param: TypeRef) -> Self {
        SetterSurface {
            name: name.into(),
            non_private: true,
            param,
        }
    }
}

/// A sub-builder accessor for a collection-typed property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubBuilderSurface {
    /// The property the nested builder belongs to.
    pub property: String,
    /// Accessor method returning the nested builder.
    pub accessor: String,
    /// The nested builder exposes an add-all operation.
    pub has_add_all: bool,
    /// The nested builder exposes a put-all operation.
    pub has_put_all: bool,
}

impl SubBuilderSurface {
    /// A sub-builder accessor with no merge operations yet.
    pub fn new(property: impl Into<String>, accessor: impl Into<String>) -> Self {
        SubBuilderSurface {
            property: property.into(),
            accessor: accessor.into(),
            has_add_all: false,
            has_put_all: false,
        }
    }

    /// The nested builder exposes add-all.
    pub fn with_add_all(mut self) -> Self {
        self.has_add_all = true;
        self
    }

    /// The nested builder exposes put-all.
    pub fn with_put_all(mut self) -> Self {
        self.has_put_all = true;
        self
    }
}

/// The staged-builder surface of a type, when it has one.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BuilderSurface {
    /// Candidates for acquiring a fresh builder.
    pub accessor_candidates: Vec<MethodSurface>,
    /// Candidates for the build method.
    pub build_candidates: Vec<MethodSurface>,
    /// Setter candidates.
    pub setters: Vec<SetterSurface>,
    /// Sub-builder accessors.
    pub sub_builders: Vec<SubBuilderSurface>,
    /// The default-valued builder's per-property initial values, aligned with
    /// the property declaration order. Required for omit-defaults encoding.
    pub initial_values: Option<Vec<Value>>,
    /// Names of properties that expose a builder-side getter.
    pub property_getters: Vec<String>,
}

impl BuilderSurface {
    /// An empty builder surface.
    pub fn new() -> Self {
        BuilderSurface::default()
    }

    /// Add an accessor candidate.
    pub fn accessor(mut self, method: MethodSurface) -> Self {
        self.accessor_candidates.push(method);
        self
    }

    /// Add a build-method candidate.
    pub fn build_method(mut self, method: MethodSurface) -> Self {
        self.build_candidates.push(method);
        self
    }

    /// Add a setter candidate.
    pub fn setter(mut self, setter: SetterSurface) -> Self {
        self.setters.push(setter);
        self
    }

    /// Add a sub-builder accessor.
    pub fn sub_builder(mut self, sub: SubBuilderSurface) -> Self {
        self.sub_builders.push(sub);
        self
    }

    /// Supply the default-valued builder's initial values.
    pub fn initial_values(mut self, values: Vec<Value>) -> Self {
        self.initial_values = Some(values);
        self
    }

    /// Record that a property exposes a builder-side getter.
    pub fn property_getter(mut self, property: impl Into<String>) -> Self {
        self.property_getters.push(property.into());
        self
    }
}

/// Everything the metadata provider yields for one type.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeSurface {
    /// Type name.
    pub name: String,
    /// Declared type-parameter count.
    pub type_param_count: usize,
    /// Explicit per-type configuration.
    pub config: TypeConfig,
    /// Static factory methods, for applicability-by-convention.
    pub factories: Vec<FactorySurface>,
    /// Properties in declaration order.
    pub properties: Vec<PropertySurface>,
    /// Builder surface, when the type is builder-based.
    pub builder: Option<BuilderSurface>,
}

impl TypeSurface {
    /// A non-generic type with default configuration.
    pub fn new(name: impl Into<String>) -> Self {
        TypeSurface {
            name: name.into(),
            type_param_count: 0,
            config: TypeConfig::default(),
            factories: Vec::new(),
            properties: Vec::new(),
            builder: None,
        }
    }

    /// Set the declared type-parameter count.
    pub fn type_params(mut self, count: usize) -> Self {
        self.type_param_count = count;
        self
    }

    /// Replace the configuration record.
    pub fn config(mut self, config: TypeConfig) -> Self {
        self.config = config;
        self
    }

    /// Shorthand for the explicit opt-in marker.
    pub fn explicitly_applicable(mut self) -> Self {
        self.config.explicitly_applicable = true;
        self
    }

    /// Add a property.
    pub fn property(mut self, property: PropertySurface) -> Self {
        self.properties.push(property);
        self
    }

    /// Add a factory method.
    pub fn factory(mut self, factory: FactorySurface) -> Self {
        self.factories.push(factory);
        self
    }

    /// Attach a builder surface.
    pub fn builder(mut self, builder: BuilderSurface) -> Self {
        self.builder = Some(builder);
        self
    }
}

/// Source of type surfaces, consulted once per type.
pub trait SchemaProvider: Send + Sync {
    /// The surface for `type_name`, if the provider knows the type.
    fn surface(&self, type_name: &str) -> Option<Arc<TypeSurface>>;
}

/// In-memory provider populated at startup.
#[derive(Default)]
pub struct StaticProvider {
    types: FxHashMap<String, Arc<TypeSurface>>,
}

impl StaticProvider {
    /// An empty provider.
    pub fn new() -> Self {
        StaticProvider::default()
    }

    /// Register a surface, replacing any previous one with the same name.
    pub fn register(&mut self, surface: TypeSurface) {
        self.types.insert(surface.name.clone(), Arc::new(surface));
    }

    /// Number of registered types.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Whether no types are registered.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl SchemaProvider for StaticProvider {
    fn surface(&self, type_name: &str) -> Option<Arc<TypeSurface>> {
        self.types.get(type_name).cloned()
    }
}
