//! Instantiation protocol resolution
//!
//! Constructor-based types construct positionally in declaration order and
//! need no resolution. Builder-based types resolve, per property, one of
//! three setter paths, in stage order:
//!
//! 1. a setter whose parameter is assignable-from the property's erased type
//! 2. for optional-wrapper properties, a setter accepting the unwrapped
//!    inner type (invoked only when the wrapper is present)
//! 3. a sub-builder accessor whose nested builder exposes add-all or put-all
//!
//! Builder acquisition and the build method must each resolve to exactly one
//! candidate (or one carrying the explicit designation marker).

use forge_core::{PropertySchema, RawType, SchemaError, TypeDescriptor, TypeSchema, Value};

use crate::surface::{BuilderSurface, MethodSurface, SetterSurface, TypeRef, TypeSurface};

/// Collection merge operation exposed by a nested builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOp {
    /// Extend a list- or set-typed property.
    AddAll,
    /// Merge entries into a map-typed property.
    PutAll,
}

/// How a decoded value reaches its property on a builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetterPath {
    /// Call the setter with the decoded value.
    Direct {
        /// The resolved setter method.
        setter: String,
    },
    /// Call the setter with the unwrapped value, only when present.
    UnwrapIfPresent {
        /// The resolved setter method.
        setter: String,
    },
    /// Merge the decoded collection through the nested builder.
    SubBuilderMerge {
        /// The sub-builder accessor.
        accessor: String,
        /// Which merge operation the nested builder exposes.
        op: MergeOp,
    },
}

/// Builder-based construction, fully resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct BuilderProtocol {
    /// Resolved builder accessor.
    pub acquire: String,
    /// Resolved build method.
    pub build: String,
    /// Per-property setter paths, `None` for sink and decode-ignored
    /// properties.
    pub setters: Vec<Option<SetterPath>>,
    /// The default-valued builder's initial values, when obtainable.
    pub initial_values: Option<Vec<Value>>,
    /// Per-property builder-side getter availability.
    pub getters: Vec<bool>,
}

/// How instances of a type are constructed during decode.
#[derive(Debug, Clone, PartialEq)]
pub enum InstantiationProtocol {
    /// Direct positional construction in property declaration order.
    Constructor,
    /// Staged construction through a builder.
    Builder(BuilderProtocol),
}

/// Resolve the instantiation protocol for a type.
pub fn resolve(
    surface: &TypeSurface,
    schema: &TypeSchema,
) -> Result<InstantiationProtocol, SchemaError> {
    let builder = match &surface.builder {
        None => return Ok(InstantiationProtocol::Constructor),
        Some(builder) => builder,
    };

    let acquire = pick_method(&builder.accessor_candidates, true).ok_or_else(|| {
        SchemaError::AmbiguousBuilderAccess {
            type_name: schema.type_name().to_string(),
            candidates: viable_count(&builder.accessor_candidates, true),
        }
    })?;
    let build = pick_method(&builder.build_candidates, false).ok_or_else(|| {
        SchemaError::AmbiguousBuildMethod {
            type_name: schema.type_name().to_string(),
            candidates: viable_count(&builder.build_candidates, false),
        }
    })?;

    let mut setters = Vec::with_capacity(schema.properties().len());
    for property in schema.properties() {
        if property.is_unknown_field_sink || property.ignore_on_decode {
            setters.push(None);
            continue;
        }
        setters.push(Some(resolve_setter_path(
            builder,
            property,
            schema.type_name(),
        )?));
    }

    let getters = schema
        .properties()
        .iter()
        .map(|property| builder.property_getters.iter().any(|g| g == &property.name))
        .collect();

    Ok(InstantiationProtocol::Builder(BuilderProtocol {
        acquire,
        build,
        setters,
        initial_values: builder.initial_values.clone(),
        getters,
    }))
}

fn viable(candidate: &MethodSurface, want_static: bool) -> bool {
    candidate.non_private && candidate.is_static == want_static && candidate.arg_count == 0
}

fn viable_count(candidates: &[MethodSurface], want_static: bool) -> usize {
    candidates.iter().filter(|c| viable(c, want_static)).count()
}

// Exactly one viable candidate, or exactly one viable designated candidate.
fn pick_method(candidates: &[MethodSurface], want_static: bool) -> Option<String> {
    let viable: Vec<&MethodSurface> = candidates
        .iter()
        .filter(|c| self::viable(c, want_static))
        .collect();
    let designated: Vec<&&MethodSurface> = viable.iter().filter(|c| c.designated).collect();
    match designated.as_slice() {
        [only] => return Some(only.name.clone()),
        [] => {}
        _ => return None,
    }
    match viable.as_slice() {
        [only] => Some(only.name.clone()),
        _ => None,
    }
}

fn resolve_setter_path(
    builder: &BuilderSurface,
    property: &PropertySchema,
    type_name: &str,
) -> Result<SetterPath, SchemaError> {
    // Stage 1: a setter assignable-from the property's erased type.
    for setter in builder.setters.iter().filter(|s| s.non_private) {
        if assignable(&setter.param, &property.declared) {
            return Ok(SetterPath::Direct {
                setter: setter.name.clone(),
            });
        }
    }

    // Stage 2: optional wrapper with a setter for the unwrapped inner type.
    if let Some(inner) = unwrapped_inner(&property.declared) {
        for setter in builder.setters.iter().filter(|s| s.non_private) {
            if matches_inner(&setter.param, &inner) {
                return Ok(SetterPath::UnwrapIfPresent {
                    setter: setter.name.clone(),
                });
            }
        }
    }

    // Stage 3: a sub-builder accessor with a usable merge operation.
    if let Some(sub) = builder
        .sub_builders
        .iter()
        .find(|s| s.property == property.name)
    {
        let wants_put_all = matches!(property.declared.head(), Some(RawType::Map));
        let op = if wants_put_all && sub.has_put_all {
            Some(MergeOp::PutAll)
        } else if sub.has_add_all {
            Some(MergeOp::AddAll)
        } else if sub.has_put_all {
            Some(MergeOp::PutAll)
        } else {
            None
        };
        return match op {
            Some(op) => Ok(SetterPath::SubBuilderMerge {
                accessor: sub.accessor.clone(),
                op,
            }),
            None => Err(SchemaError::NoMergeOperation {
                type_name: type_name.to_string(),
                property: property.name.clone(),
            }),
        };
    }

    Err(SchemaError::NoSetterPath {
        type_name: type_name.to_string(),
        property: property.name.clone(),
    })
}

// Erased assignability: heads match exactly, or the setter widens a list/set
// property to its collection interfaces.
fn assignable(param: &TypeRef, declared: &TypeDescriptor) -> bool {
    match (param, declared) {
        (TypeRef::Param(i), TypeDescriptor::Variable(j)) => i == j,
        (TypeRef::Named(name, _), _) => match declared.head() {
            Some(head) => {
                if name == head.name() {
                    return true;
                }
                match head {
                    RawType::List | RawType::Set => name == "Collection" || name == "Iterable",
                    _ => false,
                }
            }
            None => false,
        },
        _ => false,
    }
}

// The inner descriptor of the four optional-wrapper forms.
fn unwrapped_inner(declared: &TypeDescriptor) -> Option<TypeDescriptor> {
    match declared {
        TypeDescriptor::Concrete(RawType::Optional, args) => args.first().cloned(),
        TypeDescriptor::Concrete(RawType::OptionalInt, _) => {
            Some(TypeDescriptor::simple(RawType::Int))
        }
        TypeDescriptor::Concrete(RawType::OptionalFloat, _) => {
            Some(TypeDescriptor::simple(RawType::Float))
        }
        TypeDescriptor::Concrete(RawType::OptionalBool, _) => {
            Some(TypeDescriptor::simple(RawType::Bool))
        }
        _ => None,
    }
}

fn matches_inner(param: &TypeRef, inner: &TypeDescriptor) -> bool {
    match (param, inner) {
        (TypeRef::Param(i), TypeDescriptor::Variable(j)) => i == j,
        (TypeRef::Named(name, _), _) => inner
            .head()
            .map(|head| name == head.name())
            .unwrap_or(false),
        _ => false,
    }
}
