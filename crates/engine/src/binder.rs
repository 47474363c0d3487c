//! Generic type binder
//!
//! Lowers declared [`TypeRef`] trees into resolved
//! [`TypeDescriptor`](forge_core::TypeDescriptor)s: named heads become
//! concrete types, parameter references become variables, wildcards keep
//! their single bound. Multi-bound wildcards cannot be represented and fail
//! binding.
//!
//! Variables acquire concrete meaning later, when a codec is constructed and
//! the descriptor is substituted against the actual type-argument array.

use forge_core::{RawType, TypeBindingError, TypeDescriptor};

use crate::surface::TypeRef;

/// Binds declared types within one enclosing type's declaration.
pub struct TypeBinder<'a> {
    context_type: &'a str,
}

impl<'a> TypeBinder<'a> {
    /// A binder attributing failures to `context_type`.
    pub fn new(context_type: &'a str) -> Self {
        TypeBinder { context_type }
    }

    /// Lower a declared type to a descriptor.
    pub fn bind(&self, declared: &TypeRef) -> Result<TypeDescriptor, TypeBindingError> {
        match declared {
            TypeRef::Param(index) => Ok(TypeDescriptor::Variable(*index)),
            TypeRef::Wildcard { bounds, direction } => {
                if bounds.len() != 1 {
                    return Err(TypeBindingError::UnrepresentableWildcard {
                        type_name: self.context_type.to_string(),
                    });
                }
                Ok(TypeDescriptor::Wildcard {
                    bound: Box::new(self.bind(&bounds[0])?),
                    direction: *direction,
                })
            }
            TypeRef::Named(name, args) => {
                let raw = raw_type_for(name);
                if let Some(expected) = raw.builtin_arity() {
                    if args.len() != expected {
                        return Err(TypeBindingError::ArityMismatch {
                            type_name: name.clone(),
                            expected,
                            actual: args.len(),
                        });
                    }
                }
                let mut bound = Vec::with_capacity(args.len());
                for arg in args {
                    bound.push(self.bind(arg)?);
                }
                if raw == RawType::Map {
                    if let Some(key) = bound.first() {
                        let key_is_string = matches!(key.head(), Some(RawType::String));
                        if !key_is_string && !matches!(key, TypeDescriptor::Variable(_)) {
                            return Err(TypeBindingError::UnsupportedMapKey {
                                type_name: self.context_type.to_string(),
                            });
                        }
                    }
                }
                Ok(TypeDescriptor::Concrete(raw, bound))
            }
        }
    }
}

/// Head-name lookup: built-ins by their fixed names, everything else a
/// record type.
pub(crate) fn raw_type_for(name: &str) -> RawType {
    match name {
        "Bool" => RawType::Bool,
        "Int" => RawType::Int,
        "Float" => RawType::Float,
        "Char" => RawType::Char,
        "String" => RawType::String,
        "List" => RawType::List,
        "Set" => RawType::Set,
        "Map" => RawType::Map,
        "Optional" => RawType::Optional,
        "OptionalInt" => RawType::OptionalInt,
        "OptionalFloat" => RawType::OptionalFloat,
        "OptionalBool" => RawType::OptionalBool,
        "Dynamic" => RawType::Dynamic,
        other => RawType::Record(other.to_string()),
    }
}
