//! Resolved generic-type descriptors
//!
//! A [`TypeDescriptor`] is the tree a codec lookup is keyed by: a concrete
//! head type with resolved arguments, an unresolved type variable, or a
//! bounded wildcard. Descriptors are built once by the generic binder and
//! then used as immutable cache keys.

use std::fmt;

use crate::error::TypeBindingError;

/// Head types a descriptor can name.
///
/// The set is closed for built-ins (scalars, collections, optional wrappers,
/// the any-shape `Dynamic` type); user schema types appear as `Record`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RawType {
    /// Primitive boolean
    Bool,
    /// Primitive 64-bit signed integer
    Int,
    /// Primitive 64-bit float
    Float,
    /// Primitive single character
    Char,
    /// UTF-8 string (reference type)
    String,
    /// Ordered list, one element argument
    List,
    /// Ordered set, one element argument
    Set,
    /// String-keyed map, key and value arguments
    Map,
    /// Generic optional wrapper, one argument
    Optional,
    /// Primitive-specialized optional integer
    OptionalInt,
    /// Primitive-specialized optional float
    OptionalFloat,
    /// Primitive-specialized optional boolean
    OptionalBool,
    /// Any JSON shape, preserved verbatim
    Dynamic,
    /// A named schema type
    Record(String),
}

impl RawType {
    /// Number of type arguments a built-in head expects.
    ///
    /// `Record` arities are not known here; they come from the type's surface
    /// and are checked at codec construction.
    pub fn builtin_arity(&self) -> Option<usize> {
        match self {
            RawType::Bool
            | RawType::Int
            | RawType::Float
            | RawType::Char
            | RawType::String
            | RawType::OptionalInt
            | RawType::OptionalFloat
            | RawType::OptionalBool
            | RawType::Dynamic => Some(0),
            RawType::List | RawType::Set | RawType::Optional => Some(1),
            RawType::Map => Some(2),
            RawType::Record(_) => None,
        }
    }

    /// Display name of the head (record heads display their type name).
    pub fn name(&self) -> &str {
        match self {
            RawType::Bool => "Bool",
            RawType::Int => "Int",
            RawType::Float => "Float",
            RawType::Char => "Char",
            RawType::String => "String",
            RawType::List => "List",
            RawType::Set => "Set",
            RawType::Map => "Map",
            RawType::Optional => "Optional",
            RawType::OptionalInt => "OptionalInt",
            RawType::OptionalFloat => "OptionalFloat",
            RawType::OptionalBool => "OptionalBool",
            RawType::Dynamic => "Dynamic",
            RawType::Record(name) => name,
        }
    }

    /// Whether this head is a zero-value primitive (bool/int/float/char).
    pub fn is_primitive(&self) -> bool {
        matches!(
            self,
            RawType::Bool | RawType::Int | RawType::Float | RawType::Char
        )
    }

    /// Whether this head is a collection kind (list/set/map).
    pub fn is_collection(&self) -> bool {
        matches!(self, RawType::List | RawType::Set | RawType::Map)
    }

    /// Whether this head is one of the four optional-wrapper forms.
    pub fn is_optional_wrapper(&self) -> bool {
        matches!(
            self,
            RawType::Optional | RawType::OptionalInt | RawType::OptionalFloat | RawType::OptionalBool
        )
    }
}

/// Direction of a wildcard bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoundKind {
    /// `? extends T` style upper bound
    Upper,
    /// `? super T` style lower bound
    Lower,
}

/// A resolved generic-type tree.
///
/// `Variable(i)` refers to the `i`-th type parameter of the enclosing schema
/// type and only acquires meaning when substituted against the actual
/// type-argument array of a codec construction site. A wildcard carries
/// exactly one bound; multi-bound wildcards are rejected by the binder.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeDescriptor {
    /// A concrete head type with resolved arguments.
    Concrete(RawType, Vec<TypeDescriptor>),
    /// The enclosing type's `index`-th type parameter, not yet substituted.
    Variable(usize),
    /// A wildcard with a single bound.
    Wildcard {
        /// The one bound the wildcard carries.
        bound: Box<TypeDescriptor>,
        /// Whether the bound is an upper or a lower bound.
        direction: BoundKind,
    },
}

impl TypeDescriptor {
    /// Shorthand for an argument-free concrete descriptor.
    pub fn simple(raw: RawType) -> Self {
        TypeDescriptor::Concrete(raw, Vec::new())
    }

    /// Shorthand for a record descriptor with arguments.
    pub fn record(name: impl Into<String>, args: Vec<TypeDescriptor>) -> Self {
        TypeDescriptor::Concrete(RawType::Record(name.into()), args)
    }

    /// The head type, when this descriptor is concrete.
    pub fn head(&self) -> Option<&RawType> {
        match self {
            TypeDescriptor::Concrete(raw, _) => Some(raw),
            _ => None,
        }
    }

    /// Whether this descriptor is a zero-value primitive.
    pub fn is_primitive(&self) -> bool {
        self.head().map(RawType::is_primitive).unwrap_or(false)
    }

    /// Whether this descriptor is a collection kind.
    pub fn is_collection(&self) -> bool {
        self.head().map(RawType::is_collection).unwrap_or(false)
    }

    /// Whether this descriptor is an optional wrapper.
    pub fn is_optional_wrapper(&self) -> bool {
        self.head().map(RawType::is_optional_wrapper).unwrap_or(false)
    }

    /// Whether any `Variable` node occurs in this tree.
    pub fn has_variables(&self) -> bool {
        match self {
            TypeDescriptor::Concrete(_, args) => args.iter().any(TypeDescriptor::has_variables),
            TypeDescriptor::Variable(_) => true,
            TypeDescriptor::Wildcard { bound, .. } => bound.has_variables(),
        }
    }

    /// Substitute every `Variable(i)` with `args[i]`.
    ///
    /// This is the one point where type variables acquire concrete meaning;
    /// it happens exactly once per codec instance, at construction. An index
    /// outside `args` is a [`TypeBindingError::UnboundVariable`].
    pub fn substitute(&self, args: &[TypeDescriptor]) -> Result<TypeDescriptor, TypeBindingError> {
        match self {
            TypeDescriptor::Concrete(raw, inner) => {
                let mut bound = Vec::with_capacity(inner.len());
                for arg in inner {
                    bound.push(arg.substitute(args)?);
                }
                Ok(TypeDescriptor::Concrete(raw.clone(), bound))
            }
            TypeDescriptor::Variable(index) => args
                .get(*index)
                .cloned()
                .ok_or(TypeBindingError::UnboundVariable { index: *index }),
            TypeDescriptor::Wildcard { bound, direction } => Ok(TypeDescriptor::Wildcard {
                bound: Box::new(bound.substitute(args)?),
                direction: *direction,
            }),
        }
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeDescriptor::Concrete(raw, args) => {
                f.write_str(raw.name())?;
                if !args.is_empty() {
                    f.write_str("<")?;
                    for (i, arg) in args.iter().enumerate() {
                        if i > 0 {
                            f.write_str(", ")?;
                        }
                        write!(f, "{}", arg)?;
                    }
                    f.write_str(">")?;
                }
                Ok(())
            }
            TypeDescriptor::Variable(index) => write!(f, "${}", index),
            TypeDescriptor::Wildcard { bound, direction } => match direction {
                BoundKind::Upper => write!(f, "? extends {}", bound),
                BoundKind::Lower => write!(f, "? super {}", bound),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list_of(elem: TypeDescriptor) -> TypeDescriptor {
        TypeDescriptor::Concrete(RawType::List, vec![elem])
    }

    #[test]
    fn substitute_replaces_variables() {
        let declared = list_of(TypeDescriptor::Variable(0));
        let bound = declared
            .substitute(&[TypeDescriptor::simple(RawType::String)])
            .unwrap();
        assert_eq!(bound, list_of(TypeDescriptor::simple(RawType::String)));
    }

    #[test]
    fn substitute_reports_unbound_variable() {
        let declared = TypeDescriptor::Variable(2);
        let err = declared
            .substitute(&[TypeDescriptor::simple(RawType::Int)])
            .unwrap_err();
        assert_eq!(err, TypeBindingError::UnboundVariable { index: 2 });
    }

    #[test]
    fn substitute_descends_into_wildcards() {
        let declared = TypeDescriptor::Wildcard {
            bound: Box::new(TypeDescriptor::Variable(0)),
            direction: BoundKind::Upper,
        };
        let bound = declared
            .substitute(&[TypeDescriptor::simple(RawType::Int)])
            .unwrap();
        match bound {
            TypeDescriptor::Wildcard { bound, .. } => {
                assert_eq!(*bound, TypeDescriptor::simple(RawType::Int));
            }
            other => panic!("expected wildcard, got {:?}", other),
        }
    }

    #[test]
    fn display_is_readable() {
        let descriptor = TypeDescriptor::Concrete(
            RawType::Map,
            vec![
                TypeDescriptor::simple(RawType::String),
                list_of(TypeDescriptor::record("Address", vec![])),
            ],
        );
        assert_eq!(descriptor.to_string(), "Map<String, List<Address>>");
    }

    #[test]
    fn variable_detection() {
        assert!(list_of(TypeDescriptor::Variable(0)).has_variables());
        assert!(!list_of(TypeDescriptor::simple(RawType::Int)).has_variables());
    }

    #[test]
    fn head_classification() {
        assert!(TypeDescriptor::simple(RawType::Int).is_primitive());
        assert!(!TypeDescriptor::simple(RawType::String).is_primitive());
        assert!(list_of(TypeDescriptor::simple(RawType::Int)).is_collection());
        assert!(TypeDescriptor::simple(RawType::OptionalInt).is_optional_wrapper());
    }
}
