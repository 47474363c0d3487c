//! Binding-time error types
//!
//! Two fatal families and one non-fatal warning:
//!
//! - [`SchemaError`] - a type's schema or instantiation protocol cannot be
//!   resolved; codec generation fails for that type only
//! - [`TypeBindingError`] - a declared type cannot be represented or bound
//! - [`ApplicabilityWarning`] - a factory method looked like an opt-in but
//!   did not match; generation is skipped for the type, nothing is aborted
//!
//! Every variant names the offending type (and property where one exists) so
//! failures are actionable. Resolution of sibling types is independent; none
//! of these corrupt shared state.

use thiserror::Error;

/// Fatal schema-resolution failures, one type at a time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// More or fewer than one usable builder accessor and no designated one.
    #[error("type `{type_name}`: ambiguous builder access ({candidates} candidates)")]
    AmbiguousBuilderAccess {
        /// Offending type.
        type_name: String,
        /// Number of viable accessor candidates found.
        candidates: usize,
    },

    /// More or fewer than one usable build method and no designated one.
    #[error("type `{type_name}`: ambiguous build method ({candidates} candidates)")]
    AmbiguousBuildMethod {
        /// Offending type.
        type_name: String,
        /// Number of viable build-method candidates found.
        candidates: usize,
    },

    /// No setter path stage matched the property.
    #[error("type `{type_name}`, property `{property}`: no setter path")]
    NoSetterPath {
        /// Offending type.
        type_name: String,
        /// Offending property.
        property: String,
    },

    /// A sub-builder exists but exposes neither add-all nor put-all.
    #[error("type `{type_name}`, property `{property}`: sub-builder has no merge operation")]
    NoMergeOperation {
        /// Offending type.
        type_name: String,
        /// Offending property.
        property: String,
    },

    /// Property is ignored on decode, not nullable, and has no usable default.
    #[error(
        "type `{type_name}`, property `{property}`: ignored on decode but not nullable and no usable default"
    )]
    IgnoredWithoutDefault {
        /// Offending type.
        type_name: String,
        /// Offending property.
        property: String,
    },

    /// A serialized name or alias collides with another one in the schema.
    #[error("type `{type_name}`: duplicate serialized name `{name}`")]
    DuplicateSerializedName {
        /// Offending type.
        type_name: String,
        /// The colliding wire name.
        name: String,
    },

    /// More than one property is marked as the unknown-field sink.
    #[error("type `{type_name}`: more than one unknown-field sink")]
    MultipleSinks {
        /// Offending type.
        type_name: String,
    },

    /// The sink property's declared type is not map-like.
    #[error("type `{type_name}`, property `{property}`: unknown-field sink must be map-typed")]
    NonMapSink {
        /// Offending type.
        type_name: String,
        /// Offending property.
        property: String,
    },
}

/// Fatal generic-binding failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypeBindingError {
    /// A wildcard carried more than one bound.
    #[error("type `{type_name}`: wildcard with multiple bounds is unrepresentable")]
    UnrepresentableWildcard {
        /// Type whose declaration contains the wildcard.
        type_name: String,
    },

    /// Actual type-argument count differs from the declared parameter count.
    #[error("type `{type_name}` expects {expected} type arguments, got {actual}")]
    ArityMismatch {
        /// Offending type.
        type_name: String,
        /// Declared parameter count.
        expected: usize,
        /// Supplied argument count.
        actual: usize,
    },

    /// A declared type name is known to neither the built-ins nor the provider.
    #[error("unknown type `{name}`")]
    UnknownType {
        /// The unresolvable name.
        name: String,
    },

    /// A type variable index had no actual argument to resolve against.
    #[error("type variable ${index} has no binding")]
    UnboundVariable {
        /// Positional index of the variable.
        index: usize,
    },

    /// Map keys must be strings on a JSON wire.
    #[error("type `{type_name}`: map keys must be String")]
    UnsupportedMapKey {
        /// Offending type.
        type_name: String,
    },

    /// The type neither opted in nor matched the factory convention.
    #[error("type `{type_name}` is not applicable for codec generation")]
    NotApplicable {
        /// The skipped type.
        type_name: String,
    },
}

/// Kinds of non-fatal applicability findings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningKind {
    /// A factory returns a codec for some other type.
    MismatchedFactoryReturn,
    /// A factory returns a bare, argument-free codec type.
    RawFactory,
}

/// A non-fatal finding from applicability analysis.
///
/// Generation is skipped for the named type; sibling types are unaffected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicabilityWarning {
    /// The type whose factory was inspected.
    pub type_name: String,
    /// The factory method that triggered the finding.
    pub factory: String,
    /// What was wrong with it.
    pub kind: WarningKind,
}

impl std::fmt::Display for ApplicabilityWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            WarningKind::MismatchedFactoryReturn => write!(
                f,
                "type `{}`: factory `{}` returns a codec for a different type",
                self.type_name, self.factory
            ),
            WarningKind::RawFactory => write!(
                f,
                "type `{}`: factory `{}` returns a raw codec without type arguments",
                self.type_name, self.factory
            ),
        }
    }
}
