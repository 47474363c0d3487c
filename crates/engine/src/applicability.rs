//! Applicability analysis
//!
//! Decides whether a type opts into codec generation. The explicit marker
//! wins; otherwise the type's non-private static factories are scanned for
//! one returning `Codec<Self>`. A factory returning a codec for some other
//! type, or a bare codec with no type arguments, produces a non-fatal
//! warning and the type is skipped.

use forge_core::{ApplicabilityWarning, WarningKind};

use crate::surface::{FactorySurface, TypeRef, TypeSurface};

/// The name factory return types are matched against.
const CODEC_TYPE_NAME: &str = "Codec";

/// How (and whether) a type opts into codec generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applicability {
    /// Neither marker nor convention matched; generation is skipped.
    NotApplicable,
    /// The type carries the explicit opt-in marker.
    ApplicableExplicit,
    /// A factory returning `Codec<Self>` matched the convention.
    ApplicableByConvention,
}

/// Analyze a surface, returning the verdict and at most one warning.
pub fn analyze(surface: &TypeSurface) -> (Applicability, Option<ApplicabilityWarning>) {
    if surface.config.explicitly_applicable {
        return (Applicability::ApplicableExplicit, None);
    }

    let mut mismatched: Option<&FactorySurface> = None;
    let mut raw: Option<&FactorySurface> = None;

    for factory in &surface.factories {
        if !factory.non_private || !factory.is_static {
            continue;
        }
        let args = match &factory.returns {
            TypeRef::Named(name, args) if name == CODEC_TYPE_NAME => args,
            _ => continue,
        };
        match args.as_slice() {
            [] => {
                if raw.is_none() {
                    raw = Some(factory);
                }
            }
            [subject] => {
                if is_exact_self(subject, surface) || is_raw_self(subject, surface) {
                    return (Applicability::ApplicableByConvention, None);
                }
                if mismatched.is_none() {
                    mismatched = Some(factory);
                }
            }
            _ => {
                if mismatched.is_none() {
                    mismatched = Some(factory);
                }
            }
        }
    }

    if let Some(factory) = mismatched {
        return (
            Applicability::NotApplicable,
            Some(ApplicabilityWarning {
                type_name: surface.name.clone(),
                factory: factory.name.clone(),
                kind: WarningKind::MismatchedFactoryReturn,
            }),
        );
    }
    if let Some(factory) = raw {
        return (
            Applicability::NotApplicable,
            Some(ApplicabilityWarning {
                type_name: surface.name.clone(),
                factory: factory.name.clone(),
                kind: WarningKind::RawFactory,
            }),
        );
    }
    (Applicability::NotApplicable, None)
}

// `Codec<Self>` with the type's own parameters restated in order (or no
// parameters for a non-generic type).
fn is_exact_self(subject: &TypeRef, surface: &TypeSurface) -> bool {
    match subject {
        TypeRef::Named(name, args) if *name == surface.name => {
            args.len() == surface.type_param_count
                && args
                    .iter()
                    .enumerate()
                    .all(|(i, arg)| matches!(arg, TypeRef::Param(p) if *p == i))
        }
        _ => false,
    }
}

// `Codec<Self>` where a generic type's factory names its raw type without
// restating the arguments.
fn is_raw_self(subject: &TypeRef, surface: &TypeSurface) -> bool {
    matches!(
        subject,
        TypeRef::Named(name, args)
            if *name == surface.name && args.is_empty() && surface.type_param_count > 0
    )
}
