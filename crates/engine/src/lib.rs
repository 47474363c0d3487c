//! Codec synthesis engine for codecforge
//!
//! This crate turns declarative type surfaces into working JSON codecs:
//!
//! 1. the [`SchemaProvider`] supplies a [`TypeSurface`] per type (plain data,
//!    never live reflection)
//! 2. the applicability analyzer decides whether the type opts into codec
//!    generation at all
//! 3. the instantiation protocol resolver picks constructor- or builder-based
//!    construction and maps each property to a setter path
//! 4. the generic binder lowers declared types into
//!    [`TypeDescriptor`](forge_core::TypeDescriptor) trees
//! 5. the synthesizer derives encode/decode behavior from schema + protocol +
//!    bindings, and the per-instance [`AdapterCache`] memoizes nested codecs
//!    so cyclic type graphs terminate
//!
//! The entry point is [`Engine`]: register surfaces with a provider, request
//! a [`CodecHandle`] for a bound type, then decode and encode
//! [`Value`](forge_core::Value)s through it.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod applicability;
mod binder;
mod cache;
mod codec;
mod emit;
mod engine;
mod error;
mod handle;
mod protocol;
mod surface;
mod synth;

pub use applicability::{analyze, Applicability};
pub use binder::TypeBinder;
pub use cache::AdapterCache;
pub use codec::{Codec, CodecCtx};
pub use emit::{ArtifactSink, NoopSink};
pub use engine::Engine;
pub use error::CodecError;
pub use handle::CodecHandle;
pub use protocol::{BuilderProtocol, InstantiationProtocol, MergeOp, SetterPath};
pub use surface::{
    BuilderSurface, FactorySurface, MethodSurface, PropertySurface, SchemaProvider, SetterSurface,
    StaticProvider, SubBuilderSurface, TypeRef, TypeSurface,
};
pub use synth::RecordSpec;
