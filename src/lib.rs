//! # codecforge
//!
//! Schema-driven streaming JSON codec synthesis.
//!
//! codecforge derives a streaming JSON encoder/decoder pair for immutable
//! composite value types from a declarative description of their properties,
//! so serialization code never has to be written by hand while field naming,
//! nullability, generics, and forward-compatibility with unknown fields stay
//! under exact control.
//!
//! ## Quick Start
//!
//! ```
//! use codecforge::prelude::*;
//!
//! // Describe a type once: its properties, in declaration order.
//! let address = TypeSurface::new("Address")
//!     .explicitly_applicable()
//!     .property(
//!         PropertySurface::new("street_name", TypeRef::named("String"))
//!             .serialized_as("streetName")
//!             .alias("street-name"),
//!     )
//!     .property(PropertySurface::new("city", TypeRef::named("String")));
//!
//! let forge = ForgeBuilder::new().register(address).build();
//!
//! // Decode through the synthesized codec; aliases converge on the
//! // canonical property.
//! let codec = forge.codec("Address")?;
//! let value = codec.decode_str(r#"{"street-name":"Main","city":"Springfield"}"#)?;
//!
//! // Re-encoding emits only canonical names, in declaration order.
//! assert_eq!(
//!     codec.encode_to_string(&value)?,
//!     r#"{"streetName":"Main","city":"Springfield"}"#
//! );
//! # Ok::<(), codecforge::Error>(())
//! ```
//!
//! ## Layers
//!
//! - [`forge_core`]: value model, schemas, type descriptors
//! - [`forge_wire`]: streaming JSON reader/writer contracts and text
//!   implementations
//! - [`forge_engine`]: applicability analysis, protocol resolution, generic
//!   binding, codec synthesis, adapter caching

#![warn(missing_docs)]

mod error;
mod forge;

pub mod prelude;

// Re-export main entry points
pub use error::{Error, Result};
pub use forge::{Codec, Forge, ForgeBuilder};

// Re-export the core data model
pub use forge_core::{
    ApplicabilityWarning, BoundKind, PropertySchema, RawType, RecordValue, SchemaError,
    TypeBindingError, TypeConfig, TypeDescriptor, TypeSchema, Value, WarningKind,
};

// Re-export the wire contracts
pub use forge_wire::{
    JsonReader, JsonWriter, ProtocolViolation, TextReader, TextWriter, TokenKind,
};

// Re-export the engine surface
pub use forge_engine::{
    Applicability, ArtifactSink, BuilderSurface, Engine, FactorySurface, InstantiationProtocol,
    MergeOp, MethodSurface, NoopSink, PropertySurface, RecordSpec, SchemaProvider, SetterPath,
    SetterSurface, StaticProvider, SubBuilderSurface, TypeRef, TypeSurface,
};
