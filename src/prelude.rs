//! Convenient imports for codecforge.
//!
//! This module re-exports the most commonly used types so you can get
//! started with a single import:
//!
//! ```
//! use codecforge::prelude::*;
//!
//! let forge = ForgeBuilder::new().build();
//! assert!(forge.codec("Missing").is_err());
//! ```

// Main entry point
pub use crate::forge::{Codec, Forge, ForgeBuilder};

// Error handling
pub use crate::error::{Error, Result};

// Value model
pub use forge_core::{RecordValue, Value};

// Type description
pub use forge_core::{TypeConfig, TypeDescriptor};
pub use forge_engine::{
    BuilderSurface, FactorySurface, MethodSurface, PropertySurface, SetterSurface,
    SubBuilderSurface, TypeRef, TypeSurface,
};
