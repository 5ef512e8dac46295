//! tfkit - Terraform provider interfaces for Rust
//!
//! The boundary a provider codes against: resource and provider traits with
//! request/response structs, the dynamic value type carrying plan/state/config
//! data, attribute schema builders, diagnostics, and a cancellation-carrying
//! Context. The plugin protocol server that drives these interfaces lives in
//! the host, not here.

pub mod context;
pub mod error;
pub mod provider;
pub mod resource;
pub mod schema;
pub mod types;

// Re-exports for convenience
pub use context::Context;
pub use error::{Result, TfkitError};
pub use provider::{Provider, ResourceFactory};
pub use resource::{Resource, ResourceWithConfigure, ResourceWithImportState};
pub use schema::{AttributeBuilder, AttributeType, Schema, SchemaBuilder};
pub use types::{AttributePath, Diagnostic, Dynamic, DynamicValue};
