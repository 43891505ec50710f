//! tfplug - Terraform Plugin Framework for Rust
//!
//! The framework half of the NIOS provider: Terraform values, schemas and
//! planning, typed tri-state state models, and the codec that maps them to
//! and from API wire structs.

// Core modules
pub mod attribute_type;
pub mod context;
pub mod error;
pub mod schema;
pub mod types;
pub mod value;

// State model mapping
pub mod flex;
pub mod mapper;

// Resource API
pub mod resource;

// Helper modules
pub mod defaults;
pub mod import;
pub mod plan_modifier;
pub mod validator;

// Re-exports for convenience
pub use attribute_type::{AttrTypes, AttributeType};
pub use context::Context;
pub use error::{Result, TfplugError};
pub use import::import_state_passthrough_id;
pub use mapper::{ObjectMapper, StateModel};
pub use resource::{Resource, ResourceWithConfigure, ResourceWithImportState};
pub use schema::{AttributeBuilder, NestedType, Schema, SchemaBuilder};
pub use types::{AttributePath, Diagnostic, Diagnostics, Dynamic, DynamicValue};
pub use value::{Ipv4Address, ListValue, StateType, Value};
