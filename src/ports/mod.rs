//! Ports - Interfaces for external collaborators.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `CheckoutSchemaValidator` - validates checkout payloads before signing

mod schema_validator;

pub use schema_validator::{CheckoutSchemaValidator, SchemaValidationError};
