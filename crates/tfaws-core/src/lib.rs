// # tfaws-core
//
// Core library for the tfaws resource adapters.
//
// ## Architecture Overview
//
// This library provides everything a resource adapter needs except the
// adapter itself:
// - **Resource**: Trait for the typed Create/Read/Update/Delete unit of one resource type
// - **DynResource**: JSON-facing, object-safe form of a `Resource`
// - **ResourceRegistry**: Registry of adapters keyed by resource type name
// - **AwsClient**: Connection handle supplied by the host to every operation
// - **api**: Structured request/response shapes and one client trait per service
// - **schema**: Declarative attribute tables with validators and diff rules
//
// ## Design Principles
//
// 1. **Stateless adapters**: Every operation receives its connection explicitly
// 2. **No retries**: Retry, backoff and timeouts belong to the host
// 3. **Deterministic identifiers**: Identifiers are derived from create results only
// 4. **Idempotent deletes**: "Already gone" is success

pub mod api;
pub mod arn;
pub mod config;
pub mod conns;
pub mod diff;
pub mod error;
pub mod ident;
pub mod pagination;
pub mod registry;
pub mod schema;
pub mod traits;

// Re-export core types for convenience
pub use arn::Arn;
pub use config::ProviderConfig;
pub use conns::AwsClient;
pub use error::{ApiError, Error, Result};
pub use registry::ResourceRegistry;
pub use schema::{Attribute, AttributeType, ResourceSchema, Validator};
pub use traits::{DynResource, ReadOutcome, Resource, ResourceState, StateValue};
