//! Core traits for tfaws
//!
//! - [`Resource`]: Typed Create/Read/Update/Delete unit of one resource type
//! - [`DynResource`]: Attribute-map form of a `Resource`, used by the registry

pub mod resource;

pub use resource::{DynResource, ReadOutcome, Resource, ResourceState, StateValue};
