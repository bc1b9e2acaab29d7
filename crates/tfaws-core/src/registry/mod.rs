//! Resource registry
//!
//! The registry maps resource type names to adapters so the host can
//! dispatch lifecycle calls without a hardcoded match over every type.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use tfaws_core::ResourceRegistry;
//!
//! let registry = ResourceRegistry::new();
//! tfaws_s3control::register(&registry);
//!
//! let adapter = registry.resource("aws_s3_access_point")?;
//! let state = adapter.read(&conn, "123456789012:my-ap").await?;
//! ```
//!
//! ## Registration
//!
//! Adapter crates expose a `register` function:
//!
//! ```rust,ignore
//! pub fn register(registry: &ResourceRegistry) {
//!     registry.register_resource(AccessPointResource);
//! }
//! ```

use crate::error::{Error, Result};
use crate::schema::ResourceSchema;
use crate::traits::DynResource;
use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock};

/// Registry of resource adapters keyed by type name
///
/// ## Thread Safety
///
/// Interior mutability with `RwLock`: registration takes `&self`, lookups
/// share the lock.
#[derive(Default)]
pub struct ResourceRegistry {
    resources: RwLock<BTreeMap<&'static str, Arc<dyn DynResource>>>,
}

impl ResourceRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an adapter under its type name
    ///
    /// Registering the same type name twice replaces the earlier adapter.
    pub fn register_resource<R>(&self, resource: R)
    where
        R: DynResource + 'static,
    {
        let name = resource.type_name();
        tracing::debug!("Registering resource type: {}", name);
        self.resources
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name, Arc::new(resource));
    }

    /// Look up the adapter for a type name
    pub fn resource(&self, type_name: &str) -> Result<Arc<dyn DynResource>> {
        self.resources
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(type_name)
            .cloned()
            .ok_or_else(|| Error::config(format!("Unknown resource type: {}", type_name)))
    }

    /// Check if a type name is registered
    pub fn has_resource(&self, type_name: &str) -> bool {
        self.resources
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(type_name)
    }

    /// All registered type names, sorted
    pub fn list_resources(&self) -> Vec<&'static str> {
        self.resources
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .copied()
            .collect()
    }

    /// Schemas of every registered resource type, keyed by type name
    pub fn provider_schema(&self) -> BTreeMap<&'static str, ResourceSchema> {
        self.resources
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(name, resource)| (*name, resource.schema()))
            .collect()
    }
}
