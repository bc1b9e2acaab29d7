// # Resource Adapter Trait
//
// Defines the lifecycle contract every resource type implements.
//
// ## Implementations
//
// - `aws_s3_access_point`: `tfaws-s3control` crate
// - `aws_config_configuration_recorder`: `tfaws-configservice` crate
// - `aws_ses_identity_notification_topic`: `tfaws-ses` crate
//
// ## Usage
//
// ```rust,ignore
// use tfaws_core::{AwsClient, ReadOutcome, Resource};
//
// async fn refresh(adapter: &impl Resource, conn: &AwsClient, id: &str) -> tfaws_core::Result<()> {
//     match adapter.read(conn, id).await? {
//         ReadOutcome::Present(state) => println!("{} is still there", state.id),
//         ReadOutcome::NotFound => println!("{} is gone, dropping it", id),
//     }
//     Ok(())
// }
// ```

use crate::conns::AwsClient;
use crate::diff::{from_attributes, to_attributes};
use crate::error::{Error, Result};
use crate::schema::ResourceSchema;
use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::fmt::Debug;

/// A tracked resource: its identifier and its local representation
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceState<C> {
    pub id: String,
    pub config: C,
}

impl<C> ResourceState<C> {
    pub fn new(id: impl Into<String>, config: C) -> Self {
        Self {
            id: id.into(),
            config,
        }
    }
}

/// Outcome of a Read
///
/// `NotFound` is not an error: it tells the host to drop the resource from
/// tracked state.
#[derive(Debug, Clone, PartialEq)]
pub enum ReadOutcome<C> {
    Present(ResourceState<C>),
    NotFound,
}

impl<C> ReadOutcome<C> {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ReadOutcome::NotFound)
    }

    /// The state, if the object exists
    pub fn present(self) -> Option<ResourceState<C>> {
        match self {
            ReadOutcome::Present(state) => Some(state),
            ReadOutcome::NotFound => None,
        }
    }

    /// The state, treating absence as an error
    ///
    /// Used where the object must exist: right after Create and on import.
    pub fn require(self, resource: &str, id: &str) -> Result<ResourceState<C>> {
        self.present().ok_or_else(|| Error::not_found(resource, id))
    }
}

/// Trait for resource adapter implementations
///
/// # Contract
///
/// - Operations are stateless: everything they need comes in through
///   `conn` and their arguments.
/// - No retries, backoff or sleeping: errors go straight back to the host.
/// - `create` derives the identifier deterministically and finishes with a
///   Read; a missing object at that point is an error.
/// - `read` returns [`ReadOutcome::NotFound`] when the object is gone.
/// - `update` only issues calls for changed attributes, then Reads.
/// - `delete` treats "already gone" as success.
#[async_trait]
pub trait Resource: Send + Sync {
    /// Local representation of the resource (configured and computed attributes)
    type Config: Serialize + DeserializeOwned + Clone + PartialEq + Debug + Send + Sync + 'static;

    /// Resource type name (e.g. "aws_s3_access_point")
    fn type_name(&self) -> &'static str;

    /// Attribute table of this resource type
    fn schema(&self) -> ResourceSchema;

    /// Create the remote object and return its state
    async fn create(
        &self,
        conn: &AwsClient,
        config: &Self::Config,
    ) -> Result<ResourceState<Self::Config>>;

    /// Read the remote object identified by `id`
    async fn read(&self, conn: &AwsClient, id: &str) -> Result<ReadOutcome<Self::Config>>;

    /// Apply the changed attributes of `old` → `new`, then Read
    async fn update(
        &self,
        conn: &AwsClient,
        id: &str,
        old: &Self::Config,
        new: &Self::Config,
    ) -> Result<ReadOutcome<Self::Config>>;

    /// Delete the remote object identified by `id`
    async fn delete(&self, conn: &AwsClient, id: &str) -> Result<()>;

    /// Import an existing object by identifier
    ///
    /// The default is a passthrough Read that requires the object to exist.
    async fn import(&self, conn: &AwsClient, id: &str) -> Result<ResourceState<Self::Config>> {
        Resource::read(self, conn, id)
            .await?
            .require(Resource::type_name(self), id)
    }
}

/// State as the host stores it: identifier plus attribute map
#[derive(Debug, Clone, PartialEq)]
pub struct StateValue {
    pub id: String,
    pub attributes: Map<String, Value>,
}

/// Attribute-map form of [`Resource`]
///
/// Implemented for every `Resource`. Configurations are defaulted and
/// validated against the schema before they reach the typed adapter, and
/// every attribute of a result is type-checked before it is handed back.
#[async_trait]
pub trait DynResource: Send + Sync {
    fn type_name(&self) -> &'static str;

    fn schema(&self) -> ResourceSchema;

    async fn create(&self, conn: &AwsClient, config: Map<String, Value>) -> Result<StateValue>;

    async fn read(&self, conn: &AwsClient, id: &str) -> Result<Option<StateValue>>;

    async fn update(
        &self,
        conn: &AwsClient,
        id: &str,
        prior: Map<String, Value>,
        planned: Map<String, Value>,
    ) -> Result<Option<StateValue>>;

    async fn delete(&self, conn: &AwsClient, id: &str) -> Result<()>;

    async fn import(&self, conn: &AwsClient, id: &str) -> Result<StateValue>;

    /// Force-new attributes that differ between `prior` and `planned`
    fn requires_replace(
        &self,
        prior: &Map<String, Value>,
        planned: &Map<String, Value>,
    ) -> Vec<&'static str>;
}

fn encode_state<C: Serialize>(
    schema: &ResourceSchema,
    state: ResourceState<C>,
) -> Result<StateValue> {
    let attributes = to_attributes(&state.config)?;
    for (name, value) in &attributes {
        schema.check_value(name, value)?;
    }
    Ok(StateValue {
        id: state.id,
        attributes,
    })
}

fn decode_config<C: DeserializeOwned>(
    schema: &ResourceSchema,
    mut config: Map<String, Value>,
) -> Result<C> {
    schema.apply_defaults(&mut config);
    schema.validate(&config)?;
    strip_nulls(&mut config);
    from_attributes(config)
}

/// Drop `null` attributes, top level and inside block items, so they
/// decode as unset
fn strip_nulls(attributes: &mut Map<String, Value>) {
    attributes.retain(|_, value| !value.is_null());
    for value in attributes.values_mut() {
        if let Value::Array(items) = value {
            for item in items.iter_mut() {
                if let Value::Object(fields) = item {
                    strip_nulls(fields);
                }
            }
        }
    }
}

#[async_trait]
impl<R: Resource> DynResource for R {
    fn type_name(&self) -> &'static str {
        Resource::type_name(self)
    }

    fn schema(&self) -> ResourceSchema {
        Resource::schema(self)
    }

    async fn create(&self, conn: &AwsClient, config: Map<String, Value>) -> Result<StateValue> {
        let schema = Resource::schema(self);
        let config: R::Config = decode_config(&schema, config)?;
        let state = Resource::create(self, conn, &config).await?;
        encode_state(&schema, state)
    }

    async fn read(&self, conn: &AwsClient, id: &str) -> Result<Option<StateValue>> {
        let schema = Resource::schema(self);
        match Resource::read(self, conn, id).await? {
            ReadOutcome::Present(state) => encode_state(&schema, state).map(Some),
            ReadOutcome::NotFound => Ok(None),
        }
    }

    async fn update(
        &self,
        conn: &AwsClient,
        id: &str,
        mut prior: Map<String, Value>,
        planned: Map<String, Value>,
    ) -> Result<Option<StateValue>> {
        let schema = Resource::schema(self);
        strip_nulls(&mut prior);
        let old: R::Config = from_attributes(prior)?;
        let new: R::Config = decode_config(&schema, planned)?;
        match Resource::update(self, conn, id, &old, &new).await? {
            ReadOutcome::Present(state) => encode_state(&schema, state).map(Some),
            ReadOutcome::NotFound => Ok(None),
        }
    }

    async fn delete(&self, conn: &AwsClient, id: &str) -> Result<()> {
        Resource::delete(self, conn, id).await
    }

    async fn import(&self, conn: &AwsClient, id: &str) -> Result<StateValue> {
        let schema = Resource::schema(self);
        if !schema.importable {
            return Err(Error::config(format!(
                "{} does not support import",
                schema.type_name
            )));
        }
        let state = Resource::import(self, conn, id).await?;
        encode_state(&schema, state)
    }

    fn requires_replace(
        &self,
        prior: &Map<String, Value>,
        planned: &Map<String, Value>,
    ) -> Vec<&'static str> {
        Resource::schema(self).replacement_attributes(prior, planned)
    }
}
