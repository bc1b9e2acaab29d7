//! Test doubles for the resource contract tests
//!
//! `WidgetResource` is a minimal adapter over an in-memory store that counts
//! every remote call it makes.

#![allow(dead_code)]

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tfaws_core::diff::ChangeSet;
use tfaws_core::schema::{Attribute, AttributeMode, AttributeType, ResourceSchema, Validator};
use tfaws_core::{AwsClient, ProviderConfig, ReadOutcome, Resource, ResourceState, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WidgetConfig {
    pub name: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub size: i64,
    #[serde(default)]
    pub arn: String,
}

/// Remote store shared between a resource and the test
#[derive(Clone, Default)]
pub struct WidgetStore {
    widgets: Arc<Mutex<HashMap<String, (String, i64)>>>,
    mutation_calls: Arc<AtomicUsize>,
    read_calls: Arc<AtomicUsize>,
}

impl WidgetStore {
    pub fn mutation_calls(&self) -> usize {
        self.mutation_calls.load(Ordering::SeqCst)
    }

    pub fn read_calls(&self) -> usize {
        self.read_calls.load(Ordering::SeqCst)
    }

    pub fn remove(&self, name: &str) {
        self.widgets.lock().unwrap().remove(name);
    }
}

pub struct WidgetResource {
    pub store: WidgetStore,
    /// Declare `size` as a string so read results fail the shape check
    pub misdeclare_size: bool,
}

impl WidgetResource {
    pub fn new(store: WidgetStore) -> Self {
        Self {
            store,
            misdeclare_size: false,
        }
    }
}

#[async_trait]
impl Resource for WidgetResource {
    type Config = WidgetConfig;

    fn type_name(&self) -> &'static str {
        "test_widget"
    }

    fn schema(&self) -> ResourceSchema {
        let size_type = if self.misdeclare_size {
            AttributeType::String
        } else {
            AttributeType::Int
        };

        ResourceSchema::new("test_widget")
            .attribute(
                Attribute::required_string("name")
                    .force_new()
                    .validate(Validator::NoZeroValue),
            )
            .attribute(
                Attribute::optional_string("color")
                    .default_value("blue")
                    .validate(Validator::StringInSlice {
                        values: vec!["blue", "red"],
                    }),
            )
            .attribute(Attribute::new("size", size_type, AttributeMode::Optional))
            .attribute(Attribute::computed_string("arn"))
            .importable()
    }

    async fn create(
        &self,
        conn: &AwsClient,
        config: &WidgetConfig,
    ) -> Result<ResourceState<WidgetConfig>> {
        self.store.mutation_calls.fetch_add(1, Ordering::SeqCst);
        self.store
            .widgets
            .lock()
            .unwrap()
            .insert(config.name.clone(), (config.color.clone(), config.size));

        self.read(conn, &config.name)
            .await?
            .require("Widget", &config.name)
    }

    async fn read(&self, conn: &AwsClient, id: &str) -> Result<ReadOutcome<WidgetConfig>> {
        self.store.read_calls.fetch_add(1, Ordering::SeqCst);
        let found = self.store.widgets.lock().unwrap().get(id).cloned();

        Ok(match found {
            Some((color, size)) => ReadOutcome::Present(ResourceState::new(
                id,
                WidgetConfig {
                    name: id.to_string(),
                    color,
                    size,
                    arn: format!(
                        "arn:{}:widget:{}:{}:widget/{}",
                        conn.partition, conn.region, conn.account_id, id
                    ),
                },
            )),
            None => ReadOutcome::NotFound,
        })
    }

    async fn update(
        &self,
        conn: &AwsClient,
        id: &str,
        old: &WidgetConfig,
        new: &WidgetConfig,
    ) -> Result<ReadOutcome<WidgetConfig>> {
        let changes = ChangeSet::between(&Resource::schema(self), old, new)?;
        if !changes.is_empty() {
            self.store.mutation_calls.fetch_add(1, Ordering::SeqCst);
            self.store
                .widgets
                .lock()
                .unwrap()
                .insert(id.to_string(), (new.color.clone(), new.size));
        }
        self.read(conn, id).await
    }

    async fn delete(&self, _conn: &AwsClient, id: &str) -> Result<()> {
        self.store.mutation_calls.fetch_add(1, Ordering::SeqCst);
        self.store.widgets.lock().unwrap().remove(id);
        Ok(())
    }
}

/// Connection with no service clients attached
pub fn test_conn() -> AwsClient {
    AwsClient::new(&ProviderConfig::new("us-west-2", "123456789012")).unwrap()
}
