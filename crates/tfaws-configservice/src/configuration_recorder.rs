//! `aws_config_configuration_recorder`

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tfaws_core::api::configservice::{
    ConfigurationRecorder, DeleteConfigurationRecorderInput, DescribeConfigurationRecordersInput,
    ERR_CODE_NO_SUCH_CONFIGURATION_RECORDER, PutConfigurationRecorderInput, RecordingGroup,
};
use tfaws_core::diff::ChangeSet;
use tfaws_core::schema::{Attribute, AttributeMode, ResourceSchema, Validator};
use tfaws_core::{AwsClient, Error, ReadOutcome, Resource, ResourceState, Result};
use tracing::{debug, warn};

const TYPE_NAME: &str = "aws_config_configuration_recorder";
const RESOURCE: &str = "Configuration Recorder";
const DEFAULT_NAME: &str = "default";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigurationRecorderConfig {
    #[serde(default = "default_name")]
    pub name: String,
    pub role_arn: String,
    /// Empty when the recorder has no recording group
    #[serde(default)]
    pub recording_group: Vec<RecordingGroupBlock>,
}

/// `recording_group` block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordingGroupBlock {
    #[serde(default = "default_true")]
    pub all_supported: bool,
    #[serde(default)]
    pub include_global_resource_types: bool,
    #[serde(default)]
    pub resource_types: BTreeSet<String>,
}

impl Default for RecordingGroupBlock {
    fn default() -> Self {
        Self {
            all_supported: true,
            include_global_resource_types: false,
            resource_types: BTreeSet::new(),
        }
    }
}

fn default_name() -> String {
    DEFAULT_NAME.to_string()
}

fn default_true() -> bool {
    true
}

pub fn expand_recording_group(blocks: &[RecordingGroupBlock]) -> Option<RecordingGroup> {
    let block = blocks.first()?;

    Some(RecordingGroup {
        all_supported: Some(block.all_supported),
        include_global_resource_types: Some(block.include_global_resource_types),
        resource_types: block.resource_types.iter().cloned().collect(),
    })
}

pub fn flatten_recording_group(group: Option<&RecordingGroup>) -> Vec<RecordingGroupBlock> {
    let Some(group) = group else {
        return Vec::new();
    };

    vec![RecordingGroupBlock {
        all_supported: group.all_supported.unwrap_or_default(),
        include_global_resource_types: group.include_global_resource_types.unwrap_or_default(),
        resource_types: group.resource_types.iter().cloned().collect(),
    }]
}

fn expand_recorder(config: &ConfigurationRecorderConfig) -> ConfigurationRecorder {
    ConfigurationRecorder {
        name: Some(config.name.clone()),
        role_arn: Some(config.role_arn.clone()),
        recording_group: expand_recording_group(&config.recording_group),
    }
}

/// Adapter for `aws_config_configuration_recorder`
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfigurationRecorderResource;

impl ConfigurationRecorderResource {
    async fn put(
        &self,
        conn: &AwsClient,
        action: &str,
        config: &ConfigurationRecorderConfig,
    ) -> Result<()> {
        let input = PutConfigurationRecorderInput {
            configuration_recorder: expand_recorder(config),
        };

        debug!("Putting Configuration Recorder: {:?}", input);
        conn.configservice()?
            .put_configuration_recorder(input)
            .await
            .map_err(|e| Error::remote(action, RESOURCE, &config.name, e))
    }
}

#[async_trait]
impl Resource for ConfigurationRecorderResource {
    type Config = ConfigurationRecorderConfig;

    fn type_name(&self) -> &'static str {
        TYPE_NAME
    }

    fn schema(&self) -> ResourceSchema {
        ResourceSchema::new(TYPE_NAME)
            .attribute(
                Attribute::optional_string("name")
                    .force_new()
                    .default_value(DEFAULT_NAME)
                    .validate(Validator::StringLenBetween { min: 0, max: 256 }),
            )
            .attribute(Attribute::required_string("role_arn").validate(Validator::Arn))
            .attribute(Attribute::block(
                "recording_group",
                AttributeMode::OptionalComputed,
                1,
                vec![
                    Attribute::optional_bool("all_supported").default_value(true),
                    Attribute::optional_bool("include_global_resource_types"),
                    Attribute::string_set("resource_types", AttributeMode::Optional),
                ],
            ))
            .importable()
    }

    async fn create(
        &self,
        conn: &AwsClient,
        config: &ConfigurationRecorderConfig,
    ) -> Result<ResourceState<ConfigurationRecorderConfig>> {
        self.put(conn, "creating", config).await?;

        self.read(conn, &config.name).await?.require(RESOURCE, &config.name)
    }

    async fn read(
        &self,
        conn: &AwsClient,
        id: &str,
    ) -> Result<ReadOutcome<ConfigurationRecorderConfig>> {
        let input = DescribeConfigurationRecordersInput {
            configuration_recorder_names: vec![id.to_string()],
        };

        let output = match conn.configservice()?.describe_configuration_recorders(input).await {
            Ok(output) => output,
            Err(e) if e.code_equals(ERR_CODE_NO_SUCH_CONFIGURATION_RECORDER) => {
                warn!("Configuration Recorder ({}) not found, removing from state", id);
                return Ok(ReadOutcome::NotFound);
            }
            Err(e) => return Err(Error::remote("reading", RESOURCE, id, e)),
        };

        let mut recorders = output.configuration_recorders;
        let recorder = match recorders.len() {
            0 => {
                warn!("Configuration Recorder ({}) not found, removing from state", id);
                return Ok(ReadOutcome::NotFound);
            }
            1 => recorders.remove(0),
            n => {
                return Err(Error::consistency(
                    RESOURCE,
                    id,
                    format!(
                        "expected exactly 1 Configuration Recorder, received {}: {:?}",
                        n, recorders
                    ),
                ));
            }
        };

        let config = ConfigurationRecorderConfig {
            name: recorder.name.unwrap_or_else(|| id.to_string()),
            role_arn: recorder.role_arn.unwrap_or_default(),
            recording_group: flatten_recording_group(recorder.recording_group.as_ref()),
        };

        Ok(ReadOutcome::Present(ResourceState::new(id, config)))
    }

    async fn update(
        &self,
        conn: &AwsClient,
        id: &str,
        old: &ConfigurationRecorderConfig,
        new: &ConfigurationRecorderConfig,
    ) -> Result<ReadOutcome<ConfigurationRecorderConfig>> {
        let changes = ChangeSet::between(&self.schema(), old, new)?;

        if changes.is_empty() {
            debug!("Configuration Recorder ({}) unchanged", id);
        } else {
            self.put(conn, "updating", new).await?;
        }

        self.read(conn, id).await
    }

    async fn delete(&self, conn: &AwsClient, id: &str) -> Result<()> {
        let input = DeleteConfigurationRecorderInput {
            configuration_recorder_name: id.to_string(),
        };

        debug!("Deleting Configuration Recorder: {}", id);
        match conn.configservice()?.delete_configuration_recorder(input).await {
            Ok(()) => Ok(()),
            Err(e) if e.code_equals(ERR_CODE_NO_SUCH_CONFIGURATION_RECORDER) => Ok(()),
            Err(e) => Err(Error::remote("deleting", RESOURCE, id, e)),
        }
    }
}
