//! Config Service shapes and client trait

use super::ApiResult;
use async_trait::async_trait;

/// Error code for a missing configuration recorder
pub const ERR_CODE_NO_SUCH_CONFIGURATION_RECORDER: &str = "NoSuchConfigurationRecorderException";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordingGroup {
    pub all_supported: Option<bool>,
    pub include_global_resource_types: Option<bool>,
    pub resource_types: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigurationRecorder {
    pub name: Option<String>,
    pub role_arn: Option<String>,
    pub recording_group: Option<RecordingGroup>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PutConfigurationRecorderInput {
    pub configuration_recorder: ConfigurationRecorder,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DescribeConfigurationRecordersInput {
    pub configuration_recorder_names: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DescribeConfigurationRecordersOutput {
    pub configuration_recorders: Vec<ConfigurationRecorder>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeleteConfigurationRecorderInput {
    pub configuration_recorder_name: String,
}

/// Config Service client
#[async_trait]
pub trait ConfigServiceApi: Send + Sync {
    async fn put_configuration_recorder(&self, input: PutConfigurationRecorderInput)
    -> ApiResult<()>;

    async fn describe_configuration_recorders(
        &self,
        input: DescribeConfigurationRecordersInput,
    ) -> ApiResult<DescribeConfigurationRecordersOutput>;

    async fn delete_configuration_recorder(
        &self,
        input: DeleteConfigurationRecorderInput,
    ) -> ApiResult<()>;
}
