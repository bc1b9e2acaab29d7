//! In-memory Config Service for the configuration recorder tests

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tfaws_core::api::ApiResult;
use tfaws_core::api::configservice::*;
use tfaws_core::{ApiError, AwsClient, ProviderConfig};

pub const ROLE_ARN: &str = "arn:aws:iam::123456789012:role/config-recorder";

/// Config Service double; a region holds at most one recorder
#[derive(Clone, Default)]
pub struct MockConfigService {
    recorders: Arc<Mutex<BTreeMap<String, ConfigurationRecorder>>>,
    /// Describe answers with every stored recorder plus a stray copy
    pub answer_with_duplicates: Arc<AtomicBool>,
    put_calls: Arc<AtomicUsize>,
    describe_calls: Arc<AtomicUsize>,
}

impl MockConfigService {
    pub fn put_calls(&self) -> usize {
        self.put_calls.load(Ordering::SeqCst)
    }

    pub fn describe_calls(&self) -> usize {
        self.describe_calls.load(Ordering::SeqCst)
    }

    pub fn stored(&self, name: &str) -> Option<ConfigurationRecorder> {
        self.recorders.lock().unwrap().get(name).cloned()
    }

    pub fn remove(&self, name: &str) {
        self.recorders.lock().unwrap().remove(name);
    }

    fn no_such_recorder(name: &str) -> ApiError {
        ApiError::new(
            ERR_CODE_NO_SUCH_CONFIGURATION_RECORDER,
            format!("Cannot find configuration recorder with the specified name '{}'.", name),
        )
    }
}

#[async_trait]
impl ConfigServiceApi for MockConfigService {
    async fn put_configuration_recorder(
        &self,
        input: PutConfigurationRecorderInput,
    ) -> ApiResult<()> {
        self.put_calls.fetch_add(1, Ordering::SeqCst);

        let recorder = input.configuration_recorder;
        let name = recorder.name.clone().unwrap_or_default();

        let mut recorders = self.recorders.lock().unwrap();
        if !recorders.is_empty() && !recorders.contains_key(&name) {
            return Err(ApiError::new(
                "MaxNumberOfConfigurationRecordersExceededException",
                "Failed to put configuration recorder because you have reached the limit for \
                 the maximum number of customer managed configuration records: (1)",
            ));
        }

        recorders.insert(name, recorder);
        Ok(())
    }

    async fn describe_configuration_recorders(
        &self,
        input: DescribeConfigurationRecordersInput,
    ) -> ApiResult<DescribeConfigurationRecordersOutput> {
        self.describe_calls.fetch_add(1, Ordering::SeqCst);

        let recorders = self.recorders.lock().unwrap();
        let mut found = Vec::new();
        for name in &input.configuration_recorder_names {
            let recorder = recorders.get(name).ok_or_else(|| Self::no_such_recorder(name))?;
            found.push(recorder.clone());
        }

        if self.answer_with_duplicates.load(Ordering::SeqCst)
            && let Some(first) = found.first().cloned()
        {
            found.push(first);
        }

        Ok(DescribeConfigurationRecordersOutput {
            configuration_recorders: found,
        })
    }

    async fn delete_configuration_recorder(
        &self,
        input: DeleteConfigurationRecorderInput,
    ) -> ApiResult<()> {
        let name = input.configuration_recorder_name;
        match self.recorders.lock().unwrap().remove(&name) {
            Some(_) => Ok(()),
            None => Err(Self::no_such_recorder(&name)),
        }
    }
}

pub fn test_conn(mock: &MockConfigService) -> AwsClient {
    AwsClient::new(&ProviderConfig::new("us-west-2", "123456789012"))
        .unwrap()
        .with_configservice(Arc::new(mock.clone()))
}
