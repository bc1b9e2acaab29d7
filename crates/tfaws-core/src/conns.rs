//! Connection handle passed to every adapter operation
//!
//! The host builds one [`AwsClient`] per provider configuration and plugs in
//! a client for each service it has credentials for. Adapters never build
//! clients themselves.

use crate::api::{ConfigServiceApi, EventsApi, S3ControlApi, SesApi};
use crate::config::ProviderConfig;
use crate::error::{Error, Result};
use std::fmt;
use std::sync::Arc;

/// Account/region identity plus the per-service clients
#[derive(Clone)]
pub struct AwsClient {
    pub account_id: String,
    pub region: String,
    pub partition: String,
    pub dns_suffix: String,

    s3control: Option<Arc<dyn S3ControlApi>>,
    configservice: Option<Arc<dyn ConfigServiceApi>>,
    ses: Option<Arc<dyn SesApi>>,
    events: Option<Arc<dyn EventsApi>>,
}

// Service clients are opaque trait objects; only say which ones are present
impl fmt::Debug for AwsClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AwsClient")
            .field("account_id", &self.account_id)
            .field("region", &self.region)
            .field("partition", &self.partition)
            .field("dns_suffix", &self.dns_suffix)
            .field("s3control", &self.s3control.is_some())
            .field("configservice", &self.configservice.is_some())
            .field("ses", &self.ses.is_some())
            .field("events", &self.events.is_some())
            .finish()
    }
}

impl AwsClient {
    /// Create a client with no services attached
    pub fn new(config: &ProviderConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            account_id: config.account_id.clone(),
            region: config.region.clone(),
            partition: config.partition.clone(),
            dns_suffix: config.resolved_dns_suffix(),
            s3control: None,
            configservice: None,
            ses: None,
            events: None,
        })
    }

    pub fn with_s3control(mut self, client: Arc<dyn S3ControlApi>) -> Self {
        self.s3control = Some(client);
        self
    }

    pub fn with_configservice(mut self, client: Arc<dyn ConfigServiceApi>) -> Self {
        self.configservice = Some(client);
        self
    }

    pub fn with_ses(mut self, client: Arc<dyn SesApi>) -> Self {
        self.ses = Some(client);
        self
    }

    pub fn with_events(mut self, client: Arc<dyn EventsApi>) -> Self {
        self.events = Some(client);
        self
    }

    pub fn s3control(&self) -> Result<&dyn S3ControlApi> {
        self.s3control
            .as_deref()
            .ok_or_else(|| Error::config("S3 Control client is not configured"))
    }

    pub fn configservice(&self) -> Result<&dyn ConfigServiceApi> {
        self.configservice
            .as_deref()
            .ok_or_else(|| Error::config("Config Service client is not configured"))
    }

    pub fn ses(&self) -> Result<&dyn SesApi> {
        self.ses
            .as_deref()
            .ok_or_else(|| Error::config("SES client is not configured"))
    }

    pub fn events(&self) -> Result<&dyn EventsApi> {
        self.events
            .as_deref()
            .ok_or_else(|| Error::config("EventBridge client is not configured"))
    }

    /// `<prefix>.<region>.<dns suffix>`
    pub fn regional_hostname(&self, prefix: &str) -> String {
        format!("{}.{}.{}", prefix, self.region, self.dns_suffix)
    }
}
