//! Provider configuration
//!
//! Identifies the account and region every adapter operates in. Built by the
//! host (or from environment variables) and turned into an
//! [`AwsClient`](crate::conns::AwsClient).

use serde::{Deserialize, Serialize};
use std::env;

/// Provider-level configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Region requests are made in (e.g. "us-west-2")
    pub region: String,

    /// Account the credentials belong to
    pub account_id: String,

    /// Partition of the region ("aws", "aws-cn", "aws-us-gov", ...)
    #[serde(default = "default_partition")]
    pub partition: String,

    /// DNS suffix for service hostnames; derived from the partition when unset
    #[serde(default)]
    pub dns_suffix: Option<String>,
}

impl ProviderConfig {
    /// Create a configuration in the `aws` partition
    pub fn new(region: impl Into<String>, account_id: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            account_id: account_id.into(),
            partition: default_partition(),
            dns_suffix: None,
        }
    }

    /// Set the partition
    pub fn with_partition(mut self, partition: impl Into<String>) -> Self {
        self.partition = partition.into();
        self
    }

    /// Override the DNS suffix
    pub fn with_dns_suffix(mut self, dns_suffix: impl Into<String>) -> Self {
        self.dns_suffix = Some(dns_suffix.into());
        self
    }

    /// Load configuration from environment variables
    ///
    /// - `TFAWS_REGION` (falls back to `AWS_REGION`)
    /// - `TFAWS_ACCOUNT_ID`
    /// - `TFAWS_PARTITION` (default `aws`)
    /// - `TFAWS_DNS_SUFFIX` (optional)
    pub fn from_env() -> Result<Self, crate::Error> {
        let region = env::var("TFAWS_REGION")
            .or_else(|_| env::var("AWS_REGION"))
            .map_err(|_| crate::Error::config("TFAWS_REGION or AWS_REGION must be set"))?;
        let account_id = env::var("TFAWS_ACCOUNT_ID")
            .map_err(|_| crate::Error::config("TFAWS_ACCOUNT_ID must be set"))?;

        let config = Self {
            region,
            account_id,
            partition: env::var("TFAWS_PARTITION").unwrap_or_else(|_| default_partition()),
            dns_suffix: env::var("TFAWS_DNS_SUFFIX").ok().filter(|s| !s.is_empty()),
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        if self.region.is_empty() {
            return Err(crate::Error::config("region cannot be empty"));
        }
        if self.account_id.len() != 12 || !self.account_id.chars().all(|c| c.is_ascii_digit()) {
            return Err(crate::Error::config(format!(
                "account ID must be 12 digits, got {:?}",
                self.account_id
            )));
        }
        if self.partition.is_empty() {
            return Err(crate::Error::config("partition cannot be empty"));
        }
        Ok(())
    }

    /// DNS suffix for service hostnames in this partition
    pub fn resolved_dns_suffix(&self) -> String {
        if let Some(suffix) = &self.dns_suffix {
            return suffix.clone();
        }
        match self.partition.as_str() {
            "aws-cn" => "amazonaws.com.cn",
            "aws-iso" => "c2s.ic.gov",
            "aws-iso-b" => "sc2s.sgov.gov",
            _ => "amazonaws.com",
        }
        .to_string()
    }
}

fn default_partition() -> String {
    "aws".to_string()
}
