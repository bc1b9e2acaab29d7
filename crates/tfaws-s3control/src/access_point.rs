//! `aws_s3_access_point`
//!
//! Regional access points are tracked as `ACCOUNT_ID:NAME`. Access points on
//! S3 on Outposts only exist as ARNs, so the ARN is both the identifier and
//! the name passed to every follow-up call.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tfaws_core::api::s3control::{
    AccessPointKey, CreateAccessPointInput, ERR_CODE_NO_SUCH_ACCESS_POINT,
    ERR_CODE_NO_SUCH_ACCESS_POINT_POLICY, PublicAccessBlockConfiguration,
    PutAccessPointPolicyInput, S3ControlApi, VpcConfiguration,
};
use tfaws_core::diff::{ChangeSet, suppress};
use tfaws_core::ident::{ACCOUNT_NAME_FORMAT, account_name_id, parse_account_name_id};
use tfaws_core::schema::{Attribute, AttributeMode, ResourceSchema, Validator};
use tfaws_core::{Arn, AwsClient, Error, ReadOutcome, Resource, ResourceState, Result};
use tracing::{debug, warn};

const TYPE_NAME: &str = "aws_s3_access_point";
const RESOURCE: &str = "S3 Control Access Point";

/// Local representation of an access point
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AccessPointConfig {
    /// Owning account; the provider's account when unset
    #[serde(default)]
    pub account_id: Option<String>,
    #[serde(default)]
    pub arn: String,
    pub bucket: String,
    #[serde(default)]
    pub domain_name: String,
    #[serde(default)]
    pub has_public_access_policy: bool,
    pub name: String,
    #[serde(default)]
    pub network_origin: String,
    /// JSON policy document; empty means no policy
    #[serde(default)]
    pub policy: String,
    #[serde(default)]
    pub public_access_block_configuration: Vec<PublicAccessBlockBlock>,
    #[serde(default)]
    pub vpc_configuration: Vec<VpcConfigurationBlock>,
}

/// `public_access_block_configuration` block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicAccessBlockBlock {
    #[serde(default = "default_true")]
    pub block_public_acls: bool,
    #[serde(default = "default_true")]
    pub block_public_policy: bool,
    #[serde(default = "default_true")]
    pub ignore_public_acls: bool,
    #[serde(default = "default_true")]
    pub restrict_public_buckets: bool,
}

impl Default for PublicAccessBlockBlock {
    fn default() -> Self {
        Self {
            block_public_acls: true,
            block_public_policy: true,
            ignore_public_acls: true,
            restrict_public_buckets: true,
        }
    }
}

/// `vpc_configuration` block
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VpcConfigurationBlock {
    pub vpc_id: String,
}

fn default_true() -> bool {
    true
}

/// Split an access point identifier into account id and name
///
/// An ARN identifier yields the ARN's account and the full ARN as the name.
pub fn parse_access_point_id(id: &str) -> Result<(String, String)> {
    parse_account_name_id(id)
}

pub fn expand_vpc_configuration(blocks: &[VpcConfigurationBlock]) -> Option<VpcConfiguration> {
    let block = blocks.first()?;

    Some(VpcConfiguration {
        vpc_id: Some(block.vpc_id.clone()),
    })
}

pub fn flatten_vpc_configuration(config: Option<&VpcConfiguration>) -> Vec<VpcConfigurationBlock> {
    let Some(config) = config else {
        return Vec::new();
    };

    vec![VpcConfigurationBlock {
        vpc_id: config.vpc_id.clone().unwrap_or_default(),
    }]
}

pub fn expand_public_access_block_configuration(
    blocks: &[PublicAccessBlockBlock],
) -> Option<PublicAccessBlockConfiguration> {
    let block = blocks.first()?;

    Some(PublicAccessBlockConfiguration {
        block_public_acls: Some(block.block_public_acls),
        block_public_policy: Some(block.block_public_policy),
        ignore_public_acls: Some(block.ignore_public_acls),
        restrict_public_buckets: Some(block.restrict_public_buckets),
    })
}

pub fn flatten_public_access_block_configuration(
    config: Option<&PublicAccessBlockConfiguration>,
) -> Vec<PublicAccessBlockBlock> {
    let Some(config) = config else {
        return Vec::new();
    };

    vec![PublicAccessBlockBlock {
        block_public_acls: config.block_public_acls.unwrap_or_default(),
        block_public_policy: config.block_public_policy.unwrap_or_default(),
        ignore_public_acls: config.ignore_public_acls.unwrap_or_default(),
        restrict_public_buckets: config.restrict_public_buckets.unwrap_or_default(),
    }]
}

fn is_outposts_name(name: &str) -> bool {
    name.starts_with("arn:")
}

/// Adapter for `aws_s3_access_point`
#[derive(Debug, Clone, Copy, Default)]
pub struct AccessPointResource;

impl AccessPointResource {
    async fn put_policy(
        &self,
        client: &dyn S3ControlApi,
        id: &str,
        key: &AccessPointKey,
        policy: &str,
    ) -> Result<()> {
        debug!("Putting S3 Access Point policy: {}", id);
        client
            .put_access_point_policy(PutAccessPointPolicyInput {
                account_id: key.account_id.clone(),
                name: key.name.clone(),
                policy: policy.to_string(),
            })
            .await
            .map_err(|e| Error::remote("putting policy of", RESOURCE, id, e))
    }

    async fn read_policy(
        &self,
        client: &dyn S3ControlApi,
        id: &str,
        key: &AccessPointKey,
    ) -> Result<String> {
        match client.get_access_point_policy(key.clone()).await {
            Ok(output) => Ok(output.policy.unwrap_or_default()),
            Err(e) if e.code_equals(ERR_CODE_NO_SUCH_ACCESS_POINT_POLICY) => Ok(String::new()),
            Err(e) => Err(Error::remote("reading policy of", RESOURCE, id, e)),
        }
    }

    async fn read_has_public_access_policy(
        &self,
        client: &dyn S3ControlApi,
        id: &str,
        key: &AccessPointKey,
    ) -> Result<bool> {
        // S3 on Outposts cannot have public policies
        if is_outposts_name(&key.name) {
            return Ok(false);
        }

        match client.get_access_point_policy_status(key.clone()).await {
            Ok(output) => Ok(output
                .policy_status
                .and_then(|status| status.is_public)
                .unwrap_or(false)),
            Err(e) if e.code_equals(ERR_CODE_NO_SUCH_ACCESS_POINT_POLICY) => Ok(false),
            Err(e) => Err(Error::remote("reading policy status of", RESOURCE, id, e)),
        }
    }
}

#[async_trait]
impl Resource for AccessPointResource {
    type Config = AccessPointConfig;

    fn type_name(&self) -> &'static str {
        TYPE_NAME
    }

    fn schema(&self) -> ResourceSchema {
        let public_access_block: Vec<Attribute> = [
            "block_public_acls",
            "block_public_policy",
            "ignore_public_acls",
            "restrict_public_buckets",
        ]
        .into_iter()
        .map(|name| Attribute::optional_bool(name).default_value(true).force_new())
        .collect();

        ResourceSchema::new(TYPE_NAME)
            .attribute(
                Attribute::optional_computed_string("account_id")
                    .force_new()
                    .validate(Validator::AccountId),
            )
            .attribute(Attribute::computed_string("arn"))
            .attribute(
                Attribute::required_string("bucket")
                    .force_new()
                    .validate(Validator::NoZeroValue),
            )
            .attribute(Attribute::computed_string("domain_name"))
            .attribute(Attribute::computed_bool("has_public_access_policy"))
            .attribute(
                Attribute::required_string("name")
                    .force_new()
                    .validate(Validator::NoZeroValue),
            )
            .attribute(Attribute::computed_string("network_origin"))
            .attribute(
                Attribute::optional_string("policy").suppress_diff(suppress::equivalent_policies),
            )
            .attribute(
                Attribute::block(
                    "public_access_block_configuration",
                    AttributeMode::Optional,
                    1,
                    public_access_block,
                )
                .force_new()
                .suppress_diff(suppress::missing_optional_block),
            )
            .attribute(
                Attribute::block(
                    "vpc_configuration",
                    AttributeMode::Optional,
                    1,
                    vec![Attribute::required_string("vpc_id")],
                )
                .force_new(),
            )
            .importable()
    }

    async fn create(
        &self,
        conn: &AwsClient,
        config: &AccessPointConfig,
    ) -> Result<ResourceState<AccessPointConfig>> {
        let client = conn.s3control()?;

        let account_id = config
            .account_id
            .clone()
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| conn.account_id.clone());

        let input = CreateAccessPointInput {
            account_id: account_id.clone(),
            bucket: config.bucket.clone(),
            name: config.name.clone(),
            public_access_block_configuration: expand_public_access_block_configuration(
                &config.public_access_block_configuration,
            ),
            vpc_configuration: expand_vpc_configuration(&config.vpc_configuration),
        };

        debug!("Creating S3 Access Point: {:?}", input);
        let output = client
            .create_access_point(input)
            .await
            .map_err(|e| Error::remote("creating", RESOURCE, &config.name, e))?;

        let access_point_arn = output.access_point_arn.unwrap_or_default();
        let (id, name) = match Arn::parse(&access_point_arn) {
            Ok(arn) if arn.resource.starts_with("outpost/") => {
                (access_point_arn.clone(), access_point_arn)
            }
            _ => (account_name_id(&account_id, &config.name), config.name.clone()),
        };

        if !config.policy.is_empty() {
            let key = AccessPointKey { account_id, name };
            self.put_policy(client, &id, &key, &config.policy).await?;
        }

        self.read(conn, &id).await?.require(RESOURCE, &id)
    }

    async fn read(&self, conn: &AwsClient, id: &str) -> Result<ReadOutcome<AccessPointConfig>> {
        let (account_id, name) = parse_access_point_id(id)?;
        let client = conn.s3control()?;
        let key = AccessPointKey {
            account_id: account_id.clone(),
            name: name.clone(),
        };

        let output = match client.get_access_point(key.clone()).await {
            Ok(output) => output,
            Err(e) if e.code_equals(ERR_CODE_NO_SUCH_ACCESS_POINT) => {
                warn!("S3 Access Point ({}) not found, removing from state", id);
                return Ok(ReadOutcome::NotFound);
            }
            Err(e) => return Err(Error::remote("reading", RESOURCE, id, e)),
        };

        let remote_name = output.name.clone().unwrap_or_default();
        let remote_bucket = output.bucket.clone().unwrap_or_default();

        let (arn, bucket) = if is_outposts_name(&name) {
            let access_point_arn = Arn::parse(&name).map_err(|_| {
                Error::malformed_id(id, format!("{} or an access point ARN", ACCOUNT_NAME_FORMAT))
            })?;

            let bucket_arn = Arn {
                resource: access_point_arn.resource.replacen(
                    &format!("accesspoint/{}", remote_name),
                    &format!("bucket/{}", remote_bucket),
                    1,
                ),
                ..access_point_arn
            };

            (name.clone(), bucket_arn.to_string())
        } else {
            let access_point_arn = Arn {
                partition: conn.partition.clone(),
                service: "s3".to_string(),
                region: conn.region.clone(),
                account_id: account_id.clone(),
                resource: format!("accesspoint/{}", remote_name),
            };

            (access_point_arn.to_string(), remote_bucket)
        };

        let policy = self.read_policy(client, id, &key).await?;
        let has_public_access_policy = self.read_has_public_access_policy(client, id, &key).await?;

        let config = AccessPointConfig {
            domain_name: conn
                .regional_hostname(&format!("{}-{}.s3-accesspoint", remote_name, account_id)),
            account_id: Some(account_id),
            arn,
            bucket,
            has_public_access_policy,
            name: remote_name,
            network_origin: output.network_origin.clone().unwrap_or_default(),
            policy,
            public_access_block_configuration: flatten_public_access_block_configuration(
                output.public_access_block_configuration.as_ref(),
            ),
            vpc_configuration: flatten_vpc_configuration(output.vpc_configuration.as_ref()),
        };

        Ok(ReadOutcome::Present(ResourceState::new(id, config)))
    }

    async fn update(
        &self,
        conn: &AwsClient,
        id: &str,
        old: &AccessPointConfig,
        new: &AccessPointConfig,
    ) -> Result<ReadOutcome<AccessPointConfig>> {
        let (account_id, name) = parse_access_point_id(id)?;
        let changes = ChangeSet::between(&self.schema(), old, new)?;

        if changes.has_change("policy") {
            let client = conn.s3control()?;
            let key = AccessPointKey { account_id, name };

            if new.policy.is_empty() {
                debug!("Deleting S3 Access Point policy: {}", id);
                client
                    .delete_access_point_policy(key)
                    .await
                    .map_err(|e| Error::remote("deleting policy of", RESOURCE, id, e))?;
            } else {
                self.put_policy(client, id, &key, &new.policy).await?;
            }
        }

        self.read(conn, id).await
    }

    async fn delete(&self, conn: &AwsClient, id: &str) -> Result<()> {
        let (account_id, name) = parse_access_point_id(id)?;
        let client = conn.s3control()?;

        debug!("Deleting S3 Access Point: {}", id);
        match client.delete_access_point(AccessPointKey { account_id, name }).await {
            Ok(()) => Ok(()),
            Err(e) if e.code_equals(ERR_CODE_NO_SUCH_ACCESS_POINT) => Ok(()),
            Err(e) => Err(Error::remote("deleting", RESOURCE, id, e)),
        }
    }
}
