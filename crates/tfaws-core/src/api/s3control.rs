//! S3 Control shapes and client trait

use super::ApiResult;
use async_trait::async_trait;

/// Error code for a missing access point
pub const ERR_CODE_NO_SUCH_ACCESS_POINT: &str = "NoSuchAccessPoint";
/// Error code for an access point without a policy
pub const ERR_CODE_NO_SUCH_ACCESS_POINT_POLICY: &str = "NoSuchAccessPointPolicy";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VpcConfiguration {
    pub vpc_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PublicAccessBlockConfiguration {
    pub block_public_acls: Option<bool>,
    pub block_public_policy: Option<bool>,
    pub ignore_public_acls: Option<bool>,
    pub restrict_public_buckets: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateAccessPointInput {
    pub account_id: String,
    pub bucket: String,
    pub name: String,
    pub public_access_block_configuration: Option<PublicAccessBlockConfiguration>,
    pub vpc_configuration: Option<VpcConfiguration>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateAccessPointOutput {
    pub access_point_arn: Option<String>,
}

/// Addresses one access point: `name` is a plain name or an outposts ARN
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccessPointKey {
    pub account_id: String,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetAccessPointOutput {
    pub name: Option<String>,
    pub bucket: Option<String>,
    /// `Internet` or `VPC`
    pub network_origin: Option<String>,
    pub vpc_configuration: Option<VpcConfiguration>,
    pub public_access_block_configuration: Option<PublicAccessBlockConfiguration>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PutAccessPointPolicyInput {
    pub account_id: String,
    pub name: String,
    pub policy: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetAccessPointPolicyOutput {
    pub policy: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PolicyStatus {
    pub is_public: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetAccessPointPolicyStatusOutput {
    pub policy_status: Option<PolicyStatus>,
}

/// S3 Control client
#[async_trait]
pub trait S3ControlApi: Send + Sync {
    async fn create_access_point(
        &self,
        input: CreateAccessPointInput,
    ) -> ApiResult<CreateAccessPointOutput>;

    async fn get_access_point(&self, key: AccessPointKey) -> ApiResult<GetAccessPointOutput>;

    async fn delete_access_point(&self, key: AccessPointKey) -> ApiResult<()>;

    async fn put_access_point_policy(&self, input: PutAccessPointPolicyInput) -> ApiResult<()>;

    async fn get_access_point_policy(
        &self,
        key: AccessPointKey,
    ) -> ApiResult<GetAccessPointPolicyOutput>;

    async fn delete_access_point_policy(&self, key: AccessPointKey) -> ApiResult<()>;

    async fn get_access_point_policy_status(
        &self,
        key: AccessPointKey,
    ) -> ApiResult<GetAccessPointPolicyStatusOutput>;
}
