//! In-memory S3 Control service for the access point tests

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tfaws_core::api::ApiResult;
use tfaws_core::api::s3control::*;
use tfaws_core::{ApiError, AwsClient, ProviderConfig};

pub const ACCOUNT_ID: &str = "123456789012";
pub const REGION: &str = "us-west-2";
pub const OUTPOST_ID: &str = "op-01234567890123456";

#[derive(Debug, Clone)]
pub struct StoredAccessPoint {
    pub name: String,
    pub bucket: String,
    pub vpc_configuration: Option<VpcConfiguration>,
    pub public_access_block_configuration: PublicAccessBlockConfiguration,
    pub policy: Option<String>,
}

/// S3 Control double keyed by `(account, name-or-arn)`
#[derive(Clone, Default)]
pub struct MockS3Control {
    access_points: Arc<Mutex<HashMap<(String, String), StoredAccessPoint>>>,
    /// Create returns an S3 on Outposts ARN
    pub outposts: bool,
    mutation_calls: Arc<AtomicUsize>,
    get_calls: Arc<AtomicUsize>,
    policy_puts: Arc<AtomicUsize>,
    policy_deletes: Arc<AtomicUsize>,
}

impl MockS3Control {
    pub fn outposts() -> Self {
        Self {
            outposts: true,
            ..Self::default()
        }
    }

    pub fn mutation_calls(&self) -> usize {
        self.mutation_calls.load(Ordering::SeqCst)
    }

    pub fn get_calls(&self) -> usize {
        self.get_calls.load(Ordering::SeqCst)
    }

    pub fn policy_puts(&self) -> usize {
        self.policy_puts.load(Ordering::SeqCst)
    }

    pub fn policy_deletes(&self) -> usize {
        self.policy_deletes.load(Ordering::SeqCst)
    }

    pub fn stored(&self, account_id: &str, name: &str) -> Option<StoredAccessPoint> {
        self.access_points
            .lock()
            .unwrap()
            .get(&(account_id.to_string(), name.to_string()))
            .cloned()
    }

    /// Remove an access point behind the adapter's back
    pub fn remove(&self, account_id: &str, name: &str) {
        self.access_points
            .lock()
            .unwrap()
            .remove(&(account_id.to_string(), name.to_string()));
    }

    fn lookup(&self, key: &AccessPointKey) -> ApiResult<StoredAccessPoint> {
        self.stored(&key.account_id, &key.name)
            .ok_or_else(Self::no_such_access_point)
    }

    fn no_such_access_point() -> ApiError {
        ApiError::new(
            ERR_CODE_NO_SUCH_ACCESS_POINT,
            "The specified accesspoint does not exist",
        )
    }

    fn no_policy() -> ApiError {
        ApiError::new(
            ERR_CODE_NO_SUCH_ACCESS_POINT_POLICY,
            "The specified accesspoint does not have an accesspoint policy",
        )
    }
}

#[async_trait]
impl S3ControlApi for MockS3Control {
    async fn create_access_point(
        &self,
        input: CreateAccessPointInput,
    ) -> ApiResult<CreateAccessPointOutput> {
        self.mutation_calls.fetch_add(1, Ordering::SeqCst);

        let arn = if self.outposts {
            format!(
                "arn:aws:s3-outposts:{}:{}:outpost/{}/accesspoint/{}",
                REGION, input.account_id, OUTPOST_ID, input.name
            )
        } else {
            format!("arn:aws:s3:{}:{}:accesspoint/{}", REGION, input.account_id, input.name)
        };
        let stored_name = if self.outposts { arn.clone() } else { input.name.clone() };

        let mut access_points = self.access_points.lock().unwrap();
        let key = (input.account_id.clone(), stored_name);
        if access_points.contains_key(&key) {
            return Err(ApiError::new(
                "AccessPointAlreadyOwnedByYou",
                "Your previous request to create the named accesspoint succeeded \
                 and you already own it.",
            ));
        }

        access_points.insert(
            key,
            StoredAccessPoint {
                name: input.name,
                bucket: input.bucket,
                vpc_configuration: input.vpc_configuration,
                public_access_block_configuration: input
                    .public_access_block_configuration
                    .unwrap_or(PublicAccessBlockConfiguration {
                        block_public_acls: Some(true),
                        block_public_policy: Some(true),
                        ignore_public_acls: Some(true),
                        restrict_public_buckets: Some(true),
                    }),
                policy: None,
            },
        );

        Ok(CreateAccessPointOutput {
            access_point_arn: Some(arn),
        })
    }

    async fn get_access_point(&self, key: AccessPointKey) -> ApiResult<GetAccessPointOutput> {
        self.get_calls.fetch_add(1, Ordering::SeqCst);
        let stored = self.lookup(&key)?;

        let network_origin = if stored.vpc_configuration.is_some() { "VPC" } else { "Internet" };

        Ok(GetAccessPointOutput {
            name: Some(stored.name),
            bucket: Some(stored.bucket),
            network_origin: Some(network_origin.to_string()),
            vpc_configuration: stored.vpc_configuration,
            public_access_block_configuration: Some(stored.public_access_block_configuration),
        })
    }

    async fn delete_access_point(&self, key: AccessPointKey) -> ApiResult<()> {
        self.mutation_calls.fetch_add(1, Ordering::SeqCst);
        self.lookup(&key)?;
        self.remove(&key.account_id, &key.name);
        Ok(())
    }

    async fn put_access_point_policy(&self, input: PutAccessPointPolicyInput) -> ApiResult<()> {
        self.mutation_calls.fetch_add(1, Ordering::SeqCst);
        self.policy_puts.fetch_add(1, Ordering::SeqCst);

        let mut access_points = self.access_points.lock().unwrap();
        let stored = access_points
            .get_mut(&(input.account_id, input.name))
            .ok_or_else(Self::no_such_access_point)?;
        stored.policy = Some(input.policy);
        Ok(())
    }

    async fn get_access_point_policy(
        &self,
        key: AccessPointKey,
    ) -> ApiResult<GetAccessPointPolicyOutput> {
        let stored = self.lookup(&key)?;
        match stored.policy {
            Some(policy) => Ok(GetAccessPointPolicyOutput { policy: Some(policy) }),
            None => Err(Self::no_policy()),
        }
    }

    async fn delete_access_point_policy(&self, key: AccessPointKey) -> ApiResult<()> {
        self.mutation_calls.fetch_add(1, Ordering::SeqCst);
        self.policy_deletes.fetch_add(1, Ordering::SeqCst);

        let mut access_points = self.access_points.lock().unwrap();
        let stored = access_points
            .get_mut(&(key.account_id, key.name))
            .ok_or_else(Self::no_such_access_point)?;
        match stored.policy.take() {
            Some(_) => Ok(()),
            None => Err(Self::no_policy()),
        }
    }

    async fn get_access_point_policy_status(
        &self,
        key: AccessPointKey,
    ) -> ApiResult<GetAccessPointPolicyStatusOutput> {
        let stored = self.lookup(&key)?;
        let policy = stored.policy.ok_or_else(Self::no_policy)?;

        // Any wildcard principal makes the policy public
        let is_public = policy.contains("\"Principal\":\"*\"")
            || policy.contains("\"Principal\": \"*\"");

        Ok(GetAccessPointPolicyStatusOutput {
            policy_status: Some(PolicyStatus {
                is_public: Some(is_public),
            }),
        })
    }
}

pub fn test_conn(mock: &MockS3Control) -> AwsClient {
    AwsClient::new(&ProviderConfig::new(REGION, ACCOUNT_ID))
        .unwrap()
        .with_s3control(Arc::new(mock.clone()))
}

pub fn policy_document(principal: &str) -> String {
    format!(
        r#"{{"Version":"2012-10-17","Statement":[{{"Effect":"Allow","Principal":"{}","Action":"s3:GetObject","Resource":"arn:aws:s3:{}:{}:accesspoint/ap/object/*"}}]}}"#,
        principal, REGION, ACCOUNT_ID
    )
}
