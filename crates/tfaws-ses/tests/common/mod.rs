//! In-memory SES for the identity notification topic tests

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tfaws_core::api::ApiResult;
use tfaws_core::api::ses::*;
use tfaws_core::{ApiError, AwsClient, ProviderConfig};

pub const TOPIC_ARN: &str = "arn:aws:sns:us-west-2:123456789012:ses-notifications";

/// SES double holding verified identities and their notification settings
#[derive(Clone, Default)]
pub struct MockSes {
    identities: Arc<Mutex<HashMap<String, IdentityNotificationAttributes>>>,
    topic_calls: Arc<AtomicUsize>,
    header_calls: Arc<AtomicUsize>,
    get_calls: Arc<AtomicUsize>,
}

impl MockSes {
    pub fn with_identity(identity: &str) -> Self {
        let mock = Self::default();
        mock.verify(identity);
        mock
    }

    pub fn verify(&self, identity: &str) {
        self.identities.lock().unwrap().insert(
            identity.to_string(),
            IdentityNotificationAttributes {
                forwarding_enabled: Some(true),
                headers_in_bounce_notifications_enabled: Some(false),
                headers_in_complaint_notifications_enabled: Some(false),
                headers_in_delivery_notifications_enabled: Some(false),
                ..Default::default()
            },
        );
    }

    pub fn unverify(&self, identity: &str) {
        self.identities.lock().unwrap().remove(identity);
    }

    pub fn attributes(&self, identity: &str) -> Option<IdentityNotificationAttributes> {
        self.identities.lock().unwrap().get(identity).cloned()
    }

    pub fn topic_calls(&self) -> usize {
        self.topic_calls.load(Ordering::SeqCst)
    }

    pub fn header_calls(&self) -> usize {
        self.header_calls.load(Ordering::SeqCst)
    }

    pub fn get_calls(&self) -> usize {
        self.get_calls.load(Ordering::SeqCst)
    }

    fn unverified(identity: &str) -> ApiError {
        ApiError::new(
            "InvalidParameterValue",
            format!("Identity <{}> does not exist.", identity),
        )
    }
}

#[async_trait]
impl SesApi for MockSes {
    async fn set_identity_notification_topic(
        &self,
        input: SetIdentityNotificationTopicInput,
    ) -> ApiResult<()> {
        self.topic_calls.fetch_add(1, Ordering::SeqCst);

        let mut identities = self.identities.lock().unwrap();
        let attributes = identities
            .get_mut(&input.identity)
            .ok_or_else(|| Self::unverified(&input.identity))?;

        let topic = match input.notification_type {
            NotificationType::Bounce => &mut attributes.bounce_topic,
            NotificationType::Complaint => &mut attributes.complaint_topic,
            NotificationType::Delivery => &mut attributes.delivery_topic,
        };
        *topic = input.sns_topic;
        Ok(())
    }

    async fn set_identity_headers_in_notifications_enabled(
        &self,
        input: SetIdentityHeadersInNotificationsEnabledInput,
    ) -> ApiResult<()> {
        self.header_calls.fetch_add(1, Ordering::SeqCst);

        let mut identities = self.identities.lock().unwrap();
        let attributes = identities
            .get_mut(&input.identity)
            .ok_or_else(|| Self::unverified(&input.identity))?;

        let enabled = match input.notification_type {
            NotificationType::Bounce => &mut attributes.headers_in_bounce_notifications_enabled,
            NotificationType::Complaint => {
                &mut attributes.headers_in_complaint_notifications_enabled
            }
            NotificationType::Delivery => &mut attributes.headers_in_delivery_notifications_enabled,
        };
        *enabled = Some(input.enabled);
        Ok(())
    }

    async fn get_identity_notification_attributes(
        &self,
        input: GetIdentityNotificationAttributesInput,
    ) -> ApiResult<GetIdentityNotificationAttributesOutput> {
        self.get_calls.fetch_add(1, Ordering::SeqCst);

        let identities = self.identities.lock().unwrap();
        let notification_attributes = input
            .identities
            .iter()
            .filter_map(|identity| {
                identities
                    .get(identity)
                    .map(|attributes| (identity.clone(), attributes.clone()))
            })
            .collect();

        Ok(GetIdentityNotificationAttributesOutput {
            notification_attributes,
        })
    }
}

pub fn test_conn(mock: &MockSes) -> AwsClient {
    AwsClient::new(&ProviderConfig::new("us-west-2", "123456789012"))
        .unwrap()
        .with_ses(Arc::new(mock.clone()))
}
