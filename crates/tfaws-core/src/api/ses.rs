//! SES shapes and client trait

use super::ApiResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Kind of notification an SNS topic receives for an identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NotificationType {
    Bounce,
    Complaint,
    Delivery,
}

impl NotificationType {
    /// Every notification type, in the service's order
    pub const ALL: [NotificationType; 3] = [
        NotificationType::Bounce,
        NotificationType::Complaint,
        NotificationType::Delivery,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            NotificationType::Bounce => "Bounce",
            NotificationType::Complaint => "Complaint",
            NotificationType::Delivery => "Delivery",
        }
    }
}

impl fmt::Display for NotificationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NotificationType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("unknown notification type {:?}", s))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetIdentityNotificationTopicInput {
    pub identity: String,
    pub notification_type: NotificationType,
    /// `None` clears the topic
    pub sns_topic: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetIdentityHeadersInNotificationsEnabledInput {
    pub identity: String,
    pub notification_type: NotificationType,
    pub enabled: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetIdentityNotificationAttributesInput {
    pub identities: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentityNotificationAttributes {
    pub bounce_topic: Option<String>,
    pub complaint_topic: Option<String>,
    pub delivery_topic: Option<String>,
    pub forwarding_enabled: Option<bool>,
    pub headers_in_bounce_notifications_enabled: Option<bool>,
    pub headers_in_complaint_notifications_enabled: Option<bool>,
    pub headers_in_delivery_notifications_enabled: Option<bool>,
}

impl IdentityNotificationAttributes {
    /// Topic configured for `notification_type`
    pub fn topic(&self, notification_type: NotificationType) -> Option<&str> {
        match notification_type {
            NotificationType::Bounce => self.bounce_topic.as_deref(),
            NotificationType::Complaint => self.complaint_topic.as_deref(),
            NotificationType::Delivery => self.delivery_topic.as_deref(),
        }
    }

    /// Whether original headers are included for `notification_type`
    pub fn headers_enabled(&self, notification_type: NotificationType) -> Option<bool> {
        match notification_type {
            NotificationType::Bounce => self.headers_in_bounce_notifications_enabled,
            NotificationType::Complaint => self.headers_in_complaint_notifications_enabled,
            NotificationType::Delivery => self.headers_in_delivery_notifications_enabled,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetIdentityNotificationAttributesOutput {
    pub notification_attributes: HashMap<String, IdentityNotificationAttributes>,
}

/// SES client
#[async_trait]
pub trait SesApi: Send + Sync {
    async fn set_identity_notification_topic(
        &self,
        input: SetIdentityNotificationTopicInput,
    ) -> ApiResult<()>;

    async fn set_identity_headers_in_notifications_enabled(
        &self,
        input: SetIdentityHeadersInNotificationsEnabledInput,
    ) -> ApiResult<()>;

    async fn get_identity_notification_attributes(
        &self,
        input: GetIdentityNotificationAttributesInput,
    ) -> ApiResult<GetIdentityNotificationAttributesOutput>;
}
