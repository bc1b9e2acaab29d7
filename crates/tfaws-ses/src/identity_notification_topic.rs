//! `aws_ses_identity_notification_topic`
//!
//! Binds an SNS topic to one notification type of an SES identity. The
//! identifier is `IDENTITY|TYPE`, e.g. `example.com|Bounce`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tfaws_core::api::SesApi;
use tfaws_core::api::ses::{
    GetIdentityNotificationAttributesInput, NotificationType,
    SetIdentityHeadersInNotificationsEnabledInput, SetIdentityNotificationTopicInput,
};
use tfaws_core::diff::ChangeSet;
use tfaws_core::schema::{Attribute, ResourceSchema, Validator};
use tfaws_core::{AwsClient, Error, ReadOutcome, Resource, ResourceState, Result};
use tracing::{debug, warn};

const TYPE_NAME: &str = "aws_ses_identity_notification_topic";
const RESOURCE: &str = "SES Identity Notification Topic";
const ID_SEPARATOR: char = '|';
const ID_FORMAT: &str = "IDENTITY|TYPE";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdentityNotificationTopicConfig {
    /// Verified email address or domain
    pub identity: String,
    pub notification_type: NotificationType,
    /// Empty disables publishing for this notification type
    #[serde(default)]
    pub topic_arn: String,
    #[serde(default)]
    pub include_original_headers: bool,
}

pub fn identity_notification_topic_id(
    identity: &str,
    notification_type: NotificationType,
) -> String {
    format!("{}{}{}", identity, ID_SEPARATOR, notification_type)
}

/// Split `IDENTITY|TYPE` on the first separator
pub fn parse_identity_notification_topic_id(id: &str) -> Result<(String, NotificationType)> {
    let malformed = || Error::malformed_id(id, ID_FORMAT);

    let (identity, notification_type) = id.split_once(ID_SEPARATOR).ok_or_else(malformed)?;
    if identity.is_empty() || notification_type.is_empty() {
        return Err(malformed());
    }

    let notification_type = notification_type.parse().map_err(|_| malformed())?;
    Ok((identity.to_string(), notification_type))
}

/// Adapter for `aws_ses_identity_notification_topic`
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityNotificationTopicResource;

impl IdentityNotificationTopicResource {
    async fn set_topic(
        &self,
        client: &dyn SesApi,
        action: &str,
        id: &str,
        identity: &str,
        notification_type: NotificationType,
        topic_arn: &str,
    ) -> Result<()> {
        let input = SetIdentityNotificationTopicInput {
            identity: identity.to_string(),
            notification_type,
            sns_topic: Some(topic_arn.to_string()).filter(|arn| !arn.is_empty()),
        };

        debug!("Setting SES Identity Notification Topic: {:?}", input);
        client
            .set_identity_notification_topic(input)
            .await
            .map_err(|e| Error::remote(action, RESOURCE, id, e))
    }

    async fn set_headers(
        &self,
        client: &dyn SesApi,
        action: &str,
        id: &str,
        identity: &str,
        notification_type: NotificationType,
        enabled: bool,
    ) -> Result<()> {
        let input = SetIdentityHeadersInNotificationsEnabledInput {
            identity: identity.to_string(),
            notification_type,
            enabled,
        };

        debug!("Setting SES Identity Notification Topic headers: {:?}", input);
        client
            .set_identity_headers_in_notifications_enabled(input)
            .await
            .map_err(|e| Error::remote(action, RESOURCE, id, e))
    }
}

#[async_trait]
impl Resource for IdentityNotificationTopicResource {
    type Config = IdentityNotificationTopicConfig;

    fn type_name(&self) -> &'static str {
        TYPE_NAME
    }

    fn schema(&self) -> ResourceSchema {
        let notification_types = NotificationType::ALL.iter().map(|t| t.as_str()).collect();

        ResourceSchema::new(TYPE_NAME)
            .attribute(
                Attribute::required_string("identity")
                    .force_new()
                    .validate(Validator::StringMatch {
                        pattern: r"^[a-zA-Z0-9\-._@:/]+$",
                        message: "must contain only alphanumeric characters, dashes, periods, \
                                  underscores, at signs, colons and slashes",
                    }),
            )
            .attribute(
                Attribute::required_string("notification_type")
                    .force_new()
                    .validate(Validator::StringInSlice {
                        values: notification_types,
                    }),
            )
            .attribute(Attribute::optional_string("topic_arn").validate(Validator::Arn))
            .attribute(Attribute::optional_bool("include_original_headers").default_value(false))
            .importable()
    }

    async fn create(
        &self,
        conn: &AwsClient,
        config: &IdentityNotificationTopicConfig,
    ) -> Result<ResourceState<IdentityNotificationTopicConfig>> {
        let client = conn.ses()?;
        let id = identity_notification_topic_id(&config.identity, config.notification_type);

        self.set_topic(
            client,
            "creating",
            &id,
            &config.identity,
            config.notification_type,
            &config.topic_arn,
        )
        .await?;
        self.set_headers(
            client,
            "creating",
            &id,
            &config.identity,
            config.notification_type,
            config.include_original_headers,
        )
        .await?;

        self.read(conn, &id).await?.require(RESOURCE, &id)
    }

    async fn read(
        &self,
        conn: &AwsClient,
        id: &str,
    ) -> Result<ReadOutcome<IdentityNotificationTopicConfig>> {
        let (identity, notification_type) = parse_identity_notification_topic_id(id)?;

        let input = GetIdentityNotificationAttributesInput {
            identities: vec![identity.clone()],
        };
        let mut output = conn
            .ses()?
            .get_identity_notification_attributes(input)
            .await
            .map_err(|e| Error::remote("reading", RESOURCE, id, e))?;

        let Some(attributes) = output.notification_attributes.remove(&identity) else {
            warn!("SES Identity Notification Topic ({}) not found, removing from state", id);
            return Ok(ReadOutcome::NotFound);
        };

        let config = IdentityNotificationTopicConfig {
            topic_arn: attributes.topic(notification_type).unwrap_or_default().to_string(),
            include_original_headers: attributes
                .headers_enabled(notification_type)
                .unwrap_or(false),
            identity,
            notification_type,
        };

        Ok(ReadOutcome::Present(ResourceState::new(id, config)))
    }

    async fn update(
        &self,
        conn: &AwsClient,
        id: &str,
        old: &IdentityNotificationTopicConfig,
        new: &IdentityNotificationTopicConfig,
    ) -> Result<ReadOutcome<IdentityNotificationTopicConfig>> {
        let (identity, notification_type) = parse_identity_notification_topic_id(id)?;
        let changes = ChangeSet::between(&self.schema(), old, new)?;

        if !changes.is_empty() {
            let client = conn.ses()?;

            if changes.has_change("topic_arn") {
                self.set_topic(client, "updating", id, &identity, notification_type, &new.topic_arn)
                    .await?;
            }
            if changes.has_change("include_original_headers") {
                self.set_headers(
                    client,
                    "updating",
                    id,
                    &identity,
                    notification_type,
                    new.include_original_headers,
                )
                .await?;
            }
        }

        self.read(conn, id).await
    }

    async fn delete(&self, conn: &AwsClient, id: &str) -> Result<()> {
        let (identity, notification_type) = parse_identity_notification_topic_id(id)?;

        self.set_topic(conn.ses()?, "deleting", id, &identity, notification_type, "")
            .await
    }
}
