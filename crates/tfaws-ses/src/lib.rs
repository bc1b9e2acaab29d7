// # SES resource adapters
//
// - `aws_ses_identity_notification_topic`: [`IdentityNotificationTopicResource`]

pub mod identity_notification_topic;

pub use identity_notification_topic::{
    IdentityNotificationTopicConfig, IdentityNotificationTopicResource,
    identity_notification_topic_id, parse_identity_notification_topic_id,
};

/// Register the SES adapters with a registry
pub fn register(registry: &tfaws_core::ResourceRegistry) {
    registry.register_resource(IdentityNotificationTopicResource);
}
