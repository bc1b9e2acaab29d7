// # Config Service resource adapters
//
// - `aws_config_configuration_recorder`: [`ConfigurationRecorderResource`]
//
// A region holds at most one configuration recorder; its name is the
// identifier.

pub mod configuration_recorder;

pub use configuration_recorder::{ConfigurationRecorderConfig, ConfigurationRecorderResource};

/// Register the Config Service adapters with a registry
pub fn register(registry: &tfaws_core::ResourceRegistry) {
    registry.register_resource(ConfigurationRecorderResource);
}
