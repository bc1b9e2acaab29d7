// # S3 Control resource adapters
//
// - `aws_s3_access_point`: [`AccessPointResource`]
//
// Identifiers are `ACCOUNT_ID:NAME` for regional access points and the
// access point ARN for S3 on Outposts.

pub mod access_point;

pub use access_point::{AccessPointConfig, AccessPointResource, parse_access_point_id};

/// Register the S3 Control adapters with a registry
///
/// # Example
///
/// ```rust
/// use tfaws_core::ResourceRegistry;
///
/// let registry = ResourceRegistry::new();
/// tfaws_s3control::register(&registry);
/// assert!(registry.has_resource("aws_s3_access_point"));
/// ```
pub fn register(registry: &tfaws_core::ResourceRegistry) {
    registry.register_resource(AccessPointResource);
}
