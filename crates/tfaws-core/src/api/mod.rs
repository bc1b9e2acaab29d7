//! Service client seams
//!
//! Each module holds the structured request/response shapes of one remote
//! service and the async trait the host implements on top of its SDK. Shape
//! fields are `Option<_>` wherever the service may omit them.
//!
//! - [`s3control::S3ControlApi`]: S3 access points
//! - [`configservice::ConfigServiceApi`]: Config configuration recorders
//! - [`ses::SesApi`]: SES identity notification settings
//! - [`events::EventsApi`]: EventBridge listings

pub mod configservice;
pub mod events;
pub mod s3control;
pub mod ses;

pub use configservice::ConfigServiceApi;
pub use events::EventsApi;
pub use s3control::S3ControlApi;
pub use ses::SesApi;

/// Result of a single service call
pub type ApiResult<T> = std::result::Result<T, crate::error::ApiError>;
