//! Composite identifier helpers
//!
//! Account-scoped resources are tracked as `ACCOUNT_ID:NAME`. Resources that
//! only exist as ARNs (S3 on Outposts) are tracked by the literal ARN.

use crate::arn::Arn;
use crate::error::{Error, Result};

/// Expected-format text used in malformed identifier errors
pub const ACCOUNT_NAME_FORMAT: &str = "ACCOUNT_ID:NAME";

/// Build an `ACCOUNT_ID:NAME` identifier
pub fn account_name_id(account_id: &str, name: &str) -> String {
    format!("{}:{}", account_id, name)
}

/// Split an identifier into account id and name
///
/// ARNs are tried first: the account id comes from the ARN and the name is
/// the full ARN. Otherwise the identifier is split on its first `:` and both
/// parts must be non-empty.
pub fn parse_account_name_id(id: &str) -> Result<(String, String)> {
    if let Ok(arn) = Arn::parse(id) {
        return Ok((arn.account_id, id.to_string()));
    }

    match id.split_once(':') {
        Some((account_id, name)) if !account_id.is_empty() && !name.is_empty() => {
            Ok((account_id.to_string(), name.to_string()))
        }
        _ => Err(Error::malformed_id(id, ACCOUNT_NAME_FORMAT)),
    }
}
