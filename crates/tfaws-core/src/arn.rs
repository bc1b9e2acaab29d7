//! Amazon Resource Names
//!
//! Format: `arn:<partition>:<service>:<region>:<account-id>:<resource>`.
//! The resource section may itself contain `:` and `/`.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

const ARN_PREFIX: &str = "arn:";
const ARN_SECTIONS: usize = 6;

/// Reasons an ARN fails to parse
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArnError {
    /// Does not start with `arn:`
    #[error("arn: invalid prefix")]
    InvalidPrefix,
    /// Fewer than six `:`-separated sections
    #[error("arn: not enough sections")]
    NotEnoughSections,
}

/// A parsed ARN
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Arn {
    pub partition: String,
    pub service: String,
    pub region: String,
    pub account_id: String,
    pub resource: String,
}

impl Arn {
    /// Parse an ARN string
    pub fn parse(s: &str) -> Result<Self, ArnError> {
        if !s.starts_with(ARN_PREFIX) {
            return Err(ArnError::InvalidPrefix);
        }

        let sections: Vec<&str> = s.splitn(ARN_SECTIONS, ':').collect();
        if sections.len() != ARN_SECTIONS {
            return Err(ArnError::NotEnoughSections);
        }

        Ok(Self {
            partition: sections[1].to_string(),
            service: sections[2].to_string(),
            region: sections[3].to_string(),
            account_id: sections[4].to_string(),
            resource: sections[5].to_string(),
        })
    }

    /// Whether `s` parses as an ARN
    pub fn is_arn(s: &str) -> bool {
        Self::parse(s).is_ok()
    }
}

impl FromStr for Arn {
    type Err = ArnError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Arn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "arn:{}:{}:{}:{}:{}",
            self.partition, self.service, self.region, self.account_id, self.resource
        )
    }
}
