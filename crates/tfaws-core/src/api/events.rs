//! EventBridge (CloudWatch Events) listing shapes and client trait

use super::ApiResult;
use crate::pagination::{PagedRequest, PagedResponse};
use async_trait::async_trait;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Target {
    pub id: Option<String>,
    pub arn: Option<String>,
    pub role_arn: Option<String>,
    pub input: Option<String>,
    pub input_path: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Rule {
    pub name: Option<String>,
    pub arn: Option<String>,
    pub event_bus_name: Option<String>,
    pub description: Option<String>,
    pub event_pattern: Option<String>,
    pub schedule_expression: Option<String>,
    /// `ENABLED` or `DISABLED`
    pub state: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventBus {
    pub name: Option<String>,
    pub arn: Option<String>,
    pub policy: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListTargetsByRuleInput {
    pub rule: String,
    pub event_bus_name: Option<String>,
    pub limit: Option<i64>,
    pub next_token: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListTargetsByRuleOutput {
    pub targets: Vec<Target>,
    pub next_token: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListRulesInput {
    pub event_bus_name: Option<String>,
    pub name_prefix: Option<String>,
    pub limit: Option<i64>,
    pub next_token: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListRulesOutput {
    pub rules: Vec<Rule>,
    pub next_token: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListEventBusesInput {
    pub name_prefix: Option<String>,
    pub limit: Option<i64>,
    pub next_token: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListEventBusesOutput {
    pub event_buses: Vec<EventBus>,
    pub next_token: Option<String>,
}

macro_rules! paged {
    ($input:ty, $output:ty) => {
        impl PagedRequest for $input {
            fn set_next_token(&mut self, token: Option<String>) {
                self.next_token = token;
            }
        }

        impl PagedResponse for $output {
            fn next_token(&self) -> Option<&str> {
                self.next_token.as_deref()
            }
        }
    };
}

paged!(ListTargetsByRuleInput, ListTargetsByRuleOutput);
paged!(ListRulesInput, ListRulesOutput);
paged!(ListEventBusesInput, ListEventBusesOutput);

/// EventBridge client
#[async_trait]
pub trait EventsApi: Send + Sync {
    async fn list_targets_by_rule(
        &self,
        input: ListTargetsByRuleInput,
    ) -> ApiResult<ListTargetsByRuleOutput>;

    async fn list_rules(&self, input: ListRulesInput) -> ApiResult<ListRulesOutput>;

    async fn list_event_buses(&self, input: ListEventBusesInput)
    -> ApiResult<ListEventBusesOutput>;
}
