//! Paged EventBridge double that records every list request

#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use tfaws_core::api::ApiResult;
use tfaws_core::api::events::*;
use tfaws_core::{ApiError, AwsClient, ProviderConfig};

/// Serves fixed pages; page `n` carries token `page-{n+1}` unless it is last
#[derive(Clone, Default)]
pub struct MockEvents {
    target_pages: Vec<Vec<Target>>,
    rule_pages: Vec<Vec<Rule>>,
    bus_pages: Vec<Vec<EventBus>>,
    /// The final page carries an empty token instead of none
    pub empty_final_token: bool,
    /// Fail every call with this error
    pub fail_with: Option<ApiError>,
    pub target_requests: Arc<Mutex<Vec<ListTargetsByRuleInput>>>,
    pub rule_requests: Arc<Mutex<Vec<ListRulesInput>>>,
    pub bus_requests: Arc<Mutex<Vec<ListEventBusesInput>>>,
}

impl MockEvents {
    pub fn with_target_pages(pages: &[&[&str]]) -> Self {
        Self {
            target_pages: pages
                .iter()
                .map(|page| page.iter().map(|id| target(id)).collect())
                .collect(),
            ..Self::default()
        }
    }

    pub fn with_rule_pages(pages: &[&[&str]]) -> Self {
        Self {
            rule_pages: pages
                .iter()
                .map(|page| {
                    page.iter()
                        .map(|name| Rule {
                            name: Some(name.to_string()),
                            state: Some("ENABLED".to_string()),
                            ..Default::default()
                        })
                        .collect()
                })
                .collect(),
            ..Self::default()
        }
    }

    pub fn with_bus_pages(pages: &[&[&str]]) -> Self {
        Self {
            bus_pages: pages
                .iter()
                .map(|page| {
                    page.iter()
                        .map(|name| EventBus {
                            name: Some(name.to_string()),
                            ..Default::default()
                        })
                        .collect()
                })
                .collect(),
            ..Self::default()
        }
    }

    pub fn target_requests(&self) -> Vec<ListTargetsByRuleInput> {
        self.target_requests.lock().unwrap().clone()
    }

    fn page<T: Clone>(
        &self,
        pages: &[Vec<T>],
        token: Option<&str>,
    ) -> ApiResult<(Vec<T>, Option<String>)> {
        if let Some(err) = &self.fail_with {
            return Err(err.clone());
        }

        let index = match token {
            None => 0,
            Some(token) => token
                .strip_prefix("page-")
                .and_then(|n| n.parse::<usize>().ok())
                .ok_or_else(|| ApiError::new("ValidationException", "invalid next token"))?,
        };

        let items = pages.get(index).cloned().unwrap_or_default();
        let next_token = if index + 1 < pages.len() {
            Some(format!("page-{}", index + 1))
        } else if self.empty_final_token {
            Some(String::new())
        } else {
            None
        };

        Ok((items, next_token))
    }
}

pub fn target(id: &str) -> Target {
    Target {
        id: Some(id.to_string()),
        arn: Some(format!("arn:aws:lambda:us-west-2:123456789012:function:{}", id)),
        ..Default::default()
    }
}

#[async_trait]
impl EventsApi for MockEvents {
    async fn list_targets_by_rule(
        &self,
        input: ListTargetsByRuleInput,
    ) -> ApiResult<ListTargetsByRuleOutput> {
        self.target_requests.lock().unwrap().push(input.clone());
        let (targets, next_token) = self.page(&self.target_pages, input.next_token.as_deref())?;
        Ok(ListTargetsByRuleOutput { targets, next_token })
    }

    async fn list_rules(&self, input: ListRulesInput) -> ApiResult<ListRulesOutput> {
        self.rule_requests.lock().unwrap().push(input.clone());
        let (rules, next_token) = self.page(&self.rule_pages, input.next_token.as_deref())?;
        Ok(ListRulesOutput { rules, next_token })
    }

    async fn list_event_buses(
        &self,
        input: ListEventBusesInput,
    ) -> ApiResult<ListEventBusesOutput> {
        self.bus_requests.lock().unwrap().push(input.clone());
        let (event_buses, next_token) = self.page(&self.bus_pages, input.next_token.as_deref())?;
        Ok(ListEventBusesOutput {
            event_buses,
            next_token,
        })
    }
}

pub fn test_conn(mock: &MockEvents) -> AwsClient {
    AwsClient::new(&ProviderConfig::new("us-west-2", "123456789012"))
        .unwrap()
        .with_events(Arc::new(mock.clone()))
}
