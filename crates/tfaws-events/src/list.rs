//! Page walkers over the EventBridge list calls
//!
//! Every walker hands each page to `f` together with a "last page" flag;
//! returning `false` from `f` stops before the next request goes out.

use tfaws_core::api::events::{
    ListEventBusesInput, ListEventBusesOutput, ListRulesInput, ListRulesOutput,
    ListTargetsByRuleInput, ListTargetsByRuleOutput, Target,
};
use tfaws_core::pagination::for_each_page;
use tfaws_core::{AwsClient, Error, Result};
use tracing::debug;

/// Page size used when listing every target of a rule
pub const LIST_TARGETS_LIMIT: i64 = 100;

pub async fn list_targets_by_rule_pages<F>(
    conn: &AwsClient,
    input: ListTargetsByRuleInput,
    f: F,
) -> Result<()>
where
    F: FnMut(&ListTargetsByRuleOutput, bool) -> bool,
{
    let client = conn.events()?;
    let rule = input.rule.clone();

    for_each_page(input, move |request| client.list_targets_by_rule(request), f)
        .await
        .map_err(|e| Error::remote("listing targets of", "EventBridge Rule", rule, e))
}

pub async fn list_rules_pages<F>(conn: &AwsClient, input: ListRulesInput, f: F) -> Result<()>
where
    F: FnMut(&ListRulesOutput, bool) -> bool,
{
    let client = conn.events()?;
    let bus = input.event_bus_name.clone().unwrap_or_else(|| "default".to_string());

    for_each_page(input, move |request| client.list_rules(request), f)
        .await
        .map_err(|e| Error::remote("listing rules of", "EventBridge Event Bus", bus, e))
}

pub async fn list_event_buses_pages<F>(
    conn: &AwsClient,
    input: ListEventBusesInput,
    f: F,
) -> Result<()>
where
    F: FnMut(&ListEventBusesOutput, bool) -> bool,
{
    let client = conn.events()?;
    let region = conn.region.clone();

    for_each_page(input, move |request| client.list_event_buses(request), f)
        .await
        .map_err(|e| Error::remote("listing", "EventBridge Event Buses", region, e))
}

/// Walk every target page of `rule` on `event_bus_name`
///
/// An empty bus name leaves the bus unset so the default bus is used.
pub async fn list_all_targets_for_rule_pages<F>(
    conn: &AwsClient,
    event_bus_name: &str,
    rule: &str,
    f: F,
) -> Result<()>
where
    F: FnMut(&ListTargetsByRuleOutput, bool) -> bool,
{
    let input = ListTargetsByRuleInput {
        rule: rule.to_string(),
        event_bus_name: Some(event_bus_name.to_string()).filter(|name| !name.is_empty()),
        limit: Some(LIST_TARGETS_LIMIT),
        next_token: None,
    };

    list_targets_by_rule_pages(conn, input, f).await
}

/// Every target of `rule` on `event_bus_name`
pub async fn list_all_targets_for_rule(
    conn: &AwsClient,
    event_bus_name: &str,
    rule: &str,
) -> Result<Vec<Target>> {
    let mut targets = Vec::new();

    list_all_targets_for_rule_pages(conn, event_bus_name, rule, |page, _last_page| {
        targets.extend(page.targets.iter().cloned());
        true
    })
    .await?;

    debug!("Listed {} targets of EventBridge Rule ({})", targets.len(), rule);
    Ok(targets)
}
