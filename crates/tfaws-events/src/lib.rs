// # EventBridge listing helpers
//
// EventBridge has no resource adapters here; other adapters and the host use
// these walkers to enumerate rules, buses and rule targets.

pub mod list;

pub use list::{
    LIST_TARGETS_LIMIT, list_all_targets_for_rule, list_all_targets_for_rule_pages,
    list_event_buses_pages, list_rules_pages, list_targets_by_rule_pages,
};
