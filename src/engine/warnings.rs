//! Advisory warnings for discouraged combinations.

use std::collections::HashSet;

use crate::rules::{AvoidRule, RuleSet};

/// Returns every avoid-rule warning triggered by `selected`, in rule order.
///
/// Identical warning texts from distinct rules are all reported; callers
/// that want a unique list de-duplicate themselves.
pub fn warnings<'r>(selected: &HashSet<&str>, rules: &'r RuleSet) -> Vec<&'r str> {
    rules
        .avoid_rules()
        .iter()
        .filter(|rule| is_triggered(rule, selected))
        .map(AvoidRule::warning)
        .collect()
}

fn is_triggered(rule: &AvoidRule, selected: &HashSet<&str>) -> bool {
    match rule {
        AvoidRule::Single { id, .. } => selected.contains(id.as_str()) && selected.len() > 1,
        AvoidRule::Multi { ids, .. } => ids.iter().all(|id| selected.contains(id.as_str())),
    }
}
