//! Shared test fixtures for integration tests.

#![allow(dead_code)]

use std::collections::HashSet;

use inverter_sizer::catalog::Catalog;
use inverter_sizer::engine::{Evaluation, SizingPolicy, evaluate};
use inverter_sizer::rules::RuleSet;
use inverter_sizer::selection::Selection;

/// Built-in catalog and rule set.
pub fn builtins() -> (&'static Catalog, &'static RuleSet) {
    (Catalog::builtin(), RuleSet::builtin())
}

/// Selection built by incrementing each id `qty` times through the gate.
///
/// Panics if any addition is blocked.
pub fn selection_of(items: &[(&str, u32)]) -> Selection {
    let (catalog, rules) = builtins();
    let mut selection = Selection::new();
    for &(id, qty) in items {
        for _ in 0..qty {
            selection
                .increment(id, catalog, rules)
                .unwrap_or_else(|e| panic!("failed to add {id}: {e}"));
        }
    }
    selection
}

/// Evaluation of `selection` under the default sizing policy.
pub fn evaluate_default(selection: &Selection) -> Evaluation {
    let (catalog, rules) = builtins();
    evaluate(selection, catalog, rules, &SizingPolicy::default())
}

/// Every heavy-duty id in catalog order.
pub fn heavy_duty_ids() -> Vec<&'static str> {
    Catalog::builtin()
        .iter()
        .filter(|def| def.is_heavy_duty)
        .map(|def| def.id.as_str())
        .collect()
}

pub fn id_set<'a>(ids: &[&'a str]) -> HashSet<&'a str> {
    ids.iter().copied().collect()
}

/// Heavy-duty invariant: empty, a single solo-only appliance, or at most two
/// compatible non-solo appliances.
pub fn assert_heavy_duty_invariant(selection: &Selection) {
    let (catalog, rules) = builtins();
    let heavy = selection.selected_heavy_duty_ids(catalog);
    let solo = heavy
        .iter()
        .filter(|id| catalog.get(id).is_some_and(|def| def.solo_only))
        .count();
    match heavy.as_slice() {
        [] => {}
        [_] => {}
        [a, b] => {
            assert_eq!(solo, 0, "solo-only appliance paired: {heavy:?}");
            assert!(rules.is_allowed_pair(a, b), "incompatible pair: {heavy:?}");
        }
        _ => panic!("more than two heavy-duty appliances: {heavy:?}"),
    }
}
