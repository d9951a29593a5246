//! Compatibility rule tables: heavy-duty allow-list and advisory avoid rules.

use std::collections::HashSet;
use std::sync::LazyLock;

use serde::Serialize;
use thiserror::Error;

const AC_PUMP_WARNING: &str = "Avoid running AC and Water Pump together - high surge load.";

static BUILTIN: LazyLock<RuleSet> = LazyLock::new(|| RuleSet {
    allowed: builtin_pairs().into_iter().collect(),
    avoid: builtin_avoid_rules(),
});

/// Unordered pair of heavy-duty ids permitted to run together.
///
/// Stored in canonical order so `(a, b)` and `(b, a)` hash identically.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AllowedPair {
    low: String,
    high: String,
}

impl AllowedPair {
    pub fn new(a: impl Into<String>, b: impl Into<String>) -> Self {
        let (a, b) = (a.into(), b.into());
        if a <= b {
            Self { low: a, high: b }
        } else {
            Self { low: b, high: a }
        }
    }

    /// Both ids in canonical order.
    pub fn ids(&self) -> (&str, &str) {
        (&self.low, &self.high)
    }
}

/// Advisory trigger for a discouraged (but not blocked) combination.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AvoidRule {
    /// Fires when `id` is selected alongside anything else.
    Single { id: String, warning: String },
    /// Fires when every id in `ids` is selected.
    Multi { ids: Vec<String>, warning: String },
}

impl AvoidRule {
    /// Tags a rule by arity.
    ///
    /// # Errors
    ///
    /// Returns [`RuleError::EmptyAvoidRule`] when `ids` is empty.
    pub fn new(ids: Vec<String>, warning: impl Into<String>) -> Result<Self, RuleError> {
        let warning = warning.into();
        match <[String; 1]>::try_from(ids) {
            Ok([id]) => Ok(Self::Single { id, warning }),
            Err(ids) if ids.is_empty() => Err(RuleError::EmptyAvoidRule(warning)),
            Err(ids) => Ok(Self::Multi { ids, warning }),
        }
    }

    pub fn warning(&self) -> &str {
        match self {
            Self::Single { warning, .. } | Self::Multi { warning, .. } => warning,
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum RuleError {
    #[error("avoid rule \"{0}\" has no appliance ids")]
    EmptyAvoidRule(String),
}

/// Immutable compatibility configuration consulted by the engine.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    allowed: HashSet<AllowedPair>,
    avoid: Vec<AvoidRule>,
}

impl RuleSet {
    /// Returns the shipped rule tables.
    pub fn builtin() -> &'static Self {
        &BUILTIN
    }

    /// Builds a rule set; duplicate pairs collapse, avoid rule order is kept.
    pub fn new(allowed: impl IntoIterator<Item = AllowedPair>, avoid: Vec<AvoidRule>) -> Self {
        Self {
            allowed: allowed.into_iter().collect(),
            avoid,
        }
    }

    /// Returns `true` if `a` and `b` may be selected together, in either order.
    pub fn is_allowed_pair(&self, a: &str, b: &str) -> bool {
        self.allowed.contains(&AllowedPair::new(a, b))
    }

    pub fn allowed_pairs(&self) -> impl Iterator<Item = &AllowedPair> {
        self.allowed.iter()
    }

    /// Avoid rules in evaluation order.
    pub fn avoid_rules(&self) -> &[AvoidRule] {
        &self.avoid
    }
}

fn builtin_pairs() -> Vec<AllowedPair> {
    [
        ("ac_1hp", "refrigerator"),
        ("ac_1hp", "freezer"),
        ("ac_1hp", "vacuum"),
        ("ac_15hp", "refrigerator"),
        ("ac_15hp", "freezer"),
        ("refrigerator", "freezer"),
        ("refrigerator", "vacuum"),
        ("freezer", "toaster"),
        ("microwave", "refrigerator"),
        ("toaster", "refrigerator"),
        ("washing_machine", "refrigerator"),
        ("washing_machine", "freezer"),
        ("vacuum", "refrigerator"),
        ("vacuum", "freezer"),
    ]
    .into_iter()
    .map(|(a, b)| AllowedPair::new(a, b))
    .collect()
}

fn builtin_avoid_rules() -> Vec<AvoidRule> {
    let multi = |ids: &[&str], warning: &str| AvoidRule::Multi {
        ids: ids.iter().map(ToString::to_string).collect(),
        warning: warning.to_string(),
    };
    let single = |id: &str, warning: &str| AvoidRule::Single {
        id: id.to_string(),
        warning: warning.to_string(),
    };

    vec![
        multi(&["ac_1hp", "water_pump"], AC_PUMP_WARNING),
        multi(&["ac_15hp", "water_pump"], AC_PUMP_WARNING),
        multi(&["ac_2hp", "water_pump"], AC_PUMP_WARNING),
        single(
            "electric_kettle",
            "Electric Kettle should not run with other heavy-duty appliances.",
        ),
        single(
            "space_heater",
            "Space Heater should not run with other heavy-duty appliances.",
        ),
        single(
            "iron",
            "Electric Iron should not run with other heavy-duty appliances.",
        ),
        multi(
            &["microwave", "electric_kettle"],
            "Avoid running Microwave and Kettle together.",
        ),
        multi(
            &["washing_machine", "water_pump"],
            "Avoid running Washing Machine and Water Pump together.",
        ),
    ]
}
