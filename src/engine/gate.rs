//! Selection gate: decides whether a catalog row may be newly selected.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::catalog::ApplianceDefinition;
use crate::rules::RuleSet;

/// Maximum number of heavy-duty appliances selectable at once.
pub const MAX_HEAVY_DUTY: usize = 2;

/// Why a candidate cannot be added to the current selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockReason {
    /// A solo-only appliance is already selected.
    SoloSelected,
    /// The candidate is solo-only and another heavy-duty appliance is selected.
    MustBeUsedAlone,
    /// The heavy-duty cap is reached.
    MaxHeavyDuty,
    /// The candidate is not on the allow-list with the selected appliance.
    NotCompatible,
}

impl fmt::Display for BlockReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::SoloSelected => "Solo appliance selected",
            Self::MustBeUsedAlone => "Must be used alone",
            Self::MaxHeavyDuty => "Max 2 heavy-duty",
            Self::NotCompatible => "Not compatible",
        })
    }
}

impl Serialize for BlockReason {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Outcome of [`can_select`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    Allowed,
    Blocked(BlockReason),
}

impl GateDecision {
    pub fn is_allowed(self) -> bool {
        matches!(self, Self::Allowed)
    }

    /// Returns the block reason, if any.
    pub fn reason(self) -> Option<BlockReason> {
        match self {
            Self::Allowed => None,
            Self::Blocked(reason) => Some(reason),
        }
    }
}

/// Serialized as `{"allowed": bool, "reason"?: string}`.
impl Serialize for GateDecision {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct Wire {
            allowed: bool,
            #[serde(skip_serializing_if = "Option::is_none")]
            reason: Option<BlockReason>,
        }
        Wire {
            allowed: self.is_allowed(),
            reason: self.reason(),
        }
        .serialize(serializer)
    }
}

/// The row being considered for selection.
#[derive(Debug, Clone, Copy)]
pub struct Candidate<'a> {
    pub id: &'a str,
    pub is_heavy_duty: bool,
    pub solo_only: bool,
    /// Quantity currently held for this row.
    pub current_quantity: u32,
}

impl<'a> Candidate<'a> {
    pub fn from_definition(def: &'a ApplianceDefinition, current_quantity: u32) -> Self {
        Self {
            id: &def.id,
            is_heavy_duty: def.is_heavy_duty,
            solo_only: def.solo_only,
            current_quantity,
        }
    }
}

/// Decides whether `candidate` may be selected given the current heavy-duty
/// snapshot.
///
/// Only gates *new* additions: rows already held (`current_quantity > 0`)
/// are always allowed so they can be edited or removed. Rules are checked in
/// order and the first match wins.
pub fn can_select(
    candidate: Candidate<'_>,
    selected_heavy_duty: &[&str],
    has_solo_only_selected: bool,
    rules: &RuleSet,
) -> GateDecision {
    if !candidate.is_heavy_duty || candidate.current_quantity > 0 {
        return GateDecision::Allowed;
    }
    if has_solo_only_selected {
        return GateDecision::Blocked(BlockReason::SoloSelected);
    }
    if candidate.solo_only && !selected_heavy_duty.is_empty() {
        return GateDecision::Blocked(BlockReason::MustBeUsedAlone);
    }
    match selected_heavy_duty {
        [] => GateDecision::Allowed,
        [existing] if rules.is_allowed_pair(existing, candidate.id) => GateDecision::Allowed,
        [_] => GateDecision::Blocked(BlockReason::NotCompatible),
        _ => GateDecision::Blocked(BlockReason::MaxHeavyDuty),
    }
}
