//! Compatibility engine: selection gate, warning evaluator, load aggregation
//! and inverter sizing.
//!
//! Everything here is a pure function of its inputs. Front-ends recompute a
//! full [`Evaluation`] after every selection change.

pub mod gate;
pub mod load;
pub mod sizing;
pub mod warnings;

use serde::Serialize;

use crate::catalog::{Catalog, Category};
use crate::rules::RuleSet;
use crate::selection::Selection;

pub use gate::{BlockReason, Candidate, GateDecision, MAX_HEAVY_DUTY, can_select};
pub use load::{LoadLine, LoadSource, LoadTotals, compute_load, load_breakdown};
pub use sizing::{Sizing, SizingPolicy};
pub use warnings::warnings;

/// Gate result for one catalog row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowStatus {
    pub id: String,
    pub name: String,
    pub category: Category,
    pub is_heavy_duty: bool,
    pub solo_only: bool,
    pub quantity: u32,
    pub decision: GateDecision,
}

/// Everything a front-end renders for one selection snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation {
    /// One entry per catalog appliance, in catalog order.
    pub rows: Vec<RowStatus>,
    /// Triggered avoid-rule warnings, in rule order.
    pub warnings: Vec<String>,
    /// Per-entry load contributions.
    pub lines: Vec<LoadLine>,
    pub totals: LoadTotals,
    pub sizing: Sizing,
}

/// Evaluates the gate per row, the warning set, the load and the sizing.
pub fn evaluate(
    selection: &Selection,
    catalog: &Catalog,
    rules: &RuleSet,
    policy: &SizingPolicy,
) -> Evaluation {
    let heavy_duty = selection.selected_heavy_duty_ids(catalog);
    let has_solo_only = selection.has_solo_only_selected(catalog);

    let rows = catalog
        .iter()
        .map(|def| {
            let quantity = selection.quantity(&def.id);
            RowStatus {
                id: def.id.clone(),
                name: def.name.clone(),
                category: def.category,
                is_heavy_duty: def.is_heavy_duty,
                solo_only: def.solo_only,
                quantity,
                decision: can_select(
                    Candidate::from_definition(def, quantity),
                    &heavy_duty,
                    has_solo_only,
                    rules,
                ),
            }
        })
        .collect();

    let warnings = warnings(&selection.selected_ids(), rules)
        .into_iter()
        .map(str::to_string)
        .collect();

    let lines = load_breakdown(&selection.catalog_selections(catalog), selection.custom());
    let totals = load::sum_lines(&lines);
    let sizing = policy.recommend(&totals);

    Evaluation {
        rows,
        warnings,
        lines,
        totals,
        sizing,
    }
}
