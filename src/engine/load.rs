//! Running and surge load aggregation.
//!
//! Surge is modelled as the sum of every entry's peak draw, i.e. all selected
//! items starting at the same instant. Each entry's surge contribution
//! replaces its running contribution (it is not running + delta). This is an
//! upper-bound approximation, not a start-up scheduler: staggered starts in
//! practice need less headroom than reported here.

use std::ops::Add;

use serde::Serialize;

use crate::catalog::ApplianceDefinition;
use crate::selection::CustomEquipment;

/// Aggregate load for a selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct LoadTotals {
    /// Sum of wattage × quantity (W).
    pub total_running_watts: f64,
    /// Sum of wattage × surge multiplier × quantity (W).
    pub total_surge_watts: f64,
}

impl Add for LoadTotals {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            total_running_watts: self.total_running_watts + rhs.total_running_watts,
            total_surge_watts: self.total_surge_watts + rhs.total_surge_watts,
        }
    }
}

/// Origin of a load line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadSource {
    Catalog,
    Custom,
}

impl LoadSource {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Catalog => "catalog",
            Self::Custom => "custom",
        }
    }
}

/// Contribution of one selected entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoadLine {
    pub id: String,
    pub name: String,
    pub source: LoadSource,
    pub quantity: u32,
    pub wattage: f64,
    pub surge_multiplier: f64,
    pub running_watts: f64,
    pub surge_watts: f64,
}

impl LoadLine {
    fn new(
        id: &str,
        name: &str,
        source: LoadSource,
        quantity: u32,
        wattage: f64,
        surge_multiplier: f64,
    ) -> Self {
        let qty = f64::from(quantity);
        Self {
            id: id.to_string(),
            name: name.to_string(),
            source,
            quantity,
            wattage,
            surge_multiplier,
            running_watts: wattage * qty,
            surge_watts: wattage * surge_multiplier * qty,
        }
    }

    pub fn totals(&self) -> LoadTotals {
        LoadTotals {
            total_running_watts: self.running_watts,
            total_surge_watts: self.surge_watts,
        }
    }
}

/// Per-entry breakdown: catalog entries first, then custom equipment.
///
/// Entries with quantity 0 are skipped.
pub fn load_breakdown(
    catalog_selections: &[(&ApplianceDefinition, u32)],
    custom: &[CustomEquipment],
) -> Vec<LoadLine> {
    let catalog_lines = catalog_selections
        .iter()
        .filter(|(_, qty)| *qty > 0)
        .map(|(def, qty)| {
            LoadLine::new(
                &def.id,
                &def.name,
                LoadSource::Catalog,
                *qty,
                def.wattage,
                def.surge_multiplier,
            )
        });
    let custom_lines = custom.iter().filter(|eq| eq.quantity > 0).map(|eq| {
        LoadLine::new(
            &eq.id,
            &eq.name,
            LoadSource::Custom,
            eq.quantity,
            eq.wattage,
            eq.category.surge_multiplier(),
        )
    });
    catalog_lines.chain(custom_lines).collect()
}

/// Totals across catalog selections and custom equipment.
pub fn compute_load(
    catalog_selections: &[(&ApplianceDefinition, u32)],
    custom: &[CustomEquipment],
) -> LoadTotals {
    sum_lines(&load_breakdown(catalog_selections, custom))
}

/// Sums a breakdown into totals.
pub fn sum_lines(lines: &[LoadLine]) -> LoadTotals {
    lines
        .iter()
        .map(LoadLine::totals)
        .fold(LoadTotals::default(), |acc, line| acc + line)
}
