//! Session selection state: catalog quantities plus user-authored equipment.
//!
//! Every mutation that would newly select a heavy-duty appliance goes through
//! the selection gate, so the heavy-duty invariant (empty, one solo-only, or
//! up to two compatible appliances) can never be violated from here.

use std::collections::{BTreeMap, HashSet};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::catalog::{ApplianceDefinition, CUSTOM_ID_PREFIX, Catalog};
use crate::engine::gate::{BlockReason, Candidate, GateDecision, can_select};
use crate::rules::RuleSet;

/// Surge class for custom equipment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentCategory {
    #[default]
    None,
    HasMotor,
    ProduceHeat,
}

impl EquipmentCategory {
    pub const ALL: [Self; 3] = [Self::None, Self::HasMotor, Self::ProduceHeat];

    /// Starting-draw multiplier for the class.
    pub fn surge_multiplier(self) -> f64 {
        match self {
            Self::None => 1.0,
            Self::HasMotor => 3.0,
            Self::ProduceHeat => 1.5,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::None => "None",
            Self::HasMotor => "Has Motor",
            Self::ProduceHeat => "Produce Heat",
        }
    }
}

/// Equipment the user added by hand, outside the catalog.
///
/// Never takes part in the heavy-duty gate; it only adds load.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomEquipment {
    pub id: String,
    pub name: String,
    /// User-estimated running power (W).
    pub wattage: f64,
    pub quantity: u32,
    pub category: EquipmentCategory,
}

impl CustomEquipment {
    /// Validates user input and creates an entry with quantity 1.
    ///
    /// # Errors
    ///
    /// [`SelectionError::EmptyName`] for a blank name and
    /// [`SelectionError::InvalidWattage`] for non-positive or non-finite wattage.
    pub fn new(name: &str, wattage: f64, category: EquipmentCategory) -> Result<Self, SelectionError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(SelectionError::EmptyName);
        }
        if !wattage.is_finite() || wattage <= 0.0 {
            return Err(SelectionError::InvalidWattage(wattage));
        }
        Ok(Self {
            id: generate_custom_id(),
            name: name.to_string(),
            wattage,
            quantity: 1,
            category,
        })
    }
}

/// Time-based id with a random suffix so rapid additions do not collide.
fn generate_custom_id() -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_millis());
    format!("{CUSTOM_ID_PREFIX}{millis}_{:04x}", rand::random::<u16>())
}

#[derive(Debug, Error, PartialEq)]
pub enum SelectionError {
    #[error("unknown appliance \"{0}\"")]
    UnknownAppliance(String),
    #[error("cannot select \"{id}\": {reason}")]
    Blocked { id: String, reason: BlockReason },
    #[error("custom equipment name must not be empty")]
    EmptyName,
    #[error("custom equipment wattage must be a positive number, got {0}")]
    InvalidWattage(f64),
    #[error("unknown custom equipment \"{0}\"")]
    UnknownCustom(String),
}

/// Authoritative selection for one session.
///
/// Serialize-only: every way in goes through the gated mutators or
/// [`Selection::from_requested`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Selection {
    /// Catalog id → quantity; ids with quantity 0 are not stored.
    quantities: BTreeMap<String, u32>,
    custom: Vec<CustomEquipment>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a selection from requested catalog quantities.
    ///
    /// Requests are applied through the gate in catalog order, so the result
    /// does not depend on the caller's ordering.
    ///
    /// # Errors
    ///
    /// Returns the first unknown id (in id order) or the first request the
    /// gate blocks.
    pub fn from_requested(
        requested: &BTreeMap<String, u32>,
        catalog: &Catalog,
        rules: &RuleSet,
    ) -> Result<Self, SelectionError> {
        if let Some(unknown) = requested.keys().find(|id| !catalog.contains(id)) {
            return Err(SelectionError::UnknownAppliance(unknown.clone()));
        }
        let mut selection = Self::new();
        for def in catalog.iter() {
            if let Some(&qty) = requested.get(&def.id) {
                selection.set_quantity(&def.id, qty, catalog, rules)?;
            }
        }
        Ok(selection)
    }

    /// Quantity held for a catalog or custom id; 0 when absent.
    pub fn quantity(&self, id: &str) -> u32 {
        self.quantities.get(id).copied().unwrap_or_else(|| {
            self.custom
                .iter()
                .find(|eq| eq.id == id)
                .map_or(0, |eq| eq.quantity)
        })
    }

    /// Selected heavy-duty catalog ids, in catalog order.
    pub fn selected_heavy_duty_ids<'c>(&self, catalog: &'c Catalog) -> Vec<&'c str> {
        catalog
            .iter()
            .filter(|def| def.is_heavy_duty && self.quantity(&def.id) > 0)
            .map(|def| def.id.as_str())
            .collect()
    }

    pub fn has_solo_only_selected(&self, catalog: &Catalog) -> bool {
        catalog
            .iter()
            .any(|def| def.is_heavy_duty && def.solo_only && self.quantity(&def.id) > 0)
    }

    /// Every selected id, catalog and custom.
    pub fn selected_ids(&self) -> HashSet<&str> {
        self.quantities
            .iter()
            .filter(|&(_, &qty)| qty > 0)
            .map(|(id, _)| id.as_str())
            .chain(
                self.custom
                    .iter()
                    .filter(|eq| eq.quantity > 0)
                    .map(|eq| eq.id.as_str()),
            )
            .collect()
    }

    /// Selected catalog entries with their quantities, in catalog order.
    pub fn catalog_selections<'c>(&self, catalog: &'c Catalog) -> Vec<(&'c ApplianceDefinition, u32)> {
        catalog
            .iter()
            .filter_map(|def| {
                let qty = self.quantity(&def.id);
                (qty > 0).then_some((def, qty))
            })
            .collect()
    }

    /// Gate decision for adding `def` to the current snapshot.
    pub fn gate(&self, def: &ApplianceDefinition, catalog: &Catalog, rules: &RuleSet) -> GateDecision {
        can_select(
            Candidate::from_definition(def, self.quantity(&def.id)),
            &self.selected_heavy_duty_ids(catalog),
            self.has_solo_only_selected(catalog),
            rules,
        )
    }

    /// Adds one unit of a catalog appliance and returns the new quantity.
    ///
    /// # Errors
    ///
    /// Unknown ids and gate-blocked additions leave the selection unchanged.
    pub fn increment(&mut self, id: &str, catalog: &Catalog, rules: &RuleSet) -> Result<u32, SelectionError> {
        let next = self.quantity(id).saturating_add(1);
        self.set_quantity(id, next, catalog, rules)?;
        Ok(next)
    }

    /// Removes one unit, flooring at 0, and returns the new quantity.
    pub fn decrement(&mut self, id: &str) -> u32 {
        let Some(qty) = self.quantities.get_mut(id) else {
            return 0;
        };
        *qty = qty.saturating_sub(1);
        let remaining = *qty;
        if remaining == 0 {
            self.quantities.remove(id);
        }
        debug!(id, remaining, "Decremented appliance");
        remaining
    }

    /// Sets a catalog quantity. Moving from 0 to a positive quantity is gated.
    ///
    /// # Errors
    ///
    /// Unknown ids and gate-blocked additions leave the selection unchanged.
    pub fn set_quantity(
        &mut self,
        id: &str,
        quantity: u32,
        catalog: &Catalog,
        rules: &RuleSet,
    ) -> Result<(), SelectionError> {
        let def = catalog
            .get(id)
            .ok_or_else(|| SelectionError::UnknownAppliance(id.to_string()))?;
        if quantity == 0 {
            self.quantities.remove(id);
            return Ok(());
        }
        if let GateDecision::Blocked(reason) = self.gate(def, catalog, rules) {
            debug!(id, %reason, "Selection blocked");
            return Err(SelectionError::Blocked {
                id: id.to_string(),
                reason,
            });
        }
        self.quantities.insert(id.to_string(), quantity);
        debug!(id, quantity, "Set appliance quantity");
        Ok(())
    }

    /// Selects one unit if the row is empty, otherwise clears it.
    ///
    /// # Errors
    ///
    /// Same as [`Selection::set_quantity`].
    pub fn toggle(&mut self, id: &str, catalog: &Catalog, rules: &RuleSet) -> Result<u32, SelectionError> {
        let next = u32::from(self.quantity(id) == 0);
        self.set_quantity(id, next, catalog, rules)?;
        Ok(next)
    }

    /// Drops every catalog quantity and custom entry.
    pub fn clear(&mut self) {
        self.quantities.clear();
        self.custom.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.selected_ids().is_empty()
    }

    pub fn custom(&self) -> &[CustomEquipment] {
        &self.custom
    }

    /// Validates and appends custom equipment with quantity 1.
    ///
    /// # Errors
    ///
    /// See [`CustomEquipment::new`].
    pub fn add_custom(
        &mut self,
        name: &str,
        wattage: f64,
        category: EquipmentCategory,
    ) -> Result<&CustomEquipment, SelectionError> {
        let mut equipment = CustomEquipment::new(name, wattage, category)?;
        while self.custom.iter().any(|eq| eq.id == equipment.id) {
            equipment.id = generate_custom_id();
        }
        debug!(id = %equipment.id, name = %equipment.name, wattage, "Added custom equipment");
        let pos = self.custom.len();
        self.custom.push(equipment);
        Ok(&self.custom[pos])
    }

    /// Sets a custom entry's quantity. Entries stay listed at quantity 0.
    ///
    /// # Errors
    ///
    /// [`SelectionError::UnknownCustom`] if no entry has `id`.
    pub fn set_custom_quantity(&mut self, id: &str, quantity: u32) -> Result<(), SelectionError> {
        let equipment = self.custom_mut(id)?;
        equipment.quantity = quantity;
        Ok(())
    }

    /// # Errors
    ///
    /// [`SelectionError::UnknownCustom`] if no entry has `id`.
    pub fn increment_custom(&mut self, id: &str) -> Result<u32, SelectionError> {
        let equipment = self.custom_mut(id)?;
        equipment.quantity = equipment.quantity.saturating_add(1);
        Ok(equipment.quantity)
    }

    /// Floors at 0 without removing the entry.
    ///
    /// # Errors
    ///
    /// [`SelectionError::UnknownCustom`] if no entry has `id`.
    pub fn decrement_custom(&mut self, id: &str) -> Result<u32, SelectionError> {
        let equipment = self.custom_mut(id)?;
        equipment.quantity = equipment.quantity.saturating_sub(1);
        Ok(equipment.quantity)
    }

    /// # Errors
    ///
    /// [`SelectionError::UnknownCustom`] if no entry has `id`.
    pub fn remove_custom(&mut self, id: &str) -> Result<CustomEquipment, SelectionError> {
        let pos = self
            .custom
            .iter()
            .position(|eq| eq.id == id)
            .ok_or_else(|| SelectionError::UnknownCustom(id.to_string()))?;
        debug!(id, "Removed custom equipment");
        Ok(self.custom.remove(pos))
    }

    fn custom_mut(&mut self, id: &str) -> Result<&mut CustomEquipment, SelectionError> {
        self.custom
            .iter_mut()
            .find(|eq| eq.id == id)
            .ok_or_else(|| SelectionError::UnknownCustom(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builtins() -> (&'static Catalog, &'static RuleSet) {
        (Catalog::builtin(), RuleSet::builtin())
    }

    #[test]
    fn increment_and_decrement_floor_at_zero() {
        let (catalog, rules) = builtins();
        let mut sel = Selection::new();
        assert_eq!(sel.increment("led_bulb", catalog, rules), Ok(1));
        assert_eq!(sel.increment("led_bulb", catalog, rules), Ok(2));
        assert_eq!(sel.decrement("led_bulb"), 1);
        assert_eq!(sel.decrement("led_bulb"), 0);
        assert_eq!(sel.decrement("led_bulb"), 0);
        assert!(sel.is_empty());
    }

    #[test]
    fn zero_quantity_request_is_not_company() {
        let (catalog, rules) = builtins();
        let requested = BTreeMap::from([("iron".to_string(), 1), ("led_bulb".to_string(), 0)]);
        let sel = Selection::from_requested(&requested, catalog, rules).unwrap();
        assert_eq!(sel.selected_ids(), HashSet::from(["iron"]));
        assert!(crate::engine::warnings(&sel.selected_ids(), rules).is_empty());
    }

    #[test]
    fn requested_solo_appliances_cannot_be_held_together() {
        let (catalog, rules) = builtins();
        let requested = BTreeMap::from([
            ("iron".to_string(), 1),
            ("water_pump".to_string(), 1),
            ("ac_2hp".to_string(), 1),
        ]);
        let err = Selection::from_requested(&requested, catalog, rules).unwrap_err();
        assert!(matches!(err, SelectionError::Blocked { .. }), "{err}");
    }

    #[test]
    fn unknown_appliance_rejected() {
        let (catalog, rules) = builtins();
        let mut sel = Selection::new();
        assert_eq!(
            sel.increment("flux_capacitor", catalog, rules),
            Err(SelectionError::UnknownAppliance("flux_capacitor".into()))
        );
    }

    #[test]
    fn blocked_addition_leaves_state_unchanged() {
        let (catalog, rules) = builtins();
        let mut sel = Selection::new();
        sel.increment("iron", catalog, rules).unwrap();
        let before = sel.clone();
        let err = sel.increment("refrigerator", catalog, rules).unwrap_err();
        assert_eq!(
            err,
            SelectionError::Blocked {
                id: "refrigerator".into(),
                reason: BlockReason::SoloSelected,
            }
        );
        assert_eq!(sel, before);
    }

    #[test]
    fn held_heavy_duty_quantity_can_grow() {
        let (catalog, rules) = builtins();
        let mut sel = Selection::new();
        sel.increment("refrigerator", catalog, rules).unwrap();
        sel.increment("freezer", catalog, rules).unwrap();
        assert_eq!(sel.increment("freezer", catalog, rules), Ok(2));
    }

    #[test]
    fn heavy_duty_ids_follow_catalog_order() {
        let (catalog, rules) = builtins();
        let mut sel = Selection::new();
        sel.increment("freezer", catalog, rules).unwrap();
        sel.increment("ac_1hp", catalog, rules).unwrap();
        assert_eq!(sel.selected_heavy_duty_ids(catalog), ["ac_1hp", "freezer"]);
        assert!(!sel.has_solo_only_selected(catalog));
    }

    #[test]
    fn toggle_selects_and_clears() {
        let (catalog, rules) = builtins();
        let mut sel = Selection::new();
        assert_eq!(sel.toggle("laptop", catalog, rules), Ok(1));
        assert_eq!(sel.toggle("laptop", catalog, rules), Ok(0));
        assert_eq!(sel.quantity("laptop"), 0);
    }

    #[test]
    fn custom_equipment_validation() {
        let mut sel = Selection::new();
        assert_eq!(
            sel.add_custom("   ", 100.0, EquipmentCategory::None).unwrap_err(),
            SelectionError::EmptyName
        );
        assert!(matches!(
            sel.add_custom("Pump", 0.0, EquipmentCategory::HasMotor),
            Err(SelectionError::InvalidWattage(_))
        ));
        assert!(matches!(
            sel.add_custom("Pump", f64::NAN, EquipmentCategory::HasMotor),
            Err(SelectionError::InvalidWattage(_))
        ));
        assert!(sel.custom().is_empty());

        let added = sel.add_custom("  Pump  ", 500.0, EquipmentCategory::HasMotor).unwrap();
        assert_eq!(added.name, "Pump");
        assert_eq!(added.quantity, 1);
        assert!(added.id.starts_with(CUSTOM_ID_PREFIX));
    }

    #[test]
    fn custom_quantity_floors_without_removal() {
        let mut sel = Selection::new();
        let id = sel
            .add_custom("Heater", 800.0, EquipmentCategory::ProduceHeat)
            .unwrap()
            .id
            .clone();
        assert_eq!(sel.decrement_custom(&id), Ok(0));
        assert_eq!(sel.decrement_custom(&id), Ok(0));
        assert_eq!(sel.custom().len(), 1);
        assert!(!sel.selected_ids().contains(id.as_str()));

        assert_eq!(sel.increment_custom(&id), Ok(1));
        assert!(sel.selected_ids().contains(id.as_str()));

        let removed = sel.remove_custom(&id).unwrap();
        assert_eq!(removed.name, "Heater");
        assert_eq!(
            sel.remove_custom(&id),
            Err(SelectionError::UnknownCustom(id.clone()))
        );
    }

    #[test]
    fn custom_ids_are_unique() {
        let mut sel = Selection::new();
        for n in 0..20 {
            sel.add_custom(&format!("Load {n}"), 100.0, EquipmentCategory::None)
                .unwrap();
        }
        let ids: HashSet<&str> = sel.custom().iter().map(|eq| eq.id.as_str()).collect();
        assert_eq!(ids.len(), 20);
    }

    #[test]
    fn from_requested_is_order_independent() {
        let (catalog, rules) = builtins();
        let requested: BTreeMap<String, u32> = [
            ("refrigerator".to_string(), 1),
            ("ac_1hp".to_string(), 1),
            ("led_bulb".to_string(), 6),
        ]
        .into_iter()
        .collect();
        let sel = Selection::from_requested(&requested, catalog, rules).unwrap();
        assert_eq!(sel.quantity("led_bulb"), 6);
        assert_eq!(sel.selected_heavy_duty_ids(catalog), ["ac_1hp", "refrigerator"]);
    }

    #[test]
    fn from_requested_reports_gate_violations() {
        let (catalog, rules) = builtins();
        let requested: BTreeMap<String, u32> =
            [("ac_1hp".to_string(), 1), ("microwave".to_string(), 1)]
                .into_iter()
                .collect();
        assert_eq!(
            Selection::from_requested(&requested, catalog, rules),
            Err(SelectionError::Blocked {
                id: "microwave".into(),
                reason: BlockReason::NotCompatible,
            })
        );
    }

    #[test]
    fn category_multipliers() {
        assert_eq!(EquipmentCategory::None.surge_multiplier(), 1.0);
        assert_eq!(EquipmentCategory::HasMotor.surge_multiplier(), 3.0);
        assert_eq!(EquipmentCategory::ProduceHeat.surge_multiplier(), 1.5);
    }
}
