//! Appliance catalog: static reference data for every selectable appliance.
//!
//! The built-in catalog is constructed once on first use and shared
//! read-only for the lifetime of the process. Callers that need a different
//! table build their own with [`Catalog::new`] and pass it to the engine.

mod builtin;
pub mod types;

use std::collections::HashMap;
use std::sync::LazyLock;

use thiserror::Error;

pub use types::{ApplianceDefinition, Category, CategoryInfo};

/// Id prefix reserved for user-authored custom equipment.
pub const CUSTOM_ID_PREFIX: &str = "custom_";

static BUILTIN: LazyLock<Catalog> = LazyLock::new(|| {
    let appliances = builtin::appliances();
    Catalog {
        index: index_of(&appliances),
        appliances,
    }
});

/// Rejected catalog entry.
#[derive(Debug, Error, PartialEq)]
pub enum CatalogError {
    #[error("appliance id must not be empty")]
    EmptyId,
    #[error("duplicate appliance id \"{0}\"")]
    DuplicateId(String),
    #[error("appliance id \"{0}\" uses the reserved prefix \"{CUSTOM_ID_PREFIX}\"")]
    ReservedId(String),
    #[error("appliance \"{id}\" has invalid wattage {wattage}")]
    InvalidWattage { id: String, wattage: f64 },
    #[error("appliance \"{id}\" has surge multiplier {multiplier}, expected >= 1")]
    InvalidSurgeMultiplier { id: String, multiplier: f64 },
    #[error("appliance \"{0}\" is solo-only but not heavy-duty")]
    SoloWithoutHeavyDuty(String),
}

/// Ordered, id-indexed collection of appliance definitions.
#[derive(Debug, Clone)]
pub struct Catalog {
    appliances: Vec<ApplianceDefinition>,
    index: HashMap<String, usize>,
}

impl Catalog {
    /// Returns the shipped catalog.
    pub fn builtin() -> &'static Self {
        &BUILTIN
    }

    /// Builds a catalog from definitions, preserving their order.
    ///
    /// # Errors
    ///
    /// Returns the first [`CatalogError`] found among the definitions.
    pub fn new(appliances: Vec<ApplianceDefinition>) -> Result<Self, CatalogError> {
        let mut index = HashMap::with_capacity(appliances.len());
        for (pos, def) in appliances.iter().enumerate() {
            validate_definition(def)?;
            if index.insert(def.id.clone(), pos).is_some() {
                return Err(CatalogError::DuplicateId(def.id.clone()));
            }
        }
        Ok(Self { appliances, index })
    }

    /// Looks up an appliance by id.
    pub fn get(&self, id: &str) -> Option<&ApplianceDefinition> {
        self.index.get(id).map(|&pos| &self.appliances[pos])
    }

    /// Returns `true` if `id` names a catalog appliance.
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// All appliances in catalog order.
    pub fn appliances(&self) -> &[ApplianceDefinition] {
        &self.appliances
    }

    pub fn iter(&self) -> impl Iterator<Item = &ApplianceDefinition> {
        self.appliances.iter()
    }

    /// Appliances belonging to `category`, in catalog order.
    pub fn in_category(&self, category: Category) -> impl Iterator<Item = &ApplianceDefinition> {
        self.appliances.iter().filter(move |a| a.category == category)
    }

    /// Categories that have at least one appliance, in display order.
    pub fn categories(&self) -> Vec<CategoryInfo> {
        Category::ALL
            .into_iter()
            .filter(|&c| self.in_category(c).next().is_some())
            .map(CategoryInfo::from)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.appliances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.appliances.is_empty()
    }
}

fn index_of(appliances: &[ApplianceDefinition]) -> HashMap<String, usize> {
    appliances
        .iter()
        .enumerate()
        .map(|(pos, def)| (def.id.clone(), pos))
        .collect()
}

fn validate_definition(def: &ApplianceDefinition) -> Result<(), CatalogError> {
    if def.id.is_empty() {
        return Err(CatalogError::EmptyId);
    }
    if def.id.starts_with(CUSTOM_ID_PREFIX) {
        return Err(CatalogError::ReservedId(def.id.clone()));
    }
    if !def.wattage.is_finite() || def.wattage <= 0.0 {
        return Err(CatalogError::InvalidWattage {
            id: def.id.clone(),
            wattage: def.wattage,
        });
    }
    if !def.surge_multiplier.is_finite() || def.surge_multiplier < 1.0 {
        return Err(CatalogError::InvalidSurgeMultiplier {
            id: def.id.clone(),
            multiplier: def.surge_multiplier,
        });
    }
    if def.solo_only && !def.is_heavy_duty {
        return Err(CatalogError::SoloWithoutHeavyDuty(def.id.clone()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn def(id: &str) -> ApplianceDefinition {
        ApplianceDefinition {
            id: id.to_string(),
            name: id.to_uppercase(),
            wattage: 100.0,
            surge_multiplier: 1.0,
            category: Category::Office,
            is_heavy_duty: false,
            solo_only: false,
        }
    }

    #[test]
    fn builtin_passes_validation() {
        let rebuilt = Catalog::new(Catalog::builtin().appliances().to_vec());
        assert!(rebuilt.is_ok(), "builtin catalog invalid: {:?}", rebuilt.err());
        assert_eq!(Catalog::builtin().len(), 29);
    }

    #[test]
    fn builtin_heavy_duty_flag_tracks_category() {
        for a in Catalog::builtin().iter() {
            assert_eq!(a.is_heavy_duty, a.category == Category::HeavyDuty, "{}", a.id);
        }
    }

    #[test]
    fn lookup_by_id() {
        let catalog = Catalog::builtin();
        let ac = catalog.get("ac_1hp").unwrap();
        assert_eq!(ac.wattage, 900.0);
        assert_eq!(ac.surge_multiplier, 3.0);
        assert!(ac.is_heavy_duty);
        assert!(!ac.solo_only);
        assert!(catalog.get("nonexistent").is_none());
    }

    #[test]
    fn categories_follow_display_order() {
        let ids: Vec<&str> = Catalog::builtin()
            .categories()
            .iter()
            .map(|c| c.id.id())
            .collect();
        assert_eq!(
            ids,
            ["lighting", "entertainment", "kitchen", "cooling", "office", "heavy-duty"]
        );
    }

    #[test]
    fn rejects_duplicate_ids() {
        let err = Catalog::new(vec![def("a"), def("a")]).unwrap_err();
        assert_eq!(err, CatalogError::DuplicateId("a".into()));
    }

    #[test]
    fn rejects_reserved_prefix() {
        let err = Catalog::new(vec![def("custom_1")]).unwrap_err();
        assert_eq!(err, CatalogError::ReservedId("custom_1".into()));
    }

    #[test]
    fn rejects_solo_without_heavy_duty() {
        let mut d = def("kettle");
        d.solo_only = true;
        let err = Catalog::new(vec![d]).unwrap_err();
        assert_eq!(err, CatalogError::SoloWithoutHeavyDuty("kettle".into()));
    }

    #[test]
    fn rejects_bad_numbers() {
        let mut d = def("zero");
        d.wattage = 0.0;
        assert!(matches!(
            Catalog::new(vec![d]),
            Err(CatalogError::InvalidWattage { .. })
        ));

        let mut d = def("low_surge");
        d.surge_multiplier = 0.5;
        assert!(matches!(
            Catalog::new(vec![d]),
            Err(CatalogError::InvalidSurgeMultiplier { .. })
        ));
    }
}
