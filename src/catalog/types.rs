//! Appliance definitions and category metadata.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Appliance category, listed in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Lighting,
    Entertainment,
    Kitchen,
    Cooling,
    Office,
    HeavyDuty,
}

impl Category {
    /// All categories in display order.
    pub const ALL: [Self; 6] = [
        Self::Lighting,
        Self::Entertainment,
        Self::Kitchen,
        Self::Cooling,
        Self::Office,
        Self::HeavyDuty,
    ];

    /// Stable identifier used in JSON and TOML.
    pub fn id(self) -> &'static str {
        match self {
            Self::Lighting => "lighting",
            Self::Entertainment => "entertainment",
            Self::Kitchen => "kitchen",
            Self::Cooling => "cooling",
            Self::Office => "office",
            Self::HeavyDuty => "heavy-duty",
        }
    }

    /// Human-readable heading.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Lighting => "Lighting",
            Self::Entertainment => "Entertainment",
            Self::Kitchen => "Kitchen",
            Self::Cooling => "Cooling",
            Self::Office => "Office & Work",
            Self::HeavyDuty => "Heavy Duty Appliances",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Immutable reference data for one catalog appliance.
///
/// `is_heavy_duty` is independent of [`Category::HeavyDuty`] as far as the
/// compatibility engine is concerned, even though the shipped catalog keeps
/// the two aligned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplianceDefinition {
    /// Unique key.
    pub id: String,
    /// Display label.
    pub name: String,
    /// Nominal running power (W, positive).
    pub wattage: f64,
    /// Starting-draw multiplier applied to `wattage` (>= 1).
    pub surge_multiplier: f64,
    /// Display category.
    pub category: Category,
    /// Subject to the heavy-duty compatibility gate.
    pub is_heavy_duty: bool,
    /// Must be the only selected heavy-duty appliance. Implies `is_heavy_duty`.
    pub solo_only: bool,
}

impl ApplianceDefinition {
    /// Peak draw for a single unit (W).
    pub fn surge_watts(&self) -> f64 {
        self.wattage * self.surge_multiplier
    }
}

/// Category heading entry as served to front-ends.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryInfo {
    pub id: Category,
    pub name: &'static str,
}

impl From<Category> for CategoryInfo {
    fn from(category: Category) -> Self {
        Self {
            id: category,
            name: category.display_name(),
        }
    }
}
