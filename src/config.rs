//! TOML-based application configuration, selection files and presets.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::catalog::Catalog;
use crate::engine::sizing::{DEFAULT_INVERTER_SIZES_KVA, SizingPolicy};
use crate::rules::RuleSet;
use crate::selection::{EquipmentCategory, Selection, SelectionError};

/// Top-level application configuration parsed from TOML.
///
/// Every section has defaults, so an empty file (or no file) is valid.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Inverter sizing policy.
    #[serde(default)]
    pub sizing: SizingConfig,
    /// Contact notification delivery.
    #[serde(default)]
    pub notify: NotifyConfig,
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
}

/// Inverter sizing policy parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SizingConfig {
    /// Available inverter ratings (kVA).
    pub inverter_sizes_kva: Vec<f64>,
    /// Real-to-apparent power ratio, in (0, 1].
    pub power_factor: f64,
    /// Headroom applied to the running load (>= 1).
    pub safety_margin: f64,
    /// Short-term overload multiple the inverter tolerates (>= 1).
    pub surge_tolerance: f64,
}

impl Default for SizingConfig {
    fn default() -> Self {
        let policy = SizingPolicy::default();
        Self {
            inverter_sizes_kva: DEFAULT_INVERTER_SIZES_KVA.to_vec(),
            power_factor: policy.power_factor,
            safety_margin: policy.safety_margin,
            surge_tolerance: policy.surge_tolerance,
        }
    }
}

impl SizingConfig {
    pub fn policy(&self) -> SizingPolicy {
        SizingPolicy::new(
            self.inverter_sizes_kva.clone(),
            self.power_factor,
            self.safety_margin,
            self.surge_tolerance,
        )
    }
}

/// Transactional email settings for contact notifications.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NotifyConfig {
    /// Provider endpoint accepting `{from, to, subject, html}`.
    pub endpoint: String,
    /// Environment variable holding the provider API key.
    pub api_key_env: String,
    /// Sender address.
    pub from: String,
    /// Recipient addresses.
    pub to: Vec<String>,
    /// Appended to the subject line.
    pub subject_tag: String,
    /// Outbound request timeout (seconds).
    pub timeout_secs: u64,
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.resend.com/emails".to_string(),
            api_key_env: "RESEND_API_KEY".to_string(),
            from: "InverterSize <onboarding@resend.dev>".to_string(),
            to: vec!["notifications@example.com".to_string()],
            subject_tag: "InverterSize".to_string(),
            timeout_secs: 10,
        }
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { port: 3000 }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug, Error)]
#[error("config error: {field}: {message}")]
pub struct ConfigError {
    /// Dotted field path (e.g., `"sizing.power_factor"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl ConfigError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

fn read_file(path: &Path, field: &str) -> Result<String, ConfigError> {
    fs::read_to_string(path)
        .map_err(|e| ConfigError::new(field, format!("cannot read \"{}\": {e}", path.display())))
}

fn parse_toml<T: for<'de> Deserialize<'de>>(s: &str) -> Result<T, ConfigError> {
    toml::from_str(s).map_err(|e| ConfigError::new("toml", e.to_string()))
}

impl AppConfig {
    /// Parses configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        Self::from_toml_str(&read_file(path, "config")?)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        parse_toml(s)
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        let s = &self.sizing;
        if s.inverter_sizes_kva.is_empty() {
            errors.push(ConfigError::new(
                "sizing.inverter_sizes_kva",
                "must list at least one size",
            ));
        }
        if s.inverter_sizes_kva.iter().any(|k| !k.is_finite() || *k <= 0.0) {
            errors.push(ConfigError::new(
                "sizing.inverter_sizes_kva",
                "sizes must be positive",
            ));
        }
        if !(s.power_factor > 0.0 && s.power_factor <= 1.0) {
            errors.push(ConfigError::new("sizing.power_factor", "must be in (0.0, 1.0]"));
        }
        if !(s.safety_margin >= 1.0) {
            errors.push(ConfigError::new("sizing.safety_margin", "must be >= 1.0"));
        }
        if !(s.surge_tolerance >= 1.0) {
            errors.push(ConfigError::new("sizing.surge_tolerance", "must be >= 1.0"));
        }

        let n = &self.notify;
        if n.endpoint.trim().is_empty() {
            errors.push(ConfigError::new("notify.endpoint", "must not be empty"));
        }
        if n.api_key_env.trim().is_empty() {
            errors.push(ConfigError::new("notify.api_key_env", "must not be empty"));
        }
        if n.to.iter().all(|addr| addr.trim().is_empty()) {
            errors.push(ConfigError::new(
                "notify.to",
                "must list at least one recipient",
            ));
        }
        if n.timeout_secs == 0 {
            errors.push(ConfigError::new("notify.timeout_secs", "must be > 0"));
        }

        errors
    }
}

/// A saved appliance selection, loaded from TOML or a built-in preset.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SelectionConfig {
    /// Catalog id → quantity.
    #[serde(default)]
    pub appliances: BTreeMap<String, u32>,
    /// User-authored equipment.
    #[serde(default)]
    pub custom: Vec<CustomEntryConfig>,
}

/// One `[[custom]]` entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CustomEntryConfig {
    pub name: String,
    /// Running power (W).
    pub wattage: f64,
    #[serde(default)]
    pub category: EquipmentCategory,
    #[serde(default = "default_custom_quantity")]
    pub quantity: u32,
}

fn default_custom_quantity() -> u32 {
    1
}

impl CustomEntryConfig {
    fn new(name: &str, wattage: f64, category: EquipmentCategory, quantity: u32) -> Self {
        Self {
            name: name.to_string(),
            wattage,
            category,
            quantity,
        }
    }
}

impl SelectionConfig {
    /// Available preset names.
    pub const PRESETS: &[&str] = &["starter", "home_office", "family"];

    /// Lights, a TV, a fan and small electronics.
    pub fn starter() -> Self {
        Self::from_pairs(
            &[
                ("led_bulb", 6),
                ("tv_32", 1),
                ("decoder", 1),
                ("ceiling_fan", 2),
                ("router", 1),
                ("laptop", 1),
                ("phone_charger", 2),
            ],
            Vec::new(),
        )
    }

    /// A working-from-home setup with a refrigerator.
    pub fn home_office() -> Self {
        Self::from_pairs(
            &[
                ("led_bulb", 4),
                ("desktop", 1),
                ("printer", 1),
                ("router", 1),
                ("phone_charger", 2),
                ("standing_fan", 1),
                ("refrigerator", 1),
            ],
            Vec::new(),
        )
    }

    /// A household running a refrigerator and deep freezer plus a borehole pump.
    pub fn family() -> Self {
        Self::from_pairs(
            &[
                ("led_bulb", 10),
                ("outdoor_light", 2),
                ("tv_55", 1),
                ("decoder", 1),
                ("sound_system", 1),
                ("ceiling_fan", 3),
                ("router", 1),
                ("phone_charger", 4),
                ("refrigerator", 1),
                ("freezer", 1),
            ],
            vec![CustomEntryConfig::new(
                "Borehole pump",
                750.0,
                EquipmentCategory::HasMotor,
                1,
            )],
        )
    }

    fn from_pairs(appliances: &[(&str, u32)], custom: Vec<CustomEntryConfig>) -> Self {
        Self {
            appliances: appliances
                .iter()
                .map(|&(id, qty)| (id.to_string(), qty))
                .collect(),
            custom,
        }
    }

    /// Loads a selection from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "starter" => Ok(Self::starter()),
            "home_office" => Ok(Self::home_office()),
            "family" => Ok(Self::family()),
            _ => Err(ConfigError::new(
                "preset",
                format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            )),
        }
    }

    /// Parses a selection from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        Self::from_toml_str(&read_file(path, "selection")?)
    }

    /// Parses a selection from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        parse_toml(s)
    }

    /// Builds a gated [`Selection`] from this configuration.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` naming the offending appliance or custom entry.
    pub fn build(&self, catalog: &Catalog, rules: &RuleSet) -> Result<Selection, ConfigError> {
        let mut selection =
            Selection::from_requested(&self.appliances, catalog, rules).map_err(|e| {
                let field = match &e {
                    SelectionError::UnknownAppliance(id) | SelectionError::Blocked { id, .. } => {
                        format!("appliances.{id}")
                    }
                    _ => "appliances".to_string(),
                };
                ConfigError::new(field, e.to_string())
            })?;

        for (n, entry) in self.custom.iter().enumerate() {
            let field = format!("custom[{n}]");
            let id = selection
                .add_custom(&entry.name, entry.wattage, entry.category)
                .map_err(|e| ConfigError::new(&field, e.to_string()))?
                .id
                .clone();
            selection
                .set_custom_quantity(&id, entry.quantity)
                .map_err(|e| ConfigError::new(&field, e.to_string()))?;
        }
        Ok(selection)
    }
}
