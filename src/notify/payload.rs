//! Contact form submission as posted by the web front-end.

use serde::{Deserialize, Serialize};

/// Contact request with an optional sizing snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactNotification {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    pub message: String,
    pub contact_method: String,
    #[serde(default)]
    pub inverter_sizing: Option<InverterSizingSnapshot>,
}

/// Sizing attached to a contact request.
///
/// Older clients send flat `totalWattage` / `recommendedInverterSize` fields;
/// current clients nest the numbers under `calculations`. Both are accepted
/// and the flat fields win when present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InverterSizingSnapshot {
    #[serde(default)]
    pub total_wattage: Option<f64>,
    #[serde(default)]
    pub recommended_inverter_size: Option<f64>,
    #[serde(default)]
    pub appliances: Vec<ApplianceSummary>,
    #[serde(default)]
    pub calculations: Option<Calculations>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplianceSummary {
    pub name: String,
    pub wattage: f64,
    pub quantity: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Calculations {
    #[serde(default)]
    pub total_load: Option<f64>,
    #[serde(default)]
    pub required_kva: Option<f64>,
    #[serde(default)]
    pub recommended_inverter: Option<f64>,
}

impl InverterSizingSnapshot {
    /// Running load (W).
    pub fn total_wattage(&self) -> Option<f64> {
        self.total_wattage
            .or_else(|| self.calculations.as_ref()?.total_load)
    }

    /// Recommended rating (kVA).
    pub fn recommended_kva(&self) -> Option<f64> {
        self.recommended_inverter_size
            .or_else(|| self.calculations.as_ref()?.recommended_inverter)
    }

    /// Only the current shape carries the required capacity.
    pub fn required_kva(&self) -> Option<f64> {
        self.calculations.as_ref()?.required_kva
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_shape() {
        // language=json
        let body = r#"{
            "name": "Ada",
            "email": "ada@example.com",
            "phone": null,
            "location": "Lagos",
            "message": "Need a quote",
            "contactMethod": "email",
            "inverterSizing": {
                "totalWattage": 918,
                "recommendedInverterSize": 2.5,
                "appliances": [{"name": "LED Bulb (9W)", "wattage": 9, "quantity": 2}]
            }
        }"#;
        let req: ContactNotification = serde_json::from_str(body).unwrap();
        let sizing = req.inverter_sizing.unwrap();
        assert_eq!(sizing.total_wattage(), Some(918.0));
        assert_eq!(sizing.recommended_kva(), Some(2.5));
        assert_eq!(sizing.required_kva(), None);
        assert_eq!(sizing.appliances.len(), 1);
        assert_eq!(req.phone, None);
    }

    #[test]
    fn current_shape() {
        // language=json
        let body = r#"{
            "name": "Ada",
            "message": "Hi",
            "contactMethod": "phone",
            "inverterSizing": {
                "appliances": [],
                "calculations": {"totalLoad": 1200, "requiredKva": 1.875, "recommendedInverter": 2.5}
            }
        }"#;
        let req: ContactNotification = serde_json::from_str(body).unwrap();
        let sizing = req.inverter_sizing.unwrap();
        assert_eq!(sizing.total_wattage(), Some(1200.0));
        assert_eq!(sizing.required_kva(), Some(1.875));
        assert_eq!(sizing.recommended_kva(), Some(2.5));
        assert_eq!(req.email, None);
    }

    #[test]
    fn legacy_fields_win_over_calculations() {
        let sizing = InverterSizingSnapshot {
            total_wattage: Some(500.0),
            calculations: Some(Calculations {
                total_load: Some(900.0),
                required_kva: None,
                recommended_inverter: Some(5.0),
            }),
            ..Default::default()
        };
        assert_eq!(sizing.total_wattage(), Some(500.0));
        assert_eq!(sizing.recommended_kva(), Some(5.0));
    }

    #[test]
    fn missing_required_field_rejected() {
        let body = r#"{"name": "Ada", "contactMethod": "email"}"#;
        assert!(serde_json::from_str::<ContactNotification>(body).is_err());
    }
}
