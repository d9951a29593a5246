//! API request and response types.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::catalog::{ApplianceDefinition, CategoryInfo};
use crate::config::{CustomEntryConfig, SelectionConfig};

/// `GET /catalog` body.
#[derive(Debug, Serialize)]
pub struct CatalogResponse {
    /// Display order.
    pub categories: Vec<CategoryInfo>,
    pub appliances: Vec<ApplianceDefinition>,
}

/// `POST /evaluate` body.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EvaluateRequest {
    /// Catalog id → quantity.
    #[serde(default)]
    pub quantities: BTreeMap<String, u32>,
    #[serde(default)]
    pub custom: Vec<CustomEntryConfig>,
}

impl From<EvaluateRequest> for SelectionConfig {
    fn from(req: EvaluateRequest) -> Self {
        Self {
            appliances: req.quantities,
            custom: req.custom,
        }
    }
}

/// Error envelope for all failing requests.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
