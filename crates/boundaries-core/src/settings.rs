//! Catalog settings and validation.
//!
//! Settings are plain values handed to the components that enforce them;
//! nothing here is process-global.

use serde::{Deserialize, Serialize};

/// Default cap on boundaries returned by a geo-filtered query.
pub const DEFAULT_MAX_GEO_LIST_RESULTS: u32 = 80;

/// Catalog settings.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CatalogSettings {
    /// Maximum number of boundaries a geo-filtered query may match before the
    /// API rejects it.
    pub max_geo_list_results: u32,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl CatalogSettings {
    /// Create settings with sensible defaults.
    #[must_use]
    pub const fn with_defaults() -> Self {
        Self {
            max_geo_list_results: DEFAULT_MAX_GEO_LIST_RESULTS,
        }
    }

    /// Override the geo result cap.
    #[must_use]
    pub const fn with_max_geo_list_results(mut self, limit: u32) -> Self {
        self.max_geo_list_results = limit;
        self
    }
}

/// Settings validation error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("Max geo list results must be at least 1, got {0}")]
    InvalidGeoListLimit(u32),
}

/// Validate settings values.
pub fn validate_settings(settings: &CatalogSettings) -> Result<(), SettingsError> {
    if settings.max_geo_list_results == 0 {
        return Err(SettingsError::InvalidGeoListLimit(0));
    }
    Ok(())
}
