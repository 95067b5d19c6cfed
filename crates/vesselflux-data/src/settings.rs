//! User settings.
//!
//! Every field is optional in the file; missing fields take their defaults.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use vesselflux_core::fixed::{Fixed64, f64_to_fixed64};
use vesselflux_core::solar::SolarExposure;

use crate::loader::{DataLoadError, deserialize_file, find_data_file};

/// Base name of the settings file, without extension.
pub const SETTINGS_BASE_NAME: &str = "vesselflux";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Per-handler diagnostics in the aggregator.
    pub debug_mode: bool,
    /// Membership diff diagnostics in the panel caches.
    pub debug_ui_mode: bool,
    /// Solar exposure used for editor simulation. Clamped to `[0, 1]`.
    pub default_solar_scalar: f64,
    /// Whether editor totals are simulated (sun-scaled, eligible handlers
    /// only) rather than summed from ratings.
    pub editor_simulation: bool,
    pub thermal: ThermalSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            debug_mode: false,
            debug_ui_mode: false,
            default_solar_scalar: 1.0,
            editor_simulation: true,
            thermal: ThermalSettings::default(),
        }
    }
}

/// User-entered heat, in kW.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThermalSettings {
    pub user_generation: f64,
    pub user_consumption: f64,
}

impl Settings {
    pub fn solar_exposure(&self) -> SolarExposure {
        SolarExposure::from_f64(self.default_solar_scalar)
    }

    /// User heat generation and consumption as fixed-point magnitudes.
    pub fn user_heat(&self) -> (Fixed64, Fixed64) {
        (
            f64_to_fixed64(self.thermal.user_generation).unwrap_or(Fixed64::ZERO),
            f64_to_fixed64(self.thermal.user_consumption).unwrap_or(Fixed64::ZERO),
        )
    }

    /// Reject values that cannot be meaningfully used and clamp the rest.
    fn validated(mut self, file: &Path) -> Result<Self, DataLoadError> {
        if !self.default_solar_scalar.is_finite() {
            return Err(DataLoadError::Invalid {
                file: file.to_path_buf(),
                field: "default_solar_scalar",
                detail: format!("{} is not a finite number", self.default_solar_scalar),
            });
        }
        let clamped = self.default_solar_scalar.clamp(0.0, 1.0);
        if clamped != self.default_solar_scalar {
            tracing::warn!(
                value = self.default_solar_scalar,
                clamped,
                "default_solar_scalar out of range"
            );
            self.default_solar_scalar = clamped;
        }

        let heat = [
            ("thermal.user_generation", self.thermal.user_generation),
            ("thermal.user_consumption", self.thermal.user_consumption),
        ];
        for (field, value) in heat {
            if f64_to_fixed64(value).is_none_or(|v| v < Fixed64::ZERO) {
                return Err(DataLoadError::Invalid {
                    file: file.to_path_buf(),
                    field,
                    detail: format!("{value} is not a non-negative heat flux"),
                });
            }
        }
        Ok(self)
    }
}

/// Load settings from a file, detecting the format from its extension.
pub fn load_settings(path: &Path) -> Result<Settings, DataLoadError> {
    let settings: Settings = deserialize_file(path)?;
    settings.validated(path)
}

/// Locate the settings file in a directory.
pub fn find_settings_file(dir: &Path) -> Result<Option<PathBuf>, DataLoadError> {
    find_data_file(dir, SETTINGS_BASE_NAME)
}

/// Load the settings file from a directory, or the defaults if there is none.
pub fn load_settings_from_dir(dir: &Path) -> Result<Settings, DataLoadError> {
    match find_settings_file(dir)? {
        Some(path) => load_settings(&path),
        None => {
            tracing::debug!(dir = %dir.display(), "no settings file, using defaults");
            Ok(Settings::default())
        }
    }
}
