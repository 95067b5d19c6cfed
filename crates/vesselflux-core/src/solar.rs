use serde::{Deserialize, Serialize};

use crate::fixed::{Fixed64, f64_to_fixed64};

/// Solar-exposure factor applied to sun-dependent handlers during
/// simulation. Always within `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SolarExposure(Fixed64);

impl SolarExposure {
    /// Full exposure, as at the reference distance.
    pub const FULL: SolarExposure = SolarExposure(Fixed64::ONE);
    /// No exposure (eclipse, or the user disabled solar).
    pub const NONE: SolarExposure = SolarExposure(Fixed64::ZERO);

    /// Clamp a scalar into `[0, 1]`.
    pub fn new(scalar: Fixed64) -> Self {
        SolarExposure(scalar.clamp(Fixed64::ZERO, Fixed64::ONE))
    }

    /// Build from an f64 scalar. Non-finite input is treated as no exposure.
    pub fn from_f64(scalar: f64) -> Self {
        f64_to_fixed64(scalar)
            .map(Self::new)
            .unwrap_or(Self::NONE)
    }

    /// Inverse-square falloff relative to a reference distance, clamped to
    /// `[0, 1]`. Distances are in host units (metres) and are far outside
    /// the fixed-point range, so the ratio is formed and clamped in f64
    /// before conversion.
    pub fn from_distance(distance: f64, reference_distance: f64) -> Self {
        if !(distance > 0.0) || !(reference_distance > 0.0) {
            return Self::NONE;
        }
        let ratio = reference_distance / distance;
        Self::from_f64((ratio * ratio).min(1.0))
    }

    pub fn scalar(self) -> Fixed64 {
        self.0
    }

    /// Scale a flow value by this exposure.
    pub fn apply(self, value: Fixed64) -> Fixed64 {
        value.saturating_mul(self.0)
    }
}

impl Default for SolarExposure {
    fn default() -> Self {
        Self::FULL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_clamps_into_unit_range() {
        assert_eq!(SolarExposure::new(Fixed64::from_num(2)), SolarExposure::FULL);
        assert_eq!(SolarExposure::new(Fixed64::from_num(-1)), SolarExposure::NONE);
    }

    #[test]
    fn from_distance_follows_inverse_square() {
        let e = SolarExposure::from_distance(2.0e10, 1.0e10);
        assert_eq!(e.scalar(), Fixed64::from_num(0.25));
    }

    #[test]
    fn from_distance_closer_than_reference_is_capped() {
        let e = SolarExposure::from_distance(0.5e10, 1.0e10);
        assert_eq!(e, SolarExposure::FULL);
        // Squared ratio far beyond the Q32.32 range.
        assert_eq!(SolarExposure::from_distance(1.0e5, 1.0e10), SolarExposure::FULL);
        assert_eq!(SolarExposure::from_distance(1.0e-300, 1.0e10), SolarExposure::FULL);
    }

    #[test]
    fn from_distance_rejects_non_positive() {
        assert_eq!(SolarExposure::from_distance(0.0, 1.0), SolarExposure::NONE);
        assert_eq!(SolarExposure::from_distance(f64::NAN, 1.0), SolarExposure::NONE);
    }

    #[test]
    fn apply_scales_value() {
        let half = SolarExposure::from_f64(0.5);
        assert_eq!(half.apply(Fixed64::from_num(-10)), Fixed64::from_num(-5));
    }
}
