//! Header figures for the electrical and thermal panels.

use vesselflux_core::context::{FlowTotals, ResourceTotals};
use vesselflux_core::fixed::{Fixed64, checked_div_64, fixed64_to_f64};

// ---------------------------------------------------------------------------
// Thermal
// ---------------------------------------------------------------------------

/// Extra heat the user asked to account for, in kW. Both fields are
/// magnitudes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UserHeat {
    pub generation: Fixed64,
    pub consumption: Fixed64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeatStatus {
    /// Rejection keeps up with generation.
    Ok,
    /// More heat is generated than rejected.
    Overheating,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThermalSummary {
    /// Heat added to the vessel, including user generation (magnitude).
    pub generated: Fixed64,
    /// Heat removed from the vessel, including user consumption (magnitude).
    pub rejected: Fixed64,
    /// `generated - rejected`. Positive means the vessel is heating up.
    pub net: Fixed64,
    pub status: HeatStatus,
}

impl ThermalSummary {
    pub fn compute(totals: FlowTotals, user: UserHeat) -> Self {
        let generated = totals.production.saturating_abs().saturating_add(user.generation);
        let rejected = totals.consumption.saturating_abs().saturating_add(user.consumption);
        let net = generated.saturating_sub(rejected);
        let status = if net > Fixed64::ZERO {
            HeatStatus::Overheating
        } else {
            HeatStatus::Ok
        };
        Self {
            generated,
            rejected,
            net,
            status,
        }
    }

    /// Net flux header, e.g. `"▲ 12.50 kW"`.
    pub fn net_header(&self) -> String {
        format_flow(self.net, "kW")
    }

    pub fn generated_header(&self) -> String {
        format!("▲ {:.2} kW", fixed64_to_f64(self.generated))
    }

    pub fn rejected_header(&self) -> String {
        format!("▼ {:.2} kW", fixed64_to_f64(self.rejected))
    }
}

/// Format a signed flow as a magnitude with a direction arrow: `▲` for
/// positive, `▼` for negative, none for zero.
pub fn format_flow(value: Fixed64, units: &str) -> String {
    let magnitude = fixed64_to_f64(value.saturating_abs());
    if value > Fixed64::ZERO {
        format!("▲ {magnitude:.2} {units}")
    } else if value < Fixed64::ZERO {
        format!("▼ {magnitude:.2} {units}")
    } else {
        format!("{magnitude:.2} {units}")
    }
}

// ---------------------------------------------------------------------------
// Electrical
// ---------------------------------------------------------------------------

/// Where the vessel's charge is heading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ChargeTrend {
    /// Net consumption; seconds until the stored charge is gone.
    Draining { seconds: f64 },
    /// Net production; seconds until capacity is reached.
    Charging { seconds: f64 },
    Balanced,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElectricalSummary {
    pub production: Fixed64,
    pub consumption: Fixed64,
    /// Signed net flow in EC/s. Negative means the vessel gains charge.
    pub net: Fixed64,
    pub levels: Option<ResourceTotals>,
    pub trend: Option<ChargeTrend>,
}

impl ElectricalSummary {
    pub fn compute(totals: FlowTotals, levels: Option<ResourceTotals>) -> Self {
        let net = totals.production.saturating_add(totals.consumption);
        let trend = levels.and_then(|l| charge_trend(net, l));
        Self {
            production: totals.production,
            consumption: totals.consumption,
            net,
            levels,
            trend,
        }
    }

    /// Net flow header in EC/s. The arrow points up when the vessel gains
    /// charge.
    pub fn net_header(&self) -> String {
        format_flow(self.net.saturating_neg(), "EC/s")
    }

    /// Seconds until the battery is empty, if draining.
    pub fn time_to_drain(&self) -> Option<f64> {
        match self.trend? {
            ChargeTrend::Draining { seconds } => Some(seconds),
            _ => None,
        }
    }

    /// Seconds until the battery is full, if charging.
    pub fn time_to_charge(&self) -> Option<f64> {
        match self.trend? {
            ChargeTrend::Charging { seconds } => Some(seconds),
            _ => None,
        }
    }
}

fn charge_trend(net: Fixed64, levels: ResourceTotals) -> Option<ChargeTrend> {
    if net == Fixed64::ZERO {
        return Some(ChargeTrend::Balanced);
    }
    if net > Fixed64::ZERO {
        let seconds = checked_div_64(levels.amount.max(Fixed64::ZERO), net)?;
        Some(ChargeTrend::Draining {
            seconds: fixed64_to_f64(seconds),
        })
    } else {
        let headroom = levels.capacity.saturating_sub(levels.amount).max(Fixed64::ZERO);
        let seconds = checked_div_64(headroom, net.saturating_abs())?;
        Some(ChargeTrend::Charging {
            seconds: fixed64_to_f64(seconds),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vesselflux_core::test_utils::fixed;

    fn flow(production: f64, consumption: f64) -> FlowTotals {
        FlowTotals {
            production: fixed(production),
            consumption: fixed(consumption),
        }
    }

    #[test]
    fn thermal_overheating_when_generation_exceeds_rejection() {
        let summary = ThermalSummary::compute(flow(-30.0, 20.0), UserHeat::default());
        assert_eq!(summary.net, fixed(10.0));
        assert_eq!(summary.status, HeatStatus::Overheating);
        assert_eq!(summary.net_header(), "▲ 10.00 kW");
    }

    #[test]
    fn thermal_ok_when_balanced_or_rejecting() {
        let balanced = ThermalSummary::compute(flow(-20.0, 20.0), UserHeat::default());
        assert_eq!(balanced.status, HeatStatus::Ok);
        assert_eq!(balanced.net_header(), "0.00 kW");

        let cooling = ThermalSummary::compute(flow(-5.0, 20.0), UserHeat::default());
        assert_eq!(cooling.status, HeatStatus::Ok);
        assert_eq!(cooling.net_header(), "▼ 15.00 kW");
    }

    #[test]
    fn user_heat_shifts_the_balance() {
        let user = UserHeat {
            generation: fixed(12.0),
            consumption: fixed(1.0),
        };
        let summary = ThermalSummary::compute(flow(-5.0, 10.0), user);
        assert_eq!(summary.generated, fixed(17.0));
        assert_eq!(summary.rejected, fixed(11.0));
        assert_eq!(summary.status, HeatStatus::Overheating);
        assert_eq!(summary.generated_header(), "▲ 17.00 kW");
        assert_eq!(summary.rejected_header(), "▼ 11.00 kW");
    }

    #[test]
    fn electrical_time_to_drain() {
        let levels = ResourceTotals {
            amount: fixed(100.0),
            capacity: fixed(200.0),
        };
        let summary = ElectricalSummary::compute(flow(-1.0, 3.0), Some(levels));
        assert_eq!(summary.net, fixed(2.0));
        assert_eq!(summary.time_to_drain(), Some(50.0));
        assert_eq!(summary.time_to_charge(), None);
        assert_eq!(summary.net_header(), "▼ 2.00 EC/s");
    }

    #[test]
    fn electrical_time_to_charge() {
        let levels = ResourceTotals {
            amount: fixed(100.0),
            capacity: fixed(200.0),
        };
        let summary = ElectricalSummary::compute(flow(-5.0, 1.0), Some(levels));
        assert_eq!(summary.time_to_charge(), Some(25.0));
        assert_eq!(summary.net_header(), "▲ 4.00 EC/s");
    }

    #[test]
    fn electrical_without_levels_has_no_trend() {
        let summary = ElectricalSummary::compute(flow(-5.0, 1.0), None);
        assert_eq!(summary.trend, None);
        let balanced = ElectricalSummary::compute(
            flow(-1.0, 1.0),
            Some(ResourceTotals::default()),
        );
        assert_eq!(balanced.trend, Some(ChargeTrend::Balanced));
    }
}
