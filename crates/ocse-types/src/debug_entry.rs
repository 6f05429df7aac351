use serde::{Deserialize, Serialize};

use crate::fleet::DominantConstraint;
use crate::physics::{RiskMode, ThermalRegime};
use crate::scenario::ScenarioMode;

/// Scenario-level diagnostics that do not belong on the main metric surface
/// but are useful for inspecting kernel internals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScenarioDiagnostics {
    pub orbit_cost_scale: f64,
    pub orbit_cost_scale_calibrated: bool,
    pub parity_achieved: bool,
    pub carbon_crossover_triggered: bool,
    pub numeric_overflow_flag: bool,
    pub dominant_constraint: DominantConstraint,
    pub risk_mode: RiskMode,
    pub thermal_regime: ThermalRegime,
}

/// The single canonical per-(year, scenario) record. Append-only once
/// written; every downstream chart and panel reads from this struct alone.
///
/// Display (clamped) fields and their raw twins are both present so UI code
/// can read the clamped value while invariant tests assert on the raw one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebugEntry {
    pub year: i32,
    pub scenario_mode: ScenarioMode,

    // --- Fleet ---
    pub satellites_total: u32,
    pub class_a_satellites_alive: u32,
    pub class_b_satellites_alive: u32,
    pub class_a_low: u32,
    pub class_a_mid: u32,
    pub class_a_sun_sync: u32,
    pub new_launches_total: u32,
    pub retirements_total: u32,
    pub cumulative_launches: u64,
    pub cumulative_failures: u64,

    // --- Power ---
    pub power_total_kw: f64,
    pub power_per_sat_kw: f64,
    pub power_utilization_percent: f64,

    // --- Compute (raw/effective/exportable/sustained) ---
    pub compute_raw_flops: f64,
    pub compute_sustained_flops: f64,
    pub compute_exportable_flops: f64,
    pub compute_effective_flops: f64,
    pub compute_demand_flops: f64,

    // --- Mass breakdown (fleet totals, kg) ---
    pub bus_total_mass_kg: f64,
    pub fleet_total_mass_kg: f64,
    pub mass_silicon_kg: f64,
    pub mass_radiator_kg: f64,
    pub mass_solar_array_kg: f64,
    pub mass_shielding_kg: f64,
    pub mass_power_electronics_kg: f64,
    pub mass_avionics_kg: f64,
    pub mass_adcs_kg: f64,
    pub mass_battery_kg: f64,
    pub mass_propulsion_kg: f64,
    pub mass_structure_kg: f64,
    pub mass_other_kg: f64,

    // --- Thermal ---
    pub temp_core_c: f64,
    pub temp_radiator_c: f64,
    pub emissivity: f64,
    pub radiator_area_m2: f64,
    pub heat_utilization: f64,

    // --- Backhaul ---
    pub backhaul_capacity_tbps: f64,
    pub backhaul_utilization: f64,

    // --- Maintenance ---
    pub failures_this_year: u32,
    pub recoverable_failures: u32,
    pub permanent_loss: u32,
    pub repair_capacity_pods: f64,
    pub maintenance_utilization: f64,
    pub autonomy_level: f64,

    // --- Survival ---
    pub survival_fraction: f64,

    // --- Economics: ground ---
    pub ground_unit_cost_usd_per_pflop: f64,
    pub ground_compute_share: f64,
    pub ground_opex_usd: f64,

    // --- Economics: orbit ---
    pub orbit_unit_cost_usd_per_pflop: f64,
    pub orbit_unit_cost_raw_usd_per_pflop: f64,
    pub orbit_compute_share: f64,
    pub orbit_opex_usd: f64,
    pub cumulative_orbital_cost_usd: f64,
    pub cumulative_exported_pflops: f64,

    // --- Economics: blended ---
    pub cost_per_compute_ground: f64,
    pub cost_per_compute_blended: f64,
    pub cost_per_compute_blended_raw: f64,
    pub latency_ground_ms: f64,
    pub latency_orbit_ms: f64,
    pub latency_blended_ms: f64,

    // --- Carbon ---
    pub launch_carbon_kg: f64,
    pub replacement_carbon_kg: f64,
    pub cumulative_orbital_carbon_kg: f64,
    pub cumulative_orbit_energy_twh: f64,
    pub carbon_intensity_ground_g_per_kwh: f64,
    pub carbon_intensity_orbit_g_per_kwh: f64,
    pub carbon_intensity_blended_g_per_kwh: f64,

    // --- Congestion & debris ---
    pub shell_utilization_low: f64,
    pub shell_utilization_mid: f64,
    pub shell_utilization_sso: f64,
    pub conjunction_rate: f64,
    pub accumulated_debris: f64,
    pub collision_probability: f64,
    pub congestion_cost_usd: f64,

    // --- Battery ---
    pub battery_density_wh_per_kg: f64,
    pub battery_cost_usd_per_kwh: f64,

    // --- Raw twins for sanity-clamped display metrics ---
    pub cost_per_compute_blended_display: f64,
    pub carbon_intensity_blended_display_g_per_kwh: f64,
    pub orbit_unit_cost_display_usd_per_pflop: f64,

    pub diagnostics: ScenarioDiagnostics,
}

/// Maximum absolute magnitude a displayed metric may take; values beyond this
/// are clamped for display while the raw twin is preserved untouched.
pub const SANITY_CLAMP_MAX_ABS: f64 = 1.0e7;

/// `clamp(value, -maxAbs, maxAbs)`.
#[must_use]
pub fn sanity_clamp(value: f64) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    value.clamp(-SANITY_CLAMP_MAX_ABS, SANITY_CLAMP_MAX_ABS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanity_clamp_bounds_large_values() {
        assert_eq!(sanity_clamp(1.0e9), SANITY_CLAMP_MAX_ABS);
        assert_eq!(sanity_clamp(-1.0e9), -SANITY_CLAMP_MAX_ABS);
        assert_eq!(sanity_clamp(42.0), 42.0);
    }

    #[test]
    fn sanity_clamp_maps_non_finite_to_zero() {
        assert_eq!(sanity_clamp(f64::NAN), 0.0);
        assert_eq!(sanity_clamp(f64::INFINITY), 0.0);
    }
}
