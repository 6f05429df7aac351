//! Per-tick invariant checks (spec section 8, universal invariants) and the
//! every-5-years cross-year monotonicity/conservation pass. Only invariant
//! violations are fatal to a run; everything else degrades gracefully
//! upstream of this module.

use ocse_types::{DebugEntry, OcseError, ScenarioParams};

use crate::economics::MIN_GROUND_SHARE;

const MASS_SUM_TOLERANCE: f64 = 1.0e-3; // 0.1%
const MIN_RADIATOR_DELTA_C: f64 = 10.0;

fn violation(entry: &DebugEntry, detail: impl Into<String>) -> OcseError {
    OcseError::InvariantViolation {
        year: entry.year,
        scenario: entry.scenario_mode,
        detail: detail.into(),
    }
}

/// Checks that must hold for every `(year, scenario)` entry in isolation.
///
/// # Errors
/// Returns [`OcseError::InvariantViolation`] describing the first violated
/// invariant found.
pub fn validate_entry(entry: &DebugEntry, scenario: &ScenarioParams) -> Result<(), OcseError> {
    // 1. satellitesTotal == classA_alive + classB_alive
    if entry.satellites_total
        != entry.class_a_satellites_alive + entry.class_b_satellites_alive
    {
        return Err(violation(entry, "satellites_total != class A + class B alive"));
    }

    // 2. compute_effective == compute_exportable
    if (entry.compute_effective_flops - entry.compute_exportable_flops).abs() > 1e-6 {
        return Err(violation(entry, "compute_effective_flops != compute_exportable_flops"));
    }

    // 3. survival fraction bounds
    if !(0.0..=1.0).contains(&entry.survival_fraction) {
        return Err(violation(entry, "survival_fraction outside [0, 1]"));
    }
    if entry.diagnostics.risk_mode == ocse_types::RiskMode::Safe
        && entry.survival_fraction < scenario.safe_survival_floor() - 1e-9
    {
        return Err(violation(entry, "survival_fraction below SAFE floor"));
    }

    // 4. utilization bounds
    for (name, value) in [
        ("heat_utilization", entry.heat_utilization),
        ("backhaul_utilization", entry.backhaul_utilization),
        ("maintenance_utilization", entry.maintenance_utilization),
    ] {
        if !(0.0..=1.0).contains(&value) {
            return Err(violation(entry, format!("{name} outside [0, 1]: {value}")));
        }
    }
    if entry.power_utilization_percent > 100.0 + 1e-6 {
        return Err(violation(entry, "power_utilization_percent > 100"));
    }

    // 5. component masses sum to bus_total_mass_kg; fleet total is consistent
    let mass_sum = entry.mass_silicon_kg
        + entry.mass_radiator_kg
        + entry.mass_solar_array_kg
        + entry.mass_shielding_kg
        + entry.mass_power_electronics_kg
        + entry.mass_avionics_kg
        + entry.mass_adcs_kg
        + entry.mass_battery_kg
        + entry.mass_propulsion_kg
        + entry.mass_structure_kg
        + entry.mass_other_kg;
    if entry.bus_total_mass_kg > 0.0 {
        let rel_err = (mass_sum - entry.bus_total_mass_kg).abs() / entry.bus_total_mass_kg;
        if rel_err > MASS_SUM_TOLERANCE {
            return Err(violation(entry, "component masses do not sum to bus_total_mass_kg"));
        }
    }
    if entry.satellites_total > 0 {
        let expected_fleet_mass = f64::from(entry.satellites_total) * entry.bus_total_mass_kg;
        if expected_fleet_mass > 0.0 {
            let rel_err =
                (entry.fleet_total_mass_kg - expected_fleet_mass).abs() / expected_fleet_mass;
            if rel_err > 0.01 {
                return Err(violation(
                    entry,
                    "fleet_total_mass_kg inconsistent with satellites_total * bus_total_mass_kg",
                ));
            }
        }
    }

    // 6. compute cascade is non-increasing
    if entry.compute_raw_flops + 1e-6 < entry.compute_effective_flops {
        return Err(violation(entry, "compute_raw_flops < compute_effective_flops"));
    }

    // 7. cumulative series are non-decreasing is checked cross-year, below.

    // 8. orbit share bounds and partition
    if entry.orbit_compute_share < -1e-9
        || entry.orbit_compute_share > 1.0 - MIN_GROUND_SHARE + 1e-9
    {
        return Err(violation(entry, "orbit_compute_share outside [0, 1 - minGroundShare]"));
    }
    if (entry.ground_compute_share + entry.orbit_compute_share - 1.0).abs() > 1e-9 {
        return Err(violation(entry, "ground_compute_share + orbit_compute_share != 1"));
    }

    // 9. radiator is colder than core whenever heat is being rejected
    if entry.heat_utilization > 0.0
        && entry.temp_core_c - entry.temp_radiator_c < MIN_RADIATOR_DELTA_C - 1e-6
    {
        return Err(violation(entry, "temp_core_c - temp_radiator_c < 10 C while rejecting heat"));
    }

    for (name, value) in [
        ("carbon_intensity_ground_g_per_kwh", entry.carbon_intensity_ground_g_per_kwh),
        ("carbon_intensity_orbit_g_per_kwh", entry.carbon_intensity_orbit_g_per_kwh),
        ("carbon_intensity_blended_g_per_kwh", entry.carbon_intensity_blended_g_per_kwh),
    ] {
        if value < -1e-9 || !value.is_finite() {
            return Err(violation(entry, format!("{name} is negative or non-finite")));
        }
    }

    Ok(())
}

/// Cross-year monotonicity/conservation pass, run every 5 years over the
/// entries accumulated so far for one scenario (ordered by year).
///
/// # Errors
/// Returns [`OcseError::InvariantViolation`] if a cumulative series regresses.
pub fn validate_monotonic_series(entries: &[DebugEntry]) -> Result<(), OcseError> {
    let mut prev: Option<&DebugEntry> = None;
    for entry in entries {
        if let Some(p) = prev {
            if entry.cumulative_orbital_cost_usd + 1e-6 < p.cumulative_orbital_cost_usd {
                return Err(violation(entry, "cumulative_orbital_cost_usd regressed"));
            }
            if entry.cumulative_exported_pflops + 1e-6 < p.cumulative_exported_pflops {
                return Err(violation(entry, "cumulative_exported_pflops regressed"));
            }
            if entry.cumulative_orbital_carbon_kg + 1e-6 < p.cumulative_orbital_carbon_kg {
                return Err(violation(entry, "cumulative_orbital_carbon_kg regressed"));
            }
            if entry.cumulative_orbit_energy_twh + 1e-6 < p.cumulative_orbit_energy_twh {
                return Err(violation(entry, "cumulative_orbit_energy_twh regressed"));
            }
        }
        prev = Some(entry);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::debug_store::DebugStore;
    use ocse_types::debug_entry::ScenarioDiagnostics;
    use ocse_types::{DominantConstraint, RiskMode, ScenarioMode, ThermalRegime};

    fn valid_entry() -> DebugEntry {
        DebugEntry {
            year: 2025,
            scenario_mode: ScenarioMode::Baseline,
            satellites_total: 10,
            class_a_satellites_alive: 8,
            class_b_satellites_alive: 2,
            class_a_low: 4,
            class_a_mid: 2,
            class_a_sun_sync: 2,
            new_launches_total: 10,
            retirements_total: 0,
            cumulative_launches: 10,
            cumulative_failures: 0,
            power_total_kw: 1_000.0,
            power_per_sat_kw: 100.0,
            power_utilization_percent: 50.0,
            compute_raw_flops: 100.0,
            compute_sustained_flops: 90.0,
            compute_exportable_flops: 80.0,
            compute_effective_flops: 80.0,
            compute_demand_flops: 1_000.0,
            bus_total_mass_kg: 100.0,
            fleet_total_mass_kg: 1_000.0,
            mass_silicon_kg: 40.0,
            mass_radiator_kg: 20.0,
            mass_solar_array_kg: 10.0,
            mass_shielding_kg: 8.0,
            mass_power_electronics_kg: 5.0,
            mass_avionics_kg: 5.0,
            mass_adcs_kg: 3.0,
            mass_battery_kg: 4.0,
            mass_propulsion_kg: 2.0,
            mass_structure_kg: 2.0,
            mass_other_kg: 1.0,
            temp_core_c: 30.0,
            temp_radiator_c: 15.0,
            emissivity: 0.9,
            radiator_area_m2: 10.0,
            heat_utilization: 0.5,
            backhaul_capacity_tbps: 1.0,
            backhaul_utilization: 0.3,
            failures_this_year: 0,
            recoverable_failures: 0,
            permanent_loss: 0,
            repair_capacity_pods: 10.0,
            maintenance_utilization: 0.1,
            autonomy_level: 0.5,
            survival_fraction: 0.97,
            ground_unit_cost_usd_per_pflop: 2_000_000.0,
            ground_compute_share: 0.9,
            ground_opex_usd: 0.0,
            orbit_unit_cost_usd_per_pflop: 6_000_000.0,
            orbit_unit_cost_raw_usd_per_pflop: 6_000_000.0,
            orbit_compute_share: 0.1,
            orbit_opex_usd: 0.0,
            cumulative_orbital_cost_usd: 1_000.0,
            cumulative_exported_pflops: 1.0,
            cost_per_compute_ground: 2_000_000.0,
            cost_per_compute_blended: 2_400_000.0,
            cost_per_compute_blended_raw: 2_400_000.0,
            latency_ground_ms: 80.0,
            latency_orbit_ms: 15.0,
            latency_blended_ms: 73.5,
            launch_carbon_kg: 10.0,
            replacement_carbon_kg: 0.0,
            cumulative_orbital_carbon_kg: 10.0,
            cumulative_orbit_energy_twh: 0.001,
            carbon_intensity_ground_g_per_kwh: 400.0,
            carbon_intensity_orbit_g_per_kwh: 1000.0,
            carbon_intensity_blended_g_per_kwh: 460.0,
            shell_utilization_low: 0.1,
            shell_utilization_mid: 0.05,
            shell_utilization_sso: 0.02,
            conjunction_rate: 0.01,
            accumulated_debris: 0.0,
            collision_probability: 0.0,
            congestion_cost_usd: 0.0,
            battery_density_wh_per_kg: 260.0,
            battery_cost_usd_per_kwh: 120.0,
            cost_per_compute_blended_display: 2_400_000.0,
            carbon_intensity_blended_display_g_per_kwh: 460.0,
            orbit_unit_cost_display_usd_per_pflop: 6_000_000.0,
            diagnostics: ScenarioDiagnostics {
                orbit_cost_scale: 1.0,
                orbit_cost_scale_calibrated: true,
                parity_achieved: false,
                carbon_crossover_triggered: false,
                numeric_overflow_flag: false,
                dominant_constraint: DominantConstraint::Heat,
                risk_mode: RiskMode::Safe,
                thermal_regime: ThermalRegime::Nominal,
            },
        }
    }

    #[test]
    fn valid_entry_passes() {
        let scenario = ScenarioParams::baseline(2025);
        assert!(validate_entry(&valid_entry(), &scenario).is_ok());
    }

    #[test]
    fn satellites_total_mismatch_is_fatal() {
        let scenario = ScenarioParams::baseline(2025);
        let mut entry = valid_entry();
        entry.satellites_total = 999;
        let err = validate_entry(&entry, &scenario).unwrap_err();
        assert!(err.is_fatal());
    }

    #[test]
    fn survival_below_safe_floor_is_fatal() {
        let scenario = ScenarioParams::baseline(2025);
        let mut entry = valid_entry();
        entry.survival_fraction = 0.5;
        assert!(validate_entry(&entry, &scenario).is_err());
    }

    #[test]
    fn monotonic_series_detects_regression() {
        let mut store = DebugStore::new();
        let mut first = valid_entry();
        first.year = 2025;
        first.cumulative_orbital_cost_usd = 100.0;
        let mut second = valid_entry();
        second.year = 2026;
        second.cumulative_orbital_cost_usd = 50.0;
        store.push(first);
        store.push(second);
        let entries: Vec<DebugEntry> =
            store.scenario_entries(ScenarioMode::Baseline).cloned().collect();
        assert!(validate_monotonic_series(&entries).is_err());
    }
}
