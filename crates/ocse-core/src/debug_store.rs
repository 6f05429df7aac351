//! Append-only `(year, scenarioMode)` -> [`DebugEntry`] store and its JSON
//! export. Every downstream consumer (CLI tables, invariant tests) reads
//! through this store rather than holding its own copy of the run history.

use std::collections::BTreeMap;

use ocse_types::{DebugEntry, ScenarioMode};
use serde::Serialize;

/// Key order is `(scenario_mode, year)` so iteration naturally groups a run's
/// years together even when a store holds multiple scenarios.
#[derive(Debug, Clone, Default)]
pub struct DebugStore {
    entries: BTreeMap<(ScenarioMode, i32), DebugEntry>,
}

impl DebugStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one year's entry. Overwriting an existing `(year, scenario)`
    /// key is a logic error in the runner (each tick is recorded exactly
    /// once) but is allowed here; the store itself does not enforce it.
    pub fn push(&mut self, entry: DebugEntry) {
        self.entries.insert((entry.scenario_mode, entry.year), entry);
    }

    #[must_use]
    pub fn get(&self, scenario_mode: ScenarioMode, year: i32) -> Option<&DebugEntry> {
        self.entries.get(&(scenario_mode, year))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries for one scenario, ordered by year.
    pub fn scenario_entries(&self, scenario_mode: ScenarioMode) -> impl Iterator<Item = &DebugEntry> {
        self.entries
            .iter()
            .filter(move |((mode, _), _)| *mode == scenario_mode)
            .map(|(_, entry)| entry)
    }

    pub fn iter(&self) -> impl Iterator<Item = &DebugEntry> {
        self.entries.values()
    }

    /// JSON-serializable view keyed `"<year>_<scenarioMode>"`, matching the
    /// flat export format downstream analysis tools consume.
    #[must_use]
    pub fn export_view(&self) -> DebugExportView {
        let mut map = BTreeMap::new();
        for ((mode, year), entry) in &self.entries {
            map.insert(format!("{year}_{}", mode.as_str()), entry.clone());
        }
        DebugExportView(map)
    }

    /// Serialize the full store to a pretty JSON string.
    ///
    /// # Errors
    /// Returns an error only if `DebugEntry`'s `Serialize` impl fails, which
    /// does not happen for the plain numeric/enum fields it carries.
    pub fn export_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.export_view())
    }
}

#[derive(Debug, Serialize)]
pub struct DebugExportView(BTreeMap<String, DebugEntry>);

#[cfg(test)]
mod tests {
    use super::*;
    use ocse_types::debug_entry::ScenarioDiagnostics;
    use ocse_types::{DominantConstraint, RiskMode, ThermalRegime};

    fn sample_entry(year: i32, scenario_mode: ScenarioMode) -> DebugEntry {
        DebugEntry {
            year,
            scenario_mode,
            satellites_total: 0,
            class_a_satellites_alive: 0,
            class_b_satellites_alive: 0,
            class_a_low: 0,
            class_a_mid: 0,
            class_a_sun_sync: 0,
            new_launches_total: 0,
            retirements_total: 0,
            cumulative_launches: 0,
            cumulative_failures: 0,
            power_total_kw: 0.0,
            power_per_sat_kw: 0.0,
            power_utilization_percent: 0.0,
            compute_raw_flops: 0.0,
            compute_sustained_flops: 0.0,
            compute_exportable_flops: 0.0,
            compute_effective_flops: 0.0,
            compute_demand_flops: 0.0,
            bus_total_mass_kg: 0.0,
            fleet_total_mass_kg: 0.0,
            mass_silicon_kg: 0.0,
            mass_radiator_kg: 0.0,
            mass_solar_array_kg: 0.0,
            mass_shielding_kg: 0.0,
            mass_power_electronics_kg: 0.0,
            mass_avionics_kg: 0.0,
            mass_adcs_kg: 0.0,
            mass_battery_kg: 0.0,
            mass_propulsion_kg: 0.0,
            mass_structure_kg: 0.0,
            mass_other_kg: 0.0,
            temp_core_c: 0.0,
            temp_radiator_c: 0.0,
            emissivity: 0.9,
            radiator_area_m2: 0.0,
            heat_utilization: 0.0,
            backhaul_capacity_tbps: 0.0,
            backhaul_utilization: 0.0,
            failures_this_year: 0,
            recoverable_failures: 0,
            permanent_loss: 0,
            repair_capacity_pods: 0.0,
            maintenance_utilization: 0.0,
            autonomy_level: 0.0,
            survival_fraction: 1.0,
            ground_unit_cost_usd_per_pflop: 0.0,
            ground_compute_share: 1.0,
            ground_opex_usd: 0.0,
            orbit_unit_cost_usd_per_pflop: 0.0,
            orbit_unit_cost_raw_usd_per_pflop: 0.0,
            orbit_compute_share: 0.0,
            orbit_opex_usd: 0.0,
            cumulative_orbital_cost_usd: 0.0,
            cumulative_exported_pflops: 0.0,
            cost_per_compute_ground: 0.0,
            cost_per_compute_blended: 0.0,
            cost_per_compute_blended_raw: 0.0,
            latency_ground_ms: 0.0,
            latency_orbit_ms: 0.0,
            latency_blended_ms: 0.0,
            launch_carbon_kg: 0.0,
            replacement_carbon_kg: 0.0,
            cumulative_orbital_carbon_kg: 0.0,
            cumulative_orbit_energy_twh: 0.0,
            carbon_intensity_ground_g_per_kwh: 0.0,
            carbon_intensity_orbit_g_per_kwh: 0.0,
            carbon_intensity_blended_g_per_kwh: 0.0,
            shell_utilization_low: 0.0,
            shell_utilization_mid: 0.0,
            shell_utilization_sso: 0.0,
            conjunction_rate: 0.0,
            accumulated_debris: 0.0,
            collision_probability: 0.0,
            congestion_cost_usd: 0.0,
            battery_density_wh_per_kg: 260.0,
            battery_cost_usd_per_kwh: 120.0,
            cost_per_compute_blended_display: 0.0,
            carbon_intensity_blended_display_g_per_kwh: 0.0,
            orbit_unit_cost_display_usd_per_pflop: 0.0,
            diagnostics: ScenarioDiagnostics {
                orbit_cost_scale: 1.0,
                orbit_cost_scale_calibrated: false,
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
    fn scenario_entries_are_isolated_from_other_scenarios() {
        let mut store = DebugStore::new();
        store.push(sample_entry(2025, ScenarioMode::Baseline));
        store.push(sample_entry(2025, ScenarioMode::OrbitalBull));
        store.push(sample_entry(2026, ScenarioMode::Baseline));

        let baseline_years: Vec<i32> = store
            .scenario_entries(ScenarioMode::Baseline)
            .map(|e| e.year)
            .collect();
        assert_eq!(baseline_years, vec![2025, 2026]);
    }

    #[test]
    fn export_view_keys_are_year_underscore_scenario() {
        let mut store = DebugStore::new();
        store.push(sample_entry(2025, ScenarioMode::Baseline));
        let view = store.export_view();
        assert!(view.0.contains_key("2025_baseline"));
    }

    #[test]
    fn export_json_round_trips_through_serde() {
        let mut store = DebugStore::new();
        store.push(sample_entry(2025, ScenarioMode::Baseline));
        let json = store.export_json().expect("serialize");
        assert!(json.contains("2025_baseline"));
    }
}
