//! Folds the ten-stage kernel over a year range, owning the fleet/physics/
//! economics state that persists across years of one scenario run. This is
//! the reference runner described by the external interface: `(scenarioMode,
//! startYear, endYear, strategyByYear, overrides?) -> debug store`.

use std::collections::BTreeMap;

use ocse_types::{
    BusDesign, DebugEntry, FleetState, MassBreakdown, OcseError, OrbitShell, PhysicsOverrides,
    PhysicsState, RiskMode, SatelliteClass, ScenarioMode, ScenarioParams, YearDeploymentResult,
    YearPlan,
};

use crate::bus_designer::{
    self, BusDesignInputs, DEFAULT_LIFE_YEARS, DEFAULT_SHIELDING_THICKNESS_MM,
    DEFAULT_TFLOPS_PER_KG, DEFAULT_W_PER_TFLOP,
};
use crate::congestion::{self, CongestionInputs};
use crate::constraints::{self, ConstraintInputs};
use crate::debug_store::DebugStore;
use crate::economics::{self, EconomicsInputs, EconomicsState};
use crate::launch_gate::{self, LaunchRequest};
use crate::orbit_allocator::{self, ShellAllocation};
use crate::physics_step::{self, PhysicsStepInputs, PER_SATELLITE_THERMAL_MASS_J_PER_C};
use crate::tech_curves;
use crate::validate;

/// Assumed orbital lifetime for both classes before scheduled retirement,
/// matching the bus designer's `DEFAULT_LIFE_YEARS` input (no calibration
/// source given beyond the documented overheads).
const LIFETIME_A_YEARS: i32 = 7;
const LIFETIME_B_YEARS: i32 = 7;

/// Annual program budgets at the base year, scaled by the launch-cadence
/// table's growth so the gate occasionally binds in later years without ever
/// dominating a nominal run. Tuneable (no scenario-model figure given).
const ANNUAL_LAUNCH_MASS_BUDGET_KG_BASE: f64 = 500_000.0;
const ANNUAL_LAUNCH_COST_BUDGET_USD_BASE: f64 = 2_000_000_000.0;

/// Downlink bandwidth assumed per PFLOP of market demand, used to size the
/// constraint solver's backhaul utilization check. Tuneable.
const DEMAND_GBPS_PER_PFLOP: f64 = 200.0;

/// Cross-year monotonicity/conservation checks run every 5 simulated years.
const MONOTONIC_CHECK_INTERVAL_YEARS: i32 = 5;

/// Fleet/physics/economics state that persists across years of a single
/// scenario run. Treated as a value: clone it to branch a scenario, never
/// share a mutable reference across concurrent runners.
#[derive(Debug, Clone)]
pub struct RunnerState {
    pub fleet: FleetState,
    pub physics: PhysicsState,
    pub economics: EconomicsState,
    pub accumulated_debris: f64,
}

impl RunnerState {
    #[must_use]
    pub fn initial(risk_mode: RiskMode) -> Self {
        Self {
            fleet: FleetState::default(),
            physics: PhysicsState::initial(risk_mode),
            economics: EconomicsState::default(),
            accumulated_debris: 0.0,
        }
    }
}

/// Result of folding the kernel over one or more years.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub store: DebugStore,
    /// Non-fatal config issues encountered along the way (e.g. a year with no
    /// entry in `strategyByYear`, substituted with BALANCED/medium/1.0).
    pub warnings: Vec<OcseError>,
    pub final_state: RunnerState,
}

fn apply_permanent_loss(fleet: &mut FleetState, permanent_loss: u32) {
    if permanent_loss == 0 {
        return;
    }
    let total = fleet.satellites_total();
    if total == 0 {
        return;
    }
    let low =
        (f64::from(permanent_loss) * f64::from(fleet.class_a_low) / f64::from(total)).round() as u32;
    let mid =
        (f64::from(permanent_loss) * f64::from(fleet.class_a_mid) / f64::from(total)).round() as u32;
    let sso = (f64::from(permanent_loss) * f64::from(fleet.class_a_sun_sync) / f64::from(total))
        .round() as u32;
    let b = permanent_loss.saturating_sub(low).saturating_sub(mid).saturating_sub(sso);
    fleet.class_a_low = fleet.class_a_low.saturating_sub(low);
    fleet.class_a_mid = fleet.class_a_mid.saturating_sub(mid);
    fleet.class_a_sun_sync = fleet.class_a_sun_sync.saturating_sub(sso);
    fleet.class_b = fleet.class_b.saturating_sub(b);
}

/// Mass-weighted representative bus and its component breakdown across the
/// alive population of both classes. A single `DebugEntry` reports one
/// `bus_total_mass_kg`, so invariant 5's sum check holds by construction:
/// the blend is a linear combination of two already-consistent designs.
fn blend_bus_mass(
    alive_a: u32,
    bus_a: &BusDesign,
    alive_b: u32,
    bus_b: Option<&BusDesign>,
) -> (f64, MassBreakdown) {
    let total_alive = alive_a + alive_b;
    if total_alive == 0 {
        return (bus_a.total_mass_kg, bus_a.mass);
    }
    let wa = f64::from(alive_a) / f64::from(total_alive);
    let wb = f64::from(alive_b) / f64::from(total_alive);
    let mass_b = bus_b.map_or_else(MassBreakdown::default, |b| b.mass);
    let mass = MassBreakdown {
        silicon_kg: wa * bus_a.mass.silicon_kg + wb * mass_b.silicon_kg,
        radiator_kg: wa * bus_a.mass.radiator_kg + wb * mass_b.radiator_kg,
        solar_array_kg: wa * bus_a.mass.solar_array_kg + wb * mass_b.solar_array_kg,
        shielding_kg: wa * bus_a.mass.shielding_kg + wb * mass_b.shielding_kg,
        power_electronics_kg: wa * bus_a.mass.power_electronics_kg + wb * mass_b.power_electronics_kg,
        avionics_kg: wa * bus_a.mass.avionics_kg + wb * mass_b.avionics_kg,
        adcs_kg: wa * bus_a.mass.adcs_kg + wb * mass_b.adcs_kg,
        battery_kg: wa * bus_a.mass.battery_kg + wb * mass_b.battery_kg,
        propulsion_kg: wa * bus_a.mass.propulsion_kg + wb * mass_b.propulsion_kg,
        structure_kg: wa * bus_a.mass.structure_kg + wb * mass_b.structure_kg,
        other_kg: wa * bus_a.mass.other_kg + wb * mass_b.other_kg,
    };
    (mass.total_kg(), mass)
}

/// Run the full ten-stage pipeline for one year, mutating `state` in place
/// and returning the canonical record plus the tick's external-facing
/// summary.
#[must_use]
pub fn step_year(
    state: &mut RunnerState,
    scenario: &ScenarioParams,
    year: i32,
    plan: &YearPlan,
    overrides: &PhysicsOverrides,
) -> (DebugEntry, YearDeploymentResult) {
    let mut working_scenario = scenario.clone();
    if let Some(doubling_years) = overrides.moores_law_doubling_years {
        if doubling_years > 0.0 {
            working_scenario.tech_growth_per_year = 2f64.powf(1.0 / doubling_years);
        }
    }
    let scenario = &working_scenario;

    let class_b_available = year >= scenario.class_b_available_from;

    // --- Stage 1+2: tech curves feed the bus designer. ---
    let target_tflops_a =
        tech_curves::compute_per_satellite_tflops(year, scenario, SatelliteClass::A).unwrap_or(0.0);
    let inputs_a = BusDesignInputs {
        year,
        target_tflops: target_tflops_a,
        tflops_per_kg: DEFAULT_TFLOPS_PER_KG,
        w_per_tflop: DEFAULT_W_PER_TFLOP,
        shielding_thickness_mm: DEFAULT_SHIELDING_THICKNESS_MM,
        life_years: DEFAULT_LIFE_YEARS,
        class: SatelliteClass::A,
        shell: OrbitShell::LowLeo,
        failure_rate_base: scenario.failure_rate_base,
    }
    .with_overrides(overrides);
    let bus_a = bus_designer::design_bus(&inputs_a, scenario, overrides);

    let bus_b = class_b_available.then(|| {
        let target_tflops_b =
            tech_curves::compute_per_satellite_tflops(year, scenario, SatelliteClass::B)
                .unwrap_or(0.0);
        let inputs_b = BusDesignInputs {
            year,
            target_tflops: target_tflops_b,
            tflops_per_kg: DEFAULT_TFLOPS_PER_KG,
            w_per_tflop: DEFAULT_W_PER_TFLOP,
            shielding_thickness_mm: DEFAULT_SHIELDING_THICKNESS_MM,
            life_years: DEFAULT_LIFE_YEARS,
            class: SatelliteClass::B,
            shell: OrbitShell::SunSync,
            failure_rate_base: scenario.failure_rate_base,
        }
        .with_overrides(overrides);
        bus_designer::design_bus(&inputs_b, scenario, overrides)
    });

    // --- Stage 3: launch gate. ---
    let launch_cost_per_kg_value = tech_curves::launch_cost_per_kg(
        year,
        scenario,
        overrides.launch_cost_per_kg,
        overrides.launch_cost_improvement_rate,
    );

    let cadence = tech_curves::launch_cadence(year, scenario)
        * plan.launch_strategy.cadence_fraction()
        * plan.deployment_intensity;
    let b_share = tech_curves::class_b_share(plan.compute_strategy, year, scenario);
    let new_b_target = if class_b_available { cadence * b_share } else { 0.0 };
    let new_a_target = cadence - new_b_target;

    let avg_sat_mass_kg = if cadence > 0.0 {
        let wa = new_a_target / cadence;
        let wb = new_b_target / cadence;
        wa * bus_a.total_mass_kg + wb * bus_b.as_ref().map_or(0.0, |b| b.total_mass_kg)
    } else {
        bus_a.total_mass_kg
    };
    let avg_sat_cost_usd = avg_sat_mass_kg * launch_cost_per_kg_value;

    let cadence_base_year = tech_curves::launch_cadence(scenario.base_year, scenario).max(1.0);
    let cadence_ratio = tech_curves::launch_cadence(year, scenario) / cadence_base_year;
    let mass_budget_kg = ANNUAL_LAUNCH_MASS_BUDGET_KG_BASE * cadence_ratio;
    let cost_budget_usd =
        ANNUAL_LAUNCH_COST_BUDGET_USD_BASE * cadence_ratio * plan.compute_strategy.growth_multiplier();

    let admitted = launch_gate::admit_launches(
        &LaunchRequest {
            new_a_target,
            new_b_target,
            avg_sat_mass_kg,
            avg_sat_cost_usd,
        },
        mass_budget_kg,
        cost_budget_usd,
    );

    // --- Stage 4+5: orbit allocator, deployment and retirement ledgers. ---
    let shells: ShellAllocation = orbit_allocator::allocate_class_a(admitted.new_a, plan.compute_strategy);
    state.fleet.record_deployment_a(year, shells.low, shells.mid, shells.sun_sync);
    if class_b_available {
        state.fleet.record_deployment_b(year, admitted.new_b);
    }

    let retirements =
        orbit_allocator::compute_retirements(&state.fleet, year, LIFETIME_A_YEARS, LIFETIME_B_YEARS);
    orbit_allocator::apply_retirements(&mut state.fleet, &retirements);

    // --- Stage 6: constraint solver. ---
    let demand_pflops = economics::total_demand_pflops(year, scenario, plan.compute_strategy);
    let compute_demand_gbps = demand_pflops * DEMAND_GBPS_PER_PFLOP;

    let constraint_result = constraints::solve_constraints(&ConstraintInputs {
        fleet: &state.fleet,
        class_a_bus: &bus_a,
        class_b_bus: bus_b.as_ref(),
        year,
        scenario,
        compute_strategy: plan.compute_strategy,
        compute_demand_gbps,
        prior_survival_fraction: state.physics.survival_fraction,
        risk_mode: state.physics.risk_mode,
    });

    state.fleet.record_failure(year, constraint_result.maintenance.failures_this_year);
    apply_permanent_loss(&mut state.fleet, constraint_result.maintenance.permanent_loss);

    // --- Stage 7: physics step. ---
    let fleet_size_raw = state.fleet.satellites_total();
    let power_total_kw = f64::from(state.fleet.class_a_total()) * bus_a.bus_power_kw
        + bus_b.as_ref().map_or(0.0, |b| f64::from(state.fleet.class_b) * b.bus_power_kw);
    let fleet_compute_derated_tflops = f64::from(state.fleet.class_a_total())
        * bus_a.compute_derated_tflops
        + bus_b
            .as_ref()
            .map_or(0.0, |b| f64::from(state.fleet.class_b) * b.compute_derated_tflops);
    let radiator_area_m2 = f64::from(state.fleet.class_a_total()) * bus_a.radiator_area_m2
        + bus_b.as_ref().map_or(0.0, |b| f64::from(state.fleet.class_b) * b.radiator_area_m2);
    let thermal_mass_j_per_c = f64::from(fleet_size_raw) * PER_SATELLITE_THERMAL_MASS_J_PER_C;

    let physics_result = physics_step::step_physics(
        &state.physics,
        &PhysicsStepInputs {
            power_total_kw,
            fleet_compute_derated_tflops,
            radiator_area_m2,
            thermal_mass_j_per_c,
            survival_fraction: constraint_result.survival_fraction,
            backhaul_capacity_factor: constraint_result.relay_capacity_factor,
            eclipse_fraction: state.physics.eclipse_fraction,
            shadowing_loss: state.physics.shadowing_loss,
        },
        state.physics.risk_mode,
    );

    // --- Stage 8: congestion & debris. ---
    let congestion_result = congestion::assess_congestion(&CongestionInputs {
        class_a_low: state.fleet.class_a_low,
        class_a_mid: state.fleet.class_a_mid,
        class_a_sun_sync: state.fleet.class_a_sun_sync,
        class_b: state.fleet.class_b,
        failures_this_year: constraint_result.maintenance.failures_this_year,
        prior_accumulated_debris: state.accumulated_debris,
        launch_cost_per_kg: launch_cost_per_kg_value,
    });
    state.accumulated_debris = congestion_result.accumulated_debris;

    // --- Stage 9: economics. ---
    let launch_carbon_kg =
        f64::from(admitted.new_a + admitted.new_b) * avg_sat_mass_kg * scenario.launch_carbon_per_kg;
    let replacement_carbon_kg = f64::from(retirements.class_a + retirements.class_b)
        * avg_sat_mass_kg
        * scenario.launch_carbon_per_kg;
    let orbit_capex_this_year_usd = f64::from(admitted.new_a + admitted.new_b) * avg_sat_cost_usd;

    let economics_result = economics::step_economics(
        &mut state.economics,
        scenario,
        &EconomicsInputs {
            year,
            compute_strategy: plan.compute_strategy,
            compute_exportable_pflops: physics_result.compute_exportable_flops / 1.0e15,
            power_total_kw,
            orbit_capex_this_year_usd,
            congestion_cost_usd: congestion_result.congestion_cost_usd,
            satellites_total: fleet_size_raw,
            launch_carbon_kg,
            replacement_carbon_kg,
        },
    );

    // --- Stage 10: assemble the canonical debug entry. ---
    let survival_fraction = physics_result.state.survival_fraction;
    let class_a_alive = (f64::from(state.fleet.class_a_total()) * survival_fraction).round() as u32;
    let class_b_alive = (f64::from(state.fleet.class_b) * survival_fraction).round() as u32;
    let satellites_total = class_a_alive + class_b_alive;

    let (bus_total_mass_kg, mass) = blend_bus_mass(class_a_alive, &bus_a, class_b_alive, bus_b.as_ref());
    let fleet_total_mass_kg = f64::from(satellites_total) * bus_total_mass_kg;

    let temp_radiator_c = physics_result.state.temp_core_c - 15.0;

    let numeric_overflow_flag = economics_result.orbit_unit_cost_usd_per_pflop.abs()
        > ocse_types::debug_entry::SANITY_CLAMP_MAX_ABS
        || economics_result.cost_per_compute_blended_raw.abs()
            > ocse_types::debug_entry::SANITY_CLAMP_MAX_ABS
        || economics_result.carbon_intensity_blended_g_per_kwh.abs()
            > ocse_types::debug_entry::SANITY_CLAMP_MAX_ABS;

    let entry = DebugEntry {
        year,
        scenario_mode: scenario.mode,

        satellites_total,
        class_a_satellites_alive: class_a_alive,
        class_b_satellites_alive: class_b_alive,
        class_a_low: state.fleet.class_a_low,
        class_a_mid: state.fleet.class_a_mid,
        class_a_sun_sync: state.fleet.class_a_sun_sync,
        new_launches_total: admitted.new_a + admitted.new_b,
        retirements_total: retirements.class_a + retirements.class_b,
        cumulative_launches: state.fleet.cumulative_launches,
        cumulative_failures: state.fleet.cumulative_failures,

        power_total_kw,
        power_per_sat_kw: if fleet_size_raw > 0 {
            power_total_kw / f64::from(fleet_size_raw)
        } else {
            0.0
        },
        power_utilization_percent: (survival_fraction * 100.0).min(100.0),

        compute_raw_flops: physics_result.compute_raw_flops,
        compute_sustained_flops: physics_result.sustained_compute_flops,
        compute_exportable_flops: physics_result.compute_exportable_flops,
        compute_effective_flops: physics_result.compute_exportable_flops,
        compute_demand_flops: demand_pflops * 1.0e15,

        bus_total_mass_kg,
        fleet_total_mass_kg,
        mass_silicon_kg: mass.silicon_kg,
        mass_radiator_kg: mass.radiator_kg,
        mass_solar_array_kg: mass.solar_array_kg,
        mass_shielding_kg: mass.shielding_kg,
        mass_power_electronics_kg: mass.power_electronics_kg,
        mass_avionics_kg: mass.avionics_kg,
        mass_adcs_kg: mass.adcs_kg,
        mass_battery_kg: mass.battery_kg,
        mass_propulsion_kg: mass.propulsion_kg,
        mass_structure_kg: mass.structure_kg,
        mass_other_kg: mass.other_kg,

        temp_core_c: physics_result.state.temp_core_c,
        temp_radiator_c,
        emissivity: physics_result.state.emissivity,
        radiator_area_m2: physics_result.state.radiator_area_m2,
        heat_utilization: constraint_result.heat_utilization.min(1.0),

        backhaul_capacity_tbps: f64::from(fleet_size_raw) * scenario.backhaul_per_sat_tbps,
        backhaul_utilization: constraint_result.backhaul_utilization,

        failures_this_year: constraint_result.maintenance.failures_this_year,
        recoverable_failures: constraint_result.maintenance.recoverable,
        permanent_loss: constraint_result.maintenance.permanent_loss,
        repair_capacity_pods: constraint_result.maintenance.repair_capacity_pods,
        maintenance_utilization: constraint_result.maintenance.utilization,
        autonomy_level: constraint_result.autonomy_level,

        survival_fraction,

        ground_unit_cost_usd_per_pflop: economics_result.ground_unit_cost_usd_per_pflop,
        ground_compute_share: economics_result.ground_compute_share,
        ground_opex_usd: economics_result.ground_opex_usd,

        orbit_unit_cost_usd_per_pflop: economics_result.orbit_unit_cost_usd_per_pflop,
        orbit_unit_cost_raw_usd_per_pflop: economics_result.orbit_unit_cost_raw_usd_per_pflop,
        orbit_compute_share: economics_result.orbit_compute_share,
        orbit_opex_usd: economics_result.orbit_opex_usd,
        cumulative_orbital_cost_usd: state.economics.cumulative_orbital_cost_usd,
        cumulative_exported_pflops: state.economics.cumulative_exported_pflops,

        cost_per_compute_ground: economics_result.cost_per_compute_ground,
        cost_per_compute_blended: economics_result.cost_per_compute_blended_display,
        cost_per_compute_blended_raw: economics_result.cost_per_compute_blended_raw,
        latency_ground_ms: economics_result.latency_ground_ms,
        latency_orbit_ms: economics_result.latency_orbit_ms,
        latency_blended_ms: economics_result.latency_blended_ms,

        launch_carbon_kg,
        replacement_carbon_kg,
        cumulative_orbital_carbon_kg: state.economics.cumulative_orbital_carbon_kg,
        cumulative_orbit_energy_twh: state.economics.cumulative_orbit_energy_twh,
        carbon_intensity_ground_g_per_kwh: economics_result.carbon_intensity_ground_g_per_kwh,
        carbon_intensity_orbit_g_per_kwh: economics_result.carbon_intensity_orbit_g_per_kwh,
        carbon_intensity_blended_g_per_kwh: economics_result.carbon_intensity_blended_g_per_kwh,

        shell_utilization_low: congestion_result.shell_utilization.low,
        shell_utilization_mid: congestion_result.shell_utilization.mid,
        shell_utilization_sso: congestion_result.shell_utilization.sso,
        conjunction_rate: congestion_result.conjunction_rate,
        accumulated_debris: congestion_result.accumulated_debris,
        collision_probability: congestion_result.collision_probability,
        congestion_cost_usd: congestion_result.congestion_cost_usd,

        battery_density_wh_per_kg: overrides
            .battery_density
            .unwrap_or_else(|| tech_curves::battery_density_wh_per_kg(year, scenario)),
        battery_cost_usd_per_kwh: overrides
            .battery_cost
            .unwrap_or_else(|| tech_curves::battery_cost_usd_per_kwh(year, scenario)),

        cost_per_compute_blended_display: economics_result.cost_per_compute_blended_display,
        carbon_intensity_blended_display_g_per_kwh: economics_result
            .carbon_intensity_blended_display_g_per_kwh,
        orbit_unit_cost_display_usd_per_pflop: economics_result.orbit_unit_cost_display_usd_per_pflop,

        diagnostics: ocse_types::debug_entry::ScenarioDiagnostics {
            orbit_cost_scale: economics_result.orbit_cost_scale,
            orbit_cost_scale_calibrated: economics_result.orbit_cost_scale_calibrated,
            parity_achieved: economics_result.parity_achieved,
            carbon_crossover_triggered: economics_result.carbon_crossover_triggered,
            numeric_overflow_flag,
            dominant_constraint: constraint_result.dominant_constraint,
            risk_mode: state.physics.risk_mode,
            thermal_regime: physics_result.state.thermal_regime,
        },
    };

    let tick_result = YearDeploymentResult {
        year,
        new_class_a_low: shells.low,
        new_class_a_mid: shells.mid,
        new_class_a_sun_sync: shells.sun_sync,
        new_class_b: admitted.new_b,
        retired_class_a: retirements.class_a,
        retired_class_b: retirements.class_b,
        class_a_bus: bus_a,
        class_b_bus: bus_b,
        dominant_constraint: constraint_result.dominant_constraint,
        compute_exportable_flops: physics_result.compute_exportable_flops,
        physics: physics_result.state,
    };

    state.physics = physics_result.state;

    (entry, tick_result)
}

/// Fold the kernel over `[start_year, end_year]` starting from `state`,
/// mutating it in place. Splitting a range across two calls that share
/// `state` is equivalent to running the whole range in one call.
///
/// # Errors
/// Returns [`OcseError::InvalidYearRange`] if `end_year < start_year`, or the
/// first [`OcseError::InvariantViolation`] raised by a tick; the store
/// returned alongside a propagated error is not exposed (the caller gets the
/// valid prefix only through a successful `Ok`).
pub fn run_from(
    state: &mut RunnerState,
    scenario: &ScenarioParams,
    start_year: i32,
    end_year: i32,
    strategy_by_year: &BTreeMap<i32, YearPlan>,
    overrides: &PhysicsOverrides,
) -> Result<RunOutcome, OcseError> {
    if end_year < start_year {
        return Err(OcseError::InvalidYearRange { start_year, end_year });
    }

    let mut store = DebugStore::new();
    let mut warnings = Vec::new();
    let mut scenario_history: Vec<DebugEntry> = Vec::new();

    for year in start_year..=end_year {
        let plan = strategy_by_year.get(&year).copied().unwrap_or_else(|| {
            warnings.push(OcseError::MissingYearPlan { year });
            YearPlan::default()
        });

        let (entry, _tick) = step_year(state, scenario, year, &plan, overrides);
        validate::validate_entry(&entry, scenario)?;

        if entry.diagnostics.numeric_overflow_flag {
            warnings.push(OcseError::NumericOverflow {
                year: entry.year,
                scenario: entry.scenario_mode,
                detail: "a raw economics metric exceeded the sanity clamp; display value clamped"
                    .to_string(),
            });
        }

        scenario_history.push(entry.clone());
        store.push(entry);

        if (year - start_year) % MONOTONIC_CHECK_INTERVAL_YEARS == 0 {
            validate::validate_monotonic_series(&scenario_history)?;
        }

        tracing::debug!(year, scenario = %scenario.mode, "year step complete");
    }

    Ok(RunOutcome {
        store,
        warnings,
        final_state: state.clone(),
    })
}

/// Build a fresh run from the base year: the reference runner entry point.
///
/// # Errors
/// See [`run_from`].
pub fn run(
    scenario_mode: ScenarioMode,
    start_year: i32,
    end_year: i32,
    strategy_by_year: &BTreeMap<i32, YearPlan>,
    overrides: Option<&PhysicsOverrides>,
) -> Result<RunOutcome, OcseError> {
    let scenario = ScenarioParams::for_mode(scenario_mode, start_year);
    let default_overrides = PhysicsOverrides::default();
    let overrides = overrides.unwrap_or(&default_overrides);
    let mut state = RunnerState::initial(RiskMode::Safe);
    tracing::info!(?scenario_mode, start_year, end_year, "starting run");
    run_from(&mut state, &scenario, start_year, end_year, strategy_by_year, overrides)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ocse_types::{ComputeStrategy, LaunchStrategy};

    fn plan_map(plan: YearPlan, years: std::ops::RangeInclusive<i32>) -> BTreeMap<i32, YearPlan> {
        years.map(|y| (y, plan)).collect()
    }

    #[test]
    fn single_year_baseline_run_produces_nonzero_fleet() {
        let plans = plan_map(YearPlan::default(), 2025..=2025);
        let outcome = run(ScenarioMode::Baseline, 2025, 2025, &plans, None).expect("run succeeds");
        let entry = outcome.store.get(ScenarioMode::Baseline, 2025).expect("entry present");
        assert!(entry.satellites_total > 0);
        assert!(entry.orbit_compute_share <= 0.25 + 1e-6);
        assert!(entry.survival_fraction >= 0.95 - 1e-9);
    }

    #[test]
    fn invalid_year_range_is_rejected() {
        let plans = BTreeMap::new();
        let err = run(ScenarioMode::Baseline, 2030, 2025, &plans, None).unwrap_err();
        assert!(matches!(err, OcseError::InvalidYearRange { .. }));
    }

    #[test]
    fn missing_year_plan_substitutes_balanced_medium() {
        let plans = BTreeMap::new();
        let outcome = run(ScenarioMode::Baseline, 2025, 2025, &plans, None).expect("run succeeds");
        assert_eq!(outcome.warnings.len(), 1);
        assert!(matches!(outcome.warnings[0], OcseError::MissingYearPlan { year: 2025 }));
    }

    #[test]
    fn splitting_a_range_matches_running_it_whole() {
        let plan = YearPlan::new(ComputeStrategy::Balanced, LaunchStrategy::Medium, 1.0);
        let plans = plan_map(plan, 2025..=2030);

        let whole = run(ScenarioMode::Baseline, 2025, 2030, &plans, None).expect("whole run");

        let scenario = ScenarioParams::baseline(2025);
        let mut state = RunnerState::initial(RiskMode::Safe);
        let first =
            run_from(&mut state, &scenario, 2025, 2027, &plans, &PhysicsOverrides::default())
                .expect("first half");
        let second =
            run_from(&mut state, &scenario, 2028, 2030, &plans, &PhysicsOverrides::default())
                .expect("second half");

        let whole_2030 = whole.store.get(ScenarioMode::Baseline, 2030).unwrap();
        let split_2030 = second.store.get(ScenarioMode::Baseline, 2030).unwrap();
        assert_eq!(whole_2030, split_2030);
        assert!(first.store.get(ScenarioMode::Baseline, 2025).is_some());
    }

    #[test]
    fn bus_power_override_is_exact_per_satellite() {
        let plan = YearPlan::default();
        let plans = plan_map(plan, 2025..=2025);
        let overrides = PhysicsOverrides {
            bus_power_kw: Some(500.0),
            ..Default::default()
        };
        let outcome =
            run(ScenarioMode::Baseline, 2025, 2025, &plans, Some(&overrides)).expect("run succeeds");
        let entry = outcome.store.get(ScenarioMode::Baseline, 2025).unwrap();
        assert!((entry.power_per_sat_kw - 500.0).abs() < 1.0);
    }
}
