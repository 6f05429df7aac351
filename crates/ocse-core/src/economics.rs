//! Cumulative amortization of launch+replacement costs against cumulative
//! exported PFLOPs, one-time calibration of orbit unit cost to a
//! scenario-specific multiple of ground, learning-rate decay, blended
//! ground/orbit cost per compute, OPEX, latency, and carbon.

use ocse_types::debug_entry::sanity_clamp;
use ocse_types::{ComputeStrategy, OcseError, ScenarioParams};

use crate::tech_curves::year_index;

pub const MIN_GROUND_SHARE: f64 = 0.20;

const BASE_GROUND_UNIT_COST_USD_PER_PFLOP: f64 = 2_000_000.0;
const GROUND_KW_PER_PFLOP: f64 = 150.0;
const ELECTRICITY_USD_PER_KWH: f64 = 0.08;

const PER_SAT_OPEX_USD_PER_YEAR: f64 = 50_000.0;
const GROUND_STATION_FIXED_COST_USD_PER_YEAR: f64 = 2_000_000.0;
const INSURANCE_RATE: f64 = 0.02;

const GROUND_CARBON_INTENSITY_BASE_G_PER_KWH: f64 = 400.0;
const GROUND_CARBON_DECAY_PER_YEAR: f64 = 0.98;

const LATENCY_GROUND_MS: f64 = 80.0;
const LATENCY_ORBIT_BASE_MS: f64 = 15.0;

const PRE_PARITY_ANNUAL_GROWTH: f64 = 0.04;
const POST_PARITY_ANNUAL_GROWTH: f64 = 0.08;

const ORBIT_SHARE_SNAP_TO_ZERO_THRESHOLD: f64 = 1.0e-3;

const BASE_DEMAND_PFLOPS: f64 = 500.0;

/// Calibration state and cumulative totals carried across years of a single
/// scenario run. Simplest to store on the runner per spec section 9; this
/// type is exactly that persistence unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EconomicsState {
    pub cumulative_orbital_cost_usd: f64,
    pub cumulative_exported_pflops: f64,
    pub cumulative_orbital_carbon_kg: f64,
    pub cumulative_orbit_energy_twh: f64,
    pub orbit_cost_scale: f64,
    pub orbit_cost_scale_calibrated: bool,
    pub prior_orbit_unit_cost_usd_per_pflop: f64,
    pub prior_ground_unit_cost_usd_per_pflop: f64,
    pub prior_orbit_compute_share: f64,
}

impl Default for EconomicsState {
    fn default() -> Self {
        Self {
            cumulative_orbital_cost_usd: 0.0,
            cumulative_exported_pflops: 0.0,
            cumulative_orbital_carbon_kg: 0.0,
            cumulative_orbit_energy_twh: 0.0,
            orbit_cost_scale: 1.0,
            orbit_cost_scale_calibrated: false,
            prior_orbit_unit_cost_usd_per_pflop: f64::INFINITY,
            prior_ground_unit_cost_usd_per_pflop: BASE_GROUND_UNIT_COST_USD_PER_PFLOP,
            prior_orbit_compute_share: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct EconomicsInputs {
    pub year: i32,
    pub compute_strategy: ComputeStrategy,
    pub compute_exportable_pflops: f64,
    pub power_total_kw: f64,
    pub orbit_capex_this_year_usd: f64,
    pub congestion_cost_usd: f64,
    pub satellites_total: u32,
    pub launch_carbon_kg: f64,
    pub replacement_carbon_kg: f64,
}

#[derive(Debug, Clone, Copy)]
pub struct EconomicsResult {
    pub total_demand_pflops: f64,
    pub orbit_compute_share: f64,
    pub ground_compute_share: f64,
    pub parity_achieved: bool,

    pub ground_unit_cost_usd_per_pflop: f64,
    pub orbit_unit_cost_raw_usd_per_pflop: f64,
    pub orbit_unit_cost_usd_per_pflop: f64,
    pub orbit_unit_cost_display_usd_per_pflop: f64,

    pub ground_opex_usd: f64,
    pub orbit_opex_usd: f64,

    pub cost_per_compute_ground: f64,
    pub cost_per_compute_blended_raw: f64,
    pub cost_per_compute_blended_display: f64,

    pub latency_ground_ms: f64,
    pub latency_orbit_ms: f64,
    pub latency_blended_ms: f64,

    pub carbon_intensity_ground_g_per_kwh: f64,
    pub carbon_intensity_orbit_g_per_kwh: f64,
    pub carbon_intensity_blended_g_per_kwh: f64,
    pub carbon_intensity_blended_display_g_per_kwh: f64,
    pub carbon_crossover_triggered: bool,

    pub orbit_cost_scale: f64,
    pub orbit_cost_scale_calibrated: bool,

    pub calibration_pending: Option<OcseError>,
}

/// Total compute demand, PFLOPs, for `year`: `base * demandGrowthPerYear^yearIndex`
/// times the strategy's growth multiplier. A pure function of its inputs so
/// the constraint solver's backhaul sizing and the economics step agree on
/// the same demand figure without threading state between them.
#[must_use]
pub fn total_demand_pflops(year: i32, scenario: &ScenarioParams, strategy: ComputeStrategy) -> f64 {
    let idx = year_index(year, scenario);
    BASE_DEMAND_PFLOPS * scenario.demand_growth_per_year.powi(idx) * strategy.growth_multiplier()
}

#[must_use]
pub fn step_economics(
    state: &mut EconomicsState,
    scenario: &ScenarioParams,
    inputs: &EconomicsInputs,
) -> EconomicsResult {
    let idx = year_index(inputs.year, scenario);

    // --- Demand and orbit share ---
    let total_demand_pflops = total_demand_pflops(inputs.year, scenario, inputs.compute_strategy);

    let physical_share = if total_demand_pflops > 0.0 {
        (inputs.compute_exportable_pflops / total_demand_pflops).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let ramp_cap = ((1.0 - (-f64::from(idx) / 6.0).exp()) * scenario.ramp_cap_scenario_multiplier)
        .clamp(0.0, 0.95);

    let parity_achieved = state.prior_orbit_unit_cost_usd_per_pflop
        < 0.95 * state.prior_ground_unit_cost_usd_per_pflop;
    let (share_cap, annual_growth) = if parity_achieved {
        ((1.0 - MIN_GROUND_SHARE).min(ramp_cap), POST_PARITY_ANNUAL_GROWTH)
    } else {
        (scenario.pre_parity_cap, PRE_PARITY_ANNUAL_GROWTH)
    };

    let share_before_growth_cap = physical_share
        .min(ramp_cap)
        .min(share_cap)
        .min(1.0 - MIN_GROUND_SHARE);

    let growth_capped_share = if idx == 0 {
        share_before_growth_cap
    } else {
        share_before_growth_cap.min(state.prior_orbit_compute_share * (1.0 + annual_growth))
    };

    let mut orbit_compute_share = growth_capped_share.clamp(0.0, 1.0 - MIN_GROUND_SHARE);
    if orbit_compute_share < ORBIT_SHARE_SNAP_TO_ZERO_THRESHOLD {
        orbit_compute_share = 0.0;
    }
    let ground_compute_share = 1.0 - orbit_compute_share;

    // --- Ground unit cost ---
    let ground_unit_cost_usd_per_pflop =
        BASE_GROUND_UNIT_COST_USD_PER_PFLOP * (1.0 - scenario.ground_learning_rate).powi(idx);

    // --- Orbit unit cost, with one-time calibration ---
    state.cumulative_exported_pflops += inputs.compute_exportable_pflops;
    state.cumulative_orbital_cost_usd += inputs.orbit_capex_this_year_usd;

    let mut calibration_pending = None;
    if !state.orbit_cost_scale_calibrated {
        if inputs.compute_exportable_pflops > 0.0 && state.cumulative_exported_pflops > 0.0 {
            let raw_orbit_unit =
                state.cumulative_orbital_cost_usd / state.cumulative_exported_pflops;
            if raw_orbit_unit > 0.0 {
                state.orbit_cost_scale =
                    (ground_unit_cost_usd_per_pflop * scenario.orbit_initial_cost_multiple)
                        / raw_orbit_unit;
                state.orbit_cost_scale_calibrated = true;
            }
        } else {
            calibration_pending = Some(OcseError::CalibrationNotYetPossible { year: inputs.year });
        }
    }

    let orbit_unit_cost_raw_usd_per_pflop = if state.orbit_cost_scale_calibrated {
        let raw_orbit_unit = if state.cumulative_exported_pflops > 0.0 {
            state.cumulative_orbital_cost_usd / state.cumulative_exported_pflops
        } else {
            0.0
        };
        raw_orbit_unit
            * state.orbit_cost_scale
            * (1.0 - scenario.orbit_learning_rate).powi(idx)
    } else {
        ground_unit_cost_usd_per_pflop * scenario.orbit_initial_cost_multiple
    };
    let orbit_unit_cost_usd_per_pflop = orbit_unit_cost_raw_usd_per_pflop;
    let orbit_unit_cost_display_usd_per_pflop = sanity_clamp(orbit_unit_cost_usd_per_pflop);

    // --- OPEX ---
    let ground_capex_value =
        ground_compute_share * total_demand_pflops * ground_unit_cost_usd_per_pflop;
    let ground_opex_usd = 8760.0
        * ELECTRICITY_USD_PER_KWH
        * (ground_compute_share * total_demand_pflops * GROUND_KW_PER_PFLOP)
        + 0.10 * ground_capex_value;

    let orbit_opex_usd = f64::from(inputs.satellites_total) * PER_SAT_OPEX_USD_PER_YEAR
        + GROUND_STATION_FIXED_COST_USD_PER_YEAR
        + INSURANCE_RATE * inputs.orbit_capex_this_year_usd
        + inputs.congestion_cost_usd;
    state.cumulative_orbital_cost_usd += orbit_opex_usd;

    // --- Blended cost per compute ---
    let cost_per_compute_ground = ground_unit_cost_usd_per_pflop;
    let cost_per_compute_blended_raw = ground_compute_share * ground_unit_cost_usd_per_pflop
        + orbit_compute_share * orbit_unit_cost_usd_per_pflop;
    let cost_per_compute_blended_display = sanity_clamp(cost_per_compute_blended_raw);

    // --- Latency ---
    let latency_orbit_ms = (LATENCY_ORBIT_BASE_MS
        * (1.0 - 0.015 * f64::from(idx)).max(0.35))
    .max(1.0);
    let latency_blended_ms =
        ground_compute_share * LATENCY_GROUND_MS + orbit_compute_share * latency_orbit_ms;

    // --- Carbon ---
    state.cumulative_orbital_carbon_kg += inputs.launch_carbon_kg + inputs.replacement_carbon_kg;
    state.cumulative_orbit_energy_twh += inputs.power_total_kw * 8760.0 / 1.0e9;

    let carbon_intensity_ground_g_per_kwh =
        GROUND_CARBON_INTENSITY_BASE_G_PER_KWH * GROUND_CARBON_DECAY_PER_YEAR.powi(idx);
    let carbon_intensity_orbit_g_per_kwh = if state.cumulative_orbit_energy_twh > 0.0 {
        state.cumulative_orbital_carbon_kg / (state.cumulative_orbit_energy_twh * 1.0e6)
    } else {
        0.0
    };
    let carbon_intensity_blended_g_per_kwh = ground_compute_share
        * carbon_intensity_ground_g_per_kwh
        + orbit_compute_share * carbon_intensity_orbit_g_per_kwh;
    let carbon_intensity_blended_display_g_per_kwh =
        sanity_clamp(carbon_intensity_blended_g_per_kwh);

    let carbon_crossover_triggered = state.cumulative_orbit_energy_twh > 0.0
        && carbon_intensity_orbit_g_per_kwh > 0.0
        && carbon_intensity_orbit_g_per_kwh < carbon_intensity_ground_g_per_kwh;

    state.prior_orbit_unit_cost_usd_per_pflop = orbit_unit_cost_usd_per_pflop;
    state.prior_ground_unit_cost_usd_per_pflop = ground_unit_cost_usd_per_pflop;
    state.prior_orbit_compute_share = orbit_compute_share;

    EconomicsResult {
        total_demand_pflops,
        orbit_compute_share,
        ground_compute_share,
        parity_achieved,
        ground_unit_cost_usd_per_pflop,
        orbit_unit_cost_raw_usd_per_pflop,
        orbit_unit_cost_usd_per_pflop,
        orbit_unit_cost_display_usd_per_pflop,
        ground_opex_usd,
        orbit_opex_usd,
        cost_per_compute_ground,
        cost_per_compute_blended_raw,
        cost_per_compute_blended_display,
        latency_ground_ms: LATENCY_GROUND_MS,
        latency_orbit_ms,
        latency_blended_ms,
        carbon_intensity_ground_g_per_kwh,
        carbon_intensity_orbit_g_per_kwh,
        carbon_intensity_blended_g_per_kwh,
        carbon_intensity_blended_display_g_per_kwh,
        carbon_crossover_triggered,
        orbit_cost_scale: state.orbit_cost_scale,
        orbit_cost_scale_calibrated: state.orbit_cost_scale_calibrated,
        calibration_pending,
    }
}
