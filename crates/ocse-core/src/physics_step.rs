//! Thermal accounting for one simulated year (8760 h): Stefan-Boltzmann
//! radiator reject, core-temperature integration, eclipse/shadowing losses,
//! and the raw/sustained/exportable compute cascade. Re-evaluated every
//! year; carries no memory beyond `emissivity` and `temp_core_c`.

use ocse_types::{PhysicsState, RiskMode, ThermalRegime};

const STEFAN_BOLTZMANN: f64 = 5.670_374_4e-8; // W / (m^2 K^4)
const SINK_TEMP_K: f64 = 200.0;
const SECONDS_PER_YEAR: f64 = 8760.0 * 3600.0;

/// Fraction of total bus power (not just compute silicon) that shows up as
/// fleet-level waste heat in the annual thermal integration. Deliberately
/// distinct from the bus designer's 85% compute-heat fraction: this applies
/// to the whole power budget, most of which (radiator pumps, ADCS, avionics)
/// is not compute silicon.
const ELECTRICAL_EFFICIENCY: f64 = 0.85;

const EMISSIVITY_DEGRADE_FACTOR: f64 = 0.995;

const SOFT_CAP_C: f64 = 90.0;
const HARD_CAP_C: f64 = 450.0;
const HEAT_CEILING_C: f64 = SOFT_CAP_C;

/// Per-satellite contribution to aggregate thermal mass, J/°C. A tuneable
/// constant (spec section 9, Open Questions: no calibration source given).
pub const PER_SATELLITE_THERMAL_MASS_J_PER_C: f64 = 5.0e6;

/// Battery buffering during eclipse recovers some but not all generation
/// loss; tuneable constant.
const ECLIPSE_PENALTY: f64 = 0.65;

#[derive(Debug, Clone, Copy)]
pub struct PhysicsStepInputs {
    pub power_total_kw: f64,
    pub fleet_compute_derated_tflops: f64,
    pub radiator_area_m2: f64,
    pub thermal_mass_j_per_c: f64,
    pub survival_fraction: f64,
    pub backhaul_capacity_factor: f64,
    pub eclipse_fraction: f64,
    pub shadowing_loss: f64,
}

#[derive(Debug, Clone, Copy)]
pub struct PhysicsStepResult {
    pub state: PhysicsState,
    pub heat_gen_kw: f64,
    pub heat_reject_kw: f64,
    pub compute_raw_flops: f64,
    pub sustained_compute_flops: f64,
    pub compute_exportable_flops: f64,
}

#[must_use]
pub fn step_physics(
    prior: &PhysicsState,
    inputs: &PhysicsStepInputs,
    risk_mode: RiskMode,
) -> PhysicsStepResult {
    // 1. Heat generated.
    let heat_gen_kw = inputs.power_total_kw * (1.0 - ELECTRICAL_EFFICIENCY);

    // 2. Heat rejected via Stefan-Boltzmann radiator.
    let radiator_area_m2 = if inputs.radiator_area_m2 > 0.0 {
        inputs.radiator_area_m2
    } else {
        prior.radiator_area_m2
    };
    let core_temp_k = prior.temp_core_c + 273.15;
    let heat_reject_w = prior.emissivity
        * STEFAN_BOLTZMANN
        * radiator_area_m2
        * (core_temp_k.powi(4) - SINK_TEMP_K.powi(4)).max(0.0);
    let heat_reject_kw = heat_reject_w / 1000.0;

    // 3. Integrate core temperature over the year.
    let net_heat_kw = heat_gen_kw - heat_reject_kw;
    let thermal_mass = inputs.thermal_mass_j_per_c.max(1.0);
    let delta_t_c = (net_heat_kw * 1000.0 * SECONDS_PER_YEAR) / thermal_mass;
    let mut temp_core_c = prior.temp_core_c + delta_t_c;

    // 4. Sustained radiator overload degrades emissivity.
    let radiator_utilization = if heat_reject_kw > 0.0 {
        heat_gen_kw / heat_reject_kw
    } else if heat_gen_kw > 0.0 {
        f64::INFINITY
    } else {
        0.0
    };
    let mut emissivity = prior.emissivity;
    if radiator_utilization > 1.0 {
        emissivity *= EMISSIVITY_DEGRADE_FACTOR;
    }
    emissivity = emissivity.clamp(0.05, 1.0);

    // 5. Critical-temperature survival collapse and soft-cap cooling.
    let mut survival_fraction = inputs.survival_fraction;
    if temp_core_c > HARD_CAP_C {
        let floor = match risk_mode {
            RiskMode::Safe => 0.0, // the solver's SAFE floor already applied upstream
            RiskMode::Aggressive => 0.10,
            RiskMode::Yolo => 0.0,
        };
        survival_fraction = (survival_fraction * 0.5).max(floor);
    }

    // 9. Forced cooling if survival has collapsed and core is still hot.
    if survival_fraction < 0.2 && temp_core_c > SOFT_CAP_C {
        temp_core_c -= 0.10 * (temp_core_c - SOFT_CAP_C);
    }

    let thermal_regime = if radiator_utilization <= 1.0 && temp_core_c <= SOFT_CAP_C {
        ThermalRegime::Nominal
    } else if temp_core_c > HARD_CAP_C {
        ThermalRegime::Critical
    } else {
        ThermalRegime::Overload
    };

    // 6. Raw compute: fleet-derated compute x survival.
    let fleet_compute_flops = inputs.fleet_compute_derated_tflops * 1.0e12;
    let compute_raw_flops = fleet_compute_flops * survival_fraction;

    // 7. Sustained compute after thermal derating.
    let thermal_derate = if temp_core_c <= HEAT_CEILING_C {
        1.0
    } else {
        (1.0 - (temp_core_c - HEAT_CEILING_C) / 40.0).max(0.3)
    };
    let sustained_compute_flops = compute_raw_flops * thermal_derate;

    // 8. Exportable compute after backhaul and eclipse losses.
    let eclipse_loss = inputs.eclipse_fraction * ECLIPSE_PENALTY;
    let compute_exportable_flops = sustained_compute_flops
        * inputs.backhaul_capacity_factor
        * (1.0 - eclipse_loss).max(0.0)
        * (1.0 - inputs.shadowing_loss).max(0.0);

    let state = PhysicsState {
        temp_core_c,
        emissivity,
        radiator_area_m2,
        power_total_kw: inputs.power_total_kw,
        compute_raw_flops,
        backhaul_capacity_tbps: prior.backhaul_capacity_tbps,
        maintenance_capacity_pods: prior.maintenance_capacity_pods,
        survival_fraction,
        eclipse_fraction: inputs.eclipse_fraction,
        shadowing_loss: inputs.shadowing_loss,
        thermal_mass_j_per_c: thermal_mass,
        risk_mode,
        thermal_regime,
    };

    PhysicsStepResult {
        state,
        heat_gen_kw,
        heat_reject_kw,
        compute_raw_flops,
        sustained_compute_flops,
        compute_exportable_flops,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prior_state() -> PhysicsState {
        PhysicsState::initial(RiskMode::Safe)
    }

    fn sample_inputs() -> PhysicsStepInputs {
        PhysicsStepInputs {
            power_total_kw: 10_000.0,
            fleet_compute_derated_tflops: 50_000.0,
            radiator_area_m2: 1_000.0,
            thermal_mass_j_per_c: 100.0 * PER_SATELLITE_THERMAL_MASS_J_PER_C,
            survival_fraction: 0.97,
            backhaul_capacity_factor: 1.0,
            eclipse_fraction: 0.35,
            shadowing_loss: 0.02,
        }
    }

    #[test]
    fn compute_cascade_is_non_increasing() {
        let result = step_physics(&prior_state(), &sample_inputs(), RiskMode::Safe);
        assert!(result.sustained_compute_flops <= result.compute_raw_flops);
        assert!(result.compute_exportable_flops <= result.sustained_compute_flops);
    }

    #[test]
    fn well_sized_radiator_keeps_core_near_sink_temperature() {
        // Radiator oversized relative to heat generated: core temp should
        // settle, not run away.
        let inputs = PhysicsStepInputs {
            radiator_area_m2: 50_000.0,
            ..sample_inputs()
        };
        let result = step_physics(&prior_state(), &inputs, RiskMode::Safe);
        assert!(result.state.temp_core_c < 200.0);
    }

    #[test]
    fn undersized_radiator_drives_overload_regime() {
        let inputs = PhysicsStepInputs {
            radiator_area_m2: 1.0,
            ..sample_inputs()
        };
        let result = step_physics(&prior_state(), &inputs, RiskMode::Safe);
        assert_ne!(result.state.thermal_regime, ThermalRegime::Nominal);
    }
}
