//! Shell utilization, conjunction rate, accumulated debris, collision
//! probability, and the congestion cost adder to OPEX.

use ocse_types::OrbitShell;

use crate::tech_curves::{calculate_shell_capacity, shell_altitude_km};

/// Areal spacing assumed between co-shell satellites, km. A tuneable
/// constant; no calibration source in the scenario model.
const SHELL_SPACING_KM: f64 = 25.0;

/// Debris decay fraction per year (older debris burns up / deorbits).
const DEBRIS_DECAY_RATE: f64 = 0.08;

/// Value of downtime avoided per conjunction-driven collision-avoidance
/// maneuver, USD/hour; a tuneable constant.
const DOWNTIME_VALUE_USD_PER_HOUR: f64 = 15_000.0;

#[derive(Debug, Clone, Copy, Default)]
pub struct ShellUtilization {
    pub low: f64,
    pub mid: f64,
    pub sso: f64,
}

#[derive(Debug, Clone, Copy)]
pub struct CongestionInputs {
    pub class_a_low: u32,
    pub class_a_mid: u32,
    pub class_a_sun_sync: u32,
    pub class_b: u32,
    pub failures_this_year: u32,
    pub prior_accumulated_debris: f64,
    pub launch_cost_per_kg: f64,
}

#[derive(Debug, Clone, Copy)]
pub struct CongestionResult {
    pub shell_utilization: ShellUtilization,
    pub dominant_shell_utilization: f64,
    pub conjunction_rate: f64,
    pub accumulated_debris: f64,
    pub collision_probability: f64,
    pub congestion_cost_usd: f64,
}

fn shell_utilization(occupancy: u32, shell: OrbitShell) -> f64 {
    let capacity = calculate_shell_capacity(shell_altitude_km(shell), SHELL_SPACING_KM);
    if capacity <= 0.0 {
        0.0
    } else {
        f64::from(occupancy) / capacity
    }
}

#[must_use]
pub fn assess_congestion(inputs: &CongestionInputs) -> CongestionResult {
    let low = shell_utilization(inputs.class_a_low, OrbitShell::LowLeo);
    let mid = shell_utilization(inputs.class_a_mid, OrbitShell::MidLeo);
    // Class B and sun-synchronous Class A share the sun-sync shell.
    let sso = shell_utilization(
        inputs.class_a_sun_sync + inputs.class_b,
        OrbitShell::SunSync,
    );
    let shell_utilization = ShellUtilization { low, mid, sso };

    let dominant_shell_utilization = low.max(mid).max(sso);

    // Conjunction rate grows quadratically in utilization.
    let conjunction_rate = dominant_shell_utilization * dominant_shell_utilization * 100.0;

    let accumulated_debris = inputs.prior_accumulated_debris * (1.0 - DEBRIS_DECAY_RATE)
        + f64::from(inputs.failures_this_year);

    let collision_probability =
        (accumulated_debris * dominant_shell_utilization / 1_000.0).clamp(0.0, 1.0);

    let congestion_cost_usd =
        conjunction_rate * DOWNTIME_VALUE_USD_PER_HOUR * (inputs.launch_cost_per_kg / 100.0).max(0.01);

    CongestionResult {
        shell_utilization,
        dominant_shell_utilization,
        conjunction_rate,
        accumulated_debris,
        collision_probability,
        congestion_cost_usd,
    }
}
