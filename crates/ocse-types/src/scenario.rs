use serde::{Deserialize, Serialize};

/// Exogenous parameter bundle selected for a run.
///
/// Mirrors the three scenario modes the kernel is driven by: a conservative
/// baseline and two bull/bear variants that shift learning rates, launch
/// economics, and failure behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioMode {
    Baseline,
    OrbitalBull,
    OrbitalBear,
}

impl ScenarioMode {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Baseline => "baseline",
            Self::OrbitalBull => "orbital_bull",
            Self::OrbitalBear => "orbital_bear",
        }
    }
}

impl std::fmt::Display for ScenarioMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable trajectory parameters for a single run.
///
/// Built once at run start from [`ScenarioMode`] and held by shared
/// reference for the lifetime of the run; never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioParams {
    pub mode: ScenarioMode,

    /// Base year the fleet starts empty and curves are indexed from.
    pub base_year: i32,

    /// Compounding annual tech-progress factor (`techProgressFactor = techGrowthPerYear^yearIndex`).
    pub tech_growth_per_year: f64,

    /// Annual decline applied to launch $/kg on top of the base cost curve.
    pub launch_cost_decline_per_year: f64,

    /// Annual compounding growth applied to total compute demand.
    pub demand_growth_per_year: f64,

    /// Ground electricity/CAPEX learning-rate decay per year.
    pub ground_learning_rate: f64,

    /// Orbit CAPEX learning-rate decay per year, applied after calibration.
    pub orbit_learning_rate: f64,

    /// Multiple of ground unit cost used to calibrate the orbit cost curve
    /// the first year exportable compute is non-zero.
    pub orbit_initial_cost_multiple: f64,

    /// Baseline annual per-satellite failure probability before orbit/class
    /// modifiers are applied.
    pub failure_rate_base: f64,

    /// Scenario-level autonomy constant (repair workload absorbed without
    /// ground intervention), biased per strategy in the constraint solver.
    pub autonomy_level: f64,

    /// Per-satellite backhaul capacity, terabits/sec.
    pub backhaul_per_sat_tbps: f64,

    /// Launch carbon intensity, kg CO2 per kg of payload launched.
    pub launch_carbon_per_kg: f64,

    /// Annual growth applied to the per-satellite power-progression ceiling.
    pub power_growth_per_year: f64,

    /// Year Class-B satellites become available for deployment.
    pub class_b_available_from: i32,

    /// Base launch cost in $/kg at `base_year` before decline is applied.
    pub base_launch_cost_per_kg: f64,

    /// Scenario multiplier on the orbit-compute-share ramp cap.
    pub ramp_cap_scenario_multiplier: f64,

    /// Pre-parity orbit-compute-share cap.
    pub pre_parity_cap: f64,
}

impl ScenarioParams {
    /// Parameter bundle for the conservative baseline scenario.
    #[must_use]
    pub fn baseline(base_year: i32) -> Self {
        Self {
            mode: ScenarioMode::Baseline,
            base_year,
            tech_growth_per_year: 1.12,
            launch_cost_decline_per_year: 0.92,
            demand_growth_per_year: 1.35,
            ground_learning_rate: 0.04,
            orbit_learning_rate: 0.08,
            orbit_initial_cost_multiple: 3.0,
            failure_rate_base: 0.03,
            autonomy_level: 0.55,
            backhaul_per_sat_tbps: 0.4,
            launch_carbon_per_kg: 2.2,
            power_growth_per_year: 1.0,
            class_b_available_from: base_year + 3,
            base_launch_cost_per_kg: 200.0,
            ramp_cap_scenario_multiplier: 1.0,
            pre_parity_cap: 0.25,
        }
    }

    /// Parameter bundle for the bull scenario: cheaper launches, faster
    /// learning, higher demand growth.
    #[must_use]
    pub fn orbital_bull(base_year: i32) -> Self {
        Self {
            mode: ScenarioMode::OrbitalBull,
            base_year,
            tech_growth_per_year: 1.18,
            launch_cost_decline_per_year: 0.88,
            demand_growth_per_year: 1.45,
            ground_learning_rate: 0.04,
            orbit_learning_rate: 0.12,
            orbit_initial_cost_multiple: 2.0,
            failure_rate_base: 0.025,
            autonomy_level: 0.65,
            backhaul_per_sat_tbps: 0.5,
            launch_carbon_per_kg: 1.6,
            power_growth_per_year: 1.05,
            class_b_available_from: base_year + 2,
            base_launch_cost_per_kg: 10.0,
            ramp_cap_scenario_multiplier: 1.3,
            pre_parity_cap: 0.35,
        }
    }

    /// Parameter bundle for the bear scenario: expensive launches, slow
    /// learning, elevated failure rates.
    #[must_use]
    pub fn orbital_bear(base_year: i32) -> Self {
        Self {
            mode: ScenarioMode::OrbitalBear,
            base_year,
            tech_growth_per_year: 1.08,
            launch_cost_decline_per_year: 0.96,
            demand_growth_per_year: 1.25,
            ground_learning_rate: 0.035,
            orbit_learning_rate: 0.05,
            orbit_initial_cost_multiple: 4.5,
            failure_rate_base: 0.045,
            autonomy_level: 0.40,
            backhaul_per_sat_tbps: 0.3,
            launch_carbon_per_kg: 3.0,
            power_growth_per_year: 0.95,
            class_b_available_from: base_year + 5,
            base_launch_cost_per_kg: 500.0,
            ramp_cap_scenario_multiplier: 0.6,
            pre_parity_cap: 0.15,
        }
    }

    /// Build the parameter bundle for a given mode at the given base year.
    #[must_use]
    pub fn for_mode(mode: ScenarioMode, base_year: i32) -> Self {
        match mode {
            ScenarioMode::Baseline => Self::baseline(base_year),
            ScenarioMode::OrbitalBull => Self::orbital_bull(base_year),
            ScenarioMode::OrbitalBear => Self::orbital_bear(base_year),
        }
    }

    /// SAFE-mode survival floor, which is intentionally scenario-specific.
    #[must_use]
    pub fn safe_survival_floor(&self) -> f64 {
        match self.mode {
            ScenarioMode::OrbitalBull => 0.98,
            ScenarioMode::Baseline => 0.95,
            ScenarioMode::OrbitalBear => 0.92,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scenario_modes_have_distinct_floors() {
        let bull = ScenarioParams::orbital_bull(2025);
        let base = ScenarioParams::baseline(2025);
        let bear = ScenarioParams::orbital_bear(2025);
        assert!(bull.safe_survival_floor() > base.safe_survival_floor());
        assert!(base.safe_survival_floor() > bear.safe_survival_floor());
    }

    #[test]
    fn class_b_available_from_is_base_plus_offset() {
        let p = ScenarioParams::baseline(2025);
        assert_eq!(p.class_b_available_from, 2028);
    }
}
