use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Risk posture governing the floor `survival_fraction` is clamped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskMode {
    /// Scenario-specific floor (bull 0.98, baseline 0.95, bear 0.92).
    Safe,
    /// Fixed 0.10 floor.
    Aggressive,
    /// No floor; the fleet can collapse to zero.
    Yolo,
}

/// Thermal-regime state machine the physics step re-evaluates every year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThermalRegime {
    Nominal,
    Overload,
    Critical,
}

/// Persistent thermal/plant state carried year to year. Treated as a value
/// type: the kernel consumes the previous year's value and emits a fresh one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhysicsState {
    pub temp_core_c: f64,
    pub emissivity: f64,
    pub radiator_area_m2: f64,
    pub power_total_kw: f64,
    pub compute_raw_flops: f64,
    pub backhaul_capacity_tbps: f64,
    pub maintenance_capacity_pods: f64,
    pub survival_fraction: f64,
    pub eclipse_fraction: f64,
    pub shadowing_loss: f64,
    pub thermal_mass_j_per_c: f64,
    pub risk_mode: RiskMode,
    pub thermal_regime: ThermalRegime,
}

impl PhysicsState {
    /// Neutral state for a fleet with zero satellites, at the base year.
    #[must_use]
    pub fn initial(risk_mode: RiskMode) -> Self {
        Self {
            temp_core_c: 20.0,
            emissivity: 0.90,
            radiator_area_m2: 0.0,
            power_total_kw: 0.0,
            compute_raw_flops: 0.0,
            backhaul_capacity_tbps: 0.0,
            maintenance_capacity_pods: 0.0,
            survival_fraction: 1.0,
            eclipse_fraction: 0.35,
            shadowing_loss: 0.02,
            thermal_mass_j_per_c: 1.0,
            risk_mode,
            thermal_regime: ThermalRegime::Nominal,
        }
    }
}

/// Recognized keys for sandbox physics overrides. Unknown keys in the
/// source map are ignored rather than rejected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PhysicsOverrides {
    pub radiator_area_m2: Option<f64>,
    pub emissivity: Option<f64>,
    pub bus_power_kw: Option<f64>,
    pub radiator_temp_c: Option<f64>,
    pub launch_cost_per_kg: Option<f64>,
    pub launch_cost_improvement_rate: Option<f64>,
    pub moores_law_doubling_years: Option<f64>,
    pub battery_density: Option<f64>,
    pub battery_cost: Option<f64>,
}

impl PhysicsOverrides {
    /// Build overrides from a loosely-typed map (e.g. parsed from JSON or
    /// TOML), ignoring keys the kernel does not recognize.
    #[must_use]
    pub fn from_map(map: &HashMap<String, f64>) -> Self {
        let get = |key: &str| map.get(key).copied();
        Self {
            radiator_area_m2: get("radiatorArea_m2"),
            emissivity: get("emissivity"),
            bus_power_kw: get("busPowerKw"),
            radiator_temp_c: get("radiatorTempC"),
            launch_cost_per_kg: get("launchCostPerKg"),
            launch_cost_improvement_rate: get("launchCostImprovementRate"),
            moores_law_doubling_years: get("mooresLawDoublingYears"),
            battery_density: get("batteryDensity"),
            battery_cost: get("batteryCost"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_state_is_neutral() {
        let state = PhysicsState::initial(RiskMode::Safe);
        assert_eq!(state.power_total_kw, 0.0);
        assert_eq!(state.survival_fraction, 1.0);
        assert_eq!(state.thermal_regime, ThermalRegime::Nominal);
    }

    #[test]
    fn unknown_override_keys_are_ignored() {
        let mut map = HashMap::new();
        map.insert("busPowerKw".to_string(), 500.0);
        map.insert("totallyUnknownKey".to_string(), 42.0);
        let overrides = PhysicsOverrides::from_map(&map);
        assert_eq!(overrides.bus_power_kw, Some(500.0));
        assert_eq!(overrides.radiator_area_m2, None);
    }
}
