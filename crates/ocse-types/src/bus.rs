use serde::{Deserialize, Serialize};

/// The two satellite archetypes the bus designer produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SatelliteClass {
    /// General-purpose LEO compute, available from the base year.
    A,
    /// Sun-synchronous, compute-dense, available from a scenario-defined year.
    B,
}

/// Per-component mass breakdown of a single satellite bus, in kilograms.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MassBreakdown {
    pub silicon_kg: f64,
    pub radiator_kg: f64,
    pub solar_array_kg: f64,
    pub shielding_kg: f64,
    pub power_electronics_kg: f64,
    pub avionics_kg: f64,
    pub adcs_kg: f64,
    pub battery_kg: f64,
    pub propulsion_kg: f64,
    pub structure_kg: f64,
    pub other_kg: f64,
}

impl MassBreakdown {
    #[must_use]
    pub fn total_kg(&self) -> f64 {
        self.silicon_kg
            + self.radiator_kg
            + self.solar_array_kg
            + self.shielding_kg
            + self.power_electronics_kg
            + self.avionics_kg
            + self.adcs_kg
            + self.battery_kg
            + self.propulsion_kg
            + self.structure_kg
            + self.other_kg
    }
}

/// Physics-derived design for a single satellite of a given class, valid for
/// the year it was computed (pure function of year + scenario + class).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusDesign {
    pub class: SatelliteClass,

    pub mass: MassBreakdown,
    pub total_mass_kg: f64,

    pub radiator_area_m2: f64,
    pub solar_array_area_m2: f64,

    pub bus_power_kw: f64,

    pub compute_nominal_tflops: f64,
    pub compute_derated_tflops: f64,

    pub annual_failure_probability: f64,
    pub availability: f64,

    /// `(T_hot - T_cold)`-derived steady-state radiator reject capacity, kW,
    /// used by the constraint solver's heat-utilization check.
    pub heat_reject_kw: f64,
    pub heat_gen_kw: f64,
}

impl BusDesign {
    /// `availability = 1 - 0.5 * annualFailureProb`.
    #[must_use]
    pub fn availability_from_failure_prob(annual_failure_probability: f64) -> f64 {
        1.0 - 0.5 * annual_failure_probability
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mass_breakdown_totals_components() {
        let mass = MassBreakdown {
            silicon_kg: 100.0,
            radiator_kg: 50.0,
            solar_array_kg: 30.0,
            shielding_kg: 20.0,
            power_electronics_kg: 10.0,
            avionics_kg: 5.0,
            adcs_kg: 5.0,
            battery_kg: 15.0,
            propulsion_kg: 8.0,
            structure_kg: 25.0,
            other_kg: 12.0,
        };
        assert!((mass.total_kg() - 280.0).abs() < 1e-9);
    }

    #[test]
    fn availability_decreases_with_failure_probability() {
        let hi = BusDesign::availability_from_failure_prob(0.2);
        let lo = BusDesign::availability_from_failure_prob(0.02);
        assert!(hi < lo);
    }
}
