//! Pure functions of `(year, scenario, strategy)`. Nothing here fails: an
//! out-of-range year clamps to the nearest tabulated endpoint rather than
//! erroring, per the kernel's error-handling design.

use ocse_types::{ComputeStrategy, OrbitShell, SatelliteClass, ScenarioParams};

/// Radiator flux limit used for bus-sizing area calculations, kW/m^2.
/// Tabulated directly from the 200 W/m^2 figure in the scenario model; the
/// glossary's rounded "~0.3 kW/m^2" is the Stefan-Boltzmann-derived reject
/// flux at nominal operating temperature, a downstream consequence rather
/// than this input constant.
pub const RADIATOR_FLUX_LIMIT_KW_PER_M2: f64 = 0.2;

pub const BODY_MOUNTED_RADIATOR_MAX_M2: f64 = 20.0;
pub const DEPLOYABLE_RADIATOR_MAX_M2: f64 = 100.0;

pub const ECC_OVERHEAD: f64 = 0.15;
pub const REDUNDANCY_OVERHEAD: f64 = 0.20;
pub const MTBF_REDUCTION: f64 = 0.30;

const EARTH_RADIUS_KM: f64 = 6371.0;
const SHELL_LIT_FRACTION: f64 = 0.70;

/// `year - base_year`, the index tech curves compound over. Never negative:
/// the kernel never simulates a year before the scenario's base year.
#[must_use]
pub fn year_index(year: i32, scenario: &ScenarioParams) -> i32 {
    (year - scenario.base_year).max(0)
}

/// Piecewise-linear interpolation over a fixed table of `(year, value)`
/// points, clamped to the endpoint values outside the tabulated range.
#[must_use]
pub fn interpolate_table(table: &[(i32, f64)], year: i32) -> f64 {
    debug_assert!(!table.is_empty());
    if year <= table[0].0 {
        return table[0].1;
    }
    let last = table.len() - 1;
    if year >= table[last].0 {
        return table[last].1;
    }
    for window in table.windows(2) {
        let (y0, v0) = window[0];
        let (y1, v1) = window[1];
        if year >= y0 && year <= y1 {
            if y1 == y0 {
                return v0;
            }
            let t = f64::from(year - y0) / f64::from(y1 - y0);
            return v0 + t * (v1 - v0);
        }
    }
    table[last].1
}

/// Launches/year: piecewise-linear from `base_year` (180) through 2040 (2000).
#[must_use]
pub fn launch_cadence(year: i32, scenario: &ScenarioParams) -> f64 {
    let table = [
        (scenario.base_year, 180.0),
        (scenario.base_year + 3, 350.0),
        (scenario.base_year + 7, 800.0),
        (scenario.base_year + 11, 1400.0),
        (2040, 2000.0),
    ];
    interpolate_table(&table, year)
}

/// Per-satellite power progression, kW. The kernel uses the 150 kW (base
/// year) -> 1000 kW (2040) table; a legacy 5 kW -> 150 kW table exists in
/// some historical reports but is not wired into this kernel (Open
/// Question, resolved per spec section 9).
#[must_use]
pub fn power_per_satellite_kw(year: i32, scenario: &ScenarioParams) -> f64 {
    let table = [(scenario.base_year, 150.0), (2040, 1000.0)];
    let ceiling = interpolate_table(&table, year);
    let idx = year_index(year, scenario);
    (ceiling * scenario.power_growth_per_year.powi(idx)).min(ceiling.max(1000.0))
}

/// PFLOPs/kW efficiency, a bounded exponential approach to a 2040 limit.
#[must_use]
pub fn efficiency_pflops_per_kw(year: i32, scenario: &ScenarioParams) -> f64 {
    const BASE_EFFICIENCY: f64 = 0.002;
    const LIMIT_EFFICIENCY: f64 = 0.02;
    let idx = year_index(year, scenario);
    let span = f64::from((2040 - scenario.base_year).max(1));
    let progress = 1.0 - (-f64::from(idx) / (span * 0.4)).exp();
    BASE_EFFICIENCY + (LIMIT_EFFICIENCY - BASE_EFFICIENCY) * progress.clamp(0.0, 1.0)
}

/// Per-satellite compute, TFLOPs, for the given class. `None` for Class B
/// before `classBAvailableFrom`.
#[must_use]
pub fn compute_per_satellite_tflops(
    year: i32,
    scenario: &ScenarioParams,
    class: SatelliteClass,
) -> Option<f64> {
    if class == SatelliteClass::B && year < scenario.class_b_available_from {
        return None;
    }
    let idx = year_index(year, scenario);
    let (base_tflops, k1, start_year) = match class {
        SatelliteClass::A => (60.0, 0.18, scenario.base_year),
        SatelliteClass::B => (90.0, 0.14, scenario.class_b_available_from),
    };
    let delta_t = f64::from((year - start_year).max(0));
    let tech_progress_factor = scenario.tech_growth_per_year.powi(idx);
    let raw = base_tflops * (1.0 + k1 * delta_t) * tech_progress_factor;

    // Cap by the efficiency-saturation curve: pflops/kW * power(kW) * 1000
    // (TFLOPs per PFLOP) bounds the achievable compute per satellite.
    let power_kw = power_per_satellite_kw(year, scenario);
    let cap_tflops = efficiency_pflops_per_kw(year, scenario) * power_kw * 1000.0;
    Some(raw.min(cap_tflops))
}

/// Class-B compute share of total demand for the given strategy/year; 0
/// strictly before `classBAvailableFrom`.
#[must_use]
pub fn class_b_share(strategy: ComputeStrategy, year: i32, scenario: &ScenarioParams) -> f64 {
    if year < scenario.class_b_available_from {
        return 0.0;
    }
    strategy.class_b_share()
}

/// Normalized baseline + strategy-shifted Class-A orbit-shell allocation.
#[must_use]
pub fn orbit_allocation(strategy: ComputeStrategy) -> [(OrbitShell, f64); 3] {
    let (baseline_low, baseline_mid, baseline_sso) = (0.45, 0.35, 0.20);
    let (d_low, d_mid, d_sso) = strategy.orbit_allocation_shift();
    let low = baseline_low + d_low;
    let mid = baseline_mid + d_mid;
    let sso = baseline_sso + d_sso;
    let total = low + mid + sso;
    [
        (OrbitShell::LowLeo, low / total),
        (OrbitShell::MidLeo, mid / total),
        (OrbitShell::SunSync, sso / total),
    ]
}

/// Launch cost, $/kg: `base_cost * launchCostDeclinePerYear^yearIndex`,
/// optionally overridden with a custom base cost and/or decline rate.
#[must_use]
pub fn launch_cost_per_kg(
    year: i32,
    scenario: &ScenarioParams,
    override_cost: Option<f64>,
    override_rate: Option<f64>,
) -> f64 {
    let idx = year_index(year, scenario);
    let base = override_cost.unwrap_or(scenario.base_launch_cost_per_kg);
    let rate = override_rate.unwrap_or(scenario.launch_cost_decline_per_year);
    base * rate.powi(idx)
}

/// Battery energy density, Wh/kg: tabulated piecewise-linear.
#[must_use]
pub fn battery_density_wh_per_kg(year: i32, scenario: &ScenarioParams) -> f64 {
    let table = [
        (scenario.base_year, 260.0),
        (scenario.base_year + 8, 340.0),
        (2040, 450.0),
    ];
    interpolate_table(&table, year)
}

/// Battery cost, $/kWh: tabulated piecewise-linear, declining.
#[must_use]
pub fn battery_cost_usd_per_kwh(year: i32, scenario: &ScenarioParams) -> f64 {
    let table = [
        (scenario.base_year, 120.0),
        (scenario.base_year + 8, 70.0),
        (2040, 35.0),
    ];
    interpolate_table(&table, year)
}

/// Altitude multiplier on proton flux / TID, by orbit shell (sun-synchronous
/// and mid-LEO see more radiation than low-LEO).
#[must_use]
pub fn altitude_radiation_multiplier(shell: OrbitShell) -> f64 {
    match shell {
        OrbitShell::LowLeo => 1.0,
        OrbitShell::MidLeo => 1.4,
        OrbitShell::SunSync => 1.8,
    }
}

/// Shell capacity (max satellite count) from altitude and areal spacing:
/// `lit_fraction * shell_area / spacing^2`.
#[must_use]
pub fn calculate_shell_capacity(altitude_km: f64, spacing_km: f64) -> f64 {
    let shell_radius_km = EARTH_RADIUS_KM + altitude_km;
    let shell_area_km2 = 4.0 * std::f64::consts::PI * shell_radius_km * shell_radius_km;
    SHELL_LIT_FRACTION * shell_area_km2 / (spacing_km * spacing_km)
}

/// Nominal altitude, km, associated with each orbit shell.
#[must_use]
pub fn shell_altitude_km(shell: OrbitShell) -> f64 {
    match shell {
        OrbitShell::LowLeo => 450.0,
        OrbitShell::MidLeo => 800.0,
        OrbitShell::SunSync => 700.0,
    }
}

/// Radiation-derated compute multiplier. Depends on the radiation model's
/// altitude multiplier and shielding thickness, both tech-curve concerns,
/// and feeds the bus designer's derated-compute calculation.
#[must_use]
pub fn radiation_derate(shielding_thickness_mm: f64, life_years: f64, tid_per_year: f64) -> f64 {
    let tid = tid_per_year * life_years / shielding_thickness_mm.max(0.1);
    (1.0 - (tid - 10.0).max(0.0) / 80.0).clamp(0.4, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ocse_types::ScenarioMode;

    fn baseline() -> ScenarioParams {
        ScenarioParams::for_mode(ScenarioMode::Baseline, 2025)
    }

    #[test]
    fn launch_cadence_clamps_outside_table_range() {
        let scenario = baseline();
        assert_eq!(launch_cadence(2000, &scenario), 180.0);
        assert_eq!(launch_cadence(2100, &scenario), 2000.0);
    }

    #[test]
    fn launch_cadence_is_monotonic_non_decreasing() {
        let scenario = baseline();
        let mut prev = launch_cadence(scenario.base_year, &scenario);
        for year in scenario.base_year..=2040 {
            let cur = launch_cadence(year, &scenario);
            assert!(cur >= prev - 1e-9);
            prev = cur;
        }
    }

    #[test]
    fn class_b_share_is_zero_before_availability() {
        let scenario = baseline();
        assert_eq!(
            class_b_share(ComputeStrategy::Carbon, scenario.class_b_available_from - 1, &scenario),
            0.0
        );
        assert!(
            class_b_share(ComputeStrategy::Carbon, scenario.class_b_available_from, &scenario) > 0.0
        );
    }

    #[test]
    fn compute_per_satellite_is_none_for_class_b_before_available() {
        let scenario = baseline();
        assert!(
            compute_per_satellite_tflops(
                scenario.base_year,
                &scenario,
                SatelliteClass::B
            )
            .is_none()
        );
    }

    #[test]
    fn orbit_allocation_normalizes_to_one() {
        for strategy in [
            ComputeStrategy::Latency,
            ComputeStrategy::Cost,
            ComputeStrategy::Carbon,
            ComputeStrategy::Balanced,
        ] {
            let shares = orbit_allocation(strategy);
            let sum: f64 = shares.iter().map(|(_, v)| v).sum();
            assert!((sum - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn shell_capacity_is_positive_and_grows_with_spacing_decrease() {
        let wide = calculate_shell_capacity(550.0, 50.0);
        let narrow = calculate_shell_capacity(550.0, 10.0);
        assert!(narrow > wide);
    }
}
