//! End-to-end runs of the full year-step pipeline, one test per concrete
//! scenario the kernel is expected to reproduce. These exercise `run`/
//! `run_from` rather than any individual stage, so a regression in how the
//! stages compose (not just a single stage's math) shows up here.

use std::collections::BTreeMap;

use ocse_core::run;
use ocse_types::{ComputeStrategy, LaunchStrategy, OcseError, PhysicsOverrides, ScenarioMode, YearPlan};

fn plan_map(plan: YearPlan, years: std::ops::RangeInclusive<i32>) -> BTreeMap<i32, YearPlan> {
    years.map(|y| (y, plan)).collect()
}

#[test]
fn baseline_single_year_holds_share_cap_and_survival_floor() {
    let plans = plan_map(YearPlan::default(), 2025..=2025);
    let outcome = run(ScenarioMode::Baseline, 2025, 2025, &plans, None).expect("run succeeds");
    let entry = outcome.store.get(ScenarioMode::Baseline, 2025).expect("2025 entry present");

    assert!(entry.satellites_total > 0);
    assert!(entry.orbit_compute_share <= 0.25 + 1e-6);
    assert!(entry.survival_fraction >= 0.95 - 1e-9);

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
    assert!((mass_sum - entry.bus_total_mass_kg).abs() <= 0.001 * entry.bus_total_mass_kg.max(1.0));
}

#[test]
fn baseline_to_2030_decays_ground_cost_and_grows_orbit_share() {
    let plan = YearPlan::new(ComputeStrategy::Balanced, LaunchStrategy::Medium, 1.0);
    let plans = plan_map(plan, 2025..=2030);
    let outcome = run(ScenarioMode::Baseline, 2025, 2030, &plans, None).expect("run succeeds");

    let years: Vec<_> = outcome.store.scenario_entries(ScenarioMode::Baseline).collect();
    assert_eq!(years.len(), 6);

    for pair in years.windows(2) {
        assert!(
            pair[1].ground_unit_cost_usd_per_pflop <= pair[0].ground_unit_cost_usd_per_pflop + 1e-6,
            "ground cost per compute should decay year over year, got {} then {}",
            pair[0].ground_unit_cost_usd_per_pflop,
            pair[1].ground_unit_cost_usd_per_pflop
        );
    }

    let post_2026: Vec<_> = years.iter().filter(|e| e.year >= 2027).collect();
    for pair in post_2026.windows(2) {
        assert!(
            pair[1].orbit_compute_share >= pair[0].orbit_compute_share,
            "orbit compute share should keep climbing post-ramp, got {} then {} ({} -> {})",
            pair[0].orbit_compute_share,
            pair[1].orbit_compute_share,
            pair[0].year,
            pair[1].year
        );
    }
}

#[test]
fn orbital_bull_reaches_parity_and_high_survival_by_2035() {
    let plan = YearPlan::new(ComputeStrategy::Carbon, LaunchStrategy::Medium, 1.0);
    let plans = plan_map(plan, 2025..=2035);
    let outcome = run(ScenarioMode::OrbitalBull, 2025, 2035, &plans, None).expect("run succeeds");

    let entry_2033 = outcome.store.get(ScenarioMode::OrbitalBull, 2033).expect("2033 entry");
    assert!(entry_2033.orbit_compute_share >= 0.50);

    let crossover_year = outcome
        .store
        .scenario_entries(ScenarioMode::OrbitalBull)
        .find(|e| e.year <= 2034 && e.diagnostics.carbon_crossover_triggered)
        .map(|e| e.year);
    assert!(crossover_year.is_some(), "expected a carbon crossover at or before 2034");

    for entry in outcome.store.scenario_entries(ScenarioMode::OrbitalBull) {
        assert!(
            entry.survival_fraction >= 0.98 - 1e-9,
            "year {} dropped below the bull SAFE floor: {}",
            entry.year,
            entry.survival_fraction
        );
    }
}

#[test]
fn orbital_bear_keeps_orbit_share_capped_until_parity() {
    let plan = YearPlan::new(ComputeStrategy::Cost, LaunchStrategy::Heavy, 1.0);
    let plans = plan_map(plan, 2025..=2035);
    let outcome = run(ScenarioMode::OrbitalBear, 2025, 2035, &plans, None).expect("run succeeds");

    for entry in outcome.store.scenario_entries(ScenarioMode::OrbitalBear) {
        if !entry.diagnostics.parity_achieved {
            assert!(
                entry.orbit_compute_share <= 0.15 + 1e-6,
                "year {} exceeded the pre-parity bear cap: {}",
                entry.year,
                entry.orbit_compute_share
            );
        }
        assert!(
            entry.survival_fraction >= 0.92 - 1e-9,
            "year {} dropped below the bear SAFE floor: {}",
            entry.year,
            entry.survival_fraction
        );
    }
}

#[test]
fn strategy_boundary_at_2030_does_not_break_invariants() {
    let early = YearPlan::new(ComputeStrategy::Latency, LaunchStrategy::Light, 1.0);
    let late = YearPlan::new(ComputeStrategy::Carbon, LaunchStrategy::Medium, 1.0);
    let mut plans = plan_map(early, 2025..=2030);
    plans.extend(plan_map(late, 2031..=2040));

    let outcome = run(ScenarioMode::Baseline, 2025, 2040, &plans, None).expect("run succeeds");
    let entries: Vec<_> = outcome.store.scenario_entries(ScenarioMode::Baseline).collect();

    let before = entries.iter().find(|e| e.year == 2030).expect("2030 entry");
    let after = entries.iter().find(|e| e.year == 2031).expect("2031 entry");
    assert!(
        after.class_a_sun_sync >= before.class_a_sun_sync,
        "carbon-favoring strategy should not shrink the sun-sync fleet across the boundary"
    );

    for pair in entries.iter().filter(|e| e.year >= 2031).collect::<Vec<_>>().windows(2) {
        assert!(
            pair[1].latency_orbit_ms <= pair[0].latency_orbit_ms + 1e-9,
            "orbit latency should keep falling under the CARBON posture"
        );
    }

    for entry in &entries {
        assert!(entry.satellites_total == entry.class_a_satellites_alive + entry.class_b_satellites_alive);
        assert!(entry.survival_fraction >= 0.0 && entry.survival_fraction <= 1.0);
    }
}

#[test]
fn bus_power_override_holds_exact_power_and_raises_total_mass() {
    let plan = YearPlan::new(ComputeStrategy::Balanced, LaunchStrategy::Medium, 1.0);
    let plans = plan_map(plan, 2025..=2030);

    let baseline = run(ScenarioMode::Baseline, 2025, 2030, &plans, None).expect("baseline run");
    let overrides = PhysicsOverrides { bus_power_kw: Some(500.0), ..Default::default() };
    let overridden =
        run(ScenarioMode::Baseline, 2025, 2030, &plans, Some(&overrides)).expect("override run");

    for entry in overridden.store.scenario_entries(ScenarioMode::Baseline) {
        assert!((entry.power_per_sat_kw - 500.0).abs() < 1.0);
    }

    let baseline_2030 = baseline.store.get(ScenarioMode::Baseline, 2030).unwrap();
    let overridden_2030 = overridden.store.get(ScenarioMode::Baseline, 2030).unwrap();
    assert!(overridden_2030.bus_total_mass_kg > baseline_2030.bus_total_mass_kg);
}

#[test]
fn missing_year_plans_are_reported_as_warnings_not_failures() {
    let plans = BTreeMap::new();
    let outcome = run(ScenarioMode::Baseline, 2025, 2027, &plans, None).expect("run succeeds");
    assert_eq!(outcome.warnings.len(), 3);
    assert!(outcome
        .warnings
        .iter()
        .all(|w| matches!(w, OcseError::MissingYearPlan { .. })));
}
