//! Heat, backhaul, maintenance, and autonomy constraints for the
//! post-deployment, pre-physics fleet; produces the survival fraction that
//! multiplies fleet counts at end of tick.

use ocse_types::{BusDesign, ComputeStrategy, DominantConstraint, FleetState, RiskMode, ScenarioParams};

/// Heuristic capacity-factor penalty applied to backhaul when the relay
/// backbone is incomplete (low-LEO or mid-LEO shell empty). Tuneable
/// constant, no calibration source (spec section 9, Open Questions).
const INCOMPLETE_RELAY_CAPACITY_FACTOR: f64 = 0.7;

#[derive(Debug, Clone, Copy)]
pub struct ConstraintInputs<'a> {
    pub fleet: &'a FleetState,
    pub class_a_bus: &'a BusDesign,
    pub class_b_bus: Option<&'a BusDesign>,
    pub year: i32,
    pub scenario: &'a ScenarioParams,
    pub compute_strategy: ComputeStrategy,
    pub compute_demand_gbps: f64,
    pub prior_survival_fraction: f64,
    pub risk_mode: RiskMode,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MaintenanceResult {
    pub failures_this_year: u32,
    pub recoverable: u32,
    pub permanent_loss: u32,
    pub repair_capacity_pods: f64,
    pub utilization: f64,
}

#[derive(Debug, Clone, Copy)]
pub struct ConstraintResult {
    pub heat_utilization: f64,
    pub backhaul_utilization: f64,
    /// Relay-backbone completeness factor (1.0, or degraded when low-LEO or
    /// mid-LEO is empty). Reused downstream by the physics step as the
    /// export-path capacity factor so both stages agree on one relay model.
    pub relay_capacity_factor: f64,
    pub maintenance: MaintenanceResult,
    pub autonomy_level: f64,
    pub dominant_constraint: DominantConstraint,
    pub survival_fraction: f64,
}

fn autonomy_strategy_bias(strategy: ComputeStrategy) -> f64 {
    match strategy {
        ComputeStrategy::Latency => 1.10,
        ComputeStrategy::Carbon => 1.05,
        ComputeStrategy::Cost => 0.95,
        ComputeStrategy::Balanced => 1.0,
    }
}

/// Repair capacity grows with fleet size, year, and strategy.
fn repair_capacity_pods(
    fleet_size: u32,
    year_index: i32,
    scenario: &ScenarioParams,
    strategy: ComputeStrategy,
) -> f64 {
    let base = scenario.autonomy_level * f64::from(fleet_size).powf(0.7);
    let year_growth = 1.0 + 0.02 * f64::from(year_index.max(0));
    base * year_growth * autonomy_strategy_bias(strategy)
}

#[must_use]
pub fn solve_constraints(inputs: &ConstraintInputs) -> ConstraintResult {
    let fleet = inputs.fleet;
    let fleet_size = fleet.satellites_total();

    // --- Heat utilization ---
    let heat_gen_kw = f64::from(fleet.class_a_total()) * inputs.class_a_bus.heat_gen_kw
        + inputs
            .class_b_bus
            .map_or(0.0, |bus| f64::from(fleet.class_b) * bus.heat_gen_kw);
    let heat_reject_kw = f64::from(fleet.class_a_total()) * inputs.class_a_bus.heat_reject_kw
        + inputs
            .class_b_bus
            .map_or(0.0, |bus| f64::from(fleet.class_b) * bus.heat_reject_kw);
    let heat_utilization = if heat_reject_kw > 0.0 {
        heat_gen_kw / heat_reject_kw
    } else if heat_gen_kw > 0.0 {
        f64::INFINITY
    } else {
        0.0
    };

    // --- Backhaul utilization ---
    let relay_backbone_complete = fleet.class_a_low > 0 && fleet.class_a_mid > 0;
    let capacity_factor = if relay_backbone_complete {
        1.0
    } else {
        INCOMPLETE_RELAY_CAPACITY_FACTOR
    };
    let backhaul_capacity_gbps =
        f64::from(fleet_size) * inputs.scenario.backhaul_per_sat_tbps * 1000.0 * capacity_factor;
    let backhaul_utilization = if backhaul_capacity_gbps > 0.0 {
        (inputs.compute_demand_gbps / backhaul_capacity_gbps).min(1.0)
    } else if inputs.compute_demand_gbps > 0.0 {
        1.0
    } else {
        0.0
    };

    // --- Maintenance ---
    let year_index = inputs.year - inputs.scenario.base_year;
    let failures_this_year =
        (inputs.scenario.failure_rate_base * f64::from(fleet_size)).round() as u32;
    let repair_capacity =
        repair_capacity_pods(fleet_size, year_index, inputs.scenario, inputs.compute_strategy);
    let recoverable = (f64::from(failures_this_year)).min(repair_capacity).round() as u32;
    let permanent_loss = failures_this_year.saturating_sub(recoverable);
    // Uncapped ratio, used only to drive the survival-penalty overload term
    // below; invariant 4 requires the *reported* utilization to be <= 1, so
    // the capped `maintenance_utilization` is what goes on `MaintenanceResult`.
    let maintenance_utilization_raw = if repair_capacity > 0.0 {
        f64::from(failures_this_year) / repair_capacity
    } else if failures_this_year > 0 {
        f64::INFINITY
    } else {
        0.0
    };
    let maintenance_utilization = maintenance_utilization_raw.min(1.0);

    // --- Autonomy ---
    let autonomy_level = (inputs.scenario.autonomy_level
        * autonomy_strategy_bias(inputs.compute_strategy))
    .clamp(0.0, 1.0);

    // --- Dominant constraint ---
    let candidates = [
        (DominantConstraint::Heat, heat_utilization.min(1.0)),
        (DominantConstraint::Backhaul, backhaul_utilization),
        (DominantConstraint::Maintenance, maintenance_utilization),
        (DominantConstraint::Autonomy, 1.0 - autonomy_level),
    ];
    let dominant_constraint = candidates
        .iter()
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map_or(DominantConstraint::Autonomy, |(kind, _)| *kind);

    // --- Survival fraction ---
    // Uses the uncapped maintenance ratio: a `min(1.0)`-capped value could
    // never exceed 1 and would make maintenance overload unable to ever
    // trigger this penalty (only heat overload could).
    let raw_utilization = maintenance_utilization_raw.max(heat_utilization);
    let overload_penalty = (-0.1 * (raw_utilization - 1.0).max(0.0)).exp();
    let mut survival = inputs.prior_survival_fraction * overload_penalty;

    let floor = match inputs.risk_mode {
        RiskMode::Safe => inputs.scenario.safe_survival_floor(),
        RiskMode::Aggressive => 0.10,
        RiskMode::Yolo => 0.0,
    };
    survival = survival.max(floor).min(1.0);

    let cumulative_survival = if fleet.cumulative_launches > 0 {
        1.0 - (fleet.cumulative_failures as f64) / (fleet.cumulative_launches as f64)
    } else {
        1.0
    };
    let blended_survival = 0.7 * survival + 0.3 * cumulative_survival.clamp(0.0, 1.0);
    let survival_fraction = match inputs.risk_mode {
        RiskMode::Safe => blended_survival.max(floor).min(1.0),
        _ => blended_survival.clamp(floor, 1.0),
    };

    ConstraintResult {
        heat_utilization,
        backhaul_utilization,
        relay_capacity_factor: capacity_factor,
        maintenance: MaintenanceResult {
            failures_this_year,
            recoverable,
            permanent_loss,
            repair_capacity_pods: repair_capacity,
            utilization: maintenance_utilization,
        },
        autonomy_level,
        dominant_constraint,
        survival_fraction,
    }
}
