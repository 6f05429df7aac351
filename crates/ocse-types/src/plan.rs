use serde::{Deserialize, Serialize};

/// Compute-allocation posture the user selects for a simulated year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComputeStrategy {
    Latency,
    Cost,
    Carbon,
    Balanced,
}

impl ComputeStrategy {
    /// Strategy growth multiplier applied to baseline demand (COST highest,
    /// LATENCY lowest).
    #[must_use]
    pub fn growth_multiplier(self) -> f64 {
        match self {
            Self::Cost => 1.30,
            Self::Carbon => 1.20,
            Self::Balanced => 1.18,
            Self::Latency => 1.10,
        }
    }

    /// Class-B compute share once Class B is available, per strategy.
    #[must_use]
    pub fn class_b_share(self) -> f64 {
        match self {
            Self::Carbon => 0.70,
            Self::Cost => 0.50,
            Self::Balanced => 0.50,
            Self::Latency => 0.25,
        }
    }

    /// Baseline-relative orbit-shell allocation shift for Class-A satellites.
    /// Returns `(delta_low, delta_mid, delta_sso)`; normalized by the caller.
    #[must_use]
    pub fn orbit_allocation_shift(self) -> (f64, f64, f64) {
        match self {
            Self::Latency => (0.15, 0.0, 0.0),
            Self::Carbon => (0.0, 0.0, 0.20),
            Self::Cost => (0.0, 0.20, 0.0),
            Self::Balanced => (0.0, 0.0, 0.0),
        }
    }
}

impl std::fmt::Display for ComputeStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Latency => "latency",
            Self::Cost => "cost",
            Self::Carbon => "carbon",
            Self::Balanced => "balanced",
        };
        f.write_str(s)
    }
}

/// Launch cadence posture the user selects for a simulated year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LaunchStrategy {
    Heavy,
    Medium,
    Light,
}

impl LaunchStrategy {
    /// Fraction of the scenario's tabulated launch cadence requested for the
    /// year before the launch gate admits what mass/cost budgets allow.
    #[must_use]
    pub fn cadence_fraction(self) -> f64 {
        match self {
            Self::Heavy => 1.25,
            Self::Medium => 1.0,
            Self::Light => 0.6,
        }
    }
}

impl std::fmt::Display for LaunchStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Heavy => "heavy",
            Self::Medium => "medium",
            Self::Light => "light",
        };
        f.write_str(s)
    }
}

/// One year's user decision: what to optimize compute allocation for, how
/// aggressively to launch, and how much of the requested cadence to pursue.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YearPlan {
    pub compute_strategy: ComputeStrategy,
    pub launch_strategy: LaunchStrategy,
    /// Multiplier on the launch strategy's cadence fraction; 1.0 is nominal.
    pub deployment_intensity: f64,
}

impl YearPlan {
    #[must_use]
    pub fn new(
        compute_strategy: ComputeStrategy,
        launch_strategy: LaunchStrategy,
        deployment_intensity: f64,
    ) -> Self {
        Self {
            compute_strategy,
            launch_strategy,
            deployment_intensity: deployment_intensity.max(0.0),
        }
    }
}

impl Default for YearPlan {
    fn default() -> Self {
        Self::new(ComputeStrategy::Balanced, LaunchStrategy::Medium, 1.0)
    }
}
