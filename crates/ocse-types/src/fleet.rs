use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::bus::BusDesign;
use crate::physics::PhysicsState;

/// The three orbital shells Class-A satellites are distributed across.
/// Class-B satellites are always sun-synchronous.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrbitShell {
    LowLeo,
    MidLeo,
    SunSync,
}

/// End-of-year fleet counts and deployment/failure ledgers.
///
/// Treated as a value type: cloned when branching scenarios rather than
/// shared by mutable reference, so concurrent scenario runners never alias
/// each other's ledgers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FleetState {
    pub class_a_low: u32,
    pub class_a_mid: u32,
    pub class_a_sun_sync: u32,
    pub class_b: u32,

    /// Year -> count of Class-A satellites deployed that year (monotonic
    /// ledger; retirements read back `year - lifetime`).
    pub deployed_by_year_a: BTreeMap<i32, u32>,
    pub deployed_by_year_b: BTreeMap<i32, u32>,
    pub failures_by_year: BTreeMap<i32, u32>,

    pub cumulative_launches: u64,
    pub cumulative_failures: u64,
}

impl FleetState {
    #[must_use]
    pub fn class_a_total(&self) -> u32 {
        self.class_a_low + self.class_a_mid + self.class_a_sun_sync
    }

    #[must_use]
    pub fn satellites_total(&self) -> u32 {
        self.class_a_total() + self.class_b
    }

    /// Deployments recorded for `year`, Class A.
    #[must_use]
    pub fn deployed_a_in(&self, year: i32) -> u32 {
        self.deployed_by_year_a.get(&year).copied().unwrap_or(0)
    }

    /// Deployments recorded for `year`, Class B.
    #[must_use]
    pub fn deployed_b_in(&self, year: i32) -> u32 {
        self.deployed_by_year_b.get(&year).copied().unwrap_or(0)
    }

    pub fn record_failure(&mut self, year: i32, count: u32) {
        if count == 0 {
            return;
        }
        *self.failures_by_year.entry(year).or_insert(0) += count;
        self.cumulative_failures += u64::from(count);
    }

    pub fn record_deployment_a(&mut self, year: i32, low: u32, mid: u32, sso: u32) {
        let total = low + mid + sso;
        if total == 0 {
            return;
        }
        *self.deployed_by_year_a.entry(year).or_insert(0) += total;
        self.cumulative_launches += u64::from(total);
        self.class_a_low += low;
        self.class_a_mid += mid;
        self.class_a_sun_sync += sso;
    }

    pub fn record_deployment_b(&mut self, year: i32, count: u32) {
        if count == 0 {
            return;
        }
        *self.deployed_by_year_b.entry(year).or_insert(0) += count;
        self.cumulative_launches += u64::from(count);
        self.class_b += count;
    }
}

/// Per-tick result returned by the kernel to external collaborators.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YearDeploymentResult {
    pub year: i32,

    pub new_class_a_low: u32,
    pub new_class_a_mid: u32,
    pub new_class_a_sun_sync: u32,
    pub new_class_b: u32,

    pub retired_class_a: u32,
    pub retired_class_b: u32,

    pub class_a_bus: BusDesign,
    pub class_b_bus: Option<BusDesign>,

    pub dominant_constraint: DominantConstraint,

    pub compute_exportable_flops: f64,

    pub physics: PhysicsState,
}

/// The binding constraint identified by the solver: `argmin(heat, backhaul,
/// maintenance, autonomy)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DominantConstraint {
    Heat,
    Backhaul,
    Maintenance,
    Autonomy,
}
