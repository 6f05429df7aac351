//! Distributes new Class-A satellites across orbital shells per strategy,
//! and fires scheduled retirements from the deployment ledgers.

use ocse_types::{ComputeStrategy, FleetState, OrbitShell};

use crate::tech_curves::orbit_allocation;

/// New Class-A satellites split across shells: low-LEO, mid-LEO, and
/// sun-synchronous. The sun-sync count absorbs rounding so the three sum
/// exactly to `new_a`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShellAllocation {
    pub low: u32,
    pub mid: u32,
    pub sun_sync: u32,
}

#[must_use]
pub fn allocate_class_a(new_a: u32, strategy: ComputeStrategy) -> ShellAllocation {
    let shares = orbit_allocation(strategy);
    let alpha_low = shares
        .iter()
        .find(|(shell, _)| *shell == OrbitShell::LowLeo)
        .map_or(0.0, |(_, v)| *v);
    let alpha_mid = shares
        .iter()
        .find(|(shell, _)| *shell == OrbitShell::MidLeo)
        .map_or(0.0, |(_, v)| *v);

    let low = (f64::from(new_a) * alpha_low).round() as u32;
    let mid = (f64::from(new_a) * alpha_mid).round() as u32;
    let sun_sync = new_a.saturating_sub(low).saturating_sub(mid);

    ShellAllocation { low, mid, sun_sync }
}

/// Scheduled retirements for both classes this year, read back from the
/// deployment ledger at `year - lifetime`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Retirements {
    pub class_a: u32,
    pub class_b: u32,
    pub class_a_low: u32,
    pub class_a_mid: u32,
    pub class_a_sun_sync: u32,
}

/// `retiredA(year) = deployedByYear_A[year - lifetimeA] or 0`; shell
/// retirements allocated proportionally to current per-shell occupancy.
#[must_use]
pub fn compute_retirements(
    fleet: &FleetState,
    year: i32,
    lifetime_a_years: i32,
    lifetime_b_years: i32,
) -> Retirements {
    let class_a = fleet
        .deployed_by_year_a
        .get(&(year - lifetime_a_years))
        .copied()
        .unwrap_or(0)
        .min(fleet.class_a_total());
    let class_b = fleet
        .deployed_by_year_b
        .get(&(year - lifetime_b_years))
        .copied()
        .unwrap_or(0)
        .min(fleet.class_b);

    let total_a = fleet.class_a_total();
    let (class_a_low, class_a_mid, class_a_sun_sync) = if total_a == 0 {
        (0, 0, 0)
    } else {
        let low = (f64::from(class_a) * f64::from(fleet.class_a_low) / f64::from(total_a)).round()
            as u32;
        let mid = (f64::from(class_a) * f64::from(fleet.class_a_mid) / f64::from(total_a)).round()
            as u32;
        let sso = class_a.saturating_sub(low).saturating_sub(mid);
        (low.min(fleet.class_a_low), mid.min(fleet.class_a_mid), sso.min(fleet.class_a_sun_sync))
    };

    Retirements {
        class_a,
        class_b,
        class_a_low,
        class_a_mid,
        class_a_sun_sync,
    }
}

/// Apply retirements to a fleet snapshot, decrementing per-shell counts.
pub fn apply_retirements(fleet: &mut FleetState, retirements: &Retirements) {
    fleet.class_a_low = fleet.class_a_low.saturating_sub(retirements.class_a_low);
    fleet.class_a_mid = fleet.class_a_mid.saturating_sub(retirements.class_a_mid);
    fleet.class_a_sun_sync = fleet
        .class_a_sun_sync
        .saturating_sub(retirements.class_a_sun_sync);
    fleet.class_b = fleet.class_b.saturating_sub(retirements.class_b);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_a_allocation_sums_to_input() {
        for strategy in [
            ComputeStrategy::Latency,
            ComputeStrategy::Cost,
            ComputeStrategy::Carbon,
            ComputeStrategy::Balanced,
        ] {
            let allocation = allocate_class_a(137, strategy);
            assert_eq!(allocation.low + allocation.mid + allocation.sun_sync, 137);
        }
    }

    #[test]
    fn retirements_read_back_deploy_year_minus_lifetime() {
        let mut fleet = FleetState::default();
        fleet.record_deployment_a(2025, 10, 5, 5);
        let retirements = compute_retirements(&fleet, 2035, 10, 12);
        assert_eq!(retirements.class_a, 20);
        assert_eq!(
            retirements.class_a_low + retirements.class_a_mid + retirements.class_a_sun_sync,
            20
        );
    }

    #[test]
    fn no_retirement_before_lifetime_elapses() {
        let mut fleet = FleetState::default();
        fleet.record_deployment_a(2025, 10, 5, 5);
        let retirements = compute_retirements(&fleet, 2030, 10, 12);
        assert_eq!(retirements.class_a, 0);
    }
}
