//! Year-step kernel for the Orbital Compute Simulation Engine: ten pure-ish
//! stages folded by [`runner::run`] into an append-only [`debug_store::DebugStore`].
//!
//! Every stage module is a pure function of its inputs except where it
//! explicitly documents persistent state (`FleetState`, `PhysicsState`,
//! `EconomicsState`, all owned by the runner). No stage suspends mid-tick;
//! the pipeline order below is the only order the kernel ever runs in:
//! tech curves -> bus designer -> launch gate -> orbit allocator ->
//! constraint solver -> physics step -> congestion -> economics -> debug
//! entry assembly and validation.

pub mod bus_designer;
pub mod congestion;
pub mod constraints;
pub mod debug_store;
pub mod economics;
pub mod launch_gate;
pub mod orbit_allocator;
pub mod physics_step;
pub mod runner;
pub mod tech_curves;
pub mod validate;

pub use bus_designer::{design_bus, BusDesignInputs};
pub use congestion::{assess_congestion, CongestionInputs, CongestionResult};
pub use constraints::{solve_constraints, ConstraintInputs, ConstraintResult};
pub use debug_store::{DebugExportView, DebugStore};
pub use economics::{step_economics, total_demand_pflops, EconomicsInputs, EconomicsResult, EconomicsState};
pub use launch_gate::{admit_launches, AdmittedLaunches, LaunchRequest};
pub use orbit_allocator::{allocate_class_a, compute_retirements, Retirements, ShellAllocation};
pub use physics_step::{step_physics, PhysicsStepInputs, PhysicsStepResult};
pub use runner::{run, run_from, step_year, RunOutcome, RunnerState};
pub use validate::{validate_entry, validate_monotonic_series};
