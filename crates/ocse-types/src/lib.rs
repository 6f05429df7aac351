pub mod bus;
pub mod debug_entry;
pub mod error;
pub mod fleet;
pub mod physics;
pub mod plan;
pub mod scenario;

pub use bus::{BusDesign, MassBreakdown, SatelliteClass};
pub use debug_entry::{DebugEntry, ScenarioDiagnostics};
pub use error::OcseError;
pub use fleet::{DominantConstraint, FleetState, OrbitShell, YearDeploymentResult};
pub use physics::{PhysicsOverrides, PhysicsState, RiskMode, ThermalRegime};
pub use plan::{ComputeStrategy, LaunchStrategy, YearPlan};
pub use scenario::{ScenarioMode, ScenarioParams};
