//! TOML configuration for multi-year plans and physics overrides.
//!
//! Mirrors the shape of a year-by-year strategy file: a default posture for
//! the whole run plus an optional list of per-year overrides, so a strategy
//! change mid-run (spec scenario 5: LATENCY/light through 2030, then
//! CARBON/medium) can be expressed without one TOML block per year.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use ocse_types::{ComputeStrategy, LaunchStrategy, PhysicsOverrides, YearPlan};
use serde::Deserialize;

/// Root structure of a `--plan` TOML file.
#[derive(Debug, Clone, Deserialize)]
pub struct PlanFile {
    /// Posture applied to every simulated year unless overridden below.
    #[serde(default)]
    pub default: PlanEntry,

    /// Year-specific overrides; a year not listed here uses `default`.
    #[serde(default, rename = "year")]
    pub years: Vec<YearOverride>,

    /// Sandbox physics overrides, applied uniformly across the run.
    #[serde(default)]
    pub overrides: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlanEntry {
    #[serde(default = "default_compute_strategy")]
    pub compute_strategy: String,
    #[serde(default = "default_launch_strategy")]
    pub launch_strategy: String,
    #[serde(default = "default_deployment_intensity")]
    pub deployment_intensity: f64,
}

impl Default for PlanEntry {
    fn default() -> Self {
        Self {
            compute_strategy: default_compute_strategy(),
            launch_strategy: default_launch_strategy(),
            deployment_intensity: default_deployment_intensity(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct YearOverride {
    pub year: i32,
    #[serde(flatten)]
    pub entry: PlanEntry,
}

fn default_compute_strategy() -> String {
    "balanced".to_string()
}

fn default_launch_strategy() -> String {
    "medium".to_string()
}

fn default_deployment_intensity() -> f64 {
    1.0
}

/// Parse a compute-strategy name, case-insensitively. Unknown names fall
/// back to BALANCED; this mirrors the kernel's own tolerance of a missing
/// or unrecognized per-year plan (spec section 7: recoverable, not fatal).
#[must_use]
pub fn parse_compute_strategy(raw: &str) -> ComputeStrategy {
    match raw.to_lowercase().as_str() {
        "latency" => ComputeStrategy::Latency,
        "cost" => ComputeStrategy::Cost,
        "carbon" => ComputeStrategy::Carbon,
        _ => ComputeStrategy::Balanced,
    }
}

#[must_use]
pub fn parse_launch_strategy(raw: &str) -> LaunchStrategy {
    match raw.to_lowercase().as_str() {
        "heavy" => LaunchStrategy::Heavy,
        "light" => LaunchStrategy::Light,
        _ => LaunchStrategy::Medium,
    }
}

impl PlanEntry {
    #[must_use]
    pub fn to_year_plan(&self) -> YearPlan {
        YearPlan::new(
            parse_compute_strategy(&self.compute_strategy),
            parse_launch_strategy(&self.launch_strategy),
            self.deployment_intensity,
        )
    }
}

impl PlanFile {
    /// Load and parse a plan file from disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read plan file: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("failed to parse plan TOML: {}", path.display()))
    }

    /// Expand into a `year -> YearPlan` map for `[start_year, end_year]`,
    /// applying `default` to every year and then layering year-specific
    /// overrides on top.
    #[must_use]
    pub fn strategy_by_year(&self, start_year: i32, end_year: i32) -> BTreeMap<i32, YearPlan> {
        let mut map: BTreeMap<i32, YearPlan> = (start_year..=end_year)
            .map(|year| (year, self.default.to_year_plan()))
            .collect();
        for year_override in &self.years {
            if year_override.year >= start_year && year_override.year <= end_year {
                map.insert(year_override.year, year_override.entry.to_year_plan());
            }
        }
        map
    }

    #[must_use]
    pub fn physics_overrides(&self) -> PhysicsOverrides {
        PhysicsOverrides::from_map(&self.overrides)
    }
}

/// Parse `key=value` strings from `--override` flags into the map
/// [`PhysicsOverrides::from_map`] expects. Entries that don't parse as
/// `key=<f64>` are rejected up front rather than silently ignored, since
/// they're operator typos rather than the kernel's own unknown-key
/// tolerance (which only applies to recognized-vs-unrecognized keys).
pub fn parse_override_flags(flags: &[String]) -> Result<BTreeMap<String, f64>> {
    let mut map = BTreeMap::new();
    for flag in flags {
        let (key, value) = flag
            .split_once('=')
            .with_context(|| format!("override '{flag}' is not in key=value form"))?;
        let value: f64 = value
            .parse()
            .with_context(|| format!("override '{flag}' has a non-numeric value"))?;
        map.insert(key.to_string(), value);
    }
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_plan_entry_is_balanced_medium() {
        let entry = PlanEntry::default();
        assert_eq!(parse_compute_strategy(&entry.compute_strategy), ComputeStrategy::Balanced);
        assert_eq!(parse_launch_strategy(&entry.launch_strategy), LaunchStrategy::Medium);
    }

    #[test]
    fn unknown_strategy_name_falls_back_to_balanced() {
        assert_eq!(parse_compute_strategy("not_a_real_strategy"), ComputeStrategy::Balanced);
    }

    #[test]
    fn strategy_by_year_applies_default_then_layers_overrides() {
        let toml = r#"
            [default]
            compute_strategy = "latency"
            launch_strategy = "light"

            [[year]]
            year = 2031
            compute_strategy = "carbon"
            launch_strategy = "medium"
        "#;
        let plan: PlanFile = toml::from_str(toml).unwrap();
        let by_year = plan.strategy_by_year(2025, 2032);
        assert_eq!(by_year[&2025].compute_strategy, ComputeStrategy::Latency);
        assert_eq!(by_year[&2030].compute_strategy, ComputeStrategy::Latency);
        assert_eq!(by_year[&2031].compute_strategy, ComputeStrategy::Carbon);
        assert_eq!(by_year[&2032].compute_strategy, ComputeStrategy::Latency);
    }

    #[test]
    fn override_flags_parse_key_value_pairs() {
        let flags = vec!["busPowerKw=500".to_string(), "emissivity=0.85".to_string()];
        let map = parse_override_flags(&flags).unwrap();
        assert_eq!(map.get("busPowerKw"), Some(&500.0));
        assert_eq!(map.get("emissivity"), Some(&0.85));
    }

    #[test]
    fn malformed_override_flag_is_rejected() {
        let flags = vec!["not-a-kv-pair".to_string()];
        assert!(parse_override_flags(&flags).is_err());
    }

    #[test]
    fn plan_file_loads_from_disk() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
            [default]
            compute_strategy = "cost"
            launch_strategy = "heavy"

            [overrides]
            emissivity = 0.9
            "#
        )
        .unwrap();

        let plan = PlanFile::from_path(file.path()).unwrap();
        assert_eq!(plan.default.compute_strategy, "cost");
        assert_eq!(plan.overrides.get("emissivity"), Some(&0.9));
    }
}
