//! CLI entry point for the Orbital Compute Simulation Engine reference
//! runner: `(scenarioMode, startYear, endYear, strategyByYear, overrides?)
//! -> debug store`, the external interface the kernel specifies (spec
//! section 6), exposed as three subcommands.

mod config;
mod format;

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use ocse_core::run;
use ocse_types::{PhysicsOverrides, ScenarioMode};

use config::PlanFile;

#[derive(Debug, Parser)]
#[command(name = "ocse", version, about = "Orbital Compute Simulation Engine")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run one scenario over a year range and print/export the resulting
    /// per-year debug series.
    Run(RunArgs),
    /// Run all three scenario modes over the same plan and compare them at
    /// one year.
    Compare(CompareArgs),
    /// Run one scenario and export the full canonical debug store as JSON.
    Export(ExportArgs),
}

#[derive(Debug, Parser)]
struct RunArgs {
    /// Scenario mode: baseline, orbital_bull, orbital_bear.
    #[arg(long, default_value = "baseline")]
    scenario: String,

    #[arg(long)]
    start_year: i32,

    #[arg(long)]
    end_year: i32,

    /// Compute strategy applied to every year not covered by --plan:
    /// latency, cost, carbon, balanced.
    #[arg(long, default_value = "balanced")]
    compute_strategy: String,

    /// Launch strategy applied to every year not covered by --plan: heavy,
    /// medium, light.
    #[arg(long, default_value = "medium")]
    launch_strategy: String,

    #[arg(long, default_value_t = 1.0)]
    deployment_intensity: f64,

    /// TOML plan file (see `PlanFile`); overrides the flags above per year.
    #[arg(long)]
    plan: Option<PathBuf>,

    /// Sandbox physics override as `key=value`, may be repeated.
    #[arg(long = "override", value_name = "KEY=VALUE")]
    overrides: Vec<String>,

    /// Also show the representative bus mass breakdown for the final year.
    #[arg(long)]
    mass_breakdown: bool,
}

#[derive(Debug, Parser)]
struct CompareArgs {
    #[arg(long)]
    year: i32,

    #[arg(long, default_value_t = 2025)]
    start_year: i32,

    #[arg(long, default_value = "balanced")]
    compute_strategy: String,

    #[arg(long, default_value = "medium")]
    launch_strategy: String,

    #[arg(long, default_value_t = 1.0)]
    deployment_intensity: f64,

    #[arg(long)]
    plan: Option<PathBuf>,
}

#[derive(Debug, Parser)]
struct ExportArgs {
    #[arg(long, default_value = "baseline")]
    scenario: String,

    #[arg(long)]
    start_year: i32,

    #[arg(long)]
    end_year: i32,

    #[arg(long, default_value = "balanced")]
    compute_strategy: String,

    #[arg(long, default_value = "medium")]
    launch_strategy: String,

    #[arg(long, default_value_t = 1.0)]
    deployment_intensity: f64,

    #[arg(long)]
    plan: Option<PathBuf>,

    #[arg(long = "override", value_name = "KEY=VALUE")]
    overrides: Vec<String>,

    /// Output path for the exported JSON document.
    #[arg(long)]
    out: PathBuf,
}

fn parse_scenario_mode(raw: &str) -> Result<ScenarioMode> {
    match raw.to_lowercase().replace('-', "_").as_str() {
        "baseline" => Ok(ScenarioMode::Baseline),
        "orbital_bull" | "bull" => Ok(ScenarioMode::OrbitalBull),
        "orbital_bear" | "bear" => Ok(ScenarioMode::OrbitalBear),
        other => anyhow::bail!(
            "unknown scenario mode '{other}'; expected baseline, orbital_bull, or orbital_bear"
        ),
    }
}

/// Build a plan file from either `--plan <path>` or the flat `--compute-
/// strategy`/`--launch-strategy`/`--deployment-intensity` flags, so every
/// subcommand accepts the same two ways of describing a run.
fn resolve_plan(
    plan_path: Option<&PathBuf>,
    compute_strategy: &str,
    launch_strategy: &str,
    deployment_intensity: f64,
) -> Result<PlanFile> {
    if let Some(path) = plan_path {
        PlanFile::from_path(path)
    } else {
        let toml = format!(
            "[default]\ncompute_strategy = \"{compute_strategy}\"\nlaunch_strategy = \"{launch_strategy}\"\ndeployment_intensity = {deployment_intensity}\n"
        );
        toml::from_str(&toml).context("failed to build plan from CLI flags")
    }
}

fn merged_overrides(plan: &PlanFile, flag_overrides: &[String]) -> Result<PhysicsOverrides> {
    let mut map = plan.overrides.clone();
    map.extend(config::parse_override_flags(flag_overrides)?);
    Ok(PhysicsOverrides::from_map(&map))
}

fn run_command(args: RunArgs) -> Result<()> {
    if args.end_year < args.start_year {
        anyhow::bail!("--end-year must be >= --start-year");
    }
    let scenario_mode = parse_scenario_mode(&args.scenario)?;
    let plan = resolve_plan(
        args.plan.as_ref(),
        &args.compute_strategy,
        &args.launch_strategy,
        args.deployment_intensity,
    )?;
    let strategy_by_year = plan.strategy_by_year(args.start_year, args.end_year);
    let overrides = merged_overrides(&plan, &args.overrides)?;

    let outcome = run(
        scenario_mode,
        args.start_year,
        args.end_year,
        &strategy_by_year,
        Some(&overrides),
    )?;

    for warning in &outcome.warnings {
        tracing::warn!(%warning, "recoverable condition during run");
        eprintln!("warning: {warning}");
    }

    let entries: Vec<_> = outcome.store.scenario_entries(scenario_mode).collect();
    println!("{}", format::format_year_series(&entries));

    if args.mass_breakdown {
        if let Some(last) = entries.last() {
            println!("\nMass breakdown ({}):", last.year);
            println!("{}", format::format_mass_breakdown(last));
        }
    }

    Ok(())
}

fn compare_command(args: CompareArgs) -> Result<()> {
    if args.year < args.start_year {
        anyhow::bail!("--year must be >= --start-year");
    }
    let plan = resolve_plan(
        args.plan.as_ref(),
        &args.compute_strategy,
        &args.launch_strategy,
        args.deployment_intensity,
    )?;
    let strategy_by_year = plan.strategy_by_year(args.start_year, args.year);
    let overrides = plan.physics_overrides();

    let modes = [
        ("BASELINE", ScenarioMode::Baseline),
        ("ORBITAL_BULL", ScenarioMode::OrbitalBull),
        ("ORBITAL_BEAR", ScenarioMode::OrbitalBear),
    ];

    let mut outcomes = Vec::new();
    for (label, mode) in modes {
        let outcome = run(mode, args.start_year, args.year, &strategy_by_year, Some(&overrides))?;
        outcomes.push((label, mode, outcome));
    }

    let rows: Vec<(&str, Option<&ocse_types::DebugEntry>)> = outcomes
        .iter()
        .map(|(label, mode, outcome)| (*label, outcome.store.get(*mode, args.year)))
        .collect();

    println!("{}", format::format_scenario_comparison(args.year, &rows));
    Ok(())
}

fn export_command(args: ExportArgs) -> Result<()> {
    if args.end_year < args.start_year {
        anyhow::bail!("--end-year must be >= --start-year");
    }
    let scenario_mode = parse_scenario_mode(&args.scenario)?;
    let plan = resolve_plan(
        args.plan.as_ref(),
        &args.compute_strategy,
        &args.launch_strategy,
        args.deployment_intensity,
    )?;
    let strategy_by_year = plan.strategy_by_year(args.start_year, args.end_year);
    let overrides = merged_overrides(&plan, &args.overrides)?;

    let outcome = run(
        scenario_mode,
        args.start_year,
        args.end_year,
        &strategy_by_year,
        Some(&overrides),
    )?;

    for warning in &outcome.warnings {
        tracing::warn!(%warning, "recoverable condition during run");
        eprintln!("warning: {warning}");
    }

    let json = outcome
        .store
        .export_json()
        .context("failed to serialize debug store")?;
    fs::write(&args.out, json)
        .with_context(|| format!("failed to write export to {}", args.out.display()))?;
    println!("exported {} entries to {}", outcome.store.len(), args.out.display());
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Run(args) => run_command(args),
        Commands::Compare(args) => compare_command(args),
        Commands::Export(args) => export_command(args),
    }
}
