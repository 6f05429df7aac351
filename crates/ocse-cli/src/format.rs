//! Table rendering for `ocse run` / `ocse compare` output, in the same
//! comfy-table style the strategy simulator uses for its results tables.

use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};
use ocse_types::DebugEntry;

fn base_table(headers: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(headers);
    table
}

fn right(value: impl ToString) -> Cell {
    Cell::new(value.to_string()).set_alignment(CellAlignment::Right)
}

/// One row per simulated year for a single scenario: fleet, compute,
/// survival, and the headline blended economics/carbon figures.
#[must_use]
pub fn format_year_series(entries: &[&DebugEntry]) -> String {
    let mut table = base_table(vec![
        "Year",
        "Sats",
        "Compute (PFLOP/s)",
        "Survival",
        "Orbit Share",
        "Blended $/PFLOP",
        "Carbon g/kWh",
        "Constraint",
    ]);

    for entry in entries {
        table.add_row(vec![
            right(entry.year),
            right(entry.satellites_total),
            right(format!("{:.2}", entry.compute_exportable_flops / 1.0e15)),
            right(format!("{:.3}", entry.survival_fraction)),
            right(format!("{:.1}%", entry.orbit_compute_share * 100.0)),
            right(format!("{:.0}", entry.cost_per_compute_blended)),
            right(format!("{:.1}", entry.carbon_intensity_blended_g_per_kwh)),
            Cell::new(format!("{:?}", entry.diagnostics.dominant_constraint)),
        ]);
    }
    table.to_string()
}

/// Side-by-side comparison of the three scenario modes at a single year,
/// for the `ocse compare` command.
#[must_use]
pub fn format_scenario_comparison(year: i32, rows: &[(&str, Option<&DebugEntry>)]) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new(format!("Year {year}")),
            Cell::new("Sats"),
            Cell::new("Compute (PFLOP/s)"),
            Cell::new("Survival"),
            Cell::new("Orbit Share"),
            Cell::new("Blended $/PFLOP"),
            Cell::new("Carbon g/kWh"),
        ]);

    for (label, maybe_entry) in rows {
        match maybe_entry {
            Some(entry) => {
                table.add_row(vec![
                    Cell::new(*label),
                    right(entry.satellites_total),
                    right(format!("{:.2}", entry.compute_exportable_flops / 1.0e15)),
                    right(format!("{:.3}", entry.survival_fraction)),
                    right(format!("{:.1}%", entry.orbit_compute_share * 100.0)),
                    right(format!("{:.0}", entry.cost_per_compute_blended)),
                    right(format!("{:.1}", entry.carbon_intensity_blended_g_per_kwh)),
                ]);
            }
            None => {
                table.add_row(vec![
                    Cell::new(*label),
                    Cell::new("no entry"),
                    Cell::new(""),
                    Cell::new(""),
                    Cell::new(""),
                    Cell::new(""),
                    Cell::new(""),
                ]);
            }
        }
    }
    table.to_string()
}

/// Mass breakdown for a single year's representative bus design.
#[must_use]
pub fn format_mass_breakdown(entry: &DebugEntry) -> String {
    let mut table = base_table(vec!["Component", "Mass (kg)"]);
    let rows: [(&str, f64); 11] = [
        ("Silicon", entry.mass_silicon_kg),
        ("Radiator", entry.mass_radiator_kg),
        ("Solar array", entry.mass_solar_array_kg),
        ("Shielding", entry.mass_shielding_kg),
        ("Power electronics", entry.mass_power_electronics_kg),
        ("Avionics", entry.mass_avionics_kg),
        ("ADCS", entry.mass_adcs_kg),
        ("Battery", entry.mass_battery_kg),
        ("Propulsion", entry.mass_propulsion_kg),
        ("Structure", entry.mass_structure_kg),
        ("Other", entry.mass_other_kg),
    ];
    for (name, kg) in rows {
        table.add_row(vec![Cell::new(name), right(format!("{kg:.1}"))]);
    }
    table.add_row(vec![Cell::new("Total"), right(format!("{:.1}", entry.bus_total_mass_kg))]);
    table.to_string()
}
