//! Terminal rendering of a harness report.

use std::time::Duration;

use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, Color, ContentArrangement, Table};

use closest_core::{HarnessReport, VariantReport};

fn millis(duration: Duration) -> String {
    format!("{:.3}", duration.as_secs_f64() * 1e3)
}

fn row(report: &VariantReport) -> Vec<Cell> {
    let speedup = report
        .speedup
        .map_or_else(|| "-".to_string(), |s| format!("{s:.2}x"));
    let verdict = if report.passed {
        Cell::new("PASS").fg(Color::Green)
    } else if report.idempotent {
        Cell::new("FAIL").fg(Color::Red)
    } else {
        Cell::new("FAIL (unstable)").fg(Color::Red)
    };

    vec![
        Cell::new(report.variant),
        Cell::new(millis(report.latency.mean)).set_alignment(CellAlignment::Right),
        Cell::new(millis(report.latency.min)).set_alignment(CellAlignment::Right),
        Cell::new(millis(report.latency.p95)).set_alignment(CellAlignment::Right),
        Cell::new(speedup).set_alignment(CellAlignment::Right),
        Cell::new(format!("{:.2e}", report.comparison.max_abs_diff))
            .set_alignment(CellAlignment::Right),
        Cell::new(report.comparison.mismatches).set_alignment(CellAlignment::Right),
        verdict,
    ]
}

/// Prints the report header, the per-variant table and a summary line.
pub fn print_report(report: &HarnessReport) {
    println!(
        "{} {} points, {} workers, tile {}, {} runs, simd: {:?}",
        "closest".bold(),
        report.points,
        report.engine.workers,
        report.engine.tile_size,
        report.repetitions,
        report.simd_level
    );

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            "Variant",
            "Mean (ms)",
            "Min (ms)",
            "p95 (ms)",
            "Speed-up",
            "Max |diff|",
            "Mismatches",
            "Result",
        ]);
    for variant in &report.variants {
        table.add_row(row(variant));
    }
    println!("{table}");

    let failed: Vec<String> = report
        .variants
        .iter()
        .filter(|variant| !variant.passed)
        .map(|variant| variant.variant.to_string())
        .collect();
    if failed.is_empty() {
        println!("{}", "All variants match the naive baseline.".green().bold());
    } else {
        println!(
            "{} {}",
            "Mismatch against the naive baseline:".red().bold(),
            failed.join(", ")
        );
    }
}
