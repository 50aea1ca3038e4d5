//! System status command.

use anyhow::Result;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;

use answerdesk_types::config::TableNames;
use answerdesk_types::view::StatusReport;

use crate::state::AppState;

/// Display counts, vocabulary and naming problems of the base.
pub async fn status(state: &AppState, json: bool, quiet: bool) -> Result<()> {
    let report = state.answer_service.status().await?;

    if json {
        let status = serde_json::json!({
            "version": env!("CARGO_PKG_VERSION"),
            "backend": state.backend.to_string(),
            "data_dir": state.data_dir.display().to_string(),
            "tables": state.config.tables,
            "report": report,
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }
    if quiet {
        return Ok(());
    }

    println!();
    println!(
        "  {} answerdesk v{}",
        style("⚡").bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!("  {}", style(&state.backend).dim());
    println!();
    println!("{}", counts_table(&report, &state.config.tables));
    println!();

    println!("  {}", style("── Robotic systems ──").dim());
    println!("  {}", report.robotic_systems.join(", "));
    println!();

    print_duplicates("Companies", &report.duplicate_company_names);
    print_duplicates("Robots", &report.duplicate_robot_names);

    println!("  {}", style("── System ──").dim());
    println!("  Data dir: {}", style(state.data_dir.display()).dim());
    println!();

    Ok(())
}

/// Counts per table, labelled with the configured table names.
fn counts_table(report: &StatusReport, names: &TableNames) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Table").fg(Color::White),
        Cell::new("Records").fg(Color::White),
        Cell::new("Note").fg(Color::White),
    ]);

    let open = Cell::new(format!("{} unanswered", report.unanswered));
    table.add_row(vec![
        Cell::new(&names.questions),
        Cell::new(report.total_questions),
        if report.unanswered > 0 { open.fg(Color::Yellow) } else { open.fg(Color::Green) },
    ]);
    table.add_row(vec![
        Cell::new(&names.companies),
        Cell::new(report.companies),
        Cell::new(format!("{} with questions", report.companies_with_questions)),
    ]);
    table.add_row(vec![
        Cell::new(&names.robots),
        Cell::new(report.robots),
        Cell::new(format!("{} systems", report.robotic_systems.len())),
    ]);
    table
}

fn print_duplicates(label: &str, names: &[String]) {
    if names.is_empty() {
        return;
    }
    println!(
        "  {} {}",
        style("── Duplicate names:").dim(),
        style(label).dim()
    );
    for name in names {
        println!(
            "  {} {} {}",
            style("!").yellow().bold(),
            name,
            style("(selecting by name links the first match)").dim()
        );
    }
    println!();
}
