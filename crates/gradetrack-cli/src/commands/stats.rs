//! The `gradetrack stats` command.

use anyhow::Result;
use comfy_table::{Cell, Table};

use gradetrack_core::statistics::{exam_overview, subject_summaries, RateBand};

use super::exams::band_color;
use super::Workspace;

pub fn execute(ws: &Workspace) -> Result<()> {
    let store = ws.exams()?;

    let Some(overview) = exam_overview(store.list()) else {
        println!("No exams recorded. Add one with `gradetrack add`.");
        return Ok(());
    };

    println!(
        "Exams: {} | Highest total: {} | Lowest total: {} | Average total: {:.1}",
        overview.exam_count, overview.highest_total, overview.lowest_total, overview.average_total
    );

    let mut table = Table::new();
    table.set_header(vec!["Subject", "Full", "Average", "Max", "Min", "Rate"]);

    for summary in subject_summaries(&ws.catalog, store.list()) {
        let rate = match summary.rate {
            Some(r) => Cell::new(format!("{r:.1}%")).fg(band_color(RateBand::classify(r))),
            None => Cell::new("-"),
        };
        table.add_row(vec![
            Cell::new(&summary.subject),
            Cell::new(summary.full_score),
            Cell::new(format!("{:.1}", summary.average)),
            Cell::new(summary.max),
            Cell::new(summary.min),
            rate,
        ]);
    }

    println!("{table}");
    Ok(())
}
