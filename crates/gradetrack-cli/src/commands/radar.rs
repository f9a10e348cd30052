//! The `gradetrack radar` command.

use anyhow::Result;
use comfy_table::{Cell, Table};

use gradetrack_core::radar::{build_profile, latest_exam};
use gradetrack_core::statistics::RateBand;

use super::exams::band_color;
use super::Workspace;

pub fn execute(ws: &Workspace) -> Result<()> {
    let store = ws.exams()?;

    let Some(latest) = latest_exam(store.list()) else {
        println!("No exams recorded.");
        return Ok(());
    };
    println!("Latest exam: {} ({})", latest.name, latest.date);

    let mut table = Table::new();
    table.set_header(vec!["Subject", "Score rate", "Full mark"]);
    for point in build_profile(&ws.catalog, store.list()) {
        table.add_row(vec![
            Cell::new(&point.subject),
            Cell::new(format!("{:.1}%", point.percentage))
                .fg(band_color(RateBand::classify(point.percentage))),
            Cell::new(point.full_mark),
        ]);
    }

    println!("{table}");
    Ok(())
}
