//! The `gradetrack trend` command.

use anyhow::Result;
use comfy_table::{Cell, Table};

use gradetrack_core::trend::{build_series, subject_series};

use super::Workspace;

pub fn execute(ws: &Workspace, subject: Option<&str>) -> Result<()> {
    let store = ws.exams()?;

    if let Some(subject_id) = subject {
        let subject = ws.catalog.require(subject_id)?;
        let series = subject_series(&ws.catalog, store.list(), &subject.id).unwrap_or_default();

        let mut table = Table::new();
        table.set_header(vec!["Date".to_string(), subject.name.clone()]);
        for (date, value) in series {
            table.add_row(vec![Cell::new(date), Cell::new(value)]);
        }
        println!("{table}");
        return Ok(());
    }

    let series = build_series(&ws.catalog, store.list());
    if series.is_empty() {
        println!("No exams recorded.");
        return Ok(());
    }

    let mut table = Table::new();
    let mut header = vec!["Date".to_string(), "Exam".to_string(), "Total".to_string()];
    header.extend(ws.catalog.iter().map(|s| s.name.clone()));
    table.set_header(header);

    for point in &series {
        let mut row = vec![
            Cell::new(point.date),
            Cell::new(&point.label),
            Cell::new(point.total),
        ];
        row.extend(point.values.iter().map(|(_, v)| Cell::new(v)));
        table.add_row(row);
    }

    println!("{table}");
    Ok(())
}
