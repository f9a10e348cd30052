//! The `gradetrack goal` commands.

use anyhow::Result;
use comfy_table::{Cell, Color, Table};

use gradetrack_core::goals::progress_all;
use gradetrack_core::radar::latest_exam;

use super::Workspace;

pub fn set(ws: &Workspace, subject_id: &str, target: f64) -> Result<()> {
    let subject = ws.catalog.require(subject_id)?;
    if !(0.0..=subject.full_score).contains(&target) {
        tracing::warn!(
            "goal {target} for {} is outside 0..={}",
            subject.id,
            subject.full_score
        );
    }

    let mut goals = ws.goals()?;
    goals.set(subject.id.clone(), target)?;
    ws.save_goals(&goals)?;
    println!("Goal for {} set to {target}", subject.name);
    Ok(())
}

pub fn clear(ws: &Workspace, subject_id: &str) -> Result<()> {
    let subject = ws.catalog.require(subject_id)?;
    let mut goals = ws.goals()?;
    match goals.clear(&subject.id) {
        Some(previous) => {
            ws.save_goals(&goals)?;
            println!("Cleared goal for {} (was {previous})", subject.name);
        }
        None => println!("No goal set for {}", subject.name),
    }
    Ok(())
}

pub fn show(ws: &Workspace) -> Result<()> {
    let goals = ws.goals()?;
    if goals.is_empty() {
        println!("No goals set. Add one with `gradetrack goal set <subject> <target>`.");
        return Ok(());
    }

    let store = ws.exams()?;
    let Some(latest) = latest_exam(store.list()) else {
        println!("No exams recorded; progress is measured against the latest exam.");
        return Ok(());
    };
    println!("Progress against {} ({})", latest.name, latest.date);

    let mut table = Table::new();
    table.set_header(vec!["Subject", "Current", "Target", "Progress", ""]);
    for progress in progress_all(&ws.catalog, &goals, store.list()) {
        let name = ws
            .catalog
            .get(&progress.subject_id)
            .map(|s| s.name.as_str())
            .unwrap_or(progress.subject_id.as_str());
        let status = if progress.achieved() {
            Cell::new("achieved").fg(Color::Green)
        } else {
            Cell::new("")
        };
        table.add_row(vec![
            Cell::new(name),
            Cell::new(progress.current),
            Cell::new(progress.target),
            Cell::new(format!("{:.1}%", progress.progress_percent)),
            status,
        ]);
    }

    println!("{table}");
    Ok(())
}
