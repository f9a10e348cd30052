//! The `gradetrack report` command.

use std::path::Path;

use anyhow::Result;

use gradetrack_report::html::write_html_report;
use gradetrack_report::markdown::write_markdown_report;
use gradetrack_report::Dashboard;

use super::Workspace;

pub fn execute(ws: &Workspace, output: &Path, format: &str) -> Result<()> {
    let store = ws.exams()?;
    let goals = ws.goals()?;
    let dashboard = Dashboard::build(&ws.catalog, store.list(), &goals);

    match format {
        "html" => write_html_report(&dashboard, output)?,
        "markdown" | "md" => write_markdown_report(&dashboard, output)?,
        "json" => dashboard.save_json(output)?,
        other => anyhow::bail!("unknown report format: {other} (expected html, markdown, json)"),
    }

    println!("Report written to {}", output.display());
    Ok(())
}
