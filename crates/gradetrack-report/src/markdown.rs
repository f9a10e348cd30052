//! Markdown summary output.

use std::path::Path;

use anyhow::{Context, Result};

use crate::dashboard::Dashboard;

/// Format the dashboard as a Markdown summary.
pub fn to_markdown(dashboard: &Dashboard) -> String {
    let mut md = String::new();

    md.push_str("# Grade summary\n\n");

    match &dashboard.overview {
        Some(o) => md.push_str(&format!(
            "**Overview:** {} exams, highest total {}, lowest total {}, average total {:.1}\n\n",
            o.exam_count, o.highest_total, o.lowest_total, o.average_total
        )),
        None => md.push_str("No exams recorded.\n\n"),
    }

    md.push_str("## Subjects\n\n");
    md.push_str("| Subject | Full | Average | Max | Min | Rate |\n");
    md.push_str("|---------|------|---------|-----|-----|------|\n");
    for s in &dashboard.summaries {
        let rate = s
            .rate
            .map(|r| format!("{r:.1}%"))
            .unwrap_or_else(|| "-".to_string());
        md.push_str(&format!(
            "| {} | {} | {:.1} | {} | {} | {} |\n",
            s.subject, s.full_score, s.average, s.max, s.min, rate
        ));
    }
    md.push('\n');

    if !dashboard.trend.is_empty() {
        md.push_str("## Trend\n\n");
        md.push_str("| Date | Exam | Total |\n");
        md.push_str("|------|------|-------|\n");
        for p in &dashboard.trend {
            md.push_str(&format!("| {} | {} | {} |\n", p.date, p.label, p.total));
        }
        md.push('\n');
    }

    if !dashboard.radar.is_empty() {
        md.push_str("## Latest exam profile\n\n");
        for p in &dashboard.radar {
            md.push_str(&format!("- {}: {:.1}%\n", p.subject, p.percentage));
        }
        md.push('\n');
    }

    if !dashboard.goals.is_empty() {
        md.push_str("## Goals\n\n");
        md.push_str("| Subject | Current | Target | Progress |\n");
        md.push_str("|---------|---------|--------|----------|\n");
        for g in &dashboard.goals {
            let mark = if g.achieved() { " (achieved)" } else { "" };
            md.push_str(&format!(
                "| {} | {} | {} | {:.1}%{} |\n",
                dashboard.subject_name(&g.subject_id),
                g.current,
                g.target,
                g.progress_percent,
                mark
            ));
        }
    }

    md
}

/// Write a Markdown summary to a file.
pub fn write_markdown_report(dashboard: &Dashboard, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, to_markdown(dashboard))
        .with_context(|| format!("failed to write markdown to {}", path.display()))
}
