//! HTML dashboard generator.
//!
//! Produces a self-contained HTML file with all CSS inlined and charts drawn
//! as inline SVG.

use anyhow::Result;
use std::path::Path;

use gradetrack_core::statistics::RateBand;

use crate::dashboard::Dashboard;

/// Escape a string for safe HTML insertion.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Generate an HTML page from a dashboard snapshot.
pub fn generate_html(dashboard: &Dashboard) -> String {
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"zh-CN\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str("<title>gradetrack dashboard</title>\n");
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");

    // Header
    html.push_str("<header>\n");
    html.push_str("<h1>gradetrack dashboard</h1>\n");
    html.push_str(&format!(
        "<p class=\"meta\">{} exams | {} subjects | {}</p>\n",
        dashboard.exams.len(),
        dashboard.subjects.len(),
        dashboard.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    html.push_str("</header>\n");

    if let Some(overview) = &dashboard.overview {
        html.push_str("<section class=\"overview\">\n<h2>Overview</h2>\n");
        html.push_str(&format!(
            "<p>Highest total <strong>{}</strong> | Lowest total <strong>{}</strong> | Average total <strong>{:.1}</strong></p>\n",
            overview.highest_total, overview.lowest_total, overview.average_total
        ));
        html.push_str("</section>\n");
    }

    // Per-subject statistics
    html.push_str("<section class=\"subjects\">\n<h2>Subjects</h2>\n");
    html.push_str("<table class=\"summary\">\n");
    html.push_str("<thead><tr><th>Subject</th><th>Full</th><th>Average</th><th>Max</th><th>Min</th><th>Rate</th></tr></thead>\n");
    html.push_str("<tbody>\n");
    for s in &dashboard.summaries {
        let rate = match s.rate {
            Some(r) => format!(
                "<span class=\"{}\">{:.1}%</span>",
                RateBand::classify(r).label(),
                r
            ),
            None => "-".to_string(),
        };
        html.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{:.1}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            html_escape(&s.subject),
            s.full_score,
            s.average,
            s.max,
            s.min,
            rate
        ));
    }
    html.push_str("</tbody></table>\n");
    let rates: Vec<(&str, f64)> = dashboard
        .summaries
        .iter()
        .map(|s| (s.subject.as_str(), s.rate.unwrap_or(0.0)))
        .collect();
    if !dashboard.exams.is_empty() {
        html.push_str(&generate_bar_chart(&rates));
    }
    html.push_str("</section>\n");

    // Trend of totals
    if dashboard.trend.len() > 1 {
        html.push_str("<section class=\"trend\">\n<h2>Total score trend</h2>\n");
        html.push_str(&generate_trend_chart(dashboard));
        html.push_str("</section>\n");
    }

    // Radar profile as percentage bars
    if !dashboard.radar.is_empty() {
        html.push_str("<section class=\"radar\">\n<h2>Latest exam profile</h2>\n");
        let points: Vec<(&str, f64)> = dashboard
            .radar
            .iter()
            .map(|p| (p.subject.as_str(), p.percentage))
            .collect();
        html.push_str(&generate_bar_chart(&points));
        html.push_str("</section>\n");
    }

    // Goals
    if !dashboard.goals.is_empty() {
        html.push_str("<section class=\"goals\">\n<h2>Goals</h2>\n<table>\n");
        html.push_str("<thead><tr><th>Subject</th><th>Current</th><th>Target</th><th>Progress</th></tr></thead>\n<tbody>\n");
        for g in &dashboard.goals {
            let class = if g.achieved() { "excellent" } else { "" };
            html.push_str(&format!(
                "<tr class=\"{}\"><td>{}</td><td>{}</td><td>{}</td><td><progress max=\"100\" value=\"{}\"></progress> {:.1}%</td></tr>\n",
                class,
                html_escape(dashboard.subject_name(&g.subject_id)),
                g.current,
                g.target,
                g.progress_percent.max(0.0),
                g.progress_percent
            ));
        }
        html.push_str("</tbody></table>\n</section>\n");
    }

    // Exams
    html.push_str("<section class=\"exams\">\n<h2>Exams</h2>\n<table>\n<thead><tr><th>Exam</th><th>Date</th>");
    for (_, name, _) in &dashboard.subjects {
        html.push_str(&format!("<th>{}</th>", html_escape(name)));
    }
    html.push_str("<th>Total</th></tr></thead>\n<tbody>\n");
    for row in &dashboard.exams {
        html.push_str(&format!(
            "<tr><td>{}<div class=\"meta\">{}</div></td><td>{}</td>",
            html_escape(&row.name),
            html_escape(&row.category),
            row.date
        ));
        for cell in &row.cells {
            match cell {
                Some((value, band)) => {
                    html.push_str(&format!("<td class=\"{}\">{}</td>", band.label(), value))
                }
                None => html.push_str("<td class=\"missing\">-</td>"),
            }
        }
        html.push_str(&format!("<td><strong>{}</strong></td></tr>\n", row.total));
    }
    html.push_str("</tbody></table>\n</section>\n");

    // Raw JSON
    html.push_str("<section class=\"raw-data\">\n");
    html.push_str("<details>\n<summary>Raw JSON Data</summary>\n");
    html.push_str("<pre><code>");
    html.push_str(
        &serde_json::to_string_pretty(dashboard)
            .unwrap_or_default()
            .replace('<', "&lt;")
            .replace('>', "&gt;"),
    );
    html.push_str("</code></pre>\n");
    html.push_str("</details>\n</section>\n");

    html.push_str("</body>\n</html>");
    html
}

/// Write an HTML dashboard to a file.
pub fn write_html_report(dashboard: &Dashboard, path: &Path) -> Result<()> {
    let html = generate_html(dashboard);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html)?;
    Ok(())
}

/// Horizontal bars for `(label, percent)` pairs on a 0-100 scale.
fn generate_bar_chart(bars: &[(&str, f64)]) -> String {
    let bar_height = 24;
    let max_width = 400;
    let padding = 8;
    let label_width = 120;

    let total_height = bars.len() * (bar_height + padding) + padding;

    let mut svg = format!(
        "<svg width=\"{}\" height=\"{}\" xmlns=\"http://www.w3.org/2000/svg\">\n",
        label_width + max_width + 60,
        total_height
    );

    for (i, (label, percent)) in bars.iter().enumerate() {
        let y = i * (bar_height + padding) + padding;
        let width = (percent.clamp(0.0, 100.0) / 100.0 * max_width as f64) as usize;

        let color = match RateBand::classify(*percent) {
            RateBand::Excellent => "#22c55e",
            RateBand::Good => "#3b82f6",
            RateBand::Pass => "#eab308",
            RateBand::Fail => "#ef4444",
        };

        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"14\" fill=\"currentColor\" text-anchor=\"end\" dominant-baseline=\"middle\">{}</text>\n",
            label_width - 10,
            y + bar_height / 2,
            html_escape(label)
        ));
        svg.push_str(&format!(
            "  <rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\" rx=\"4\"/>\n",
            label_width, y, width, bar_height, color
        ));
        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"12\" fill=\"currentColor\" dominant-baseline=\"middle\">{:.1}%</text>\n",
            label_width + width + 8,
            y + bar_height / 2,
            percent
        ));
    }

    svg.push_str("</svg>\n");
    svg
}

/// Polyline of total scores over the chronological series.
fn generate_trend_chart(dashboard: &Dashboard) -> String {
    let width = 600.0;
    let height = 240.0;
    let margin = 30.0;

    let totals: Vec<f64> = dashboard.trend.iter().map(|p| p.total).collect();
    let max = totals.iter().copied().fold(0.0, f64::max).max(1.0);
    let step = (width - 2.0 * margin) / (totals.len().saturating_sub(1).max(1)) as f64;

    let mut svg = format!(
        "<svg width=\"{width}\" height=\"{height}\" xmlns=\"http://www.w3.org/2000/svg\">\n"
    );

    let points: Vec<String> = totals
        .iter()
        .enumerate()
        .map(|(i, t)| {
            let x = margin + i as f64 * step;
            let y = height - margin - t / max * (height - 2.0 * margin);
            format!("{x:.1},{y:.1}")
        })
        .collect();
    svg.push_str(&format!(
        "  <polyline points=\"{}\" fill=\"none\" stroke=\"#6366f1\" stroke-width=\"2\"/>\n",
        points.join(" ")
    ));

    for (point, trend) in points.iter().zip(&dashboard.trend) {
        let (x, y) = point.split_once(',').unwrap_or(("0", "0"));
        svg.push_str(&format!(
            "  <circle cx=\"{x}\" cy=\"{y}\" r=\"4\" fill=\"#6366f1\"><title>{} {}: {}</title></circle>\n",
            html_escape(&trend.label),
            trend.date,
            trend.total
        ));
    }

    svg.push_str("</svg>\n");
    svg
}

const CSS: &str = r#"
:root { --bg: #fff; --fg: #1a1a1a; --border: #e5e7eb; }
@media (prefers-color-scheme: dark) {
  :root { --bg: #111827; --fg: #f9fafb; --border: #374151; }
}
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; margin: 0; padding: 2rem; background: var(--bg); color: var(--fg); }
h1, h2 { margin-top: 2rem; }
.meta { color: #6b7280; font-size: 0.8rem; }
table { border-collapse: collapse; width: 100%; margin: 1rem 0; }
th, td { border: 1px solid var(--border); padding: 0.5rem 1rem; text-align: center; }
th { background: var(--border); }
.excellent { color: #16a34a; font-weight: bold; }
.good { color: #2563eb; }
.pass { color: #ca8a04; }
.fail { color: #dc2626; }
.missing { color: #9ca3af; }
pre { overflow-x: auto; padding: 1rem; background: var(--border); border-radius: 8px; }
code { font-family: 'JetBrains Mono', 'Fira Code', monospace; font-size: 0.85rem; }
details { margin: 1rem 0; }
summary { cursor: pointer; font-weight: bold; }
svg { margin: 1rem 0; }
"#;
